// Copyright 2024
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::blocks::block::Block;
use crate::entry::Entry;

/// The blocks of one chain, in the order the links were followed.
///
/// Built by [`Block::collect`]; never persisted as a whole. Save the
/// individual blocks instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockCollection {
    /// Never empty.
    blocks: Vec<Block>,
}

impl BlockCollection {
    pub(crate) fn new(blocks: Vec<Block>) -> Self {
        debug_assert!(!blocks.is_empty());
        Self { blocks }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn blocks_mut(&mut self) -> &mut [Block] {
        &mut self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Always false; a chain holds at least its first block.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn first(&self) -> &Block {
        &self.blocks[0]
    }

    pub fn last(&self) -> &Block {
        &self.blocks[self.blocks.len() - 1]
    }

    pub(crate) fn into_last(mut self) -> Block {
        let last = self.blocks.len() - 1;
        self.blocks.swap_remove(last)
    }

    /// All entries of the chain, in block order then slot order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> + '_ {
        self.blocks.iter().flat_map(|block| block.entries().iter())
    }

    /// The first entry whose type is empty, if any.
    pub fn first_empty_entry(&self) -> Option<&Entry> {
        self.entries().find(|entry| entry.is_empty())
    }

    /// The first entry whose name matches `name` exactly, skipping empty slots.
    pub fn find_by_name(&self, name: &str) -> Option<&Entry> {
        self.entries()
            .filter(|entry| !entry.is_empty())
            .find(|entry| entry.name() == name)
    }

    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }
}

impl IntoIterator for BlockCollection {
    type Item = Block;
    type IntoIter = std::vec::IntoIter<Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.into_iter()
    }
}

impl<'a> IntoIterator for &'a BlockCollection {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}
