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

use bytes::{BufMut, Bytes, BytesMut};
use log::{debug, trace, warn};

use crate::blocks::collection::BlockCollection;
use crate::blocks::context::{decode_slice, BlockContext};
use crate::cipher::Cipher;
use crate::constants::{BLOCK_SIZE, CHAIN_SLOT, ENTRIES_PER_BLOCK, ENTRY_SIZE, END_OF_CHAIN};
use crate::entry::{parse_entry, write_entry, Entry, EntryLocation};
use crate::error::{DirectoryError, Result};
use crate::storage::Storage;

/// Result of following a block's chain link.
#[derive(Debug)]
pub enum NextBlock<'a> {
    /// The block has no link; holds the block itself.
    Terminal(&'a Block),
    /// The block linked to another block, which was loaded from storage.
    Linked(Block),
}

impl NextBlock<'_> {
    pub fn is_terminal(&self) -> bool {
        matches!(self, NextBlock::Terminal(_))
    }

    /// Returns the block reached, cloning the terminal block if needed.
    pub fn into_block(self) -> Block {
        match self {
            NextBlock::Terminal(block) => block.clone(),
            NextBlock::Linked(block) => block,
        }
    }
}

/// A directory block: 20 entries stored at a fixed offset.
///
/// Slot 19 doubles as the chain link: a non-zero `next_chain` in that entry is
/// the absolute offset of the next block of the same directory. Zero always
/// ends the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    entries: [Entry; ENTRIES_PER_BLOCK],
    offset: u64,
}

impl Block {
    /// Decodes a block from its 2560-byte form.
    ///
    /// Each 128-byte slice is passed through `cipher` when one is given, then
    /// parsed and tagged with this block's offset and its slot. The same cipher
    /// applies to every slice: a context's cipher cannot be swapped while one
    /// of its blocks is being decoded.
    ///
    /// # Errors
    ///
    /// Returns `MalformedBuffer` if `buffer` is not exactly 2560 bytes. No
    /// partial block is returned.
    pub fn decode(buffer: &[u8], offset: u64, cipher: Option<&dyn Cipher>) -> Result<Self> {
        if buffer.len() != BLOCK_SIZE {
            return Err(DirectoryError::MalformedBuffer {
                expected: BLOCK_SIZE,
                actual: buffer.len(),
            });
        }

        let mut entries: [Entry; ENTRIES_PER_BLOCK] = std::array::from_fn(|_| Entry::default());
        for (slot, chunk) in buffer.chunks_exact(ENTRY_SIZE).enumerate() {
            let plain = decode_slice(cipher, chunk);
            entries[slot] = parse_entry(&plain, EntryLocation::new(offset, slot))?;
            trace!(
                "Decoded slot {} of block at {}: {:?}",
                slot,
                offset,
                entries[slot].entry_type()
            );
        }

        Ok(Self { entries, offset })
    }

    /// Decodes a block using the context's current cipher.
    pub fn from_bytes<S: Storage>(buffer: &[u8], offset: u64, ctx: &BlockContext<S>) -> Result<Self> {
        Self::decode(buffer, offset, ctx.cipher())
    }

    /// Reads and decodes the block stored at `offset`.
    pub fn load<S: Storage>(ctx: &mut BlockContext<S>, offset: u64) -> Result<Self> {
        let buffer = ctx.storage_mut()?.read_range(offset, BLOCK_SIZE as u64)?;
        debug!("Loaded block at offset {}", offset);
        Self::from_bytes(&buffer, offset, ctx)
    }

    /// Offset of this block in storage.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Returns the entry in `slot`.
    pub fn entry(&self, slot: usize) -> Result<&Entry> {
        self.entries.get(slot).ok_or(DirectoryError::InvalidSlot(slot))
    }

    /// Returns the entry in `slot` for modification. Changes reach storage on `save`.
    pub fn entry_mut(&mut self, slot: usize) -> Result<&mut Entry> {
        self.entries.get_mut(slot).ok_or(DirectoryError::InvalidSlot(slot))
    }

    /// Replaces the entry in `slot`, tagging it with this block's location.
    pub fn set_entry(&mut self, slot: usize, entry: Entry) -> Result<()> {
        let location = EntryLocation::new(self.offset, slot);
        let target = self.entry_mut(slot)?;
        *target = entry.with_location(location);
        Ok(())
    }

    /// Offset of the next block in the chain, or 0 at the end of the chain.
    pub fn next_chain(&self) -> u64 {
        self.entries[CHAIN_SLOT].next_chain()
    }

    /// Whether the chain continues past this block.
    pub fn has_next(&self) -> bool {
        self.next_chain() > END_OF_CHAIN
    }

    /// Points this block's chain slot at the block stored at `next_offset`.
    ///
    /// Pass 0 to end the chain here.
    pub fn link_to(&mut self, next_offset: u64) {
        self.entries[CHAIN_SLOT].set_next_chain(next_offset);
    }

    /// Follows the chain link.
    ///
    /// Returns [`NextBlock::Terminal`] holding `self` when there is no link,
    /// otherwise reads the linked block from storage.
    ///
    /// # Errors
    ///
    /// Returns `StorageNotBound` if the context has no storage, whether or not
    /// the block has a link.
    pub fn next_block<S: Storage>(&self, ctx: &mut BlockContext<S>) -> Result<NextBlock<'_>> {
        if !ctx.is_bound() {
            return Err(DirectoryError::StorageNotBound);
        }

        if !self.has_next() {
            return Ok(NextBlock::Terminal(self));
        }

        Block::load(ctx, self.next_chain()).map(NextBlock::Linked)
    }

    /// Walks the chain starting at this block.
    ///
    /// The collection holds this block first, then every linked block in the
    /// order the links were followed, ending with the first block whose chain
    /// slot is 0.
    ///
    /// A chain that links back to one of its own blocks never ends unless the
    /// context config sets `max_chain_length`, in which case the walk fails with
    /// `ChainTooLong` once the bound is passed.
    pub fn collect<S: Storage>(&self, ctx: &mut BlockContext<S>) -> Result<BlockCollection> {
        if !ctx.is_bound() {
            return Err(DirectoryError::StorageNotBound);
        }

        let max_blocks = ctx.config().max_chain_length;
        let mut blocks = vec![self.clone()];

        loop {
            let current = &blocks[blocks.len() - 1];
            if !current.has_next() {
                break;
            }

            if let Some(max) = max_blocks {
                if blocks.len() >= max {
                    warn!(
                        "Chain starting at {} exceeds {} blocks, stopping walk",
                        self.offset, max
                    );
                    return Err(DirectoryError::ChainTooLong(max));
                }
            }

            let next = match current.next_block(ctx)? {
                NextBlock::Linked(block) => block,
                NextBlock::Terminal(_) => break,
            };
            blocks.push(next);
        }

        debug!(
            "Collected {} blocks starting at offset {}",
            blocks.len(),
            self.offset
        );
        Ok(BlockCollection::new(blocks))
    }

    /// Returns the final block of the chain starting at this block.
    pub fn last_block<S: Storage>(&self, ctx: &mut BlockContext<S>) -> Result<Block> {
        Ok(self.collect(ctx)?.into_last())
    }

    /// Returns the first empty entry of the chain, in block then slot order.
    ///
    /// `None` means every entry of the chain is in use; the chain is not
    /// extended. Use [`Block::create`] and [`Block::link_to`] to add space.
    pub fn first_empty_entry<S: Storage>(&self, ctx: &mut BlockContext<S>) -> Result<Option<Entry>> {
        Ok(self.collect(ctx)?.first_empty_entry().cloned())
    }

    /// Serializes the 20 entries into the 2560-byte block form.
    ///
    /// The output is plaintext. The cipher is only applied on the way to
    /// storage by [`Block::save`] and [`Block::create`].
    pub fn to_bytes(&self) -> Bytes {
        encode_entries(self.entries.iter(), None)
    }

    /// Overwrites this block in storage at its own offset.
    ///
    /// Entries are encrypted with the context's cipher unless the config
    /// disables `encrypt_on_write`.
    pub fn save<S: Storage>(&self, ctx: &mut BlockContext<S>) -> Result<()> {
        let buffer = encode_entries(self.entries.iter(), ctx.write_cipher());
        ctx.storage_mut()?.write_range(&buffer, self.offset)?;

        debug!("Saved block at offset {}", self.offset);
        Ok(())
    }

    /// Appends a new block to storage and returns it.
    ///
    /// `entries` fill the slots in order; missing slots are empty entries. The
    /// returned block is decoded from the bytes written, through the context's
    /// cipher, and placed at the offset storage reported. The new block is not
    /// linked into any chain.
    ///
    /// # Errors
    ///
    /// Returns `StorageNotBound` if the context has no storage and
    /// `TooManyEntries` if more than 20 entries are given. Decoding happens
    /// before the append, so a buffer that does not decode leaves storage
    /// untouched.
    pub fn create<S: Storage>(ctx: &mut BlockContext<S>, entries: &[Entry]) -> Result<Self> {
        if !ctx.is_bound() {
            return Err(DirectoryError::StorageNotBound);
        }
        if entries.len() > ENTRIES_PER_BLOCK {
            return Err(DirectoryError::TooManyEntries(entries.len()));
        }

        let empty = Entry::default();
        let padded = entries
            .iter()
            .chain(std::iter::repeat(&empty))
            .take(ENTRIES_PER_BLOCK);
        let buffer = encode_entries(padded, ctx.write_cipher());
        let block = Self::from_bytes(&buffer, 0, ctx)?;

        let offset = ctx.storage_mut()?.append(&buffer)?;
        debug!(
            "Created block at offset {} with {} entries",
            offset,
            entries.len()
        );

        Ok(block.relocated(offset))
    }

    /// Moves the block to `offset`, re-tagging every entry.
    fn relocated(mut self, offset: u64) -> Self {
        for (slot, entry) in self.entries.iter_mut().enumerate() {
            entry.location = Some(EntryLocation::new(offset, slot));
        }
        self.offset = offset;
        self
    }
}

/// Writes entries back to back, passing each through `cipher` when given.
fn encode_entries<'a>(entries: impl Iterator<Item = &'a Entry>, cipher: Option<&dyn Cipher>) -> Bytes {
    let mut buffer = BytesMut::with_capacity(BLOCK_SIZE);
    for entry in entries {
        let plain = write_entry(entry);
        match cipher {
            Some(cipher) => buffer.put_slice(&cipher.encode(&plain)),
            None => buffer.put_slice(&plain),
        }
    }
    buffer.freeze()
}
