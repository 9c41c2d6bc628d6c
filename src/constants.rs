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

//! Constants describing the on-disk directory block layout.

/// Size of one serialized directory entry in bytes.
pub const ENTRY_SIZE: usize = 128;

/// Number of entries held by every directory block.
pub const ENTRIES_PER_BLOCK: usize = 20;

/// Size of one serialized directory block in bytes (20 x 128).
pub const BLOCK_SIZE: usize = ENTRY_SIZE * ENTRIES_PER_BLOCK;

/// Index of the slot whose next chain pointer links to the following block.
pub const CHAIN_SLOT: usize = ENTRIES_PER_BLOCK - 1;

/// Size of the NUL padded name field of an entry.
pub const ENTRY_NAME_SIZE: usize = 81;

/// Size of the trailing padding of an entry.
pub const ENTRY_PADDING_SIZE: usize = 2;

/// Next chain pointer value marking the end of a chain.
pub const END_OF_CHAIN: u64 = 0;
