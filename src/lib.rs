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

//! pk2dir reads and writes the directory blocks of PK2 archives.
//!
//! A PK2 directory is a chain of 2560-byte blocks, each holding 20 entries of
//! 128 bytes. The last entry of a block doubles as the link to the next block
//! of the same directory. Entries may be stored encrypted.
//!
//! # Example
//!
//! ```
//! use std::io::Cursor;
//! use pk2dir::blocks::{Block, BlockContext};
//! use pk2dir::entry::Entry;
//! use pk2dir::storage::StreamStorage;
//!
//! // Reserve a header so no block starts at offset 0
//! let storage = StreamStorage::new(Cursor::new(vec![0u8; 256])).unwrap();
//! let mut ctx = BlockContext::with_storage(storage);
//!
//! let mut root = Block::create(&mut ctx, &[Entry::directory(".", 256)]).unwrap();
//! let next = Block::create(&mut ctx, &[Entry::file("readme.txt", 9000, 12)]).unwrap();
//! root.link_to(next.offset());
//! root.save(&mut ctx).unwrap();
//!
//! let chain = root.collect(&mut ctx).unwrap();
//! assert_eq!(chain.len(), 2);
//! assert!(chain.find_by_name("readme.txt").is_some());
//!
//! let free = root.first_empty_entry(&mut ctx).unwrap().unwrap();
//! assert_eq!(free.location().unwrap().slot, 1);
//! ```

pub mod blocks;
pub mod cipher;
pub mod constants;
pub mod entry;
pub mod error;
pub mod storage;

// Re-exports for a cleaner API
pub use blocks::{Block, BlockCollection, BlockContext, BlockContextConfig, NextBlock};
pub use cipher::Cipher;
pub use entry::{Entry, EntryLocation, EntryType};
pub use error::{DirectoryError, Result};
pub use storage::{Storage, StreamStorage};
