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

//! Directory blocks and block chains.
//!
//! A directory is stored as a chain of fixed-size blocks. Each block holds 20
//! entries of 128 bytes; the entry in slot 19 also carries the offset of the
//! next block of the chain.
//!
//! # Key Components
//!
//! - [`block::Block`]: decodes, walks, serializes and persists one block.
//! - [`collection::BlockCollection`]: the blocks of a chain with a flat view of their entries.
//! - [`context::BlockContext`]: the storage and optional cipher blocks operate through.
//!
//! # Block Structure
//!
//! ```text
//! +----------+----------+-----+-----------+-----------------------+
//! | entry 0  | entry 1  | ... | entry 18  | entry 19 (chain link) |
//! | 128 B    | 128 B    |     | 128 B     | 128 B                 |
//! +----------+----------+-----+-----------+-----------------------+
//!                                              |
//!                                              | next_chain > 0
//!                                              v
//!                                          next block (2560 bytes)
//! ```
//!
//! A `next_chain` of 0 ends the chain.

pub mod block;
pub mod collection;
pub mod context;

pub use block::{Block, NextBlock};
pub use collection::BlockCollection;
pub use context::{BlockContext, BlockContextConfig};

#[cfg(test)]
mod tests;
