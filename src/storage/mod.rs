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

//! Random-access storage backing an archive.
//!
//! The block layer reads, overwrites and appends whole blocks at absolute
//! byte offsets through the [`Storage`] trait. [`StreamStorage`] adapts any
//! `Read + Write + Seek` source, such as a `File` or a `Cursor<Vec<u8>>`.

pub mod stream;

pub use stream::StreamStorage;

use bytes::Bytes;

use crate::error::Result;

/// Byte-range access to the backing medium.
pub trait Storage {
    /// Reads exactly `length` bytes starting at `offset`.
    ///
    /// Fails with [`DirectoryError::UnexpectedEof`](crate::error::DirectoryError::UnexpectedEof)
    /// when fewer bytes are available.
    fn read_range(&mut self, offset: u64, length: u64) -> Result<Bytes>;

    /// Overwrites bytes in place starting at `offset`.
    fn write_range(&mut self, data: &[u8], offset: u64) -> Result<()>;

    /// Writes bytes at the end of the medium and returns the offset they were written at.
    fn append(&mut self, data: &[u8]) -> Result<u64>;
}
