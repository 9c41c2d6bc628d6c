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

//! The cipher applied to entry bytes at the storage boundary.
//!
//! Archives may store their directory entries encrypted. The block layer
//! does not know the algorithm; it only hands each 128-byte entry slice to a
//! [`Cipher`] when one is present in the [`BlockContext`](crate::blocks::BlockContext).
//! An absent cipher means entries are stored as plaintext.

use bytes::Bytes;

/// A length-preserving transform over one entry slice.
///
/// Implementations must return exactly as many bytes as they are given, and
/// `decode(encode(x))` must equal `x`.
pub trait Cipher {
    /// Decrypts bytes read from storage.
    fn decode(&self, data: &[u8]) -> Bytes;

    /// Encrypts bytes about to be written to storage.
    fn encode(&self, data: &[u8]) -> Bytes;
}
