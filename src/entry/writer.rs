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

//! Writer for directory entries.

use bytes::{BufMut, Bytes, BytesMut};

use crate::constants::ENTRY_SIZE;
use crate::entry::types::Entry;

/// Serializes an entry into its fixed 128-byte form.
///
/// The output is plaintext; applying a cipher is left to the caller.
pub fn write_entry(entry: &Entry) -> Bytes {
    let mut buf = BytesMut::with_capacity(ENTRY_SIZE);

    buf.put_u8(entry.entry_type.as_byte());
    buf.put_slice(&entry.name);
    buf.put_u64_le(entry.access_time);
    buf.put_u64_le(entry.create_time);
    buf.put_u64_le(entry.modify_time);
    buf.put_u64_le(entry.position);
    buf.put_u32_le(entry.size);
    buf.put_u64_le(entry.next_chain);
    buf.put_slice(&entry.padding);

    debug_assert_eq!(buf.len(), ENTRY_SIZE);
    buf.freeze()
}
