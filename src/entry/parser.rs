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

//! Parser for directory entries.

use bytes::Buf;

use crate::constants::{ENTRY_NAME_SIZE, ENTRY_PADDING_SIZE, ENTRY_SIZE};
use crate::entry::types::{Entry, EntryLocation, EntryType};
use crate::error::{DirectoryError, Result};

/// Parses one directory entry from a 128-byte slice.
///
/// The slice must already be decrypted. The returned entry is tagged with
/// `location` so callers can tell which block and slot it came from.
///
/// # Errors
///
/// Returns an error if:
/// - The slice is not exactly 128 bytes long
/// - The type byte is not a known entry type
///
/// # Example
///
/// ```
/// use pk2dir::entry::{parse_entry, write_entry, Entry, EntryLocation};
///
/// let entry = Entry::file("readme.txt", 8192, 64);
/// let bytes = write_entry(&entry);
///
/// let parsed = parse_entry(&bytes, EntryLocation::new(0, 4)).unwrap();
/// assert_eq!(parsed, entry);
/// assert_eq!(parsed.location().unwrap().slot, 4);
/// ```
pub fn parse_entry(slice: &[u8], location: EntryLocation) -> Result<Entry> {
    if slice.len() != ENTRY_SIZE {
        return Err(DirectoryError::MalformedEntry {
            expected: ENTRY_SIZE,
            actual: slice.len(),
        });
    }

    let mut buf = slice;

    let type_byte = buf.get_u8();
    let entry_type =
        EntryType::from_byte(type_byte).ok_or(DirectoryError::UnknownEntryType(type_byte))?;

    let mut name = [0u8; ENTRY_NAME_SIZE];
    buf.copy_to_slice(&mut name);

    let access_time = buf.get_u64_le();
    let create_time = buf.get_u64_le();
    let modify_time = buf.get_u64_le();
    let position = buf.get_u64_le();
    let size = buf.get_u32_le();
    let next_chain = buf.get_u64_le();

    let mut padding = [0u8; ENTRY_PADDING_SIZE];
    buf.copy_to_slice(&mut padding);

    let entry = Entry {
        entry_type,
        name,
        access_time,
        create_time,
        modify_time,
        position,
        size,
        next_chain,
        padding,
        ..Default::default()
    };

    Ok(entry.with_location(location))
}
