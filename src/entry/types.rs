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

//! Common definitions for directory entries.

use crate::constants::{ENTRY_NAME_SIZE, ENTRY_PADDING_SIZE};

/// Enumeration of entry types.
///
/// Each entry type is represented by a single byte at the start of the entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryType {
    /// Unused slot (0x00)
    #[default]
    Empty = 0x00,
    /// Directory, `position` points at its first block (0x01)
    Directory = 0x01,
    /// File, `position` and `size` describe its data (0x02)
    File = 0x02,
}

impl EntryType {
    /// Convert the EntryType enum to its byte representation.
    pub fn as_byte(&self) -> u8 {
        *self as u8
    }

    /// Convert a byte to EntryType, if valid.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x00 => Some(EntryType::Empty),
            0x01 => Some(EntryType::Directory),
            0x02 => Some(EntryType::File),
            _ => None,
        }
    }
}

/// Where a decoded entry lives: the offset of its owning block and its slot.
///
/// This is a plain value, not a reference to the block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryLocation {
    /// Offset of the owning block in the backing storage.
    pub block_offset: u64,
    /// Slot index within the owning block (0..20).
    pub slot: usize,
}

impl EntryLocation {
    pub fn new(block_offset: u64, slot: usize) -> Self {
        Self { block_offset, slot }
    }
}

/// One 128-byte directory record.
///
/// Layout (little endian):
/// - type (1 byte)
/// - name (81 bytes, NUL padded)
/// - access_time, create_time, modify_time (8 bytes each)
/// - position (8 bytes)
/// - size (4 bytes)
/// - next_chain (8 bytes), only meaningful in the chain slot
/// - padding (2 bytes)
///
/// Equality compares the record fields only; the location tag is ignored.
#[derive(Debug, Clone)]
pub struct Entry {
    pub entry_type: EntryType,
    pub name: [u8; ENTRY_NAME_SIZE],
    pub access_time: u64,
    pub create_time: u64,
    pub modify_time: u64,
    pub position: u64,
    pub size: u32,
    pub next_chain: u64,
    pub padding: [u8; ENTRY_PADDING_SIZE],
    pub(crate) location: Option<EntryLocation>,
}

impl Default for Entry {
    fn default() -> Self {
        Self {
            entry_type: EntryType::Empty,
            name: [0u8; ENTRY_NAME_SIZE],
            access_time: 0,
            create_time: 0,
            modify_time: 0,
            position: 0,
            size: 0,
            next_chain: 0,
            padding: [0u8; ENTRY_PADDING_SIZE],
            location: None,
        }
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.entry_type == other.entry_type
            && self.name == other.name
            && self.access_time == other.access_time
            && self.create_time == other.create_time
            && self.modify_time == other.modify_time
            && self.position == other.position
            && self.size == other.size
            && self.next_chain == other.next_chain
            && self.padding == other.padding
    }
}

impl Eq for Entry {}

impl Entry {
    /// Creates a directory entry pointing at the block at `position`.
    pub fn directory(name: &str, position: u64) -> Self {
        let mut entry = Self {
            entry_type: EntryType::Directory,
            position,
            ..Default::default()
        };
        entry.set_name(name);
        entry
    }

    /// Creates a file entry whose data lives at `position`.
    pub fn file(name: &str, position: u64, size: u32) -> Self {
        let mut entry = Self {
            entry_type: EntryType::File,
            position,
            size,
            ..Default::default()
        };
        entry.set_name(name);
        entry
    }

    pub fn entry_type(&self) -> EntryType {
        self.entry_type
    }

    pub fn is_empty(&self) -> bool {
        self.entry_type == EntryType::Empty
    }

    pub fn next_chain(&self) -> u64 {
        self.next_chain
    }

    pub fn set_next_chain(&mut self, offset: u64) {
        self.next_chain = offset;
    }

    /// Returns the name up to the first NUL byte.
    pub fn name(&self) -> String {
        let end = self
            .name
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(ENTRY_NAME_SIZE);
        String::from_utf8_lossy(&self.name[..end]).into_owned()
    }

    /// Sets the name, truncating so that at least one terminating NUL remains.
    pub fn set_name(&mut self, name: &str) {
        self.name = [0u8; ENTRY_NAME_SIZE];
        let bytes = name.as_bytes();
        let len = bytes.len().min(ENTRY_NAME_SIZE - 1);
        self.name[..len].copy_from_slice(&bytes[..len]);
    }

    /// Location of this entry, if it was decoded from a block.
    pub fn location(&self) -> Option<EntryLocation> {
        self.location
    }

    pub(crate) fn with_location(mut self, location: EntryLocation) -> Self {
        self.location = Some(location);
        self
    }
}
