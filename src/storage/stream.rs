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

use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};

use bytes::{Bytes, BytesMut};
use log::trace;

use crate::error::{DirectoryError, Result};
use crate::storage::Storage;

/// A [`Storage`] over any `Read + Write + Seek` source.
///
/// The current position is tracked as reads, writes and seeks occur, so
/// consecutive accesses at adjacent offsets (walking blocks laid out back to
/// back) skip the seek. A failed read or write leaves the source's cursor
/// wherever the failure stopped it, so the tracked position is dropped and the
/// next access always seeks.
pub struct StreamStorage<Source: Read + Write + Seek> {
    /// The underlying source
    source: Source,

    /// The current position in the source, `None` when unknown
    position: Option<u64>,
}

impl<Source: Read + Write + Seek> StreamStorage<Source> {
    /// Create a new StreamStorage wrapping the given source.
    pub fn new(mut source: Source) -> Result<Self> {
        let position = source.stream_position()?;
        Ok(Self {
            source,
            position: Some(position),
        })
    }

    /// Returns the tracked position in the source, or `None` after a failed
    /// access until the next seek.
    pub fn position(&self) -> Option<u64> {
        self.position
    }

    /// Returns a reference to the underlying source.
    pub fn get_ref(&self) -> &Source {
        &self.source
    }

    /// Returns a mutable reference to the underlying source.
    ///
    /// Moving the source's cursor directly leaves the tracked position stale;
    /// call [`StreamStorage::sync_position`] afterwards.
    pub fn get_mut(&mut self) -> &mut Source {
        &mut self.source
    }

    /// Returns the underlying source, consuming self.
    pub fn into_inner(self) -> Source {
        self.source
    }

    /// Re-reads the position from the underlying source.
    pub fn sync_position(&mut self) -> Result<u64> {
        let position = self.source.stream_position()?;
        self.position = Some(position);
        Ok(position)
    }

    fn seek_to(&mut self, offset: u64) -> Result<()> {
        if self.position != Some(offset) {
            self.position = None;
            self.position = Some(self.source.seek(SeekFrom::Start(offset))?);
        }
        Ok(())
    }

    fn write_through(&mut self, data: &[u8]) -> std::io::Result<()> {
        let result = self
            .source
            .write_all(data)
            .and_then(|()| self.source.flush());
        match result {
            Ok(()) => {
                self.position = self.position.map(|p| p + data.len() as u64);
                Ok(())
            }
            Err(e) => {
                self.position = None;
                Err(e)
            }
        }
    }
}

impl<Source: Read + Write + Seek> Storage for StreamStorage<Source> {
    fn read_range(&mut self, offset: u64, length: u64) -> Result<Bytes> {
        self.seek_to(offset)?;

        let mut buffer = BytesMut::zeroed(length as usize);
        if let Err(e) = self.source.read_exact(&mut buffer) {
            // read_exact leaves the cursor unspecified on failure
            self.position = None;
            return Err(match e.kind() {
                ErrorKind::UnexpectedEof => DirectoryError::UnexpectedEof,
                _ => DirectoryError::Io(e),
            });
        }
        self.position = self.position.map(|p| p + length);

        trace!("Read {} bytes at offset {}", length, offset);
        Ok(buffer.freeze())
    }

    fn write_range(&mut self, data: &[u8], offset: u64) -> Result<()> {
        self.seek_to(offset)?;
        self.write_through(data)?;

        trace!("Wrote {} bytes at offset {}", data.len(), offset);
        Ok(())
    }

    fn append(&mut self, data: &[u8]) -> Result<u64> {
        self.position = None;
        let offset = self.source.seek(SeekFrom::End(0))?;
        self.position = Some(offset);

        self.write_through(data)?;

        trace!("Appended {} bytes at offset {}", data.len(), offset);
        Ok(offset)
    }
}
