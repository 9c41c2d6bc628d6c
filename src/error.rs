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

//! Error types for directory block operations.

use std::io;
use thiserror::Error;

/// The main error type for directory block operations.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// An I/O error occurred in the storage adapter.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A chain walk or persistence call was made without a bound storage adapter.
    #[error("No storage adapter is bound")]
    StorageNotBound,

    /// A block was decoded from a buffer of the wrong length.
    #[error("Malformed block buffer: expected {expected} bytes, got {actual}")]
    MalformedBuffer { expected: usize, actual: usize },

    /// An entry was decoded from a slice of the wrong length.
    #[error("Malformed entry buffer: expected {expected} bytes, got {actual}")]
    MalformedEntry { expected: usize, actual: usize },

    /// The entry type byte is not one of the known types.
    #[error("Unknown entry type: {0}")]
    UnknownEntryType(u8),

    /// More entries were supplied than fit in a single block.
    #[error("Too many entries for one block: {0}")]
    TooManyEntries(usize),

    /// A slot index outside of the block was requested.
    #[error("Invalid slot index: {0}")]
    InvalidSlot(usize),

    /// The configured chain length bound was exceeded while walking a chain.
    /// Only raised when a bound is configured.
    #[error("Chain exceeds the configured maximum of {0} blocks")]
    ChainTooLong(usize),

    /// The storage adapter returned fewer bytes than requested.
    #[error("Unexpected end of storage")]
    UnexpectedEof,

    /// A configuration value was rejected.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// A specialized Result type for directory block operations.
pub type Result<T> = std::result::Result<T, DirectoryError>;
