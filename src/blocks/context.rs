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

//! The handle through which blocks reach storage and the cipher.

use bytes::Bytes;
use log::debug;

use crate::cipher::Cipher;
use crate::error::{DirectoryError, Result};
use crate::storage::Storage;

/// Configuration options for a [`BlockContext`].
#[derive(Debug, Clone)]
pub struct BlockContextConfig {
    /// Whether `save` and `create` encrypt entries when a cipher is present
    /// (default: true).
    ///
    /// With `false`, blocks are always written as plaintext even though they
    /// are decrypted on read. Such blocks do not read back correctly under the
    /// same cipher; the option exists to reproduce archives written that way.
    pub encrypt_on_write: bool,

    /// Upper bound on the number of blocks a chain walk may visit (default: none).
    ///
    /// Without a bound a chain that links back to an earlier block is walked
    /// forever.
    pub max_chain_length: Option<usize>,
}

impl Default for BlockContextConfig {
    fn default() -> Self {
        Self {
            encrypt_on_write: true,
            max_chain_length: None,
        }
    }
}

impl BlockContextConfig {
    /// Creates a config that stops chain walks after `max_blocks` blocks.
    ///
    /// Returns an error if `max_blocks` is zero, since every chain holds at
    /// least its first block.
    pub fn with_max_chain_length(max_blocks: usize) -> Result<Self> {
        if max_blocks == 0 {
            return Err(DirectoryError::InvalidConfig(
                "max_chain_length must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            max_chain_length: Some(max_blocks),
            ..Default::default()
        })
    }

    /// Sets whether writes are encrypted when a cipher is present.
    pub fn encrypt_on_write(mut self, enabled: bool) -> Self {
        self.encrypt_on_write = enabled;
        self
    }
}

/// Storage and cipher bound for block operations.
///
/// A context starts unbound. Chain walks and persistence fail with
/// [`DirectoryError::StorageNotBound`] until a storage is bound; an absent
/// cipher means entries pass through untouched.
pub struct BlockContext<S: Storage> {
    storage: Option<S>,
    cipher: Option<Box<dyn Cipher>>,
    config: BlockContextConfig,
}

impl<S: Storage> Default for BlockContext<S> {
    fn default() -> Self {
        Self::with_config(BlockContextConfig::default())
    }
}

impl<S: Storage> BlockContext<S> {
    /// Creates an unbound context with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an unbound context with custom configuration.
    pub fn with_config(config: BlockContextConfig) -> Self {
        Self {
            storage: None,
            cipher: None,
            config,
        }
    }

    /// Creates a context bound to `storage`, with default configuration.
    pub fn with_storage(storage: S) -> Self {
        let mut context = Self::default();
        context.bind_storage(storage);
        context
    }

    /// Binds a storage, returning the previously bound one.
    pub fn bind_storage(&mut self, storage: S) -> Option<S> {
        debug!("Binding storage");
        self.storage.replace(storage)
    }

    /// Unbinds and returns the current storage.
    pub fn unbind_storage(&mut self) -> Option<S> {
        debug!("Unbinding storage");
        self.storage.take()
    }

    pub fn is_bound(&self) -> bool {
        self.storage.is_some()
    }

    /// Returns a reference to the bound storage, if any.
    pub fn storage(&self) -> Option<&S> {
        self.storage.as_ref()
    }

    /// Returns the bound storage or fails with `StorageNotBound`.
    pub fn storage_mut(&mut self) -> Result<&mut S> {
        self.storage.as_mut().ok_or(DirectoryError::StorageNotBound)
    }

    /// Installs a cipher, returning the previous one.
    pub fn set_cipher<C: Cipher + 'static>(&mut self, cipher: C) -> Option<Box<dyn Cipher>> {
        debug!("Installing entry cipher");
        self.cipher.replace(Box::new(cipher))
    }

    /// Removes and returns the current cipher.
    pub fn clear_cipher(&mut self) -> Option<Box<dyn Cipher>> {
        self.cipher.take()
    }

    /// Returns the current cipher, if any.
    pub fn cipher(&self) -> Option<&dyn Cipher> {
        self.cipher.as_deref()
    }

    pub fn config(&self) -> &BlockContextConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut BlockContextConfig {
        &mut self.config
    }

    /// The cipher to apply on the write path, honoring `encrypt_on_write`.
    pub(crate) fn write_cipher(&self) -> Option<&dyn Cipher> {
        if self.config.encrypt_on_write {
            self.cipher()
        } else {
            None
        }
    }
}

/// Applies `cipher` to one entry slice read from storage.
pub(crate) fn decode_slice(cipher: Option<&dyn Cipher>, slice: &[u8]) -> Bytes {
    match cipher {
        Some(cipher) => cipher.decode(slice),
        None => Bytes::copy_from_slice(slice),
    }
}
