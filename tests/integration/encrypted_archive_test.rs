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

//! Integration tests for archives whose entries are stored encrypted.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};

use bytes::Bytes;
use tempfile::NamedTempFile;

use pk2dir::blocks::{Block, BlockContext, BlockContextConfig};
use pk2dir::cipher::Cipher;
use pk2dir::constants::{BLOCK_SIZE, ENTRY_SIZE};
use pk2dir::entry::Entry;
use pk2dir::error::Result;
use pk2dir::storage::StreamStorage;

const HEADER_SIZE: usize = 256;

/// Keyed byte substitution, standing in for a real block cipher.
struct KeyedXor {
    key: Vec<u8>,
}

impl KeyedXor {
    fn new(key: &[u8]) -> Self {
        Self { key: key.to_vec() }
    }
}

impl Cipher for KeyedXor {
    fn decode(&self, data: &[u8]) -> Bytes {
        data.iter()
            .zip(self.key.iter().cycle())
            .map(|(b, k)| b ^ k)
            .collect()
    }

    fn encode(&self, data: &[u8]) -> Bytes {
        self.decode(data)
    }
}

fn new_archive() -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(&[0u8; HEADER_SIZE]).unwrap();
    file.flush().unwrap();
    file
}

fn open_with(file: &NamedTempFile, config: BlockContextConfig) -> Result<BlockContext<StreamStorage<File>>> {
    let handle = OpenOptions::new().read(true).write(true).open(file.path())?;
    let mut ctx = BlockContext::with_config(config);
    ctx.bind_storage(StreamStorage::new(handle)?);
    ctx.set_cipher(KeyedXor::new(b"169841"));
    Ok(ctx)
}

fn raw_block(file: &NamedTempFile, offset: u64) -> Vec<u8> {
    let mut handle = File::open(file.path()).unwrap();
    handle.seek(SeekFrom::Start(offset)).unwrap();
    let mut buffer = vec![0u8; BLOCK_SIZE];
    handle.read_exact(&mut buffer).unwrap();
    buffer
}

#[test]
fn test_encrypted_chain_round_trip() -> Result<()> {
    let archive = new_archive();

    let (root_offset, expected) = {
        let mut ctx = open_with(&archive, BlockContextConfig::default())?;
        let entries = vec![
            Entry::directory(".", 0),
            Entry::file("Media.txt", 1 << 20, 2048),
            Entry::file("Type.txt", 2 << 20, 96),
        ];
        let tail = Block::create(&mut ctx, &[Entry::file("late.bin", 3 << 20, 5)])?;
        let mut root = Block::create(&mut ctx, &entries)?;
        root.link_to(tail.offset());
        root.save(&mut ctx)?;
        (root.offset(), entries)
    };

    // Nothing readable in the raw file
    let raw = raw_block(&archive, root_offset);
    assert!(!raw.windows(9).any(|w| w == b"Media.txt"));

    let mut ctx = open_with(&archive, BlockContextConfig::default())?;
    let root = Block::load(&mut ctx, root_offset)?;
    assert_eq!(&root.entries()[..3], &expected[..]);

    let chain = root.collect(&mut ctx)?;
    assert_eq!(chain.len(), 2);
    assert!(chain.find_by_name("late.bin").is_some());

    Ok(())
}

#[test]
fn test_plaintext_write_mode_leaves_bytes_unencrypted() -> Result<()> {
    let archive = new_archive();
    let config = BlockContextConfig::default().encrypt_on_write(false);

    let mut ctx = open_with(&archive, BlockContextConfig::default())?;
    let mut block = Block::create(&mut ctx, &[Entry::file("before.txt", 1, 1)])?;
    drop(ctx);

    let mut ctx = open_with(&archive, config)?;
    block.set_entry(1, Entry::file("after.txt", 2, 2))?;
    block.save(&mut ctx)?;

    let raw = raw_block(&archive, block.offset());
    assert_eq!(raw, block.to_bytes().to_vec());
    assert_eq!(&raw[ENTRY_SIZE + 1..ENTRY_SIZE + 10], b"after.txt");

    Ok(())
}
