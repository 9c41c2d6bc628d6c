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

//! Prints the entries of one directory chain of an unencrypted archive.
//!
//! Usage: `dirdump <archive> <block offset> [max blocks]`

use std::fs::OpenOptions;

use log::info;
use pk2dir::blocks::{Block, BlockContext, BlockContextConfig};
use pk2dir::entry::EntryType;
use pk2dir::storage::StreamStorage;

fn parse_offset(arg: &str) -> Result<u64, std::num::ParseIntError> {
    match arg.strip_prefix("0x") {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => arg.parse(),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: {} <archive> <block offset> [max blocks]", args[0]);
        std::process::exit(2);
    }

    let offset = parse_offset(&args[2])?;
    let config = match args.get(3) {
        Some(max) => BlockContextConfig::with_max_chain_length(max.parse()?)?,
        None => BlockContextConfig::default(),
    };

    // StreamStorage needs a writable handle
    let file = OpenOptions::new().read(true).write(true).open(&args[1])?;
    let mut ctx = BlockContext::with_config(config);
    ctx.bind_storage(StreamStorage::new(file)?);

    info!("Dumping chain at offset {} of {}", offset, args[1]);
    let root = Block::load(&mut ctx, offset)?;
    let chain = root.collect(&mut ctx)?;

    for block in &chain {
        println!("block @ {:#x} (next {:#x})", block.offset(), block.next_chain());
        for (slot, entry) in block.entries().iter().enumerate() {
            let kind = match entry.entry_type() {
                EntryType::Empty => continue,
                EntryType::Directory => "dir ",
                EntryType::File => "file",
            };
            println!(
                "  [{:02}] {} {:<40} pos={:#x} size={}",
                slot,
                kind,
                entry.name(),
                entry.position,
                entry.size
            );
        }
    }

    let free = chain.first_empty_entry();
    match free.and_then(|entry| entry.location()) {
        Some(location) => println!(
            "first free slot: block {:#x} slot {}",
            location.block_offset, location.slot
        ),
        None => println!("chain is full"),
    }

    Ok(())
}
