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


// Helper re-exports for tests
#[doc(hidden)]
pub(crate) mod helpers {
    use std::io::Cursor;

    use bytes::Bytes;
    use rand::distributions::Alphanumeric;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use crate::blocks::{Block, BlockContext};
    use crate::cipher::Cipher;
    use crate::constants::ENTRIES_PER_BLOCK;
    use crate::entry::{Entry, EntryType};
    use crate::storage::StreamStorage;

    pub type MemoryStorage = StreamStorage<Cursor<Vec<u8>>>;
    pub type MemoryContext = BlockContext<MemoryStorage>;

    /// Bytes reserved in front of the first block, so no block lands at offset 0
    /// (which would read as "end of chain" when linked to).
    pub const ARCHIVE_HEADER_SIZE: usize = 256;

    /// A context bound to in-memory storage holding only an archive header.
    pub fn memory_context() -> MemoryContext {
        let storage = StreamStorage::new(Cursor::new(vec![0xEE; ARCHIVE_HEADER_SIZE])).unwrap();
        BlockContext::with_storage(storage)
    }

    /// A copy of everything currently in the context's storage.
    pub fn stored_bytes(ctx: &MemoryContext) -> Vec<u8> {
        ctx.storage().unwrap().get_ref().get_ref().clone()
    }

    /// The raw bytes of the block stored at `offset`.
    pub fn stored_block(ctx: &MemoryContext, offset: u64) -> Vec<u8> {
        let data = stored_bytes(ctx);
        let start = offset as usize;
        data[start..start + crate::constants::BLOCK_SIZE].to_vec()
    }

    /// Twenty file entries, all occupied.
    pub fn occupied_entries(prefix: &str) -> Vec<Entry> {
        (0..ENTRIES_PER_BLOCK)
            .map(|i| Entry::file(&format!("{}_{:02}.dat", prefix, i), 1000 + i as u64, 64))
            .collect()
    }

    /// Appends a fully occupied block, optionally linked to `next`.
    pub fn create_full_block(ctx: &mut MemoryContext, prefix: &str, next: Option<&Block>) -> Block {
        let mut block = Block::create(ctx, &occupied_entries(prefix)).unwrap();
        if let Some(next) = next {
            block.link_to(next.offset());
            block.save(ctx).unwrap();
        }
        block
    }

    pub fn seeded_rng() -> StdRng {
        StdRng::seed_from_u64(0x504b_3200)
    }

    /// An entry with every field randomized.
    pub fn random_entry(rng: &mut StdRng) -> Entry {
        let entry_type = match rng.gen_range(0..3) {
            0 => EntryType::Empty,
            1 => EntryType::Directory,
            _ => EntryType::File,
        };
        let name_len = rng.gen_range(0..80);
        let name: String = (&mut *rng)
            .sample_iter(&Alphanumeric)
            .take(name_len)
            .map(char::from)
            .collect();

        let mut entry = Entry {
            entry_type,
            access_time: rng.gen(),
            create_time: rng.gen(),
            modify_time: rng.gen(),
            position: rng.gen(),
            size: rng.gen(),
            next_chain: rng.gen(),
            padding: rng.gen(),
            ..Default::default()
        };
        entry.set_name(&name);
        entry
    }

    /// Position dependent XOR; decode and encode are the same operation.
    pub struct RollingXor(pub u8);

    impl Cipher for RollingXor {
        fn decode(&self, data: &[u8]) -> Bytes {
            self.encode(data)
        }

        fn encode(&self, data: &[u8]) -> Bytes {
            data.iter()
                .enumerate()
                .map(|(i, b)| b ^ self.0.wrapping_add(i as u8))
                .collect()
        }
    }
}
