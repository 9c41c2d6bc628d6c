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

//! Directory entry records.
//!
//! Every directory block holds 20 fixed-size entries of 128 bytes:
//!
//! ```text
//! +------+---------+-------------+-------------+-------------+----------+------+------------+---------+
//! | type |  name   | access_time | create_time | modify_time | position | size | next_chain | padding |
//! |  1   |   81    |      8      |      8      |      8      |    8     |  4   |     8      |    2    |
//! +------+---------+-------------+-------------+-------------+----------+------+------------+---------+
//! ```

pub mod parser;
pub mod types;
pub mod writer;

pub use parser::parse_entry;
pub use types::{Entry, EntryLocation, EntryType};
pub use writer::write_entry;
