use std::collections::BTreeMap;

use log::debug;
use serde::Serialize;

use crate::error::{HexError, ReadContext};
use crate::util::StoryBytes;

/// Key of the engine's reserved `parse$` word.
pub const PARSE_INDEX: i32 = -16;
/// Key of the engine's reserved `serial$` word.
pub const SERIAL_INDEX: i32 = -15;

/// Dictionary words keyed by their byte offset past the count word.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Dictionary {
    pub words: BTreeMap<i32, String>,
}

impl Dictionary {
    /// Reads `count` length-prefixed words from the table at `offset`.
    pub fn read(bytes: &StoryBytes, offset: usize, count: u16) -> Result<Dictionary, HexError> {
        let ctx = ReadContext::Dictionary;
        let base = offset + 2;
        let mut words = BTreeMap::new();
        let mut ptr = base;

        for _ in 0..count {
            let len = bytes.byte_at(ptr, ctx)? as usize;
            let word = bytes.decode_text(ptr + 1, len, ctx)?;
            words.insert((ptr - base) as i32, word);
            ptr += len + 1;
        }

        debug!("Read {} dictionary words at {:#06x}", words.len(), offset);
        Ok(Dictionary { words })
    }

    /// Adds the engine's two reserved words under keys no real entry can have.
    pub fn insert_reserved(&mut self, serial: &str) {
        self.words.insert(PARSE_INDEX, String::new());
        self.words.insert(SERIAL_INDEX, serial.to_string());
    }

    pub fn get(&self, addr: i32) -> Option<&str> {
        self.words.get(&addr).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&i32, &String)> {
        self.words.iter()
    }
}
