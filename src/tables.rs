use std::collections::BTreeMap;

use log::debug;
use serde::Serialize;

use crate::error::{HexError, ReadContext};
use crate::util::StoryBytes;

pub const GLOBAL_COUNT: usize = 240;
const EVENT_ENTRY_SIZE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Event {
    /// Object the event is attached to, 0 for a global event.
    pub obj: u16,
    pub addr: u16,
}

pub fn read_events(bytes: &StoryBytes, offset: usize, count: u16) -> Result<Vec<Event>, HexError> {
    let ctx = ReadContext::Events;
    let mut events = Vec::with_capacity(count as usize);
    let mut ptr = offset + 2;

    for _ in 0..count {
        events.push(Event {
            obj: bytes.word_at(ptr, ctx)?,
            addr: bytes.word_at(ptr + 2, ctx)?,
        });
        ptr += EVENT_ENTRY_SIZE;
    }

    debug!("Read {} events at {:#06x}", events.len(), offset);
    Ok(events)
}

/// The 240 global variables at the start of the array table.
pub fn read_globals(bytes: &StoryBytes, offset: usize) -> Result<Vec<i32>, HexError> {
    (0..GLOBAL_COUNT)
        .map(|i| bytes.signed_word_at(offset + i * 2, ReadContext::Globals))
        .collect()
}

/// Arrays keyed by their word index into the array table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Arrays {
    pub arrays: BTreeMap<usize, Vec<u16>>,
}

impl Arrays {
    /// Reads length-prefixed arrays after the globals, up to `end`.
    ///
    /// Trailing zero padding reads as zero-length arrays and is kept, since a
    /// program may really declare an empty array there.
    pub fn read(bytes: &StoryBytes, offset: usize, end: usize) -> Result<Arrays, HexError> {
        let ctx = ReadContext::Arrays;
        let mut arrays = BTreeMap::new();
        let mut ptr = offset + GLOBAL_COUNT * 2;

        while ptr < end {
            let len = bytes.word_at(ptr, ctx)? as usize;
            let index = (ptr - offset) / 2;
            ptr += 2;
            let contents = (0..len)
                .map(|i| bytes.word_at(ptr + i * 2, ctx))
                .collect::<Result<Vec<_>, _>>()?;
            ptr += len * 2;
            arrays.insert(index, contents);
        }

        debug!("Read {} arrays at {:#06x}", arrays.len(), offset);
        Ok(Arrays { arrays })
    }

    pub fn get(&self, index: usize) -> Option<&Vec<u16>> {
        self.arrays.get(&index)
    }

    pub fn len(&self) -> usize {
        self.arrays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arrays.is_empty()
    }
}

/// Compiled code, kept as opaque bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Code(pub Vec<u8>);

impl Code {
    /// Bytes from `offset` up to `end` with trailing zero padding removed.
    pub fn read(bytes: &StoryBytes, offset: usize, end: usize) -> Result<Code, HexError> {
        let mut code = bytes.slice(offset, end, ReadContext::Code)?.to_vec();
        while code.last() == Some(&0) {
            code.pop();
        }
        debug!("Read {} bytes of code at {:#06x}", code.len(), offset);
        Ok(Code(code))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}
