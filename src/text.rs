use std::collections::BTreeMap;

use log::{debug, trace};
use serde::Serialize;

use crate::error::{HexError, ReadContext};
use crate::util::StoryBytes;

/// Static strings keyed by offset from the start of the text bank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TextBank {
    pub strings: BTreeMap<usize, String>,
}

impl TextBank {
    /// Reads strings from `offset` until `end`. An entry whose length runs past
    /// `end` is still read in full; one that runs past the buffer is cut short there.
    pub fn read(bytes: &StoryBytes, offset: usize, end: usize) -> Result<TextBank, HexError> {
        let mut strings = BTreeMap::new();
        let mut ptr = offset;

        while ptr < end {
            let len = bytes.word_at(ptr, ReadContext::TextBank)? as usize;
            if ptr + 2 + len > end {
                trace!(
                    "Text bank entry at {:#06x} ({} bytes) overruns boundary {:#06x}",
                    ptr,
                    len,
                    end
                );
            }
            strings.insert(ptr - offset, bytes.decode_text_lossy(ptr + 2, len));
            ptr += len + 2;
        }

        debug!("Read {} text bank strings at {:#06x}", strings.len(), offset);
        Ok(TextBank { strings })
    }

    pub fn get(&self, offset: usize) -> Option<&str> {
        self.strings.get(&offset).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&usize, &String)> {
        self.strings.iter()
    }
}
