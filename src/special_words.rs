use std::fmt::Display;
use std::fmt::Error;
use std::fmt::Formatter;

use indexmap::IndexMap;
use log::debug;
use serde::Serialize;

use crate::error::{HexError, ReadContext};
use crate::util::StoryBytes;

const SPECIAL_WORD_ENTRY_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecialWordCategory {
    Synonyms,
    Removals,
    Compounds,
    Punctuation,
}

impl SpecialWordCategory {
    /// Category order as numbered in the table.
    pub const ALL: [SpecialWordCategory; 4] = [
        SpecialWordCategory::Synonyms,
        SpecialWordCategory::Removals,
        SpecialWordCategory::Compounds,
        SpecialWordCategory::Punctuation,
    ];

    pub fn from_index(index: u8) -> Option<SpecialWordCategory> {
        Self::ALL.get(index as usize).copied()
    }
}

impl Display for SpecialWordCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        let s = match self {
            SpecialWordCategory::Synonyms => "synonyms",
            SpecialWordCategory::Removals => "removals",
            SpecialWordCategory::Compounds => "compounds",
            SpecialWordCategory::Punctuation => "punctuation",
        };
        write!(f, "{s}")
    }
}

/// A pair of dictionary addresses; `addr2` is 0 for words that stand alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpecialWord {
    pub addr1: u16,
    pub addr2: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SpecialWords {
    pub categories: IndexMap<SpecialWordCategory, Vec<SpecialWord>>,
}

impl Default for SpecialWords {
    fn default() -> Self {
        SpecialWords {
            categories: SpecialWordCategory::ALL
                .iter()
                .map(|c| (*c, Vec::new()))
                .collect(),
        }
    }
}

impl SpecialWords {
    pub fn read(bytes: &StoryBytes, offset: usize, count: u16) -> Result<SpecialWords, HexError> {
        let ctx = ReadContext::SpecialWords;
        let mut special_words = SpecialWords::default();
        let mut ptr = offset + 2;

        for _ in 0..count {
            let category_byte = bytes.byte_at(ptr, ctx)?;
            let word = SpecialWord {
                addr1: bytes.word_at(ptr + 1, ctx)?,
                addr2: bytes.word_at(ptr + 3, ctx)?,
            };
            let category = SpecialWordCategory::from_index(category_byte).ok_or(
                HexError::UnknownSpecialWordCategory {
                    category: category_byte,
                    offset: ptr,
                },
            )?;
            special_words.categories.entry(category).or_default().push(word);
            ptr += SPECIAL_WORD_ENTRY_SIZE;
        }

        debug!("Read {} special words at {:#06x}", count, offset);
        Ok(special_words)
    }

    pub fn get(&self, category: SpecialWordCategory) -> &[SpecialWord] {
        self.categories
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
