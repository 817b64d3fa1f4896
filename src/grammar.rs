//! Verb grammar table.
//!
//! The table starts right after the header and is a run of entries, each:
//!
//! ```text
//! 2c|2d  count  verb-addr * count        verb or xverb header
//! 08 len tok * (len - 1)                 one grammar line, repeated
//! ```
//!
//! The byte after each line is the asterisk of the next line, the type byte of
//! the next entry, or 0xff which ends the table. The asterisk is dropped from
//! the decoded lines.

use std::fmt::Display;
use std::fmt::Error;
use std::fmt::Formatter;

use log::{debug, trace};
use serde::Serialize;

use crate::error::{HexError, ReadContext};
use crate::util::StoryBytes;

pub const GRAMMAR_START: usize = 0x40;

const VERB: u8 = 0x2c;
const XVERB: u8 = 0x2d;
const ASTERISK: u8 = 0x08;
const END_OF_TABLE: u8 = 0xff;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VerbType {
    Verb,
    Xverb,
}

impl VerbType {
    pub fn from_byte(b: u8) -> Option<VerbType> {
        match b {
            VERB => Some(VerbType::Verb),
            XVERB => Some(VerbType::Xverb),
            _ => None,
        }
    }
}

impl Display for VerbType {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            VerbType::Verb => write!(f, "verb"),
            VerbType::Xverb => write!(f, "xverb"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GrammarEntry {
    #[serde(rename = "type")]
    pub verb_type: VerbType,
    /// Dictionary addresses of the verb words.
    pub verbs: Vec<u16>,
    /// Raw token bytes of each grammar line.
    pub nouns: Vec<Vec<u8>>,
}

#[derive(Debug)]
enum GrammarState {
    VerbHeader,
    GrammarLines(GrammarEntry),
    Done,
}

/// Walks the grammar table from a starting offset.
pub struct GrammarReader<'a, 'b> {
    bytes: &'b StoryBytes<'a>,
    ptr: usize,
}

impl<'a, 'b> GrammarReader<'a, 'b> {
    pub fn new(bytes: &'b StoryBytes<'a>, start: usize) -> Self {
        GrammarReader { bytes, ptr: start }
    }

    pub fn read_all(mut self) -> Result<Vec<GrammarEntry>, HexError> {
        let mut entries = Vec::new();
        let mut state = GrammarState::VerbHeader;

        loop {
            state = match state {
                GrammarState::VerbHeader => self.verb_header()?,
                GrammarState::GrammarLines(mut entry) => {
                    let next = self.grammar_lines(&mut entry)?;
                    entries.push(entry);
                    next
                }
                GrammarState::Done => break,
            };
        }

        debug!("Read {} grammar entries", entries.len());
        Ok(entries)
    }

    fn verb_header(&mut self) -> Result<GrammarState, HexError> {
        let ctx = ReadContext::Grammar;
        let type_byte = match self.bytes.get(self.ptr) {
            None | Some(END_OF_TABLE) => return Ok(GrammarState::Done),
            Some(b) => b,
        };
        let verb_type = VerbType::from_byte(type_byte).ok_or(HexError::UnknownVerbType {
            verb_type: type_byte,
            offset: self.ptr,
        })?;

        let count = self.bytes.byte_at(self.ptr + 1, ctx)?;
        self.ptr += 2;
        let mut verbs = Vec::with_capacity(count as usize);
        for _ in 0..count {
            verbs.push(self.bytes.word_at(self.ptr, ctx)?);
            self.ptr += 2;
        }
        trace!("{} entry with verbs {:?}, lines at {:#06x}", verb_type, verbs, self.ptr);

        Ok(GrammarState::GrammarLines(GrammarEntry {
            verb_type,
            verbs,
            nouns: Vec::new(),
        }))
    }

    fn grammar_lines(&mut self, entry: &mut GrammarEntry) -> Result<GrammarState, HexError> {
        let ctx = ReadContext::Grammar;

        while self.ptr < self.bytes.len() {
            // skip the asterisk
            self.ptr += 1;
            let len = self.bytes.byte_at(self.ptr, ctx)?.saturating_sub(1) as usize;
            self.ptr += 1;
            let line = self.bytes.slice(self.ptr, self.ptr + len, ctx)?.to_vec();
            self.ptr += len;
            entry.nouns.push(line);

            match self.bytes.byte_at(self.ptr, ctx)? {
                VERB | XVERB | END_OF_TABLE => return Ok(GrammarState::VerbHeader),
                ASTERISK => {}
                found => {
                    return Err(HexError::MalformedGrammar {
                        found,
                        offset: self.ptr,
                    })
                }
            }
        }

        Ok(GrammarState::Done)
    }
}

pub fn read_grammar(bytes: &StoryBytes) -> Result<Vec<GrammarEntry>, HexError> {
    GrammarReader::new(bytes, GRAMMAR_START).read_all()
}
