use std::fmt::Display;
use std::fmt::Error;
use std::fmt::Formatter;

use log::debug;
use serde::{Serialize, Serializer};

use crate::error::{HexError, ReadContext};
use crate::util::StoryBytes;

/// Compiler version 3.1, the only one this decoder understands.
pub const SUPPORTED_VERSION: u8 = 31;

pub const ID_OFFSET: usize = 0x01;
pub const SERIAL_OFFSET: usize = 0x03;
pub const SERIAL_LEN: usize = 8;
pub const CODESTART_OFFSET: usize = 0x0B;
pub const OBJTABLE_OFFSET: usize = 0x0D;
pub const PROPTABLE_OFFSET: usize = 0x0F;
pub const EVENTTABLE_OFFSET: usize = 0x11;
pub const ARRAYTABLE_OFFSET: usize = 0x13;
pub const DICTTABLE_OFFSET: usize = 0x15;
pub const SPECWORDTABLE_OFFSET: usize = 0x17;
pub const ADDRESSES_OFFSET: usize = 0x19;
pub const TEXTBANK_OFFSET: usize = 0x29;
pub const DEBUG_FLAG_OFFSET: usize = 0x3A;
pub const DEBUG_START_OFFSET: usize = 0x3B;

/// Section offsets are stored as indices of 16-byte blocks.
pub const BLOCK_SIZE: usize = 16;

/// Compiler version times ten, so 31 is version 3.1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompilerVersion(pub u8);

impl CompilerVersion {
    /// Versions 1 and 2 were written before the byte carried a decimal place.
    pub fn from_raw(raw: u8) -> CompilerVersion {
        match raw {
            1 | 2 => CompilerVersion(raw * 10),
            _ => CompilerVersion(raw),
        }
    }

    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 10.0
    }
}

impl Display for CompilerVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

impl Serialize for CompilerVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

/// Byte offsets of every section, already multiplied out of block units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OffsetTable {
    pub codestart: usize,
    pub objtable: usize,
    pub proptable: usize,
    pub eventtable: usize,
    pub arraytable: usize,
    pub dicttable: usize,
    pub specwordtable: usize,
    pub textbank: usize,
}

/// Entry points of the library routines the engine calls directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Addresses {
    pub code: usize,
    pub init: usize,
    pub main: usize,
    pub parse: usize,
    pub parseerror: usize,
    pub findobject: usize,
    pub endgame: usize,
    pub speakto: usize,
    pub perform: usize,
}

/// Element counts, each stored as the first word of its section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Counts {
    pub objects: u16,
    pub events: u16,
    pub dictwords: u16,
    pub special_words: u16,
    pub properties: u16,
}

impl Counts {
    pub fn read(bytes: &StoryBytes, offsets: &OffsetTable) -> Result<Counts, HexError> {
        let ctx = ReadContext::Counts;
        Ok(Counts {
            objects: bytes.word_at(offsets.objtable, ctx)?,
            events: bytes.word_at(offsets.eventtable, ctx)?,
            dictwords: bytes.word_at(offsets.dicttable, ctx)?,
            special_words: bytes.word_at(offsets.specwordtable, ctx)?,
            properties: bytes.word_at(offsets.proptable, ctx)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub version: CompilerVersion,
    pub id: u16,
    pub serial: String,
    pub offsets: OffsetTable,
    pub addresses: Addresses,
    /// Absolute offset where debugging data begins, when the compiler left any.
    pub debug_start: Option<usize>,
}

impl Header {
    pub fn read(bytes: &StoryBytes) -> Result<Header, HexError> {
        let version = CompilerVersion::from_raw(bytes.byte_at(0, ReadContext::Version)?);
        if version.0 != SUPPORTED_VERSION {
            return Err(HexError::VersionMismatch { detected: version });
        }

        let ctx = ReadContext::IdAndSerial;
        let id = bytes.word_at(ID_OFFSET, ctx)?;
        // the serial is plain text, no character offset
        let serial = bytes
            .slice(SERIAL_OFFSET, SERIAL_OFFSET + SERIAL_LEN, ctx)?
            .iter()
            .map(|b| *b as char)
            .collect();

        let ctx = ReadContext::Offsets;
        let block = |offset: usize| -> Result<usize, HexError> {
            Ok(bytes.word_at(offset, ctx)? as usize * BLOCK_SIZE)
        };

        let offsets = OffsetTable {
            codestart: bytes.word_at(CODESTART_OFFSET, ctx)? as usize,
            objtable: block(OBJTABLE_OFFSET)?,
            proptable: block(PROPTABLE_OFFSET)?,
            eventtable: block(EVENTTABLE_OFFSET)?,
            arraytable: block(ARRAYTABLE_OFFSET)?,
            dicttable: block(DICTTABLE_OFFSET)?,
            specwordtable: block(SPECWORDTABLE_OFFSET)?,
            textbank: block(TEXTBANK_OFFSET)?,
        };

        let addresses = Addresses {
            code: offsets.codestart,
            init: block(ADDRESSES_OFFSET)?,
            main: block(ADDRESSES_OFFSET + 2)?,
            parse: block(ADDRESSES_OFFSET + 4)?,
            parseerror: block(ADDRESSES_OFFSET + 6)?,
            findobject: block(ADDRESSES_OFFSET + 8)?,
            endgame: block(ADDRESSES_OFFSET + 10)?,
            speakto: block(ADDRESSES_OFFSET + 12)?,
            perform: block(ADDRESSES_OFFSET + 14)?,
        };

        let debug_start = match bytes.get(DEBUG_FLAG_OFFSET) {
            Some(flag) if flag != 0 => {
                let lo = bytes.byte_at(DEBUG_START_OFFSET, ctx)? as usize;
                let mid = bytes.byte_at(DEBUG_START_OFFSET + 1, ctx)? as usize;
                let hi = bytes.byte_at(DEBUG_START_OFFSET + 2, ctx)? as usize;
                Some(lo + (mid << 8) + (hi << 16))
            }
            _ => None,
        };

        debug!(
            "Hugo {} story, id {:#06x}, serial {:?}, offsets {:?}",
            version, id, serial, offsets
        );

        Ok(Header {
            version,
            id,
            serial,
            offsets,
            addresses,
            debug_start,
        })
    }
}
