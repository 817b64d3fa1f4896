use std::fmt::Display;
use std::fmt::Error;
use std::fmt::Formatter;

use thiserror::Error;

use crate::header::CompilerVersion;

/// The part of the story file being read when the buffer ran out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadContext {
    Version,
    IdAndSerial,
    Offsets,
    Counts,
    Code,
    PropertyDefaults,
    Objects,
    Dictionary,
    Events,
    Arrays,
    Globals,
    Grammar,
    SpecialWords,
    TextBank,
}

impl Display for ReadContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        let s = match self {
            ReadContext::Version => "compiler version",
            ReadContext::IdAndSerial => "id and serial number",
            ReadContext::Offsets => "offsets",
            ReadContext::Counts => "element counts",
            ReadContext::Code => "code",
            ReadContext::PropertyDefaults => "property defaults",
            ReadContext::Objects => "objects",
            ReadContext::Dictionary => "dictionary",
            ReadContext::Events => "events",
            ReadContext::Arrays => "arrays",
            ReadContext::Globals => "globals",
            ReadContext::Grammar => "grammar",
            ReadContext::SpecialWords => "special words",
            ReadContext::TextBank => "text bank",
        };
        write!(f, "{s}")
    }
}

/// Every way a story file can fail to decode. All of them are fatal to the parse.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HexError {
    #[error("Invalid story file version or file not a Hugo story file. Only 3.1 supported, story file identifies itself as {detected}")]
    VersionMismatch { detected: CompilerVersion },

    #[error("Story file ended unexpectedly when reading {context} (offset {offset:#06x})")]
    UnexpectedEndOfBuffer { context: ReadContext, offset: usize },

    #[error("Unknown verb type {verb_type:#04x} encountered while reading grammar at {offset:#06x}")]
    UnknownVerbType { verb_type: u8, offset: usize },

    #[error("Expected 0x08, 0x2c, 0x2d or 0xff when reading grammar, found {found:#04x} instead at {offset:#06x}")]
    MalformedGrammar { found: u8, offset: usize },

    #[error("Encountered an unknown special word category index {category} at {offset:#06x}")]
    UnknownSpecialWordCategory { category: u8, offset: usize },
}
