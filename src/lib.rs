#[macro_use]
extern crate lazy_static;

pub mod config;
pub mod dictionary;
pub mod error;
pub mod grammar;
pub mod header;
pub mod ifid;
pub mod object;
pub mod property_defaults;
pub mod report;
pub mod special_words;
pub mod story;
pub mod tables;
pub mod text;
pub mod util;

#[cfg(test)]
pub mod test_utils;

pub use error::{HexError, ReadContext};
pub use story::{parse_hex_file, FileInfo, StoryFile};

/*
Layout of a Hugo 3.1 story file. Table offsets in the header are 16-byte block indices.

        0x00    header: version, id, serial, section offsets, entry points
        0x40    grammar table, ends with 0xff
codestart       compiled code
objtable        object count, 24-byte object records
proptable       property count, default values, per-object property streams
eventtable      event count, 4-byte event records
arraytable      240 global variables, then length-prefixed arrays
specwordtable   special word count, 5-byte records
dicttable       word count, length-prefixed words
textbank        length-prefixed static strings
debug start     optional debugging data
*/
