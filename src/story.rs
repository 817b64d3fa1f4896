use std::fmt::Display;
use std::fmt::Error;
use std::fmt::Formatter;

use log::debug;
use serde::Serialize;

use crate::dictionary::Dictionary;
use crate::error::HexError;
use crate::grammar::{read_grammar, GrammarEntry};
use crate::header::{Addresses, CompilerVersion, Counts, Header};
use crate::ifid::find_ifids;
use crate::object::{HugoObject, ObjectTable};
use crate::property_defaults::{PropertyDefaults, PropertyValue};
use crate::special_words::SpecialWords;
use crate::tables::{read_events, read_globals, Arrays, Code, Event};
use crate::text::TextBank;
use crate::util::StoryBytes;

/// Name and size of the file a story was loaded from. Only the host sets this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileInfo {
    pub name: String,
    pub size: usize,
}

/// A fully decoded story file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryFile {
    pub compiler_version: CompilerVersion,
    pub id: u16,
    pub serial: String,
    pub ifids: Vec<String>,
    pub addresses: Addresses,
    pub counts: Counts,
    pub code: Code,
    pub objects: ObjectTable,
    pub dictionary: Dictionary,
    pub textbank: TextBank,
    pub grammar: Vec<GrammarEntry>,
    pub events: Vec<Event>,
    pub arrays: Arrays,
    pub globals: Vec<i32>,
    pub specialwords: SpecialWords,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<FileInfo>,
}

/// Everything one parse needs: the buffer, its header, and the default
/// properties the object table is built on. Lives for a single parse.
pub struct ParseContext<'a> {
    pub bytes: StoryBytes<'a>,
    pub header: Header,
    pub counts: Counts,
    pub property_defaults: PropertyDefaults,
}

impl<'a> ParseContext<'a> {
    pub fn new(raw: &'a [u8]) -> Result<ParseContext<'a>, HexError> {
        let bytes = StoryBytes::new(raw);
        let header = Header::read(&bytes)?;
        let counts = Counts::read(&bytes, &header.offsets)?;
        debug!("Element counts: {:?}", counts);
        let property_defaults =
            PropertyDefaults::read(&bytes, header.offsets.proptable, counts.properties)?;

        Ok(ParseContext {
            bytes,
            header,
            counts,
            property_defaults,
        })
    }

    /// Where the text bank ends: at the debug data if there is any, else the end of file.
    pub fn textbank_end(&self) -> usize {
        match self.header.debug_start {
            Some(start) if start > 0 => start,
            _ => self.bytes.len(),
        }
    }

    pub fn into_story(self) -> Result<StoryFile, HexError> {
        let bytes = &self.bytes;
        let offsets = self.header.offsets;

        let arrays = Arrays::read(bytes, offsets.arraytable, offsets.specwordtable)?;
        let code = Code::read(bytes, offsets.codestart, offsets.objtable)?;
        let mut dictionary = Dictionary::read(bytes, offsets.dicttable, self.counts.dictwords)?;
        let events = read_events(bytes, offsets.eventtable, self.counts.events)?;
        let globals = read_globals(bytes, offsets.arraytable)?;
        let grammar = read_grammar(bytes)?;
        let objects = ObjectTable::read(
            bytes,
            offsets.objtable,
            self.counts.objects,
            offsets.proptable,
            &self.property_defaults,
        )?;
        let specialwords =
            SpecialWords::read(bytes, offsets.specwordtable, self.counts.special_words)?;
        let textbank = TextBank::read(bytes, offsets.textbank, self.textbank_end())?;

        let ifids = find_ifids(
            dictionary
                .iter()
                .map(|(_, w)| w.as_str())
                .chain(textbank.iter().map(|(_, s)| s.as_str())),
        );

        dictionary.insert_reserved(&self.header.serial);

        Ok(StoryFile {
            compiler_version: self.header.version,
            id: self.header.id,
            serial: self.header.serial,
            ifids,
            addresses: self.header.addresses,
            counts: self.counts,
            code,
            objects,
            dictionary,
            textbank,
            grammar,
            events,
            arrays,
            globals,
            specialwords,
            file: None,
        })
    }
}

/// Decodes a complete `.hex` story file.
pub fn parse_hex_file(raw: &[u8]) -> Result<StoryFile, HexError> {
    ParseContext::new(raw)?.into_story()
}

/// Property numbers the standard library gives fixed meanings.
pub mod library_property {
    pub const NAME: u16 = 0;
    pub const NOUN: u16 = 3;
    pub const ADJECTIVE: u16 = 4;
    pub const ARTICLE: u16 = 5;
    pub const PREPOSITION: u16 = 6;
    pub const PRONOUN: u16 = 7;
    pub const FOUND_IN: u16 = 13;
    pub const TYPE: u16 = 14;
    pub const PARSE_RANK: u16 = 21;
    pub const EXCLUDE_FROM_ALL: u16 = 22;
    pub const DOOR_TO: u16 = 23;
    /// First of the twelve direction properties rooms use; other objects reuse the numbers.
    pub const N_TO: u16 = 24;
    pub const CANT_GO: u16 = 36;
}

/// Id of a story compiled with precompiled headers ("$$").
pub const PRECOMPILED_HEADERS_ID: u16 = 0x2424;

impl StoryFile {
    pub fn with_file_info(mut self, name: &str, size: usize) -> StoryFile {
        self.file = Some(FileInfo {
            name: name.to_string(),
            size,
        });
        self
    }

    /// Dictionary word at `addr`, or "" when there is none.
    pub fn word(&self, addr: i32) -> &str {
        self.dictionary.get(addr).unwrap_or("")
    }

    /// Dictionary word for a property value, or the routine it points to.
    pub fn word_for(&self, value: &PropertyValue) -> String {
        match value {
            PropertyValue::Value(addr) => self.word(*addr).to_string(),
            PropertyValue::Routine(_) => value.to_string(),
        }
    }

    pub fn object(&self, index: usize) -> Option<&HugoObject> {
        self.objects.get(index)
    }

    /// The object's printed name: the dictionary word in its `name` property.
    pub fn object_name(&self, index: usize) -> String {
        let Some(obj) = self.object(index) else {
            return String::new();
        };
        match obj.first(library_property::NAME) {
            Some(PropertyValue::Value(0)) | None => String::new(),
            Some(value) => self.word_for(&value),
        }
    }

    /// Name of the object a property value refers to.
    pub fn name_of(&self, value: &PropertyValue) -> String {
        match value {
            PropertyValue::Value(v) if *v >= 0 => self.object_name(*v as usize),
            PropertyValue::Value(_) => String::new(),
            PropertyValue::Routine(_) => value.to_string(),
        }
    }
}

impl Display for StoryFile {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        if let Some(file) = &self.file {
            writeln!(f, "File:                     {} ({} bytes)", file.name, file.size)?;
        }
        writeln!(f, "Compiler version:         {}", self.compiler_version)?;
        if self.id == PRECOMPILED_HEADERS_ID {
            writeln!(
                f,
                "Id:                       {:#06x} (\"$$\", precompiled headers)",
                self.id
            )?;
        } else {
            writeln!(f, "Id:                       {:#06x}", self.id)?;
        }
        writeln!(f, "Serial number:            {}", self.serial)?;
        writeln!(f, "IFID:                     {}", self.ifids.join(", "))?;
        writeln!(f, "Objects:                  {}", self.counts.objects)?;
        writeln!(f, "Properties:               {}", self.counts.properties)?;
        writeln!(f, "Events:                   {}", self.counts.events)?;
        writeln!(f, "Dictionary words:         {}", self.counts.dictwords)?;
        writeln!(f, "Special words:            {}", self.counts.special_words)?;
        writeln!(f, "Text bank strings:        {}", self.textbank.len())?;
        writeln!(f, "Grammar entries:          {}", self.grammar.len())?;
        writeln!(f, "Code size:                {:#06x}", self.code.len())
    }
}
