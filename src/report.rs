// Plain-text rendering of a decoded story for the browser binary.
// Properties and attributes are named as the standard library uses them.

use std::fmt::Display;
use std::fmt::Error;
use std::fmt::Formatter;

use crate::config::{BrowseConfig, Section};
use crate::property_defaults::PropertyValue;
use crate::story::{library_property, StoryFile};
use crate::util::overflow;

const DIRECTIONS: [&str; 12] = [
    "N to", "NE to", "E to", "SE to", "S to", "SW to", "W to", "NW to", "U to", "D to", "In to",
    "Out to",
];

/// Room objects have this value in their `type` property.
const ROOM_TYPE: i32 = 4;

/// How a property value is shown.
#[derive(Clone, Copy)]
enum Shown {
    Raw,
    Object,
    Word,
}

/// Meanings of the direction property numbers on objects that are not rooms.
const OBJECT_PROPERTIES: [(&str, Shown); 12] = [
    ("Custom (24)", Shown::Raw),
    ("Key", Shown::Object),
    ("Short description when open", Shown::Word),
    ("Short description when closed", Shown::Word),
    ("Ignore response", Shown::Word),
    ("Order response", Shown::Word),
    ("Contains description", Shown::Raw),
    ("Inventory description", Shown::Word),
    ("Description detail", Shown::Word),
    ("Custom (33)", Shown::Raw),
    ("Custom (34)", Shown::Raw),
    ("Custom (35)", Shown::Raw),
];

/// Every configured section of a story, in the configured order.
pub struct Report<'a> {
    pub story: &'a StoryFile,
    pub config: &'a BrowseConfig,
}

pub fn render(story: &StoryFile, config: &BrowseConfig) -> String {
    Report { story, config }.to_string()
}

impl Display for Report<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        let story = self.story;
        let limit = self.config.max_entries.unwrap_or(usize::MAX);

        for section in &self.config.sections {
            match section {
                Section::Header => writeln!(f, "{}", story)?,
                Section::Dictionary => {
                    writeln!(f, "***** Dictionary *****")?;
                    for (addr, word) in story.dictionary.iter().take(limit) {
                        writeln!(f, "{:>6}  {}", addr, word)?;
                    }
                }
                Section::Textbank => {
                    writeln!(f, "***** Text bank *****")?;
                    for (offset, text) in story.textbank.iter().take(limit) {
                        writeln!(f, "{:#08x}  {}", offset, text)?;
                    }
                }
                Section::Objects => {
                    writeln!(f, "***** Objects *****")?;
                    for index in 0..story.objects.len().min(limit) {
                        write!(f, "{}", ObjectView { story, index })?;
                    }
                }
                Section::Grammar => {
                    writeln!(f, "***** Grammar *****")?;
                    for entry in story.grammar.iter().take(limit) {
                        let verbs: Vec<&str> =
                            entry.verbs.iter().map(|v| story.word(*v as i32)).collect();
                        writeln!(f, "{} {}", entry.verb_type, verbs.join(", "))?;
                        for line in &entry.nouns {
                            let tokens: Vec<String> =
                                line.iter().map(|t| format!("{:02x}", t)).collect();
                            writeln!(f, "    * {}", tokens.join(" "))?;
                        }
                    }
                }
                Section::Events => {
                    writeln!(f, "***** Events *****")?;
                    for event in story.events.iter().take(limit) {
                        let owner = match event.obj {
                            0 => "(global)".to_string(),
                            obj => story.object_name(obj as usize),
                        };
                        writeln!(f, "{:#06x}  {} ({})", event.addr, owner, event.obj)?;
                    }
                }
                Section::Arrays => {
                    writeln!(f, "***** Arrays *****")?;
                    for (index, contents) in story.arrays.arrays.iter().take(limit) {
                        writeln!(f, "[{}] ({}) {:?}", index, contents.len(), contents)?;
                    }
                }
                Section::Globals => {
                    writeln!(f, "***** Globals *****")?;
                    for (i, value) in story.globals.iter().enumerate().take(limit) {
                        writeln!(f, "{:>3}  {}", i, value)?;
                    }
                }
                Section::Specialwords => {
                    writeln!(f, "***** Special words *****")?;
                    for (category, words) in &story.specialwords.categories {
                        writeln!(f, "{}:", category)?;
                        for w in words.iter().take(limit) {
                            match w.addr2 {
                                0 => writeln!(f, "    {}", story.word(w.addr1 as i32))?,
                                addr2 => writeln!(
                                    f,
                                    "    {} -> {}",
                                    story.word(w.addr1 as i32),
                                    story.word(addr2 as i32)
                                )?,
                            }
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

/// One object with its library properties, attributes and relations.
pub struct ObjectView<'a> {
    pub story: &'a StoryFile,
    pub index: usize,
}

impl ObjectView<'_> {
    fn first_set(&self, prop: u16) -> Option<PropertyValue> {
        self.story
            .object(self.index)
            .and_then(|o| o.first(prop))
            .filter(PropertyValue::is_set)
    }

    fn show(&self, value: &PropertyValue, shown: Shown) -> String {
        match shown {
            Shown::Raw => value.to_string(),
            Shown::Object => self.story.name_of(value),
            Shown::Word => self.story.word_for(value),
        }
    }
}

impl Display for ObjectView<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        let story = self.story;
        let Some(obj) = story.object(self.index) else {
            return Ok(());
        };

        writeln!(f, "{}: {}", self.index, story.object_name(self.index))?;
        if let Some(article) = self.first_set(library_property::ARTICLE) {
            writeln!(f, "    article: {}", story.word_for(&article))?;
        }
        if let Some(kind) = self.first_set(library_property::TYPE) {
            writeln!(f, "    type: {}", story.name_of(&kind))?;
        }
        for (label, prop) in [
            ("nouns", library_property::NOUN),
            ("adjectives", library_property::ADJECTIVE),
        ] {
            if let Some(values) = obj.property(prop) {
                if values.len() > 1 || values.first().is_some_and(PropertyValue::is_set) {
                    let words: Vec<String> = values.iter().map(|v| story.word_for(v)).collect();
                    writeln!(f, "    {}: {}", label, words.join(", "))?;
                }
            }
        }
        if let Some(pronoun) = self.first_set(library_property::PRONOUN) {
            writeln!(f, "    pronoun: {}", story.word_for(&pronoun))?;
        }
        if let Some(prep) = self.first_set(library_property::PREPOSITION) {
            writeln!(f, "    preposition: {}", story.word_for(&prep))?;
        }
        if let Some(found_in) = self.first_set(library_property::FOUND_IN) {
            writeln!(f, "    found in: {}", story.name_of(&found_in))?;
        }
        if let Some(door) = self.first_set(library_property::DOOR_TO) {
            writeln!(f, "    door to: {}", story.word_for(&door))?;
        }
        if let Some(cant_go) = self.first_set(library_property::CANT_GO) {
            writeln!(f, "    can't go: {}", story.word_for(&cant_go))?;
        }
        if let Some(rank) = self.first_set(library_property::PARSE_RANK) {
            // override words are stored unsigned
            match rank.as_value() {
                Some(v) => writeln!(f, "    parse rank: {}", overflow(v as u16))?,
                None => writeln!(f, "    parse rank: {}", rank)?,
            }
        }
        if self.first_set(library_property::EXCLUDE_FROM_ALL).is_some() {
            writeln!(f, "    excluded from \"all\"")?;
        }

        let is_room = obj.first(library_property::TYPE) == Some(PropertyValue::Value(ROOM_TYPE));
        for (i, direction) in DIRECTIONS.iter().enumerate() {
            let Some(value) = self.first_set(library_property::N_TO + i as u16) else {
                continue;
            };
            if is_room {
                writeln!(f, "    {}: {}", direction, story.name_of(&value))?;
            } else {
                let (label, shown) = OBJECT_PROPERTIES[i];
                writeln!(f, "    {}: {}", label, self.show(&value, shown))?;
            }
        }
        for (number, values) in obj.properties.range(library_property::CANT_GO..) {
            if let Some(value) = values.first().filter(|v| v.is_set()) {
                writeln!(f, "    Custom ({}): {}", number, value)?;
            }
        }

        if !obj.attributes.is_empty() {
            writeln!(f, "    attributes: {}", obj.attributes.join(", "))?;
        }
        for (label, relative) in [
            ("parent", obj.parent),
            ("child", obj.child),
            ("sibling", obj.sibling),
        ] {
            if relative > 0 {
                writeln!(
                    f,
                    "    {}: {} ({})",
                    label,
                    story.object_name(relative as usize),
                    relative
                )?;
            }
        }
        Ok(())
    }
}
