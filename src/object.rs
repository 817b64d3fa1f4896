use std::collections::BTreeMap;

use bitvec::prelude::*;
use log::{debug, trace};
use serde::Serialize;

use crate::error::{HexError, ReadContext};
use crate::property_defaults::{Property, PropertyDefaults, PropertyValue};
use crate::util::StoryBytes;

// Each object record is 24 bytes:
// 16 bytes of attribute bits, then parent, sibling, child and property pointer words
pub const OBJECT_ENTRY_SIZE: usize = 24;
pub const ATTRIBUTE_BYTES: usize = 16;
const PARENT: usize = 16;
const SIBLING: usize = 18;
const CHILD: usize = 20;
const PROPERTY_POINTER: usize = 22;

const END_OF_PROPERTIES: u8 = 0xff;
const ROUTINE_PROPERTY: u8 = 0xff;

/// Attribute names defined by the standard library, indexed by attribute number.
pub const ATTRIBUTE_NAMES: [&str; 23] = [
    "known",
    "moved/visited",
    "static",
    "plural",
    "living",
    "female",
    "openable",
    "open",
    "lockable",
    "locked",
    "unfriendly",
    "light",
    "readable",
    "switchable",
    "switchedon/active",
    "clothing",
    "worn/mobile",
    "enterable",
    "container",
    "platform",
    "hidden",
    "quiet",
    "transparent",
];

pub fn attribute_name(index: usize) -> String {
    match ATTRIBUTE_NAMES.get(index) {
        Some(name) => name.to_string(),
        None => format!("custom ({})", index),
    }
}

/// Names of every set bit, lowest attribute number first.
pub fn decode_attributes(raw: &[u8]) -> Vec<String> {
    raw.view_bits::<Lsb0>().iter_ones().map(attribute_name).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HugoObject {
    pub attributes: Vec<String>,
    pub parent: u16,
    pub sibling: u16,
    pub child: u16,
    /// Property lists keyed by property number.
    pub properties: BTreeMap<u16, Property>,
}

impl HugoObject {
    pub fn property(&self, number: u16) -> Option<&Property> {
        self.properties.get(&number)
    }

    /// First value of a property, the form the library reads most.
    pub fn first(&self, number: u16) -> Option<PropertyValue> {
        self.property(number).and_then(|p| p.first().copied())
    }
}

/// One record in an object's property override stream.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PropertyOverride {
    End,
    Routine { number: u8, addr: u16 },
    ZeroFirst { number: u8 },
    Words { number: u8, words: Vec<u16> },
}

impl PropertyOverride {
    /// Reads the record at `ptr`, returning it with the offset of the next one.
    fn read(bytes: &StoryBytes, ptr: usize) -> Result<(PropertyOverride, usize), HexError> {
        let ctx = ReadContext::Objects;
        let number = bytes.byte_at(ptr, ctx)?;
        if number == END_OF_PROPERTIES {
            return Ok((PropertyOverride::End, ptr + 1));
        }

        let ptr = ptr + 2;
        match bytes.byte_at(ptr - 1, ctx)? {
            ROUTINE_PROPERTY => {
                let addr = bytes.word_at(ptr, ctx)?;
                Ok((PropertyOverride::Routine { number, addr }, ptr + 2))
            }
            0 => Ok((PropertyOverride::ZeroFirst { number }, ptr)),
            n => {
                let words = (0..n as usize)
                    .map(|k| bytes.word_at(ptr + k * 2, ctx))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok((PropertyOverride::Words { number, words }, ptr + n as usize * 2))
            }
        }
    }

    fn apply(self, properties: &mut BTreeMap<u16, Property>) {
        match self {
            PropertyOverride::End => {}
            PropertyOverride::Routine { number, addr } => {
                properties.insert(number as u16, vec![PropertyValue::Routine(addr)]);
            }
            PropertyOverride::ZeroFirst { number } => {
                let slot = properties.entry(number as u16).or_default();
                match slot.first_mut() {
                    Some(first) => *first = PropertyValue::Value(0),
                    None => slot.push(PropertyValue::Value(0)),
                }
            }
            PropertyOverride::Words { number, words } => {
                let values = words
                    .into_iter()
                    .map(|w| PropertyValue::Value(w as i32))
                    .collect();
                properties.insert(number as u16, values);
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ObjectTable {
    pub objects: Vec<HugoObject>,
}

impl ObjectTable {
    /// Reads `count` objects from the table at `offset`. Property pointers are
    /// relative to `proptable`, where each object's override stream lives.
    pub fn read(
        bytes: &StoryBytes,
        offset: usize,
        count: u16,
        proptable: usize,
        defaults: &PropertyDefaults,
    ) -> Result<ObjectTable, HexError> {
        let ctx = ReadContext::Objects;
        let mut objects = Vec::with_capacity(count as usize);
        let mut ptr = offset + 2;

        for _ in 0..count {
            let attribute_bits = bytes.slice(ptr, ptr + ATTRIBUTE_BYTES, ctx)?;
            let attributes = decode_attributes(attribute_bits);
            let parent = bytes.word_at(ptr + PARENT, ctx)?;
            let sibling = bytes.word_at(ptr + SIBLING, ctx)?;
            let child = bytes.word_at(ptr + CHILD, ctx)?;

            let mut properties: BTreeMap<u16, Property> = defaults
                .defaults
                .iter()
                .enumerate()
                .map(|(i, p)| (i as u16, p.clone()))
                .collect();

            let mut prop_ptr = bytes.word_at(ptr + PROPERTY_POINTER, ctx)? as usize + proptable;
            // a stream that runs off the end of the file simply ends there
            while prop_ptr < bytes.len() {
                let (record, next) = PropertyOverride::read(bytes, prop_ptr)?;
                trace!("Property override at {:#06x}: {:?}", prop_ptr, record);
                if record == PropertyOverride::End {
                    break;
                }
                record.apply(&mut properties);
                prop_ptr = next;
            }

            objects.push(HugoObject {
                attributes,
                parent,
                sibling,
                child,
                properties,
            });
            ptr += OBJECT_ENTRY_SIZE;
        }

        debug!("Read {} objects at {:#06x}", objects.len(), offset);
        Ok(ObjectTable { objects })
    }

    pub fn get(&self, index: usize) -> Option<&HugoObject> {
        self.objects.get(index)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HugoObject> {
        self.objects.iter()
    }
}
