use std::fmt::Display;
use std::fmt::Error;
use std::fmt::Formatter;

use log::debug;
use serde::Serialize;

use crate::error::{HexError, ReadContext};
use crate::util::StoryBytes;

/// A single word of property data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyValue {
    Value(i32),
    /// The property is a routine; the word is its address.
    Routine(u16),
}

impl PropertyValue {
    pub fn as_value(&self) -> Option<i32> {
        match self {
            PropertyValue::Value(v) => Some(*v),
            PropertyValue::Routine(_) => None,
        }
    }

    /// Only plain values above zero count as "set"; routines always do.
    pub fn is_set(&self) -> bool {
        match self {
            PropertyValue::Value(v) => *v > 0,
            PropertyValue::Routine(_) => true,
        }
    }
}

impl Display for PropertyValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            PropertyValue::Value(v) => write!(f, "{}", v),
            PropertyValue::Routine(addr) => write!(f, "[routine {:#06x}]", addr),
        }
    }
}

pub type Property = Vec<PropertyValue>;

/// The values every object starts from, indexed by property number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PropertyDefaults {
    pub defaults: Vec<Property>,
}

impl PropertyDefaults {
    /// Reads `count` signed words that follow the count word at `offset`.
    pub fn read(bytes: &StoryBytes, offset: usize, count: u16) -> Result<PropertyDefaults, HexError> {
        let defaults = (0..count as usize)
            .map(|i| {
                let v = bytes.signed_word_at(offset + 2 + i * 2, ReadContext::PropertyDefaults)?;
                Ok(vec![PropertyValue::Value(v)])
            })
            .collect::<Result<Vec<_>, HexError>>()?;

        debug!("Read {} property defaults at {:#06x}", defaults.len(), offset);
        Ok(PropertyDefaults { defaults })
    }

    pub fn property(&self, number: usize) -> Option<&Property> {
        self.defaults.get(number)
    }

    pub fn len(&self) -> usize {
        self.defaults.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defaults.is_empty()
    }
}
