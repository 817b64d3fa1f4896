use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

/// Sections of a story that the browser can print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Header,
    Dictionary,
    Textbank,
    Objects,
    Grammar,
    Events,
    Arrays,
    Globals,
    Specialwords,
}

impl Section {
    pub const ALL: [Section; 9] = [
        Section::Header,
        Section::Dictionary,
        Section::Textbank,
        Section::Objects,
        Section::Grammar,
        Section::Events,
        Section::Arrays,
        Section::Globals,
        Section::Specialwords,
    ];
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "header" => Ok(Section::Header),
            "dictionary" => Ok(Section::Dictionary),
            "textbank" => Ok(Section::Textbank),
            "objects" => Ok(Section::Objects),
            "grammar" => Ok(Section::Grammar),
            "events" => Ok(Section::Events),
            "arrays" => Ok(Section::Arrays),
            "globals" => Ok(Section::Globals),
            "specialwords" => Ok(Section::Specialwords),
            _ => Err(format!("Unknown section: {s}")),
        }
    }
}

/// Settings for `hugo-browse`, usually read from a TOML file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BrowseConfig {
    pub sections: Vec<Section>,
    pub json: bool,
    pub max_entries: Option<usize>,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        BrowseConfig {
            sections: Section::ALL.to_vec(),
            json: false,
            max_entries: None,
        }
    }
}

impl BrowseConfig {
    pub fn from_toml(text: &str) -> Result<BrowseConfig, String> {
        toml::from_str(text).map_err(|e| format!("Invalid config: {e}"))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<BrowseConfig, String> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| format!("Cannot read config '{}': {e}", path.display()))?;
        Self::from_toml(&text)
    }
}
