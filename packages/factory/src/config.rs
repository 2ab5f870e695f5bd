//! Environment-driven factory configuration.

use std::path::PathBuf;

/// Environment variable naming a preferences XML file to load on startup.
pub const KEY_XML_FILE: &str = "PREF2GO_XML_FILE";

/// Environment variable that, when `true`, logs the loaded preferences.
///
/// Only has an effect together with [`KEY_XML_FILE`].
pub const KEY_PRINT_PREF: &str = "PREF2GO_PRINT_PREF";

/// What the factory does at construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactoryConfig {
    pub xml_file: Option<PathBuf>,
    pub print_preferences: bool,
}

impl FactoryConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            xml_file: lookup(KEY_XML_FILE).map(PathBuf::from),
            print_preferences: lookup(KEY_PRINT_PREF)
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
        }
    }

    pub fn with_xml_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.xml_file = Some(path.into());
        self
    }

    pub fn with_print_preferences(mut self, print: bool) -> Self {
        self.print_preferences = print;
        self
    }
}

/// `true` in any letter case is true; everything else is false.
fn parse_flag(value: &str) -> bool {
    value.eq_ignore_ascii_case("true")
}
