//! Locale identifiers used to qualify generated language resources.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Error;

fn locale_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([A-Za-z]{2,3})(?:[-_]r?([A-Za-z]{2}|[0-9]{3}))?$")
            .expect("locale pattern is valid")
    })
}

/// A language with an optional region, e.g. `en` or `pt-BR`.
///
/// Accepts `en-US`, `en_US` and the Android resource spelling `en-rUS`;
/// all of them normalise to the BCP-47 tag `en-US`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LocaleId {
    language: String,
    region: Option<String>,
}

impl LocaleId {
    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// BCP-47 language tag, e.g. `en-US`.
    pub fn tag(&self) -> String {
        match &self.region {
            Some(region) => format!("{}-{}", self.language, region),
            None => self.language.clone(),
        }
    }

    /// Identifier usable as a Kotlin enum entry, e.g. `EN_US`.
    pub fn constant_name(&self) -> String {
        self.tag().replace('-', "_").to_uppercase()
    }
}

impl FromStr for LocaleId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let captures = locale_pattern()
            .captures(s.trim())
            .ok_or_else(|| Error::LocaleError(s.to_string()))?;

        let language = captures[1].to_lowercase();
        let region = captures.get(2).map(|m| m.as_str().to_uppercase());
        Ok(Self { language, region })
    }
}

impl TryFrom<String> for LocaleId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LocaleId> for String {
    fn from(value: LocaleId) -> Self {
        value.tag()
    }
}

impl fmt::Display for LocaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag())
    }
}
