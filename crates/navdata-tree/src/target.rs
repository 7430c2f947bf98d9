//! Link targets.
//!
//! A target is a page path, optionally followed by `#fragment`:
//! - `"_c_standards_abbreviations.html"` - whole page
//! - `"_ccoding_stds_main.html#cstdsCyclomatic"` - anchor on a page

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Link target of a navigation entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Target {
    page: String,
    fragment: Option<String>,
}

/// Error returned when a target string is not a valid link.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TargetError {
    /// Target string is empty.
    #[error("target cannot be empty")]
    Empty,
    /// Nothing precedes the `#`.
    #[error("target `{0}` has no page before the fragment")]
    MissingPage(String),
    /// Nothing follows the `#`.
    #[error("target `{0}` has an empty fragment")]
    EmptyFragment(String),
}

impl Target {
    /// Parse a target from `page` or `page#fragment`.
    ///
    /// Only the first `#` separates page and fragment.
    pub fn parse(value: &str) -> Result<Self, TargetError> {
        if value.is_empty() {
            return Err(TargetError::Empty);
        }

        match value.split_once('#') {
            None => Ok(Self {
                page: value.to_owned(),
                fragment: None,
            }),
            Some(("", _)) => Err(TargetError::MissingPage(value.to_owned())),
            Some((_, "")) => Err(TargetError::EmptyFragment(value.to_owned())),
            Some((page, fragment)) => Ok(Self {
                page: page.to_owned(),
                fragment: Some(fragment.to_owned()),
            }),
        }
    }

    /// Page path without the fragment.
    #[must_use]
    pub fn page(&self) -> &str {
        &self.page
    }

    /// In-page anchor, if any.
    #[must_use]
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Whether the page is an absolute URL rather than a site-relative path.
    #[must_use]
    pub fn is_external(&self) -> bool {
        self.page.contains("://")
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.page)?;
        if let Some(fragment) = &self.fragment {
            write!(f, "#{fragment}")?;
        }
        Ok(())
    }
}

impl FromStr for Target {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Target {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Target {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(serde::de::Error::custom)
    }
}
