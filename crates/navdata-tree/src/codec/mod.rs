//! Serialized forms of a [`NavTree`].
//!
//! Three representations are supported:
//!
//! - [`Format::Json`] / [`Format::Yaml`]: a list of
//!   `{label, target, children}` records. `target` is always written
//!   (`null` for grouping labels) and `children` is always written (`[]` when
//!   empty).
//! - [`Format::Navtree`]: the generator's JavaScript literal, where each row
//!   is a `[label, target, children]` array and empty children are `null`.
//!
//! Decoding always checks the whole tree and fails with
//! [`NavError::Malformed`] on any deviation from the fixed shape.

mod navtree;
mod structured;

use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::error::NavError;
use crate::tree::NavTree;

pub use navtree::DEFAULT_NAME;

/// Serialized form of a navigation tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// JSON list of records.
    Json,
    /// YAML list of records.
    Yaml,
    /// Generator JavaScript literal (`var NAME = [...];`).
    Navtree,
}

impl Format {
    /// Detect the format from a file extension.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::UnknownFormat`] for unrecognized extensions.
    pub fn from_path(path: &Path) -> Result<Self, NavError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("js") => Ok(Self::Navtree),
            _ => Err(NavError::UnknownFormat(path.to_path_buf())),
        }
    }

    /// Preferred file extension.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Navtree => "js",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Navtree => "navtree",
        })
    }
}

/// Options for [`encode`].
#[derive(Clone, Debug)]
pub struct EncodeOptions {
    /// Indent structured output (JSON only; YAML is always block style).
    pub pretty: bool,
    /// Navtree variable name. Falls back to the tree name, then
    /// [`DEFAULT_NAME`].
    pub name: Option<String>,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            name: None,
        }
    }
}

/// Decode a tree from text in the given format.
///
/// # Errors
///
/// Returns [`NavError::Malformed`] if the text does not describe a valid tree.
pub fn decode(format: Format, text: &str) -> Result<NavTree, NavError> {
    match format {
        Format::Json => structured::decode_json(text),
        Format::Yaml => structured::decode_yaml(text),
        Format::Navtree => navtree::decode(text),
    }
}

/// Encode a tree into the given format.
pub fn encode(tree: &NavTree, format: Format, options: &EncodeOptions) -> Result<String, NavError> {
    match format {
        Format::Json => structured::encode_json(tree, options.pretty),
        Format::Yaml => structured::encode_yaml(tree),
        Format::Navtree => {
            let name = options
                .name
                .as_deref()
                .or(tree.name())
                .unwrap_or(DEFAULT_NAME);
            navtree::encode(tree, name)
        }
    }
}

/// Read and decode a file, detecting the format from its extension.
///
/// # Errors
///
/// Returns [`NavError::UnknownFormat`], [`NavError::Io`] or
/// [`NavError::Malformed`].
pub fn load(path: &Path) -> Result<NavTree, NavError> {
    let format = Format::from_path(path)?;
    load_as(path, format)
}

/// Read and decode a file in an explicit format.
///
/// # Errors
///
/// Returns [`NavError::Io`] or [`NavError::Malformed`].
pub fn load_as(path: &Path, format: Format) -> Result<NavTree, NavError> {
    let text = std::fs::read_to_string(path).map_err(|e| NavError::io(path, e))?;
    let tree = decode(format, &text)?;
    tracing::debug!(
        path = %path.display(),
        %format,
        entries = tree.len(),
        "Loaded navigation tree"
    );
    Ok(tree)
}

impl NavTree {
    /// Decode from the JSON form.
    pub fn from_json(text: &str) -> Result<Self, NavError> {
        structured::decode_json(text)
    }

    /// Decode from the YAML form.
    pub fn from_yaml(text: &str) -> Result<Self, NavError> {
        structured::decode_yaml(text)
    }

    /// Decode from the navtree JavaScript form.
    pub fn from_navtree(text: &str) -> Result<Self, NavError> {
        navtree::decode(text)
    }

    /// Encode to the JSON form.
    pub fn to_json(&self, pretty: bool) -> Result<String, NavError> {
        structured::encode_json(self, pretty)
    }

    /// Encode to the YAML form.
    pub fn to_yaml(&self) -> Result<String, NavError> {
        structured::encode_yaml(self)
    }

    /// Encode to the navtree JavaScript form using the tree name, or
    /// [`DEFAULT_NAME`] when the tree has none.
    pub fn to_navtree(&self) -> Result<String, NavError> {
        navtree::encode(self, self.name().unwrap_or(DEFAULT_NAME))
    }
}
