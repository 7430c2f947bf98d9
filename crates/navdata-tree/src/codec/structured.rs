//! JSON and YAML record lists.

use crate::codec::Format;
use crate::entry::NavEntry;
use crate::error::NavError;
use crate::tree::NavTree;

pub(super) fn decode_json(text: &str) -> Result<NavTree, NavError> {
    let entries: Vec<NavEntry> =
        serde_json::from_str(text).map_err(|e| NavError::malformed(Format::Json, e))?;
    NavTree::new(None, entries)
}

pub(super) fn decode_yaml(text: &str) -> Result<NavTree, NavError> {
    let entries: Vec<NavEntry> =
        serde_yaml::from_str(text).map_err(|e| NavError::malformed(Format::Yaml, e))?;
    NavTree::new(None, entries)
}

pub(super) fn encode_json(tree: &NavTree, pretty: bool) -> Result<String, NavError> {
    let result = if pretty {
        serde_json::to_string_pretty(tree.entries())
    } else {
        serde_json::to_string(tree.entries())
    };
    result.map_err(|e| NavError::Encode {
        format: Format::Json,
        message: e.to_string(),
    })
}

pub(super) fn encode_yaml(tree: &NavTree) -> Result<String, NavError> {
    serde_yaml::to_string(tree.entries()).map_err(|e| NavError::Encode {
        format: Format::Yaml,
        message: e.to_string(),
    })
}
