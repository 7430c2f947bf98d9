//! Navigation entry.

use serde::{Deserialize, Deserializer, Serialize};

use crate::target::Target;

/// One row of the navigation tree.
///
/// Every entry has exactly three fields. In structured form they are always
/// written, even when `target` is null or `children` is empty:
///
/// ```json
/// { "label": "Tabs", "target": "params.html#tabs", "children": [] }
/// ```
///
/// On read, `target` must be present (possibly `null`); a missing
/// `children` field reads as an empty list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavEntry {
    label: String,
    #[serde(deserialize_with = "required_target")]
    target: Option<Target>,
    #[serde(default)]
    children: Vec<NavEntry>,
}

/// Makes `target` a required key; serde otherwise treats a missing
/// `Option` field as `None`.
fn required_target<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Target>, D::Error> {
    Option::<Target>::deserialize(deserializer)
}

impl NavEntry {
    /// Create an entry.
    ///
    /// Entries are checked when they are placed into a
    /// [`NavTree`](crate::NavTree).
    #[must_use]
    pub fn new(label: impl Into<String>, target: Option<Target>, children: Vec<NavEntry>) -> Self {
        Self {
            label: label.into(),
            target,
            children,
        }
    }

    /// Create an entry without children.
    #[must_use]
    pub fn leaf(label: impl Into<String>, target: Option<Target>) -> Self {
        Self::new(label, target, Vec::new())
    }

    /// Display label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Link target, `None` for grouping labels.
    #[must_use]
    pub fn target(&self) -> Option<&Target> {
        self.target.as_ref()
    }

    /// Child entries in display order.
    #[must_use]
    pub fn children(&self) -> &[NavEntry] {
        &self.children
    }

    /// Whether the entry links anywhere.
    #[must_use]
    pub fn is_navigable(&self) -> bool {
        self.target.is_some()
    }

    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}
