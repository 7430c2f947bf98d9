//! Navigation tree.
//!
//! [`NavTree`] is the single owner of every [`NavEntry`]. It is built once,
//! checked as a whole, and read-only afterward: entries are never reordered,
//! mutated, or shared between parents.
//!
//! # Traversal
//!
//! [`NavTree::walk`] visits entries depth-first in declared order, parents
//! before children. Each call starts a fresh walk, so traversals can be
//! repeated and interleaved freely.

use std::collections::HashSet;
use std::fmt::Write;

use crate::entry::NavEntry;
use crate::error::NavError;
use crate::target::Target;

/// Immutable, ordered navigation tree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavTree {
    name: Option<String>,
    entries: Vec<NavEntry>,
}

impl NavTree {
    /// Build a tree from top-level entries.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::Malformed`] if any label is blank or `name` is not
    /// a valid JavaScript identifier.
    pub fn new(name: Option<String>, entries: Vec<NavEntry>) -> Result<Self, NavError> {
        if let Some(name) = &name
            && !is_valid_identifier(name)
        {
            return Err(NavError::Malformed(format!(
                "tree name `{name}` is not a valid identifier"
            )));
        }

        let mut position = Vec::new();
        check_entries(&entries, &mut position)?;

        Ok(Self { name, entries })
    }

    /// Replace the tree name, keeping the entries.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::Malformed`] if `name` is not a valid identifier.
    pub fn with_name(self, name: impl Into<String>) -> Result<Self, NavError> {
        let name = name.into();
        if !is_valid_identifier(&name) {
            return Err(NavError::Malformed(format!(
                "tree name `{name}` is not a valid identifier"
            )));
        }
        Ok(Self {
            name: Some(name),
            entries: self.entries,
        })
    }

    /// Navtree variable name, if known.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Top-level entries in display order.
    #[must_use]
    pub fn entries(&self) -> &[NavEntry] {
        &self.entries
    }

    /// Depth-first walk yielding `(depth, entry)`, top level at depth 0.
    #[must_use]
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: vec![(0, self.entries.iter())],
        }
    }

    /// Depth-first walk over entries only.
    pub fn iter(&self) -> impl Iterator<Item = &NavEntry> {
        self.walk().map(|(_, entry)| entry)
    }

    /// Number of entries at every depth.
    #[must_use]
    pub fn len(&self) -> usize {
        self.walk().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum nesting depth: 0 when empty, 1 when flat.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.walk().map(|(depth, _)| depth + 1).max().unwrap_or(0)
    }

    /// Look up an entry by its position, e.g. `[27, 0]` for the first child
    /// of the 28th top-level entry.
    #[must_use]
    pub fn get(&self, index_path: &[usize]) -> Option<&NavEntry> {
        let (first, rest) = index_path.split_first()?;
        let mut entry = self.entries.get(*first)?;
        for &index in rest {
            entry = entry.children().get(index)?;
        }
        Some(entry)
    }

    /// First entry in traversal order with the given label.
    #[must_use]
    pub fn find(&self, label: &str) -> Option<&NavEntry> {
        self.iter().find(|entry| entry.label() == label)
    }

    /// First entry in traversal order linking to `target`.
    #[must_use]
    pub fn find_by_target(&self, target: &Target) -> Option<&NavEntry> {
        self.iter().find(|entry| entry.target() == Some(target))
    }

    /// Entries from the top level down to the first entry linking to
    /// `target`. Empty when no entry links there.
    #[must_use]
    pub fn breadcrumbs(&self, target: &Target) -> Vec<&NavEntry> {
        let mut trail = Vec::new();
        if !collect_trail(&self.entries, target, &mut trail) {
            trail.clear();
        }
        trail
    }

    /// Distinct target pages in first-seen order.
    #[must_use]
    pub fn pages(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.iter()
            .filter_map(NavEntry::target)
            .map(Target::page)
            .filter(|page| seen.insert(*page))
            .collect()
    }
}

impl<'a> IntoIterator for &'a NavTree {
    type Item = (usize, &'a NavEntry);
    type IntoIter = Walk<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.walk()
    }
}

/// Depth-first pre-order iterator over a [`NavTree`].
#[derive(Clone, Debug)]
pub struct Walk<'a> {
    stack: Vec<(usize, std::slice::Iter<'a, NavEntry>)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a NavEntry);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (depth, siblings) = self.stack.last_mut()?;
            let depth = *depth;
            if let Some(entry) = siblings.next() {
                if entry.has_children() {
                    self.stack.push((depth + 1, entry.children().iter()));
                }
                return Some((depth, entry));
            }
            self.stack.pop();
        }
    }
}

/// Whether `name` can be used as a navtree variable name.
#[must_use]
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn check_entries(entries: &[NavEntry], position: &mut Vec<usize>) -> Result<(), NavError> {
    for (index, entry) in entries.iter().enumerate() {
        position.push(index);
        if entry.label().trim().is_empty() {
            return Err(NavError::Malformed(format!(
                "entry {} has an empty label",
                describe_position(position)
            )));
        }
        check_entries(entry.children(), position)?;
        position.pop();
    }
    Ok(())
}

/// Format an index path as `3` or `27.0` (1-based for readability).
fn describe_position(position: &[usize]) -> String {
    let mut out = String::new();
    for (i, index) in position.iter().enumerate() {
        if i > 0 {
            out.push('.');
        }
        let _ = write!(out, "{}", index + 1);
    }
    out
}

fn collect_trail<'a>(
    entries: &'a [NavEntry],
    target: &Target,
    trail: &mut Vec<&'a NavEntry>,
) -> bool {
    for entry in entries {
        trail.push(entry);
        if entry.target() == Some(target) || collect_trail(entry.children(), target, trail) {
            return true;
        }
        trail.pop();
    }
    false
}
