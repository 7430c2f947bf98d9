//! Target verification against rendered documentation.
//!
//! Every navigable entry must point at a page that exists under the site
//! directory, and a `#fragment` must name an `id` or `name` attribute on that
//! page. Each page is read at most once. External URLs and grouping labels
//! are skipped.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::entry::NavEntry;
use crate::error::NavError;
use crate::tree::NavTree;

static ANCHOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\s(?:id|name)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap()
});

/// Problem found with one entry's target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IssueKind {
    /// Target page does not exist.
    MissingPage,
    /// Page exists but has no matching anchor.
    MissingAnchor,
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MissingPage => "missing page",
            Self::MissingAnchor => "missing anchor",
        })
    }
}

/// Broken target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkIssue {
    /// Label of the entry.
    pub label: String,
    /// Target as written.
    pub target: String,
    pub kind: IssueKind,
}

/// Result of [`check_links`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinkReport {
    /// Targets resolved against the site directory.
    pub checked: usize,
    /// External targets that were not checked.
    pub skipped: usize,
    /// Broken targets in traversal order.
    pub issues: Vec<LinkIssue>,
}

impl LinkReport {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Check every target in `tree` against pages under `site_dir`.
///
/// # Errors
///
/// Returns [`NavError::Io`] if a page exists but cannot be read.
pub fn check_links(tree: &NavTree, site_dir: &Path) -> Result<LinkReport, NavError> {
    let mut pages = PageAnchors::new(site_dir);
    let mut report = LinkReport::default();

    for entry in tree.iter() {
        let Some(target) = entry.target() else {
            continue;
        };
        if target.is_external() {
            report.skipped += 1;
            continue;
        }
        report.checked += 1;

        let kind = match (pages.anchors(target.page())?, target.fragment()) {
            (None, _) => Some(IssueKind::MissingPage),
            (Some(anchors), Some(fragment)) if !anchors.contains(fragment) => {
                Some(IssueKind::MissingAnchor)
            }
            _ => None,
        };

        if let Some(kind) = kind {
            tracing::warn!(label = entry.label(), target = %target, %kind, "Broken navigation target");
            report.issues.push(issue(entry, kind));
        }
    }

    tracing::debug!(
        checked = report.checked,
        skipped = report.skipped,
        issues = report.issues.len(),
        "Checked navigation targets"
    );
    Ok(report)
}

fn issue(entry: &NavEntry, kind: IssueKind) -> LinkIssue {
    LinkIssue {
        label: entry.label().to_owned(),
        target: entry
            .target()
            .map(ToString::to_string)
            .unwrap_or_default(),
        kind,
    }
}

/// Anchors per page, `None` for pages that do not exist.
struct PageAnchors<'a> {
    site_dir: &'a Path,
    cache: HashMap<String, Option<HashSet<String>>>,
}

impl<'a> PageAnchors<'a> {
    fn new(site_dir: &'a Path) -> Self {
        Self {
            site_dir,
            cache: HashMap::new(),
        }
    }

    fn anchors(&mut self, page: &str) -> Result<Option<&HashSet<String>>, NavError> {
        if !self.cache.contains_key(page) {
            let anchors = self.read(page)?;
            self.cache.insert(page.to_owned(), anchors);
        }
        Ok(self.cache.get(page).and_then(Option::as_ref))
    }

    fn read(&self, page: &str) -> Result<Option<HashSet<String>>, NavError> {
        let Some(path) = self.resolve(page) else {
            tracing::debug!(page, "Target leaves the site directory");
            return Ok(None);
        };
        match std::fs::read_to_string(&path) {
            Ok(html) => Ok(Some(extract_anchors(&html))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(NavError::io(path, e)),
        }
    }

    /// Path of `page` inside the site directory, `None` if it would leave it.
    ///
    /// A leading `/` is site-relative, not filesystem-absolute.
    fn resolve(&self, page: &str) -> Option<PathBuf> {
        let mut path = self.site_dir.to_path_buf();
        let mut depth = 0usize;
        for component in Path::new(page.trim_start_matches('/')).components() {
            match component {
                Component::Normal(part) => {
                    path.push(part);
                    depth += 1;
                }
                Component::CurDir => {}
                Component::ParentDir if depth > 0 => {
                    path.pop();
                    depth -= 1;
                }
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
            }
        }
        (depth > 0).then_some(path)
    }
}

/// Collect `id="..."` and `name="..."` attribute values.
fn extract_anchors(html: &str) -> HashSet<String> {
    ANCHOR_RE
        .captures_iter(html)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str().to_owned())
        .collect()
}
