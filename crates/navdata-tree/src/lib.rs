//! Documentation navigation trees.
//!
//! This crate provides:
//! - [`NavTree`]: an immutable, ordered tree of [`NavEntry`] rows
//! - [`Target`]: a page link with an optional `#fragment`
//! - [`codec`]: JSON, YAML and navtree (generator JavaScript) representations
//! - [`links`]: verification of targets against a rendered docs directory
//!
//! # Quick Start
//!
//! ```
//! # fn main() -> Result<(), navdata_tree::NavError> {
//! use navdata_tree::NavTree;
//!
//! let tree = NavTree::from_navtree(
//!     r#"var NAVTREE =
//! [
//!     [ "Guide", "guide.html", [
//!       [ "Setup", "guide.html#setup", null ]
//!     ] ]
//! ];"#,
//! )?;
//!
//! let labels: Vec<_> = tree.iter().map(|entry| entry.label()).collect();
//! assert_eq!(labels, ["Guide", "Setup"]);
//! # Ok(())
//! # }
//! ```

pub mod codec;
mod entry;
mod error;
pub mod links;
mod target;
mod tree;

pub use codec::{EncodeOptions, Format};
pub use entry::NavEntry;
pub use error::NavError;
pub use target::{Target, TargetError};
pub use tree::{NavTree, Walk, is_valid_identifier};
