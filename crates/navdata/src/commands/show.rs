//! `navdata show` command implementation.

use std::fmt::Write;
use std::path::PathBuf;

use clap::Args;
use navdata_config::CliSettings;
use navdata_tree::NavTree;

use super::{CommonArgs, FormatArg, load_tree};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the show command.
#[derive(Args)]
pub(crate) struct ShowArgs {
    /// Navigation data file (default: `[tree] source` from config).
    input: Option<PathBuf>,

    /// Input format (default: from the input extension).
    #[arg(long, value_enum)]
    from: Option<FormatArg>,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl ShowArgs {
    /// Execute the show command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let settings = CliSettings {
            source: self.input,
            ..Default::default()
        };
        let config = self.common.load_config(&settings)?;
        let tree = load_tree(&config, self.from)?;

        output.data(&render_outline(&tree, |target| output.dimmed(target)))?;
        output.info(&format!(
            "{} entries, {} pages, depth {}",
            tree.len(),
            tree.pages().len(),
            tree.depth()
        ));
        Ok(())
    }
}

/// One line per entry, indented two spaces per level.
fn render_outline(tree: &NavTree, style_target: impl Fn(&str) -> String) -> String {
    let mut out = String::new();
    if let Some(name) = tree.name() {
        let _ = writeln!(out, "{name}");
    }
    for (depth, entry) in tree {
        let indent = "  ".repeat(depth);
        let target = entry
            .target()
            .map_or_else(|| "(group)".to_owned(), ToString::to_string);
        let _ = writeln!(
            out,
            "{indent}- {}  {}",
            entry.label(),
            style_target(&target)
        );
    }
    out
}
