//! `navdata convert` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use navdata_config::CliSettings;
use navdata_tree::{EncodeOptions, Format, codec};

use super::{CommonArgs, FormatArg, load_tree};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the convert command.
#[derive(Args)]
pub(crate) struct ConvertArgs {
    /// Navigation data file (default: `[tree] source` from config).
    input: Option<PathBuf>,

    /// Input format (default: from the input extension).
    #[arg(long, value_enum)]
    from: Option<FormatArg>,

    /// Output format (default: from the output extension, then config, then json).
    #[arg(long, value_enum)]
    to: Option<FormatArg>,

    /// Output file (default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Variable name for navtree output (overrides config).
    #[arg(long)]
    name: Option<String>,

    /// Write JSON on a single line.
    #[arg(long)]
    compact: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl ConvertArgs {
    /// Execute the convert command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the input is malformed, or
    /// the output cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let settings = CliSettings {
            source: self.input,
            name: self.name,
            pretty: self.compact.then_some(false),
            ..Default::default()
        };
        let config = self.common.load_config(&settings)?;

        let tree = load_tree(&config, self.from)?;
        let format = output_format(
            self.to.map(Format::from),
            self.output.as_deref(),
            config.output.format,
        );
        let options = EncodeOptions {
            pretty: config.output.pretty,
            name: config.tree_resolved.name,
        };
        let text = codec::encode(&tree, format, &options)?;

        match &self.output {
            Some(path) => {
                std::fs::write(path, &text)?;
                output.success(&format!(
                    "Wrote {} entries as {format} to {}",
                    tree.len(),
                    path.display()
                ));
            }
            None => output.data(&text)?,
        }

        Ok(())
    }
}

/// Pick the output format: explicit flag, then output extension, then
/// config, then JSON.
fn output_format(explicit: Option<Format>, output: Option<&Path>, configured: Option<Format>) -> Format {
    explicit
        .or_else(|| output.and_then(|path| Format::from_path(path).ok()))
        .or(configured)
        .unwrap_or(Format::Json)
}
