//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod convert;
pub(crate) mod show;

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use navdata_config::{CliSettings, Config};
use navdata_tree::{Format, NavTree, codec};

use crate::error::CliError;

pub(crate) use check::CheckArgs;
pub(crate) use convert::ConvertArgs;
pub(crate) use show::ShowArgs;

/// Arguments shared by every command.
#[derive(Args)]
pub(crate) struct CommonArgs {
    /// Path to configuration file (default: auto-discover navdata.toml).
    #[arg(short, long, env = "NAVDATA_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Navigation data format argument.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum FormatArg {
    Json,
    Yaml,
    Navtree,
}

impl From<FormatArg> for Format {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => Self::Json,
            FormatArg::Yaml => Self::Yaml,
            FormatArg::Navtree => Self::Navtree,
        }
    }
}

impl CommonArgs {
    /// Load config with CLI settings applied.
    fn load_config(&self, settings: &CliSettings) -> Result<Config, CliError> {
        Ok(Config::load(self.config.as_deref(), Some(settings))?)
    }
}

/// Load the configured source, using `from` or the file extension for the
/// format.
fn load_tree(config: &Config, from: Option<FormatArg>) -> Result<NavTree, CliError> {
    let source = config.require_source()?;
    let format = match from {
        Some(arg) => arg.into(),
        None => Format::from_path(source)?,
    };
    tracing::info!(source = %source.display(), %format, "Loading navigation data");
    Ok(codec::load_as(source, format)?)
}
