//! CLI error types.

use navdata_config::ConfigError;
use navdata_tree::NavError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Nav(#[from] NavError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0} broken navigation target(s)")]
    Check(usize),
}
