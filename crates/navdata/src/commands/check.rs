//! `navdata check` command implementation.

use std::path::PathBuf;

use clap::Args;
use navdata_config::CliSettings;
use navdata_tree::links::check_links;

use super::{CommonArgs, FormatArg, load_tree};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Navigation data file (default: `[tree] source` from config).
    input: Option<PathBuf>,

    /// Input format (default: from the input extension).
    #[arg(long, value_enum)]
    from: Option<FormatArg>,

    /// Rendered documentation directory to check targets against
    /// (overrides config).
    #[arg(short, long)]
    site_dir: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if the data is malformed or any target is broken.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let settings = CliSettings {
            source: self.input,
            site_dir: self.site_dir,
            ..Default::default()
        };
        let config = self.common.load_config(&settings)?;

        let tree = load_tree(&config, self.from)?;
        output.success(&format!(
            "Navigation data is well-formed: {} entries, depth {}",
            tree.len(),
            tree.depth()
        ));

        let Some(site_dir) = &config.site_resolved.dir else {
            output.info("Link check: skipped (no site directory)");
            return Ok(());
        };

        let report = check_links(&tree, site_dir)?;
        for issue in &report.issues {
            output.warning(&format!(
                "{}: {} ({})",
                issue.label, issue.target, issue.kind
            ));
        }

        if report.is_ok() {
            output.success(&format!(
                "All {} targets resolve in {} ({} external skipped)",
                report.checked,
                site_dir.display(),
                report.skipped
            ));
            Ok(())
        } else {
            Err(CliError::Check(report.issues.len()))
        }
    }
}
