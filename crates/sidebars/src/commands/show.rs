//! `show` command implementation.

use clap::Args;

use super::LoadArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the show command.
#[derive(Args)]
pub(crate) struct ShowArgs {
    #[command(flatten)]
    pub load: LoadArgs,

    /// Print only this sidebar.
    #[arg(long)]
    pub sidebar: Option<String>,

    /// Include broken references in the output.
    #[arg(long)]
    pub with_broken: bool,
}

impl ShowArgs {
    /// Execute the show command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or sidebars cannot be loaded, or if
    /// the requested sidebar does not exist.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.load.config()?;
        let loaded = self.load.load(&config, &config.load_options()).await?;

        if let Some(name) = &self.sidebar {
            let items = loaded
                .sidebars
                .get(name)
                .ok_or_else(|| CliError::Validation(format!("Unknown sidebar '{name}'")))?;
            output.json(items)
        } else if self.with_broken {
            output.json(&loaded)
        } else {
            output.json(&loaded.sidebars)
        }
    }
}
