//! `check` command implementation.

use clap::Args;
use sidebars_core::{BrokenReferenceSeverity, SidebarItem};

use super::LoadArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    pub load: LoadArgs,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// Every broken reference is reported before failing.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails or any broken reference is found.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.load.config()?;

        let mut options = config.load_options();
        let allow_broken =
            options.sidebar_options.broken_references == BrokenReferenceSeverity::Ignore;
        // Collect references here instead of failing on the first load error.
        options.sidebar_options.broken_references = BrokenReferenceSeverity::Ignore;
        let loaded = self.load.load(&config, &options).await?;

        output.heading(&format!(
            "Checked {} sidebar(s) from {}",
            loaded.sidebars.len(),
            config.docs_resolved.sidebar_path.origin()
        ));
        for (name, items) in &loaded.sidebars {
            output.status(&format!("  {name}: {} item(s)", count_items(items)));
        }

        if loaded.broken_references.is_empty() {
            output.ok("No broken references");
            return Ok(());
        }
        for reference in &loaded.broken_references {
            output.broken(reference);
        }
        if allow_broken {
            output.status("Broken references ignored by configuration");
            return Ok(());
        }
        Err(CliError::Validation(format!(
            "{} broken reference(s) found",
            loaded.broken_references.len()
        )))
    }
}

fn count_items(items: &[SidebarItem]) -> usize {
    items
        .iter()
        .map(|item| match item {
            SidebarItem::Category(category) => 1 + count_items(&category.items),
            _ => 1,
        })
        .sum()
}
