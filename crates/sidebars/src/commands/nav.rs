//! `nav` command implementation.

use clap::Args;
use sidebars_core::{NavigationLink, SidebarsUtils};

use super::LoadArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the nav command.
#[derive(Args)]
pub(crate) struct NavArgs {
    /// Document id to look up.
    pub doc_id: String,

    #[command(flatten)]
    pub load: LoadArgs,

    /// Print navigation as JSON.
    #[arg(long)]
    pub json: bool,
}

impl NavArgs {
    /// Execute the nav command.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails or the document is in no sidebar.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.load.config()?;
        let loaded = self.load.load(&config, &config.load_options()).await?;

        let utils = SidebarsUtils::new(&loaded.sidebars);
        let navigation = utils.doc_navigation(&self.doc_id).ok_or_else(|| {
            CliError::Validation(format!("Document '{}' is not in any sidebar", self.doc_id))
        })?;

        if self.json {
            return output.json(&navigation);
        }
        output.heading(&format!("Sidebar: {}", navigation.sidebar_name));
        output.line(&format!("previous: {}", describe(navigation.previous.as_ref())))?;
        output.line(&format!("next:     {}", describe(navigation.next.as_ref())))
    }
}

fn describe(link: Option<&NavigationLink>) -> String {
    link.map_or_else(
        || "-".to_owned(),
        |link| format!("{} ({})", link.label, link.permalink),
    )
}
