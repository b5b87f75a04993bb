//! Remove every stored collection.

use anyhow::{Result, bail};
use clap::Parser;
use console::style;

use crate::commands::App;

#[derive(Parser)]
pub struct Reset {
    /// Confirm removal of all stored data
    #[arg(long)]
    yes: bool,
}

impl Reset {
    pub async fn execute(self, mut app: App) -> Result<()> {
        if !self.yes {
            bail!("this removes every city and marker; re-run with --yes to confirm");
        }

        app.cities.clear().await?;
        app.markers.clear().await?;
        app.cities.flushed().await;
        app.markers.flushed().await;

        // Sweep any slots the stores don't own (older app versions).
        app.backend.clear_all().await?;

        println!("{}", style("All data removed.").green().bold());
        Ok(())
    }
}
