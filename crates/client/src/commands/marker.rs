//! Marker subcommands: the map-pin editing flow as terminal commands.

use anyhow::Result;
use clap::Parser;
use console::style;

use travelog_core::{ApplyOutcome, CollectionAction, DEFAULT_COLOR_TAG, Waypoint};

use crate::commands::App;

#[derive(Parser)]
pub enum MarkerCommand {
    /// Create or replace the marker at a coordinate pair
    Set(SetMarker),

    /// List every marker
    List(ListMarkers),

    /// Remove the marker at a coordinate pair
    Remove(RemoveMarker),
}

impl MarkerCommand {
    pub async fn execute(self, app: App) -> Result<()> {
        match self {
            MarkerCommand::Set(cmd) => cmd.execute(app).await,
            MarkerCommand::List(cmd) => cmd.execute(app).await,
            MarkerCommand::Remove(cmd) => cmd.execute(app).await,
        }
    }
}

#[derive(Parser)]
pub struct SetMarker {
    /// Latitude; together with --lon this is the marker's identity
    #[arg(long)]
    lat: f64,

    /// Longitude
    #[arg(long)]
    lon: f64,

    /// Marker title
    #[arg(long, default_value = "")]
    title: String,

    /// Pin color tag
    #[arg(long, default_value = DEFAULT_COLOR_TAG)]
    color: String,
}

impl SetMarker {
    pub async fn execute(self, mut app: App) -> Result<()> {
        let marker =
            Waypoint::new(self.title, self.lat, self.lon).with_color_tag(self.color);

        let outcome = app.markers.upsert(marker.clone()).await?;
        app.markers.flushed().await;

        let verb = match outcome {
            ApplyOutcome::Updated => "Replaced",
            _ => "Added",
        };
        println!(
            "{} marker '{}' at ({}, {})",
            style(verb).green().bold(),
            marker.name,
            marker.latitude,
            marker.longitude
        );
        Ok(())
    }
}

#[derive(Parser)]
pub struct ListMarkers {}

impl ListMarkers {
    pub async fn execute(self, app: App) -> Result<()> {
        let markers = app.markers.state();

        if markers.is_empty() {
            println!("{}", style("No markers yet.").dim());
            return Ok(());
        }

        for marker in markers {
            println!(
                "({:>9.4}, {:>9.4})  {}  {}",
                marker.latitude,
                marker.longitude,
                style(&marker.color_tag).dim(),
                marker.name
            );
        }
        Ok(())
    }
}

#[derive(Parser)]
pub struct RemoveMarker {
    #[arg(long)]
    lat: f64,

    #[arg(long)]
    lon: f64,
}

impl RemoveMarker {
    pub async fn execute(self, mut app: App) -> Result<()> {
        let tombstone = Waypoint::new("", self.lat, self.lon);

        let outcome = app
            .markers
            .dispatch(CollectionAction::Delete(tombstone))
            .await?;
        app.markers.flushed().await;

        match outcome {
            ApplyOutcome::Removed { .. } => {
                println!("{} marker at ({}, {})", style("Removed").green().bold(), self.lat, self.lon);
            }
            _ => println!("No marker at ({}, {})", self.lat, self.lon),
        }
        Ok(())
    }
}
