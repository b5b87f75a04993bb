//! City subcommands: the list/detail/entry screens as terminal commands.

use anyhow::{Result, bail};
use chrono::{NaiveDate, NaiveTime, Utc};
use clap::Parser;
use console::style;

use travelog_core::{ApplyOutcome, City, CityId, CollectionAction};

use crate::catalog;
use crate::commands::App;

#[derive(Parser)]
pub enum CityCommand {
    /// Record a visited city
    Add(AddCity),

    /// List every recorded city
    List(ListCities),

    /// Show one city in full, waypoints included
    Show(ShowCity),

    /// Replace fields of a recorded city
    Edit(EditCity),

    /// Remove a city by id
    Remove(RemoveCity),
}

impl CityCommand {
    pub async fn execute(self, app: App) -> Result<()> {
        match self {
            CityCommand::Add(cmd) => cmd.execute(app).await,
            CityCommand::List(cmd) => cmd.execute(app).await,
            CityCommand::Show(cmd) => cmd.execute(app).await,
            CityCommand::Edit(cmd) => cmd.execute(app).await,
            CityCommand::Remove(cmd) => cmd.execute(app).await,
        }
    }
}

#[derive(Parser)]
pub struct AddCity {
    /// City name
    #[arg(long)]
    name: String,

    /// Country code (see the catalog: BR, EUA, FR, ES, PT, IT)
    #[arg(long, default_value = "BR")]
    country: String,

    /// Visit date (YYYY-MM-DD)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Passport was stamped there
    #[arg(long)]
    passport: bool,

    /// Latitude of the selected location
    #[arg(long)]
    lat: f64,

    /// Longitude of the selected location
    #[arg(long)]
    lon: f64,
}

impl AddCity {
    pub async fn execute(self, mut app: App) -> Result<()> {
        let mut city = City::new(
            CityId::from_timestamp(Utc::now()),
            self.name,
            self.country,
            self.lat,
            self.lon,
        )
        .with_passport(self.passport);

        if let Some(date) = self.date {
            city = city.with_visited_date(date.and_time(NaiveTime::MIN).and_utc());
        }

        city.validate()?;

        if catalog::find(&city.country).is_none() {
            tracing::info!("country '{}' is not in the catalog", city.country);
        }

        app.cities
            .dispatch(CollectionAction::Add(city.clone()))
            .await?;
        app.cities.flushed().await;

        println!(
            "{} {} ({}) id={}",
            style("Added").green().bold(),
            city.name,
            catalog::label_for(&city.country),
            city.id
        );
        Ok(())
    }
}

#[derive(Parser)]
pub struct ListCities {}

impl ListCities {
    pub async fn execute(self, app: App) -> Result<()> {
        let cities = app.cities.state();

        if cities.is_empty() {
            println!(
                "{}",
                style("No cities yet. Record one with `travelog city add`.").dim()
            );
            return Ok(());
        }

        for city in cities {
            let visited = city
                .visited_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string());
            let passport = if city.has_passport { "✓" } else { " " };
            println!(
                "{}  {:<20} {:<14} {}  [{}]  ({:.2}, {:.2})  {} waypoint(s)",
                style(&city.id).dim(),
                city.name,
                catalog::label_for(&city.country),
                visited,
                passport,
                city.latitude,
                city.longitude,
                city.waypoints.len()
            );
        }
        Ok(())
    }
}

#[derive(Parser)]
pub struct ShowCity {
    /// City id
    id: String,
}

impl ShowCity {
    pub async fn execute(self, app: App) -> Result<()> {
        let Some(city) = app
            .cities
            .state()
            .iter()
            .find(|c| c.id.as_str() == self.id)
        else {
            bail!("no city with id {}", self.id);
        };

        println!("{}", style(&city.name).bold());
        println!("  id:        {}", city.id);
        println!("  country:   {}", catalog::label_for(&city.country));
        match city.visited_date {
            Some(date) => println!("  visited:   {}", date.format("%Y-%m-%d")),
            None => println!("  visited:   -"),
        }
        println!("  passport:  {}", if city.has_passport { "yes" } else { "no" });
        println!("  location:  ({}, {})", city.latitude, city.longitude);

        if !city.waypoints.is_empty() {
            println!("  waypoints:");
            for waypoint in &city.waypoints {
                println!(
                    "    {} ({}, {}) {}",
                    waypoint.name, waypoint.latitude, waypoint.longitude, waypoint.color_tag
                );
            }
        }
        Ok(())
    }
}

#[derive(Parser)]
pub struct EditCity {
    /// City id
    id: String,

    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    country: Option<String>,

    /// Visit date (YYYY-MM-DD)
    #[arg(long)]
    date: Option<NaiveDate>,

    #[arg(long)]
    passport: Option<bool>,

    #[arg(long)]
    lat: Option<f64>,

    #[arg(long)]
    lon: Option<f64>,
}

impl EditCity {
    pub async fn execute(self, mut app: App) -> Result<()> {
        let Some(existing) = app
            .cities
            .state()
            .iter()
            .find(|c| c.id.as_str() == self.id)
        else {
            bail!("no city with id {}", self.id);
        };

        // Whole-record replacement: start from the stored record, override
        // the provided fields, keep the id.
        let mut updated = existing.clone();
        if let Some(name) = self.name {
            updated.name = name;
        }
        if let Some(country) = self.country {
            updated.country = country;
        }
        if let Some(date) = self.date {
            updated.visited_date = Some(date.and_time(NaiveTime::MIN).and_utc());
        }
        if let Some(passport) = self.passport {
            updated.has_passport = passport;
        }
        if let Some(lat) = self.lat {
            updated.latitude = lat;
        }
        if let Some(lon) = self.lon {
            updated.longitude = lon;
        }

        updated.validate()?;

        app.cities
            .dispatch(CollectionAction::Update(updated.clone()))
            .await?;
        app.cities.flushed().await;

        println!("{} {}", style("Updated").green().bold(), updated.name);
        Ok(())
    }
}

#[derive(Parser)]
pub struct RemoveCity {
    /// City id
    id: String,
}

impl RemoveCity {
    pub async fn execute(self, mut app: App) -> Result<()> {
        // Delete matches on the key alone; the rest of the record is a
        // tombstone.
        let tombstone = City::new(CityId::from(self.id.as_str()), "", "", 0.0, 0.0);

        let outcome = app
            .cities
            .dispatch(CollectionAction::Delete(tombstone))
            .await?;
        app.cities.flushed().await;

        match outcome {
            ApplyOutcome::Removed { count } => {
                println!("{} {} record(s)", style("Removed").green().bold(), count);
            }
            _ => println!("No city with id {}", self.id),
        }
        Ok(())
    }
}
