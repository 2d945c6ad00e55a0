//! squad CLI
//!
//! Roster, calendar and stats management over a directory of JSON files.

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use squad_core::{FileStore, RosterStore, SquadConfig};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "squad")]
#[command(
    about = "Manage a football squad: players, schedule, attendance and stats",
    long_about = None
)]
struct Cli {
    /// Data directory (overrides the config file)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// YAML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fill in demo data where missing
    Seed,

    /// Delete everything and reseed
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },

    /// List players
    Players {
        /// position | name | age | jersey
        #[arg(long, default_value = "position")]
        sort: String,
    },

    /// Add a player
    AddPlayer {
        #[arg(long)]
        name: String,
        #[arg(long)]
        jersey: u32,
        /// goalkeeper | defense | midfield | attack
        #[arg(long)]
        position: String,
        #[arg(long)]
        age: u8,
        #[arg(long, default_value = "false")]
        injured: bool,
        #[arg(long)]
        nationality: Option<String>,
    },

    /// Change some fields of a player
    EditPlayer {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        jersey: Option<u32>,
        #[arg(long)]
        position: Option<String>,
        #[arg(long)]
        age: Option<u8>,
        /// true | false
        #[arg(long)]
        injured: Option<bool>,
        #[arg(long)]
        nationality: Option<String>,
    },

    /// Remove a player by id
    RemovePlayer {
        id: String,
        #[arg(long)]
        yes: bool,
    },

    /// List events in date order
    Events {
        /// Only events after now
        #[arg(long)]
        upcoming: bool,
        /// Only games
        #[arg(long)]
        games: bool,
    },

    /// Add a training session or game
    AddEvent {
        /// YYYY-MM-DD
        #[arg(long)]
        date: String,
        /// HH:MM
        #[arg(long)]
        time: String,
        #[arg(long)]
        location: String,
        /// training | game
        #[arg(long = "type", default_value = "training")]
        kind: String,
    },

    /// Change date, time, location or type of an event
    EditEvent {
        id: String,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        time: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long = "type")]
        kind: Option<String>,
    },

    /// Remove an event by id
    RemoveEvent {
        id: String,
        #[arg(long)]
        yes: bool,
    },

    /// Mark a player present/absent at an event (toggles without a flag)
    Attend {
        event: String,
        player: String,
        #[arg(long, conflicts_with_all = ["absent", "clear"])]
        present: bool,
        #[arg(long, conflicts_with = "clear")]
        absent: bool,
        /// Forget the mark
        #[arg(long)]
        clear: bool,
    },

    /// Attendance marks of one event
    RollCall { event: String },

    /// Per-player stats table
    Stats,

    /// Set goals, yellow-cards or red-cards for a player
    SetStat {
        player: String,
        field: String,
        value: u32,
    },

    /// Team dashboard: top scorer, attendance, next event
    Summary,
}

fn main() -> Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SquadConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SquadConfig::default(),
    };
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    let backend = FileStore::new(config.data_dir.clone());
    tracing::debug!(data_dir = %backend.dir().display(), "opening store");
    let mut store = RosterStore::new(backend);

    let result = commands::run(cli.command, &mut store, &config);
    if let Err(err) = &result {
        if let Some(hint) = commands::recovery_hint(err) {
            tracing::error!("{}", hint);
        }
    }
    result
}
