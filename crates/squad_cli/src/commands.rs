use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use squad_core::seed::{calendar::new_event_id, roster::new_player_id, seeded_rng};
use squad_core::stats::{
    leaderboard, next_event, next_game, position_breakdown, team_summary, Metric,
};
use squad_core::{
    compute_stats, sort_roster, update_stat, Attendance, Event, EventPatch, EventType,
    KeyValueStore, NoImages, Player, PlayerPatch, Position, RosterOrder, RosterStore, Seeder,
    SquadConfig, SquadError, StatField, StoreError,
};

use crate::Commands;

pub fn run<S: KeyValueStore>(
    command: Commands,
    store: &mut RosterStore<S>,
    config: &SquadConfig,
) -> Result<()> {
    run_at(command, store, config, Local::now().naive_local())
}

pub fn run_at<S: KeyValueStore>(
    command: Commands,
    store: &mut RosterStore<S>,
    config: &SquadConfig,
    now: NaiveDateTime,
) -> Result<()> {
    let today = now.date();
    let seeder = Seeder::new(&config.seed, &NoImages);
    let mut rng = seeded_rng(&config.seed);

    match command {
        Commands::Seed => {
            let report = seeder.ensure_seed_data(store, today, &mut rng)?;
            if report.is_noop() {
                println!("Nothing to do, data is already seeded");
            } else {
                println!("Players inserted:   {}", report.players_inserted);
                println!("Names corrected:    {}", report.names_corrected);
                println!("Duplicates removed: {}", report.duplicates_removed);
                println!("Events added:       {}", report.events_added);
                println!("Stats regenerated:  {}", report.stats_regenerated);
            }
        }

        Commands::Reset { yes } => {
            confirm(yes, "reset all data")?;
            let report = seeder.reset_all(store, today, &mut rng)?;
            println!(
                "Reset complete: {} players, {} events",
                report.players_inserted, report.events_added
            );
        }

        Commands::Players { sort } => {
            let order: RosterOrder = sort.parse()?;
            seeder.ensure_seed_data(store, today, &mut rng)?;
            let mut players = store.players()?;
            sort_roster(&mut players, order);
            for p in &players {
                println!(
                    "#{:<3} {:<24} {:<10} age {:<3} {}{}",
                    p.jersey_number,
                    p.name,
                    p.position,
                    p.age,
                    if p.is_injured { "[injured] " } else { "" },
                    p.id
                );
            }
            println!("{} players", players.len());
        }

        Commands::AddPlayer { name, jersey, position, age, injured, nationality } => {
            let position: Position = position.parse()?;
            warn_if_jersey_taken(store, jersey, None)?;
            let player = Player {
                id: new_player_id(),
                name,
                jersey_number: jersey,
                position,
                age,
                is_injured: injured,
                image_url: None,
                nationality,
                height: None,
                weight: None,
                date_of_birth: None,
                contract_until: None,
            };
            let id = player.id.clone();
            store.add_player(player)?;
            println!("Added player {}", id);
        }

        Commands::EditPlayer { id, name, jersey, position, age, injured, nationality } => {
            let position = position.map(|p| p.parse::<Position>()).transpose()?;
            if let Some(jersey) = jersey {
                warn_if_jersey_taken(store, jersey, Some(&id))?;
            }
            let patch = PlayerPatch {
                name,
                jersey_number: jersey,
                position,
                age,
                is_injured: injured,
                nationality,
                ..Default::default()
            };
            if !store.update_player(&id, patch)? {
                bail!("player {} not found", id);
            }
            println!("Updated player {}", id);
        }

        Commands::RemovePlayer { id, yes } => {
            confirm(yes, "remove the player")?;
            if !store.delete_player(&id)? {
                bail!("player {} not found", id);
            }
            println!("Removed player {}", id);
        }

        Commands::Events { upcoming, games } => {
            seeder.ensure_seed_data(store, today, &mut rng)?;
            let events = store.events()?;
            for e in event_listing(&events, now, upcoming, games) {
                println!(
                    "{} {} {:<8} {:<32} {:>2} present  {}",
                    e.date,
                    e.time.format("%H:%M"),
                    e.event_type,
                    e.location,
                    e.attendance.present_count(),
                    e.id
                );
            }
        }

        Commands::AddEvent { date, time, location, kind } => {
            let date = parse_date(&date)?;
            let time = parse_time(&time)?;
            let kind: EventType = kind.parse()?;
            let event = Event::new(new_event_id(), date, time, location, kind);
            let id = event.id.clone();
            store.add_event(event)?;
            println!("Added {} {}", kind, id);
        }

        Commands::EditEvent { id, date, time, location, kind } => {
            let patch = EventPatch {
                date: date.as_deref().map(parse_date).transpose()?,
                time: time.as_deref().map(parse_time).transpose()?,
                location,
                event_type: kind.map(|k| k.parse::<EventType>()).transpose()?,
                attendance: None,
            };
            if !store.update_event(&id, patch)? {
                bail!("event {} not found", id);
            }
            println!("Updated event {}", id);
        }

        Commands::RemoveEvent { id, yes } => {
            confirm(yes, "remove the event")?;
            if !store.delete_event(&id)? {
                bail!("event {} not found", id);
            }
            println!("Removed event {}", id);
        }

        Commands::Attend { event, player, present, absent, clear } => {
            if clear {
                if !store.clear_attendance(&event, &player)? {
                    bail!("event {} not found", event);
                }
                println!("{} unrecorded at {}", player, event);
                return Ok(());
            }
            let mark = match (present, absent) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            match store.set_attendance(&event, &player, mark)? {
                Some(true) => println!("{} present at {}", player, event),
                Some(false) => println!("{} absent from {}", player, event),
                None => bail!("event {} not found", event),
            }
        }

        Commands::RollCall { event } => {
            let events = store.events()?;
            let Some(event) = events.iter().find(|e| e.id == event) else {
                bail!("event {} not found", event);
            };
            let players = store.players()?;
            println!(
                "{} {} at {} ({} of {} marked)",
                event.event_type,
                event.date,
                event.location,
                event.attendance.len(),
                players.len()
            );
            for (name, mark) in roll_call(event, &players) {
                let label = match mark {
                    Attendance::Present => "present",
                    Attendance::Absent => "absent",
                    Attendance::Unrecorded => "-",
                };
                println!("  {:<24} {}", name, label);
            }
        }

        Commands::Stats => {
            seeder.ensure_seed_data(store, today, &mut rng)?;
            let players = store.players()?;
            let stats = compute_stats(store)?;
            println!(
                "{:<24} {:>5} {:>5} {:>3} {:>3} {:>5}",
                "player", "games", "goals", "YC", "RC", "att%"
            );
            for (player, s) in players.iter().zip(&stats) {
                println!(
                    "{:<24} {:>5} {:>5} {:>3} {:>3} {:>4}%",
                    player.name,
                    s.games_played,
                    s.goals,
                    s.yellow_cards,
                    s.red_cards,
                    s.attendance_percentage
                );
            }
        }

        Commands::SetStat { player, field, value } => {
            let field: StatField = field.parse()?;
            let record = update_stat(store, &player, field, value)?;
            println!("{}: {} = {}", record.player_id, field, record.get(field));
        }

        Commands::Summary => {
            seeder.ensure_seed_data(store, today, &mut rng)?;
            let players = store.players()?;
            let events = store.events()?;
            let stats = compute_stats(store)?;
            let summary = team_summary(&players, &stats, &events);

            match &summary.top_scorer {
                Some(top) => {
                    println!("Top scorer:         {} ({} goals)", top.player_name, top.goals)
                }
                None => println!("Top scorer:         -"),
            }
            println!("Average attendance: {}%", summary.average_attendance);
            println!("Games:              {}", summary.total_games);
            println!("Next event:         {}", describe(next_event(&events, now)));
            println!("Next game:          {}", describe(next_game(&events, now)));

            let name_of = |id: &str| {
                players.iter().find(|p| p.id == id).map(|p| p.name.as_str()).unwrap_or("?")
            };
            println!("\nMost attended:");
            for s in leaderboard(&stats, Metric::Attendance, 5) {
                println!("  {:<24} {}%", name_of(&s.player_id), s.attendance_percentage);
            }
            println!("\nMost games:");
            for s in leaderboard(&stats, Metric::GamesPlayed, 5) {
                println!("  {:<24} {}", name_of(&s.player_id), s.games_played);
            }
            println!("\nSquad by position:");
            for (position, count) in position_breakdown(&players) {
                println!("  {:<10} {}", position, count);
            }
        }
    }

    Ok(())
}

/// Suggests a reset when the failure is a store error that cannot heal itself.
pub fn recovery_hint(err: &anyhow::Error) -> Option<&'static str> {
    let store_error = err.chain().find_map(|cause| match cause.downcast_ref::<SquadError>() {
        Some(SquadError::Store(inner)) => Some(inner),
        _ => cause.downcast_ref::<StoreError>(),
    })?;
    if store_error.is_recoverable() {
        None
    } else {
        Some("stored data is unreadable; `squad reset --yes` rebuilds it")
    }
}

fn confirm(yes: bool, action: &str) -> Result<()> {
    if !yes {
        bail!("refusing to {} without --yes", action);
    }
    tracing::info!("confirmed: {}", action);
    Ok(())
}

fn warn_if_jersey_taken<S: KeyValueStore>(
    store: &RosterStore<S>,
    jersey: u32,
    except: Option<&str>,
) -> Result<()> {
    let taken = store
        .players()?
        .iter()
        .any(|p| p.jersey_number == jersey && Some(p.id.as_str()) != except);
    if taken {
        tracing::warn!(jersey, "jersey number already taken");
    }
    Ok(())
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{}'", value))
}

fn parse_time(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M").with_context(|| format!("invalid time '{}'", value))
}

fn describe(event: Option<&Event>) -> String {
    match event {
        Some(e) => format!(
            "{} {} {} at {}",
            e.event_type,
            e.date,
            e.time.format("%H:%M"),
            e.location
        ),
        None => "-".to_string(),
    }
}

/// Events in start order, optionally only future ones and only games.
fn event_listing(
    events: &[Event],
    now: NaiveDateTime,
    upcoming: bool,
    games_only: bool,
) -> Vec<&Event> {
    let mut listed: Vec<&Event> = events
        .iter()
        .filter(|e| !upcoming || e.starts_at() > now)
        .filter(|e| !games_only || e.is_game())
        .collect();
    listed.sort_by_key(|e| e.starts_at());
    listed
}

/// Roster players with their mark, then marks for ids no longer on the roster.
fn roll_call(event: &Event, players: &[Player]) -> Vec<(String, Attendance)> {
    let mut rows: Vec<(String, Attendance)> =
        players.iter().map(|p| (p.name.clone(), event.attendance.lookup(&p.id))).collect();
    for (id, present) in event.attendance.iter() {
        if !players.iter().any(|p| &p.id == id) {
            let mark = if *present { Attendance::Present } else { Attendance::Absent };
            rows.push((format!("{} (removed)", id), mark));
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use squad_core::FileStore;
    use std::fs;
    use tempfile::TempDir;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap().and_hms_opt(9, 0, 0).unwrap()
    }

    fn pinned() -> SquadConfig {
        let mut config = SquadConfig::default();
        config.seed.rng_seed = Some(7);
        config
    }

    fn player(id: &str, name: &str, jersey: u32) -> Player {
        Player {
            id: id.to_string(),
            name: name.to_string(),
            jersey_number: jersey,
            position: Position::Midfield,
            age: 24,
            is_injured: false,
            image_url: None,
            nationality: None,
            height: None,
            weight: None,
            date_of_birth: None,
            contract_until: None,
        }
    }

    fn event(id: &str, date: (i32, u32, u32), kind: EventType) -> Event {
        Event::new(
            id,
            NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            "Training Ground",
            kind,
        )
    }

    #[test]
    fn test_reset_requires_confirmation() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = RosterStore::new(FileStore::new(temp_dir.path()));

        let result = run_at(Commands::Reset { yes: false }, &mut store, &pinned(), now());

        assert!(result.is_err());
        assert!(store.players().unwrap().is_empty());
    }

    #[test]
    fn test_seed_then_edit_stat() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = RosterStore::new(FileStore::new(temp_dir.path()));
        let config = pinned();

        run_at(Commands::Seed, &mut store, &config, now()).unwrap();
        let player = store.players().unwrap()[0].clone();

        let command =
            Commands::SetStat { player: player.id.clone(), field: "goals".to_string(), value: 12 };
        run_at(command, &mut store, &config, now()).unwrap();

        let stats = compute_stats(&store).unwrap();
        assert_eq!(stats[0].goals, 12);
    }

    #[test]
    fn test_add_event_and_attend() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = RosterStore::new(FileStore::new(temp_dir.path()));
        let config = pinned();

        let add = Commands::AddEvent {
            date: "2026-10-20".to_string(),
            time: "18:30".to_string(),
            location: "Training Ground".to_string(),
            kind: "training".to_string(),
        };
        run_at(add, &mut store, &config, now()).unwrap();
        let event_id = store.events().unwrap()[0].id.clone();

        let attend = Commands::Attend {
            event: event_id,
            player: "p1".to_string(),
            present: false,
            absent: false,
            clear: false,
        };
        run_at(attend, &mut store, &config, now()).unwrap();

        assert!(store.events().unwrap()[0].attendance.is_present("p1"));
    }

    #[test]
    fn test_attend_clear_unrecords() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = RosterStore::new(FileStore::new(temp_dir.path()));
        let mut game = event("e1", (2026, 10, 1), EventType::Game);
        game.attendance.set("p1", false);
        store.add_event(game).unwrap();

        let clear = Commands::Attend {
            event: "e1".to_string(),
            player: "p1".to_string(),
            present: false,
            absent: false,
            clear: true,
        };
        run_at(clear, &mut store, &pinned(), now()).unwrap();

        let events = store.events().unwrap();
        assert_eq!(events[0].attendance.lookup("p1"), Attendance::Unrecorded);
    }

    #[test]
    fn test_bad_stat_field_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = RosterStore::new(FileStore::new(temp_dir.path()));

        let command =
            Commands::SetStat { player: "p1".to_string(), field: "assists".to_string(), value: 1 };
        assert!(run_at(command, &mut store, &pinned(), now()).is_err());
    }

    #[test]
    fn test_edit_player_patches_given_fields() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = RosterStore::new(FileStore::new(temp_dir.path()));
        store.add_player(player("p1", "Dolev Haziza", 8)).unwrap();

        let edit = Commands::EditPlayer {
            id: "p1".to_string(),
            name: None,
            jersey: Some(10),
            position: Some("attack".to_string()),
            age: None,
            injured: Some(true),
            nationality: None,
        };
        run_at(edit, &mut store, &pinned(), now()).unwrap();

        let edited = &store.players().unwrap()[0];
        assert_eq!(edited.name, "Dolev Haziza");
        assert_eq!(edited.jersey_number, 10);
        assert_eq!(edited.position, Position::Attack);
        assert_eq!(edited.age, 24);
        assert!(edited.is_injured);
    }

    #[test]
    fn test_edit_unknown_player_fails() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = RosterStore::new(FileStore::new(temp_dir.path()));

        let edit = Commands::EditPlayer {
            id: "ghost".to_string(),
            name: Some("Nobody".to_string()),
            jersey: None,
            position: None,
            age: None,
            injured: None,
            nationality: None,
        };
        assert!(run_at(edit, &mut store, &pinned(), now()).is_err());
        assert!(store.players().unwrap().is_empty());
    }

    #[test]
    fn test_edit_event_changes_schedule() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = RosterStore::new(FileStore::new(temp_dir.path()));
        let mut training = event("e1", (2026, 10, 20), EventType::Training);
        training.attendance.set("p1", true);
        store.add_event(training).unwrap();

        let edit = Commands::EditEvent {
            id: "e1".to_string(),
            date: Some("2026-10-25".to_string()),
            time: Some("20:30".to_string()),
            location: None,
            kind: Some("game".to_string()),
        };
        run_at(edit, &mut store, &pinned(), now()).unwrap();

        let edited = &store.events().unwrap()[0];
        assert_eq!(edited.date, NaiveDate::from_ymd_opt(2026, 10, 25).unwrap());
        assert_eq!(edited.time, NaiveTime::from_hms_opt(20, 30, 0).unwrap());
        assert_eq!(edited.event_type, EventType::Game);
        assert_eq!(edited.location, "Training Ground");
        assert!(edited.attendance.is_present("p1"));
    }

    #[test]
    fn test_edit_event_rejects_bad_time() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = RosterStore::new(FileStore::new(temp_dir.path()));
        store.add_event(event("e1", (2026, 10, 20), EventType::Training)).unwrap();

        let edit = Commands::EditEvent {
            id: "e1".to_string(),
            date: None,
            time: Some("25:99".to_string()),
            location: None,
            kind: None,
        };
        assert!(run_at(edit, &mut store, &pinned(), now()).is_err());
        assert_eq!(store.events().unwrap()[0].time, NaiveTime::from_hms_opt(18, 0, 0).unwrap());
    }

    #[test]
    fn test_players_sort_option() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = RosterStore::new(FileStore::new(temp_dir.path()));
        let config = pinned();

        run_at(Commands::Players { sort: "age".to_string() }, &mut store, &config, now()).unwrap();
        assert_eq!(store.players().unwrap().len(), 30);

        let bad = Commands::Players { sort: "shoe-size".to_string() };
        assert!(run_at(bad, &mut store, &config, now()).is_err());
    }

    #[test]
    fn test_event_listing_filters() {
        let events = vec![
            event("late-game", (2026, 11, 1), EventType::Game),
            event("past-game", (2026, 10, 1), EventType::Game),
            event("training", (2026, 10, 19), EventType::Training),
        ];
        let ids = |listed: Vec<&Event>| -> Vec<String> {
            listed.iter().map(|e| e.id.clone()).collect()
        };

        assert_eq!(
            ids(event_listing(&events, now(), false, false)),
            vec!["past-game", "training", "late-game"]
        );
        assert_eq!(ids(event_listing(&events, now(), true, false)), vec!["training", "late-game"]);
        assert_eq!(ids(event_listing(&events, now(), true, true)), vec!["late-game"]);
    }

    #[test]
    fn test_summary_runs_on_seeded_store() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = RosterStore::new(FileStore::new(temp_dir.path()));

        run_at(Commands::Summary, &mut store, &pinned(), now()).unwrap();

        assert!(!store.player_stats().unwrap().is_empty());
    }

    #[test]
    fn test_roll_call_lists_roster_and_removed() {
        let players = vec![player("p1", "Ali Mohamed", 4), player("p2", "Lior Refaelov", 10)];
        let mut game = event("e1", (2026, 10, 1), EventType::Game);
        game.attendance.set("p1", true);
        game.attendance.set("gone", false);

        let rows = roll_call(&game, &players);

        assert_eq!(
            rows,
            vec![
                ("Ali Mohamed".to_string(), Attendance::Present),
                ("Lior Refaelov".to_string(), Attendance::Unrecorded),
                ("gone (removed)".to_string(), Attendance::Absent),
            ]
        );
    }

    #[test]
    fn test_corrupted_store_gets_reset_hint() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("squad_players.json"), "{not json").unwrap();
        let mut store = RosterStore::new(FileStore::new(temp_dir.path()));

        let err = run_at(Commands::Stats, &mut store, &pinned(), now()).unwrap_err();
        assert!(recovery_hint(&err).is_some());

        let command =
            Commands::SetStat { player: "p1".to_string(), field: "assists".to_string(), value: 1 };
        let err = run_at(command, &mut store, &pinned(), now()).unwrap_err();
        assert!(recovery_hint(&err).is_none());
    }
}
