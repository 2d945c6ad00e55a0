//! # Configuration
//!
//! Every tunable of the seeder lives here with its default, so a YAML file
//! only needs to name what it changes:
//!
//! ```yaml
//! data_dir: ./squad-data
//! seed:
//!   min_games: 6
//!   rng_seed: 42
//! ```

use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{Result, SquadError};
use crate::models::event::hhmm;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SquadConfig {
    /// Directory of the file-backed store
    pub data_dir: PathBuf,
    pub seed: SeedConfig,
}

impl Default for SquadConfig {
    fn default() -> Self {
        Self { data_dir: PathBuf::from("squad-data"), seed: SeedConfig::default() }
    }
}

impl SquadConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.seed.validate().map_err(SquadError::InvalidConfig)?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path).map_err(|source| SquadError::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_yaml_str(&yaml)?;
        log::debug!("Loaded config from {:?}", path);
        Ok(config)
    }
}

/// Inclusive `[min, max]` draw range.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatRange {
    pub min: u32,
    pub max: u32,
}

impl StatRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Ordered bounds, tolerating a config that swapped them.
    pub fn bounds(&self) -> (u32, u32) {
        (self.min.min(self.max), self.min.max(self.max))
    }
}

/// A named fixture of the seed calendar.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Fixture {
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opponent: Option<String>,
}

impl Fixture {
    fn new(date: (i32, u32, u32), time: (u32, u32), location: &str, opponent: &str) -> Self {
        Self {
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap_or_default(),
            time: NaiveTime::from_hms_opt(time.0, time.1, 0).unwrap_or_default(),
            location: location.to_string(),
            opponent: Some(opponent.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SeedConfig {
    // === Thresholds ===
    /// Backfill past games while fewer game events exist (default: 5)
    pub min_games: usize,
    /// Jersey numbers up to this are key players (default: 11)
    pub key_jersey_max: u32,
    /// Players younger than this are "young" (default: 23)
    pub young_age: u8,

    // === Attendance bands (percent) ===
    pub injured_attendance: StatRange,
    pub young_attendance: StatRange,
    pub key_attendance: StatRange,
    pub default_attendance: StatRange,
    /// Max +/- games added to the attendance-derived games count (default: 1)
    pub games_jitter: u32,

    // === Goals / cards ===
    pub attacker_goals: StatRange,
    pub other_goals: StatRange,
    pub yellow_cards: StatRange,
    /// Chance of a non-zero red card count (default: 0.1)
    pub red_card_chance: f64,
    pub red_cards: StatRange,

    // === Calendar ===
    /// Days without training sessions (default: Friday, Saturday)
    pub rest_days: Vec<Weekday>,
    #[serde(with = "hhmm")]
    pub training_time: NaiveTime,
    pub training_location: String,
    /// Days of training history generated before today (default: 14)
    pub training_history_days: u32,
    /// Days of upcoming training generated after today (default: 7)
    pub training_ahead_days: u32,
    pub past_games: Vec<Fixture>,
    pub upcoming_games: Vec<Fixture>,

    /// Jersey number -> canonical name, applied to existing rosters
    pub name_corrections: BTreeMap<u32, String>,

    /// Fixed RNG seed for reproducible demo data; entropy when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rng_seed: Option<u64>,
}

const HOME_GROUND: &str = "Sammy Ofer Stadium, Haifa";

/// Upper bound for either training window.
pub const MAX_WINDOW_DAYS: u32 = 366;

impl SeedConfig {
    pub fn validate(&self) -> std::result::Result<(), String> {
        if !(0.0..=1.0).contains(&self.red_card_chance) {
            return Err(format!(
                "red_card_chance must be within 0..=1, got {}",
                self.red_card_chance
            ));
        }
        for (name, days) in [
            ("training_history_days", self.training_history_days),
            ("training_ahead_days", self.training_ahead_days),
        ] {
            if days > MAX_WINDOW_DAYS {
                return Err(format!("{} must be at most {}, got {}", name, MAX_WINDOW_DAYS, days));
            }
        }
        Ok(())
    }

    /// Red card chance usable as a probability; NaN counts as zero.
    pub fn red_card_probability(&self) -> f64 {
        if self.red_card_chance.is_nan() {
            0.0
        } else {
            self.red_card_chance.clamp(0.0, 1.0)
        }
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            min_games: 5,
            key_jersey_max: 11,
            young_age: 23,

            injured_attendance: StatRange::new(20, 50),
            young_attendance: StatRange::new(55, 75),
            key_attendance: StatRange::new(80, 95),
            default_attendance: StatRange::new(65, 85),
            games_jitter: 1,

            attacker_goals: StatRange::new(3, 15),
            other_goals: StatRange::new(0, 4),
            yellow_cards: StatRange::new(0, 4),
            red_card_chance: 0.1,
            red_cards: StatRange::new(1, 2),

            rest_days: vec![Weekday::Fri, Weekday::Sat],
            training_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap_or_default(),
            training_location: "Training Ground, Haifa".to_string(),
            training_history_days: 14,
            training_ahead_days: 7,
            past_games: vec![
                Fixture::new((2024, 11, 15), (20, 30), HOME_GROUND, "Maccabi Tel Aviv"),
                Fixture::new(
                    (2024, 11, 22),
                    (18, 0),
                    "Bloomfield Stadium, Tel Aviv",
                    "Hapoel Tel Aviv",
                ),
                Fixture::new((2024, 11, 29), (19, 0), HOME_GROUND, "Maccabi Netanya"),
                Fixture::new((2024, 12, 5), (20, 30), HOME_GROUND, "Hapoel Be'er Sheva"),
                Fixture::new(
                    (2024, 12, 12),
                    (18, 0),
                    "Netanya Stadium, Netanya",
                    "Maccabi Petah Tikva",
                ),
                Fixture::new((2024, 12, 19), (19, 30), HOME_GROUND, "Bnei Yehuda"),
            ],
            upcoming_games: vec![
                Fixture::new((2024, 12, 22), (20, 30), HOME_GROUND, "Beitar Jerusalem"),
                Fixture::new(
                    (2024, 12, 31),
                    (17, 45),
                    "HaYud-Alef Stadium, Ashdod",
                    "F.C. Ashdod",
                ),
                Fixture::new((2025, 1, 5), (18, 30), HOME_GROUND, "Hapoel Haifa"),
                Fixture::new(
                    (2025, 1, 10),
                    (18, 0),
                    "Turner Stadium, Be'er Sheva",
                    "Hapoel Be'er Sheva",
                ),
            ],

            name_corrections: BTreeMap::from([
                (5, "Goni Naor".to_string()),
                (7, "Silva Kani".to_string()),
                (16, "Kenny Saief".to_string()),
                (17, "Suf Podgoreanu".to_string()),
                (18, "Guy Melamed".to_string()),
            ]),

            rng_seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config =
            SquadConfig::from_yaml_str("seed:\n  min_games: 8\n  rng_seed: 42\n").unwrap();

        assert_eq!(config.seed.min_games, 8);
        assert_eq!(config.seed.rng_seed, Some(42));
        assert_eq!(config.seed.key_jersey_max, 11);
        assert_eq!(config.data_dir, PathBuf::from("squad-data"));
    }

    #[test]
    fn test_fixture_yaml() {
        let yaml = r#"
seed:
  upcoming_games:
    - date: 2030-05-01
      time: "19:15"
      location: Home
  rest_days: [Sat]
"#;
        let config = SquadConfig::from_yaml_str(yaml).unwrap();

        let fixture = &config.seed.upcoming_games[0];
        assert_eq!(fixture.time, NaiveTime::from_hms_opt(19, 15, 0).unwrap());
        assert_eq!(fixture.opponent, None);
        assert_eq!(config.seed.rest_days, vec![Weekday::Sat]);
    }

    #[test]
    fn test_invalid_yaml_is_config_error() {
        let result = SquadConfig::from_yaml_str("seed: [1, 2");
        assert!(matches!(result, Err(SquadError::ConfigParse(_))));
    }

    #[test]
    fn test_range_bounds_are_ordered() {
        assert_eq!(StatRange::new(9, 3).bounds(), (3, 9));
    }

    #[test]
    fn test_default_roundtrips_through_yaml() {
        let yaml = serde_yaml::to_string(&SquadConfig::default()).unwrap();
        let parsed = SquadConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed, SquadConfig::default());
    }

    #[test]
    fn test_nan_red_card_chance_is_rejected() {
        let result = SquadConfig::from_yaml_str("seed:\n  red_card_chance: .nan\n");
        assert!(matches!(result, Err(SquadError::InvalidConfig(_))));
    }

    #[test]
    fn test_out_of_range_red_card_chance_is_rejected() {
        let result = SquadConfig::from_yaml_str("seed:\n  red_card_chance: 1.5\n");
        assert!(matches!(result, Err(SquadError::InvalidConfig(_))));
    }

    #[test]
    fn test_huge_training_window_is_rejected() {
        for key in ["training_history_days", "training_ahead_days"] {
            let yaml = format!("seed:\n  {}: 4000000000\n", key);
            let result = SquadConfig::from_yaml_str(&yaml);
            assert!(matches!(result, Err(SquadError::InvalidConfig(_))), "{}", key);
        }
    }

    #[test]
    fn test_red_card_probability_is_sanitized() {
        let mut seed = SeedConfig::default();
        seed.red_card_chance = f64::NAN;
        assert_eq!(seed.red_card_probability(), 0.0);
        seed.red_card_chance = 3.0;
        assert_eq!(seed.red_card_probability(), 1.0);
    }
}
