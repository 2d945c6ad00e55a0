// Fixed demo roster and the roster repair passes

use crate::images::ImageResolver;
use crate::models::{Player, Position};

use std::collections::{BTreeMap, HashSet};
use uuid::Uuid;

pub struct SeedPlayer {
    pub name: &'static str,
    pub jersey_number: u32,
    pub position: Position,
    pub age: u8,
    pub nationality: &'static str,
    pub height: u16,
    pub weight: u16,
}

const fn seed(
    name: &'static str,
    jersey_number: u32,
    position: Position,
    age: u8,
    nationality: &'static str,
    height: u16,
    weight: u16,
) -> SeedPlayer {
    SeedPlayer { name, jersey_number, position, age, nationality, height, weight }
}

use Position::{Attack, Defense, Goalkeeper, Midfield};

pub const SEED_ROSTER: [SeedPlayer; 30] = [
    // Goalkeepers
    seed("Sharif Kayuf", 40, Goalkeeper, 28, "Israel", 190, 85),
    seed("Glen Alvin", 45, Goalkeeper, 26, "Israel", 188, 82),
    seed("Roi Fuchs", 77, Goalkeeper, 25, "Israel", 185, 80),
    seed("Gior Gayermakov", 89, Goalkeeper, 23, "Israel", 187, 81),
    // Defense
    seed("Zohar Zasno", 2, Defense, 28, "Israel", 182, 76),
    seed("Sean Goldberg", 3, Defense, 26, "Israel", 183, 75),
    seed("Kenny Saief", 16, Defense, 25, "Russia", 185, 78),
    seed("Lisav Eissat", 24, Defense, 27, "Israel", 184, 77),
    seed("Yella Batai", 25, Defense, 23, "Israel", 179, 74),
    seed("Pierre Cornud", 27, Defense, 26, "Argentina", 181, 75),
    seed("Ynon Feingezicht", 29, Defense, 22, "Israel", 178, 72),
    seed("Abdul Iskakov", 30, Defense, 25, "Israel", 183, 76),
    seed("Elad Amir", 37, Defense, 24, "Israel", 182, 75),
    seed("Pedrao Oliveira", 44, Defense, 26, "Brazil", 186, 79),
    // Midfield
    seed("Ali Mohamed", 4, Midfield, 23, "Israel", 177, 71),
    seed("Goni Naor", 5, Midfield, 24, "Israel", 176, 72),
    seed("Dolev Haziza", 8, Midfield, 26, "Israel", 178, 73),
    seed("Matias Nahuel", 10, Midfield, 25, "Brazil", 175, 70),
    seed("Lior Kasa", 15, Midfield, 27, "Israel", 180, 74),
    seed("Eitan Azoulay", 19, Midfield, 24, "Israel", 180, 73),
    seed("Michael Ohana", 26, Midfield, 24, "Israel", 179, 73),
    seed("Peter Agba", 80, Midfield, 25, "Nigeria", 182, 75),
    // Attack
    seed("Silva Kani", 7, Attack, 26, "Kosovo", 178, 72),
    seed("Trivante Stewart", 9, Attack, 24, "Scotland", 180, 74),
    seed("Kenji Gorre", 11, Attack, 23, "Japan", 175, 70),
    seed("Suf Podgoreanu", 17, Attack, 22, "Croatia", 182, 76),
    seed("Guy Melamed", 18, Attack, 25, "Israel", 179, 73),
    seed("Daniel Drezi", 28, Attack, 24, "Israel", 177, 71),
    seed("Omer Dahan", 38, Attack, 21, "Israel", 176, 70),
    seed("Djordje Jovanovic", 99, Attack, 26, "Serbia", 184, 77),
];

pub fn new_player_id() -> String {
    format!("player_{}", Uuid::new_v4().simple())
}

/// Materializes the fixed roster with fresh ids and resolved images.
pub fn build_roster(images: &dyn ImageResolver) -> Vec<Player> {
    SEED_ROSTER
        .iter()
        .map(|p| Player {
            id: new_player_id(),
            name: p.name.to_string(),
            jersey_number: p.jersey_number,
            position: p.position,
            age: p.age,
            is_injured: false,
            image_url: images.resolve(p.name, p.jersey_number),
            nationality: Some(p.nationality.to_string()),
            height: Some(p.height),
            weight: Some(p.weight),
            date_of_birth: None,
            contract_until: None,
        })
        .collect()
}

/// Renames players whose jersey has a canonical name. Returns how many changed.
pub fn correct_names(players: &mut [Player], corrections: &BTreeMap<u32, String>) -> usize {
    let mut changed = 0;
    for player in players.iter_mut() {
        if let Some(name) = corrections.get(&player.jersey_number) {
            if &player.name != name {
                log::warn!("Renaming #{} '{}' -> '{}'", player.jersey_number, player.name, name);
                player.name = name.clone();
                changed += 1;
            }
        }
    }
    changed
}

/// Keeps the first player per jersey number, in order.
pub fn dedup_by_jersey(players: Vec<Player>) -> Vec<Player> {
    let mut seen = HashSet::new();
    players
        .into_iter()
        .filter(|p| {
            let first = seen.insert(p.jersey_number);
            if !first {
                log::warn!("Dropping duplicate #{} '{}' ({})", p.jersey_number, p.name, p.id);
            }
            first
        })
        .collect()
}
