//! Battle roster content.
//!
//! A roster lists the members of both parties as JSON:
//!
//! ```json
//! {
//!   "players": [
//!     { "name": "Crono", "control": "Ai", "position": [220, 60],
//!       "stats": { "attack": 12, "speed": 13, "hp": 70, "max_hp": 70 } }
//!   ],
//!   "enemies": [
//!     { "name": "Roly", "position": [60, 80], "status": ["Poison"],
//!       "stats": { "attack": 5, "speed": 7, "hp": 25, "max_hp": 25 } }
//!   ]
//! }
//! ```
//!
//! Every field but `name` has a default. Status labels are the flag names of
//! [`StatusEffects`], matched case-insensitively.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::components::combatant::{Control, Side};
use crate::components::stats::{Abilities, Stats};
use crate::components::status::StatusEffects;
use crate::error::{BattleError, Result};
use crate::resources::party::PARTY_CAPACITY;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RosterEntry {
    pub name: String,
    #[serde(default)]
    pub stats: Stats,
    #[serde(default)]
    pub abilities: Abilities,
    #[serde(default)]
    pub control: Control,
    #[serde(default)]
    pub position: [f32; 2],
    #[serde(default)]
    pub status: Vec<String>,
}

impl RosterEntry {
    pub fn new(name: impl Into<String>, stats: Stats, control: Control, position: [f32; 2]) -> Self {
        RosterEntry {
            name: name.into(),
            stats,
            abilities: Abilities::default(),
            control,
            position,
            status: Vec::new(),
        }
    }

    /// Parse the status labels into flags.
    pub fn status_effects(&self) -> Result<StatusEffects> {
        self.status
            .iter()
            .try_fold(StatusEffects::empty(), |acc, label| {
                StatusEffects::from_label(label)
                    .map(|flag| acc | flag)
                    .ok_or_else(|| {
                        BattleError::Roster(format!("{}: unknown status '{}'", self.name, label))
                    })
            })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Roster {
    pub players: Vec<RosterEntry>,
    pub enemies: Vec<RosterEntry>,
}

impl Roster {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| BattleError::Roster(e.to_string()))
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| BattleError::Roster(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&text)
    }

    pub fn side(&self, side: Side) -> &[RosterEntry] {
        match side {
            Side::Player => &self.players,
            Side::Enemy => &self.enemies,
        }
    }

    /// Check party sizes and status labels before anything is spawned.
    pub fn validate(&self) -> Result<()> {
        for side in [Side::Player, Side::Enemy] {
            let entries = self.side(side);
            if entries.is_empty() {
                return Err(BattleError::PreconditionViolated(format!(
                    "{:?} party has no members",
                    side
                )));
            }
            if entries.len() > PARTY_CAPACITY {
                return Err(BattleError::PreconditionViolated(format!(
                    "{:?} party has {} members, capacity is {}",
                    side,
                    entries.len(),
                    PARTY_CAPACITY
                )));
            }
            for entry in entries {
                entry.status_effects()?;
            }
        }
        Ok(())
    }

    /// Three heroes against three monsters, players waiting for input.
    pub fn demo() -> Self {
        fn stats(attack: i32, speed: i32, hp: i32, time_affinity: i32) -> Stats {
            Stats {
                attack,
                defense: 2,
                speed,
                time_affinity,
                hp,
                max_hp: hp,
                max_chrono_force: 100.0,
                ..Default::default()
            }
        }
        Roster {
            players: vec![
                RosterEntry::new("Crono", stats(12, 13, 70, 4), Control::Player, [220.0, 60.0]),
                RosterEntry::new("Marle", stats(8, 8, 65, 6), Control::Player, [236.0, 100.0]),
                RosterEntry::new("Lucca", stats(9, 6, 62, 5), Control::Player, [220.0, 140.0]),
            ],
            enemies: vec![
                RosterEntry::new("Blue Imp", stats(6, 9, 30, 1), Control::Ai, [60.0, 70.0]),
                RosterEntry::new("Roly", stats(5, 7, 25, 1), Control::Ai, [44.0, 110.0]),
                RosterEntry::new("Hench", stats(8, 10, 40, 2), Control::Ai, [60.0, 150.0]),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_entries_with_defaults() {
        let roster = Roster::from_json(
            r#"{
                "players": [{ "name": "Crono", "stats": { "attack": 10, "hp": 30, "max_hp": 30 } }],
                "enemies": [{ "name": "Roly", "control": "Ai", "position": [40, 80], "status": ["poison", "BLIND"] }]
            }"#,
        )
        .unwrap();
        assert_eq!(roster.players[0].stats.attack, 10);
        assert_eq!(roster.players[0].stats.speed, Stats::default().speed);
        assert_eq!(roster.players[0].control, Control::Player);
        assert_eq!(roster.enemies[0].position, [40.0, 80.0]);
        assert_eq!(
            roster.enemies[0].status_effects(),
            Ok(StatusEffects::POISON | StatusEffects::BLIND)
        );
        assert!(roster.validate().is_ok());
    }

    #[test]
    fn bad_json_is_a_roster_error() {
        assert!(matches!(Roster::from_json("{ nope"), Err(BattleError::Roster(_))));
    }

    #[test]
    fn validate_rejects_bad_parties() {
        let mut roster = Roster::demo();
        roster.enemies.clear();
        assert!(matches!(roster.validate(), Err(BattleError::PreconditionViolated(_))));

        let mut roster = Roster::demo();
        let extra = roster.players[0].clone();
        roster.players.push(extra);
        assert!(matches!(roster.validate(), Err(BattleError::PreconditionViolated(_))));

        let mut roster = Roster::demo();
        roster.players[1].status.push("Grumpy".into());
        assert!(matches!(roster.validate(), Err(BattleError::Roster(_))));
    }

    #[test]
    fn demo_is_valid() {
        assert!(Roster::demo().validate().is_ok());
    }
}
