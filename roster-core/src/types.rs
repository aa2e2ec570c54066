//! Core type definitions for the roster.
//!
//! Records are serializable. On disk a record is a flat JSON object;
//! in memory the Hero/Enemy distinction is an explicit [`RecordKind`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::RosterError;

// ---------------------------------------------------------------------------
// Classes
// ---------------------------------------------------------------------------

/// Fixed stat block carried by every character class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Stats {
    /// Hit points.
    pub health: u32,
    /// Damage dealt per attack.
    pub attack: u32,
    /// Turn-order speed.
    pub speed: u32,
}

/// The playable character classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterClass {
    /// Balanced all-rounder.
    Human,
    /// Lots of health, slow.
    Tank,
    /// Very fast, fragile.
    Goblin,
}

impl CharacterClass {
    /// Every class, in menu order.
    pub const ALL: [Self; 3] = [Self::Human, Self::Tank, Self::Goblin];

    /// Map a 1-based menu selection to a class.
    #[must_use]
    pub fn from_selection(selection: i64) -> Option<Self> {
        match selection {
            1 => Some(Self::Human),
            2 => Some(Self::Tank),
            3 => Some(Self::Goblin),
            _ => None,
        }
    }

    /// The 1-based menu selection for this class.
    #[must_use]
    pub fn selection(self) -> i64 {
        match self {
            Self::Human => 1,
            Self::Tank => 2,
            Self::Goblin => 3,
        }
    }

    /// Base stats for this class.
    #[must_use]
    pub fn stats(self) -> Stats {
        match self {
            Self::Human => Stats {
                health: 60,
                attack: 15,
                speed: 20,
            },
            Self::Tank => Stats {
                health: 70,
                attack: 20,
                speed: 10,
            },
            Self::Goblin => Stats {
                health: 50,
                attack: 15,
                speed: 30,
            },
        }
    }

    /// Short flavour text shown in the class menu.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Human => "Balanced",
            Self::Tank => "Tough but slow",
            Self::Goblin => "Very fast",
        }
    }

    /// Display name, also the on-disk spelling.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Human => "Human",
            Self::Tank => "Tank",
            Self::Goblin => "Goblin",
        }
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Variants
// ---------------------------------------------------------------------------

/// Which record shape the caller wants to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantKind {
    /// A plain character.
    Hero,
    /// A character that grants a reward when defeated.
    Enemy,
}

impl VariantKind {
    /// Map a 1-based menu selection to a variant.
    #[must_use]
    pub fn from_selection(selection: i64) -> Option<Self> {
        match selection {
            1 => Some(Self::Hero),
            2 => Some(Self::Enemy),
            _ => None,
        }
    }
}

impl fmt::Display for VariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hero => f.write_str("Hero"),
            Self::Enemy => f.write_str("Enemy"),
        }
    }
}

/// Discriminant of a stored record. Only enemies carry a reward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// A plain character.
    Hero,
    /// An enemy and the reward it grants.
    Enemy {
        /// Reward for defeating this enemy (always > 0).
        reward_value: u32,
    },
}

impl RecordKind {
    /// The variant this kind belongs to.
    #[must_use]
    pub fn variant(self) -> VariantKind {
        match self {
            Self::Hero => VariantKind::Hero,
            Self::Enemy { .. } => VariantKind::Enemy,
        }
    }

    /// The reward value, present only for enemies.
    #[must_use]
    pub fn reward_value(self) -> Option<u32> {
        match self {
            Self::Hero => None,
            Self::Enemy { reward_value } => Some(reward_value),
        }
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A single character in the roster.
///
/// Serialized as a flat object: `name`, `characterClass`, `health`,
/// `attack`, `speed` and, for enemies only, `rewardValue`. Deserialization
/// rejects records that break the roster invariants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RecordRepr", into = "RecordRepr")]
pub struct CharacterRecord {
    /// Display name, unique within a store (case-insensitive).
    pub name: String,
    /// Class chosen at creation.
    pub class: CharacterClass,
    /// Stat block, copied from the class table at creation.
    pub stats: Stats,
    /// Hero or Enemy.
    pub kind: RecordKind,
}

impl CharacterRecord {
    /// Create a record with the stats of `class`.
    #[must_use]
    pub fn new(name: impl Into<String>, class: CharacterClass, kind: RecordKind) -> Self {
        Self {
            name: name.into(),
            class,
            stats: class.stats(),
            kind,
        }
    }

    /// Convenience constructor for a hero.
    #[must_use]
    pub fn hero(name: impl Into<String>, class: CharacterClass) -> Self {
        Self::new(name, class, RecordKind::Hero)
    }

    /// Convenience constructor for an enemy.
    #[must_use]
    pub fn enemy(name: impl Into<String>, class: CharacterClass, reward_value: u32) -> Self {
        Self::new(name, class, RecordKind::Enemy { reward_value })
    }

    /// Whether this record answers to `name` (case-insensitive exact match).
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        names_match(&self.name, name)
    }
}

/// Case-insensitive name comparison used for lookups and uniqueness.
#[must_use]
pub fn names_match(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// On-disk shape of a [`CharacterRecord`]. Field order is key order.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordRepr {
    name: String,
    character_class: CharacterClass,
    health: u32,
    attack: u32,
    speed: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reward_value: Option<u32>,
}

impl From<CharacterRecord> for RecordRepr {
    fn from(record: CharacterRecord) -> Self {
        Self {
            reward_value: record.kind.reward_value(),
            name: record.name,
            character_class: record.class,
            health: record.stats.health,
            attack: record.stats.attack,
            speed: record.stats.speed,
        }
    }
}

impl TryFrom<RecordRepr> for CharacterRecord {
    type Error = RosterError;

    fn try_from(repr: RecordRepr) -> Result<Self, Self::Error> {
        if repr.name.trim().is_empty() {
            return Err(RosterError::EmptyName);
        }
        let stats = Stats {
            health: repr.health,
            attack: repr.attack,
            speed: repr.speed,
        };
        if stats != repr.character_class.stats() {
            return Err(RosterError::Serialization(format!(
                "stats of '{}' do not match class {}",
                repr.name, repr.character_class
            )));
        }
        let kind = match repr.reward_value {
            None => RecordKind::Hero,
            Some(0) => return Err(RosterError::InvalidReward),
            Some(reward_value) => RecordKind::Enemy { reward_value },
        };
        Ok(Self {
            name: repr.name,
            class: repr.character_class,
            stats,
            kind,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_table() {
        let human = CharacterClass::Human.stats();
        assert_eq!((human.health, human.attack, human.speed), (60, 15, 20));
        let tank = CharacterClass::Tank.stats();
        assert_eq!((tank.health, tank.attack, tank.speed), (70, 20, 10));
        let goblin = CharacterClass::Goblin.stats();
        assert_eq!((goblin.health, goblin.attack, goblin.speed), (50, 15, 30));
    }

    #[test]
    fn selections_round_trip() {
        for class in CharacterClass::ALL {
            assert_eq!(CharacterClass::from_selection(class.selection()), Some(class));
        }
        assert_eq!(CharacterClass::from_selection(0), None);
        assert_eq!(CharacterClass::from_selection(4), None);
        assert_eq!(CharacterClass::from_selection(-1), None);
    }

    #[test]
    fn hero_json_has_no_reward_key() {
        let json = serde_json::to_string(&CharacterRecord::hero("Aria", CharacterClass::Human))
            .expect("serialize");
        assert_eq!(
            json,
            r#"{"name":"Aria","characterClass":"Human","health":60,"attack":15,"speed":20}"#
        );
    }

    #[test]
    fn enemy_json_has_reward_last() {
        let json = serde_json::to_string(&CharacterRecord::enemy("Grub", CharacterClass::Goblin, 25))
            .expect("serialize");
        assert_eq!(
            json,
            r#"{"name":"Grub","characterClass":"Goblin","health":50,"attack":15,"speed":30,"rewardValue":25}"#
        );
    }

    #[test]
    fn reward_key_decides_variant() {
        let hero: CharacterRecord = serde_json::from_str(
            r#"{"name":"Aria","characterClass":"Human","health":60,"attack":15,"speed":20}"#,
        )
        .expect("hero");
        assert_eq!(hero.kind, RecordKind::Hero);

        let enemy: CharacterRecord = serde_json::from_str(
            r#"{"name":"Brute","characterClass":"Tank","health":70,"attack":20,"speed":10,"rewardValue":40}"#,
        )
        .expect("enemy");
        assert_eq!(enemy.kind, RecordKind::Enemy { reward_value: 40 });
    }

    #[test]
    fn rejects_tampered_stats() {
        let result: Result<CharacterRecord, _> = serde_json::from_str(
            r#"{"name":"Aria","characterClass":"Human","health":999,"attack":15,"speed":20}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn rejects_blank_name_and_zero_reward() {
        let blank: Result<CharacterRecord, _> = serde_json::from_str(
            r#"{"name":"  ","characterClass":"Human","health":60,"attack":15,"speed":20}"#,
        );
        assert!(blank.is_err());
        let zero: Result<CharacterRecord, _> = serde_json::from_str(
            r#"{"name":"Grub","characterClass":"Goblin","health":50,"attack":15,"speed":30,"rewardValue":0}"#,
        );
        assert!(zero.is_err());
    }

    #[test]
    fn name_matching_ignores_case() {
        let record = CharacterRecord::hero("Aria", CharacterClass::Human);
        assert!(record.is_named("aria"));
        assert!(record.is_named("ARIA"));
        assert!(!record.is_named("Arian"));
    }
}
