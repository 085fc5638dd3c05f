//! Fortress level rewards and milestones
//!
//! The reward table is the single source of truth for unlocks: the
//! predicates in [`crate::progression`] search it instead of keeping their
//! own level constants.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;

use super::classes::FortressClass;
use super::pillars::PillarId;
use crate::fixed::Fp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotKind {
    Hero,
    Turret,
}

/// Reward granted on reaching a fortress level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelReward {
    UnlockClass(FortressClass),
    UnlockPillar(PillarId),
    UnlockHero(String),
    UnlockTurret(String),
    UnlockSlot(SlotKind),
    UnlockSkill(String),
    Gold(u64),
    Dust(u64),
    /// Permanent fortress max-HP bonus (fraction of base)
    HpBonus(Fp),
}

fn hero(id: &str) -> LevelReward {
    LevelReward::UnlockHero(id.to_string())
}

fn turret(id: &str) -> LevelReward {
    LevelReward::UnlockTurret(id.to_string())
}

fn skill(id: &str) -> LevelReward {
    LevelReward::UnlockSkill(id.to_string())
}

fn build_reward_table() -> BTreeMap<u32, Vec<LevelReward>> {
    use LevelReward::*;

    BTreeMap::from([
        (
            1,
            vec![
                UnlockClass(FortressClass::Natural),
                UnlockPillar(PillarId::Streets),
                hero("vanguard"),
                turret("railgun"),
                UnlockSlot(SlotKind::Hero),
                UnlockSlot(SlotKind::Turret),
            ],
        ),
        (2, vec![skill("barrage")]),
        (3, vec![turret("cryo"), hero("frost")]),
        (4, vec![UnlockClass(FortressClass::Ice)]),
        (5, vec![UnlockSlot(SlotKind::Turret), Gold(500)]),
        (6, vec![UnlockPillar(PillarId::Science)]),
        (8, vec![hero("forge"), turret("arc")]),
        (
            10,
            vec![
                UnlockClass(FortressClass::Fire),
                UnlockSlot(SlotKind::Hero),
                skill("overdrive"),
            ],
        ),
        (12, vec![UnlockPillar(PillarId::Mutants), turret("flamer")]),
        (15, vec![hero("storm"), UnlockClass(FortressClass::Lightning)]),
        (18, vec![turret("mortar")]),
        (
            20,
            vec![
                UnlockPillar(PillarId::Cosmos),
                UnlockSlot(SlotKind::Turret),
                hero("titan"),
            ],
        ),
        (25, vec![UnlockClass(FortressClass::Tech), skill("orbital_strike")]),
        (
            28,
            vec![UnlockPillar(PillarId::Magic), hero("spider"), turret("laser")],
        ),
        (30, vec![UnlockSlot(SlotKind::Hero), hero("cipher")]),
        (
            35,
            vec![UnlockClass(FortressClass::Void), UnlockPillar(PillarId::Gods)],
        ),
        (40, vec![hero("phantom"), UnlockSlot(SlotKind::Turret)]),
        (45, vec![skill("singularity")]),
        (50, vec![UnlockSlot(SlotKind::Hero), Dust(1000)]),
    ])
}

static REWARD_TABLE: OnceLock<BTreeMap<u32, Vec<LevelReward>>> = OnceLock::new();

/// Authored rewards keyed by level (sparse)
pub fn reward_table() -> &'static BTreeMap<u32, Vec<LevelReward>> {
    REWARD_TABLE.get_or_init(build_reward_table)
}

/// Authored rewards for one level; empty when the level has no entry
pub fn authored_rewards(level: u32) -> &'static [LevelReward] {
    reward_table()
        .get(&level)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

// =====================================================
// Milestones
// =====================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Milestone {
    pub level: u32,
    pub id: &'static str,
    pub title: &'static str,
}

static MILESTONES: [Milestone; 4] = [
    Milestone {
        level: 10,
        id: "veteran",
        title: "Veteran Commander",
    },
    Milestone {
        level: 25,
        id: "commander",
        title: "Fortress Commander",
    },
    Milestone {
        level: 50,
        id: "legend",
        title: "Living Legend",
    },
    Milestone {
        level: 100,
        id: "eternal",
        title: "Eternal Guardian",
    },
];

/// Milestones in ascending level order
pub fn milestones() -> &'static [Milestone] {
    &MILESTONES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_one_unlocks_starting_kit() {
        let rewards = authored_rewards(1);
        assert!(rewards.contains(&LevelReward::UnlockClass(FortressClass::Natural)));
        assert!(rewards.contains(&LevelReward::UnlockPillar(PillarId::Streets)));
        assert!(rewards.contains(&LevelReward::UnlockSlot(SlotKind::Hero)));
    }

    #[test]
    fn test_sparse_levels_are_empty() {
        assert!(authored_rewards(7).is_empty());
        assert!(authored_rewards(0).is_empty());
        assert!(authored_rewards(999).is_empty());
    }

    #[test]
    fn test_every_class_and_pillar_unlocked_exactly_once() {
        for class in FortressClass::ALL {
            let count = reward_table()
                .values()
                .flatten()
                .filter(|r| **r == LevelReward::UnlockClass(class))
                .count();
            assert_eq!(count, 1, "{:?}", class);
        }
        for pillar in PillarId::ALL {
            let count = reward_table()
                .values()
                .flatten()
                .filter(|r| **r == LevelReward::UnlockPillar(pillar))
                .count();
            assert_eq!(count, 1, "{:?}", pillar);
        }
    }

    #[test]
    fn test_milestones_ascending() {
        for pair in milestones().windows(2) {
            assert!(pair[0].level < pair[1].level);
        }
    }
}
