//! Class mastery trees
//!
//! Every class shares the same six-node shape; the effects differ:
//!
//! ```text
//! core ─┬─ focus ──────┬─ mastery ── ascend ── capstone
//!       └─ resilience ─┘
//! ```

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use super::classes::{FortressClass, Stat};
use super::pillars::PillarId;
use crate::fixed::Fp;

/// Effects granted by unlocking a mastery node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MasteryEffect {
    StatBonus {
        stat: Stat,
        value: Fp,
        is_percent: bool,
    },
    UnlockAbility(String),
    /// Extra damage while fighting in one pillar
    PillarDamage { pillar: PillarId, bonus: Fp },
}

/// A node in a class mastery tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasteryNode {
    pub id: String,
    pub name: String,
    pub description: String,
    pub class: FortressClass,
    /// 1-based; gated by the class's spent points
    pub tier: u8,
    pub cost: u32,
    pub prerequisites: Vec<String>,
    pub effects: Vec<MasteryEffect>,
}

/// Complete mastery tree (all classes)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MasteryTree {
    pub nodes: Vec<MasteryNode>,
}

impl MasteryTree {
    pub fn get_node(&self, id: &str) -> Option<&MasteryNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn nodes_for_class(&self, class: FortressClass) -> Vec<&MasteryNode> {
        self.nodes.iter().filter(|n| n.class == class).collect()
    }
}

struct ClassTheme {
    signature: MasteryEffect,
    home_pillar: PillarId,
    capstone_ability: &'static str,
}

fn theme(class: FortressClass) -> ClassTheme {
    let stat = |stat, value, is_percent| MasteryEffect::StatBonus {
        stat,
        value,
        is_percent,
    };
    match class {
        FortressClass::Natural => ClassTheme {
            signature: stat(Stat::HpRegen, Fp::from_int(8), false),
            home_pillar: PillarId::Streets,
            capstone_ability: "verdant_surge",
        },
        FortressClass::Ice => ClassTheme {
            signature: stat(Stat::SlowStrength, Fp::from_ratio(15, 100), true),
            home_pillar: PillarId::Cosmos,
            capstone_ability: "absolute_zero",
        },
        FortressClass::Fire => ClassTheme {
            signature: stat(Stat::SplashRadius, Fp::from_ratio(15, 100), true),
            home_pillar: PillarId::Mutants,
            capstone_ability: "supernova",
        },
        FortressClass::Lightning => ClassTheme {
            signature: stat(Stat::ChainTargets, Fp::ONE, false),
            home_pillar: PillarId::Science,
            capstone_ability: "thunderstorm",
        },
        FortressClass::Tech => ClassTheme {
            signature: stat(Stat::AttackSpeed, Fp::from_ratio(12, 100), true),
            home_pillar: PillarId::Magic,
            capstone_ability: "orbital_grid",
        },
        FortressClass::Void => ClassTheme {
            signature: stat(Stat::CritChance, Fp::from_ratio(10, 100), true),
            home_pillar: PillarId::Gods,
            capstone_ability: "event_horizon",
        },
    }
}

fn class_nodes(class: FortressClass) -> Vec<MasteryNode> {
    let prefix = class.id();
    let theme = theme(class);
    let node_id = |suffix: &str| format!("{}_{}", prefix, suffix);
    let node = |suffix: &str,
                name: &str,
                description: &str,
                tier: u8,
                cost: u32,
                prerequisites: &[&str],
                effects: Vec<MasteryEffect>| MasteryNode {
        id: node_id(suffix),
        name: name.to_string(),
        description: description.to_string(),
        class,
        tier,
        cost,
        prerequisites: prerequisites.iter().map(|p| node_id(*p)).collect(),
        effects,
    };

    vec![
        node(
            "core",
            "Attunement",
            "Class towers deal 5% more damage.",
            1,
            1,
            &[],
            vec![MasteryEffect::StatBonus {
                stat: Stat::Damage,
                value: Fp::from_ratio(5, 100),
                is_percent: true,
            }],
        ),
        node(
            "focus",
            "Focus",
            "Class towers deal a further 10% damage.",
            2,
            2,
            &["core"],
            vec![MasteryEffect::StatBonus {
                stat: Stat::Damage,
                value: Fp::from_ratio(10, 100),
                is_percent: true,
            }],
        ),
        node(
            "resilience",
            "Resilience",
            "Fortress gains 10% max HP.",
            2,
            2,
            &["core"],
            vec![MasteryEffect::StatBonus {
                stat: Stat::MaxHp,
                value: Fp::from_ratio(10, 100),
                is_percent: true,
            }],
        ),
        node(
            "mastery",
            "Signature",
            "Strengthens the class's signature mechanic.",
            3,
            3,
            &["focus", "resilience"],
            vec![theme.signature],
        ),
        node(
            "ascend",
            "Home Ground",
            "Deal 15% more damage in the class's home pillar.",
            4,
            3,
            &["mastery"],
            vec![MasteryEffect::PillarDamage {
                pillar: theme.home_pillar,
                bonus: Fp::from_ratio(15, 100),
            }],
        ),
        node(
            "capstone",
            "Apex",
            "Unlocks the class ultimate.",
            5,
            5,
            &["ascend"],
            vec![MasteryEffect::UnlockAbility(
                theme.capstone_ability.to_string(),
            )],
        ),
    ]
}

fn build_tree() -> MasteryTree {
    let nodes = FortressClass::ALL
        .into_iter()
        .flat_map(class_nodes)
        .collect();
    MasteryTree { nodes }
}

static MASTERY_TREE: OnceLock<MasteryTree> = OnceLock::new();

/// Default mastery tree, built on first access
pub fn mastery_tree() -> &'static MasteryTree {
    MASTERY_TREE.get_or_init(build_tree)
}
