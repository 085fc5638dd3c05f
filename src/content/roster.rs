//! Roster tags, legacy id aliases and tag synergy bonuses

use serde::{Deserialize, Serialize};

use super::classes::Stat;
use crate::fixed::Fp;

/// Capability label shared by heroes, turrets and perks
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SynergyTag {
    Fire,
    Ice,
    Lightning,
    Void,
    Nature,
    Tank,
    Support,
    Damage,
    Control,
    Splash,
    Chain,
    Pierce,
    Burn,
    Tech,
    Mystic,
}

/// Kind of string id crossing the authoring boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IdKind {
    Hero,
    Turret,
    Perk,
    Pillar,
}

use SynergyTag::*;

static HERO_TAGS: &[(&str, &[SynergyTag])] = &[
    ("storm", &[Lightning, Damage, Chain]),
    ("forge", &[Fire, Tech, Damage]),
    ("frost", &[Ice, Control, Mystic]),
    ("titan", &[Nature, Tank]),
    ("spider", &[Tech, Control, Pierce]),
    ("cipher", &[Tech, Support]),
    ("vanguard", &[Tank, Support]),
    ("phantom", &[Void, Damage, Pierce]),
];

static TURRET_TAGS: &[(&str, &[SynergyTag])] = &[
    ("railgun", &[Tech, Pierce]),
    ("cryo", &[Ice, Control]),
    ("arc", &[Lightning, Chain]),
    ("flamer", &[Fire, Burn, Splash]),
    ("mortar", &[Splash, Damage]),
    ("laser", &[Tech, Burn]),
];

static PERK_TAGS: &[(&str, &[SynergyTag])] = &[
    ("overclock", &[Tech]),
    ("cold_snap", &[Ice]),
    ("chain_reaction", &[Chain, Lightning]),
    ("fortify", &[Tank]),
    ("scavenger", &[Support]),
    ("blood_pact", &[Void, Damage]),
];

// (legacy, canonical)
static HERO_ALIASES: &[(&str, &str)] = &[
    ("thunderlord", "storm"),
    ("iron_suit", "forge"),
    ("ice_queen", "frost"),
    ("green_giant", "titan"),
    ("web_slinger", "spider"),
    ("shield_captain", "vanguard"),
];

static TURRET_ALIASES: &[(&str, &str)] = &[
    ("arrow", "railgun"),
    ("frost_tower", "cryo"),
    ("tesla", "arc"),
    ("fire", "flamer"),
    ("cannon", "mortar"),
];

static PILLAR_ALIASES: &[(&str, &str)] = &[
    ("lab", "science"),
    ("realm", "magic"),
    ("pantheon", "gods"),
];

fn aliases(kind: IdKind) -> &'static [(&'static str, &'static str)] {
    match kind {
        IdKind::Hero => HERO_ALIASES,
        IdKind::Turret => TURRET_ALIASES,
        IdKind::Perk => &[],
        IdKind::Pillar => PILLAR_ALIASES,
    }
}

/// Map a legacy id to its canonical form; canonical and unknown ids pass through
pub fn normalize_id(kind: IdKind, raw: &str) -> &str {
    aliases(kind)
        .iter()
        .find(|(legacy, _)| *legacy == raw)
        .map(|(_, canonical)| *canonical)
        .unwrap_or(raw)
}

/// Reverse mapping for save files written before the rename
pub fn legacy_id(kind: IdKind, canonical: &str) -> Option<&'static str> {
    aliases(kind)
        .iter()
        .find(|(_, c)| *c == canonical)
        .map(|(legacy, _)| *legacy)
}

fn tag_table(kind: IdKind) -> &'static [(&'static str, &'static [SynergyTag])] {
    match kind {
        IdKind::Hero => HERO_TAGS,
        IdKind::Turret => TURRET_TAGS,
        IdKind::Perk => PERK_TAGS,
        IdKind::Pillar => &[],
    }
}

/// Tags carried by an id (legacy ids accepted); unknown ids carry none
pub fn tags_for(kind: IdKind, id: &str) -> &'static [SynergyTag] {
    let canonical = normalize_id(kind, id);
    tag_table(kind)
        .iter()
        .find(|(known, _)| *known == canonical)
        .map(|(_, tags)| *tags)
        .unwrap_or(&[])
}

/// Canonical ids of a kind, in declaration order
pub fn known_ids(kind: IdKind) -> impl Iterator<Item = &'static str> {
    tag_table(kind).iter().map(|(id, _)| *id)
}

// =====================================================
// Synergy bonuses
// =====================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynergyEffect {
    pub stat: Stat,
    pub value: Fp,
    pub is_percent: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TagSynergyBonus {
    pub id: &'static str,
    pub tag: SynergyTag,
    pub required_count: u32,
    pub effects: &'static [SynergyEffect],
}

const fn pct(stat: Stat, percent: i64) -> SynergyEffect {
    SynergyEffect {
        stat,
        value: Fp::from_ratio(percent, 100),
        is_percent: true,
    }
}

const fn flat(stat: Stat, value: i64) -> SynergyEffect {
    SynergyEffect {
        stat,
        value: Fp::from_int(value),
        is_percent: false,
    }
}

const fn bonus(
    id: &'static str,
    tag: SynergyTag,
    required_count: u32,
    effects: &'static [SynergyEffect],
) -> TagSynergyBonus {
    TagSynergyBonus {
        id,
        tag,
        required_count,
        effects,
    }
}

static SYNERGY_BONUSES: &[TagSynergyBonus] = &[
    bonus("blazing", Fire, 2, &[pct(Stat::Damage, 10)]),
    bonus(
        "inferno",
        Fire,
        4,
        &[pct(Stat::Damage, 20), pct(Stat::SplashRadius, 15)],
    ),
    bonus("permafrost", Ice, 2, &[pct(Stat::SlowStrength, 15)]),
    bonus(
        "deep_freeze",
        Ice,
        3,
        &[pct(Stat::SlowStrength, 25), pct(Stat::CritChance, 5)],
    ),
    bonus("overcharge", Lightning, 2, &[flat(Stat::ChainTargets, 1)]),
    bonus("storm_front", Lightning, 3, &[pct(Stat::AttackSpeed, 15)]),
    bonus("entropy", Void, 2, &[pct(Stat::CritChance, 10)]),
    bonus("overgrowth", Nature, 2, &[flat(Stat::HpRegen, 5)]),
    bonus(
        "bulwark",
        Tank,
        2,
        &[pct(Stat::MaxHp, 15), flat(Stat::Armor, 10)],
    ),
    bonus(
        "field_medic",
        Support,
        2,
        &[flat(Stat::HpRegen, 10), pct(Stat::CooldownReduction, 10)],
    ),
    bonus("killing_edge", Damage, 3, &[pct(Stat::Damage, 15)]),
    bonus(
        "lockdown",
        Control,
        2,
        &[pct(Stat::SlowStrength, 10), pct(Stat::Range, 5)],
    ),
    bonus("shrapnel", Splash, 2, &[pct(Stat::SplashRadius, 20)]),
    bonus("conduction", Chain, 2, &[flat(Stat::ChainTargets, 1)]),
    bonus("piercing", Pierce, 2, &[pct(Stat::Damage, 8)]),
    bonus("wildfire", Burn, 2, &[pct(Stat::Damage, 12)]),
    bonus(
        "networked",
        Tech,
        3,
        &[pct(Stat::AttackSpeed, 10), pct(Stat::GoldGain, 10)],
    ),
    bonus("arcane", Mystic, 2, &[pct(Stat::CooldownReduction, 15)]),
];

pub fn synergy_bonuses() -> &'static [TagSynergyBonus] {
    SYNERGY_BONUSES
}

pub fn synergy_bonus(id: &str) -> Option<&'static TagSynergyBonus> {
    SYNERGY_BONUSES.iter().find(|b| b.id == id)
}
