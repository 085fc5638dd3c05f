//! Enemy archetypes and boss phase tables.
//!
//! Each pillar fields five enemies: a common, a fast and a tank regular, a
//! guard that escorts the boss, and the boss itself.

use serde::{Deserialize, Serialize};

use crate::fixed::Fp;

/// Every enemy the simulation can spawn, grouped by pillar
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EnemyType {
    // Streets
    Thug,
    Runner,
    Bruiser,
    Enforcer,
    Warlord,
    // Science
    Drone,
    Scuttler,
    Mech,
    Sentry,
    Overmind,
    // Mutants
    Mutant,
    Stalker,
    Behemoth,
    Alpha,
    Broodmother,
    // Cosmos
    Voidling,
    Comet,
    Colossus,
    Herald,
    Devourer,
    // Magic
    Wraith,
    Imp,
    Golem,
    Warden,
    Archmage,
    // Gods
    Zealot,
    Valkyrie,
    Juggernaut,
    Seraph,
    Ascendant,
}

/// Slot an enemy fills in a pillar roster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyRole {
    Common,
    Fast,
    Tank,
    Guard,
    Boss,
}

impl EnemyType {
    pub const ALL: [EnemyType; 30] = [
        Self::Thug,
        Self::Runner,
        Self::Bruiser,
        Self::Enforcer,
        Self::Warlord,
        Self::Drone,
        Self::Scuttler,
        Self::Mech,
        Self::Sentry,
        Self::Overmind,
        Self::Mutant,
        Self::Stalker,
        Self::Behemoth,
        Self::Alpha,
        Self::Broodmother,
        Self::Voidling,
        Self::Comet,
        Self::Colossus,
        Self::Herald,
        Self::Devourer,
        Self::Wraith,
        Self::Imp,
        Self::Golem,
        Self::Warden,
        Self::Archmage,
        Self::Zealot,
        Self::Valkyrie,
        Self::Juggernaut,
        Self::Seraph,
        Self::Ascendant,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Self::Thug => "thug",
            Self::Runner => "runner",
            Self::Bruiser => "bruiser",
            Self::Enforcer => "enforcer",
            Self::Warlord => "warlord",
            Self::Drone => "drone",
            Self::Scuttler => "scuttler",
            Self::Mech => "mech",
            Self::Sentry => "sentry",
            Self::Overmind => "overmind",
            Self::Mutant => "mutant",
            Self::Stalker => "stalker",
            Self::Behemoth => "behemoth",
            Self::Alpha => "alpha",
            Self::Broodmother => "broodmother",
            Self::Voidling => "voidling",
            Self::Comet => "comet",
            Self::Colossus => "colossus",
            Self::Herald => "herald",
            Self::Devourer => "devourer",
            Self::Wraith => "wraith",
            Self::Imp => "imp",
            Self::Golem => "golem",
            Self::Warden => "warden",
            Self::Archmage => "archmage",
            Self::Zealot => "zealot",
            Self::Valkyrie => "valkyrie",
            Self::Juggernaut => "juggernaut",
            Self::Seraph => "seraph",
            Self::Ascendant => "ascendant",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.id() == id)
    }

    pub fn role(&self) -> EnemyRole {
        match self {
            Self::Thug | Self::Drone | Self::Mutant | Self::Voidling | Self::Wraith | Self::Zealot => {
                EnemyRole::Common
            }
            Self::Runner
            | Self::Scuttler
            | Self::Stalker
            | Self::Comet
            | Self::Imp
            | Self::Valkyrie => EnemyRole::Fast,
            Self::Bruiser
            | Self::Mech
            | Self::Behemoth
            | Self::Colossus
            | Self::Golem
            | Self::Juggernaut => EnemyRole::Tank,
            Self::Enforcer
            | Self::Sentry
            | Self::Alpha
            | Self::Herald
            | Self::Warden
            | Self::Seraph => EnemyRole::Guard,
            Self::Warlord
            | Self::Overmind
            | Self::Broodmother
            | Self::Devourer
            | Self::Archmage
            | Self::Ascendant => EnemyRole::Boss,
        }
    }

    pub fn is_boss(&self) -> bool {
        self.role() == EnemyRole::Boss
    }
}

/// Special behavior an enemy carries beyond its stat line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpreadBehavior {
    /// Splits into smaller enemies when killed
    SplitOnDeath { spawn: EnemyType, count: u32 },
    /// Heals nearby enemies every second
    HealAura { radius: Fp, heal_per_second: Fp },
}

/// Static stat line for an enemy, before wave/cycle scaling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyArchetype {
    pub enemy_type: EnemyType,
    pub base_hp: u32,
    /// Units per second; converted to units per tick by the scaling calculator
    pub base_speed: Fp,
    pub base_damage: u32,
    pub gold_reward: u32,
    pub dust_reward: u32,
    pub splash_resistance: Option<Fp>,
    pub chain_resistance: Option<Fp>,
    pub spread: Option<SpreadBehavior>,
}

impl EnemyArchetype {
    const fn new(
        enemy_type: EnemyType,
        base_hp: u32,
        speed_tenths: i64,
        base_damage: u32,
        gold_reward: u32,
        dust_reward: u32,
    ) -> Self {
        Self {
            enemy_type,
            base_hp,
            base_speed: Fp::from_ratio(speed_tenths, 10),
            base_damage,
            gold_reward,
            dust_reward,
            splash_resistance: None,
            chain_resistance: None,
            spread: None,
        }
    }

    const fn splash(mut self, resistance: Fp) -> Self {
        self.splash_resistance = Some(resistance);
        self
    }

    const fn chain(mut self, resistance: Fp) -> Self {
        self.chain_resistance = Some(resistance);
        self
    }

    const fn spread(mut self, behavior: SpreadBehavior) -> Self {
        self.spread = Some(behavior);
        self
    }
}

// Indexed by `EnemyType as usize`
static ARCHETYPES: [EnemyArchetype; 30] = [
    // Streets
    EnemyArchetype::new(EnemyType::Thug, 100, 10, 10, 5, 1),
    EnemyArchetype::new(EnemyType::Runner, 60, 20, 6, 4, 1),
    EnemyArchetype::new(EnemyType::Bruiser, 260, 6, 18, 10, 2).splash(Fp::from_ratio(1, 5)),
    EnemyArchetype::new(EnemyType::Enforcer, 420, 8, 24, 18, 4),
    EnemyArchetype::new(EnemyType::Warlord, 2400, 5, 60, 150, 40)
        .splash(Fp::from_ratio(1, 2))
        .chain(Fp::from_ratio(1, 2)),
    // Science
    EnemyArchetype::new(EnemyType::Drone, 120, 12, 11, 6, 1),
    EnemyArchetype::new(EnemyType::Scuttler, 70, 22, 7, 5, 1),
    EnemyArchetype::new(EnemyType::Mech, 320, 5, 20, 12, 3).chain(Fp::from_ratio(3, 10)),
    EnemyArchetype::new(EnemyType::Sentry, 480, 7, 26, 20, 5),
    EnemyArchetype::new(EnemyType::Overmind, 3000, 4, 70, 180, 50)
        .splash(Fp::from_ratio(1, 2))
        .chain(Fp::from_ratio(1, 2)),
    // Mutants
    EnemyArchetype::new(EnemyType::Mutant, 140, 10, 13, 7, 2),
    EnemyArchetype::new(EnemyType::Stalker, 80, 24, 9, 6, 1),
    EnemyArchetype::new(EnemyType::Behemoth, 380, 5, 24, 14, 3).splash(Fp::from_ratio(1, 4)),
    EnemyArchetype::new(EnemyType::Alpha, 560, 8, 30, 22, 5),
    EnemyArchetype::new(EnemyType::Broodmother, 3600, 4, 80, 210, 60)
        .splash(Fp::from_ratio(1, 2))
        .chain(Fp::from_ratio(1, 2))
        .spread(SpreadBehavior::SplitOnDeath {
            spawn: EnemyType::Stalker,
            count: 4,
        }),
    // Cosmos
    EnemyArchetype::new(EnemyType::Voidling, 160, 11, 14, 8, 2),
    EnemyArchetype::new(EnemyType::Comet, 90, 26, 10, 7, 2),
    EnemyArchetype::new(EnemyType::Colossus, 440, 5, 26, 16, 4)
        .splash(Fp::from_ratio(3, 10))
        .chain(Fp::from_ratio(1, 5)),
    EnemyArchetype::new(EnemyType::Herald, 640, 8, 34, 26, 6),
    EnemyArchetype::new(EnemyType::Devourer, 4200, 4, 90, 240, 70)
        .splash(Fp::from_ratio(1, 2))
        .chain(Fp::from_ratio(1, 2)),
    // Magic
    EnemyArchetype::new(EnemyType::Wraith, 180, 12, 15, 9, 2).spread(SpreadBehavior::HealAura {
        radius: Fp::from_int(2),
        heal_per_second: Fp::from_int(3),
    }),
    EnemyArchetype::new(EnemyType::Imp, 100, 25, 11, 8, 2),
    EnemyArchetype::new(EnemyType::Golem, 500, 4, 28, 18, 4).chain(Fp::from_ratio(2, 5)),
    EnemyArchetype::new(EnemyType::Warden, 720, 8, 36, 28, 7),
    EnemyArchetype::new(EnemyType::Archmage, 4800, 5, 100, 270, 80)
        .splash(Fp::from_ratio(1, 2))
        .chain(Fp::from_ratio(1, 2)),
    // Gods
    EnemyArchetype::new(EnemyType::Zealot, 200, 11, 16, 10, 3),
    EnemyArchetype::new(EnemyType::Valkyrie, 110, 28, 12, 9, 2),
    EnemyArchetype::new(EnemyType::Juggernaut, 560, 4, 30, 20, 5).splash(Fp::from_ratio(3, 10)),
    EnemyArchetype::new(EnemyType::Seraph, 800, 9, 40, 32, 8),
    EnemyArchetype::new(EnemyType::Ascendant, 5600, 4, 120, 320, 100)
        .splash(Fp::from_ratio(1, 2))
        .chain(Fp::from_ratio(1, 2)),
];

/// Stat line for an enemy type
pub fn archetype(enemy_type: EnemyType) -> &'static EnemyArchetype {
    &ARCHETYPES[enemy_type as usize]
}

pub fn archetypes() -> &'static [EnemyArchetype] {
    &ARCHETYPES
}

// =====================================================
// Boss phases
// =====================================================

/// One-shot ability a boss fires when its HP drops past a threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossAbility {
    SummonMinions { enemy_type: EnemyType, count: u32 },
    Enrage { damage_mult: Fp, speed_mult: Fp },
    Shield { hp_fraction: Fp, duration_secs: u32 },
    Heal { hp_fraction: Fp },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BossPhase {
    /// HP fraction (of max) at or below which this phase applies
    pub hp_threshold: Fp,
    pub ability: BossAbility,
    pub announcement: &'static str,
}

const fn phase(hp_percent: i64, ability: BossAbility, announcement: &'static str) -> BossPhase {
    BossPhase {
        hp_threshold: Fp::from_ratio(hp_percent, 100),
        ability,
        announcement,
    }
}

const fn summon(enemy_type: EnemyType, count: u32) -> BossAbility {
    BossAbility::SummonMinions { enemy_type, count }
}

const fn enrage(damage_percent: i64, speed_percent: i64) -> BossAbility {
    BossAbility::Enrage {
        damage_mult: Fp::from_ratio(damage_percent, 100),
        speed_mult: Fp::from_ratio(speed_percent, 100),
    }
}

const fn shield(hp_percent: i64, duration_secs: u32) -> BossAbility {
    BossAbility::Shield {
        hp_fraction: Fp::from_ratio(hp_percent, 100),
        duration_secs,
    }
}

const fn heal(hp_percent: i64) -> BossAbility {
    BossAbility::Heal {
        hp_fraction: Fp::from_ratio(hp_percent, 100),
    }
}

// Highest threshold first
static WARLORD_PHASES: [BossPhase; 3] = [
    phase(75, summon(EnemyType::Thug, 4), "The Warlord calls in his crew!"),
    phase(50, enrage(150, 110), "The Warlord is furious!"),
    phase(25, shield(20, 5), "The Warlord raises a riot shield!"),
];

static OVERMIND_PHASES: [BossPhase; 3] = [
    phase(70, summon(EnemyType::Drone, 6), "The Overmind deploys a drone swarm!"),
    phase(40, shield(25, 6), "Barrier protocol engaged."),
    phase(15, enrage(175, 100), "The Overmind overclocks its cores!"),
];

static BROODMOTHER_PHASES: [BossPhase; 3] = [
    phase(75, summon(EnemyType::Stalker, 5), "The Broodmother's eggs are hatching!"),
    phase(50, heal(15), "The Broodmother feeds on her brood."),
    phase(20, enrage(160, 130), "The Broodmother goes berserk!"),
];

static DEVOURER_PHASES: [BossPhase; 4] = [
    phase(80, summon(EnemyType::Voidling, 6), "The Devourer tears open a rift!"),
    phase(60, shield(20, 5), "Gravity bends around the Devourer."),
    phase(35, heal(10), "The Devourer consumes a star."),
    phase(10, enrage(200, 120), "The Devourer hungers!"),
];

static ARCHMAGE_PHASES: [BossPhase; 3] = [
    phase(66, shield(30, 8), "The Archmage weaves a ward!"),
    phase(33, summon(EnemyType::Imp, 8), "The Archmage summons a horde of imps!"),
    phase(10, heal(20), "The Archmage drinks an elixir!"),
];

static ASCENDANT_PHASES: [BossPhase; 4] = [
    phase(75, summon(EnemyType::Seraph, 2), "The Ascendant calls its host!"),
    phase(50, shield(25, 8), "Divine light shields the Ascendant."),
    phase(25, heal(15), "The Ascendant is reborn in flame!"),
    phase(5, enrage(250, 150), "The Ascendant unleashes judgement!"),
];

/// Phase list for a boss, highest threshold first; empty for non-bosses
pub fn boss_phases(enemy_type: EnemyType) -> &'static [BossPhase] {
    match enemy_type {
        EnemyType::Warlord => &WARLORD_PHASES,
        EnemyType::Overmind => &OVERMIND_PHASES,
        EnemyType::Broodmother => &BROODMOTHER_PHASES,
        EnemyType::Devourer => &DEVOURER_PHASES,
        EnemyType::Archmage => &ARCHMAGE_PHASES,
        EnemyType::Ascendant => &ASCENDANT_PHASES,
        _ => &[],
    }
}
