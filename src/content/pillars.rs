//! Pillars: themed wave bands with their own roster and class modifiers

use serde::{Deserialize, Serialize};

use super::classes::FortressClass;
use super::enemies::EnemyType;
use super::roster::{normalize_id, IdKind};
use crate::fixed::Fp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PillarId {
    Streets,
    Science,
    Mutants,
    Cosmos,
    Magic,
    Gods,
}

impl PillarId {
    /// Declaration order, which is also wave order
    pub const ALL: [PillarId; 6] = [
        Self::Streets,
        Self::Science,
        Self::Mutants,
        Self::Cosmos,
        Self::Magic,
        Self::Gods,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Self::Streets => "streets",
            Self::Science => "science",
            Self::Mutants => "mutants",
            Self::Cosmos => "cosmos",
            Self::Magic => "magic",
            Self::Gods => "gods",
        }
    }

    /// Parse a pillar id; legacy ids from older saves resolve to their renamed pillar
    pub fn from_id(id: &str) -> Option<Self> {
        let id = normalize_id(IdKind::Pillar, id);
        Self::ALL.into_iter().find(|pillar| pillar.id() == id)
    }
}

/// Enemy picked for each roster slot of a pillar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PillarRoster {
    pub common: EnemyType,
    pub fast: EnemyType,
    pub tank: EnemyType,
    pub guard: EnemyType,
    pub boss: EnemyType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PillarDefinition {
    pub id: PillarId,
    pub name: &'static str,
    /// Inclusive band of effective waves (1..=100)
    pub wave_range: (u32, u32),
    pub roster: PillarRoster,
    /// Damage multiplier per class while fighting in this pillar
    pub class_modifiers: &'static [(FortressClass, Fp)],
}

impl PillarDefinition {
    pub fn contains_wave(&self, effective_wave: u32) -> bool {
        (self.wave_range.0..=self.wave_range.1).contains(&effective_wave)
    }
}

const fn roster(
    common: EnemyType,
    fast: EnemyType,
    tank: EnemyType,
    guard: EnemyType,
    boss: EnemyType,
) -> PillarRoster {
    PillarRoster {
        common,
        fast,
        tank,
        guard,
        boss,
    }
}

static PILLARS: [PillarDefinition; 6] = [
    PillarDefinition {
        id: PillarId::Streets,
        name: "The Streets",
        wave_range: (1, 10),
        roster: roster(
            EnemyType::Thug,
            EnemyType::Runner,
            EnemyType::Bruiser,
            EnemyType::Enforcer,
            EnemyType::Warlord,
        ),
        class_modifiers: &[(FortressClass::Natural, Fp::from_ratio(11, 10))],
    },
    PillarDefinition {
        id: PillarId::Science,
        name: "Science Quarter",
        wave_range: (11, 25),
        roster: roster(
            EnemyType::Drone,
            EnemyType::Scuttler,
            EnemyType::Mech,
            EnemyType::Sentry,
            EnemyType::Overmind,
        ),
        class_modifiers: &[
            (FortressClass::Lightning, Fp::from_ratio(5, 4)),
            (FortressClass::Tech, Fp::from_ratio(4, 5)),
        ],
    },
    PillarDefinition {
        id: PillarId::Mutants,
        name: "Mutant Wastes",
        wave_range: (26, 40),
        roster: roster(
            EnemyType::Mutant,
            EnemyType::Stalker,
            EnemyType::Behemoth,
            EnemyType::Alpha,
            EnemyType::Broodmother,
        ),
        class_modifiers: &[
            (FortressClass::Fire, Fp::from_ratio(6, 5)),
            (FortressClass::Natural, Fp::from_ratio(9, 10)),
        ],
    },
    PillarDefinition {
        id: PillarId::Cosmos,
        name: "The Cosmos",
        wave_range: (41, 60),
        roster: roster(
            EnemyType::Voidling,
            EnemyType::Comet,
            EnemyType::Colossus,
            EnemyType::Herald,
            EnemyType::Devourer,
        ),
        class_modifiers: &[
            (FortressClass::Void, Fp::from_ratio(5, 4)),
            (FortressClass::Ice, Fp::from_ratio(11, 10)),
            (FortressClass::Fire, Fp::from_ratio(9, 10)),
        ],
    },
    PillarDefinition {
        id: PillarId::Magic,
        name: "Mystic Realm",
        wave_range: (61, 80),
        roster: roster(
            EnemyType::Wraith,
            EnemyType::Imp,
            EnemyType::Golem,
            EnemyType::Warden,
            EnemyType::Archmage,
        ),
        class_modifiers: &[
            (FortressClass::Tech, Fp::from_ratio(6, 5)),
            (FortressClass::Void, Fp::from_ratio(4, 5)),
        ],
    },
    PillarDefinition {
        id: PillarId::Gods,
        name: "Pantheon",
        wave_range: (81, 100),
        roster: roster(
            EnemyType::Zealot,
            EnemyType::Valkyrie,
            EnemyType::Juggernaut,
            EnemyType::Seraph,
            EnemyType::Ascendant,
        ),
        class_modifiers: &[
            (FortressClass::Void, Fp::from_ratio(13, 10)),
            (FortressClass::Lightning, Fp::from_ratio(9, 10)),
        ],
    },
];

pub fn pillar(id: PillarId) -> &'static PillarDefinition {
    &PILLARS[id as usize]
}

pub fn pillars() -> &'static [PillarDefinition] {
    &PILLARS
}

/// Pillar whose band holds an effective wave (1..=100)
pub fn pillar_for_wave(effective_wave: u32) -> Option<PillarId> {
    PILLARS
        .iter()
        .find(|def| def.contains_wave(effective_wave))
        .map(|def| def.id)
}

/// Class damage multiplier inside a pillar; 1.0 when the pillar is neutral
pub fn class_damage_modifier(pillar_id: PillarId, class: FortressClass) -> Fp {
    pillar(pillar_id)
        .class_modifiers
        .iter()
        .find(|(c, _)| *c == class)
        .map(|(_, modifier)| *modifier)
        .unwrap_or(Fp::ONE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::enemies::EnemyRole;

    #[test]
    fn test_bands_cover_every_effective_wave_once() {
        for wave in 1..=100 {
            let owners = pillars().iter().filter(|p| p.contains_wave(wave)).count();
            assert_eq!(owners, 1, "wave {} owned by {} pillars", wave, owners);
        }
        assert_eq!(pillar_for_wave(0), None);
        assert_eq!(pillar_for_wave(101), None);
    }

    #[test]
    fn test_band_edges() {
        assert_eq!(pillar_for_wave(1), Some(PillarId::Streets));
        assert_eq!(pillar_for_wave(10), Some(PillarId::Streets));
        assert_eq!(pillar_for_wave(11), Some(PillarId::Science));
        assert_eq!(pillar_for_wave(60), Some(PillarId::Cosmos));
        assert_eq!(pillar_for_wave(100), Some(PillarId::Gods));
    }

    #[test]
    fn test_rosters_fill_their_roles() {
        for def in pillars() {
            assert_eq!(pillar(def.id).id, def.id);
            assert_eq!(def.roster.common.role(), EnemyRole::Common);
            assert_eq!(def.roster.fast.role(), EnemyRole::Fast);
            assert_eq!(def.roster.tank.role(), EnemyRole::Tank);
            assert_eq!(def.roster.guard.role(), EnemyRole::Guard);
            assert_eq!(def.roster.boss.role(), EnemyRole::Boss);
        }
    }

    #[test]
    fn test_class_damage_modifier_defaults_to_one() {
        assert_eq!(
            class_damage_modifier(PillarId::Science, FortressClass::Lightning),
            Fp::from_ratio(5, 4)
        );
        assert_eq!(
            class_damage_modifier(PillarId::Streets, FortressClass::Void),
            Fp::ONE
        );
    }

    #[test]
    fn test_pillar_id_roundtrip() {
        for id in PillarId::ALL {
            assert_eq!(PillarId::from_id(id.id()), Some(id));
        }
    }

    #[test]
    fn test_legacy_pillar_ids_resolve() {
        assert_eq!(PillarId::from_id("pantheon"), Some(PillarId::Gods));
        assert_eq!(PillarId::from_id("lab"), Some(PillarId::Science));
        assert_eq!(PillarId::from_id("realm"), Some(PillarId::Magic));
        assert_eq!(PillarId::from_id("atlantis"), None);
    }
}
