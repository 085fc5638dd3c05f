//! Droppable items and the ordered drop-source tables

use serde::{Deserialize, Serialize};

use super::enemies::EnemyType;
use super::pillars::PillarId;
use crate::fixed::Fp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CrystalType {
    Power,
    Space,
    Time,
    Reality,
    Soul,
    Mind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MaterialType {
    ScrapMetal,
    CircuitBoard,
    MutagenSample,
    StarShard,
    ArcaneDust,
    DivineEssence,
    BossCore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialDrop {
    pub material: MaterialType,
    pub quantity: u32,
}

/// One unique artifact per boss
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ArtifactId {
    WarlordsKnuckles,
    OvermindCircuit,
    BroodHeart,
    EventHorizon,
    ArchmageGrimoire,
    CrownOfAscension,
}

/// What a drop table entry is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DropSourceKey {
    Boss(EnemyType),
    Pillar(PillarId),
}

/// Entry in an ordered drop table. Chances are Fp probabilities (16384 = 100%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DropSource<T> {
    pub key: DropSourceKey,
    pub item: T,
    /// Rarer band, tested first
    pub full_chance: Fp,
    /// Wider band that yields a fragment instead of the full item
    pub fragment_chance: Option<Fp>,
}

const fn crystal_from_boss(
    boss: EnemyType,
    item: CrystalType,
    full: Fp,
    fragment: Fp,
) -> DropSource<CrystalType> {
    DropSource {
        key: DropSourceKey::Boss(boss),
        item,
        full_chance: full,
        fragment_chance: Some(fragment),
    }
}

const fn crystal_from_pillar(pillar: PillarId, item: CrystalType) -> DropSource<CrystalType> {
    DropSource {
        key: DropSourceKey::Pillar(pillar),
        item,
        full_chance: Fp::from_ratio(1, 200),
        fragment_chance: Some(Fp::from_ratio(1, 25)),
    }
}

// Bosses first: a boss kill inside a crystal pillar resolves to the boss crystal
static CRYSTAL_SOURCES: [DropSource<CrystalType>; 9] = [
    crystal_from_boss(
        EnemyType::Warlord,
        CrystalType::Power,
        Fp::from_ratio(1, 50),
        Fp::from_ratio(1, 5),
    ),
    crystal_from_boss(
        EnemyType::Overmind,
        CrystalType::Mind,
        Fp::from_ratio(1, 50),
        Fp::from_ratio(1, 5),
    ),
    crystal_from_boss(
        EnemyType::Broodmother,
        CrystalType::Soul,
        Fp::from_ratio(1, 50),
        Fp::from_ratio(1, 5),
    ),
    crystal_from_boss(
        EnemyType::Devourer,
        CrystalType::Space,
        Fp::from_ratio(1, 50),
        Fp::from_ratio(1, 5),
    ),
    crystal_from_boss(
        EnemyType::Archmage,
        CrystalType::Time,
        Fp::from_ratio(1, 50),
        Fp::from_ratio(1, 5),
    ),
    crystal_from_boss(
        EnemyType::Ascendant,
        CrystalType::Reality,
        Fp::from_ratio(1, 40),
        Fp::from_ratio(1, 4),
    ),
    crystal_from_pillar(PillarId::Cosmos, CrystalType::Space),
    crystal_from_pillar(PillarId::Magic, CrystalType::Time),
    crystal_from_pillar(PillarId::Gods, CrystalType::Reality),
];

const fn material(
    key: DropSourceKey,
    material: MaterialType,
    quantity: u32,
    percent: i64,
) -> DropSource<MaterialDrop> {
    DropSource {
        key,
        item: MaterialDrop { material, quantity },
        full_chance: Fp::from_ratio(percent, 100),
        fragment_chance: None,
    }
}

static MATERIAL_SOURCES: [DropSource<MaterialDrop>; 12] = [
    material(DropSourceKey::Boss(EnemyType::Warlord), MaterialType::BossCore, 1, 50),
    material(DropSourceKey::Boss(EnemyType::Overmind), MaterialType::BossCore, 1, 50),
    material(DropSourceKey::Boss(EnemyType::Broodmother), MaterialType::BossCore, 2, 50),
    material(DropSourceKey::Boss(EnemyType::Devourer), MaterialType::BossCore, 2, 50),
    material(DropSourceKey::Boss(EnemyType::Archmage), MaterialType::BossCore, 3, 50),
    material(DropSourceKey::Boss(EnemyType::Ascendant), MaterialType::BossCore, 3, 60),
    material(DropSourceKey::Pillar(PillarId::Streets), MaterialType::ScrapMetal, 2, 10),
    material(DropSourceKey::Pillar(PillarId::Science), MaterialType::CircuitBoard, 2, 8),
    material(DropSourceKey::Pillar(PillarId::Mutants), MaterialType::MutagenSample, 1, 8),
    material(DropSourceKey::Pillar(PillarId::Cosmos), MaterialType::StarShard, 1, 6),
    material(DropSourceKey::Pillar(PillarId::Magic), MaterialType::ArcaneDust, 1, 6),
    material(DropSourceKey::Pillar(PillarId::Gods), MaterialType::DivineEssence, 1, 5),
];

const fn artifact(boss: EnemyType, item: ArtifactId) -> DropSource<ArtifactId> {
    DropSource {
        key: DropSourceKey::Boss(boss),
        item,
        full_chance: Fp::from_ratio(1, 20),
        fragment_chance: None,
    }
}

static ARTIFACT_SOURCES: [DropSource<ArtifactId>; 6] = [
    artifact(EnemyType::Warlord, ArtifactId::WarlordsKnuckles),
    artifact(EnemyType::Overmind, ArtifactId::OvermindCircuit),
    artifact(EnemyType::Broodmother, ArtifactId::BroodHeart),
    artifact(EnemyType::Devourer, ArtifactId::EventHorizon),
    artifact(EnemyType::Archmage, ArtifactId::ArchmageGrimoire),
    artifact(EnemyType::Ascendant, ArtifactId::CrownOfAscension),
];

pub fn crystal_sources() -> &'static [DropSource<CrystalType>] {
    &CRYSTAL_SOURCES
}

pub fn material_sources() -> &'static [DropSource<MaterialDrop>] {
    &MATERIAL_SOURCES
}

pub fn artifact_sources() -> &'static [DropSource<ArtifactId>] {
    &ARTIFACT_SOURCES
}
