//! Deterministic Drop Roller
//!
//! A caller-supplied uniform `u` in `[0, 1)` becomes one integer roll,
//! `floor(u * 16384)`, which is matched against ordered drop tables:
//! - Sources are tested in declaration order; the first match wins
//! - Within a source the rarer full-item band is tested before the fragment band
//! - Comparisons are strict (`roll < chance`)
//!
//! Each roll consumes exactly one uniform value, so a replay feeding the same
//! stream reproduces every drop.

use serde::{Deserialize, Serialize};

use crate::constants::DROP_ROLL_RANGE;
use crate::content::{
    artifact_sources, crystal_sources, material_sources, ArtifactId, CrystalType, DropSource,
    DropSourceKey, EnemyType, MaterialDrop, PillarId,
};
use crate::rng::RandomSource;

/// Convert a uniform value to a roll in `0..16384`.
/// Negative and NaN inputs roll 0; inputs at or above 1 roll the maximum.
pub fn roll_from_uniform(u: f64) -> u32 {
    if u.is_nan() || u < 0.0 {
        tracing::warn!(u, "Uniform below range, rolling 0");
        return 0;
    }
    if u >= 1.0 {
        tracing::warn!(u, "Uniform at or above 1.0, clamping roll");
        return DROP_ROLL_RANGE - 1;
    }
    // u < 1 so the product stays below DROP_ROLL_RANGE
    ((u * f64::from(DROP_ROLL_RANGE)).floor() as u32).min(DROP_ROLL_RANGE - 1)
}

/// What was killed, and where
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DropContext {
    pub boss: Option<EnemyType>,
    pub pillar: Option<PillarId>,
}

impl DropContext {
    pub fn boss(boss: EnemyType, pillar: PillarId) -> Self {
        Self {
            boss: Some(boss),
            pillar: Some(pillar),
        }
    }

    pub fn pillar(pillar: PillarId) -> Self {
        Self {
            boss: None,
            pillar: Some(pillar),
        }
    }

    fn matches(&self, key: DropSourceKey) -> bool {
        match key {
            DropSourceKey::Boss(boss) => self.boss == Some(boss),
            DropSourceKey::Pillar(pillar) => self.pillar == Some(pillar),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DropKind {
    Full,
    Fragment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolledDrop<T> {
    pub item: T,
    pub kind: DropKind,
    pub source: DropSourceKey,
    pub roll: u32,
}

/// Match a roll against an ordered table. Generic over the item type.
pub fn roll_table<T: Copy>(
    table: &[DropSource<T>],
    context: &DropContext,
    roll: u32,
) -> Option<RolledDrop<T>> {
    let roll_value = i64::from(roll);
    for source in table.iter().filter(|s| context.matches(s.key)) {
        let kind = if roll_value < source.full_chance.raw() {
            DropKind::Full
        } else if source
            .fragment_chance
            .is_some_and(|chance| roll_value < chance.raw())
        {
            DropKind::Fragment
        } else {
            continue;
        };
        return Some(RolledDrop {
            item: source.item,
            kind,
            source: source.key,
            roll,
        });
    }
    None
}

pub fn roll_crystal_drop(context: &DropContext, u: f64) -> Option<RolledDrop<CrystalType>> {
    roll_table(crystal_sources(), context, roll_from_uniform(u))
}

pub fn roll_material_drop(context: &DropContext, u: f64) -> Option<RolledDrop<MaterialDrop>> {
    roll_table(material_sources(), context, roll_from_uniform(u))
}

pub fn roll_artifact_drop(context: &DropContext, u: f64) -> Option<RolledDrop<ArtifactId>> {
    roll_table(artifact_sources(), context, roll_from_uniform(u))
}

/// Draws exactly one uniform from `rng`
pub fn roll_crystal_drop_with(
    context: &DropContext,
    rng: &mut impl RandomSource,
) -> Option<RolledDrop<CrystalType>> {
    roll_crystal_drop(context, rng.next_uniform())
}

/// Draws exactly one uniform from `rng`
pub fn roll_material_drop_with(
    context: &DropContext,
    rng: &mut impl RandomSource,
) -> Option<RolledDrop<MaterialDrop>> {
    roll_material_drop(context, rng.next_uniform())
}

/// Draws exactly one uniform from `rng`
pub fn roll_artifact_drop_with(
    context: &DropContext,
    rng: &mut impl RandomSource,
) -> Option<RolledDrop<ArtifactId>> {
    roll_artifact_drop(context, rng.next_uniform())
}

/// All three tables rolled for one kill
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropBundle {
    pub crystal: Option<RolledDrop<CrystalType>>,
    pub material: Option<RolledDrop<MaterialDrop>>,
    pub artifact: Option<RolledDrop<ArtifactId>>,
}

impl DropBundle {
    pub fn is_empty(&self) -> bool {
        self.crystal.is_none() && self.material.is_none() && self.artifact.is_none()
    }
}

/// Roll crystal, material, then artifact: exactly three draws, in that order
pub fn roll_all_drops_with(context: &DropContext, rng: &mut impl RandomSource) -> DropBundle {
    let crystal = roll_crystal_drop_with(context, rng);
    let material = roll_material_drop_with(context, rng);
    let artifact = roll_artifact_drop_with(context, rng);
    DropBundle {
        crystal,
        material,
        artifact,
    }
}
