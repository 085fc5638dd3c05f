//! Default authoring tables
//!
//! Immutable content the balance functions read: enemy archetypes and boss
//! phases, pillars, classes, roster tags and id aliases, drop sources, mastery
//! trees and level rewards. Everything is exposed through read-only accessors.

pub mod classes;
pub mod enemies;
pub mod items;
pub mod mastery_nodes;
pub mod pillars;
pub mod rewards;
pub mod roster;

pub use classes::{FortressClass, Stat};
pub use enemies::{
    archetype, archetypes, boss_phases, BossAbility, BossPhase, EnemyArchetype, EnemyRole,
    EnemyType, SpreadBehavior,
};
pub use items::{
    artifact_sources, crystal_sources, material_sources, ArtifactId, CrystalType, DropSource,
    DropSourceKey, MaterialDrop, MaterialType,
};
pub use mastery_nodes::{mastery_tree, MasteryEffect, MasteryNode, MasteryTree};
pub use pillars::{
    class_damage_modifier, pillar, pillar_for_wave, pillars, PillarDefinition, PillarId,
    PillarRoster,
};
pub use rewards::{authored_rewards, milestones, reward_table, LevelReward, Milestone, SlotKind};
pub use roster::{
    known_ids, legacy_id, normalize_id, synergy_bonus, synergy_bonuses, tags_for, IdKind,
    SynergyEffect, SynergyTag, TagSynergyBonus,
};
