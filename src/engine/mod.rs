//! Balance Engine (tick-loop facade)
//!
//! Binds one validated [`BalanceConfig`] to the pure balance functions so the
//! simulation loop can ask for enemy stats, waves, drops and progression
//! without threading the config through every call. The engine holds no
//! mutable state; progress values go in by reference and come back new.

use std::ops::RangeInclusive;
use std::path::Path;

use crate::boss::{current_boss_phase, hp_fraction, phases_crossed};
use crate::config::BalanceConfig;
use crate::content::{mastery_tree, BossPhase, EnemyType, MasteryEffect};
use crate::drops::{roll_all_drops_with, roll_from_uniform, DropBundle, DropContext};
use crate::error::{ConfigError, MasteryError};
use crate::logging::TimingSpan;
use crate::mastery::{self, PlayerMasteryProgress};
use crate::progression::{self, FortressProgress, ProgressionLevel, XpGrant};
use crate::rng::RandomSource;
use crate::scaling::{self, EnemyRewards, EnemyStats};
use crate::synergy::{aggregate_roster, Roster, SynergyReport};
use crate::waves::{self, PillarSelection, WaveComposition};

/// Facade over the balance core for one configuration
#[derive(Debug, Clone, Default)]
pub struct BalanceEngine {
    config: BalanceConfig,
}

impl BalanceEngine {
    pub fn new(config: BalanceConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        tracing::debug!(
            ticks_per_second = config.ticks_per_second,
            "Balance engine created"
        );
        Ok(Self { config })
    }

    /// Build from a `.ron` or `.json` config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::new(BalanceConfig::load(path)?)
    }

    pub fn config(&self) -> &BalanceConfig {
        &self.config
    }

    // =====================================================
    // Enemies & waves
    // =====================================================

    pub fn enemy_stats(&self, enemy_type: EnemyType, wave: u32, is_elite: bool) -> EnemyStats {
        let stats = scaling::enemy_stats(&self.config, enemy_type, wave, is_elite);
        tracing::trace!(
            enemy = enemy_type.id(),
            wave,
            is_elite,
            hp = stats.hp,
            damage = stats.damage,
            "Enemy stats"
        );
        stats
    }

    pub fn enemy_rewards(&self, enemy_type: EnemyType, wave: u32, is_elite: bool) -> EnemyRewards {
        scaling::enemy_rewards(&self.config, enemy_type, wave, is_elite)
    }

    pub fn wave_composition(&self, wave: u32, selection: &PillarSelection<'_>) -> WaveComposition {
        let composition =
            waves::wave_composition(&self.config, wave, self.config.ticks_per_second, selection);
        tracing::debug!(
            wave,
            pillar = composition.pillar.id(),
            total = composition.total_enemies(),
            is_boss_wave = composition.is_boss_wave,
            "Wave composed"
        );
        composition
    }

    /// Compose a run of waves (planning screens, balance sheets)
    pub fn preview_waves(
        &self,
        range: RangeInclusive<u32>,
        selection: &PillarSelection<'_>,
    ) -> Vec<WaveComposition> {
        let _span = TimingSpan::new("preview_waves");
        range
            .map(|wave| {
                waves::wave_composition(&self.config, wave, self.config.ticks_per_second, selection)
            })
            .collect()
    }

    /// Decide whether one spawn of `composition` is elite. Draws exactly one uniform.
    pub fn roll_elite(&self, composition: &WaveComposition, rng: &mut impl RandomSource) -> bool {
        let roll = roll_from_uniform(rng.next_uniform());
        i64::from(roll) < composition.elite_chance.raw()
    }

    // =====================================================
    // Bosses
    // =====================================================

    pub fn boss_phase(
        &self,
        enemy_type: EnemyType,
        current_hp: u64,
        max_hp: u64,
    ) -> Option<&'static BossPhase> {
        current_boss_phase(enemy_type, hp_fraction(current_hp, max_hp))
    }

    /// Phases to fire after a hit took the boss from `previous_hp` to `current_hp`
    pub fn boss_phases_crossed(
        &self,
        enemy_type: EnemyType,
        previous_hp: u64,
        current_hp: u64,
        max_hp: u64,
    ) -> Vec<&'static BossPhase> {
        let crossed = phases_crossed(
            enemy_type,
            hp_fraction(previous_hp, max_hp),
            hp_fraction(current_hp, max_hp),
        );
        for phase in &crossed {
            tracing::debug!(
                boss = enemy_type.id(),
                announcement = phase.announcement,
                "Boss phase triggered"
            );
        }
        crossed
    }

    // =====================================================
    // Progression
    // =====================================================

    pub fn level_for_xp(&self, total_xp: u64) -> u32 {
        progression::fortress_level_for_xp(&self.config.progression, total_xp)
    }

    pub fn grant_xp(&self, progress: &FortressProgress, amount: u64) -> XpGrant {
        let grant = progression::grant_xp(&self.config.progression, progress, amount);
        if grant.levels_gained > 0 {
            tracing::debug!(
                from = grant.previous_level,
                to = grant.progress.level,
                rewards = grant.rewards.len(),
                "Fortress leveled up"
            );
        }
        grant
    }

    pub fn level_table(&self, max_level: u32) -> Vec<ProgressionLevel> {
        let _span = TimingSpan::new("level_table");
        progression::level_table(&self.config.progression, max_level)
    }

    // =====================================================
    // Synergies & drops
    // =====================================================

    pub fn synergies(&self, roster: &Roster) -> SynergyReport {
        let report = aggregate_roster(roster);
        tracing::trace!(active = report.active().count(), "Synergies aggregated");
        report
    }

    /// Roll every drop table for one kill. Draws exactly three uniforms.
    pub fn roll_drops(&self, context: &DropContext, rng: &mut impl RandomSource) -> DropBundle {
        let bundle = roll_all_drops_with(context, rng);
        if !bundle.is_empty() {
            tracing::debug!(?context, ?bundle, "Drops rolled");
        }
        bundle
    }

    // =====================================================
    // Mastery
    // =====================================================

    pub fn can_unlock_mastery(&self, progress: &PlayerMasteryProgress, node_id: &str) -> bool {
        mastery::can_unlock(&self.config.mastery, mastery_tree(), progress, node_id)
    }

    pub fn unlock_mastery(
        &self,
        progress: &PlayerMasteryProgress,
        node_id: &str,
    ) -> Result<PlayerMasteryProgress, MasteryError> {
        match mastery::unlock_node(&self.config.mastery, mastery_tree(), progress, node_id) {
            Ok(next) => {
                tracing::debug!(
                    node = node_id,
                    remaining = next.available_points,
                    "Mastery node unlocked"
                );
                Ok(next)
            }
            Err(e) => {
                tracing::debug!(node = node_id, error = %e, "Mastery unlock rejected");
                Err(e)
            }
        }
    }

    pub fn mastery_effects(&self, progress: &PlayerMasteryProgress) -> Vec<MasteryEffect> {
        mastery::active_effects(mastery_tree(), progress)
    }
}
