//! Wave Composition Generator
//!
//! Decides which pillar governs a wave, whether it is a boss wave, and how
//! the wave's enemy budget splits across the pillar roster. Pure function of
//! its inputs: no RNG, no hidden counters. Which spawns actually roll elite
//! is left to the caller using the returned `elite_chance`.

use serde::{Deserialize, Serialize};

use crate::config::{BalanceConfig, TierSplit, WaveConfig};
use crate::constants::{EARLY_TIER_LAST_WAVE, MID_TIER_LAST_WAVE, MS_PER_SECOND, WAVES_PER_BLOCK};
use crate::content::{pillar, pillar_for_wave, EnemyType, PillarId};
use crate::fixed::Fp;
use crate::scaling::wave_position;

/// Intra-decade difficulty shape, repeating every 10 waves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompositionTier {
    Early,
    Mid,
    Late,
    Boss,
}

impl CompositionTier {
    /// Tier for a raw wave (`(wave - 1) % 10 + 1` picks the slot)
    pub fn for_wave(wave: u32) -> Self {
        match (wave.max(1) - 1) % WAVES_PER_BLOCK + 1 {
            w if w <= EARLY_TIER_LAST_WAVE => Self::Early,
            w if w <= MID_TIER_LAST_WAVE => Self::Mid,
            w if w < WAVES_PER_BLOCK => Self::Late,
            _ => Self::Boss,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveEnemy {
    pub enemy_type: EnemyType,
    pub count: u32,
}

/// Everything the tick loop needs to run one wave
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveComposition {
    pub wave: u32,
    pub pillar: PillarId,
    pub cycle: u32,
    pub effective_wave: u32,
    pub is_boss_wave: bool,
    pub tier: CompositionTier,
    pub base_enemies: u32,
    /// No entry has a zero count
    pub enemies: Vec<WaveEnemy>,
    /// Probability in [0, 1] that a spawn is elite
    pub elite_chance: Fp,
    pub spawn_interval_ticks: u32,
}

impl WaveComposition {
    /// Neutral result for wave 0
    pub fn empty() -> Self {
        Self {
            wave: 0,
            pillar: PillarId::Streets,
            cycle: 0,
            effective_wave: 0,
            is_boss_wave: false,
            tier: CompositionTier::Early,
            base_enemies: 0,
            enemies: Vec::new(),
            elite_chance: Fp::ZERO,
            spawn_interval_ticks: 0,
        }
    }

    pub fn total_enemies(&self) -> u32 {
        self.enemies.iter().map(|e| e.count).sum()
    }

    pub fn count_of(&self, enemy_type: EnemyType) -> u32 {
        self.enemies
            .iter()
            .filter(|e| e.enemy_type == enemy_type)
            .map(|e| e.count)
            .sum()
    }
}

/// Optional constraints on pillar selection
#[derive(Debug, Clone, Copy, Default)]
pub struct PillarSelection<'a> {
    /// `None` means every pillar is available
    pub unlocked: Option<&'a [PillarId]>,
    pub override_pillar: Option<PillarId>,
}

impl<'a> PillarSelection<'a> {
    fn is_unlocked(&self, id: PillarId) -> bool {
        self.unlocked.map_or(true, |set| set.contains(&id))
    }
}

/// Governing pillar for an effective wave.
///
/// The override wins when it is unlocked (or there is no filter). Otherwise
/// the wave band decides; if the band's pillar is locked, the latest
/// unlocked pillar before it is used, then the first unlocked one.
pub fn select_pillar(effective_wave: u32, selection: &PillarSelection<'_>) -> PillarId {
    if let Some(id) = selection.override_pillar {
        if selection.is_unlocked(id) {
            return id;
        }
    }
    let band = pillar_for_wave(effective_wave).unwrap_or(PillarId::Streets);
    if selection.is_unlocked(band) {
        return band;
    }
    PillarId::ALL
        .iter()
        .rev()
        .find(|id| **id < band && selection.is_unlocked(**id))
        .or_else(|| PillarId::ALL.iter().find(|id| selection.is_unlocked(**id)))
        .copied()
        .unwrap_or(band)
}

/// Enemy budget for a raw wave; slower growth past the breakpoint
pub fn base_enemies(config: &WaveConfig, wave: u32) -> u32 {
    let early_waves = wave.min(config.base_enemies_breakpoint);
    let late_waves = wave.saturating_sub(config.base_enemies_breakpoint);
    let early = config
        .base_enemies_early_rate
        .mul_int(i64::from(early_waves))
        .floor_to_u64();
    let late = config
        .base_enemies_late_rate
        .mul_int(i64::from(late_waves))
        .floor_to_u64();
    let total = u64::from(config.base_enemies_start) + early + late;
    u32::try_from(total).unwrap_or(u32::MAX)
}

/// Elite probability for a raw wave, clamped to the configured band
pub fn elite_chance(config: &WaveConfig, wave: u32) -> Fp {
    let steps = i64::from(wave.max(1) - 1);
    (config.elite_chance_base + config.elite_chance_per_wave.mul_int(steps))
        .max(config.elite_chance_floor)
        .min(config.elite_chance_ceiling)
}

/// Milliseconds between spawns for a raw wave, clamped
pub fn spawn_interval_ms(config: &WaveConfig, wave: u32) -> u32 {
    let steps = u64::from(wave.max(1) - 1);
    let reduction = u64::from(config.spawn_interval_step_ms) * steps;
    let ms = u64::from(config.spawn_interval_base_ms)
        .saturating_sub(reduction)
        .max(u64::from(config.spawn_interval_min_ms))
        .min(u64::from(config.spawn_interval_max_ms));
    u32::try_from(ms).unwrap_or(u32::MAX)
}

/// Convert a spawn interval to ticks, never below 1. A zero tick rate is treated as 1.
pub fn interval_to_ticks(interval_ms: u32, ticks_per_second: u32) -> u32 {
    let ticks = u64::from(interval_ms) * u64::from(ticks_per_second.max(1)) / MS_PER_SECOND;
    u32::try_from(ticks.max(1)).unwrap_or(u32::MAX)
}

fn share(budget: u32, weight: Fp) -> u32 {
    let count = weight.mul_int(i64::from(budget)).floor_to_u64();
    u32::try_from(count).unwrap_or(u32::MAX)
}

fn split_enemies(
    budget: u32,
    split: &TierSplit,
    common: EnemyType,
    fast: EnemyType,
    tank: EnemyType,
) -> Vec<WaveEnemy> {
    [
        (common, split.common),
        (fast, split.fast),
        (tank, split.tank),
    ]
    .into_iter()
    .map(|(enemy_type, weight)| WaveEnemy {
        enemy_type,
        count: share(budget, weight),
    })
    .filter(|e| e.count > 0)
    .collect()
}

/// Compose a wave. `wave == 0` yields [`WaveComposition::empty`].
pub fn wave_composition(
    config: &BalanceConfig,
    wave: u32,
    ticks_per_second: u32,
    selection: &PillarSelection<'_>,
) -> WaveComposition {
    if wave == 0 {
        return WaveComposition::empty();
    }
    let wave_cfg = &config.wave;
    let pos = wave_position(wave);
    let pillar_id = select_pillar(pos.effective_wave, selection);
    let roster = &pillar(pillar_id).roster;
    let tier = CompositionTier::for_wave(wave);
    let budget = base_enemies(wave_cfg, wave);

    let enemies = match tier {
        CompositionTier::Early => split_enemies(
            budget,
            &wave_cfg.early_split,
            roster.common,
            roster.fast,
            roster.tank,
        ),
        CompositionTier::Mid => split_enemies(
            budget,
            &wave_cfg.mid_split,
            roster.common,
            roster.fast,
            roster.tank,
        ),
        CompositionTier::Late => split_enemies(
            budget,
            &wave_cfg.late_split,
            roster.common,
            roster.fast,
            roster.tank,
        ),
        CompositionTier::Boss => {
            let rest = budget.saturating_sub(1);
            let guards = share(rest, wave_cfg.boss_guard_share).min(rest);
            [
                (roster.boss, 1),
                (roster.guard, guards),
                (roster.common, rest - guards),
            ]
            .into_iter()
            .filter(|(_, count)| *count > 0)
            .map(|(enemy_type, count)| WaveEnemy { enemy_type, count })
            .collect()
        }
    };

    WaveComposition {
        wave,
        pillar: pillar_id,
        cycle: pos.cycle,
        effective_wave: pos.effective_wave,
        is_boss_wave: pos.effective_wave % WAVES_PER_BLOCK == 0,
        tier,
        base_enemies: budget,
        enemies,
        elite_chance: elite_chance(wave_cfg, wave),
        spawn_interval_ticks: interval_to_ticks(spawn_interval_ms(wave_cfg, wave), ticks_per_second),
    }
}
