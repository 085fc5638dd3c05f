//! Fortress Progression/Leveling Engine
//!
//! XP curve:
//! - Levels 1..=30: `150L + 10L²`
//! - Levels 31..=50: the level-30 cost plus `400d + 40d²` (`d = L - 30`)
//! - Past 50: the level-50 cost plus `1500` per level, forever
//!
//! (coefficients come from [`ProgressionConfig`]). `total_xp_for_level` and
//! `fortress_level_for_xp` are exact inverses. Sums use closed forms in 128-bit
//! arithmetic so every `u64` XP total maps to a level without overflow.
//!
//! Unlock predicates are derived from the single level reward table in
//! [`crate::content::rewards`].

use serde::{Deserialize, Serialize};

use crate::config::ProgressionConfig;
use crate::constants::{MAX_LEVELS_PER_GRANT, MIN_LEVEL};
use crate::content::{
    authored_rewards, milestones, normalize_id, reward_table, FortressClass, IdKind, LevelReward,
    Milestone, PillarId, SlotKind,
};
use crate::fixed::Fp;

// =====================================================
// XP curve
// =====================================================

fn saturate_u64(value: u128) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}

/// `1 + 2 + ... + n`
fn sum_linear(n: u128) -> u128 {
    n.saturating_mul(n + 1) / 2
}

/// `1² + 2² + ... + n²`
fn sum_squares(n: u128) -> u128 {
    n.saturating_mul(n + 1).saturating_mul(2 * n + 1) / 6
}

fn early_cost(config: &ProgressionConfig, level: u128) -> u128 {
    u128::from(config.early_linear)
        .saturating_mul(level)
        .saturating_add(
            u128::from(config.early_quadratic)
                .saturating_mul(level)
                .saturating_mul(level),
        )
}

fn level_cap(config: &ProgressionConfig) -> u128 {
    u128::from(config.level_cap.max(config.early_cap_level))
}

fn xp_for_level_wide(config: &ProgressionConfig, level: u32) -> u128 {
    let level = u128::from(level.max(MIN_LEVEL));
    let early_cap = u128::from(config.early_cap_level);
    let cap = level_cap(config);

    if level <= early_cap {
        early_cost(config, level)
    } else if level <= cap {
        let d = level - early_cap;
        early_cost(config, early_cap)
            .saturating_add(u128::from(config.mid_linear).saturating_mul(d))
            .saturating_add(
                u128::from(config.mid_quadratic)
                    .saturating_mul(d)
                    .saturating_mul(d),
            )
    } else {
        xp_for_level_wide(config, config.level_cap.max(config.early_cap_level)).saturating_add(
            u128::from(config.post_cap_increment).saturating_mul(level - cap),
        )
    }
}

fn total_xp_wide(config: &ProgressionConfig, level: u32) -> u128 {
    // Sum of xp_for_level over 1..=n
    let n = u128::from(level.max(MIN_LEVEL) - 1);
    let early_cap = u128::from(config.early_cap_level);
    let cap = level_cap(config);

    let early_n = n.min(early_cap);
    let mut total = u128::from(config.early_linear)
        .saturating_mul(sum_linear(early_n))
        .saturating_add(u128::from(config.early_quadratic).saturating_mul(sum_squares(early_n)));

    if n > early_cap {
        let m = n.min(cap) - early_cap;
        total = total
            .saturating_add(early_cost(config, early_cap).saturating_mul(m))
            .saturating_add(u128::from(config.mid_linear).saturating_mul(sum_linear(m)))
            .saturating_add(u128::from(config.mid_quadratic).saturating_mul(sum_squares(m)));
    }

    if n > cap {
        let k = n - cap;
        let cap_cost = xp_for_level_wide(config, config.level_cap.max(config.early_cap_level));
        total = total
            .saturating_add(cap_cost.saturating_mul(k))
            .saturating_add(u128::from(config.post_cap_increment).saturating_mul(sum_linear(k)));
    }
    total
}

/// XP needed to advance from `level` to `level + 1`. Level 0 clamps to 1.
pub fn xp_for_level(config: &ProgressionConfig, level: u32) -> u64 {
    saturate_u64(xp_for_level_wide(config, level))
}

/// Cumulative XP needed to reach `level` (0 for level 1)
pub fn total_xp_for_level(config: &ProgressionConfig, level: u32) -> u64 {
    saturate_u64(total_xp_wide(config, level))
}

/// Highest level whose cumulative requirement is covered by `total_xp`.
/// Total and monotonic over every `u64`.
pub fn fortress_level_for_xp(config: &ProgressionConfig, total_xp: u64) -> u32 {
    let xp = u128::from(total_xp);
    let (mut lo, mut hi) = (MIN_LEVEL, u32::MAX);
    while lo < hi {
        let mid = lo + (hi - lo).div_ceil(2);
        if total_xp_wide(config, mid) <= xp {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }
    lo
}

/// Share of the current level already earned, in `[0, 1)`
pub fn level_progress(config: &ProgressionConfig, total_xp: u64) -> Fp {
    let level = fortress_level_for_xp(config, total_xp);
    let into = total_xp.saturating_sub(total_xp_for_level(config, level));
    let needed = xp_for_level(config, level);
    if needed == 0 {
        return Fp::ZERO;
    }
    let into = i64::try_from(into).unwrap_or(i64::MAX);
    let needed = i64::try_from(needed).unwrap_or(i64::MAX);
    Fp::from_ratio(into, needed)
}

// =====================================================
// Level rewards
// =====================================================

/// Rewards for reaching `level`: the authored entry, or an HP bonus on
/// every `default_reward_interval`-th level without one
pub fn rewards_for_level(config: &ProgressionConfig, level: u32) -> Vec<LevelReward> {
    let authored = authored_rewards(level);
    if !authored.is_empty() {
        return authored.to_vec();
    }
    let interval = config.default_reward_interval;
    if interval > 0 && level >= MIN_LEVEL && level % interval == 0 {
        vec![LevelReward::HpBonus(config.default_hp_bonus)]
    } else {
        Vec::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionLevel {
    pub level: u32,
    pub cumulative_xp_required: u64,
    pub xp_to_next: u64,
    pub rewards: Vec<LevelReward>,
}

pub fn progression_level(config: &ProgressionConfig, level: u32) -> ProgressionLevel {
    let level = level.max(MIN_LEVEL);
    ProgressionLevel {
        level,
        cumulative_xp_required: total_xp_for_level(config, level),
        xp_to_next: xp_for_level(config, level),
        rewards: rewards_for_level(config, level),
    }
}

/// Levels `1..=max_level`
pub fn level_table(config: &ProgressionConfig, max_level: u32) -> Vec<ProgressionLevel> {
    (MIN_LEVEL..=max_level)
        .map(|level| progression_level(config, level))
        .collect()
}

// =====================================================
// Unlock predicates
// =====================================================

fn first_level_where(predicate: impl Fn(&LevelReward) -> bool) -> Option<u32> {
    reward_table()
        .iter()
        .find(|(_, rewards)| rewards.iter().any(&predicate))
        .map(|(level, _)| *level)
}

pub fn class_unlock_level(class: FortressClass) -> Option<u32> {
    first_level_where(|r| *r == LevelReward::UnlockClass(class))
}

pub fn pillar_unlock_level(pillar: PillarId) -> Option<u32> {
    first_level_where(|r| *r == LevelReward::UnlockPillar(pillar))
}

/// Legacy hero ids are accepted
pub fn hero_unlock_level(hero_id: &str) -> Option<u32> {
    let id = normalize_id(IdKind::Hero, hero_id);
    first_level_where(|r| matches!(r, LevelReward::UnlockHero(h) if h == id))
}

/// Legacy turret ids are accepted
pub fn turret_unlock_level(turret_id: &str) -> Option<u32> {
    let id = normalize_id(IdKind::Turret, turret_id);
    first_level_where(|r| matches!(r, LevelReward::UnlockTurret(t) if t == id))
}

fn reached(unlock_level: Option<u32>, level: u32) -> bool {
    unlock_level.is_some_and(|required| level >= required)
}

pub fn is_class_unlocked(class: FortressClass, level: u32) -> bool {
    reached(class_unlock_level(class), level)
}

pub fn is_pillar_unlocked(pillar: PillarId, level: u32) -> bool {
    reached(pillar_unlock_level(pillar), level)
}

pub fn is_hero_unlocked(hero_id: &str, level: u32) -> bool {
    reached(hero_unlock_level(hero_id), level)
}

pub fn is_turret_unlocked(turret_id: &str, level: u32) -> bool {
    reached(turret_unlock_level(turret_id), level)
}

/// Number of hero or turret slots open at `level`
pub fn slot_count(kind: SlotKind, level: u32) -> u32 {
    let count = reward_table()
        .range(..=level)
        .flat_map(|(_, rewards)| rewards)
        .filter(|r| **r == LevelReward::UnlockSlot(kind))
        .count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

pub fn unlocked_classes(level: u32) -> Vec<FortressClass> {
    FortressClass::ALL
        .into_iter()
        .filter(|class| is_class_unlocked(*class, level))
        .collect()
}

/// Unlocked pillars in wave order
pub fn unlocked_pillars(level: u32) -> Vec<PillarId> {
    PillarId::ALL
        .into_iter()
        .filter(|pillar| is_pillar_unlocked(*pillar, level))
        .collect()
}

/// Milestones at or below `level`
pub fn milestones_reached(level: u32) -> Vec<Milestone> {
    milestones()
        .iter()
        .filter(|m| m.level <= level)
        .copied()
        .collect()
}

// =====================================================
// XP grants
// =====================================================

/// Persisted fortress progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FortressProgress {
    pub total_xp: u64,
    pub level: u32,
}

impl Default for FortressProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl FortressProgress {
    pub fn new() -> Self {
        Self {
            total_xp: 0,
            level: MIN_LEVEL,
        }
    }

    pub fn from_xp(config: &ProgressionConfig, total_xp: u64) -> Self {
        Self {
            total_xp,
            level: fortress_level_for_xp(config, total_xp),
        }
    }
}

/// Outcome of [`grant_xp`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XpGrant {
    pub progress: FortressProgress,
    pub previous_level: u32,
    pub levels_gained: u32,
    /// `(level, reward)` for each level reached, capped at
    /// [`MAX_LEVELS_PER_GRANT`] levels
    pub rewards: Vec<(u32, LevelReward)>,
    pub milestones: Vec<Milestone>,
}

/// Add XP and return the new progress plus everything it unlocked.
/// The level is recomputed from `total_xp`; the stored level is not trusted.
pub fn grant_xp(config: &ProgressionConfig, progress: &FortressProgress, amount: u64) -> XpGrant {
    let previous_level = fortress_level_for_xp(config, progress.total_xp);
    let next = FortressProgress::from_xp(config, progress.total_xp.saturating_add(amount));

    let first_new = previous_level.saturating_add(1);
    let itemized_last = next
        .level
        .min(previous_level.saturating_add(MAX_LEVELS_PER_GRANT));
    let rewards = (first_new..=itemized_last)
        .flat_map(|level| {
            rewards_for_level(config, level)
                .into_iter()
                .map(move |reward| (level, reward))
        })
        .collect();

    let milestones = milestones()
        .iter()
        .filter(|m| m.level > previous_level && m.level <= next.level)
        .copied()
        .collect();

    XpGrant {
        progress: next,
        previous_level,
        levels_gained: next.level - previous_level,
        rewards,
        milestones,
    }
}
