//! Structural constants for the balance core.
//!
//! These are the shape of the game, not its tuning: changing any of them
//! changes what a wave number *means*. Tunable rates and thresholds live in
//! [`crate::config::BalanceConfig`] so content epochs can swap them freely.

// =====================================================
// Fixed-point
// =====================================================

/// Number of fractional bits in [`crate::fixed::Fp`]
pub const FP_SHIFT: u32 = 14;

/// Fixed-point scale: a raw value of `FP_SCALE` represents 1.0
pub const FP_SCALE: i64 = 1 << FP_SHIFT;

// =====================================================
// Endless cycle
// =====================================================

/// Waves in one full traversal of every pillar
pub const WAVES_PER_CYCLE: u32 = 100;

/// Waves in one composition block; the last wave of each block is a boss wave
pub const WAVES_PER_BLOCK: u32 = 10;

/// Last wave (inclusive, within a block) using the early composition tier
pub const EARLY_TIER_LAST_WAVE: u32 = 3;

/// Last wave (inclusive, within a block) using the mid composition tier
pub const MID_TIER_LAST_WAVE: u32 = 6;

// =====================================================
// Timing
// =====================================================

/// Tick rate assumed when a caller does not supply one
pub const DEFAULT_TICKS_PER_SECOND: u32 = 30;

pub const MS_PER_SECOND: u64 = 1000;

// =====================================================
// Drops
// =====================================================

/// Exclusive upper bound of a drop roll (rolls land in `0..DROP_ROLL_RANGE`)
pub const DROP_ROLL_RANGE: u32 = FP_SCALE as u32;

// =====================================================
// Progression
// =====================================================

/// Smallest valid fortress level
pub const MIN_LEVEL: u32 = 1;

/// Number of mastery tiers a node can belong to
pub const MASTERY_TIER_COUNT: usize = 5;

/// Most levels an XP grant itemizes rewards for; huge grants still level
/// correctly, only the itemized list is cut
pub const MAX_LEVELS_PER_GRANT: u32 = 1000;
