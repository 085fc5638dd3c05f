//! Enemy Scaling Calculator
//!
//! Turns an archetype, a wave number and the elite flag into concrete HP,
//! damage, speed and reward numbers. Waves repeat in 100-wave cycles; each
//! cycle multiplies stats by an exponential base.
//!
//! Every multiplier is applied with [`Fp::mul`] in a fixed order and the
//! result is floored once at the end, so two machines always agree.

use serde::{Deserialize, Serialize};

use crate::config::{BalanceConfig, EnemyScalingConfig, RewardScalingConfig};
use crate::constants::WAVES_PER_CYCLE;
use crate::content::{archetype, EnemyType};
use crate::fixed::Fp;

/// Where a raw wave number falls in endless mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WavePosition {
    pub wave: u32,
    /// 0-based count of completed 100-wave cycles
    pub cycle: u32,
    /// 1..=100
    pub effective_wave: u32,
}

/// Split a raw wave into cycle and effective wave. Wave 0 clamps to 1.
pub fn wave_position(wave: u32) -> WavePosition {
    let wave = wave.max(1);
    WavePosition {
        wave,
        cycle: (wave - 1) / WAVES_PER_CYCLE,
        effective_wave: (wave - 1) % WAVES_PER_CYCLE + 1,
    }
}

/// `1 + (ew - 1) * rate`, with the early rate inside the early band
pub fn wave_scale(config: &EnemyScalingConfig, effective_wave: u32) -> Fp {
    let rate = if effective_wave <= config.early_band_waves {
        config.early_wave_rate
    } else {
        config.wave_rate
    };
    Fp::ONE + rate.mul_int(i64::from(effective_wave.saturating_sub(1)))
}

/// `base ^ cycle`
pub fn cycle_scale(base: Fp, cycle: u32) -> Fp {
    base.pow(cycle)
}

/// Linearly decaying HP boost for the first waves of every cycle
pub fn early_boost(config: &EnemyScalingConfig, effective_wave: u32) -> Fp {
    let window = config.early_boost_window;
    if window < 2 || effective_wave >= window {
        return Fp::ONE;
    }
    let remaining = i64::from(window - effective_wave);
    Fp::ONE
        + config
            .early_boost_max
            .mul_int(remaining)
            .div_int(i64::from(window - 1))
}

/// Concrete combat stats for one spawned enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyStats {
    pub enemy_type: EnemyType,
    pub wave: u32,
    pub is_elite: bool,
    pub hp: u64,
    pub damage: u64,
    /// Fp units per tick
    pub speed: Fp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EnemyRewards {
    pub gold: u64,
    pub dust: u64,
}

/// HP, damage and per-tick speed for an enemy on a wave
pub fn enemy_stats(
    config: &BalanceConfig,
    enemy_type: EnemyType,
    wave: u32,
    is_elite: bool,
) -> EnemyStats {
    let enemy = &config.enemy;
    let base = archetype(enemy_type);
    let pos = wave_position(wave);

    let wave_mult = wave_scale(enemy, pos.effective_wave);
    let (hp_elite, damage_elite) = if is_elite {
        (enemy.elite_hp_mult, enemy.elite_damage_mult)
    } else {
        (Fp::ONE, Fp::ONE)
    };

    let hp = Fp::from_int(i64::from(base.base_hp))
        .mul(wave_mult)
        .mul(cycle_scale(enemy.hp_cycle_base, pos.cycle))
        .mul(hp_elite)
        .mul(early_boost(enemy, pos.effective_wave))
        .floor_to_u64();

    let damage = Fp::from_int(i64::from(base.base_damage))
        .mul(wave_mult)
        .mul(cycle_scale(enemy.damage_cycle_base, pos.cycle))
        .mul(damage_elite)
        .floor_to_u64();

    EnemyStats {
        enemy_type,
        wave: pos.wave,
        is_elite,
        hp,
        damage,
        speed: speed_per_tick(base.base_speed, config.ticks_per_second),
    }
}

/// Convert units/second to units/tick. A zero tick rate is treated as 1.
pub fn speed_per_tick(speed_per_second: Fp, ticks_per_second: u32) -> Fp {
    speed_per_second.div_int(i64::from(ticks_per_second.max(1)))
}

/// `1 + (ew - 1) * reward_rate`
pub fn reward_wave_scale(config: &RewardScalingConfig, effective_wave: u32) -> Fp {
    Fp::ONE
        + config
            .wave_rate
            .mul_int(i64::from(effective_wave.saturating_sub(1)))
}

/// Gold and dust for killing an enemy. Grows slower than [`enemy_stats`].
pub fn enemy_rewards(
    config: &BalanceConfig,
    enemy_type: EnemyType,
    wave: u32,
    is_elite: bool,
) -> EnemyRewards {
    let reward = &config.reward;
    let base = archetype(enemy_type);
    let pos = wave_position(wave);

    let wave_mult = reward_wave_scale(reward, pos.effective_wave);
    let cycle_mult = cycle_scale(reward.cycle_base, pos.cycle);
    let elite_mult = if is_elite { reward.elite_mult } else { Fp::ONE };

    // Applied to the base one multiplier at a time, like HP and damage
    let scale = |amount: u32| {
        Fp::from_int(i64::from(amount))
            .mul(wave_mult)
            .mul(cycle_mult)
            .mul(elite_mult)
            .floor_to_u64()
    };

    EnemyRewards {
        gold: scale(base.gold_reward),
        dust: scale(base.dust_reward),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> BalanceConfig {
        BalanceConfig::default()
    }

    #[test]
    fn test_wave_position() {
        assert_eq!(
            wave_position(1),
            WavePosition {
                wave: 1,
                cycle: 0,
                effective_wave: 1
            }
        );
        assert_eq!(wave_position(100).effective_wave, 100);
        assert_eq!(wave_position(100).cycle, 0);
        assert_eq!(wave_position(101).effective_wave, 1);
        assert_eq!(wave_position(101).cycle, 1);
        assert_eq!(wave_position(0), wave_position(1));
    }

    #[test]
    fn test_runner_wave_one_fixture() {
        // 60 * 1.0 (wave) * 1.0 (cycle) * 1.0 (elite) * 21299/16384 (boost) = 77.99
        let cfg = config();
        assert_eq!(early_boost(&cfg.enemy, 1).raw(), 21299);
        let stats = enemy_stats(&cfg, EnemyType::Runner, 1, false);
        assert_eq!(stats.hp, 77);
        assert_eq!(stats.damage, 6);
    }

    #[test]
    fn test_runner_speed_per_tick() {
        let stats = enemy_stats(&config(), EnemyType::Runner, 1, false);
        // 2.0 units/s over 30 ticks
        assert_eq!(stats.speed.raw(), 32768 / 30);
    }

    #[test]
    fn test_zero_tick_rate_treated_as_one() {
        assert_eq!(speed_per_tick(Fp::from_int(2), 0), Fp::from_int(2));
    }

    #[test]
    fn test_wave_scale_bands() {
        let cfg = config().enemy;
        assert_eq!(wave_scale(&cfg, 1), Fp::ONE);
        // ew 10 still uses the early rate, ew 11 the standard rate
        assert_eq!(wave_scale(&cfg, 10), Fp::ONE + Fp::from_ratio(8, 100).mul_int(9));
        assert_eq!(wave_scale(&cfg, 11), Fp::ONE + Fp::from_ratio(12, 100).mul_int(10));
    }

    #[test]
    fn test_early_boost_decays_to_one() {
        let cfg = config().enemy;
        let mut previous = early_boost(&cfg, 1);
        for ew in 2..=15 {
            let boost = early_boost(&cfg, ew);
            assert!(boost <= previous);
            previous = boost;
        }
        assert_eq!(early_boost(&cfg, 15), Fp::ONE);
        assert_eq!(early_boost(&cfg, 80), Fp::ONE);
    }

    #[test]
    fn test_elite_multiplies_hp_and_damage() {
        let cfg = config();
        let normal = enemy_stats(&cfg, EnemyType::Thug, 30, false);
        let elite = enemy_stats(&cfg, EnemyType::Thug, 30, true);
        assert!(elite.hp > normal.hp * 2);
        assert!(elite.damage > normal.damage);
        assert_eq!(elite.speed, normal.speed);
    }

    #[test]
    fn test_cycle_boundary_strictly_harder() {
        let cfg = config();
        for enemy_type in EnemyType::ALL {
            let first = enemy_stats(&cfg, enemy_type, 1, false);
            let second = enemy_stats(&cfg, enemy_type, 101, false);
            assert!(second.hp > first.hp, "{:?}", enemy_type);
            assert!(second.damage >= first.damage, "{:?}", enemy_type);
        }
    }

    #[test]
    fn test_rewards_grow_slower_than_hp() {
        let cfg = config();
        let early = enemy_stats(&cfg, EnemyType::Bruiser, 20, false);
        let late = enemy_stats(&cfg, EnemyType::Bruiser, 220, false);
        let early_gold = enemy_rewards(&cfg, EnemyType::Bruiser, 20, false);
        let late_gold = enemy_rewards(&cfg, EnemyType::Bruiser, 220, false);
        let hp_growth = late.hp * 100 / early.hp;
        let gold_growth = late_gold.gold * 100 / early_gold.gold;
        assert!(gold_growth < hp_growth);
    }

    #[test]
    fn test_rewards_wave_one() {
        let rewards = enemy_rewards(&config(), EnemyType::Warlord, 10, false);
        // 150 * (1 + 9/20) = 217.5
        assert_eq!(rewards.gold, 217);
        let elite = enemy_rewards(&config(), EnemyType::Warlord, 10, true);
        assert!(elite.gold > rewards.gold);
    }

    #[test]
    fn test_rewards_truncate_after_each_multiplier() {
        let cfg = config();
        let rewards = enemy_rewards(&cfg, EnemyType::Bruiser, 285, true);
        let pos = wave_position(285);
        let base = archetype(EnemyType::Bruiser);
        let chained = Fp::from_int(i64::from(base.gold_reward))
            .mul(reward_wave_scale(&cfg.reward, pos.effective_wave))
            .mul(cycle_scale(cfg.reward.cycle_base, pos.cycle))
            .mul(cfg.reward.elite_mult)
            .floor_to_u64();
        assert_eq!(rewards.gold, chained);
        assert_eq!(rewards.gold, 123);
    }

    #[test]
    fn test_idempotent() {
        let cfg = config();
        assert_eq!(
            enemy_stats(&cfg, EnemyType::Devourer, 347, true),
            enemy_stats(&cfg, EnemyType::Devourer, 347, true)
        );
    }
}
