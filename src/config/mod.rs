//! Balance configuration
//!
//! Every tunable rate, multiplier and threshold the balance functions use.
//! The algorithms are shared between content epochs; the numbers are not, so
//! they travel as data:
//! - RON or JSON, from a string or a file (`.ron` / `.json`)
//! - Fixed-point fields serialize as raw integers (16384 = 1.0)
//! - [`BalanceConfig::validate`] runs on every load, invalid configs are rejected

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::{DEFAULT_TICKS_PER_SECOND, MASTERY_TIER_COUNT, WAVES_PER_CYCLE};
use crate::error::ConfigError;
use crate::fixed::Fp;
use crate::scaling::{early_boost, wave_scale};

/// Difficulty curve for enemy HP / damage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyScalingConfig {
    /// Effective waves (1..=N) that use `early_wave_rate`
    pub early_band_waves: u32,
    pub early_wave_rate: Fp,
    pub wave_rate: Fp,
    pub hp_cycle_base: Fp,
    pub damage_cycle_base: Fp,
    pub elite_hp_mult: Fp,
    pub elite_damage_mult: Fp,
    /// HP boost decays linearly to 1.0 at this effective wave
    pub early_boost_window: u32,
    pub early_boost_max: Fp,
}

impl Default for EnemyScalingConfig {
    fn default() -> Self {
        Self {
            early_band_waves: 10,
            early_wave_rate: Fp::from_ratio(8, 100),
            wave_rate: Fp::from_ratio(12, 100),
            hp_cycle_base: Fp::from_ratio(8, 5),
            damage_cycle_base: Fp::from_ratio(7, 5),
            elite_hp_mult: Fp::from_ratio(5, 2),
            elite_damage_mult: Fp::from_ratio(3, 2),
            early_boost_window: 15,
            early_boost_max: Fp::from_ratio(3, 10),
        }
    }
}

/// Reward curve; must grow slower than [`EnemyScalingConfig`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardScalingConfig {
    pub wave_rate: Fp,
    pub cycle_base: Fp,
    pub elite_mult: Fp,
}

impl Default for RewardScalingConfig {
    fn default() -> Self {
        Self {
            wave_rate: Fp::from_ratio(1, 20),
            cycle_base: Fp::from_ratio(13, 10),
            elite_mult: Fp::from_ratio(7, 5),
        }
    }
}

/// Share of a wave's enemy budget per roster slot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierSplit {
    pub common: Fp,
    pub fast: Fp,
    pub tank: Fp,
}

impl TierSplit {
    pub fn total(&self) -> Fp {
        self.common + self.fast + self.tank
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    pub base_enemies_start: u32,
    pub base_enemies_early_rate: Fp,
    /// Raw wave after which `base_enemies_late_rate` applies
    pub base_enemies_breakpoint: u32,
    pub base_enemies_late_rate: Fp,
    pub early_split: TierSplit,
    pub mid_split: TierSplit,
    pub late_split: TierSplit,
    /// Share of the non-boss budget on a boss wave given to guards
    pub boss_guard_share: Fp,
    pub elite_chance_base: Fp,
    pub elite_chance_per_wave: Fp,
    pub elite_chance_floor: Fp,
    pub elite_chance_ceiling: Fp,
    pub spawn_interval_base_ms: u32,
    pub spawn_interval_step_ms: u32,
    pub spawn_interval_min_ms: u32,
    pub spawn_interval_max_ms: u32,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            base_enemies_start: 6,
            base_enemies_early_rate: Fp::from_ratio(3, 2),
            base_enemies_breakpoint: 50,
            base_enemies_late_rate: Fp::from_ratio(1, 2),
            early_split: TierSplit {
                common: Fp::from_ratio(7, 10),
                fast: Fp::from_ratio(3, 10),
                tank: Fp::ZERO,
            },
            mid_split: TierSplit {
                common: Fp::from_ratio(2, 5),
                fast: Fp::from_ratio(3, 10),
                tank: Fp::from_ratio(3, 10),
            },
            late_split: TierSplit {
                common: Fp::from_ratio(3, 10),
                fast: Fp::from_ratio(7, 20),
                tank: Fp::from_ratio(7, 20),
            },
            boss_guard_share: Fp::from_ratio(2, 5),
            elite_chance_base: Fp::from_ratio(1, 20),
            elite_chance_per_wave: Fp::from_ratio(1, 500),
            elite_chance_floor: Fp::from_ratio(1, 20),
            elite_chance_ceiling: Fp::HALF,
            spawn_interval_base_ms: 1500,
            spawn_interval_step_ms: 10,
            spawn_interval_min_ms: 400,
            spawn_interval_max_ms: 2000,
        }
    }
}

/// Fortress XP curve and default level rewards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionConfig {
    /// Last level of the gentle quadratic segment
    pub early_cap_level: u32,
    /// Last curated level; XP per level is linear afterwards
    pub level_cap: u32,
    pub early_linear: u64,
    pub early_quadratic: u64,
    pub mid_linear: u64,
    pub mid_quadratic: u64,
    pub post_cap_increment: u64,
    /// Levels that are multiples of this and have no authored reward get an HP bonus
    pub default_reward_interval: u32,
    pub default_hp_bonus: Fp,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            early_cap_level: 30,
            level_cap: 50,
            early_linear: 150,
            early_quadratic: 10,
            mid_linear: 400,
            mid_quadratic: 40,
            post_cap_increment: 1500,
            default_reward_interval: 5,
            default_hp_bonus: Fp::from_ratio(1, 50),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MasteryConfig {
    /// Points a class must have spent before nodes of tier `i + 1` open
    pub tier_thresholds: Vec<u32>,
}

impl Default for MasteryConfig {
    fn default() -> Self {
        Self {
            tier_thresholds: vec![0, 1, 3, 6, 9],
        }
    }
}

impl MasteryConfig {
    /// Threshold for a 1-based tier; out-of-range tiers clamp to the table ends
    pub fn threshold_for_tier(&self, tier: u8) -> u32 {
        let index = usize::from(tier.max(1)) - 1;
        self.tier_thresholds
            .get(index)
            .or_else(|| self.tier_thresholds.last())
            .copied()
            .unwrap_or(0)
    }
}

/// Complete balance configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceConfig {
    pub ticks_per_second: u32,
    pub enemy: EnemyScalingConfig,
    pub reward: RewardScalingConfig,
    pub wave: WaveConfig,
    pub progression: ProgressionConfig,
    pub mastery: MasteryConfig,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            ticks_per_second: DEFAULT_TICKS_PER_SECOND,
            enemy: EnemyScalingConfig::default(),
            reward: RewardScalingConfig::default(),
            wave: WaveConfig::default(),
            progression: ProgressionConfig::default(),
            mastery: MasteryConfig::default(),
        }
    }
}

impl BalanceConfig {
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.ron` or `.json` file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("ron") => Self::from_ron_str(&text)?,
            Some("json") => Self::from_json_str(&text)?,
            _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        };
        tracing::info!(path = ?path, "Loaded balance config");
        Ok(config)
    }

    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Reject configurations the balance functions cannot honor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ticks_per_second == 0 {
            return Err(ConfigError::invalid("ticks_per_second", "must be > 0"));
        }
        self.validate_enemy()?;
        self.validate_reward()?;
        self.validate_wave()?;
        self.validate_progression()?;
        self.validate_mastery()
    }

    fn validate_enemy(&self) -> Result<(), ConfigError> {
        let enemy = &self.enemy;
        if enemy.early_wave_rate > enemy.wave_rate {
            // A lower rate after the band would make wave scale drop at the seam
            return Err(ConfigError::invalid(
                "enemy.early_wave_rate",
                "must not exceed enemy.wave_rate",
            ));
        }
        if enemy.early_wave_rate.is_negative() {
            return Err(ConfigError::invalid("enemy.early_wave_rate", "must be >= 0"));
        }
        for (field, value) in [
            ("enemy.hp_cycle_base", enemy.hp_cycle_base),
            ("enemy.damage_cycle_base", enemy.damage_cycle_base),
            ("enemy.elite_hp_mult", enemy.elite_hp_mult),
            ("enemy.elite_damage_mult", enemy.elite_damage_mult),
        ] {
            if value < Fp::ONE {
                return Err(ConfigError::invalid(field, "must be >= 1.0"));
            }
        }
        if enemy.early_boost_window < 2 {
            return Err(ConfigError::invalid("enemy.early_boost_window", "must be >= 2"));
        }
        if enemy.early_boost_max.is_negative() {
            return Err(ConfigError::invalid("enemy.early_boost_max", "must be >= 0"));
        }
        // HP must not fall while the boost decays inside a cycle
        let hp_scale = |ew: u32| wave_scale(enemy, ew).mul(early_boost(enemy, ew));
        for ew in 1..enemy.early_boost_window.min(WAVES_PER_CYCLE) {
            if hp_scale(ew + 1) < hp_scale(ew) {
                return Err(ConfigError::invalid(
                    "enemy.early_boost_max",
                    format!("boost decays faster than wave scaling at wave {}", ew + 1),
                ));
            }
        }
        Ok(())
    }

    /// Difficulty must outpace rewards on every axis.
    fn validate_reward(&self) -> Result<(), ConfigError> {
        let (enemy, reward) = (&self.enemy, &self.reward);
        if reward.wave_rate.is_negative() || reward.wave_rate >= enemy.early_wave_rate {
            return Err(ConfigError::invalid(
                "reward.wave_rate",
                format!("must be in [0, {})", enemy.early_wave_rate),
            ));
        }
        let cycle_cap = enemy.hp_cycle_base.min(enemy.damage_cycle_base);
        if reward.cycle_base < Fp::ONE || reward.cycle_base >= cycle_cap {
            return Err(ConfigError::invalid(
                "reward.cycle_base",
                format!("must be in [1, {})", cycle_cap),
            ));
        }
        let elite_cap = enemy.elite_hp_mult.min(enemy.elite_damage_mult);
        if reward.elite_mult < Fp::ONE || reward.elite_mult >= elite_cap {
            return Err(ConfigError::invalid(
                "reward.elite_mult",
                format!("must be in [1, {})", elite_cap),
            ));
        }
        Ok(())
    }

    fn validate_wave(&self) -> Result<(), ConfigError> {
        let wave = &self.wave;
        for (field, split) in [
            ("wave.early_split", wave.early_split),
            ("wave.mid_split", wave.mid_split),
            ("wave.late_split", wave.late_split),
        ] {
            if split.common.is_negative() || split.fast.is_negative() || split.tank.is_negative() {
                return Err(ConfigError::invalid(field, "weights must be >= 0"));
            }
            if split.total() > Fp::ONE {
                return Err(ConfigError::invalid(field, "weights must sum to <= 1.0"));
            }
        }
        if wave.boss_guard_share.is_negative() || wave.boss_guard_share > Fp::ONE {
            return Err(ConfigError::invalid("wave.boss_guard_share", "must be in [0, 1]"));
        }
        if wave.base_enemies_early_rate.is_negative() || wave.base_enemies_late_rate.is_negative()
        {
            return Err(ConfigError::invalid("wave.base_enemies_*_rate", "must be >= 0"));
        }
        if wave.elite_chance_floor > wave.elite_chance_ceiling
            || wave.elite_chance_floor.is_negative()
            || wave.elite_chance_ceiling > Fp::ONE
        {
            return Err(ConfigError::invalid(
                "wave.elite_chance_floor",
                "need 0 <= floor <= ceiling <= 1",
            ));
        }
        if wave.spawn_interval_min_ms == 0
            || wave.spawn_interval_min_ms > wave.spawn_interval_max_ms
        {
            return Err(ConfigError::invalid(
                "wave.spawn_interval_min_ms",
                "need 0 < min <= max",
            ));
        }
        Ok(())
    }

    fn validate_progression(&self) -> Result<(), ConfigError> {
        let prog = &self.progression;
        if prog.early_cap_level == 0 || prog.early_cap_level > prog.level_cap {
            return Err(ConfigError::invalid(
                "progression.early_cap_level",
                "need 0 < early_cap_level <= level_cap",
            ));
        }
        if prog.early_linear.saturating_add(prog.early_quadratic) == 0 {
            return Err(ConfigError::invalid(
                "progression.early_linear",
                "level 1 must cost XP",
            ));
        }
        if prog.default_reward_interval == 0 {
            return Err(ConfigError::invalid(
                "progression.default_reward_interval",
                "must be > 0",
            ));
        }
        Ok(())
    }

    fn validate_mastery(&self) -> Result<(), ConfigError> {
        let thresholds = &self.mastery.tier_thresholds;
        if thresholds.len() != MASTERY_TIER_COUNT {
            return Err(ConfigError::invalid(
                "mastery.tier_thresholds",
                format!("expected {} tiers, got {}", MASTERY_TIER_COUNT, thresholds.len()),
            ));
        }
        if thresholds.windows(2).any(|pair| pair[0] > pair[1]) {
            return Err(ConfigError::invalid(
                "mastery.tier_thresholds",
                "must be non-decreasing",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = BalanceConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.ticks_per_second, 30);
    }

    #[test]
    fn test_default_difficulty_outpaces_rewards() {
        let config = BalanceConfig::default();
        assert!(config.reward.elite_mult < config.enemy.elite_hp_mult);
        assert!(config.reward.elite_mult < config.enemy.elite_damage_mult);
        assert!(config.reward.wave_rate < config.enemy.early_wave_rate);
        assert!(config.reward.cycle_base < config.enemy.hp_cycle_base);
        assert!(config.reward.cycle_base < config.enemy.damage_cycle_base);
    }

    #[test]
    fn test_reject_reward_faster_than_difficulty() {
        let mut config = BalanceConfig::default();
        config.reward.cycle_base = config.enemy.hp_cycle_base;
        match config.validate() {
            Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "reward.cycle_base"),
            other => panic!("expected invalid reward.cycle_base, got {:?}", other),
        }
    }

    #[test]
    fn test_reject_boost_that_lowers_hp() {
        let mut config = BalanceConfig::default();
        config.enemy.early_wave_rate = Fp::from_ratio(1, 100);
        config.enemy.early_boost_max = Fp::from_int(3);
        match config.validate() {
            Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "enemy.early_boost_max"),
            other => panic!("expected invalid enemy.early_boost_max, got {:?}", other),
        }

        // A milder boost over the default wave rate still climbs
        config.enemy.early_wave_rate = BalanceConfig::default().enemy.early_wave_rate;
        config.enemy.early_boost_max = Fp::from_ratio(1, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_reject_overweight_split() {
        let mut config = BalanceConfig::default();
        config.wave.late_split.common = Fp::ONE;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_reject_bad_mastery_thresholds() {
        let mut config = BalanceConfig::default();
        config.mastery.tier_thresholds = vec![0, 5, 3, 6, 9];
        assert!(config.validate().is_err());
        config.mastery.tier_thresholds = vec![0, 1];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_ron_roundtrip() {
        let config = BalanceConfig::default();
        let text = config.to_ron_string().unwrap();
        let restored = BalanceConfig::from_ron_str(&text).unwrap();
        assert_eq!(restored, config);
    }

    #[test]
    fn test_partial_ron_uses_defaults() {
        let config = BalanceConfig::from_ron_str("(ticks_per_second: 60)").unwrap();
        assert_eq!(config.ticks_per_second, 60);
        assert_eq!(config.enemy, EnemyScalingConfig::default());
    }

    #[test]
    fn test_json_rejects_invalid() {
        let err = BalanceConfig::from_json_str(r#"{"ticks_per_second": 0}"#).unwrap_err();
        assert!(err.to_string().contains("ticks_per_second"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("balance.json");
        std::fs::write(&path, BalanceConfig::default().to_json()).unwrap();
        let loaded = BalanceConfig::load(&path).unwrap();
        assert_eq!(loaded, BalanceConfig::default());

        let unknown = dir.path().join("balance.toml");
        std::fs::write(&unknown, "").unwrap();
        assert!(matches!(
            BalanceConfig::load(&unknown),
            Err(ConfigError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            BalanceConfig::load(dir.path().join("missing.ron")),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_threshold_for_tier_clamps() {
        let mastery = MasteryConfig::default();
        assert_eq!(mastery.threshold_for_tier(0), 0);
        assert_eq!(mastery.threshold_for_tier(1), 0);
        assert_eq!(mastery.threshold_for_tier(5), 9);
        assert_eq!(mastery.threshold_for_tier(200), 9);
    }
}
