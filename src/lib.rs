//! Tower Defense - Balance Core Library
//!
//! This crate provides the deterministic balance layer for the tower-defense
//! simulation:
//! - Fixed-point arithmetic (scale 16384, bit-exact across platforms)
//! - Enemy stat and reward scaling over endless cycles
//! - Wave composition from pillar, tier and cycle state
//! - Boss phase selection by remaining HP
//! - Fortress XP curve, level rewards and unlock predicates
//! - Synergy tag aggregation across heroes, turrets and perks
//! - Crystal, material and artifact drops from an injected random stream
//! - Class mastery trees with per-class point ledgers
//! - Tick-loop facade bound to one balance configuration

pub mod boss;
pub mod config;
pub mod constants;
pub mod content;
pub mod drops;
pub mod engine;
pub mod error;
pub mod fixed;
pub mod logging;
pub mod mastery;
pub mod progression;
pub mod rng;
pub mod scaling;
pub mod synergy;
pub mod waves;

pub use config::BalanceConfig;
pub use engine::BalanceEngine;
pub use error::{ConfigError, MasteryError};
pub use fixed::Fp;
pub use rng::{RandomSource, SeededRandom};
