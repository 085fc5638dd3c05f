//! Boss Phase Selector
//!
//! The current phase is derived from HP, never stored. Phases are listed
//! highest threshold first and apply once HP drops to or below the
//! threshold. Firing each phase only once is the caller's job;
//! [`phases_crossed`] reports exactly the phases passed between two readings.

use crate::content::{boss_phases, BossPhase, EnemyType};
use crate::fixed::Fp;

/// HP as an Fp fraction of max HP; 0 when `max_hp` is 0
pub fn hp_fraction(current_hp: u64, max_hp: u64) -> Fp {
    if max_hp == 0 {
        return Fp::ZERO;
    }
    let current = i64::try_from(current_hp.min(max_hp)).unwrap_or(i64::MAX);
    let max = i64::try_from(max_hp).unwrap_or(i64::MAX);
    Fp::from_ratio(current, max)
}

/// First phase (in descending order) whose threshold is at or above
/// `hp_fraction`. `None` above every threshold and for non-boss enemies.
pub fn current_boss_phase(enemy_type: EnemyType, hp_fraction: Fp) -> Option<&'static BossPhase> {
    boss_phases(enemy_type)
        .iter()
        .find(|phase| phase.hp_threshold >= hp_fraction)
}

/// Phases whose threshold lies in `[current, previous)`, highest first.
/// Empty when HP did not drop.
pub fn phases_crossed(
    enemy_type: EnemyType,
    previous_fraction: Fp,
    current_fraction: Fp,
) -> Vec<&'static BossPhase> {
    if current_fraction >= previous_fraction {
        return Vec::new();
    }
    boss_phases(enemy_type)
        .iter()
        .filter(|phase| {
            phase.hp_threshold >= current_fraction && phase.hp_threshold < previous_fraction
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::BossAbility;

    fn pct(p: i64) -> Fp {
        Fp::from_ratio(p, 100)
    }

    #[test]
    fn test_full_hp_has_no_phase() {
        assert!(current_boss_phase(EnemyType::Warlord, Fp::ONE).is_none());
        assert!(current_boss_phase(EnemyType::Warlord, pct(80)).is_none());
    }

    #[test]
    fn test_phase_at_exact_threshold() {
        let phase = current_boss_phase(EnemyType::Warlord, pct(75)).unwrap();
        assert_eq!(phase.hp_threshold, pct(75));
        assert!(matches!(phase.ability, BossAbility::SummonMinions { .. }));
    }

    #[test]
    fn test_first_matching_phase_in_descending_order() {
        // 0.6 sits under 0.75 but above 0.5
        let phase = current_boss_phase(EnemyType::Warlord, pct(60)).unwrap();
        assert_eq!(phase.hp_threshold, pct(75));
        let phase = current_boss_phase(EnemyType::Warlord, pct(10)).unwrap();
        assert_eq!(phase.hp_threshold, pct(75));
    }

    #[test]
    fn test_non_boss_has_no_phase() {
        assert!(current_boss_phase(EnemyType::Thug, Fp::ZERO).is_none());
        assert!(phases_crossed(EnemyType::Thug, Fp::ONE, Fp::ZERO).is_empty());
    }

    #[test]
    fn test_phases_crossed() {
        let crossed = phases_crossed(EnemyType::Warlord, Fp::ONE, pct(40));
        let thresholds: Vec<_> = crossed.iter().map(|p| p.hp_threshold).collect();
        assert_eq!(thresholds, vec![pct(75), pct(50)]);

        let crossed = phases_crossed(EnemyType::Warlord, pct(40), pct(20));
        assert_eq!(crossed.len(), 1);
        assert_eq!(crossed[0].hp_threshold, pct(25));

        // Already at a threshold: it fired on the earlier reading
        assert!(phases_crossed(EnemyType::Warlord, pct(50), pct(45)).is_empty());
        // Healing never re-fires phases
        assert!(phases_crossed(EnemyType::Warlord, pct(20), pct(60)).is_empty());
    }

    #[test]
    fn test_hp_fraction() {
        assert_eq!(hp_fraction(50, 100), Fp::HALF);
        assert_eq!(hp_fraction(0, 0), Fp::ZERO);
        assert_eq!(hp_fraction(500, 100), Fp::ONE);
        assert_eq!(hp_fraction(u64::MAX, u64::MAX), Fp::ONE);
    }
}
