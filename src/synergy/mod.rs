//! Synergy Tag Aggregator
//!
//! Heroes, turrets and perks each carry capability tags. Counting tag
//! occurrences across a roster activates threshold-gated bonuses; totals
//! are additive per stat, with flat and percent parts kept apart.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::content::{normalize_id, synergy_bonuses, tags_for, IdKind, Stat, SynergyTag};
use crate::fixed::Fp;

/// A roster as persisted by the host: plain id lists
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    pub heroes: Vec<String>,
    pub turrets: Vec<String>,
    pub perks: Vec<String>,
}

/// One roster entry that supplied a tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagContributor {
    pub kind: IdKind,
    /// Canonical id (legacy aliases resolved)
    pub id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActiveTagSynergy {
    pub bonus_id: &'static str,
    pub tag: SynergyTag,
    pub count: u32,
    pub required_count: u32,
    pub is_active: bool,
}

impl ActiveTagSynergy {
    /// One more contributor would activate this bonus
    pub fn is_almost_active(&self) -> bool {
        self.count.saturating_add(1) == self.required_count
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatTotal {
    pub flat: Fp,
    pub percent: Fp,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SynergyReport {
    pub contributors: BTreeMap<SynergyTag, Vec<TagContributor>>,
    /// One entry per declared bonus, in declaration order
    pub synergies: Vec<ActiveTagSynergy>,
    /// Sum of all active bonus effects per stat
    pub totals: BTreeMap<Stat, StatTotal>,
}

impl SynergyReport {
    pub fn tag_count(&self, tag: SynergyTag) -> u32 {
        self.contributors
            .get(&tag)
            .map(|list| u32::try_from(list.len()).unwrap_or(u32::MAX))
            .unwrap_or(0)
    }

    pub fn active(&self) -> impl Iterator<Item = &ActiveTagSynergy> {
        self.synergies.iter().filter(|s| s.is_active)
    }

    /// Bonuses one contributor short of activating (UI hints)
    pub fn almost_active(&self) -> Vec<&ActiveTagSynergy> {
        self.synergies
            .iter()
            .filter(|s| s.is_almost_active())
            .collect()
    }

    pub fn synergy(&self, bonus_id: &str) -> Option<&ActiveTagSynergy> {
        self.synergies.iter().find(|s| s.bonus_id == bonus_id)
    }

    /// Total for a stat; zero when no active bonus touches it
    pub fn total(&self, stat: Stat) -> StatTotal {
        self.totals.get(&stat).copied().unwrap_or_default()
    }
}

fn collect_contributors(
    contributors: &mut BTreeMap<SynergyTag, Vec<TagContributor>>,
    kind: IdKind,
    ids: &[&str],
) {
    for raw in ids {
        let canonical = normalize_id(kind, raw);
        for tag in tags_for(kind, canonical) {
            contributors.entry(*tag).or_default().push(TagContributor {
                kind,
                id: canonical.to_string(),
            });
        }
    }
}

/// Aggregate tags and bonuses for three id lists. Unknown ids contribute nothing.
pub fn aggregate_synergies(heroes: &[&str], turrets: &[&str], perks: &[&str]) -> SynergyReport {
    let mut contributors = BTreeMap::new();
    collect_contributors(&mut contributors, IdKind::Hero, heroes);
    collect_contributors(&mut contributors, IdKind::Turret, turrets);
    collect_contributors(&mut contributors, IdKind::Perk, perks);

    let mut report = SynergyReport {
        contributors,
        ..SynergyReport::default()
    };

    for bonus in synergy_bonuses() {
        let count = report.tag_count(bonus.tag);
        let is_active = count >= bonus.required_count;
        report.synergies.push(ActiveTagSynergy {
            bonus_id: bonus.id,
            tag: bonus.tag,
            count,
            required_count: bonus.required_count,
            is_active,
        });
        if !is_active {
            continue;
        }
        for effect in bonus.effects {
            let total = report.totals.entry(effect.stat).or_default();
            if effect.is_percent {
                total.percent += effect.value;
            } else {
                total.flat += effect.value;
            }
        }
    }
    report
}

/// [`aggregate_synergies`] over a persisted [`Roster`]
pub fn aggregate_roster(roster: &Roster) -> SynergyReport {
    fn as_strs(ids: &[String]) -> Vec<&str> {
        ids.iter().map(String::as_str).collect()
    }

    aggregate_synergies(
        &as_strs(&roster.heroes),
        &as_strs(&roster.turrets),
        &as_strs(&roster.perks),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pct(p: i64) -> Fp {
        Fp::from_ratio(p, 100)
    }

    #[test]
    fn test_empty_roster() {
        let report = aggregate_synergies(&[], &[], &[]);
        assert!(report.contributors.is_empty());
        assert_eq!(report.active().count(), 0);
        assert_eq!(report.synergies.len(), synergy_bonuses().len());
        assert_eq!(report.total(Stat::Damage), StatTotal::default());
    }

    #[test]
    fn test_threshold_inactive_then_active() {
        // One Fire tag: blazing needs 2
        let report = aggregate_synergies(&["forge"], &[], &[]);
        let blazing = report.synergy("blazing").unwrap();
        assert_eq!(blazing.count, 1);
        assert!(!blazing.is_active);
        assert!(blazing.is_almost_active());

        let report = aggregate_synergies(&["forge"], &["flamer"], &[]);
        let blazing = report.synergy("blazing").unwrap();
        assert_eq!(blazing.count, 2);
        assert!(blazing.is_active);
        assert!(!blazing.is_almost_active());
    }

    #[test]
    fn test_contributors_recorded_per_tag() {
        let report = aggregate_synergies(&["storm"], &["arc"], &["chain_reaction"]);
        let chain = &report.contributors[&SynergyTag::Chain];
        assert_eq!(chain.len(), 3);
        assert_eq!(
            chain[0],
            TagContributor {
                kind: IdKind::Hero,
                id: "storm".to_string()
            }
        );
        assert_eq!(chain[2].kind, IdKind::Perk);
        assert_eq!(report.tag_count(SynergyTag::Lightning), 3);
    }

    #[test]
    fn test_totals_additive_and_split() {
        // Lightning x3 and Chain x3: overcharge + storm_front + conduction
        let report = aggregate_synergies(&["storm"], &["arc"], &["chain_reaction"]);
        let chains = report.total(Stat::ChainTargets);
        assert_eq!(chains.flat, Fp::from_int(2));
        assert_eq!(chains.percent, Fp::ZERO);
        assert_eq!(report.total(Stat::AttackSpeed).percent, pct(15));
    }

    #[test]
    fn test_same_stat_sums_across_tags() {
        // Fire x2 (blazing 10%) and Burn x2 (wildfire 12%)
        let report = aggregate_synergies(&["forge"], &["flamer", "laser"], &[]);
        assert!(report.synergy("blazing").unwrap().is_active);
        assert!(report.synergy("wildfire").unwrap().is_active);
        assert_eq!(report.total(Stat::Damage).percent, pct(10) + pct(12));
    }

    #[test]
    fn test_unknown_ids_ignored_and_aliases_resolved() {
        let legacy = aggregate_synergies(&["iron_suit", "ghost"], &["fire"], &["???"]);
        let canonical = aggregate_synergies(&["forge"], &["flamer"], &[]);
        assert_eq!(legacy, canonical);
        assert_eq!(
            legacy.contributors[&SynergyTag::Fire][0].id,
            "forge".to_string()
        );
    }

    #[test]
    fn test_almost_active_list() {
        let report = aggregate_synergies(&["vanguard"], &[], &[]);
        let ids: Vec<_> = report.almost_active().iter().map(|s| s.bonus_id).collect();
        assert!(ids.contains(&"bulwark"));
        assert!(ids.contains(&"field_medic"));
        assert!(!ids.contains(&"blazing"));
    }

    #[test]
    fn test_aggregate_roster() {
        let roster = Roster {
            heroes: vec!["titan".into(), "vanguard".into()],
            turrets: vec![],
            perks: vec!["fortify".into()],
        };
        let report = aggregate_roster(&roster);
        assert_eq!(report.tag_count(SynergyTag::Tank), 3);
        assert_eq!(report.total(Stat::Armor).flat, Fp::from_int(10));
    }
}
