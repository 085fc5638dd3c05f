//! Class Mastery System
//!
//! Permanent per-class upgrades bought with mastery points:
//! - Each class keeps a ledger of points spent and nodes unlocked
//! - A node needs its prerequisites, enough points already spent in the
//!   class for its tier, and enough available points
//! - Every operation takes progress by reference and returns a new value

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::MasteryConfig;
use crate::content::{FortressClass, MasteryEffect, MasteryNode, MasteryTree};
use crate::error::MasteryError;

/// Ledger for one class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassMasteryProgress {
    pub class: FortressClass,
    pub points_spent: u32,
    pub unlocked_nodes: Vec<String>,
}

impl ClassMasteryProgress {
    pub fn new(class: FortressClass) -> Self {
        Self {
            class,
            points_spent: 0,
            unlocked_nodes: Vec::new(),
        }
    }

    pub fn has_node(&self, node_id: &str) -> bool {
        self.unlocked_nodes.iter().any(|n| n == node_id)
    }
}

/// Player's complete mastery profile (persisted by the host as JSON)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerMasteryProgress {
    pub available_points: u32,
    pub classes: BTreeMap<FortressClass, ClassMasteryProgress>,
}

impl PlayerMasteryProgress {
    pub fn new(available_points: u32) -> Self {
        Self {
            available_points,
            classes: BTreeMap::new(),
        }
    }

    pub fn class(&self, class: FortressClass) -> Option<&ClassMasteryProgress> {
        self.classes.get(&class)
    }

    pub fn points_spent(&self, class: FortressClass) -> u32 {
        self.class(class).map(|c| c.points_spent).unwrap_or(0)
    }

    pub fn total_points_spent(&self) -> u32 {
        self.classes
            .values()
            .fold(0u32, |acc, c| acc.saturating_add(c.points_spent))
    }

    pub fn has_node(&self, node_id: &str) -> bool {
        self.classes.values().any(|c| c.has_node(node_id))
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Check every unlock rule; returns the node on success
pub fn check_unlock<'t>(
    config: &MasteryConfig,
    tree: &'t MasteryTree,
    progress: &PlayerMasteryProgress,
    node_id: &str,
) -> Result<&'t MasteryNode, MasteryError> {
    let node = tree
        .get_node(node_id)
        .ok_or_else(|| MasteryError::UnknownNode(node_id.to_string()))?;

    let ledger = progress.class(node.class);
    let has = |id: &str| ledger.is_some_and(|l| l.has_node(id));

    if has(&node.id) {
        return Err(MasteryError::AlreadyUnlocked(node.id.clone()));
    }
    if let Some(missing) = node.prerequisites.iter().find(|p| !has(p)) {
        return Err(MasteryError::MissingPrerequisite {
            node: node.id.clone(),
            missing: missing.clone(),
        });
    }

    let spent = progress.points_spent(node.class);
    let required = config.threshold_for_tier(node.tier);
    if spent < required {
        return Err(MasteryError::TierLocked {
            node: node.id.clone(),
            class: node.class,
            tier: node.tier,
            required,
            spent,
        });
    }
    if progress.available_points < node.cost {
        return Err(MasteryError::InsufficientPoints {
            have: progress.available_points,
            need: node.cost,
        });
    }
    Ok(node)
}

pub fn can_unlock(
    config: &MasteryConfig,
    tree: &MasteryTree,
    progress: &PlayerMasteryProgress,
    node_id: &str,
) -> bool {
    check_unlock(config, tree, progress, node_id).is_ok()
}

/// Spend points on a node. The input progress is left untouched.
pub fn unlock_node(
    config: &MasteryConfig,
    tree: &MasteryTree,
    progress: &PlayerMasteryProgress,
    node_id: &str,
) -> Result<PlayerMasteryProgress, MasteryError> {
    let node = check_unlock(config, tree, progress, node_id)?;

    let mut next = progress.clone();
    next.available_points -= node.cost;
    let ledger = next
        .classes
        .entry(node.class)
        .or_insert_with(|| ClassMasteryProgress::new(node.class));
    ledger.points_spent = ledger.points_spent.saturating_add(node.cost);
    ledger.unlocked_nodes.push(node.id.clone());
    Ok(next)
}

pub fn grant_points(progress: &PlayerMasteryProgress, amount: u32) -> PlayerMasteryProgress {
    PlayerMasteryProgress {
        available_points: progress.available_points.saturating_add(amount),
        ..progress.clone()
    }
}

/// Clear a class ledger and refund everything spent in it
pub fn reset_class(progress: &PlayerMasteryProgress, class: FortressClass) -> PlayerMasteryProgress {
    let mut next = progress.clone();
    if let Some(ledger) = next.classes.remove(&class) {
        next.available_points = next.available_points.saturating_add(ledger.points_spent);
    }
    next
}

/// Collect all effects from unlocked nodes, class by class
pub fn active_effects(tree: &MasteryTree, progress: &PlayerMasteryProgress) -> Vec<MasteryEffect> {
    progress
        .classes
        .values()
        .flat_map(|ledger| &ledger.unlocked_nodes)
        .filter_map(|id| tree.get_node(id))
        .flat_map(|node| node.effects.iter().cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{mastery_tree, Stat};
    use crate::fixed::Fp;

    fn cfg() -> MasteryConfig {
        MasteryConfig::default()
    }

    #[test]
    fn test_unlock_root_node() {
        let tree = mastery_tree();
        let start = PlayerMasteryProgress::new(3);
        assert!(can_unlock(&cfg(), tree, &start, "fire_core"));

        let next = unlock_node(&cfg(), tree, &start, "fire_core").unwrap();
        assert_eq!(next.available_points, 2);
        assert_eq!(next.points_spent(FortressClass::Fire), 1);
        assert!(next.has_node("fire_core"));
        // Copy-on-write
        assert_eq!(start, PlayerMasteryProgress::new(3));
    }

    #[test]
    fn test_unknown_and_already_unlocked() {
        let tree = mastery_tree();
        let start = PlayerMasteryProgress::new(5);
        assert_eq!(
            unlock_node(&cfg(), tree, &start, "fire_nope"),
            Err(MasteryError::UnknownNode("fire_nope".to_string()))
        );
        let next = unlock_node(&cfg(), tree, &start, "ice_core").unwrap();
        assert_eq!(
            unlock_node(&cfg(), tree, &next, "ice_core"),
            Err(MasteryError::AlreadyUnlocked("ice_core".to_string()))
        );
    }

    #[test]
    fn test_missing_prerequisite() {
        let tree = mastery_tree();
        let start = PlayerMasteryProgress::new(10);
        match unlock_node(&cfg(), tree, &start, "fire_focus") {
            Err(MasteryError::MissingPrerequisite { missing, .. }) => {
                assert_eq!(missing, "fire_core")
            }
            other => panic!("expected missing prerequisite, got {:?}", other),
        }
    }

    #[test]
    fn test_prerequisites_are_per_class() {
        let tree = mastery_tree();
        let start = PlayerMasteryProgress::new(10);
        let next = unlock_node(&cfg(), tree, &start, "ice_core").unwrap();
        assert!(!can_unlock(&cfg(), tree, &next, "fire_focus"));
    }

    #[test]
    fn test_tier_locked() {
        let tree = mastery_tree();
        let strict = MasteryConfig {
            tier_thresholds: vec![0, 2, 3, 6, 9],
        };
        let progress = unlock_node(&strict, tree, &PlayerMasteryProgress::new(10), "void_core").unwrap();
        assert_eq!(
            unlock_node(&strict, tree, &progress, "void_focus"),
            Err(MasteryError::TierLocked {
                node: "void_focus".to_string(),
                class: FortressClass::Void,
                tier: 2,
                required: 2,
                spent: 1,
            })
        );
    }

    #[test]
    fn test_insufficient_points() {
        let tree = mastery_tree();
        let progress = unlock_node(&cfg(), tree, &PlayerMasteryProgress::new(2), "tech_core").unwrap();
        assert_eq!(
            unlock_node(&cfg(), tree, &progress, "tech_focus"),
            Err(MasteryError::InsufficientPoints { have: 1, need: 2 })
        );
    }

    #[test]
    fn test_full_tree_costs_sixteen() {
        let tree = mastery_tree();
        let mut progress = PlayerMasteryProgress::new(16);
        for suffix in ["core", "focus", "resilience", "mastery", "ascend", "capstone"] {
            let id = format!("lightning_{}", suffix);
            progress = unlock_node(&cfg(), tree, &progress, &id).unwrap();
        }
        assert_eq!(progress.available_points, 0);
        assert_eq!(progress.points_spent(FortressClass::Lightning), 16);
        assert_eq!(progress.total_points_spent(), 16);
    }

    #[test]
    fn test_grant_and_reset() {
        let tree = mastery_tree();
        let progress = grant_points(&PlayerMasteryProgress::default(), 4);
        assert_eq!(progress.available_points, 4);
        let progress = unlock_node(&cfg(), tree, &progress, "natural_core").unwrap();
        let progress = unlock_node(&cfg(), tree, &progress, "natural_focus").unwrap();
        assert_eq!(progress.available_points, 1);

        let reset = reset_class(&progress, FortressClass::Natural);
        assert_eq!(reset.available_points, 4);
        assert!(reset.class(FortressClass::Natural).is_none());
        // Resetting an untouched class is a no-op
        assert_eq!(reset_class(&reset, FortressClass::Void), reset);
    }

    #[test]
    fn test_active_effects() {
        let tree = mastery_tree();
        let progress = PlayerMasteryProgress::new(5);
        assert!(active_effects(tree, &progress).is_empty());

        let progress = unlock_node(&cfg(), tree, &progress, "fire_core").unwrap();
        let effects = active_effects(tree, &progress);
        assert_eq!(
            effects,
            vec![MasteryEffect::StatBonus {
                stat: Stat::Damage,
                value: Fp::from_ratio(5, 100),
                is_percent: true,
            }]
        );
    }

    #[test]
    fn test_json_roundtrip() {
        let tree = mastery_tree();
        let progress = unlock_node(&cfg(), tree, &PlayerMasteryProgress::new(3), "ice_core").unwrap();
        let json = progress.to_json();
        assert!(json.contains("ice_core"));
        assert_eq!(PlayerMasteryProgress::from_json(&json).unwrap(), progress);
    }
}
