use serde::{Deserialize, Serialize};

/// Fortress class: the damage element a player builds around
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FortressClass {
    Natural,
    Ice,
    Fire,
    Lightning,
    Tech,
    Void,
}

impl FortressClass {
    pub const ALL: [FortressClass; 6] = [
        Self::Natural,
        Self::Ice,
        Self::Fire,
        Self::Lightning,
        Self::Tech,
        Self::Void,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Self::Natural => "natural",
            Self::Ice => "ice",
            Self::Fire => "fire",
            Self::Lightning => "lightning",
            Self::Tech => "tech",
            Self::Void => "void",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|class| class.id() == id)
    }
}

/// Stats that bonuses (synergies, mastery, level rewards) can modify
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stat {
    Damage,
    AttackSpeed,
    Range,
    CritChance,
    MaxHp,
    HpRegen,
    Armor,
    SlowStrength,
    SplashRadius,
    ChainTargets,
    GoldGain,
    DustGain,
    CooldownReduction,
}
