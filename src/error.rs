//! Error types for the few fallible operations in the balance core.
//!
//! Lookups never fail (they return `Option`) and numeric inputs clamp, so
//! only configuration loading and mastery purchases report errors.

use std::path::PathBuf;

use crate::content::FortressClass;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("RON parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),

    #[error("RON serialization error: {0}")]
    RonSerialize(#[from] ron::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported config format: {0:?}")]
    UnsupportedFormat(PathBuf),

    #[error("Invalid config field `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MasteryError {
    #[error("Unknown mastery node: {0}")]
    UnknownNode(String),

    #[error("Mastery node already unlocked: {0}")]
    AlreadyUnlocked(String),

    #[error("Node {node} requires {missing} first")]
    MissingPrerequisite { node: String, missing: String },

    #[error("Node {node} is tier {tier}: {class:?} needs {required} points spent, has {spent}")]
    TierLocked {
        node: String,
        class: FortressClass,
        tier: u8,
        required: u32,
        spent: u32,
    },

    #[error("Insufficient mastery points: have {have}, need {need}")]
    InsufficientPoints { have: u32, need: u32 },
}
