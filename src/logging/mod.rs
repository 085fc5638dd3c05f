//! Structured Logging & Tracing
//!
//! Provides structured logging via the `tracing` crate with:
//! - Level-based filtering (TRACE/DEBUG/INFO/WARN/ERROR)
//! - Per-module filters for the balance core
//! - Spans for timing bulk operations (wave previews, level tables)
//! - Idempotent initialization (safe to call from tests and hosts alike)
//!
//! The pure balance functions stay silent apart from warnings on clamped
//! drop input; the [`crate::engine`] facade and config loading do the logging.

use serde::{Deserialize, Serialize};
use std::sync::Once;
use tracing_subscriber::EnvFilter;

/// Log level for the balance core
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Configuration for tracing initialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TracingConfig {
    pub default_level: LogLevel,
    pub module_filters: Vec<(String, LogLevel)>,
    pub show_targets: bool,
    pub show_thread_ids: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            default_level: LogLevel::Info,
            module_filters: vec![
                ("balance_core::engine".to_string(), LogLevel::Info),
                ("balance_core::config".to_string(), LogLevel::Info),
                ("balance_core::drops".to_string(), LogLevel::Warn),
            ],
            show_targets: true,
            show_thread_ids: false,
        }
    }
}

impl TracingConfig {
    pub fn to_env_filter_string(&self) -> String {
        let mut parts = vec![self.default_level.as_str().to_string()];
        for (module, level) in &self.module_filters {
            parts.push(format!("{}={}", module, level.as_str()));
        }
        parts.join(",")
    }
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing with default settings (idempotent)
pub fn init_tracing_default() {
    init_tracing(&TracingConfig::default());
}

/// Initialize tracing with a custom config (first call wins).
/// `RUST_LOG` overrides the configured filters when set.
pub fn init_tracing(config: &TracingConfig) {
    let filter_str = config.to_env_filter_string();
    let show_targets = config.show_targets;
    let show_thread_ids = config.show_thread_ids;
    TRACING_INIT.call_once(move || {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(show_targets)
            .with_thread_ids(show_thread_ids)
            .compact();

        // A host may already own the global subscriber
        let _ = subscriber.try_init();
    });
}

/// Span guard for timing a bulk operation
pub struct TimingSpan {
    _span: tracing::span::EnteredSpan,
}

impl TimingSpan {
    pub fn new(name: &str) -> Self {
        let span = tracing::info_span!("operation", name = name);
        Self {
            _span: span.entered(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_as_str() {
        assert_eq!(LogLevel::Trace.as_str(), "trace");
        assert_eq!(LogLevel::Debug.as_str(), "debug");
        assert_eq!(LogLevel::Info.as_str(), "info");
        assert_eq!(LogLevel::Warn.as_str(), "warn");
        assert_eq!(LogLevel::Error.as_str(), "error");
    }

    #[test]
    fn test_env_filter_string() {
        let config = TracingConfig::default();
        let filter = config.to_env_filter_string();
        assert!(filter.starts_with("info"));
        assert!(filter.contains("balance_core::engine=info"));
        assert!(filter.contains("balance_core::drops=warn"));
    }

    #[test]
    fn test_custom_config() {
        let config = TracingConfig {
            default_level: LogLevel::Debug,
            module_filters: vec![("my_module".to_string(), LogLevel::Trace)],
            show_targets: false,
            show_thread_ids: true,
        };
        let filter = config.to_env_filter_string();
        assert!(filter.starts_with("debug"));
        assert!(filter.contains("my_module=trace"));
    }

    #[test]
    fn test_init_tracing_idempotent() {
        init_tracing_default();
        init_tracing_default();
        init_tracing(&TracingConfig::default());
    }

    #[test]
    fn test_timing_span() {
        init_tracing_default();
        let _span = TimingSpan::new("test_operation");
        tracing::debug!("inside span");
    }
}
