//! Engine configuration with environment overrides.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::consts::{GROUPS_STORAGE_KEY, HISTORY_LIMIT, HISTORY_STORAGE_KEY, MAX_PERSIST_BYTES};

/// Tuning knobs for history depth and persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    /// Maximum retained undo steps, within `1..=HISTORY_LIMIT`.
    pub history_limit: usize,
    /// Encoded history size above which only the present board is saved.
    pub max_persist_bytes: usize,
    /// Storage key for the history record.
    pub history_key: String,
    /// Storage key for the group registry record.
    pub groups_key: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            history_limit: HISTORY_LIMIT,
            max_persist_bytes: MAX_PERSIST_BYTES,
            history_key: HISTORY_STORAGE_KEY.to_owned(),
            groups_key: GROUPS_STORAGE_KEY.to_owned(),
        }
    }
}

impl BoardConfig {
    /// Build config from environment variables, falling back to defaults.
    ///
    /// Optional:
    /// - `PINBOARD_HISTORY_LIMIT`: default 50, clamped to `1..=50`
    /// - `PINBOARD_MAX_PERSIST_BYTES`: default 4 MiB
    /// - `PINBOARD_HISTORY_KEY`: default `freeform-board-history`
    /// - `PINBOARD_GROUPS_KEY`: default `freeform-board-groups`
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            history_limit: env_parse("PINBOARD_HISTORY_LIMIT", defaults.history_limit).clamp(1, HISTORY_LIMIT),
            max_persist_bytes: env_parse("PINBOARD_MAX_PERSIST_BYTES", defaults.max_persist_bytes),
            history_key: env_string("PINBOARD_HISTORY_KEY", defaults.history_key),
            groups_key: env_string("PINBOARD_GROUPS_KEY", defaults.groups_key),
        }
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse::<T>().unwrap_or(default),
        Err(_) => default,
    }
}

fn env_string(key: &str, default: String) -> String {
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw.trim().to_owned(),
        _ => default,
    }
}
