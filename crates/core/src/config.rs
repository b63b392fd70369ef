//! Board configuration
//!
//! [`BoardConfig`] carries grid geometry, capacity, merge policy, palette size
//! and pipeline timings. It loads from JSON (camelCase keys, unknown keys
//! rejected) and from `HEXA_*` environment variables, and is validated before a
//! board is built.
//!
//! # Environment Variables
//!
//! - `HEXA_CONFIG`: path to a JSON config file (applied first)
//! - `HEXA_GRID_ROWS`, `HEXA_GRID_COLS`, `HEXA_HEX_RADIUS`
//! - `HEXA_MAX_STACK_HEIGHT`, `HEXA_MERGE_THRESHOLD`, `HEXA_MERGE_LIMIT`
//! - `HEXA_COLOR_COUNT`, `HEXA_AUTO_MERGE_INTERVAL_MS`, `HEXA_MERGE_REWARD`
//!
//! # Example
//!
//! ```
//! use hexa_stack_core::BoardConfig;
//!
//! let config = BoardConfig::from_json_str(r#"{ "mergeThreshold": 4, "mergeLimit": 1 }"#).unwrap();
//! assert_eq!(config.merge_threshold, 4);
//! assert_eq!(config.grid_rows, 5);
//!
//! // A threshold above slot capacity can never fire.
//! assert!(BoardConfig::from_json_str(r#"{ "mergeThreshold": 7 }"#).is_err());
//! ```

use std::env;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::{
    AUTO_MERGE_INTERVAL_MS, COLOR_COUNT, DOCK_COUNT, DOCK_REFILL_DELAY_MS, GRID_COLS, GRID_ROWS,
    HEX_RADIUS, MAX_STACK_HEIGHT, MERGE_CLEAR_MS, MERGE_LIMIT, MERGE_REWARD, MERGE_THRESHOLD,
    PALETTE_SIZE, RECHECK_DELAY_MS, SETTLE_MS,
};

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid value for {key}: {value:?}")]
    InvalidEnv { key: &'static str, value: String },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Recognized board options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct BoardConfig {
    pub grid_rows: u16,
    pub grid_cols: u16,
    pub hex_radius: f32,
    pub max_stack_height: u16,
    pub merge_threshold: u16,
    pub merge_limit: u32,
    pub color_count: u8,
    pub auto_merge_interval_ms: u32,
    pub merge_reward: u32,
    pub dock_count: u16,
    pub settle_ms: u32,
    pub merge_clear_ms: u32,
    pub recheck_delay_ms: u32,
    pub dock_refill_delay_ms: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            grid_rows: GRID_ROWS,
            grid_cols: GRID_COLS,
            hex_radius: HEX_RADIUS,
            max_stack_height: MAX_STACK_HEIGHT,
            merge_threshold: MERGE_THRESHOLD,
            merge_limit: MERGE_LIMIT,
            color_count: COLOR_COUNT,
            auto_merge_interval_ms: AUTO_MERGE_INTERVAL_MS,
            merge_reward: MERGE_REWARD,
            dock_count: DOCK_COUNT,
            settle_ms: SETTLE_MS,
            merge_clear_ms: MERGE_CLEAR_MS,
            recheck_delay_ms: RECHECK_DELAY_MS,
            dock_refill_delay_ms: DOCK_REFILL_DELAY_MS,
        }
    }
}

impl BoardConfig {
    /// Parse and validate a JSON document. Missing keys keep their defaults.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Build from `HEXA_CONFIG` plus per-field `HEXA_*` overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match env::var("HEXA_CONFIG") {
            Ok(path) if !path.trim().is_empty() => {
                log::debug!("loading board config from {}", path.trim());
                Self::from_json_file(path.trim())?
            }
            _ => Self::default(),
        };
        config.apply_overrides(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `HEXA_*` overrides from an arbitrary lookup.
    ///
    /// Blank values are ignored; unparsable values are an error.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        override_field(&lookup, "HEXA_GRID_ROWS", &mut self.grid_rows)?;
        override_field(&lookup, "HEXA_GRID_COLS", &mut self.grid_cols)?;
        override_field(&lookup, "HEXA_HEX_RADIUS", &mut self.hex_radius)?;
        override_field(&lookup, "HEXA_MAX_STACK_HEIGHT", &mut self.max_stack_height)?;
        override_field(&lookup, "HEXA_MERGE_THRESHOLD", &mut self.merge_threshold)?;
        override_field(&lookup, "HEXA_MERGE_LIMIT", &mut self.merge_limit)?;
        override_field(&lookup, "HEXA_COLOR_COUNT", &mut self.color_count)?;
        override_field(
            &lookup,
            "HEXA_AUTO_MERGE_INTERVAL_MS",
            &mut self.auto_merge_interval_ms,
        )?;
        override_field(&lookup, "HEXA_MERGE_REWARD", &mut self.merge_reward)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| -> Result<(), ConfigError> {
            log::warn!("rejecting board config: {}", msg);
            Err(ConfigError::Invalid(msg))
        };

        if self.grid_rows == 0 || self.grid_cols == 0 {
            return invalid(format!(
                "grid must have at least one slot (got {}x{})",
                self.grid_rows, self.grid_cols
            ));
        }
        if !self.hex_radius.is_finite() || self.hex_radius <= 0.0 {
            return invalid(format!("hexRadius must be positive (got {})", self.hex_radius));
        }
        if self.max_stack_height == 0 {
            return invalid("maxStackHeight must be at least 1".to_string());
        }
        if self.merge_threshold < 2 {
            return invalid(format!(
                "mergeThreshold must be at least 2 (got {})",
                self.merge_threshold
            ));
        }
        if self.merge_threshold > self.max_stack_height {
            return invalid(format!(
                "mergeThreshold {} exceeds maxStackHeight {}; no stack could ever merge",
                self.merge_threshold, self.max_stack_height
            ));
        }
        if self.merge_limit == 0 {
            return invalid("mergeLimit must be at least 1".to_string());
        }
        // A single color would make every opening stack mergeable.
        if self.color_count < 2 || self.color_count as usize > PALETTE_SIZE {
            return invalid(format!(
                "colorCount must be within 2..={} (got {})",
                PALETTE_SIZE, self.color_count
            ));
        }
        if self.dock_count == 0 {
            return invalid("dockCount must be at least 1".to_string());
        }
        if self.auto_merge_interval_ms == 0 {
            return invalid("autoMergeIntervalMs must be positive".to_string());
        }
        Ok(())
    }

    pub fn slot_count(&self) -> usize {
        self.grid_rows as usize * self.grid_cols as usize
    }

    pub fn max_height(&self) -> usize {
        self.max_stack_height as usize
    }

    pub fn threshold(&self) -> usize {
        self.merge_threshold as usize
    }

    /// Drop radius around a slot center (2 x hex radius)
    pub fn capture_radius(&self) -> f32 {
        self.hex_radius * 2.0
    }

    /// Exclusive center-distance band for adjacent slots
    ///
    /// Adjacent hex centers sit `sqrt(3) * r` apart, inside `(4r/3, 2r)`.
    pub fn neighbor_band(&self) -> (f32, f32) {
        (self.hex_radius * 4.0 / 3.0, self.hex_radius * 2.0)
    }
}

fn override_field<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    field: &mut T,
) -> Result<(), ConfigError> {
    let Some(raw) = lookup(key) else {
        return Ok(());
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(());
    }
    *field = trimmed
        .parse()
        .map_err(|_| ConfigError::InvalidEnv { key, value: raw.clone() })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k: &str| map.get(k).cloned()
    }

    #[test]
    fn defaults_match_reference_layout() {
        let config = BoardConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.slot_count(), 25);
        assert_eq!(config.max_height(), 6);
        assert_eq!(config.threshold(), 3);
        assert!((config.capture_radius() - 1.2).abs() < 1e-6);

        let (lo, hi) = config.neighbor_band();
        assert!((lo - 0.8).abs() < 1e-6);
        assert!((hi - 1.2).abs() < 1e-6);
    }

    #[test]
    fn json_accepts_partial_documents() {
        let config = BoardConfig::from_json_str(r#"{"gridRows": 3, "colorCount": 5}"#).unwrap();
        assert_eq!(config.grid_rows, 3);
        assert_eq!(config.grid_cols, GRID_COLS);
        assert_eq!(config.color_count, 5);
    }

    #[test]
    fn json_rejects_unknown_options() {
        let err = BoardConfig::from_json_str(r#"{"mergeCount": 7}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn threshold_above_capacity_is_rejected() {
        let config = BoardConfig {
            merge_threshold: 7,
            max_stack_height: 6,
            ..BoardConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let bad = [
            BoardConfig { grid_rows: 0, ..BoardConfig::default() },
            BoardConfig { hex_radius: 0.0, ..BoardConfig::default() },
            BoardConfig { hex_radius: f32::NAN, ..BoardConfig::default() },
            BoardConfig { merge_threshold: 1, ..BoardConfig::default() },
            BoardConfig { merge_limit: 0, ..BoardConfig::default() },
            BoardConfig { color_count: 0, ..BoardConfig::default() },
            BoardConfig { color_count: 1, ..BoardConfig::default() },
            BoardConfig { color_count: 8, ..BoardConfig::default() },
            BoardConfig { dock_count: 0, ..BoardConfig::default() },
            BoardConfig { auto_merge_interval_ms: 0, ..BoardConfig::default() },
        ];
        for config in bad {
            assert!(config.validate().is_err(), "{:?}", config);
        }
    }

    #[test]
    fn overrides_apply_and_ignore_blank_values() {
        let mut config = BoardConfig::default();
        config
            .apply_overrides(lookup_from(&[
                ("HEXA_MERGE_THRESHOLD", "5"),
                ("HEXA_HEX_RADIUS", " 1.5 "),
                ("HEXA_MERGE_LIMIT", ""),
            ]))
            .unwrap();

        assert_eq!(config.merge_threshold, 5);
        assert_eq!(config.hex_radius, 1.5);
        assert_eq!(config.merge_limit, MERGE_LIMIT);
    }

    #[test]
    fn overrides_reject_garbage() {
        let mut config = BoardConfig::default();
        let err = config
            .apply_overrides(lookup_from(&[("HEXA_GRID_ROWS", "five")]))
            .unwrap_err();
        match err {
            ConfigError::InvalidEnv { key, value } => {
                assert_eq!(key, "HEXA_GRID_ROWS");
                assert_eq!(value, "five");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"maxStackHeight": 8, "mergeThreshold": 7}}"#).unwrap();

        let config = BoardConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.max_stack_height, 8);
        assert_eq!(config.merge_threshold, 7);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = BoardConfig::from_json_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
