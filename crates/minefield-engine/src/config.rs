//! Simulation configuration.

use std::path::Path;

use minefield_index::position::MAX_MINE_DEPTH;
use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Largest accepted `move_rate`.
pub const MAX_MOVE_RATE: i32 = 1024;

/// Tunables for a simulation run.
///
/// Every field has a default, so a configuration file only needs the values it
/// overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Depth of the vessel before the first step, in `0..=52`.
    pub starting_depth: i32,
    /// Depth gained by the vessel at the end of every step, in `1..=52`.
    pub dive_rate: i32,
    /// Horizontal distance covered by one move instruction, in
    /// `0..=MAX_MOVE_RATE`.
    pub move_rate: i32,
    /// Maximum number of instructions on one script line. Must be at least 1.
    pub max_step_instructions: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            starting_depth: 0,
            dive_rate: 1,
            move_rate: 1,
            max_step_instructions: 2,
        }
    }
}

impl SimConfig {
    /// Check that every value is in range.
    pub fn validate(&self) -> Result<(), EngineError> {
        // A vessel above the surface would see ranges past the depth alphabet.
        if !(0..=MAX_MINE_DEPTH).contains(&self.starting_depth) {
            return Err(EngineError::InvalidConfig(format!(
                "starting_depth must be in 0..={MAX_MINE_DEPTH}, got {}",
                self.starting_depth
            )));
        }
        if !(1..=MAX_MINE_DEPTH).contains(&self.dive_rate) {
            return Err(EngineError::InvalidConfig(format!(
                "dive_rate must be in 1..={MAX_MINE_DEPTH}, got {}",
                self.dive_rate
            )));
        }
        if !(0..=MAX_MOVE_RATE).contains(&self.move_rate) {
            return Err(EngineError::InvalidConfig(format!(
                "move_rate must be in 0..={MAX_MOVE_RATE}, got {}",
                self.move_rate
            )));
        }
        if self.max_step_instructions == 0 {
            return Err(EngineError::InvalidConfig(
                "max_step_instructions must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self, EngineError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self, EngineError> {
        let json = std::fs::read_to_string(path).map_err(|source| EngineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        tracing::debug!(path = %path.display(), ?config, "loaded configuration");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config = SimConfig::from_json_str(r#"{ "dive_rate": 3 }"#).unwrap();
        assert_eq!(
            config,
            SimConfig {
                dive_rate: 3,
                ..SimConfig::default()
            }
        );
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        for json in [
            r#"{ "starting_depth": -5 }"#,
            r#"{ "starting_depth": 53 }"#,
            r#"{ "dive_rate": 0 }"#,
            r#"{ "dive_rate": 53 }"#,
            r#"{ "move_rate": -1 }"#,
            r#"{ "move_rate": 2147483647 }"#,
            r#"{ "max_step_instructions": 0 }"#,
        ] {
            let err = SimConfig::from_json_str(json).unwrap_err();
            assert!(matches!(err, EngineError::InvalidConfig(_)), "{json}: {err}");
        }
    }

    #[test]
    fn range_limits_are_inclusive() {
        let config = SimConfig::from_json_str(
            r#"{ "starting_depth": 52, "dive_rate": 52, "move_rate": 1024 }"#,
        )
        .unwrap();
        assert_eq!(config.move_rate, MAX_MOVE_RATE);
        assert!(SimConfig::from_json_str(r#"{ "move_rate": 0 }"#).is_ok());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = SimConfig::from_json_str("{ dive_rate: ").unwrap_err();
        assert!(matches!(err, EngineError::ConfigParse(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = SimConfig::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
