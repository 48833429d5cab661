use crate::rules::PriorityTier;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const DEFAULT_ESCALATION_CAP: u8 = 2;
const DEFAULT_SMALL_SLAM_THRESHOLD: u8 = 33;
const DEFAULT_SAMPLES: usize = 64;
const DEFAULT_TIMEOUT_MS: u64 = 250;
const DEFAULT_SLAM_MARGIN: f32 = 1.5;
const DEFAULT_DOUBLE_MARGIN: f32 = 1.0;
const DEFAULT_WIDE_RANGE_WIDTH: u8 = 10;
const DEFAULT_WIDE_RANGE_BIAS: f32 = 0.25;

/// Engine tuning, loaded from YAML. Every block has defaults, so an empty
/// document is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub priorities: PriorityTable,
    pub legality: LegalityConfig,
    pub sanity: SanityConfig,
    pub conflict: ConflictConfig,
    pub belief: BeliefConfig,
}

impl EngineConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|source| ConfigError::Read {
            source,
            path: path.clone(),
        })?;
        let config: EngineConfig = serde_yaml::from_reader(BufReader::new(file)).map_err(
            |source| ConfigError::Parse {
                source,
                path: path.clone(),
            },
        )?;
        config
            .validate()
            .map_err(|source| ConfigError::Invalid { path, source })?;
        Ok(config)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let path = PathBuf::from("<inline>");
        let config: EngineConfig =
            serde_yaml::from_str(yaml).map_err(|source| ConfigError::Parse {
                source,
                path: path.clone(),
            })?;
        config
            .validate()
            .map_err(|source| ConfigError::Invalid { path, source })?;
        Ok(config)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.sanity.validate()?;
        self.conflict.validate()?;
        self.belief.validate()?;
        Ok(())
    }
}

/// Priority per tier. Higher wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PriorityTable {
    pub artificial: i32,
    pub constructive: i32,
    pub invitational: i32,
    pub competitive: i32,
}

impl Default for PriorityTable {
    fn default() -> Self {
        Self {
            artificial: 400,
            constructive: 300,
            invitational: 200,
            competitive: 100,
        }
    }
}

impl PriorityTable {
    pub fn priority(&self, tier: PriorityTier) -> i32 {
        match tier {
            PriorityTier::Artificial => self.artificial,
            PriorityTier::Constructive => self.constructive,
            PriorityTier::Invitational => self.invitational,
            PriorityTier::Competitive => self.competitive,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LegalityConfig {
    /// A same-strain correction must stay strictly below the proposed level
    /// plus this many levels.
    pub escalation_cap: u8,
}

impl Default for LegalityConfig {
    fn default() -> Self {
        Self {
            escalation_cap: DEFAULT_ESCALATION_CAP,
        }
    }
}

/// One row of the safe-level table: from `min_combined` HCP upwards the
/// partnership may bid up to `max_level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafeLevel {
    pub min_combined: u8,
    pub max_level: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SanityConfig {
    pub safe_levels: Vec<SafeLevel>,
    pub small_slam_threshold: u8,
}

impl Default for SanityConfig {
    fn default() -> Self {
        let safe_levels = [(0, 2), (20, 3), (26, 4), (29, 5), (33, 6), (37, 7)]
            .into_iter()
            .map(|(min_combined, max_level)| SafeLevel {
                min_combined,
                max_level,
            })
            .collect();
        Self {
            safe_levels,
            small_slam_threshold: DEFAULT_SMALL_SLAM_THRESHOLD,
        }
    }
}

impl SanityConfig {
    /// Highest level allowed for a combined estimate.
    pub fn max_safe_level(&self, combined: u8) -> u8 {
        self.safe_levels
            .iter()
            .filter(|row| row.min_combined <= combined)
            .map(|row| row.max_level)
            .last()
            .unwrap_or(1)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.safe_levels.is_empty() {
            return Err(ValidationError::InvalidField {
                field: "sanity.safe_levels".to_string(),
                message: "table must have at least one row".to_string(),
            });
        }
        for pair in self.safe_levels.windows(2) {
            if pair[1].min_combined <= pair[0].min_combined || pair[1].max_level < pair[0].max_level
            {
                return Err(ValidationError::InvalidField {
                    field: "sanity.safe_levels".to_string(),
                    message: "rows must be strictly increasing in min_combined and non-decreasing in max_level".to_string(),
                });
            }
        }
        if let Some(row) = self
            .safe_levels
            .iter()
            .find(|row| !(1..=7).contains(&row.max_level))
        {
            return Err(ValidationError::InvalidField {
                field: "sanity.safe_levels".to_string(),
                message: format!("max_level {} is outside 1..=7", row.max_level),
            });
        }
        if self.small_slam_threshold > 37 {
            return Err(ValidationError::InvalidField {
                field: "sanity.small_slam_threshold".to_string(),
                message: "threshold is above the 37 HCP maximum".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConflictConfig {
    pub samples: usize,
    pub timeout_ms: u64,
    /// Tricks a slam may fall short by before it is downgraded.
    pub slam_margin: f32,
    /// Extra defensive tricks required before substituting a penalty double.
    pub double_margin: f32,
}

impl Default for ConflictConfig {
    fn default() -> Self {
        Self {
            samples: DEFAULT_SAMPLES,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            slam_margin: DEFAULT_SLAM_MARGIN,
            double_margin: DEFAULT_DOUBLE_MARGIN,
        }
    }
}

impl ConflictConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_ms == 0 {
            return Err(ValidationError::InvalidField {
                field: "conflict.timeout_ms".to_string(),
                message: "timeout must be greater than zero".to_string(),
            });
        }
        for (field, value) in [
            ("conflict.slam_margin", self.slam_margin),
            ("conflict.double_margin", self.double_margin),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ValidationError::InvalidField {
                    field: field.to_string(),
                    message: format!("margin must be a non-negative number, got {value}"),
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BeliefConfig {
    /// Ranges wider than this are not trusted at their midpoint.
    pub wide_range_width: u8,
    /// Fraction of a wide range's width added to its minimum.
    pub wide_range_bias: f32,
}

impl Default for BeliefConfig {
    fn default() -> Self {
        Self {
            wide_range_width: DEFAULT_WIDE_RANGE_WIDTH,
            wide_range_bias: DEFAULT_WIDE_RANGE_BIAS,
        }
    }
}

impl BeliefConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if !(0.0..=1.0).contains(&self.wide_range_bias) {
            return Err(ValidationError::InvalidField {
                field: "belief.wide_range_bias".to_string(),
                message: format!("bias must be within 0..=1, got {}", self.wide_range_bias),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid config {path}: {source}")]
    Invalid {
        #[source]
        source: ValidationError,
        path: PathBuf,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = EngineConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn defaults_round_trip_through_yaml() {
        let yaml = serde_yaml::to_string(&EngineConfig::default()).unwrap();
        let parsed = EngineConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed, EngineConfig::default());
    }

    #[test]
    fn shipped_defaults_match() {
        let config = EngineConfig::from_path("../../config/default.yaml").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = EngineConfig::from_path("../../config/missing.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn partial_override() {
        let config = EngineConfig::from_yaml_str(
            "legality:\n  escalation_cap: 1\nconflict:\n  samples: 8\n",
        )
        .unwrap();
        assert_eq!(config.legality.escalation_cap, 1);
        assert_eq!(config.conflict.samples, 8);
        assert_eq!(config.conflict.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert_eq!(config.priorities, PriorityTable::default());
    }

    #[test]
    fn safe_level_lookup() {
        let sanity = SanityConfig::default();
        assert_eq!(sanity.max_safe_level(0), 2);
        assert_eq!(sanity.max_safe_level(19), 2);
        assert_eq!(sanity.max_safe_level(20), 3);
        assert_eq!(sanity.max_safe_level(24), 3);
        assert_eq!(sanity.max_safe_level(26), 4);
        assert_eq!(sanity.max_safe_level(32), 5);
        assert_eq!(sanity.max_safe_level(33), 6);
        assert_eq!(sanity.max_safe_level(40), 7);
    }

    #[test]
    fn rejects_unsorted_table() {
        let err = EngineConfig::from_yaml_str(
            "sanity:\n  safe_levels:\n    - {min_combined: 20, max_level: 3}\n    - {min_combined: 10, max_level: 4}\n",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn rejects_bad_bias_and_unknown_fields() {
        let err = EngineConfig::from_yaml_str("belief:\n  wide_range_bias: 1.5\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
        let err = EngineConfig::from_yaml_str("surprise: true\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn tier_priorities_are_ordered() {
        let table = PriorityTable::default();
        assert!(table.priority(PriorityTier::Artificial) > table.priority(PriorityTier::Constructive));
        assert!(
            table.priority(PriorityTier::Constructive) > table.priority(PriorityTier::Invitational)
        );
        assert!(
            table.priority(PriorityTier::Invitational) > table.priority(PriorityTier::Competitive)
        );
    }
}
