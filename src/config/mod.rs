//! Configuration for cohort building and matching.
//!
//! A study configuration carries the control cohort and the settings used to
//! read the subject table. It is normally loaded from a JSON file:
//!
//! ```json
//! {
//!   "controls": { "C002": 69.21, "C003": 78.05 },
//!   "builder": { "missing_data_marker": "X", "duplicate_policy": "keep_last" }
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::util::safe_read_to_string;
use crate::error::{CohortMatchError, Result};
use crate::models::{Cohort, Sex};

const BUNDLED_CONFIG: &str = include_str!("../../config/default.json");

/// What to do when an identifier repeats within a cohort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Later rows overwrite earlier ones; each repeat is logged and recorded
    #[default]
    KeepLast,
    /// Fail the build on the first repeat
    Reject,
}

/// Column positions in the subject table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnLayout {
    /// Subject identifier column
    pub id: usize,
    /// Relapse flag column
    pub relapse_flag: usize,
    /// Age column
    pub age: usize,
    /// Sex column
    pub sex: usize,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            id: 0,
            relapse_flag: 1,
            age: 2,
            sex: 3,
        }
    }
}

impl ColumnLayout {
    /// Minimum number of fields a row needs
    #[must_use]
    pub fn required_len(&self) -> usize {
        self.id.max(self.relapse_flag).max(self.age).max(self.sex) + 1
    }

    fn validate(&self) -> Result<()> {
        let columns = [self.id, self.relapse_flag, self.age, self.sex];
        for (i, a) in columns.iter().enumerate() {
            if columns[i + 1..].contains(a) {
                return Err(CohortMatchError::ConfigError(format!(
                    "column {a} is assigned to more than one field"
                )));
            }
        }
        Ok(())
    }
}

/// Settings for reading the subject table into cohorts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CohortBuilderConfig {
    /// Rows whose identifier contains this marker are skipped
    pub missing_data_marker: String,
    /// Column positions
    pub columns: ColumnLayout,
    /// Only subjects of this sex enter the case cohorts
    pub sex: Sex,
    /// Handling of repeated identifiers
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for CohortBuilderConfig {
    fn default() -> Self {
        Self {
            missing_data_marker: "X".to_string(),
            columns: ColumnLayout::default(),
            sex: Sex::Male,
            duplicate_policy: DuplicatePolicy::KeepLast,
        }
    }
}

impl CohortBuilderConfig {
    /// Create a new builder for constructing the configuration
    #[must_use]
    pub fn builder() -> CohortBuilderConfigBuilder {
        CohortBuilderConfigBuilder::new()
    }

    /// Check the configuration for values that would silently drop every row
    pub fn validate(&self) -> Result<()> {
        if self.missing_data_marker.is_empty() {
            return Err(CohortMatchError::ConfigError(
                "missing_data_marker must not be empty".to_string(),
            ));
        }
        self.columns.validate()
    }
}

/// Builder for constructing a [`CohortBuilderConfig`]
#[derive(Debug, Clone, Default)]
pub struct CohortBuilderConfigBuilder {
    config: CohortBuilderConfig,
}

impl CohortBuilderConfigBuilder {
    /// Create a new builder with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the missing-data marker
    #[must_use]
    pub fn missing_data_marker(mut self, marker: impl Into<String>) -> Self {
        self.config.missing_data_marker = marker.into();
        self
    }

    /// Set the column layout
    #[must_use]
    pub const fn columns(mut self, columns: ColumnLayout) -> Self {
        self.config.columns = columns;
        self
    }

    /// Set the sex admitted to the case cohorts
    #[must_use]
    pub const fn sex(mut self, sex: Sex) -> Self {
        self.config.sex = sex;
        self
    }

    /// Set the duplicate policy
    #[must_use]
    pub const fn duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.config.duplicate_policy = policy;
        self
    }

    /// Build the configuration
    #[must_use]
    pub fn build(self) -> CohortBuilderConfig {
        self.config
    }
}

/// Complete configuration of a matching study
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StudyConfig {
    /// Control subjects and their ages
    pub controls: Cohort,
    /// Subject table settings
    #[serde(default)]
    pub builder: CohortBuilderConfig,
}

impl StudyConfig {
    /// Create a configuration from a control cohort and builder settings
    #[must_use]
    pub fn new(controls: Cohort, builder: CohortBuilderConfig) -> Self {
        Self { controls, builder }
    }

    /// Configuration shipped with the crate (`config/default.json`)
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_CONFIG)
    }

    /// Parse and validate a configuration from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.builder.validate()?;
        Ok(config)
    }

    /// Load a configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = safe_read_to_string(path, "study configuration")?;
        Self::from_json(&json)
    }

    /// Replace the control cohort with the contents of a JSON file
    pub fn load_controls(&mut self, path: &Path) -> Result<()> {
        let json = safe_read_to_string(path, "control cohort")?;
        self.controls = serde_json::from_str(&json)?;
        Ok(())
    }
}
