//! Analysis configuration
//!
//! The pipeline is driven by an explicit list of datasets, each with the
//! groupings to compute. The configuration can be built in code or read
//! from JSON:
//!
//! ```json
//! {
//!   "datasets": [
//!     {
//!       "path": "ads.csv",
//!       "label": "facebook_ads",
//!       "group_by": [["page_id"], ["page_id", "ad_id"]]
//!     }
//!   ],
//!   "max_groups": 3,
//!   "empty_as_absent": false
//! }
//! ```
//!
//! `max_groups` defaults to [`DEFAULT_MAX_GROUPS`]; `null` means no limit.

use std::{collections::HashSet, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    dataset::{LoadOptions, normalize_column_name},
    grouping::grouping_name,
};

/// Default number of groups shown and exported per grouping.
pub const DEFAULT_MAX_GROUPS: usize = 3;

#[expect(clippy::unnecessary_wraps)]
fn default_max_groups() -> Option<usize> {
    Some(DEFAULT_MAX_GROUPS)
}

/// One input file and the groupings to compute over it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSpec {
    pub path: PathBuf,
    /// Top-level key of this dataset in the report
    pub label: String,
    /// Each entry is one grouping: the list of key fields
    #[serde(default)]
    pub group_by: Vec<Vec<String>>,
}

impl DatasetSpec {
    /// Creates an entry for `path`, labelled with its file stem.
    ///
    /// # Examples
    ///
    /// ```
    /// use colstats_analysis::config::DatasetSpec;
    ///
    /// let spec = DatasetSpec::from_path("data/ads_2024.csv");
    /// assert_eq!(spec.label, "ads_2024");
    /// assert!(spec.group_by.is_empty());
    /// ```
    #[must_use]
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let label = path.file_stem().map_or_else(
            || path.display().to_string(),
            |stem| stem.to_string_lossy().into_owned(),
        );
        Self {
            path,
            label,
            group_by: vec![],
        }
    }
}

/// Invalid configuration.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("no datasets to analyze")]
    NoDatasets,
    #[display("dataset label '{label}' is used more than once")]
    DuplicateLabel { label: String },
    #[display("dataset '{label}' has a grouping with no fields")]
    EmptyGrouping { label: String },
    #[display("dataset '{label}' requests grouping '{name}' more than once")]
    DuplicateGrouping { label: String, name: String },
}

/// Datasets to analyze and report options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub datasets: Vec<DatasetSpec>,
    /// Groups shown and exported per grouping; `None` for all of them
    #[serde(default = "default_max_groups")]
    pub max_groups: Option<usize>,
    /// Store blank cells as absent instead of empty text
    #[serde(default)]
    pub empty_as_absent: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            datasets: vec![],
            max_groups: default_max_groups(),
            empty_as_absent: false,
        }
    }
}

impl AnalysisConfig {
    /// Checks that there is something to do, that labels are unique, and
    /// that no two groupings of a dataset share a report name.
    ///
    /// Grouping names are compared after field normalization, so
    /// `["Page_ID"]` duplicates `["page_id"]`, and `["a_b"]` duplicates
    /// `["a", "b"]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.datasets.is_empty() {
            return Err(ConfigError::NoDatasets);
        }
        let mut labels = HashSet::new();
        for spec in &self.datasets {
            if !labels.insert(spec.label.as_str()) {
                return Err(ConfigError::DuplicateLabel {
                    label: spec.label.clone(),
                });
            }
            if spec.group_by.iter().any(Vec::is_empty) {
                return Err(ConfigError::EmptyGrouping {
                    label: spec.label.clone(),
                });
            }
            let mut names = HashSet::new();
            for fields in &spec.group_by {
                let fields = fields
                    .iter()
                    .map(|field| normalize_column_name(field))
                    .collect::<Vec<_>>();
                let name = grouping_name(&fields);
                if names.contains(&name) {
                    return Err(ConfigError::DuplicateGrouping {
                        label: spec.label.clone(),
                        name,
                    });
                }
                names.insert(name);
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            empty_as_absent: self.empty_as_absent,
        }
    }
}
