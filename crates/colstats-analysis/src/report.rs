//! Serializable report tree
//!
//! The report is the exported form of the analysis:
//!
//! ```json
//! {
//!   "facebook_ads": {
//!     "overall": { "cost": { "count": 3, "mean": 3.0, ... } },
//!     "grouped_by_page_id": {
//!       "('x',)": { "cost": { "count": 2, "mean": 2.0, ... } },
//!       "('y',)": { "cost": { "count": 1, "mean": 5.0, ... } }
//!     }
//!   }
//! }
//! ```
//!
//! Group keys are rendered with [`GroupKey`](crate::grouping::GroupKey)'s
//! `Display` implementation, since JSON objects only have string keys.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::column::AnalysisResult;

/// Exported statistics of one dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetReport {
    /// Statistics over all records
    pub overall: AnalysisResult,
    /// Grouping name (`grouped_by_...`) to rendered group key to statistics
    #[serde(flatten)]
    pub groupings: IndexMap<String, IndexMap<String, AnalysisResult>>,
}

/// Exported statistics of every dataset, keyed by dataset label.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Report {
    pub datasets: IndexMap<String, DatasetReport>,
}

impl Report {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a dataset, replacing any previous one with the same label.
    pub fn insert(&mut self, label: impl Into<String>, dataset: DatasetReport) {
        self.datasets.insert(label.into(), dataset);
    }

    #[must_use]
    pub fn get(&self, label: &str) -> Option<&DatasetReport> {
        self.datasets.get(label)
    }
}
