//! Per-column statistics
//!
//! A column's present values are split into two disjoint subsets:
//!
//! - **numeric**: every [`Value::Number`]
//! - **categorical**: every [`Value::Text`]
//!
//! [`Value::Absent`] is excluded from both. Each subset that is non-empty
//! contributes its own group of statistics, so a column with mixed values
//! reports both. `count` covers both subsets and is always present, so a
//! column with no present values reports only `count: 0`.
//!
//! # Examples
//!
//! ```
//! use colstats_analysis::{column::ColumnStats, value::Value};
//!
//! let values = [
//!     Value::Number(1.0),
//!     Value::Text("a".to_owned()),
//!     Value::Number(3.0),
//!     Value::Absent,
//! ];
//! let stats = ColumnStats::from_values(&values);
//!
//! assert_eq!(stats.count, 3);
//! assert_eq!(stats.numeric.as_ref().unwrap().mean, 2.0);
//! assert_eq!(stats.categorical.as_ref().unwrap().most_common, "a");
//! ```

use std::borrow::Borrow;

use colstats_stats::{descriptive::DescriptiveStats, frequency::FrequencyTable};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{dataset::Record, value::Value};

/// Statistics for one column.
///
/// Serializes as a flat object: `count`, then the numeric fields (if any),
/// then the categorical fields (if any).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnStats {
    /// Number of present values, numeric and categorical
    pub count: usize,
    /// Present iff the column has at least one numeric value
    #[serde(flatten)]
    pub numeric: Option<NumericSummary>,
    /// Present iff the column has at least one categorical value
    #[serde(flatten)]
    pub categorical: Option<CategoricalSummary>,
}

/// Statistics over the numeric values of a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    #[serde(with = "crate::float_repr")]
    pub mean: f64,
    /// Sample standard deviation; `0.0` for a single value
    #[serde(rename = "stddev", with = "crate::float_repr")]
    pub std_dev: f64,
    #[serde(with = "crate::float_repr")]
    pub min: f64,
    #[serde(with = "crate::float_repr")]
    pub max: f64,
}

impl From<DescriptiveStats> for NumericSummary {
    fn from(stats: DescriptiveStats) -> Self {
        Self {
            mean: stats.mean,
            std_dev: stats.std_dev,
            min: stats.min,
            max: stats.max,
        }
    }
}

/// Statistics over the categorical values of a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoricalSummary {
    /// Number of distinct values
    pub unique: usize,
    /// Most frequent value; ties go to the value seen first
    pub most_common: String,
    pub most_common_count: usize,
}

impl ColumnStats {
    /// Computes the statistics for one column's values.
    #[must_use]
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Borrow<Value>,
    {
        let mut numbers = vec![];
        let mut categories = FrequencyTable::new();
        for value in values {
            match value.borrow() {
                Value::Number(n) => numbers.push(*n),
                Value::Text(s) => categories.push(s.clone()),
                Value::Absent => {}
            }
        }

        let count = numbers.len() + categories.total();
        let numeric = DescriptiveStats::from_slice(&numbers).map(NumericSummary::from);
        let categorical = categories
            .mode()
            .map(|(most_common, most_common_count)| CategoricalSummary {
                unique: categories.unique(),
                most_common: most_common.clone(),
                most_common_count,
            });

        Self {
            count,
            numeric,
            categorical,
        }
    }
}

/// Statistics for every column of a dataset or group, in column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisResult {
    pub columns: IndexMap<String, ColumnStats>,
}

impl AnalysisResult {
    /// Computes statistics for each of `columns` over `records`.
    ///
    /// Every requested column gets an entry, even when none of the records
    /// has a value for it.
    ///
    /// # Examples
    ///
    /// ```
    /// use colstats_analysis::{column::AnalysisResult, dataset::Record, value::Value};
    ///
    /// let records = [
    ///     Record::from_iter([("cost", Value::Number(1.0))]),
    ///     Record::from_iter([("cost", Value::Number(3.0))]),
    /// ];
    /// let result = AnalysisResult::from_records(&["cost".to_owned()], &records);
    ///
    /// let cost = result.get("cost").unwrap();
    /// assert_eq!(cost.count, 2);
    /// assert_eq!(cost.numeric.as_ref().unwrap().mean, 2.0);
    /// ```
    #[must_use]
    pub fn from_records<R>(columns: &[String], records: &[R]) -> Self
    where
        R: Borrow<Record>,
    {
        let columns = columns
            .iter()
            .map(|column| {
                let values = records.iter().map(|record| record.borrow().get(column));
                (column.clone(), ColumnStats::from_values(values))
            })
            .collect();
        Self { columns }
    }

    #[must_use]
    pub fn get(&self, column: &str) -> Option<&ColumnStats> {
        self.columns.get(column)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColumnStats)> + '_ {
        self.columns.iter().map(|(k, v)| (k.as_str(), v))
    }
}
