//! Dataset analysis pipeline
//!
//! For each configured dataset: load it, compute overall statistics, compute
//! every requested grouping, then turn the result into a [`DatasetReport`].
//! Datasets are independent; a dataset that fails to load is recorded as a
//! [`DatasetFailure`] and the rest are still analyzed.
//!
//! # Examples
//!
//! ```
//! use colstats_analysis::{
//!     dataset::{Dataset, LoadOptions},
//!     pipeline::DatasetAnalysis,
//! };
//!
//! let csv = "page_id,cost\nx,1\nx,3\ny,5\nz,7\n";
//! let dataset = Dataset::from_reader(csv.as_bytes(), &LoadOptions::default()).unwrap();
//! let analysis = DatasetAnalysis::new("ads", &dataset, &[vec!["page_id".to_owned()]]);
//!
//! // All groups are computed; the report keeps only the first two.
//! assert_eq!(analysis.groupings[0].groups.len(), 3);
//! let report = analysis.to_report(Some(2));
//! assert_eq!(report.groupings["grouped_by_page_id"].len(), 2);
//! ```

use crate::{
    column::AnalysisResult,
    config::{AnalysisConfig, DatasetSpec},
    dataset::{Dataset, LoadError, LoadOptions},
    grouping::GroupedAnalysis,
    report::{DatasetReport, Report},
};

/// Complete statistics of one dataset, before any truncation.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetAnalysis {
    pub label: String,
    /// Normalized column names
    pub columns: Vec<String>,
    pub record_count: usize,
    pub overall: AnalysisResult,
    /// One entry per requested grouping, in request order
    pub groupings: Vec<GroupedAnalysis>,
}

impl DatasetAnalysis {
    /// Computes overall statistics and every grouping in `group_by`.
    #[must_use]
    pub fn new(label: impl Into<String>, dataset: &Dataset, group_by: &[Vec<String>]) -> Self {
        let overall = AnalysisResult::from_records(&dataset.columns, &dataset.records);
        let groupings = group_by
            .iter()
            .map(|fields| GroupedAnalysis::from_dataset(dataset, fields))
            .collect();
        Self {
            label: label.into(),
            columns: dataset.columns.clone(),
            record_count: dataset.records.len(),
            overall,
            groupings,
        }
    }

    /// Builds the exported form, keeping at most `max_groups` groups per
    /// grouping (all of them for `None`).
    #[must_use]
    pub fn to_report(&self, max_groups: Option<usize>) -> DatasetReport {
        let limit = max_groups.unwrap_or(usize::MAX);
        let groupings = self
            .groupings
            .iter()
            .map(|grouping| {
                let groups = grouping
                    .groups
                    .iter()
                    .take(limit)
                    .map(|(key, group)| (key.to_string(), group.stats.clone()))
                    .collect();
                (grouping.name(), groups)
            })
            .collect();
        DatasetReport {
            overall: self.overall.clone(),
            groupings,
        }
    }
}

/// Loads and analyzes one dataset.
pub fn analyze_dataset(
    spec: &DatasetSpec,
    options: &LoadOptions,
) -> Result<DatasetAnalysis, LoadError> {
    log::info!("Loading dataset '{}' from {}", spec.label, spec.path.display());
    let dataset = Dataset::load(&spec.path, options)?;
    log::info!(
        "Loaded {} records with {} columns",
        dataset.records.len(),
        dataset.columns.len()
    );
    Ok(DatasetAnalysis::new(&spec.label, &dataset, &spec.group_by))
}

/// A dataset that could not be analyzed.
#[derive(Debug)]
pub struct DatasetFailure {
    pub label: String,
    pub error: LoadError,
}

/// Result of running the pipeline over every configured dataset.
#[derive(Debug, Default)]
pub struct RunOutcome {
    /// Reports of every dataset that was analyzed
    pub report: Report,
    pub failures: Vec<DatasetFailure>,
}

/// Analyzes every dataset in `config`, in order.
///
/// `on_analysis` is called with each complete analysis before it is
/// truncated into the report, e.g. to print it.
pub fn run<F>(config: &AnalysisConfig, mut on_analysis: F) -> RunOutcome
where
    F: FnMut(&DatasetAnalysis),
{
    let options = config.load_options();
    let mut outcome = RunOutcome::default();

    for spec in &config.datasets {
        match analyze_dataset(spec, &options) {
            Ok(analysis) => {
                on_analysis(&analysis);
                outcome
                    .report
                    .insert(&spec.label, analysis.to_report(config.max_groups));
            }
            Err(error) => {
                log::error!("Failed to analyze dataset '{}': {error}", spec.label);
                outcome.failures.push(DatasetFailure {
                    label: spec.label.clone(),
                    error,
                });
            }
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use std::{io::Write as _, path::Path};

    use super::*;

    const ADS: &str = "\
page_id,ad_id,cost,kind
x,1,1.0,video
x,2,3.0,image
y,1,5.0,video
z,3,7.0,video
";

    fn write_csv(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    fn ads_spec(path: std::path::PathBuf) -> DatasetSpec {
        DatasetSpec {
            path,
            label: "facebook_ads".to_owned(),
            group_by: vec![
                vec!["page_id".to_owned()],
                vec!["page_id".to_owned(), "ad_id".to_owned()],
            ],
        }
    }

    #[test]
    fn test_to_report_truncates_groups_only_in_output() {
        let dataset = Dataset::from_reader(ADS.as_bytes(), &LoadOptions::default()).unwrap();
        let analysis = DatasetAnalysis::new("ads", &dataset, &[vec!["page_id".to_owned()]]);
        assert_eq!(analysis.record_count, 4);
        assert_eq!(analysis.groupings[0].groups.len(), 3);

        let report = analysis.to_report(Some(1));
        let groups = &report.groupings["grouped_by_page_id"];
        assert_eq!(groups.keys().collect::<Vec<_>>(), ["('x',)"]);

        let report = analysis.to_report(None);
        assert_eq!(report.groupings["grouped_by_page_id"].len(), 3);

        let report = analysis.to_report(Some(0));
        assert!(report.groupings["grouped_by_page_id"].is_empty());
    }

    #[test]
    fn test_overall_statistics() {
        let dataset = Dataset::from_reader(ADS.as_bytes(), &LoadOptions::default()).unwrap();
        let analysis = DatasetAnalysis::new("ads", &dataset, &[]);
        let cost = analysis.overall.get("cost").unwrap();
        assert_eq!(cost.count, 4);
        let numeric = cost.numeric.as_ref().unwrap();
        assert_eq!(numeric.mean, 4.0);
        assert_eq!(numeric.min, 1.0);
        assert_eq!(numeric.max, 7.0);

        let kind = analysis.overall.get("kind").unwrap();
        let categorical = kind.categorical.as_ref().unwrap();
        assert_eq!(categorical.unique, 2);
        assert_eq!(categorical.most_common, "video");
        assert_eq!(categorical.most_common_count, 3);
    }

    #[test]
    fn test_run_isolates_failures() {
        let dir = tempfile::tempdir().unwrap();
        let ads = write_csv(dir.path(), "ads.csv", ADS);
        let posts = write_csv(dir.path(), "posts.csv", "post_id,likes\np1,10\np2,20\n");

        let mut posts_spec = DatasetSpec::from_path(&posts);
        posts_spec.group_by = vec![vec!["post_id".to_owned()]];
        let config = AnalysisConfig {
            datasets: vec![
                ads_spec(ads),
                DatasetSpec::from_path(dir.path().join("missing.csv")),
                posts_spec,
            ],
            ..AnalysisConfig::default()
        };

        let mut seen = vec![];
        let outcome = run(&config, |analysis| seen.push(analysis.label.clone()));

        assert_eq!(seen, ["facebook_ads", "posts"]);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].label, "missing");
        assert!(matches!(outcome.failures[0].error, LoadError::Open { .. }));

        let labels = outcome.report.datasets.keys().collect::<Vec<_>>();
        assert_eq!(labels, ["facebook_ads", "posts"]);

        let ads = outcome.report.get("facebook_ads").unwrap();
        let names = ads.groupings.keys().collect::<Vec<_>>();
        assert_eq!(names, ["grouped_by_page_id", "grouped_by_page_id_ad_id"]);
        assert_eq!(ads.groupings["grouped_by_page_id_ad_id"].len(), 3);
    }

    #[test]
    fn test_run_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let ads = write_csv(dir.path(), "ads.csv", ADS);
        let config = AnalysisConfig {
            datasets: vec![ads_spec(ads)],
            max_groups: None,
            ..AnalysisConfig::default()
        };

        let first = serde_json::to_string_pretty(&run(&config, |_| {}).report).unwrap();
        let second = serde_json::to_string_pretty(&run(&config, |_| {}).report).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_report_round_trip_preserves_stats() {
        let dir = tempfile::tempdir().unwrap();
        let ads = write_csv(dir.path(), "ads.csv", ADS);
        let config = AnalysisConfig {
            datasets: vec![ads_spec(ads)],
            max_groups: None,
            ..AnalysisConfig::default()
        };
        let outcome = run(&config, |_| {});

        let json = serde_json::to_string_pretty(&outcome.report).unwrap();
        let back: Report = serde_json::from_str(&json).unwrap();
        assert_eq!(back, outcome.report);

        let cost = back.datasets["facebook_ads"].overall.get("cost").unwrap();
        assert_eq!(cost.count, 4);
        assert_eq!(cost.numeric.as_ref().unwrap().mean, 4.0);
        let kind = back.datasets["facebook_ads"].overall.get("kind").unwrap();
        assert_eq!(kind.categorical.as_ref().unwrap().unique, 2);
    }
}
