//! Column statistics for CSV datasets
//!
//! This crate loads delimited files, classifies each column's values as
//! numeric or categorical, computes descriptive statistics over the whole
//! dataset and over groups of records, and shapes the results into a
//! serializable report.
//!
//! # Overview
//!
//! 1. **Load** ([`dataset::Dataset`]): read a CSV file; every cell becomes a
//!    [`value::Value`] (number, lowercased text, or absent)
//! 2. **Aggregate** ([`column::ColumnStats`]): count, mean, sample standard
//!    deviation, min and max over numeric values; distinct count and most
//!    common value over categorical values
//! 3. **Group** ([`grouping::GroupedAnalysis`]): partition records by one or
//!    more key fields and aggregate every column within each group
//! 4. **Report** ([`report::Report`]): exported JSON-ready tree keyed by
//!    dataset label, with a bounded number of groups per grouping
//!
//! [`pipeline::run`] ties these together for a list of datasets described by
//! [`config::AnalysisConfig`].
//!
//! # Examples
//!
//! ```
//! use colstats_analysis::{
//!     dataset::{Dataset, LoadOptions},
//!     pipeline::DatasetAnalysis,
//!     report::Report,
//! };
//!
//! let csv = "page_id,cost,kind\nx,1,video\nx,3,image\ny,5,video\n";
//! let dataset = Dataset::from_reader(csv.as_bytes(), &LoadOptions::default()).unwrap();
//! let analysis = DatasetAnalysis::new("ads", &dataset, &[vec!["page_id".to_owned()]]);
//!
//! let cost = analysis.overall.get("cost").unwrap();
//! assert_eq!(cost.count, 3);
//! assert_eq!(cost.numeric.as_ref().unwrap().mean, 3.0);
//!
//! let kind = analysis.overall.get("kind").unwrap();
//! assert_eq!(kind.categorical.as_ref().unwrap().most_common, "video");
//!
//! let mut report = Report::new();
//! report.insert("ads", analysis.to_report(Some(3)));
//! assert!(report.get("ads").unwrap().groupings.contains_key("grouped_by_page_id"));
//! ```

pub mod column;
pub mod config;
pub mod dataset;
mod float_repr;
pub mod grouping;
pub mod pipeline;
pub mod report;
pub mod value;
