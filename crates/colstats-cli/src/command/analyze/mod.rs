//! Column statistics analysis command
//!
//! Analyzes every dataset given on the command line or listed in a JSON
//! configuration file, prints the statistics as tables and writes the report
//! as JSON.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use colstats_analysis::{
    config::{AnalysisConfig, DatasetSpec},
    pipeline,
};

use crate::util;

mod table;

#[derive(Debug, Clone, Args)]
pub struct AnalyzeArg {
    /// CSV files to analyze
    paths: Vec<PathBuf>,
    /// JSON configuration file listing datasets and their groupings
    #[arg(long)]
    config: Option<PathBuf>,
    /// Report labels for the given files, in order (defaults to file stems)
    #[arg(long, value_delimiter = ',')]
    label: Vec<String>,
    /// Grouping key fields, comma-separated; repeat for several groupings
    #[arg(long = "group-by")]
    group_by: Vec<String>,
    /// Number of groups shown and exported per grouping
    #[arg(long, conflicts_with = "all_groups")]
    max_groups: Option<usize>,
    /// Show and export every group
    #[arg(long)]
    all_groups: bool,
    /// Treat blank cells as absent instead of empty text
    #[arg(long)]
    empty_as_absent: bool,
    /// Output file path for the JSON report (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
    /// Do not print statistics tables
    #[arg(long)]
    quiet: bool,
}

pub(crate) fn run(arg: &AnalyzeArg) -> anyhow::Result<()> {
    let config = build_config(arg)?;

    // Tables would interleave with the JSON report on stdout
    let print_tables = !arg.quiet && arg.output.is_some();
    let outcome = pipeline::run(&config, |analysis| {
        if print_tables {
            table::print_dataset(analysis, config.max_groups);
        }
    });

    util::save_json(&outcome.report, arg.output.as_deref())?;
    if let Some(path) = &arg.output {
        log::info!("Report saved to {}", path.display());
    }

    if !outcome.failures.is_empty() {
        let labels = outcome
            .failures
            .iter()
            .map(|failure| failure.label.as_str())
            .collect::<Vec<_>>();
        anyhow::bail!(
            "{} of {} datasets failed: {}",
            labels.len(),
            config.datasets.len(),
            labels.join(", ")
        );
    }

    Ok(())
}

/// Merges the configuration file (if any) with the command-line datasets and
/// options; command-line options take precedence.
fn build_config(arg: &AnalyzeArg) -> anyhow::Result<AnalysisConfig> {
    let mut config = match &arg.config {
        Some(path) => {
            let mut config: AnalysisConfig = util::read_json("config", path)?;
            let base = path.parent().unwrap_or_else(|| Path::new(""));
            for spec in &mut config.datasets {
                if spec.path.is_relative() {
                    spec.path = base.join(&spec.path);
                }
            }
            config
        }
        None => AnalysisConfig::default(),
    };

    if arg.label.len() > arg.paths.len() {
        anyhow::bail!(
            "{} labels given for {} files",
            arg.label.len(),
            arg.paths.len()
        );
    }

    let group_by = arg
        .group_by
        .iter()
        .map(|fields| parse_fields(fields))
        .collect::<Vec<_>>();
    for (i, path) in arg.paths.iter().enumerate() {
        let mut spec = DatasetSpec::from_path(path);
        if let Some(label) = arg.label.get(i) {
            spec.label.clone_from(label);
        }
        spec.group_by.clone_from(&group_by);
        config.datasets.push(spec);
    }

    if arg.all_groups {
        config.max_groups = None;
    } else if let Some(max_groups) = arg.max_groups {
        config.max_groups = Some(max_groups);
    }
    if arg.empty_as_absent {
        config.empty_as_absent = true;
    }

    config
        .validate()
        .context("Invalid analysis configuration")?;
    Ok(config)
}

fn parse_fields(fields: &str) -> Vec<String> {
    fields
        .split(',')
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .map(str::to_owned)
        .collect()
}
