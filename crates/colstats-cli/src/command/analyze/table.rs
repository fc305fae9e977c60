//! Column statistics table display
//!
//! Prints the overall statistics of a dataset and the first groups of every
//! grouping as aligned text tables.

use colstats_analysis::{
    column::{AnalysisResult, ColumnStats},
    grouping::GroupedAnalysis,
    pipeline::DatasetAnalysis,
};

const LABEL_WIDTH: usize = 20;
const VALUE_WIDTH: usize = 20;

// column(20) + count(8) + mean/stddev/min/max(4 * 12) + unique(8) + most_common(20) + freq(8) + spaces(8)
const TABLE_WIDTH: usize = 120;

fn print_stats_table_header() {
    println!(
        "  {:<LABEL_WIDTH$} {:>8} {:>12} {:>12} {:>12} {:>12} {:>8} {:<VALUE_WIDTH$} {:>8}",
        "Column", "Count", "Mean", "StdDev", "Min", "Max", "Unique", "MostCommon", "Freq",
    );
}

fn print_stats_table_separator() {
    println!("  {}", "-".repeat(TABLE_WIDTH));
}

fn print_stats_table_row(column: &str, stats: &ColumnStats) {
    let numeric = stats.numeric.as_ref();
    let categorical = stats.categorical.as_ref();
    println!(
        "  {:<LABEL_WIDTH$} {:>8} {:>12} {:>12} {:>12} {:>12} {:>8} {:<VALUE_WIDTH$} {:>8}",
        fit(column, LABEL_WIDTH),
        stats.count,
        format_number(numeric.map(|n| n.mean)),
        format_number(numeric.map(|n| n.std_dev)),
        format_number(numeric.map(|n| n.min)),
        format_number(numeric.map(|n| n.max)),
        format_count(categorical.map(|c| c.unique)),
        categorical.map_or_else(|| "-".to_owned(), |c| fit(&c.most_common, VALUE_WIDTH)),
        format_count(categorical.map(|c| c.most_common_count)),
    );
}

/// Print a formatted column statistics table
pub(super) fn print_stats_table(result: &AnalysisResult) {
    print_stats_table_header();
    print_stats_table_separator();
    for (column, stats) in result.iter() {
        print_stats_table_row(column, stats);
    }
}

fn print_grouping(grouping: &GroupedAnalysis, max_groups: Option<usize>) {
    let total = grouping.groups.len();
    let shown = max_groups.map_or(total, |limit| limit.min(total));

    println!();
    println!(
        "--- {} (showing {shown} of {total} groups) ---",
        grouping.name()
    );
    if grouping.skipped_records > 0 {
        println!(
            "  {} records skipped: unusable group key",
            grouping.skipped_records
        );
    }

    for (key, group) in grouping.groups.iter().take(shown) {
        println!();
        println!("Group {key} ({} records)", group.record_count);
        print_stats_table(&group.stats);
    }
}

/// Print overall and grouped statistics of one dataset
///
/// # Arguments
/// * `analysis` - Complete analysis of the dataset
/// * `max_groups` - Number of groups printed per grouping (`None` for all)
pub(super) fn print_dataset(analysis: &DatasetAnalysis, max_groups: Option<usize>) {
    println!(
        "=== Dataset: {} ({} records, {} columns) ===",
        analysis.label,
        analysis.record_count,
        analysis.columns.len()
    );
    println!();
    println!("Overall");
    print_stats_table(&analysis.overall);

    for grouping in &analysis.groupings {
        print_grouping(grouping, max_groups);
    }
    println!();
}

fn format_number(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_owned(), |v| format!("{v:.4}"))
}

fn format_count(value: Option<usize>) -> String {
    value.map_or_else(|| "-".to_owned(), |v| v.to_string())
}

/// Shortens `s` to at most `width` characters, marking the cut with `~`.
fn fit(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_owned();
    }
    let mut fitted = s.chars().take(width.saturating_sub(1)).collect::<String>();
    fitted.push('~');
    fitted
}
