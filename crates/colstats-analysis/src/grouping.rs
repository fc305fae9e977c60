//! Grouping records by composite keys
//!
//! A [`GroupKey`] is the tuple of values a record holds in the grouping
//! fields. A field the record lacks contributes [`KeyPart::Missing`]
//! (rendered `N/A`), so absence never fails grouping. Numbers are compared
//! by value, which rules out `NaN`: a record whose key contains `NaN` is
//! skipped for that grouping and reported as a [`GroupKeyError`].
//!
//! Groups are kept in the order their first record was seen.
//!
//! # Examples
//!
//! ```
//! use colstats_analysis::{
//!     dataset::{Dataset, LoadOptions},
//!     grouping::GroupedAnalysis,
//! };
//!
//! let csv = "page_id,cost\nx,1\nx,3\ny,5\n";
//! let dataset = Dataset::from_reader(csv.as_bytes(), &LoadOptions::default()).unwrap();
//!
//! let grouped = GroupedAnalysis::from_dataset(&dataset, &["page_id".to_owned()]);
//! assert_eq!(grouped.name(), "grouped_by_page_id");
//!
//! let keys = grouped.groups.keys().map(ToString::to_string).collect::<Vec<_>>();
//! assert_eq!(keys, ["('x',)", "('y',)"]);
//!
//! let x = &grouped.groups[0];
//! let cost = x.stats.get("cost").unwrap();
//! assert_eq!(cost.count, 2);
//! assert_eq!(cost.numeric.as_ref().unwrap().mean, 2.0);
//! ```

use std::{
    fmt,
    hash::{Hash, Hasher},
};

use indexmap::IndexMap;

use crate::{
    column::AnalysisResult,
    dataset::{Dataset, Record, normalize_column_name},
    value::Value,
};

/// Rendering of [`KeyPart::Missing`].
pub const MISSING_KEY: &str = "N/A";

/// Error extracting a group key from one record.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GroupKeyError {
    #[display("field '{field}' holds a value that cannot be used as a group key")]
    UnusableNumber { field: String },
}

/// One component of a [`GroupKey`].
#[derive(Debug, Clone)]
pub enum KeyPart {
    /// A numeric field value; never `NaN`, and `-0.0` is stored as `0.0`
    Number(f64),
    Text(String),
    /// The record has no value for the field
    Missing,
}

impl KeyPart {
    fn from_value(field: &str, value: &Value) -> Result<Self, GroupKeyError> {
        match value {
            Value::Number(n) if n.is_nan() => Err(GroupKeyError::UnusableNumber {
                field: field.to_owned(),
            }),
            // Fold -0.0 into 0.0 so both land in the same group.
            Value::Number(n) => Ok(KeyPart::Number(*n + 0.0)),
            Value::Text(s) => Ok(KeyPart::Text(s.clone())),
            Value::Absent => Ok(KeyPart::Missing),
        }
    }
}

impl PartialEq for KeyPart {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (KeyPart::Number(a), KeyPart::Number(b)) => a.to_bits() == b.to_bits(),
            (KeyPart::Text(a), KeyPart::Text(b)) => a == b,
            (KeyPart::Missing, KeyPart::Missing) => true,
            _ => false,
        }
    }
}

impl Eq for KeyPart {}

impl Hash for KeyPart {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            KeyPart::Number(n) => n.to_bits().hash(state),
            KeyPart::Text(s) => s.hash(state),
            KeyPart::Missing => {}
        }
    }
}

impl fmt::Display for KeyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyPart::Number(n) => write!(f, "{n:?}"),
            KeyPart::Text(s) => {
                f.write_str("'")?;
                for c in s.chars() {
                    match c {
                        '\'' | '\\' => write!(f, "\\{c}")?,
                        _ => write!(f, "{c}")?,
                    }
                }
                f.write_str("'")
            }
            KeyPart::Missing => write!(f, "'{MISSING_KEY}'"),
        }
    }
}

/// Identity of a group: the ordered values of the grouping fields.
///
/// Equality and hashing are structural. [`fmt::Display`] renders a tuple-like
/// string (`('x',)`, `('x', 2.0)`) used only for display and as the key in
/// serialized reports.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKey(pub Vec<KeyPart>);

impl GroupKey {
    /// Extracts the key of `record` for `fields`.
    pub fn extract<S>(record: &Record, fields: &[S]) -> Result<Self, GroupKeyError>
    where
        S: AsRef<str>,
    {
        fields
            .iter()
            .map(|field| {
                let field = field.as_ref();
                KeyPart::from_value(field, record.get(field))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(GroupKey)
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, part) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{part}")?;
        }
        if self.0.len() == 1 {
            f.write_str(",")?;
        }
        f.write_str(")")
    }
}

/// Name of a grouping in reports: `grouped_by_` followed by the fields
/// joined with `_`.
///
/// # Examples
///
/// ```
/// use colstats_analysis::grouping::grouping_name;
///
/// assert_eq!(grouping_name(&["page_id", "ad_id"]), "grouped_by_page_id_ad_id");
/// ```
#[must_use]
pub fn grouping_name<S>(fields: &[S]) -> String
where
    S: AsRef<str>,
{
    let joined = fields.iter().map(AsRef::as_ref).collect::<Vec<_>>().join("_");
    format!("grouped_by_{joined}")
}

/// Records partitioned by group key, in first-seen order.
#[derive(Debug, Clone)]
pub struct RecordGroups<'a> {
    pub groups: IndexMap<GroupKey, Vec<&'a Record>>,
    /// Number of records whose key could not be extracted
    pub skipped_records: usize,
}

impl<'a> RecordGroups<'a> {
    /// Groups `records` by their values in `fields`.
    ///
    /// Records whose key cannot be extracted are left out and counted in
    /// [`RecordGroups::skipped_records`]; the rest are still grouped.
    #[must_use]
    pub fn collect<S>(records: &'a [Record], fields: &[S]) -> Self
    where
        S: AsRef<str>,
    {
        let mut groups: IndexMap<GroupKey, Vec<&'a Record>> = IndexMap::new();
        let mut skipped_records = 0;

        for (row, record) in records.iter().enumerate() {
            match GroupKey::extract(record, fields) {
                Ok(key) => groups.entry(key).or_default().push(record),
                Err(e) => {
                    log::warn!("Skipping record {} for grouping: {e}", row + 1);
                    skipped_records += 1;
                }
            }
        }

        Self {
            groups,
            skipped_records,
        }
    }
}

/// Statistics of one group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupStats {
    /// Number of records in the group
    pub record_count: usize,
    pub stats: AnalysisResult,
}

/// Per-group statistics for one grouping of a dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedAnalysis {
    /// Normalized grouping field names
    pub fields: Vec<String>,
    /// Every group, in first-seen order
    pub groups: IndexMap<GroupKey, GroupStats>,
    /// Number of records left out because their key could not be extracted
    pub skipped_records: usize,
}

impl GroupedAnalysis {
    /// Groups the dataset's records by `fields` and computes statistics for
    /// every dataset column within each group.
    ///
    /// Field names are normalized the same way column names are, so
    /// `"Page_ID"` groups by the `page_id` column.
    #[must_use]
    pub fn from_dataset<S>(dataset: &Dataset, fields: &[S]) -> Self
    where
        S: AsRef<str>,
    {
        let fields = fields
            .iter()
            .map(|f| normalize_column_name(f.as_ref()))
            .collect::<Vec<_>>();
        for field in &fields {
            if !dataset.columns.contains(field) {
                log::warn!(
                    "Grouping field '{field}' is not a column; every record gets '{MISSING_KEY}'"
                );
            }
        }

        let record_groups = RecordGroups::collect(&dataset.records, &fields);
        let groups = record_groups
            .groups
            .into_iter()
            .map(|(key, records)| {
                let stats = GroupStats {
                    record_count: records.len(),
                    stats: AnalysisResult::from_records(&dataset.columns, &records),
                };
                (key, stats)
            })
            .collect();

        Self {
            fields,
            groups,
            skipped_records: record_groups.skipped_records,
        }
    }

    /// Report name of this grouping, see [`grouping_name`].
    #[must_use]
    pub fn name(&self) -> String {
        grouping_name(&self.fields)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::dataset::LoadOptions;

    fn dataset(csv: &str) -> Dataset {
        Dataset::from_reader(csv.as_bytes(), &LoadOptions::default()).unwrap()
    }

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_owned()).collect()
    }

    fn key_strings(grouped: &GroupedAnalysis) -> Vec<String> {
        grouped.groups.keys().map(ToString::to_string).collect()
    }

    #[test]
    fn test_single_key_grouping() {
        let dataset = dataset("page_id,cost\nx,1.0\nx,3.0\ny,5.0\n");
        let grouped = GroupedAnalysis::from_dataset(&dataset, &fields(&["page_id"]));

        assert_eq!(grouped.groups.len(), 2);
        assert_eq!(grouped.skipped_records, 0);

        let x = &grouped.groups[&GroupKey(vec![KeyPart::Text("x".to_owned())])];
        assert_eq!(x.record_count, 2);
        let cost = x.stats.get("cost").unwrap();
        assert_eq!(cost.count, 2);
        assert_eq!(cost.numeric.as_ref().unwrap().mean, 2.0);

        let y = &grouped.groups[&GroupKey(vec![KeyPart::Text("y".to_owned())])];
        let cost = y.stats.get("cost").unwrap();
        assert_eq!(cost.count, 1);
        assert_eq!(cost.numeric.as_ref().unwrap().mean, 5.0);
        assert_eq!(cost.numeric.as_ref().unwrap().std_dev, 0.0);
    }

    #[test]
    fn test_groups_keep_first_seen_order() {
        let dataset = dataset("k\nc\na\nc\nb\na\n");
        let grouped = GroupedAnalysis::from_dataset(&dataset, &fields(&["k"]));
        assert_eq!(key_strings(&grouped), ["('c',)", "('a',)", "('b',)"]);
    }

    #[test]
    fn test_group_stats_cover_all_columns() {
        let dataset = dataset("k,a,b\nx,1,foo\ny,2\n");
        let grouped = GroupedAnalysis::from_dataset(&dataset, &fields(&["k"]));
        let y = &grouped.groups[1];
        let columns = y.stats.iter().map(|(name, _)| name).collect::<Vec<_>>();
        assert_eq!(columns, ["k", "a", "b"]);
        assert_eq!(y.stats.get("b").unwrap().count, 0);
    }

    #[test]
    fn test_missing_field_uses_sentinel() {
        let dataset = dataset("page_id,ad_id,cost\nx,1,10\nx\ny,2,30\n");
        let grouped = GroupedAnalysis::from_dataset(&dataset, &fields(&["page_id", "ad_id"]));
        assert_eq!(
            key_strings(&grouped),
            ["('x', 1.0)", "('x', 'N/A')", "('y', 2.0)"]
        );
        assert_eq!(grouped.skipped_records, 0);
    }

    #[test]
    fn test_unknown_grouping_field_puts_everything_in_one_group() {
        let dataset = dataset("a\n1\n2\n");
        let grouped = GroupedAnalysis::from_dataset(&dataset, &fields(&["nope"]));
        assert_eq!(key_strings(&grouped), ["('N/A',)"]);
        assert_eq!(grouped.groups[0].record_count, 2);
    }

    #[test]
    fn test_sentinel_is_distinct_from_text_na() {
        let dataset = dataset("k,v\nN/A,1\n,2\n");
        let mut records = dataset.records.clone();
        records.push(Record::from_iter([("v", Value::Number(3.0))]));
        let groups = RecordGroups::collect(&records, &["k"]);
        assert_eq!(groups.groups.len(), 3);
    }

    #[test]
    fn test_field_names_are_normalized() {
        let dataset = dataset("Page_ID,cost\nx,1\n");
        let grouped = GroupedAnalysis::from_dataset(&dataset, &fields(&[" PAGE_ID "]));
        assert_eq!(grouped.fields, ["page_id"]);
        assert_eq!(key_strings(&grouped), ["('x',)"]);
        assert_eq!(grouped.name(), "grouped_by_page_id");
    }

    #[test]
    fn test_nan_key_skips_only_that_record() {
        let dataset = dataset("k,v\n1,a\nnan,b\n1,c\n2,d\n");
        let grouped = GroupedAnalysis::from_dataset(&dataset, &fields(&["k"]));
        assert_eq!(grouped.skipped_records, 1);
        assert_eq!(key_strings(&grouped), ["(1.0,)", "(2.0,)"]);
        assert_eq!(grouped.groups[0].record_count, 2);
    }

    #[test]
    fn test_extract_reports_the_offending_field() {
        let record = Record::from_iter([("a", Value::from("x")), ("b", Value::Number(f64::NAN))]);
        let err = GroupKey::extract(&record, &["a", "b"]).unwrap_err();
        assert_eq!(
            err,
            GroupKeyError::UnusableNumber {
                field: "b".to_owned()
            }
        );
    }

    #[test]
    fn test_negative_zero_groups_with_zero() {
        let dataset = dataset("k\n0\n-0\n0.0\n");
        let grouped = GroupedAnalysis::from_dataset(&dataset, &fields(&["k"]));
        assert_eq!(grouped.groups.len(), 1);
        assert_eq!(grouped.groups[0].record_count, 3);
    }

    #[test]
    fn test_number_and_text_keys_differ() {
        let a = GroupKey(vec![KeyPart::Number(1.0)]);
        let b = GroupKey(vec![KeyPart::Text("1".to_owned())]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_key_rendering() {
        let key = GroupKey(vec![
            KeyPart::Text("it's".to_owned()),
            KeyPart::Number(2.5),
            KeyPart::Missing,
        ]);
        assert_eq!(key.to_string(), r"('it\'s', 2.5, 'N/A')");
        assert_eq!(GroupKey(vec![]).to_string(), "()");
        assert_eq!(
            GroupKey(vec![KeyPart::Number(1e16), KeyPart::Number(-0.5)]).to_string(),
            "(1e16, -0.5)"
        );
        assert_eq!(
            GroupKey(vec![KeyPart::Text(r"a\b".to_owned())]).to_string(),
            r"('a\\b',)"
        );
    }

    #[test]
    fn test_multi_key_grouping_refines_single_key() {
        let dataset = dataset(
            "page_id,ad_id,cost\n\
             p1,a1,1\np1,a2,2\np2,a1,3\np1,a1,4\np2,a3,5\np3,,6\n",
        );
        let single = RecordGroups::collect(&dataset.records, &["page_id"]);
        let multi = RecordGroups::collect(&dataset.records, &["page_id", "ad_id"]);

        let total = multi.groups.values().map(Vec::len).sum::<usize>();
        assert_eq!(total, dataset.records.len());

        for records in multi.groups.values() {
            let containing = single
                .groups
                .values()
                .filter(|parent| {
                    let parent = parent
                        .iter()
                        .map(|r| std::ptr::from_ref(*r))
                        .collect::<HashSet<_>>();
                    records.iter().all(|r| parent.contains(&std::ptr::from_ref(*r)))
                })
                .count();
            assert_eq!(containing, 1);
        }
    }
}
