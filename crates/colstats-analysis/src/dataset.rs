//! Loading CSV files into records
//!
//! A [`Dataset`] is the header row (normalized column names) plus one
//! [`Record`] per data row. Loading is tolerant of ragged rows: short rows
//! leave the missing columns [`Value::Absent`], surplus fields are dropped.
//! Only an unreadable or undecodable source fails the load.
//!
//! # Examples
//!
//! ```
//! use colstats_analysis::{
//!     dataset::{Dataset, LoadOptions},
//!     value::Value,
//! };
//!
//! let csv = " Page_ID ,Cost\nX,1.5\ny\n";
//! let dataset = Dataset::from_reader(csv.as_bytes(), &LoadOptions::default()).unwrap();
//!
//! assert_eq!(dataset.columns, ["page_id", "cost"]);
//! assert_eq!(dataset.records[0].get("page_id"), &Value::Text("x".to_owned()));
//! assert_eq!(dataset.records[0].get("cost"), &Value::Number(1.5));
//! assert_eq!(dataset.records[1].get("cost"), &Value::Absent);
//! ```

use std::{
    fs::File,
    io::{self, BufReader},
    path::{Path, PathBuf},
};

use indexmap::IndexMap;

use crate::value::Value;

static ABSENT: Value = Value::Absent;

/// Errors that make a whole file unusable.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum LoadError {
    #[display("failed to open {}", path.display())]
    Open { path: PathBuf, source: io::Error },
    #[display("failed to read CSV data from {origin}")]
    Csv { origin: String, source: csv::Error },
    #[display("no header row in {origin}")]
    MissingHeader { origin: String },
}

/// Options controlling cell coercion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Store blank cells as [`Value::Absent`] instead of empty text
    pub empty_as_absent: bool,
}

/// One data row, keyed by normalized column name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    values: IndexMap<String, Value>,
}

impl Record {
    /// Returns the value of `column`, or [`Value::Absent`] if the record has
    /// no such column.
    #[must_use]
    pub fn get(&self, column: &str) -> &Value {
        self.values.get(column).unwrap_or(&ABSENT)
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Column names and records read from one delimited file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    /// Normalized column names in header order, without duplicates
    pub columns: Vec<String>,
    /// Data rows in file order
    pub records: Vec<Record>,
}

/// Normalizes a column name for lookup: trimmed and lowercased.
#[must_use]
pub fn normalize_column_name(name: &str) -> String {
    name.trim().to_lowercase()
}

impl Dataset {
    /// Reads a comma-separated file with a header row.
    pub fn load<P>(path: P, options: &LoadOptions) -> Result<Self, LoadError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LoadError::Open {
            path: path.to_owned(),
            source,
        })?;
        Self::read(
            BufReader::new(file),
            &path.display().to_string(),
            options,
        )
    }

    /// Reads comma-separated data with a header row from any reader.
    pub fn from_reader<R>(reader: R, options: &LoadOptions) -> Result<Self, LoadError>
    where
        R: io::Read,
    {
        Self::read(reader, "input", options)
    }

    fn read<R>(reader: R, origin: &str, options: &LoadOptions) -> Result<Self, LoadError>
    where
        R: io::Read,
    {
        let csv_error = |source| LoadError::Csv {
            origin: origin.to_owned(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let header_names = reader
            .headers()
            .map_err(csv_error)?
            .iter()
            .map(normalize_column_name)
            .collect::<Vec<_>>();
        if header_names.is_empty() {
            return Err(LoadError::MissingHeader {
                origin: origin.to_owned(),
            });
        }

        let mut columns = Vec::with_capacity(header_names.len());
        for name in &header_names {
            if columns.contains(name) {
                log::warn!("{origin}: duplicate column '{name}', the rightmost field wins");
            } else {
                columns.push(name.clone());
            }
        }

        let mut records = vec![];
        let mut short_rows = 0;
        let mut long_rows = 0;
        for row in reader.records() {
            let row = row.map_err(csv_error)?;
            if row.len() < header_names.len() {
                short_rows += 1;
            } else if row.len() > header_names.len() {
                long_rows += 1;
            }

            let mut values = IndexMap::with_capacity(columns.len());
            for (i, name) in header_names.iter().enumerate() {
                match row.get(i) {
                    Some(raw) => {
                        let value = Value::from_cell(raw, options.empty_as_absent);
                        values.insert(name.clone(), value);
                    }
                    // A missing field must not erase a duplicate column's earlier value
                    None => {
                        values.entry(name.clone()).or_insert(Value::Absent);
                    }
                }
            }
            records.push(Record { values });
        }

        if short_rows > 0 {
            log::warn!("{origin}: {short_rows} rows have fewer fields than the header");
        }
        if long_rows > 0 {
            log::warn!("{origin}: {long_rows} rows have surplus fields, which were dropped");
        }
        log::debug!(
            "{origin}: loaded {} records with {} columns",
            records.len(),
            columns.len()
        );

        Ok(Self { columns, records })
    }
}
