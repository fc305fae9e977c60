//! Statistical building blocks for the colstats project.
//!
//! This crate provides the pure computations behind column profiling:
//!
//! - **Descriptive statistics**: count, mean, sample standard deviation, min and max
//! - **Frequency tables**: distinct counts and the most common value with a
//!   deterministic first-seen tie-break
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for numeric samples
//! - [`frequency`]: Frequency counting for categorical samples
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use colstats_stats::descriptive::DescriptiveStats;
//!
//! let stats = DescriptiveStats::new([1.0, 2.0, 3.0]).unwrap();
//! assert_eq!(stats.mean, 2.0);
//! assert_eq!(stats.std_dev, 1.0);
//! ```
//!
//! ## Finding the most common value
//!
//! ```
//! use colstats_stats::frequency::FrequencyTable;
//!
//! let table = FrequencyTable::from_values(["a", "a", "b"]);
//! assert_eq!(table.unique(), 2);
//! assert_eq!(table.mode(), Some((&"a", 2)));
//! ```

pub mod descriptive;
pub mod frequency;
