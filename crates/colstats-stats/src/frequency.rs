use std::hash::Hash;

use indexmap::IndexMap;

/// Frequency counts of discrete values, kept in first-seen order.
///
/// Values are counted in the order they are first encountered, which makes
/// [`FrequencyTable::mode`] deterministic: when several values share the
/// highest count, the one that appeared first in the input wins.
///
/// # Examples
///
/// ```
/// use colstats_stats::frequency::FrequencyTable;
///
/// let table = FrequencyTable::from_values(["b", "a", "a", "b", "c"]);
/// assert_eq!(table.unique(), 3);
/// assert_eq!(table.total(), 5);
/// // "b" and "a" both appear twice; "b" was seen first.
/// assert_eq!(table.mode(), Some((&"b", 2)));
/// ```
#[derive(Debug, Clone)]
pub struct FrequencyTable<T> {
    counts: IndexMap<T, usize>,
}

impl<T> Default for FrequencyTable<T> {
    fn default() -> Self {
        Self {
            counts: IndexMap::new(),
        }
    }
}

impl<T> FrequencyTable<T>
where
    T: Eq + Hash,
{
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts every value produced by `values`.
    #[must_use]
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut table = Self::new();
        for value in values {
            table.push(value);
        }
        table
    }

    /// Records one occurrence of `value`.
    pub fn push(&mut self, value: T) {
        *self.counts.entry(value).or_insert(0) += 1;
    }
}

impl<T> FrequencyTable<T> {
    /// Number of distinct values.
    #[must_use]
    pub fn unique(&self) -> usize {
        self.counts.len()
    }

    /// Total number of counted occurrences.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Returns the most frequent value and its count.
    ///
    /// Ties are broken by first-seen order. Returns `None` for an empty table.
    ///
    /// # Examples
    ///
    /// ```
    /// use colstats_stats::frequency::FrequencyTable;
    ///
    /// let table = FrequencyTable::from_values(["a", "a", "b"]);
    /// assert_eq!(table.mode(), Some((&"a", 2)));
    ///
    /// let empty = FrequencyTable::<&str>::new();
    /// assert_eq!(empty.mode(), None);
    /// ```
    #[must_use]
    pub fn mode(&self) -> Option<(&T, usize)> {
        let mut best: Option<(&T, usize)> = None;
        for (value, &count) in &self.counts {
            if best.is_none_or(|(_, best_count)| count > best_count) {
                best = Some((value, count));
            }
        }
        best
    }
}

impl<T> FromIterator<T> for FrequencyTable<T>
where
    T: Eq + Hash,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_values(iter)
    }
}
