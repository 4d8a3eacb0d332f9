//! Name census and duplicate detection.
//!
//! Counts how often each effective name occurs across a working set. Unnamed
//! objects are counted under the fallback name, so a census over objects with
//! several blank names reports an `"Object"` duplicate group.

use serde::Serialize;
use std::collections::BTreeMap;

/// Occurrence count per name, kept in lexical order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NameCensus {
    counts: BTreeMap<String, usize>,
}

/// Headline numbers of a census.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CensusSummary {
    pub total_objects: usize,
    pub distinct_names: usize,
    pub duplicate_groups: usize,
    pub duplicate_instances: usize,
}

impl NameCensus {
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut census = Self::default();
        for name in names {
            census.record(name);
        }
        census
    }

    pub fn record(&mut self, name: impl Into<String>) {
        *self.counts.entry(name.into()).or_default() += 1;
    }

    pub fn count(&self, name: &str) -> usize {
        self.counts.get(name).copied().unwrap_or(0)
    }

    pub fn is_duplicate(&self, name: &str) -> bool {
        self.count(name) > 1
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// All `(name, count)` pairs in lexical name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(name, &count)| (name.as_str(), count))
    }

    /// Names shared by two or more objects, in lexical order.
    pub fn duplicates(&self) -> impl Iterator<Item = (&str, usize)> {
        self.iter().filter(|&(_, count)| count > 1)
    }

    pub fn has_duplicates(&self) -> bool {
        self.duplicates().next().is_some()
    }

    pub fn summary(&self) -> CensusSummary {
        CensusSummary {
            total_objects: self.counts.values().sum(),
            distinct_names: self.counts.len(),
            duplicate_groups: self.duplicates().count(),
            duplicate_instances: self.duplicates().map(|(_, count)| count).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_names_and_duplicate_groups() {
        let census = NameCensus::from_names(["Wall", "Wall", "Door", "Wall"]);
        assert_eq!(census.count("Wall"), 3);
        assert_eq!(census.count("Door"), 1);
        assert_eq!(census.count("Roof"), 0);

        let dups: Vec<_> = census.duplicates().collect();
        assert_eq!(dups, vec![("Wall", 3)]);
    }

    #[test]
    fn summary_sums_duplicate_instances() {
        let census = NameCensus::from_names(["A", "A", "B", "B", "B", "C"]);
        assert_eq!(
            census.summary(),
            CensusSummary {
                total_objects: 6,
                distinct_names: 3,
                duplicate_groups: 2,
                duplicate_instances: 5,
            }
        );
    }

    #[test]
    fn empty_census_has_zero_summary() {
        let census = NameCensus::default();
        assert!(census.is_empty());
        assert!(!census.has_duplicates());
        assert_eq!(census.summary(), CensusSummary::default());
    }

    #[test]
    fn names_compare_exactly() {
        let census = NameCensus::from_names(["wall", "Wall", "Wall "]);
        assert!(!census.has_duplicates());
        assert_eq!(census.summary().distinct_names, 3);
    }

    #[test]
    fn iterates_in_lexical_order() {
        let census = NameCensus::from_names(["b", "a", "c", "a"]);
        let names: Vec<_> = census.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn serializes_as_plain_map() {
        let census = NameCensus::from_names(["Wall", "Door", "Wall"]);
        assert_eq!(
            serde_json::to_string(&census).unwrap(),
            r#"{"Door":1,"Wall":2}"#
        );
    }
}
