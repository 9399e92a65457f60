//! Time period labels with chronological ordering.
//!
//! Period labels in the source data are strings such as `2019`, `2019-Q3` or
//! `2019-03`. Comparing them as plain strings misorders labels that are not
//! zero padded (`2019-Q10` would sort before `2019-Q2`), so a [`Period`]
//! orders by the integer runs embedded in its label and only falls back to
//! the label text to break ties.

use crate::normalize::normalize_period;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A normalized time period label.
#[derive(Debug, Clone)]
pub struct Period {
    label: String,
    key: Vec<u64>,
}

impl Period {
    /// Normalizes `raw` and builds its chronological sort key.
    pub fn new(raw: &str) -> Self {
        let label = normalize_period(raw);
        let key = numeric_runs(&label);
        Self { label, key }
    }

    /// The normalized label.
    pub fn as_str(&self) -> &str {
        &self.label
    }
}

fn numeric_runs(label: &str) -> Vec<u64> {
    label
        .split(|c: char| !c.is_ascii_digit())
        .filter(|run| !run.is_empty())
        .map(|run| run.parse().unwrap_or(u64::MAX))
        .collect()
}

impl PartialEq for Period {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label
    }
}

impl Eq for Period {}

impl Hash for Period {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.label.hash(state);
    }
}

impl Ord for Period {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key
            .cmp(&other.key)
            .then_with(|| self.label.cmp(&other.label))
    }
}

impl PartialOrd for Period {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

impl Serialize for Period {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label)
    }
}

impl From<&str> for Period {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(labels: &[&str]) -> Vec<String> {
        let mut periods: Vec<Period> = labels.iter().map(|l| Period::new(l)).collect();
        periods.sort();
        periods.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_years_sort_numerically() {
        assert_eq!(sorted(&["2020", "999", "2019"]), vec!["999", "2019", "2020"]);
    }

    #[test]
    fn test_unpadded_quarters_sort_chronologically() {
        assert_eq!(
            sorted(&["2019-Q10", "2019-Q2", "2018-Q4", "2019-Q1"]),
            vec!["2018-Q4", "2019-Q1", "2019-Q2", "2019-Q10"]
        );
    }

    #[test]
    fn test_months_and_year_prefixes() {
        assert_eq!(
            sorted(&["2019-3", "2019", "2019-12", "2018-12"]),
            vec!["2018-12", "2019", "2019-3", "2019-12"]
        );
    }

    #[test]
    fn test_labels_without_digits_fall_back_to_text() {
        assert_eq!(sorted(&["b", "a", "2019"]), vec!["a", "b", "2019"]);
    }

    #[test]
    fn test_equality_uses_normalized_label() {
        assert_eq!(Period::new(" 2019 "), Period::new("2019"));
        assert_eq!(Period::new("2019.0"), Period::new("2019"));
        assert_ne!(Period::new("2019-03"), Period::new("2019-3"));
        assert!(Period::new("2019-Q3") < Period::new("2019-Q12"));
    }
}
