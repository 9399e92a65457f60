//! Observation rows, raw and normalized tables.

use crate::normalize::normalize_entity;
use crate::period::Period;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// A normalized geographic entity label.
///
/// The only way to build one is through [`Entity::new`], which trims and
/// case-folds, so two spellings of the same country always group together.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Entity(String);

impl Entity {
    /// Normalizes `raw` into an entity key.
    pub fn new(raw: &str) -> Self {
        Self(normalize_entity(raw))
    }

    /// The normalized label.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Entity {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// One normalized observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    /// Indicator code, trimmed.
    pub indicator: String,
    /// Normalized entity.
    pub entity: Entity,
    /// Normalized time period.
    pub period: Period,
    /// Observation value, `None` when the cell was blank or not numeric.
    pub value: Option<f64>,
}

/// One row exactly as read from the source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    /// Indicator code cell.
    pub indicator: String,
    /// Entity label cell.
    pub entity: String,
    /// Time period cell.
    pub time_period: String,
    /// Observation value cell.
    pub value: String,
}

impl RawRow {
    /// Builds a raw row from its four cells.
    pub fn new(
        indicator: impl Into<String>,
        entity: impl Into<String>,
        time_period: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            indicator: indicator.into(),
            entity: entity.into(),
            time_period: time_period.into(),
            value: value.into(),
        }
    }
}

/// The un-normalized table produced by the loader.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    rows: Vec<RawRow>,
}

impl RawTable {
    /// Wraps already-read rows.
    pub const fn from_rows(rows: Vec<RawRow>) -> Self {
        Self { rows }
    }

    /// Rows in file order.
    pub fn rows(&self) -> &[RawRow] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Consumes the table, yielding its rows.
    pub fn into_rows(self) -> Vec<RawRow> {
        self.rows
    }
}

/// The normalized, immutable observation table every request reads from.
///
/// Built only by [`crate::normalize`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    rows: Vec<Observation>,
    malformed_values: usize,
}

impl Table {
    pub(crate) const fn from_parts(rows: Vec<Observation>, malformed_values: usize) -> Self {
        Self {
            rows,
            malformed_values,
        }
    }

    /// Observations in file order.
    pub fn rows(&self) -> &[Observation] {
        &self.rows
    }

    /// Number of observations, including those with a missing value.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no observations.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Value cells that were present but could not be read as a finite number.
    pub const fn malformed_values(&self) -> usize {
        self.malformed_values
    }

    /// Distinct indicator codes, ascending.
    pub fn indicators(&self) -> Vec<&str> {
        self.rows
            .iter()
            .map(|row| row.indicator.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Entities with at least one value for `indicator`, ascending.
    pub fn entities(&self, indicator: &str) -> Vec<&Entity> {
        self.valued_rows(indicator)
            .map(|row| &row.entity)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Periods with at least one value for `indicator`, in chronological order.
    pub fn periods(&self, indicator: &str) -> Vec<&Period> {
        self.valued_rows(indicator)
            .map(|row| &row.period)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    fn valued_rows<'a, 'b>(
        &'a self,
        indicator: &'b str,
    ) -> impl Iterator<Item = &'a Observation> + 'b
    where
        'a: 'b,
    {
        self.rows
            .iter()
            .filter(move |row| row.indicator == indicator && row.value.is_some())
    }
}
