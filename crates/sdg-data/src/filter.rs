//! Row selection for a single indicator.
//!
//! [`filter`] is the one predicate every aggregate consumes, so the four
//! charts of a dashboard always agree on which rows they describe.

use crate::model::{Entity, Observation, Table};
use crate::period::Period;
use serde::Serialize;
use std::collections::BTreeSet;

/// What the caller asked to see.
///
/// Allow-sets hold normalized members. An empty allow-set is stored as
/// `None`, so "no restriction" has a single representation and selections
/// that mean the same thing compare and hash equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Selection {
    indicator: String,
    entities: Option<BTreeSet<Entity>>,
    periods: Option<BTreeSet<Period>>,
}

impl Selection {
    /// Selects every row of `indicator`.
    pub fn new(indicator: impl AsRef<str>) -> Self {
        Self {
            indicator: indicator.as_ref().trim().to_string(),
            entities: None,
            periods: None,
        }
    }

    /// Restricts the selection to `entities`.
    #[must_use]
    pub fn with_entities<I, S>(mut self, entities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set: BTreeSet<Entity> = entities
            .into_iter()
            .filter(|raw| !raw.as_ref().trim().is_empty())
            .map(|raw| Entity::new(raw.as_ref()))
            .collect();
        self.entities = (!set.is_empty()).then_some(set);
        self
    }

    /// Restricts the selection to `periods`.
    #[must_use]
    pub fn with_periods<I, S>(mut self, periods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set: BTreeSet<Period> = periods
            .into_iter()
            .filter(|raw| !raw.as_ref().trim().is_empty())
            .map(|raw| Period::new(raw.as_ref()))
            .collect();
        self.periods = (!set.is_empty()).then_some(set);
        self
    }

    /// Requested indicator code.
    pub fn indicator(&self) -> &str {
        &self.indicator
    }

    /// Entity allow-set, `None` when unrestricted.
    pub const fn entities(&self) -> Option<&BTreeSet<Entity>> {
        self.entities.as_ref()
    }

    /// Period allow-set, `None` when unrestricted.
    pub const fn periods(&self) -> Option<&BTreeSet<Period>> {
        self.periods.as_ref()
    }

    /// Whether `row` belongs to the selection. Rows without a value never do.
    pub fn matches(&self, row: &Observation) -> bool {
        row.value.is_some()
            && row.indicator == self.indicator
            && self
                .entities
                .as_ref()
                .map_or(true, |set| set.contains(&row.entity))
            && self
                .periods
                .as_ref()
                .map_or(true, |set| set.contains(&row.period))
    }
}

/// One row of a filtered view. The value is always present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewRow<'a> {
    /// Normalized entity.
    pub entity: &'a Entity,
    /// Normalized period.
    pub period: &'a Period,
    /// Observation value.
    pub value: f64,
}

/// The rows of a table matching a [`Selection`], borrowed from the table.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredView<'a> {
    indicator: String,
    rows: Vec<ViewRow<'a>>,
}

impl<'a> FilteredView<'a> {
    /// Builds a view directly from rows.
    pub fn from_rows(indicator: impl Into<String>, rows: Vec<ViewRow<'a>>) -> Self {
        Self {
            indicator: indicator.into(),
            rows,
        }
    }

    /// Indicator code the view was filtered on.
    pub fn indicator(&self) -> &str {
        &self.indicator
    }

    /// Matching rows in table order.
    pub fn rows(&self) -> &[ViewRow<'a>] {
        &self.rows
    }

    /// Iterates over the matching rows.
    pub fn iter(&self) -> impl Iterator<Item = &ViewRow<'a>> {
        self.rows.iter()
    }

    /// Number of matching rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no row matched.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Applies `selection` to `table`.
pub fn filter<'a>(table: &'a Table, selection: &Selection) -> FilteredView<'a> {
    let rows = table
        .rows()
        .iter()
        .filter(|row| selection.matches(row))
        .filter_map(|row| {
            row.value.map(|value| ViewRow {
                entity: &row.entity,
                period: &row.period,
                value,
            })
        })
        .collect();

    FilteredView::from_rows(selection.indicator(), rows)
}
