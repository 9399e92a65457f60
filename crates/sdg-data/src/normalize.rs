//! Normalization of raw rows into the observation table.
//!
//! Runs once per loaded file. Entities are trimmed and case-folded, period
//! labels are trimmed and float-rendered years collapsed, and value cells are
//! parsed as finite numbers. A cell that cannot be parsed becomes a missing
//! value; it is counted but never turned into zero and never dropped.

use crate::model::{Entity, Observation, RawTable, Table};
use crate::period::Period;
use tracing::{debug, warn};

/// Trims and case-folds an entity label.
pub fn normalize_entity(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Trims a period label and collapses float-rendered integers (`2019.0`).
pub fn normalize_period(raw: &str) -> String {
    let trimmed = raw.trim();

    if let Some((whole, fraction)) = trimmed.split_once('.') {
        let whole_is_integer = !whole.is_empty() && whole.chars().all(|c| c.is_ascii_digit());
        let fraction_is_zero = !fraction.is_empty() && fraction.chars().all(|c| c == '0');
        if whole_is_integer && fraction_is_zero {
            return whole.to_string();
        }
    }

    trimmed.to_string()
}

/// Parses a value cell. Blank, non-numeric and non-finite cells are missing.
pub fn parse_value(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Normalizes every row of `raw` into a [`Table`].
pub fn normalize(raw: RawTable) -> Table {
    let mut malformed = 0usize;

    let rows: Vec<Observation> = raw
        .into_rows()
        .into_iter()
        .map(|row| {
            let value = parse_value(&row.value);
            if value.is_none() && !row.value.trim().is_empty() {
                malformed += 1;
            }
            Observation {
                indicator: row.indicator.trim().to_string(),
                entity: Entity::new(&row.entity),
                period: Period::new(&row.time_period),
                value,
            }
        })
        .collect();

    if malformed > 0 {
        warn!("{} value cells could not be read as numbers", malformed);
    }
    debug!(
        rows = rows.len(),
        malformed, "Normalized observation table"
    );

    Table::from_parts(rows, malformed)
}
