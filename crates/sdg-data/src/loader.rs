//! CSV loading.
//!
//! The dataset is read once at startup. A missing or unreadable file, a
//! header without one of the configured columns, and a file without data
//! rows all fail with a data-unavailable error; there is no partial table.

use crate::model::{RawRow, RawTable, Table};
use crate::normalize::normalize;
use sdg_common::{Result, SdgError};
use sdg_config::{ColumnsConfig, DatasetConfig};
use std::fs::File;
use std::io::Read;
use std::time::Instant;
use tracing::{debug, info, instrument};

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Reads a raw table from CSV data.
pub fn read_raw_table<R: Read>(reader: R, columns: &ColumnsConfig) -> Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| SdgError::data_unavailable_with_source("Failed to read dataset header", e))?
        .clone();

    let header_names: Vec<&str> = headers
        .iter()
        .map(|header| header.trim_start_matches(BYTE_ORDER_MARK).trim())
        .collect();

    let [indicator, entity, time_period, value] = columns.as_array().map(|column| {
        header_names
            .iter()
            .position(|header| *header == column.trim())
            .ok_or_else(|| SdgError::missing_column(column))
    });
    let (indicator, entity, time_period, value) = (indicator?, entity?, time_period?, value?);
    debug!(
        indicator,
        entity, time_period, value, "Resolved dataset column positions"
    );

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record
            .map_err(|e| SdgError::data_unavailable_with_source("Failed to parse dataset", e))?;
        let cell = |index: usize| record.get(index).unwrap_or_default().to_string();
        rows.push(RawRow {
            indicator: cell(indicator),
            entity: cell(entity),
            time_period: cell(time_period),
            value: cell(value),
        });
    }

    if rows.is_empty() {
        return Err(SdgError::data_unavailable(
            "Dataset contains no observation rows",
        ));
    }

    Ok(RawTable::from_rows(rows))
}

/// Loads and normalizes the configured dataset.
#[instrument(skip(dataset), fields(path = %dataset.path.display()))]
pub fn load_table(dataset: &DatasetConfig) -> Result<Table> {
    let start = Instant::now();

    let file = File::open(&dataset.path).map_err(|e| {
        SdgError::data_unavailable_with_source(
            format!("Failed to open dataset '{}'", dataset.path.display()),
            e,
        )
    })?;

    let raw = read_raw_table(file, &dataset.columns)?;
    let table = normalize(raw);

    info!(
        "Loaded {} observations ({} indicators) from {} in {:?}",
        table.len(),
        table.indicators().len(),
        dataset.path.display(),
        start.elapsed()
    );

    Ok(table)
}
