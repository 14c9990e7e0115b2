use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use tracing::{debug, trace, warn};

use crate::error::{ChartError, ChartResult};

use super::{CountryRecord, Dataset};

/// Marker the source table uses for a missing measurement.
pub const MISSING_SENTINEL: &str = "NA";

pub const REQUIRED_COLUMNS: [&str; 5] = [
    "country",
    "year",
    "fertility",
    "life_expectancy",
    "population",
];

/// Row accounting for one load pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadSummary {
    pub total_rows: usize,
    pub dropped_rows: usize,
    pub malformed_fields: usize,
}

#[derive(Debug, Clone, Copy)]
struct ColumnIndices {
    country: usize,
    year: usize,
    fertility: usize,
    life_expectancy: usize,
    population: usize,
}

impl ColumnIndices {
    fn resolve(headers: &StringRecord) -> ChartResult<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|header| header.trim() == name)
                .ok_or_else(|| ChartError::MissingColumn(name.to_owned()))
        };
        Ok(Self {
            country: find(REQUIRED_COLUMNS[0])?,
            year: find(REQUIRED_COLUMNS[1])?,
            fertility: find(REQUIRED_COLUMNS[2])?,
            life_expectancy: find(REQUIRED_COLUMNS[3])?,
            population: find(REQUIRED_COLUMNS[4])?,
        })
    }
}

/// Parses one numeric cell.
///
/// `None` only for the missing sentinel; `Some(NaN)` when the cell is empty
/// or holds something that is not a number.
fn parse_measurement(
    raw: &str,
    column: &str,
    row_number: usize,
    summary: &mut LoadSummary,
) -> Option<f64> {
    let raw = raw.trim();
    if raw == MISSING_SENTINEL {
        return None;
    }
    match raw.parse::<f64>() {
        Ok(value) => Some(value),
        Err(_) => {
            summary.malformed_fields += 1;
            warn!(row_number, column, value = raw, "non-numeric measurement");
            Some(f64::NAN)
        }
    }
}

fn field<'r>(record: &'r StringRecord, index: usize) -> &'r str {
    record.get(index).unwrap_or_default()
}

/// Loads the country table from any reader.
///
/// Rows whose fertility or life expectancy is missing are dropped. A missing
/// population is kept as `NaN`, which later renders as an invisible mark.
pub fn load_csv_reader<R: Read>(reader: R) -> ChartResult<(Dataset, LoadSummary)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let columns = ColumnIndices::resolve(reader.headers()?)?;

    let mut summary = LoadSummary::default();
    let mut records = Vec::new();
    for (offset, row) in reader.records().enumerate() {
        let row = row?;
        // Header is line 1.
        let row_number = offset + 2;
        summary.total_rows += 1;

        let fertility = parse_measurement(
            field(&row, columns.fertility),
            "fertility",
            row_number,
            &mut summary,
        );
        let life_expectancy = parse_measurement(
            field(&row, columns.life_expectancy),
            "life_expectancy",
            row_number,
            &mut summary,
        );
        let (Some(fertility), Some(life_expectancy)) = (fertility, life_expectancy) else {
            summary.dropped_rows += 1;
            trace!(row_number, "dropping row with missing measurement");
            continue;
        };

        let population = parse_measurement(
            field(&row, columns.population),
            "population",
            row_number,
            &mut summary,
        )
        .unwrap_or(f64::NAN);

        records.push(CountryRecord::from_raw_population(
            field(&row, columns.country).trim(),
            field(&row, columns.year).trim(),
            fertility,
            life_expectancy,
            population,
        ));
    }

    debug!(
        total_rows = summary.total_rows,
        kept_rows = records.len(),
        dropped_rows = summary.dropped_rows,
        malformed_fields = summary.malformed_fields,
        "loaded country table"
    );
    Ok((Dataset::from_records(records), summary))
}

pub fn load_csv_str(input: &str) -> ChartResult<(Dataset, LoadSummary)> {
    load_csv_reader(input.as_bytes())
}

pub fn load_csv_path(path: impl AsRef<Path>) -> ChartResult<(Dataset, LoadSummary)> {
    let path = path.as_ref();
    debug!(path = %path.display(), "opening country table");
    let file = File::open(path)?;
    load_csv_reader(file)
}

#[cfg(test)]
mod tests {
    use super::{LoadSummary, parse_measurement};

    #[test]
    fn only_the_sentinel_is_missing() {
        let mut summary = LoadSummary::default();
        assert_eq!(parse_measurement("NA", "fertility", 2, &mut summary), None);
        assert_eq!(parse_measurement(" NA ", "fertility", 2, &mut summary), None);
        assert_eq!(summary.malformed_fields, 0);
    }

    #[test]
    fn empty_cells_become_nan_and_are_counted() {
        let mut summary = LoadSummary::default();
        let value = parse_measurement("  ", "fertility", 2, &mut summary).expect("present");
        assert!(value.is_nan());
        assert_eq!(summary.malformed_fields, 1);
    }

    #[test]
    fn garbage_cells_become_nan_and_are_counted() {
        let mut summary = LoadSummary::default();
        let value = parse_measurement("abc", "fertility", 2, &mut summary).expect("present");
        assert!(value.is_nan());
        assert_eq!(summary.malformed_fields, 1);
    }
}
