//! Descriptor table parsing.
//!
//! The table is comma-delimited with a header row. Columns are located by
//! name, so their order is free and extra columns are ignored. Fields may be
//! wrapped in double quotes, with `""` as an escaped quote inside. Quoted
//! fields cannot span lines.

use std::path::Path;

use crate::descriptor::DescriptorRecord;
use crate::error::{SpecError, TableError, ValidationResult, ValidationWarning, WarningCode};

/// Header name of the timbre class column.
pub const TIMBRE_TYPE: &str = "timbreType";
/// Header name of the timbre intensity column.
pub const TIMBRE_INTENSITY: &str = "timbreIntensity";
/// Header name of the pitch class column.
pub const PITCH_TYPE: &str = "pitchType";
/// Header name of the pitch intensity column.
pub const PITCH_INTENSITY: &str = "pitchIntensity";

/// Column positions resolved from the header row.
struct Columns {
    timbre: usize,
    timbre_intensity: usize,
    pitch: usize,
    pitch_intensity: usize,
}

impl Columns {
    fn from_header(header: &[String]) -> Result<Self, TableError> {
        let find = |name: &'static str| {
            header
                .iter()
                .position(|h| h.trim() == name)
                .ok_or(TableError::MissingColumn(name))
        };
        Ok(Self {
            timbre: find(TIMBRE_TYPE)?,
            timbre_intensity: find(TIMBRE_INTENSITY)?,
            pitch: find(PITCH_TYPE)?,
            pitch_intensity: find(PITCH_INTENSITY)?,
        })
    }

    fn required_len(&self) -> usize {
        [
            self.timbre,
            self.timbre_intensity,
            self.pitch,
            self.pitch_intensity,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
            + 1
    }
}

/// Parse a descriptor table into raw records, in file order.
pub fn parse_descriptor_table(text: &str) -> Result<Vec<DescriptorRecord>, TableError> {
    let mut lines = text
        .lines()
        .map(|line| line.trim_start_matches('\u{feff}'))
        .filter(|line| !line.trim().is_empty());

    let header_line = lines.next().ok_or(TableError::MissingHeader)?;
    let header = split_fields(header_line, 0)?;
    let columns = Columns::from_header(&header)?;
    let expected = columns.required_len();

    let mut records = Vec::new();
    for (index, line) in lines.enumerate() {
        let row = index + 1;
        let fields = split_fields(line, row)?;
        if fields.len() < expected {
            return Err(TableError::ShortRow {
                row,
                expected,
                found: fields.len(),
            });
        }
        records.push(DescriptorRecord {
            row,
            timbre: fields[columns.timbre].trim().to_string(),
            timbre_intensity: parse_intensity(&fields[columns.timbre_intensity], row, TIMBRE_INTENSITY)?,
            pitch: fields[columns.pitch].trim().to_string(),
            pitch_intensity: parse_intensity(&fields[columns.pitch_intensity], row, PITCH_INTENSITY)?,
        });
    }

    Ok(records)
}

/// Read and parse a descriptor table file.
pub fn load_descriptor_table(path: &Path) -> Result<Vec<DescriptorRecord>, SpecError> {
    let text = std::fs::read_to_string(path)?;
    let records = parse_descriptor_table(&text)?;
    log::info!("loaded {} descriptor rows from {}", records.len(), path.display());
    Ok(records)
}

/// Check a table's records against the number of cells they will fill.
pub fn check_records(records: &[DescriptorRecord], cell_count: usize) -> ValidationResult {
    let mut result = ValidationResult::success();

    for record in records {
        let (_, warnings) = record.resolve();
        for warning in warnings {
            result.add_warning(warning);
        }
    }

    if records.len() < cell_count {
        result.add_warning(ValidationWarning::new(
            WarningCode::ShortFeed,
            format!(
                "{} rows for {} cells; {} cells will use the default descriptor",
                records.len(),
                cell_count,
                cell_count - records.len()
            ),
        ));
    } else if records.len() > cell_count {
        result.add_warning(ValidationWarning::new(
            WarningCode::UnusedRows,
            format!(
                "{} rows for {} cells; the last {} rows are ignored",
                records.len(),
                cell_count,
                records.len() - cell_count
            ),
        ));
    }

    result
}

fn parse_intensity(field: &str, row: usize, column: &'static str) -> Result<u32, TableError> {
    field
        .trim()
        .parse::<u32>()
        .map_err(|_| TableError::InvalidIntensity {
            row,
            column,
            value: field.to_string(),
        })
}

/// Split one line into fields, honoring double-quoted fields.
fn split_fields(line: &str, row: usize) -> Result<Vec<String>, TableError> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' if current.trim().is_empty() => {
                current.clear();
                in_quotes = true;
            }
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            c => current.push(c),
        }
    }

    if in_quotes {
        return Err(TableError::UnterminatedQuote { row });
    }
    fields.push(current);
    Ok(fields)
}
