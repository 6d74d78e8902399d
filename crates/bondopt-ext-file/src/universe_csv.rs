//! CSV universe source.
//!
//! Expected header (order free, extra columns ignored):
//!
//! ```text
//! SECURITY_ALIAS,CLASS_1,CLASS_2,CLASS_3,CLASS_4,RATING,EFFDATE,EFFDUR,MV,OAS,YTM
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use bondopt_core::{Bond, Classification, Date, Universe};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{FileError, FileResult};

/// CSV record for one bond row.
#[derive(Debug, Deserialize)]
struct BondRecord {
    #[serde(rename = "SECURITY_ALIAS")]
    alias: String,
    #[serde(rename = "CLASS_1")]
    class_1: String,
    #[serde(rename = "CLASS_2")]
    class_2: String,
    #[serde(rename = "CLASS_3")]
    class_3: String,
    #[serde(rename = "CLASS_4")]
    class_4: String,
    #[serde(rename = "RATING")]
    rating: String,
    #[serde(rename = "EFFDATE")]
    effective_date: String,
    #[serde(rename = "EFFDUR")]
    effective_duration: f64,
    #[serde(rename = "MV")]
    market_value: String,
    #[serde(rename = "OAS")]
    oas: f64,
    #[serde(rename = "YTM")]
    ytm: f64,
}

impl BondRecord {
    fn into_bond(self, line: u64) -> FileResult<Bond> {
        let effective_date =
            Date::parse_lenient(&self.effective_date).map_err(|_| FileError::InvalidValue {
                line,
                column: "EFFDATE",
                value: self.effective_date.clone(),
            })?;
        let market_value = parse_decimal(&self.market_value).ok_or_else(|| {
            FileError::InvalidValue {
                line,
                column: "MV",
                value: self.market_value.clone(),
            }
        })?;

        Bond::builder()
            .alias(self.alias)
            .classification(Classification::new(
                self.class_1,
                self.class_2,
                self.class_3,
                self.class_4,
            ))
            .rating(self.rating)
            .effective_date(effective_date)
            .effective_duration(self.effective_duration)
            .market_value(market_value)
            .oas(self.oas)
            .ytm(self.ytm)
            .build()
            .map_err(|source| FileError::Record { line, source })
    }
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    let text = text.trim();
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

/// Reads a universe from any CSV byte source.
///
/// Fields are trimmed. Every row must parse; the first bad row aborts the
/// load with the line its record starts on, so quoted fields spanning
/// several lines do not shift later line numbers.
///
/// # Errors
///
/// - `FileError::Csv` for malformed CSV or a missing column.
/// - `FileError::InvalidValue` for an unparseable date or market value.
/// - `FileError::Record` for a row describing an invalid bond.
/// - `FileError::Core` for duplicate aliases.
pub fn read_universe<R: Read>(reader: R) -> FileResult<Universe> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let mut raw = csv::StringRecord::new();
    let mut bonds = Vec::new();
    while reader.read_record(&mut raw)? {
        let line = raw.position().map_or(0, csv::Position::line);
        let record: BondRecord = raw.deserialize(Some(&headers))?;
        bonds.push(record.into_bond(line)?);
    }

    Ok(Universe::new(bonds)?)
}

/// Loads a universe from a CSV file.
///
/// # Errors
///
/// `FileError::Io` if the file cannot be opened, otherwise as
/// [`read_universe`].
pub fn load_universe(path: impl AsRef<Path>) -> FileResult<Universe> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| FileError::io(path.display().to_string(), e.to_string()))?;
    let universe = read_universe(file)?;

    tracing::info!(
        path = %path.display(),
        bonds = universe.len(),
        dates = universe.effective_dates().len(),
        "loaded bond universe"
    );
    Ok(universe)
}
