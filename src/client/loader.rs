//! Load per-year overrides from advisor-supplied CSV
//!
//! Expected columns: `year,income,cash_infusion,note`. A blank income cell
//! keeps the profile's baseline income for that year; a blank infusion cell
//! means no cash flow.

use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::client::YearOverride;

/// Raw CSV row before normalization
#[derive(Debug, Deserialize)]
struct OverrideRecord {
    year: u32,
    #[serde(default)]
    income: Option<f64>,
    #[serde(default)]
    cash_infusion: Option<f64>,
    #[serde(default)]
    note: Option<String>,
}

impl From<OverrideRecord> for YearOverride {
    fn from(record: OverrideRecord) -> Self {
        Self {
            year: record.year,
            income: record.income,
            cash_infusion: record.cash_infusion.unwrap_or(0.0),
            note: record.note.filter(|n| !n.trim().is_empty()),
        }
    }
}

/// Load overrides from any reader
pub fn load_overrides_from_reader<R: Read>(
    reader: R,
) -> Result<Vec<YearOverride>, Box<dyn Error>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut overrides = Vec::new();
    for result in csv_reader.deserialize() {
        let record: OverrideRecord = result?;
        overrides.push(record.into());
    }

    log::info!("loaded {} year overrides", overrides.len());
    Ok(overrides)
}

/// Load overrides from a CSV file on disk
pub fn load_overrides(path: &Path) -> Result<Vec<YearOverride>, Box<dyn Error>> {
    let file = File::open(path)?;
    load_overrides_from_reader(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_csv() {
        let csv_data = "\
year,income,cash_infusion,note
3,,2000000,business sale proceeds
6,0,,retirement
";
        let overrides = load_overrides_from_reader(csv_data.as_bytes()).unwrap();

        assert_eq!(overrides.len(), 2);

        assert_eq!(overrides[0].year, 3);
        assert!(overrides[0].income.is_none());
        assert_eq!(overrides[0].cash_infusion, 2_000_000.0);
        assert_eq!(overrides[0].note.as_deref(), Some("business sale proceeds"));

        assert_eq!(overrides[1].year, 6);
        assert_eq!(overrides[1].income, Some(0.0));
        assert_eq!(overrides[1].cash_infusion, 0.0);
    }

    #[test]
    fn test_negative_infusion_is_withdrawal() {
        let csv_data = "\
year,income,cash_infusion,note
5,,-500000,
";
        let overrides = load_overrides_from_reader(csv_data.as_bytes()).unwrap();

        assert_eq!(overrides[0].cash_infusion, -500_000.0);
        assert!(overrides[0].note.is_none());
    }

    #[test]
    fn test_malformed_row_fails() {
        let csv_data = "\
year,income,cash_infusion,note
abc,,,
";
        assert!(load_overrides_from_reader(csv_data.as_bytes()).is_err());
    }
}
