use serde::Deserialize;
use std::io::Read;

use crate::geo::UtmZone;

use super::error::LoadError;
use super::types::{Dataset, Fix, RawRow};

/// What to do with a row that cannot be turned into a [`Fix`].
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OnInvalidRow {
    #[default]
    Abort,
    Skip,
}

#[derive(Debug, Clone, Copy)]
pub struct TrackLoader {
    zone: UtmZone,
    on_invalid_row: OnInvalidRow,
}

impl TrackLoader {
    pub fn new(zone: UtmZone, on_invalid_row: OnInvalidRow) -> Self {
        Self {
            zone,
            on_invalid_row,
        }
    }

    /// Parse a CSV record set and convert every row.
    pub fn load<R: Read>(&self, reader: R) -> Result<Dataset, LoadError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        for column in RawRow::COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(LoadError::MissingColumn(column));
            }
        }

        let mut fixes = Vec::new();
        let mut skipped = 0;

        for (index, record) in csv_reader.deserialize::<RawRow>().enumerate() {
            let row = index + 1;
            let result = record
                .map_err(LoadError::from)
                .and_then(|raw| self.enrich(raw, row));

            match result {
                Ok(fix) => fixes.push(fix),
                Err(e) if self.on_invalid_row == OnInvalidRow::Skip => {
                    log::warn!("Skipping row {}: {}", row, e);
                    skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }

        let dataset = Dataset::new(fixes, skipped);
        log::info!(
            "Loaded {} fixes for {} subjects ({} rows skipped)",
            dataset.fixes().len(),
            dataset.subjects().len(),
            skipped
        );
        Ok(dataset)
    }

    /// Resolve the geographic position of one row. `row` is only used for
    /// error reporting.
    pub fn enrich(&self, raw: RawRow, row: usize) -> Result<Fix, LoadError> {
        let subject = raw
            .subject
            .filter(|s| !s.is_empty())
            .ok_or(LoadError::MissingField {
                row,
                field: "CATNUMBER",
            })?;
        let easting = raw.easting.ok_or(LoadError::MissingField {
            row,
            field: "UTM83EAST",
        })?;
        let northing = raw.northing.ok_or(LoadError::MissingField {
            row,
            field: "UTM83NORTH",
        })?;

        let position = self
            .zone
            .to_lat_lon(easting, northing)
            .map_err(|source| LoadError::InvalidCoordinate { row, source })?;

        Ok(Fix {
            subject,
            easting,
            northing,
            latitude: position.latitude,
            longitude: position.longitude,
            date: raw.date.unwrap_or_default(),
            time: raw.time.unwrap_or_default(),
            agency: raw.agency.unwrap_or_default(),
        })
    }
}
