use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvertError {
    #[error("invalid coordinate ({easting}, {northing}): {reason}")]
    InvalidCoordinate {
        easting: f64,
        northing: f64,
        reason: &'static str,
    },
    #[error("invalid geographic position ({latitude}, {longitude}): {reason}")]
    InvalidPosition {
        latitude: f64,
        longitude: f64,
        reason: &'static str,
    },
    #[error("invalid UTM zone {number}{band}")]
    InvalidZone { number: u8, band: char },
}
