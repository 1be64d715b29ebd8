mod error;
mod utm;

pub use error::ConvertError;
pub use utm::{LatLon, UtmZone};
