mod builder;
mod error;
mod export;
mod kml;
mod types;

pub use builder::build_tour;
pub use error::ExportError;
pub use export::{download_name, TransientTour, KML_CONTENT_TYPE};
pub use kml::render_kml;
pub use types::{CameraPose, Placemark, Tour, TourSegment, TourSettings};
