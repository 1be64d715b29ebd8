mod error;
mod loader;
mod source;
mod store;
mod types;

pub use error::LoadError;
pub use loader::{OnInvalidRow, TrackLoader};
pub use source::{FileSource, HttpSource, TrackSource};
pub use store::{load_from, TrackStore};
pub use types::{Dataset, Fix, SubjectSummary, Track};

#[cfg(test)]
pub(crate) use store::tests::{MemorySource, SAMPLE_CSV};
#[cfg(test)]
pub(crate) use types::fix as test_fix;
