pub mod error;
pub mod subjects;
