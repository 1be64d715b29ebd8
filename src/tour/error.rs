use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("KML rendering failed: {0}")]
    Render(#[from] askama::Error),
}
