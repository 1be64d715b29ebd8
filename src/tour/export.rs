use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

use super::error::ExportError;
use super::kml::render_kml;
use super::types::Tour;

pub const KML_CONTENT_TYPE: &str = "application/vnd.google-earth.kml+xml";

/// File name offered to the client, derived only from the subject id.
pub fn download_name(subject: &str) -> String {
    let safe: String = subject
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("panther_{}_telemetry_tour.kml", safe)
}

/// A rendered tour on disk for the duration of one delivery.
///
/// The backing file has a random name and is removed when this value is
/// dropped, whichever way the delivery ends.
pub struct TransientTour {
    file: NamedTempFile,
    download_name: String,
}

impl TransientTour {
    pub fn write(tour: &Tour, subject: &str, dir: &Path) -> Result<Self, ExportError> {
        let kml = render_kml(tour)?;

        let mut file = tempfile::Builder::new()
            .prefix("panther-tour-")
            .suffix(".kml")
            .tempfile_in(dir)?;
        file.write_all(kml.as_bytes())?;
        file.flush()?;

        log::debug!("Wrote tour for {} to {}", subject, file.path().display());

        Ok(Self {
            file,
            download_name: download_name(subject),
        })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn download_name(&self) -> &str {
        &self.download_name
    }

    pub fn read(&self) -> Result<Vec<u8>, ExportError> {
        Ok(std::fs::read(self.file.path())?)
    }
}
