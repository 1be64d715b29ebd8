use std::path::PathBuf;
use std::time::Duration;

use super::error::SourceError;

/// Where the raw telemetry CSV comes from.
///
/// Implementations block; async callers go through `spawn_blocking`.
pub trait TrackSource: Send + Sync {
    fn fetch(&self) -> Result<Vec<u8>, SourceError>;

    fn describe(&self) -> String;
}

pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl TrackSource for FileSource {
    fn fetch(&self) -> Result<Vec<u8>, SourceError> {
        std::fs::read(&self.path).map_err(|source| SourceError::Io {
            path: self.path.display().to_string(),
            source,
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

pub struct HttpSource {
    url: String,
    timeout: Duration,
}

impl HttpSource {
    pub fn new(url: String, timeout: Duration) -> Self {
        Self { url, timeout }
    }
}

impl TrackSource for HttpSource {
    fn fetch(&self) -> Result<Vec<u8>, SourceError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()?;

        log::info!("Downloading telemetry from {}", self.url);
        let response = client.get(&self.url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        Ok(response.bytes()?.to_vec())
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
