use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::error::LoadError;
use super::loader::TrackLoader;
use super::source::TrackSource;
use super::types::Dataset;

/// In-memory copy of the last successful load.
///
/// Readers get a cheap `Arc` snapshot; a refresh swaps the whole dataset, so
/// a failed refresh leaves the previous one in place.
pub struct TrackStore {
    source: Arc<dyn TrackSource>,
    loader: TrackLoader,
    dataset: RwLock<Arc<Dataset>>,
}

impl TrackStore {
    pub fn new(source: Arc<dyn TrackSource>, loader: TrackLoader) -> Self {
        Self {
            source,
            loader,
            dataset: RwLock::new(Arc::new(Dataset::default())),
        }
    }

    pub fn source_description(&self) -> String {
        self.source.describe()
    }

    pub async fn snapshot(&self) -> Arc<Dataset> {
        self.dataset.read().await.clone()
    }

    pub async fn refresh(&self) -> Result<Arc<Dataset>, LoadError> {
        let source = self.source.clone();
        let loader = self.loader;
        let dataset = tokio::task::spawn_blocking(move || load_from(source.as_ref(), &loader))
            .await??;

        let dataset = Arc::new(dataset);
        *self.dataset.write().await = dataset.clone();
        Ok(dataset)
    }

    pub fn spawn_refresh(self: Arc<Self>, every: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            // The first tick completes immediately
            interval.tick().await;
            loop {
                interval.tick().await;
                if let Err(e) = self.refresh().await {
                    log::warn!(
                        "Failed to refresh telemetry from {}: {}",
                        self.source.describe(),
                        e
                    );
                }
            }
        })
    }
}

pub fn load_from(source: &dyn TrackSource, loader: &TrackLoader) -> Result<Dataset, LoadError> {
    let bytes = source.fetch()?;
    loader.load(bytes.as_slice())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::geo::UtmZone;
    use crate::track::error::SourceError;
    use crate::track::OnInvalidRow;
    use std::sync::Mutex;

    /// Serves whatever CSV was last stored in it.
    pub(crate) struct MemorySource(pub Mutex<Option<String>>);

    impl MemorySource {
        pub(crate) fn new(csv: &str) -> Self {
            Self(Mutex::new(Some(csv.to_string())))
        }
    }

    impl TrackSource for MemorySource {
        fn fetch(&self) -> Result<Vec<u8>, SourceError> {
            match self.0.lock().unwrap().as_ref() {
                Some(csv) => Ok(csv.as_bytes().to_vec()),
                None => Err(SourceError::Status {
                    url: "memory".into(),
                    status: 503,
                }),
            }
        }

        fn describe(&self) -> String {
            "memory".into()
        }
    }

    pub(crate) const SAMPLE_CSV: &str = "\
CATNUMBER,UTM83EAST,UTM83NORTH,FLGTDATE,TIME,AGENCY
FP01,500000,2875683.838760388,1/1/2020,08:00,FWC
FP01,490000.7183394994,2886762.122055941,1/1/2020,09:00,FWC
FP02,510000,2880000,1/2/2020,07:15,NPS
";

    fn loader() -> TrackLoader {
        TrackLoader::new(UtmZone::default(), OnInvalidRow::Abort)
    }

    #[tokio::test]
    async fn test_snapshot_empty_before_refresh() {
        let store = TrackStore::new(Arc::new(MemorySource::new(SAMPLE_CSV)), loader());
        assert!(store.snapshot().await.fixes().is_empty());
    }

    #[tokio::test]
    async fn test_refresh_replaces_dataset() {
        let store = TrackStore::new(Arc::new(MemorySource::new(SAMPLE_CSV)), loader());
        let loaded = store.refresh().await.unwrap();
        assert_eq!(loaded.fixes().len(), 3);
        assert_eq!(store.snapshot().await.subjects(), ["FP01", "FP02"]);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_dataset() {
        let source = Arc::new(MemorySource::new(SAMPLE_CSV));
        let store = TrackStore::new(source.clone(), loader());
        store.refresh().await.unwrap();

        *source.0.lock().unwrap() = None;
        assert!(store.refresh().await.is_err());
        assert_eq!(store.snapshot().await.fixes().len(), 3);
    }
}
