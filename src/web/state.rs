use std::sync::Arc;

use crate::config::Config;
use crate::track::TrackStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<TrackStore>,
}
