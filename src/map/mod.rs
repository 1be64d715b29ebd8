use serde::Serialize;
use utoipa::ToSchema;

use crate::geo::LatLon;
use crate::track::Track;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MapMarker {
    pub latitude: f64,
    pub longitude: f64,
    pub popup: String,
}

/// Everything the Leaflet page needs to draw one track.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MapView {
    pub center: LatLon,
    pub zoom: u8,
    pub markers: Vec<MapMarker>,
}

impl MapView {
    /// Centred on the first fix. `None` for an empty track.
    pub fn from_track(track: &Track, zoom: u8) -> Option<Self> {
        if track.is_empty() {
            return None;
        }
        let first = &track.fixes()[0];

        let markers = track
            .fixes()
            .iter()
            .map(|fix| MapMarker {
                latitude: fix.latitude,
                longitude: fix.longitude,
                popup: format!("Date: {}, Time: {}", fix.date, fix.time),
            })
            .collect();

        Some(Self {
            center: LatLon {
                latitude: first.latitude,
                longitude: first.longitude,
            },
            zoom,
            markers,
        })
    }

    /// JSON for embedding inside a `<script>` element.
    pub fn to_script_json(&self) -> Result<String, serde_json::Error> {
        Ok(serde_json::to_string(self)?.replace("</", "<\\/"))
    }
}
