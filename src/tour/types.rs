use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Camera constants shared by every segment of a tour.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct TourSettings {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_altitude")]
    pub altitude_m: f64,
    #[serde(default = "default_tilt")]
    pub tilt_deg: f64,
    #[serde(default = "default_hold_duration")]
    pub hold_duration_s: f64,
    #[serde(default = "default_travel_duration")]
    pub travel_duration_s: f64,
}

fn default_name() -> String {
    "Panther Telemetry Tour".to_string()
}

fn default_altitude() -> f64 {
    100.0
}

fn default_tilt() -> f64 {
    80.0
}

fn default_hold_duration() -> f64 {
    1.0
}

fn default_travel_duration() -> f64 {
    5.0
}

impl Default for TourSettings {
    fn default() -> Self {
        Self {
            name: default_name(),
            altitude_m: default_altitude(),
            tilt_deg: default_tilt(),
            hold_duration_s: default_hold_duration(),
            travel_duration_s: default_travel_duration(),
        }
    }
}

/// A `gx:FlyTo` target. Altitude is relative to ground.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CameraPose {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude_m: f64,
    pub heading_deg: f64,
    pub tilt_deg: f64,
    pub duration_s: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Placemark {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TourSegment {
    pub heading_deg: f64,
    /// Turns the camera toward the next fix without moving.
    pub orientation: CameraPose,
    /// Flies to the next fix.
    pub travel: CameraPose,
    pub placemark: Placemark,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Tour {
    pub name: String,
    pub segments: Vec<TourSegment>,
    pub terminal: Option<Placemark>,
}

impl Tour {
    /// Camera poses in playback order.
    pub fn poses(&self) -> impl Iterator<Item = &CameraPose> {
        self.segments
            .iter()
            .flat_map(|s| [&s.orientation, &s.travel])
    }

    pub fn placemarks(&self) -> impl Iterator<Item = &Placemark> {
        self.segments
            .iter()
            .map(|s| &s.placemark)
            .chain(self.terminal.iter())
    }
}
