use crate::track::{Fix, Track};

use super::types::{CameraPose, Placemark, Tour, TourSegment, TourSettings};

/// Camera heading from `current` toward `next`, in degrees within [0, 360).
///
/// Planar: raw degree deltas fed to `atan2(delta_lon, delta_lat)`, not a
/// great-circle bearing.
pub fn heading_between(current: &Fix, next: &Fix) -> f64 {
    let delta_longitude = next.longitude - current.longitude;
    let delta_latitude = next.latitude - current.latitude;
    let heading = delta_longitude
        .atan2(delta_latitude)
        .to_degrees()
        .rem_euclid(360.0);

    // rem_euclid rounds tiny negative angles up to 360.0
    if heading >= 360.0 {
        0.0
    } else {
        heading
    }
}

pub fn build_tour(track: &Track, settings: &TourSettings) -> Tour {
    let fixes = track.fixes();
    let mut segments = Vec::with_capacity(fixes.len().saturating_sub(1));
    let mut counter = 1;

    for pair in fixes.windows(2) {
        let (current, next) = (&pair[0], &pair[1]);
        let heading = heading_between(current, next);

        segments.push(TourSegment {
            heading_deg: heading,
            orientation: camera_at(current, heading, settings.hold_duration_s, settings),
            travel: camera_at(next, heading, settings.travel_duration_s, settings),
            placemark: placemark(current, counter),
        });
        counter += 1;
    }

    Tour {
        name: settings.name.clone(),
        segments,
        terminal: fixes.last().map(|last| placemark(last, counter)),
    }
}

fn camera_at(fix: &Fix, heading: f64, duration_s: f64, settings: &TourSettings) -> CameraPose {
    CameraPose {
        latitude: fix.latitude,
        longitude: fix.longitude,
        altitude_m: settings.altitude_m,
        heading_deg: heading,
        tilt_deg: settings.tilt_deg,
        duration_s,
    }
}

fn placemark(fix: &Fix, counter: usize) -> Placemark {
    Placemark {
        name: counter.to_string(),
        latitude: fix.latitude,
        longitude: fix.longitude,
        description: format!(
            "FLGTDATE: {}, CATNUMBER: {}, AGENCY: {}, TIME: {}",
            fix.date, fix.subject, fix.agency, fix.time
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::test_fix as fix;

    fn track(points: &[(f64, f64)]) -> Track {
        let fixes = points
            .iter()
            .enumerate()
            .map(|(i, (lat, lon))| fix("FP01", *lat, *lon, &format!("{:02}:00", i)))
            .collect();
        Track::new("FP01", fixes)
    }

    #[test]
    fn test_empty_track() {
        let tour = build_tour(&track(&[]), &TourSettings::default());
        assert!(tour.segments.is_empty());
        assert!(tour.terminal.is_none());
    }

    #[test]
    fn test_single_fix() {
        let tour = build_tour(&track(&[(26.0, -81.0)]), &TourSettings::default());
        assert!(tour.segments.is_empty());
        let terminal = tour.terminal.unwrap();
        assert_eq!(terminal.name, "1");
        assert_eq!(terminal.latitude, 26.0);
        assert_eq!(terminal.longitude, -81.0);
    }

    #[test]
    fn test_two_fix_example() {
        let fixes = vec![
            fix("FP01", 26.0, -81.0, "08:00"),
            fix("FP01", 26.1, -81.1, "09:00"),
        ];
        let tour = build_tour(&Track::new("FP01", fixes), &TourSettings::default());

        assert_eq!(tour.name, "Panther Telemetry Tour");
        assert_eq!(tour.segments.len(), 1);
        let expected = (-81.1_f64 - -81.0).atan2(26.1 - 26.0).to_degrees().rem_euclid(360.0);
        let segment = &tour.segments[0];
        assert_eq!(segment.heading_deg, expected);
        assert!((segment.heading_deg - 315.0).abs() < 1e-9);

        let names: Vec<_> = tour.placemarks().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["1", "2"]);
        assert_eq!(
            segment.placemark.description,
            "FLGTDATE: 1/1/2020, CATNUMBER: FP01, AGENCY: FWC, TIME: 08:00"
        );
        assert_eq!(
            tour.terminal.as_ref().unwrap().description,
            "FLGTDATE: 1/1/2020, CATNUMBER: FP01, AGENCY: FWC, TIME: 09:00"
        );
    }

    #[test]
    fn test_camera_poses() {
        let settings = TourSettings {
            altitude_m: 250.0,
            tilt_deg: 60.0,
            hold_duration_s: 2.0,
            travel_duration_s: 7.5,
            ..TourSettings::default()
        };
        let tour = build_tour(&track(&[(26.0, -81.0), (26.0, -80.9)]), &settings);
        let segment = &tour.segments[0];

        assert_eq!(segment.orientation.latitude, 26.0);
        assert_eq!(segment.orientation.longitude, -81.0);
        assert_eq!(segment.orientation.duration_s, 2.0);
        assert_eq!(segment.travel.longitude, -80.9);
        assert_eq!(segment.travel.duration_s, 7.5);

        for pose in [&segment.orientation, &segment.travel] {
            assert_eq!(pose.altitude_m, 250.0);
            assert_eq!(pose.tilt_deg, 60.0);
            assert_eq!(pose.heading_deg, segment.heading_deg);
        }
        assert!((segment.heading_deg - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_counts_and_labels() {
        let points: Vec<_> = (0..25)
            .map(|i| (26.0 + (i as f64 * 0.37).sin() * 0.1, -81.0 + (i as f64 * 0.11).cos() * 0.1))
            .collect();
        let tour = build_tour(&track(&points), &TourSettings::default());

        assert_eq!(tour.segments.len(), 24);
        assert_eq!(tour.poses().count(), 48);
        let names: Vec<String> = tour.placemarks().map(|p| p.name.clone()).collect();
        let expected: Vec<String> = (1..=25).map(|i| i.to_string()).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_segments_follow_track_order() {
        // Times deliberately out of order; the tour must not re-sort
        let fixes = vec![
            fix("FP01", 26.0, -81.0, "12:00"),
            fix("FP01", 26.2, -81.0, "07:00"),
            fix("FP01", 26.2, -81.3, "09:00"),
        ];
        let tour = build_tour(&Track::new("FP01", fixes), &TourSettings::default());

        assert_eq!(tour.segments[0].orientation.latitude, 26.0);
        assert_eq!(tour.segments[0].travel.latitude, 26.2);
        assert!(tour.segments[0].placemark.description.ends_with("TIME: 12:00"));
        assert_eq!(tour.segments[1].travel.longitude, -81.3);
        assert!(tour.segments[1].placemark.description.ends_with("TIME: 07:00"));
        assert!(tour.terminal.unwrap().description.ends_with("TIME: 09:00"));
    }

    #[test]
    fn test_heading_range() {
        let origin = fix("FP01", 26.0, -81.0, "08:00");
        let deltas = [
            (1.0, 0.0),
            (0.0, 1.0),
            (-1.0, 0.0),
            (0.0, -1.0),
            (-1.0, -1.0),
            (0.0, 0.0),
            (0.3, -0.7),
        ];
        for (d_lat, d_lon) in deltas {
            let next = fix("FP01", 26.0 + d_lat, -81.0 + d_lon, "09:00");
            let heading = heading_between(&origin, &next);
            assert!((0.0..360.0).contains(&heading), "heading {}", heading);
        }

        let north = fix("FP01", 27.0, -81.0, "09:00");
        assert_eq!(heading_between(&origin, &north), 0.0);
        let south = fix("FP01", 25.0, -81.0, "09:00");
        assert!((heading_between(&origin, &south) - 180.0).abs() < 1e-9);
        let west = fix("FP01", 26.0, -82.0, "09:00");
        assert!((heading_between(&origin, &west) - 270.0).abs() < 1e-9);
    }
}
