use serde::Serialize;
use std::f64::consts::PI;
use strum_macros::Display;

use super::error::ConvertError;

// WGS-84 / UTM constants
const K0: f64 = 0.9996;
const E: f64 = 0.00669438;
const E2: f64 = E * E;
const E3: f64 = E2 * E;
const E_P2: f64 = E / (1.0 - E);
const EQUATORIAL_RADIUS_M: f64 = 6_378_137.0;

const FALSE_EASTING_M: f64 = 500_000.0;
const FALSE_NORTHING_SOUTH_M: f64 = 10_000_000.0;

const MIN_EASTING_M: f64 = 100_000.0;
const MAX_EASTING_M: f64 = 1_000_000.0;
const MIN_NORTHING_M: f64 = 0.0;
const MAX_NORTHING_M: f64 = 10_000_000.0;
const MIN_LATITUDE_DEG: f64 = -80.0;
const MAX_LATITUDE_DEG: f64 = 84.0;

const M1: f64 = 1.0 - E / 4.0 - 3.0 * E2 / 64.0 - 5.0 * E3 / 256.0;
const M2: f64 = 3.0 * E / 8.0 + 3.0 * E2 / 32.0 + 45.0 * E3 / 1024.0;
const M3: f64 = 15.0 * E2 / 256.0 + 45.0 * E3 / 1024.0;
const M4: f64 = 35.0 * E3 / 3072.0;

const BANDS: &str = "CDEFGHJKLMNPQRSTUVWX";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, utoipa::ToSchema)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Hemisphere {
    North,
    South,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, utoipa::ToSchema)]
pub struct LatLon {
    pub latitude: f64,
    pub longitude: f64,
}

/// A single UTM zone on the WGS-84 ellipsoid.
///
/// The zone number and latitude band are fixed at construction; every
/// conversion goes through the same zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UtmZone {
    number: u8,
    band: char,
}

impl Default for UtmZone {
    /// Zone 17R, which covers south Florida.
    fn default() -> Self {
        Self {
            number: 17,
            band: 'R',
        }
    }
}

impl UtmZone {
    pub fn new(number: u8, band: char) -> Result<Self, ConvertError> {
        let band = band.to_ascii_uppercase();
        if !(1..=60).contains(&number) || !BANDS.contains(band) {
            return Err(ConvertError::InvalidZone { number, band });
        }
        Ok(Self { number, band })
    }

    pub fn hemisphere(&self) -> Hemisphere {
        if self.band >= 'N' {
            Hemisphere::North
        } else {
            Hemisphere::South
        }
    }

    pub fn central_longitude_deg(&self) -> f64 {
        (self.number as f64 - 1.0) * 6.0 - 180.0 + 3.0
    }

    /// Inverse transverse Mercator: easting/northing in meters to degrees.
    pub fn to_lat_lon(&self, easting: f64, northing: f64) -> Result<LatLon, ConvertError> {
        let invalid = |reason| ConvertError::InvalidCoordinate {
            easting,
            northing,
            reason,
        };

        if !easting.is_finite() || !northing.is_finite() {
            return Err(invalid("non-finite value"));
        }
        if !(MIN_EASTING_M..MAX_EASTING_M).contains(&easting) {
            return Err(invalid("easting out of range [100000, 1000000)"));
        }
        if !(MIN_NORTHING_M..=MAX_NORTHING_M).contains(&northing) {
            return Err(invalid("northing out of range [0, 10000000]"));
        }

        let x = easting - FALSE_EASTING_M;
        let y = match self.hemisphere() {
            Hemisphere::North => northing,
            Hemisphere::South => northing - FALSE_NORTHING_SOUTH_M,
        };

        let (p2, p3, p4, p5) = footpoint_coefficients();
        let m = y / K0;
        let mu = m / (EQUATORIAL_RADIUS_M * M1);

        let p_rad = mu
            + p2 * (2.0 * mu).sin()
            + p3 * (4.0 * mu).sin()
            + p4 * (6.0 * mu).sin()
            + p5 * (8.0 * mu).sin();

        let p_sin = p_rad.sin();
        let p_cos = p_rad.cos();
        let p_tan = p_sin / p_cos;
        let p_tan2 = p_tan * p_tan;
        let p_tan4 = p_tan2 * p_tan2;

        let ep_sin = 1.0 - E * p_sin * p_sin;
        let n = EQUATORIAL_RADIUS_M / ep_sin.sqrt();
        let r = (1.0 - E) / ep_sin;

        let c = E_P2 * p_cos * p_cos;
        let c2 = c * c;

        let d = x / (n * K0);
        let d2 = d * d;
        let d3 = d2 * d;
        let d4 = d3 * d;
        let d5 = d4 * d;
        let d6 = d5 * d;

        let latitude = p_rad
            - (p_tan / r)
                * (d2 / 2.0 - d4 / 24.0 * (5.0 + 3.0 * p_tan2 + 10.0 * c - 4.0 * c2 - 9.0 * E_P2))
            + d6 / 720.0
                * (61.0 + 90.0 * p_tan2 + 298.0 * c + 45.0 * p_tan4 - 252.0 * E_P2 - 3.0 * c2);

        let longitude = (d - d3 / 6.0 * (1.0 + 2.0 * p_tan2 + c)
            + d5 / 120.0 * (5.0 - 2.0 * c + 28.0 * p_tan2 - 3.0 * c2 + 8.0 * E_P2 + 24.0 * p_tan4))
            / p_cos;
        let longitude = wrap_angle(longitude + self.central_longitude_deg().to_radians());

        let position = LatLon {
            latitude: latitude.to_degrees(),
            longitude: longitude.to_degrees(),
        };
        if !position.latitude.is_finite() || !position.longitude.is_finite() {
            return Err(invalid("projection did not converge"));
        }
        if !(MIN_LATITUDE_DEG..=MAX_LATITUDE_DEG).contains(&position.latitude) {
            return Err(invalid("latitude outside UTM coverage [-80, 84]"));
        }
        Ok(position)
    }

    /// Forward transverse Mercator into this zone, regardless of which zone
    /// the position naturally falls in.
    pub fn to_utm(&self, latitude: f64, longitude: f64) -> Result<(f64, f64), ConvertError> {
        let invalid = |reason| ConvertError::InvalidPosition {
            latitude,
            longitude,
            reason,
        };
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(invalid("non-finite value"));
        }
        if !(MIN_LATITUDE_DEG..=MAX_LATITUDE_DEG).contains(&latitude) {
            return Err(invalid("latitude outside UTM coverage [-80, 84]"));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(invalid("longitude out of range [-180, 180]"));
        }

        let lat_rad = latitude.to_radians();
        let lat_sin = lat_rad.sin();
        let lat_cos = lat_rad.cos();
        let lat_tan = lat_sin / lat_cos;
        let lat_tan2 = lat_tan * lat_tan;
        let lat_tan4 = lat_tan2 * lat_tan2;

        let n = EQUATORIAL_RADIUS_M / (1.0 - E * lat_sin * lat_sin).sqrt();
        let c = E_P2 * lat_cos * lat_cos;

        let a = lat_cos
            * wrap_angle(longitude.to_radians() - self.central_longitude_deg().to_radians());
        let a2 = a * a;
        let a3 = a2 * a;
        let a4 = a3 * a;
        let a5 = a4 * a;
        let a6 = a5 * a;

        let m = EQUATORIAL_RADIUS_M
            * (M1 * lat_rad - M2 * (2.0 * lat_rad).sin() + M3 * (4.0 * lat_rad).sin()
                - M4 * (6.0 * lat_rad).sin());

        let easting = K0
            * n
            * (a + a3 / 6.0 * (1.0 - lat_tan2 + c)
                + a5 / 120.0 * (5.0 - 18.0 * lat_tan2 + lat_tan4 + 72.0 * c - 58.0 * E_P2))
            + FALSE_EASTING_M;

        let mut northing = K0
            * (m + n
                * lat_tan
                * (a2 / 2.0
                    + a4 / 24.0 * (5.0 - lat_tan2 + 9.0 * c + 4.0 * c * c)
                    + a6 / 720.0 * (61.0 - 58.0 * lat_tan2 + lat_tan4 + 600.0 * c - 330.0 * E_P2)));

        if self.hemisphere() == Hemisphere::South {
            northing += FALSE_NORTHING_SOUTH_M;
        }

        Ok((easting, northing))
    }
}

impl std::fmt::Display for UtmZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.number, self.band)
    }
}

fn footpoint_coefficients() -> (f64, f64, f64, f64) {
    let sqrt_e = (1.0 - E).sqrt();
    let e1 = (1.0 - sqrt_e) / (1.0 + sqrt_e);
    let e2 = e1 * e1;
    let e3 = e2 * e1;
    let e4 = e3 * e1;
    let e5 = e4 * e1;

    (
        3.0 / 2.0 * e1 - 27.0 / 32.0 * e3 + 269.0 / 512.0 * e5,
        21.0 / 16.0 * e2 - 55.0 / 32.0 * e4,
        151.0 / 96.0 * e3 - 417.0 / 128.0 * e5,
        1097.0 / 512.0 * e4,
    )
}

/// Wraps radians into [-pi, pi).
fn wrap_angle(value: f64) -> f64 {
    (value + PI).rem_euclid(2.0 * PI) - PI
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_point_zone_17r() {
        let zone = UtmZone::default();
        let pos = zone.to_lat_lon(500_000.0, 2_875_683.838760388).unwrap();
        assert!((pos.latitude - 26.0).abs() < 1e-4);
        assert!((pos.longitude - -81.0).abs() < 1e-4);
    }

    #[test]
    fn test_off_meridian_point() {
        let zone = UtmZone::default();
        let pos = zone.to_lat_lon(490_000.7183394994, 2_886_762.122055941).unwrap();
        assert!((pos.latitude - 26.1).abs() < 1e-4);
        assert!((pos.longitude - -81.1).abs() < 1e-4);
    }

    #[test]
    fn test_forward_matches_known_value() {
        // Well known zone 32U sample
        let zone = UtmZone::new(32, 'U').unwrap();
        let (e, n) = zone.to_utm(51.2, 7.5).unwrap();
        assert!((e - 395_201.310_381_13).abs() < 1e-3);
        assert!((n - 5_673_135.241_182_375).abs() < 1e-3);
    }

    #[test]
    fn test_round_trip_within_zone() {
        let zone = UtmZone::default();
        for easting in [200_000.0, 350_000.0, 500_000.0, 612_345.6, 780_000.0] {
            for northing in [2_700_000.0, 2_850_000.0, 2_990_000.0, 3_100_000.0] {
                let pos = zone.to_lat_lon(easting, northing).unwrap();
                let (e, n) = zone.to_utm(pos.latitude, pos.longitude).unwrap();
                assert!((e - easting).abs() < 0.05, "easting {} -> {}", easting, e);
                assert!((n - northing).abs() < 0.05, "northing {} -> {}", northing, n);
            }
        }
    }

    #[test]
    fn test_southern_hemisphere_round_trip() {
        let zone = UtmZone::new(56, 'H').unwrap();
        assert_eq!(zone.hemisphere(), Hemisphere::South);
        let pos = zone.to_lat_lon(334_786.0, 6_252_080.0).unwrap();
        assert!(pos.latitude < 0.0);
        let (e, n) = zone.to_utm(pos.latitude, pos.longitude).unwrap();
        assert!((e - 334_786.0).abs() < 1e-3);
        assert!((n - 6_252_080.0).abs() < 1e-3);
    }

    #[test]
    fn test_output_ranges() {
        let zone = UtmZone::default();
        for (e, n) in [(100_000.0, 0.0), (999_999.0, 9_300_000.0), (500_000.0, 1.0)] {
            let pos = zone.to_lat_lon(e, n).unwrap();
            assert!((-90.0..=90.0).contains(&pos.latitude));
            assert!((-180.0..=180.0).contains(&pos.longitude));
        }
    }

    #[test]
    fn test_rejects_invalid_input() {
        let zone = UtmZone::default();
        assert!(zone.to_lat_lon(f64::NAN, 2_875_000.0).is_err());
        assert!(zone.to_lat_lon(500_000.0, f64::INFINITY).is_err());
        assert!(zone.to_lat_lon(99_999.0, 2_875_000.0).is_err());
        assert!(zone.to_lat_lon(1_000_000.0, 2_875_000.0).is_err());
        assert!(zone.to_lat_lon(500_000.0, -1.0).is_err());
        assert!(zone.to_lat_lon(500_000.0, 10_000_001.0).is_err());
        assert!(matches!(
            zone.to_lat_lon(50.0, 2_875_000.0),
            Err(ConvertError::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn test_rejects_positions_beyond_utm_coverage() {
        let north = UtmZone::default();
        for (e, n) in [
            (999_999.0, 10_000_000.0),
            (100_000.0, 10_000_000.0),
            (500_000.0, 10_000_000.0),
        ] {
            assert!(
                matches!(
                    north.to_lat_lon(e, n),
                    Err(ConvertError::InvalidCoordinate { .. })
                ),
                "({}, {}) should be rejected",
                e,
                n
            );
        }

        let south = UtmZone::new(17, 'G').unwrap();
        assert!(matches!(
            south.to_lat_lon(500_000.0, 0.0),
            Err(ConvertError::InvalidCoordinate { .. })
        ));

        // Still inside coverage near the northern limit
        let pos = north.to_lat_lon(500_000.0, 9_300_000.0).unwrap();
        assert!(pos.latitude > 83.0 && pos.latitude <= 84.0);
    }

    #[test]
    fn test_zone_validation() {
        assert!(UtmZone::new(0, 'R').is_err());
        assert!(UtmZone::new(61, 'R').is_err());
        assert!(UtmZone::new(17, 'I').is_err());
        assert!(UtmZone::new(17, 'O').is_err());
        assert_eq!(UtmZone::new(17, 'r').unwrap(), UtmZone::default());
        assert_eq!(UtmZone::default().to_string(), "17R");
        assert_eq!(UtmZone::default().central_longitude_deg(), -81.0);
    }
}
