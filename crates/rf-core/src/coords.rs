//! Geographic coordinate pair, passed through to the map renderer unprojected.

use serde::{Deserialize, Serialize};

/// A WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Arithmetic mean of the given positions. None for an empty input.
    pub fn centroid<I: IntoIterator<Item = LatLon>>(points: I) -> Option<LatLon> {
        let (mut sum_lat, mut sum_lon, mut n) = (0.0f64, 0.0f64, 0usize);
        for p in points {
            sum_lat += p.lat;
            sum_lon += p.lon;
            n += 1;
        }
        if n == 0 {
            return None;
        }
        Some(LatLon::new(sum_lat / n as f64, sum_lon / n as f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn centroid_is_mean_of_points() {
        let c = LatLon::centroid([LatLon::new(1.0, 10.0), LatLon::new(3.0, 20.0)]).unwrap();
        assert_abs_diff_eq!(c.lat, 2.0);
        assert_abs_diff_eq!(c.lon, 15.0);
    }

    #[test]
    fn centroid_of_nothing_is_none() {
        assert!(LatLon::centroid(Vec::new()).is_none());
    }
}
