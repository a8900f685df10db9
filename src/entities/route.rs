use geo_types::LineString;

use crate::entities::Coordinates;

#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    /// Positions are stored as `x = lng, y = lat`.
    pub polyline: LineString<f64>,
    pub distance_km: f64,
    pub duration_min: i64,
}

impl Route {
    /// Distance is cut (not rounded) to two decimals, duration rounded to whole minutes.
    pub fn new(points: Vec<Coordinates>, distance_meters: f64, time_seconds: f64) -> Self {
        let polyline = points.into_iter().map(geo_types::Coord::from).collect();

        Self {
            polyline,
            distance_km: (distance_meters.max(0.0) / 10.0).trunc() / 100.0,
            duration_min: (time_seconds.max(0.0) / 60.0).round() as i64,
        }
    }

    pub fn points(&self) -> Vec<Coordinates> {
        self.polyline.coords().map(|c| Coordinates::from(*c)).collect()
    }
}
