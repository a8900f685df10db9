use serde::{Deserialize, Serialize};

use crate::entities::Ride;

pub const DEFAULT_DRIVER_RATING: f64 = 4.8;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DriverStats {
    pub today_earnings: f64,
    pub completed_rides: u32,
    pub rating: f64,
}

impl Default for DriverStats {
    fn default() -> Self {
        Self {
            today_earnings: 0.0,
            completed_rides: 0,
            rating: DEFAULT_DRIVER_RATING,
        }
    }
}

impl DriverStats {
    /// Missing or zero values fall back to the dashboard defaults.
    pub fn from_parts(
        today_earnings: Option<f64>,
        completed_rides: Option<u32>,
        rating: Option<f64>,
    ) -> Self {
        Self {
            today_earnings: today_earnings.unwrap_or(0.0),
            completed_rides: completed_rides.unwrap_or(0),
            rating: rating
                .filter(|rating| *rating != 0.0)
                .unwrap_or(DEFAULT_DRIVER_RATING),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiderStats {
    #[serde(default)]
    pub total_rides: u32,
    #[serde(default)]
    pub completed_rides: u32,
    #[serde(default)]
    pub total_spent: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CompletedRidesSummary {
    pub total_earnings: f64,
    pub total_rides: usize,
    pub average_rating: f64,
}

impl CompletedRidesSummary {
    pub fn from_rides(rides: &[Ride]) -> Self {
        let total_rides = rides.len();
        let total_earnings = rides.iter().filter_map(|ride| ride.fare).sum();

        let average_rating = match total_rides {
            0 => 0.0,
            n => {
                let sum: f64 = rides.iter().filter_map(|ride| ride.rating).sum();
                (sum / n as f64 * 10.0).round() / 10.0
            }
        };

        Self {
            total_earnings,
            total_rides,
            average_rating,
        }
    }
}
