//! Client-side fare preview. The backend computes the authoritative fare.

pub const BASE_FARE: f64 = 50.0;
pub const PER_KM_RATE: f64 = 10.0;

/// `round(BASE_FARE + PER_KM_RATE * distance_km)`; negative or NaN distances count as zero.
pub fn estimate(distance_km: f64) -> i64 {
    let distance_km = if distance_km > 0.0 { distance_km } else { 0.0 };

    (BASE_FARE + PER_KM_RATE * distance_km).round() as i64
}
