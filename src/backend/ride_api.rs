use super::Backend;

use async_trait::async_trait;
use serde::{de::IgnoredAny, Deserialize};
use serde_json::json;

use crate::{
    api::RideAPI,
    entities::{DriverProfile, DriverStats, Ride, RideKey, RideLists, RiderDashboard, RiderStats},
    error::{malformed_response_error, Error},
};

#[derive(Deserialize)]
struct RidePayload {
    #[serde(default)]
    ride: Option<Ride>,
}

#[derive(Deserialize)]
struct RequestedPayload {
    #[serde(default)]
    ride: Option<RideKey>,
}

#[derive(Deserialize)]
struct RidesPayload {
    #[serde(default)]
    rides: Option<Vec<Ride>>,
}

#[derive(Deserialize)]
struct StatsPayload {
    #[serde(default)]
    today_earnings: Option<f64>,
    #[serde(default)]
    completed_rides: Option<u32>,
    #[serde(default)]
    rating: Option<f64>,
}

#[derive(Deserialize)]
struct DashboardPayload {
    #[serde(default, rename = "recentRides")]
    recent_rides: Option<Vec<Ride>>,
    #[serde(default)]
    stats: Option<RiderStats>,
}

#[derive(Deserialize)]
struct DriverPayload {
    #[serde(default)]
    driver: Option<DriverProfile>,
}

impl Backend {
    async fn ride_action(&self, action: &str, id: &str) -> Result<(), Error> {
        let _: IgnoredAny = self
            .post(&format!("/ride/{}/{}", action, id), &json!({}))
            .await?;

        Ok(())
    }
}

#[async_trait]
impl RideAPI for Backend {
    #[tracing::instrument(skip(self))]
    async fn request_ride(&self, pickup: &str, dropoff: &str) -> Result<String, Error> {
        let payload: RequestedPayload = self
            .post("/ride/request", &json!({ "pickup": pickup, "dropoff": dropoff }))
            .await?;

        payload
            .ride
            .and_then(RideKey::resolve)
            .ok_or_else(|| malformed_response_error("ride request response without ride id"))
    }

    #[tracing::instrument(skip(self))]
    async fn rider_dashboard(&self) -> Result<RiderDashboard, Error> {
        let payload: DashboardPayload = self.get("/ride/dashboard").await?;

        Ok(RiderDashboard {
            recent_rides: payload.recent_rides.unwrap_or_default(),
            stats: payload.stats.unwrap_or_default(),
        })
    }

    #[tracing::instrument(skip(self))]
    async fn my_rides(&self) -> Result<RideLists, Error> {
        self.get("/ride/my-rides").await
    }

    #[tracing::instrument(skip(self))]
    async fn ride_driver(&self, ride_id: &str) -> Result<DriverProfile, Error> {
        let payload: DriverPayload = self.get(&format!("/ride/driver/{}", ride_id)).await?;

        payload
            .driver
            .ok_or_else(|| malformed_response_error("driver response without driver"))
    }

    #[tracing::instrument(skip(self))]
    async fn ride_details(&self, ride_id: &str) -> Result<Ride, Error> {
        let payload: RidePayload = self.get(&format!("/ride/details/{}", ride_id)).await?;

        payload
            .ride
            .ok_or_else(|| malformed_response_error("details response without ride"))
    }

    #[tracing::instrument(skip(self))]
    async fn available_rides(&self) -> Result<Vec<Ride>, Error> {
        let payload: RidesPayload = self.get("/ride/available").await?;

        Ok(payload.rides.unwrap_or_default())
    }

    #[tracing::instrument(skip(self))]
    async fn current_ride(&self) -> Result<Option<Ride>, Error> {
        let payload: RidePayload = self.get("/ride/current").await?;

        Ok(payload.ride)
    }

    #[tracing::instrument(skip(self))]
    async fn driver_stats(&self) -> Result<DriverStats, Error> {
        let payload: StatsPayload = self.get("/ride/stats").await?;

        Ok(DriverStats::from_parts(
            payload.today_earnings,
            payload.completed_rides,
            payload.rating,
        ))
    }

    #[tracing::instrument(skip(self))]
    async fn completed_rides(&self) -> Result<Vec<Ride>, Error> {
        let payload: RidesPayload = self.get("/ride/completed").await?;

        Ok(payload.rides.unwrap_or_default())
    }

    #[tracing::instrument(skip(self))]
    async fn accept_ride(&self, id: &str) -> Result<(), Error> {
        self.ride_action("accept", id).await
    }

    #[tracing::instrument(skip(self))]
    async fn start_ride(&self, id: &str) -> Result<(), Error> {
        self.ride_action("start", id).await
    }

    #[tracing::instrument(skip(self))]
    async fn complete_ride(&self, id: &str) -> Result<(), Error> {
        self.ride_action("complete", id).await
    }

    #[tracing::instrument(skip(self))]
    async fn cancel_ride(&self, id: &str) -> Result<(), Error> {
        self.ride_action("cancel", id).await
    }
}
