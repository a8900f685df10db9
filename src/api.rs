use async_trait::async_trait;
use std::sync::Arc;

use crate::entities::{
    Coordinates, DriverProfile, DriverStats, PaymentOrder, PaymentReceipt, Place, ProfileUpdate,
    Ride, RideLists, RiderDashboard, Route, SignupFields, User,
};
use crate::error::Error;

#[async_trait]
pub trait AuthAPI {
    async fn signup(&self, fields: &SignupFields) -> Result<(), Error>;
    async fn login(&self, email: &str, password: &str) -> Result<User, Error>;
    async fn logout(&self) -> Result<(), Error>;
    async fn reset_password(&self, email: &str) -> Result<Option<String>, Error>;
    async fn update_password(&self, password: &str) -> Result<(), Error>;
    async fn current_user(&self) -> Result<Option<User>, Error>;
    async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, Error>;
}

#[async_trait]
pub trait RideAPI {
    /// Creates a ride and returns its id.
    async fn request_ride(&self, pickup: &str, dropoff: &str) -> Result<String, Error>;
    async fn rider_dashboard(&self) -> Result<RiderDashboard, Error>;
    async fn my_rides(&self) -> Result<RideLists, Error>;
    async fn ride_driver(&self, ride_id: &str) -> Result<DriverProfile, Error>;
    async fn ride_details(&self, ride_id: &str) -> Result<Ride, Error>;

    async fn available_rides(&self) -> Result<Vec<Ride>, Error>;
    async fn current_ride(&self) -> Result<Option<Ride>, Error>;
    async fn driver_stats(&self) -> Result<DriverStats, Error>;
    async fn completed_rides(&self) -> Result<Vec<Ride>, Error>;

    async fn accept_ride(&self, id: &str) -> Result<(), Error>;
    async fn start_ride(&self, id: &str) -> Result<(), Error>;
    async fn complete_ride(&self, id: &str) -> Result<(), Error>;
    async fn cancel_ride(&self, id: &str) -> Result<(), Error>;
}

#[async_trait]
pub trait PaymentAPI {
    async fn create_order(&self, ride_id: &str, currency: &str) -> Result<PaymentOrder, Error>;
    async fn verify_payment(&self, receipt: &PaymentReceipt) -> Result<(), Error>;
    /// Cancels a rider's ride and initiates the refund.
    async fn cancel_payment(&self, ride_id: &str) -> Result<(), Error>;
}

pub trait API: AuthAPI + RideAPI + PaymentAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;

/// Autocomplete against the geocoding provider. Never fails: errors yield no candidates.
#[async_trait]
pub trait GeocodingAPI {
    async fn suggest(&self, text: &str) -> Vec<Place>;
}

#[async_trait]
pub trait RoutingAPI {
    async fn route(&self, pickup: Coordinates, dropoff: Coordinates) -> Result<Route, Error>;
}

pub type DynGeocoding = Arc<dyn GeocodingAPI + Send + Sync>;
pub type DynRouting = Arc<dyn RoutingAPI + Send + Sync>;
