mod coordinates;
mod payment;
mod place;
mod ride;
mod route;
mod stats;
mod user;

pub use coordinates::Coordinates;
pub use payment::{PaymentOrder, PaymentReceipt};
pub use place::Place;
pub use ride::{Ride, RideKey, Status as RideStatus};
pub use route::Route;
pub use stats::{CompletedRidesSummary, DriverStats, RiderStats, DEFAULT_DRIVER_RATING};
pub use user::{DriverProfile, ProfileUpdate, Role, SignupFields, User};

/// The rider's ride history, split the way the backend returns it.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
pub struct RideLists {
    #[serde(default)]
    pub ongoing: Vec<Ride>,
    #[serde(default)]
    pub completed: Vec<Ride>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RiderDashboard {
    pub recent_rides: Vec<Ride>,
    pub stats: RiderStats,
}
