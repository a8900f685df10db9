pub mod completed;
pub mod dashboard;

pub use completed::CompletedRides;
pub use dashboard::{DashboardState, DriverDashboard, RefreshCause, Refreshed};
