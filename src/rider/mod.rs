pub mod details;
pub mod rides;

pub use details::{load_dashboard, DriverDetails};
pub use rides::MyRides;
