pub mod api;
pub mod backend;
pub mod booking;
pub mod config;
pub mod driver;
pub mod entities;
pub mod error;
pub mod external;
pub mod notify;
pub mod rider;
pub mod screen;
pub mod session;
pub mod validation;
