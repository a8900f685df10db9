pub mod autocomplete;
pub mod checkout;
pub mod fare;
pub mod form;
pub mod planner;
pub mod request;

pub use autocomplete::Autocomplete;
pub use checkout::{Checkout, CheckoutOptions, Completion, DynCheckout};
pub use form::{BookingForm, Field};
pub use planner::{Quote, RoutePlanner};
pub use request::{BookingState, RideRequest};
