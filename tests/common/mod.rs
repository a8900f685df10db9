//! Hand-written fakes for the trait seams.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::json;

use ridex::api::{AuthAPI, DynAPI, GeocodingAPI, PaymentAPI, RideAPI, RoutingAPI, API};
use ridex::booking::{Checkout, CheckoutOptions, Completion};
use ridex::entities::{
    Coordinates, DriverProfile, DriverStats, PaymentOrder, PaymentReceipt, Place, ProfileUpdate,
    Ride, RideLists, RiderDashboard, Route, SignupFields, User,
};
use ridex::error::{rejected_error, upstream_error, Error};
use ridex::notify::{DynNotifier, Notifier};

pub fn ride(id: &str, status: &str) -> Ride {
    serde_json::from_value(json!({
        "id": id,
        "pickup": "Connaught Place, New Delhi",
        "dropoff": "India Gate, New Delhi",
        "fare": 125,
        "status": status
    }))
    .unwrap()
}

pub fn user(role: &str, is_active: bool) -> User {
    serde_json::from_value(json!({
        "id": "user-1",
        "email": "asha@ridex.in",
        "name": "Asha",
        "role": role,
        "is_active": is_active
    }))
    .unwrap()
}

pub fn place(name: &str, lat: f64, lng: f64) -> Place {
    Place::new(name, Coordinates::new(lat, lng))
}

#[derive(Default)]
pub struct Counters {
    counts: Mutex<HashMap<&'static str, usize>>,
}

impl Counters {
    pub fn hit(&self, name: &'static str) {
        *self.counts.lock().entry(name).or_default() += 1;
    }

    pub fn get(&self, name: &str) -> usize {
        self.counts.lock().get(name).copied().unwrap_or(0)
    }
}

/// In-memory backend. Every call is counted by method name; calls named in
/// `failing` return an upstream error.
#[derive(Default)]
pub struct FakeBackend {
    pub calls: Counters,
    pub failing: Mutex<Vec<&'static str>>,
    pub user: Mutex<Option<User>>,
    pub available: Mutex<Vec<Ride>>,
    pub current: Mutex<Option<Ride>>,
    pub stats: Mutex<DriverStats>,
    pub rides: Mutex<RideLists>,
    pub completed: Mutex<Vec<Ride>>,
    pub verified: Mutex<Vec<PaymentReceipt>>,
    /// Holds `available_rides` responses back for this long.
    pub available_delay: Mutex<Option<Duration>>,
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn fail(&self, name: &'static str) {
        self.failing.lock().push(name);
    }

    pub fn recover(&self, name: &'static str) {
        self.failing.lock().retain(|failing| *failing != name);
    }

    fn call(&self, name: &'static str) -> Result<(), Error> {
        self.calls.hit(name);
        match self.failing.lock().contains(&name) {
            true => Err(upstream_error()),
            false => Ok(()),
        }
    }
}

pub fn dyn_api(backend: &Arc<FakeBackend>) -> DynAPI {
    backend.clone() as DynAPI
}

#[async_trait]
impl AuthAPI for FakeBackend {
    async fn signup(&self, _fields: &SignupFields) -> Result<(), Error> {
        self.call("signup")
    }

    async fn login(&self, email: &str, password: &str) -> Result<User, Error> {
        self.call("login")?;
        if password != "correct-horse" {
            return Err(rejected_error("Invalid login credentials"));
        }
        Ok(serde_json::from_value(json!({ "id": "user-1", "email": email })).unwrap())
    }

    async fn logout(&self) -> Result<(), Error> {
        self.call("logout")
    }

    async fn reset_password(&self, _email: &str) -> Result<Option<String>, Error> {
        self.call("reset_password")?;
        Ok(Some("Reset link sent".into()))
    }

    async fn update_password(&self, _password: &str) -> Result<(), Error> {
        self.call("update_password")
    }

    async fn current_user(&self) -> Result<Option<User>, Error> {
        self.call("current_user")?;
        Ok(self.user.lock().clone())
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, Error> {
        self.call("update_profile")?;
        Ok(serde_json::from_value(json!({
            "id": "user-1",
            "email": update.email,
            "name": update.name,
            "phone": update.phone,
            "is_active": update.is_active,
            "vehicle_no": update.vehicle_no,
            "vehicle_model": update.vehicle_model
        }))
        .unwrap())
    }
}

#[async_trait]
impl RideAPI for FakeBackend {
    async fn request_ride(&self, _pickup: &str, _dropoff: &str) -> Result<String, Error> {
        self.call("request_ride")?;
        Ok("ride-42".into())
    }

    async fn rider_dashboard(&self) -> Result<RiderDashboard, Error> {
        self.call("rider_dashboard")?;
        Ok(RiderDashboard::default())
    }

    async fn my_rides(&self) -> Result<RideLists, Error> {
        self.call("my_rides")?;
        Ok(self.rides.lock().clone())
    }

    async fn ride_driver(&self, _ride_id: &str) -> Result<DriverProfile, Error> {
        self.call("ride_driver")?;
        Ok(serde_json::from_value(json!({ "name": "Ravi", "vehicle_no": "DL 01 AB 1234" })).unwrap())
    }

    async fn ride_details(&self, ride_id: &str) -> Result<Ride, Error> {
        self.call("ride_details")?;
        Ok(ride(ride_id, "accepted"))
    }

    async fn available_rides(&self) -> Result<Vec<Ride>, Error> {
        self.call("available_rides")?;
        let delay = *self.available_delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.calls.hit("available_rides_answered");
        Ok(self.available.lock().clone())
    }

    async fn current_ride(&self) -> Result<Option<Ride>, Error> {
        self.call("current_ride")?;
        Ok(self.current.lock().clone())
    }

    async fn driver_stats(&self) -> Result<DriverStats, Error> {
        self.call("driver_stats")?;
        Ok(self.stats.lock().clone())
    }

    async fn completed_rides(&self) -> Result<Vec<Ride>, Error> {
        self.call("completed_rides")?;
        Ok(self.completed.lock().clone())
    }

    async fn accept_ride(&self, id: &str) -> Result<(), Error> {
        self.call("accept_ride")?;
        *self.current.lock() = Some(ride(id, "accepted"));
        self.available.lock().retain(|ride| ride.id != id);
        Ok(())
    }

    async fn start_ride(&self, id: &str) -> Result<(), Error> {
        self.call("start_ride")?;
        *self.current.lock() = Some(ride(id, "in_progress"));
        Ok(())
    }

    async fn complete_ride(&self, _id: &str) -> Result<(), Error> {
        self.call("complete_ride")?;
        *self.current.lock() = None;
        Ok(())
    }

    async fn cancel_ride(&self, _id: &str) -> Result<(), Error> {
        self.call("cancel_ride")?;
        *self.current.lock() = None;
        Ok(())
    }
}

#[async_trait]
impl PaymentAPI for FakeBackend {
    async fn create_order(&self, ride_id: &str, currency: &str) -> Result<PaymentOrder, Error> {
        self.call("create_order")?;
        Ok(PaymentOrder {
            id: format!("order_{}", ride_id),
            amount: 12_500,
            currency: currency.into(),
        })
    }

    async fn verify_payment(&self, receipt: &PaymentReceipt) -> Result<(), Error> {
        self.call("verify_payment")?;
        self.verified.lock().push(receipt.clone());
        Ok(())
    }

    async fn cancel_payment(&self, _ride_id: &str) -> Result<(), Error> {
        self.call("cancel_payment")
    }
}

impl API for FakeBackend {}

#[derive(Default)]
pub struct RecordingNotifier {
    pub successes: Mutex<Vec<String>>,
    pub errors: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn last_error(&self) -> Option<String> {
        self.errors.lock().last().cloned()
    }

    pub fn last_success(&self) -> Option<String> {
        self.successes.lock().last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.successes.lock().push(message.into());
    }

    fn error(&self, message: &str) {
        self.errors.lock().push(message.into());
    }
}

pub fn dyn_notifier(notifier: &Arc<RecordingNotifier>) -> DynNotifier {
    notifier.clone() as DynNotifier
}

/// Geocoder answering from a fixed table, optionally slowly for some inputs.
#[derive(Default)]
pub struct FakeGeocoding {
    pub calls: AtomicUsize,
    pub places: Mutex<HashMap<String, Vec<Place>>>,
    pub delays: Mutex<HashMap<String, Duration>>,
}

impl FakeGeocoding {
    pub fn with(entries: Vec<(&str, Vec<Place>)>) -> Arc<Self> {
        let geocoding = Self::default();
        for (text, places) in entries {
            geocoding.places.lock().insert(text.into(), places);
        }
        Arc::new(geocoding)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GeocodingAPI for FakeGeocoding {
    async fn suggest(&self, text: &str) -> Vec<Place> {
        if text.chars().count() < 3 {
            return Vec::new();
        }
        self.calls.fetch_add(1, Ordering::SeqCst);

        let delay = self.delays.lock().get(text).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.places.lock().get(text).cloned().unwrap_or_default()
    }
}

/// Router returning a straight line of the configured length.
pub struct FakeRouting {
    pub calls: AtomicUsize,
    pub distance_meters: Mutex<f64>,
    pub failing: Mutex<bool>,
}

impl FakeRouting {
    pub fn new(distance_meters: f64) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            distance_meters: Mutex::new(distance_meters),
            failing: Mutex::new(false),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RoutingAPI for FakeRouting {
    async fn route(&self, pickup: Coordinates, dropoff: Coordinates) -> Result<Route, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if *self.failing.lock() {
            return Err(upstream_error());
        }
        let distance = *self.distance_meters.lock();
        Ok(Route::new(vec![pickup, dropoff], distance, 1_200.0))
    }
}

pub enum CheckoutBehavior {
    Pay,
    Dismiss,
    FailToLoad,
}

/// Checkout widget that settles immediately according to `behavior`.
pub struct FakeCheckout {
    pub behavior: CheckoutBehavior,
    pub opened: Mutex<Vec<CheckoutOptions>>,
}

impl FakeCheckout {
    pub fn new(behavior: CheckoutBehavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            opened: Mutex::new(Vec::new()),
        })
    }

    pub fn opened(&self) -> usize {
        self.opened.lock().len()
    }
}

#[async_trait]
impl Checkout for FakeCheckout {
    async fn open(&self, options: CheckoutOptions, completion: Completion) -> Result<(), Error> {
        if let CheckoutBehavior::FailToLoad = self.behavior {
            return Err(upstream_error());
        }

        self.opened.lock().push(options.clone());

        match self.behavior {
            CheckoutBehavior::Pay => completion.complete(PaymentReceipt {
                order_id: options.order_id,
                payment_id: "pay_1".into(),
                signature: "sig".into(),
            }),
            _ => drop(completion),
        }

        Ok(())
    }
}
