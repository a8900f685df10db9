use std::sync::Arc;
use std::time::Duration;

use async_channel::{Receiver, Sender, TrySendError};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::{
    api::DynAPI,
    entities::{DriverStats, Ride, User},
    error::{invalid_invocation_error, Error},
    notify::DynNotifier,
};

const EVENT_BUFFER: usize = 16;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DashboardState {
    pub available_rides: Vec<Ride>,
    pub current_ride: Option<Ride>,
    pub stats: DriverStats,
    pub refreshed_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshCause {
    Mount,
    Tick,
    Action,
    Manual,
}

/// Emitted after every completed fetch triple.
#[derive(Clone, Debug, PartialEq)]
pub struct Refreshed {
    pub cause: RefreshCause,
    pub at: DateTime<Utc>,
    pub failures: usize,
}

struct Shared {
    mounted: bool,
    state: DashboardState,
}

/// A mounted driver dashboard.
///
/// Mounting spawns the poll task, which fetches immediately and then once per
/// interval. Dropping the dashboard (or calling [`DriverDashboard::unmount`]) stops
/// the task; responses still in flight at that point are discarded.
pub struct DriverDashboard {
    api: DynAPI,
    notifier: DynNotifier,
    driver: User,
    shared: Arc<Mutex<Shared>>,
    events_tx: Sender<Refreshed>,
    events_rx: Receiver<Refreshed>,
    task: JoinHandle<()>,
}

impl DriverDashboard {
    /// Must be called from within a tokio runtime.
    #[tracing::instrument(skip(api, notifier, driver), fields(driver_id = %driver.id))]
    pub fn mount(api: DynAPI, notifier: DynNotifier, driver: User, period: Duration) -> Self {
        let shared = Arc::new(Mutex::new(Shared {
            mounted: true,
            state: DashboardState::default(),
        }));
        let (events_tx, events_rx) = async_channel::bounded(EVENT_BUFFER);

        let task = tokio::spawn(poll(
            api.clone(),
            shared.clone(),
            events_tx.clone(),
            period,
        ));

        Self {
            api,
            notifier,
            driver,
            shared,
            events_tx,
            events_rx,
            task,
        }
    }

    pub fn unmount(self) {}

    pub fn driver(&self) -> &User {
        &self.driver
    }

    pub fn events(&self) -> Receiver<Refreshed> {
        self.events_rx.clone()
    }

    pub fn snapshot(&self) -> DashboardState {
        self.shared.lock().state.clone()
    }

    /// Rides offered to this driver. Inactive drivers are never shown any.
    pub fn available_rides(&self) -> Vec<Ride> {
        if !self.driver.is_active {
            return Vec::new();
        }

        self.shared.lock().state.available_rides.clone()
    }

    pub fn current_ride(&self) -> Option<Ride> {
        self.shared.lock().state.current_ride.clone()
    }

    pub fn stats(&self) -> DriverStats {
        self.shared.lock().state.stats.clone()
    }

    pub async fn refresh(&self) {
        refetch(&self.api, &self.shared, &self.events_tx, RefreshCause::Manual).await;
    }

    #[tracing::instrument(skip(self, ride), fields(ride_id = %ride.id))]
    pub async fn accept(&self, ride: &Ride) -> Result<(), Error> {
        let result = self.api.accept_ride(&ride.id).await;
        self.after_action(result, "Ride accepted successfully!", "Failed to accept ride")
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn start(&self) -> Result<(), Error> {
        let ride = self.current_ride_where(Ride::can_start)?;
        let result = self.api.start_ride(&ride.id).await;
        self.after_action(result, "Ride started!", "Failed to start ride")
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn complete(&self) -> Result<(), Error> {
        let ride = self.current_ride_where(Ride::can_complete)?;
        let result = self.api.complete_ride(&ride.id).await;
        self.after_action(result, "Ride completed successfully!", "Failed to complete ride")
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn cancel(&self) -> Result<(), Error> {
        let ride = self.current_ride_where(Ride::driver_can_cancel)?;
        let result = self.api.cancel_ride(&ride.id).await;
        self.after_action(result, "Ride canceled successfully!", "Failed to cancel ride")
            .await
    }

    fn current_ride_where(&self, allowed: fn(&Ride) -> bool) -> Result<Ride, Error> {
        match self.current_ride() {
            Some(ride) if allowed(&ride) => Ok(ride),
            _ => Err(invalid_invocation_error()),
        }
    }

    async fn after_action(
        &self,
        result: Result<(), Error>,
        success: &str,
        failure: &str,
    ) -> Result<(), Error> {
        match result {
            Ok(()) => {
                self.notifier.success(success);
                refetch(&self.api, &self.shared, &self.events_tx, RefreshCause::Action).await;
                Ok(())
            }
            Err(err) => {
                tracing::error!(%err, "ride action failed");
                match err.is_internal() {
                    true => self.notifier.error(failure),
                    false => self.notifier.error(&err.message),
                }
                Err(err)
            }
        }
    }
}

impl Drop for DriverDashboard {
    fn drop(&mut self) {
        self.shared.lock().mounted = false;
        self.task.abort();
        tracing::debug!(driver_id = %self.driver.id, "driver dashboard unmounted");
    }
}

async fn poll(
    api: DynAPI,
    shared: Arc<Mutex<Shared>>,
    events: Sender<Refreshed>,
    period: Duration,
) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    // the first tick completes immediately
    let mut cause = RefreshCause::Mount;
    loop {
        ticker.tick().await;
        if !refetch(&api, &shared, &events, cause).await {
            return;
        }
        cause = RefreshCause::Tick;
    }
}

/// Fetches available rides, the current ride and stats concurrently and applies
/// them. Returns false once the dashboard is gone.
async fn refetch(
    api: &DynAPI,
    shared: &Mutex<Shared>,
    events: &Sender<Refreshed>,
    cause: RefreshCause,
) -> bool {
    let (available, current, stats) = futures::join!(
        api.available_rides(),
        api.current_ride(),
        api.driver_stats()
    );

    let failures = match apply(shared, available, current, stats) {
        Some(failures) => failures,
        None => return false,
    };

    let event = Refreshed {
        cause,
        at: Utc::now(),
        failures,
    };
    if let Err(TrySendError::Full(_)) = events.try_send(event) {
        tracing::debug!("refresh event buffer full, event dropped");
    }

    true
}

/// Each result is applied on its own, so one failing fetch leaves the others' data
/// fresh. Responses arriving after unmount are discarded and yield `None`.
fn apply(
    shared: &Mutex<Shared>,
    available: Result<Vec<Ride>, Error>,
    current: Result<Option<Ride>, Error>,
    stats: Result<DriverStats, Error>,
) -> Option<usize> {
    let mut shared = shared.lock();
    if !shared.mounted {
        tracing::debug!("dropping responses for an unmounted dashboard");
        return None;
    }

    let mut failures = 0;

    match available {
        Ok(rides) => shared.state.available_rides = rides,
        Err(err) => {
            failures += 1;
            tracing::error!(%err, "available rides fetch failed");
        }
    }

    match current {
        Ok(ride) => shared.state.current_ride = ride,
        Err(err) => {
            failures += 1;
            tracing::error!(%err, "current ride fetch failed");
        }
    }

    match stats {
        Ok(stats) => shared.state.stats = stats,
        Err(err) => {
            failures += 1;
            tracing::error!(%err, "driver stats fetch failed");
        }
    }

    shared.state.refreshed_at = Some(Utc::now());

    Some(failures)
}
