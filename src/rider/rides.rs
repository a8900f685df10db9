use crate::{
    api::DynAPI,
    entities::{Ride, RideLists},
    error::{invalid_invocation_error, Error},
    notify::DynNotifier,
};

/// The rider's "My Rides" screen.
pub struct MyRides {
    api: DynAPI,
    notifier: DynNotifier,
    rides: RideLists,
}

impl MyRides {
    #[tracing::instrument(skip_all)]
    pub async fn load(api: DynAPI, notifier: DynNotifier) -> Self {
        let rides = match api.my_rides().await {
            Ok(rides) => rides,
            Err(err) => {
                tracing::error!(%err, "fetching rides failed");
                RideLists::default()
            }
        };

        Self {
            api,
            notifier,
            rides,
        }
    }

    pub fn ongoing(&self) -> &[Ride] {
        &self.rides.ongoing
    }

    pub fn completed(&self) -> &[Ride] {
        &self.rides.completed
    }

    /// Cancels an ongoing ride and refunds it. On success the ride leaves the ongoing
    /// list right away rather than on the next load.
    #[tracing::instrument(skip(self))]
    pub async fn cancel(&mut self, ride_id: &str) -> Result<(), Error> {
        let cancellable = self
            .rides
            .ongoing
            .iter()
            .any(|ride| ride.id == ride_id && ride.rider_can_cancel());

        if !cancellable {
            return Err(invalid_invocation_error());
        }

        match self.api.cancel_payment(ride_id).await {
            Ok(()) => {
                self.rides.ongoing.retain(|ride| ride.id != ride_id);
                self.notifier
                    .success("Ride cancelled successfully. Refund initiated!");
                Ok(())
            }
            Err(err) => {
                tracing::error!(%err, "cancel ride failed");
                self.notifier
                    .error("Failed to cancel the ride. Please try again.");
                Err(err)
            }
        }
    }
}
