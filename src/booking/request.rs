use crate::{
    api::DynAPI,
    booking::checkout::{CheckoutOptions, Completion, DynCheckout},
    entities::{PaymentOrder, PaymentReceipt, Place},
    error::Error,
    notify::DynNotifier,
    screen::Screen,
};

#[derive(Clone, Debug, PartialEq)]
pub enum BookingState {
    Idle,
    Requesting,
    AwaitingPayment {
        ride_id: String,
        order: PaymentOrder,
    },
    Confirming {
        ride_id: String,
        receipt: PaymentReceipt,
    },
    Done {
        ride_id: String,
    },
    Failed {
        reason: String,
    },
}

impl BookingState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Requesting => "requesting",
            Self::AwaitingPayment { .. } => "awaiting_payment",
            Self::Confirming { .. } => "confirming",
            Self::Done { .. } => "done",
            Self::Failed { .. } => "failed",
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Requesting | Self::Confirming { .. })
    }
}

/// Books a ride: create it, open a payment order, hand the order to the checkout
/// widget and confirm the payment with the backend. Every step waits on the previous.
pub struct RideRequest {
    api: DynAPI,
    checkout: DynCheckout,
    notifier: DynNotifier,
    key_id: String,
    currency: String,
    state: BookingState,
}

impl RideRequest {
    pub fn new(
        api: DynAPI,
        checkout: DynCheckout,
        notifier: DynNotifier,
        key_id: impl Into<String>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            api,
            checkout,
            notifier,
            key_id: key_id.into(),
            currency: currency.into(),
            state: BookingState::Idle,
        }
    }

    pub fn state(&self) -> &BookingState {
        &self.state
    }

    /// Runs one booking attempt. Returns the screen to go to once payment is confirmed.
    ///
    /// If the widget is dismissed without paying the attempt stays in
    /// `AwaitingPayment`; the ride remains requested on the backend.
    #[tracing::instrument(skip_all, fields(pickup = %pickup.formatted_address, dropoff = %dropoff.formatted_address))]
    pub async fn submit(&mut self, pickup: &Place, dropoff: &Place) -> Option<Screen> {
        if self.state.is_busy() {
            tracing::warn!(state = self.state.name(), "booking already in progress");
            return None;
        }

        self.transition(BookingState::Requesting);

        let (ride_id, order) = match self.create_ride_and_order(pickup, dropoff).await {
            Ok(created) => created,
            Err(err) => {
                self.fail(&err, err.user_message().to_string());
                return None;
            }
        };

        let (completion, receipt) = Completion::channel();
        let options = CheckoutOptions::new(&self.key_id, &order);

        self.transition(BookingState::AwaitingPayment {
            ride_id: ride_id.clone(),
            order,
        });

        if let Err(err) = self.checkout.open(options, completion).await {
            self.fail(&err, "Something went wrong!".into());
            return None;
        }

        let receipt = match receipt.await {
            Ok(receipt) => receipt,
            Err(_) => {
                tracing::info!(%ride_id, "checkout dismissed without payment");
                return None;
            }
        };

        self.transition(BookingState::Confirming {
            ride_id: ride_id.clone(),
            receipt: receipt.clone(),
        });

        match self.api.verify_payment(&receipt).await {
            Ok(()) => {
                self.transition(BookingState::Done { ride_id });
                self.notifier.success("Ride book successfully");
                Some(Screen::MyRides)
            }
            Err(err) => {
                self.fail(&err, "Payment verification failed!".into());
                None
            }
        }
    }

    async fn create_ride_and_order(
        &self,
        pickup: &Place,
        dropoff: &Place,
    ) -> Result<(String, PaymentOrder), Error> {
        let ride_id = self
            .api
            .request_ride(&pickup.formatted_address, &dropoff.formatted_address)
            .await?;

        let order = self.api.create_order(&ride_id, &self.currency).await?;

        Ok((ride_id, order))
    }

    fn transition(&mut self, next: BookingState) {
        tracing::info!(from = self.state.name(), to = next.name(), "booking state change");
        self.state = next;
    }

    fn fail(&mut self, err: &Error, reason: String) {
        tracing::error!(%err, state = self.state.name(), "booking failed");
        self.notifier.error(&reason);
        self.transition(BookingState::Failed { reason });
    }
}
