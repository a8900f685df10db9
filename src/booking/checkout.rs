use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::oneshot;

use crate::{
    entities::{PaymentOrder, PaymentReceipt},
    error::Error,
};

pub const MERCHANT_NAME: &str = "RideX";
pub const PAYMENT_DESCRIPTION: &str = "Ride Payment";

/// What the hosted checkout widget is opened with.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CheckoutOptions {
    pub key: String,
    pub amount: i64,
    pub currency: String,
    pub name: String,
    pub description: String,
    pub order_id: String,
}

impl CheckoutOptions {
    pub fn new(key: &str, order: &PaymentOrder) -> Self {
        Self {
            key: key.into(),
            amount: order.amount,
            currency: order.currency.clone(),
            name: MERCHANT_NAME.into(),
            description: PAYMENT_DESCRIPTION.into(),
            order_id: order.id.clone(),
        }
    }
}

/// Single-shot success callback for one widget session. Completing consumes it;
/// dropping it without completing means the user walked away from the widget.
#[derive(Debug)]
pub struct Completion(oneshot::Sender<PaymentReceipt>);

impl Completion {
    pub fn channel() -> (Self, oneshot::Receiver<PaymentReceipt>) {
        let (tx, rx) = oneshot::channel();
        (Self(tx), rx)
    }

    pub fn complete(self, receipt: PaymentReceipt) {
        if self.0.send(receipt).is_err() {
            tracing::warn!("payment completed after the booking flow was dropped");
        }
    }
}

/// The third-party checkout modal.
#[async_trait]
pub trait Checkout {
    /// Opens the widget. Returns once it is showing; the outcome arrives via `completion`.
    async fn open(&self, options: CheckoutOptions, completion: Completion) -> Result<(), Error>;
}

pub type DynCheckout = Arc<dyn Checkout + Send + Sync>;
