use super::Backend;

use async_trait::async_trait;
use serde::{de::IgnoredAny, Deserialize};
use serde_json::json;

use crate::{
    api::PaymentAPI,
    entities::{PaymentOrder, PaymentReceipt},
    error::Error,
};

#[derive(Deserialize)]
struct OrderPayload {
    order: PaymentOrder,
}

#[async_trait]
impl PaymentAPI for Backend {
    #[tracing::instrument(skip(self))]
    async fn create_order(&self, ride_id: &str, currency: &str) -> Result<PaymentOrder, Error> {
        let payload: OrderPayload = self
            .post(
                "/payment/create-order",
                &json!({ "ride_id": ride_id, "currency": currency }),
            )
            .await?;

        Ok(payload.order)
    }

    #[tracing::instrument(skip(self, receipt), fields(order_id = %receipt.order_id))]
    async fn verify_payment(&self, receipt: &PaymentReceipt) -> Result<(), Error> {
        let _: IgnoredAny = self.post("/payment/verify", receipt).await?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn cancel_payment(&self, ride_id: &str) -> Result<(), Error> {
        let _: IgnoredAny = self
            .post("/payment/cancel", &json!({ "ride_id": ride_id }))
            .await?;

        Ok(())
    }
}
