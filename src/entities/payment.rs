use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaymentOrder {
    pub id: String,
    /// Smallest currency unit, as issued by the payment provider.
    pub amount: i64,
    pub currency: String,
}

/// Identifiers handed back by the checkout widget on success.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
}
