use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Read-only projection of a backend ride record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RideRecord")]
pub struct Ride {
    pub id: String,
    pub pickup: String,
    pub dropoff: String,
    pub fare: Option<f64>,
    pub status: Status,
    pub rider_name: Option<String>,
    pub rider_phone: Option<String>,
    pub driver_name: Option<String>,
    pub driver_phone: Option<String>,
    pub user_canceled: bool,
    pub rating: Option<f64>,
    pub created_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Identifies a ride in a backend payload. Joined rows may carry `ride_id`
/// next to (or instead of) `id`; `id` wins when both are present.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RideKey {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    ride_id: Option<String>,
}

impl RideKey {
    pub fn resolve(self) -> Option<String> {
        self.id
            .filter(|id| !id.is_empty())
            .or(self.ride_id.filter(|id| !id.is_empty()))
    }
}

#[derive(Deserialize)]
struct RideRecord {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    ride_id: Option<String>,
    pickup: String,
    dropoff: String,
    #[serde(default)]
    fare: Option<f64>,
    status: Status,
    #[serde(default)]
    rider_name: Option<String>,
    #[serde(default)]
    rider_phone: Option<String>,
    #[serde(default)]
    driver_name: Option<String>,
    #[serde(default)]
    driver_phone: Option<String>,
    #[serde(default)]
    user_canceled: bool,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    completed_at: Option<DateTime<Utc>>,
}

impl TryFrom<RideRecord> for Ride {
    type Error = String;

    fn try_from(record: RideRecord) -> Result<Self, Self::Error> {
        let key = RideKey {
            id: record.id,
            ride_id: record.ride_id,
        };

        Ok(Self {
            id: key.resolve().ok_or("ride without id")?,
            pickup: record.pickup,
            dropoff: record.dropoff,
            fare: record.fare,
            status: record.status,
            rider_name: record.rider_name,
            rider_phone: record.rider_phone,
            driver_name: record.driver_name,
            driver_phone: record.driver_phone,
            user_canceled: record.user_canceled,
            rating: record.rating,
            created_at: record.created_at,
            completed_at: record.completed_at,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[serde(alias = "pending")]
    Requested,
    Accepted,
    #[serde(alias = "picked_up")]
    InProgress,
    Completed,
    #[serde(alias = "canceled")]
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl Status {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Requested => "requested",
            Self::Accepted => "accepted",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Unknown => "unknown",
        }
    }

    pub fn label(&self) -> String {
        self.name().replace('_', " ").to_uppercase()
    }

    pub fn is_ongoing(&self) -> bool {
        matches!(self, Self::Requested | Self::Accepted | Self::InProgress)
    }
}

impl Ride {
    pub fn short_id(&self) -> &str {
        let start = self
            .id
            .char_indices()
            .rev()
            .nth(5)
            .map(|(index, _)| index)
            .unwrap_or(0);

        &self.id[start..]
    }

    pub fn fare_label(&self) -> String {
        match self.fare {
            Some(fare) => format!("₹{}", fare),
            None => "TBD".into(),
        }
    }

    pub fn can_start(&self) -> bool {
        self.status == Status::Accepted
    }

    pub fn can_complete(&self) -> bool {
        self.status == Status::InProgress
    }

    pub fn driver_can_cancel(&self) -> bool {
        matches!(self.status, Status::Accepted | Status::InProgress) && !self.user_canceled
    }

    pub fn rider_can_cancel(&self) -> bool {
        matches!(self.status, Status::Requested | Status::Accepted)
    }
}
