use serde::{Deserialize, Serialize};

use crate::entities::Coordinates;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub formatted_address: String,
    pub coordinates: Coordinates,
    #[serde(default)]
    pub place_id: Option<String>,
}

impl Place {
    pub fn new(formatted_address: impl Into<String>, coordinates: Coordinates) -> Self {
        Self {
            formatted_address: formatted_address.into(),
            coordinates,
            place_id: None,
        }
    }
}
