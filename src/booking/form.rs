use crate::{
    api::{DynGeocoding, DynRouting},
    booking::{
        autocomplete::Autocomplete,
        planner::{Quote, RoutePlanner},
    },
    entities::Place,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Pickup,
    Dropoff,
}

/// View state of the ride booking screen.
pub struct BookingForm {
    pickup: Autocomplete,
    dropoff: Autocomplete,
    planner: RoutePlanner,
}

impl BookingForm {
    pub fn new(geocoding: DynGeocoding, routing: DynRouting) -> Self {
        Self {
            pickup: Autocomplete::new(geocoding.clone()),
            dropoff: Autocomplete::new(geocoding),
            planner: RoutePlanner::new(routing),
        }
    }

    pub fn field(&self, field: Field) -> &Autocomplete {
        match field {
            Field::Pickup => &self.pickup,
            Field::Dropoff => &self.dropoff,
        }
    }

    pub async fn input(&self, field: Field, text: &str) {
        self.field(field).input(text).await;
    }

    /// Chooses a suggestion for `field`; the route is replanned if the pair changed.
    pub async fn select(&mut self, field: Field, index: usize) -> Option<&Quote> {
        let place = self.field(field).select(index)?;

        match field {
            Field::Pickup => self.planner.set_pickup(place).await,
            Field::Dropoff => self.planner.set_dropoff(place).await,
        }

        self.planner.quote()
    }

    pub fn planner(&self) -> &RoutePlanner {
        &self.planner
    }

    pub fn quote(&self) -> Option<&Quote> {
        self.planner.quote()
    }

    /// Both endpoints, once both have been picked from suggestions.
    pub fn endpoints(&self) -> Option<(&Place, &Place)> {
        Some((self.planner.pickup()?, self.planner.dropoff()?))
    }

    pub fn can_request(&self) -> bool {
        self.endpoints().is_some()
    }
}
