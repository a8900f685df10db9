use crate::{
    api::DynAPI,
    entities::{CompletedRidesSummary, Ride},
    error::Error,
};

/// The driver's completed-ride history with its totals.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CompletedRides {
    pub rides: Vec<Ride>,
    pub summary: CompletedRidesSummary,
}

impl CompletedRides {
    #[tracing::instrument(skip(api))]
    pub async fn load(api: &DynAPI) -> Result<Self, Error> {
        let rides = api.completed_rides().await?;
        let summary = CompletedRidesSummary::from_rides(&rides);

        Ok(Self { rides, summary })
    }
}
