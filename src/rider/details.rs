use crate::{
    api::DynAPI,
    entities::{DriverProfile, Ride, RiderDashboard},
    error::Error,
};

/// Driver card for one of the rider's rides. The ride itself is extra context and
/// may be missing.
#[derive(Clone, Debug, PartialEq)]
pub struct DriverDetails {
    pub driver: DriverProfile,
    pub ride: Option<Ride>,
}

impl DriverDetails {
    #[tracing::instrument(skip(api))]
    pub async fn load(api: &DynAPI, ride_id: &str) -> Result<Self, Error> {
        let driver = api.ride_driver(ride_id).await?;

        let ride = match api.ride_details(ride_id).await {
            Ok(ride) => Some(ride),
            Err(err) => {
                tracing::info!(%err, "ride details not available");
                None
            }
        };

        Ok(Self { driver, ride })
    }
}

/// The rider landing dashboard; an unreachable backend shows empty totals.
#[tracing::instrument(skip(api))]
pub async fn load_dashboard(api: &DynAPI) -> RiderDashboard {
    match api.rider_dashboard().await {
        Ok(dashboard) => dashboard,
        Err(err) => {
            tracing::error!(%err, "fetching dashboard failed");
            RiderDashboard::default()
        }
    }
}
