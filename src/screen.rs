/// Destinations a flow can ask the view layer to navigate to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    Home,
    Login,
    Signup,
    Dashboard,
    BookRide,
    MyRides,
    DriverDashboard,
    CompletedRides,
    Profile,
    DriverDetails { ride_id: String },
}

impl Screen {
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".into(),
            Self::Login => "/login".into(),
            Self::Signup => "/signup".into(),
            Self::Dashboard => "/dashboard".into(),
            Self::BookRide => "/ride-book".into(),
            Self::MyRides => "/my-rides".into(),
            Self::DriverDashboard => "/driver-dashboard".into(),
            Self::CompletedRides => "/driver/completed-rides".into(),
            Self::Profile => "/profile".into(),
            Self::DriverDetails { ride_id } => format!("/ride/{}/driver", ride_id),
        }
    }
}
