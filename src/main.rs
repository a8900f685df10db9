use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ridex::api::{DynAPI, DynGeocoding, DynRouting};
use ridex::backend::Backend;
use ridex::booking::{BookingForm, Field};
use ridex::config::Config;
use ridex::driver::DriverDashboard;
use ridex::error::{unauthorized_error, validation_error, Error};
use ridex::external::geoapify::Geoapify;
use ridex::notify::tracing_notifier;
use ridex::rider::MyRides;
use ridex::session::Session;

#[derive(Parser)]
#[command(name = "ridex", version, about = "RideX rider and driver client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan a route between two addresses and show the fare estimate
    Quote { pickup: String, dropoff: String },

    /// List the signed-in rider's rides
    Rides {
        #[arg(long, env = "RIDEX_EMAIL")]
        email: String,
        #[arg(long, env = "RIDEX_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Run the driver dashboard until interrupted
    Driver {
        #[arg(long, env = "RIDEX_EMAIL")]
        email: String,
        #[arg(long, env = "RIDEX_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        tracing::error!(%err, "ridex failed");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Error> {
    let config = Config::from_env()?;

    match cli.command {
        Commands::Quote { pickup, dropoff } => quote(&config, &pickup, &dropoff).await,
        Commands::Rides { email, password } => {
            let session = sign_in(&config, &email, &password).await?;
            let rides = MyRides::load(session.api().clone(), tracing_notifier()).await;

            for ride in rides.ongoing().iter().chain(rides.completed()) {
                println!(
                    "#{}  {:<12} {} -> {}  {}",
                    ride.short_id(),
                    ride.status.label(),
                    ride.pickup,
                    ride.dropoff,
                    ride.fare_label()
                );
            }

            Ok(())
        }
        Commands::Driver { email, password } => {
            let session = sign_in(&config, &email, &password).await?;
            let driver = session.user().ok_or_else(unauthorized_error)?;

            let dashboard = DriverDashboard::mount(
                session.api().clone(),
                tracing_notifier(),
                driver,
                config.poll_interval,
            );
            let events = dashboard.events();

            loop {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => break,
                    Ok(event) = events.recv() => {
                        let state = dashboard.snapshot();
                        tracing::info!(
                            cause = ?event.cause,
                            failures = event.failures,
                            available = dashboard.available_rides().len(),
                            current = ?state.current_ride.as_ref().map(|ride| ride.status.label()),
                            earnings = state.stats.today_earnings,
                            "dashboard refreshed"
                        );
                    }
                }
            }

            dashboard.unmount();
            Ok(())
        }
    }
}

async fn sign_in(config: &Config, email: &str, password: &str) -> Result<Session, Error> {
    let api = Arc::new(Backend::new(config)?) as DynAPI;
    let session = Session::new(api, tracing_notifier());

    session
        .login(email, password)
        .await
        .ok_or_else(unauthorized_error)?;

    Ok(session)
}

async fn quote(config: &Config, pickup: &str, dropoff: &str) -> Result<(), Error> {
    let geoapify = Arc::new(Geoapify::new(config)?);
    let mut form = BookingForm::new(
        geoapify.clone() as DynGeocoding,
        geoapify as DynRouting,
    );

    form.input(Field::Pickup, pickup).await;
    form.input(Field::Dropoff, dropoff).await;
    form.select(Field::Pickup, 0).await;
    form.select(Field::Dropoff, 0).await;

    let (from, to) = form
        .endpoints()
        .ok_or_else(|| validation_error("Could not find both addresses"))?;
    println!("{}  ->  {}", from.formatted_address, to.formatted_address);

    match form.quote() {
        Some(quote) => println!(
            "{} km, {} min, estimated fare ₹{}",
            quote.route.distance_km, quote.route.duration_min, quote.fare
        ),
        None => println!("No route available"),
    }

    Ok(())
}
