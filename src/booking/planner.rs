use geo_types::{Coord, Rect};

use crate::{
    api::DynRouting,
    booking::fare,
    entities::{Coordinates, Place, Route},
};

/// Route plus the fare preview derived from it.
#[derive(Clone, Debug, PartialEq)]
pub struct Quote {
    pub route: Route,
    pub fare: i64,
}

impl Quote {
    pub fn new(route: Route) -> Self {
        let fare = fare::estimate(route.distance_km);
        Self { route, fare }
    }
}

/// Keeps the pickup/dropoff pair and recomputes the route whenever the pair changes.
pub struct RoutePlanner {
    routing: DynRouting,
    pickup: Option<Place>,
    dropoff: Option<Place>,
    planned_for: Option<(Coordinates, Coordinates)>,
    quote: Option<Quote>,
}

impl RoutePlanner {
    pub fn new(routing: DynRouting) -> Self {
        Self {
            routing,
            pickup: None,
            dropoff: None,
            planned_for: None,
            quote: None,
        }
    }

    pub fn pickup(&self) -> Option<&Place> {
        self.pickup.as_ref()
    }

    pub fn dropoff(&self) -> Option<&Place> {
        self.dropoff.as_ref()
    }

    pub fn quote(&self) -> Option<&Quote> {
        self.quote.as_ref()
    }

    pub async fn set_pickup(&mut self, place: Place) {
        self.pickup = Some(place);
        self.replan().await;
    }

    pub async fn set_dropoff(&mut self, place: Place) {
        self.dropoff = Some(place);
        self.replan().await;
    }

    /// Map extent covering both markers, once both are known.
    pub fn bounds(&self) -> Option<Rect<f64>> {
        let pickup = self.pickup.as_ref()?;
        let dropoff = self.dropoff.as_ref()?;

        Some(Rect::new(
            Coord::from(pickup.coordinates),
            Coord::from(dropoff.coordinates),
        ))
    }

    // A failed lookup is only logged; the previous quote stays on screen and the
    // same pair is looked up again on the next selection.
    #[tracing::instrument(skip(self))]
    async fn replan(&mut self) {
        let (pickup, dropoff) = match (&self.pickup, &self.dropoff) {
            (Some(pickup), Some(dropoff)) => (pickup.coordinates, dropoff.coordinates),
            _ => return,
        };

        if self.planned_for == Some((pickup, dropoff)) {
            return;
        }

        match self.routing.route(pickup, dropoff).await {
            Ok(route) => {
                self.planned_for = Some((pickup, dropoff));
                let quote = Quote::new(route);
                tracing::info!(
                    distance_km = quote.route.distance_km,
                    duration_min = quote.route.duration_min,
                    fare = quote.fare,
                    "route planned"
                );
                self.quote = Some(quote);
            }
            Err(err) => tracing::error!(%err, "route lookup failed"),
        }
    }
}
