//! Planner state and command handlers for route-planner
//!
//! `RoutePlanner` owns the stop list, the map surface and the current route
//! set. Front ends call its `on_*` handlers and `find_*` searches; each
//! returns a distinguishable `Error` when it cannot proceed.

use log::info;

use crate::core::error::{Error, Result};
use crate::core::provider::{Geocoder, MarkerRenderer, Router};
use crate::core::route::{Coord, RouteSet, RouteSummary};
use crate::core::routing;
use crate::core::scene::{DEFAULT_CENTER, DEFAULT_LEVEL};
use crate::core::stops::{Stop, StopList};

/// Route planner state for one session
pub struct RoutePlanner<G, R, M: MarkerRenderer> {
    geocoder: G,
    router: R,
    renderer: M,
    stops: StopList<M>,
    routes: RouteSet,
    selected: Option<usize>,
}

impl<G, R, M> RoutePlanner<G, R, M>
where
    G: Geocoder,
    R: Router,
    M: MarkerRenderer,
{
    pub fn new(geocoder: G, router: R, renderer: M) -> Self {
        Self {
            geocoder,
            router,
            renderer,
            stops: StopList::new(),
            routes: RouteSet::default(),
            selected: None,
        }
    }

    pub fn stops(&self) -> &StopList<M> {
        &self.stops
    }

    pub fn renderer(&self) -> &M {
        &self.renderer
    }

    pub fn routes(&self) -> &RouteSet {
        &self.routes
    }

    /// Index of the displayed route, if any
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Geocode `name` and append it as a stop; returns the new stop's index
    pub async fn on_add_stop(&mut self, name: &str) -> Result<usize> {
        let name = validate_name(name)?;
        let coord = self.geocoder.geocode(name).await?;
        Ok(self.push_stop(name, coord))
    }

    /// Append a stop at a known position, e.g. the user's current location
    pub fn on_add_coordinate(&mut self, name: &str, coord: Coord) -> Result<usize> {
        let name = validate_name(name)?;
        validate_coord(coord)?;
        Ok(self.push_stop(name, coord))
    }

    /// Append a picked map point, named by its address unless a name is given
    pub async fn on_pick_point(&mut self, coord: Coord, name: Option<&str>) -> Result<usize> {
        validate_coord(coord)?;
        let address = self.geocoder.reverse_geocode(coord).await?;

        let name = match name.map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => address,
        };
        Ok(self.push_stop(&name, coord))
    }

    pub fn on_remove_stop(&mut self, index: usize) -> Result<Stop> {
        let stop = self.stops.remove_stop(&mut self.renderer, index)?;
        self.stops.fit_view(&mut self.renderer);
        info!("Removed stop '{}'", stop.name);
        Ok(stop)
    }

    /// Drop every stop, route and polyline
    pub fn on_clear_all(&mut self) {
        self.stops.clear_all(&mut self.renderer);
        self.renderer.clear_routes();
        self.routes = RouteSet::default();
        self.selected = None;
    }

    /// Clear everything and return the viewport to its starting position
    pub fn on_reset(&mut self) {
        self.on_clear_all();
        self.renderer.reset_view(DEFAULT_CENTER, DEFAULT_LEVEL);
    }

    /// Frame every stop on the map
    pub fn on_fit_view(&mut self) {
        self.stops.fit_view(&mut self.renderer);
    }

    /// Search the optimal route and display it
    pub async fn find_optimal_route(&mut self) -> Result<RouteSummary> {
        let stops = self.stops.current_stops();
        let routes = routing::find_optimal(&self.router, &stops).await?;
        self.replace_routes(routes)
    }

    /// Search all four route variants and display the optimal one.
    ///
    /// On failure the previous routes stay on display.
    pub async fn find_alternative_routes(&mut self) -> Result<RouteSummary> {
        let stops = self.stops.current_stops();
        let routes = routing::find_alternatives(&self.router, &stops).await?;
        self.replace_routes(routes)
    }

    /// Display the route in slot `index`
    pub fn select_route(&mut self, index: usize) -> Result<RouteSummary> {
        let summary = self.routes.summary(index).ok_or(Error::OutOfRange {
            index,
            len: self.routes.len(),
        })?;
        self.display(index);
        Ok(summary)
    }

    /// Which of the four route slots can be selected
    pub fn available_routes(&self) -> [bool; RouteSet::CAPACITY] {
        self.routes.available()
    }

    /// Summary of the displayed route, counted against the stops it was
    /// searched through
    pub fn route_summary(&self) -> Option<RouteSummary> {
        self.selected.and_then(|i| self.routes.summary(i))
    }

    fn push_stop(&mut self, name: &str, coord: Coord) -> usize {
        let index = self
            .stops
            .add_stop(&mut self.renderer, name, coord.lat, coord.lng);
        self.stops.fit_view(&mut self.renderer);
        info!("Added stop {} '{name}' at {coord}", index + 1);
        index
    }

    fn replace_routes(&mut self, routes: RouteSet) -> Result<RouteSummary> {
        self.routes = routes;
        self.display(0);
        self.route_summary().ok_or_else(|| {
            Error::RouteFailure("provider returned an empty route set".to_string())
        })
    }

    fn display(&mut self, index: usize) {
        self.renderer.clear_routes();
        if let Some(route) = self.routes.get(index) {
            self.renderer.draw_route(route, route.kind.color());
            self.selected = Some(index);
        } else {
            self.selected = None;
        }
    }
}

fn validate_name(name: &str) -> Result<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::InvalidInput("stop name is empty".to_string()));
    }
    Ok(name)
}

fn validate_coord(coord: Coord) -> Result<()> {
    if !coord.is_valid() {
        return Err(Error::InvalidInput(format!("invalid coordinate: {coord}")));
    }
    Ok(())
}
