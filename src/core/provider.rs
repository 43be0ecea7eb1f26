//! Collaborator interfaces for route-planner
//!
//! Geocoding, routing and map drawing are done by external services. The
//! planner only talks to them through these traits.

use std::future::Future;

use crate::core::error::Result;
use crate::core::route::{Coord, Route, RouteRequest};
use crate::core::stops::Stop;

/// Resolves place names to positions and back
pub trait Geocoder {
    /// Position of the best match for an address or place name.
    ///
    /// Fails with `Error::GeocodeFailure` when nothing matches.
    fn geocode(&self, query: &str) -> impl Future<Output = Result<Coord>> + Send;

    /// Human readable address of a position
    fn reverse_geocode(&self, coord: Coord) -> impl Future<Output = Result<String>> + Send;
}

/// Computes a route through ordered stops
pub trait Router {
    /// Route from the first stop to the last, visiting the others in order.
    ///
    /// Fails with `Error::RouteFailure` when the provider finds no route.
    fn compute_route(
        &self,
        stops: &[Stop],
        request: &RouteRequest,
    ) -> impl Future<Output = Result<Route>> + Send;
}

/// Draws markers and route polylines on a map surface
pub trait MarkerRenderer {
    /// Opaque reference to a placed marker and its ordinal label
    type Handle;

    fn place_marker(&mut self, position: Coord, label: usize, title: &str) -> Self::Handle;

    fn remove_marker(&mut self, handle: Self::Handle);

    /// Move the viewport so every given marker is visible
    fn fit_view(&mut self, handles: &[&Self::Handle]);

    fn draw_route(&mut self, route: &Route, color: &str);

    fn clear_routes(&mut self);

    fn reset_view(&mut self, center: Coord, level: u8);
}
