//! Route searches for route-planner
//!
//! Single-route and four-way alternative searches on top of a `Router`.

use futures::future::join_all;
use log::{debug, warn};

use crate::core::error::{Error, Result};
use crate::core::provider::Router;
use crate::core::route::{Route, RouteKind, RouteSet};
use crate::core::stops::Stop;

fn ensure_routable(stops: &[Stop]) -> Result<()> {
    if stops.len() < 2 {
        return Err(Error::InsufficientStops { count: stops.len() });
    }
    Ok(())
}

/// Search for the optimal route only
pub async fn find_optimal<R: Router>(router: &R, stops: &[Stop]) -> Result<RouteSet> {
    ensure_routable(stops)?;

    let route = router
        .compute_route(stops, &RouteKind::Optimal.request())
        .await?;
    Ok(RouteSet::new(vec![route], stops.len()))
}

/// Search all four route variants concurrently.
///
/// Waits for every request to finish. If any of them failed the whole search
/// fails with the first error in slot order and no partial set is returned.
pub async fn find_alternatives<R: Router>(router: &R, stops: &[Stop]) -> Result<RouteSet> {
    ensure_routable(stops)?;

    let requests: Vec<_> = RouteKind::ALL.iter().map(|kind| kind.request()).collect();
    let searches = requests
        .iter()
        .map(|request| router.compute_route(stops, request));
    let results = join_all(searches).await;

    let failed = results.iter().filter(|r| r.is_err()).count();
    if failed > 0 {
        warn!("{failed} of {} alternative route requests failed", results.len());
    }

    let routes = results.into_iter().collect::<Result<Vec<Route>>>()?;
    debug!("Found {} alternative routes", routes.len());
    Ok(RouteSet::new(routes, stops.len()))
}
