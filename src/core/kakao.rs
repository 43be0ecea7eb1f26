//! Kakao REST provider for route-planner
//!
//! Geocoding through the Kakao Local API and directions through the Kakao
//! Mobility waypoint directions API.

use std::time::Duration;

use log::{debug, warn};
use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::core::config::{ProviderConfig, RetryPolicy};
use crate::core::error::{Error, Result};
use crate::core::provider::{Geocoder, Router};
use crate::core::route::{Avoid, Coord, Priority, Route, RouteRequest};
use crate::core::stops::Stop;

/// Most intermediate stops the waypoint directions API accepts
pub const MAX_WAYPOINTS: usize = 30;

/// Global HTTP client with pooling and timeouts
static GLOBAL_CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .tcp_keepalive(Duration::from_secs(60))
        .pool_idle_timeout(Duration::from_secs(90))
        .timeout(Duration::from_secs(15))
        .connect_timeout(Duration::from_secs(5))
        .user_agent(format!("route-planner/{}", env!("PLANNER_VERSION")))
        .build()
        .expect("Failed to create HTTP client")
});

/// Execute an operation, retrying network errors with exponential backoff
async fn retry_on_network_error<F, Fut, T>(policy: &RetryPolicy, operation: F) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<T>>,
{
    let mut attempt = 0;

    loop {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(Error::NetworkError(msg)) if attempt < policy.max_retries => {
                attempt += 1;
                let delay = policy.delay(attempt);
                warn!("Network error (attempt {attempt}): {msg}. Retrying in {delay:?}");
                tokio::time::sleep(delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Send a request and decode a JSON body, mapping HTTP failures to errors
async fn fetch_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(status_error(status, &body));
    }
    response
        .json::<T>()
        .await
        .map_err(|e| Error::HttpError(format!("Unexpected response body: {e}")))
}

fn status_error(status: StatusCode, body: &str) -> Error {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::HttpError(format!(
            "Request rejected ({status}); check the Kakao REST API key"
        )),
        StatusCode::TOO_MANY_REQUESTS => {
            Error::NetworkError(format!("Rate limited by provider ({status})"))
        }
        s if s.is_server_error() => Error::NetworkError(format!("Provider unavailable ({status})")),
        _ => Error::HttpError(format!("{status}: {}", body.trim())),
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    documents: Vec<SearchDocument>,
}

/// Address and keyword search hits carry positions as strings
#[derive(Debug, Deserialize)]
struct SearchDocument {
    x: String,
    y: String,
}

impl SearchDocument {
    fn coord(&self) -> Result<Coord> {
        let lng = self.x.parse::<f64>();
        let lat = self.y.parse::<f64>();
        match (lat, lng) {
            (Ok(lat), Ok(lng)) => Ok(Coord::new(lat, lng)),
            _ => Err(Error::HttpError(format!(
                "Invalid coordinates in search result: x={}, y={}",
                self.x, self.y
            ))),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Coord2AddressResponse {
    #[serde(default)]
    documents: Vec<Coord2AddressDocument>,
}

#[derive(Debug, Deserialize)]
struct Coord2AddressDocument {
    road_address: Option<AddressName>,
    address: Option<AddressName>,
}

#[derive(Debug, Deserialize)]
struct AddressName {
    address_name: String,
}

#[derive(Debug, Serialize)]
struct Point {
    x: f64,
    y: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

impl From<&Stop> for Point {
    fn from(stop: &Stop) -> Self {
        Self {
            x: stop.longitude,
            y: stop.latitude,
            name: Some(stop.name.clone()),
        }
    }
}

#[derive(Debug, Serialize)]
struct DirectionsBody {
    origin: Point,
    destination: Point,
    waypoints: Vec<Point>,
    priority: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    avoid: Vec<&'static str>,
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    routes: Vec<DirectionsRoute>,
}

#[derive(Debug, Deserialize)]
struct DirectionsRoute {
    result_code: i64,
    #[serde(default)]
    result_msg: String,
    summary: Option<DirectionsSummary>,
    #[serde(default)]
    sections: Vec<DirectionsSection>,
}

#[derive(Debug, Deserialize)]
struct DirectionsSummary {
    distance: f64,
    duration: f64,
}

#[derive(Debug, Deserialize)]
struct DirectionsSection {
    #[serde(default)]
    roads: Vec<DirectionsRoad>,
}

#[derive(Debug, Deserialize)]
struct DirectionsRoad {
    /// Flattened `[x0, y0, x1, y1, ...]`
    #[serde(default)]
    vertexes: Vec<f64>,
}

fn priority_param(priority: Priority) -> &'static str {
    match priority {
        Priority::Recommend => "RECOMMEND",
        Priority::Fastest => "TIME",
        Priority::Shortest => "DISTANCE",
    }
}

fn avoid_param(avoid: Avoid) -> &'static str {
    match avoid {
        Avoid::Toll => "toll",
    }
}

/// Build the directions request body for ordered stops
fn directions_body(stops: &[Stop], request: &RouteRequest) -> Result<DirectionsBody> {
    let (first, rest) = stops
        .split_first()
        .ok_or(Error::InsufficientStops { count: 0 })?;
    let (last, middle) = rest.split_last().ok_or(Error::InsufficientStops { count: 1 })?;

    if middle.len() > MAX_WAYPOINTS {
        return Err(Error::InvalidInput(format!(
            "{} waypoints requested, the provider accepts at most {MAX_WAYPOINTS}",
            middle.len()
        )));
    }

    Ok(DirectionsBody {
        origin: first.into(),
        destination: last.into(),
        waypoints: middle.iter().map(Point::from).collect(),
        priority: priority_param(request.priority),
        avoid: request.avoid.iter().copied().map(avoid_param).collect(),
    })
}

/// Convert a provider route into the planner's route model
fn into_route(response: DirectionsResponse, request: &RouteRequest) -> Result<Route> {
    let route = response
        .routes
        .into_iter()
        .next()
        .ok_or_else(|| Error::RouteFailure("provider returned no routes".to_string()))?;

    if route.result_code != 0 {
        return Err(Error::RouteFailure(format!(
            "{} (code {})",
            route.result_msg, route.result_code
        )));
    }

    let summary = route
        .summary
        .ok_or_else(|| Error::RouteFailure("route has no summary".to_string()))?;

    let path = route
        .sections
        .iter()
        .map(|section| {
            section
                .roads
                .iter()
                .flat_map(|road| road.vertexes.chunks_exact(2))
                .map(|xy| Coord::new(xy[1], xy[0]))
                .collect::<Vec<Coord>>()
        })
        .collect();

    Ok(Route {
        kind: request.kind,
        distance_meters: summary.distance,
        duration_seconds: summary.duration,
        path,
    })
}

/// Geocoder and router backed by the Kakao REST APIs
#[derive(Debug, Clone)]
pub struct KakaoClient {
    config: ProviderConfig,
}

impl KakaoClient {
    /// Create a client; fails when no API key is configured
    pub fn new(config: ProviderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    async fn search(&self, endpoint: &str, query: &str) -> Result<Option<Coord>> {
        let url = format!("{}{endpoint}", self.config.local_base_url);
        let response: SearchResponse = retry_on_network_error(&self.config.retry, || {
            fetch_json(
                GLOBAL_CLIENT
                    .get(&url)
                    .header("Authorization", self.config.authorization())
                    .query(&[("query", query)]),
            )
        })
        .await?;

        response.documents.first().map(SearchDocument::coord).transpose()
    }
}

impl Geocoder for KakaoClient {
    async fn geocode(&self, query: &str) -> Result<Coord> {
        debug!("Geocoding '{query}'");

        // Addresses first, then place names such as station or shop names
        if let Some(coord) = self.search("/v2/local/search/address.json", query).await? {
            return Ok(coord);
        }
        if let Some(coord) = self.search("/v2/local/search/keyword.json", query).await? {
            return Ok(coord);
        }

        Err(Error::GeocodeFailure(format!("no match for '{query}'")))
    }

    async fn reverse_geocode(&self, coord: Coord) -> Result<String> {
        debug!("Reverse geocoding {coord}");
        let url = format!(
            "{}/v2/local/geo/coord2address.json",
            self.config.local_base_url
        );
        let x = coord.lng.to_string();
        let y = coord.lat.to_string();

        let response: Coord2AddressResponse = retry_on_network_error(&self.config.retry, || {
            fetch_json(
                GLOBAL_CLIENT
                    .get(&url)
                    .header("Authorization", self.config.authorization())
                    .query(&[("x", x.as_str()), ("y", y.as_str())]),
            )
        })
        .await?;

        response
            .documents
            .into_iter()
            .find_map(|doc| doc.road_address.or(doc.address))
            .map(|a| a.address_name)
            .ok_or_else(|| Error::GeocodeFailure(format!("no address at {coord}")))
    }
}

impl Router for KakaoClient {
    async fn compute_route(&self, stops: &[Stop], request: &RouteRequest) -> Result<Route> {
        let body = directions_body(stops, request)?;
        let url = format!("{}/v1/waypoints/directions", self.config.navi_base_url);
        debug!(
            "Requesting {} route through {} stops",
            request.kind.label(),
            stops.len()
        );

        let response: DirectionsResponse = retry_on_network_error(&self.config.retry, || {
            fetch_json(
                GLOBAL_CLIENT
                    .post(&url)
                    .header("Authorization", self.config.authorization())
                    .json(&body),
            )
        })
        .await?;

        into_route(response, request)
    }
}
