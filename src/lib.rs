//! # Route-planner Library
//!
//! Plans driving routes through an ordered list of named stops.
//!
//! ## Features
//!
//! - **Ordered stops**: every stop keeps a numbered marker; labels stay `1..=N`
//!   in list order through any insertion or removal
//! - **Pluggable providers**: geocoding, routing and drawing sit behind the
//!   `Geocoder`, `Router` and `MarkerRenderer` traits
//! - **Alternative routes**: four route variants searched concurrently,
//!   all-or-nothing
//! - **Kakao backend**: `KakaoClient` talks to the Kakao Local and Kakao
//!   Mobility REST APIs
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use route_planner::{KakaoClient, ProviderConfig, RoutePlanner, SceneRenderer};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = KakaoClient::new(ProviderConfig::with_api_key("my-rest-key"))?;
//!     let mut planner = RoutePlanner::new(client.clone(), client, SceneRenderer::new());
//!
//!     planner.on_add_stop("서울역").await?;
//!     planner.on_add_stop("강남역").await?;
//!
//!     let summary = planner.find_alternative_routes().await?;
//!     println!("{summary}");
//!     Ok(())
//! }
//! ```

// Re-export core types that users might need
pub use crate::core::error::{Error, Result};
pub use crate::core::provider::{Geocoder, MarkerRenderer, Router};
pub use crate::core::route::{
    Avoid, Bounds, Coord, Priority, Route, RouteKind, RouteRequest, RouteSet, RouteSummary,
};
pub use crate::core::scene::{Marker, MarkerId, Polyline, View};
pub use crate::core::stops::{Stop, StopList};
pub use crate::core::{
    KakaoClient, ProviderConfig, RetryPolicy, RoutePlanner, SceneRenderer, DEFAULT_CENTER,
    DEFAULT_LEVEL,
};

// Internal modules
mod core;
