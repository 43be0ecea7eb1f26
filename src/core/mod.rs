//! Core library modules for route-planner
//!
//! Stop list bookkeeping, the route model, collaborator traits and the
//! Kakao-backed provider.

pub mod config;
pub mod error;
pub mod kakao;
pub mod planner;
pub mod provider;
pub mod route;
pub mod routing;
pub mod scene;
pub mod stops;

// Re-export main types
pub use config::{ProviderConfig, RetryPolicy};
pub use kakao::KakaoClient;
pub use planner::RoutePlanner;
pub use scene::{SceneRenderer, DEFAULT_CENTER, DEFAULT_LEVEL};
