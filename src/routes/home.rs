// ABOUTME: Plaintext landing and about routes
// ABOUTME: Lets operators check from a browser that the service is up

use axum::{routing::get, Router};

/// Body returned for `GET /`
pub const HOME_MESSAGE: &str = "Easy Strava Upload is running";

/// Body returned for `GET /about`
pub const ABOUT_MESSAGE: &str =
    "Easy Strava Upload: create manual Strava activities with automatically refreshed OAuth credentials";

/// Home routes implementation
pub struct HomeRoutes;

impl HomeRoutes {
    /// Create `/` and `/about`
    pub fn routes() -> Router {
        Router::new()
            .route("/", get(|| async { HOME_MESSAGE }))
            .route("/about", get(|| async { ABOUT_MESSAGE }))
    }
}
