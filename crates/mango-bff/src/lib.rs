#![allow(non_snake_case)]

pub mod cookies;
pub mod error;
pub mod middleware;
pub mod routes;

use axum::Router;

pub use crate::cookies::CookiePolicy;
pub use crate::error::BffError;
use crate::middleware::auth::AppState;

pub fn bff_router(state: AppState) -> Router {
    routes::bff_routes().with_state(state)
}
