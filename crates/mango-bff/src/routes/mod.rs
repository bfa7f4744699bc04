pub mod patients;
pub mod scientist;
pub mod sessions;

use axum::Router;

use crate::middleware::auth::AppState;

pub fn bff_routes() -> Router<AppState> {
    Router::new()
        .merge(scientist::routes())
        .merge(patients::routes())
        .merge(sessions::routes())
}
