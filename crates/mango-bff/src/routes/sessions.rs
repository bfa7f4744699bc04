use axum::{
    extract::{Path, State},
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};
use mango_types::{ApiResponse, CreateSessionRequest, EdfFile, Session};

use crate::error::BffError;
use crate::middleware::auth::{require_bff_auth, AccessToken, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/bff/sessions", get(list_sessions))
        .route("/bff/sessions/new", post(create_session))
        .route("/bff/sessions/new/selectFile", get(discover_files))
        .route("/bff/sessions/show/:file_id", get(show_session))
        .route_layer(middleware::from_fn(require_bff_auth))
}

async fn list_sessions(
    State(state): State<AppState>,
    Extension(AccessToken(accessToken)): Extension<AccessToken>,
) -> Result<Json<ApiResponse<Vec<Session>>>, BffError> {
    let sessions = state.gateway.list_sessions(&accessToken).await?;
    Ok(Json(ApiResponse::ok(sessions)))
}

async fn create_session(
    State(state): State<AppState>,
    Extension(AccessToken(accessToken)): Extension<AccessToken>,
    Json(body): Json<CreateSessionRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, BffError> {
    body.validate().map_err(BffError::BadRequest)?;

    let answer = state.gateway.process_edf_file(&accessToken, &body).await?;
    let message = answer
        .get("message")
        .and_then(|m| m.as_str())
        .unwrap_or("Sessão criada com sucesso!")
        .to_string();

    Ok(Json(ApiResponse::ok_with_message(message, answer)))
}

async fn discover_files(
    State(state): State<AppState>,
    Extension(AccessToken(accessToken)): Extension<AccessToken>,
) -> Result<Json<ApiResponse<Vec<EdfFile>>>, BffError> {
    let files = state.gateway.discover_edf_files(&accessToken).await?;
    Ok(Json(ApiResponse::ok(files)))
}

async fn show_session(
    State(state): State<AppState>,
    Extension(AccessToken(accessToken)): Extension<AccessToken>,
    Path(fileId): Path<String>,
) -> Result<Json<ApiResponse<Session>>, BffError> {
    let session = state.gateway.show_session(&accessToken, &fileId).await?;
    Ok(Json(ApiResponse::ok(session)))
}
