use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use mango_types::{ApiResponse, Patient, RegisterPatientRequest};

use crate::cookies;
use crate::error::BffError;
use crate::middleware::auth::{require_bff_auth, AccessToken, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/bff/patients/list", get(list_patients))
        .route("/bff/patients/register", post(register_patient))
        .route_layer(middleware::from_fn(require_bff_auth))
}

async fn list_patients(
    State(state): State<AppState>,
    Extension(AccessToken(accessToken)): Extension<AccessToken>,
) -> Result<Json<ApiResponse<Vec<Patient>>>, BffError> {
    let patients = state.gateway.list_patients(&accessToken).await?;
    Ok(Json(ApiResponse::ok(patients)))
}

async fn register_patient(
    State(state): State<AppState>,
    Extension(AccessToken(accessToken)): Extension<AccessToken>,
    jar: CookieJar,
    Json(body): Json<RegisterPatientRequest>,
) -> Result<Json<ApiResponse<()>>, BffError> {
    let Some(scientistId) = cookies::scientist_id(&jar) else {
        return Err(BffError::BadRequest("Scientist ID não encontrado".into()));
    };
    if !body.is_complete() {
        return Err(BffError::BadRequest("Preencha todos os campos".into()));
    }

    let ack = state
        .gateway
        .register_patient(&accessToken, &scientistId, &body)
        .await
        .map_err(|e| BffError::from(e).with_status(StatusCode::BAD_REQUEST))?;

    Ok(Json(ApiResponse::message(
        ack.message
            .unwrap_or_else(|| "Paciente criado com sucesso!".into()),
    )))
}
