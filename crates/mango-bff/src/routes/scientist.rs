use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    middleware,
    routing::{get, patch, post},
    Extension, Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use mango_gateway::{token, PictureUpload, MAX_PICTURE_BYTES};
use mango_types::{
    ApiResponse, AuthStatus, LoginRequest, ProfileUpdate, RegisterScientistRequest,
    RegistrationReceipt, Scientist,
};
use tracing::{debug, info};

use crate::cookies;
use crate::error::BffError;
use crate::middleware::auth::{require_bff_auth, AccessToken, AppState};

pub fn routes() -> Router<AppState> {
    let protected = Router::new()
        .route("/bff/scientist/me", get(get_profile))
        .route(
            "/bff/scientist/update",
            patch(update_profile).layer(DefaultBodyLimit::max(MAX_PICTURE_BYTES + 1024 * 1024)),
        )
        .route_layer(middleware::from_fn(require_bff_auth));

    Router::new()
        .route("/bff/scientist/login", post(login))
        .route("/bff/scientist/logout", post(logout))
        .route("/bff/scientist/auth", get(auth_status))
        .route("/bff/scientist/register", post(register))
        .merge(protected)
}

async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<(CookieJar, Json<ApiResponse<Scientist>>), BffError> {
    if !body.is_complete() {
        return Err(BffError::BadRequest("Email e senha são obrigatórios".into()));
    }

    let grant = state
        .gateway
        .login(&body)
        .await
        .map_err(|e| BffError::from(e).with_status(StatusCode::UNAUTHORIZED))?;

    let scientistId = grant
        .scientist
        .as_ref()
        .map(|s| s.id.clone())
        .filter(|id| !id.is_empty());
    info!("scientist {} logged in", body.email);

    let jar = state
        .cookies
        .grant(jar, grant.access_token, grant.refresh_token, scientistId);

    Ok((
        jar,
        Json(ApiResponse {
            success: true,
            message: Some("Login realizado com sucesso".into()),
            data: grant.scientist,
        }),
    ))
}

async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<ApiResponse<()>>), BffError> {
    if let Some(refreshToken) = cookies::refresh_token(&jar) {
        let accessToken = cookies::access_token(&jar).unwrap_or_default();
        state
            .gateway
            .logout(&accessToken, &refreshToken)
            .await
            .map_err(|e| BffError::from(e).with_status(StatusCode::BAD_REQUEST))?;
    }

    let jar = state.cookies.clear(jar);
    Ok((jar, Json(ApiResponse::message("Logout realizado com sucesso"))))
}

async fn auth_status(jar: CookieJar) -> Json<AuthStatus> {
    let user = cookies::access_token(&jar).and_then(|t| token::active_user(&t, token::now_secs()));
    Json(AuthStatus {
        is_logged_in: user.is_some(),
        user,
    })
}

async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterScientistRequest>,
) -> Result<Json<ApiResponse<RegistrationReceipt>>, BffError> {
    if !body.is_complete() {
        return Err(BffError::BadRequest("Preencha todos os campos".into()));
    }

    let ack = state
        .gateway
        .register_scientist(&body)
        .await
        .map_err(|e| BffError::from(e).with_status(StatusCode::BAD_REQUEST))?;

    Ok(Json(ApiResponse::ok_with_message(
        ack.message
            .unwrap_or_else(|| "Conta criada com sucesso!".into()),
        RegistrationReceipt {
            registration_token: ack.registration_token,
        },
    )))
}

async fn get_profile(
    State(state): State<AppState>,
    Extension(AccessToken(accessToken)): Extension<AccessToken>,
) -> Result<Json<ApiResponse<Scientist>>, BffError> {
    let scientist = state.gateway.profile(&accessToken).await?;
    Ok(Json(ApiResponse::ok(scientist)))
}

async fn update_profile(
    State(state): State<AppState>,
    Extension(AccessToken(accessToken)): Extension<AccessToken>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<Scientist>>, BffError> {
    let mut update = ProfileUpdate::default();
    let mut picture = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| BffError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == "profile_picture" || name == "profilePicture" {
            let fileName = field.file_name().unwrap_or("profile").to_string();
            let contentType = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| BffError::BadRequest(e.to_string()))?;
            if !bytes.is_empty() {
                picture = Some(PictureUpload {
                    file_name: fileName,
                    content_type: contentType,
                    bytes: bytes.to_vec(),
                });
            }
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| BffError::BadRequest(e.to_string()))?;
        match name.as_str() {
            "first_name" => update.first_name = value,
            "last_name" => update.last_name = value,
            "institution" => update.institution = value,
            "specialization" => update.specialization = value,
            "gender" => update.gender = value,
            "age" => update.age = value,
            other => debug!("ignoring profile field {other}"),
        }
    }

    if let Some(picture) = &picture {
        picture.validate().map_err(BffError::BadRequest)?;
    }

    let scientist = state
        .gateway
        .update_profile(&accessToken, &update, picture)
        .await?;
    Ok(Json(ApiResponse::ok(scientist)))
}
