//! Request-scoped helpers for server functions. The gateway client and cookie
//! policy are provided as Leptos context by the console binary.

use axum_extra::extract::cookie::{Cookie, CookieJar};
use http::header::{HeaderValue, SET_COOKIE};
use http::StatusCode;
use leptos::prelude::*;
use leptos_axum::ResponseOptions;
use mango_bff::cookies::{self, CookiePolicy};
use mango_gateway::{token, GatewayClient, GatewayError};
use mango_types::NOT_AUTHENTICATED;

pub fn gateway() -> Result<GatewayClient, ServerFnError> {
    use_context::<GatewayClient>().ok_or_else(|| ServerFnError::new("gateway client unavailable"))
}

pub fn cookie_policy() -> CookiePolicy {
    use_context::<CookiePolicy>().unwrap_or_default()
}

pub async fn cookie_jar() -> Result<CookieJar, ServerFnError> {
    leptos_axum::extract::<CookieJar>().await
}

/// The caller's access token; one past its `exp` counts as absent.
pub async fn access_token() -> Result<String, ServerFnError> {
    let jar = cookie_jar().await?;
    match cookies::access_token(&jar) {
        Some(accessToken) if token::active_user(&accessToken, token::now_secs()).is_some() => {
            Ok(accessToken)
        }
        _ => Err(not_authenticated()),
    }
}

fn not_authenticated() -> ServerFnError {
    set_status(StatusCode::UNAUTHORIZED);
    ServerFnError::new(NOT_AUTHENTICATED)
}

pub fn write_cookies(cookies: Vec<Cookie<'static>>) -> Result<(), ServerFnError> {
    let responseOptions = expect_context::<ResponseOptions>();
    for cookie in cookies {
        let headerValue = HeaderValue::from_str(&cookie.to_string())
            .map_err(|e| ServerFnError::new(format!("cookie error: {e}")))?;
        responseOptions.append_header(SET_COOKIE, headerValue);
    }
    Ok(())
}

fn set_status(status: StatusCode) {
    if let Some(responseOptions) = use_context::<ResponseOptions>() {
        responseOptions.set_status(status);
    }
}

/// Carries the gateway's status and detail into the server function response.
pub fn relay(err: GatewayError) -> ServerFnError {
    let status = match (&err, err.upstream_status()) {
        (GatewayError::InvalidInput(_), _) => StatusCode::BAD_REQUEST,
        (_, Some(code)) => StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_GATEWAY),
        (_, None) => StatusCode::BAD_GATEWAY,
    };
    if status == StatusCode::UNAUTHORIZED {
        return not_authenticated();
    }
    relay_as(err, status)
}

pub fn relay_as(err: GatewayError, status: StatusCode) -> ServerFnError {
    set_status(status);
    ServerFnError::new(err.to_string())
}

pub fn reject(message: impl Into<String>) -> ServerFnError {
    set_status(StatusCode::BAD_REQUEST);
    ServerFnError::new(message.into())
}
