use axum::{
    body::Body,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use mango_gateway::{token, GatewayClient};

use crate::cookies::{self, CookiePolicy};
use crate::error::BffError;

pub const LOGIN_PAGE: &str = "/scientist/login";
pub const HOME_AFTER_LOGIN: &str = "/dashboard";

#[derive(Clone)]
pub struct AppState {
    pub gateway: GatewayClient,
    pub cookies: CookiePolicy,
}

/// Bearer token lifted from the `accessToken` cookie by [`require_bff_auth`].
#[derive(Clone, Debug)]
pub struct AccessToken(pub String);

/// Middleware for BFF routes that call the gateway on the caller's behalf.
pub async fn require_bff_auth(mut request: Request<Body>, next: Next) -> Response {
    let jar = CookieJar::from_headers(request.headers());

    let Some(accessToken) = cookies::access_token(&jar) else {
        return BffError::not_authenticated().into_response();
    };

    request.extensions_mut().insert(AccessToken(accessToken));
    next.run(request).await
}

/// Middleware for page routes: protected pages need an unexpired access
/// token, auth pages bounce a logged-in scientist to the dashboard.
pub async fn require_page_auth(request: Request<Body>, next: Next) -> Response {
    let path = request.uri().path().to_string();
    let jar = CookieJar::from_headers(request.headers());
    let isLoggedIn = cookies::access_token(&jar)
        .and_then(|t| token::active_user(&t, token::now_secs()))
        .is_some();

    if is_auth_page(&path) && isLoggedIn {
        return Redirect::to(HOME_AFTER_LOGIN).into_response();
    }

    if is_public_path(&path) || isLoggedIn {
        return next.run(request).await;
    }

    tracing::debug!("no valid session for {path}, redirecting to login");
    Redirect::to(LOGIN_PAGE).into_response()
}

fn is_auth_page(path: &str) -> bool {
    matches!(path, "/scientist/login" | "/scientist/register")
}

/// Pages and assets reachable without a session.
pub fn is_public_path(path: &str) -> bool {
    const PUBLIC_PAGES: &[&str] = &[
        "/",
        "/about",
        "/scientist/login",
        "/scientist/register",
        "/scientist/register/success",
    ];
    const PUBLIC_PREFIXES: &[&str] = &["/pkg/", "/bff/", "/api/", "/models/", "/assets/"];
    const ASSET_EXTENSIONS: &[&str] = &[
        "css", "js", "wasm", "svg", "ico", "png", "jpg", "webp", "glb", "gltf", "txt",
    ];

    let trimmed = if path.len() > 1 {
        path.trim_end_matches('/')
    } else {
        path
    };

    // Loose files are only served from the site root; anything deeper is a page.
    let isRootFile = trimmed.rfind('/') == Some(0)
        && trimmed
            .rsplit_once('.')
            .is_some_and(|(_, ext)| ASSET_EXTENSIONS.contains(&ext));

    PUBLIC_PAGES.contains(&trimmed)
        || PUBLIC_PREFIXES.iter().any(|p| path.starts_with(p))
        || isRootFile
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_paths() {
        for path in [
            "/",
            "/about",
            "/scientist/login",
            "/scientist/register/",
            "/scientist/register/success",
            "/pkg/mango-console.js",
            "/bff/scientist/auth",
            "/api/list_patients",
            "/favicon.svg",
            "/robots.txt",
            "/models/source.glb",
        ] {
            assert!(is_public_path(path), "{path} should be public");
        }
    }

    #[test]
    fn protected_paths() {
        for path in [
            "/dashboard",
            "/patients/list",
            "/patients/add",
            "/sessions/new",
            "/sessions/show/baseline",
            "/sessions/show/S01.edf",
            "/sessions/show/x.js",
            "/patients/list/app.css",
            "/scientist/me",
        ] {
            assert!(!is_public_path(path), "{path} should be protected");
        }
    }
}
