use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use mango_types::{Scientist, SessionUser, NOT_AUTHENTICATED};

use crate::components::feedback::error_text;
use crate::components::toast::ToastContext;

pub const LOGIN_PAGE: &str = "/scientist/login";

/// Session user decoded from the `accessToken` cookie, `None` when the cookie
/// is missing or expired.
#[server]
pub async fn current_user() -> Result<Option<SessionUser>, ServerFnError> {
    use mango_bff::cookies;
    use mango_gateway::token;

    let jar = crate::server::cookie_jar().await?;
    Ok(cookies::access_token(&jar).and_then(|t| token::active_user(&t, token::now_secs())))
}

#[server]
pub async fn login(email: String, password: String) -> Result<Option<Scientist>, ServerFnError> {
    use http::StatusCode;
    use mango_types::LoginRequest;

    let credentials = LoginRequest { email, password };
    if !credentials.is_complete() {
        return Err(crate::server::reject("Email e senha são obrigatórios"));
    }

    let grant = crate::server::gateway()?
        .login(&credentials)
        .await
        .map_err(|e| crate::server::relay_as(e, StatusCode::UNAUTHORIZED))?;

    let scientistId = grant
        .scientist
        .as_ref()
        .map(|s| s.id.clone())
        .filter(|id| !id.is_empty());
    let sessionCookies = crate::server::cookie_policy().session_cookies(
        grant.access_token,
        grant.refresh_token,
        scientistId,
    );
    crate::server::write_cookies(sessionCookies)?;
    tracing::info!("scientist {} logged in", credentials.email);
    leptos_axum::redirect("/dashboard");

    Ok(grant.scientist)
}

#[server]
pub async fn logout() -> Result<(), ServerFnError> {
    use http::StatusCode;
    use mango_bff::cookies;

    let jar = crate::server::cookie_jar().await?;
    if let Some(refreshToken) = cookies::refresh_token(&jar) {
        let accessToken = cookies::access_token(&jar).unwrap_or_default();
        crate::server::gateway()?
            .logout(&accessToken, &refreshToken)
            .await
            .map_err(|e| crate::server::relay_as(e, StatusCode::BAD_REQUEST))?;
    }

    crate::server::write_cookies(crate::server::cookie_policy().expired_cookies())
}

/// Client view of the session. Cheap to copy into closures.
#[derive(Clone, Copy)]
pub struct AuthHandle {
    pub user: ReadSignal<Option<SessionUser>>,
    pub is_loading: ReadSignal<bool>,
    set_user: WriteSignal<Option<SessionUser>>,
    set_loading: WriteSignal<bool>,
    toast: Option<ToastContext>,
}

impl AuthHandle {
    fn new(toast: Option<ToastContext>) -> Self {
        let (user, setUser) = signal(Option::<SessionUser>::None);
        let (isLoading, setLoading) = signal(true);
        Self {
            user,
            is_loading: isLoading,
            set_user: setUser,
            set_loading: setLoading,
            toast,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.get().is_some()
    }

    /// Re-reads the session from the server.
    pub async fn refresh(&self) {
        match current_user().await.ok().flatten() {
            Some(user) => {
                self.set_user.set(Some(user));
                self.set_loading.set(false);
            }
            None => self.expire(),
        }
    }

    pub async fn login(&self, email: String, password: String) -> Result<(), ServerFnError> {
        login(email, password).await?;
        self.refresh().await;
        Ok(())
    }

    pub async fn logout(&self) -> Result<(), ServerFnError> {
        let result = logout().await;
        self.set_user.set(None);
        result
    }

    /// Drops the session after the server refused it. Guarded pages then
    /// navigate to login through [`AuthHandle::require_auth`].
    pub fn expire(&self) {
        let hadUser = self.user.get_untracked().is_some();
        self.set_user.set(None);
        self.set_loading.set(false);
        if let (true, Some(toast)) = (hadUser, self.toast) {
            toast.info("Sua sessão expirou. Faça login novamente.");
        }
    }

    /// Message for a failed server call, expiring the session when the
    /// server answered that nobody is logged in.
    pub fn error_text(&self, err: &ServerFnError) -> String {
        self.error_message(error_text(err))
    }

    /// Same as [`AuthHandle::error_text`] for failures that did not come
    /// through a server function.
    pub fn error_message(&self, message: String) -> String {
        if message == NOT_AUTHENTICATED {
            self.expire();
        }
        message
    }

    /// Navigates to `redirectTo` once loading settles without a user.
    pub fn require_auth(&self, redirectTo: &'static str) {
        let handle = *self;
        let navigate = use_navigate();
        Effect::new(move |_| {
            if !handle.is_loading.get() && handle.user.get().is_none() {
                navigate(redirectTo, Default::default());
            }
        });
    }

    /// Navigates to `redirectTo` once loading settles with a user.
    pub fn redirect_if_logged(&self, redirectTo: &'static str) {
        let handle = *self;
        let navigate = use_navigate();
        Effect::new(move |_| {
            if !handle.is_loading.get() && handle.user.get().is_some() {
                navigate(redirectTo, Default::default());
            }
        });
    }
}

/// Owns the session signals and loads the current user on mount.
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let handle = AuthHandle::new(use_context::<ToastContext>());
    provide_context(handle);

    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen_futures::spawn_local;
        spawn_local(async move { handle.refresh().await });
    }

    children()
}

pub fn use_auth() -> AuthHandle {
    expect_context::<AuthHandle>()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signed_in() -> AuthHandle {
        let handle = AuthHandle::new(None);
        handle.set_user.set(Some(SessionUser {
            email: Some("ana@mango.dev".into()),
            ..Default::default()
        }));
        handle.set_loading.set(false);
        handle
    }

    #[test]
    fn refused_session_logs_the_user_out() {
        Owner::new().with(|| {
            let handle = signed_in();
            let message = handle.error_text(&ServerFnError::new(NOT_AUTHENTICATED));
            assert_eq!(message, NOT_AUTHENTICATED);
            assert!(handle.user.get_untracked().is_none());
            assert!(!handle.is_loading.get_untracked());
        });
    }

    #[test]
    fn other_failures_keep_the_session() {
        Owner::new().with(|| {
            let handle = signed_in();
            let message = handle.error_text(&ServerFnError::new("Arquivo não encontrado"));
            assert_eq!(message, "Arquivo não encontrado");
            assert!(handle.user.get_untracked().is_some());
        });
    }
}
