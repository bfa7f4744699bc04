use leptos::prelude::*;

/// Message carried by a server function error, without the transport prefix.
pub fn error_text(err: &ServerFnError) -> String {
    match err {
        ServerFnError::ServerError(message) => message.clone(),
        other => other.to_string(),
    }
}

#[component]
pub fn Loading(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="loading">
            <div class="spinner"></div>
            {message}
        </div>
    }
}

#[component]
pub fn ErrorCard(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="card">
            <p class="form-error">{message}</p>
        </div>
    }
}

#[component]
pub fn EmptyState(
    #[prop(into)] message: String,
    #[prop(optional, into)] action_href: Option<String>,
    #[prop(optional, into)] action_label: Option<String>,
) -> impl IntoView {
    let action = action_href.map(|href| {
        view! {
            <a href=href class="btn btn-primary">
                {action_label.unwrap_or_default()}
            </a>
        }
    });

    view! {
        <div class="empty-state">
            <p>{message}</p>
            {action}
        </div>
    }
}
