use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_query_map};
use mango_types::RegisterScientistRequest;

use crate::components::form::{bind_field, FormField};
use crate::hooks::use_auth;

/// Creates a scientist account and returns the gateway's confirmation message.
#[server]
pub async fn register_scientist(req: RegisterScientistRequest) -> Result<String, ServerFnError> {
    use http::StatusCode;

    if !req.is_complete() {
        return Err(crate::server::reject("Preencha todos os campos"));
    }

    let ack = crate::server::gateway()?
        .register_scientist(&req)
        .await
        .map_err(|e| crate::server::relay_as(e, StatusCode::BAD_REQUEST))?;
    tracing::info!("registered scientist {}", req.email);

    Ok(ack.message.unwrap_or_else(|| "Conta criada com sucesso!".into()))
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = use_auth();
    auth.redirect_if_logged("/dashboard");

    #[allow(unused_variables)]
    let navigate = use_navigate();
    let form = RwSignal::new(RegisterScientistRequest::default());
    #[allow(unused_variables)]
    let (error, setError) = signal(Option::<String>::None);
    #[allow(unused_variables)]
    let (submitting, setSubmitting) = signal(false);

    let firstName = bind_field(form, |f| f.first_name.clone(), |f, v| f.first_name = v);
    let lastName = bind_field(form, |f| f.last_name.clone(), |f, v| f.last_name = v);
    let email = bind_field(form, |f| f.email.clone(), |f, v| f.email = v);
    let password = bind_field(form, |f| f.password.clone(), |f, v| f.password = v);
    let institution = bind_field(form, |f| f.institution.clone(), |f, v| f.institution = v);
    let specialization =
        bind_field(form, |f| f.specialization.clone(), |f, v| f.specialization = v);

    let canSubmit = move || form.with(|f| f.is_complete()) && !submitting.get();

    let onSubmit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let req = form.get_untracked();
        if !req.is_complete() {
            setError.set(Some("Preencha todos os campos".into()));
            return;
        }

        #[cfg(feature = "hydrate")]
        {
            use crate::components::feedback::error_text;
            use crate::format::with_message;
            use wasm_bindgen_futures::spawn_local;

            let navigate = navigate.clone();
            setError.set(None);
            setSubmitting.set(true);
            spawn_local(async move {
                match register_scientist(req).await {
                    Ok(message) => navigate(
                        &with_message("/scientist/register/success", &message),
                        Default::default(),
                    ),
                    Err(e) => setError.set(Some(error_text(&e))),
                }
                setSubmitting.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = req;
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card wide">
                <div class="login-header">
                    <div class="login-icon">"M"</div>
                    <h1>"Criar conta"</h1>
                    <p>"Cadastre-se como cientista no MANGO"</p>
                </div>

                {move || error.get().map(|message| view! { <div class="form-error">{message}</div> })}

                <form on:submit=onSubmit>
                    <div class="form-row">
                        <FormField
                            id="firstName"
                            label="Nome"
                            value=firstName.value
                            on_input=firstName.on_input
                        />
                        <FormField
                            id="lastName"
                            label="Sobrenome"
                            value=lastName.value
                            on_input=lastName.on_input
                        />
                    </div>
                    <FormField
                        id="email"
                        label="Email"
                        kind="email"
                        value=email.value
                        on_input=email.on_input
                    />
                    <FormField
                        id="password"
                        label="Senha"
                        kind="password"
                        value=password.value
                        on_input=password.on_input
                    />
                    <FormField
                        id="institution"
                        label="Instituição"
                        value=institution.value
                        on_input=institution.on_input
                    />
                    <FormField
                        id="specialization"
                        label="Especialização"
                        value=specialization.value
                        on_input=specialization.on_input
                    />
                    <button type="submit" class="btn btn-primary" disabled=move || !canSubmit()>
                        {move || if submitting.get() { "Cadastrando..." } else { "Cadastrar" }}
                    </button>
                </form>

                <p class="login-footer">
                    "Já tem conta? " <a href="/scientist/login">"Entrar"</a>
                </p>
            </div>
        </div>
    }
}

/// Shared by the account, patient and session confirmation pages: shows the
/// `message` query parameter or a fallback.
#[component]
pub fn SuccessPanel(
    #[prop(into)] title: String,
    #[prop(into)] fallback: String,
    #[prop(into)] primary_href: String,
    #[prop(into)] primary_label: String,
    #[prop(into)] secondary_href: String,
    #[prop(into)] secondary_label: String,
) -> impl IntoView {
    let query = use_query_map();
    let message = move || {
        query
            .with(|q| q.get("message"))
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| fallback.clone())
    };

    view! {
        <div class="success-page">
            <div class="success-card">
                <div class="success-icon">"\u{2713}"</div>
                <h1>{title}</h1>
                <p>{message}</p>
                <div class="success-actions">
                    <a href=primary_href class="btn btn-primary">
                        {primary_label}
                    </a>
                    <a href=secondary_href class="btn btn-secondary">
                        {secondary_label}
                    </a>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn RegisterSuccessPage() -> impl IntoView {
    view! {
        <SuccessPanel
            title="Cadastro realizado!"
            fallback="Sua conta foi criada com sucesso."
            primary_href="/scientist/login"
            primary_label="Fazer login"
            secondary_href="/"
            secondary_label="Voltar ao início"
        />
    }
}
