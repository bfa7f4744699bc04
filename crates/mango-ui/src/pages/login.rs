use leptos::prelude::*;

use crate::components::feedback::error_text;
use crate::hooks::auth::Login;
use crate::hooks::use_auth;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    auth.redirect_if_logged("/dashboard");

    let loginAction = ServerAction::<Login>::new();
    let loginValue = loginAction.value();
    let pending = loginAction.pending();

    let (email, setEmail) = signal(String::new());
    let (password, setPassword) = signal(String::new());
    let canSubmit =
        move || !email.get().trim().is_empty() && !password.get().trim().is_empty() && !pending.get();

    let errorMessage = move || {
        loginValue
            .get()
            .and_then(|result| result.err())
            .map(|e| error_text(&e))
    };

    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen_futures::spawn_local;

        Effect::new(move |_| {
            if loginValue.get().is_some_and(|result| result.is_ok()) {
                spawn_local(async move { auth.refresh().await });
            }
        });
    }

    view! {
        <div class="login-page">
            <div class="login-card">
                <div class="login-header">
                    <div class="login-icon">"M"</div>
                    <h1>"Entrar no MANGO"</h1>
                    <p>"Acesse sua conta de cientista"</p>
                </div>

                {move || errorMessage().map(|message| view! { <div class="form-error">{message}</div> })}

                <ActionForm action=loginAction>
                    <div class="form-group">
                        <label for="email">"Email"</label>
                        <input
                            type="email"
                            id="email"
                            name="email"
                            placeholder="seu@email.com"
                            prop:value=move || email.get()
                            on:input=move |ev| setEmail.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group">
                        <label for="password">"Senha"</label>
                        <input
                            type="password"
                            id="password"
                            name="password"
                            placeholder="Digite sua senha"
                            prop:value=move || password.get()
                            on:input=move |ev| setPassword.set(event_target_value(&ev))
                        />
                    </div>
                    <button type="submit" class="btn btn-primary" disabled=move || !canSubmit()>
                        {move || if pending.get() { "Entrando..." } else { "Entrar" }}
                    </button>
                </ActionForm>

                <p class="login-footer">
                    "Não tem conta? " <a href="/scientist/register">"Cadastre-se"</a>
                </p>
            </div>
        </div>
    }
}
