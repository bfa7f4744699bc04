use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};

use crate::components::feedback::error_text;
use crate::components::toast::use_toast;
use crate::hooks::use_auth;

const LINKS: [(&str, &str, &str); 6] = [
    ("/dashboard", "\u{25A3}", "Dashboard"),
    ("/patients/list", "\u{263A}", "Pacientes"),
    ("/patients/add", "+", "Novo Paciente"),
    ("/sessions/list", "\u{223F}", "Sessões"),
    ("/sessions/new", "+", "Nova Sessão"),
    ("/scientist/me", "\u{2699}", "Perfil"),
];

#[component]
pub fn Nav() -> impl IntoView {
    let auth = use_auth();
    let toast = use_toast();
    let navigate = use_navigate();
    let location = use_location();

    let userName = move || {
        auth.user
            .get()
            .map(|u| u.display_name())
            .unwrap_or_default()
    };

    let onLogout = move |_: leptos::ev::MouseEvent| {
        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen_futures::spawn_local;
            let navigate = navigate.clone();
            spawn_local(async move {
                match auth.logout().await {
                    Ok(()) => navigate("/", Default::default()),
                    Err(e) => toast.error(error_text(&e)),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&navigate, toast);
        }
    };

    view! {
        <nav class="nav-sidebar">
            <div class="nav-brand">
                <div class="brand-icon">"M"</div>
                <span class="brand-text">"MANGO"</span>
            </div>
            <ul class="nav-links">
                {LINKS
                    .into_iter()
                    .map(|(href, icon, label)| {
                        let isActive = move || location.pathname.get() == href;
                        view! {
                            <li class="nav-item" class:active=isActive>
                                <a href=href>
                                    <span class="nav-icon">{icon}</span>
                                    <span>{label}</span>
                                </a>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
            <div class="nav-footer">
                <span class="nav-user">{userName}</span>
                <button class="btn btn-secondary" on:click=onLogout>
                    "Sair"
                </button>
            </div>
        </nav>
    }
}
