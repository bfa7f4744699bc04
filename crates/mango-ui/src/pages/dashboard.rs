use leptos::prelude::*;

use crate::components::model_viewer::{ModelViewer, DEFAULT_MODEL};
use crate::hooks::use_auth;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();

    let greeting = move || {
        let name = auth
            .user
            .get()
            .map(|u| u.display_name())
            .unwrap_or_else(|| "Usuário".into());
        format!("Bem-vindo, {name}!")
    };

    view! {
        <div class="dashboard-hero">
            <div class="dashboard-intro">
                <h1>{greeting}</h1>
                <p class="subtitle">"Gerencie seus pacientes e sessões de forma rápida e prática."</p>
                <div class="dashboard-actions">
                    <a href="/patients/add" class="btn btn-primary">
                        "Novo Paciente"
                    </a>
                    <a href="/sessions/new" class="btn btn-primary">
                        "Nova Sessão"
                    </a>
                </div>
                <div class="dashboard-links">
                    <a href="/patients/list">"Ver pacientes"</a>
                    <a href="/sessions/list">"Ver sessões"</a>
                </div>
            </div>
            <ModelViewer src=DEFAULT_MODEL class="dashboard-model" />
        </div>
    }
}
