use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use mango_types::{CreateSessionRequest, EdfFile, Patient, Session};

use crate::components::feedback::{EmptyState, ErrorCard, Loading};
use crate::components::form::{bind_field, FormField};
use crate::format::{format_date, format_file_size, status_class, status_label};
use crate::pages::register::SuccessPanel;
use crate::hooks::use_auth;

#[server]
pub async fn list_sessions() -> Result<Vec<Session>, ServerFnError> {
    let accessToken = crate::server::access_token().await?;
    crate::server::gateway()?
        .list_sessions(&accessToken)
        .await
        .map_err(crate::server::relay)
}

#[server]
pub async fn discover_edf_files() -> Result<Vec<EdfFile>, ServerFnError> {
    let accessToken = crate::server::access_token().await?;
    crate::server::gateway()?
        .discover_edf_files(&accessToken)
        .await
        .map_err(crate::server::relay)
}

#[server]
pub async fn create_session(req: CreateSessionRequest) -> Result<String, ServerFnError> {
    req.validate().map_err(crate::server::reject)?;

    let accessToken = crate::server::access_token().await?;
    let answer = crate::server::gateway()?
        .process_edf_file(&accessToken, &req)
        .await
        .map_err(crate::server::relay)?;
    tracing::info!("queued session {} for patient {}", req.session_name, req.patient_id);

    Ok(answer
        .get("message")
        .and_then(|m| m.as_str())
        .unwrap_or("Sessão criada com sucesso!")
        .to_string())
}

#[component]
pub fn SessionsListPage() -> impl IntoView {
    #[allow(unused_variables)]
    let auth = use_auth();
    #[allow(unused_variables)]
    let (sessions, setSessions) = signal(Option::<Result<Vec<Session>, String>>::None);

    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen_futures::spawn_local;

        spawn_local(async move {
            let result = list_sessions().await.map_err(|e| auth.error_text(&e));
            setSessions.set(Some(result));
        });
    }

    view! {
        <div class="dashboard-header with-action">
            <div>
                <h1>"Lista de Sessões"</h1>
                <p class="subtitle">"Gerencie todas as sessões de EEG dos pacientes"</p>
            </div>
            <a href="/sessions/new" class="btn btn-primary">
                "Nova Sessão"
            </a>
        </div>
        {move || match sessions.get() {
            None => view! { <Loading message="Carregando sessões..." /> }.into_any(),
            Some(Ok(list)) => view! { <SessionGrid sessions=list /> }.into_any(),
            Some(Err(e)) => {
                view! { <ErrorCard message=format!("Erro ao carregar sessões: {e}") /> }.into_any()
            }
        }}
    }
}

#[component]
pub fn SessionGrid(sessions: Vec<Session>) -> impl IntoView {
    if sessions.is_empty() {
        return view! {
            <EmptyState
                message="Nenhuma sessão encontrada"
                action_href="/sessions/new"
                action_label="Criar primeira sessão"
            />
        }
        .into_any();
    }

    view! {
        <div class="card-grid">
            {sessions
                .into_iter()
                .map(|session| view! { <SessionCard session=session /> })
                .collect_view()}
        </div>
    }
    .into_any()
}

#[component]
fn SessionCard(session: Session) -> impl IntoView {
    let href = format!("/sessions/show/{}", session.id);
    let statusCls = format!("status-badge {}", status_class(&session.processing_status));
    let statusText = status_label(&session.processing_status);
    let shortId = session.short_id();
    let name = if session.session_name.is_empty() {
        session.file_name.clone()
    } else {
        session.session_name.clone()
    };

    view! {
        <a href=href class="card session-card">
            <div class="session-head">
                <div class="session-name">{name}</div>
                <span class=statusCls>{statusText}</span>
            </div>
            <div class="field">
                <span class="field-label">"Paciente"</span>
                <span class="field-value">{session.patient_iid.clone()}</span>
            </div>
            <div class="field">
                <span class="field-label">"Arquivo"</span>
                <span class="field-value">{session.file_name.clone()}</span>
            </div>
            <div class="field">
                <span class="field-label">"Tamanho"</span>
                <span class="field-value">{format_file_size(session.file_size)}</span>
            </div>
            <div class="field">
                <span class="field-label">"Criada em"</span>
                <span class="field-value">{format_date(session.created_at.as_deref())}</span>
            </div>
            <div class="session-id">"ID: " {shortId}</div>
        </a>
    }
}

#[component]
pub fn SessionNewPage() -> impl IntoView {
    #[allow(unused_variables)]
    let auth = use_auth();
    #[allow(unused_variables)]
    let navigate = use_navigate();
    let form = RwSignal::new(CreateSessionRequest::default());
    #[allow(unused_variables)]
    let (files, setFiles) = signal(Option::<Result<Vec<EdfFile>, String>>::None);
    #[allow(unused_variables)]
    let (patients, setPatients) = signal(Option::<Result<Vec<Patient>, String>>::None);
    #[allow(unused_variables)]
    let (error, setError) = signal(Option::<String>::None);
    #[allow(unused_variables)]
    let (submitting, setSubmitting) = signal(false);

    // Both lists load independently; the form renders once each has settled.
    #[cfg(feature = "hydrate")]
    {
        use crate::pages::patients::list_patients;
        use wasm_bindgen_futures::spawn_local;

        spawn_local(async move {
            let result = discover_edf_files().await.map_err(|e| auth.error_text(&e));
            setFiles.set(Some(result));
        });
        spawn_local(async move {
            let result = list_patients().await.map_err(|e| auth.error_text(&e));
            setPatients.set(Some(result));
        });
    }

    let sessionName = bind_field(form, |f| f.session_name.clone(), |f, v| f.session_name = v);

    let loadError = move || {
        let fileErr = files.with(|f| f.as_ref().and_then(|r| r.as_ref().err().cloned()));
        let patientErr = patients.with(|p| p.as_ref().and_then(|r| r.as_ref().err().cloned()));
        fileErr.or(patientErr)
    };
    let isLoading = move || files.with(Option::is_none) || patients.with(Option::is_none);
    let canSubmit = move || form.with(|f| f.is_complete()) && !submitting.get();

    let onSubmit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let req = form.get_untracked();
        if let Err(message) = req.validate() {
            setError.set(Some(message));
            return;
        }

        #[cfg(feature = "hydrate")]
        {
            use crate::format::with_message;
            use wasm_bindgen_futures::spawn_local;

            let navigate = navigate.clone();
            setError.set(None);
            setSubmitting.set(true);
            spawn_local(async move {
                match create_session(req).await {
                    Ok(message) => navigate(
                        &with_message("/sessions/new/success", &message),
                        Default::default(),
                    ),
                    Err(e) => setError.set(Some(auth.error_text(&e))),
                }
                setSubmitting.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = req;
        }
    };

    let fileOptions = move || {
        files
            .get()
            .and_then(Result::ok)
            .unwrap_or_default()
            .into_iter()
            .map(|file| {
                let label = format!("{} ({})", file.name, format_file_size(file.size));
                view! { <option value=file.path>{label}</option> }
            })
            .collect_view()
    };
    let patientOptions = move || {
        patients
            .get()
            .and_then(Result::ok)
            .unwrap_or_default()
            .into_iter()
            .map(|patient| {
                let label = format!("{} ({})", patient.full_name(), patient.patient_iid);
                view! { <option value=patient.patient_iid>{label}</option> }
            })
            .collect_view()
    };

    view! {
        <div class="dashboard-header">
            <h1>"Nova Sessão"</h1>
            <p class="subtitle">"Associe um arquivo EDF a um paciente para processamento"</p>
        </div>
        {move || isLoading().then(|| view! { <Loading message="Carregando arquivos e pacientes..." /> })}
        {move || {
            loadError().map(|e| view! { <ErrorCard message=format!("Erro ao carregar dados: {e}") /> })
        }}
        <div class="card form-card" class:hidden=move || isLoading() || loadError().is_some()>
            {move || error.get().map(|message| view! { <div class="form-error">{message}</div> })}
            <form on:submit=onSubmit>
                <FormField
                    id="sessionName"
                    label="Nome da sessão"
                    placeholder="Ex.: Sessão basal"
                    value=sessionName.value
                    on_input=sessionName.on_input
                />
                <div class="form-group">
                    <label for="edfFile">"Arquivo EDF"</label>
                    <select
                        id="edfFile"
                        prop:value=move || form.with(|f| f.edf_file.clone())
                        on:change=move |ev| form.update(|f| f.edf_file = event_target_value(&ev))
                    >
                        <option value="">"Selecione um arquivo EDF"</option>
                        {fileOptions}
                    </select>
                </div>
                <div class="form-group">
                    <label for="patientId">"Paciente"</label>
                    <select
                        id="patientId"
                        prop:value=move || form.with(|f| f.patient_id.clone())
                        on:change=move |ev| form.update(|f| f.patient_id = event_target_value(&ev))
                    >
                        <option value="">"Selecione um paciente"</option>
                        {patientOptions}
                    </select>
                </div>
                <div class="form-actions">
                    <a href="/sessions/list" class="btn btn-secondary">
                        "Cancelar"
                    </a>
                    <button type="submit" class="btn btn-primary" disabled=move || !canSubmit()>
                        {move || if submitting.get() { "Criando..." } else { "Criar Sessão" }}
                    </button>
                </div>
            </form>
        </div>
    }
}

#[component]
pub fn SessionCreatedPage() -> impl IntoView {
    view! {
        <SuccessPanel
            title="Sessão criada!"
            fallback="Sessão criada com sucesso!"
            primary_href="/sessions/list"
            primary_label="Ver sessões"
            secondary_href="/sessions/new"
            secondary_label="Criar outra"
        />
    }
}

#[cfg(all(test, feature = "ssr"))]
mod tests {
    use super::*;
    use mango_types::ProcessingStatus;

    #[test]
    fn session_card_links_to_detail_with_status_label() {
        let session = Session {
            id: "0f8c2a1e-aaaa-bbbb-cccc-000000000000".into(),
            session_name: "Basal".into(),
            processing_status: ProcessingStatus::Completed,
            file_size: Some(1536),
            ..Default::default()
        };
        let owner = Owner::new();
        let html = owner.with(|| view! { <SessionGrid sessions=vec![session] /> }.to_html());
        assert!(html.contains("/sessions/show/0f8c2a1e-aaaa-bbbb-cccc-000000000000"));
        assert!(html.contains("Concluída"));
        assert!(html.contains("0f8c2a1e..."));
        assert!(html.contains("1.5 KB"));
    }

    #[test]
    fn empty_session_list_offers_creation() {
        let owner = Owner::new();
        let html = owner.with(|| view! { <SessionGrid sessions=Vec::new() /> }.to_html());
        assert!(html.contains("Nenhuma sessão encontrada"));
        assert!(html.contains("/sessions/new"));
    }
}
