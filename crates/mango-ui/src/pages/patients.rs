use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use mango_types::{Patient, RegisterPatientRequest};

use crate::components::feedback::{EmptyState, ErrorCard, Loading};
use crate::components::form::{bind_field, FormField, GenderSelect};
use crate::format::{age_label, format_cpf, format_gender, today};
use crate::pages::register::SuccessPanel;
use crate::hooks::use_auth;

#[server]
pub async fn list_patients() -> Result<Vec<Patient>, ServerFnError> {
    let accessToken = crate::server::access_token().await?;
    crate::server::gateway()?
        .list_patients(&accessToken)
        .await
        .map_err(crate::server::relay)
}

#[server]
pub async fn register_patient(req: RegisterPatientRequest) -> Result<String, ServerFnError> {
    use http::StatusCode;
    use mango_bff::cookies;

    let accessToken = crate::server::access_token().await?;
    let jar = crate::server::cookie_jar().await?;
    let Some(scientistId) = cookies::scientist_id(&jar) else {
        return Err(crate::server::reject("Scientist ID não encontrado"));
    };
    if !req.is_complete() {
        return Err(crate::server::reject("Preencha todos os campos"));
    }

    let ack = crate::server::gateway()?
        .register_patient(&accessToken, &scientistId, &req)
        .await
        .map_err(|e| crate::server::relay_as(e, StatusCode::BAD_REQUEST))?;

    Ok(ack.message.unwrap_or_else(|| "Paciente criado com sucesso!".into()))
}

#[component]
pub fn PatientsListPage() -> impl IntoView {
    #[allow(unused_variables)]
    let auth = use_auth();
    #[allow(unused_variables)]
    let (patients, setPatients) = signal(Option::<Result<Vec<Patient>, String>>::None);

    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen_futures::spawn_local;

        spawn_local(async move {
            let result = list_patients().await.map_err(|e| auth.error_text(&e));
            setPatients.set(Some(result));
        });
    }

    view! {
        <div class="dashboard-header with-action">
            <div>
                <h1>"Pacientes"</h1>
                <p class="subtitle">"Pacientes cadastrados sob sua responsabilidade"</p>
            </div>
            <a href="/patients/add" class="btn btn-primary">
                "Novo Paciente"
            </a>
        </div>
        {move || match patients.get() {
            None => view! { <Loading message="Carregando pacientes..." /> }.into_any(),
            Some(Ok(list)) => view! { <PatientGrid patients=list /> }.into_any(),
            Some(Err(e)) => {
                view! { <ErrorCard message=format!("Erro ao carregar pacientes: {e}") /> }
                    .into_any()
            }
        }}
    }
}

#[component]
pub fn PatientGrid(patients: Vec<Patient>) -> impl IntoView {
    if patients.is_empty() {
        return view! {
            <EmptyState
                message="Nenhum paciente encontrado"
                action_href="/patients/add"
                action_label="Cadastrar primeiro paciente"
            />
        }
        .into_any();
    }

    let today = today();
    view! {
        <div class="card-grid">
            {patients
                .into_iter()
                .map(|patient| view! { <PatientCard patient=patient today=today /> })
                .collect_view()}
        </div>
    }
    .into_any()
}

#[component]
fn PatientCard(patient: Patient, today: chrono::NaiveDate) -> impl IntoView {
    let fullName = patient.full_name();
    let initials = patient.initials();
    let age = age_label(patient.birth_date, today);
    let gender = format_gender(patient.gender.as_ref());
    let cpf = patient.cpf.clone().unwrap_or_else(|| "N/A".into());
    let handle = patient.patient_iid.clone();

    view! {
        <div class="card patient-card">
            <div class="patient-head">
                <div class="avatar">{initials}</div>
                <div>
                    <div class="patient-name">{fullName}</div>
                    <div class="patient-handle">{handle}</div>
                </div>
            </div>
            <div class="field">
                <span class="field-label">"Idade"</span>
                <span class="field-value">{age}</span>
            </div>
            <div class="field">
                <span class="field-label">"Gênero"</span>
                <span class="field-value">{gender}</span>
            </div>
            <div class="field">
                <span class="field-label">"CPF"</span>
                <span class="field-value">{cpf}</span>
            </div>
        </div>
    }
}

#[component]
pub fn PatientAddPage() -> impl IntoView {
    #[allow(unused_variables)]
    let auth = use_auth();
    #[allow(unused_variables)]
    let navigate = use_navigate();
    let form = RwSignal::new(RegisterPatientRequest::default());
    #[allow(unused_variables)]
    let (error, setError) = signal(Option::<String>::None);
    #[allow(unused_variables)]
    let (submitting, setSubmitting) = signal(false);

    let firstName = bind_field(form, |f| f.first_name.clone(), |f, v| f.first_name = v);
    let lastName = bind_field(form, |f| f.last_name.clone(), |f, v| f.last_name = v);
    let cpf = bind_field(form, |f| f.cpf.clone(), |f, v| f.cpf = format_cpf(&v));
    let birthDate = bind_field(form, |f| f.birth_date.clone(), |f, v| f.birth_date = v);
    let password = bind_field(form, |f| f.password.clone(), |f, v| f.password = v);
    let gender = bind_field(form, |f| f.gender.clone(), |f, v| f.gender = v);

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
            use crate::format::with_message;
            use wasm_bindgen_futures::spawn_local;

            let navigate = navigate.clone();
            setError.set(None);
            setSubmitting.set(true);
            spawn_local(async move {
                match register_patient(req).await {
                    Ok(message) => navigate(
                        &with_message("/patients/add/success", &message),
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

    view! {
        <div class="dashboard-header">
            <h1>"Novo Paciente"</h1>
            <p class="subtitle">"Preencha os dados do paciente"</p>
        </div>
        <div class="card form-card">
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
                <div class="form-row">
                    <FormField
                        id="cpf"
                        label="CPF"
                        placeholder="000.000.000-00"
                        value=cpf.value
                        on_input=cpf.on_input
                    />
                    <FormField
                        id="birthDate"
                        label="Data de nascimento"
                        kind="date"
                        value=birthDate.value
                        on_input=birthDate.on_input
                    />
                </div>
                <div class="form-row">
                    <FormField
                        id="password"
                        label="Senha"
                        kind="password"
                        value=password.value
                        on_input=password.on_input
                    />
                    <GenderSelect value=gender.value on_change=gender.on_input />
                </div>
                <div class="form-actions">
                    <a href="/patients/list" class="btn btn-secondary">
                        "Cancelar"
                    </a>
                    <button type="submit" class="btn btn-primary" disabled=move || !canSubmit()>
                        {move || if submitting.get() { "Cadastrando..." } else { "Cadastrar Paciente" }}
                    </button>
                </div>
            </form>
        </div>
    }
}

#[component]
pub fn PatientAddSuccessPage() -> impl IntoView {
    view! {
        <SuccessPanel
            title="Paciente cadastrado!"
            fallback="Paciente criado com sucesso!"
            primary_href="/patients/list"
            primary_label="Ver pacientes"
            secondary_href="/patients/add"
            secondary_label="Cadastrar outro"
        />
    }
}

#[cfg(all(test, feature = "ssr"))]
mod tests {
    use super::*;

    #[test]
    fn empty_list_renders_empty_state() {
        let owner = Owner::new();
        let html = owner.with(|| view! { <PatientGrid patients=Vec::new() /> }.to_html());
        assert!(html.contains("Nenhum paciente encontrado"));
        assert!(!html.contains("Erro"));
    }

    #[test]
    fn patient_card_shows_derived_fields() {
        let patient = Patient {
            first_name: "Maria".into(),
            last_name: "Souza".into(),
            gender: Some(mango_types::Gender::Female),
            cpf: Some("123.456.789-01".into()),
            ..Default::default()
        };
        let owner = Owner::new();
        let html = owner.with(|| view! { <PatientGrid patients=vec![patient] /> }.to_html());
        assert!(html.contains("Maria Souza"));
        assert!(html.contains("Feminino"));
        assert!(html.contains("MS"));
    }
}
