use leptos::prelude::*;
use leptos_router::hooks::use_params_map;
use mango_types::Session;

use crate::components::card::{Card, Field};
use crate::components::feedback::{ErrorCard, Loading};
use crate::format::{
    emotion_class, emotion_for_type_id, format_date, format_duration, format_file_size,
    status_class, status_label, EMOTIONS,
};
use crate::hooks::use_auth;

#[server]
pub async fn show_session(file_id: String) -> Result<Session, ServerFnError> {
    let accessToken = crate::server::access_token().await?;
    crate::server::gateway()?
        .show_session(&accessToken, &file_id)
        .await
        .map_err(crate::server::relay)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetailTab {
    Overview,
    Annotations,
    Channels,
    Technical,
}

impl DetailTab {
    pub const ALL: [DetailTab; 4] = [
        DetailTab::Overview,
        DetailTab::Annotations,
        DetailTab::Channels,
        DetailTab::Technical,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DetailTab::Overview => "Visão Geral",
            DetailTab::Annotations => "Anotações",
            DetailTab::Channels => "Canais",
            DetailTab::Technical => "Técnico",
        }
    }
}

#[component]
pub fn SessionDetailPage() -> impl IntoView {
    #[allow(unused_variables)]
    let auth = use_auth();
    let params = use_params_map();
    #[allow(unused_variables)]
    let fileId = move || params.with(|p| p.get("file_id")).unwrap_or_default();
    #[allow(unused_variables)]
    let (session, setSession) = signal(Option::<Result<Session, String>>::None);

    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen_futures::spawn_local;

        let id = fileId();
        spawn_local(async move {
            let result = show_session(id).await.map_err(|e| auth.error_text(&e));
            setSession.set(Some(result));
        });
    }

    view! {
        <div class="dashboard-header with-action">
            <div>
                <h1>"Detalhes da Sessão"</h1>
                <p class="subtitle">"Metadados e anotações do registro EEG"</p>
            </div>
            <a href="/sessions/list" class="btn btn-secondary">
                "Voltar"
            </a>
        </div>
        {move || match session.get() {
            None => view! { <Loading message="Carregando sessão..." /> }.into_any(),
            Some(Ok(s)) => view! { <SessionDetail session=s /> }.into_any(),
            Some(Err(e)) => {
                view! { <ErrorCard message=format!("Erro ao carregar sessão: {e}") /> }.into_any()
            }
        }}
    }
}

#[component]
pub fn SessionDetail(session: Session) -> impl IntoView {
    let (tab, setTab) = signal(DetailTab::Overview);
    let title = if session.session_name.is_empty() {
        session.file_name.clone()
    } else {
        session.session_name.clone()
    };
    let statusCls = format!("status-badge {}", status_class(&session.processing_status));
    let statusText = status_label(&session.processing_status);
    let session = StoredValue::new(session);

    let tabs = DetailTab::ALL
        .into_iter()
        .map(|t| {
            view! {
                <button class="tab" class:active=move || tab.get() == t on:click=move |_| setTab.set(t)>
                    {t.label()}
                </button>
            }
        })
        .collect_view();

    view! {
        <div class="session-title">
            <h2>{title}</h2>
            <span class=statusCls>{statusText}</span>
        </div>
        <div class="tabs">{tabs}</div>
        {move || {
            let s = session.get_value();
            match tab.get() {
                DetailTab::Overview => view! { <OverviewTab session=s /> }.into_any(),
                DetailTab::Annotations => view! { <AnnotationsTab session=s /> }.into_any(),
                DetailTab::Channels => view! { <ChannelsTab session=s /> }.into_any(),
                DetailTab::Technical => view! { <TechnicalTab session=s /> }.into_any(),
            }
        }}
    }
}

#[component]
fn OverviewTab(session: Session) -> impl IntoView {
    let frequency = session
        .sample_frequency
        .map(|hz| format!("{hz} Hz"))
        .unwrap_or_else(|| "N/A".into());
    let channels = session
        .channels
        .or_else(|| session.metadata_json.as_ref().map(|m| m.channel_names.len() as u32))
        .map(|c| c.to_string())
        .unwrap_or_else(|| "N/A".into());

    let annotations = session.annotations();
    let emotionCounts = EMOTIONS
        .iter()
        .map(|(typeId, label)| {
            let count = annotations.iter().filter(|a| a.type_id() == Some(*typeId)).count();
            view! {
                <div class=format!("emotion-chip {}", emotion_class(*typeId))>
                    <span>{*label}</span>
                    <strong>{count}</strong>
                </div>
            }
        })
        .collect_view();

    view! {
        <div class="detail-grid">
            <Card title="Informações">
                <Field label="Nome" value=session.session_name.clone() />
                <Field label="Paciente" value=session.patient_iid.clone() />
                <Field label="Arquivo" value=session.file_name.clone() />
                <Field label="Gravação" value=format_date(session.recording_date.as_deref()) />
            </Card>
            <Card title="Sinal">
                <Field label="Duração" value=format_duration(session.duration) />
                <Field label="Frequência de amostragem" value=frequency />
                <Field label="Canais" value=channels />
                <Field label="Tamanho" value=format_file_size(session.file_size) />
            </Card>
            <Card title="Emoções anotadas">
                <div class="emotion-summary">{emotionCounts}</div>
            </Card>
        </div>
    }
}

#[component]
fn AnnotationsTab(session: Session) -> impl IntoView {
    let annotations = session.annotations().to_vec();
    if annotations.is_empty() {
        return view! { <p class="empty-state">"Nenhuma anotação registrada"</p> }.into_any();
    }

    let rows = annotations
        .into_iter()
        .map(|a| {
            let typeId = a.type_id();
            let emotion = typeId.and_then(emotion_for_type_id).unwrap_or("Desconhecido");
            let chipClass = format!("emotion-chip {}", emotion_class(typeId.unwrap_or(0)));
            view! {
                <tr>
                    <td>{format!("{:.2}s", a.onset)}</td>
                    <td>{format!("{:.2}s", a.duration)}</td>
                    <td>
                        <span class=chipClass>{emotion}</span>
                    </td>
                    <td class="mono">{a.description.clone()}</td>
                </tr>
            }
        })
        .collect_view();

    view! {
        <table class="data-table">
            <thead>
                <tr>
                    <th>"Início"</th>
                    <th>"Duração"</th>
                    <th>"Emoção"</th>
                    <th>"Descrição"</th>
                </tr>
            </thead>
            <tbody>{rows}</tbody>
        </table>
    }
    .into_any()
}

#[component]
fn ChannelsTab(session: Session) -> impl IntoView {
    let metadata = session.metadata_json.unwrap_or_default();
    if metadata.channel_names.is_empty() {
        return view! { <p class="empty-state">"Nenhum canal disponível"</p> }.into_any();
    }

    let badChannels = metadata.bad_channels;
    let channels = metadata
        .channel_names
        .into_iter()
        .map(|name| {
            let isBad = badChannels.contains(&name);
            view! {
                <div class="channel" class:bad=isBad>
                    {name}
                </div>
            }
        })
        .collect_view();

    view! { <div class="channel-grid">{channels}</div> }.into_any()
}

#[component]
fn TechnicalTab(session: Session) -> impl IntoView {
    let annotationCount = session.annotations().len().to_string();
    let badCount = session
        .metadata_json
        .as_ref()
        .map(|m| m.bad_channels.len())
        .unwrap_or(0)
        .to_string();

    view! {
        <Card title="Detalhes técnicos">
            <Field label="ID" value=session.id.clone() />
            <Field label="Caminho do arquivo" value=session.file_path.clone() />
            <Field label="Status" value=status_label(&session.processing_status) />
            <Field label="Anotações" value=annotationCount />
            <Field label="Canais ruins" value=badCount />
            <Field label="Criado em" value=format_date(session.created_at.as_deref()) />
            <Field label="Atualizado em" value=format_date(session.updated_at.as_deref()) />
        </Card>
    }
}

#[cfg(all(test, feature = "ssr"))]
mod tests {
    use super::*;
    use mango_types::{Annotation, SessionMetadata};

    #[test]
    fn overview_counts_annotated_emotions() {
        let session = Session {
            session_name: "Basal".into(),
            duration: Some(125.0),
            metadata_json: Some(SessionMetadata {
                channel_names: vec!["Fp1".into(), "Fp2".into()],
                bad_channels: vec![],
                annotations: vec![
                    Annotation {
                        onset: 1.0,
                        duration: 2.0,
                        description: "TypeID: 20".into(),
                    },
                    Annotation {
                        onset: 5.0,
                        duration: 2.0,
                        description: "TypeID: 20".into(),
                    },
                ],
            }),
            ..Default::default()
        };

        let owner = Owner::new();
        let html = owner.with(|| view! { <SessionDetail session=session /> }.to_html());
        assert!(html.contains("Basal"));
        assert!(html.contains("2m 5s"));
        assert!(html.contains("Feliz"));
        assert!(html.contains("Visão Geral"));
    }
}
