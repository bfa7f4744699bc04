use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use mango_types::{ProfileUpdate, Scientist};

use crate::components::card::{Card, Field};
use crate::components::feedback::{ErrorCard, Loading};
use crate::components::form::{bind_field, FormField, GenderSelect};
use crate::components::toast::use_toast;
use crate::format::format_gender;
use crate::hooks::use_auth;

#[server]
pub async fn get_profile() -> Result<Scientist, ServerFnError> {
    let accessToken = crate::server::access_token().await?;
    crate::server::gateway()?
        .profile(&accessToken)
        .await
        .map_err(crate::server::relay)
}

/// Text-only profile edit; a new picture is sent to the multipart BFF route
/// from the browser instead.
#[server]
pub async fn update_profile(update: ProfileUpdate) -> Result<Scientist, ServerFnError> {
    let accessToken = crate::server::access_token().await?;
    crate::server::gateway()?
        .update_profile(&accessToken, &update, None)
        .await
        .map_err(crate::server::relay)
}

/// Form values pre-filled from the current profile.
pub fn editable_fields(scientist: &Scientist) -> ProfileUpdate {
    ProfileUpdate {
        first_name: scientist.first_name.clone(),
        last_name: scientist.last_name.clone(),
        institution: scientist.institution.clone(),
        specialization: scientist.specialization.clone(),
        gender: scientist
            .gender
            .as_ref()
            .map(|g| g.as_str().to_string())
            .unwrap_or_default(),
        age: scientist.age.map(|a| a.to_string()).unwrap_or_default(),
    }
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    #[allow(unused_variables)]
    let auth = use_auth();
    #[allow(unused_variables)]
    let (profile, setProfile) = signal(Option::<Result<Scientist, String>>::None);
    let (editing, setEditing) = signal(false);

    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen_futures::spawn_local;

        spawn_local(async move {
            let result = get_profile().await.map_err(|e| auth.error_text(&e));
            setProfile.set(Some(result));
        });
    }

    let onSaved = Callback::new(move |scientist: Scientist| {
        setProfile.set(Some(Ok(scientist)));
        setEditing.set(false);
    });

    view! {
        <div class="dashboard-header with-action">
            <div>
                <h1>"Meu Perfil"</h1>
                <p class="subtitle">"Informações da sua conta de cientista"</p>
            </div>
            <button class="btn btn-secondary" on:click=move |_| setEditing.update(|e| *e = !*e)>
                {move || if editing.get() { "Cancelar" } else { "Editar perfil" }}
            </button>
        </div>
        {move || match profile.get() {
            None => view! { <Loading message="Carregando perfil..." /> }.into_any(),
            Some(Err(e)) => {
                view! { <ErrorCard message=format!("Erro ao carregar perfil: {e}") /> }.into_any()
            }
            Some(Ok(scientist)) if editing.get() => {
                view! { <ProfileForm scientist=scientist on_saved=onSaved /> }.into_any()
            }
            Some(Ok(scientist)) => view! { <ProfileView scientist=scientist /> }.into_any(),
        }}
    }
}

#[component]
pub fn ProfileView(scientist: Scientist) -> impl IntoView {
    let fullName = format!("{} {}", scientist.first_name, scientist.last_name)
        .trim()
        .to_string();
    let initials: String = scientist
        .first_name
        .chars()
        .take(1)
        .chain(scientist.last_name.chars().take(1))
        .collect();
    let avatar = match scientist.profile_picture.clone() {
        Some(src) if !src.is_empty() => {
            view! { <img class="avatar large" src=src alt="Foto de perfil" /> }.into_any()
        }
        _ => view! { <div class="avatar large">{initials}</div> }.into_any(),
    };
    let age = scientist
        .age
        .map(|a| format!("{a} anos"))
        .unwrap_or_else(|| "N/A".into());

    view! {
        <div class="profile-layout">
            <div class="card profile-summary">
                {avatar}
                <h2>{fullName}</h2>
                <p class="subtitle">{scientist.email.clone()}</p>
            </div>
            <Card title="Dados profissionais">
                <Field label="Instituição" value=scientist.institution.clone() />
                <Field label="Especialização" value=scientist.specialization.clone() />
                <Field label="Gênero" value=format_gender(scientist.gender.as_ref()) />
                <Field label="Idade" value=age />
            </Card>
        </div>
    }
}

#[component]
fn ProfileForm(scientist: Scientist, on_saved: Callback<Scientist>) -> impl IntoView {
    #[allow(unused_variables)]
    let auth = use_auth();
    let form = RwSignal::new(editable_fields(&scientist));
    #[allow(unused_variables)]
    let toast = use_toast();
    #[allow(unused_variables)]
    let (error, setError) = signal(Option::<String>::None);
    #[allow(unused_variables)]
    let (saving, setSaving) = signal(false);
    #[allow(unused_variables)]
    let (preview, setPreview) = signal(Option::<String>::None);
    let pictureInput = NodeRef::<leptos::html::Input>::new();

    let firstName = bind_field(form, |f| f.first_name.clone(), |f, v| f.first_name = v);
    let lastName = bind_field(form, |f| f.last_name.clone(), |f, v| f.last_name = v);
    let institution = bind_field(form, |f| f.institution.clone(), |f, v| f.institution = v);
    let specialization =
        bind_field(form, |f| f.specialization.clone(), |f, v| f.specialization = v);
    let gender = bind_field(form, |f| f.gender.clone(), |f, v| f.gender = v);
    let age = bind_field(form, |f| f.age.clone(), |f, v| f.age = v);

    let currentPicture = scientist.profile_picture.clone().filter(|src| !src.is_empty());
    let shownPicture = move || preview.get().or_else(|| currentPicture.clone());

    let onPicture = move |_: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        {
            use crate::browser::{preview_url, release_preview, selected_file};
            use mango_types::validate_picture;

            if let Some(old) = preview.get_untracked() {
                release_preview(&old);
            }
            let Some(input) = pictureInput.get_untracked() else {
                return;
            };
            let Some(file) = selected_file(&input) else {
                setPreview.set(None);
                return;
            };
            match validate_picture(&file.type_(), file.size() as usize) {
                Ok(()) => {
                    setError.set(None);
                    setPreview.set(preview_url(&file));
                }
                Err(message) => {
                    input.set_value("");
                    setPreview.set(None);
                    setError.set(Some(message));
                }
            }
        }
    };

    let onSubmit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let update = form.get_untracked();
        let hasPicture = preview.get_untracked().is_some();
        if update.fields().is_empty() && !hasPicture {
            setError.set(Some("Nenhuma alteração para salvar".into()));
            return;
        }

        #[cfg(feature = "hydrate")]
        {
            use crate::browser::{selected_file, send_profile_update};
            use wasm_bindgen_futures::spawn_local;

            let picture = pictureInput
                .get_untracked()
                .and_then(|input| selected_file(&input))
                .filter(|_| hasPicture);
            setError.set(None);
            setSaving.set(true);
            spawn_local(async move {
                let result = match picture {
                    Some(file) => send_profile_update(&update, &file)
                        .await
                        .map_err(|message| auth.error_message(message)),
                    None => update_profile(update).await.map_err(|e| auth.error_text(&e)),
                };
                match result {
                    Ok(scientist) => {
                        toast.success("Perfil atualizado com sucesso");
                        on_saved.run(scientist);
                    }
                    Err(message) => setError.set(Some(message)),
                }
                setSaving.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (update, on_saved);
        }
    };

    view! {
        <div class="card form-card">
            {move || error.get().map(|message| view! { <div class="form-error">{message}</div> })}
            <form on:submit=onSubmit>
                <div class="picture-field">
                    {move || match shownPicture() {
                        Some(src) => {
                            view! { <img class="avatar large" src=src alt="Foto de perfil" /> }
                                .into_any()
                        }
                        None => view! { <div class="avatar large">"?"</div> }.into_any(),
                    }}
                    <label for="profilePicture" class="btn btn-secondary">
                        "Escolher foto"
                    </label>
                    <input
                        id="profilePicture"
                        name="profile_picture"
                        type="file"
                        accept="image/*"
                        class="hidden"
                        node_ref=pictureInput
                        on:change=onPicture
                    />
                    <span class="subtitle">"JPEG, PNG, GIF ou WebP, até 5MB"</span>
                </div>
                <div class="form-row">
                    <FormField id="firstName" label="Nome" value=firstName.value on_input=firstName.on_input />
                    <FormField id="lastName" label="Sobrenome" value=lastName.value on_input=lastName.on_input />
                </div>
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
                <div class="form-row">
                    <GenderSelect value=gender.value on_change=gender.on_input />
                    <FormField id="age" label="Idade" kind="number" value=age.value on_input=age.on_input />
                </div>
                <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                    {move || if saving.get() { "Salvando..." } else { "Salvar" }}
                </button>
            </form>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mango_types::Gender;

    #[test]
    fn edit_form_starts_from_current_profile() {
        let scientist = Scientist {
            first_name: "Ana".into(),
            institution: "UTFPR".into(),
            gender: Some(Gender::Female),
            age: Some(31),
            ..Default::default()
        };
        let fields = editable_fields(&scientist);
        assert_eq!(fields.first_name, "Ana");
        assert_eq!(fields.gender, "female");
        assert_eq!(fields.age, "31");
        assert_eq!(fields.last_name, "");
    }
}
