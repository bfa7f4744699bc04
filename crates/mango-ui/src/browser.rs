//! Browser-only plumbing for the profile picture upload. Server functions
//! cannot carry a `File`, so the picture goes to the multipart BFF route.

use mango_types::{ApiResponse, ProfileUpdate, Scientist, NOT_AUTHENTICATED};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, HtmlInputElement, RequestCredentials, RequestInit, Response, Url};

const UPDATE_ROUTE: &str = "/bff/scientist/update";
const NETWORK_ERROR: &str = "Falha de rede ao enviar a foto";

pub fn selected_file(input: &HtmlInputElement) -> Option<File> {
    input.files().and_then(|files| files.get(0))
}

pub fn preview_url(file: &File) -> Option<String> {
    Url::create_object_url_with_blob(file).ok()
}

pub fn release_preview(url: &str) {
    let _ = Url::revoke_object_url(url);
}

/// Sends the text fields plus `profile_picture` as one multipart PATCH.
pub async fn send_profile_update(
    update: &ProfileUpdate,
    picture: &File,
) -> Result<Scientist, String> {
    let form = FormData::new().map_err(|_| NETWORK_ERROR.to_string())?;
    for (name, value) in update.fields() {
        form.append_with_str(name, &value)
            .map_err(|_| NETWORK_ERROR.to_string())?;
    }
    form.append_with_blob_and_filename("profile_picture", picture, &picture.name())
        .map_err(|_| NETWORK_ERROR.to_string())?;

    let init = RequestInit::new();
    init.set_method("PATCH");
    init.set_credentials(RequestCredentials::SameOrigin);
    init.set_body(&form.into());

    let window = web_sys::window().ok_or_else(|| NETWORK_ERROR.to_string())?;
    let response: Response = JsFuture::from(window.fetch_with_str_and_init(UPDATE_ROUTE, &init))
        .await
        .and_then(|value| value.dyn_into())
        .map_err(|_| NETWORK_ERROR.to_string())?;

    if response.status() == 401 {
        return Err(NOT_AUTHENTICATED.into());
    }

    let text = match response.text() {
        Ok(promise) => JsFuture::from(promise).await.ok().and_then(|v| v.as_string()),
        Err(_) => None,
    }
    .unwrap_or_default();

    let body: ApiResponse<Scientist> =
        serde_json::from_str(&text).map_err(|_| format!("Erro {}", response.status()))?;
    match body {
        ApiResponse {
            success: true,
            data: Some(scientist),
            ..
        } => Ok(scientist),
        other => Err(other
            .message
            .unwrap_or_else(|| "Erro ao atualizar perfil".into())),
    }
}
