use leptos::prelude::*;

pub const DEFAULT_MODEL: &str = "/models/source.glb";

/// Script that registers the `<model-viewer>` custom element. Loaded once in
/// the document head.
pub const MODEL_VIEWER_SCRIPT: &str =
    "https://ajax.googleapis.com/ajax/libs/model-viewer/3.5.0/model-viewer.min.js";

/// Interactive glTF viewer with orbit controls. A spinning cube stands in for
/// the model until the element reports `load`.
#[component]
pub fn ModelViewer(
    #[prop(optional, into)] src: Option<String>,
    #[prop(optional, into)] class: Option<String>,
) -> impl IntoView {
    let src = src.unwrap_or_else(|| DEFAULT_MODEL.to_string());
    let (loaded, setLoaded) = signal(false);

    view! {
        <div class=format!("model-viewer {}", class.unwrap_or_default())>
            <model-viewer
                src=src
                alt="Modelo 3D do cérebro"
                camera-controls=""
                auto-rotate=""
                shadow-intensity="1"
                exposure="1.2"
                on:load=move |_| setLoaded.set(true)
            >
                <div slot="poster" class="model-placeholder" class:hidden=move || loaded.get()>
                    <div class="spinning-cube"></div>
                </div>
            </model-viewer>
        </div>
    }
}
