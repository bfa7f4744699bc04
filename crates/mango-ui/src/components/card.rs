use leptos::prelude::*;

/// Titled panel used for profile sections, session details and forms.
#[component]
pub fn Card(
    /// Heading shown at the top of the card
    #[prop(into)]
    title: String,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="card">
            <div class="card-title">{title}</div>
            {children()}
        </div>
    }
}

/// Label/value pair inside a card.
#[component]
pub fn Field(#[prop(into)] label: String, #[prop(into)] value: String) -> impl IntoView {
    view! {
        <div class="field">
            <span class="field-label">{label}</span>
            <span class="field-value">{value}</span>
        </div>
    }
}
