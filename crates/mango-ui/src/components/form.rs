use leptos::prelude::*;

/// Labelled controlled input. The value lives in the caller's signal.
#[component]
pub fn FormField(
    #[prop(into)] id: String,
    #[prop(into)] label: String,
    #[prop(default = "text")] kind: &'static str,
    value: Signal<String>,
    #[prop(into)] on_input: Callback<String>,
    #[prop(optional, into)] placeholder: String,
) -> impl IntoView {
    view! {
        <div class="form-group">
            <label for=id.clone()>{label}</label>
            <input
                type=kind
                id=id.clone()
                name=id
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
        </div>
    }
}

/// Gender picker with the gateway's accepted values.
#[component]
pub fn GenderSelect(
    value: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
) -> impl IntoView {
    view! {
        <div class="form-group">
            <label for="gender">"Gênero"</label>
            <select
                id="gender"
                name="gender"
                prop:value=move || value.get()
                on:change=move |ev| on_change.run(event_target_value(&ev))
            >
                <option value="">"Selecione o gênero"</option>
                <option value="male">"Masculino"</option>
                <option value="female">"Feminino"</option>
                <option value="other">"Outro"</option>
                <option value="unknown">"Prefiro não informar"</option>
            </select>
        </div>
    }
}

/// Getter/setter pair for one field of a form record held in a signal.
#[derive(Clone, Copy)]
pub struct BoundField {
    pub value: Signal<String>,
    pub on_input: Callback<String>,
}

pub fn bind_field<T>(form: RwSignal<T>, get: fn(&T) -> String, set: fn(&mut T, String)) -> BoundField
where
    T: Send + Sync + 'static,
{
    BoundField {
        value: Signal::derive(move || form.with(get)),
        on_input: Callback::new(move |value| form.update(|f| set(f, value))),
    }
}
