use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub enum ToastLevel {
    Success,
    Error,
    Info,
}

impl ToastLevel {
    fn class(&self) -> &'static str {
        match self {
            ToastLevel::Success => "toast toast-success",
            ToastLevel::Error => "toast toast-error",
            ToastLevel::Info => "toast toast-info",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub level: ToastLevel,
}

#[derive(Clone, Copy)]
pub struct ToastContext {
    toasts: ReadSignal<Vec<Toast>>,
    set_toasts: WriteSignal<Vec<Toast>>,
    next_id: StoredValue<u64>,
}

impl ToastContext {
    pub fn push(&self, message: impl Into<String>, level: ToastLevel) {
        let toastId = self.next_id.get_value();
        self.next_id.set_value(toastId + 1);

        self.set_toasts.update(|toasts| {
            toasts.push(Toast {
                id: toastId,
                message: message.into(),
                level,
            });
        });

        let ctx = *self;
        set_timeout(
            move || ctx.dismiss(toastId),
            std::time::Duration::from_secs(5),
        );
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(message, ToastLevel::Success);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(message, ToastLevel::Error);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(message, ToastLevel::Info);
    }

    pub fn dismiss(&self, toastId: u64) {
        self.set_toasts.update(|toasts| toasts.retain(|t| t.id != toastId));
    }
}

/// Provides toast context and renders the toast stack. Mounted once in `App`.
#[component]
pub fn ToastProvider(children: Children) -> impl IntoView {
    let (toasts, setToasts) = signal(Vec::<Toast>::new());
    let ctx = ToastContext {
        toasts,
        set_toasts: setToasts,
        next_id: StoredValue::new(0),
    };
    provide_context(ctx);

    view! {
        {children()}
        <div class="toast-container">
            <For each=move || ctx.toasts.get() key=|toast| toast.id let:toast>
                <div class=toast.level.class() on:click=move |_| ctx.dismiss(toast.id)>
                    {toast.message.clone()}
                </div>
            </For>
        </div>
    }
}

pub fn use_toast() -> ToastContext {
    expect_context::<ToastContext>()
}
