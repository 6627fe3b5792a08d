//! Transient notifications.
//!
//! A context-held list of messages rendered by [`ToastProvider`] in a
//! fixed-position stack. Entries dismiss themselves after a few seconds,
//! or on click.

use dioxus::prelude::*;

const DISMISS_AFTER_SECS: u64 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
    Info,
}

impl ToastLevel {
    fn class(&self) -> &'static str {
        match self {
            ToastLevel::Success => "toast--success",
            ToastLevel::Error => "toast--error",
            ToastLevel::Info => "toast--info",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub level: ToastLevel,
    pub message: String,
}

#[derive(Clone, Debug, Default)]
struct Toasts {
    entries: Vec<Toast>,
    next_id: u64,
}

/// Handle for raising notifications from event handlers.
#[derive(Clone, Copy)]
pub struct ToastApi {
    toasts: Signal<Toasts>,
}

impl ToastApi {
    pub fn success(&mut self, message: impl Into<String>) {
        self.push(ToastLevel::Success, message.into());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(ToastLevel::Error, message.into());
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(ToastLevel::Info, message.into());
    }

    pub fn dismiss(&mut self, id: u64) {
        self.toasts.write().entries.retain(|t| t.id != id);
    }

    fn push(&mut self, level: ToastLevel, message: String) {
        let id = {
            let mut toasts = self.toasts.write();
            toasts.next_id += 1;
            let id = toasts.next_id;
            toasts.entries.push(Toast { id, level, message });
            id
        };

        let mut toasts = self.toasts;
        spawn(async move {
            #[cfg(target_arch = "wasm32")]
            gloo_timers::future::sleep(std::time::Duration::from_secs(DISMISS_AFTER_SECS)).await;
            #[cfg(not(target_arch = "wasm32"))]
            tokio::time::sleep(std::time::Duration::from_secs(DISMISS_AFTER_SECS)).await;

            toasts.write().entries.retain(|t| t.id != id);
        });
    }
}

/// Get the toast handle.
pub fn use_toasts() -> ToastApi {
    use_context::<ToastApi>()
}

/// Provider that owns the toast list and renders the stack.
#[component]
pub fn ToastProvider(children: Element) -> Element {
    let toasts = use_signal(Toasts::default);
    let mut toast_api = use_context_provider(|| ToastApi { toasts });

    rsx! {
        {children}

        div {
            class: "toast-stack",
            for toast in toasts().entries {
                div {
                    key: "{toast.id}",
                    class: "toast {toast.level.class()}",
                    onclick: move |_| toast_api.dismiss(toast.id),
                    "{toast.message}"
                }
            }
        }
    }
}
