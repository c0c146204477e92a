//! Toast notifications: the host overlay and the `notify` helper.

use leptos::prelude::*;

use crate::state::ui::{TOAST_TTL_MS, ToastKind, UiState};

/// Queue a toast and schedule its dismissal.
pub fn notify(ui: RwSignal<UiState>, kind: ToastKind, message: impl Into<String>) {
    let message = message.into();
    if kind == ToastKind::Error {
        leptos::logging::warn!("{message}");
    }
    let mut id = 0;
    ui.update(|u| id = u.push_toast(kind, message));

    #[cfg(feature = "hydrate")]
    gloo_timers::callback::Timeout::new(TOAST_TTL_MS, move || {
        ui.update(|u| u.dismiss_toast(id));
    })
    .forget();
    #[cfg(not(feature = "hydrate"))]
    let _ = (id, TOAST_TTL_MS);
}

/// Fixed overlay rendering the toast queue from context.
#[component]
pub fn ToastHost() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();

    view! {
        <div class="toast-host" role="status" aria-live="polite">
            <For each=move || ui.get().toasts key=|t| t.id let:toast>
                <div class=toast.kind.class()>
                    <span class="toast__message">{toast.message.clone()}</span>
                    <button
                        class="toast__close"
                        aria-label="Dismiss"
                        on:click=move |_| ui.update(|u| u.dismiss_toast(toast.id))
                    >
                        "×"
                    </button>
                </div>
            </For>
        </div>
    }
}
