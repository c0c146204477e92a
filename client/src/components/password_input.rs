//! Password field with a show/hide toggle.

use leptos::prelude::*;

#[component]
pub fn PasswordInput(
    #[prop(into)] value: Signal<String>,
    on_input: Callback<String>,
    #[prop(into)] placeholder: String,
) -> impl IntoView {
    let visible = RwSignal::new(false);

    view! {
        <div class="password-input">
            <input
                class="auth-input"
                type=move || if visible.get() { "text" } else { "password" }
                placeholder=placeholder
                required
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
            <button
                type="button"
                class="password-input__toggle"
                aria-label=move || if visible.get() { "Hide password" } else { "Show password" }
                on:click=move |_| visible.update(|v| *v = !*v)
            >
                {move || if visible.get() { "Hide" } else { "Show" }}
            </button>
        </div>
    }
}
