//! Change-password form for a signed-in user.

#[cfg(test)]
#[path = "change_password_test.rs"]
mod change_password_test;

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::password_input::PasswordInput;
use crate::components::toast_host::notify;
use crate::net::api::ApiClient;
use crate::state::auth::AuthState;
use crate::state::ui::{ToastKind, UiState};
use crate::util::auth::install_unauth_redirect;
use crate::util::storage::redirect_path_for_role;
use crate::util::validate::validate_new_password;

pub const FIELDS_REQUIRED: &str = "All fields are required.";

/// Client-side checks before `/change-password/`.
pub fn validate_change_password(old: &str, new: &str, confirm: &str) -> Result<(), &'static str> {
    if old.is_empty() || new.is_empty() || confirm.is_empty() {
        return Err(FIELDS_REQUIRED);
    }
    validate_new_password(new, confirm)
}

#[component]
pub fn ChangePasswordPage() -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let navigate = use_navigate();
    install_unauth_redirect(auth, navigate.clone());

    let old_password = RwSignal::new(String::new());
    let new_password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<&'static str>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let (old, new, confirm) = (old_password.get_untracked(), new_password.get_untracked(), confirm_password.get_untracked());
        if let Err(message) = validate_change_password(&old, &new, &confirm) {
            error.set(Some(message));
            return;
        }
        error.set(None);
        busy.set(true);
        let api = api.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            match api.change_password(&old, &new, &confirm).await {
                Ok(resp) => {
                    notify(ui, ToastKind::Success, resp.message.unwrap_or_else(|| "Password changed successfully.".to_owned()));
                    let home = auth.with_untracked(|a| redirect_path_for_role(a.role.as_deref()));
                    navigate(home, NavigateOptions::default());
                }
                Err(e) => notify(ui, ToastKind::Error, e.user_message("Failed to change password.")),
            }
            busy.set(false);
        });
    };

    view! {
        <div class="auth-page">
            <form class="auth-card auth-form" on:submit=on_submit>
                <h1 class="auth-form__title">"Change Password"</h1>
                <PasswordInput
                    value=old_password
                    on_input=Callback::new(move |v| old_password.set(v))
                    placeholder="Current Password"
                />
                <PasswordInput
                    value=new_password
                    on_input=Callback::new(move |v| new_password.set(v))
                    placeholder="New Password"
                />
                <PasswordInput
                    value=confirm_password
                    on_input=Callback::new(move |v| confirm_password.set(v))
                    placeholder="Confirm New Password"
                />
                <Show when=move || error.get().is_some()>
                    <p class="auth-error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <button class="btn btn--primary auth-submit" type="submit" disabled=move || busy.get()>
                    {move || if busy.get() { "Updating..." } else { "Update Password" }}
                </button>
            </form>
        </div>
    }
}
