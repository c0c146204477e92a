//! Three-step password recovery: email, OTP, new password. Errors render
//! inline above the step's submit button; a failed step keeps its fields.

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::password_input::PasswordInput;
use crate::components::toast_host::notify;
use crate::net::api::ApiClient;
use crate::state::auth_wizard::{AuthWizard, ForgotStep};
use crate::state::ui::{ToastKind, UiState};

const RESET_OK: &str = "Password reset successful. Please login.";

#[component]
pub fn ForgotPasswordForm(wizard: RwSignal<AuthWizard>) -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let ui = expect_context::<RwSignal<UiState>>();

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let mut checked = Ok(());
        wizard.update(|w| checked = w.validate_forgot_step());
        if checked.is_err() {
            return;
        }
        let mut started = false;
        wizard.update(|w| started = w.begin_request());
        if !started {
            return;
        }
        let (step, email, otp, new_password) = wizard.with_untracked(|w| {
            (w.forgot.step, w.forgot.email.trim().to_owned(), w.forgot.otp.trim().to_owned(), w.forgot.new_password.clone())
        });
        let api = api.clone();
        spawn_local(async move {
            let result = match step {
                ForgotStep::Email => api.forgot_password_send_otp(&email).await,
                ForgotStep::Otp => api.forgot_password_verify_otp(&email, &otp).await,
                ForgotStep::NewPassword => api.forgot_password_reset(&email, &new_password).await,
            };
            match result {
                Ok(resp) => {
                    wizard.update(AuthWizard::forgot_step_succeeded);
                    if step == ForgotStep::NewPassword {
                        notify(ui, ToastKind::Success, resp.message.unwrap_or_else(|| RESET_OK.to_owned()));
                    }
                }
                Err(e) => {
                    let fallback = match step {
                        ForgotStep::Email => "Failed to send OTP.",
                        ForgotStep::Otp => "Invalid OTP.",
                        ForgotStep::NewPassword => "Failed to reset password.",
                    };
                    wizard.update(|w| w.forgot_step_failed(e.user_message(fallback)));
                }
            }
        });
    };

    let step = move || wizard.with(|w| w.forgot.step);
    let pending = move || wizard.with(|w| w.pending);

    view! {
        <form class="auth-form forgot-form" on:submit=on_submit>
            <h2 class="auth-form__title">"Reset Password"</h2>
            <p class="auth-hint">{move || format!("Step {} of 3", step().number())}</p>
            <input
                class="auth-input"
                type="email"
                placeholder="Email Address"
                autocomplete="email"
                required
                disabled=move || step() != ForgotStep::Email
                prop:value=move || wizard.with(|w| w.forgot.email.clone())
                on:input=move |ev| wizard.update(|w| w.forgot.email = event_target_value(&ev))
            />
            <Show when=move || step() == ForgotStep::Otp>
                <input
                    class="auth-input"
                    type="text"
                    placeholder="Enter OTP"
                    inputmode="numeric"
                    autocomplete="one-time-code"
                    prop:value=move || wizard.with(|w| w.forgot.otp.clone())
                    on:input=move |ev| wizard.update(|w| w.forgot.otp = event_target_value(&ev))
                />
            </Show>
            <Show when=move || step() == ForgotStep::NewPassword>
                <PasswordInput
                    value=Signal::derive(move || wizard.with(|w| w.forgot.new_password.clone()))
                    on_input=Callback::new(move |v: String| wizard.update(|w| w.set_forgot_new_password(&v)))
                    placeholder="New Password"
                />
                <PasswordInput
                    value=Signal::derive(move || wizard.with(|w| w.forgot.confirm_password.clone()))
                    on_input=Callback::new(move |v: String| wizard.update(|w| w.set_forgot_confirm(&v)))
                    placeholder="Confirm New Password"
                />
            </Show>
            <Show when=move || wizard.with(|w| w.forgot.error.is_some())>
                <p class="auth-error">{move || wizard.with(|w| w.forgot.error.clone().unwrap_or_default())}</p>
            </Show>
            <button class="btn btn--primary auth-submit" type="submit" disabled=pending>
                {move || match (pending(), step()) {
                    (true, _) => "Please wait...",
                    (false, ForgotStep::Email) => "Send OTP",
                    (false, ForgotStep::Otp) => "Verify OTP",
                    (false, ForgotStep::NewPassword) => "Reset Password",
                }}
            </button>
            <button type="button" class="auth-link" on:click=move |_| wizard.update(AuthWizard::back_to_login)>
                "Back to Login"
            </button>
        </form>
    }
}
