//! Signup tab: account details, then OTP verification of the chosen
//! identifier. A verified signup drops the user back on a clean login tab.

use leptos::ev::{MouseEvent, SubmitEvent};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::login_form::social_login_handler;
use crate::components::password_input::PasswordInput;
use crate::components::role_dropdown::RoleDropdown;
use crate::components::social_login::SocialLogin;
use crate::components::toast_host::notify;
use crate::net::api::ApiClient;
use crate::state::auth_wizard::{AuthWizard, SignupMethod, SignupStage};
use crate::state::ui::{ToastKind, UiState};

const SIGNUP_FAILED: &str = "Signup failed!";
const VERIFIED: &str = "Account verified. Please login.";

#[component]
pub fn SignupForm(wizard: RwSignal<AuthWizard>) -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let ui = expect_context::<RwSignal<UiState>>();
    let on_google = social_login_handler(wizard);

    let api_signup = api.clone();
    let on_details_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let mut checked = Err(SIGNUP_FAILED);
        wizard.update(|w| checked = w.validate_signup());
        let role = match checked {
            Ok(role) => role,
            Err(message) => {
                notify(ui, ToastKind::Error, message);
                return;
            }
        };
        let mut started = false;
        wizard.update(|w| started = w.begin_request());
        if !started {
            return;
        }
        let payload = wizard.with_untracked(|w| w.signup_payload(role));
        let api = api_signup.clone();
        spawn_local(async move {
            match api.signup(&payload).await {
                Ok(challenge) => {
                    wizard.update(|w| w.signup_otp_sent(challenge.user_id));
                    let message = challenge.message.unwrap_or_else(|| "OTP sent. Verify to finish signup.".to_owned());
                    notify(ui, ToastKind::Success, message);
                }
                Err(e) => {
                    wizard.update(AuthWizard::request_failed);
                    notify(ui, ToastKind::Error, e.user_message(SIGNUP_FAILED));
                }
            }
        });
    };

    let api_verify = api.clone();
    let on_otp_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if let Err(message) = wizard.with_untracked(AuthWizard::validate_signup_otp) {
            notify(ui, ToastKind::Error, message);
            return;
        }
        let mut started = false;
        wizard.update(|w| started = w.begin_request());
        if !started {
            return;
        }
        let (method, email, user_id, otp) = wizard.with_untracked(|w| {
            (w.signup_method, w.signup.email.trim().to_owned(), w.signup.user_id.clone(), w.signup.otp.trim().to_owned())
        });
        let api = api_verify.clone();
        spawn_local(async move {
            let result = match (method, user_id) {
                (SignupMethod::Email, _) => api.verify_signup_email(&email, &otp).await,
                (SignupMethod::MobileOtp, Some(user_id)) => api.verify_signup_mobile(&user_id, &otp).await,
                (SignupMethod::MobileOtp, None) => {
                    wizard.update(AuthWizard::request_failed);
                    notify(ui, ToastKind::Error, "Signup session expired. Please sign up again.");
                    return;
                }
            };
            match result {
                Ok(resp) => {
                    wizard.update(AuthWizard::signup_completed);
                    notify(ui, ToastKind::Success, resp.message.unwrap_or_else(|| VERIFIED.to_owned()));
                }
                Err(e) => {
                    wizard.update(AuthWizard::request_failed);
                    notify(ui, ToastKind::Error, e.user_message("OTP verification failed."));
                }
            }
        });
    };

    let api_resend = api.clone();
    let on_resend = move |_: MouseEvent| {
        let (method, email, user_id) =
            wizard.with_untracked(|w| (w.signup_method, w.signup.email.trim().to_owned(), w.signup.user_id.clone()));
        wizard.update(AuthWizard::restart_signup_cooldown);
        let api = api_resend.clone();
        spawn_local(async move {
            let result = match (method, user_id) {
                (SignupMethod::Email, _) => api.resend_email_otp(&email).await,
                (SignupMethod::MobileOtp, Some(user_id)) => api.resend_mobile_otp(&user_id).await,
                (SignupMethod::MobileOtp, None) => return,
            };
            match result {
                Ok(resp) => notify(ui, ToastKind::Info, resp.message.unwrap_or_else(|| "OTP resent.".to_owned())),
                Err(e) => notify(ui, ToastKind::Error, e.user_message("Failed to resend OTP.")),
            }
        });
    };

    let is_email = move || wizard.with(|w| w.signup_method == SignupMethod::Email);
    let in_details = move || wizard.with(|w| w.signup.stage == SignupStage::Details);
    let submit_disabled = move || !wizard.with(AuthWizard::submit_enabled);
    let pending = move || wizard.with(|w| w.pending);
    let cooldown = move || wizard.with(|w| w.signup.resend_cooldown);
    let field_error = move |pick: fn(&AuthWizard) -> Option<&'static str>| {
        view! {
            <Show when=move || wizard.with(|w| pick(w).is_some())>
                <p class="auth-error">{move || wizard.with(|w| pick(w).unwrap_or_default())}</p>
            </Show>
        }
        .into_any()
    };

    let details_form = move || {
        view! {
            <form class="auth-form" on:submit=on_details_submit.clone()>
                <input
                    class="auth-input"
                    type="text"
                    placeholder="Full Name"
                    autocomplete="name"
                    required
                    prop:value=move || wizard.with(|w| w.signup.full_name.clone())
                    on:input=move |ev| wizard.update(|w| w.set_signup_name(&event_target_value(&ev)))
                />
                {field_error(|w| w.signup.name_error)}
                <Show
                    when=is_email
                    fallback=move || {
                        view! {
                            <input
                                class="auth-input"
                                type="tel"
                                placeholder="Mobile Number"
                                inputmode="numeric"
                                maxlength="10"
                                required
                                prop:value=move || wizard.with(|w| w.signup.mobile.clone())
                                on:input=move |ev| wizard.update(|w| w.set_signup_mobile(&event_target_value(&ev)))
                            />
                            {field_error(|w| w.signup.mobile_error)}
                        }
                    }
                >
                    <input
                        class="auth-input"
                        type="email"
                        placeholder="Email Address"
                        autocomplete="email"
                        required
                        prop:value=move || wizard.with(|w| w.signup.email.clone())
                        on:input=move |ev| wizard.update(|w| w.set_signup_email(&event_target_value(&ev)))
                    />
                    {field_error(|w| w.signup.email_error)}
                </Show>
                <input
                    class="auth-input"
                    type="text"
                    placeholder="Aadhaar Number (optional)"
                    inputmode="numeric"
                    maxlength="12"
                    prop:value=move || wizard.with(|w| w.signup.aadhaar.clone())
                    on:input=move |ev| wizard.update(|w| w.set_signup_aadhaar(&event_target_value(&ev)))
                />
                <PasswordInput
                    value=Signal::derive(move || wizard.with(|w| w.signup.password.clone()))
                    on_input=Callback::new(move |v: String| wizard.update(|w| w.set_signup_password(&v)))
                    placeholder="Password"
                />
                <PasswordInput
                    value=Signal::derive(move || wizard.with(|w| w.signup.confirm_password.clone()))
                    on_input=Callback::new(move |v: String| wizard.update(|w| w.set_signup_confirm(&v)))
                    placeholder="Confirm Password"
                />
                {field_error(|w| w.signup.password_error)}
                <RoleDropdown wizard=wizard/>
                <div class="auth-links">
                    <button type="button" class="auth-link" on:click=move |_| wizard.update(AuthWizard::toggle_signup_method)>
                        {move || if is_email() { "Sign up with Mobile" } else { "Sign up with Email" }}
                    </button>
                </div>
                <button class="btn btn--primary auth-submit" type="submit" disabled=submit_disabled>
                    {move || if pending() { "Signing up..." } else { "Sign Up" }}
                </button>
            </form>
        }
    };

    let otp_form = move || {
        view! {
            <form class="auth-form" on:submit=on_otp_submit.clone()>
                <p class="auth-hint">
                    {move || {
                        wizard.with(|w| match w.signup_method {
                            SignupMethod::Email => format!("We sent an OTP to {}.", w.signup.email),
                            SignupMethod::MobileOtp => format!("We sent an OTP to {}.", w.signup.mobile),
                        })
                    }}
                </p>
                <input
                    class="auth-input"
                    type="text"
                    placeholder="Enter OTP"
                    inputmode="numeric"
                    autocomplete="one-time-code"
                    required
                    prop:value=move || wizard.with(|w| w.signup.otp.clone())
                    on:input=move |ev| wizard.update(|w| w.signup.otp = event_target_value(&ev))
                />
                <button type="button" class="auth-link" disabled=move || cooldown() > 0 on:click=on_resend.clone()>
                    {move || match cooldown() {
                        0 => "Resend OTP".to_owned(),
                        n => format!("Resend OTP in {n}s"),
                    }}
                </button>
                <button class="btn btn--primary auth-submit" type="submit" disabled=pending>
                    {move || if pending() { "Verifying..." } else { "Verify OTP" }}
                </button>
            </form>
        }
    };

    view! {
        <div class="signup-form">
            <Show when=in_details fallback=otp_form>
                {details_form.clone()}
            </Show>
            <SocialLogin on_credential=on_google/>
        </div>
    }
}
