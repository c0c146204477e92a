//! Login tab: password login, mobile OTP login, and the Google button.
//!
//! ERROR HANDLING
//! ==============
//! Validation failures render inline under the offending field. Server
//! failures surface as error toasts carrying the server's message when it
//! sent one; the draft is left untouched so the user can retry.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos::ev::SubmitEvent;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::password_input::PasswordInput;
use crate::components::role_dropdown::RoleDropdown;
use crate::components::social_login::SocialLogin;
use crate::components::toast_host::notify;
use crate::net::api::ApiClient;
use crate::net::types::LoginResponse;
use crate::state::auth::{AuthState, session_from_login};
use crate::state::auth_wizard::{AuthWizard, LoginMethod};
use crate::state::ui::{ToastKind, UiState};

pub const LOGIN_FAILED: &str = "Login failed!";
const LOGIN_OK: &str = "Logged in successfully!";
const OTP_SENT: &str = "OTP sent to your mobile number.";

/// Store the session from a token response and move to the role's landing
/// route. Shared by every login path, including social login from signup.
pub fn complete_login(
    api: &ApiClient,
    auth: RwSignal<AuthState>,
    ui: RwSignal<UiState>,
    wizard: RwSignal<AuthWizard>,
    navigate: &impl Fn(&str, NavigateOptions),
    resp: &LoginResponse,
) {
    let chosen = wizard.with_untracked(|w| w.role.map(|r| r.api_value()));
    match session_from_login(api.tokens().as_ref(), resp, chosen) {
        Some((state, path)) => {
            auth.set(state);
            wizard.update(AuthWizard::login_succeeded);
            notify(ui, ToastKind::Success, resp.message.clone().unwrap_or_else(|| LOGIN_OK.to_owned()));
            navigate(path, NavigateOptions::default());
        }
        None => {
            wizard.update(AuthWizard::request_failed);
            notify(ui, ToastKind::Error, resp.message.clone().unwrap_or_else(|| LOGIN_FAILED.to_owned()));
        }
    }
}

/// Exchange an identity-provider credential and finish login.
pub fn social_login_handler(wizard: RwSignal<AuthWizard>) -> Callback<String> {
    let api = expect_context::<ApiClient>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let navigate = use_navigate();
    Callback::new(move |credential: String| {
        let api = api.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            match api.exchange_social_token(&credential).await {
                Ok(resp) => complete_login(&api, auth, ui, wizard, &navigate, &resp),
                Err(e) => notify(ui, ToastKind::Error, e.user_message("Google login failed.")),
            }
        });
    })
}

#[component]
pub fn LoginForm(wizard: RwSignal<AuthWizard>) -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let on_google = social_login_handler(wizard);
    let navigate = use_navigate();

    let api_password = api.clone();
    let navigate_password = navigate.clone();
    let on_password_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let mut checked = Err(LOGIN_FAILED);
        wizard.update(|w| checked = w.validate_password_login());
        let Ok(role) = checked else { return };
        let mut started = false;
        wizard.update(|w| started = w.begin_request());
        if !started {
            return;
        }
        let (identifier, password) = wizard.with_untracked(|w| (w.login.identifier.clone(), w.login.password.clone()));
        let api = api_password.clone();
        let navigate = navigate_password.clone();
        spawn_local(async move {
            match api.login_with_password(&identifier, &password, role.api_value()).await {
                Ok(resp) => complete_login(&api, auth, ui, wizard, &navigate, &resp),
                Err(e) => {
                    wizard.update(AuthWizard::request_failed);
                    notify(ui, ToastKind::Error, e.user_message(LOGIN_FAILED));
                }
            }
        });
    };

    let api_send = api.clone();
    let send_otp = Callback::new(move |resend: bool| {
        let mut checked = Err(LOGIN_FAILED);
        wizard.update(|w| checked = w.validate_login_otp_request());
        let Ok(role) = checked else { return };
        let mut started = false;
        wizard.update(|w| started = w.begin_request());
        if !started {
            return;
        }
        let mobile = wizard.with_untracked(|w| w.login.mobile.clone());
        let api = api_send.clone();
        spawn_local(async move {
            match api.request_login_otp(&mobile, role.api_value()).await {
                Ok(challenge) => match challenge.user_id {
                    Some(user_id) => {
                        wizard.update(|w| w.login_otp_sent(user_id));
                        if resend {
                            wizard.update(AuthWizard::restart_login_cooldown);
                        }
                        notify(ui, ToastKind::Success, challenge.message.unwrap_or_else(|| OTP_SENT.to_owned()));
                    }
                    None => {
                        wizard.update(AuthWizard::request_failed);
                        notify(ui, ToastKind::Error, challenge.message.unwrap_or_else(|| LOGIN_FAILED.to_owned()));
                    }
                },
                Err(e) => {
                    wizard.update(AuthWizard::request_failed);
                    notify(ui, ToastKind::Error, e.user_message("Failed to send OTP."));
                }
            }
        });
    });

    let api_verify = api.clone();
    let on_otp_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if !wizard.with_untracked(|w| w.login.otp_sent()) {
            send_otp.run(false);
            return;
        }
        let user_id = match wizard.with_untracked(AuthWizard::validate_login_otp_verify) {
            Ok(user_id) => user_id,
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
        let otp = wizard.with_untracked(|w| w.login.otp.trim().to_owned());
        let api = api_verify.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            match api.verify_login_otp(&user_id, &otp).await {
                Ok(resp) => complete_login(&api, auth, ui, wizard, &navigate, &resp),
                Err(e) => {
                    wizard.update(AuthWizard::request_failed);
                    notify(ui, ToastKind::Error, e.user_message("Invalid OTP."));
                }
            }
        });
    };

    let is_password = move || wizard.with(|w| w.login_method == LoginMethod::Password);
    let otp_sent = move || wizard.with(|w| w.login.otp_sent());
    let submit_disabled = move || !wizard.with(AuthWizard::submit_enabled);
    let cooldown = move || wizard.with(|w| w.login.resend_cooldown);

    let password_form = move || {
        view! {
            <form class="auth-form" on:submit=on_password_submit.clone()>
                <input
                    class="auth-input"
                    type="text"
                    placeholder="Email or Mobile Number"
                    autocomplete="username"
                    required
                    prop:value=move || wizard.with(|w| w.login.identifier.clone())
                    on:input=move |ev| wizard.update(|w| w.set_login_identifier(&event_target_value(&ev)))
                />
                <Show when=move || wizard.with(|w| w.login.identifier_error.is_some())>
                    <p class="auth-error">{move || wizard.with(|w| w.login.identifier_error.unwrap_or_default())}</p>
                </Show>
                <PasswordInput
                    value=Signal::derive(move || wizard.with(|w| w.login.password.clone()))
                    on_input=Callback::new(move |v: String| wizard.update(|w| w.login.password = v))
                    placeholder="Password"
                />
                <RoleDropdown wizard=wizard/>
                <div class="auth-links">
                    <button type="button" class="auth-link" on:click=move |_| wizard.update(AuthWizard::open_forgot_password)>
                        "Forgot Password?"
                    </button>
                    <button type="button" class="auth-link" on:click=move |_| wizard.update(AuthWizard::toggle_login_method)>
                        "Login with Mobile"
                    </button>
                </div>
                <button class="btn btn--primary auth-submit" type="submit" disabled=submit_disabled>
                    {move || if wizard.with(|w| w.pending) { "Logging in..." } else { "Login" }}
                </button>
            </form>
        }
    };

    let otp_form = move || {
        view! {
            <form class="auth-form" on:submit=on_otp_submit.clone()>
                <input
                    class="auth-input"
                    type="tel"
                    placeholder="Mobile Number"
                    inputmode="numeric"
                    maxlength="10"
                    required
                    disabled=otp_sent
                    prop:value=move || wizard.with(|w| w.login.mobile.clone())
                    on:input=move |ev| wizard.update(|w| w.set_login_mobile(&event_target_value(&ev)))
                />
                <Show when=move || wizard.with(|w| w.login.mobile_error.is_some())>
                    <p class="auth-error">{move || wizard.with(|w| w.login.mobile_error.unwrap_or_default())}</p>
                </Show>
                <RoleDropdown wizard=wizard/>
                <Show when=otp_sent>
                    <input
                        class="auth-input"
                        type="text"
                        placeholder="Enter OTP"
                        inputmode="numeric"
                        autocomplete="one-time-code"
                        prop:value=move || wizard.with(|w| w.login.otp.clone())
                        on:input=move |ev| wizard.update(|w| w.login.otp = event_target_value(&ev))
                    />
                    <button
                        type="button"
                        class="auth-link"
                        disabled=move || cooldown() > 0
                        on:click=move |_| send_otp.run(true)
                    >
                        {move || match cooldown() {
                            0 => "Resend OTP".to_owned(),
                            n => format!("Resend OTP in {n}s"),
                        }}
                    </button>
                </Show>
                <div class="auth-links">
                    <button type="button" class="auth-link" on:click=move |_| wizard.update(AuthWizard::toggle_login_method)>
                        "Login with Password"
                    </button>
                </div>
                <button class="btn btn--primary auth-submit" type="submit" disabled=submit_disabled>
                    {move || match (wizard.with(|w| w.pending), otp_sent()) {
                        (true, _) => "Please wait...",
                        (false, false) => "Send OTP",
                        (false, true) => "Verify OTP",
                    }}
                </button>
            </form>
        }
    };

    view! {
        <div class="login-form">
            <Show when=is_password fallback=otp_form>
                {password_form.clone()}
            </Show>
            <SocialLogin on_credential=on_google/>
        </div>
    }
}
