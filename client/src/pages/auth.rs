//! Login / signup screen hosting the auth wizard.
//!
//! SYSTEM CONTEXT
//! ==============
//! `/login` and `/signup` both render this page; the route only picks the
//! initial tab. The wizard signal lives here so tab switches reset every
//! draft in one place, and a one-second ticker drives the OTP resend
//! countdowns while the page is mounted.

use leptos::prelude::*;

use crate::components::forgot_password_form::ForgotPasswordForm;
use crate::components::login_form::LoginForm;
use crate::components::signup_form::SignupForm;
use crate::state::auth_wizard::{AuthMode, AuthWizard};

#[component]
pub fn AuthPage(initial: AuthMode) -> impl IntoView {
    let wizard = RwSignal::new(AuthWizard::new(initial));

    #[cfg(feature = "hydrate")]
    {
        let ticker_alive = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(true));
        let ticker_alive_task = ticker_alive.clone();
        leptos::task::spawn_local(async move {
            loop {
                gloo_timers::future::sleep(std::time::Duration::from_secs(1)).await;
                if !ticker_alive_task.load(std::sync::atomic::Ordering::Relaxed) {
                    break;
                }
                if wizard.with_untracked(AuthWizard::cooldown_active) {
                    wizard.update(AuthWizard::tick_cooldown);
                }
            }
        });
        on_cleanup(move || ticker_alive.store(false, std::sync::atomic::Ordering::Relaxed));
    }

    // Memoized so keystrokes in a draft do not remount the active form.
    let mode = Memo::new(move |_| wizard.with(|w| w.mode));
    let tab_class = move |tab: AuthMode| {
        move || if mode.get() == tab { "auth-tab auth-tab--active" } else { "auth-tab" }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <Show when=move || mode.get() != AuthMode::ForgotPassword>
                    <div class="auth-tabs" role="tablist">
                        <button
                            class=tab_class(AuthMode::Login)
                            role="tab"
                            on:click=move |_| wizard.update(|w| w.select_tab(AuthMode::Login))
                        >
                            "Login"
                        </button>
                        <button
                            class=tab_class(AuthMode::Signup)
                            role="tab"
                            on:click=move |_| wizard.update(|w| w.select_tab(AuthMode::Signup))
                        >
                            "Sign Up"
                        </button>
                    </div>
                </Show>
                {move || match mode.get() {
                    AuthMode::Login => view! { <LoginForm wizard=wizard/> }.into_any(),
                    AuthMode::Signup => view! { <SignupForm wizard=wizard/> }.into_any(),
                    AuthMode::ForgotPassword => view! { <ForgotPasswordForm wizard=wizard/> }.into_any(),
                }}
            </div>
        </div>
    }
}
