//! "Continue with Google" button backed by Google Identity Services.
//!
//! The GIS script is loaded by the shell when `PORTAL_GOOGLE_CLIENT_ID` is set
//! at build time. The returned ID-token credential is handed to the caller,
//! which exchanges it with the portal API.

use leptos::prelude::*;

pub const GOOGLE_CLIENT_ID: Option<&str> = option_env!("PORTAL_GOOGLE_CLIENT_ID");

#[cfg(test)]
#[path = "social_login_test.rs"]
mod social_login_test;

/// Tracks which client id the identity library was initialized with.
/// `google.accounts.id.initialize` runs once per client id per page load;
/// later clicks only prompt.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IdentityInit {
    client_id: Option<String>,
}

impl IdentityInit {
    /// Whether `initialize` must run before prompting. Records the id.
    pub fn needs_initialize(&mut self, client_id: &str) -> bool {
        if self.client_id.as_deref() == Some(client_id) {
            return false;
        }
        self.client_id = Some(client_id.to_owned());
        true
    }

    /// Forget the recorded id after a failed `initialize`.
    pub fn reset(&mut self) {
        self.client_id = None;
    }
}

#[cfg(feature = "hydrate")]
thread_local! {
    static IDENTITY_INIT: std::cell::RefCell<IdentityInit> = std::cell::RefCell::new(IdentityInit::default());
    /// Handler of the currently mounted form; the single JS callback forwards
    /// credentials here.
    static CREDENTIAL_HANDLER: std::cell::Cell<Option<(usize, Callback<String>)>> = const { std::cell::Cell::new(None) };
    static CREDENTIAL_CALLBACK: wasm_bindgen::closure::Closure<dyn FnMut(wasm_bindgen::JsValue)> =
        wasm_bindgen::closure::Closure::new(forward_credential);
}

#[component]
pub fn SocialLogin(on_credential: Callback<String>) -> impl IntoView {
    let configured = GOOGLE_CLIENT_ID.is_some_and(|id| !id.is_empty());

    #[cfg(feature = "hydrate")]
    let instance = {
        static NEXT_INSTANCE: std::sync::atomic::AtomicUsize = std::sync::atomic::AtomicUsize::new(0);
        let instance = NEXT_INSTANCE.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        on_cleanup(move || {
            CREDENTIAL_HANDLER.with(|h| {
                if h.get().is_some_and(|(owner, _)| owner == instance) {
                    h.set(None);
                }
            });
        });
        instance
    };

    let on_google = move |_: leptos::ev::MouseEvent| {
        #[cfg(feature = "hydrate")]
        {
            CREDENTIAL_HANDLER.with(|h| h.set(Some((instance, on_credential))));
            if let Err(e) = prompt_google() {
                leptos::logging::warn!("google sign-in unavailable: {e}");
            }
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = on_credential;
    };

    view! {
        <div class="social-login">
            <div class="social-login__divider">
                <span>"Or continue with"</span>
            </div>
            <button
                type="button"
                class="social-login__button"
                disabled=!configured
                title=if configured { "Sign in with Google" } else { "Google sign-in is not configured" }
                on:click=on_google
            >
                "Google"
            </button>
        </div>
    }
}

#[cfg(feature = "hydrate")]
fn forward_credential(response: wasm_bindgen::JsValue) {
    let credential = js_sys::Reflect::get(&response, &wasm_bindgen::JsValue::from_str("credential"))
        .ok()
        .and_then(|v| v.as_string());
    let handler = CREDENTIAL_HANDLER.with(std::cell::Cell::get).map(|(_, handler)| handler);
    match (credential, handler) {
        (Some(credential), Some(handler)) => handler.run(credential),
        (None, _) => leptos::logging::warn!("identity provider returned no credential"),
        (Some(_), None) => leptos::logging::warn!("credential arrived after the login form closed"),
    }
}

#[cfg(feature = "hydrate")]
fn prompt_google() -> Result<(), String> {
    use js_sys::{Function, Object, Reflect};
    use wasm_bindgen::{JsCast, JsValue};

    let client_id = GOOGLE_CLIENT_ID.ok_or("client id not configured")?;
    let window = web_sys::window().ok_or("no window")?;
    let id_api = ["google", "accounts", "id"]
        .into_iter()
        .try_fold(JsValue::from(window), |obj, key| {
            Reflect::get(&obj, &JsValue::from_str(key)).ok().filter(|v| !v.is_undefined())
        })
        .ok_or("identity script not loaded")?;

    let method = |name: &str| -> Result<Function, String> {
        Reflect::get(&id_api, &name.into())
            .ok()
            .and_then(|f| f.dyn_into::<Function>().ok())
            .ok_or_else(|| format!("google.accounts.id.{name} missing"))
    };

    if IDENTITY_INIT.with(|init| init.borrow_mut().needs_initialize(client_id)) {
        let config = Object::new();
        let initialized = Reflect::set(&config, &"client_id".into(), &client_id.into())
            .and_then(|_| CREDENTIAL_CALLBACK.with(|cb| Reflect::set(&config, &"callback".into(), cb.as_ref())))
            .map_err(|_| "config rejected".to_owned())
            .and_then(|_| method("initialize"))
            .and_then(|init| init.call1(&id_api, &config).map_err(|_| "initialize failed".to_owned()));
        if let Err(e) = initialized {
            IDENTITY_INIT.with(|init| init.borrow_mut().reset());
            return Err(e);
        }
    }
    method("prompt")?.call0(&id_api).map_err(|_| "prompt failed")?;
    Ok(())
}
