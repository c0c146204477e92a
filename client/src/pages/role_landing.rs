//! Landing routes for officer and subsidy-provider accounts.

#[cfg(test)]
#[path = "role_landing_test.rs"]
mod role_landing_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::state::auth::AuthState;
use crate::util::auth::install_unauth_redirect;

/// Display name for a normalized role value.
pub fn role_title(role: Option<&str>) -> &'static str {
    match role {
        Some("officer") => "Officer",
        Some("subsidy_provider") => "Subsidy Provider",
        Some("admin") => "Admin",
        Some("farmer") => "Farmer",
        _ => "User",
    }
}

#[component]
pub fn RoleLandingPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    install_unauth_redirect(auth, use_navigate());

    let title = move || auth.with(|a| role_title(a.role.as_deref()));

    view! {
        <div class="role-landing">
            <h1>{move || format!("{} Dashboard", title())}</h1>
            <p>"Welcome back. Use the links below to continue."</p>
            <div class="role-landing__links">
                <a class="btn btn--primary" href="/subsidies">"Browse Subsidies"</a>
                <a class="btn" href="/profile">"Profile"</a>
                <a class="btn" href="/change-password">"Change Password"</a>
            </div>
        </div>
    }
}
