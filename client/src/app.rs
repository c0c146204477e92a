//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::navbar::Navbar;
use crate::components::social_login::GOOGLE_CLIENT_ID;
use crate::components::toast_host::ToastHost;
use crate::net::api::ApiClient;
use crate::pages::{
    apply::ApplyPage, auth::AuthPage, change_password::ChangePasswordPage, home::HomePage,
    officer::OfficerDashboardPage, profile::ProfilePage, role_landing::RoleLandingPage, subsidies::SubsidiesPage,
};
use crate::state::{auth::AuthState, auth_wizard::AuthMode, ui::UiState};

const GOOGLE_IDENTITY_SCRIPT: &str = "https://accounts.google.com/gsi/client";

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    let identity_script = GOOGLE_CLIENT_ID
        .filter(|id| !id.is_empty())
        .map(|_| view! { <script src=GOOGLE_IDENTITY_SCRIPT defer></script> });

    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
                {identity_script}
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the API client, session and toast contexts and sets up
/// client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let api = ApiClient::from_build_env();
    let auth = RwSignal::new(AuthState::default());
    let ui = RwSignal::new(UiState::default());

    // Storage is browser-only; the session stays `loading` through SSR and
    // is read once after hydration.
    let tokens = api.tokens();
    Effect::new(move || auth.set(AuthState::from_store(tokens.as_ref())));

    provide_context(api);
    provide_context(auth);
    provide_context(ui);

    view! {
        <Stylesheet id="leptos" href="/pkg/krishi-portal.css"/>
        <Title text="Krishi Subsidy Portal"/>

        <Router>
            <Navbar/>
            <main class="page">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=HomePage/>
                    <Route path=StaticSegment("login") view=|| view! { <AuthPage initial=AuthMode::Login/> }/>
                    <Route path=StaticSegment("signup") view=|| view! { <AuthPage initial=AuthMode::Signup/> }/>
                    <Route path=StaticSegment("subsidies") view=SubsidiesPage/>
                    <Route path=(StaticSegment("apply"), ParamSegment("id")) view=ApplyPage/>
                    <Route path=StaticSegment("profile") view=ProfilePage/>
                    <Route path=StaticSegment("change-password") view=ChangePasswordPage/>
                    <Route path=StaticSegment("officer") view=OfficerDashboardPage/>
                    <Route path=StaticSegment("provider") view=RoleLandingPage/>
                </Routes>
            </main>
            <ToastHost/>
        </Router>
    }
}
