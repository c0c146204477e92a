//! Fixed top navigation with scroll-spy highlighting of home sections.
//!
//! SYSTEM CONTEXT
//! ==============
//! On the home route, scroll events are coalesced to one measurement per
//! animation frame and the section nearest the viewport center is marked
//! active. Elsewhere the active entry comes from the route. Clicking a
//! section from another route navigates home first and scrolls once the
//! page has settled.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

#[cfg(feature = "hydrate")]
use std::cell::RefCell;
#[cfg(feature = "hydrate")]
use std::rc::Rc;

use crate::components::toast_host::notify;
use crate::net::api::ApiClient;
use crate::state::auth::AuthState;
#[cfg(feature = "hydrate")]
use crate::state::nav::{SCROLL_SETTLE_MS, SectionRect, scroll_target};
use crate::state::nav::{NAV_SECTIONS, NavState, is_home_path};
use crate::state::ui::{ToastKind, UiState};
use crate::util::storage::redirect_path_for_role;

#[component]
pub fn Navbar() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let api = expect_context::<ApiClient>();
    let nav = RwSignal::new(NavState::default());
    let location = use_location();
    let navigate = use_navigate();

    Effect::new(move |_| {
        let path = location.pathname.get();
        nav.update(|n| n.route_changed(&path));
        if !is_home_path(&path) {
            return;
        }
        let mut pending = None;
        nav.update(|n| pending = n.take_pending_scroll());
        #[cfg(feature = "hydrate")]
        {
            match pending {
                Some(id) => gloo_timers::callback::Timeout::new(SCROLL_SETTLE_MS, move || scroll_to_section(id)).forget(),
                None => update_active_section(nav, &path),
            }
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = pending;
    });

    #[cfg(feature = "hydrate")]
    {
        let raf_pending = RwSignal::new(false);
        let pathname = location.pathname;
        let handle = window_event_listener(leptos::ev::scroll, move |_| {
            request_scroll_spy(nav, pathname, raf_pending);
        });
        on_cleanup(move || handle.remove());
    }

    let navigate_section = navigate.clone();
    let on_section = move |id: &'static str| {
        let path = location.pathname.get_untracked();
        let mut go_home = false;
        nav.update(|n| go_home = n.section_clicked(&path, id));
        if go_home {
            navigate_section("/", NavigateOptions::default());
        } else {
            #[cfg(feature = "hydrate")]
            scroll_to_section(id);
        }
    };

    let on_logout = move |_: leptos::ev::MouseEvent| {
        let api = api.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            api.logout().await;
            auth.set(AuthState::from_store(api.tokens().as_ref()));
            notify(ui, ToastKind::Info, "Logged out.");
            navigate("/login", NavigateOptions { replace: true, ..NavigateOptions::default() });
        });
    };

    let authenticated = move || auth.with(AuthState::is_authenticated);
    let dashboard_href = move || auth.with(|a| redirect_path_for_role(a.role.as_deref()));

    view! {
        <header class="navbar">
            <a class="navbar__brand" href="/">"Krishi Subsidy Portal"</a>
            <button
                class="navbar__menu-toggle"
                aria-label="Toggle navigation"
                on:click=move |_| nav.update(|n| n.menu_open = !n.menu_open)
            >
                "☰"
            </button>
            <nav class="navbar__links" class:navbar__links--open=move || nav.with(|n| n.menu_open)>
                {NAV_SECTIONS
                    .into_iter()
                    .map(|(id, label)| {
                        let on_section = on_section.clone();
                        view! {
                            <button
                                class="navbar__link"
                                class:navbar__link--active=move || nav.with(|n| n.active == Some(id))
                                on:click=move |_| on_section(id)
                            >
                                {label}
                            </button>
                        }
                    })
                    .collect_view()}
            </nav>
            <div class="navbar__auth">
                <Show
                    when=authenticated
                    fallback=|| {
                        view! {
                            <a class="btn navbar__btn" href="/login">"Login"</a>
                            <a class="btn btn--primary navbar__btn" href="/signup">"Sign Up"</a>
                        }
                    }
                >
                    <a class="btn navbar__btn" href=dashboard_href>"My Account"</a>
                    <a class="btn navbar__btn" href="/change-password">"Change Password"</a>
                    <button class="btn btn--primary navbar__btn" on:click=on_logout.clone()>"Logout"</button>
                </Show>
            </div>
        </header>
    }
}

#[cfg(feature = "hydrate")]
fn measure_sections() -> Option<(Vec<SectionRect>, f64)> {
    let window = web_sys::window()?;
    let document = window.document()?;
    let rects = NAV_SECTIONS
        .iter()
        .filter_map(|&(id, _)| {
            let rect = document.get_element_by_id(id)?.get_bounding_client_rect();
            Some(SectionRect { id, top: rect.top(), height: rect.height() })
        })
        .collect();
    let viewport_height = window.inner_height().ok()?.as_f64()?;
    Some((rects, viewport_height))
}

#[cfg(feature = "hydrate")]
fn update_active_section(nav: RwSignal<NavState>, path: &str) {
    if let Some((rects, viewport_height)) = measure_sections() {
        nav.update(|n| n.scrolled(path, &rects, viewport_height));
    }
}

#[cfg(feature = "hydrate")]
fn request_scroll_spy(nav: RwSignal<NavState>, pathname: Memo<String>, raf_pending: RwSignal<bool>) {
    use wasm_bindgen::{JsCast, closure::Closure};

    if raf_pending.get_untracked() || !is_home_path(&pathname.get_untracked()) {
        return;
    }
    let Some(window) = web_sys::window() else {
        return;
    };
    raf_pending.set(true);

    let holder: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let holder_for_cb = Rc::clone(&holder);
    let cb = Closure::wrap(Box::new(move |_ts: f64| {
        raf_pending.set(false);
        update_active_section(nav, &pathname.get_untracked());
        holder_for_cb.borrow_mut().take();
    }) as Box<dyn FnMut(f64)>);

    if window.request_animation_frame(cb.as_ref().unchecked_ref()).is_ok() {
        *holder.borrow_mut() = Some(cb);
    } else {
        raf_pending.set(false);
        update_active_section(nav, &pathname.get_untracked());
    }
}

#[cfg(feature = "hydrate")]
fn scroll_to_section(id: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(section) = window.document().and_then(|d| d.get_element_by_id(id)) else {
        return;
    };
    let top = section.get_bounding_client_rect().top();
    let options = web_sys::ScrollToOptions::new();
    options.set_top(scroll_target(top, window.scroll_y().unwrap_or(0.0)));
    options.set_behavior(web_sys::ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}
