//! Officer application dashboard at `/officer`.
//!
//! SYSTEM CONTEXT
//! ==============
//! Protected route for officer accounts. Lists every application the API
//! exposes to the officer, filters by status bucket, and opens a review modal
//! where decisions are posted. After each decision both the list and the open
//! application are reloaded.
//!
//! ERROR HANDLING
//! ==============
//! List failures show a banner above the table. Detail and decision failures
//! show inside the modal, preferring the server's message.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::components::application_review_modal::ApplicationReviewModal;
use crate::net::api::ApiClient;
use crate::state::auth::AuthState;
use crate::state::officer::{
    ApplicationRow, DETAIL_FAILED, EMPTY_FILTER, LOAD_FAILED, OfficerDashboardState, ReviewAction, StatusBucket,
};
use crate::util::auth::install_unauth_redirect;

#[component]
pub fn OfficerDashboardPage() -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let auth = expect_context::<RwSignal<AuthState>>();
    install_unauth_redirect(auth, use_navigate());

    let state = RwSignal::new(OfficerDashboardState::default());

    let api_list = api.clone();
    let load = Callback::new(move |()| {
        state.update(OfficerDashboardState::begin_load);
        let api = api_list.clone();
        spawn_local(async move {
            match api.fetch_applications().await {
                Ok(applications) => state.update(|s| s.load_succeeded(applications)),
                Err(e) => {
                    leptos::logging::error!("application list failed: {e}");
                    state.update(|s| s.load_failed(e.user_message(LOAD_FAILED)));
                }
            }
        });
    });

    let api_detail = api.clone();
    let load_detail = Callback::new(move |application_id: i64| {
        let api = api_detail.clone();
        spawn_local(async move {
            let (detail, documents) = futures::join!(
                api.fetch_application(application_id),
                api.fetch_application_documents(application_id)
            );
            match detail.and_then(|detail| documents.map(|docs| (detail, docs))) {
                Ok((detail, docs)) => state.update(|s| s.detail_loaded(detail, docs)),
                Err(e) => {
                    leptos::logging::warn!("application {application_id} detail failed: {e}");
                    state.update(|s| s.detail_failed(application_id, e.user_message(DETAIL_FAILED)));
                }
            }
        });
    });

    let requested = RwSignal::new(false);
    Effect::new(move || {
        if requested.get() || !auth.with(AuthState::is_authenticated) {
            return;
        }
        requested.set(true);
        load.run(());
    });

    let open_detail = Callback::new(move |application_id: i64| {
        state.update(|s| s.open_detail(application_id));
        load_detail.run(application_id);
    });

    let on_action = Callback::new(move |action: ReviewAction| {
        let mut pending = None;
        state.update(|s| pending = s.begin_action(action));
        let Some(pending) = pending else {
            return;
        };
        let api = api.clone();
        spawn_local(async move {
            let id = pending.application_id;
            match api.review_application(id, pending.action.endpoint(), pending.body).await {
                Ok(_) => {
                    state.update(|s| s.action_finished(id, None));
                    load.run(());
                    if state.try_update(|s| s.begin_detail_reload(id)).unwrap_or(false) {
                        load_detail.run(id);
                    }
                }
                Err(e) => {
                    leptos::logging::warn!("{} on application {id} failed: {e}", pending.action.endpoint());
                    let message = e.user_message(&pending.action.failure_message());
                    state.update(|s| s.action_finished(id, Some(message)));
                }
            }
        });
    });

    let rows = Memo::new(move |_| state.with(OfficerDashboardState::visible_rows));
    let counts = Memo::new(move |_| state.with(OfficerDashboardState::counts));

    view! {
        <div class="officer-page">
            <div class="officer__header">
                <h1>"Application Dashboard"</h1>
                <p>"Review and Manage Farmer Subsidy Applications"</p>
            </div>
            <Show when=move || state.with(|s| s.loading)>
                <div class="officer__status">"Loading applications..."</div>
            </Show>
            <Show when=move || state.with(|s| s.error.is_some())>
                <div class="officer__status officer__status--error">
                    {move || state.with(|s| s.error.clone().unwrap_or_default())}
                </div>
            </Show>
            <section class="officer__panel">
                <h2>"Farmer Subsidy Application"</h2>
                <div class="officer__filters">
                    <FilterButton state=state filter=None label="All".to_owned()/>
                    {StatusBucket::ALL
                        .into_iter()
                        .map(|bucket| {
                            let label = move || format!("{} ({})", bucket.label(), counts.with(|c| c.get(bucket)));
                            view! { <FilterButton state=state filter=Some(bucket) label=Signal::derive(label)/> }
                        })
                        .collect_view()}
                </div>
                <Show
                    when=move || !rows.with(Vec::is_empty)
                    fallback=|| view! { <p class="officer__status">{EMPTY_FILTER}</p> }
                >
                    <table class="app-table">
                        <thead>
                            <tr>
                                <th>"Sr. No"</th>
                                <th>"Application ID"</th>
                                <th>"Farmer Name"</th>
                                <th>"Scheme Name"</th>
                                <th>"Status"</th>
                                <th>"Submitted"</th>
                                <th>"Action"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <For each=move || rows.get() key=|row| row.clone() let:row>
                                <ApplicationTableRow row=row on_view=open_detail/>
                            </For>
                        </tbody>
                    </table>
                </Show>
            </section>
            <ApplicationReviewModal state=state on_action=on_action/>
        </div>
    }
}

#[component]
fn FilterButton(
    state: RwSignal<OfficerDashboardState>,
    filter: Option<StatusBucket>,
    #[prop(into)] label: Signal<String>,
) -> impl IntoView {
    view! {
        <button
            type="button"
            class="filter-btn"
            class:filter-btn--active=move || state.with(|s| s.filter == filter)
            on:click=move |_| state.update(|s| s.set_filter(filter))
        >
            {move || label.get()}
        </button>
    }
}

#[component]
fn ApplicationTableRow(row: ApplicationRow, on_view: Callback<i64>) -> impl IntoView {
    let id = row.id;
    view! {
        <tr>
            <td>{row.sr_no}</td>
            <td>{row.reference}</td>
            <td>{row.farmer_name}</td>
            <td>{row.scheme_name}</td>
            <td>
                <span class=row.bucket.badge_class()>{row.status}</span>
            </td>
            <td>{row.submitted_at}</td>
            <td>
                <button type="button" class="btn btn--small" on:click=move |_| on_view.run(id)>"View"</button>
            </td>
        </tr>
    }
}
