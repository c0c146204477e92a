//! Subsidy catalogue: one server page at a time, narrowed by a title filter.
//!
//! SYSTEM CONTEXT
//! ==============
//! Protected route. The first page is requested once the session is known to
//! be authenticated; later fetches happen only on explicit pagination or
//! Retry. Detail and reviews modals read from the same list state.
//!
//! ERROR HANDLING
//! ==============
//! A failed page load replaces the grid with a fixed message and a Retry
//! button. A failed reviews load shows inside the reviews modal.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::components::reviews_modal::ReviewsModal;
use crate::components::subsidy_detail_modal::SubsidyDetailModal;
use crate::net::api::ApiClient;
use crate::net::types::Subsidy;
use crate::state::auth::AuthState;
use crate::state::subsidies::SubsidyListState;
use crate::util::auth::install_unauth_redirect;
use crate::util::format::{format_amount_inr, format_date_range, format_rating};

#[component]
pub fn SubsidiesPage() -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let auth = expect_context::<RwSignal<AuthState>>();
    install_unauth_redirect(auth, use_navigate());

    let state = RwSignal::new(SubsidyListState::default());

    let api_list = api.clone();
    let load = Callback::new(move |page: u32| {
        state.update(|s| s.begin_load(page));
        let api = api_list.clone();
        spawn_local(async move {
            match api.fetch_subsidies(page).await {
                Ok(result) => state.update(|s| s.load_succeeded(result)),
                Err(e) => {
                    leptos::logging::error!("subsidy page {page} failed: {e}");
                    state.update(SubsidyListState::load_failed);
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
        load.run(1);
    });

    let open_reviews = Callback::new(move |subsidy_id: i64| {
        state.update(|s| s.open_reviews(subsidy_id));
        let api = api.clone();
        spawn_local(async move {
            match api.fetch_reviews(subsidy_id).await {
                Ok(reviews) => state.update(|s| s.reviews_loaded(subsidy_id, reviews)),
                Err(e) => {
                    leptos::logging::warn!("reviews for subsidy {subsidy_id} failed: {e}");
                    state.update(|s| s.reviews_failed(subsidy_id));
                }
            }
        });
    });
    let open_detail = Callback::new(move |subsidy_id: i64| state.update(|s| s.select(subsidy_id)));

    let loading = Memo::new(move |_| state.with(|s| s.loading));
    let error = Memo::new(move |_| state.with(|s| s.error.clone()));
    let visible = Memo::new(move |_| state.with(SubsidyListState::visible));
    let page = Memo::new(move |_| state.with(|s| s.page));

    let body = move || {
        if loading.get() {
            return view! {
                <div class="subsidies__status">
                    <div class="spinner"></div>
                    <p>"Loading subsidies..."</p>
                </div>
            }
            .into_any();
        }
        if let Some(message) = error.get() {
            return view! {
                <div class="subsidies__status subsidies__status--error">
                    <p>{message}</p>
                    <button class="btn btn--primary" on:click=move |_| load.run(page.get_untracked())>
                        "Retry"
                    </button>
                </div>
            }
            .into_any();
        }
        view! {
            <Show
                when=move || !visible.with(Vec::is_empty)
                fallback=|| view! { <p class="subsidies__status">"No subsidies found."</p> }
            >
                <div class="subsidy-grid">
                    <For each=move || visible.get() key=|s| s.id let:subsidy>
                        <SubsidyCard subsidy=subsidy on_details=open_detail on_reviews=open_reviews/>
                    </For>
                </div>
            </Show>
            <Pagination state=state load=load/>
        }
        .into_any()
    };

    view! {
        <div class="subsidies-page">
            <div class="subsidies__header">
                <h1>"Available Subsidies"</h1>
                <input
                    class="subsidies__search"
                    type="search"
                    placeholder="Search subsidies..."
                    prop:value=move || state.with(|s| s.filter.clone())
                    on:input=move |ev| state.update(|s| s.set_filter(&event_target_value(&ev)))
                />
            </div>
            {body}
            <SubsidyDetailModal state=state/>
            <ReviewsModal state=state/>
        </div>
    }
}

#[component]
fn SubsidyCard(subsidy: Subsidy, on_details: Callback<i64>, on_reviews: Callback<i64>) -> impl IntoView {
    let id = subsidy.id;
    let window = format_date_range(subsidy.application_start_date.as_deref(), subsidy.application_end_date.as_deref());

    view! {
        <article class="subsidy-card">
            <h3 class="subsidy-card__title">{subsidy.title.clone()}</h3>
            <div class="subsidy-card__rating">
                <span class="subsidy-card__stars">{format!("★ {}", format_rating(subsidy.rating))}</span>
                <button class="subsidy-card__reviews" on:click=move |_| on_reviews.run(id)>
                    {format!("({} reviews)", subsidy.review_count())}
                </button>
            </div>
            <p class="subsidy-card__description">{subsidy.description.clone()}</p>
            <p class="subsidy-card__amount">{format!("Amount: ₹{}", format_amount_inr(subsidy.amount))}</p>
            <p class="subsidy-card__window">{format!("Apply: {window}")}</p>
            <div class="subsidy-card__actions">
                <button class="btn subsidy-card__details" on:click=move |_| on_details.run(id)>
                    "View Details"
                </button>
                <a class="btn btn--primary subsidy-card__apply" href=format!("/apply/{id}")>
                    "Apply"
                </a>
            </div>
        </article>
    }
}

#[component]
fn Pagination(state: RwSignal<SubsidyListState>, load: Callback<u32>) -> impl IntoView {
    let go_to = move |target: u32| {
        if let Some(page) = state.with_untracked(|s| s.page_request(target)) {
            load.run(page);
        }
    };
    let current = move || state.with(|s| s.page);
    let current_untracked = move || state.with_untracked(|s| s.page);

    view! {
        <Show when=move || state.with(|s| s.total_pages() > 1)>
            <nav class="pagination" aria-label="Subsidy pages">
                <Show when=move || state.with(SubsidyListState::show_previous)>
                    <button class="pagination__btn" on:click=move |_| go_to(current_untracked().saturating_sub(1))>
                        "Previous"
                    </button>
                </Show>
                <For each=move || state.with(SubsidyListState::page_numbers) key=|n| *n let:n>
                    <button
                        class="pagination__btn"
                        class:pagination__btn--active=move || current() == n
                        on:click=move |_| go_to(n)
                    >
                        {n}
                    </button>
                </For>
                <Show when=move || state.with(SubsidyListState::show_next)>
                    <button class="pagination__btn" on:click=move |_| go_to(current_untracked() + 1)>
                        "Next"
                    </button>
                </Show>
            </nav>
        </Show>
    }
}
