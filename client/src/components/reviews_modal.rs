//! Reviews for one subsidy, fetched when the modal opens.

use leptos::prelude::*;

use crate::state::subsidies::SubsidyListState;
use crate::util::format::{format_date, format_rating};

#[component]
pub fn ReviewsModal(state: RwSignal<SubsidyListState>) -> impl IntoView {
    let close = Callback::new(move |()| state.update(SubsidyListState::close_reviews));
    let on_keydown = Callback::new(move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Escape" {
            ev.prevent_default();
            close.run(());
        }
    });

    let open = move || state.with(|s| s.reviews.subsidy_id.is_some());
    let title = move || state.with(|s| s.reviews_subsidy().map(|x| x.title.clone()).unwrap_or_default());
    let loading = move || state.with(|s| s.reviews.loading);
    let error = move || state.with(|s| s.reviews.error.clone());

    view! {
        <Show when=open>
            <div class="dialog-backdrop" on:click=move |_| close.run(())>
                <div
                    class="dialog dialog--reviews"
                    role="dialog"
                    aria-modal="true"
                    on:click=move |ev| ev.stop_propagation()
                    on:keydown=move |ev| on_keydown.run(ev)
                    tabindex="0"
                >
                    <h2>{move || format!("Reviews: {}", title())}</h2>
                    {move || {
                        if loading() {
                            return view! { <p class="dialog__text">"Loading reviews..."</p> }.into_any();
                        }
                        if let Some(message) = error() {
                            return view! { <p class="dialog__text dialog__text--error">{message}</p> }.into_any();
                        }
                        let reviews = state.with(|s| s.reviews.items.clone());
                        if reviews.is_empty() {
                            return view! { <p class="dialog__text">"No reviews yet."</p> }.into_any();
                        }
                        view! {
                            <ul class="review-list">
                                {reviews
                                    .into_iter()
                                    .map(|r| {
                                        view! {
                                            <li class="review-list__item">
                                                <div class="review-list__meta">
                                                    <span class="review-list__user">
                                                        {r.user_name.clone().unwrap_or_else(|| "Anonymous".to_owned())}
                                                    </span>
                                                    <span class="review-list__rating">{format_rating(r.rating)}</span>
                                                    <span class="review-list__date">{format_date(r.created_at.as_deref())}</span>
                                                </div>
                                                <p class="review-list__text">{r.text.clone()}</p>
                                            </li>
                                        }
                                    })
                                    .collect_view()}
                            </ul>
                        }
                            .into_any()
                    }}
                    <div class="dialog__actions">
                        <button class="btn btn--primary" on:click=move |_| close.run(())>"Close"</button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
