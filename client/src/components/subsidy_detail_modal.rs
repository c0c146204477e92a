//! Full details for one subsidy: description, amount, window, eligibility,
//! and required documents.

use leptos::prelude::*;

use crate::state::subsidies::SubsidyListState;
use crate::util::format::{format_amount_inr, format_date_range, format_rating};

#[component]
pub fn SubsidyDetailModal(state: RwSignal<SubsidyListState>) -> impl IntoView {
    let close = Callback::new(move |()| state.update(SubsidyListState::close_detail));
    let on_keydown = Callback::new(move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Escape" {
            ev.prevent_default();
            close.run(());
        }
    });

    let subsidy = move || state.with(|s| s.selected_subsidy().cloned());

    view! {
        <Show when=move || subsidy().is_some()>
            <div class="dialog-backdrop" on:click=move |_| close.run(())>
                <div
                    class="dialog dialog--subsidy"
                    role="dialog"
                    aria-modal="true"
                    on:click=move |ev| ev.stop_propagation()
                    on:keydown=move |ev| on_keydown.run(ev)
                    tabindex="0"
                >
                    {move || {
                        subsidy()
                            .map(|s| {
                                let window = format_date_range(
                                    s.application_start_date.as_deref(),
                                    s.application_end_date.as_deref(),
                                );
                                view! {
                                    <h2>{s.title.clone()}</h2>
                                    <p class="dialog__text">{s.description.clone()}</p>
                                    <div class="dialog__row">
                                        <span class="dialog__label">"Amount"</span>
                                        <span class="dialog__value">{format_amount_inr(s.amount)}</span>
                                    </div>
                                    <div class="dialog__row">
                                        <span class="dialog__label">"Application Window"</span>
                                        <span class="dialog__value">{window}</span>
                                    </div>
                                    <div class="dialog__row">
                                        <span class="dialog__label">"Rating"</span>
                                        <span class="dialog__value">{format_rating(s.rating)}</span>
                                    </div>
                                    <h3>"Eligibility"</h3>
                                    <ul class="dialog__list">
                                        {s.eligibility.iter().map(|e| view! { <li>{e.clone()}</li> }).collect_view()}
                                    </ul>
                                    <h3>"Documents Required"</h3>
                                    <ul class="dialog__list">
                                        {s.documents_required
                                            .iter()
                                            .map(|d| view! { <li>{d.clone()}</li> })
                                            .collect_view()}
                                    </ul>
                                }
                            })
                    }}
                    <div class="dialog__actions">
                        <button class="btn btn--primary" on:click=move |_| close.run(())>"Close"</button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
