//! Review modal for one subsidy application: applicant and scheme details,
//! uploaded documents, the officer note, and the decision buttons.

use leptos::prelude::*;

use crate::state::application::{application_reference, document_type_label};
use crate::state::officer::{OfficerDashboardState, ReviewAction, status_label};
use crate::util::format::format_date;

#[component]
pub fn ApplicationReviewModal(state: RwSignal<OfficerDashboardState>, on_action: Callback<ReviewAction>) -> impl IntoView {
    let close = Callback::new(move |()| state.update(OfficerDashboardState::close_detail));
    let on_keydown = Callback::new(move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Escape" {
            ev.prevent_default();
            close.run(());
        }
    });

    let open = move || state.with(|s| s.detail.is_some());
    let loading = move || state.with(|s| s.detail.as_ref().is_some_and(|d| d.loading));
    let processing = move || state.with(|s| s.detail.as_ref().is_some_and(|d| d.processing));
    let error = move || state.with(|s| s.detail.as_ref().and_then(|d| d.error.clone()));
    let application = move || state.with(|s| s.detail.as_ref().and_then(|d| d.application.clone()));

    view! {
        <Show when=open>
            <div class="dialog-backdrop" on:click=move |_| close.run(())>
                <div
                    class="dialog dialog--review"
                    role="dialog"
                    aria-modal="true"
                    on:click=move |ev| ev.stop_propagation()
                    on:keydown=move |ev| on_keydown.run(ev)
                    tabindex="0"
                >
                    <Show when=loading>
                        <p class="dialog__text">"Loading application..."</p>
                    </Show>
                    <Show when=move || error().is_some()>
                        <p class="form-error">{move || error().unwrap_or_default()}</p>
                    </Show>
                    {move || {
                        application()
                            .map(|app| {
                                let documents = if app.documents.is_empty() {
                                    view! { <p class="dialog__text">"No documents uploaded."</p> }.into_any()
                                } else {
                                    view! {
                                        <ul class="dialog__list">
                                            {app
                                                .documents
                                                .iter()
                                                .map(|doc| {
                                                    let label = document_type_label(&doc.document_type);
                                                    let verified = if doc.verified { "Verified" } else { "Pending" };
                                                    let link = doc.file_url.clone().map(|url| {
                                                        view! {
                                                            <a href=url target="_blank" rel="noopener">
                                                                "View"
                                                            </a>
                                                        }
                                                    });
                                                    view! {
                                                        <li>
                                                            {format!("{label} ({verified}) ")}
                                                            {link}
                                                        </li>
                                                    }
                                                })
                                                .collect_view()}
                                        </ul>
                                    }
                                    .into_any()
                                };
                                view! {
                                    <h2>{application_reference(app.id)}</h2>
                                    <div class="dialog__row">
                                        <span class="dialog__label">"Farmer"</span>
                                        <span class="dialog__value">
                                            {app.applicant_name.clone().unwrap_or_else(|| "N/A".to_owned())}
                                        </span>
                                    </div>
                                    <div class="dialog__row">
                                        <span class="dialog__label">"Email"</span>
                                        <span class="dialog__value">
                                            {app.applicant_email.clone().unwrap_or_else(|| "N/A".to_owned())}
                                        </span>
                                    </div>
                                    <div class="dialog__row">
                                        <span class="dialog__label">"Scheme"</span>
                                        <span class="dialog__value">
                                            {app.subsidy_title.clone().unwrap_or_else(|| "N/A".to_owned())}
                                        </span>
                                    </div>
                                    <div class="dialog__row">
                                        <span class="dialog__label">"Status"</span>
                                        <span class="dialog__value">{status_label(&app)}</span>
                                    </div>
                                    <div class="dialog__row">
                                        <span class="dialog__label">"Documents"</span>
                                        <span class="dialog__value">
                                            {app
                                                .document_status_display
                                                .clone()
                                                .unwrap_or_else(|| app.document_status.clone())}
                                        </span>
                                    </div>
                                    <div class="dialog__row">
                                        <span class="dialog__label">"Submitted"</span>
                                        <span class="dialog__value">{format_date(app.submitted_at.as_deref())}</span>
                                    </div>
                                    {app
                                        .application_note
                                        .clone()
                                        .filter(|n| !n.trim().is_empty())
                                        .map(|note| view! { <p class="dialog__text">{note}</p> })}
                                    <h3>"Uploaded Documents"</h3>
                                    {documents}
                                }
                            })
                    }}
                    <label class="profile-field profile-field--wide">
                        <span>"Officer Note"</span>
                        <textarea
                            prop:value=move || state.with(|s| s.detail.as_ref().map(|d| d.note.clone()).unwrap_or_default())
                            on:input=move |ev| state.update(|s| s.set_note(&event_target_value(&ev)))
                        ></textarea>
                    </label>
                    <div class="dialog__actions">
                        <For
                            each=move || state.with(OfficerDashboardState::available_actions)
                            key=|action| *action
                            let:action
                        >
                            <button
                                type="button"
                                class=action.button_class()
                                disabled=processing
                                on:click=move |_| on_action.run(action)
                            >
                                {action.label()}
                            </button>
                        </For>
                        <button type="button" class="btn" on:click=move |_| close.run(())>"Close"</button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
