//! Subsidy application wizard at `/apply/:id`.
//!
//! SYSTEM CONTEXT
//! ==============
//! Protected route reached from a subsidy card. Once the session is known the
//! page looks up the subsidy title and prefills the form from the farmer
//! profile; both lookups are best-effort. Submit creates the application and
//! then uploads each staged document to it in order.
//!
//! ERROR HANDLING
//! ==============
//! Field errors render inline. A failed create re-enables Submit with a toast;
//! failed document uploads are named in the confirmation instead of undoing
//! the created application.

use leptos::ev::Event;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::components::file_upload::PickedFile;
use crate::components::toast_host::notify;
use crate::net::api::{ApiClient, MultipartForm};
use crate::state::application::{
    ApplicationWizard, DocumentDraft, DocumentType, DraftSaved, Field, SUBMIT_FAILED, StagedDocument, Step, Submission,
};
use crate::state::auth::AuthState;
use crate::state::profile::{ACCEPT_ATTR, FileMeta, OWNERSHIP_OPTIONS, SOIL_TYPE_OPTIONS, UNIT_OPTIONS};
use crate::state::ui::{ToastKind, UiState};
use crate::util::auth::install_unauth_redirect;

#[component]
pub fn ApplyPage() -> impl IntoView {
    let params = use_params_map();
    let subsidy_id = move || params.with(|p| p.get("id").and_then(|id| id.trim().parse::<i64>().ok()));

    view! {
        <div class="apply-page">
            {move || match subsidy_id() {
                Some(id) => view! { <ApplicationForm subsidy_id=id/> }.into_any(),
                None => view! { <p class="apply__status">"Unknown subsidy."</p> }.into_any(),
            }}
        </div>
    }
}

#[component]
fn ApplicationForm(subsidy_id: i64) -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    install_unauth_redirect(auth, use_navigate());

    let wizard = RwSignal::new(ApplicationWizard::new(subsidy_id));
    #[cfg(feature = "hydrate")]
    let files = StoredValue::new_local(std::collections::HashMap::<u64, web_sys::File>::new());
    #[cfg(feature = "hydrate")]
    let draft_file = StoredValue::new_local(None::<web_sys::File>);

    let api_load = api.clone();
    let requested = RwSignal::new(false);
    Effect::new(move || {
        if requested.get() || !auth.with(AuthState::is_authenticated) {
            return;
        }
        requested.set(true);
        let api = api_load.clone();
        spawn_local(async move {
            match api.fetch_subsidy(subsidy_id).await {
                Ok(subsidy) => wizard.update(|w| w.subsidy_title = Some(subsidy.title)),
                Err(e) => leptos::logging::warn!("subsidy {subsidy_id} lookup failed: {e}"),
            }
            match api.fetch_profile().await {
                Ok(profile) => wizard.update(|w| w.prefill(&profile)),
                Err(e) => leptos::logging::warn!("profile prefill failed: {e}"),
            }
        });
    });

    let on_pick = Callback::new(move |picked: PickedFile| {
        wizard.update(|w| w.pick_draft_file(picked.meta.clone()));
        #[cfg(feature = "hydrate")]
        draft_file.set_value(Some(picked.file));
    });

    let on_save = Callback::new(move |()| {
        let mut saved = None;
        wizard.update(|w| saved = w.save_draft());
        let id = match saved {
            Some(DraftSaved::Added(id) | DraftSaved::Updated { id, file_replaced: true }) => id,
            Some(DraftSaved::Updated { file_replaced: false, .. }) | None => return,
        };
        #[cfg(feature = "hydrate")]
        if let Some(file) = draft_file.try_update_value(Option::take).flatten() {
            files.update_value(|m| {
                m.insert(id, file);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = id;
    });

    let on_close_draft = Callback::new(move |()| {
        wizard.update(ApplicationWizard::close_draft);
        #[cfg(feature = "hydrate")]
        draft_file.set_value(None);
    });

    let on_confirm_delete = Callback::new(move |()| {
        let mut removed = None;
        wizard.update(|w| removed = w.confirm_delete());
        #[cfg(feature = "hydrate")]
        if let Some(id) = removed {
            files.update_value(|m| {
                m.remove(&id);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = removed;
    });

    let on_submit = move |_: leptos::ev::MouseEvent| {
        let mut checked = Ok(());
        wizard.update(|w| checked = w.validate_for_submit());
        if let Err(message) = checked {
            notify(ui, ToastKind::Error, message);
            return;
        }
        let mut started = false;
        wizard.update(|w| started = w.begin_submit());
        if !started {
            return;
        }
        let (body, staged) = wizard.with_untracked(|w| (w.submit_body(), w.documents.clone()));
        let uploads: Vec<(DocumentType, MultipartForm)> = staged
            .iter()
            .map(|doc| {
                #[allow(unused_mut)]
                let mut form = MultipartForm::new(doc.upload_fields());
                #[cfg(feature = "hydrate")]
                files.with_value(|m| {
                    if let Some(file) = m.get(&doc.id) {
                        form.attach("file", file.clone());
                    }
                });
                (doc.document_type, form)
            })
            .collect();

        let api = api.clone();
        spawn_local(async move {
            let application = match api.create_application(body).await {
                Ok(application) => application,
                Err(e) => {
                    leptos::logging::error!("application create failed: {e}");
                    wizard.update(ApplicationWizard::submit_failed);
                    notify(ui, ToastKind::Error, e.user_message(SUBMIT_FAILED));
                    return;
                }
            };
            let mut failed_uploads = Vec::new();
            for (document_type, form) in &uploads {
                if let Err(e) = api.upload_application_document(application.id, form).await {
                    leptos::logging::warn!("upload of {} failed: {e}", document_type.value());
                    failed_uploads.push(*document_type);
                }
            }
            let submission = Submission { application_id: application.id, failed_uploads };
            let kind = if submission.failed_uploads.is_empty() { ToastKind::Success } else { ToastKind::Error };
            notify(ui, kind, submission.message());
            wizard.update(|w| w.submit_succeeded(submission));
        });
    };

    let step = Memo::new(move |_| wizard.with(|w| w.step));
    let submission = Memo::new(move |_| wizard.with(|w| w.submission.clone()));
    let submitting = move || wizard.with(|w| w.submitting);

    let form_body = move || {
        let current = step.get();
        let fields = if current == Step::Documents {
            view! { <DocumentsStep wizard=wizard/> }.into_any()
        } else {
            view! {
                <div class="profile-grid">
                    {current.fields().map(|field| view! { <WizardField wizard=wizard field=field/> }).collect_view()}
                </div>
            }
            .into_any()
        };
        view! {
            <section class="apply-section">
                <h2>{current.title()}</h2>
                {fields}
            </section>
        }
    };

    view! {
        <div class="apply-card">
            <h1>{move || wizard.with(ApplicationWizard::heading)}</h1>
            {move || match submission.get() {
                Some(done) => view! {
                    <div class="apply__done">
                        <h2>"Application Submitted"</h2>
                        <p>{done.message()}</p>
                        <p class="apply__reference">{format!("Reference: {}", done.reference())}</p>
                        <a class="btn btn--primary" href="/subsidies">"Back to Subsidies"</a>
                    </div>
                }
                .into_any(),
                None => {
                    let on_submit = on_submit.clone();
                    view! {
                    <p class="apply__progress">{move || wizard.with(ApplicationWizard::progress_label)}</p>
                    {form_body}
                    <div class="apply-actions">
                        <Show when=move || wizard.with(ApplicationWizard::can_go_back)>
                            <button type="button" class="btn" disabled=submitting on:click=move |_| wizard.update(ApplicationWizard::back)>
                                "Back"
                            </button>
                        </Show>
                        <Show
                            when=move || wizard.with(ApplicationWizard::is_last_step)
                            fallback=move || view! {
                                <button
                                    type="button"
                                    class="btn btn--primary"
                                    on:click=move |_| {
                                        wizard.update(|w| {
                                            w.next();
                                        });
                                    }
                                >
                                    "Next"
                                </button>
                            }
                        >
                            <button type="button" class="btn btn--primary" disabled=submitting on:click=on_submit.clone()>
                                {move || if submitting() { "Submitting..." } else { "Submit Application" }}
                            </button>
                        </Show>
                    </div>
                    }
                    .into_any()
                }
            }}
            <DocumentDialog wizard=wizard on_pick=on_pick on_save=on_save on_close=on_close_draft/>
            <DeleteDialog wizard=wizard on_confirm=on_confirm_delete/>
        </div>
    }
}

fn select_options(field: Field) -> Option<Vec<(&'static str, &'static str)>> {
    match field {
        Field::Unit => Some(UNIT_OPTIONS.to_vec()),
        Field::SoilType => Some(SOIL_TYPE_OPTIONS.iter().map(|s| (*s, *s)).collect()),
        Field::Ownership => Some(OWNERSHIP_OPTIONS.to_vec()),
        _ => None,
    }
}

/// `(type, inputmode)` for a plain text field.
fn input_kind(field: Field) -> (&'static str, &'static str) {
    match field {
        Field::Mobile => ("tel", "numeric"),
        Field::Email => ("email", "email"),
        Field::Aadhaar | Field::AccountNumber => ("text", "numeric"),
        Field::LandArea => ("text", "decimal"),
        _ => ("text", "text"),
    }
}

#[component]
fn WizardField(wizard: RwSignal<ApplicationWizard>, field: Field) -> impl IntoView {
    let value = move || wizard.with(|w| w.value(field).to_owned());
    let on_input = move |ev: Event| wizard.update(|w| w.set(field, &event_target_value(&ev)));
    let on_blur = move |_: leptos::ev::FocusEvent| wizard.update(|w| w.blur(field));

    let control = if let Some(options) = select_options(field) {
        view! {
            <select prop:value=value on:change=on_input on:blur=on_blur>
                <option value="">{format!("Select {}", field.label().to_lowercase())}</option>
                {options
                    .into_iter()
                    .map(|(v, label)| {
                        view! {
                            <option value=v selected=move || wizard.with(|w| w.value(field) == v)>
                                {label}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        }
        .into_any()
    } else if field == Field::Address {
        view! { <textarea prop:value=value on:input=on_input on:blur=on_blur></textarea> }.into_any()
    } else {
        let (kind, mode) = input_kind(field);
        view! { <input type=kind inputmode=mode prop:value=value on:input=on_input on:blur=on_blur/> }.into_any()
    };

    view! {
        <label class="profile-field" class:profile-field--wide={field == Field::Address}>
            <span>{field.label()}</span>
            {control}
            <Show when=move || wizard.with(|w| w.error(field).is_some())>
                <p class="form-error">{move || wizard.with(|w| w.error(field).unwrap_or_default())}</p>
            </Show>
        </label>
    }
}

#[component]
fn DocumentsStep(wizard: RwSignal<ApplicationWizard>) -> impl IntoView {
    let documents = Memo::new(move |_| wizard.with(|w| w.documents.clone()));

    view! {
        <div class="apply-documents">
            <Show
                when=move || !documents.with(Vec::is_empty)
                fallback=|| view! { <p class="apply__status">"No documents added yet."</p> }
            >
                <table class="doc-table">
                    <thead>
                        <tr>
                            <th>"Document"</th>
                            <th>"Number"</th>
                            <th>"File"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        <For each=move || documents.get() key=|d| (d.id, d.number.clone(), d.file.name.clone()) let:doc>
                            <DocumentRow wizard=wizard doc=doc/>
                        </For>
                    </tbody>
                </table>
            </Show>
            <button
                type="button"
                class="btn"
                disabled=move || !wizard.with(ApplicationWizard::can_add_document)
                on:click=move |_| wizard.update(ApplicationWizard::open_add)
            >
                "Add Document"
            </button>
            <label class="profile-field profile-field--wide">
                <span>"Note to the officer (optional)"</span>
                <textarea
                    prop:value=move || wizard.with(|w| w.note.clone())
                    on:input=move |ev| wizard.update(|w| w.note = event_target_value(&ev))
                ></textarea>
            </label>
        </div>
    }
}

#[component]
fn DocumentRow(wizard: RwSignal<ApplicationWizard>, doc: StagedDocument) -> impl IntoView {
    let id = doc.id;
    view! {
        <tr>
            <td>{doc.document_type.label()}</td>
            <td>{doc.number.clone()}</td>
            <td>{format!("{} ({})", doc.file.name, doc.file.size_label())}</td>
            <td class="doc-table__actions">
                <button type="button" class="btn btn--small" on:click=move |_| wizard.update(|w| w.open_edit(id))>
                    "Edit"
                </button>
                <button type="button" class="btn btn--small btn--danger" on:click=move |_| wizard.update(|w| w.request_delete(id))>
                    "Delete"
                </button>
            </td>
        </tr>
    }
}

#[component]
fn DocumentDialog(
    wizard: RwSignal<ApplicationWizard>,
    on_pick: Callback<PickedFile>,
    on_save: Callback<()>,
    on_close: Callback<()>,
) -> impl IntoView {
    let draft = Memo::new(move |_| wizard.with(|w| w.draft.clone()));
    let editing = move || draft.with(|d| d.as_ref().is_some_and(|d| d.editing.is_some()));

    let on_file = move |ev: Event| {
        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen::JsCast;
            let input = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok());
            if let Some(file) = input.as_ref().and_then(web_sys::HtmlInputElement::files).and_then(|l| l.get(0)) {
                on_pick.run(PickedFile::from(file));
            }
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (ev, on_pick);
    };

    let error = move |get: fn(&DocumentDraft) -> Option<&'static str>| {
        move || draft.with(|d| d.as_ref().and_then(get))
    };
    let type_error = error(|d| d.type_error);
    let number_error = error(|d| d.number_error);
    let file_error = error(|d| d.file_error);

    view! {
        <Show when=move || draft.with(Option::is_some)>
            <div class="dialog-backdrop" on:click=move |_| on_close.run(())>
                <div class="dialog" role="dialog" aria-modal="true" on:click=move |ev| ev.stop_propagation()>
                    <h2>{move || if editing() { "Edit Document" } else { "Add Document" }}</h2>
                    <label class="profile-field">
                        <span>"Document Type"</span>
                        <select
                            disabled=editing
                            on:change=move |ev| wizard.update(|w| w.set_draft_type(&event_target_value(&ev)))
                        >
                            <option value="">"Select document type"</option>
                            {move || {
                                let current = draft.with(|d| d.as_ref().and_then(|d| d.document_type));
                                let mut types = wizard.with(ApplicationWizard::available_types);
                                if let Some(current) = current.filter(|t| !types.contains(t)) {
                                    types.insert(0, current);
                                }
                                types
                                    .into_iter()
                                    .map(|t| view! { <option value=t.value() selected={current == Some(t)}>{t.label()}</option> })
                                    .collect_view()
                            }}
                        </select>
                        <Show when=move || type_error().is_some()>
                            <p class="form-error">{move || type_error().unwrap_or_default()}</p>
                        </Show>
                    </label>
                    <label class="profile-field">
                        <span>"Document Number"</span>
                        <input
                            type="text"
                            prop:value=move || draft.with(|d| d.as_ref().map(|d| d.number.clone()).unwrap_or_default())
                            on:input=move |ev| wizard.update(|w| w.set_draft_number(&event_target_value(&ev)))
                        />
                        <Show when=move || number_error().is_some()>
                            <p class="form-error">{move || number_error().unwrap_or_default()}</p>
                        </Show>
                    </label>
                    <label class="profile-field">
                        <span>{move || if editing() { "Replace File (optional)" } else { "File" }}</span>
                        <input type="file" accept=ACCEPT_ATTR on:change=on_file/>
                        <span class="upload-slot__size">
                            {move || {
                                draft.with(|d| {
                                    d.as_ref()
                                        .and_then(|d| d.file.as_ref())
                                        .map(|f| format!("{} ({})", f.name, FileMeta::size_label(f)))
                                        .unwrap_or_default()
                                })
                            }}
                        </span>
                        <Show when=move || file_error().is_some()>
                            <p class="form-error">{move || file_error().unwrap_or_default()}</p>
                        </Show>
                    </label>
                    <div class="dialog__actions">
                        <button type="button" class="btn" on:click=move |_| on_close.run(())>"Cancel"</button>
                        <button type="button" class="btn btn--primary" on:click=move |_| on_save.run(())>
                            {move || if editing() { "Update" } else { "Upload" }}
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}

#[component]
fn DeleteDialog(wizard: RwSignal<ApplicationWizard>, on_confirm: Callback<()>) -> impl IntoView {
    let cancel = move |_| wizard.update(ApplicationWizard::cancel_delete);
    view! {
        <Show when=move || wizard.with(|w| w.pending_delete.is_some())>
            <div class="dialog-backdrop">
                <div class="dialog" role="alertdialog" aria-modal="true">
                    <p class="dialog__text">"Are you sure you want to delete this document?"</p>
                    <div class="dialog__actions">
                        <button type="button" class="btn" on:click=cancel>"Cancel"</button>
                        <button type="button" class="btn btn--danger" on:click=move |_| on_confirm.run(())>
                            "Delete"
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
