//! Farmer profile editor.
//!
//! SYSTEM CONTEXT
//! ==============
//! Protected route. The profile is fetched once the session is known to be
//! authenticated, edited through [`ProfileForm`] transitions, and saved as one
//! multipart `PUT`. Browser `File` handles for newly attached documents are
//! kept beside the form in a local store keyed by slot; the form itself only
//! sees their metadata and object URLs.
//!
//! ERROR HANDLING
//! ==============
//! Load failures replace the form with a message. Rejected uploads and blur
//! validation errors render inline; save failures surface as toasts and
//! re-enable the submit button.

use leptos::ev::{Event, SubmitEvent};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::components::file_upload::{FileUploadSlot, PickedFile};
use crate::components::toast_host::notify;
use crate::net::api::{ApiClient, MultipartForm};
use crate::net::types::Profile;
use crate::state::auth::AuthState;
use crate::state::profile::{
    FileField, LOAD_FAILED, OWNERSHIP_OPTIONS, ProfileForm, SAVE_FAILED, SAVED, SOIL_TYPE_OPTIONS, UNIT_OPTIONS,
};
use crate::state::ui::{ToastKind, UiState};
use crate::util::auth::install_unauth_redirect;

#[component]
pub fn ProfilePage() -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    install_unauth_redirect(auth, use_navigate());

    let form = RwSignal::new(ProfileForm::default());
    #[cfg(feature = "hydrate")]
    let files = StoredValue::new_local(std::collections::HashMap::<FileField, web_sys::File>::new());

    let api_load = api.clone();
    let load = Callback::new(move |()| {
        form.update(|f| f.loading = true);
        let api = api_load.clone();
        spawn_local(async move {
            match api.fetch_profile().await {
                Ok(profile) => {
                    let mut released = Vec::new();
                    form.update(|f| released = f.load_succeeded(profile));
                    #[cfg(feature = "hydrate")]
                    {
                        for url in &released {
                            let _ = web_sys::Url::revoke_object_url(url);
                        }
                        files.update_value(std::collections::HashMap::clear);
                    }
                    #[cfg(not(feature = "hydrate"))]
                    let _ = released;
                }
                Err(e) => {
                    leptos::logging::error!("profile load failed: {e}");
                    form.update(|f| f.load_failed(e.user_message(LOAD_FAILED)));
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

    on_cleanup(move || {
        #[cfg(feature = "hydrate")]
        form.try_with_untracked(|f| {
            for slot in &f.slots {
                if let Some(url) = slot.preview.as_ref().and_then(|p| p.local_url()) {
                    let _ = web_sys::Url::revoke_object_url(url);
                }
            }
        });
    });

    let on_pick = Callback::new(move |(field, picked): (FileField, PickedFile)| {
        let mut outcome = Ok(None);
        form.update(|f| outcome = f.attach(field, picked.meta.clone(), || object_url(&picked)));
        match outcome {
            Ok(replaced) => {
                #[cfg(feature = "hydrate")]
                {
                    if let Some(url) = replaced {
                        let _ = web_sys::Url::revoke_object_url(&url);
                    }
                    files.update_value(|m| {
                        m.insert(field, picked.file.clone());
                    });
                }
                #[cfg(not(feature = "hydrate"))]
                let _ = replaced;
            }
            Err(message) => notify(ui, ToastKind::Error, message),
        }
    });

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let mut checked = Ok(());
        form.update(|f| checked = f.validate_for_submit());
        if let Err(message) = checked {
            notify(ui, ToastKind::Error, message);
            return;
        }
        let mut started = false;
        form.update(|f| started = f.begin_submit());
        if !started {
            return;
        }
        let (fields, attached) = form.with_untracked(|f| (f.multipart_fields(), f.attached_fields()));
        #[allow(unused_mut)]
        let mut multipart = MultipartForm::new(fields);
        #[cfg(feature = "hydrate")]
        files.with_value(|m| {
            for field in &attached {
                if let Some(file) = m.get(field) {
                    multipart.attach(field.form_key(), file.clone());
                }
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = attached;

        let api = api.clone();
        spawn_local(async move {
            match api.update_profile(&multipart).await {
                Ok(resp) => {
                    form.update(|f| f.submit_finished(true));
                    #[cfg(feature = "hydrate")]
                    files.update_value(std::collections::HashMap::clear);
                    notify(ui, ToastKind::Success, resp.message.unwrap_or_else(|| SAVED.to_owned()));
                }
                Err(e) => {
                    form.update(|f| f.submit_finished(false));
                    notify(ui, ToastKind::Error, e.user_message(SAVE_FAILED));
                }
            }
        });
    };

    let loading = Memo::new(move |_| form.with(|f| f.loading));
    let load_error = Memo::new(move |_| form.with(|f| f.load_error.clone()));
    let submitting = move || form.with(|f| f.submitting);

    let editor = move || {
        view! {
            <form class="profile-form" on:submit=on_submit.clone()>
                <section class="profile-section">
                    <h2>"Personal Information"</h2>
                    <div class="profile-grid">
                        <label class="profile-field">
                            <span>"Full Name"</span>
                            <input type="text" disabled prop:value=field_value(form, |p| &p.full_name)/>
                        </label>
                        <label class="profile-field">
                            <span>"Email Address"</span>
                            <input type="email" disabled prop:value=field_value(form, |p| &p.email_address)/>
                        </label>
                        <label class="profile-field">
                            <span>"Mobile Number"</span>
                            <input
                                type="tel"
                                inputmode="numeric"
                                maxlength="10"
                                prop:value=field_value(form, |p| &p.mobile_number)
                                on:input=filtered_field(form, ProfileForm::set_mobile)
                            />
                        </label>
                        <label class="profile-field">
                            <span>"Aadhaar Number"</span>
                            <input
                                type="text"
                                inputmode="numeric"
                                maxlength="12"
                                prop:value=field_value(form, |p| &p.aadhaar_number)
                                on:input=filtered_field(form, ProfileForm::set_aadhaar)
                                on:blur=move |_| form.update(ProfileForm::blur_aadhaar)
                            />
                            <Show when=move || form.with(|f| f.aadhaar_error.is_some())>
                                <p class="form-error">{move || form.with(|f| f.aadhaar_error.unwrap_or_default())}</p>
                            </Show>
                        </label>
                        <label class="profile-field">
                            <span>"State"</span>
                            <input type="text" prop:value=field_value(form, |p| &p.state) on:input=assign_field(form, |p, v| p.state = v)/>
                        </label>
                        <label class="profile-field">
                            <span>"District"</span>
                            <input type="text" prop:value=field_value(form, |p| &p.district) on:input=assign_field(form, |p, v| p.district = v)/>
                        </label>
                        <label class="profile-field">
                            <span>"Taluka"</span>
                            <input type="text" prop:value=field_value(form, |p| &p.taluka) on:input=assign_field(form, |p, v| p.taluka = v)/>
                        </label>
                        <label class="profile-field">
                            <span>"Village"</span>
                            <input type="text" prop:value=field_value(form, |p| &p.village) on:input=assign_field(form, |p, v| p.village = v)/>
                        </label>
                        <label class="profile-field profile-field--wide">
                            <span>"Address"</span>
                            <textarea prop:value=field_value(form, |p| &p.address) on:input=assign_field(form, |p, v| p.address = v)></textarea>
                        </label>
                    </div>
                    <FileUploadSlot
                        field=FileField::Photo
                        slot=Signal::derive(move || form.with(|f| f.slot(FileField::Photo).clone()))
                        on_pick=on_pick
                    />
                </section>

                <section class="profile-section">
                    <h2>"Land Information"</h2>
                    <div class="profile-grid">
                        <label class="profile-field">
                            <span>"Land Size"</span>
                            <input
                                type="text"
                                inputmode="decimal"
                                prop:value=field_value(form, |p| &p.land_size)
                                on:input=filtered_field(form, ProfileForm::set_land_size)
                            />
                        </label>
                        <label class="profile-field">
                            <span>"Unit"</span>
                            <select prop:value=field_value(form, |p| &p.unit) on:change=assign_field(form, |p, v| p.unit = v)>
                                <option value="">"Select unit"</option>
                                {UNIT_OPTIONS
                                    .into_iter()
                                    .map(|(v, label)| {
                                        view! {
                                            <option value=v selected=move || form.with(|f| f.profile.unit == v)>
                                                {label}
                                            </option>
                                        }
                                    })
                                    .collect_view()}
                            </select>
                        </label>
                        <label class="profile-field">
                            <span>"Soil Type"</span>
                            <select prop:value=field_value(form, |p| &p.soil_type) on:change=assign_field(form, |p, v| p.soil_type = v)>
                                <option value="">"Select soil type"</option>
                                {SOIL_TYPE_OPTIONS
                                    .into_iter()
                                    .map(|v| {
                                        view! {
                                            <option value=v selected=move || form.with(|f| f.profile.soil_type == v)>
                                                {v}
                                            </option>
                                        }
                                    })
                                    .collect_view()}
                            </select>
                        </label>
                        <label class="profile-field">
                            <span>"Ownership Type"</span>
                            <select prop:value=field_value(form, |p| &p.ownership_type) on:change=assign_field(form, |p, v| p.ownership_type = v)>
                                <option value="">"Select ownership"</option>
                                {OWNERSHIP_OPTIONS
                                    .into_iter()
                                    .map(|(v, label)| {
                                        view! {
                                            <option value=v selected=move || form.with(|f| f.profile.ownership_type == v)>
                                                {label}
                                            </option>
                                        }
                                    })
                                    .collect_view()}
                            </select>
                        </label>
                    </div>
                    <FileUploadSlot
                        field=FileField::LandProof
                        slot=Signal::derive(move || form.with(|f| f.slot(FileField::LandProof).clone()))
                        on_pick=on_pick
                    />
                </section>

                <section class="profile-section">
                    <h2>"Bank & Identification"</h2>
                    <div class="profile-grid">
                        <label class="profile-field">
                            <span>"Bank Account Number"</span>
                            <input
                                type="text"
                                inputmode="numeric"
                                prop:value=field_value(form, |p| &p.bank_account_number)
                                on:input=filtered_field(form, ProfileForm::set_bank_account)
                            />
                        </label>
                        <label class="profile-field">
                            <span>"IFSC Code"</span>
                            <input
                                type="text"
                                maxlength="11"
                                prop:value=field_value(form, |p| &p.ifsc_code)
                                on:input=filtered_field(form, ProfileForm::set_ifsc)
                                on:blur=move |_| form.update(ProfileForm::blur_ifsc)
                            />
                            <Show when=move || form.with(|f| f.ifsc_error.is_some())>
                                <p class="form-error">{move || form.with(|f| f.ifsc_error.unwrap_or_default())}</p>
                            </Show>
                        </label>
                        <label class="profile-field">
                            <span>"Bank Name"</span>
                            <input type="text" prop:value=field_value(form, |p| &p.bank_name) on:input=assign_field(form, |p, v| p.bank_name = v)/>
                        </label>
                    </div>
                    <div class="profile-uploads">
                        <FileUploadSlot
                            field=FileField::PanCard
                            slot=Signal::derive(move || form.with(|f| f.slot(FileField::PanCard).clone()))
                            on_pick=on_pick
                        />
                        <FileUploadSlot
                            field=FileField::AadhaarCard
                            slot=Signal::derive(move || form.with(|f| f.slot(FileField::AadhaarCard).clone()))
                            on_pick=on_pick
                        />
                    </div>
                </section>

                <div class="profile-actions">
                    <button type="button" class="btn" disabled=submitting on:click=move |_| load.run(())>
                        "Cancel"
                    </button>
                    <button type="submit" class="btn btn--primary" disabled=submitting>
                        {move || if submitting() { "Saving..." } else { "Save Changes" }}
                    </button>
                </div>
            </form>
        }
    };

    view! {
        <div class="profile-page">
            <h1>"Profile & Personal Details"</h1>
            {move || {
                if loading.get() {
                    return view! {
                        <div class="profile__status">
                            <div class="spinner"></div>
                            <p>"Loading profile..."</p>
                        </div>
                    }
                    .into_any();
                }
                if let Some(message) = load_error.get() {
                    return view! {
                        <div class="profile__status profile__status--error">
                            <p>{message}</p>
                            <button class="btn btn--primary" on:click=move |_| load.run(())>"Retry"</button>
                        </div>
                    }
                    .into_any();
                }
                editor().into_any()
            }}
        </div>
    }
}

fn field_value(form: RwSignal<ProfileForm>, get: fn(&Profile) -> &String) -> impl Fn() -> String + Copy {
    move || form.with(|f| get(&f.profile).clone())
}

fn assign_field(form: RwSignal<ProfileForm>, set: fn(&mut Profile, String)) -> impl Fn(Event) + Copy {
    move |ev: Event| form.update(|f| set(&mut f.profile, event_target_value(&ev)))
}

/// Input handler routed through a sanitizing [`ProfileForm`] setter.
fn filtered_field(form: RwSignal<ProfileForm>, set: fn(&mut ProfileForm, &str)) -> impl Fn(Event) + Copy {
    move |ev: Event| form.update(|f| set(f, &event_target_value(&ev)))
}

/// Object URL for previewing a freshly picked file.
fn object_url(picked: &PickedFile) -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        web_sys::Url::create_object_url_with_blob(&picked.file).ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = picked;
        None
    }
}
