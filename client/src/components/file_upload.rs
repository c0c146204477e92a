//! One document upload slot: click-to-pick or drag-and-drop, with a preview
//! of the current file and an inline rejection message.

use leptos::prelude::*;

use crate::state::profile::{ACCEPT_ATTR, FileField, FileMeta, FilePreview, FileSlot};

/// A file chosen by the user. The browser handle is only present in the
/// hydrated build.
#[derive(Clone, Debug)]
pub struct PickedFile {
    pub meta: FileMeta,
    #[cfg(feature = "hydrate")]
    pub file: web_sys::File,
}

#[cfg(feature = "hydrate")]
impl From<web_sys::File> for PickedFile {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn from(file: web_sys::File) -> Self {
        let meta = FileMeta { name: file.name(), size: file.size().max(0.0) as u64, mime: file.type_() };
        Self { meta, file }
    }
}

#[component]
pub fn FileUploadSlot(
    field: FileField,
    #[prop(into)] slot: Signal<FileSlot>,
    on_pick: Callback<(FileField, PickedFile)>,
) -> impl IntoView {
    let dragging = RwSignal::new(false);
    let input_id = format!("upload-{}", field.form_key());

    let on_change = move |ev: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen::JsCast;
            let input = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok());
            if let Some(file) = input.as_ref().and_then(web_sys::HtmlInputElement::files).and_then(|l| l.get(0)) {
                on_pick.run((field, PickedFile::from(file)));
            }
            // Clear so picking the same file again still fires `change`.
            if let Some(input) = input {
                input.set_value("");
            }
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (ev, on_pick);
    };

    let on_drop = move |ev: leptos::ev::DragEvent| {
        ev.prevent_default();
        dragging.set(false);
        #[cfg(feature = "hydrate")]
        {
            if let Some(file) = ev.data_transfer().and_then(|dt| dt.files()).and_then(|l| l.get(0)) {
                on_pick.run((field, PickedFile::from(file)));
            }
        }
    };

    let preview = move || {
        slot.with(|s| match &s.preview {
            None => view! { <span class="upload-slot__empty">"Drag a file here or click to browse"</span> }.into_any(),
            Some(FilePreview::Image { src, name, .. }) => {
                view! { <img class="upload-slot__image" src=src.clone() alt=name.clone()/> }.into_any()
            }
            Some(FilePreview::Document { name, href: Some(href), .. }) => view! {
                <a class="upload-slot__doc" href=href.clone() target="_blank" rel="noopener">
                    {name.clone()}
                </a>
            }
            .into_any(),
            Some(FilePreview::Document { name, href: None, .. }) => {
                view! { <span class="upload-slot__doc">{name.clone()}</span> }.into_any()
            }
        })
    };

    view! {
        <div class="upload-slot">
            <label class="upload-slot__label" for=input_id.clone()>
                {field.label()}
            </label>
            <div
                class="upload-slot__drop"
                class:upload-slot__drop--active=move || dragging.get()
                on:dragover=move |ev: leptos::ev::DragEvent| {
                    ev.prevent_default();
                    dragging.set(true);
                }
                on:dragleave=move |_| dragging.set(false)
                on:drop=on_drop
            >
                {preview}
                <input id=input_id class="upload-slot__input" type="file" accept=ACCEPT_ATTR on:change=on_change/>
            </div>
            <Show when=move || slot.with(|s| s.attached.is_some())>
                <span class="upload-slot__size">
                    {move || slot.with(|s| s.attached.as_ref().map(FileMeta::size_label).unwrap_or_default())}
                </span>
            </Show>
            <Show when=move || slot.with(|s| s.error.is_some())>
                <p class="form-error">{move || slot.with(|s| s.error.unwrap_or_default())}</p>
            </Show>
        </div>
    }
}
