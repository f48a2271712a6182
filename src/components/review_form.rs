use crate::models::catalog::KNOWN_SERVICES;
use crate::models::review::{Review, MAX_IMAGE_BYTES};
use crate::review_store::ReviewDraft;
use leptos::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// Review submission form. With `initial` set it becomes the edit form
/// for that review: fields are pre-filled and the service select is
/// locked, matching the submit-or-update behavior of the page.
#[component]
pub fn ReviewForm(
    #[prop(optional_no_strip)] initial: Option<Review>,
    on_submit: Callback<ReviewDraft>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let editing = initial.is_some();
    let (service, set_service) = create_signal(
        initial
            .as_ref()
            .map(|r| r.service.clone())
            .unwrap_or_else(|| KNOWN_SERVICES[0].to_string()),
    );
    let (rating, set_rating) = create_signal(initial.as_ref().map(|r| r.rating).unwrap_or(0));
    let (hover, set_hover) = create_signal(0u8);
    let (text, set_text) = create_signal(initial.as_ref().map(|r| r.text.clone()).unwrap_or_default());
    let (image, set_image) = create_signal(initial.as_ref().and_then(|r| r.image.clone()));

    let on_file_change = move |ev: ev::Event| {
        let input: web_sys::HtmlInputElement = event_target(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        if file.size() > MAX_IMAGE_BYTES as f64 {
            if let Some(window) = web_sys::window() {
                let _ = window
                    .alert_with_message("Image is too large. Please choose an image under 5MB.");
            }
            return;
        }
        // read the file into a data URL for storage alongside the review
        let Ok(reader) = web_sys::FileReader::new() else {
            return;
        };
        let reader_handle = reader.clone();
        let onload = Closure::wrap(Box::new(move |_: web_sys::ProgressEvent| {
            if let Ok(result) = reader_handle.result() {
                if let Some(data_url) = result.as_string() {
                    set_image.set(Some(data_url));
                }
            }
        }) as Box<dyn FnMut(_)>);
        reader.set_onload(Some(onload.as_ref().unchecked_ref()));
        onload.forget();
        let _ = reader.read_as_data_url(&file);
    };

    let handle_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        on_submit.call(ReviewDraft {
            service: service.get(),
            rating: rating.get(),
            text: text.get(),
            image: image.get(),
        });
    };

    view! {
        <div class="review-form">
            <h2 class="form-title">{ if editing { "Edit Review" } else { "Submit a Review" } }</h2>
            <form on:submit=handle_submit>
                <div class="form-group">
                    <label>{ "Service" }</label>
                    <select
                        class="form-select"
                        disabled=editing
                        on:change=move |e| set_service.set(event_target_value(&e))
                    >
                        {KNOWN_SERVICES.iter().map(|s| view! {
                            <option value={*s} selected={*s == service.get_untracked()}>{ *s }</option>
                        }).collect_view()}
                    </select>
                </div>

                <div class="form-group">
                    <label>{ "Rating" }</label>
                    <div class="star-rating">
                        {(1..=5u8).map(|star| view! {
                            <button
                                type="button"
                                class="star-icon"
                                class:filled=move || star <= hover.get().max(rating.get())
                                on:click=move |_| set_rating.set(star)
                                on:mouseenter=move |_| set_hover.set(star)
                                on:mouseleave=move |_| set_hover.set(0)
                            >{ "★" }</button>
                        }).collect_view()}
                    </div>
                </div>

                <div class="form-group">
                    <label>{ "Review" }</label>
                    <textarea
                        class="form-textarea"
                        placeholder="Tell us about your visit"
                        rows="4"
                        prop:value=move || text.get()
                        on:input=move |e| set_text.set(event_target_value(&e))
                    ></textarea>
                </div>

                <div class="form-group">
                    <label>{ "Add a photo (optional)" }</label>
                    <input type="file" accept="image/*" class="form-file-input" on:change=on_file_change />
                    {move || image.get().map(|data_url| view! {
                        <div class="image-preview">
                            <img src=data_url alt="Preview"/>
                            <button
                                type="button"
                                class="remove-image-btn"
                                on:click=move |_| set_image.set(None)
                            >{ "×" }</button>
                        </div>
                    })}
                </div>

                <div class="form-actions">
                    {editing.then(|| view! {
                        <button type="button" class="cancel-button" on:click=move |_| on_cancel.call(())>
                            { "Cancel" }
                        </button>
                    })}
                    <button type="submit" class="submit-button">
                        { if editing { "Update" } else { "Submit" } }
                    </button>
                </div>
            </form>
        </div>
    }
}
