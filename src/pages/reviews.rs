use crate::components::review_form::ReviewForm;
use crate::components::review_summary::ReviewSummary;
use crate::components::reviews_list::ReviewsList;
use crate::models::catalog::KNOWN_SERVICES;
use crate::models::review::Review;
use crate::review_store::{average_by_service, average_rating, ReviewDraft, ReviewStore};
use crate::review_view::{project, ServiceFilter, SortKey};
use crate::storage::BrowserStorage;
use leptos::logging::warn;
use leptos::*;
use std::rc::Rc;

/// Review board. Owns the [`ReviewStore`] for the session and wires
/// every user command into a store mutation followed by a recomputed
/// projection.
#[component]
pub fn ReviewsPage() -> impl IntoView {
    let store = create_rw_signal(ReviewStore::load(Rc::new(BrowserStorage::new())));
    let filter = create_rw_signal(ServiceFilter::All);
    let sort = create_rw_signal(SortKey::Recent);
    let query = create_rw_signal(String::new());
    let editing = create_rw_signal(None::<Review>);
    let form_error = create_rw_signal(None::<String>);
    // bumped after a successful submit so the form remounts blank
    let form_version = create_rw_signal(0u32);

    let current_user_id = store.with_untracked(|s| s.current_user().id.clone());

    let shown = move || {
        store.with(|s| project(s.reviews(), &filter.get(), &query.get(), sort.get()))
    };

    let on_submit = Callback::new(move |draft: ReviewDraft| {
        let mut outcome = Ok(());
        match editing.get_untracked() {
            Some(review) => store.update(|s| outcome = s.update(&review.id, draft)),
            None => store.update(|s| outcome = s.submit(draft)),
        }
        match outcome {
            Ok(()) => {
                editing.set(None);
                form_error.set(None);
                form_version.update(|v| *v += 1);
            }
            Err(err) => form_error.set(Some(err.to_string())),
        }
    });

    let on_cancel = Callback::new(move |_| {
        editing.set(None);
        form_error.set(None);
    });

    let on_like = Callback::new(move |review_id: String| {
        store.update(|s| {
            let user_id = s.current_user().id.clone();
            if let Err(err) = s.toggle_like(&review_id, &user_id) {
                warn!("[REVIEWS] like failed: {err}");
            }
        });
    });

    let on_edit = Callback::new(move |review: Review| {
        if !store.with_untracked(|s| s.is_own_review(&review)) {
            return;
        }
        form_error.set(None);
        editing.set(Some(review));
    });

    let on_delete = Callback::new(move |review_id: String| {
        let confirmed = web_sys::window()
            .map(|w| {
                w.confirm_with_message("Are you sure you want to delete this review?")
                    .unwrap_or(false)
            })
            .unwrap_or(false);
        if confirmed {
            store.update(|s| {
                if let Err(err) = s.remove(&review_id) {
                    warn!("[REVIEWS] delete failed: {err}");
                }
            });
        }
    });

    let on_reply = Callback::new(move |(review_id, text): (String, String)| {
        store.update(|s| {
            if let Err(err) = s.add_reply(&review_id, &text) {
                warn!("[REVIEWS] reply failed: {err}");
            }
        });
    });

    let list_user_id = current_user_id.clone();

    view! {
        <div class="reviews-page">
            <div class="reviews-container">
                <h1 class="reviews-main-title">{ "Client Reviews" }</h1>

                {move || store.with(|s| view! {
                    <ReviewSummary
                        total=s.reviews().len()
                        average=average_rating(s.reviews())
                        service_averages=average_by_service(s.reviews(), &KNOWN_SERVICES)
                    />
                })}

                <div class="filters-section">
                    <div class="search-box">
                        <input
                            type="text"
                            class="search-input"
                            placeholder="Search reviews..."
                            prop:value=move || query.get()
                            on:input=move |e| query.set(event_target_value(&e))
                        />
                    </div>
                    <div class="filters-row">
                        <div class="filter-group">
                            <label>{ "Filter by service" }</label>
                            <select
                                class="filter-select"
                                on:change=move |e| {
                                    filter.set(ServiceFilter::from_selection(&event_target_value(&e)))
                                }
                            >
                                <option value="All">{ "All" }</option>
                                {KNOWN_SERVICES.iter().map(|s| view! {
                                    <option value={*s}>{ *s }</option>
                                }).collect_view()}
                            </select>
                        </div>
                        <div class="filter-group">
                            <label>{ "Sort by" }</label>
                            <select
                                class="filter-select"
                                on:change=move |e| {
                                    sort.set(SortKey::from_selection(&event_target_value(&e)))
                                }
                            >
                                <option value="recent">{ "Most Recent" }</option>
                                <option value="rating">{ "Highest Rated" }</option>
                                <option value="likes">{ "Most Liked" }</option>
                            </select>
                        </div>
                    </div>
                </div>

                {move || form_error.get().map(|message| view! {
                    <p class="error-message">{ message }</p>
                })}

                {move || {
                    form_version.get();
                    view! {
                        <ReviewForm
                            initial=editing.get()
                            on_submit=on_submit
                            on_cancel=on_cancel
                        />
                    }
                }}

                {move || view! {
                    <ReviewsList
                        reviews=shown()
                        current_user_id=list_user_id.clone()
                        on_like=on_like
                        on_edit=on_edit
                        on_delete=on_delete
                        on_reply=on_reply
                    />
                }}
            </div>
        </div>
    }
}
