use crate::models::review::{relative_date, Review};
use chrono::Utc;
use leptos::*;

/// The review feed: one card per review in the already filtered and
/// sorted order the page computed.
#[component]
pub fn ReviewsList(
    reviews: Vec<Review>,
    current_user_id: String,
    on_like: Callback<String>,
    on_edit: Callback<Review>,
    on_delete: Callback<String>,
    on_reply: Callback<(String, String)>,
) -> impl IntoView {
    let count = reviews.len();
    view! {
        <div class="reviews-list">
            <h2 class="reviews-list-title">
                { format!("{} {}", count, if count == 1 { "Review" } else { "Reviews" }) }
            </h2>
            {if count == 0 {
                view! { <div class="no-reviews"><p>{ "No reviews found." }</p></div> }.into_view()
            } else {
                reviews.into_iter().map(|review| view! {
                    <ReviewCard
                        review=review
                        current_user_id=current_user_id.clone()
                        on_like=on_like
                        on_edit=on_edit
                        on_delete=on_delete
                        on_reply=on_reply
                    />
                }).collect_view()
            }}
        </div>
    }
}

#[component]
fn ReviewCard(
    review: Review,
    current_user_id: String,
    on_like: Callback<String>,
    on_edit: Callback<Review>,
    on_delete: Callback<String>,
    on_reply: Callback<(String, String)>,
) -> impl IntoView {
    let (reply_open, set_reply_open) = create_signal(false);
    let (reply_text, set_reply_text) = create_signal(String::new());

    let now = Utc::now();
    let is_own = review.user.id == current_user_id;
    let liked = review.is_liked_by(&current_user_id);
    let review_id = review.id.clone();
    let like_id = review.id.clone();
    let delete_id = review.id.clone();
    let edit_copy = review.clone();

    let submit_reply = move |_| {
        on_reply.call((review_id.clone(), reply_text.get()));
        set_reply_text.set(String::new());
        set_reply_open.set(false);
    };

    view! {
        <div class="review-card">
            <div class="review-header">
                <div class="review-user">
                    <img src=review.user.avatar.clone() alt=review.user.name.clone() class="user-avatar"/>
                    <div class="user-info">
                        <p class="user-name">{ review.user.name.clone() }</p>
                        <p class="user-meta">
                            { format!("{} reviews • {}", review.user.review_count, relative_date(review.date, now)) }
                            {review.edited.then(|| view! { <span class="edited-badge">{ " (Edited)" }</span> })}
                        </p>
                    </div>
                </div>
                {is_own.then(|| view! {
                    <div class="review-actions">
                        <button class="action-btn edit-btn" title="Edit"
                            on:click=move |_| on_edit.call(edit_copy.clone())>{ "Edit" }</button>
                        <button class="action-btn delete-btn" title="Delete"
                            on:click=move |_| on_delete.call(delete_id.clone())>{ "Delete" }</button>
                    </div>
                })}
            </div>

            <div class="review-service">{ review.service.clone() }</div>

            <div class="review-rating">
                {(1..=5u8).map(|star| view! {
                    <span class="star" class:filled={star <= review.rating}>{ "★" }</span>
                }).collect_view()}
            </div>

            <p class="review-text">{ review.text.clone() }</p>

            {review.image.clone().map(|src| view! {
                <div class="review-image-container">
                    <img src=src alt="Review photo" class="review-image"/>
                </div>
            })}

            <div class="review-footer">
                <button class="like-button" class:liked=liked on:click=move |_| on_like.call(like_id.clone())>
                    { format!("👍 {}", review.likes) }
                </button>
                <button class="reply-button" on:click=move |_| set_reply_open.update(|open| *open = !*open)>
                    { "Reply" }
                </button>
            </div>

            {(!review.replies.is_empty()).then(|| view! {
                <div class="replies-section">
                    <h4 class="replies-title">
                        { format!("{} {}", review.replies.len(),
                            if review.replies.len() == 1 { "Reply" } else { "Replies" }) }
                    </h4>
                    {review.replies.iter().map(|reply| view! {
                        <div class="reply-item">
                            <img src=reply.user.avatar.clone() alt=reply.user.name.clone() class="reply-avatar"/>
                            <div class="reply-content">
                                <div class="reply-header">
                                    <span class="reply-user">{ reply.user.name.clone() }</span>
                                    <span class="reply-date">{ relative_date(reply.date, now) }</span>
                                </div>
                                <p class="reply-text">{ reply.text.clone() }</p>
                            </div>
                        </div>
                    }).collect_view()}
                </div>
            })}

            <Show when=move || reply_open.get()>
                <div class="reply-form">
                    <textarea
                        class="reply-textarea"
                        placeholder="Add a reply"
                        rows="2"
                        prop:value=move || reply_text.get()
                        on:input=move |e| set_reply_text.set(event_target_value(&e))
                    ></textarea>
                    <div class="reply-form-actions">
                        <button class="cancel-reply-btn" on:click=move |_| {
                            set_reply_open.set(false);
                            set_reply_text.set(String::new());
                        }>{ "Cancel" }</button>
                        <button class="submit-reply-btn" on:click=submit_reply.clone()>{ "Reply" }</button>
                    </div>
                </div>
            </Show>
        </div>
    }
}
