use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Largest accepted review image payload (the encoded data-URL form),
/// roughly a 5MB upload.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// A visitor identity. Created on first visit and kept under the
/// `reviewUser` storage key; `review_count` grows with every review the
/// visitor submits.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub avatar: String,
    #[serde(default)]
    pub review_count: u32,
}

impl User {
    /// The default identity handed to a first-time visitor.
    pub fn guest(id: String) -> Self {
        Self {
            id,
            name: "Guest User".to_string(),
            avatar: avatar_url("Guest User"),
            review_count: 0,
        }
    }
}

/// Generated avatar image for a display name.
pub fn avatar_url(name: &str) -> String {
    format!(
        "https://ui-avatars.com/api/?name={}&background=a8556e&color=fff&size=128",
        name.replace(' ', "+")
    )
}

/// A reply under a review. Replies are permanent: there is no edit or
/// delete path for them, only for top-level reviews.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    pub id: String,
    pub user: User,
    pub text: String,
    pub date: DateTime<Utc>,
}

/// A salon review. The `user` field is a snapshot of the author at
/// submission time, not a live reference. Invariant: `likes` always
/// equals `liked_by.len()`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub user: User,
    pub service: String,
    pub rating: u8,
    pub text: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub liked_by: Vec<String>,
    #[serde(default)]
    pub replies: Vec<Reply>,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub edited: bool,
    #[serde(default)]
    pub edit_date: Option<DateTime<Utc>>,
}

impl Review {
    pub fn is_liked_by(&self, user_id: &str) -> bool {
        self.liked_by.iter().any(|id| id == user_id)
    }
}

/// Human-friendly age of a review or reply relative to `now`.
pub fn relative_date(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = now.signed_duration_since(date).num_days();
    match days {
        d if d <= 0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        d if d < 7 => format!("{} days ago", d),
        _ => date.format("%-m/%-d/%Y").to_string(),
    }
}
