//! The presentation projection of the review collection: filter by
//! service, search, then sort. Pure functions over the store's data;
//! nothing here mutates anything.

use crate::models::review::Review;

/// Service filter; `All` disables filtering.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ServiceFilter {
    #[default]
    All,
    Service(String),
}

impl ServiceFilter {
    /// Maps the filter `<select>` value back to a filter, with "All"
    /// as the sentinel.
    pub fn from_selection(value: &str) -> Self {
        if value == "All" {
            ServiceFilter::All
        } else {
            ServiceFilter::Service(value.to_string())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Recent,
    Rating,
    Likes,
}

impl SortKey {
    pub fn from_selection(value: &str) -> Self {
        match value {
            "rating" => SortKey::Rating,
            "likes" => SortKey::Likes,
            _ => SortKey::Recent,
        }
    }
}

/// Filter, then search, then stable-sort. Search is a case-insensitive
/// substring match against the body, the author name, or the service
/// name, and only applies when the query is non-empty. Ties under every
/// sort key keep their prior relative order.
pub fn project(
    reviews: &[Review],
    filter: &ServiceFilter,
    query: &str,
    sort: SortKey,
) -> Vec<Review> {
    let mut shown: Vec<Review> = reviews
        .iter()
        .filter(|r| match filter {
            ServiceFilter::All => true,
            ServiceFilter::Service(service) => r.service == *service,
        })
        .filter(|r| {
            if query.is_empty() {
                return true;
            }
            let needle = query.to_lowercase();
            r.text.to_lowercase().contains(&needle)
                || r.user.name.to_lowercase().contains(&needle)
                || r.service.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect();

    match sort {
        SortKey::Recent => shown.sort_by(|a, b| b.date.cmp(&a.date)),
        SortKey::Rating => shown.sort_by(|a, b| b.rating.cmp(&a.rating)),
        SortKey::Likes => shown.sort_by(|a, b| b.likes.cmp(&a.likes)),
    }
    shown
}
