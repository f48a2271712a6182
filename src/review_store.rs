//! Owns the review collection and the current visitor identity, and is
//! the only writer to persistent storage for them. Every mutation is
//! validated first, applied in memory, then written through to storage
//! as a full-collection overwrite.

use crate::error::ValidationError;
use crate::models::catalog::is_known_service;
use crate::models::review::{Reply, Review, User, MAX_IMAGE_BYTES};
use crate::storage::KeyValueStorage;
use chrono::{Duration, Utc};
use leptos::logging::warn;
use std::rc::Rc;
use uuid::Uuid;

pub const REVIEWS_KEY: &str = "reviews";
pub const USER_KEY: &str = "reviewUser";

/// Form input for a new or edited review.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewDraft {
    pub service: String,
    pub rating: u8,
    pub text: String,
    pub image: Option<String>,
}

impl ReviewDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=5).contains(&self.rating) {
            return Err(ValidationError::RatingOutOfRange);
        }
        if self.text.trim().is_empty() {
            return Err(ValidationError::EmptyText);
        }
        if !is_known_service(&self.service) {
            return Err(ValidationError::UnknownService(self.service.clone()));
        }
        if let Some(image) = &self.image {
            if image.len() > MAX_IMAGE_BYTES {
                return Err(ValidationError::ImageTooLarge);
            }
        }
        Ok(())
    }
}

#[derive(Clone)]
pub struct ReviewStore {
    reviews: Vec<Review>,
    current_user: User,
    storage: Rc<dyn KeyValueStorage>,
    last_id: i64,
}

impl ReviewStore {
    /// Reads the persisted collection and visitor record. Anything
    /// missing or unparseable is replaced wholesale with defaults;
    /// storage trouble never reaches the caller.
    pub fn load(storage: Rc<dyn KeyValueStorage>) -> Self {
        let current_user = storage
            .get(USER_KEY)
            .and_then(|raw| serde_json::from_str::<User>(&raw).ok())
            .unwrap_or_else(|| User::guest(Uuid::new_v4().to_string()));

        let reviews = match storage.get(REVIEWS_KEY) {
            Some(raw) => serde_json::from_str::<Vec<Review>>(&raw).unwrap_or_else(|err| {
                warn!("[REVIEWS] discarding unparseable stored reviews: {err}");
                seed_reviews()
            }),
            None => seed_reviews(),
        };

        let store = Self {
            reviews,
            current_user,
            storage,
            last_id: 0,
        };
        store.persist_user();
        store.persist_reviews();
        store
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    pub fn current_user(&self) -> &User {
        &self.current_user
    }

    pub fn is_own_review(&self, review: &Review) -> bool {
        review.user.id == self.current_user.id
    }

    /// Creates a new review from `draft` and prepends it to the
    /// collection. The author snapshot carries the already-incremented
    /// review count.
    pub fn submit(&mut self, draft: ReviewDraft) -> Result<(), ValidationError> {
        draft.validate()?;
        self.current_user.review_count += 1;
        let review = Review {
            id: self.next_id(),
            user: self.current_user.clone(),
            service: draft.service,
            rating: draft.rating,
            text: draft.text.trim().to_string(),
            image: draft.image,
            likes: 0,
            liked_by: Vec::new(),
            replies: Vec::new(),
            date: Utc::now(),
            edited: false,
            edit_date: None,
        };
        self.reviews.insert(0, review);
        self.persist_user();
        self.persist_reviews();
        Ok(())
    }

    /// Rewrites an existing review in place. Only the author may edit;
    /// the id and original creation date are preserved.
    pub fn update(&mut self, review_id: &str, draft: ReviewDraft) -> Result<(), ValidationError> {
        draft.validate()?;
        let own_id = self.current_user.id.clone();
        let review = self
            .reviews
            .iter_mut()
            .find(|r| r.id == review_id)
            .ok_or(ValidationError::UnknownReview)?;
        if review.user.id != own_id {
            return Err(ValidationError::NotAuthor);
        }
        review.service = draft.service;
        review.rating = draft.rating;
        review.text = draft.text.trim().to_string();
        review.image = draft.image;
        review.edited = true;
        review.edit_date = Some(Utc::now());
        self.persist_reviews();
        Ok(())
    }

    /// Deletes a review and all its replies. Only the author may
    /// delete; anyone else gets an error and the collection is left
    /// untouched.
    pub fn remove(&mut self, review_id: &str) -> Result<(), ValidationError> {
        let index = self
            .reviews
            .iter()
            .position(|r| r.id == review_id)
            .ok_or(ValidationError::UnknownReview)?;
        if self.reviews[index].user.id != self.current_user.id {
            return Err(ValidationError::NotAuthor);
        }
        self.reviews.remove(index);
        self.persist_reviews();
        Ok(())
    }

    /// Adds or removes `user_id`'s like. Applying it twice returns the
    /// review to its prior state; set semantics cap a user at one like.
    pub fn toggle_like(&mut self, review_id: &str, user_id: &str) -> Result<(), ValidationError> {
        let review = self
            .reviews
            .iter_mut()
            .find(|r| r.id == review_id)
            .ok_or(ValidationError::UnknownReview)?;
        if review.is_liked_by(user_id) {
            review.liked_by.retain(|id| id != user_id);
        } else {
            review.liked_by.push(user_id.to_string());
        }
        review.likes = review.liked_by.len() as u32;
        self.persist_reviews();
        Ok(())
    }

    /// Appends a reply by the current visitor. Replies are permanent.
    pub fn add_reply(&mut self, review_id: &str, text: &str) -> Result<(), ValidationError> {
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyText);
        }
        let id = self.next_id();
        let user = self.current_user.clone();
        let review = self
            .reviews
            .iter_mut()
            .find(|r| r.id == review_id)
            .ok_or(ValidationError::UnknownReview)?;
        review.replies.push(Reply {
            id,
            user,
            text: text.trim().to_string(),
            date: Utc::now(),
        });
        self.persist_reviews();
        Ok(())
    }

    // Time-based ids, bumped when the clock has not moved so they stay
    // monotonic within a session.
    fn next_id(&mut self) -> String {
        let now = Utc::now().timestamp_millis();
        self.last_id = now.max(self.last_id + 1);
        self.last_id.to_string()
    }

    fn persist_reviews(&self) {
        match serde_json::to_string(&self.reviews) {
            Ok(json) => self.storage.set(REVIEWS_KEY, &json),
            Err(err) => warn!("[REVIEWS] failed to serialize reviews: {err}"),
        }
    }

    fn persist_user(&self) {
        match serde_json::to_string(&self.current_user) {
            Ok(json) => self.storage.set(USER_KEY, &json),
            Err(err) => warn!("[REVIEWS] failed to serialize user: {err}"),
        }
    }
}

/// Overall mean rating, one decimal place, "0.0" for no reviews.
pub fn average_rating(reviews: &[Review]) -> String {
    if reviews.is_empty() {
        return "0.0".to_string();
    }
    let sum: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
    format!("{:.1}", f64::from(sum) / reviews.len() as f64)
}

/// Mean rating per service, in catalog order. Services without a
/// single review are left out rather than reported as 0.0.
pub fn average_by_service(reviews: &[Review], services: &[&str]) -> Vec<(String, String)> {
    services
        .iter()
        .filter_map(|service| {
            let ratings: Vec<u32> = reviews
                .iter()
                .filter(|r| r.service == *service)
                .map(|r| u32::from(r.rating))
                .collect();
            if ratings.is_empty() {
                return None;
            }
            let avg = f64::from(ratings.iter().sum::<u32>()) / ratings.len() as f64;
            Some((service.to_string(), format!("{:.1}", avg)))
        })
        .collect()
}

/// The demo reviews a fresh visitor sees before anyone has written one.
fn seed_reviews() -> Vec<Review> {
    let now = Utc::now();
    let sarah = User {
        id: "user1".into(),
        name: "Sarah Martinez".into(),
        avatar: crate::models::review::avatar_url("Sarah Martinez"),
        review_count: 12,
    };
    let emily = User {
        id: "user2".into(),
        name: "Emily Johnson".into(),
        avatar: crate::models::review::avatar_url("Emily Johnson"),
        review_count: 5,
    };
    let maria = User {
        id: "user3".into(),
        name: "Maria Garcia".into(),
        avatar: crate::models::review::avatar_url("Maria Garcia"),
        review_count: 8,
    };

    let seed = |id: &str, user: &User, service: &str, rating: u8, text: &str, liked_by: Vec<String>, replies: Vec<Reply>, days_ago: i64| Review {
        id: id.to_string(),
        user: user.clone(),
        service: service.to_string(),
        rating,
        text: text.to_string(),
        image: None,
        likes: liked_by.len() as u32,
        liked_by,
        replies,
        date: now - Duration::days(days_ago),
        edited: false,
        edit_date: None,
    };

    vec![
        seed(
            "1",
            &sarah,
            "Hair Cut",
            5,
            "Absolutely amazing experience! The stylist was so professional and really listened to what I wanted. My hair looks incredible!",
            likers(&["user2", "user3"], 6),
            vec![],
            2,
        ),
        seed(
            "2",
            &emily,
            "Balayage",
            5,
            "Best balayage I've ever had! The color is so natural and the technique was flawless. Highly recommend!",
            likers(&["user1", "user3"], 13),
            vec![Reply {
                id: "reply1".into(),
                user: maria.clone(),
                text: "I totally agree! I had the same experience last month.".into(),
                date: now - Duration::days(1),
            }],
            5,
        ),
        seed(
            "3",
            &maria,
            "Treatments",
            4,
            "Great deep conditioning treatment! My hair feels so soft and healthy now. The staff is very friendly too.",
            likers(&["user1"], 5),
            vec![],
            7,
        ),
    ]
}

// Named likers plus anonymous past visitors, so the displayed like
// counts line up with liked_by.
fn likers(named: &[&str], visitors: usize) -> Vec<String> {
    named
        .iter()
        .map(|id| id.to_string())
        .chain((1..=visitors).map(|n| format!("visitor{n}")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn fresh_store() -> (ReviewStore, MemoryStorage) {
        let storage = MemoryStorage::new();
        let store = ReviewStore::load(Rc::new(storage.clone()));
        (store, storage)
    }

    fn draft(service: &str, rating: u8, text: &str) -> ReviewDraft {
        ReviewDraft {
            service: service.into(),
            rating,
            text: text.into(),
            image: None,
        }
    }

    #[test]
    fn load_seeds_three_demo_reviews_and_a_guest_user() {
        let (store, storage) = fresh_store();
        assert_eq!(store.reviews().len(), 3);
        assert_eq!(store.current_user().name, "Guest User");
        // both records are persisted right away
        assert!(storage.get(REVIEWS_KEY).is_some());
        assert!(storage.get(USER_KEY).is_some());
    }

    #[test]
    fn seed_likes_match_liked_by() {
        let (store, _) = fresh_store();
        for review in store.reviews() {
            assert_eq!(review.likes as usize, review.liked_by.len());
        }
        assert_eq!(store.reviews()[0].likes, 8);
        assert_eq!(store.reviews()[1].likes, 15);
        assert_eq!(store.reviews()[2].likes, 6);
    }

    #[test]
    fn load_discards_unparseable_stored_reviews() {
        let storage = MemoryStorage::new();
        storage.set(REVIEWS_KEY, "{definitely not json");
        let store = ReviewStore::load(Rc::new(storage.clone()));
        assert_eq!(store.reviews().len(), 3);
        // the bad document was overwritten with the defaults
        let raw = storage.get(REVIEWS_KEY).unwrap();
        assert!(serde_json::from_str::<Vec<crate::models::review::Review>>(&raw).is_ok());
    }

    #[test]
    fn submit_prepends_a_fresh_review() {
        let (mut store, _) = fresh_store();
        store.submit(draft("Color", 4, "  Loved it  ")).unwrap();
        let review = &store.reviews()[0];
        assert_eq!(review.text, "Loved it");
        assert_eq!(review.rating, 4);
        assert_eq!(review.likes, 0);
        assert!(review.liked_by.is_empty());
        assert!(review.replies.is_empty());
        assert!(!review.edited);
        assert_eq!(review.user.review_count, 1);
        assert_eq!(store.current_user().review_count, 1);
    }

    #[test]
    fn submit_rejects_bad_input_without_mutating() {
        let (mut store, _) = fresh_store();
        assert_eq!(
            store.submit(draft("Color", 0, "hi")),
            Err(ValidationError::RatingOutOfRange)
        );
        assert_eq!(
            store.submit(draft("Color", 6, "hi")),
            Err(ValidationError::RatingOutOfRange)
        );
        assert_eq!(
            store.submit(draft("Color", 3, "   ")),
            Err(ValidationError::EmptyText)
        );
        assert!(matches!(
            store.submit(draft("Massage", 3, "hi")),
            Err(ValidationError::UnknownService(_))
        ));
        assert_eq!(store.reviews().len(), 3);
        assert_eq!(store.current_user().review_count, 0);
    }

    #[test]
    fn submit_rejects_oversized_image() {
        let (mut store, _) = fresh_store();
        let mut big = draft("Color", 3, "hi");
        big.image = Some("x".repeat(MAX_IMAGE_BYTES + 1));
        assert_eq!(store.submit(big), Err(ValidationError::ImageTooLarge));
    }

    #[test]
    fn update_marks_edited_and_keeps_id_and_date() {
        let (mut store, _) = fresh_store();
        store.submit(draft("Color", 4, "first take")).unwrap();
        let id = store.reviews()[0].id.clone();
        let created = store.reviews()[0].date;

        store.update(&id, draft("Color", 5, "second take")).unwrap();
        let review = &store.reviews()[0];
        assert_eq!(review.id, id);
        assert_eq!(review.date, created);
        assert_eq!(review.text, "second take");
        assert_eq!(review.rating, 5);
        assert!(review.edited);
        assert!(review.edit_date.is_some());
    }

    #[test]
    fn is_own_review_matches_the_author_snapshot() {
        let (mut store, _) = fresh_store();
        store.submit(draft("Color", 4, "mine")).unwrap();
        assert!(store.is_own_review(&store.reviews()[0]));
        // seed reviews belong to other users
        assert!(!store.is_own_review(&store.reviews()[1]));
    }

    #[test]
    fn update_and_remove_are_author_only() {
        let (mut store, _) = fresh_store();
        // seed review "1" belongs to user1, not the guest
        assert_eq!(
            store.update("1", draft("Color", 5, "hijack")),
            Err(ValidationError::NotAuthor)
        );
        assert_eq!(store.remove("1"), Err(ValidationError::NotAuthor));
        assert_eq!(store.reviews().len(), 3);
    }

    #[test]
    fn remove_deletes_review_with_its_replies() {
        let (mut store, _) = fresh_store();
        store.submit(draft("Color", 4, "mine")).unwrap();
        let id = store.reviews()[0].id.clone();
        store.add_reply(&id, "a reply").unwrap();
        store.remove(&id).unwrap();
        assert!(store.reviews().iter().all(|r| r.id != id));
    }

    #[test]
    fn toggle_like_is_its_own_inverse() {
        let (mut store, _) = fresh_store();
        let before = store.reviews()[0].clone();

        store.toggle_like("1", "guest-x").unwrap();
        let liked = &store.reviews()[0];
        assert_eq!(liked.likes, before.likes + 1);
        assert!(liked.is_liked_by("guest-x"));

        store.toggle_like("1", "guest-x").unwrap();
        let reverted = &store.reviews()[0];
        assert_eq!(reverted.likes, before.likes);
        assert_eq!(reverted.liked_by, before.liked_by);
    }

    #[test]
    fn liking_twice_never_double_counts() {
        let (mut store, _) = fresh_store();
        store.toggle_like("1", "user2").unwrap(); // user2 already liked seed review 1
        let review = &store.reviews()[0];
        assert!(!review.is_liked_by("user2"));
        assert_eq!(review.likes as usize, review.liked_by.len());
    }

    #[test]
    fn add_reply_appends_in_order() {
        let (mut store, _) = fresh_store();
        store.add_reply("2", "me too!").unwrap();
        let review = store.reviews().iter().find(|r| r.id == "2").unwrap();
        assert_eq!(review.replies.len(), 2);
        assert_eq!(review.replies[1].text, "me too!");
        assert_eq!(
            store.add_reply("2", "   "),
            Err(ValidationError::EmptyText)
        );
    }

    #[test]
    fn ids_are_monotonic_within_a_session() {
        let (mut store, _) = fresh_store();
        store.submit(draft("Color", 4, "one")).unwrap();
        store.submit(draft("Color", 4, "two")).unwrap();
        let newer: i64 = store.reviews()[0].id.parse().unwrap();
        let older: i64 = store.reviews()[1].id.parse().unwrap();
        assert!(newer > older);
    }

    #[test]
    fn average_rating_formats_one_decimal() {
        let (mut store, _) = fresh_store();
        assert_eq!(average_rating(&[]), "0.0");
        store.submit(draft("Color", 5, "a")).unwrap();
        store.submit(draft("Color", 3, "b")).unwrap();
        let just_mine: Vec<_> = store
            .reviews()
            .iter()
            .filter(|r| r.service == "Color")
            .cloned()
            .collect();
        assert_eq!(average_rating(&just_mine), "4.0");
    }

    #[test]
    fn average_by_service_omits_unreviewed_services() {
        let (store, _) = fresh_store();
        let averages = average_by_service(
            store.reviews(),
            &crate::models::catalog::KNOWN_SERVICES,
        );
        // seeds cover Hair Cut, Balayage, Treatments only
        assert_eq!(averages.len(), 3);
        assert!(averages.iter().any(|(s, a)| s == "Hair Cut" && a == "5.0"));
        assert!(averages.iter().any(|(s, a)| s == "Treatments" && a == "4.0"));
        assert!(!averages.iter().any(|(s, _)| s == "Color"));
        // catalog order: Hair Cut before Treatments before Balayage
        let order: Vec<_> = averages.iter().map(|(s, _)| s.as_str()).collect();
        assert_eq!(order, vec!["Hair Cut", "Treatments", "Balayage"]);
    }
}
