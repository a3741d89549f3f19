//! Rating aggregation. Pure functions of a review set; nothing here is
//! persisted or cached — every read path recomputes.

use std::collections::BTreeMap;

use crate::modules::reviews::models::Review;

/// Arithmetic mean of the ratings, rounded to one decimal place.
/// An empty review set averages to 0.
pub fn average_rating(reviews: &[Review]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }
    let sum: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
    let mean = f64::from(sum) / reviews.len() as f64;
    (mean * 10.0).round() / 10.0
}

/// Five-bucket histogram over ratings 1..=5.
///
/// Every bucket is always present, zero-filled. Ratings outside the range
/// cannot occur — the review store validates before insert.
pub fn rating_distribution<'a, I>(reviews: I) -> BTreeMap<u8, u64>
where
    I: IntoIterator<Item = &'a Review>,
{
    let mut buckets: BTreeMap<u8, u64> = (1..=5).map(|rating| (rating, 0)).collect();
    for review in reviews {
        if let Some(count) = buckets.get_mut(&review.rating) {
            *count += 1;
        }
    }
    buckets
}
