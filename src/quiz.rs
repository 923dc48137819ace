use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::db::Question;

/// Category id meaning "every category" in quiz requests.
pub const ALL_CATEGORIES: i64 = 0;

/// Narrows a quiz category to the id the pool should be filtered by, if any.
pub fn category_filter(category_id: Option<i64>) -> Option<i64> {
    category_id.filter(|&id| id != ALL_CATEGORIES)
}

/// Picks the next quiz question uniformly among the candidates not yet served.
pub fn pick_next<R: Rng + ?Sized>(
    candidates: Vec<Question>,
    previous: &HashSet<i64>,
    rng: &mut R,
) -> Option<Question> {
    let pool: Vec<Question> = candidates
        .into_iter()
        .filter(|q| !previous.contains(&q.id))
        .collect();
    pool.choose(rng).cloned()
}
