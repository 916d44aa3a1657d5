//! Uniform random selection among maximal candidates.

use rand::seq::SliceRandom;
use rand::Rng;

/// Return one of the highest-scoring items, chosen uniformly among ties.
///
/// Scores are compared with [`f64::total_cmp`]. Returns `None` for an empty
/// slice. Callers that need a fair choice among equally good options use this
/// instead of `max_by`, which always keeps the last maximum.
pub fn select_max_random_tie<'a, T, F, R>(
    items: &'a [T],
    score: F,
    rng: &mut R,
) -> Option<&'a T>
where
    F: FnMut(&T) -> f64,
    R: Rng + ?Sized,
{
    select_max_index_random_tie(items, score, rng).map(|i| &items[i])
}

/// Index variant of [`select_max_random_tie`].
pub fn select_max_index_random_tie<T, F, R>(
    items: &[T],
    mut score: F,
    rng: &mut R,
) -> Option<usize>
where
    F: FnMut(&T) -> f64,
    R: Rng + ?Sized,
{
    let mut best: Vec<usize> = Vec::new();
    let mut best_score = f64::NEG_INFINITY;
    for (i, item) in items.iter().enumerate() {
        let s = score(item);
        match s.total_cmp(&best_score) {
            std::cmp::Ordering::Greater => {
                best.clear();
                best.push(i);
                best_score = s;
            }
            std::cmp::Ordering::Equal => best.push(i),
            std::cmp::Ordering::Less => {}
        }
    }
    best.choose(rng).copied()
}
