//! Fisher–Yates shuffle over an injected RNG.

use adzan_core::rng::DeterministicRng;

/// Returns a uniformly random permutation of `items`, leaving the input
/// untouched.
///
/// Walks from the last index down to 1, swapping each element with one drawn
/// from `[0, i]`.
#[allow(clippy::cast_possible_truncation)]
pub fn shuffle<T: Clone>(items: &[T], rng: &mut dyn DeterministicRng) -> Vec<T> {
    let mut shuffled = items.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = rng.next_u32_range(0, i as u32) as usize;
        shuffled.swap(i, j.min(i));
    }
    shuffled
}
