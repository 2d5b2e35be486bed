// src/app/sample.rs
use rand::Rng;

/// Uniform sample without replacement: `min(count, items.len())` elements,
/// each draw uniform over the remaining pool. The input is left untouched;
/// asking for more than there is returns everything, shuffled.
pub fn pick_random<T: Clone>(items: &[T], count: usize) -> Vec<T> {
    pick_random_with(&mut rand::thread_rng(), items, count)
}

pub fn pick_random_with<R: Rng, T: Clone>(rng: &mut R, items: &[T], count: usize) -> Vec<T> {
    let mut pool: Vec<T> = items.to_vec();
    let take = count.min(pool.len());
    let mut out = Vec::with_capacity(take);
    for _ in 0..take {
        let idx = rng.gen_range(0..pool.len());
        out.push(pool.swap_remove(idx));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{pick_random, pick_random_with};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn returns_requested_count_of_distinct_items() {
        let items = vec![1, 2, 3];
        for _ in 0..50 {
            let picked = pick_random(&items, 2);
            assert_eq!(picked.len(), 2);
            let set: HashSet<_> = picked.iter().collect();
            assert_eq!(set.len(), 2);
            assert!(picked.iter().all(|p| items.contains(p)));
        }
    }

    #[test]
    fn zero_count_and_empty_input_yield_empty() {
        assert!(pick_random(&[1, 2, 3], 0).is_empty());
        assert!(pick_random::<i32>(&[], 5).is_empty());
    }

    #[test]
    fn oversized_count_returns_a_permutation_of_all_items() {
        let items = vec![10, 20, 30];
        let mut picked = pick_random(&items, 99);
        assert_eq!(picked.len(), 3);
        picked.sort_unstable();
        assert_eq!(picked, items);
    }

    #[test]
    fn input_is_not_mutated() {
        let items = vec!["a", "b", "c", "d"];
        let before = items.clone();
        let _ = pick_random(&items, 3);
        assert_eq!(items, before);
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let items: Vec<u32> = (0..20).collect();
        let a = pick_random_with(&mut StdRng::seed_from_u64(7), &items, 5);
        let b = pick_random_with(&mut StdRng::seed_from_u64(7), &items, 5);
        assert_eq!(a, b);
    }
}
