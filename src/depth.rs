//! Depth ordering for the painter's algorithm.
//!
//! Visibility is resolved by draw order rather than a depth buffer: every
//! frame the draw list is sorted by each triangle's average depth and drawn
//! in that order.

use crate::math::vec3::Vec3;

/// Mean z of a triangle's three vertices.
#[inline]
pub fn average_depth(vertices: [Vec3; 3]) -> f32 {
    (vertices[0].z + vertices[1].z + vertices[2].z) / 3.0
}

/// Upper bound on the number of indices the sort stack ever holds for `n`
/// items: `2 * floor(log2(n)) + 2`.
pub fn stack_capacity(n: usize) -> usize {
    let log2 = if n > 1 { n.ilog2() as usize } else { 0 };
    log2 * 2 + 2
}

/// Sorts `items` in place into non-decreasing `key` order.
///
/// Quicksort with the last element as pivot and no recursion: after each
/// partition the larger side is pushed onto an explicit stack and the smaller
/// side is processed next, so the stack never holds more than
/// [`stack_capacity`] indices. Not stable.
///
/// Keys are read through `key` on every comparison, so it should be cheap.
/// NaN keys end up in unspecified positions but the sort still terminates.
pub fn depth_sort<T, F>(items: &mut [T], key: F)
where
    F: Fn(&T) -> f32,
{
    if items.len() < 2 {
        return;
    }

    let capacity = stack_capacity(items.len());
    let mut stack: Vec<usize> = Vec::with_capacity(capacity);

    // Half-open range currently being partitioned
    let mut lo = 0usize;
    let mut end = items.len();

    loop {
        if end - lo >= 2 {
            let p = partition(items, lo, end - 1, &key);

            // Pivot is in place; [lo, p) and [p + 1, end) remain
            if p - lo > end - (p + 1) {
                push_range(&mut stack, capacity, lo, p);
                lo = p + 1;
            } else {
                push_range(&mut stack, capacity, p + 1, end);
                end = p;
            }
        } else {
            match (stack.pop(), stack.pop()) {
                (Some(next_end), Some(next_lo)) => {
                    lo = next_lo;
                    end = next_end;
                }
                _ => break,
            }
        }
    }
}

fn push_range(stack: &mut Vec<usize>, capacity: usize, lo: usize, end: usize) {
    // Ranges with fewer than two items need no work.
    if end - lo < 2 {
        return;
    }
    debug_assert!(
        stack.len() + 2 <= capacity,
        "depth sort stack exceeded its bound of {capacity}"
    );
    stack.push(lo);
    stack.push(end);
}

/// Two-pointer partition of `items[lo..=hi]` around `items[hi]`. Returns the
/// pivot's final index.
///
/// Both scans stop on keys equal to the pivot and swap them, so runs of
/// duplicate depths split down the middle instead of to one side.
fn partition<T, F>(items: &mut [T], lo: usize, hi: usize, key: &F) -> usize
where
    F: Fn(&T) -> f32,
{
    let pivot = key(&items[hi]);
    // [lo, i) holds keys <= pivot and [j, hi) keys >= pivot
    let mut i = lo;
    let mut j = hi;
    loop {
        while i < j && key(&items[i]) < pivot {
            i += 1;
        }
        while j > i && key(&items[j - 1]) > pivot {
            j -= 1;
        }
        if j - i < 2 {
            break;
        }
        items.swap(i, j - 1);
        i += 1;
        j -= 1;
    }
    items.swap(i, hi);
    i
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[derive(Clone, Copy, Debug, PartialEq)]
    struct Item {
        id: usize,
        depth: f32,
    }

    fn items(depths: &[f32]) -> Vec<Item> {
        depths
            .iter()
            .enumerate()
            .map(|(id, &depth)| Item { id, depth })
            .collect()
    }

    fn assert_sorted_permutation(before: &[Item], after: &[Item]) {
        assert!(
            after.windows(2).all(|w| w[0].depth <= w[1].depth),
            "not sorted: {after:?}"
        );
        let mut ids: Vec<usize> = after.iter().map(|i| i.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, (0..before.len()).collect::<Vec<_>>());
        for item in after {
            assert_eq!(before[item.id], *item);
        }
    }

    #[test]
    fn average_depth_is_mean_z() {
        let tri = [
            Vec3::new(5.0, 0.0, 1.0),
            Vec3::new(0.0, 5.0, 2.0),
            Vec3::new(0.0, 0.0, 6.0),
        ];
        assert_eq!(average_depth(tri), 3.0);
    }

    #[test]
    fn stack_capacity_grows_logarithmically() {
        assert_eq!(stack_capacity(0), 2);
        assert_eq!(stack_capacity(1), 2);
        assert_eq!(stack_capacity(2), 4);
        assert_eq!(stack_capacity(12), 8);
        assert_eq!(stack_capacity(1024), 22);
    }

    #[test]
    fn empty_and_single_are_untouched() {
        let mut empty: Vec<Item> = Vec::new();
        depth_sort(&mut empty, |i| i.depth);
        let mut one = items(&[3.0]);
        depth_sort(&mut one, |i| i.depth);
        assert_eq!(one, items(&[3.0]));
    }

    #[test]
    fn sorts_small_fixed_inputs() {
        for depths in [
            vec![2.0, 1.0],
            vec![1.0, 2.0],
            vec![3.0, 1.0, 2.0],
            vec![1.0, 1.0, 1.0, 1.0],
            vec![5.0, 4.0, 3.0, 2.0, 1.0],
            vec![1.0, 2.0, 3.0, 4.0, 5.0],
            vec![-1.0, 10.0, -1.0, 0.0, 10.0, 0.5],
        ] {
            let before = items(&depths);
            let mut after = before.clone();
            depth_sort(&mut after, |i| i.depth);
            assert_sorted_permutation(&before, &after);
        }
    }

    #[test]
    fn sorts_random_arrays_with_duplicates() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..500 {
            let len = rng.gen_range(0..200);
            // Few distinct values so duplicates are common
            let depths: Vec<f32> = (0..len).map(|_| rng.gen_range(-8..8) as f32 * 0.5).collect();
            let before = items(&depths);
            let mut after = before.clone();
            depth_sort(&mut after, |i| i.depth);
            assert_sorted_permutation(&before, &after);
        }
    }

    #[test]
    fn sorts_random_continuous_arrays() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let len = rng.gen_range(1..2000);
            let depths: Vec<f32> = (0..len).map(|_| rng.gen_range(-100.0..100.0)).collect();
            let before = items(&depths);
            let mut after = before.clone();
            depth_sort(&mut after, |i| i.depth);
            assert_sorted_permutation(&before, &after);
        }
    }

    #[test]
    fn duplicate_keys_split_evenly() {
        use std::cell::Cell;

        let n = 10_000;
        let mut flat = items(&vec![1.0; n]);
        let comparisons = Cell::new(0usize);
        depth_sort(&mut flat, |i| {
            comparisons.set(comparisons.get() + 1);
            i.depth
        });
        assert_eq!(flat.len(), n);
        // one-sided splits would need on the order of n * n / 2 comparisons
        assert!(comparisons.get() < 4 * n * 14, "{} comparisons", comparisons.get());
    }

    #[test]
    fn nan_keys_do_not_hang() {
        let mut values = vec![1.0, f32::NAN, 0.0, f32::NAN, -1.0];
        depth_sort(&mut values, |v| *v);
        assert_eq!(values.len(), 5);
    }
}
