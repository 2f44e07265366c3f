use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;

fn sorted<T: Ord + Clone>(items: &[T]) -> Vec<T> {
    let mut out = items.to_vec();
    out.sort();
    out
}

// =============================================================
// shuffle
// =============================================================

#[test]
fn shuffle_is_a_permutation() {
    let original: Vec<u32> = (0..50).collect();
    let mut items = original.clone();
    shuffle(&mut items);
    assert_eq!(items.len(), original.len());
    assert_eq!(sorted(&items), original);
}

#[test]
fn seeded_shuffle_is_reproducible() {
    let mut a: Vec<u32> = (0..20).collect();
    let mut b = a.clone();
    shuffle_with(&mut a, &mut StdRng::seed_from_u64(7));
    shuffle_with(&mut b, &mut StdRng::seed_from_u64(7));
    assert_eq!(a, b);
}

#[test]
fn shuffle_handles_empty_and_single() {
    let mut empty: Vec<u8> = Vec::new();
    shuffle(&mut empty);
    assert!(empty.is_empty());

    let mut one = vec!['x'];
    shuffle(&mut one);
    assert_eq!(one, vec!['x']);
}

#[test]
fn every_permutation_of_three_appears() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut seen = HashSet::new();
    for _ in 0..600 {
        let mut items = [1, 2, 3];
        shuffle_with(&mut items, &mut rng);
        seen.insert(items);
    }
    assert_eq!(seen.len(), 6);
}

// =============================================================
// dedupe
// =============================================================

#[test]
fn dedupe_keeps_first_occurrence_order() {
    assert_eq!(dedupe(&[3, 1, 3, 2, 1, 4]), vec![3, 1, 2, 4]);
}

#[test]
fn dedupe_is_idempotent() {
    let words = ["b", "a", "b", "c", "a"];
    let once = dedupe(&words);
    assert_eq!(dedupe(&once), once);
}

#[test]
fn dedupe_output_has_no_repeats() {
    let items: Vec<u32> = (0..200).map(|i| i % 17).collect();
    let out = dedupe(&items);
    let unique: HashSet<_> = out.iter().collect();
    assert_eq!(unique.len(), out.len());
    assert_eq!(out.len(), 17);
}

#[test]
fn dedupe_of_empty_is_empty() {
    let empty: [String; 0] = [];
    assert!(dedupe(&empty).is_empty());
}
