use super::*;
use rand::{rngs::StdRng, SeedableRng};
use std::collections::HashSet;

#[test]
fn unconstrained_choice_stays_on_board() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..1_000 {
        let cell = choose_position(&mut rng, 16, None);
        assert!(cell.0 < 16, "{cell} is off the board");
    }
}

#[test]
fn excluded_cell_is_never_chosen() {
    let mut rng = StdRng::seed_from_u64(7);
    for exclude in 0..16 {
        for _ in 0..200 {
            let cell = choose_position(&mut rng, 16, Some(CellIndex(exclude)));
            assert_ne!(cell, CellIndex(exclude));
            assert!(cell.0 < 16);
        }
    }
}

#[test]
fn draws_are_not_degenerate() {
    let mut rng = StdRng::from_entropy();
    let seen: HashSet<_> = (0..100)
        .map(|_| choose_position(&mut rng, 16, None))
        .collect();
    assert!(seen.len() > 1, "100 draws produced a single cell");
}

#[test]
fn two_cell_board_alternates() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut current = choose_position(&mut rng, 2, None);
    for _ in 0..20 {
        let next = choose_position(&mut rng, 2, Some(current));
        assert_eq!(next.0, 1 - current.0);
        current = next;
    }
}

#[test]
fn every_cell_is_reachable_from_an_exclusion() {
    let mut rng = StdRng::seed_from_u64(11);
    let seen: HashSet<_> = (0..2_000)
        .map(|_| choose_position(&mut rng, 16, Some(CellIndex(5))))
        .collect();
    assert_eq!(seen.len(), 15);
    assert!(!seen.contains(&CellIndex(5)));
}
