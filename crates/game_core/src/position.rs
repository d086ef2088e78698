use rand::Rng;
use shared::domain::CellIndex;

/// Picks a cell uniformly from `0..total`.
///
/// With `exclude` set the draw is repeated until it lands somewhere else,
/// so the result never equals the excluded cell.
///
/// # Panics
///
/// Panics when `total` is zero. With an exclusion, `total` must be at least
/// two or the rejection loop cannot finish; [`shared::domain::BoardLayout`]
/// guarantees that for every board the controller builds.
pub fn choose_position<R: Rng + ?Sized>(
    rng: &mut R,
    total: usize,
    exclude: Option<CellIndex>,
) -> CellIndex {
    let Some(exclude) = exclude else {
        return CellIndex(rng.gen_range(0..total));
    };

    debug_assert!(
        total >= 2 || exclude.0 >= total,
        "cannot choose a cell other than {exclude} on a board of {total}"
    );

    loop {
        let candidate = rng.gen_range(0..total);
        if candidate != exclude.0 {
            return CellIndex(candidate);
        }
    }
}

#[cfg(test)]
#[path = "tests/position_tests.rs"]
mod tests;
