//! Membership tests over coordinate lists.
//!
//! Static lists (walls, targets, taboo cells) are kept sorted in reading
//! order and binary searched. Per-state box lists mutate as boxes move and
//! are not guaranteed sorted - those use a linear scan instead.

use std::cmp::Ordering;

use crate::data::Pos;

/// Binary search over a list sorted in reading order (by `(y, x)`).
///
/// Returns the index of `target` or `None` if absent. The caller must
/// guarantee the ordering invariant - an unsorted list silently returns
/// wrong results, there is no way to detect it here.
pub fn position_search(target: Pos, sorted: &[Pos]) -> Option<usize> {
    let mut lo = 0;
    let mut hi = sorted.len();
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        match sorted[mid].reading_order(target) {
            Ordering::Equal => return Some(mid),
            Ordering::Less => lo = mid + 1,
            Ordering::Greater => hi = mid,
        }
    }
    None
}

/// Linear scan for small, mutable lists (per-state boxes).
pub fn linear_search(target: Pos, positions: &[Pos]) -> Option<usize> {
    positions.iter().position(|&p| p == target)
}
