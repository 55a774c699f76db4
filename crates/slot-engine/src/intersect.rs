//! Reduce several participants' free intervals to the times when all of them
//! are free at once.
//!
//! Each stage pairs every accumulated interval with every interval of the next
//! participant and keeps the non-empty overlaps. Per-day interval counts are
//! small, so the quadratic pairing is fine.

use crate::interval::Interval;

/// All pairwise overlaps between two interval lists, `(max(starts), min(ends))`
/// for each open-overlapping pair, in `a`-major order.
pub fn intersect_pair(a: &[Interval], b: &[Interval]) -> Vec<Interval> {
    let mut out = Vec::new();
    for x in a {
        for y in b {
            if let Some(common) = x.intersection(y) {
                out.push(common);
            }
        }
    }
    out
}

/// Intervals during which every participant in `per_participant` is free.
///
/// An empty interval list for any participant vetoes everything, and so does
/// an empty participant list. The result is sorted by `(start, end)` with
/// exact duplicates removed, which makes it independent of participant order.
pub fn intersect_all(per_participant: &[Vec<Interval>]) -> Vec<Interval> {
    let Some((first, rest)) = per_participant.split_first() else {
        return Vec::new();
    };

    let mut acc = first.clone();
    for intervals in rest {
        if acc.is_empty() {
            break;
        }
        acc = intersect_pair(&acc, intervals);
    }

    acc.sort();
    acc.dedup();
    acc
}
