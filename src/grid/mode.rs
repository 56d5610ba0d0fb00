//! Dominant block length estimation

use std::collections::BTreeMap;

/// Return the most frequent value in `lengths`.
///
/// Ties between equally frequent values resolve to the smallest of them, so
/// the result is reproducible for degenerate inputs where every block length
/// appears once. Returns `None` for an empty slice.
pub fn dominant_length(lengths: &[usize]) -> Option<usize> {
    let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
    for &length in lengths {
        *counts.entry(length).or_default() += 1;
    }

    // Ascending key order: the first maximum seen is the smallest tied value
    let mut best: Option<(usize, usize)> = None;
    for (length, count) in counts {
        match best {
            Some((_, best_count)) if best_count >= count => {}
            _ => best = Some((length, count)),
        }
    }
    best.map(|(length, _)| length)
}
