//! Fractional sort-key calculator for drag-and-drop reordering.
//!
//! A reorder writes exactly one key: the moved record's. Endpoints get
//! the current extreme plus/minus a fixed gap, interior moves get the
//! midpoint of the two records that become the item's neighbors. Sibling
//! keys are never renumbered.
//!
//! Known limitation: repeated interior insertion between the same two
//! neighbors halves the available gap each time, so the midpoint
//! eventually collides with a neighbor at f64 precision. The persisted
//! semantics do not include renumbering to recover precision, and this
//! calculator does not add it.

/// Gap used when moving an item past either end of the list.
const END_GAP: f64 = 1000.0;

/// Compute the new sort key for moving the item at `source` to
/// `destination` within `keys`, the bucket's sort keys in current order.
///
/// `destination` addresses a position in the pre-move list, the same way
/// the drag-and-drop layer reports it. A no-op move returns the existing
/// key unchanged.
pub fn compute_new_sort_order(keys: &[f64], source: usize, destination: usize) -> f64 {
    if source == destination || keys.is_empty() {
        return keys.get(source).copied().unwrap_or(0.0);
    }

    let last = keys.len() - 1;
    if destination == 0 {
        return keys[0] - END_GAP;
    }
    if destination >= last {
        return keys[last] + END_GAP;
    }

    // Interior move: average the destination's key with the neighbor on
    // the side the item arrives from. Moving down, the item lands before
    // the record currently after the slot; moving up, after the record
    // currently before it.
    if source < destination {
        (keys[destination] + keys[destination + 1]) / 2.0
    } else {
        (keys[destination] + keys[destination - 1]) / 2.0
    }
}
