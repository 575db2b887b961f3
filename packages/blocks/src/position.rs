//! Index arithmetic for moving an element within one list

/// Where an element currently at `from` must be reinserted after removal so it ends up
/// in front of what is now at `to` (`to == len` means "append").
///
/// Returns `None` when the drop target is the element itself or the slot right after it,
/// both of which leave the list unchanged.
pub fn reinsert_index(from: usize, to: usize) -> Option<usize> {
    if to == from || to == from + 1 {
        None
    } else if from < to {
        Some(to - 1)
    } else {
        Some(to)
    }
}

/// Move `items[from]` so it lands before the element currently at `to`.
///
/// Returns `false` when nothing moved.
pub fn move_within<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= items.len() {
        return false;
    }
    let to = to.min(items.len());

    match reinsert_index(from, to) {
        Some(target) => {
            let item = items.remove(from);
            items.insert(target, item);
            true
        }
        None => false,
    }
}
