//! Reordering helpers for ordered sequences.
//!
//! "End" is the last position of the slice, "start" the first. Every helper
//! takes the index of the item to move and returns `true` only if the
//! sequence actually changed. Out-of-range indices are ignored.

/// Swap the item at `index` with its neighbor toward the end
pub fn move_one_to_end<T>(items: &mut [T], index: usize) -> bool {
    if index + 1 >= items.len() {
        return false;
    }
    items.swap(index, index + 1);
    true
}

/// Swap the item at `index` with its neighbor toward the start
pub fn move_one_to_start<T>(items: &mut [T], index: usize) -> bool {
    if index == 0 || index >= items.len() {
        return false;
    }
    items.swap(index, index - 1);
    true
}

/// Relocate the item at `index` to the end, keeping the relative order of the rest
pub fn move_to_end<T>(items: &mut [T], index: usize) -> bool {
    if index + 1 >= items.len() {
        return false;
    }
    items[index..].rotate_left(1);
    true
}

/// Relocate the item at `index` to the start, keeping the relative order of the rest
pub fn move_to_start<T>(items: &mut [T], index: usize) -> bool {
    if index == 0 || index >= items.len() {
        return false;
    }
    items[..=index].rotate_right(1);
    true
}
