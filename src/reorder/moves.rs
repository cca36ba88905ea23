//! Local list moves, computed before anything is sent to the store.

/// Removes the element at `from` and inserts it at `to`.
///
/// Returns `false` and leaves `items` untouched when the indices are equal or either one
/// is out of bounds.
pub fn array_move<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from == to || from >= items.len() || to >= items.len() {
        return false;
    }
    let item = items.remove(from);
    items.insert(to, item);
    true
}

/// Moves within the subset of `items` selected by `in_scope`, using indices into that
/// subset.
///
/// The subset is reordered on its own and written back into the slots it occupied in
/// `items`; elements outside the subset keep their positions. Returns `false` for the
/// same no-op cases as [`array_move`], judged against the subset.
pub fn move_within_scope<T: Clone>(
    items: &mut [T],
    in_scope: impl Fn(&T) -> bool,
    from: usize,
    to: usize,
) -> bool {
    let slots: Vec<usize> = items
        .iter()
        .enumerate()
        .filter(|(_, item)| in_scope(item))
        .map(|(index, _)| index)
        .collect();

    let mut subset: Vec<T> = slots.iter().map(|&index| items[index].clone()).collect();
    if !array_move(&mut subset, from, to) {
        return false;
    }
    for (slot, item) in slots.into_iter().zip(subset) {
        items[slot] = item;
    }
    true
}
