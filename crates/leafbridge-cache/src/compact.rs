use crate::{Error, Result};

/// Removes the entries at `positions` from `items` in one linear pass.
///
/// Survivors keep their relative order. No buffer proportional to `items` is
/// allocated: survivors are moved down over the removed entries, which end up
/// at the tail and are dropped by the final truncation.
///
/// `positions` must be strictly ascending and every position must be less than
/// `items.len()`. Otherwise [`Error::InvalidPositions`] is returned and `items`
/// is left untouched.
pub fn compact_in_place<T>(items: &mut Vec<T>, positions: &[usize]) -> Result<()> {
    validate_positions(positions, items.len())?;
    compact_sorted(items, positions);
    Ok(())
}

fn validate_positions(positions: &[usize], len: usize) -> Result<()> {
    let mut previous = None;
    for (index, &position) in positions.iter().enumerate() {
        if position >= len || previous.is_some_and(|previous| position <= previous) {
            return Err(Error::InvalidPositions {
                index,
                position,
                len,
            });
        }
        previous = Some(position);
    }
    Ok(())
}

/// Compaction proper, for positions already known to be valid.
pub(crate) fn compact_sorted<T>(items: &mut Vec<T>, positions: &[usize]) {
    if positions.is_empty() {
        return;
    }

    let original_len = items.len();

    // [write, boundary) always holds the entries removed so far.
    let mut write = 0;
    let mut boundary = 0;

    for &position in positions {
        write = shift_run(items, boundary, position, write);
        boundary = position + 1;
    }
    write = shift_run(items, boundary, original_len, write);

    debug_assert_eq!(write, original_len - positions.len());
    items.truncate(write);
}

/// Moves the survivors in `[start, end)` down to `write`, returning the new
/// write cursor. An empty run is a no-op.
fn shift_run<T>(items: &mut [T], start: usize, end: usize, mut write: usize) -> usize {
    if write == start {
        return end;
    }

    for read in start..end {
        items.swap(write, read);
        write += 1;
    }
    write
}
