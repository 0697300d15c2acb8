//! # Slice Normalizer
//!
//! The single bounds-clamping function shared by every slicing operation in
//! the crate. Semantics are Python-style by contract, not by accident:
//!
//! - negative indices count from the end (`start += length`)
//! - both bounds clamp silently into `[0, length]`
//! - `start > end` degrades to an empty range at `end`, never an error
//!
//! Callers that want strict bounds checking (single-element access) do it
//! themselves; see `StrView::byte_at`.

/// Computes a valid `(offset, length)` sub-range of a span of `length`
/// bytes from possibly negative or out-of-range `start`/`end` bounds.
///
/// Pure and total over all inputs. The result always satisfies
/// `offset <= offset + length' <= length`.
pub fn normalize_bounds(length: usize, start: isize, end: isize) -> (usize, usize) {
    let length = length as isize;

    // Negative indices are offsets from the end. Saturating add keeps
    // extreme negatives negative, so the clamp below floors them at 0.
    let mut start = if start < 0 {
        start.saturating_add(length)
    } else {
        start
    };
    let mut end = if end < 0 { end.saturating_add(length) } else { end };

    start = start.clamp(0, length);
    end = end.clamp(0, length);

    // Out-of-order bounds produce the empty range, not an error.
    if start > end {
        start = end;
    }

    (start as usize, (end - start) as usize)
}
