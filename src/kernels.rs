//! # Search and Hash Kernel Glue
//!
//! The substring-search and hashing kernels are external collaborators:
//! `memchr::memmem` supplies the SIMD-accelerated substring search, and the
//! `crc` crate supplies the CRC-32 content hash. This module pins down the
//! conventions the rest of the crate relies on so the kernels can be
//! swapped without touching `StrView`:
//!
//! - **Not-found sentinel**: `substring_find` reports a position in
//!   `[0, haystack.len()]`, where `haystack.len()` means "not found".
//! - **Empty needle**: found at position 0 in every haystack, including the
//!   empty one.
//! - **Purity**: both kernels are pure functions of the byte content and
//!   reentrant over overlapping read-only ranges.

use crc::{Crc, CRC_32_ISO_HDLC};
use memchr::memmem;

use crate::slice::normalize_bounds;

const CRC32: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

/// Reports the position of the first occurrence of `needle` in `haystack`,
/// or `haystack.len()` if there is none.
pub(crate) fn substring_find(haystack: &[u8], needle: &[u8]) -> usize {
    memmem::find(haystack, needle).unwrap_or(haystack.len())
}

/// CRC-32 of `bytes`; a pure function of content, independent of where the
/// bytes live.
pub(crate) fn content_hash(bytes: &[u8]) -> u32 {
    CRC32.checksum(bytes)
}

/// Searches for `needle` within the `[start, end)` window of `haystack`.
///
/// The bounds follow the crate-wide slicing rules: negative values count
/// from the end, out-of-range values are clamped, and out-of-order bounds
/// restrict the search to an empty window rather than failing. The returned
/// position is relative to the restricted window, with the window's length
/// as the not-found sentinel.
///
/// ```
/// let position = strview::find("abracadabra", "cad", 0, isize::MAX);
/// assert_eq!(position, 4);
/// ```
pub fn find(
    haystack: impl AsRef<[u8]>,
    needle: impl AsRef<[u8]>,
    start: isize,
    end: isize,
) -> usize {
    let haystack = haystack.as_ref();
    let (offset, len) = normalize_bounds(haystack.len(), start, end);
    substring_find(&haystack[offset..offset + len], needle.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_needle_position() {
        assert_eq!(substring_find(b"abracadabra", b"cad"), 4);
    }

    #[test]
    fn missing_needle_reports_haystack_length() {
        assert_eq!(substring_find(b"abracadabra", b"xyz"), 11);
    }

    #[test]
    fn empty_needle_found_at_zero() {
        assert_eq!(substring_find(b"abracadabra", b""), 0);
        assert_eq!(substring_find(b"", b""), 0);
    }

    #[test]
    fn needle_longer_than_haystack() {
        assert_eq!(substring_find(b"ab", b"abc"), 2);
        assert_eq!(substring_find(b"", b"a"), 0);
    }

    #[test]
    fn hash_matches_crc32_check_value() {
        // The canonical CRC-32/ISO-HDLC check value.
        assert_eq!(content_hash(b"123456789"), 0xCBF4_3926);
    }

    #[test]
    fn hash_is_content_only() {
        let heap = Vec::from(&b"hello"[..]);

        assert_eq!(content_hash(b"hello"), content_hash(&heap));
        assert_ne!(content_hash(b"hello"), content_hash(b"hello "));
        assert_eq!(content_hash(b""), 0);
    }

    #[test]
    fn find_restricts_haystack_window() {
        // Window [1, ..) hides the match at 0; position is window-relative.
        assert_eq!(find("abcabc", "abc", 0, isize::MAX), 0);
        assert_eq!(find("abcabc", "abc", 1, isize::MAX), 2);
    }

    #[test]
    fn find_clamps_bounds_instead_of_failing() {
        assert_eq!(find("hello", "lo", -100, 100), 3);
        // Out-of-order bounds mean an empty window; sentinel is 0.
        assert_eq!(find("hello", "h", 4, 2), 0);
    }
}
