//! # String Views
//!
//! `StrView` is an immutable window into a backing store's bytes. It is the
//! public face of the crate: construction wraps any byte-range-capable
//! owner, slicing produces derived views that keep their parent alive, and
//! comparison, containment, and hashing all read through the window with
//! zero copies.
//!
//! ## Ownership Chain
//!
//! ```text
//! StrView ──owner──► Owner::View ──► StrView ──owner──► Owner::File ──► MappedFile
//!   (slice)             (Arc)        (parent)              (Arc)         (mmap)
//! ```
//!
//! Every edge is a shared reference with an atomic count. A view can be
//! sent across threads, cloned, and dropped in any order relative to its
//! siblings; the root store is released exactly when the last edge into
//! the chain disappears. The only copying operations are [`StrView::to_vec`]
//! and [`StrView::to_text`].
//!
//! ## Slicing Semantics
//!
//! All bounds go through [`normalize_bounds`]: negative indices count from
//! the end, out-of-range bounds clamp, and out-of-order bounds produce the
//! empty view. This silent-clamping behavior is the contract, not a missing
//! bounds check; only [`StrView::byte_at`] rejects bad indices.
//!
//! ## Example
//!
//! ```
//! use strview::StrView;
//!
//! let view = StrView::new(String::from("hello world"))?;
//! let word = view.slice(6, 11);
//!
//! assert_eq!(word.as_bytes(), b"world");
//! assert!(view.contains("lo w"));
//! assert_eq!(view.slice(-5, isize::MAX), word);
//! # Ok::<(), strview::Error>(())
//! ```

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::kernels;
use crate::range::ByteRange;
use crate::slice::normalize_bounds;
use crate::store::Owner;

/// An immutable, possibly-sliced window into a backing store's bytes.
///
/// Cheap to clone (two words plus an atomic increment). Equality, ordering,
/// and hashing are functions of content only, independent of which store a
/// view is rooted in.
#[derive(Debug, Clone)]
pub struct StrView {
    range: ByteRange,
    owner: Option<Owner>,
}

// SAFETY: StrView holds a raw pointer, so Send/Sync are not derived. Both
// are sound because:
// 1. The pointed-to bytes are immutable for the view's entire lifetime;
//    no operation writes through the range
// 2. The owner edge (an Arc chain ending in a Buffer, File, or the
//    canonical empty view's None) pins the allocation, and Arc's refcount
//    updates are atomic
// 3. A MappedFile cannot be closed while shared: close() needs &mut, which
//    the view's Arc denies
unsafe impl Send for StrView {}
unsafe impl Sync for StrView {}

impl StrView {
    /// The canonical empty view: zero length, no ownership edge.
    pub fn empty() -> Self {
        Self {
            range: ByteRange::empty(),
            owner: None,
        }
    }

    /// Wraps an owner's full extent. Equivalent to
    /// `with_bounds(owner, 0, isize::MAX)`.
    pub fn new(owner: impl Into<Owner>) -> Result<Self> {
        Self::with_bounds(owner, 0, isize::MAX)
    }

    /// Wraps the `[from, to)` sub-range of an owner's extent, retaining an
    /// ownership edge that keeps the owner (and its whole chain) alive.
    ///
    /// Accepts anything with the byte-range capability: an owned buffer, a
    /// [`MappedFile`](crate::MappedFile), or another view. Bounds are
    /// normalized against the owner's length; the only failure is
    /// [`Error::InvalidState`] from a mapped file that was already closed.
    pub fn with_bounds(owner: impl Into<Owner>, from: isize, to: isize) -> Result<Self> {
        let owner = owner.into();
        let full = owner.byte_range()?;
        let (offset, length) = normalize_bounds(full.len(), from, to);

        // A zero-length result is the canonical empty view and must not
        // pin the owner.
        if length == 0 {
            return Ok(Self::empty());
        }

        Ok(Self {
            range: full.narrow(offset, length),
            owner: Some(owner),
        })
    }

    /// Length of the view in bytes. O(1).
    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    pub(crate) fn range(&self) -> ByteRange {
        self.range
    }

    /// The view's bytes, borrowed for as long as the view itself.
    pub fn as_bytes(&self) -> &[u8] {
        // SAFETY: the range was carved out of the owner's extent at
        // construction time and the allocation is still alive because:
        // 1. self.owner pins the store (or parent chain) via Arc for at
        //    least the lifetime of self, which bounds the returned slice
        // 2. when self.owner is None the range is the canonical empty
        //    range, which as_slice never dereferences
        // 3. no store variant can mutate or release its bytes while shared
        unsafe { self.range.as_slice() }
    }

    /// The byte at position `index`; negative indices count from the end.
    pub fn byte_at(&self, index: isize) -> Result<u8> {
        let length = self.len();
        let adjusted = if index < 0 {
            index.saturating_add(length as isize)
        } else {
            index
        };

        if adjusted < 0 || adjusted as usize >= length {
            return Err(Error::IndexOutOfRange { index, length });
        }

        Ok(self.as_bytes()[adjusted as usize])
    }

    /// Returns the `[from, to)` sub-view as a derived view that keeps
    /// `self`'s chain alive.
    ///
    /// Bounds are normalized against *this* view's length, not the root
    /// store's; out-of-order or out-of-range bounds yield the empty view,
    /// which carries no ownership edge.
    pub fn slice(&self, from: isize, to: isize) -> StrView {
        let (offset, length) = normalize_bounds(self.len(), from, to);

        if length == 0 {
            return StrView::empty();
        }

        StrView {
            range: self.range.narrow(offset, length),
            owner: Some(self.derived_owner()),
        }
    }

    /// The ownership edge for a view derived from `self`. Re-slicing an
    /// already-derived view shares the ancestor edge instead of adding a
    /// chain node per slice, so chains stay shallow and dropping one never
    /// recurses; the narrowed range still lies within the ancestor's
    /// extent.
    fn derived_owner(&self) -> Owner {
        match &self.owner {
            Some(Owner::View(ancestor)) => Owner::View(Arc::clone(ancestor)),
            _ => Owner::View(Arc::new(self.clone())),
        }
    }

    /// Like [`slice`](Self::slice), but with an explicit step. Only
    /// contiguous slices can share storage, so any `step != 1` is rejected
    /// with [`Error::UnsupportedStep`].
    pub fn slice_step(&self, from: isize, to: isize, step: isize) -> Result<StrView> {
        if step != 1 {
            return Err(Error::UnsupportedStep(step));
        }
        Ok(self.slice(from, to))
    }

    /// Whether `needle` occurs anywhere in the view.
    ///
    /// The search kernel reports "not found" as a position equal to the
    /// haystack length. An empty needle is found at every position,
    /// including in the empty view.
    pub fn contains(&self, needle: impl AsRef<[u8]>) -> bool {
        let needle = needle.as_ref();
        needle.is_empty() || kernels::substring_find(self.as_bytes(), needle) < self.len()
    }

    /// Position of the first occurrence of `needle`, if any.
    pub fn find(&self, needle: impl AsRef<[u8]>) -> Option<usize> {
        let needle = needle.as_ref();
        if needle.is_empty() {
            return Some(0);
        }
        let position = kernels::substring_find(self.as_bytes(), needle);
        (position < self.len()).then_some(position)
    }

    /// Bytewise lexicographic comparison: the common prefix decides, and on
    /// an equal prefix the shorter side sorts first.
    pub fn compare(&self, other: impl AsRef<[u8]>) -> Ordering {
        self.as_bytes().cmp(other.as_ref())
    }

    /// CRC-32 of the view's content. A pure function of the bytes: two
    /// views over equal content hash identically no matter which store
    /// backs them.
    pub fn content_hash(&self) -> u32 {
        kernels::content_hash(self.as_bytes())
    }

    /// Copies the view's bytes into an owned vector, decoupling them from
    /// the owner's lifetime.
    pub fn to_vec(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }

    /// Copies the view's bytes into an owned `String`, replacing invalid
    /// UTF-8 sequences with the replacement character.
    pub fn to_text(&self) -> String {
        String::from_utf8_lossy(self.as_bytes()).into_owned()
    }
}

impl Default for StrView {
    fn default() -> Self {
        Self::empty()
    }
}

impl AsRef<[u8]> for StrView {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Display for StrView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match String::from_utf8_lossy(self.as_bytes()) {
            Cow::Borrowed(text) => f.write_str(text),
            Cow::Owned(text) => f.write_str(&text),
        }
    }
}

impl PartialEq for StrView {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for StrView {}

impl PartialEq<[u8]> for StrView {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_bytes() == other
    }
}

impl PartialEq<&[u8]> for StrView {
    fn eq(&self, other: &&[u8]) -> bool {
        self.as_bytes() == *other
    }
}

impl PartialEq<str> for StrView {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<&str> for StrView {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialOrd for StrView {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for StrView {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl Hash for StrView {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Content-only, to stay consistent with Eq.
        self.as_bytes().hash(state);
    }
}
