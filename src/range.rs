//! # Byte Range Primitive
//!
//! A `ByteRange` is a plain (pointer, length) pair with no ownership
//! semantics. It is the primitive every other component is built on: a
//! backing store exposes one, a view narrows one, the kernels read through
//! one. Lifetime management lives entirely in [`crate::store::Owner`] and
//! [`crate::view::StrView`]; a bare `ByteRange` must never outlive the
//! allocation it points into.

use std::ptr::NonNull;
use std::slice;

/// An immutable contiguous span of bytes, described by address and length.
///
/// `len == 0` is always valid and the pointer is never dereferenced in that
/// case.
#[derive(Debug, Clone, Copy)]
pub struct ByteRange {
    ptr: *const u8,
    len: usize,
}

impl ByteRange {
    /// The canonical empty range. Uses a dangling (non-null, never
    /// dereferenced) pointer.
    pub fn empty() -> Self {
        Self {
            ptr: NonNull::dangling().as_ptr(),
            len: 0,
        }
    }

    /// Captures the address span of `bytes`. The caller is responsible for
    /// keeping the allocation behind `bytes` alive for as long as the range
    /// is read through.
    pub fn new(bytes: &[u8]) -> Self {
        Self {
            ptr: bytes.as_ptr(),
            len: bytes.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the sub-range `[offset, offset + len)` of this range.
    ///
    /// Callers must pass already-normalized bounds; this is enforced in
    /// debug builds only because every call site goes through
    /// [`crate::slice::normalize_bounds`] first.
    pub fn narrow(&self, offset: usize, len: usize) -> Self {
        debug_assert!(offset <= self.len);
        debug_assert!(offset + len <= self.len);

        if len == 0 {
            return Self::empty();
        }

        // SAFETY: pointer arithmetic stays within the span this range was
        // constructed over, because:
        // 1. offset <= self.len, checked above in debug builds and
        //    guaranteed by normalize_bounds at every call site
        // 2. the result's extent offset + len does not exceed self.len
        // 3. len > 0 here, so self.ptr is a live allocation pointer, not
        //    the dangling empty-range pointer
        let ptr = unsafe { self.ptr.add(offset) };
        Self { ptr, len }
    }

    /// Reconstructs the byte slice this range describes.
    ///
    /// # Safety
    ///
    /// The caller must guarantee the allocation containing the span is
    /// still alive and unmodified for the duration of `'a`. A zero-length
    /// range is always safe: the pointer is not touched.
    pub unsafe fn as_slice<'a>(&self) -> &'a [u8] {
        if self.len == 0 {
            return &[];
        }
        slice::from_raw_parts(self.ptr, self.len)
    }
}
