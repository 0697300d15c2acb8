//! # Backing Stores
//!
//! A backing store is anything that owns (or co-owns) memory and can expose
//! a contiguous immutable byte range into it. Views never own bytes
//! directly; they hold an ownership edge to one of the store variants here,
//! and the store guarantees the bytes stay put for as long as that edge is
//! held.
//!
//! ## Store Variants
//!
//! | Variant | Owns | Released when |
//! |---------|------|---------------|
//! | `Owner::Buffer` | a caller-supplied allocation ([`ByteOwner`]) | last `Arc` clone drops |
//! | `Owner::File` | an OS file mapping ([`MappedFile`]) | last clone drops or explicit `close()` |
//! | `Owner::View` | a parent [`StrView`](crate::view::StrView) | last clone drops, releasing the parent's own edge |
//!
//! Every edge is an `Arc`, so refcount traffic is atomic and a chain of
//! derived views keeps its root store alive transitively. Dropping an
//! `Owner` performs no OS action except when it is the last reference to a
//! mapped file, at which point the mapping is unmapped exactly once.
//!
//! ## The Byte-Range Capability
//!
//! The original runtime dispatched on the concrete type of whatever was
//! passed as a view's parent. Here that is a closed capability: anything
//! convertible `Into<Owner>` can back a view, and a type without the
//! capability is rejected at compile time rather than at run time.

pub mod mmap;

use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::range::ByteRange;
use crate::view::StrView;

pub use mmap::MappedFile;

/// The capability an owned buffer needs to back a view: expose a stable
/// immutable byte slice for as long as the value is alive.
///
/// Implementations must not move or mutate the underlying bytes while
/// shared; every provided implementation is an immutable allocation whose
/// pointer is stable under `Arc`.
pub trait ByteOwner: Send + Sync + 'static {
    fn as_bytes(&self) -> &[u8];
}

impl ByteOwner for Vec<u8> {
    fn as_bytes(&self) -> &[u8] {
        self
    }
}

impl ByteOwner for String {
    fn as_bytes(&self) -> &[u8] {
        self.as_str().as_bytes()
    }
}

impl ByteOwner for Box<[u8]> {
    fn as_bytes(&self) -> &[u8] {
        self
    }
}

impl ByteOwner for &'static [u8] {
    fn as_bytes(&self) -> &[u8] {
        self
    }
}

impl ByteOwner for &'static str {
    fn as_bytes(&self) -> &[u8] {
        str::as_bytes(self)
    }
}

impl ByteOwner for Arc<[u8]> {
    fn as_bytes(&self) -> &[u8] {
        self
    }
}

/// An ownership edge from a view to the memory backing it.
///
/// Cloning bumps the underlying atomic refcount; the store (and, through
/// parent views, the whole chain back to a root owner) cannot be torn down
/// while any clone is alive.
#[derive(Clone)]
pub enum Owner {
    /// Shares ownership of a caller-supplied allocation.
    Buffer(Arc<dyn ByteOwner>),
    /// Shares ownership of a read-only file mapping.
    File(Arc<MappedFile>),
    /// Keeps a parent view (and therefore its own chain) alive.
    View(Arc<StrView>),
}

impl Owner {
    /// Wraps a caller-supplied allocation, taking (shared) ownership of it.
    pub fn buffer(owner: impl ByteOwner) -> Self {
        Owner::Buffer(Arc::new(owner))
    }

    /// Shares ownership of an allocation the caller also retains.
    pub fn shared<T: ByteOwner>(owner: Arc<T>) -> Self {
        Owner::Buffer(owner)
    }

    /// Exposes the store's full extent as a byte range.
    ///
    /// Only a closed mapped file can fail here, with
    /// [`Error::InvalidState`](crate::Error::InvalidState); that state is
    /// unreachable while the edge exists, but guarded regardless.
    pub(crate) fn byte_range(&self) -> Result<ByteRange> {
        match self {
            Owner::Buffer(buffer) => Ok(ByteRange::new(buffer.as_bytes())),
            Owner::File(file) => file.byte_range(),
            Owner::View(view) => Ok(view.range()),
        }
    }
}

impl fmt::Debug for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Owner::Buffer(buffer) => f
                .debug_struct("Owner::Buffer")
                .field("len", &buffer.as_bytes().len())
                .finish(),
            Owner::File(file) => f
                .debug_struct("Owner::File")
                .field("path", &file.path())
                .finish(),
            Owner::View(view) => f
                .debug_struct("Owner::View")
                .field("len", &view.len())
                .finish(),
        }
    }
}

impl From<Vec<u8>> for Owner {
    fn from(owner: Vec<u8>) -> Self {
        Owner::buffer(owner)
    }
}

impl From<String> for Owner {
    fn from(owner: String) -> Self {
        Owner::buffer(owner)
    }
}

impl From<Box<[u8]>> for Owner {
    fn from(owner: Box<[u8]>) -> Self {
        Owner::buffer(owner)
    }
}

impl From<&'static [u8]> for Owner {
    fn from(owner: &'static [u8]) -> Self {
        Owner::buffer(owner)
    }
}

impl From<&'static str> for Owner {
    fn from(owner: &'static str) -> Self {
        Owner::buffer(owner)
    }
}

impl From<Arc<[u8]>> for Owner {
    fn from(owner: Arc<[u8]>) -> Self {
        Owner::buffer(owner)
    }
}

impl From<Arc<dyn ByteOwner>> for Owner {
    fn from(owner: Arc<dyn ByteOwner>) -> Self {
        Owner::Buffer(owner)
    }
}

impl From<MappedFile> for Owner {
    fn from(file: MappedFile) -> Self {
        Owner::File(Arc::new(file))
    }
}

impl From<Arc<MappedFile>> for Owner {
    fn from(file: Arc<MappedFile>) -> Self {
        Owner::File(file)
    }
}

impl From<StrView> for Owner {
    fn from(view: StrView) -> Self {
        Owner::View(Arc::new(view))
    }
}

impl From<&StrView> for Owner {
    fn from(view: &StrView) -> Self {
        Owner::View(Arc::new(view.clone()))
    }
}

impl From<Arc<StrView>> for Owner {
    fn from(view: Arc<StrView>) -> Self {
        Owner::View(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_owner_exposes_full_extent() {
        let owner = Owner::from(Vec::from(&b"hello"[..]));

        let range = owner.byte_range().unwrap();

        assert_eq!(range.len(), 5);
    }

    #[test]
    fn shared_buffer_is_not_copied() {
        let buffer: Arc<dyn ByteOwner> = Arc::new(String::from("shared"));
        let owner = Owner::from(Arc::clone(&buffer));

        let range = owner.byte_range().unwrap();

        // The range points into the very allocation the caller retains.
        assert_eq!(
            unsafe { range.as_slice() }.as_ptr(),
            buffer.as_bytes().as_ptr()
        );
    }

    #[test]
    fn arc_slice_owner_is_not_copied() {
        let buffer: Arc<[u8]> = Arc::from(&b"arc slice"[..]);
        let owner = Owner::from(Arc::clone(&buffer));

        let range = owner.byte_range().unwrap();

        // The range points into the caller's shared allocation.
        assert_eq!(unsafe { range.as_slice() }, &b"arc slice"[..]);
        assert_eq!(unsafe { range.as_slice() }.as_ptr(), buffer.as_ptr());
    }

    #[test]
    fn clones_share_one_refcount() {
        let buffer: Arc<dyn ByteOwner> = Arc::new(Vec::from(&b"refs"[..]));
        let owner = Owner::from(Arc::clone(&buffer));

        let clone = owner.clone();
        drop(owner);

        // Caller's arc + the surviving clone.
        assert_eq!(Arc::strong_count(&buffer), 2);
        assert_eq!(clone.byte_range().unwrap().len(), 4);
    }
}
