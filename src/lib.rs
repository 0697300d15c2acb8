//! # strview - Zero-Copy String Views
//!
//! `strview` layers immutable string views over heterogeneous backing
//! storage: caller-owned buffers, read-only memory-mapped files, or other
//! views. Slicing, bytewise comparison, hashing, and substring containment
//! all operate directly on the backing bytes; the only copying operations
//! are the explicit `to_vec` / `to_text` conversions.
//!
//! ## Quick Start
//!
//! ```no_run
//! use strview::{MappedFile, StrView};
//!
//! let file = MappedFile::open("corpus.txt")?;
//! let text = StrView::new(file)?;
//!
//! let head = text.slice(0, 1024);
//! if head.contains("needle") {
//!     println!("{}", head.slice(0, 64));
//! }
//! # Ok::<(), strview::Error>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │        StrView (slice/compare/          │
//! │         contains/hash/byte_at)          │
//! ├──────────────────┬──────────────────────┤
//! │  Slice Normalizer│  Kernel glue         │
//! │  (bounds clamp)  │  (memmem, CRC-32)    │
//! ├──────────────────┴──────────────────────┤
//! │   Owner (Buffer │ File │ parent View)   │
//! ├─────────────────────────────────────────┤
//! │   ByteRange     │     MappedFile        │
//! │   (ptr, len)    │     (memmap2)         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! Ownership flows upward: a view holds an `Arc` edge to its owner, a
//! derived view holds its parent, and the chain pins the root store (a
//! buffer allocation or a file mapping) until the last view drops. No view
//! is ever outlived by the memory it points into.
//!
//! ## Slicing Contract
//!
//! Bounds behave like Python slices by design: negative indices count from
//! the end, out-of-range values clamp silently, and `start > end` yields
//! the empty view rather than an error. Only single-byte access
//! (`byte_at`) and non-unit slice steps report errors.
//!
//! ## Module Overview
//!
//! - [`view`]: `StrView`, the immutable window type and its operations
//! - [`store`]: backing stores and the `ByteOwner` capability
//! - [`store::mmap`]: read-only file mapping (`MappedFile`)
//! - [`range`]: the raw `(pointer, length)` span primitive
//! - [`slice`]: the shared bounds normalizer
//! - [`kernels`]: glue to the substring-search and CRC-32 hash kernels,
//!   plus the standalone [`find`] entry point
//! - [`error`]: the crate's error taxonomy
//!
//! ## Thread Safety
//!
//! Views are `Send + Sync`: content is immutable and every ownership edge
//! is an `Arc`. Mapped files may be read through any number of views
//! concurrently; closing one requires exclusive access, so a mapping can
//! never be torn down under a live reader.

pub mod error;
pub mod kernels;
pub mod range;
pub mod slice;
pub mod store;
pub mod view;

pub use error::{Error, Result};
pub use kernels::find;
pub use range::ByteRange;
pub use slice::normalize_bounds;
pub use store::{ByteOwner, MappedFile, Owner};
pub use view::StrView;
