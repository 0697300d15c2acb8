//! # Memory-Mapped File Backing Store
//!
//! `MappedFile` maps a file read-only into the address space and exposes
//! its full on-disk extent as a byte range, unmodified. It is the backing
//! store behind views over large files: reads go straight through the OS
//! page cache with no user-space copy.
//!
//! ## Resource Lifecycle
//!
//! ```text
//! open(path) ──► Mapped ──close()──► Closed
//!                  │
//!                  └── zero-length file ──► Empty (no OS mapping exists)
//! ```
//!
//! The mapping is released exactly once, either by an explicit `close()` or
//! by `Drop`, whichever comes first; the other path is a no-op. A failure
//! inside `open` releases everything acquired so far before the error is
//! returned (the file handle closes on every early return, and no mapping
//! outlives a failed attempt).
//!
//! ## Platform Behavior
//!
//! `memmap2` normalizes the two platform stacks behind one type:
//!
//! - **Linux/macOS**: `open` + `fstat` + `mmap(PROT_READ, MAP_SHARED)`;
//!   the established mapping keeps its pages after the descriptor closes,
//!   so the descriptor is released as soon as `open` returns.
//! - **Windows**: `CreateFile` + `CreateFileMapping` + `MapViewOfFile`,
//!   with the handles owned by the mapping object until unmap.
//!
//! Both surface the identical success shape and error taxonomy here.
//!
//! ## Close Versus Sharing
//!
//! `close()` takes `&mut self`. Views hold the file through an `Arc`, so a
//! mapping that any view still references cannot be closed; the borrow
//! checker and the refcount together make use-after-unmap unrepresentable.
//! `as_bytes()` still guards the closed state defensively.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use memmap2::Mmap;

use crate::error::{Error, Result};
use crate::range::ByteRange;

/// A read-only memory mapping of a file, usable as a view backing store.
#[derive(Debug)]
pub struct MappedFile {
    path: PathBuf,
    state: MapState,
}

#[derive(Debug)]
enum MapState {
    /// Live mapping over a non-empty file.
    Mapped(Mmap),
    /// The file was zero bytes long; there is nothing to map.
    Empty,
    /// `close()` has run; the mapping is gone.
    Closed,
}

impl MappedFile {
    /// Opens `path` and maps its full extent read-only.
    ///
    /// Fails with [`Error::NotFound`] if the path does not exist,
    /// [`Error::Io`] if it cannot be opened or sized, and
    /// [`Error::MapFailed`] if the OS mapping call fails. No OS resource
    /// survives a failed attempt.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                Error::NotFound(path.to_path_buf())
            } else {
                Error::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let metadata = file.metadata().map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

        // mmap of a zero-length extent is an OS-level error, not a caller
        // error. Model the empty file as a mapping-free store instead.
        if metadata.len() == 0 {
            return Ok(Self {
                path: path.to_path_buf(),
                state: MapState::Empty,
            });
        }

        // SAFETY: Mmap::map is unsafe because the mapped memory changes if
        // another process modifies the file underneath us. This is safe
        // because:
        // 1. The mapping is read-only (PROT_READ); this process never
        //    writes through it
        // 2. The store contract requires callers not to truncate or
        //    rewrite files they have handed to a view
        // 3. The mmap lifetime is tied to MappedFile, and close() requires
        //    exclusive access, so no byte range can outlive the mapping
        let map = unsafe { Mmap::map(&file) }.map_err(|source| Error::MapFailed {
            path: path.to_path_buf(),
            source,
        })?;

        // `file` drops here; on POSIX the mapping holds the pages without
        // the descriptor, and on Windows memmap2's mapping object owns the
        // handles it still needs.
        Ok(Self {
            path: path.to_path_buf(),
            state: MapState::Mapped(map),
        })
    }

    /// Length in bytes of the mapped extent; zero after `close()`.
    pub fn len(&self) -> usize {
        match &self.state {
            MapState::Mapped(map) => map.len(),
            MapState::Empty | MapState::Closed => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether `close()` has already run.
    pub fn is_closed(&self) -> bool {
        matches!(self.state, MapState::Closed)
    }

    /// Unmaps the file and releases its OS resources. Idempotent: calling
    /// this twice, or letting `Drop` run afterwards, does nothing further.
    pub fn close(&mut self) {
        // Replacing the state drops the Mmap, which performs the single
        // munmap / UnmapViewOfFile + CloseHandle.
        self.state = MapState::Closed;
    }

    /// The full mapped extent.
    ///
    /// Fails with [`Error::InvalidState`] after `close()`. Unreachable
    /// through a live ownership edge, since closing requires exclusive
    /// access to the store.
    pub fn as_bytes(&self) -> Result<&[u8]> {
        match &self.state {
            MapState::Mapped(map) => Ok(&map[..]),
            MapState::Empty => Ok(&[]),
            MapState::Closed => Err(Error::InvalidState),
        }
    }

    pub(crate) fn byte_range(&self) -> Result<ByteRange> {
        Ok(ByteRange::new(self.as_bytes()?))
    }

    /// Hints the OS to fault in `[offset, offset + len)` ahead of access.
    /// Bounds are clamped to the mapped extent; a no-op on non-Unix
    /// platforms and on empty or closed stores.
    pub fn prefetch(&self, offset: usize, len: usize) {
        let MapState::Mapped(map) = &self.state else {
            return;
        };
        if offset >= map.len() {
            return;
        }
        let len = len.min(map.len() - offset);
        if len == 0 {
            return;
        }

        #[cfg(unix)]
        // SAFETY: madvise with MADV_WILLNEED is an advisory call over a
        // live region. This is safe because:
        // 1. offset < map.len(), checked above
        // 2. len is clamped so offset + len never exceeds the mapping
        // 3. the mapping is alive for the duration of the call (we hold
        //    &self and the state is Mapped)
        unsafe {
            libc::madvise(
                map.as_ptr().add(offset) as *mut libc::c_void,
                len,
                libc::MADV_WILLNEED,
            );
        }

        #[cfg(not(unix))]
        let _ = len;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn open_exposes_file_bytes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.txt");
        fs::write(&path, b"hello world").unwrap();

        let file = MappedFile::open(&path).unwrap();

        assert_eq!(file.len(), 11);
        assert_eq!(file.as_bytes().unwrap(), b"hello world");
        assert_eq!(file.path(), path.as_path());
    }

    #[test]
    fn open_missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.txt");

        let err = MappedFile::open(&path).unwrap_err();

        assert!(matches!(err, Error::NotFound(p) if p == path));
    }

    #[test]
    fn empty_file_maps_to_empty_extent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        fs::write(&path, b"").unwrap();

        let file = MappedFile::open(&path).unwrap();

        assert!(file.is_empty());
        assert_eq!(file.as_bytes().unwrap(), &[] as &[u8]);
    }

    #[test]
    fn close_is_idempotent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.txt");
        fs::write(&path, b"abc").unwrap();

        let mut file = MappedFile::open(&path).unwrap();
        file.close();
        file.close();

        assert!(file.is_closed());
        assert_eq!(file.len(), 0);
    }

    #[test]
    fn access_after_close_is_invalid_state() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.txt");
        fs::write(&path, b"abc").unwrap();

        let mut file = MappedFile::open(&path).unwrap();
        file.close();

        assert!(matches!(file.as_bytes(), Err(Error::InvalidState)));
    }

    #[test]
    fn prefetch_clamps_out_of_range_hints() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.txt");
        fs::write(&path, b"hello world").unwrap();

        let file = MappedFile::open(&path).unwrap();

        file.prefetch(0, usize::MAX);
        file.prefetch(100, 5);
        file.prefetch(5, 0);

        assert_eq!(file.as_bytes().unwrap(), b"hello world");
    }

    #[test]
    fn mapping_reflects_on_disk_bytes_unmodified() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bin.dat");
        let payload: Vec<u8> = (0u8..=255).collect();
        fs::write(&path, &payload).unwrap();

        let file = MappedFile::open(&path).unwrap();

        assert_eq!(file.as_bytes().unwrap(), payload.as_slice());
    }
}
