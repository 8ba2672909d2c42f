//! Dynamic loader access for symbol-existence probing.
//!
//! Thin wrapper over `libloading`: open a concrete library path or the host
//! process image, ask whether a named export exists, and release the handle
//! when the wrapper drops. Nothing here ever *calls* a resolved symbol.
//!
//! # Safety
//!
//! This module uses `unsafe` for the loader calls. Soundness rests on one
//! rule: symbols are probed for presence only. The returned addresses are
//! never dereferenced or transmuted into callable types, so a library's
//! initializers running at `dlopen` time are the only foreign code executed.

#![allow(unsafe_code)]

use std::ffi::c_void;
use std::path::Path;

/// RAII handle to an opened native library or the host process image.
///
/// The underlying handle is released on drop, on every exit path. A run
/// opens and closes potentially thousands of these; leaking descriptors
/// here would exhaust the process long before a report is produced.
pub struct NativeLibrary {
    inner: libloading::Library,
}

impl NativeLibrary {
    /// Open a library for symbol probing.
    ///
    /// `None` opens the host process's own symbol table (the equivalent of
    /// `dlopen(NULL)`), used for declarations that resolve from the
    /// executable image.
    ///
    /// # Errors
    ///
    /// Returns the loader's error text when the artifact cannot be opened.
    pub fn open(path: Option<&Path>) -> Result<Self, String> {
        let inner = match path {
            Some(p) => {
                // SAFETY: opening a library runs its initializers, which is
                // the documented contract of probing an on-disk artifact the
                // harness was pointed at. No symbol is ever invoked.
                unsafe { libloading::Library::new(p) }.map_err(|e| e.to_string())?
            }
            None => libloading::os::unix::Library::this().into(),
        };
        Ok(Self { inner })
    }

    /// Whether the library exports a symbol with this exact name.
    #[must_use]
    pub fn has_symbol(&self, name: &str) -> bool {
        // SAFETY: the symbol is looked up as an opaque pointer and dropped
        // immediately; it is never dereferenced or called.
        unsafe { self.inner.get::<*const c_void>(name.as_bytes()) }.is_ok()
    }
}
