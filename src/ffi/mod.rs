//! FFI Quarantine Zone - All unsafe code isolated here.
//!
//! # Safety Architecture
//!
//! This module contains ALL unsafe code in the sonda crate. The public API
//! in `src/lib.rs` uses `#![deny(unsafe_code)]`, ensuring no unsafe code
//! can leak into the user-facing interface.
//!
//! ## Safety Rules
//!
//! - Every `unsafe` block has a `// SAFETY:` comment
//! - No raw pointers escape the FFI module
//! - Symbols are only probed for presence, never invoked
//! - Every opened library handle is released on drop, on every exit path
//!
//! # Module Structure
//!
//! ```text
//! ffi/
//! ├── mod.rs          # This file - module router
//! └── dyld.rs         # Dynamic loader access (dlopen/dlsym via libloading)
//! ```

// Allow unsafe in this module only - quarantine zone
#![allow(unsafe_code)]

#[cfg(unix)]
pub mod dyld;

// Stub module for non-unix platforms
#[cfg(not(unix))]
pub mod dyld {
    //! Stub dynamic-loader module for platforms without dlopen.

    use std::path::Path;

    /// Stub library handle.
    pub struct NativeLibrary;

    impl NativeLibrary {
        /// Stub: loading always fails on unsupported platforms.
        pub fn open(_path: Option<&Path>) -> Result<Self, String> {
            Err("dynamic symbol lookup is not supported on this platform".to_owned())
        }

        /// Stub: no symbol is ever present.
        #[must_use]
        pub fn has_symbol(&self, _name: &str) -> bool {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_module_compiles() {
        // Verifies the module structure is correct on every platform
        let result = super::dyld::NativeLibrary::open(None);
        drop(result);
    }
}
