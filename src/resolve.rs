//! Mapping logical library identifiers to loadable artifacts.
//!
//! Binding declarations name their target library by a logical identifier,
//! not a path. Most identifiers go through a generic search-path lookup,
//! but a handful are special-cased: the host-image sentinel, the optional
//! runtime shims whose presence depends on the link mode, and a couple of
//! identifiers known to be merged into the executable or to not exist as
//! standalone artifacts at all.

use crate::error::{Error, Result};
use std::fmt;
use std::path::{Path, PathBuf};

/// Identifier meaning "resolve from the current executable image".
pub const HOST_IMAGE: &str = "__Internal";

/// Alias for the low-level C runtime, left unqualified by some bindings.
pub const C_RUNTIME_ALIAS: &str = "libc";

/// Globalization shim, statically merged into the executable.
pub const GLOBALIZATION_SHIM: &str = "libSystem.Globalization.Native";

/// Host-policy shim; no standalone library artifact exists for it.
pub const HOSTPOLICY_SHIM: &str = "libhostpolicy";

/// System-native shim shipped with a bare name, missing its suffix.
pub const SYSTEM_NATIVE_SHIM: &str = "libSystem.Native";

/// Optional runtime shims whose handling depends on the link mode.
pub const LINK_MODE_SHIMS: &[&str] = &[
    "System.Native",
    "System.Security.Cryptography.Native.Apple",
    "System.Net.Security.Native",
];

/// Platform shared-library suffix.
#[cfg(target_os = "macos")]
pub const SHARED_LIB_SUFFIX: &str = ".dylib";
/// Platform shared-library suffix.
#[cfg(not(target_os = "macos"))]
pub const SHARED_LIB_SUFFIX: &str = ".so";

#[cfg(target_os = "macos")]
const C_RUNTIME_CANDIDATES: &[&str] = &["/usr/lib/libSystem.dylib"];
#[cfg(not(target_os = "macos"))]
const C_RUNTIME_CANDIDATES: &[&str] = &[
    "/lib/x86_64-linux-gnu/libc.so.6",
    "/lib/aarch64-linux-gnu/libc.so.6",
    "/usr/lib/libc.so.6",
    "/lib/libc.so.6",
];

#[cfg(target_os = "macos")]
const DEFAULT_SEARCH_PATHS: &[&str] = &["/usr/lib", "/usr/local/lib"];
#[cfg(not(target_os = "macos"))]
const DEFAULT_SEARCH_PATHS: &[&str] = &[
    "/lib",
    "/usr/lib",
    "/lib/x86_64-linux-gnu",
    "/usr/lib/x86_64-linux-gnu",
    "/lib/aarch64-linux-gnu",
    "/usr/lib/aarch64-linux-gnu",
];

/// How optional native shims were linked into the product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkMode {
    /// Shims absent entirely; declarations targeting them are skipped.
    #[default]
    None,
    /// Shims statically merged into the executable.
    Static,
    /// Shims shipped as standalone dynamic libraries.
    Dynamic,
}

/// Why a declaration was excluded at resolution time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Link mode is `None`: the shim was never built into the product.
    LinkModeNone,
    /// The identifier names a library known to have no standalone artifact.
    NoStandaloneArtifact,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LinkModeNone => write!(f, "shim not linked (link mode none)"),
            Self::NoStandaloneArtifact => write!(f, "no standalone library artifact"),
        }
    }
}

/// Outcome of resolving a logical library identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Look the symbol up in the host process image.
    Host,
    /// Load this concrete library path.
    Path(PathBuf),
    /// The declaration is excluded, not failed.
    Skip(SkipReason),
}

/// Resolves logical library identifiers to loadable artifacts.
///
/// Recomputed per run; nothing is cached across runs.
#[derive(Debug, Clone)]
pub struct LibraryResolver {
    link_mode: LinkMode,
    search_paths: Vec<PathBuf>,
}

impl Default for LibraryResolver {
    fn default() -> Self {
        Self::new(LinkMode::default())
    }
}

impl LibraryResolver {
    /// Create a resolver with the platform's default search paths.
    #[must_use]
    pub fn new(link_mode: LinkMode) -> Self {
        Self {
            link_mode,
            search_paths: DEFAULT_SEARCH_PATHS.iter().map(PathBuf::from).collect(),
        }
    }

    /// Prepend a directory to the search path list.
    #[must_use]
    pub fn with_search_path(mut self, dir: impl Into<PathBuf>) -> Self {
        self.search_paths.insert(0, dir.into());
        self
    }

    /// Replace the search path list entirely.
    #[must_use]
    pub fn with_search_paths(mut self, dirs: Vec<PathBuf>) -> Self {
        self.search_paths = dirs;
        self
    }

    /// The configured link mode.
    #[must_use]
    pub const fn link_mode(&self) -> LinkMode {
        self.link_mode
    }

    /// Map a logical library identifier to a loadable artifact.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LibraryNotFound`] when the generic lookup cannot
    /// produce an absolute path. That is a hard finding for the declaration,
    /// not a skip: resolution must never silently hand back an unusable path.
    pub fn resolve(&self, library: &str) -> Result<Resolution> {
        match library {
            HOST_IMAGE => Ok(Resolution::Host),
            shim if LINK_MODE_SHIMS.contains(&shim) => match self.link_mode {
                LinkMode::None => Ok(Resolution::Skip(SkipReason::LinkModeNone)),
                // Statically merged or co-shipped: present in the host image.
                LinkMode::Static | LinkMode::Dynamic => Ok(Resolution::Host),
            },
            // Workaround for bindings that never fully qualified the C
            // runtime import.
            C_RUNTIME_ALIAS => Ok(Resolution::Path(c_runtime_path())),
            GLOBALIZATION_SHIM => Ok(Resolution::Host),
            HOSTPOLICY_SHIM => Ok(Resolution::Skip(SkipReason::NoStandaloneArtifact)),
            SYSTEM_NATIVE_SHIM => self.find_library(&format!("{library}{SHARED_LIB_SUFFIX}")),
            other => self.find_library(other),
        }
    }

    /// Generic lookup: search the configured directories for the named
    /// library, requiring a fully qualified result.
    fn find_library(&self, name: &str) -> Result<Resolution> {
        let direct = Path::new(name);
        if direct.is_absolute() {
            if direct.exists() {
                return Ok(Resolution::Path(direct.to_path_buf()));
            }
            return Err(Error::library_not_found(name));
        }

        for dir in &self.search_paths {
            let exact = dir.join(name);
            if exact.is_absolute() && exact.exists() {
                return Ok(Resolution::Path(exact));
            }
            let suffixed = dir.join(format!("{name}{SHARED_LIB_SUFFIX}"));
            if suffixed.is_absolute() && suffixed.exists() {
                return Ok(Resolution::Path(suffixed));
            }
        }
        Err(Error::library_not_found(name))
    }
}

/// Well-known absolute path of the C runtime library.
fn c_runtime_path() -> PathBuf {
    C_RUNTIME_CANDIDATES
        .iter()
        .map(PathBuf::from)
        .find(|p| p.exists())
        .unwrap_or_else(|| PathBuf::from(C_RUNTIME_CANDIDATES[0]))
}
