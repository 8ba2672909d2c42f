//! Exclusion rules applied before any resolution work.
//!
//! A [`SkipPolicy`] is a pure predicate set: evaluating it has no side
//! effects and does not touch the filesystem or any library handle, so skip
//! decisions can be made eagerly while filtering the manifest.

use crate::declaration::{Declaration, OsVersion, Platform};
use std::collections::BTreeSet;

/// Declarations and libraries excluded from checking.
///
/// Mirrors the four exclusion axes recognized by the harness: owning type,
/// method, symbol name, and library name, plus availability gating against
/// a target platform/version.
#[derive(Debug, Clone, Default)]
pub struct SkipPolicy {
    types: BTreeSet<String>,
    methods: BTreeSet<String>,
    symbols: BTreeSet<String>,
    libraries: BTreeSet<String>,
    target: Option<(Platform, OsVersion)>,
}

impl SkipPolicy {
    /// An empty policy that skips nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Exclude every declaration on the named owning type.
    #[must_use]
    pub fn skip_type(mut self, owning_type: impl Into<String>) -> Self {
        self.types.insert(owning_type.into());
        self
    }

    /// Exclude a single method, keyed as `Type.method`.
    #[must_use]
    pub fn skip_method(mut self, owning_type: &str, method: &str) -> Self {
        self.methods.insert(format!("{owning_type}.{method}"));
        self
    }

    /// Exclude a symbol name from symbol-existence checks.
    #[must_use]
    pub fn skip_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbols.insert(symbol.into());
        self
    }

    /// Exclude a library name from symbol-existence checks.
    #[must_use]
    pub fn skip_library(mut self, library: impl Into<String>) -> Self {
        self.libraries.insert(library.into());
        self
    }

    /// Gate declarations by availability against a target platform/version.
    #[must_use]
    pub const fn with_target(mut self, platform: Platform, version: OsVersion) -> Self {
        self.target = Some((platform, version));
        self
    }

    /// Whether a declaration is excluded by type, method, or availability.
    ///
    /// This is the filter the extractor applies eagerly: excluded entries
    /// never appear in the filtered declaration sequence.
    #[must_use]
    pub fn skips_declaration(&self, decl: &Declaration) -> bool {
        if self.types.contains(&decl.owning_type) {
            return true;
        }
        if self
            .methods
            .contains(&format!("{}.{}", decl.owning_type, decl.method))
        {
            return true;
        }
        if let Some((platform, version)) = self.target {
            if !decl.availability.permits(platform, version) {
                return true;
            }
        }
        false
    }

    /// Whether a symbol name is excluded from lookup.
    #[must_use]
    pub fn skips_symbol(&self, symbol: &str) -> bool {
        self.symbols.contains(symbol)
    }

    /// Whether a library name is excluded from lookup.
    #[must_use]
    pub fn skips_library(&self, library: &str) -> bool {
        self.libraries.contains(library)
    }
}
