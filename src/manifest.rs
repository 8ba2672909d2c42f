//! Declaration extraction from a binding manifest.
//!
//! The binding generator dumps one JSON manifest per compiled assembly,
//! listing every method that carries a native-call marker (non-public and
//! public static methods only). Reading that dump up front into a flat
//! [`Declaration`] list decouples extraction from validation: every check
//! can be exercised against synthetic fixtures without a compiled artifact.
//!
//! Ordering follows the manifest exactly, which in turn follows the
//! assembly's internal type/method enumeration order. Nothing here re-sorts.
//!
//! # Manifest format
//!
//! ```json
//! {
//!   "assembly": "GameController",
//!   "declarations": [
//!     {
//!       "owning_type": "GameController.GCController",
//!       "method": "GCControllerStartWirelessDiscovery",
//!       "library": "__Internal",
//!       "params": [
//!         { "name": "handle", "shape": { "kind": "pointer", "name": "GCController" } }
//!       ],
//!       "return_type": { "kind": "void" },
//!       "availability": { "platforms": ["ios", "tvos"], "introduced": { "major": 7, "minor": 0 } }
//!     }
//!   ]
//! }
//! ```

use crate::declaration::Declaration;
use crate::error::{Error, Result};
use crate::skip::SkipPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// A parsed declaration manifest for one assembly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Name of the assembly the declarations were extracted from.
    pub assembly: String,
    /// All native-call declarations, in assembly enumeration order.
    pub declarations: Vec<Declaration>,
}

impl Manifest {
    /// Parse a manifest from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Manifest`] if the JSON is malformed. This is fatal:
    /// a run cannot proceed without a readable manifest.
    pub fn from_json(json: &str) -> Result<Self> {
        let manifest: Self = serde_json::from_str(json)
            .map_err(|e| Error::manifest("<inline>", e.to_string()))?;
        debug!(
            assembly = %manifest.assembly,
            declarations = manifest.declarations.len(),
            "parsed declaration manifest"
        );
        Ok(manifest)
    }

    /// Read and parse a manifest from a file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Manifest`] if the file cannot be read or parsed.
    pub fn from_path(path: &Path) -> Result<Self> {
        let path_display = path.display().to_string();
        let json = fs::read_to_string(path)
            .map_err(|e| Error::manifest(path_display.clone(), e.to_string()))?;
        let manifest: Self = serde_json::from_str(&json)
            .map_err(|e| Error::manifest(path_display.clone(), e.to_string()))?;
        debug!(
            assembly = %manifest.assembly,
            declarations = manifest.declarations.len(),
            path = %path_display,
            "parsed declaration manifest"
        );
        Ok(manifest)
    }

    /// The unfiltered declaration list.
    ///
    /// The strict symbol check iterates this view: it never honors
    /// availability or per-declaration skips.
    #[must_use]
    pub fn all(&self) -> &[Declaration] {
        &self.declarations
    }

    /// Declarations surviving the skip policy, in manifest order.
    ///
    /// The policy is evaluated eagerly per entry; excluded declarations
    /// never appear in the sequence.
    pub fn declarations<'a>(
        &'a self,
        policy: &'a SkipPolicy,
    ) -> impl Iterator<Item = &'a Declaration> + 'a {
        self.declarations
            .iter()
            .filter(move |decl| !policy.skips_declaration(decl))
    }

    /// Number of declarations before filtering.
    #[must_use]
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Whether the manifest declares no native calls at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}
