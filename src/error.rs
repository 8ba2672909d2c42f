//! Error types for Sonda.
//!
//! All errors implement `std::error::Error` and provide human-readable messages.
//! Error variants are specific enough to allow programmatic handling.
//!
//! Individual findings (a bad signature, a missing symbol) are *not* errors:
//! they are accumulated in a [`crate::report::Report`] so a run can surface
//! every problem at once. The variants here cover fatal conditions and the
//! final nonzero verdict of a check category.

use std::fmt;
use thiserror::Error;

/// Primary error type for Sonda operations.
///
/// Each variant provides sufficient context for debugging while remaining
/// actionable for programmatic error handling.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The declaration manifest could not be read or parsed.
    ///
    /// This is the only condition that aborts a run outright: without a
    /// well-formed manifest there is nothing to verify.
    #[error("manifest error in {path}: {reason}")]
    Manifest {
        /// Path (or description) of the manifest source.
        path: String,
        /// What went wrong while reading or parsing.
        reason: String,
    },

    /// A logical library identifier could not be mapped to a loadable artifact.
    #[error("library not found: {name}")]
    LibraryNotFound {
        /// The logical library identifier that failed to resolve.
        name: String,
    },

    /// A check category finished with a nonzero failure count.
    #[error("{check} check failed: {errors} errors found in {checked} declarations\n{details}")]
    CheckFailed {
        /// Which check category failed.
        check: CheckKind,
        /// Number of failures accumulated.
        errors: usize,
        /// Number of declarations processed.
        checked: usize,
        /// The accumulated diagnostic text.
        details: String,
    },

}

/// Check categories run by the harness.
///
/// Categories are independent: each produces its own verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckKind {
    /// Static signature-shape validation.
    Signatures,
    /// Symbol existence, honoring skip policies.
    Symbols,
    /// Strict symbol existence, ignoring availability and symbol skips.
    SymbolsStrict,
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Signatures => write!(f, "signatures"),
            Self::Symbols => write!(f, "symbols"),
            Self::SymbolsStrict => write!(f, "symbols-strict"),
        }
    }
}

/// Result type alias for Sonda operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a new `Manifest` error.
    #[must_use]
    pub fn manifest(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Manifest {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a new `LibraryNotFound` error.
    #[must_use]
    pub fn library_not_found(name: impl Into<String>) -> Self {
        Self::LibraryNotFound { name: name.into() }
    }

    /// Create a new `CheckFailed` error.
    #[must_use]
    pub fn check_failed(
        check: CheckKind,
        errors: usize,
        checked: usize,
        details: impl Into<String>,
    ) -> Self {
        Self::CheckFailed {
            check,
            errors,
            checked,
            details: details.into(),
        }
    }

    /// Check if this error indicates an unresolvable library.
    #[must_use]
    pub const fn is_library_not_found(&self) -> bool {
        matches!(self, Self::LibraryNotFound { .. })
    }

    /// Check if this error is a failed check verdict.
    #[must_use]
    pub const fn is_check_failed(&self) -> bool {
        matches!(self, Self::CheckFailed { .. })
    }

    /// Get the failure count if this is a failed check verdict.
    #[must_use]
    pub const fn error_count(&self) -> Option<usize> {
        match self {
            Self::CheckFailed { errors, .. } => Some(*errors),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<Error>();
    }

    #[test]
    fn test_error_messages_are_readable() {
        let err = Error::library_not_found("GameController");
        let msg = err.to_string();
        assert!(msg.contains("GameController"));
        assert!(msg.contains("not found"));
    }

    #[test]
    fn test_check_failed_includes_counts() {
        let err = Error::check_failed(CheckKind::Symbols, 3, 120, "[FAIL] x\n[FAIL] y\n[FAIL] z");
        let msg = err.to_string();
        assert!(msg.contains('3'));
        assert!(msg.contains("120"));
        assert!(msg.contains("[FAIL] x"));
    }

    #[test]
    fn test_display_impl_not_generic() {
        // One entry per variant: the error surface is exactly the fatal
        // conditions plus the final nonzero verdict.
        let errors = vec![
            Error::manifest("decls.json", "unexpected end of input"),
            Error::library_not_found("libfoo"),
            Error::check_failed(CheckKind::Signatures, 1, 2, "detail"),
        ];

        for err in errors {
            let msg = err.to_string();
            assert!(msg.len() > 10, "Message too short: {msg}");
            assert!(!msg.eq_ignore_ascii_case("error"), "Generic message: {msg}");
        }
    }

    #[test]
    fn test_check_kind_display() {
        assert_eq!(CheckKind::Signatures.to_string(), "signatures");
        assert_eq!(CheckKind::Symbols.to_string(), "symbols");
        assert_eq!(CheckKind::SymbolsStrict.to_string(), "symbols-strict");
    }

    #[test]
    fn test_error_predicates() {
        assert!(Error::library_not_found("x").is_library_not_found());
        assert!(!Error::manifest("p", "x").is_library_not_found());

        assert!(Error::check_failed(CheckKind::Symbols, 1, 1, "").is_check_failed());
        assert!(!Error::library_not_found("x").is_check_failed());
    }

    #[test]
    fn test_error_count_extraction() {
        assert_eq!(
            Error::check_failed(CheckKind::Symbols, 7, 10, "").error_count(),
            Some(7)
        );
        assert_eq!(Error::library_not_found("x").error_count(), None);
    }

    #[test]
    fn test_error_equality_and_clone() {
        let e1 = Error::library_not_found("libfoo");
        let e2 = e1.clone();
        let e3 = Error::library_not_found("libbar");

        assert_eq!(e1, e2);
        assert_ne!(e1, e3);
    }
}
