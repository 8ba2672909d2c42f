//! Run-scoped diagnostic accumulation and final verdicts.
//!
//! A [`Report`] is the only mutable state a check writes to: one formatted
//! line per finding, a failure counter, a processed-declaration counter,
//! and (for symbol checks) the set of missing symbol names. It is created
//! fresh at the start of each check pass and consumed once at the end to
//! produce a [`Verdict`].
//!
//! Invariant: the number of accumulated lines equals the error counter
//! exactly. The missing-symbol *set* is deduplicated for readability, but
//! every failing declaration still contributes a line and a count.

use crate::error::{CheckKind, Error, Result};
use std::collections::BTreeSet;
use std::fmt;

/// Accumulator for one check pass.
#[derive(Debug, Clone)]
pub struct Report {
    check: CheckKind,
    checked: usize,
    errors: usize,
    lines: Vec<String>,
    missing: BTreeSet<String>,
}

impl Report {
    /// Start an empty report for a check category.
    #[must_use]
    pub const fn new(check: CheckKind) -> Self {
        Self {
            check,
            checked: 0,
            errors: 0,
            lines: Vec::new(),
            missing: BTreeSet::new(),
        }
    }

    /// The check category this report belongs to.
    #[must_use]
    pub const fn check(&self) -> CheckKind {
        self.check
    }

    /// Count one processed declaration.
    ///
    /// Skipped declarations are never counted here: they contribute zero
    /// to both the processed count and the error count.
    pub fn declaration_checked(&mut self) {
        self.checked += 1;
    }

    /// Record one failure with its formatted diagnostic line.
    pub fn add_error_line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
        self.errors += 1;
    }

    /// Record a missing symbol.
    ///
    /// The counter and line list grow once per failing declaration; the
    /// symbol-name set deduplicates entries shared across declarations.
    pub fn record_missing_symbol(&mut self, symbol: &str, line: impl Into<String>) {
        self.missing.insert(symbol.to_owned());
        self.add_error_line(line);
    }

    /// Number of failures recorded so far.
    #[must_use]
    pub const fn errors(&self) -> usize {
        self.errors
    }

    /// Number of declarations processed so far.
    #[must_use]
    pub const fn checked(&self) -> usize {
        self.checked
    }

    /// Accumulated diagnostic lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Deduplicated missing-symbol names.
    #[must_use]
    pub const fn missing_symbols(&self) -> &BTreeSet<String> {
        &self.missing
    }

    /// Consume the report and render the final verdict.
    #[must_use]
    pub fn verdict(self) -> Verdict {
        let message = self.render_message();
        Verdict {
            check: self.check,
            checked: self.checked,
            errors: self.errors,
            message,
        }
    }

    fn render_message(&self) -> String {
        match self.check {
            CheckKind::Signatures => format!(
                "{} errors found in {} native call signatures validated",
                self.errors, self.checked
            ),
            CheckKind::Symbols => {
                let names: Vec<&str> = self.missing.iter().map(String::as_str).collect();
                format!(
                    "{} errors found in {} symbols validated: {}",
                    self.errors,
                    self.checked,
                    names.join(", ")
                )
            }
            CheckKind::SymbolsStrict => {
                if self.errors == 0 {
                    format!("0 errors found in {} symbol lookups", self.checked)
                } else {
                    format!(
                        "{} errors found in {} symbol lookups:\n{}",
                        self.errors,
                        self.checked,
                        self.lines.join("\n")
                    )
                }
            }
        }
    }
}

/// Final outcome of one check category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    check: CheckKind,
    checked: usize,
    errors: usize,
    message: String,
}

impl Verdict {
    /// Which check produced this verdict.
    #[must_use]
    pub const fn check(&self) -> CheckKind {
        self.check
    }

    /// Number of declarations processed.
    #[must_use]
    pub const fn checked(&self) -> usize {
        self.checked
    }

    /// Number of failures.
    #[must_use]
    pub const fn errors(&self) -> usize {
        self.errors
    }

    /// A check passes iff its failure count is exactly zero.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.errors == 0
    }

    /// The formatted summary message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Convert into a `Result`, failing when any errors were recorded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CheckFailed`] carrying the counts and the full
    /// diagnostic summary when the verdict did not pass.
    pub fn into_result(self) -> Result<()> {
        if self.passed() {
            Ok(())
        } else {
            Err(Error::check_failed(
                self.check,
                self.errors,
                self.checked,
                self.message,
            ))
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.passed() { "PASS" } else { "FAIL" };
        write!(f, "[{status}] {}: {}", self.check, self.message)
    }
}


#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        // Invariant: the line count always equals the error counter, no
        // matter how findings and missing symbols interleave.
        #[test]
        fn line_count_tracks_error_counter(
            ops in proptest::collection::vec(any::<bool>(), 0..64),
        ) {
            let mut report = Report::new(CheckKind::Symbols);
            for (i, is_missing_symbol) in ops.iter().enumerate() {
                if *is_missing_symbol {
                    // Shared name on every even index to force dedup.
                    let name = if i % 2 == 0 { "shared_sym".to_owned() } else { format!("sym_{i}") };
                    report.record_missing_symbol(&name, format!("missing {name}"));
                } else {
                    report.add_error_line(format!("finding {i}"));
                }
            }
            prop_assert_eq!(report.lines().len(), report.errors());
            prop_assert!(report.missing_symbols().len() <= report.errors());
        }
    }
}
