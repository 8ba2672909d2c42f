//! Symbol-existence checks against resolved native libraries.
//!
//! For each declaration the checker resolves the target library, opens it
//! (or the host process image), and asks the dynamic loader whether the
//! declared entry point exists. Findings accumulate in the [`Report`];
//! nothing here aborts a run.
//!
//! Two variants exist:
//!
//! - the **skip-aware** check honors the [`SkipPolicy`] and a small set of
//!   symbols known to be absent on some architectures;
//! - the **strict** check probes every declaration the resolver does not
//!   skip, ignoring availability metadata and symbol skips entirely. It
//!   models what the native linker will demand when lazy lookup is
//!   disabled, so it is deliberately the harsher of the two.
//!
//! The error counter grows once per failing declaration while the
//! missing-symbol set deduplicates names shared across declarations. The
//! asymmetry is intentional and kept: counts measure damage, the set keeps
//! the summary readable.

use crate::declaration::Declaration;
use crate::ffi::dyld::NativeLibrary;
use crate::report::Report;
use crate::resolve::{LibraryResolver, Resolution};
use crate::skip::SkipPolicy;
use tracing::debug;

/// Dispatch trampolines removed by link-time optimization on arm64.
///
/// Their absence is expected, not a failure.
pub const KNOWN_ABSENT_SYMBOLS: &[&str] = &["objc_msgSend_stret", "objc_msgSendSuper_stret"];

/// Options shared by both symbol-check variants.
#[derive(Debug, Clone, Copy)]
pub struct SymbolCheckOptions {
    /// Keep going after a failure to maximize diagnostic yield per run.
    pub continue_on_failure: bool,
    /// Emit one progress line per declaration examined.
    pub log_progress: bool,
}

impl Default for SymbolCheckOptions {
    fn default() -> Self {
        Self {
            continue_on_failure: true,
            log_progress: false,
        }
    }
}

/// Run the skip-aware symbol-existence check.
///
/// Skipped declarations (policy, known-absent symbols, resolver-level
/// skips) contribute zero to both the processed count and the error count.
pub fn check_symbols<'d>(
    declarations: impl IntoIterator<Item = &'d Declaration>,
    resolver: &LibraryResolver,
    policy: &SkipPolicy,
    options: SymbolCheckOptions,
    report: &mut Report,
) {
    for (index, decl) in declarations.into_iter().enumerate() {
        if options.log_progress {
            debug!(index, "{}.{}", decl.owning_type, decl.method);
        }

        if policy.skips_library(&decl.library) {
            continue;
        }

        let name = decl.entry_point();
        if policy.skips_symbol(name) || KNOWN_ABSENT_SYMBOLS.contains(&name) {
            continue;
        }

        let failed = !probe(decl, resolver, report, |name, location| {
            format!("Could not find the symbol '{name}' in {location}")
        });
        if failed && !options.continue_on_failure {
            break;
        }
    }
}

/// Run the strict existence-only symbol check.
///
/// Never skips based on availability metadata, symbol names, or the
/// host-image sentinel; only resolver-level skips (unlinked shims, known
/// non-artifacts) apply. `assembly` names the manifest's source assembly
/// in each diagnostic.
pub fn check_symbols_strict<'d>(
    declarations: impl IntoIterator<Item = &'d Declaration>,
    resolver: &LibraryResolver,
    assembly: &str,
    options: SymbolCheckOptions,
    report: &mut Report,
) {
    for (index, decl) in declarations.into_iter().enumerate() {
        if options.log_progress {
            debug!(index, "{}.{}", decl.owning_type, decl.method);
        }

        let failed = !probe(decl, resolver, report, |name, location| {
            format!(
                "Could not find the symbol '{name}' in {location} for the native call {}.{} in {assembly}",
                decl.owning_type, decl.method
            )
        });
        if failed && !options.continue_on_failure {
            break;
        }
    }
}

/// Resolve, open, look up, and release. Returns `false` on any finding.
///
/// The library handle is scoped to this function: it is released on every
/// exit path when `NativeLibrary` drops.
fn probe(
    decl: &Declaration,
    resolver: &LibraryResolver,
    report: &mut Report,
    missing_line: impl Fn(&str, &str) -> String,
) -> bool {
    let resolution = match resolver.resolve(&decl.library) {
        Ok(Resolution::Skip(reason)) => {
            debug!(
                library = %decl.library,
                %reason,
                "declaration skipped at resolution"
            );
            return true;
        }
        Ok(resolution) => resolution,
        Err(err) => {
            report.declaration_checked();
            report.add_error_line(format!(
                "[FAIL] {}.{}: {err}",
                decl.owning_type, decl.method
            ));
            return false;
        }
    };

    report.declaration_checked();

    let (path, location) = match &resolution {
        Resolution::Host => (None, "<host image>".to_owned()),
        Resolution::Path(path) => (Some(path.as_path()), path.display().to_string()),
        // Handled above.
        Resolution::Skip(_) => return true,
    };

    let library = match NativeLibrary::open(path) {
        Ok(library) => library,
        Err(err) => {
            report.add_error_line(format!(
                "[FAIL] {}.{}: could not load library '{location}': {err}",
                decl.owning_type, decl.method
            ));
            return false;
        }
    };

    let name = decl.entry_point();
    if library.has_symbol(name) {
        true
    } else {
        report.record_missing_symbol(name, missing_line(name, &location));
        false
    }
}
