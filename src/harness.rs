//! Orchestration of check categories over one declaration manifest.
//!
//! A [`Harness`] owns everything one validation run needs: the extracted
//! manifest, the skip policy, the library resolver, and the run options.
//! Each `run_*` method processes all declarations sequentially on the
//! calling thread, accumulates findings in a fresh [`Report`], and returns
//! an independent [`Verdict`]. Nothing is cached across runs.

use crate::error::CheckKind;
use crate::manifest::Manifest;
use crate::report::{Report, Verdict};
use crate::resolve::{LibraryResolver, LinkMode};
use crate::signature;
use crate::skip::SkipPolicy;
use crate::symbols::{self, SymbolCheckOptions};
use std::path::PathBuf;
use tracing::{debug, info, instrument, warn};

/// Run options for a harness.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// How optional native shims were linked into the product.
    pub link_mode: LinkMode,
    /// Aggregate all failures before reporting instead of stopping early.
    pub continue_on_failure: bool,
    /// Emit one progress line per declaration examined.
    pub log_progress: bool,
    /// Library search directories; `None` uses the platform defaults.
    pub search_paths: Option<Vec<PathBuf>>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            link_mode: LinkMode::None,
            continue_on_failure: true,
            log_progress: false,
            search_paths: None,
        }
    }
}

/// A configured validation run over one manifest.
#[derive(Debug, Clone)]
pub struct Harness {
    manifest: Manifest,
    config: HarnessConfig,
    policy: SkipPolicy,
    resolver: LibraryResolver,
}

impl Harness {
    /// Assemble a harness from a manifest, run options, and a skip policy.
    #[must_use]
    pub fn new(manifest: Manifest, config: HarnessConfig, policy: SkipPolicy) -> Self {
        let mut resolver = LibraryResolver::new(config.link_mode);
        if let Some(paths) = &config.search_paths {
            resolver = resolver.with_search_paths(paths.clone());
        }
        Self {
            manifest,
            config,
            policy,
            resolver,
        }
    }

    /// The manifest under validation.
    #[must_use]
    pub const fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Statically validate every declared signature.
    ///
    /// Honors the skip policy; excluded declarations are never examined.
    #[instrument(level = "debug", skip(self), fields(assembly = %self.manifest.assembly))]
    #[must_use]
    pub fn run_signatures(&self) -> Verdict {
        let mut report = Report::new(CheckKind::Signatures);
        for (index, decl) in self.manifest.declarations(&self.policy).enumerate() {
            if self.config.log_progress {
                debug!(index, "{}.{}", decl.owning_type, decl.method);
            }
            report.declaration_checked();
            let ok = signature::check_declaration(decl, &mut report);
            if !ok && !self.config.continue_on_failure {
                break;
            }
        }
        self.finish(report)
    }

    /// Check that every declared entry point resolves, honoring skips.
    #[instrument(level = "debug", skip(self), fields(assembly = %self.manifest.assembly))]
    #[must_use]
    pub fn run_symbols(&self) -> Verdict {
        let mut report = Report::new(CheckKind::Symbols);
        symbols::check_symbols(
            self.manifest.declarations(&self.policy),
            &self.resolver,
            &self.policy,
            self.symbol_options(),
            &mut report,
        );
        self.finish(report)
    }

    /// Strict existence check over the unfiltered declaration list.
    ///
    /// Catches symbols that would be missing at native link/strip time,
    /// so it ignores availability gating and symbol-name skips.
    #[instrument(level = "debug", skip(self), fields(assembly = %self.manifest.assembly))]
    #[must_use]
    pub fn run_symbols_strict(&self) -> Verdict {
        let mut report = Report::new(CheckKind::SymbolsStrict);
        symbols::check_symbols_strict(
            self.manifest.all(),
            &self.resolver,
            &self.manifest.assembly,
            self.symbol_options(),
            &mut report,
        );
        self.finish(report)
    }

    /// Run every check category and collect the independent verdicts.
    #[must_use]
    pub fn run_all(&self) -> Vec<Verdict> {
        vec![
            self.run_signatures(),
            self.run_symbols(),
            self.run_symbols_strict(),
        ]
    }

    const fn symbol_options(&self) -> SymbolCheckOptions {
        SymbolCheckOptions {
            continue_on_failure: self.config.continue_on_failure,
            log_progress: self.config.log_progress,
        }
    }

    fn finish(&self, report: Report) -> Verdict {
        let verdict = report.verdict();
        if verdict.passed() {
            info!(
                check = %verdict.check(),
                checked = verdict.checked(),
                "check passed"
            );
        } else {
            warn!(
                check = %verdict.check(),
                checked = verdict.checked(),
                errors = verdict.errors(),
                "check failed"
            );
        }
        verdict
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::declaration::{Declaration, TypeShape};

    fn manifest_with(declarations: Vec<Declaration>) -> Manifest {
        Manifest {
            assembly: "GameController".to_owned(),
            declarations,
        }
    }

    #[test]
    fn test_clean_manifest_passes_every_check() {
        let manifest = manifest_with(vec![Declaration::new(
            "GameController.GCController",
            "strlen",
            "__Internal",
        )]);
        let harness = Harness::new(manifest, HarnessConfig::default(), SkipPolicy::new());

        for verdict in harness.run_all() {
            assert!(verdict.passed(), "{verdict}");
        }
    }

    #[test]
    fn test_run_all_covers_every_category() {
        let harness = Harness::new(
            manifest_with(Vec::new()),
            HarnessConfig::default(),
            SkipPolicy::new(),
        );
        let kinds: Vec<_> = harness.run_all().iter().map(Verdict::check).collect();
        assert_eq!(
            kinds,
            vec![
                CheckKind::Signatures,
                CheckKind::Symbols,
                CheckKind::SymbolsStrict
            ]
        );
    }

    #[test]
    fn test_signature_failure_only_fails_signatures() {
        let manifest = manifest_with(vec![Declaration::new(
            "GameController.GCController",
            "strlen",
            "__Internal",
        )
        .with_param(
            "elements",
            TypeShape::Generic {
                name: "NSArray<GCControllerElement>".into(),
                delegate: false,
            },
        )]);
        let harness = Harness::new(manifest, HarnessConfig::default(), SkipPolicy::new());

        let signatures = harness.run_signatures();
        assert!(!signatures.passed());
        assert_eq!(signatures.errors(), 1);
        assert_eq!(signatures.checked(), 1);

        // Symbol existence is independent of signature shape.
        assert!(harness.run_symbols().passed());
        assert!(harness.run_symbols_strict().passed());
    }

    #[test]
    fn test_shim_declarations_skipped_under_link_mode_none() {
        let manifest = manifest_with(vec![Declaration::new(
            "System.Net.NetworkInterface",
            "GetNetworkInterfaces",
            "System.Native",
        )]);
        let harness = Harness::new(manifest, HarnessConfig::default(), SkipPolicy::new());

        let verdict = harness.run_symbols();
        assert!(verdict.passed());
        assert_eq!(verdict.checked(), 0);

        let strict = harness.run_symbols_strict();
        assert!(strict.passed());
        assert_eq!(strict.checked(), 0);
    }

    #[test]
    fn test_missing_symbol_fails_with_name_in_message() {
        let manifest = manifest_with(vec![Declaration::new(
            "GameController.GCController",
            "GCStartDiscovery",
            "__Internal",
        )
        .with_entry_point("totally_missing_symbol")]);
        let harness = Harness::new(manifest, HarnessConfig::default(), SkipPolicy::new());

        let verdict = harness.run_symbols();
        assert!(!verdict.passed());
        assert!(verdict.message().contains("totally_missing_symbol"));
        assert!(verdict.into_result().is_err());
    }

    #[test]
    fn test_strict_ignores_availability_skips() {
        use crate::declaration::{Availability, OsVersion, Platform, Platforms};

        // Declaration gated to iOS; target is macOS. The skip-aware pass
        // drops it, the strict pass still probes it.
        let manifest = manifest_with(vec![Declaration::new(
            "GameController.GCController",
            "strlen",
            "__Internal",
        )
        .with_availability(Availability {
            platforms: Platforms::IOS,
            ..Availability::default()
        })]);
        let policy = SkipPolicy::new().with_target(Platform::MacOs, OsVersion::new(13, 0));
        let harness = Harness::new(manifest, HarnessConfig::default(), policy);

        assert_eq!(harness.run_symbols().checked(), 0);
        assert_eq!(harness.run_symbols_strict().checked(), 1);
    }

    #[test]
    fn test_two_runs_yield_identical_verdicts() {
        let manifest = manifest_with(vec![
            Declaration::new("GameController.GCController", "strlen", "__Internal"),
            Declaration::new("GameController.GCController", "gone", "__Internal")
                .with_entry_point("sonda_missing_symbol"),
        ]);
        let harness = Harness::new(manifest, HarnessConfig::default(), SkipPolicy::new());

        assert_eq!(harness.run_all(), harness.run_all());
    }

    #[test]
    fn test_stop_on_first_failure_config() {
        let manifest = manifest_with(vec![
            Declaration::new("A.B", "m1", "__Internal").with_entry_point("sonda_missing_one"),
            Declaration::new("A.B", "m2", "__Internal").with_entry_point("sonda_missing_two"),
        ]);
        let config = HarnessConfig {
            continue_on_failure: false,
            ..HarnessConfig::default()
        };
        let harness = Harness::new(manifest, config, SkipPolicy::new());

        let verdict = harness.run_symbols();
        assert_eq!(verdict.errors(), 1);
        assert_eq!(verdict.checked(), 1);
    }

    #[test]
    fn test_custom_search_paths_flow_to_resolver() {
        let dir = tempfile::tempdir().unwrap();
        let config = HarnessConfig {
            search_paths: Some(vec![dir.path().to_path_buf()]),
            ..HarnessConfig::default()
        };
        let manifest = manifest_with(vec![Declaration::new("A.B", "c", "libnowhere")]);
        let harness = Harness::new(manifest, config, SkipPolicy::new());

        let verdict = harness.run_symbols();
        assert_eq!(verdict.errors(), 1);
        assert!(verdict.message().contains("1 errors found"));
    }
}
