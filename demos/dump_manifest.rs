//! Manifest Inspection Example
//!
//! Loads a declaration manifest from disk and prints what the extractor
//! sees: every declaration, its target library, and its entry point.
//!
//! Run with: cargo run --example `dump_manifest` -- path/to/decls.json

use sonda::{Manifest, SkipPolicy};
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: dump_manifest <decls.json>");
        return ExitCode::FAILURE;
    };

    let manifest = match Manifest::from_path(Path::new(&path)) {
        Ok(manifest) => manifest,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    println!(
        "assembly {}: {} declarations",
        manifest.assembly,
        manifest.len()
    );
    for decl in manifest.declarations(&SkipPolicy::new()) {
        println!(
            "  {}.{} -> {} ({})",
            decl.owning_type,
            decl.method,
            decl.entry_point(),
            decl.library
        );
    }
    ExitCode::SUCCESS
}
