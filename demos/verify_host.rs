//! Host Image Verification Example
//!
//! Builds a small declaration manifest targeting the host process image and
//! runs every check category against it.
//!
//! Run with: cargo run --example `verify_host`

use sonda::{Declaration, Harness, HarnessConfig, Manifest, SkipPolicy, TypeShape};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    println!("Sonda {} host image verification", sonda::VERSION);
    println!(
        "Symbol lookup supported: {}",
        sonda::is_symbol_lookup_supported()
    );
    println!();

    // Every process links the C runtime, so these resolve in the host image.
    let manifest = Manifest {
        assembly: "demo".to_owned(),
        declarations: vec![
            Declaration::new("Demo.Runtime", "strlen", "__Internal")
                .with_return(TypeShape::scalar("usize"))
                .with_param("s", TypeShape::Pointer { name: "u8".into() }),
            Declaration::new("Demo.Runtime", "malloc", "__Internal")
                .with_return(TypeShape::Pointer { name: "u8".into() })
                .with_param("size", TypeShape::scalar("usize")),
            Declaration::new("Demo.Runtime", "free", "__Internal")
                .with_param("ptr", TypeShape::Pointer { name: "u8".into() }),
            // Deliberately broken entries so the report has something to say.
            Declaration::new("Demo.Runtime", "definitely_not_exported", "__Internal"),
            Declaration::new("Demo.Runtime", "bad_signature", "__Internal").with_param(
                "items",
                TypeShape::Generic {
                    name: "NSArray<NSString>".into(),
                    delegate: false,
                },
            ),
        ],
    };

    let harness = Harness::new(manifest, HarnessConfig::default(), SkipPolicy::new());

    let mut failures = 0;
    for verdict in harness.run_all() {
        println!("{verdict}");
        if !verdict.passed() {
            failures += 1;
        }
    }

    println!();
    if failures == 0 {
        println!("All checks passed.");
    } else {
        println!("{failures} check categories failed (expected for this demo).");
    }
}
