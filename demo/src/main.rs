//! attest — Composable Verification Demo CLI
//!
//! Runs one or all of the three demo scenarios. Each scenario builds real
//! verifiers from the attest crates and exercises them against sample
//! release-manifest data, printing both the human-readable outcome and
//! the JSON rendering of each `VerificationResult`.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- manifest
//!   cargo run -p demo -- artifacts
//!   cargo run -p demo -- bridge

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use attest_assert::{reset_failure_hook, set_failure_hook, CheckExt};
use attest_collection::CollectionVerifier;
use attest_contracts::VerificationResult;
use attest_core::Verifier;

// ── CLI definition ────────────────────────────────────────────────────────────

/// attest — composable verification engine demo.
///
/// Each subcommand runs one or all of the demo scenarios, showing chained
/// checks, dynamic per-subject checks, per-element collection checks, and
/// the pluggable failure hook.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "attest verification engine demo",
    long_about = "Runs attest demo scenarios showing check chaining, short-circuiting,\n\
                  per-element collection verification, and the failure hook bridge."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run all three scenarios in sequence.
    RunAll,
    /// Scenario 1: manifest verifier with static and dynamic checks.
    Manifest,
    /// Scenario 2: per-element artifact verification, including
    /// cardinality mismatches and the absent collection.
    Artifacts,
    /// Scenario 3: the failure hook bridge with a custom hook installed.
    Bridge,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialize structured logging. Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::RunAll => run_all(),
        Command::Manifest => run_manifest(),
        Command::Artifacts => run_artifacts(),
        Command::Bridge => run_bridge(),
    };

    match result {
        Ok(()) => println!("All selected scenarios completed."),
        Err(e) => {
            eprintln!("Demo error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run_all() -> Result<(), serde_json::Error> {
    run_manifest()?;
    run_artifacts()?;
    run_bridge()?;
    Ok(())
}

// ── Sample domain ─────────────────────────────────────────────────────────────

/// A release manifest as a deployment pipeline would submit it.
#[derive(Debug, Clone)]
struct Manifest {
    name: String,
    version: String,
    artifacts: Option<Vec<String>>,
}

impl Manifest {
    fn new(name: &str, version: &str, artifacts: Option<&[&str]>) -> Self {
        Self {
            name: name.to_string(),
            version: version.to_string(),
            artifacts: artifacts.map(|a| a.iter().map(|s| s.to_string()).collect()),
        }
    }
}

fn looks_like_version(version: &str) -> bool {
    let parts: Vec<&str> = version.split('.').collect();
    parts.len() == 3
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
}

/// The reusable manifest rule set.
///
/// Static checks cover fields every manifest must satisfy; the dynamic
/// hook adds the stable-release artifact requirement only for subjects
/// that claim a post-1.0 version.
fn manifest_verifier() -> Verifier<Manifest> {
    let mut verifier = Verifier::new();
    verifier
        .add_critical_action(|m: &Manifest| {
            if m.name.trim().is_empty() {
                Err("manifest name must not be empty")
            } else {
                Ok(())
            }
        })
        .add_check(|m: &Manifest| {
            VerificationResult::normal(
                (!looks_like_version(&m.version))
                    .then(|| format!("'{}' is not a MAJOR.MINOR.PATCH version", m.version)),
            )
        });

    verifier.set_dynamic_checks(|v, manifest| {
        if !manifest.version.starts_with("0.") {
            v.add_check(|m: &Manifest| {
                let empty = m.artifacts.as_ref().map_or(true, |a| a.is_empty());
                VerificationResult::normal(
                    empty.then_some("stable releases must list at least one artifact"),
                )
            });
        }
    });

    verifier
}

/// Per-position artifact expectations: a tarball first, its checksum second.
fn artifact_verifier() -> CollectionVerifier<String> {
    let mut verifier = CollectionVerifier::new();
    verifier
        .add_element_check(|artifact: &String| {
            VerificationResult::normal(
                (!artifact.ends_with(".tar.gz"))
                    .then(|| format!("'{artifact}' should be a .tar.gz archive")),
            )
        })
        .add_element_check(|artifact: &String| {
            VerificationResult::normal(
                (!artifact.ends_with(".sha256"))
                    .then(|| format!("'{artifact}' should be a .sha256 checksum")),
            )
        });
    verifier
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

fn print_outcome(label: &str, result: &VerificationResult) -> Result<(), serde_json::Error> {
    let verdict = if result.has_errors() { "FAILED" } else { "passed" };
    println!("  {label}: {verdict}");
    println!("{}", serde_json::to_string_pretty(result)?);
    println!();
    Ok(())
}

fn run_manifest() -> Result<(), serde_json::Error> {
    println!("Scenario 1: manifest verifier (static + dynamic checks)");
    let mut verifier = manifest_verifier();

    let good = Manifest::new("order-service", "1.4.0", Some(&["order-service.tar.gz"]));
    print_outcome("well-formed manifest", &verifier.verify(&good))?;

    let bad = Manifest::new("order-service", "two-point-oh", None);
    print_outcome("malformed version", &verifier.verify(&bad))?;

    let unnamed = Manifest::new("", "1.0.0", None);
    print_outcome(
        "missing name (critical, stops early)",
        &verifier.verify(&unnamed),
    )?;

    Ok(())
}

fn run_artifacts() -> Result<(), serde_json::Error> {
    println!("Scenario 2: artifact collection verifier (per-element checks)");
    let mut verifier = artifact_verifier();

    let good = Some(vec![
        "order-service.tar.gz".to_string(),
        "order-service.sha256".to_string(),
    ]);
    print_outcome("matching artifact pair", &verifier.verify(&good))?;

    let short = Some(vec!["order-service.tar.gz".to_string()]);
    print_outcome("missing checksum", &verifier.verify(&short))?;

    print_outcome("absent collection", &verifier.verify(&None))?;

    Ok(())
}

fn run_bridge() -> Result<(), serde_json::Error> {
    println!("Scenario 3: failure hook bridge");

    // Route failures through a custom hook instead of the default panic.
    set_failure_hook(|message| {
        println!("  failure hook received:");
        for line in message.lines() {
            println!("    - {line}");
        }
    });

    let mut verifier = manifest_verifier();
    let bad = Manifest::new("order-service", "2.0", None);
    verifier.check(&bad);

    reset_failure_hook();
    println!();
    Ok(())
}
