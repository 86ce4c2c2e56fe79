//! Pre-flight checks for crashsym
//!
//! Validates the environment before any resolver is spawned. A missing
//! report is fatal; everything else only degrades the result, so it is
//! reported as a warning.

use anyhow::{bail, Result};
use std::path::Path;

/// Run all pre-flight checks
///
/// # Errors
/// Returns an error if the report file does not exist
pub fn run_preflight_checks(
    report_path: &Path,
    dsym_path: &Path,
    resolver_program: &Path,
    base_path: &Path,
    quiet: bool,
) -> Result<()> {
    check_report_exists(report_path)?;

    if quiet {
        return Ok(());
    }

    for warning in [
        check_dsym(dsym_path),
        check_resolver_available(resolver_program),
        check_base_path(base_path),
    ]
    .into_iter()
    .flatten()
    {
        eprintln!("warning: {warning}");
    }

    Ok(())
}

/// Check that the report file exists ("-" means stdin and always passes)
fn check_report_exists(report_path: &Path) -> Result<()> {
    if report_path == Path::new("-") {
        return Ok(());
    }
    if !report_path.exists() {
        bail!(
            "Report not found: {}\n\n\
             Pass the crash report JSON file, or - to read it from stdin.",
            report_path.display()
        );
    }
    if !report_path.is_file() {
        bail!("Not a file: {}", report_path.display());
    }
    Ok(())
}

fn check_dsym(dsym_path: &Path) -> Option<String> {
    (!dsym_path.exists()).then(|| {
        format!("dSYM not found at {}, app frames will stay unresolved", dsym_path.display())
    })
}

fn check_resolver_available(program: &Path) -> Option<String> {
    if which::which(program).is_ok() {
        return None;
    }
    Some(format!(
        "resolver {} not found on PATH, no frames can be resolved",
        program.display()
    ))
}

fn check_base_path(base_path: &Path) -> Option<String> {
    (!base_path.is_dir()).then(|| {
        format!(
            "device support folder {} does not exist, system frames will stay unresolved",
            base_path.display()
        )
    })
}
