//! CLI output: status line and error messages.

use crate::error::ManifestError;
use crate::tree::builder::BuildReport;
use crate::types::SkipReason;

/// Map a run failure to the message printed on stderr.
pub fn map_error(e: &ManifestError) -> String {
    let hint = match e {
        ManifestError::NotADirectory { .. } => "pass an existing directory to scan",
        ManifestError::Read { .. } => {
            "fix the file's permissions or rerun with --lenient to skip it"
        }
        ManifestError::Write { .. } => "check that the target directory is writable",
        ManifestError::UnrepresentablePath { .. } => {
            "rename the file; tabs and newlines cannot appear in manifest paths"
        }
        ManifestError::Config(_) => "check the configuration file and logging flags",
    };
    format!("error: {}\nhint: {}", e, hint)
}

/// Render the success report for stdout.
pub fn format_report(report: &BuildReport) -> String {
    let shown = dunce::canonicalize(&report.manifest_path)
        .unwrap_or_else(|_| report.manifest_path.clone());
    let noun = if report.records == 1 { "file" } else { "files" };
    let mut out = format!(
        "Wrote manifest: {} ({} {})",
        shown.display(),
        report.records,
        noun
    );

    for skipped in &report.skipped {
        let reason = match skipped.reason {
            SkipReason::Transient => "changed during scan",
            SkipReason::Unreadable => "unreadable",
        };
        out.push_str(&format!("\nskipped ({}): {}", reason, skipped.path.display()));
    }
    out
}
