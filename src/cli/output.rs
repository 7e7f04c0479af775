//! Output formatting for CLI

use std::path::Path;

use crate::import::ImportError;

/// Counters reported at the end of a run.
pub struct RunSummary {
    /// Records or tuples found in the source
    pub found: usize,
    /// Rows written to the output document
    pub emitted: usize,
    /// Records dropped along the way (nameless blocks, bad arity, malformed
    /// values)
    pub skipped: usize,
}

/// Format the end-of-run console summary.
pub fn format_run_summary(
    summary: &RunSummary,
    output: &Path,
    errors: &[ImportError],
) -> String {
    let mut out = String::new();

    if !errors.is_empty() {
        out.push_str("\n⚠️  Per-record errors:\n");
        for error in errors {
            out.push_str(&format!("  - {}\n", error));
        }
    }

    out.push_str(&format!(
        "\n✅ Emitted {} of {} record(s) to {}\n",
        summary.emitted,
        summary.found,
        output.display()
    ));
    if summary.skipped > 0 {
        out.push_str(&format!("⚠️  Skipped {} record(s)\n", summary.skipped));
    }

    out
}
