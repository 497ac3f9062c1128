//! Output formatting for CLI

use crate::export::ExportReport;

/// Format the final report for the terminal
pub fn format_report(report: &ExportReport) -> String {
    let mut output = String::new();

    if report.success {
        output.push_str("\n✅ Export completed\n");
    } else {
        output.push_str("\n❌ Export failed\n");
    }
    output.push_str(&report.summary());

    let errors = report.stats.total_errors();
    if report.success && errors > 0 {
        output.push_str(&format!(
            "\n⚠️  {} entities were rejected; see the log for details.\n",
            errors
        ));
    }

    output
}
