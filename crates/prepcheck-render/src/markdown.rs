//! Markdown checklist rendering for progress reports.

use prepcheck_core::model::TopicStatus;
use prepcheck_core::report::ProgressReport;

/// Render a progress report as a markdown checklist.
pub fn render_markdown(report: &ProgressReport) -> String {
    let mut md = String::new();

    md.push_str(&format!(
        "# {}. {}\n\n",
        report.chapter.number, report.chapter.name
    ));

    match report.progress.percentage() {
        Ok(percent) => {
            md.push_str(&format!(
                "**Progress:** {}/{} ({percent}%)\n\n",
                report.progress.completed, report.progress.total
            ));
        }
        Err(_) => {
            md.push_str("**Progress:** no lessons yet\n\n");
        }
    }

    for leaf in &report.leaves {
        let mark = if leaf.status.is_done() { "x" } else { " " };
        match leaf.status {
            TopicStatus::InProgress => {
                md.push_str(&format!("- [{mark}] {} _(in progress)_\n", leaf.title));
            }
            _ => {
                md.push_str(&format!("- [{mark}] {}\n", leaf.title));
            }
        }
    }

    md
}
