//! HTML progress page generator.
//!
//! Produces a self-contained HTML file with all CSS inlined.

use anyhow::Result;
use std::path::Path;

use prepcheck_core::report::ProgressReport;

use crate::status_label;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML page from a progress report.
pub fn generate_html(report: &ProgressReport) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>Chapter progress — {}</title>\n",
        html_escape(&report.chapter.name)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str(&format!(
        "<h1>{}. {}</h1>\n",
        report.chapter.number,
        html_escape(&report.chapter.name)
    ));
    html.push_str(&format!(
        "<p class=\"meta\">{} lessons | snapshot {}</p>\n",
        report.leaves.len(),
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Progress bar
    html.push_str("<section class=\"progress\">\n");
    match report.progress.percentage() {
        Ok(percent) => {
            html.push_str(&format!(
                "<div class=\"bar\" role=\"progressbar\" aria-valuenow=\"{percent}\" aria-valuemin=\"0\" aria-valuemax=\"100\">\n"
            ));
            html.push_str(&format!(
                "<div class=\"fill\" style=\"width:{percent}%\"></div>\n"
            ));
            html.push_str("</div>\n");
            html.push_str(&format!(
                "<p class=\"count\">{} / {} complete ({percent}%)</p>\n",
                report.progress.completed, report.progress.total
            ));
        }
        Err(_) => {
            html.push_str("<p class=\"count\">No lessons in this chapter yet.</p>\n");
        }
    }
    html.push_str("</section>\n");

    // Checklist
    html.push_str("<section class=\"checklist\">\n");
    html.push_str("<h2>Lesson checklist</h2>\n");
    html.push_str("<table>\n");
    html.push_str("<thead><tr><th>Lesson</th><th>Status</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    for leaf in &report.leaves {
        let class = match leaf.status {
            prepcheck_core::model::TopicStatus::Done => "done",
            prepcheck_core::model::TopicStatus::InProgress => "in-progress",
            prepcheck_core::model::TopicStatus::NotStarted => "not-started",
        };
        html.push_str(&format!(
            "<tr><td>{}</td><td><span class=\"pill {}\">{}</span></td></tr>\n",
            html_escape(&leaf.title),
            class,
            status_label(leaf.status)
        ));
    }
    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(
        &serde_json::to_string_pretty(report)
            .unwrap_or_default()
            .replace('<', "&lt;")
            .replace('>', "&gt;"),
    );
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("</body>\n</html>\n");

    html
}

/// Generate and write an HTML page to a file.
pub fn write_html_report(report: &ProgressReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

const CSS: &str = r#"
body { font-family: -apple-system, 'Segoe UI', Roboto, sans-serif; margin: 2rem auto; max-width: 56rem; padding: 0 1rem; color: #1f2937; }
header h1 { margin-bottom: 0.25rem; }
.meta { color: #6b7280; font-size: 0.9rem; }
.progress .bar { height: 0.75rem; border-radius: 0.5rem; background: #e5e7eb; overflow: hidden; }
.progress .fill { height: 100%; background: #10b981; }
.progress .count { color: #374151; font-size: 0.9rem; }
table { border-collapse: collapse; width: 100%; }
th, td { text-align: left; padding: 0.5rem 0.75rem; border-bottom: 1px solid #e5e7eb; }
.pill { border-radius: 999px; padding: 0.15rem 0.6rem; font-size: 0.8rem; white-space: nowrap; }
.pill.done { background: #d1fae5; color: #065f46; }
.pill.in-progress { background: #fef3c7; color: #92400e; }
.pill.not-started { background: #e5e7eb; color: #374151; }
.raw-data pre { background: #f9fafb; padding: 1rem; overflow-x: auto; font-size: 0.8rem; }
"#;
