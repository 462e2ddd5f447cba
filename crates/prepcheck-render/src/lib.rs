//! prepcheck-render — HTML and markdown output for progress reports.

pub mod html;
pub mod markdown;

use prepcheck_core::model::TopicStatus;

/// Presentation label for a status.
///
/// The model keeps the closed enum; what a page calls each variant is a
/// display concern and lives here.
pub fn status_label(status: TopicStatus) -> &'static str {
    match status {
        TopicStatus::Done => "Done",
        TopicStatus::InProgress => "In progress",
        TopicStatus::NotStarted => "Not started",
    }
}
