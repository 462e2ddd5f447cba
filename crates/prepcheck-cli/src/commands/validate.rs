//! The `prepcheck validate` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(chapter_path: PathBuf) -> Result<()> {
    let chapters = super::progress::load_chapters(&chapter_path)?;

    let mut total_warnings = 0;

    for chapter in &chapters {
        println!(
            "Chapter: {} ({} topics, {} datasets, {} quizzes)",
            chapter.name,
            chapter.topics.len(),
            chapter.datasets.len(),
            chapter.quizzes.len()
        );

        let warnings = prepcheck_core::parser::validate_chapter(chapter);
        for w in &warnings {
            let prefix = w
                .subject
                .as_ref()
                .map(|id| format!("  [{id}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All chapter files valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
