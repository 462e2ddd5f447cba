//! The `prepcheck progress` command.

use std::path::PathBuf;

use anyhow::Result;

use prepcheck_core::model::Chapter;
use prepcheck_core::report::ProgressReport;
use prepcheck_render::{html, markdown, status_label};

pub fn execute(chapter_path: PathBuf, format: String, save: Option<PathBuf>) -> Result<()> {
    let chapters = load_chapters(&chapter_path)?;
    tracing::debug!("loaded {} chapter(s)", chapters.len());

    if save.is_some() && chapters.len() != 1 {
        anyhow::bail!(
            "--save expects exactly one chapter, found {}",
            chapters.len()
        );
    }

    for chapter in &chapters {
        let report = ProgressReport::for_chapter(chapter);

        match format.as_str() {
            "json" => {
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            "markdown" | "md" => {
                println!("{}", markdown::render_markdown(&report));
            }
            "html" => {
                println!("{}", html::generate_html(&report));
            }
            _ => {
                // text format
                print_checklist(&report);
            }
        }

        if let Some(path) = &save {
            report.save_json(path)?;
            eprintln!("Snapshot saved to: {}", path.display());
        }
    }

    Ok(())
}

pub(crate) fn load_chapters(path: &PathBuf) -> Result<Vec<Chapter>> {
    if path.is_dir() {
        prepcheck_core::parser::load_chapter_directory(path)
    } else {
        Ok(vec![prepcheck_core::parser::parse_chapter(path)?])
    }
}

fn print_checklist(report: &ProgressReport) {
    use comfy_table::{Cell, Table};

    println!("{}. {}", report.chapter.number, report.chapter.name);

    let mut table = Table::new();
    table.set_header(vec!["Lesson", "Status"]);
    for leaf in &report.leaves {
        table.add_row(vec![
            Cell::new(&leaf.title),
            Cell::new(status_label(leaf.status)),
        ]);
    }
    println!("{table}");

    match report.progress.percentage() {
        Ok(percent) => println!(
            "Progress: {}/{} ({percent}%)",
            report.progress.completed, report.progress.total
        ),
        Err(_) => println!("Progress: no lessons in this chapter yet"),
    }
}
