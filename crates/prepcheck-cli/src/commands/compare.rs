//! The `prepcheck compare` command.

use std::path::PathBuf;

use anyhow::Result;

use prepcheck_core::report::ProgressReport;

pub fn execute(
    baseline_path: PathBuf,
    current_path: PathBuf,
    format: String,
    fail_on_regression: bool,
) -> Result<()> {
    let baseline = ProgressReport::load_json(&baseline_path)?;
    let current = ProgressReport::load_json(&current_path)?;

    let delta = current.compare(&baseline);

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", delta.to_markdown());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&delta)?);
        }
        _ => {
            // text format
            println!(
                "Comparison: {} newly completed, {} regressed, {} unchanged",
                delta.newly_completed.len(),
                delta.regressed.len(),
                delta.unchanged
            );

            if !delta.newly_completed.is_empty() {
                println!("\nNewly completed:");
                for c in &delta.newly_completed {
                    println!("  {} ({} -> {})", c.key, c.baseline, c.current);
                }
            }

            if !delta.regressed.is_empty() {
                println!("\nRegressed:");
                for c in &delta.regressed {
                    println!("  {} ({} -> {})", c.key, c.baseline, c.current);
                }
            }

            if delta.added > 0 {
                println!("\n{} new lesson(s)", delta.added);
            }
            if delta.removed > 0 {
                println!("{} removed lesson(s)", delta.removed);
            }
        }
    }

    if fail_on_regression && delta.has_regressions() {
        std::process::exit(1);
    }

    Ok(())
}
