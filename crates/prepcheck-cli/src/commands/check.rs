//! The `prepcheck check` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use prepcheck_core::quiz::Selections;

pub fn execute(chapter_path: PathBuf, quiz_id: String, answers: String) -> Result<()> {
    let chapter = prepcheck_core::parser::parse_chapter(&chapter_path)?;

    let quiz = chapter
        .quiz(&quiz_id)
        .with_context(|| format!("no quiz `{quiz_id}` in chapter `{}`", chapter.id))?;

    let selections = parse_selections(&answers)?;
    let grade = quiz
        .grade(&selections)
        .with_context(|| format!("cannot grade quiz `{quiz_id}`"))?;

    for field in &grade.fields {
        if field.correct {
            println!("  {}: {} (correct)", field.field, field.selected);
        } else {
            println!(
                "  {}: {} (incorrect, expected {})",
                field.field, field.selected, field.expected
            );
        }
    }

    println!("Score: {}", grade.summary());
    if grade.all_correct() {
        println!("All correct!");
    }

    Ok(())
}

/// Parse `"field=value,field=value"` selections.
fn parse_selections(answers: &str) -> Result<Selections> {
    let mut selections = Selections::new();
    for pair in answers.split(',') {
        let pair = pair.trim();
        if pair.is_empty() {
            continue;
        }
        let (field, value) = pair
            .split_once('=')
            .with_context(|| format!("invalid selection `{pair}`, expected field=value"))?;
        selections.insert(field.trim().to_string(), value.trim().to_string());
    }
    Ok(selections)
}
