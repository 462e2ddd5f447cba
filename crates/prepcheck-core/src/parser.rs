//! TOML chapter file parser.
//!
//! Loads chapters from TOML files and directories, and validates them.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{
    Chapter, Dataset, Observation, Quiz, QuizField, Sample, Subtopic, Topic, TopicStatus,
};

/// Intermediate TOML structure for parsing chapter files.
#[derive(Debug, Deserialize)]
struct TomlChapterFile {
    chapter: TomlChapterHeader,
    #[serde(default)]
    topics: Vec<TomlTopic>,
    #[serde(default)]
    datasets: Vec<TomlDataset>,
    #[serde(default)]
    quizzes: Vec<TomlQuiz>,
}

#[derive(Debug, Deserialize)]
struct TomlChapterHeader {
    id: String,
    name: String,
    #[serde(default)]
    number: u32,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlTopic {
    id: String,
    title: String,
    status: String,
    #[serde(default)]
    subtopics: Vec<TomlSubtopic>,
}

#[derive(Debug, Deserialize)]
struct TomlSubtopic {
    title: String,
    status: String,
}

#[derive(Debug, Deserialize)]
struct TomlDataset {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    observations: Vec<TomlObservation>,
}

#[derive(Debug, Deserialize)]
struct TomlObservation {
    value: f64,
    #[serde(default)]
    tags: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct TomlQuiz {
    id: String,
    #[serde(default)]
    prompt: String,
    #[serde(default)]
    fields: Vec<TomlQuizField>,
}

#[derive(Debug, Deserialize)]
struct TomlQuizField {
    id: String,
    #[serde(default)]
    label: String,
    options: Vec<String>,
    correct: String,
}

/// Parse a single TOML file into a `Chapter`.
pub fn parse_chapter(path: &Path) -> Result<Chapter> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read chapter file: {}", path.display()))?;

    parse_chapter_str(&content, path)
}

/// Parse a TOML string into a `Chapter` (useful for testing).
pub fn parse_chapter_str(content: &str, source_path: &Path) -> Result<Chapter> {
    let parsed: TomlChapterFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let topics = parsed
        .topics
        .into_iter()
        .map(|t| {
            let status = parse_status(&t.status, &t.id)?;
            let subtopics = t
                .subtopics
                .into_iter()
                .map(|s| {
                    Ok(Subtopic {
                        status: parse_status(&s.status, &s.title)?,
                        title: s.title,
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(Topic {
                id: t.id,
                title: t.title,
                status,
                subtopics,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let datasets = parsed
        .datasets
        .into_iter()
        .map(|d| Dataset {
            id: d.id,
            name: d.name,
            sample: Sample::from(
                d.observations
                    .into_iter()
                    .map(|o| Observation {
                        value: o.value,
                        tags: o.tags,
                    })
                    .collect::<Vec<_>>(),
            ),
        })
        .collect();

    let quizzes = parsed
        .quizzes
        .into_iter()
        .map(|q| Quiz {
            id: q.id,
            prompt: q.prompt,
            fields: q
                .fields
                .into_iter()
                .map(|f| QuizField {
                    id: f.id,
                    label: f.label,
                    options: f.options,
                    correct: f.correct,
                })
                .collect(),
        })
        .collect();

    Ok(Chapter {
        id: parsed.chapter.id,
        name: parsed.chapter.name,
        number: parsed.chapter.number,
        description: parsed.chapter.description,
        topics,
        datasets,
        quizzes,
    })
}

fn parse_status(raw: &str, context: &str) -> Result<TopicStatus> {
    raw.parse()
        .map_err(|e: String| anyhow::anyhow!("{e} (in `{context}`)"))
}

/// Recursively load all `.toml` chapter files from a directory.
pub fn load_chapter_directory(dir: &Path) -> Result<Vec<Chapter>> {
    let mut chapters = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            chapters.extend(load_chapter_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_chapter(&path) {
                Ok(chapter) => chapters.push(chapter),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(chapters)
}

/// A warning from chapter validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The topic/dataset/quiz id the warning refers to (if applicable).
    pub subject: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a chapter for common authoring mistakes.
pub fn validate_chapter(chapter: &Chapter) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    // Duplicate ids across each collection
    let mut seen = std::collections::HashSet::new();
    for topic in &chapter.topics {
        if !seen.insert(&topic.id) {
            warnings.push(ValidationWarning {
                subject: Some(topic.id.clone()),
                message: format!("duplicate topic ID: {}", topic.id),
            });
        }
    }
    let mut seen = std::collections::HashSet::new();
    for dataset in &chapter.datasets {
        if !seen.insert(&dataset.id) {
            warnings.push(ValidationWarning {
                subject: Some(dataset.id.clone()),
                message: format!("duplicate dataset ID: {}", dataset.id),
            });
        }
    }
    let mut seen = std::collections::HashSet::new();
    for quiz in &chapter.quizzes {
        if !seen.insert(&quiz.id) {
            warnings.push(ValidationWarning {
                subject: Some(quiz.id.clone()),
                message: format!("duplicate quiz ID: {}", quiz.id),
            });
        }
    }

    // Subtopic titles key progress leaves, so they must be unique too
    for topic in &chapter.topics {
        let mut seen = std::collections::HashSet::new();
        for sub in &topic.subtopics {
            if !seen.insert(&sub.title) {
                warnings.push(ValidationWarning {
                    subject: Some(topic.id.clone()),
                    message: format!("duplicate subtopic title: {}", sub.title),
                });
            }
        }
    }

    // A dataset with no observations makes every statistic fail
    for dataset in &chapter.datasets {
        if dataset.sample.is_empty() {
            warnings.push(ValidationWarning {
                subject: Some(dataset.id.clone()),
                message: "dataset has no observations".into(),
            });
        }
    }

    for quiz in &chapter.quizzes {
        if quiz.fields.is_empty() {
            warnings.push(ValidationWarning {
                subject: Some(quiz.id.clone()),
                message: "quiz has no fields".into(),
            });
        }
        let mut seen = std::collections::HashSet::new();
        for field in &quiz.fields {
            if !seen.insert(&field.id) {
                warnings.push(ValidationWarning {
                    subject: Some(quiz.id.clone()),
                    message: format!("duplicate field ID: {}", field.id),
                });
            }
            if !field.options.contains(&field.correct) {
                warnings.push(ValidationWarning {
                    subject: Some(quiz.id.clone()),
                    message: format!(
                        "field `{}`: correct answer `{}` is not among its options",
                        field.id, field.correct
                    ),
                });
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TopicStatus;
    use std::path::PathBuf;

    const VALID_TOML: &str = r#"
[chapter]
id = "statistics"
name = "Statistics"
number = 14
description = "Descriptive statistics for the quant section"

[[topics]]
id = "medians"
title = "Medians from tables"
status = "done"

[[topics]]
id = "spread"
title = "Comparing standard deviations"
status = "in-progress"

[[topics.subtopics]]
title = "Equal-sized sets"
status = "done"

[[topics.subtopics]]
title = "Range reasoning"
status = "todo"

[[datasets]]
id = "annual-sales"
name = "Annual candy and fruit sales"

[[datasets.observations]]
value = 1.1
tags = { year = "2001", market = "Down" }

[[datasets.observations]]
value = 2.3
tags = { year = "2002", market = "Down" }

[[datasets.observations]]
value = 4.0
tags = { year = "2003", market = "Up" }

[[quizzes]]
id = "east-west"
prompt = "Based on the monthly revenue chart:"

[[quizzes.fields]]
id = "below_five"
label = "Months with East revenue below 5 million"
options = ["3", "4", "5", "6", "7"]
correct = "6"
"#;

    #[test]
    fn parse_valid_toml() {
        let chapter = parse_chapter_str(VALID_TOML, &PathBuf::from("test.toml")).unwrap();
        assert_eq!(chapter.id, "statistics");
        assert_eq!(chapter.number, 14);
        assert_eq!(chapter.topics.len(), 2);
        assert_eq!(chapter.topics[0].status, TopicStatus::Done);
        assert_eq!(chapter.topics[1].subtopics.len(), 2);
        assert_eq!(
            chapter.topics[1].subtopics[1].status,
            TopicStatus::NotStarted
        );
        assert_eq!(chapter.datasets[0].sample.len(), 3);
        assert_eq!(
            chapter.datasets[0].sample.observations[0].tag("market"),
            Some("Down")
        );
        assert_eq!(chapter.quizzes[0].fields[0].correct, "6");
    }

    #[test]
    fn parse_status_synonyms() {
        let toml = r#"
[chapter]
id = "minimal"
name = "Minimal"

[[topics]]
id = "a"
title = "A"
status = "completed"

[[topics]]
id = "b"
title = "B"
status = "examples-pending"
"#;
        let chapter = parse_chapter_str(toml, &PathBuf::from("test.toml")).unwrap();
        assert_eq!(chapter.topics[0].status, TopicStatus::Done);
        assert_eq!(chapter.topics[1].status, TopicStatus::InProgress);
    }

    #[test]
    fn parse_unknown_status_fails() {
        let toml = r#"
[chapter]
id = "bad"
name = "Bad"

[[topics]]
id = "a"
title = "A"
status = "finished?"
"#;
        let err = parse_chapter_str(toml, &PathBuf::from("test.toml")).unwrap_err();
        assert!(err.to_string().contains("unknown status"));
    }

    #[test]
    fn parse_missing_optional_fields() {
        let toml = r#"
[chapter]
id = "minimal"
name = "Minimal"
"#;
        let chapter = parse_chapter_str(toml, &PathBuf::from("test.toml")).unwrap();
        assert_eq!(chapter.number, 0);
        assert!(chapter.topics.is_empty());
        assert!(chapter.datasets.is_empty());
        assert!(chapter.quizzes.is_empty());
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        let result = parse_chapter_str(bad, &PathBuf::from("bad.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn validate_clean_chapter() {
        let chapter = parse_chapter_str(VALID_TOML, &PathBuf::from("test.toml")).unwrap();
        assert!(validate_chapter(&chapter).is_empty());
    }

    #[test]
    fn validate_duplicate_topic_ids() {
        let toml = r#"
[chapter]
id = "dupes"
name = "Dupes"

[[topics]]
id = "same"
title = "First"
status = "done"

[[topics]]
id = "same"
title = "Second"
status = "todo"
"#;
        let chapter = parse_chapter_str(toml, &PathBuf::from("test.toml")).unwrap();
        let warnings = validate_chapter(&chapter);
        assert!(warnings.iter().any(|w| w.message.contains("duplicate topic")));
    }

    #[test]
    fn validate_empty_dataset() {
        let toml = r#"
[chapter]
id = "empty-data"
name = "Empty Data"

[[datasets]]
id = "nothing"
"#;
        let chapter = parse_chapter_str(toml, &PathBuf::from("test.toml")).unwrap();
        let warnings = validate_chapter(&chapter);
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("no observations")));
    }

    #[test]
    fn validate_correct_answer_outside_options() {
        let toml = r#"
[chapter]
id = "quiz-bad"
name = "Quiz Bad"

[[quizzes]]
id = "q1"

[[quizzes.fields]]
id = "f1"
options = ["3", "4"]
correct = "6"
"#;
        let chapter = parse_chapter_str(toml, &PathBuf::from("test.toml")).unwrap();
        let warnings = validate_chapter(&chapter);
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("not among its options")));
    }

    #[test]
    fn validate_quiz_without_fields() {
        let toml = r#"
[chapter]
id = "quiz-empty"
name = "Quiz Empty"

[[quizzes]]
id = "q1"
"#;
        let chapter = parse_chapter_str(toml, &PathBuf::from("test.toml")).unwrap();
        let warnings = validate_chapter(&chapter);
        assert!(warnings.iter().any(|w| w.message.contains("no fields")));
    }

    #[test]
    fn load_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("statistics.toml");
        std::fs::write(&file_path, VALID_TOML).unwrap();

        let nested = dir.path().join("verbal");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(
            nested.join("broken.toml"),
            "not a chapter at all [",
        )
        .unwrap();

        // The malformed file is skipped with a warning, not a hard error.
        let chapters = load_chapter_directory(dir.path()).unwrap();
        assert_eq!(chapters.len(), 1);
        assert_eq!(chapters[0].id, "statistics");
    }
}
