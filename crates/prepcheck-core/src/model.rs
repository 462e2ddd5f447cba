//! Core content model types for prepcheck.
//!
//! These are the fundamental types the entire prepcheck system uses to
//! represent chapters, topic checklists, example datasets, and quizzes.
//! Everything is constructed once from a chapter file and never mutated.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A single numeric observation with optional categorical tags.
///
/// Mirrors one row of a worked-example data table, e.g.
/// `{ value: 2.3, tags: { year: "2002", market: "Down" } }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// The numeric value.
    pub value: f64,
    /// Categorical tags keyed by category name.
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl Observation {
    /// Create an untagged observation.
    pub fn new(value: f64) -> Self {
        Self {
            value,
            tags: BTreeMap::new(),
        }
    }

    /// Builder-style tag attachment, used heavily in tests and fixtures.
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// Look up a tag value by category name.
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }
}

/// An ordered sequence of observations sharing a source table.
///
/// Order is irrelevant to the statistics (they sort internally) but is
/// preserved by filtering so repeated computations are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// The observations, in source order.
    pub observations: Vec<Observation>,
}

impl Sample {
    /// Build a sample from raw values with no tags.
    pub fn from_values(values: &[f64]) -> Self {
        Self {
            observations: values.iter().copied().map(Observation::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// The numeric values, in source order.
    pub fn values(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.value).collect()
    }

    /// Sub-sample of observations satisfying `predicate`, preserving
    /// relative order. An empty result is valid; statistics on it then
    /// fail with [`crate::error::StatsError::EmptyInput`].
    pub fn filter<P>(&self, predicate: P) -> Sample
    where
        P: Fn(&Observation) -> bool,
    {
        Sample {
            observations: self
                .observations
                .iter()
                .filter(|o| predicate(o))
                .cloned()
                .collect(),
        }
    }

    /// Convenience filter on tag equality, e.g. `with_tag("market", "Down")`.
    pub fn with_tag(&self, key: &str, value: &str) -> Sample {
        self.filter(|o| o.tag(key) == Some(value))
    }
}

impl From<Vec<Observation>> for Sample {
    fn from(observations: Vec<Observation>) -> Self {
        Self { observations }
    }
}

/// A named sample as embedded in a chapter file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    /// Unique identifier within the chapter.
    pub id: String,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// The observations.
    pub sample: Sample,
}

/// Completion state of a topic or subtopic.
///
/// Source pages use a zoo of near-synonym labels (`"done"`,
/// `"completed"`, `"practice"`, `"examples-pending"`, ...); the model
/// keeps a closed set and maps labels at parse time. Presentation labels
/// live in the render layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TopicStatus {
    Done,
    InProgress,
    NotStarted,
}

impl TopicStatus {
    /// Returns `true` for the completed variant.
    pub fn is_done(self) -> bool {
        matches!(self, TopicStatus::Done)
    }
}

impl fmt::Display for TopicStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TopicStatus::Done => write!(f, "done"),
            TopicStatus::InProgress => write!(f, "in-progress"),
            TopicStatus::NotStarted => write!(f, "not-started"),
        }
    }
}

impl FromStr for TopicStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "done" | "completed" | "complete" => Ok(TopicStatus::Done),
            "in-progress" | "in_progress" | "practice" | "examples-pending" | "started" => {
                Ok(TopicStatus::InProgress)
            }
            "not-started" | "not_started" | "todo" | "incomplete" | "new" => {
                Ok(TopicStatus::NotStarted)
            }
            other => Err(format!("unknown status: {other}")),
        }
    }
}

/// A leaf lesson nested under a topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subtopic {
    /// Human-readable title; unique within its parent topic.
    pub title: String,
    /// Completion state.
    pub status: TopicStatus,
}

/// One entry of a chapter's checklist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
    /// Unique identifier within the chapter.
    pub id: String,
    /// Human-readable title.
    pub title: String,
    /// Completion state. Ignored by progress counting when the topic has
    /// subtopics; the subtopics are the leaves then.
    pub status: TopicStatus,
    /// Nested lessons, if any.
    #[serde(default)]
    pub subtopics: Vec<Subtopic>,
}

/// A single dropdown field of a quiz, with a fixed correct answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizField {
    /// Unique identifier within the quiz.
    pub id: String,
    /// Prompt text shown next to the field.
    #[serde(default)]
    pub label: String,
    /// Allowed selections, excluding the placeholder.
    pub options: Vec<String>,
    /// The correct option.
    pub correct: String,
}

/// A worked-example quiz comparing selections to fixed correct answers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    /// Unique identifier within the chapter.
    pub id: String,
    /// Question text.
    #[serde(default)]
    pub prompt: String,
    /// The answer fields.
    pub fields: Vec<QuizField>,
}

/// A chapter of study content: checklist topics, example datasets, and
/// quizzes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chapter {
    /// Unique identifier, e.g. "statistics".
    pub id: String,
    /// Human-readable name, e.g. "Statistics".
    pub name: String,
    /// Chapter number in the study plan.
    #[serde(default)]
    pub number: u32,
    /// Description shown on the end-of-chapter page.
    #[serde(default)]
    pub description: String,
    /// The checklist.
    #[serde(default)]
    pub topics: Vec<Topic>,
    /// Worked-example data tables.
    #[serde(default)]
    pub datasets: Vec<Dataset>,
    /// Worked-example quizzes.
    #[serde(default)]
    pub quizzes: Vec<Quiz>,
}

impl Chapter {
    /// Look up a dataset by id.
    pub fn dataset(&self, id: &str) -> Option<&Dataset> {
        self.datasets.iter().find(|d| d.id == id)
    }

    /// Look up a quiz by id.
    pub fn quiz(&self, id: &str) -> Option<&Quiz> {
        self.quizzes.iter().find(|q| q.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_display_and_parse() {
        assert_eq!(TopicStatus::Done.to_string(), "done");
        assert_eq!(TopicStatus::InProgress.to_string(), "in-progress");
        assert_eq!("done".parse::<TopicStatus>().unwrap(), TopicStatus::Done);
        assert_eq!(
            "Completed".parse::<TopicStatus>().unwrap(),
            TopicStatus::Done
        );
        assert_eq!(
            "practice".parse::<TopicStatus>().unwrap(),
            TopicStatus::InProgress
        );
        assert_eq!(
            "examples-pending".parse::<TopicStatus>().unwrap(),
            TopicStatus::InProgress
        );
        assert_eq!(
            "todo".parse::<TopicStatus>().unwrap(),
            TopicStatus::NotStarted
        );
        assert_eq!(
            "incomplete".parse::<TopicStatus>().unwrap(),
            TopicStatus::NotStarted
        );
        assert!("finished?".parse::<TopicStatus>().is_err());
    }

    #[test]
    fn status_serde_uses_canonical_labels() {
        let json = serde_json::to_string(&TopicStatus::NotStarted).unwrap();
        assert_eq!(json, "\"not-started\"");
        let status: TopicStatus = serde_json::from_str("\"in-progress\"").unwrap();
        assert_eq!(status, TopicStatus::InProgress);
    }

    #[test]
    fn sample_filter_preserves_order() {
        let sample = Sample::from(vec![
            Observation::new(1.0).with_tag("market", "Down"),
            Observation::new(2.0).with_tag("market", "Up"),
            Observation::new(3.0).with_tag("market", "Down"),
        ]);
        let down = sample.with_tag("market", "Down");
        assert_eq!(down.values(), vec![1.0, 3.0]);
    }

    #[test]
    fn sample_filter_is_idempotent() {
        let sample = Sample::from(vec![
            Observation::new(1.1).with_tag("market", "Down"),
            Observation::new(4.0).with_tag("market", "Up"),
            Observation::new(1.9).with_tag("market", "Down"),
        ]);
        let once = sample.with_tag("market", "Down");
        let twice = once.with_tag("market", "Down");
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_filter_result_is_valid() {
        let sample = Sample::from_values(&[1.0, 2.0]);
        let none = sample.with_tag("market", "Sideways");
        assert!(none.is_empty());
    }

    #[test]
    fn chapter_lookups() {
        let chapter = Chapter {
            id: "stats".into(),
            name: "Statistics".into(),
            number: 14,
            description: String::new(),
            topics: vec![],
            datasets: vec![Dataset {
                id: "sales".into(),
                name: "Sales".into(),
                sample: Sample::from_values(&[1.0]),
            }],
            quizzes: vec![Quiz {
                id: "q1".into(),
                prompt: String::new(),
                fields: vec![],
            }],
        };
        assert!(chapter.dataset("sales").is_some());
        assert!(chapter.dataset("missing").is_none());
        assert!(chapter.quiz("q1").is_some());
        assert!(chapter.quiz("q2").is_none());
    }

    #[test]
    fn observation_serde_roundtrip() {
        let obs = Observation::new(2.3)
            .with_tag("year", "2002")
            .with_tag("market", "Down");
        let json = serde_json::to_string(&obs).unwrap();
        let back: Observation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, obs);
        assert_eq!(back.tag("market"), Some("Down"));
    }
}
