//! Progress report snapshots with JSON persistence and baseline
//! comparison.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{Chapter, TopicStatus};
use crate::progress::{LeafProgress, ProgressRecord};

/// A snapshot of one chapter's progress at a point in time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the snapshot was taken.
    pub created_at: DateTime<Utc>,
    /// Summary of the chapter.
    pub chapter: ChapterSummary,
    /// The flattened checklist leaves with their statuses.
    pub leaves: Vec<LeafProgress>,
    /// Completed/total counts over the leaves.
    pub progress: ProgressRecord,
}

/// Summary of a chapter (without the full content definitions).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterSummary {
    pub id: String,
    pub name: String,
    pub number: u32,
}

impl ProgressReport {
    /// Snapshot a chapter's current progress.
    pub fn for_chapter(chapter: &Chapter) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            chapter: ChapterSummary {
                id: chapter.id.clone(),
                name: chapter.name.clone(),
                number: chapter.number,
            },
            leaves: chapter.leaves(),
            progress: chapter.progress(),
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: ProgressReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Compare this report against a baseline snapshot.
    pub fn compare(&self, baseline: &ProgressReport) -> ProgressDelta {
        let baseline_statuses: HashMap<&str, TopicStatus> = baseline
            .leaves
            .iter()
            .map(|l| (l.key.as_str(), l.status))
            .collect();
        let current_keys: std::collections::HashSet<&str> =
            self.leaves.iter().map(|l| l.key.as_str()).collect();

        let mut newly_completed = Vec::new();
        let mut regressed = Vec::new();
        let mut unchanged = 0usize;
        let mut added = 0usize;

        for leaf in &self.leaves {
            match baseline_statuses.get(leaf.key.as_str()) {
                Some(&before) => {
                    if !before.is_done() && leaf.status.is_done() {
                        newly_completed.push(LeafChange {
                            key: leaf.key.clone(),
                            baseline: before,
                            current: leaf.status,
                        });
                    } else if before.is_done() && !leaf.status.is_done() {
                        regressed.push(LeafChange {
                            key: leaf.key.clone(),
                            baseline: before,
                            current: leaf.status,
                        });
                    } else {
                        unchanged += 1;
                    }
                }
                None => added += 1,
            }
        }

        let removed = baseline
            .leaves
            .iter()
            .filter(|l| !current_keys.contains(l.key.as_str()))
            .count();

        ProgressDelta {
            newly_completed,
            regressed,
            unchanged,
            added,
            removed,
        }
    }
}

/// Result of comparing two progress snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressDelta {
    /// Leaves that became done since the baseline.
    pub newly_completed: Vec<LeafChange>,
    /// Leaves that moved away from done since the baseline.
    pub regressed: Vec<LeafChange>,
    /// Leaves in both snapshots with no completion change.
    pub unchanged: usize,
    /// Leaves in current but not baseline.
    pub added: usize,
    /// Leaves in baseline but not current.
    pub removed: usize,
}

/// A single leaf whose completion changed between snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeafChange {
    pub key: String,
    pub baseline: TopicStatus,
    pub current: TopicStatus,
}

impl ProgressDelta {
    /// Format the delta as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**Summary:** {} newly completed, {} regressed, {} unchanged\n\n",
            self.newly_completed.len(),
            self.regressed.len(),
            self.unchanged
        ));

        if !self.newly_completed.is_empty() {
            md.push_str("### Newly completed\n\n");
            md.push_str("| Leaf | Before | Now |\n");
            md.push_str("|------|--------|-----|\n");
            for c in &self.newly_completed {
                md.push_str(&format!("| {} | {} | {} |\n", c.key, c.baseline, c.current));
            }
            md.push('\n');
        }

        if !self.regressed.is_empty() {
            md.push_str("### Regressed\n\n");
            md.push_str("| Leaf | Before | Now |\n");
            md.push_str("|------|--------|-----|\n");
            for c in &self.regressed {
                md.push_str(&format!("| {} | {} | {} |\n", c.key, c.baseline, c.current));
            }
        }

        md
    }

    /// Returns true if any leaf moved away from done.
    pub fn has_regressions(&self) -> bool {
        !self.regressed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Chapter, Subtopic, Topic};

    fn make_chapter(statuses: &[(&str, TopicStatus)]) -> Chapter {
        Chapter {
            id: "stats".into(),
            name: "Statistics".into(),
            number: 14,
            description: String::new(),
            topics: statuses
                .iter()
                .map(|(id, status)| Topic {
                    id: (*id).into(),
                    title: (*id).into(),
                    status: *status,
                    subtopics: vec![],
                })
                .collect(),
            datasets: vec![],
            quizzes: vec![],
        }
    }

    #[test]
    fn snapshot_captures_progress() {
        let chapter = make_chapter(&[
            ("medians", TopicStatus::Done),
            ("spread", TopicStatus::NotStarted),
        ]);
        let report = ProgressReport::for_chapter(&chapter);
        assert_eq!(report.chapter.id, "stats");
        assert_eq!(report.leaves.len(), 2);
        assert_eq!(report.progress.completed, 1);
        assert_eq!(report.progress.total, 2);
    }

    #[test]
    fn snapshot_keys_subtopic_leaves() {
        let mut chapter = make_chapter(&[]);
        chapter.topics.push(Topic {
            id: "functions".into(),
            title: "Functions".into(),
            status: TopicStatus::NotStarted,
            subtopics: vec![Subtopic {
                title: "Domains".into(),
                status: TopicStatus::Done,
            }],
        });
        let report = ProgressReport::for_chapter(&chapter);
        assert_eq!(report.leaves[0].key, "functions/Domains");
    }

    #[test]
    fn compare_identical_snapshots() {
        let chapter = make_chapter(&[("medians", TopicStatus::Done)]);
        let baseline = ProgressReport::for_chapter(&chapter);
        let current = ProgressReport::for_chapter(&chapter);

        let delta = current.compare(&baseline);
        assert!(delta.newly_completed.is_empty());
        assert!(delta.regressed.is_empty());
        assert_eq!(delta.unchanged, 1);
        assert!(!delta.has_regressions());
    }

    #[test]
    fn compare_detects_newly_completed() {
        let baseline =
            ProgressReport::for_chapter(&make_chapter(&[("medians", TopicStatus::InProgress)]));
        let current = ProgressReport::for_chapter(&make_chapter(&[("medians", TopicStatus::Done)]));

        let delta = current.compare(&baseline);
        assert_eq!(delta.newly_completed.len(), 1);
        assert_eq!(delta.newly_completed[0].key, "medians");
        assert!(delta.regressed.is_empty());
    }

    #[test]
    fn compare_detects_regression() {
        let baseline = ProgressReport::for_chapter(&make_chapter(&[("medians", TopicStatus::Done)]));
        let current =
            ProgressReport::for_chapter(&make_chapter(&[("medians", TopicStatus::NotStarted)]));

        let delta = current.compare(&baseline);
        assert_eq!(delta.regressed.len(), 1);
        assert!(delta.has_regressions());
    }

    #[test]
    fn status_change_between_not_done_variants_is_unchanged() {
        let baseline =
            ProgressReport::for_chapter(&make_chapter(&[("medians", TopicStatus::NotStarted)]));
        let current =
            ProgressReport::for_chapter(&make_chapter(&[("medians", TopicStatus::InProgress)]));

        let delta = current.compare(&baseline);
        assert!(delta.newly_completed.is_empty());
        assert!(delta.regressed.is_empty());
        assert_eq!(delta.unchanged, 1);
    }

    #[test]
    fn compare_counts_added_and_removed() {
        let baseline = ProgressReport::for_chapter(&make_chapter(&[("old", TopicStatus::Done)]));
        let current = ProgressReport::for_chapter(&make_chapter(&[("new", TopicStatus::Done)]));

        let delta = current.compare(&baseline);
        assert_eq!(delta.added, 1);
        assert_eq!(delta.removed, 1);
    }

    #[test]
    fn json_roundtrip() {
        let chapter = make_chapter(&[("medians", TopicStatus::Done)]);
        let report = ProgressReport::for_chapter(&chapter);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshots").join("report.json");

        report.save_json(&path).unwrap();
        let loaded = ProgressReport::load_json(&path).unwrap();

        assert_eq!(loaded.id, report.id);
        assert_eq!(loaded.chapter.id, "stats");
        assert_eq!(loaded.progress, report.progress);
    }

    #[test]
    fn markdown_output() {
        let baseline = ProgressReport::for_chapter(&make_chapter(&[("medians", TopicStatus::Done)]));
        let current =
            ProgressReport::for_chapter(&make_chapter(&[("medians", TopicStatus::NotStarted)]));

        let md = current.compare(&baseline).to_markdown();
        assert!(md.contains("Regressed"));
        assert!(md.contains("medians"));
    }
}
