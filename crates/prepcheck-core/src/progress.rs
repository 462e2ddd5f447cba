//! Chapter progress aggregation.
//!
//! Flattens a chapter's topic tree into leaves and counts completion.
//! A topic with subtopics contributes only its subtopics; a topic
//! without subtopics is itself a leaf.

use serde::{Deserialize, Serialize};

use crate::error::StatsError;
use crate::model::{Chapter, TopicStatus};

/// A completed/total pair for a chapter checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    /// Leaves whose status is done.
    pub completed: u32,
    /// All leaves.
    pub total: u32,
}

impl ProgressRecord {
    /// Rounded percentage of completed leaves.
    ///
    /// Fails with [`StatsError::DivisionUndefined`] for a zero total;
    /// callers render "no content" instead of a number.
    pub fn percentage(&self) -> Result<u8, StatsError> {
        if self.total == 0 {
            return Err(StatsError::DivisionUndefined);
        }
        let rounded = (f64::from(self.completed) / f64::from(self.total) * 100.0).round() as u8;
        // 199/200 rounds to 100; a full bar must always mean done.
        if self.completed < self.total {
            Ok(rounded.min(99))
        } else {
            Ok(rounded)
        }
    }

    /// Returns `true` when every leaf is done (and there is at least one).
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}

/// One leaf of the flattened topic tree, as shown in checklists and
/// persisted in progress reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeafProgress {
    /// Stable key: the topic id, or `topic id/subtopic title`.
    pub key: String,
    /// Display title.
    pub title: String,
    /// Completion state.
    pub status: TopicStatus,
}

/// Flatten the chapter's topic tree into leaves.
pub fn leaves(chapter: &Chapter) -> Vec<LeafProgress> {
    let mut out = Vec::new();
    for topic in &chapter.topics {
        if topic.subtopics.is_empty() {
            out.push(LeafProgress {
                key: topic.id.clone(),
                title: topic.title.clone(),
                status: topic.status,
            });
        } else {
            for sub in &topic.subtopics {
                out.push(LeafProgress {
                    key: format!("{}/{}", topic.id, sub.title),
                    title: sub.title.clone(),
                    status: sub.status,
                });
            }
        }
    }
    out
}

/// Count completed and total leaves for a chapter.
pub fn aggregate(chapter: &Chapter) -> ProgressRecord {
    let leaves = leaves(chapter);
    ProgressRecord {
        completed: leaves.iter().filter(|l| l.status.is_done()).count() as u32,
        total: leaves.len() as u32,
    }
}

impl Chapter {
    /// The chapter's flattened checklist leaves.
    pub fn leaves(&self) -> Vec<LeafProgress> {
        leaves(self)
    }

    /// The chapter's completed/total progress.
    pub fn progress(&self) -> ProgressRecord {
        aggregate(self)
    }
}
