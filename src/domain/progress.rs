//! Reading-status derivation for chapters and clubs.
//!
//! All views (club list, club detail, progress update responses) derive
//! statuses from raw counts through this module, so a chapter shows the same
//! status everywhere it appears.
//!
//! # Chapter status
//!
//! | viewer completed | completed vs members    | status         |
//! |------------------|-------------------------|----------------|
//! | yes              | `completed >= members`  | `all_complete` |
//! | yes              | `completed < members`   | `complete`     |
//! | no               | `completed > 0`         | `incomplete`   |
//! | no               | `completed == 0`        | `not_started`  |

use serde::Serialize;

/// Reading status of a chapter or club from one member's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    NotStarted,
    Incomplete,
    Complete,
    AllComplete,
}

impl ProgressStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressStatus::NotStarted => "not_started",
            ProgressStatus::Incomplete => "incomplete",
            ProgressStatus::Complete => "complete",
            ProgressStatus::AllComplete => "all_complete",
        }
    }
}

/// Raw progress counts for one chapter as seen by one viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChapterTally {
    pub member_count: i64,
    pub completed_count: i64,
    pub viewer_completed: bool,
}

impl ChapterTally {
    pub fn new(member_count: i64, completed_count: i64, viewer_completed: bool) -> Self {
        Self {
            member_count: member_count.max(0),
            completed_count: completed_count.max(0),
            viewer_completed,
        }
    }

    pub fn status(&self) -> ProgressStatus {
        if self.viewer_completed {
            if self.completed_count >= self.member_count {
                ProgressStatus::AllComplete
            } else {
                ProgressStatus::Complete
            }
        } else if self.completed_count > 0 {
            ProgressStatus::Incomplete
        } else {
            ProgressStatus::NotStarted
        }
    }

    /// Tally after the viewer marks (or unmarks) the chapter.
    ///
    /// Marking an already-completed chapter, or unmarking one that was never
    /// completed, leaves the tally unchanged.
    pub fn with_viewer_completed(&self, completed: bool) -> Self {
        if completed == self.viewer_completed {
            return *self;
        }

        let completed_count = if completed {
            self.completed_count + 1
        } else {
            (self.completed_count - 1).max(0)
        };

        Self {
            member_count: self.member_count,
            completed_count,
            viewer_completed: completed,
        }
    }
}

/// Aggregate reading progress of a club for one viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClubProgress {
    pub status: ProgressStatus,
    pub chapters_total: usize,
    pub chapters_completed: usize,
    /// Zero-based index of the first chapter the viewer has not completed.
    pub current_chapter: Option<usize>,
}

/// Derives club progress from its chapters' tallies, in chapter order.
pub fn club_progress(tallies: &[ChapterTally]) -> ClubProgress {
    let chapters_total = tallies.len();
    let chapters_completed = tallies.iter().filter(|t| t.viewer_completed).count();
    let current_chapter = tallies.iter().position(|t| !t.viewer_completed);

    let status = if tallies.is_empty() {
        ProgressStatus::NotStarted
    } else if tallies
        .iter()
        .all(|t| t.status() == ProgressStatus::AllComplete)
    {
        ProgressStatus::AllComplete
    } else if chapters_completed == chapters_total {
        ProgressStatus::Complete
    } else if tallies.iter().any(|t| t.completed_count > 0) {
        ProgressStatus::Incomplete
    } else {
        ProgressStatus::NotStarted
    };

    ClubProgress {
        status,
        chapters_total,
        chapters_completed,
        current_chapter,
    }
}
