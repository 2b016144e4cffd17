//! Chapter entities and their progress tallies.

use crate::domain::progress::ChapterTally;

/// An ordered unit of a club's book. Positions start at 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    pub id: i64,
    pub club_id: i64,
    pub position: i32,
    pub title: String,
}

/// A chapter together with its progress counts for one viewer.
#[derive(Debug, Clone)]
pub struct ChapterWithTally {
    pub chapter: Chapter,
    pub tally: ChapterTally,
}

/// Progress counts for one chapter of one of the viewer's clubs.
///
/// Used to derive club statuses for the club list in a single query.
#[derive(Debug, Clone)]
pub struct ClubChapterTally {
    pub club_id: i64,
    pub position: i32,
    pub tally: ChapterTally,
}
