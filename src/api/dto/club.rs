//! DTOs for clubs, chapters and members.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

use crate::application::services::{ChapterView, ClubDetail, ClubSummary};
use crate::domain::entities::{Club, ClubPatch, Member, MemberRole};
use crate::domain::progress::{ClubProgress, ProgressStatus};
use crate::error::AppError;

/// Request to create a club around a book.
///
/// ```json
/// {
///   "name": "Sunday sci-fi",
///   "book_title": "Dune",
///   "book_author": "Frank Herbert",
///   "cover_url": "https://covers.openlibrary.org/b/id/11481354-L.jpg",
///   "chapters": ["Book One: Dune", "Book Two: Muad'Dib", "Book Three: The Prophet"]
/// }
/// ```
#[derive(Debug, Deserialize, Validate)]
pub struct CreateClubRequest {
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub book_title: String,

    #[validate(length(max = 200, message = "must be at most 200 characters"))]
    pub book_author: Option<String>,

    #[validate(url(message = "Invalid URL format"))]
    pub cover_url: Option<String>,

    #[validate(length(min = 1, max = 500, message = "must contain 1-500 chapters"))]
    pub chapters: Vec<String>,
}

/// Partial club update. Omitted fields are left unchanged; `null` clears
/// `book_author` and `cover_url`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateClubRequest {
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub book_title: Option<String>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub book_author: Option<Option<String>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub cover_url: Option<Option<String>>,
}

impl UpdateClubRequest {
    /// Validates fields `validator` cannot reach inside the double option.
    pub fn validate_nested(&self) -> Result<(), AppError> {
        if let Some(Some(url)) = &self.cover_url
            && url::Url::parse(url).is_err()
        {
            return Err(AppError::bad_request(
                "Validation failed",
                json!({ "fields": { "cover_url": ["Invalid URL format"] } }),
            ));
        }

        if let Some(Some(author)) = &self.book_author
            && author.chars().count() > 200
        {
            return Err(AppError::bad_request(
                "Validation failed",
                json!({ "fields": { "book_author": ["must be at most 200 characters"] } }),
            ));
        }

        Ok(())
    }

    pub fn into_patch(self) -> ClubPatch {
        ClubPatch {
            name: self.name,
            book_title: self.book_title,
            book_author: self.book_author,
            cover_url: self.cover_url,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ClubResponse {
    pub id: i64,
    pub name: String,
    pub book_title: String,
    pub book_author: Option<String>,
    pub cover_url: Option<String>,
    pub owner_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Club> for ClubResponse {
    fn from(club: Club) -> Self {
        Self {
            id: club.id,
            name: club.name,
            book_title: club.book_title,
            book_author: club.book_author,
            cover_url: club.cover_url,
            owner_id: club.owner_id,
            created_at: club.created_at,
            updated_at: club.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ClubSummaryResponse {
    #[serde(flatten)]
    pub club: ClubResponse,
    pub progress: ClubProgress,
}

impl From<ClubSummary> for ClubSummaryResponse {
    fn from(summary: ClubSummary) -> Self {
        Self {
            club: summary.club.into(),
            progress: summary.progress,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChapterResponse {
    pub id: i64,
    pub position: i32,
    pub title: String,
    pub status: ProgressStatus,
    pub completed_count: i64,
    pub member_count: i64,
}

impl From<ChapterView> for ChapterResponse {
    fn from(view: ChapterView) -> Self {
        Self {
            id: view.chapter.id,
            position: view.chapter.position,
            title: view.chapter.title,
            status: view.status,
            completed_count: view.tally.completed_count,
            member_count: view.tally.member_count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ClubDetailResponse {
    #[serde(flatten)]
    pub club: ClubResponse,
    pub role: MemberRole,
    pub progress: ClubProgress,
    pub chapters: Vec<ChapterResponse>,
}

impl From<ClubDetail> for ClubDetailResponse {
    fn from(detail: ClubDetail) -> Self {
        Self {
            club: detail.club.into(),
            role: detail.role,
            progress: detail.progress,
            chapters: detail.chapters.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MemberResponse {
    pub user_id: i64,
    pub username: String,
    pub display_name: String,
    pub role: MemberRole,
    pub joined_at: DateTime<Utc>,
}

impl From<Member> for MemberResponse {
    fn from(member: Member) -> Self {
        Self {
            user_id: member.user_id,
            username: member.username,
            display_name: member.display_name,
            role: member.role,
            joined_at: member.joined_at,
        }
    }
}
