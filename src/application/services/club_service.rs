//! Club lifecycle and membership service.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::json;

use super::access::{require_member, require_owner};
use crate::domain::entities::{Chapter, Club, ClubPatch, Member, MemberRole, NewClub};
use crate::domain::progress::{ChapterTally, ClubProgress, ProgressStatus, club_progress};
use crate::domain::repositories::{ChapterRepository, ClubRepository, MemberRepository};
use crate::error::AppError;

pub const MAX_CHAPTERS: usize = 500;
pub const MAX_TITLE_LENGTH: usize = 200;

/// A club in the caller's club list.
#[derive(Debug, Clone)]
pub struct ClubSummary {
    pub club: Club,
    pub progress: ClubProgress,
}

/// A chapter with its counts and derived status.
#[derive(Debug, Clone)]
pub struct ChapterView {
    pub chapter: Chapter,
    pub tally: ChapterTally,
    pub status: ProgressStatus,
}

/// Full club view for one member.
#[derive(Debug, Clone)]
pub struct ClubDetail {
    pub club: Club,
    pub role: MemberRole,
    pub chapters: Vec<ChapterView>,
    pub progress: ClubProgress,
}

pub struct ClubService {
    clubs: Arc<dyn ClubRepository>,
    members: Arc<dyn MemberRepository>,
    chapters: Arc<dyn ChapterRepository>,
}

impl ClubService {
    pub fn new(
        clubs: Arc<dyn ClubRepository>,
        members: Arc<dyn MemberRepository>,
        chapters: Arc<dyn ChapterRepository>,
    ) -> Self {
        Self {
            clubs,
            members,
            chapters,
        }
    }

    /// Creates a club; the creator becomes its owner.
    ///
    /// Chapter titles are trimmed and numbered from 1 in the given order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for blank names, blank chapter titles,
    /// or a chapter count outside `1..=500`.
    pub async fn create_club(&self, mut new_club: NewClub) -> Result<ClubDetail, AppError> {
        new_club.name = required_text("name", &new_club.name)?;
        new_club.book_title = required_text("book_title", &new_club.book_title)?;
        new_club.book_author = new_club
            .book_author
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty());
        new_club.chapters = normalize_chapters(new_club.chapters)?;

        let owner_id = new_club.owner_id;
        let club = self.clubs.create(new_club).await?;

        tracing::info!(club_id = club.id, owner_id, "Club created");

        self.detail(club, MemberRole::Owner, owner_id).await
    }

    /// Lists the caller's clubs with their reading progress.
    pub async fn list_clubs(&self, user_id: i64) -> Result<Vec<ClubSummary>, AppError> {
        let clubs = self.clubs.list_for_user(user_id).await?;
        let tallies = self.chapters.tallies_for_user(user_id).await?;

        let mut by_club: HashMap<i64, Vec<ChapterTally>> = HashMap::new();
        for row in tallies {
            by_club.entry(row.club_id).or_default().push(row.tally);
        }

        Ok(clubs
            .into_iter()
            .map(|club| {
                let progress = club_progress(by_club.get(&club.id).map_or(&[][..], Vec::as_slice));
                ClubSummary { club, progress }
            })
            .collect())
    }

    /// Loads a club with every chapter's status for the caller.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the club does not exist
    /// - [`AppError::Forbidden`] if the caller is not a member
    pub async fn get_club(&self, user_id: i64, club_id: i64) -> Result<ClubDetail, AppError> {
        let club = self.find_club(club_id).await?;
        let member = require_member(self.members.as_ref(), club_id, user_id).await?;

        self.detail(club, member.role, user_id).await
    }

    /// Applies a partial update. Owner only.
    pub async fn update_club(
        &self,
        user_id: i64,
        club_id: i64,
        mut patch: ClubPatch,
    ) -> Result<Club, AppError> {
        let club = self.find_club(club_id).await?;
        require_owner(self.members.as_ref(), club_id, user_id).await?;

        if let Some(name) = patch.name.take() {
            patch.name = Some(required_text("name", &name)?);
        }
        if let Some(title) = patch.book_title.take() {
            patch.book_title = Some(required_text("book_title", &title)?);
        }

        if patch.is_empty() {
            return Ok(club);
        }

        let updated = self.clubs.update(club_id, patch).await?;
        tracing::info!(club_id, user_id, "Club updated");

        Ok(updated)
    }

    /// Deletes a club and everything in it. Owner only.
    pub async fn delete_club(&self, user_id: i64, club_id: i64) -> Result<(), AppError> {
        self.find_club(club_id).await?;
        require_owner(self.members.as_ref(), club_id, user_id).await?;

        if !self.clubs.delete(club_id).await? {
            return Err(club_not_found(club_id));
        }

        tracing::info!(club_id, user_id, "Club deleted");
        Ok(())
    }

    pub async fn list_members(&self, user_id: i64, club_id: i64) -> Result<Vec<Member>, AppError> {
        self.find_club(club_id).await?;
        require_member(self.members.as_ref(), club_id, user_id).await?;

        self.members.list(club_id).await
    }

    /// Removes the caller from a club together with their progress.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] for the owner, who must delete the club instead.
    pub async fn leave_club(&self, user_id: i64, club_id: i64) -> Result<(), AppError> {
        self.find_club(club_id).await?;
        let member = require_member(self.members.as_ref(), club_id, user_id).await?;

        if member.is_owner() {
            return Err(AppError::conflict(
                "The owner cannot leave the club; delete it instead",
                json!({ "club_id": club_id }),
            ));
        }

        self.members.remove(club_id, user_id).await?;
        tracing::info!(club_id, user_id, "Member left club");

        Ok(())
    }

    async fn find_club(&self, club_id: i64) -> Result<Club, AppError> {
        self.clubs
            .find_by_id(club_id)
            .await?
            .ok_or_else(|| club_not_found(club_id))
    }

    async fn detail(
        &self,
        club: Club,
        role: MemberRole,
        viewer_id: i64,
    ) -> Result<ClubDetail, AppError> {
        let rows = self.chapters.list_with_tallies(club.id, viewer_id).await?;

        let tallies: Vec<ChapterTally> = rows.iter().map(|r| r.tally).collect();
        let progress = club_progress(&tallies);

        let chapters = rows
            .into_iter()
            .map(|row| ChapterView {
                status: row.tally.status(),
                tally: row.tally,
                chapter: row.chapter,
            })
            .collect();

        Ok(ClubDetail {
            club,
            role,
            chapters,
            progress,
        })
    }
}

fn club_not_found(club_id: i64) -> AppError {
    AppError::not_found("Club not found", json!({ "club_id": club_id }))
}

fn required_text(field: &str, value: &str) -> Result<String, AppError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(AppError::bad_request(
            format!("{field} must not be empty"),
            json!({ "field": field }),
        ));
    }
    if trimmed.chars().count() > MAX_TITLE_LENGTH {
        return Err(AppError::bad_request(
            format!("{field} must be at most {MAX_TITLE_LENGTH} characters"),
            json!({ "field": field }),
        ));
    }

    Ok(trimmed.to_string())
}

fn normalize_chapters(chapters: Vec<String>) -> Result<Vec<String>, AppError> {
    if chapters.is_empty() || chapters.len() > MAX_CHAPTERS {
        return Err(AppError::bad_request(
            format!("A club needs between 1 and {MAX_CHAPTERS} chapters"),
            json!({ "count": chapters.len() }),
        ));
    }

    chapters
        .iter()
        .enumerate()
        .map(|(index, title)| {
            required_text("chapter title", title).map_err(|_| {
                AppError::bad_request(
                    "Chapter titles must be 1-200 characters",
                    json!({ "position": index + 1 }),
                )
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::access::test_support::member;
    use crate::domain::entities::{ChapterWithTally, ClubChapterTally};
    use crate::domain::repositories::{
        MockChapterRepository, MockClubRepository, MockMemberRepository,
    };
    use chrono::Utc;

    fn club(id: i64, owner_id: i64) -> Club {
        Club {
            id,
            name: "Slow readers".to_string(),
            book_title: "Middlemarch".to_string(),
            book_author: Some("George Eliot".to_string()),
            cover_url: None,
            owner_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn chapter_row(id: i64, club_id: i64, tally: ChapterTally) -> ChapterWithTally {
        ChapterWithTally {
            chapter: Chapter {
                id,
                club_id,
                position: id as i32,
                title: format!("Chapter {id}"),
            },
            tally,
        }
    }

    fn service(
        clubs: MockClubRepository,
        members: MockMemberRepository,
        chapters: MockChapterRepository,
    ) -> ClubService {
        ClubService::new(Arc::new(clubs), Arc::new(members), Arc::new(chapters))
    }

    fn new_club(chapters: Vec<&str>) -> NewClub {
        NewClub {
            name: "  Slow readers ".to_string(),
            book_title: "Middlemarch".to_string(),
            book_author: Some("   ".to_string()),
            cover_url: None,
            owner_id: 1,
            chapters: chapters.into_iter().map(String::from).collect(),
        }
    }

    #[tokio::test]
    async fn test_create_club_normalizes_input() {
        let mut clubs = MockClubRepository::new();
        clubs
            .expect_create()
            .withf(|c| {
                c.name == "Slow readers"
                    && c.book_author.is_none()
                    && c.chapters == vec!["Prelude".to_string(), "Book One".to_string()]
            })
            .times(1)
            .returning(|c| Ok(club(10, c.owner_id)));

        let mut chapters = MockChapterRepository::new();
        chapters.expect_list_with_tallies().returning(|club_id, _| {
            Ok(vec![
                chapter_row(1, club_id, ChapterTally::new(1, 0, false)),
                chapter_row(2, club_id, ChapterTally::new(1, 0, false)),
            ])
        });

        let svc = service(clubs, MockMemberRepository::new(), chapters);
        let detail = svc
            .create_club(new_club(vec![" Prelude", "Book One "]))
            .await
            .unwrap();

        assert_eq!(detail.role, MemberRole::Owner);
        assert_eq!(detail.chapters.len(), 2);
        assert_eq!(detail.progress.status, ProgressStatus::NotStarted);
    }

    #[tokio::test]
    async fn test_create_club_requires_chapters() {
        let mut clubs = MockClubRepository::new();
        clubs.expect_create().times(0);

        let svc = service(clubs, MockMemberRepository::new(), MockChapterRepository::new());
        let err = svc.create_club(new_club(vec![])).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_create_club_rejects_blank_chapter_title() {
        let svc = service(
            MockClubRepository::new(),
            MockMemberRepository::new(),
            MockChapterRepository::new(),
        );

        let err = svc
            .create_club(new_club(vec!["One", "  "]))
            .await
            .unwrap_err();
        assert_eq!(err.to_error_info().details["position"], 2);
    }

    #[tokio::test]
    async fn test_list_clubs_groups_tallies_by_club() {
        let mut clubs = MockClubRepository::new();
        clubs
            .expect_list_for_user()
            .returning(|_| Ok(vec![club(1, 9), club(2, 9)]));

        let mut chapters = MockChapterRepository::new();
        chapters.expect_tallies_for_user().returning(|_| {
            Ok(vec![
                ClubChapterTally {
                    club_id: 1,
                    position: 1,
                    tally: ChapterTally::new(2, 2, true),
                },
                ClubChapterTally {
                    club_id: 1,
                    position: 2,
                    tally: ChapterTally::new(2, 1, false),
                },
                ClubChapterTally {
                    club_id: 2,
                    position: 1,
                    tally: ChapterTally::new(1, 1, true),
                },
            ])
        });

        let svc = service(clubs, MockMemberRepository::new(), chapters);
        let list = svc.list_clubs(5).await.unwrap();

        assert_eq!(list[0].progress.status, ProgressStatus::Incomplete);
        assert_eq!(list[0].progress.current_chapter, Some(1));
        assert_eq!(list[1].progress.status, ProgressStatus::AllComplete);
    }

    #[tokio::test]
    async fn test_get_club_missing_is_not_found() {
        let mut clubs = MockClubRepository::new();
        clubs.expect_find_by_id().returning(|_| Ok(None));

        let svc = service(clubs, MockMemberRepository::new(), MockChapterRepository::new());
        let err = svc.get_club(1, 99).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_get_club_for_non_member_is_forbidden() {
        let mut clubs = MockClubRepository::new();
        clubs.expect_find_by_id().returning(|id| Ok(Some(club(id, 1))));
        let mut members = MockMemberRepository::new();
        members.expect_find().returning(|_, _| Ok(None));

        let svc = service(clubs, members, MockChapterRepository::new());
        let err = svc.get_club(2, 7).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden { .. }));
    }

    #[tokio::test]
    async fn test_get_club_derives_chapter_statuses() {
        let mut clubs = MockClubRepository::new();
        clubs.expect_find_by_id().returning(|id| Ok(Some(club(id, 1))));
        let mut members = MockMemberRepository::new();
        members
            .expect_find()
            .returning(|c, u| Ok(Some(member(c, u, MemberRole::Member))));
        let mut chapters = MockChapterRepository::new();
        chapters.expect_list_with_tallies().returning(|club_id, _| {
            Ok(vec![
                chapter_row(1, club_id, ChapterTally::new(3, 3, true)),
                chapter_row(2, club_id, ChapterTally::new(3, 1, true)),
                chapter_row(3, club_id, ChapterTally::new(3, 1, false)),
                chapter_row(4, club_id, ChapterTally::new(3, 0, false)),
            ])
        });

        let svc = service(clubs, members, chapters);
        let detail = svc.get_club(2, 7).await.unwrap();

        let statuses: Vec<_> = detail.chapters.iter().map(|c| c.status).collect();
        assert_eq!(
            statuses,
            vec![
                ProgressStatus::AllComplete,
                ProgressStatus::Complete,
                ProgressStatus::Incomplete,
                ProgressStatus::NotStarted,
            ]
        );
        assert_eq!(detail.progress.chapters_completed, 2);
        assert_eq!(detail.progress.current_chapter, Some(2));
    }

    #[tokio::test]
    async fn test_update_club_requires_owner() {
        let mut clubs = MockClubRepository::new();
        clubs.expect_find_by_id().returning(|id| Ok(Some(club(id, 1))));
        clubs.expect_update().times(0);
        let mut members = MockMemberRepository::new();
        members
            .expect_find()
            .returning(|c, u| Ok(Some(member(c, u, MemberRole::Member))));

        let svc = service(clubs, members, MockChapterRepository::new());
        let patch = ClubPatch {
            name: Some("New".to_string()),
            ..Default::default()
        };
        let err = svc.update_club(2, 7, patch).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden { .. }));
    }

    #[tokio::test]
    async fn test_update_club_clears_cover() {
        let mut clubs = MockClubRepository::new();
        clubs.expect_find_by_id().returning(|id| Ok(Some(club(id, 1))));
        clubs
            .expect_update()
            .withf(|_, patch| patch.cover_url == Some(None) && patch.name.is_none())
            .times(1)
            .returning(|id, _| Ok(club(id, 1)));
        let mut members = MockMemberRepository::new();
        members
            .expect_find()
            .returning(|c, u| Ok(Some(member(c, u, MemberRole::Owner))));

        let svc = service(clubs, members, MockChapterRepository::new());
        let patch = ClubPatch {
            cover_url: Some(None),
            ..Default::default()
        };
        assert!(svc.update_club(1, 7, patch).await.is_ok());
    }

    #[tokio::test]
    async fn test_empty_patch_skips_write() {
        let mut clubs = MockClubRepository::new();
        clubs.expect_find_by_id().returning(|id| Ok(Some(club(id, 1))));
        clubs.expect_update().times(0);
        let mut members = MockMemberRepository::new();
        members
            .expect_find()
            .returning(|c, u| Ok(Some(member(c, u, MemberRole::Owner))));

        let svc = service(clubs, members, MockChapterRepository::new());
        let club = svc.update_club(1, 7, ClubPatch::default()).await.unwrap();
        assert_eq!(club.id, 7);
    }

    #[tokio::test]
    async fn test_owner_cannot_leave() {
        let mut clubs = MockClubRepository::new();
        clubs.expect_find_by_id().returning(|id| Ok(Some(club(id, 1))));
        let mut members = MockMemberRepository::new();
        members
            .expect_find()
            .returning(|c, u| Ok(Some(member(c, u, MemberRole::Owner))));
        members.expect_remove().times(0);

        let svc = service(clubs, members, MockChapterRepository::new());
        let err = svc.leave_club(1, 7).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_member_leaves() {
        let mut clubs = MockClubRepository::new();
        clubs.expect_find_by_id().returning(|id| Ok(Some(club(id, 1))));
        let mut members = MockMemberRepository::new();
        members
            .expect_find()
            .returning(|c, u| Ok(Some(member(c, u, MemberRole::Member))));
        members
            .expect_remove()
            .withf(|club_id, user_id| *club_id == 7 && *user_id == 2)
            .times(1)
            .returning(|_, _| Ok(true));

        let svc = service(clubs, members, MockChapterRepository::new());
        assert!(svc.leave_club(2, 7).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_club_by_owner() {
        let mut clubs = MockClubRepository::new();
        clubs.expect_find_by_id().returning(|id| Ok(Some(club(id, 1))));
        clubs.expect_delete().times(1).returning(|_| Ok(true));
        let mut members = MockMemberRepository::new();
        members
            .expect_find()
            .returning(|c, u| Ok(Some(member(c, u, MemberRole::Owner))));

        let svc = service(clubs, members, MockChapterRepository::new());
        assert!(svc.delete_club(1, 7).await.is_ok());
    }
}
