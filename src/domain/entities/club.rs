//! Club and membership entities.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A group of users reading one book together.
#[derive(Debug, Clone)]
pub struct Club {
    pub id: i64,
    pub name: String,
    pub book_title: String,
    pub book_author: Option<String>,
    pub cover_url: Option<String>,
    pub owner_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Club {
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.owner_id == user_id
    }
}

/// Input data for creating a club together with its chapters.
///
/// Chapters are numbered `1..=chapters.len()` in the given order.
#[derive(Debug, Clone)]
pub struct NewClub {
    pub name: String,
    pub book_title: String,
    pub book_author: Option<String>,
    pub cover_url: Option<String>,
    pub owner_id: i64,
    pub chapters: Vec<String>,
}

/// Partial update for a club.
///
/// `None` fields are left unchanged. For the optional columns, `Some(None)`
/// clears the value and `Some(Some(v))` sets it.
#[derive(Debug, Clone, Default)]
pub struct ClubPatch {
    pub name: Option<String>,
    pub book_title: Option<String>,
    pub book_author: Option<Option<String>>,
    pub cover_url: Option<Option<String>>,
}

impl ClubPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.book_title.is_none()
            && self.book_author.is_none()
            && self.cover_url.is_none()
    }
}

/// Role of a member within a club.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    Owner,
    Member,
}

impl MemberRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberRole::Owner => "owner",
            MemberRole::Member => "member",
        }
    }

    /// Parses the database representation; unknown values fall back to `Member`.
    pub fn parse(value: &str) -> Self {
        match value {
            "owner" => MemberRole::Owner,
            _ => MemberRole::Member,
        }
    }
}

/// A user's membership in a club.
#[derive(Debug, Clone)]
pub struct Member {
    pub club_id: i64,
    pub user_id: i64,
    pub username: String,
    pub display_name: String,
    pub role: MemberRole,
    pub joined_at: DateTime<Utc>,
}

impl Member {
    pub fn is_owner(&self) -> bool {
        self.role == MemberRole::Owner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_role_round_trip() {
        assert_eq!(MemberRole::parse("owner"), MemberRole::Owner);
        assert_eq!(MemberRole::parse("member"), MemberRole::Member);
        assert_eq!(MemberRole::parse("unknown"), MemberRole::Member);
        assert_eq!(MemberRole::Owner.as_str(), "owner");
    }

    #[test]
    fn test_club_patch_is_empty() {
        assert!(ClubPatch::default().is_empty());

        let patch = ClubPatch {
            cover_url: Some(None),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_club_ownership() {
        let club = Club {
            id: 1,
            name: "Sci-fi Sundays".to_string(),
            book_title: "Dune".to_string(),
            book_author: Some("Frank Herbert".to_string()),
            cover_url: None,
            owner_id: 42,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert!(club.is_owned_by(42));
        assert!(!club.is_owned_by(7));
    }
}
