//! Membership checks shared by the services.

use serde_json::json;

use crate::domain::entities::Member;
use crate::domain::repositories::MemberRepository;
use crate::error::AppError;

/// Returns the caller's membership or [`AppError::Forbidden`].
pub(crate) async fn require_member(
    members: &dyn MemberRepository,
    club_id: i64,
    user_id: i64,
) -> Result<Member, AppError> {
    members.find(club_id, user_id).await?.ok_or_else(|| {
        AppError::forbidden(
            "You are not a member of this club",
            json!({ "club_id": club_id }),
        )
    })
}

/// Returns the caller's membership if they own the club, otherwise [`AppError::Forbidden`].
pub(crate) async fn require_owner(
    members: &dyn MemberRepository,
    club_id: i64,
    user_id: i64,
) -> Result<Member, AppError> {
    let member = require_member(members, club_id, user_id).await?;

    if !member.is_owner() {
        return Err(AppError::forbidden(
            "Only the club owner can do this",
            json!({ "club_id": club_id }),
        ));
    }

    Ok(member)
}

/// Allows the author of a record or the club owner; anyone else gets 403.
pub(crate) fn ensure_author_or_owner(
    member: &Member,
    author_id: i64,
    resource: &str,
    id: i64,
) -> Result<(), AppError> {
    if member.user_id == author_id || member.is_owner() {
        Ok(())
    } else {
        Err(AppError::forbidden(
            format!("Only the author or the club owner can delete this {resource}"),
            json!({ "id": id }),
        ))
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::member;
    use super::*;
    use crate::domain::entities::MemberRole;
    use crate::domain::repositories::MockMemberRepository;

    #[tokio::test]
    async fn test_require_member_forbidden_for_outsider() {
        let mut repo = MockMemberRepository::new();
        repo.expect_find().times(1).returning(|_, _| Ok(None));

        let err = require_member(&repo, 1, 2).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden { .. }));
    }

    #[tokio::test]
    async fn test_require_owner_rejects_plain_member() {
        let mut repo = MockMemberRepository::new();
        repo.expect_find()
            .returning(|club, user| Ok(Some(member(club, user, MemberRole::Member))));

        let err = require_owner(&repo, 1, 2).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden { .. }));
    }

    #[test]
    fn test_author_or_owner() {
        let author = member(1, 5, MemberRole::Member);
        let owner = member(1, 9, MemberRole::Owner);
        let other = member(1, 7, MemberRole::Member);

        assert!(ensure_author_or_owner(&author, 5, "post", 1).is_ok());
        assert!(ensure_author_or_owner(&owner, 5, "post", 1).is_ok());
        assert!(ensure_author_or_owner(&other, 5, "post", 1).is_err());
    }
}
