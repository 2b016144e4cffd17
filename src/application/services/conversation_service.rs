//! Posts, chapter discussions and comments.
//!
//! Every operation requires club membership. Deleting is allowed for the
//! author and the club owner.

use std::sync::Arc;

use serde_json::json;

use super::access::{ensure_author_or_owner, require_member};
use crate::domain::entities::{
    Chapter, Comment, Discussion, Member, NewComment, NewDiscussion, NewPost, Post,
};
use crate::domain::repositories::{
    ChapterRepository, CommentRepository, DiscussionRepository, MemberRepository, PostRepository,
};
use crate::error::AppError;

pub const MAX_BODY_LENGTH: usize = 10_000;
pub const MAX_DISCUSSION_TITLE_LENGTH: usize = 200;

pub struct ConversationService {
    members: Arc<dyn MemberRepository>,
    chapters: Arc<dyn ChapterRepository>,
    posts: Arc<dyn PostRepository>,
    discussions: Arc<dyn DiscussionRepository>,
    comments: Arc<dyn CommentRepository>,
}

impl ConversationService {
    pub fn new(
        members: Arc<dyn MemberRepository>,
        chapters: Arc<dyn ChapterRepository>,
        posts: Arc<dyn PostRepository>,
        discussions: Arc<dyn DiscussionRepository>,
        comments: Arc<dyn CommentRepository>,
    ) -> Self {
        Self {
            members,
            chapters,
            posts,
            discussions,
            comments,
        }
    }

    // Posts

    pub async fn create_post(
        &self,
        user_id: i64,
        club_id: i64,
        body: &str,
    ) -> Result<Post, AppError> {
        let body = checked_text("body", body, MAX_BODY_LENGTH)?;
        require_member(self.members.as_ref(), club_id, user_id).await?;

        let post = self
            .posts
            .create(NewPost {
                club_id,
                author_id: user_id,
                body,
            })
            .await?;

        tracing::info!(club_id, user_id, post_id = post.id, "Post created");
        Ok(post)
    }

    /// Lists a club's posts, newest first, with the total count.
    pub async fn list_posts(
        &self,
        user_id: i64,
        club_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Post>, i64), AppError> {
        require_member(self.members.as_ref(), club_id, user_id).await?;

        let posts = self.posts.list_by_club(club_id, offset, limit).await?;
        let total = self.posts.count_by_club(club_id).await?;

        Ok((posts, total))
    }

    pub async fn delete_post(&self, user_id: i64, post_id: i64) -> Result<(), AppError> {
        let post = self
            .posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| not_found("Post", post_id))?;

        let member = require_member(self.members.as_ref(), post.club_id, user_id).await?;
        ensure_author_or_owner(&member, post.author_id, "post", post_id)?;

        if !self.posts.delete(post_id).await? {
            return Err(not_found("Post", post_id));
        }

        tracing::info!(post_id, user_id, "Post deleted");
        Ok(())
    }

    // Discussions

    pub async fn create_discussion(
        &self,
        user_id: i64,
        chapter_id: i64,
        title: &str,
        body: &str,
    ) -> Result<Discussion, AppError> {
        let title = checked_text("title", title, MAX_DISCUSSION_TITLE_LENGTH)?;
        let body = checked_text("body", body, MAX_BODY_LENGTH)?;
        self.chapter_member(user_id, chapter_id).await?;

        let discussion = self
            .discussions
            .create(NewDiscussion {
                chapter_id,
                author_id: user_id,
                title,
                body,
            })
            .await?;

        tracing::info!(chapter_id, user_id, discussion_id = discussion.id, "Discussion created");
        Ok(discussion)
    }

    pub async fn list_discussions(
        &self,
        user_id: i64,
        chapter_id: i64,
    ) -> Result<Vec<Discussion>, AppError> {
        self.chapter_member(user_id, chapter_id).await?;
        self.discussions.list_by_chapter(chapter_id).await
    }

    pub async fn get_discussion(
        &self,
        user_id: i64,
        discussion_id: i64,
    ) -> Result<Discussion, AppError> {
        self.discussion_member(user_id, discussion_id)
            .await
            .map(|(discussion, _)| discussion)
    }

    pub async fn delete_discussion(
        &self,
        user_id: i64,
        discussion_id: i64,
    ) -> Result<(), AppError> {
        let (discussion, member) = self.discussion_member(user_id, discussion_id).await?;
        ensure_author_or_owner(&member, discussion.author_id, "discussion", discussion_id)?;

        if !self.discussions.delete(discussion_id).await? {
            return Err(not_found("Discussion", discussion_id));
        }

        tracing::info!(discussion_id, user_id, "Discussion deleted");
        Ok(())
    }

    // Comments

    pub async fn create_comment(
        &self,
        user_id: i64,
        discussion_id: i64,
        body: &str,
    ) -> Result<Comment, AppError> {
        let body = checked_text("body", body, MAX_BODY_LENGTH)?;
        self.discussion_member(user_id, discussion_id).await?;

        let comment = self
            .comments
            .create(NewComment {
                discussion_id,
                author_id: user_id,
                body,
            })
            .await?;

        tracing::info!(discussion_id, user_id, comment_id = comment.id, "Comment created");
        Ok(comment)
    }

    /// Lists a discussion's comments, oldest first, with the total count.
    pub async fn list_comments(
        &self,
        user_id: i64,
        discussion_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Comment>, i64), AppError> {
        let (discussion, _) = self.discussion_member(user_id, discussion_id).await?;
        let comments = self
            .comments
            .list_by_discussion(discussion_id, offset, limit)
            .await?;

        Ok((comments, discussion.comment_count))
    }

    pub async fn delete_comment(&self, user_id: i64, comment_id: i64) -> Result<(), AppError> {
        let comment = self
            .comments
            .find_by_id(comment_id)
            .await?
            .ok_or_else(|| not_found("Comment", comment_id))?;

        let member = require_member(self.members.as_ref(), comment.club_id, user_id).await?;
        ensure_author_or_owner(&member, comment.author_id, "comment", comment_id)?;

        if !self.comments.delete(comment_id).await? {
            return Err(not_found("Comment", comment_id));
        }

        tracing::info!(comment_id, user_id, "Comment deleted");
        Ok(())
    }

    async fn chapter_member(
        &self,
        user_id: i64,
        chapter_id: i64,
    ) -> Result<(Chapter, Member), AppError> {
        let chapter = self
            .chapters
            .find_by_id(chapter_id)
            .await?
            .ok_or_else(|| not_found("Chapter", chapter_id))?;

        let member = require_member(self.members.as_ref(), chapter.club_id, user_id).await?;
        Ok((chapter, member))
    }

    async fn discussion_member(
        &self,
        user_id: i64,
        discussion_id: i64,
    ) -> Result<(Discussion, Member), AppError> {
        let discussion = self
            .discussions
            .find_by_id(discussion_id)
            .await?
            .ok_or_else(|| not_found("Discussion", discussion_id))?;

        let member = require_member(self.members.as_ref(), discussion.club_id, user_id).await?;
        Ok((discussion, member))
    }
}

fn not_found(kind: &str, id: i64) -> AppError {
    AppError::not_found(format!("{kind} not found"), json!({ "id": id }))
}

fn checked_text(field: &str, value: &str, max: usize) -> Result<String, AppError> {
    let trimmed = value.trim();
    let length = trimmed.chars().count();

    if length == 0 || length > max {
        return Err(AppError::bad_request(
            format!("{field} must be between 1 and {max} characters"),
            json!({ "field": field, "length": length }),
        ));
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::access::test_support::member;
    use crate::domain::entities::MemberRole;
    use crate::domain::repositories::{
        MockChapterRepository, MockCommentRepository, MockDiscussionRepository,
        MockMemberRepository, MockPostRepository,
    };
    use chrono::Utc;

    struct Mocks {
        members: MockMemberRepository,
        chapters: MockChapterRepository,
        posts: MockPostRepository,
        discussions: MockDiscussionRepository,
        comments: MockCommentRepository,
    }

    impl Mocks {
        fn new() -> Self {
            Self {
                members: MockMemberRepository::new(),
                chapters: MockChapterRepository::new(),
                posts: MockPostRepository::new(),
                discussions: MockDiscussionRepository::new(),
                comments: MockCommentRepository::new(),
            }
        }

        /// Users 1 (owner), 2 and 3 (members) belong to club 7.
        fn with_club_members(mut self) -> Self {
            self.members.expect_find().returning(|club_id, user_id| {
                Ok(match (club_id, user_id) {
                    (7, 1) => Some(member(7, 1, MemberRole::Owner)),
                    (7, 2) | (7, 3) => Some(member(7, user_id, MemberRole::Member)),
                    _ => None,
                })
            });
            self
        }

        fn build(self) -> ConversationService {
            ConversationService::new(
                Arc::new(self.members),
                Arc::new(self.chapters),
                Arc::new(self.posts),
                Arc::new(self.discussions),
                Arc::new(self.comments),
            )
        }
    }

    fn post(id: i64, author_id: i64) -> Post {
        Post {
            id,
            club_id: 7,
            author_id,
            author_name: "Reader".to_string(),
            body: "Loved the opening".to_string(),
            created_at: Utc::now(),
        }
    }

    fn discussion(id: i64, author_id: i64) -> Discussion {
        Discussion {
            id,
            chapter_id: 11,
            club_id: 7,
            author_id,
            author_name: "Reader".to_string(),
            title: "Foreshadowing".to_string(),
            body: "Did anyone notice the clock?".to_string(),
            comment_count: 4,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_post_trims_body() {
        let mut mocks = Mocks::new().with_club_members();
        mocks
            .posts
            .expect_create()
            .withf(|p| p.body == "Hello club" && p.author_id == 2 && p.club_id == 7)
            .times(1)
            .returning(|p| Ok(post(1, p.author_id)));

        let svc = mocks.build();
        assert!(svc.create_post(2, 7, "  Hello club\n").await.is_ok());
    }

    #[tokio::test]
    async fn test_create_post_rejects_blank_body() {
        let svc = Mocks::new().build();
        let err = svc.create_post(2, 7, "   ").await.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_outsider_cannot_list_posts() {
        let mut mocks = Mocks::new().with_club_members();
        mocks.posts.expect_list_by_club().times(0);

        let err = mocks.build().list_posts(99, 7, 0, 25).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden { .. }));
    }

    #[tokio::test]
    async fn test_list_posts_returns_total() {
        let mut mocks = Mocks::new().with_club_members();
        mocks
            .posts
            .expect_list_by_club()
            .withf(|club_id, offset, limit| *club_id == 7 && *offset == 25 && *limit == 25)
            .returning(|_, _, _| Ok(vec![post(30, 2)]));
        mocks.posts.expect_count_by_club().returning(|_| Ok(26));

        let (posts, total) = mocks.build().list_posts(3, 7, 25, 25).await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(total, 26);
    }

    #[tokio::test]
    async fn test_owner_deletes_someone_elses_post() {
        let mut mocks = Mocks::new().with_club_members();
        mocks.posts.expect_find_by_id().returning(|id| Ok(Some(post(id, 2))));
        mocks.posts.expect_delete().times(1).returning(|_| Ok(true));

        assert!(mocks.build().delete_post(1, 5).await.is_ok());
    }

    #[tokio::test]
    async fn test_member_cannot_delete_others_post() {
        let mut mocks = Mocks::new().with_club_members();
        mocks.posts.expect_find_by_id().returning(|id| Ok(Some(post(id, 2))));
        mocks.posts.expect_delete().times(0);

        let err = mocks.build().delete_post(3, 5).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden { .. }));
    }

    #[tokio::test]
    async fn test_create_discussion_for_unknown_chapter() {
        let mut mocks = Mocks::new();
        mocks.chapters.expect_find_by_id().returning(|_| Ok(None));

        let err = mocks
            .build()
            .create_discussion(2, 11, "Title", "Body")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_create_discussion_title_too_long() {
        let title = "x".repeat(MAX_DISCUSSION_TITLE_LENGTH + 1);
        let err = Mocks::new()
            .build()
            .create_discussion(2, 11, &title, "Body")
            .await
            .unwrap_err();
        assert_eq!(err.to_error_info().details["field"], "title");
    }

    #[tokio::test]
    async fn test_create_discussion_as_member() {
        let mut mocks = Mocks::new().with_club_members();
        mocks.chapters.expect_find_by_id().returning(|id| {
            Ok(Some(Chapter {
                id,
                club_id: 7,
                position: 1,
                title: "One".to_string(),
            }))
        });
        mocks
            .discussions
            .expect_create()
            .times(1)
            .returning(|d| Ok(discussion(1, d.author_id)));

        let created = mocks
            .build()
            .create_discussion(2, 11, "Foreshadowing", "Did anyone notice?")
            .await
            .unwrap();
        assert_eq!(created.author_id, 2);
    }

    #[tokio::test]
    async fn test_list_comments_uses_discussion_count() {
        let mut mocks = Mocks::new().with_club_members();
        mocks
            .discussions
            .expect_find_by_id()
            .returning(|id| Ok(Some(discussion(id, 1))));
        mocks
            .comments
            .expect_list_by_discussion()
            .returning(|_, _, _| Ok(vec![]));

        let (_, total) = mocks.build().list_comments(2, 3, 0, 25).await.unwrap();
        assert_eq!(total, 4);
    }

    #[tokio::test]
    async fn test_author_deletes_own_comment() {
        let mut mocks = Mocks::new().with_club_members();
        mocks.comments.expect_find_by_id().returning(|id| {
            Ok(Some(Comment {
                id,
                discussion_id: 3,
                club_id: 7,
                author_id: 3,
                author_name: "Reader".to_string(),
                body: "Agreed".to_string(),
                created_at: Utc::now(),
            }))
        });
        mocks.comments.expect_delete().times(1).returning(|_| Ok(true));

        assert!(mocks.build().delete_comment(3, 8).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_missing_discussion() {
        let mut mocks = Mocks::new();
        mocks.discussions.expect_find_by_id().returning(|_| Ok(None));

        let err = mocks.build().delete_discussion(1, 3).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }
}
