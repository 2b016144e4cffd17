//! DTOs for posts, discussions and comments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{Comment, Discussion, Post};

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 10000, message = "must be 1-10000 characters"))]
    pub body: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateDiscussionRequest {
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 10000, message = "must be 1-10000 characters"))]
    pub body: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, max = 10000, message = "must be 1-10000 characters"))]
    pub body: String,
}

#[derive(Debug, Serialize)]
pub struct AuthorResponse {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: i64,
    pub club_id: i64,
    pub author: AuthorResponse,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            club_id: post.club_id,
            author: AuthorResponse {
                id: post.author_id,
                name: post.author_name,
            },
            body: post.body,
            created_at: post.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DiscussionResponse {
    pub id: i64,
    pub chapter_id: i64,
    pub club_id: i64,
    pub author: AuthorResponse,
    pub title: String,
    pub body: String,
    pub comment_count: i64,
    pub created_at: DateTime<Utc>,
}

impl From<Discussion> for DiscussionResponse {
    fn from(discussion: Discussion) -> Self {
        Self {
            id: discussion.id,
            chapter_id: discussion.chapter_id,
            club_id: discussion.club_id,
            author: AuthorResponse {
                id: discussion.author_id,
                name: discussion.author_name,
            },
            title: discussion.title,
            body: discussion.body,
            comment_count: discussion.comment_count,
            created_at: discussion.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub id: i64,
    pub discussion_id: i64,
    pub author: AuthorResponse,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            discussion_id: comment.discussion_id,
            author: AuthorResponse {
                id: comment.author_id,
                name: comment.author_name,
            },
            body: comment.body,
            created_at: comment.created_at,
        }
    }
}
