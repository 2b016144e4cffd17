//! Conversation entities: club posts, chapter discussions and their comments.

use chrono::{DateTime, Utc};

/// A club-wide post.
#[derive(Debug, Clone)]
pub struct Post {
    pub id: i64,
    pub club_id: i64,
    pub author_id: i64,
    pub author_name: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub club_id: i64,
    pub author_id: i64,
    pub body: String,
}

/// A discussion thread attached to a chapter.
#[derive(Debug, Clone)]
pub struct Discussion {
    pub id: i64,
    pub chapter_id: i64,
    pub club_id: i64,
    pub author_id: i64,
    pub author_name: String,
    pub title: String,
    pub body: String,
    pub comment_count: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewDiscussion {
    pub chapter_id: i64,
    pub author_id: i64,
    pub title: String,
    pub body: String,
}

/// A reply within a discussion.
#[derive(Debug, Clone)]
pub struct Comment {
    pub id: i64,
    pub discussion_id: i64,
    pub club_id: i64,
    pub author_id: i64,
    pub author_name: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub discussion_id: i64,
    pub author_id: i64,
    pub body: String,
}
