//! Mock-backed application state for handler tests.

use std::sync::Arc;

use axum_test::TestServer;
use chrono::Utc;

use crate::domain::entities::{Club, Member, MemberRole};
use crate::domain::repositories::{
    MockChapterRepository, MockClubRepository, MockCommentRepository, MockDiscussionRepository,
    MockInviteRepository, MockMemberRepository, MockPostRepository, MockSubscriptionRepository,
    MockTokenRepository, MockUserRepository,
};
use crate::infrastructure::cache::MockCacheService;
use crate::infrastructure::catalog::MockBookCatalog;
use crate::state::{AppState, Repositories, ServiceSettings};

pub const TOKEN: &str = "test-token";

pub struct TestMocks {
    pub users: MockUserRepository,
    pub tokens: MockTokenRepository,
    pub clubs: MockClubRepository,
    pub members: MockMemberRepository,
    pub chapters: MockChapterRepository,
    pub posts: MockPostRepository,
    pub discussions: MockDiscussionRepository,
    pub comments: MockCommentRepository,
    pub invites: MockInviteRepository,
    pub subscriptions: MockSubscriptionRepository,
    pub cache: MockCacheService,
    pub catalog: MockBookCatalog,
}

impl TestMocks {
    pub fn new() -> Self {
        Self {
            users: MockUserRepository::new(),
            tokens: MockTokenRepository::new(),
            clubs: MockClubRepository::new(),
            members: MockMemberRepository::new(),
            chapters: MockChapterRepository::new(),
            posts: MockPostRepository::new(),
            discussions: MockDiscussionRepository::new(),
            comments: MockCommentRepository::new(),
            invites: MockInviteRepository::new(),
            subscriptions: MockSubscriptionRepository::new(),
            cache: MockCacheService::new(),
            catalog: MockBookCatalog::new(),
        }
    }

    /// Accepts any bearer token as belonging to `user_id`.
    pub fn authenticated_as(mut self, user_id: i64) -> Self {
        self.tokens
            .expect_find_active_user()
            .returning(move |_| Ok(Some(user_id)));
        self.tokens.expect_update_last_used().returning(|_| Ok(()));
        self
    }

    /// Club `club_id` exists and `user_id` holds `role` in it.
    pub fn with_membership(mut self, club_id: i64, user_id: i64, role: MemberRole) -> Self {
        self.clubs
            .expect_find_by_id()
            .returning(move |id| Ok((id == club_id).then(|| club(id, 1))));
        self.members.expect_find().returning(move |c, u| {
            Ok((c == club_id && u == user_id).then(|| member(c, u, role)))
        });
        self
    }

    pub fn server(self) -> TestServer {
        let repos = Repositories {
            users: Arc::new(self.users),
            tokens: Arc::new(self.tokens),
            clubs: Arc::new(self.clubs),
            members: Arc::new(self.members),
            chapters: Arc::new(self.chapters),
            posts: Arc::new(self.posts),
            discussions: Arc::new(self.discussions),
            comments: Arc::new(self.comments),
            invites: Arc::new(self.invites),
            subscriptions: Arc::new(self.subscriptions),
        };

        let settings = ServiceSettings {
            token_signing_secret: "test-secret".to_string(),
            invite_ttl_hours: 168,
            cache_ttl_seconds: 60,
        };

        let state = AppState::new(
            repos,
            Arc::new(self.cache),
            Arc::new(self.catalog),
            settings,
        );

        TestServer::new(crate::routes::router(state)).unwrap()
    }
}

pub fn club(id: i64, owner_id: i64) -> Club {
    Club {
        id,
        name: "Night owls".to_string(),
        book_title: "Piranesi".to_string(),
        book_author: Some("Susanna Clarke".to_string()),
        cover_url: None,
        owner_id,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn member(club_id: i64, user_id: i64, role: MemberRole) -> Member {
    Member {
        club_id,
        user_id,
        username: format!("user{user_id}"),
        display_name: format!("User {user_id}"),
        role,
        joined_at: Utc::now(),
    }
}
