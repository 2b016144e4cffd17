//! Shared application state injected into every handler.

use std::sync::Arc;

use sqlx::PgPool;

use crate::application::services::{
    AuthService, BookService, ClubService, ConversationService, InviteService, ProgressService,
    SubscriptionService,
};
use crate::config::Config;
use crate::domain::repositories::{
    ChapterRepository, ClubRepository, CommentRepository, DiscussionRepository, InviteRepository,
    MemberRepository, PostRepository, SubscriptionRepository, TokenRepository, UserRepository,
};
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::catalog::BookCatalog;
use crate::infrastructure::persistence::{
    PgChapterRepository, PgClubRepository, PgCommentRepository, PgDiscussionRepository,
    PgInviteRepository, PgMemberRepository, PgPostRepository, PgSubscriptionRepository,
    PgTokenRepository, PgUserRepository,
};

/// Repository implementations the services are built from.
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub tokens: Arc<dyn TokenRepository>,
    pub clubs: Arc<dyn ClubRepository>,
    pub members: Arc<dyn MemberRepository>,
    pub chapters: Arc<dyn ChapterRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub discussions: Arc<dyn DiscussionRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub invites: Arc<dyn InviteRepository>,
    pub subscriptions: Arc<dyn SubscriptionRepository>,
}

impl Repositories {
    /// PostgreSQL-backed repositories sharing one pool.
    pub fn postgres(pool: Arc<PgPool>) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            tokens: Arc::new(PgTokenRepository::new(pool.clone())),
            clubs: Arc::new(PgClubRepository::new(pool.clone())),
            members: Arc::new(PgMemberRepository::new(pool.clone())),
            chapters: Arc::new(PgChapterRepository::new(pool.clone())),
            posts: Arc::new(PgPostRepository::new(pool.clone())),
            discussions: Arc::new(PgDiscussionRepository::new(pool.clone())),
            comments: Arc::new(PgCommentRepository::new(pool.clone())),
            invites: Arc::new(PgInviteRepository::new(pool.clone())),
            subscriptions: Arc::new(PgSubscriptionRepository::new(pool)),
        }
    }
}

/// Settings the services need from [`Config`].
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub token_signing_secret: String,
    pub invite_ttl_hours: i64,
    pub cache_ttl_seconds: u64,
}

impl From<&Config> for ServiceSettings {
    fn from(config: &Config) -> Self {
        Self {
            token_signing_secret: config.token_signing_secret.clone(),
            invite_ttl_hours: config.invite_ttl_hours,
            cache_ttl_seconds: config.cache_ttl_seconds,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub club_service: Arc<ClubService>,
    pub progress_service: Arc<ProgressService>,
    pub invite_service: Arc<InviteService>,
    pub conversation_service: Arc<ConversationService>,
    pub subscription_service: Arc<SubscriptionService>,
    pub book_service: Arc<BookService>,
    pub cache: Arc<dyn CacheService>,
}

impl AppState {
    pub fn new(
        repos: Repositories,
        cache: Arc<dyn CacheService>,
        catalog: Arc<dyn BookCatalog>,
        settings: ServiceSettings,
    ) -> Self {
        let Repositories {
            users,
            tokens,
            clubs,
            members,
            chapters,
            posts,
            discussions,
            comments,
            invites,
            subscriptions,
        } = repos;

        Self {
            auth_service: Arc::new(AuthService::new(
                tokens,
                users,
                settings.token_signing_secret,
            )),
            club_service: Arc::new(ClubService::new(
                clubs.clone(),
                members.clone(),
                chapters.clone(),
            )),
            progress_service: Arc::new(ProgressService::new(chapters.clone(), members.clone())),
            invite_service: Arc::new(InviteService::new(
                invites,
                members.clone(),
                clubs,
                settings.invite_ttl_hours,
            )),
            conversation_service: Arc::new(ConversationService::new(
                members,
                chapters,
                posts,
                discussions,
                comments,
            )),
            subscription_service: Arc::new(SubscriptionService::new(subscriptions)),
            book_service: Arc::new(BookService::new(
                catalog,
                cache.clone(),
                settings.cache_ttl_seconds,
            )),
            cache,
        }
    }
}
