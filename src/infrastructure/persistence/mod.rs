//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx with
//! bound parameters.
//!
//! # Repositories
//!
//! - [`PgUserRepository`] / [`PgTokenRepository`] - accounts and API tokens
//! - [`PgClubRepository`] / [`PgMemberRepository`] - clubs and memberships
//! - [`PgChapterRepository`] - chapters and completion records
//! - [`PgPostRepository`], [`PgDiscussionRepository`], [`PgCommentRepository`] - conversation
//! - [`PgInviteRepository`] - join codes
//! - [`PgSubscriptionRepository`] - web-push registrations

pub mod pg_chapter_repository;
pub mod pg_club_repository;
pub mod pg_comment_repository;
pub mod pg_discussion_repository;
pub mod pg_invite_repository;
pub mod pg_member_repository;
pub mod pg_post_repository;
pub mod pg_subscription_repository;
pub mod pg_token_repository;
pub mod pg_user_repository;

pub use pg_chapter_repository::PgChapterRepository;
pub use pg_club_repository::PgClubRepository;
pub use pg_comment_repository::PgCommentRepository;
pub use pg_discussion_repository::PgDiscussionRepository;
pub use pg_invite_repository::PgInviteRepository;
pub use pg_member_repository::PgMemberRepository;
pub use pg_post_repository::PgPostRepository;
pub use pg_subscription_repository::PgSubscriptionRepository;
pub use pg_token_repository::PgTokenRepository;
pub use pg_user_repository::PgUserRepository;
