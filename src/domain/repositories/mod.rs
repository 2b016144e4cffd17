//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access following the Repository pattern and are
//! implemented by `crate::infrastructure::persistence`. Mock implementations
//! are generated via `mockall` for unit tests.

pub mod chapter_repository;
pub mod club_repository;
pub mod comment_repository;
pub mod discussion_repository;
pub mod invite_repository;
pub mod member_repository;
pub mod post_repository;
pub mod subscription_repository;
pub mod token_repository;
pub mod user_repository;

pub use chapter_repository::ChapterRepository;
pub use club_repository::ClubRepository;
pub use comment_repository::CommentRepository;
pub use discussion_repository::DiscussionRepository;
pub use invite_repository::InviteRepository;
pub use member_repository::MemberRepository;
pub use post_repository::PostRepository;
pub use subscription_repository::SubscriptionRepository;
pub use token_repository::TokenRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use chapter_repository::MockChapterRepository;
#[cfg(test)]
pub use club_repository::MockClubRepository;
#[cfg(test)]
pub use comment_repository::MockCommentRepository;
#[cfg(test)]
pub use discussion_repository::MockDiscussionRepository;
#[cfg(test)]
pub use invite_repository::MockInviteRepository;
#[cfg(test)]
pub use member_repository::MockMemberRepository;
#[cfg(test)]
pub use post_repository::MockPostRepository;
#[cfg(test)]
pub use subscription_repository::MockSubscriptionRepository;
#[cfg(test)]
pub use token_repository::MockTokenRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
