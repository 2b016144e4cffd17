//! Application layer services implementing business logic.
//!
//! Services enforce membership and ownership rules on top of the repository
//! traits and hand HTTP handlers ready-made views.
//!
//! # Available Services
//!
//! - [`services::club_service::ClubService`] - Clubs, chapters and membership
//! - [`services::progress_service::ProgressService`] - Chapter completion
//! - [`services::invite_service::InviteService`] - Invite codes
//! - [`services::conversation_service::ConversationService`] - Posts, discussions, comments
//! - [`services::subscription_service::SubscriptionService`] - Web-push registrations
//! - [`services::book_service::BookService`] - Cached book catalog search
//! - [`services::auth_service::AuthService`] - API token authentication

pub mod services;
