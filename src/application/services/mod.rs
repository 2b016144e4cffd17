//! Business logic services for the application layer.

mod access;
pub mod auth_service;
pub mod book_service;
pub mod club_service;
pub mod conversation_service;
pub mod invite_service;
pub mod progress_service;
pub mod subscription_service;

pub use auth_service::AuthService;
pub use book_service::BookService;
pub use club_service::{ChapterView, ClubDetail, ClubService, ClubSummary};
pub use conversation_service::ConversationService;
pub use invite_service::{AcceptedInvite, InviteService};
pub use progress_service::{BatchProgressUpdate, ChapterOutcome, ProgressService, ProgressUpdate};
pub use subscription_service::SubscriptionService;
