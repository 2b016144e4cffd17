//! Core domain entities representing the reading-club data model.
//!
//! Entities are plain data structures mirroring database records. Creation
//! inputs live in separate `New*` structs and partial updates in `*Patch`.
//!
//! # Entity Types
//!
//! - [`User`] and [`ApiToken`] - accounts and their bearer credentials
//! - [`Club`], [`Member`], [`Chapter`] - a club reading one book
//! - [`Post`], [`Discussion`], [`Comment`] - club conversation
//! - [`ClubInvite`] - shareable join codes
//! - [`Subscription`] - web-push registrations

pub mod chapter;
pub mod club;
pub mod conversation;
pub mod invite;
pub mod subscription;
pub mod user;

pub use chapter::{Chapter, ChapterWithTally, ClubChapterTally};
pub use club::{Club, ClubPatch, Member, MemberRole, NewClub};
pub use conversation::{Comment, Discussion, NewComment, NewDiscussion, NewPost, Post};
pub use invite::{ClubInvite, NewInvite};
pub use subscription::{NewSubscription, Subscription};
pub use user::{ApiToken, CurrentUser, NewUser, User};
