//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod books;
pub mod clubs;
pub mod discussions;
pub mod health;
pub mod invites;
pub mod me;
pub mod posts;
pub mod progress;
pub mod subscriptions;

#[cfg(test)]
pub(crate) mod test_support;

pub use books::search_books_handler;
pub use clubs::{
    create_club_handler, delete_club_handler, get_club_handler, leave_club_handler,
    list_clubs_handler, list_members_handler, update_club_handler,
};
pub use discussions::{
    create_comment_handler, create_discussion_handler, delete_comment_handler,
    delete_discussion_handler, get_discussion_handler, list_comments_handler,
    list_discussions_handler,
};
pub use health::health_handler;
pub use invites::{
    accept_invite_handler, create_invite_handler, list_invites_handler, revoke_invite_handler,
};
pub use me::me_handler;
pub use posts::{create_post_handler, delete_post_handler, list_posts_handler};
pub use progress::{batch_progress_handler, complete_chapter_handler, uncomplete_chapter_handler};
pub use subscriptions::{list_subscriptions_handler, subscribe_handler, unsubscribe_handler};
