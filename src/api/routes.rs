//! API route configuration.
//!
//! All API endpoints require Bearer token authentication via
//! [`crate::api::middleware::auth`].

use crate::api::handlers::{
    accept_invite_handler, batch_progress_handler, complete_chapter_handler,
    create_club_handler, create_comment_handler, create_discussion_handler,
    create_invite_handler, create_post_handler, delete_club_handler, delete_comment_handler,
    delete_discussion_handler, delete_post_handler, get_club_handler, get_discussion_handler,
    leave_club_handler, list_clubs_handler, list_comments_handler, list_discussions_handler,
    list_invites_handler, list_members_handler, list_posts_handler, list_subscriptions_handler,
    me_handler, revoke_invite_handler, search_books_handler, subscribe_handler,
    uncomplete_chapter_handler, unsubscribe_handler, update_club_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post, put},
};

/// All API routes, protected by Bearer token authentication.
///
/// # Endpoints
///
/// - `GET    /me`                              - Current user profile
/// - `GET    /clubs`                           - Clubs the caller belongs to, with progress
/// - `POST   /clubs`                           - Create a club with its chapters
/// - `GET    /clubs/{id}`                      - Club detail with per-chapter status
/// - `PATCH  /clubs/{id}`                      - Update club metadata (owner)
/// - `DELETE /clubs/{id}`                      - Delete a club (owner)
/// - `GET    /clubs/{id}/members`              - Club roster
/// - `POST   /clubs/{id}/leave`                - Leave a club
/// - `PUT    /clubs/{id}/progress`             - Mark several chapters at once
/// - `GET    /clubs/{id}/invites`              - List invites
/// - `POST   /clubs/{id}/invites`              - Create an invite code
/// - `DELETE /clubs/{id}/invites/{invite_id}`  - Revoke an invite
/// - `POST   /invites/{code}/accept`           - Join a club by code
/// - `GET    /clubs/{id}/posts`                - Club board (paginated)
/// - `POST   /clubs/{id}/posts`                - Post to the board
/// - `DELETE /posts/{id}`                      - Delete a post
/// - `PUT    /chapters/{id}/progress`          - Mark a chapter completed
/// - `DELETE /chapters/{id}/progress`          - Unmark a chapter
/// - `GET    /chapters/{id}/discussions`       - Chapter discussions
/// - `POST   /chapters/{id}/discussions`       - Start a discussion
/// - `GET    /discussions/{id}`                - Discussion detail
/// - `DELETE /discussions/{id}`                - Delete a discussion
/// - `GET    /discussions/{id}/comments`       - Comments (paginated)
/// - `POST   /discussions/{id}/comments`       - Add a comment
/// - `DELETE /comments/{id}`                   - Delete a comment
/// - `GET    /subscriptions`                   - Push subscriptions
/// - `POST   /subscriptions`                   - Register a push endpoint
/// - `DELETE /subscriptions`                   - Remove a push endpoint
/// - `GET    /books/search`                    - Book catalog search
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(me_handler))
        .route("/clubs", get(list_clubs_handler).post(create_club_handler))
        .route(
            "/clubs/{id}",
            get(get_club_handler)
                .patch(update_club_handler)
                .delete(delete_club_handler),
        )
        .route("/clubs/{id}/members", get(list_members_handler))
        .route("/clubs/{id}/leave", post(leave_club_handler))
        .route("/clubs/{id}/progress", put(batch_progress_handler))
        .route(
            "/clubs/{id}/invites",
            get(list_invites_handler).post(create_invite_handler),
        )
        .route(
            "/clubs/{id}/invites/{invite_id}",
            delete(revoke_invite_handler),
        )
        .route("/invites/{code}/accept", post(accept_invite_handler))
        .route(
            "/clubs/{id}/posts",
            get(list_posts_handler).post(create_post_handler),
        )
        .route("/posts/{id}", delete(delete_post_handler))
        .route(
            "/chapters/{id}/progress",
            put(complete_chapter_handler).delete(uncomplete_chapter_handler),
        )
        .route(
            "/chapters/{id}/discussions",
            get(list_discussions_handler).post(create_discussion_handler),
        )
        .route(
            "/discussions/{id}",
            get(get_discussion_handler).delete(delete_discussion_handler),
        )
        .route(
            "/discussions/{id}/comments",
            get(list_comments_handler).post(create_comment_handler),
        )
        .route("/comments/{id}", delete(delete_comment_handler))
        .route(
            "/subscriptions",
            get(list_subscriptions_handler)
                .post(subscribe_handler)
                .delete(unsubscribe_handler),
        )
        .route("/books/search", get(search_books_handler))
}
