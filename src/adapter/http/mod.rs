pub mod error;
pub mod events;
pub mod extract;
pub mod handlers;
pub mod state;

pub use state::AppState;

use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/events", get(events::stream_events))
        .route("/users", post(handlers::create_user))
        .route("/users/{user_id}", get(handlers::get_user))
        .route("/groups", post(handlers::create_group))
        .route("/groups/{group_id}", get(handlers::get_group))
        .route("/groups/{group_id}/rules", put(handlers::update_rules))
        .route(
            "/groups/{group_id}/join",
            post(handlers::request_join).delete(handlers::revoke_join_request),
        )
        .route("/groups/{group_id}/leave", post(handlers::leave_group))
        .route("/groups/{group_id}/members", get(handlers::list_members))
        .route(
            "/groups/{group_id}/members/invitations",
            post(handlers::invite_member),
        )
        .route(
            "/groups/{group_id}/members/invitation/accept",
            post(handlers::accept_invite),
        )
        .route(
            "/groups/{group_id}/members/invitation/reject",
            post(handlers::reject_invite),
        )
        .route(
            "/groups/{group_id}/members/{user_id}",
            delete(handlers::remove_member),
        )
        .route(
            "/groups/{group_id}/administrators",
            get(handlers::list_administrators).post(handlers::invite_admin),
        )
        .route(
            "/groups/{group_id}/administrators/invitation/accept",
            post(handlers::accept_admin_invite),
        )
        .route(
            "/groups/{group_id}/administrators/invitation/reject",
            post(handlers::reject_admin_invite),
        )
        .route(
            "/groups/{group_id}/administrators/invitations/{user_id}",
            delete(handlers::cancel_admin_invite),
        )
        .route(
            "/groups/{group_id}/administrators/{user_id}",
            delete(handlers::revoke_admin),
        )
        .route("/groups/{group_id}/articles", post(handlers::submit_article))
        .route(
            "/groups/{group_id}/articles/pending",
            get(handlers::pending_articles),
        )
        .route(
            "/groups/{group_id}/articles/processed",
            get(handlers::processed_articles),
        )
        .route(
            "/groups/{group_id}/articles/{article_id}/moderation",
            put(handlers::moderate_article),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
