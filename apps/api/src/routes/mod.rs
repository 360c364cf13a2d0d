pub mod health;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::state::AppState;
use crate::{admin, chat, matching, profiles};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Profile directory
        .route(
            "/api/v1/profile",
            put(profiles::handlers::handle_put_profile).get(profiles::handlers::handle_get_own_profile),
        )
        .route(
            "/api/v1/profiles/candidates",
            get(profiles::handlers::handle_candidates),
        )
        .route(
            "/api/v1/profiles/search",
            get(profiles::handlers::handle_search),
        )
        .route(
            "/api/v1/profiles/:id",
            get(profiles::handlers::handle_get_profile),
        )
        // Swiping and matches
        .route("/api/v1/swipes", post(matching::handlers::handle_swipe))
        .route(
            "/api/v1/matches",
            get(matching::handlers::handle_list_matches),
        )
        .route(
            "/api/v1/matches/:id",
            get(matching::handlers::handle_get_match),
        )
        // Chat
        .route(
            "/api/v1/matches/:id/messages",
            get(chat::handlers::handle_list_messages).post(chat::handlers::handle_send_message),
        )
        .route("/api/v1/matches/:id/ws", get(chat::ws::handle_chat_ws))
        // Account + operator tools
        .route(
            "/api/v1/account",
            delete(admin::handlers::handle_delete_account),
        )
        .route("/api/v1/admin/seed", post(admin::handlers::handle_seed))
        .route("/api/v1/admin/wipe", post(admin::handlers::handle_wipe))
        .with_state(state)
}
