pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::drafts::handlers as drafts;
use crate::expansion::handlers as expansion;
use crate::generation::handlers as generation;
use crate::posts::handlers as posts;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Drafts API
        .route(
            "/api/drafts",
            get(drafts::handle_list_drafts).post(drafts::handle_save_draft),
        )
        .route(
            "/api/drafts/:id",
            get(drafts::handle_get_draft)
                .put(drafts::handle_update_draft)
                .delete(drafts::handle_delete_draft),
        )
        // Posts API
        .route(
            "/api/posts",
            get(posts::handle_list_posts).post(posts::handle_publish),
        )
        // Generation API
        .route("/api/gemini/generate", post(generation::handle_generate))
        .route(
            "/api/gemini/upload",
            post(generation::handle_upload)
                .layer(DefaultBodyLimit::max(generation::MAX_UPLOAD_BYTES)),
        )
        .route("/api/expand", post(expansion::handle_expand))
        .with_state(state)
}
