use std::sync::Arc;

use crate::drafts::service::DraftService;
use crate::expansion::expander::ContentExpander;
use crate::llm_client::TextGenerator;
use crate::posts::service::PostService;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub drafts: Arc<DraftService>,
    pub posts: Arc<PostService>,
    /// Pluggable text generator. Default: GeminiClient.
    pub generator: Arc<dyn TextGenerator>,
    /// Shares `generator`; used by the standalone expand endpoint.
    pub expander: ContentExpander,
}
