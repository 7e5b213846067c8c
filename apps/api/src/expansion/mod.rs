// Inline prompt expansion: `##[...]` directives in post content are resolved
// through the llm_client before a post is published.

pub mod expander;
pub mod handlers;
pub mod scanner;
