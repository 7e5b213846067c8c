//! Content Expander — resolves every `##[...]` directive in a post body.
//!
//! Walks the scanned directives with a cursor into the source. Text between
//! directives is copied verbatim; each directive is replaced by generated text,
//! or left as its raw span when generation fails. Calls are strictly
//! sequential so output order never depends on upstream latency.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::expansion::scanner::scan;
use crate::llm_client::{TextGenerator, Turn};

/// Whether directives in one document see each other's results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpansionMode {
    /// Every directive is a stateless call.
    #[default]
    Independent,
    /// Earlier prompts and their outputs are passed as history to later ones.
    Conversational,
}

/// A directive that was left in place because generation failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedDirective {
    pub prompt: String,
    pub reason: String,
}

/// Result of one expansion pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Expansion {
    pub content: String,
    pub expanded: usize,
    pub failed: Vec<FailedDirective>,
}

#[derive(Clone)]
pub struct ContentExpander {
    generator: Arc<dyn TextGenerator>,
    mode: ExpansionMode,
}

impl ContentExpander {
    pub fn new(generator: Arc<dyn TextGenerator>, mode: ExpansionMode) -> Self {
        Self { generator, mode }
    }

    /// Fully resolved text. Never fails; failed directives pass through unchanged.
    pub async fn expand(&self, text: &str) -> String {
        self.expand_detailed(text).await.content
    }

    pub async fn expand_detailed(&self, text: &str) -> Expansion {
        let directives: Vec<_> = scan(text).collect();
        if directives.is_empty() {
            return Expansion {
                content: text.to_string(),
                expanded: 0,
                failed: Vec::new(),
            };
        }

        let mut content = String::with_capacity(text.len());
        let mut cursor = 0;
        let mut history: Vec<Turn> = Vec::new();
        let mut expanded = 0;
        let mut failed = Vec::new();

        for directive in &directives {
            content.push_str(&text[cursor..directive.start]);

            match self
                .generator
                .generate(directive.prompt_body, &history)
                .await
            {
                Ok(generated) => {
                    content.push_str(&generated);
                    expanded += 1;
                    if self.mode == ExpansionMode::Conversational {
                        history.push(Turn::user(directive.prompt_body));
                        history.push(Turn::model(generated));
                    }
                }
                Err(e) => {
                    warn!("Leaving directive {:?} unexpanded: {e}", directive.raw_span);
                    content.push_str(directive.raw_span);
                    failed.push(FailedDirective {
                        prompt: directive.prompt_body.to_string(),
                        reason: e.to_string(),
                    });
                }
            }

            cursor = directive.end;
        }
        content.push_str(&text[cursor..]);

        info!(
            "Expanded {expanded}/{} directives ({} left in place)",
            directives.len(),
            failed.len()
        );

        Expansion {
            content,
            expanded,
            failed,
        }
    }
}
