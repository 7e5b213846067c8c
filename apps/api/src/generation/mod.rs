// Standalone draft generation. All LLM calls go through llm_client.

pub mod handlers;
