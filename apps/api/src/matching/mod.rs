// CV ↔ JD matching: prompt templates, reply parsers, the two-call workflow
// and the session endpoints that drive it.
// All LLM calls go through llm_client — no direct HTTP calls here.

pub mod handlers;
pub mod parser;
pub mod prompts;
pub mod workflow;
