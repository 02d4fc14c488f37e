//! openai-bridge: HTTP façade over an OpenAI chat-completion API for
//! immigration queries, document enhancement and case analysis.

pub mod config;
pub mod dtos;
pub mod handlers;
pub mod prompts;
pub mod services;
pub mod startup;

pub use startup::{build_router, AppState, Application};
