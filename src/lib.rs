//! jarvis — LLM-backed code review (library crate).
//!
//! Re-exports public modules for integration tests and external use.

pub mod batch;
pub mod config;
pub mod constants;
pub mod dispatcher;
pub mod env;
pub mod models;
pub mod output;
pub mod prompts;
pub mod providers;
