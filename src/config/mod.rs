//! Configuration loading.
//!
//! Resolves the backend settings from environment variables. A `.env`
//! file, when present, is loaded into the process environment by the
//! binary before this runs.

pub mod loader;

pub use loader::ServiceConfig;
