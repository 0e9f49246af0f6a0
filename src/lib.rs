//! Finder - find and rate local service professionals
//!
//! This is the library interface for Finder, exposing the session/auth core
//! and the typed API bindings the CLI is built on.

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;

pub use api::ApiClient;
pub use auth::{Session, SessionManager, TokenStore};
pub use config::Config;
pub use error::Error;
