//! Authentication and session management

pub mod models;
pub mod session;
pub mod token_store;

pub use models::{validate_password, Credentials, LoginResponse, Registration, User};
pub use session::{Route, Session, SessionManager, SessionState};
pub use token_store::{TokenStore, TOKEN_MAX_AGE_SECS};
