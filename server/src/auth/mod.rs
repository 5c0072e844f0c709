//! Session validation adapters

pub mod jwt;

pub use jwt::{JwtAuthAdapter, SessionClaims, issue_session_token};

// vim: ts=4
