//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and password-change rules.
//! - [`jwt`] -- Session token generation and validation.
//! - [`session`] -- Registry of live (not logged out) sessions.
//! - [`credentials`] -- Storage of the admin username and password hash.

pub mod credentials;
pub mod jwt;
pub mod password;
pub mod session;
