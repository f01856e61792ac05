//! Authentication extractors.
//!
//! - [`auth::RequireAdmin`] -- Requires a live admin session (401 otherwise).
//! - [`auth::MaybeAdmin`] -- The admin session, if any, without rejecting.

pub mod auth;
