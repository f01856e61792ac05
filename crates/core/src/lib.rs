//! Domain logic for the waterfalls park content backend.
//!
//! Everything in this crate is pure: no filesystem, no HTTP. The store and
//! API crates pass data in and act on the results.

pub mod attraction;
pub mod error;
pub mod page_content;
pub mod types;
pub mod upload;
