pub mod attractions;
pub mod auth;
pub mod images;
pub mod pages;
pub mod upload;
