pub mod attraction;
pub mod credentials;
pub mod image;
