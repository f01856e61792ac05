//! Data access for the JSON documents and image folders.

pub mod attraction_repo;
pub mod page_content_repo;

pub use attraction_repo::AttractionRepo;
pub use page_content_repo::PageContentRepo;
