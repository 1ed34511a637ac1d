//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Selectors are resolved into
//! conditions here; statement shapes live in [`crate::generic`].

pub mod comic_chapter_link_repo;
pub mod comic_chapter_repo;
pub mod comic_link_repo;
pub mod comic_repo;
pub mod language_repo;
pub mod link_repo;
pub mod link_tl_language_repo;
pub mod website_repo;
pub mod website_tl_language_repo;

pub use comic_chapter_link_repo::ComicChapterLinkRepo;
pub use comic_chapter_repo::ComicChapterRepo;
pub use comic_link_repo::ComicLinkRepo;
pub use comic_repo::ComicRepo;
pub use language_repo::LanguageRepo;
pub use link_repo::LinkRepo;
pub use link_tl_language_repo::LinkTlLanguageRepo;
pub use website_repo::WebsiteRepo;
pub use website_tl_language_repo::WebsiteTlLanguageRepo;
