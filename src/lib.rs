//! Library Catalog
//!
//! Books, e-books and members of a small lending library, with the lending
//! workflow and whole-catalog persistence to a JSON file.

pub mod config;
pub mod error;
pub mod models;
pub mod repository;

pub use crate::config::AppConfig;
pub use crate::error::{AppError, AppResult};
pub use crate::models::{Book, EBook, Item, LendingPolicy, Library, Member, MemberId};
pub use crate::repository::JsonFileRepository;
