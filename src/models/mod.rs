//! Data models for the library catalog

pub mod book;
pub mod library;
pub mod member;

// Re-export commonly used types
pub use book::{Book, EBook, Item, ItemKind};
pub use library::{LendingPolicy, Library};
pub use member::{Member, MemberId};
