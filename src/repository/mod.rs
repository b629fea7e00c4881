//! Repository layer for catalog persistence

pub mod json_file;

pub use json_file::JsonFileRepository;
