//! Integration tests for the library catalog

mod cli_tests;
mod lending_tests;
mod persistence_tests;
