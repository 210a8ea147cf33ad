//! Domain types, errors, and project rules shared by the db and api crates.

pub mod error;
pub mod project;
pub mod types;
