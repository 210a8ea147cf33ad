//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&mut PgConnection` as the first argument, so callers decide
//! whether a statement runs on a plain connection or inside a transaction.

pub mod project_repo;

pub use project_repo::ProjectRepo;
