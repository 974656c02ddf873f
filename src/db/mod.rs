//! Database module: models, schema and the SQLite record store.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database
//! - `repository.rs`: the storage seam the form workflow is written against
//! - `sqlite.rs`: connection-per-operation SQLite implementation

pub mod models;
pub mod repository;
pub mod schema;
pub mod sqlite;

pub use models::{NewStudent, StudentRecord};
pub use repository::StudentRepository;
pub use schema::SQLITE_INIT;
pub use sqlite::StudentStore;
