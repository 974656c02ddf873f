pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod render;
pub mod router;
pub mod service;
pub mod types;

pub use error::RegistryError;
