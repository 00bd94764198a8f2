pub mod atomic;
pub mod backend;
pub mod config;
pub mod error;
pub mod query;
pub mod store;
pub mod workspace;
