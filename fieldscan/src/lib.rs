// fieldscan/src/lib.rs
//! # fieldscan
//!
//! Application crate for the content match reports: a small HTTP server that
//! serves one HTML report per configured report definition, and a CLI to
//! render reports once, list them, and check configuration files.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod server;
pub mod store;

pub use server::AppState;
pub use store::FileStore;
