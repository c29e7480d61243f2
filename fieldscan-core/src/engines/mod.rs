// fieldscan-core/src/engines/mod.rs
//! Concrete `MatchEngine` implementations.
//!
//! Each engine lives in its own file and is declared here.
//!
//! # License
//! MIT OR Apache-2.0

pub mod regex_engine;
