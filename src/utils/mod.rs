//! Utility functions shared across the crate.
//!
//! - [`app_data`] - App data directory, config file and artifact location
//! - [`encoding`] - Field escaping for the index artifact
//! - [`tokenizer`] - Text normalization into index terms
//! - [`walk`] - Flat directory enumeration with modification times

pub mod app_data;
pub mod encoding;
pub mod tokenizer;
pub mod walk;

pub use app_data::*;
pub use encoding::*;
pub use tokenizer::*;
pub use walk::*;
