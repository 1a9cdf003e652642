//! # asdoc-json
//!
//! Converts an ASDoc-generated documentation site into one JSON record per
//! class plus a package/class content tree.
//!
//! ## Architecture
//!
//! - **model**: Serializable class, property and method records
//! - **rules**: Reusable extraction rules (header lookup, summary rows, signature patterns)
//! - **locate**: Class references from the listing page
//! - **extract**: Class page to [`model::ClassRecord`]
//! - **tree**: Package -> class -> output path index
//! - **source**: Document source trait and filesystem reader
//! - **sink**: Record sink trait and JSON file writer
//! - **config**: Run configuration and output folder preconditions
//! - **pipeline**: Parallel conversion of all referenced classes

pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod locate;
pub mod model;
pub mod pipeline;
pub mod rules;
pub mod sink;
pub mod source;
pub mod tree;
