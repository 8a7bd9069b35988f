//! Conversion between JSON, YAML and XML
//!
//! This module contains the model bridges, the format dispatcher,
//! configuration, limits, batch processing and statistics.

pub mod batch;
pub mod config;
pub mod engine;
pub mod limits;
pub mod stats;
pub mod tree_to_value;
pub mod value_to_tree;

pub use config::ConversionConfig;
pub use engine::{convert, convert_formats, ConversionEngine, ConvertedDocument};
pub use stats::ConversionStatistics;
pub use tree_to_value::tree_to_value;
pub use value_to_tree::{value_to_tree, DEFAULT_ROOT_TAG};

pub use crate::error::ConversionResult;
