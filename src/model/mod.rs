//! In-memory document models
//!
//! JSON and YAML parse into [`Value`]; XML parses into [`Node`] trees.

pub mod node;
pub mod value;

use crate::format::ModelKind;

pub use node::Node;
pub use value::{Mapping, Number, Value};

/// A parsed document in whichever model its format uses
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    Value(Value),
    Tree(Node),
}

impl Document {
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Document::Value(value) => Some(value),
            Document::Tree(_) => None,
        }
    }

    pub fn as_tree(&self) -> Option<&Node> {
        match self {
            Document::Tree(node) => Some(node),
            Document::Value(_) => None,
        }
    }

    pub fn kind(&self) -> ModelKind {
        match self {
            Document::Value(_) => ModelKind::Value,
            Document::Tree(_) => ModelKind::Tree,
        }
    }

    /// Short name of the model for messages
    pub fn model_name(&self) -> &'static str {
        match self {
            Document::Value(_) => "value",
            Document::Tree(_) => "tree",
        }
    }
}
