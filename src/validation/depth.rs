//! Nesting depth guard for parsed documents
//!
//! Rejects documents nested deeper than a configured limit before they reach
//! the serializers, which recurse once per level.

use crate::error::{ConversionError, ConversionErrorKind};
use crate::model::{Node, Value};

/// Nesting depth limit checker
pub struct DepthGuard {
    /// Deepest level allowed; the root sits at level 0
    max_depth: usize,
}

impl DepthGuard {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Check a value tree against the limit
    pub fn check_value(&self, value: &Value) -> Result<(), DepthError> {
        let mut stack = vec![(value, 0usize)];
        while let Some((current, depth)) = stack.pop() {
            if depth > self.max_depth {
                return Err(DepthError::new(depth, self.max_depth));
            }
            match current {
                Value::Sequence(items) => {
                    stack.extend(items.iter().map(|item| (item, depth + 1)));
                }
                Value::Mapping(map) => {
                    stack.extend(map.values().map(|item| (item, depth + 1)));
                }
                Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
            }
        }
        Ok(())
    }

    /// Check an element tree against the limit
    pub fn check_tree(&self, node: &Node) -> Result<(), DepthError> {
        let mut stack = vec![(node, 0usize)];
        while let Some((current, depth)) = stack.pop() {
            if depth > self.max_depth {
                return Err(DepthError::new(depth, self.max_depth));
            }
            stack.extend(current.children.iter().map(|child| (child, depth + 1)));
        }
        Ok(())
    }

    pub fn is_safe_value(&self, value: &Value) -> bool {
        self.check_value(value).is_ok()
    }

    pub fn is_safe_tree(&self, node: &Node) -> bool {
        self.check_tree(node).is_ok()
    }
}

/// Deepest level reached below the root of a value (scalars are level 0)
pub fn value_depth(value: &Value) -> usize {
    let mut deepest = 0;
    let mut stack = vec![(value, 0usize)];
    while let Some((current, depth)) = stack.pop() {
        deepest = deepest.max(depth);
        match current {
            Value::Sequence(items) => stack.extend(items.iter().map(|item| (item, depth + 1))),
            Value::Mapping(map) => stack.extend(map.values().map(|item| (item, depth + 1))),
            _ => {}
        }
    }
    deepest
}

/// Deepest level reached below the root element
pub fn tree_depth(node: &Node) -> usize {
    let mut deepest = 0;
    let mut stack = vec![(node, 0usize)];
    while let Some((current, depth)) = stack.pop() {
        deepest = deepest.max(depth);
        stack.extend(current.children.iter().map(|child| (child, depth + 1)));
    }
    deepest
}

/// Depth limit violation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepthError {
    pub depth: usize,
    pub limit: usize,
}

impl DepthError {
    pub fn new(depth: usize, limit: usize) -> Self {
        Self { depth, limit }
    }
}

impl std::fmt::Display for DepthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Maximum nesting depth ({}) exceeded at depth {}",
            self.limit, self.depth
        )
    }
}

impl std::error::Error for DepthError {}

impl From<DepthError> for ConversionError {
    fn from(err: DepthError) -> Self {
        ConversionError::conversion(ConversionErrorKind::StructuralAmbiguity {
            depth: err.depth,
            limit: err.limit,
        })
    }
}
