//! Fold XML element trees into generic values
//!
//! Attributes become string entries first, then each child element is added
//! under its tag. Repeated sibling tags fold into a sequence in document
//! order; a tag seen once stays a plain entry. Leaf elements without
//! attributes collapse to their text, or to an empty mapping when they have
//! no text.

use crate::model::{Mapping, Node, Value};

/// A node whose children are still being folded
struct Frame<'a> {
    node: &'a Node,
    next_child: usize,
    result: Mapping,
}

impl<'a> Frame<'a> {
    fn open(node: &'a Node) -> Self {
        let mut result = Mapping::with_capacity(node.attributes.len());
        for (name, value) in &node.attributes {
            result.insert(name.clone(), Value::String(value.clone()));
        }
        Self {
            node,
            next_child: 0,
            result,
        }
    }

    fn finish(self) -> Value {
        let node = self.node;
        if node.attributes.is_empty() && node.children.is_empty() {
            return match node.text.as_deref() {
                Some(text) if !text.is_empty() => Value::String(text.to_string()),
                _ => Value::Mapping(Mapping::new()),
            };
        }
        Value::Mapping(self.result)
    }
}

/// Convert an element tree into a generic value.
///
/// The root element's own tag is not part of the result; callers that need
/// it wrap the value themselves. Uses an explicit stack, so arbitrarily deep
/// trees cannot overflow the call stack.
pub fn tree_to_value(node: &Node) -> Value {
    let mut stack = vec![Frame::open(node)];

    while let Some(top) = stack.last_mut() {
        if let Some(child) = top.node.children.get(top.next_child) {
            top.next_child += 1;
            stack.push(Frame::open(child));
            continue;
        }

        let Some(done) = stack.pop() else {
            break;
        };
        let finished = done.node;
        let value = done.finish();

        match stack.last_mut() {
            Some(parent) => fold_child(&mut parent.result, &finished.tag, value),
            None => return value,
        }
    }

    // The root frame always returns from inside the loop
    Value::Mapping(Mapping::new())
}

/// Add a converted child under `tag`, folding repeats into a sequence
fn fold_child(result: &mut Mapping, tag: &str, value: Value) {
    match result.get_mut(tag) {
        None => {
            result.insert(tag.to_string(), value);
        }
        Some(Value::Sequence(items)) => items.push(value),
        Some(existing) => {
            let first = std::mem::take(existing);
            *existing = Value::Sequence(vec![first, value]);
        }
    }
}
