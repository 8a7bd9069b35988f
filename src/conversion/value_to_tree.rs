//! Unfold generic values into XML element trees
//!
//! Mapping entries become child elements named after their keys. A
//! sequence-valued entry becomes one sibling element per item, all sharing
//! the key as tag, which is the inverse of same-tag folding. Scalars become
//! leaf elements holding their text. Attributes are never produced.

use crate::model::{Node, Value};

/// Element tag used for the document root when converting from JSON or YAML
pub const DEFAULT_ROOT_TAG: &str = "data";

/// A node whose children are still being built
struct Frame<'a> {
    node: Node,
    pending: std::vec::IntoIter<(&'a str, &'a Value)>,
}

enum Opened<'a> {
    Branch(Frame<'a>),
    Leaf(Node),
}

/// Start building the element for `value` tagged `tag`
fn open<'a>(tag: &'a str, value: &'a Value) -> Opened<'a> {
    let pending: Vec<(&'a str, &'a Value)> = match value {
        Value::Mapping(entries) => {
            let mut pending = Vec::with_capacity(entries.len());
            for (key, entry) in entries {
                match entry {
                    Value::Sequence(items) => {
                        pending.extend(items.iter().map(|item| (key.as_str(), item)))
                    }
                    other => pending.push((key.as_str(), other)),
                }
            }
            pending
        }
        Value::Sequence(items) => items.iter().map(|item| (tag, item)).collect(),
        scalar => {
            let text = scalar.scalar_text().unwrap_or_default();
            return Opened::Leaf(Node::new(tag).with_text(text));
        }
    };

    Opened::Branch(Frame {
        node: Node::new(tag),
        pending: pending.into_iter(),
    })
}

/// Convert a generic value into an element tree whose root is tagged
/// `name_hint`.
///
/// Bool becomes `true`/`false`, null becomes empty text, numbers keep their
/// decimal form. Uses an explicit stack, so deep values cannot overflow the
/// call stack.
pub fn value_to_tree(value: &Value, name_hint: &str) -> Node {
    let mut stack = match open(name_hint, value) {
        Opened::Leaf(node) => return node,
        Opened::Branch(frame) => vec![frame],
    };

    while let Some(top) = stack.last_mut() {
        if let Some((tag, child)) = top.pending.next() {
            match open(tag, child) {
                Opened::Leaf(node) => top.node.children.push(node),
                Opened::Branch(frame) => stack.push(frame),
            }
            continue;
        }

        let Some(done) = stack.pop() else {
            break;
        };
        match stack.last_mut() {
            Some(parent) => parent.node.children.push(done.node),
            None => return done.node,
        }
    }

    // The root frame always returns from inside the loop
    Node::new(name_hint)
}
