//! Tagged-tree model for XML documents

use indexmap::IndexMap;

/// An XML element: tag, attributes, child elements and its own text
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Node {
    pub tag: String,
    pub attributes: IndexMap<String, String>,
    pub children: Vec<Node>,
    /// Text content of a leaf element. Ignored when `children` is non-empty.
    pub text: Option<String>,
}

impl Node {
    /// Create an empty element
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: IndexMap::new(),
            children: Vec::new(),
            text: None,
        }
    }

    /// Create a leaf element with text content
    pub fn leaf(tag: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(tag).with_text(text)
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// True when the element has no child elements
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Text that counts as content: present, non-empty and on a leaf
    pub fn leaf_text(&self) -> Option<&str> {
        match &self.text {
            Some(text) if self.is_leaf() && !text.is_empty() => Some(text),
            _ => None,
        }
    }

    /// Children carrying the given tag, in document order
    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.children.iter().filter(move |child| child.tag == tag)
    }

    /// Number of elements in this subtree, including this one
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }
}

/// Children are released from a work list so deep trees drop without recursion
impl Drop for Node {
    fn drop(&mut self) {
        if self.children.iter().all(|child| child.children.is_empty()) {
            return;
        }
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut child) = pending.pop() {
            pending.append(&mut child.children);
        }
    }
}
