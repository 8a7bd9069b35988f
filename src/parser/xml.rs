//! XML reader built on quick-xml's pull parser
//!
//! Elements are assembled on an explicit stack, so nesting depth is bounded by
//! memory rather than the call stack. Text is kept only on elements without
//! child elements; comments, processing instructions, the declaration and the
//! doctype are skipped.

use crate::error::{offset_to_location, ParseError, ParseResult};
use crate::format::Format;
use crate::model::Node;
use crate::parser::error_preview;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Parse an XML document into its root element
pub fn parse(content: &str) -> ParseResult<Node> {
    let mut reader = Reader::from_str(content);
    reader.trim_text(false);

    let mut stack: Vec<Node> = Vec::new();
    let mut root: Option<Node> = None;

    loop {
        let position = reader.buffer_position();
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let node = open_element(&e, content, position)?;
                if stack.is_empty() && root.is_some() {
                    return Err(syntax_error(content, position, "multiple root elements"));
                }
                stack.push(node);
            }
            Ok(Event::Empty(e)) => {
                let node = open_element(&e, content, position)?;
                attach(&mut stack, &mut root, node, content, position)?;
            }
            Ok(Event::End(_)) => {
                let node = stack.pop().ok_or_else(|| {
                    syntax_error(content, position, "closing tag without an open element")
                })?;
                attach(&mut stack, &mut root, close_element(node), content, position)?;
            }
            Ok(Event::Text(e)) => {
                let text = e
                    .unescape()
                    .map_err(|err| syntax_error(content, position, &err.to_string()))?;
                append_text(&mut stack, &text, content, position)?;
            }
            Ok(Event::CData(e)) => {
                let raw = e.into_inner();
                let text = String::from_utf8_lossy(&raw);
                append_text(&mut stack, &text, content, position)?;
            }
            Ok(Event::Comment(_) | Event::PI(_) | Event::Decl(_) | Event::DocType(_)) => {}
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(syntax_error(
                    content,
                    reader.buffer_position(),
                    &e.to_string(),
                ))
            }
        }
    }

    if let Some(open) = stack.last() {
        return Err(syntax_error(
            content,
            content.len(),
            &format!("unclosed element <{}>", open.tag),
        ));
    }

    root.ok_or_else(|| ParseError::new(Format::Xml, "no root element".to_string(), None))
}

fn open_element(start: &BytesStart<'_>, content: &str, position: usize) -> ParseResult<Node> {
    let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut node = Node::new(tag);

    for attribute in start.attributes() {
        let attribute =
            attribute.map_err(|e| syntax_error(content, position, &e.to_string()))?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute
            .unescape_value()
            .map_err(|e| syntax_error(content, position, &e.to_string()))?;
        node.attributes.insert(key, value.into_owned());
    }

    Ok(node)
}

/// Drop text that sits between child elements
fn close_element(mut node: Node) -> Node {
    if !node.children.is_empty() {
        node.text = None;
    }
    node
}

fn attach(
    stack: &mut [Node],
    root: &mut Option<Node>,
    node: Node,
    content: &str,
    position: usize,
) -> ParseResult<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
        return Ok(());
    }
    if root.is_some() {
        return Err(syntax_error(content, position, "multiple root elements"));
    }
    *root = Some(node);
    Ok(())
}

fn append_text(stack: &mut [Node], text: &str, content: &str, position: usize) -> ParseResult<()> {
    match stack.last_mut() {
        Some(node) => {
            node.text.get_or_insert_with(String::new).push_str(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(syntax_error(
            content,
            position,
            "text outside of the root element",
        )),
    }
}

fn syntax_error(content: &str, offset: usize, message: &str) -> ParseError {
    let (line, column) = offset_to_location(content, offset);
    let error = ParseError::new(Format::Xml, message.to_string(), Some((line, column)));
    match error_preview(content, line, column) {
        Some(preview) => error.with_preview(preview),
        None => error,
    }
}
