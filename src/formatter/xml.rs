//! XML writer built on quick-xml's event writer
//!
//! Elements are emitted from an explicit work list, so deep trees do not
//! recurse. Leaf text and attribute values are escaped by quick-xml; attribute
//! values additionally encode tab, newline and carriage return as character
//! references so readers do not normalize them to spaces.

use crate::conversion::ConversionConfig;
use crate::error::{FormattingError, FormattingResult};
use crate::model::Node;
use quick_xml::escape::escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

/// Pending writer work
enum Step<'a> {
    Open(&'a Node),
    Close(&'a str),
}

/// Check a tag or attribute name against the XML `Name` production
/// (ASCII punctuation subset): a letter, `_` or `:` followed by letters,
/// digits, `-`, `.`, `_` or `:`.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '-' | '.' | '_' | ':'))
}

/// Serialize an element tree as an XML document
pub fn serialize(root: &Node, config: &ConversionConfig) -> FormattingResult<String> {
    let mut writer = if config.pretty {
        Writer::new_with_indent(Vec::new(), b' ', usize::from(config.indent_size))
    } else {
        Writer::new(Vec::new())
    };

    if config.xml_declaration {
        write(
            &mut writer,
            Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
        )?;
    }

    let mut steps = vec![Step::Open(root)];
    while let Some(step) = steps.pop() {
        match step {
            Step::Open(node) => {
                let start = start_tag(node)?;
                if !node.children.is_empty() {
                    write(&mut writer, Event::Start(start))?;
                    steps.push(Step::Close(&node.tag));
                    steps.extend(node.children.iter().rev().map(Step::Open));
                } else if let Some(text) = node.leaf_text() {
                    write(&mut writer, Event::Start(start))?;
                    write(&mut writer, Event::Text(BytesText::new(text)))?;
                    write(&mut writer, Event::End(BytesEnd::new(node.tag.as_str())))?;
                } else {
                    write(&mut writer, Event::Empty(start))?;
                }
            }
            Step::Close(tag) => write(&mut writer, Event::End(BytesEnd::new(tag)))?,
        }
    }

    String::from_utf8(writer.into_inner())
        .map_err(|e| FormattingError::serialization(e.to_string()))
}

fn start_tag(node: &Node) -> FormattingResult<BytesStart<'_>> {
    if !is_valid_name(&node.tag) {
        return Err(FormattingError::invalid_name(node.tag.as_str()));
    }
    let mut start = BytesStart::new(node.tag.as_str());
    for (name, value) in &node.attributes {
        if !is_valid_name(name) {
            return Err(FormattingError::invalid_name(name.as_str()));
        }
        let value = escape_attribute(value);
        start.push_attribute((name.as_bytes(), value.as_bytes()));
    }
    Ok(start)
}

fn escape_attribute(value: &str) -> String {
    let escaped = escape(value);
    if !escaped.contains(['\t', '\n', '\r']) {
        return escaped.into_owned();
    }
    let mut out = String::with_capacity(escaped.len() + 8);
    for c in escaped.chars() {
        match c {
            '\t' => out.push_str("&#9;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            _ => out.push(c),
        }
    }
    out
}

fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> FormattingResult<()> {
    writer
        .write_event(event)
        .map_err(|e| FormattingError::serialization(e.to_string()))
}
