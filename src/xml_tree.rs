//! In-memory XML element tree built on the quick-xml pull reader
//!
//! Playlists are small, so the whole document is materialized and then
//! queried by local tag name. Namespaces are not resolved: `<x:title>` and
//! `<title>` are both `title`.

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use std::fmt;

/// A node of the parsed document
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

/// An element with its local name and ordered children
#[derive(Debug, Clone, PartialEq, Default)]
pub struct XmlElement {
    pub name: String,
    pub children: Vec<XmlNode>,
}

/// A parsed document; `root` is `None` for empty input
#[derive(Debug, Clone, PartialEq, Default)]
pub struct XmlDocument {
    pub root: Option<XmlElement>,
}

/// Well-formedness failure with the byte offset where it was detected
#[derive(Debug, Clone, PartialEq)]
pub struct XmlError {
    pub position: u64,
    pub message: String,
}

impl fmt::Display for XmlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "XML error at byte {}: {}", self.position, self.message)
    }
}

impl std::error::Error for XmlError {}

impl XmlElement {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Direct children that are elements; text nodes are skipped
    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        })
    }

    /// All elements named `name` in pre-order, including `self`
    pub fn descendants<'a>(&'a self, name: &str) -> Vec<&'a XmlElement> {
        let mut found = Vec::new();
        self.collect_named(name, &mut found);
        found
    }

    fn collect_named<'a>(&'a self, name: &str, found: &mut Vec<&'a XmlElement>) {
        if self.name == name {
            found.push(self);
        }
        for child in self.child_elements() {
            child.collect_named(name, found);
        }
    }

    /// Concatenated text of every descendant text node
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        self.append_text(&mut text);
        text
    }

    fn append_text(&self, out: &mut String) {
        for node in &self.children {
            match node {
                XmlNode::Text(text) => out.push_str(text),
                XmlNode::Element(element) => element.append_text(out),
            }
        }
    }

    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        // Merge adjacent chunks (text split around entity references)
        if let Some(XmlNode::Text(last)) = self.children.last_mut() {
            last.push_str(text);
        } else {
            self.children.push(XmlNode::Text(text.to_string()));
        }
    }
}

impl XmlDocument {
    /// Parse a complete document held in memory
    pub fn parse(content: &str) -> Result<Self, XmlError> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let mut reader = Reader::from_str(content);
        reader.config_mut().trim_text(false);

        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            let position = reader.buffer_position() as u64;
            let event = reader.read_event().map_err(|e| XmlError {
                position,
                message: e.to_string(),
            })?;

            match event {
                Event::Start(ref e) => {
                    let element = open_element(e, position)?;
                    if stack.is_empty() && root.is_some() {
                        return Err(multiple_roots(position));
                    }
                    stack.push(element);
                }
                Event::Empty(ref e) => {
                    let element = open_element(e, position)?;
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(XmlNode::Element(element)),
                        None if root.is_some() => return Err(multiple_roots(position)),
                        None => root = Some(element),
                    }
                }
                Event::End(_) => {
                    // quick-xml already verified the end name matches
                    let Some(element) = stack.pop() else {
                        return Err(XmlError {
                            position,
                            message: "unexpected closing tag".to_string(),
                        });
                    };
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(XmlNode::Element(element)),
                        None => root = Some(element),
                    }
                }
                Event::Text(ref e) => {
                    // Entity references arrive separately as `GeneralRef`
                    let raw = String::from_utf8_lossy(e.as_ref());
                    push_text(&mut stack, &raw, position)?;
                }
                Event::CData(ref e) => {
                    let text = String::from_utf8_lossy(e);
                    push_text(&mut stack, &text, position)?;
                }
                Event::GeneralRef(ref e) => {
                    let name = String::from_utf8_lossy(e);
                    let text = resolve_entity(&name).ok_or_else(|| XmlError {
                        position,
                        message: format!("undeclared entity &{};", name),
                    })?;
                    push_text(&mut stack, &text, position)?;
                }
                Event::Eof => break,
                // Comments, declarations, processing instructions, doctype
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(XmlError {
                position: content.len() as u64,
                message: format!("unclosed element <{}>", open.name),
            });
        }

        Ok(Self { root })
    }

    /// All elements named `name` in document order
    pub fn descendants(&self, name: &str) -> Vec<&XmlElement> {
        self.root
            .as_ref()
            .map(|root| root.descendants(name))
            .unwrap_or_default()
    }
}

fn open_element(start: &BytesStart<'_>, position: u64) -> Result<XmlElement, XmlError> {
    // Surface malformed or duplicated attributes even though values are unused
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| XmlError {
            position,
            message: e.to_string(),
        })?;
        check_attribute_value(&attribute.value).map_err(|message| XmlError { position, message })?;
    }
    let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
    Ok(XmlElement::new(name))
}

fn push_text(stack: &mut [XmlElement], text: &str, position: u64) -> Result<(), XmlError> {
    match stack.last_mut() {
        Some(parent) => {
            parent.push_text(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(XmlError {
            position,
            message: "text outside of the root element".to_string(),
        }),
    }
}

fn multiple_roots(position: u64) -> XmlError {
    XmlError {
        position,
        message: "more than one root element".to_string(),
    }
}

/// Resolve a predefined or numeric character entity by name (without `&`/`;`)
fn resolve_entity(name: &str) -> Option<String> {
    let resolved = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        _ => {
            let code = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                name.strip_prefix('#')?.parse().ok()?
            };
            char::from_u32(code)?
        }
    };
    Some(resolved.to_string())
}

/// Attribute values may not contain `<` or references to undeclared entities
fn check_attribute_value(value: &[u8]) -> Result<(), String> {
    let value = String::from_utf8_lossy(value);
    if value.contains('<') {
        return Err("'<' in attribute value".to_string());
    }

    let mut rest = value.as_ref();
    while let Some(amp) = rest.find('&') {
        let after = &rest[amp + 1..];
        let end = after
            .find(';')
            .ok_or_else(|| "unterminated entity reference in attribute value".to_string())?;
        let name = &after[..end];
        if resolve_entity(name).is_none() {
            return Err(format!("undeclared entity &{}; in attribute value", name));
        }
        rest = &after[end + 1..];
    }
    Ok(())
}

#[cfg(test)]
#[path = "xml_tree_tests.rs"]
mod tests;
