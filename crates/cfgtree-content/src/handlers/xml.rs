//! XML format loader using quick-xml
//!
//! The document is first read into a generic element tree, then flattened
//! into the same mapping shape the other loaders produce:
//!
//! - the root element's content is the top-level mapping
//! - child elements become entries keyed by tag name
//! - repeated tag names become an ordered sequence
//! - attributes are collected under `@attributes`
//! - an element holding only text becomes a string
//! - an element with attributes and text keeps the text under `#text`
//! - an empty element with no attributes becomes an empty mapping
//!
//! Text mixed in between child elements is dropped.

use std::fmt::Display;

use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesRef, BytesStart, Event};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::format::{FormatLoader, Mapping, source_text};

const FORMAT: &str = "XML";
const ATTRIBUTES_KEY: &str = "@attributes";
const TEXT_KEY: &str = "#text";

/// Loader for XML files
#[derive(Debug, Default)]
pub struct XmlLoader;

impl XmlLoader {
    pub fn new() -> Self {
        Self
    }
}

impl FormatLoader for XmlLoader {
    fn name(&self) -> &str {
        FORMAT
    }

    fn load(&self, source: &[u8]) -> Result<Mapping> {
        let text = source_text(FORMAT, source)?;
        let root = parse_tree(text)?;

        match flatten(root) {
            Value::Object(map) => Ok(map),
            scalar => {
                let mut map = Mapping::new();
                map.insert("0".to_string(), scalar);
                Ok(map)
            }
        }
    }
}

#[derive(Debug, Default)]
struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
    text: String,
}

fn xml_error(message: impl Display) -> Error {
    Error::syntax(FORMAT, message.to_string())
}

fn parse_tree(text: &str) -> Result<Element> {
    let mut reader = Reader::from_str(text);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = reader.read_event().map_err(|e| {
            xml_error(format!("at position {}: {e}", reader.error_position()))
        })?;

        match event {
            Event::Start(start) => stack.push(open_element(&start, &reader)?),
            Event::Empty(start) => {
                let element = open_element(&start, &reader)?;
                attach(element, &mut stack, &mut root)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| xml_error("closing tag without an open element"))?;
                attach(element, &mut stack, &mut root)?;
            }
            Event::Text(content) => {
                let content = content.decode().map_err(xml_error)?;
                push_text(&mut stack, &content)?;
            }
            Event::CData(content) => {
                let content = content.decode().map_err(xml_error)?;
                push_text(&mut stack, &content)?;
            }
            Event::GeneralRef(reference) => {
                let resolved = resolve_reference(&reference)?;
                push_text(&mut stack, &resolved)?;
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions, doctype
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(xml_error(format!("unclosed element <{}>", open.name)));
    }
    root.ok_or_else(|| xml_error("document has no root element"))
}

fn open_element(start: &BytesStart<'_>, reader: &Reader<&[u8]>) -> Result<Element> {
    let mut element = Element {
        name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
        ..Element::default()
    };

    for attr in start.attributes() {
        let attr = attr.map_err(xml_error)?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .decode_and_unescape_value(reader.decoder())
            .map_err(xml_error)?
            .into_owned();
        element.attributes.push((key, value));
    }

    Ok(element)
}

fn attach(element: Element, stack: &mut [Element], root: &mut Option<Element>) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(xml_error(format!(
            "multiple root elements (found <{}>)",
            element.name
        )));
    }
    *root = Some(element);
    Ok(())
}

fn push_text(stack: &mut [Element], content: &str) -> Result<()> {
    match stack.last_mut() {
        Some(current) => {
            current.text.push_str(content);
            Ok(())
        }
        None if content.trim().is_empty() => Ok(()),
        None => Err(xml_error("text outside the root element")),
    }
}

fn resolve_reference(reference: &BytesRef<'_>) -> Result<String> {
    if let Some(ch) = reference.resolve_char_ref().map_err(xml_error)? {
        return Ok(ch.to_string());
    }
    let name = reference.decode().map_err(xml_error)?;
    resolve_predefined_entity(&name)
        .map(str::to_string)
        .ok_or_else(|| xml_error(format!("unknown entity &{name};")))
}

fn flatten(element: Element) -> Value {
    let text = element.text.trim();

    if element.children.is_empty() && element.attributes.is_empty() {
        return if text.is_empty() {
            Value::Object(Mapping::new())
        } else {
            Value::String(text.to_string())
        };
    }

    let mut map = Mapping::new();
    if !element.attributes.is_empty() {
        let attributes = element
            .attributes
            .into_iter()
            .map(|(key, value)| (key, Value::String(value)))
            .collect();
        map.insert(ATTRIBUTES_KEY.to_string(), Value::Object(attributes));
    }
    if element.children.is_empty() && !text.is_empty() {
        map.insert(TEXT_KEY.to_string(), Value::String(text.to_string()));
    }

    for child in element.children {
        let name = child.name.clone();
        let value = flatten(child);
        match map.get_mut(&name) {
            None => {
                map.insert(name, value);
            }
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = std::mem::take(existing);
                *existing = Value::Array(vec![first, value]);
            }
        }
    }

    Value::Object(map)
}
