// XML decoding of webservice responses into nested field mappings
//
// Layout of a decoded element:
//   - no attributes, no children: text (trimmed) or Null when empty
//   - attributes become `@name` keys, text next to them goes to `#text`
//   - repeated children with the same tag become a List in document order

use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::error::ClientError;

/// Outer tag wrapping every webservice response.
pub const ENVELOPE_TAG: &str = "prestashop";
/// Attribute key holding the URL of a linked resource.
pub const LINK_ATTRIBUTE: &str = "@xlink:href";
pub const TEXT_KEY: &str = "#text";

#[derive(Error, Debug)]
#[error("XML parse error: {0}")]
pub struct XmlError(String);

#[derive(Debug, Clone, PartialEq, Default)]
pub enum XmlValue {
    #[default]
    Null,
    Text(String),
    Node(XmlNode),
    List(Vec<XmlValue>),
}

impl XmlValue {
    pub fn text(value: impl Into<String>) -> Self {
        XmlValue::Text(value.into())
    }

    /// Text content of a scalar, or the `#text` of an element with attributes.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            XmlValue::Text(text) => Some(text),
            XmlValue::Node(node) => node.get(TEXT_KEY).and_then(XmlValue::as_text),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<&XmlNode> {
        match self {
            XmlValue::Node(node) => Some(node),
            _ => None,
        }
    }

    /// Single values are viewed as a one element list.
    pub fn entries(&self) -> Vec<&XmlValue> {
        match self {
            XmlValue::Null => Vec::new(),
            XmlValue::List(values) => values.iter().collect(),
            value => vec![value],
        }
    }
}

/// Field name to value mapping of one decoded element.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct XmlNode {
    fields: BTreeMap<String, XmlValue>,
}

/// Cross-resource reference embedded in a resource field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference<'a> {
    Link(&'a str),
    /// Bare value without a link, e.g. `0` for "no region".
    Unlinked(&'a str),
}

impl XmlNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&XmlValue> {
        self.fields.get(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: XmlValue) -> Option<XmlValue> {
        self.fields.insert(key.into(), value)
    }

    pub fn remove(&mut self, key: &str) -> Option<XmlValue> {
        self.fields.remove(key)
    }

    /// Text of a field, see [`XmlValue::as_text`].
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(XmlValue::as_text)
    }

    /// Resolves a reference field. `None` when the field is missing or not a reference.
    pub fn reference(&self, key: &str) -> Option<Reference<'_>> {
        match self.get(key)? {
            XmlValue::Node(node) => match node.get(LINK_ATTRIBUTE) {
                Some(XmlValue::Text(href)) => Some(Reference::Link(href)),
                _ => Some(Reference::Unlinked(node.text(TEXT_KEY).unwrap_or_default())),
            },
            XmlValue::Text(value) => Some(Reference::Unlinked(value)),
            XmlValue::Null => Some(Reference::Unlinked("")),
            XmlValue::List(_) => None,
        }
    }

    // Repeated keys are collected into a list
    fn push(&mut self, key: String, value: XmlValue) {
        match self.fields.get_mut(&key) {
            Some(XmlValue::List(values)) => values.push(value),
            Some(existing) => {
                let first = std::mem::take(existing);
                *existing = XmlValue::List(vec![first, value]);
            }
            None => {
                self.fields.insert(key, value);
            }
        }
    }
}

impl<K: Into<String>> FromIterator<(K, XmlValue)> for XmlNode {
    fn from_iter<I: IntoIterator<Item = (K, XmlValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

struct OpenElement {
    name: String,
    node: XmlNode,
    text: String,
}

impl OpenElement {
    fn start(start: &BytesStart<'_>) -> Result<Self, XmlError> {
        let name = utf8(start.name().as_ref())?.to_string();
        let mut node = XmlNode::new();
        for attribute in start.attributes() {
            let attribute = attribute.map_err(|e| XmlError(e.to_string()))?;
            let key = utf8(attribute.key.as_ref())?;
            let value = unescape(utf8(&attribute.value)?).map_err(|e| XmlError(e.to_string()))?;
            node.push(format!("@{}", key), XmlValue::Text(value.into_owned()));
        }

        Ok(Self {
            name,
            node,
            text: String::new(),
        })
    }

    fn finish(self) -> (String, XmlValue) {
        let text = self.text.trim();
        let value = if self.node.is_empty() {
            if text.is_empty() {
                XmlValue::Null
            } else {
                XmlValue::text(text)
            }
        } else {
            let mut node = self.node;
            if !text.is_empty() {
                node.push(TEXT_KEY.to_string(), XmlValue::text(text));
            }
            XmlValue::Node(node)
        };
        (self.name, value)
    }
}

fn utf8(bytes: &[u8]) -> Result<&str, XmlError> {
    std::str::from_utf8(bytes).map_err(|e| XmlError(e.to_string()))
}

fn attach(stack: &mut [OpenElement], document: &mut XmlNode, (name, value): (String, XmlValue)) {
    match stack.last_mut() {
        Some(parent) => parent.node.push(name, value),
        None => document.push(name, value),
    }
}

/// Decodes a whole XML document. The returned mapping holds the document element.
pub fn decode_document(bytes: &[u8]) -> Result<XmlNode, XmlError> {
    let mut reader = Reader::from_reader(bytes);
    let mut buf = Vec::new();
    let mut document = XmlNode::new();
    let mut stack: Vec<OpenElement> = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => stack.push(OpenElement::start(&e)?),
            Ok(Event::Empty(e)) => {
                let element = OpenElement::start(&e)?;
                attach(&mut stack, &mut document, element.finish());
            }
            Ok(Event::End(_)) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| XmlError("unbalanced closing tag".to_string()))?;
                attach(&mut stack, &mut document, element.finish());
            }
            Ok(Event::Text(e)) => {
                if let Some(open) = stack.last_mut() {
                    let text = unescape(utf8(&e)?).map_err(|e| XmlError(e.to_string()))?;
                    open.text.push_str(&text);
                }
            }
            Ok(Event::CData(e)) => {
                if let Some(open) = stack.last_mut() {
                    open.text.push_str(utf8(&e)?);
                }
            }
            Ok(Event::GeneralRef(e)) => {
                if let Some(open) = stack.last_mut() {
                    let reference = format!("&{};", utf8(&e)?);
                    let text = unescape(&reference).map_err(|e| XmlError(e.to_string()))?;
                    open.text.push_str(&text);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(XmlError(format!(
                    "error at position {}: {}",
                    reader.error_position(),
                    e
                )))
            }
            _ => (),
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(XmlError(format!("unclosed element <{}>", open.name)));
    }
    Ok(document)
}

/// Decodes a webservice response and returns the fields under `<prestashop><root_tag>`.
///
/// An empty root element (e.g. `<orders/>`) yields an empty mapping.
pub fn decode_resource(bytes: &[u8], root_tag: &str) -> Result<XmlNode, ClientError> {
    let mut document =
        decode_document(bytes).map_err(|e| ClientError::malformed(root_tag, e.to_string()))?;

    let mut envelope = match document.remove(ENVELOPE_TAG) {
        Some(XmlValue::Node(node)) => node,
        _ => {
            return Err(ClientError::malformed(
                root_tag,
                format!("missing <{}> envelope", ENVELOPE_TAG),
            ))
        }
    };

    match envelope.remove(root_tag) {
        Some(XmlValue::Node(node)) => Ok(node),
        Some(XmlValue::Null) => Ok(XmlNode::new()),
        Some(_) => Err(ClientError::malformed(
            root_tag,
            format!("<{}> does not contain fields", root_tag),
        )),
        None => Err(ClientError::malformed(
            root_tag,
            format!("missing <{}> element", root_tag),
        )),
    }
}
