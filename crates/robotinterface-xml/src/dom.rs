// crates/robotinterface-xml/src/dom.rs

//! A small owned XML tree built on top of the `quick-xml` pull reader.
//!
//! The reader only needs attribute lookup, text content, source lines and
//! two mutations (child replacement and attribute removal) for the
//! inclusion pass, so the tree is deliberately minimal.

use crate::error::ReaderError;
use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// A child of an element: either a nested element or a run of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An XML element with its attributes (in document order) and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Qualified tag name, kept verbatim (e.g. `xi:include`).
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
    /// 1-based line of the start tag in its source file.
    pub line: u32,
    /// Name of the file this element was read from.
    pub source: Arc<str>,
}

impl Element {
    pub fn new(name: impl Into<String>, source: Arc<str>, line: u32) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            line,
            source,
        }
    }

    /// Returns the value of the attribute `name`, if present.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Removes the attribute `name`, returning its old value.
    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        let pos = self.attributes.iter().position(|(k, _)| k == name)?;
        Some(self.attributes.remove(pos).1)
    }

    /// Returns the first text child, if the element has one.
    pub fn text(&self) -> Option<&str> {
        match self.children.first() {
            Some(Node::Text(t)) if !t.is_empty() => Some(t.as_str()),
            _ => None,
        }
    }

    /// Iterates over the element children, skipping text.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// Replaces the child node at `index` with `element`.
    ///
    /// Returns `false` if `index` is out of bounds.
    pub fn replace_child(&mut self, index: usize, element: Element) -> bool {
        match self.children.get_mut(index) {
            Some(slot) => {
                *slot = Node::Element(element);
                true
            }
            None => false,
        }
    }

    /// Returns `true` if this element or any descendant is named `name`.
    pub fn contains_element(&self, name: &str) -> bool {
        self.name == name || self.child_elements().any(|c| c.contains_element(name))
    }
}

/// A parsed XML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Element,
}

impl Document {
    /// Parses a document from a string. `file_name` is recorded on every
    /// element for diagnostics.
    pub fn parse_str(text: &str, file_name: &str) -> Result<Self, ReaderError> {
        let source: Arc<str> = Arc::from(file_name);
        let mut reader = Reader::from_str(text);

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;
        let mut lines = LineCounter::new(text);

        loop {
            let pos = reader.buffer_position() as usize;
            let event = match reader.read_event() {
                Ok(event) => event,
                Err(e) => {
                    let line = line_of(text, reader.error_position() as usize);
                    return Err(syntax_error(line)(e));
                }
            };
            match event {
                Event::Start(e) => {
                    let line = lines.line_at(pos);
                    let element =
                        element_from_start(&e, &source, line).map_err(syntax_error(line))?;
                    stack.push(element);
                }
                Event::Empty(e) => {
                    let line = lines.line_at(pos);
                    let element =
                        element_from_start(&e, &source, line).map_err(syntax_error(line))?;
                    attach(&mut stack, &mut root, element);
                }
                Event::End(_) => {
                    // quick-xml checks that end names match
                    if let Some(element) = stack.pop() {
                        attach(&mut stack, &mut root, element);
                    }
                }
                Event::Text(e) => {
                    let raw = String::from_utf8_lossy(&e);
                    let text = quick_xml::escape::unescape(&raw)
                        .map_err(|e| syntax_error(lines.line_at(pos))(e.into()))?;
                    push_text(&mut stack, &text);
                }
                Event::CData(e) => {
                    push_text(&mut stack, &String::from_utf8_lossy(&e));
                }
                Event::GeneralRef(e) => {
                    let char_ref = e
                        .resolve_char_ref()
                        .map_err(syntax_error(lines.line_at(pos)))?;
                    let resolved = match char_ref {
                        Some(c) => c.to_string(),
                        None => {
                            let name = String::from_utf8_lossy(&e).into_owned();
                            match quick_xml::escape::resolve_predefined_entity(&name) {
                                Some(s) => s.to_string(),
                                None => format!("&{};", name),
                            }
                        }
                    };
                    push_text(&mut stack, &resolved);
                }
                Event::Eof => break,
                // Declarations, comments, processing instructions and DOCTYPE
                _ => {}
            }
        }

        // quick-xml reports EOF without complaining about open elements.
        if let Some(open) = stack.last() {
            return Err(ReaderError::MissingEndTag {
                name: open.name.clone(),
                line: open.line,
            });
        }

        let mut root = root.ok_or(ReaderError::MissingRootElement)?;
        condense_text(&mut root);
        Ok(Self { root })
    }

    /// Loads and parses a document from disk.
    pub fn load_file(path: &Path) -> Result<Self, ReaderError> {
        let text = fs::read_to_string(path).map_err(|source| ReaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::parse_str(&text, &file_name)
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    pub fn into_root(self) -> Element {
        self.root
    }

    /// Serializes the tree back to an indented XML string.
    pub fn to_xml_string(&self) -> Result<String, ReaderError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        write_element(&mut writer, &self.root)?;
        Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
    }
}

/// Maps byte offsets to line numbers, scanning forward only.
struct LineCounter<'a> {
    text: &'a [u8],
    offset: usize,
    line: u32,
}

impl<'a> LineCounter<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text: text.as_bytes(),
            offset: 0,
            line: 1,
        }
    }

    fn line_at(&mut self, pos: usize) -> u32 {
        let end = pos.min(self.text.len());
        if end > self.offset {
            let newlines = self.text[self.offset..end].iter().filter(|&&b| b == b'\n').count();
            self.line += newlines as u32;
            self.offset = end;
        }
        // Skip whitespace between the previous event and the tag itself.
        let mut line = self.line;
        for &b in &self.text[self.offset..] {
            match b {
                b'\n' => line += 1,
                b' ' | b'\t' | b'\r' => {}
                _ => break,
            }
        }
        line
    }
}

/// 1-based line of the byte at `pos`.
fn line_of(text: &str, pos: usize) -> u32 {
    let end = pos.min(text.len());
    1 + text.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count() as u32
}

fn syntax_error(line: u32) -> impl FnOnce(quick_xml::Error) -> ReaderError {
    move |source| ReaderError::XmlParsing {
        line: Some(line),
        source,
    }
}

fn element_from_start(
    start: &BytesStart<'_>,
    source: &Arc<str>,
    line: u32,
) -> Result<Element, quick_xml::Error> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut element = Element::new(name, Arc::clone(source), line);
    for attr in start.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Node::Element(element)),
        None => {
            if root.is_none() {
                *root = Some(element);
            }
        }
    }
}

fn push_text(stack: &mut [Element], text: &str) {
    // Text outside the root element is ignored.
    let Some(parent) = stack.last_mut() else {
        return;
    };
    match parent.children.last_mut() {
        Some(Node::Text(existing)) => existing.push_str(text),
        _ => parent.children.push(Node::Text(text.to_string())),
    }
}

/// Trims text nodes and collapses inner whitespace runs to a single space.
/// Whitespace-only text nodes are dropped.
fn condense_text(element: &mut Element) {
    element.children.retain_mut(|child| match child {
        Node::Text(t) => {
            let condensed = t.split_whitespace().collect::<Vec<_>>().join(" ");
            *t = condensed;
            !t.is_empty()
        }
        Node::Element(e) => {
            condense_text(e);
            true
        }
    });
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> Result<(), ReaderError> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for child in &element.children {
        match child {
            Node::Element(e) => write_element(writer, e)?,
            Node::Text(t) => {
                writer.write_event(Event::Text(BytesText::new(t)))?;
            }
        }
    }
    writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
    Ok(())
}
