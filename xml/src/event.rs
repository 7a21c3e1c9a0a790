//! Structural XML events and the sources producing them.

use crate::error::{RdfXmlError, RdfXmlErrorKind};
use arbor_api::parser::TextPosition;
use quick_xml::escape::unescape;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::{BTreeMap, VecDeque};
use std::io::{self, BufRead, Read};
use std::str;
use std::sync::Arc;

pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// The namespace bindings in scope on an element, keyed by prefix (the default namespace uses `""`).
pub type NamespaceBindings = BTreeMap<String, String>;

/// An element or attribute name, with its namespace resolved.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct QualName {
    pub prefix: Option<String>,
    pub namespace: Option<String>,
    pub local_name: String,
}

impl QualName {
    /// The name as written in the document, `prefix:local` or `local`.
    pub fn qualified(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}:{}", prefix, self.local_name),
            None => self.local_name.clone(),
        }
    }

    /// The concatenation of the namespace and the local name, as RDF/XML builds IRIs from names.
    pub fn expanded(&self) -> String {
        match &self.namespace {
            Some(namespace) => format!("{}{}", namespace, self.local_name),
            None => self.local_name.clone(),
        }
    }

    pub fn is(&self, namespace: &str, local_name: &str) -> bool {
        self.namespace.as_deref() == Some(namespace) && self.local_name == local_name
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct XmlAttribute {
    pub name: QualName,
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct StartElement {
    pub name: QualName,
    /// Attributes in document order, without the `xmlns` declarations.
    pub attributes: Vec<XmlAttribute>,
    /// Every binding in scope on this element, including the ones it declares.
    pub namespaces: Arc<NamespaceBindings>,
    /// The `(prefix, namespace)` pairs declared by this element itself.
    pub declared: Vec<(String, String)>,
}

#[derive(Debug, Clone)]
pub enum XmlEventKind {
    StartDocument,
    StartElement(StartElement),
    EndElement(QualName),
    Text(String),
    Comment(String),
    ProcessingInstruction { target: String, data: String },
    EndDocument,
}

#[derive(Debug, Clone)]
pub struct XmlEvent {
    pub kind: XmlEventKind,
    pub position: TextPosition,
}

/// A pull interface over the structural events of an XML document.
///
/// `StartDocument` is returned first and `EndDocument` is returned forever once the input is consumed.
pub trait XmlEventSource {
    fn next_event(&mut self) -> Result<XmlEvent, RdfXmlError>;

    /// Returns the event the next call to `next_event` will return, without consuming it.
    fn peek_event(&mut self) -> Result<&XmlEvent, RdfXmlError>;
}

impl<S: XmlEventSource + ?Sized> XmlEventSource for &mut S {
    fn next_event(&mut self) -> Result<XmlEvent, RdfXmlError> {
        (**self).next_event()
    }

    fn peek_event(&mut self) -> Result<&XmlEvent, RdfXmlError> {
        (**self).peek_event()
    }
}

/// An [`XmlEventSource`] reading a `BufRead` implementation with [`quick_xml`].
///
/// Only UTF-8 input is supported. DTDs are skipped and only the predefined entities and character references are expanded.
pub struct QuickXmlEventSource<R: BufRead> {
    reader: Reader<LineCounter<R>>,
    buffer: Vec<u8>,
    namespaces: Vec<Arc<NamespaceBindings>>,
    open_elements: Vec<QualName>,
    peeked: Option<XmlEvent>,
    started: bool,
}

impl<R: BufRead> QuickXmlEventSource<R> {
    pub fn new(read: R) -> Self {
        let mut reader = Reader::from_reader(LineCounter::new(read));
        let config = reader.config_mut();
        config.expand_empty_elements = true;
        config.check_end_names = true;
        Self {
            reader,
            buffer: Vec::default(),
            namespaces: vec![Arc::new(NamespaceBindings::default())],
            open_elements: Vec::default(),
            peeked: None,
            started: false,
        }
    }

    fn current_position(&mut self) -> TextPosition {
        let byte = self.reader.buffer_position();
        self.reader.get_mut().position(byte)
    }

    fn read_event(&mut self) -> Result<XmlEvent, RdfXmlError> {
        if !self.started {
            self.started = true;
            return Ok(XmlEvent {
                kind: XmlEventKind::StartDocument,
                position: TextPosition::new(1, 1),
            });
        }
        loop {
            let position = self.current_position();
            self.buffer.clear();
            let event = match self.reader.read_event_into(&mut self.buffer) {
                Ok(event) => event,
                Err(error) => {
                    let error_position = self.current_position();
                    return Err(RdfXmlError::from(error).at(error_position));
                }
            };
            let kind = match event {
                Event::Start(start) => {
                    let start = build_start_element(&start, &self.namespaces)
                        .map_err(|e| e.at(position))?;
                    self.namespaces.push(Arc::clone(&start.namespaces));
                    self.open_elements.push(start.name.clone());
                    XmlEventKind::StartElement(start)
                }
                Event::End(_) => {
                    self.namespaces.pop();
                    match self.open_elements.pop() {
                        Some(name) => XmlEventKind::EndElement(name),
                        None => {
                            return Err(RdfXmlError::msg("Unexpected closing tag").at(position))
                        }
                    }
                }
                Event::Empty(_) => {
                    return Err(RdfXmlError::msg(
                        "The expand_empty_elements option must be enabled",
                    )
                    .at(position))
                }
                Event::Text(text) => {
                    let text = decode(&text).map_err(|e| e.at(position))?;
                    let text = unescape(text)
                        .map_err(|e| RdfXmlError::from(quick_xml::Error::from(e)).at(position))?;
                    if text.is_empty() {
                        continue;
                    }
                    XmlEventKind::Text(text.into_owned())
                }
                Event::CData(data) => {
                    XmlEventKind::Text(decode(&data).map_err(|e| e.at(position))?.to_owned())
                }
                Event::Comment(comment) => {
                    XmlEventKind::Comment(decode(&comment).map_err(|e| e.at(position))?.to_owned())
                }
                Event::PI(pi) => XmlEventKind::ProcessingInstruction {
                    target: decode(pi.target()).map_err(|e| e.at(position))?.to_owned(),
                    data: decode(pi.content())
                        .map_err(|e| e.at(position))?
                        .trim_start()
                        .to_owned(),
                },
                Event::Decl(_) | Event::DocType(_) => continue,
                Event::Eof => {
                    if !self.open_elements.is_empty() {
                        return Err(RdfXmlError {
                            kind: RdfXmlErrorKind::PrematureEof,
                            position: Some(position),
                        });
                    }
                    XmlEventKind::EndDocument
                }
            };
            return Ok(XmlEvent { kind, position });
        }
    }
}

impl<R: BufRead> XmlEventSource for QuickXmlEventSource<R> {
    fn next_event(&mut self) -> Result<XmlEvent, RdfXmlError> {
        match self.peeked.take() {
            Some(event) => Ok(event),
            None => self.read_event(),
        }
    }

    fn peek_event(&mut self) -> Result<&XmlEvent, RdfXmlError> {
        if self.peeked.is_none() {
            self.peeked = Some(self.read_event()?);
        }
        self.peeked
            .as_ref()
            .ok_or_else(|| RdfXmlError::msg("No event available"))
    }
}

fn build_start_element(
    event: &BytesStart<'_>,
    enclosing: &[Arc<NamespaceBindings>],
) -> Result<StartElement, RdfXmlError> {
    let mut raw_attributes = Vec::new();
    let mut declared = Vec::new();
    for attribute in event.attributes() {
        let attribute: Attribute<'_> = attribute.map_err(quick_xml::Error::InvalidAttr)?;
        let key = decode(attribute.key.as_ref())?.to_owned();
        let value = unescape(decode(&attribute.value)?)
            .map_err(quick_xml::Error::from)?
            .into_owned();
        if key == "xmlns" {
            declared.push((String::new(), value));
        } else if let Some(prefix) = key.strip_prefix("xmlns:") {
            if value.is_empty() {
                return Err(RdfXmlError::namespace(format!(
                    "The prefix {} cannot be bound to an empty namespace",
                    prefix
                )));
            }
            declared.push((prefix.to_owned(), value));
        } else {
            raw_attributes.push((key, value));
        }
    }

    let namespaces = match enclosing.last() {
        Some(enclosing) if declared.is_empty() => Arc::clone(enclosing),
        enclosing => {
            let mut namespaces = enclosing.map(|e| (**e).clone()).unwrap_or_default();
            for (prefix, namespace) in &declared {
                if prefix.is_empty() && namespace.is_empty() {
                    namespaces.remove("");
                } else {
                    namespaces.insert(prefix.clone(), namespace.clone());
                }
            }
            Arc::new(namespaces)
        }
    };

    let name = resolve_name(decode(event.name().as_ref())?, &namespaces, true)?;
    let attributes = raw_attributes
        .into_iter()
        .map(|(key, value)| {
            Ok(XmlAttribute {
                name: resolve_name(&key, &namespaces, false)?,
                value,
            })
        })
        .collect::<Result<Vec<_>, RdfXmlError>>()?;
    Ok(StartElement {
        name,
        attributes,
        namespaces,
        declared,
    })
}

fn resolve_name(
    qname: &str,
    namespaces: &NamespaceBindings,
    use_default: bool,
) -> Result<QualName, RdfXmlError> {
    match qname.split_once(':') {
        Some((prefix, local_name)) => {
            let namespace = if prefix == "xml" {
                XML_NAMESPACE.to_owned()
            } else {
                namespaces.get(prefix).cloned().ok_or_else(|| {
                    RdfXmlError::namespace(format!("Unknown prefix {}:", prefix))
                })?
            };
            Ok(QualName {
                prefix: Some(prefix.to_owned()),
                namespace: Some(namespace),
                local_name: local_name.to_owned(),
            })
        }
        None => Ok(QualName {
            prefix: None,
            namespace: if use_default {
                namespaces.get("").cloned()
            } else {
                None
            },
            local_name: qname.to_owned(),
        }),
    }
}

fn decode(bytes: &[u8]) -> Result<&str, RdfXmlError> {
    str::from_utf8(bytes).map_err(|_| RdfXmlError {
        kind: RdfXmlErrorKind::InvalidUtf8,
        position: None,
    })
}

/// Counts the lines of the bytes consumed by the XML reader.
///
/// Only the line breaks after the last queried position are kept in memory.
struct LineCounter<R> {
    inner: R,
    offset: u64,
    newlines: VecDeque<u64>,
    line: u64,
    line_start: u64,
}

impl<R> LineCounter<R> {
    fn new(inner: R) -> Self {
        Self {
            inner,
            offset: 0,
            newlines: VecDeque::new(),
            line: 0,
            line_start: 0,
        }
    }

    /// Positions must be queried in non-decreasing order.
    fn position(&mut self, byte: u64) -> TextPosition {
        while let Some(&newline) = self.newlines.front() {
            if newline >= byte {
                break;
            }
            self.newlines.pop_front();
            self.line += 1;
            self.line_start = newline + 1;
        }
        TextPosition::new(self.line + 1, byte.saturating_sub(self.line_start) + 1)
    }
}

impl<R: Read> Read for LineCounter<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let read = self.inner.read(buf)?;
        record_newlines(&mut self.newlines, self.offset, &buf[..read]);
        self.offset += read as u64;
        Ok(read)
    }
}

impl<R: BufRead> BufRead for LineCounter<R> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.inner.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        if let Ok(available) = self.inner.fill_buf() {
            let consumed = &available[..amt.min(available.len())];
            record_newlines(&mut self.newlines, self.offset, consumed);
        }
        self.offset += amt as u64;
        self.inner.consume(amt)
    }
}

fn record_newlines(newlines: &mut VecDeque<u64>, offset: u64, bytes: &[u8]) {
    for (i, b) in bytes.iter().enumerate() {
        if *b == b'\n' {
            newlines.push_back(offset + i as u64);
        }
    }
}
