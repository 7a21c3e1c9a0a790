//! Serialization of `rdf:parseType="Literal"` content.

use crate::error::RdfXmlError;
use crate::event::{NamespaceBindings, StartElement, XmlEvent, XmlEventKind};
use std::sync::Arc;

/// Writes the events of an XML literal back into a canonical string.
///
/// Each start tag only declares the namespaces that differ from its parent's.
/// The content of the property element is written, not the property element itself.
pub(crate) struct XmlLiteralWriter {
    output: String,
    namespaces: Vec<Arc<NamespaceBindings>>,
}

impl Default for XmlLiteralWriter {
    fn default() -> Self {
        Self {
            output: String::new(),
            namespaces: vec![Arc::new(NamespaceBindings::default())],
        }
    }
}

impl XmlLiteralWriter {
    /// Writes `event` and returns `true` once the end tag of the property element is reached.
    pub fn write(&mut self, event: &XmlEvent) -> Result<bool, RdfXmlError> {
        match &event.kind {
            XmlEventKind::StartElement(start) => self.write_start(start),
            XmlEventKind::EndElement(name) => {
                if self.namespaces.len() == 1 {
                    return Ok(true);
                }
                self.namespaces.pop();
                self.output.push_str("</");
                self.output.push_str(&name.qualified());
                self.output.push('>');
            }
            XmlEventKind::Text(text) => escape_text(text, &mut self.output),
            XmlEventKind::Comment(comment) => {
                self.output.push_str("<!--");
                self.output.push_str(comment);
                self.output.push_str("-->");
            }
            XmlEventKind::ProcessingInstruction { target, data } => {
                self.output.push_str("<?");
                self.output.push_str(target);
                if !data.is_empty() {
                    self.output.push(' ');
                    self.output.push_str(data);
                }
                self.output.push_str("?>");
            }
            XmlEventKind::StartDocument | XmlEventKind::EndDocument => {
                return Err(RdfXmlError::msg("Unterminated XML literal").at(event.position))
            }
        }
        Ok(false)
    }

    pub fn finish(self) -> String {
        self.output
    }

    fn write_start(&mut self, start: &StartElement) {
        self.output.push('<');
        self.output.push_str(&start.name.qualified());
        if let Some(enclosing) = self.namespaces.last() {
            if enclosing.contains_key("") && !start.namespaces.contains_key("") {
                self.output.push_str(" xmlns=\"\"");
            }
            for (prefix, namespace) in start.namespaces.iter() {
                if prefix == "xml" || enclosing.get(prefix) == Some(namespace) {
                    continue;
                }
                if prefix.is_empty() {
                    self.output.push_str(" xmlns=\"");
                } else {
                    self.output.push_str(" xmlns:");
                    self.output.push_str(prefix);
                    self.output.push_str("=\"");
                }
                escape_attribute(namespace, &mut self.output);
                self.output.push('"');
            }
        }
        let mut attributes = start.attributes.iter().collect::<Vec<_>>();
        attributes.sort_by(|a, b| {
            (a.name.namespace.as_deref(), &a.name.local_name)
                .cmp(&(b.name.namespace.as_deref(), &b.name.local_name))
        });
        for attribute in attributes {
            self.output.push(' ');
            self.output.push_str(&attribute.name.qualified());
            self.output.push_str("=\"");
            escape_attribute(&attribute.value, &mut self.output);
            self.output.push('"');
        }
        self.output.push('>');
        self.namespaces.push(Arc::clone(&start.namespaces));
    }
}

fn escape_text(text: &str, output: &mut String) {
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            c => output.push(c),
        }
    }
}

fn escape_attribute(value: &str, output: &mut String) {
    for c in value.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '"' => output.push_str("&quot;"),
            c => output.push(c),
        }
    }
}
