use crate::emitter::Emitter;
use crate::error::RdfXmlError;
use crate::event::{
    QualName, QuickXmlEventSource, StartElement, XmlAttribute, XmlEvent, XmlEventKind,
    XmlEventSource, XML_NAMESPACE,
};
use crate::grammar::*;
use crate::literal::XmlLiteralWriter;
use crate::scope::{BaseIri, ScopeChange, ScopeStack};
use crate::terms::TermFactory;
use arbor_api::diagnostics::{Diagnostics, TracingDiagnostics};
use arbor_api::model::*;
use arbor_api::parser::{ParseError, TextPosition, TriplesParser};
use arbor_api::sink::TripleSink;
use oxilangtag::LanguageTag;
use oxiri::Iri;
use std::io::BufRead;
use tracing::debug;

/// A [RDF XML](https://www.w3.org/TR/rdf-syntax-grammar/) streaming parser.
///
/// It implements the `TriplesParser` trait.
/// It reads the file in streaming. It does not keep data in memory except the stack of the open
/// elements, bounded caches of resolved IRIs and the `rdf:ID`s already seen to warn about duplicates.
///
/// Warnings are reported to a [`Diagnostics`] policy, [`TracingDiagnostics`] by default.
///
/// Count the number of people:
/// ```
/// use arbor_api::model::NamedNode;
/// use arbor_api::parser::TriplesParser;
/// use arbor_api::sink::OwnedGraph;
/// use arbor_xml::{RdfXmlError, RdfXmlParser};
///
/// let file = b"<?xml version=\"1.0\"?>
/// <rdf:RDF xmlns:rdf=\"http://www.w3.org/1999/02/22-rdf-syntax-ns#\" xmlns:schema=\"http://schema.org/\">
///  <rdf:Description rdf:about=\"http://example.com/foo\">
///    <rdf:type rdf:resource=\"http://schema.org/Person\" />
///    <schema:name>Foo</schema:name>
///  </rdf:Description>
///  <schema:Person rdf:about=\"http://example.com/bar\" schema:name=\"Bar\" />
/// </rdf:RDF>";
///
/// let rdf_type = NamedNode::new("http://www.w3.org/1999/02/22-rdf-syntax-ns#type");
/// let schema_person = NamedNode::new("http://schema.org/Person");
/// let mut graph = OwnedGraph::default();
/// RdfXmlParser::new(&file[..], None)?.parse_all(&mut graph)?;
/// let count = graph
///     .triples()
///     .iter()
///     .filter(|t| t.predicate == rdf_type && t.object == schema_person.clone().into())
///     .count();
/// assert_eq!(2, count);
/// # Result::<_, RdfXmlError>::Ok(())
/// ```
pub struct RdfXmlParser<S: XmlEventSource, D: Diagnostics = TracingDiagnostics> {
    source: S,
    base_iri: Option<Iri<String>>,
    diagnostics: D,
    is_end: bool,
}

impl<R: BufRead> RdfXmlParser<QuickXmlEventSource<R>> {
    /// Builds the parser from a `BufRead` implementation and an optional base IRI for relative IRI resolution.
    pub fn new(reader: R, base_iri: Option<&str>) -> Result<Self, RdfXmlError> {
        Self::from_source(
            QuickXmlEventSource::new(reader),
            base_iri,
            TracingDiagnostics,
        )
    }
}

impl<S: XmlEventSource, D: Diagnostics> RdfXmlParser<S, D> {
    /// Builds the parser on top of any XML event source.
    pub fn from_source(
        source: S,
        base_iri: Option<&str>,
        diagnostics: D,
    ) -> Result<Self, RdfXmlError> {
        Ok(Self {
            source,
            base_iri: match base_iri {
                Some(base_iri) => Some(
                    Iri::parse(base_iri.to_owned())
                        .map_err(|e| RdfXmlError::invalid_iri(base_iri, e))?,
                ),
                None => None,
            },
            diagnostics,
            is_end: false,
        })
    }

    /// Replaces the policy receiving the warnings and errors.
    pub fn with_diagnostics<E: Diagnostics>(self, diagnostics: E) -> RdfXmlParser<S, E> {
        RdfXmlParser {
            source: self.source,
            base_iri: self.base_iri,
            diagnostics,
            is_end: self.is_end,
        }
    }

    pub fn diagnostics(&self) -> &D {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> D {
        self.diagnostics
    }
}

impl<S: XmlEventSource, D: Diagnostics> TriplesParser for RdfXmlParser<S, D> {
    type Error = RdfXmlError;

    fn parse_all<K: TripleSink>(&mut self, sink: &mut K) -> Result<(), RdfXmlError> {
        if self.is_end {
            return Ok(());
        }
        self.is_end = true;
        debug!(
            base_iri = self.base_iri.as_ref().map(|iri| iri.as_str()),
            "Starting RDF/XML parsing"
        );
        let mut reader = RdfXmlReader {
            source: &mut self.source,
            diagnostics: &mut self.diagnostics,
            states: Vec::new(),
            scopes: ScopeStack::new(self.base_iri.clone()),
            terms: TermFactory::default(),
            emitter: Emitter::new(sink),
            position: TextPosition::new(1, 1),
        };
        let result = reader.parse_document();
        let position = reader.position;
        let count = reader.emitter.count();
        if result.is_ok() {
            debug_assert!(reader.states.is_empty(), "unclosed elements");
            debug_assert_eq!(reader.scopes.depth(), 0, "unbalanced scopes");
        }
        match result {
            Ok(()) => {
                debug!(triples = count, "Finished RDF/XML parsing");
                Ok(())
            }
            Err(error) => {
                let error = error.at(position);
                let message = error.kind().to_string();
                if error.is_fatal() {
                    self.diagnostics.fatal(&message, error.textual_position());
                } else {
                    self.diagnostics.error(&message, error.textual_position());
                }
                debug!(triples = count, "RDF/XML parsing failed");
                Err(error)
            }
        }
    }

    fn is_end(&self) -> bool {
        self.is_end
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum ParseType {
    Resource,
    Literal,
    Collection,
}

/// The attributes of an element, split by role.
#[derive(Default)]
struct ElementAttributes {
    scope: ScopeChange,
    about: Option<String>,
    id: Option<String>,
    node_id: Option<String>,
    resource: Option<String>,
    datatype: Option<String>,
    parse_type: Option<String>,
    property_attributes: Vec<(NamedNode, String)>,
}

impl ElementAttributes {
    fn has_rdf_attributes(&self) -> bool {
        self.about.is_some()
            || self.id.is_some()
            || self.node_id.is_some()
            || self.resource.is_some()
            || self.datatype.is_some()
            || self.parse_type.is_some()
            || !self.property_attributes.is_empty()
    }
}

/// A node element whose start tag has been read.
pub(crate) struct NodeElement {
    name: QualName,
    pub(crate) subject: NamedOrBlankNode,
    property_attributes: Vec<(NamedNode, String)>,
    scoped: bool,
}

/// What to do with the children of an element that is still open.
pub(crate) enum ElementState {
    /// `rdf:RDF`, its children are node elements.
    Rdf { scoped: bool },
    /// A node element or a `rdf:parseType="Resource"` property element.
    /// Its children are property elements.
    Properties {
        subject: NamedOrBlankNode,
        li_counter: u64,
        scoped: bool,
    },
    /// A property element whose node element has already been read.
    NodeObject { scoped: bool },
    /// A `rdf:parseType="Collection"` property element, its children are the list items.
    Collection {
        subject: NamedOrBlankNode,
        predicate: NamedNode,
        reification: Option<NamedNode>,
        last_cell: Option<BlankNode>,
        scoped: bool,
    },
}

impl ElementState {
    /// If the element pushed a scope that must be popped with it.
    fn is_scoped(&self) -> bool {
        match self {
            ElementState::Rdf { scoped }
            | ElementState::Properties { scoped, .. }
            | ElementState::NodeObject { scoped }
            | ElementState::Collection { scoped, .. } => *scoped,
        }
    }
}

/// The state of one call to `parse_all`.
///
/// Open elements are kept in `states` and not on the call stack, so the nesting depth of the
/// document is only bounded by the memory.
pub(crate) struct RdfXmlReader<'a, S: XmlEventSource, D: Diagnostics, K: TripleSink> {
    source: &'a mut S,
    diagnostics: &'a mut D,
    pub(crate) states: Vec<ElementState>,
    pub(crate) scopes: ScopeStack,
    pub(crate) terms: TermFactory,
    pub(crate) emitter: Emitter<'a, K>,
    position: TextPosition,
}

impl<'a, S: XmlEventSource, D: Diagnostics, K: TripleSink> RdfXmlReader<'a, S, D, K> {
    fn parse_document(&mut self) -> Result<(), RdfXmlError> {
        if let XmlEventKind::StartDocument = self.source.peek_event()?.kind {
            self.next()?;
        }
        let event = self.next_tag()?;
        let start = match event.kind {
            XmlEventKind::StartElement(start) => start,
            XmlEventKind::EndDocument => {
                return Err(RdfXmlError::msg("The document has no root element"))
            }
            _ => return Err(RdfXmlError::msg("Unexpected event at the document start")),
        };
        let declared = start.declared.clone();
        if start.name.is(RDF_NAMESPACE, "RDF") {
            let attributes = self.classify_attributes(start.attributes, event.position)?;
            if attributes.has_rdf_attributes() {
                return Err(RdfXmlError::msg(
                    "The rdf:RDF element can only have xml: attributes",
                ));
            }
            let scoped = self.enter_scope(attributes.scope);
            self.announce(&declared)?;
            self.states.push(ElementState::Rdf { scoped });
        } else {
            let node = self.begin_node_element(start, event.position)?;
            self.announce(&declared)?;
            self.open_node_element(node)?;
        }
        self.parse_open_elements()?;
        match self.next_tag()?.kind {
            XmlEventKind::EndDocument => Ok(()),
            _ => Err(RdfXmlError::msg(
                "Unexpected content after the document element",
            )),
        }
    }

    /// The setup calls of the sink, for the document element.
    fn announce(&mut self, declared: &[(String, String)]) -> Result<(), RdfXmlError> {
        if let Some(base) = self.scopes.base() {
            self.emitter.base(base)?;
        }
        for (prefix, namespace) in declared {
            if !namespace.is_empty() {
                self.emitter.prefix(prefix, namespace)?;
            }
        }
        Ok(())
    }

    /// Reads events until the document element is closed.
    fn parse_open_elements(&mut self) -> Result<(), RdfXmlError> {
        while !self.states.is_empty() {
            let event = self.next_tag()?;
            match event.kind {
                XmlEventKind::StartElement(start) => {
                    self.parse_child_element(start, event.position)?
                }
                XmlEventKind::EndElement(_) => self.close_element()?,
                _ => return Err(RdfXmlError::msg("Unterminated element")),
            }
        }
        Ok(())
    }

    /// Dispatches a start tag on the state of its parent element.
    fn parse_child_element(
        &mut self,
        start: StartElement,
        position: TextPosition,
    ) -> Result<(), RdfXmlError> {
        match self.states.last_mut() {
            Some(ElementState::Rdf { .. }) => {
                let node = self.begin_node_element(start, position)?;
                self.open_node_element(node)
            }
            Some(ElementState::Properties {
                subject,
                li_counter,
                ..
            }) => {
                let subject = subject.clone();
                let li_index = if rdf_local_name(&start.name) == Some("li") {
                    *li_counter += 1;
                    Some(*li_counter - 1)
                } else {
                    None
                };
                self.parse_property_element(subject, start, position, li_index)
            }
            Some(ElementState::NodeObject { .. }) => Err(RdfXmlError::msg(
                "A property element can only contain one node element",
            )),
            Some(ElementState::Collection { .. }) => self.parse_collection_item(start, position),
            None => Err(RdfXmlError::msg(
                "Unexpected content after the document element",
            )),
        }
    }

    fn close_element(&mut self) -> Result<(), RdfXmlError> {
        let state = self
            .states
            .pop()
            .ok_or_else(|| RdfXmlError::msg("Unexpected closing tag"))?;
        let scoped = state.is_scoped();
        if let ElementState::Collection {
            subject,
            predicate,
            reification,
            last_cell,
            ..
        } = state
        {
            self.close_collection(subject, predicate, reification, last_cell)?;
        }
        if scoped {
            self.scopes.pop();
        }
        Ok(())
    }

    /// Validates the tag, enters its scope and computes the subject.
    pub(crate) fn begin_node_element(
        &mut self,
        start: StartElement,
        position: TextPosition,
    ) -> Result<NodeElement, RdfXmlError> {
        let StartElement {
            name, attributes, ..
        } = start;
        if !allowed_as_node_element(&name) {
            return Err(RdfXmlError::msg(format!(
                "Invalid node element tag name: {}",
                name.qualified()
            )));
        }
        if is_unrecognized_rdf_term(&name) {
            self.warning(
                &format!("{} is not a term of the RDF vocabulary", name.qualified()),
                position,
            );
        }
        let attributes = self.classify_attributes(attributes, position)?;
        if attributes.resource.is_some() {
            return Err(RdfXmlError::msg(
                "rdf:resource is not allowed on node elements",
            ));
        }
        if attributes.datatype.is_some() {
            return Err(RdfXmlError::msg(
                "rdf:datatype is not allowed on node elements",
            ));
        }
        if attributes.parse_type.is_some() {
            return Err(RdfXmlError::msg(
                "rdf:parseType is not allowed on node elements",
            ));
        }
        let scoped = self.enter_scope(attributes.scope);
        let subject: NamedOrBlankNode = match (attributes.about, attributes.id, attributes.node_id)
        {
            (Some(about), None, None) => self.scopes.resolve(&about)?.into(),
            (None, Some(id), None) => self
                .terms
                .iri_from_id(&mut self.scopes, &id, position, &mut *self.diagnostics)?
                .into(),
            (None, None, Some(node_id)) => self
                .terms
                .blank_labeled(&node_id, position, &mut *self.diagnostics)
                .into(),
            (None, None, None) => self.terms.blank_fresh().into(),
            _ => {
                return Err(RdfXmlError::msg(
                    "A node element can only have one of rdf:about, rdf:ID and rdf:nodeID",
                ))
            }
        };
        Ok(NodeElement {
            name,
            subject,
            property_attributes: attributes.property_attributes,
            scoped,
        })
    }

    /// Emits the type and property attribute triples and waits for the property elements.
    pub(crate) fn open_node_element(&mut self, node: NodeElement) -> Result<(), RdfXmlError> {
        if node.name.expanded() != RDF_DESCRIPTION {
            let class = self.scopes.resolve_direct(node.name.expanded())?;
            self.emitter.emit(Triple::new(
                node.subject.clone(),
                NamedNode::new(RDF_TYPE),
                class,
            ))?;
        }
        self.emit_property_attributes(&node.subject, node.property_attributes)?;
        self.states.push(ElementState::Properties {
            subject: node.subject,
            li_counter: 1,
            scoped: node.scoped,
        });
        Ok(())
    }

    /// `li_index` is set for `rdf:li` elements, that are numbered by their parent.
    fn parse_property_element(
        &mut self,
        subject: NamedOrBlankNode,
        start: StartElement,
        position: TextPosition,
        li_index: Option<u64>,
    ) -> Result<(), RdfXmlError> {
        let StartElement {
            name, attributes, ..
        } = start;
        if !allowed_as_property_element(&name) {
            return Err(RdfXmlError::msg(format!(
                "Invalid property element tag name: {}",
                name.qualified()
            )));
        }
        if is_unrecognized_rdf_term(&name) {
            self.warning(
                &format!("{} is not a term of the RDF vocabulary", name.qualified()),
                position,
            );
        }
        let predicate = match li_index {
            Some(index) => NamedNode::new(format!("{}_{}", RDF_NAMESPACE, index)),
            None => self.scopes.resolve_direct(name.expanded())?,
        };

        let attributes = self.classify_attributes(attributes, position)?;
        if attributes.about.is_some() {
            return Err(RdfXmlError::msg(
                "rdf:about is not allowed on property elements",
            ));
        }
        let parse_type = match attributes.parse_type.as_deref() {
            None => None,
            Some("Resource") => Some(ParseType::Resource),
            Some("Literal") => Some(ParseType::Literal),
            Some("Collection") => Some(ParseType::Collection),
            Some(value @ "literal") | Some(value @ "Statements") => {
                self.warning(
                    &format!(
                        "The rdf:parseType value '{}' is deprecated, 'Literal' is used instead",
                        value
                    ),
                    position,
                );
                Some(ParseType::Literal)
            }
            Some(value) => {
                return Err(RdfXmlError::msg(format!(
                    "Unknown rdf:parseType value '{}'",
                    value
                )))
            }
        };
        let conflicting = [
            ("rdf:datatype", attributes.datatype.is_some()),
            ("rdf:resource", attributes.resource.is_some()),
            ("rdf:nodeID", attributes.node_id.is_some()),
            ("rdf:parseType", parse_type.is_some()),
        ]
        .iter()
        .filter(|(_, present)| *present)
        .map(|(name, _)| *name)
        .collect::<Vec<_>>();
        if conflicting.len() > 1 {
            return Err(RdfXmlError::msg(format!(
                "The attributes {} cannot be used together on a property element",
                conflicting.join(", ")
            )));
        }
        if !attributes.property_attributes.is_empty()
            && (attributes.datatype.is_some() || parse_type.is_some())
        {
            return Err(RdfXmlError::msg(
                "Property attributes cannot be used together with rdf:datatype or rdf:parseType",
            ));
        }

        let scoped = self.enter_scope(attributes.scope);
        let reification = match attributes.id {
            Some(id) => Some(self.terms.iri_from_id(
                &mut self.scopes,
                &id,
                position,
                &mut *self.diagnostics,
            )?),
            None => None,
        };
        let reification = reification.as_ref();

        // `true` if the element stays open in `states`
        let open = if let Some(datatype) = attributes.datatype {
            let datatype = self.scopes.resolve(&datatype)?;
            let value = self.read_text_content()?;
            self.emitter.emit_reified(
                Triple::new(subject, predicate, Literal::Typed { value, datatype }),
                reification,
            )?;
            false
        } else if let Some(resource) = attributes.resource {
            let object = self.scopes.resolve(&resource)?.into();
            self.parse_empty_property(
                subject,
                predicate,
                object,
                attributes.property_attributes,
                reification,
            )?;
            false
        } else if let Some(node_id) = attributes.node_id {
            let object = self
                .terms
                .blank_labeled(&node_id, position, &mut *self.diagnostics)
                .into();
            self.parse_empty_property(
                subject,
                predicate,
                object,
                attributes.property_attributes,
                reification,
            )?;
            false
        } else if let Some(parse_type) = parse_type {
            match parse_type {
                ParseType::Resource => {
                    let object: NamedOrBlankNode = self.terms.blank_fresh().into();
                    self.emitter.emit_reified(
                        Triple::new(subject, predicate, object.clone()),
                        reification,
                    )?;
                    self.states.push(ElementState::Properties {
                        subject: object,
                        li_counter: 1,
                        scoped,
                    });
                    true
                }
                ParseType::Literal => {
                    let value = self.read_xml_literal()?;
                    self.emitter.emit_reified(
                        Triple::new(
                            subject,
                            predicate,
                            Literal::Typed {
                                value,
                                datatype: NamedNode::new(RDF_XML_LITERAL),
                            },
                        ),
                        reification,
                    )?;
                    false
                }
                ParseType::Collection => {
                    self.states.push(ElementState::Collection {
                        subject,
                        predicate,
                        reification: reification.cloned(),
                        last_cell: None,
                        scoped,
                    });
                    true
                }
            }
        } else if !attributes.property_attributes.is_empty() {
            let object = self.terms.blank_fresh().into();
            self.parse_empty_property(
                subject,
                predicate,
                object,
                attributes.property_attributes,
                reification,
            )?;
            false
        } else {
            self.parse_property_content(subject, predicate, reification, scoped)?
        };

        if scoped && !open {
            self.scopes.pop();
        }
        Ok(())
    }

    /// A property element whose object is described by its attributes.
    fn parse_empty_property(
        &mut self,
        subject: NamedOrBlankNode,
        predicate: NamedNode,
        object: NamedOrBlankNode,
        property_attributes: Vec<(NamedNode, String)>,
        reification: Option<&NamedNode>,
    ) -> Result<(), RdfXmlError> {
        self.emitter
            .emit_reified(Triple::new(subject, predicate, object.clone()), reification)?;
        self.emit_property_attributes(&object, property_attributes)?;
        self.expect_end("This property element must be empty")
    }

    /// Text content gives a literal and a single nested element a node.
    ///
    /// Returns `true` if a node element has been opened.
    fn parse_property_content(
        &mut self,
        subject: NamedOrBlankNode,
        predicate: NamedNode,
        reification: Option<&NamedNode>,
        scoped: bool,
    ) -> Result<bool, RdfXmlError> {
        let mut text = String::new();
        loop {
            match &self.source.peek_event()?.kind {
                XmlEventKind::StartElement(_) if !is_whitespace(&text) => {
                    return Err(RdfXmlError::msg(format!(
                        "Unexpected text '{}' before a nested node element",
                        text
                    )))
                }
                XmlEventKind::StartDocument | XmlEventKind::EndDocument => {
                    return Err(RdfXmlError::msg("Unterminated property element"))
                }
                _ => (),
            }
            let event = self.next()?;
            match event.kind {
                XmlEventKind::Text(value) => text.push_str(&value),
                XmlEventKind::EndElement(_) => {
                    let object = self.literal(text);
                    self.emitter
                        .emit_reified(Triple::new(subject, predicate, object), reification)?;
                    return Ok(false);
                }
                XmlEventKind::StartElement(start) => {
                    let node = self.begin_node_element(start, event.position)?;
                    self.emitter.emit_reified(
                        Triple::new(subject, predicate, node.subject.clone()),
                        reification,
                    )?;
                    self.states.push(ElementState::NodeObject { scoped });
                    self.open_node_element(node)?;
                    return Ok(true);
                }
                _ => (),
            }
        }
    }

    fn emit_property_attributes(
        &mut self,
        subject: &NamedOrBlankNode,
        property_attributes: Vec<(NamedNode, String)>,
    ) -> Result<(), RdfXmlError> {
        for (predicate, value) in property_attributes {
            let object: Term = if predicate.as_str() == RDF_TYPE {
                self.scopes.resolve(&value)?.into()
            } else {
                self.literal(value).into()
            };
            self.emitter
                .emit(Triple::new(subject.clone(), predicate, object))?;
        }
        Ok(())
    }

    /// Splits the attributes between scope changes, RDF syntax attributes and property attributes.
    fn classify_attributes(
        &mut self,
        attributes: Vec<XmlAttribute>,
        position: TextPosition,
    ) -> Result<ElementAttributes, RdfXmlError> {
        let mut result = ElementAttributes::default();
        for XmlAttribute { mut name, value } in attributes {
            if name.namespace.is_none() {
                if name.local_name.to_ascii_lowercase().starts_with("xml") {
                    self.warning(
                        &format!("The reserved attribute {} is ignored", name.local_name),
                        position,
                    );
                    continue;
                }
                if !allowed_unqualified_local_name(&name.local_name) {
                    return Err(RdfXmlError::msg(format!(
                        "The attribute {} must be in a namespace",
                        name.local_name
                    )));
                }
                self.warning(
                    &format!(
                        "The unqualified attribute {} is deprecated, use rdf:{} instead",
                        name.local_name, name.local_name
                    ),
                    position,
                );
                name.namespace = Some(RDF_NAMESPACE.to_owned());
            }
            match name.namespace.as_deref() {
                Some(XML_NAMESPACE) => {
                    match name.local_name.as_str() {
                        "lang" => {
                            if !value.is_empty() {
                                if let Err(error) = LanguageTag::parse(value.as_str()) {
                                    self.warning(
                                        &format!(
                                            "The xml:lang value '{}' is not a valid language tag: {}",
                                            value, error
                                        ),
                                        position,
                                    );
                                }
                            }
                            result.scope.language = Some(value);
                        }
                        "base" => {
                            let base = self.scopes.resolve_base_candidate(&value)?;
                            if let BaseIri::Relative(_) = base {
                                self.warning(
                                    &format!(
                                        "The xml:base value '{}' is a relative IRI, resolving IRIs against it will fail",
                                        value
                                    ),
                                    position,
                                );
                            }
                            result.scope.base = Some(base);
                        }
                        "space" => (),
                        other => self.warning(
                            &format!("The attribute xml:{} is ignored", other),
                            position,
                        ),
                    }
                    continue;
                }
                Some(ITS_NAMESPACE) if name.local_name == "dir" => {
                    match BaseDirection::from_keyword(&value) {
                        Some(direction) => result.scope.direction = Some(direction),
                        None => self.warning(
                            &format!(
                                "The its:dir value '{}' is not 'ltr' or 'rtl', it is ignored",
                                value
                            ),
                            position,
                        ),
                    }
                    continue;
                }
                Some(ITS_NAMESPACE) if name.local_name == "version" => continue,
                _ => (),
            }
            match rdf_local_name(&name) {
                Some("about") => result.about = Some(value),
                Some("ID") => result.id = Some(value),
                Some("nodeID") => result.node_id = Some(value),
                Some("resource") => result.resource = Some(value),
                Some("datatype") => result.datatype = Some(value),
                Some("parseType") => result.parse_type = Some(value),
                _ => {
                    if !allowed_as_property_attribute(&name) {
                        return Err(RdfXmlError::msg(format!(
                            "{} is not allowed as an attribute",
                            name.qualified()
                        )));
                    }
                    if is_unrecognized_rdf_term(&name) {
                        self.warning(
                            &format!("{} is not a term of the RDF vocabulary", name.qualified()),
                            position,
                        );
                    }
                    let predicate = self.scopes.resolve_direct(name.expanded())?;
                    result.property_attributes.push((predicate, value));
                }
            }
        }
        Ok(result)
    }

    fn enter_scope(&mut self, change: ScopeChange) -> bool {
        if change.is_empty() {
            false
        } else {
            self.scopes.push(change);
            true
        }
    }

    /// Text content of a datatyped property element.
    fn read_text_content(&mut self) -> Result<String, RdfXmlError> {
        let mut text = String::new();
        loop {
            let event = self.next()?;
            match event.kind {
                XmlEventKind::Text(value) => text.push_str(&value),
                XmlEventKind::Comment(_) | XmlEventKind::ProcessingInstruction { .. } => (),
                XmlEventKind::EndElement(_) => return Ok(text),
                XmlEventKind::StartElement(_) => {
                    return Err(RdfXmlError::msg(
                        "A property element with rdf:datatype can only contain text",
                    ))
                }
                XmlEventKind::StartDocument | XmlEventKind::EndDocument => {
                    return Err(RdfXmlError::msg("Unterminated property element"))
                }
            }
        }
    }

    fn read_xml_literal(&mut self) -> Result<String, RdfXmlError> {
        let mut writer = XmlLiteralWriter::default();
        loop {
            let event = self.next()?;
            if writer.write(&event)? {
                return Ok(writer.finish());
            }
        }
    }

    /// Consumes whitespace, comments and processing instructions up to the end tag.
    fn expect_end(&mut self, message: &str) -> Result<(), RdfXmlError> {
        match self.next_tag()?.kind {
            XmlEventKind::EndElement(_) => Ok(()),
            _ => Err(RdfXmlError::msg(message)),
        }
    }

    /// The next start tag, end tag or document boundary.
    fn next_tag(&mut self) -> Result<XmlEvent, RdfXmlError> {
        loop {
            let event = self.next()?;
            match &event.kind {
                XmlEventKind::Text(text) if is_whitespace(text) => (),
                XmlEventKind::Text(text) => {
                    return Err(RdfXmlError::msg(format!(
                        "Unexpected text content '{}'",
                        text
                    )))
                }
                XmlEventKind::Comment(_) | XmlEventKind::ProcessingInstruction { .. } => (),
                _ => return Ok(event),
            }
        }
    }

    fn next(&mut self) -> Result<XmlEvent, RdfXmlError> {
        let event = self.source.next_event()?;
        self.position = event.position;
        Ok(event)
    }

    fn literal(&self, value: String) -> Literal {
        TermFactory::literal(
            value,
            self.scopes.language(),
            self.scopes.direction(),
            None,
        )
    }

    fn warning(&mut self, message: &str, position: TextPosition) {
        self.diagnostics.warning(message, Some(position))
    }
}

fn is_whitespace(text: &str) -> bool {
    text.chars()
        .all(|c| matches!(c, ' ' | '\t' | '\n' | '\r'))
}
