use crate::error::RdfXmlError;
use crate::event::{StartElement, XmlEventSource};
use crate::grammar::{RDF_FIRST, RDF_NIL, RDF_REST};
use crate::parser::{ElementState, RdfXmlReader};
use arbor_api::diagnostics::Diagnostics;
use arbor_api::model::{BlankNode, NamedNode, NamedOrBlankNode, Triple};
use arbor_api::parser::TextPosition;
use arbor_api::sink::TripleSink;

impl<'a, S: XmlEventSource, D: Diagnostics, K: TripleSink> RdfXmlReader<'a, S, D, K> {
    /// Adds a cell to the `rdf:List` of the open `rdf:parseType="Collection"` property element
    /// and opens the node element of the item.
    ///
    /// Only the `subject predicate list` triple is reified.
    pub(crate) fn parse_collection_item(
        &mut self,
        start: StartElement,
        position: TextPosition,
    ) -> Result<(), RdfXmlError> {
        let cell = self.terms.blank_fresh();
        let (link, reification) = match self.states.last_mut() {
            Some(ElementState::Collection {
                subject,
                predicate,
                reification,
                last_cell,
                ..
            }) => match last_cell.replace(cell.clone()) {
                Some(previous) => (
                    Triple::new(previous, NamedNode::new(RDF_REST), cell.clone()),
                    None,
                ),
                None => (
                    Triple::new(subject.clone(), predicate.clone(), cell.clone()),
                    reification.clone(),
                ),
            },
            _ => return Err(RdfXmlError::msg("Unexpected collection item")),
        };
        self.emitter.emit_reified(link, reification.as_ref())?;
        let node = self.begin_node_element(start, position)?;
        self.emitter.emit(Triple::new(
            cell,
            NamedNode::new(RDF_FIRST),
            node.subject.clone(),
        ))?;
        self.open_node_element(node)
    }

    /// Terminates the list at the end tag of the property element.
    pub(crate) fn close_collection(
        &mut self,
        subject: NamedOrBlankNode,
        predicate: NamedNode,
        reification: Option<NamedNode>,
        last_cell: Option<BlankNode>,
    ) -> Result<(), RdfXmlError> {
        match last_cell {
            Some(last) => self.emitter.emit(Triple::new(
                last,
                NamedNode::new(RDF_REST),
                NamedNode::new(RDF_NIL),
            )),
            None => self.emitter.emit_reified(
                Triple::new(subject, predicate, NamedNode::new(RDF_NIL)),
                reification.as_ref(),
            ),
        }
    }
}
