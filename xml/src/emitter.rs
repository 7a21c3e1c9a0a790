use crate::error::RdfXmlError;
use crate::grammar::{RDF_OBJECT, RDF_PREDICATE, RDF_STATEMENT, RDF_SUBJECT, RDF_TYPE};
use arbor_api::model::{NamedNode, Triple};
use arbor_api::sink::TripleSink;

/// Forwards triples to the sink, adding the reification triples when asked to.
pub(crate) struct Emitter<'a, K: TripleSink> {
    sink: &'a mut K,
    count: u64,
}

impl<'a, K: TripleSink> Emitter<'a, K> {
    pub fn new(sink: &'a mut K) -> Self {
        Self { sink, count: 0 }
    }

    pub fn emit(&mut self, triple: Triple) -> Result<(), RdfXmlError> {
        self.count += 1;
        self.sink.on_triple(triple).map_err(RdfXmlError::sink)
    }

    /// Emits `triple`, then describes it with `reification` as an `rdf:Statement`.
    pub fn emit_reified(
        &mut self,
        triple: Triple,
        reification: Option<&NamedNode>,
    ) -> Result<(), RdfXmlError> {
        let reification = match reification {
            Some(reification) => reification,
            None => return self.emit(triple),
        };
        let Triple {
            subject,
            predicate,
            object,
        } = triple.clone();
        self.emit(triple)?;
        self.emit(Triple::new(
            reification.clone(),
            NamedNode::new(RDF_TYPE),
            NamedNode::new(RDF_STATEMENT),
        ))?;
        self.emit(Triple::new(
            reification.clone(),
            NamedNode::new(RDF_SUBJECT),
            subject,
        ))?;
        self.emit(Triple::new(
            reification.clone(),
            NamedNode::new(RDF_PREDICATE),
            predicate,
        ))?;
        self.emit(Triple::new(
            reification.clone(),
            NamedNode::new(RDF_OBJECT),
            object,
        ))
    }

    pub fn base(&mut self, base_iri: &str) -> Result<(), RdfXmlError> {
        self.sink.on_base(base_iri).map_err(RdfXmlError::sink)
    }

    pub fn prefix(&mut self, prefix: &str, namespace: &str) -> Result<(), RdfXmlError> {
        self.sink
            .on_prefix(prefix, namespace)
            .map_err(RdfXmlError::sink)
    }

    pub fn count(&self) -> u64 {
        self.count
    }
}
