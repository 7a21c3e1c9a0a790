//! The receiving end of a parser.

use crate::model::Triple;
use std::collections::BTreeMap;
use std::convert::Infallible;
use std::error::Error;

/// Receives the triples produced by a [`TriplesParser`](../parser/trait.TriplesParser.html).
///
/// `on_base` and `on_prefix` are informational setup calls made before the first triple.
/// They only reflect what the outermost element of the document declares.
pub trait TripleSink {
    type Error: Error + Send + Sync + 'static;

    fn on_triple(&mut self, triple: Triple) -> Result<(), Self::Error>;

    fn on_base(&mut self, base_iri: &str) -> Result<(), Self::Error> {
        let _ = base_iri;
        Ok(())
    }

    fn on_prefix(&mut self, prefix: &str, namespace: &str) -> Result<(), Self::Error> {
        let _ = (prefix, namespace);
        Ok(())
    }
}

impl<S: TripleSink + ?Sized> TripleSink for &mut S {
    type Error = S::Error;

    fn on_triple(&mut self, triple: Triple) -> Result<(), Self::Error> {
        (**self).on_triple(triple)
    }

    fn on_base(&mut self, base_iri: &str) -> Result<(), Self::Error> {
        (**self).on_base(base_iri)
    }

    fn on_prefix(&mut self, prefix: &str, namespace: &str) -> Result<(), Self::Error> {
        (**self).on_prefix(prefix, namespace)
    }
}

/// An in-memory sink keeping the triples in emission order.
///
/// ```
/// use arbor_api::model::{NamedNode, Triple};
/// use arbor_api::sink::{OwnedGraph, TripleSink};
///
/// let mut graph = OwnedGraph::default();
/// graph.on_triple(Triple::new(
///     NamedNode::new("http://example.com/s"),
///     NamedNode::new("http://example.com/p"),
///     NamedNode::new("http://example.com/o"),
/// )).unwrap();
/// assert_eq!(graph.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct OwnedGraph {
    triples: Vec<Triple>,
    base_iri: Option<String>,
    prefixes: BTreeMap<String, String>,
}

impl OwnedGraph {
    pub fn triples(&self) -> &[Triple] {
        &self.triples
    }

    pub fn into_triples(self) -> Vec<Triple> {
        self.triples
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn base_iri(&self) -> Option<&str> {
        self.base_iri.as_deref()
    }

    pub fn prefixes(&self) -> &BTreeMap<String, String> {
        &self.prefixes
    }
}

impl TripleSink for OwnedGraph {
    type Error = Infallible;

    fn on_triple(&mut self, triple: Triple) -> Result<(), Infallible> {
        self.triples.push(triple);
        Ok(())
    }

    fn on_base(&mut self, base_iri: &str) -> Result<(), Infallible> {
        self.base_iri = Some(base_iri.to_owned());
        Ok(())
    }

    fn on_prefix(&mut self, prefix: &str, namespace: &str) -> Result<(), Infallible> {
        self.prefixes.insert(prefix.to_owned(), namespace.to_owned());
        Ok(())
    }
}
