//! Implementation of an [RDF XML](https://www.w3.org/TR/rdf-syntax-grammar/) streaming parser.
//!
//! How to read a file `foo.rdf` and count the number of `rdf:type` triples:
//! ```no_run
//! use arbor_api::model::NamedNode;
//! use arbor_api::parser::TriplesParser;
//! use arbor_api::sink::OwnedGraph;
//! use arbor_xml::RdfXmlParser;
//! use std::fs::File;
//! use std::io::BufReader;
//!
//! let rdf_type = NamedNode::new("http://www.w3.org/1999/02/22-rdf-syntax-ns#type");
//! let mut graph = OwnedGraph::default();
//! RdfXmlParser::new(BufReader::new(File::open("foo.rdf").unwrap()), Some("file:foo.rdf"))
//!     .unwrap()
//!     .parse_all(&mut graph)
//!     .unwrap();
//! let count = graph.triples().iter().filter(|t| t.predicate == rdf_type).count();
//! println!("{} rdf:type triples", count);
//! ```
//!
//! Warnings go to [`tracing`] by default. They can be kept in memory instead:
//! ```
//! use arbor_api::diagnostics::CollectedDiagnostics;
//! use arbor_api::parser::TriplesParser;
//! use arbor_api::sink::OwnedGraph;
//! use arbor_xml::RdfXmlParser;
//!
//! let file = b"<rdf:RDF xmlns:rdf=\"http://www.w3.org/1999/02/22-rdf-syntax-ns#\" xmlns:ex=\"http://example.com/\">
//!   <rdf:Description about=\"http://example.com/a\" ex:p=\"v\"/>
//! </rdf:RDF>";
//!
//! let mut parser = RdfXmlParser::new(&file[..], None)
//!     .unwrap()
//!     .with_diagnostics(CollectedDiagnostics::default());
//! let mut graph = OwnedGraph::default();
//! parser.parse_all(&mut graph).unwrap();
//! assert_eq!(graph.len(), 1);
//! assert_eq!(parser.diagnostics().warnings().count(), 1);
//! ```
#![deny(
    future_incompatible,
    nonstandard_style,
    rust_2018_idioms,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_qualifications
)]
#![doc(test(attr(deny(warnings))))]

mod collection;
mod emitter;
mod error;
mod event;
mod grammar;
mod literal;
mod parser;
mod resolver;
mod scope;
mod terms;

pub use error::{RdfXmlError, RdfXmlErrorKind};
pub use event::{
    NamespaceBindings, QualName, QuickXmlEventSource, StartElement, XmlAttribute, XmlEvent,
    XmlEventKind, XmlEventSource, XML_NAMESPACE,
};
pub use parser::RdfXmlParser;
pub use scope::IRI_CACHE_CAPACITY;
pub use terms::ID_USAGE_CAPACITY;
