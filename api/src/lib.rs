//! This crate provides basic interfaces and data structures shared by the Arbor parsers.
//!
//! It is currently used by the [`arbor_xml`](https://docs.rs/arbor_xml/) crate.
//!
//! * [`model`] owned RDF terms and triples.
//! * [`sink`] the [`TripleSink`](sink::TripleSink) receiving parsed triples.
//! * [`diagnostics`] policies receiving warnings and errors with their positions.
//! * [`parser`] the [`TriplesParser`](parser::TriplesParser) trait and text positions.
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

pub mod diagnostics;
pub mod model;
pub mod parser;
pub mod sink;
