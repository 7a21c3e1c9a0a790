//! Classification of the names of the RDF/XML grammar.
//!
//! See the [syntax terms](https://www.w3.org/TR/rdf-syntax-grammar/#section-grammar-summary) of the RDF/XML grammar.

use crate::event::QualName;
use arbor_api::model::RDF_NAMESPACE;

pub(crate) const RDF_DESCRIPTION: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Description";
pub(crate) const RDF_FIRST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#first";
pub(crate) const RDF_NIL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nil";
pub(crate) const RDF_OBJECT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#object";
pub(crate) const RDF_PREDICATE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#predicate";
pub(crate) const RDF_REST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#rest";
pub(crate) const RDF_STATEMENT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Statement";
pub(crate) const RDF_SUBJECT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#subject";
pub(crate) const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
pub(crate) const RDF_XML_LITERAL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#XMLLiteral";

pub(crate) const ITS_NAMESPACE: &str = "http://www.w3.org/2005/11/its";

const CORE_SYNTAX_TERMS: [&str; 7] = [
    "RDF",
    "ID",
    "about",
    "parseType",
    "resource",
    "nodeID",
    "datatype",
];

const OLD_TERMS: [&str; 3] = ["aboutEach", "aboutEachPrefix", "bagID"];

const UNQUALIFIED_LOCAL_NAMES: [&str; 5] = ["about", "ID", "resource", "parseType", "type"];

const RDF_VOCABULARY: [&str; 33] = [
    "RDF",
    "ID",
    "about",
    "parseType",
    "resource",
    "nodeID",
    "datatype",
    "li",
    "Description",
    "aboutEach",
    "aboutEachPrefix",
    "bagID",
    "type",
    "Statement",
    "subject",
    "predicate",
    "object",
    "first",
    "rest",
    "nil",
    "List",
    "value",
    "Property",
    "Alt",
    "Bag",
    "Seq",
    "XMLLiteral",
    "HTML",
    "JSON",
    "langString",
    "dirLangString",
    "PlainLiteral",
    "reifies",
];

/// The local name of `name` if it is in the `rdf:` namespace.
pub(crate) fn rdf_local_name(name: &QualName) -> Option<&str> {
    if name.namespace.as_deref() == Some(RDF_NAMESPACE) {
        Some(name.local_name.as_str())
    } else {
        None
    }
}

pub(crate) fn is_core_syntax_term(name: &QualName) -> bool {
    rdf_local_name(name).map_or(false, |local| CORE_SYNTAX_TERMS.contains(&local))
}

pub(crate) fn is_old_term(name: &QualName) -> bool {
    rdf_local_name(name).map_or(false, |local| OLD_TERMS.contains(&local))
}

pub(crate) fn allowed_as_node_element(name: &QualName) -> bool {
    !is_core_syntax_term(name) && !is_old_term(name) && rdf_local_name(name) != Some("li")
}

pub(crate) fn allowed_as_property_element(name: &QualName) -> bool {
    !is_core_syntax_term(name) && !is_old_term(name) && rdf_local_name(name) != Some("Description")
}

pub(crate) fn allowed_as_property_attribute(name: &QualName) -> bool {
    !is_core_syntax_term(name)
        && !is_old_term(name)
        && !matches!(rdf_local_name(name), Some("Description") | Some("li"))
}

/// Names that are still accepted without namespace, for compatibility with old documents.
pub(crate) fn allowed_unqualified_local_name(local_name: &str) -> bool {
    UNQUALIFIED_LOCAL_NAMES.contains(&local_name)
}

/// `_` followed by a decimal integer without leading zero, like `_1` or `_42`.
pub(crate) fn is_container_membership_name(local_name: &str) -> bool {
    match local_name.strip_prefix('_') {
        Some("0") => true,
        Some(digits) => {
            !digits.is_empty()
                && !digits.starts_with('0')
                && digits.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}

/// `rdf:` names that are not part of the RDF vocabulary. They are only worth a warning.
pub(crate) fn is_unrecognized_rdf_term(name: &QualName) -> bool {
    rdf_local_name(name).map_or(false, |local| {
        !RDF_VOCABULARY.contains(&local) && !is_container_membership_name(local)
    })
}
