use crate::error::RdfXmlError;
use crate::scope::ScopeStack;
use arbor_api::diagnostics::Diagnostics;
use arbor_api::model::{BaseDirection, BlankNode, Literal, NamedNode};
use arbor_api::parser::TextPosition;
use std::collections::HashMap;

/// The maximal number of `rdf:ID` values remembered to detect duplicates.
pub const ID_USAGE_CAPACITY: usize = 10_000;

/// First use of each `rdf:ID` value, per base IRI.
///
/// Once full, new identifiers are not tracked anymore.
#[derive(Debug, Default)]
pub(crate) struct IdUsageTable {
    by_base: HashMap<String, HashMap<String, TextPosition>>,
    len: usize,
}

impl IdUsageTable {
    /// Records a use and returns the position of the first one if `id` was already seen with this base.
    pub fn record(&mut self, base: &str, id: &str, position: TextPosition) -> Option<TextPosition> {
        if let Some(first) = self.by_base.get(base).and_then(|ids| ids.get(id)) {
            return Some(*first);
        }
        if self.len < ID_USAGE_CAPACITY {
            self.by_base
                .entry(base.to_owned())
                .or_default()
                .insert(id.to_owned(), position);
            self.len += 1;
        }
        None
    }
}

#[derive(Debug, Default)]
pub(crate) struct TermFactory {
    ids: IdUsageTable,
    labels: HashMap<String, BlankNode>,
    counter: u64,
}

impl TermFactory {
    /// The IRI denoted by an `rdf:ID` value: `#id` resolved against the live base.
    pub fn iri_from_id(
        &mut self,
        scopes: &mut ScopeStack,
        id: &str,
        position: TextPosition,
        diagnostics: &mut impl Diagnostics,
    ) -> Result<NamedNode, RdfXmlError> {
        if !is_nc_name(id) {
            diagnostics.warning(
                &format!("The rdf:ID value '{}' is not a valid XML NCName", id),
                Some(position),
            );
        }
        let base = scopes.base().unwrap_or_default();
        if let Some(first) = self.ids.record(base, id, position) {
            diagnostics.warning(
                &format!(
                    "The rdf:ID value '{}' has already been used on {} with the base IRI '{}'",
                    id, first, base
                ),
                Some(position),
            );
        }
        scopes.resolve(&format!("#{}", id))
    }

    pub fn blank_fresh(&mut self) -> BlankNode {
        self.counter += 1;
        BlankNode::new(format!("riog{:08}", self.counter))
    }

    /// The blank node of an `rdf:nodeID` label. The same label always gives the same node.
    pub fn blank_labeled(
        &mut self,
        label: &str,
        position: TextPosition,
        diagnostics: &mut impl Diagnostics,
    ) -> BlankNode {
        if let Some(node) = self.labels.get(label) {
            return node.clone();
        }
        if !is_nc_name(label) {
            diagnostics.warning(
                &format!("The rdf:nodeID value '{}' is not a valid XML NCName", label),
                Some(position),
            );
        }
        let node = self.blank_fresh();
        self.labels.insert(label.to_owned(), node.clone());
        node
    }

    /// A datatype wins over the language, and an empty language is no language.
    pub fn literal(
        value: String,
        language: Option<&str>,
        direction: Option<BaseDirection>,
        datatype: Option<NamedNode>,
    ) -> Literal {
        match (datatype, language) {
            (Some(datatype), _) => Literal::Typed { value, datatype },
            (None, Some(language)) if !language.is_empty() => match direction {
                Some(direction) => Literal::DirectionalLanguageTaggedString {
                    value,
                    language: language.to_owned(),
                    direction,
                },
                None => Literal::LanguageTaggedString {
                    value,
                    language: language.to_owned(),
                },
            },
            (None, _) => Literal::Simple { value },
        }
    }
}

pub(crate) fn is_nc_name(name: &str) -> bool {
    // Name - (Char* ':' Char*)
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c != ':' && is_name_start_char(c) => (),
        _ => return false,
    };
    chars.all(|c| c != ':' && is_name_char(c))
}

fn is_name_start_char(c: char) -> bool {
    // ":" | [A-Z] | "_" | [a-z] | [#xC0-#xD6] | [#xD8-#xF6] | [#xF8-#x2FF] | [#x370-#x37D] | [#x37F-#x1FFF] | [#x200C-#x200D] | [#x2070-#x218F] | [#x2C00-#x2FEF] | [#x3001-#xD7FF] | [#xF900-#xFDCF] | [#xFDF0-#xFFFD] | [#x10000-#xEFFFF]
    matches!(c,
        ':'
        | 'A'..='Z'
        | '_'
        | 'a'..='z'
        | '\u{C0}'..='\u{D6}'
        | '\u{D8}'..='\u{F6}'
        | '\u{F8}'..='\u{2FF}'
        | '\u{370}'..='\u{37D}'
        | '\u{37F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}')
}

fn is_name_char(c: char) -> bool {
    // NameStartChar | "-" | "." | [0-9] | #xB7 | [#x0300-#x036F] | [#x203F-#x2040]
    is_name_start_char(c)
        || matches!(
            c,
            '-' | '.' | '0'..='9' | '\u{B7}' | '\u{0300}'..='\u{036F}' | '\u{203F}'..='\u{2040}'
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_api::diagnostics::CollectedDiagnostics;
    use oxiri::Iri;

    #[test]
    fn nc_names() {
        assert!(is_nc_name("a"));
        assert!(is_nc_name("_a-1.b"));
        assert!(is_nc_name("été"));
        assert!(!is_nc_name(""));
        assert!(!is_nc_name("1a"));
        assert!(!is_nc_name("a:b"));
        assert!(!is_nc_name("-a"));
    }

    #[test]
    fn duplicate_id_warns_once() -> Result<(), RdfXmlError> {
        let mut scopes = ScopeStack::new(Some(
            Iri::parse("http://example.com/".to_owned()).unwrap(),
        ));
        let mut terms = TermFactory::default();
        let mut diagnostics = CollectedDiagnostics::default();
        let first =
            terms.iri_from_id(&mut scopes, "a", TextPosition::new(1, 1), &mut diagnostics)?;
        let second =
            terms.iri_from_id(&mut scopes, "a", TextPosition::new(2, 1), &mut diagnostics)?;
        terms.iri_from_id(&mut scopes, "b", TextPosition::new(3, 1), &mut diagnostics)?;
        assert_eq!(first, second);
        assert_eq!(first.as_str(), "http://example.com/#a");
        assert_eq!(diagnostics.warnings().count(), 1);
        assert_eq!(
            diagnostics.all()[0].position,
            Some(TextPosition::new(2, 1))
        );
        Ok(())
    }

    #[test]
    fn id_tracking_stops_at_capacity() {
        let mut table = IdUsageTable::default();
        for i in 0..ID_USAGE_CAPACITY {
            assert_eq!(table.record("", &format!("n{}", i), TextPosition::new(1, 1)), None);
        }
        let position = TextPosition::new(2, 1);
        assert_eq!(table.record("", "late", position), None);
        assert_eq!(table.record("", "late", position), None);
        assert_eq!(
            table.record("", "n0", position),
            Some(TextPosition::new(1, 1))
        );
    }

    #[test]
    fn labels_are_stable() {
        let mut terms = TermFactory::default();
        let mut diagnostics = CollectedDiagnostics::default();
        let a = terms.blank_labeled("a", TextPosition::new(1, 1), &mut diagnostics);
        let fresh = terms.blank_fresh();
        let b = terms.blank_labeled("1b", TextPosition::new(1, 1), &mut diagnostics);
        assert_eq!(a, terms.blank_labeled("a", TextPosition::new(1, 1), &mut diagnostics));
        assert_ne!(a, fresh);
        assert_ne!(a, b);
        assert_eq!(diagnostics.warnings().count(), 1);
    }

    #[test]
    fn literal_forms() {
        assert_eq!(
            TermFactory::literal("a".into(), Some(""), None, None),
            Literal::Simple { value: "a".into() }
        );
        assert_eq!(
            TermFactory::literal("a".into(), Some("en"), Some(BaseDirection::Ltr), None),
            Literal::DirectionalLanguageTaggedString {
                value: "a".into(),
                language: "en".into(),
                direction: BaseDirection::Ltr
            }
        );
        assert_eq!(
            TermFactory::literal("a".into(), None, Some(BaseDirection::Ltr), None),
            Literal::Simple { value: "a".into() }
        );
    }
}
