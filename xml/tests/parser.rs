use arbor_api::diagnostics::{CollectedDiagnostics, Severity};
use arbor_api::model::{Literal, NamedNode, Term, Triple, RDF_NAMESPACE};
use arbor_api::parser::{ParseError, TriplesParser};
use arbor_api::sink::{OwnedGraph, TripleSink};
use arbor_xml::{RdfXmlError, RdfXmlErrorKind, RdfXmlParser};
use pretty_assertions::assert_eq;
use std::error::Error;
use std::fmt;

struct Outcome {
    graph: OwnedGraph,
    diagnostics: CollectedDiagnostics,
    result: Result<(), RdfXmlError>,
}

impl Outcome {
    fn triples(&self) -> Vec<String> {
        self.graph
            .triples()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    fn warnings(&self) -> usize {
        self.diagnostics.warnings().count()
    }
}

fn parse(data: &str, base_iri: Option<&str>) -> Outcome {
    let mut parser = RdfXmlParser::new(data.as_bytes(), base_iri)
        .unwrap()
        .with_diagnostics(CollectedDiagnostics::default());
    let mut graph = OwnedGraph::default();
    let result = parser.parse_all(&mut graph);
    Outcome {
        graph,
        diagnostics: parser.into_diagnostics(),
        result,
    }
}

fn document(body: &str) -> String {
    format!(
        "<rdf:RDF xmlns:rdf=\"{}\" xmlns:ex=\"http://ex/\">{}</rdf:RDF>",
        RDF_NAMESPACE, body
    )
}

fn parse_ok(body: &str) -> Outcome {
    let outcome = parse(&document(body), Some("http://ex/doc"));
    if let Err(error) = &outcome.result {
        panic!("unexpected error: {}", error);
    }
    outcome
}

fn parse_err(body: &str) -> RdfXmlError {
    match parse(&document(body), Some("http://ex/doc")).result {
        Ok(()) => panic!("{} should be rejected", body),
        Err(error) => error,
    }
}

fn rdf(local_name: &str) -> String {
    format!("<{}{}>", RDF_NAMESPACE, local_name)
}

#[test]
fn plain_literal_property() {
    let outcome = parse(
        "<rdf:RDF xmlns:rdf=\"http://www.w3.org/1999/02/22-rdf-syntax-ns#\" xmlns:ex=\"http://ex/\"><rdf:Description rdf:about=\"http://ex/a\"><ex:p>hello</ex:p></rdf:Description></rdf:RDF>",
        None,
    );
    assert!(outcome.result.is_ok());
    assert_eq!(
        outcome.triples(),
        vec!["<http://ex/a> <http://ex/p> \"hello\" ."]
    );
    assert_eq!(outcome.warnings(), 0);
}

#[test]
fn resource_property() {
    let outcome = parse_ok(
        "<rdf:Description rdf:about=\"http://ex/a\"><ex:p rdf:resource=\"http://ex/b\"/></rdf:Description>",
    );
    assert_eq!(
        outcome.triples(),
        vec!["<http://ex/a> <http://ex/p> <http://ex/b> ."]
    );
}

#[test]
fn single_item_collection() {
    let outcome = parse_ok(
        "<rdf:Description rdf:about=\"http://ex/a\"><ex:p rdf:parseType=\"Collection\"><rdf:Description rdf:about=\"http://ex/x\"/></ex:p></rdf:Description>",
    );
    assert_eq!(
        outcome.triples(),
        vec![
            "<http://ex/a> <http://ex/p> _:riog00000001 .".to_owned(),
            format!("_:riog00000001 {} <http://ex/x> .", rdf("first")),
            format!("_:riog00000001 {} {} .", rdf("rest"), rdf("nil")),
        ]
    );
}

#[test]
fn collection_sizes() {
    let empty = parse_ok(
        "<rdf:Description rdf:about=\"http://ex/a\"><ex:p rdf:parseType=\"Collection\"> </ex:p></rdf:Description>",
    );
    assert_eq!(
        empty.triples(),
        vec![format!("<http://ex/a> <http://ex/p> {} .", rdf("nil"))]
    );

    for n in 2..5 {
        let items = (0..n)
            .map(|i| format!("<ex:Item rdf:about=\"http://ex/i{}\"/>", i))
            .collect::<String>();
        let outcome = parse_ok(&format!(
            "<rdf:Description rdf:about=\"http://ex/a\"><ex:p rdf:parseType=\"Collection\">{}</ex:p></rdf:Description>",
            items
        ));
        // each item also has its rdf:type triple
        assert_eq!(outcome.graph.len(), 2 * n + 1 + n);
    }
}

#[test]
fn reification_after_the_triple() {
    let outcome = parse_ok(
        "<rdf:Description rdf:about=\"http://ex/a\"><ex:p rdf:ID=\"r\">v</ex:p></rdf:Description>",
    );
    assert_eq!(
        outcome.triples(),
        vec![
            "<http://ex/a> <http://ex/p> \"v\" .".to_owned(),
            format!("<http://ex/doc#r> {} {} .", rdf("type"), rdf("Statement")),
            format!("<http://ex/doc#r> {} <http://ex/a> .", rdf("subject")),
            format!("<http://ex/doc#r> {} <http://ex/p> .", rdf("predicate")),
            format!("<http://ex/doc#r> {} \"v\" .", rdf("object")),
        ]
    );
}

#[test]
fn duplicate_id_warns_once() {
    let outcome = parse_ok(
        "<rdf:Description rdf:ID=\"a\"><ex:p>1</ex:p></rdf:Description>
         <rdf:Description rdf:ID=\"a\"><ex:p>2</ex:p></rdf:Description>",
    );
    assert_eq!(
        outcome.triples(),
        vec![
            "<http://ex/doc#a> <http://ex/p> \"1\" .",
            "<http://ex/doc#a> <http://ex/p> \"2\" .",
        ]
    );
    assert_eq!(outcome.warnings(), 1);
}

#[test]
fn same_id_with_other_base_is_fine() {
    let outcome = parse_ok(
        "<rdf:Description rdf:ID=\"a\"><ex:p>1</ex:p></rdf:Description>
         <rdf:Description rdf:ID=\"a\" xml:base=\"http://ex/other\"><ex:p>2</ex:p></rdf:Description>",
    );
    assert_eq!(outcome.warnings(), 0);
    assert_eq!(
        outcome.graph.triples()[1].subject.to_string(),
        "<http://ex/other#a>"
    );
}

#[test]
fn node_subject_attributes_are_exclusive() {
    for attributes in [
        "rdf:about=\"http://ex/a\" rdf:ID=\"a\"",
        "rdf:about=\"http://ex/a\" rdf:nodeID=\"a\"",
        "rdf:ID=\"a\" rdf:nodeID=\"a\"",
        "rdf:about=\"http://ex/a\" rdf:ID=\"a\" rdf:nodeID=\"a\"",
    ] {
        let error = parse_err(&format!("<rdf:Description {}/>", attributes));
        assert!(!error.is_fatal());
    }
}

#[test]
fn property_attributes_are_exclusive() {
    let attributes = [
        "rdf:datatype=\"http://ex/d\"",
        "rdf:resource=\"http://ex/r\"",
        "rdf:nodeID=\"n\"",
        "rdf:parseType=\"Resource\"",
    ];
    for mask in 0..16_usize {
        if mask.count_ones() < 2 {
            continue;
        }
        let selected = attributes
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, a)| *a)
            .collect::<Vec<_>>()
            .join(" ");
        let error = parse_err(&format!(
            "<rdf:Description rdf:about=\"http://ex/a\"><ex:p {}/></rdf:Description>",
            selected
        ));
        assert!(
            matches!(error.kind(), RdfXmlErrorKind::Syntax(_)),
            "{}",
            selected
        );
    }
}

#[test]
fn scopes_are_restored() {
    let outcome = parse_ok(
        "<rdf:Description rdf:about=\"http://ex/a\" xml:lang=\"en\">
            <ex:p>one</ex:p>
            <ex:q xml:lang=\"fr\">deux</ex:q>
            <ex:r rdf:parseType=\"Resource\" xml:lang=\"\">
                <ex:s>none</ex:s>
            </ex:r>
            <ex:t>one again</ex:t>
        </rdf:Description>",
    );
    assert_eq!(
        outcome.triples(),
        vec![
            "<http://ex/a> <http://ex/p> \"one\"@en .",
            "<http://ex/a> <http://ex/q> \"deux\"@fr .",
            "<http://ex/a> <http://ex/r> _:riog00000001 .",
            "_:riog00000001 <http://ex/s> \"none\" .",
            "<http://ex/a> <http://ex/t> \"one again\"@en .",
        ]
    );
}

#[test]
fn base_is_scoped() {
    let outcome = parse(
        &format!(
            "<rdf:RDF xmlns:rdf=\"{}\" xmlns:ex=\"http://ex/\" xml:base=\"http://ex/root/\">
                <rdf:Description rdf:about=\"a\" xml:base=\"http://ex/other/\"><ex:p rdf:resource=\"b\"/></rdf:Description>
                <rdf:Description rdf:about=\"c\"><ex:p rdf:resource=\"d\"/></rdf:Description>
            </rdf:RDF>",
            RDF_NAMESPACE
        ),
        None,
    );
    assert!(outcome.result.is_ok());
    assert_eq!(
        outcome.triples(),
        vec![
            "<http://ex/other/a> <http://ex/p> <http://ex/other/b> .",
            "<http://ex/root/c> <http://ex/p> <http://ex/root/d> .",
        ]
    );
    assert_eq!(outcome.graph.base_iri(), Some("http://ex/root/"));
}

#[test]
fn setup_calls_describe_the_document_element() {
    let outcome = parse_ok("");
    assert_eq!(outcome.graph.base_iri(), Some("http://ex/doc"));
    assert_eq!(
        outcome.graph.prefixes().get("ex").map(String::as_str),
        Some("http://ex/")
    );
    assert_eq!(
        outcome.graph.prefixes().get("rdf").map(String::as_str),
        Some(RDF_NAMESPACE)
    );
    assert!(outcome.graph.is_empty());
}

#[test]
fn relative_base_warns_then_fails_when_used() {
    let unused = parse(
        &document("<rdf:Description xml:base=\"rel/\"><ex:p>v</ex:p></rdf:Description>"),
        None,
    );
    assert!(unused.result.is_ok());
    assert_eq!(unused.warnings(), 1);

    let used = parse(
        &document("<rdf:Description xml:base=\"rel/\" rdf:about=\"x\"/>"),
        None,
    );
    assert_eq!(used.warnings(), 1);
    let error = used.result.unwrap_err();
    assert!(matches!(error.kind(), RdfXmlErrorKind::RelativeIri { .. }));
    assert_eq!(used.diagnostics.errors().count(), 1);
}

#[test]
fn relative_about_without_base_fails() {
    let outcome = parse(
        &document("<rdf:Description rdf:about=\"x\"/>"),
        None,
    );
    assert!(outcome.result.is_err());
}

#[test]
fn deprecated_parse_type_is_a_literal() {
    let outcome = parse_ok(
        "<rdf:Description rdf:about=\"http://ex/a\"><ex:p rdf:parseType=\"literal\"><b>x</b></ex:p></rdf:Description>",
    );
    assert_eq!(outcome.warnings(), 1);
    assert_eq!(
        outcome.graph.triples()[0].object,
        Term::Literal(Literal::Typed {
            value: format!(
                "<b xmlns:ex=\"http://ex/\" xmlns:rdf=\"{}\">x</b>",
                RDF_NAMESPACE
            ),
            datatype: NamedNode::new(format!("{}XMLLiteral", RDF_NAMESPACE)),
        })
    );
}

#[test]
fn unknown_parse_type_fails() {
    parse_err(
        "<rdf:Description rdf:about=\"http://ex/a\"><ex:p rdf:parseType=\"Foo\">x</ex:p></rdf:Description>",
    );
}

#[test]
fn xml_literal_round_trip() {
    let first = parse_ok(
        "<rdf:Description rdf:about=\"http://ex/a\"><ex:p rdf:parseType=\"Literal\">a &lt; b <ex:b ex:z=\"1\" ex:y=\"&quot;\">c</ex:b></ex:p></rdf:Description>",
    );
    let value = first.graph.triples()[0].object.to_string();
    let lexical = match &first.graph.triples()[0].object {
        Term::Literal(literal) => literal.value().to_owned(),
        _ => panic!("{} is not a literal", value),
    };
    let second = parse_ok(&format!(
        "<rdf:Description rdf:about=\"http://ex/a\"><ex:p rdf:parseType=\"Literal\">{}</ex:p></rdf:Description>",
        lexical
    ));
    assert_eq!(first.graph.triples(), second.graph.triples());
}

#[test]
fn striped_syntax() {
    let outcome = parse_ok(
        "<rdf:Description rdf:about=\"http://ex/a\">
            <ex:knows>
                <ex:Person rdf:about=\"http://ex/b\"><ex:name>B</ex:name></ex:Person>
            </ex:knows>
        </rdf:Description>",
    );
    assert_eq!(
        outcome.triples(),
        vec![
            "<http://ex/a> <http://ex/knows> <http://ex/b> .".to_owned(),
            format!("<http://ex/b> {} <http://ex/Person> .", rdf("type")),
            "<http://ex/b> <http://ex/name> \"B\" .".to_owned(),
        ]
    );
}

#[test]
fn striped_syntax_violations() {
    parse_err("<rdf:Description><ex:knows>text<ex:Person/></ex:knows></rdf:Description>");
    parse_err("<rdf:Description><ex:knows><ex:Person/><ex:Person/></ex:knows></rdf:Description>");
}

#[test]
fn container_membership() {
    let outcome = parse_ok(
        "<rdf:Seq rdf:about=\"http://ex/s\"><rdf:li>a</rdf:li><rdf:li>b</rdf:li><rdf:_7>c</rdf:_7></rdf:Seq>
         <rdf:Bag rdf:about=\"http://ex/t\"><rdf:li>d</rdf:li></rdf:Bag>",
    );
    assert_eq!(
        outcome.triples(),
        vec![
            format!("<http://ex/s> {} {} .", rdf("type"), rdf("Seq")),
            format!("<http://ex/s> {} \"a\" .", rdf("_1")),
            format!("<http://ex/s> {} \"b\" .", rdf("_2")),
            format!("<http://ex/s> {} \"c\" .", rdf("_7")),
            format!("<http://ex/t> {} {} .", rdf("type"), rdf("Bag")),
            format!("<http://ex/t> {} \"d\" .", rdf("_1")),
        ]
    );
}

#[test]
fn property_attributes() {
    let outcome = parse_ok(
        "<rdf:Description rdf:about=\"http://ex/a\" ex:name=\"A\" rdf:type=\"http://ex/T\">
            <ex:p rdf:resource=\"http://ex/b\" ex:q=\"v\"/>
            <ex:r ex:s=\"w\"/>
            <ex:e/>
        </rdf:Description>",
    );
    assert_eq!(
        outcome.triples(),
        vec![
            "<http://ex/a> <http://ex/name> \"A\" .".to_owned(),
            format!("<http://ex/a> {} <http://ex/T> .", rdf("type")),
            "<http://ex/a> <http://ex/p> <http://ex/b> .".to_owned(),
            "<http://ex/b> <http://ex/q> \"v\" .".to_owned(),
            "<http://ex/a> <http://ex/r> _:riog00000001 .".to_owned(),
            "_:riog00000001 <http://ex/s> \"w\" .".to_owned(),
            "<http://ex/a> <http://ex/e> \"\" .".to_owned(),
        ]
    );
}

#[test]
fn node_ids_are_shared() {
    let outcome = parse_ok(
        "<rdf:Description rdf:nodeID=\"n\"><ex:p rdf:nodeID=\"m\"/></rdf:Description>
         <rdf:Description rdf:nodeID=\"m\"><ex:p rdf:nodeID=\"n\"/></rdf:Description>",
    );
    let triples = outcome.graph.triples();
    assert_eq!(Term::from(triples[0].subject.clone()), triples[1].object);
    assert_eq!(Term::from(triples[1].subject.clone()), triples[0].object);
    assert_ne!(triples[0].subject, triples[1].subject);
}

#[test]
fn datatyped_literal() {
    let outcome = parse_ok(
        "<rdf:Description rdf:about=\"http://ex/a\"><ex:p rdf:datatype=\"http://www.w3.org/2001/XMLSchema#integer\">1</ex:p></rdf:Description>",
    );
    assert_eq!(
        outcome.triples(),
        vec!["<http://ex/a> <http://ex/p> \"1\"^^<http://www.w3.org/2001/XMLSchema#integer> ."]
    );
    parse_err(
        "<rdf:Description rdf:about=\"http://ex/a\"><ex:p rdf:datatype=\"http://ex/d\"><ex:b/></ex:p></rdf:Description>",
    );
}

#[test]
fn base_direction() {
    let outcome = parse_ok(
        "<rdf:Description rdf:about=\"http://ex/a\" xmlns:its=\"http://www.w3.org/2005/11/its\" its:version=\"2.0\" its:dir=\"rtl\" xml:lang=\"ar\"><ex:p>x</ex:p></rdf:Description>",
    );
    assert_eq!(
        outcome.triples(),
        vec!["<http://ex/a> <http://ex/p> \"x\"@ar--rtl ."]
    );
    assert_eq!(outcome.warnings(), 0);
}

#[test]
fn soft_warnings() {
    let outcome = parse_ok(
        "<rdf:Description about=\"http://ex/a\" xml:lang=\"not a tag\" xml:foo=\"x\"><rdf:foo>x</rdf:foo></rdf:Description>",
    );
    assert_eq!(outcome.graph.len(), 1);
    assert_eq!(outcome.warnings(), 4);
    assert_eq!(
        outcome.graph.triples()[0].object,
        Term::Literal(Literal::LanguageTaggedString {
            value: "x".into(),
            language: "not a tag".into()
        })
    );
}

#[test]
fn forbidden_names() {
    parse_err("<rdf:Description foo=\"x\"/>");
    parse_err("<rdf:Description rdf:bagID=\"x\"/>");
    parse_err("<rdf:Description rdf:aboutEach=\"x\"/>");
    parse_err("<rdf:li/>");
    parse_err("<rdf:Description rdf:resource=\"http://ex/a\"/>");
    parse_err("<rdf:Description><rdf:Description/></rdf:Description>");
    parse_err("<rdf:Description><ex:p rdf:about=\"http://ex/a\"/></rdf:Description>");
}

#[test]
fn single_node_document() {
    let outcome = parse(
        "<ex:Thing xmlns:ex=\"http://ex/\" xmlns:rdf=\"http://www.w3.org/1999/02/22-rdf-syntax-ns#\" rdf:about=\"http://ex/a\"/>",
        None,
    );
    assert!(outcome.result.is_ok());
    assert_eq!(
        outcome.triples(),
        vec![format!("<http://ex/a> {} <http://ex/Thing> .", rdf("type"))]
    );
}

#[test]
fn errors_carry_positions() {
    let outcome = parse(
        &format!(
            "<rdf:RDF xmlns:rdf=\"{}\">\n  <rdf:Description/>\n  <rdf:li/>\n</rdf:RDF>",
            RDF_NAMESPACE
        ),
        None,
    );
    let error = outcome.result.unwrap_err();
    assert_eq!(error.textual_position().map(|p| p.line_number()), Some(3));
    assert!(error.to_string().contains("on line 3"));
    let reported = &outcome.diagnostics.all()[0];
    assert_eq!(reported.severity, Severity::Error);
    assert_eq!(reported.position, error.textual_position());
}

#[test]
fn malformed_markup_is_fatal() {
    let outcome = parse(
        &format!(
            "<rdf:RDF xmlns:rdf=\"{}\"><rdf:Description>",
            RDF_NAMESPACE
        ),
        None,
    );
    assert!(outcome.result.unwrap_err().is_fatal());
    assert_eq!(outcome.diagnostics.all()[0].severity, Severity::Fatal);

    let outcome = parse("<ex:a xmlns:ex=\"http://ex/\"><ex:b></ex:a>", None);
    assert!(outcome.result.unwrap_err().is_fatal());
}

#[test]
fn namespace_errors_are_fatal() {
    for body in [
        "<rdf:Description rdf:about=\"http://ex/a\"><undeclared:p>v</undeclared:p></rdf:Description>",
        "<rdf:Description rdf:about=\"http://ex/a\" xmlns:e=\"\"/>",
    ] {
        let outcome = parse(&document(body), None);
        let error = outcome.result.unwrap_err();
        assert!(matches!(error.kind(), RdfXmlErrorKind::Namespace(_)));
        assert!(error.is_fatal());
        assert_eq!(outcome.diagnostics.all()[0].severity, Severity::Fatal);
    }
}

const LANGUAGES: [&str; 3] = ["en", "fr", "de"];

/// Nested striped syntax: each level is a node element with one property element.
/// Every seventh node element changes the base and each property element the language.
fn deeply_nested(depth: usize) -> String {
    let mut body = String::from(
        "<rdf:Description rdf:about=\"http://ex/before\"><ex:q>b</ex:q></rdf:Description>",
    );
    for level in 0..depth {
        if level % 7 == 0 {
            body.push_str(&format!(
                "<rdf:Description xml:base=\"http://ex/d{}/\" rdf:about=\"n{}\">",
                level, level
            ));
        } else {
            body.push_str("<rdf:Description>");
        }
        body.push_str(&format!(
            "<ex:p xml:lang=\"{}\">",
            LANGUAGES[level % LANGUAGES.len()]
        ));
    }
    body.push_str("<rdf:Description><ex:leaf>v</ex:leaf></rdf:Description>");
    for _ in 0..depth {
        body.push_str("</ex:p></rdf:Description>");
    }
    body.push_str("<rdf:Description rdf:about=\"after\"><ex:q>a</ex:q></rdf:Description>");
    body
}

#[test]
fn deep_nesting_keeps_scopes_balanced() {
    let depth = 5000;
    let outcome = parse_ok(&deeply_nested(depth));
    let triples = outcome.triples();
    assert_eq!(triples.len(), depth + 3);
    assert_eq!(outcome.warnings(), 0);
    assert_eq!(triples[0], "<http://ex/before> <http://ex/q> \"b\" .");
    assert!(triples[1].starts_with("<http://ex/d0/n0> <http://ex/p> _:"));
    assert!(triples
        .iter()
        .any(|t| t.starts_with("<http://ex/d4991/n4991> <http://ex/p> _:")));
    assert!(triples[depth + 1].ends_with(&format!(
        "<http://ex/leaf> \"v\"@{} .",
        LANGUAGES[(depth - 1) % LANGUAGES.len()]
    )));
    assert_eq!(
        triples[depth + 2],
        "<http://ex/after> <http://ex/q> \"a\" ."
    );
}

#[test]
fn deep_resource_and_collection_nesting() {
    let depth = 5000;
    let mut body = String::from("<rdf:Description rdf:about=\"http://ex/root\">");
    for level in 0..depth {
        if level % 2 == 0 {
            body.push_str("<ex:r rdf:parseType=\"Resource\">");
        } else {
            body.push_str("<ex:c rdf:parseType=\"Collection\"><rdf:Description>");
        }
    }
    for level in (0..depth).rev() {
        if level % 2 == 0 {
            body.push_str("</ex:r>");
        } else {
            body.push_str("</rdf:Description></ex:c>");
        }
    }
    body.push_str("</rdf:Description>");
    let outcome = parse_ok(&body);
    // one triple per Resource level, three per one-item collection
    assert_eq!(outcome.graph.len(), depth / 2 + 3 * (depth / 2));
}

#[derive(Debug)]
struct Refused;

impl fmt::Display for Refused {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "refused")
    }
}

impl Error for Refused {}

#[derive(Default)]
struct FirstTripleOnly {
    triples: Vec<Triple>,
}

impl TripleSink for FirstTripleOnly {
    type Error = Refused;

    fn on_triple(&mut self, triple: Triple) -> Result<(), Refused> {
        if self.triples.is_empty() {
            self.triples.push(triple);
            Ok(())
        } else {
            Err(Refused)
        }
    }
}

#[test]
fn sink_errors_stop_parsing() {
    let data = document(
        "<rdf:Description rdf:about=\"http://ex/a\"><ex:p>1</ex:p><ex:p>2</ex:p></rdf:Description>",
    );
    let mut parser = RdfXmlParser::new(data.as_bytes(), None)
        .unwrap()
        .with_diagnostics(CollectedDiagnostics::default());
    let mut sink = FirstTripleOnly::default();
    let error = parser.parse_all(&mut sink).unwrap_err();
    assert!(matches!(error.kind(), RdfXmlErrorKind::Sink(_)));
    assert!(error.source().is_some());
    assert_eq!(sink.triples.len(), 1);
    assert!(parser.is_end());
    parser.parse_all(&mut sink).unwrap();
}
