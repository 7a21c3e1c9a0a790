#![no_main]
use arbor_api::diagnostics::CollectedDiagnostics;
use arbor_api::parser::TriplesParser;
use arbor_api::sink::OwnedGraph;
use arbor_xml::RdfXmlParser;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(parser) = RdfXmlParser::new(data, Some("http://example.com/")) {
        let _ = parser
            .with_diagnostics(CollectedDiagnostics::default())
            .parse_all(&mut OwnedGraph::default());
    }
});
