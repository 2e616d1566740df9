#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz the template parser and everything downstream of it.
///
/// Any text that parses must also survive graph construction and a
/// self-comparison without panicking.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(doc) = cfn_tools::parsers::parse_template_str(s) {
            if let Ok(graph) = cfn_tools::Graph::build(&doc) {
                let _ = graph.ordered_entities();
            }
            let _ = cfn_tools::render(&cfn_tools::compare(&doc, &doc), false);
        }
    }
});
