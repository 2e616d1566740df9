#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz `Fn::Sub` placeholder scanning with arbitrary template strings.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = cfn_tools::graph::sub_placeholders(s);
    }
});
