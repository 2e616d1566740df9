//! Escaping utilities for report generation.
//!
//! Entity names come from the template and are embedded verbatim in DOT
//! source and terminal output. They must not be able to break out of a
//! quoted DOT identifier or inject terminal control sequences.

/// Escape a string for use inside a double-quoted DOT identifier.
///
/// ```
/// use cfn_tools::reports::escape::escape_dot;
///
/// assert_eq!(escape_dot(r#"say "hi""#), r#"say \"hi\""#);
/// assert_eq!(escape_dot("Bucket"), "Bucket");
/// ```
#[must_use]
pub fn escape_dot(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            c if c.is_control() => {}
            c => result.push(c),
        }
    }
    result
}

/// Remove control characters (including ESC) from text bound for a terminal.
#[must_use]
pub fn strip_control(s: &str) -> String {
    s.chars().filter(|c| !c.is_control()).collect()
}
