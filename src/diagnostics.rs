//! Non-fatal diagnostics.
//!
//! Unresolved references and malformed intrinsic functions are reported to a
//! [`DiagnosticSink`] and otherwise ignored. Sinks never affect control flow.

use serde::Serialize;
use std::fmt;

/// What went wrong.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[non_exhaustive]
pub enum DiagnosticKind {
    /// A reference names nothing declared in the template.
    UnresolvedReference { name: String, from: String },
    /// An intrinsic function body has an unexpected shape.
    MalformedIntrinsic { function: String, detail: String },
}

/// A single non-fatal finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    #[serde(flatten)]
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn unresolved(name: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::UnresolvedReference {
                name: name.into(),
                from: from.into(),
            },
        }
    }

    pub fn malformed(function: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::MalformedIntrinsic {
                function: function.into(),
                detail: detail.into(),
            },
        }
    }

    #[must_use]
    pub const fn is_unresolved(&self) -> bool {
        matches!(self.kind, DiagnosticKind::UnresolvedReference { .. })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::UnresolvedReference { name, from } => {
                write!(f, "Unresolved reference '{name}' in {from}")
            }
            DiagnosticKind::MalformedIntrinsic { function, detail } => {
                write!(f, "Malformed {function}: {detail}")
            }
        }
    }
}

/// Receiver for diagnostics.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Sink that forwards diagnostics to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        match diagnostic.kind {
            DiagnosticKind::UnresolvedReference { .. } => tracing::debug!("{}", diagnostic),
            DiagnosticKind::MalformedIntrinsic { .. } => tracing::warn!("{}", diagnostic),
        }
    }
}

/// Sink that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&mut self, _diagnostic: Diagnostic) {}
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn report(&mut self, diagnostic: Diagnostic) {
        (**self).report(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let d = Diagnostic::unresolved("Missing", "Resources/Bucket");
        assert_eq!(
            d.to_string(),
            "Unresolved reference 'Missing' in Resources/Bucket"
        );
        assert!(d.is_unresolved());

        let d = Diagnostic::malformed("Fn::GetAtt", "expected 2 elements, found 3");
        assert_eq!(d.to_string(), "Malformed Fn::GetAtt: expected 2 elements, found 3");
        assert!(!d.is_unresolved());
    }

    #[test]
    fn test_vec_sink_collects() {
        let mut sink: Vec<Diagnostic> = Vec::new();
        sink.report(Diagnostic::unresolved("A", "Outputs/B"));
        {
            let mut borrowed = &mut sink;
            borrowed.report(Diagnostic::malformed("DependsOn", "number"));
        }
        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_value(Diagnostic::unresolved("A", "Outputs/B")).unwrap();
        assert_eq!(json["kind"], "unresolved_reference");
        assert_eq!(json["name"], "A");
    }
}
