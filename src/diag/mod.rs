//! Diagnostic engine (§6, §7).
//!
//! Diagnostics are data, not `Result`/`Error`: the analyzer accumulates
//! them in a [`DiagnosticEngine`] and keeps going, because a single source
//! file can legitimately contain many independent mistakes. Rendering to a
//! terminal is out of scope here (external collaborator); this layer only
//! builds the `Diagnostic` values and expands their format-string template
//! into final text.

mod format;

pub use format::DiagArg;

use crate::base::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Note,
    Warning,
    Error,
    Fatal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RelatedInfo {
    pub location: Span,
    pub message: String,
}

impl RelatedInfo {
    pub fn new(location: Span, message: impl Into<String>) -> Self {
        Self {
            location,
            message: message.into(),
        }
    }
}

/// A single diagnostic: a severity, a location, a format-string template
/// and its ordered arguments, and any related secondary locations (e.g.
/// "previous declaration is here").
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub location: Span,
    pub template: String,
    pub args: Vec<DiagArg>,
    pub related: Vec<RelatedInfo>,
}

impl Diagnostic {
    pub fn new(severity: Severity, location: Span, template: impl Into<String>) -> Self {
        Self {
            severity,
            location,
            template: template.into(),
            args: Vec::new(),
            related: Vec::new(),
        }
    }

    pub fn note(location: Span, template: impl Into<String>) -> Self {
        Self::new(Severity::Note, location, template)
    }

    pub fn warning(location: Span, template: impl Into<String>) -> Self {
        Self::new(Severity::Warning, location, template)
    }

    pub fn error(location: Span, template: impl Into<String>) -> Self {
        Self::new(Severity::Error, location, template)
    }

    pub fn fatal(location: Span, template: impl Into<String>) -> Self {
        Self::new(Severity::Fatal, location, template)
    }

    pub fn with_arg(mut self, arg: impl Into<DiagArg>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn with_related(mut self, info: RelatedInfo) -> Self {
        self.related.push(info);
        self
    }

    /// Expand the template against the stored arguments (§1.2).
    pub fn message(&self) -> String {
        format::expand(&self.template, &self.args)
    }
}

/// Accumulates diagnostics for one translation unit. Single-owner, never
/// shared across translation units (§5).
#[derive(Debug, Default)]
pub struct DiagnosticEngine {
    diagnostics: Vec<Diagnostic>,
    had_error: bool,
    fatal_count: u32,
}

impl DiagnosticEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `diag`. Returns `false` once `fatal_limit` has been reached,
    /// signaling the analyzer should stop building new nodes for this
    /// translation unit (already-built nodes remain valid, §5).
    pub fn report(&mut self, diag: Diagnostic, fatal_limit: Option<u32>) -> bool {
        tracing::debug!(
            severity = ?diag.severity,
            message = %diag.message(),
            "diagnostic reported"
        );
        match diag.severity {
            Severity::Error | Severity::Fatal => self.had_error = true,
            _ => {}
        }
        if diag.severity == Severity::Fatal {
            self.fatal_count += 1;
        }
        self.diagnostics.push(diag);
        match fatal_limit {
            Some(limit) => self.fatal_count < limit,
            None => true,
        }
    }

    pub fn had_errors(&self) -> bool {
        self.had_error
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc() -> Span {
        Span::from_coords(0, 0, 0, 1)
    }

    #[test]
    fn report_sets_error_flag_only_for_error_and_fatal() {
        let mut engine = DiagnosticEngine::new();
        engine.report(Diagnostic::note(loc(), "a note"), None);
        assert!(!engine.had_errors());
        engine.report(Diagnostic::warning(loc(), "a warning"), None);
        assert!(!engine.had_errors());
        engine.report(Diagnostic::error(loc(), "redeclaration of %q0").with_arg("i"), None);
        assert!(engine.had_errors());
    }

    #[test]
    fn message_expands_template() {
        let diag = Diagnostic::error(loc(), "redeclaration of %q0").with_arg("i");
        assert_eq!(diag.message(), "redeclaration of 'i'");
    }

    #[test]
    fn fatal_limit_stops_accepting_further_work() {
        let mut engine = DiagnosticEngine::new();
        assert!(engine.report(Diagnostic::fatal(loc(), "boom"), Some(1)));
        assert!(!engine.report(Diagnostic::fatal(loc(), "boom again"), Some(1)));
    }

    #[test]
    fn related_info_is_preserved() {
        let diag = Diagnostic::error(loc(), "redeclaration of %q0")
            .with_arg("i")
            .with_related(RelatedInfo::new(loc(), "previous declaration is here"));
        assert_eq!(diag.related.len(), 1);
    }
}
