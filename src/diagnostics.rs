// SPDX-License-Identifier: MIT

//! Diagnostics sink passed explicitly into compile-level calls.
//!
//! Sinks are append-only. Nothing recorded here feeds back into the
//! rendered output.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A single note recorded while building or combining conditions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

pub trait DiagnosticSink {
    fn emit(&mut self, diagnostic: Diagnostic);

    fn info(&mut self, message: String) {
        self.emit(Diagnostic::info(message));
    }

    fn warning(&mut self, message: String) {
        self.emit(Diagnostic::warning(message));
    }
}

/// Collects diagnostics in memory, in emission order
#[derive(Debug, Default, Clone)]
pub struct DiagnosticLog {
    entries: Vec<Diagnostic>,
}

impl DiagnosticLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl DiagnosticSink for DiagnosticLog {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }
}

/// Forwards diagnostics to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Info => log::info!("{}", diagnostic.message),
            Severity::Warning => log::warn!("{}", diagnostic.message),
        }
    }
}

/// Discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn emit(&mut self, _diagnostic: Diagnostic) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_keeps_emission_order() {
        let mut log = DiagnosticLog::new();
        log.info("first".to_string());
        log.warning("second".to_string());
        log.info("third".to_string());

        let messages: Vec<_> = log.entries().iter().map(|d| d.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second", "third"]);
        assert_eq!(log.warnings().count(), 1);
    }

    #[test]
    fn test_sink_is_object_safe() {
        let mut log = DiagnosticLog::new();
        {
            let sink: &mut dyn DiagnosticSink = &mut log;
            sink.warning("via trait object".to_string());
        }
        assert!(!log.is_empty());

        let mut null = NullSink;
        let sink: &mut dyn DiagnosticSink = &mut null;
        sink.info("dropped".to_string());
    }

    #[test]
    fn test_diagnostic_display() {
        assert_eq!(
            Diagnostic::warning("names ignored").to_string(),
            "warning: names ignored"
        );
    }
}
