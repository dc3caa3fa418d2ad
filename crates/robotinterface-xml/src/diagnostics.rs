// crates/robotinterface-xml/src/diagnostics.rs

//! Classified messages produced while reading a description.

use crate::dom::Element;
use crate::types::Robot;
use log::{error, warn};
use std::fmt;

/// How bad a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// A default was applied; parsing continues normally.
    Warning,
    /// The construct was malformed; the result is marked as failed.
    Error,
    /// The inclusion pass was aborted.
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
            Severity::Fatal => write!(f, "fatal"),
        }
    }
}

/// A single message with its source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub file: String,
    pub line: Option<u32>,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}: {}: {}", self.file, line, self.severity, self.message),
            None => write!(f, "{}: {}: {}", self.file, self.severity, self.message),
        }
    }
}

/// Collects diagnostics and tracks whether parsing is still successful.
///
/// Every message is also forwarded to the `log` facade.
#[derive(Debug)]
pub(crate) struct Diagnostics {
    entries: Vec<Diagnostic>,
    success: bool,
}

impl Diagnostics {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
            success: true,
        }
    }

    pub(crate) fn is_success(&self) -> bool {
        self.success
    }

    /// Records a parse failure at `element` and clears the success flag.
    pub(crate) fn error(&mut self, element: &Element, message: impl Into<String>) {
        self.success = false;
        self.push(Severity::Error, &element.source, Some(element.line), message.into());
    }

    /// Records a recoverable problem at `element`.
    pub(crate) fn warning(&mut self, element: &Element, message: impl Into<String>) {
        self.push(Severity::Warning, &element.source, Some(element.line), message.into());
    }

    /// Records a problem that is not tied to an element (e.g., a load failure).
    pub(crate) fn report(
        &mut self,
        severity: Severity,
        file: &str,
        line: Option<u32>,
        message: impl Into<String>,
    ) {
        if severity >= Severity::Error {
            self.success = false;
        }
        self.push(severity, file, line, message.into());
    }

    fn push(&mut self, severity: Severity, file: &str, line: Option<u32>, message: String) {
        let diagnostic = Diagnostic {
            severity,
            file: file.to_string(),
            line,
            message,
        };
        match severity {
            Severity::Warning => warn!("Invalid syntax while loading {}", diagnostic),
            Severity::Error => error!("Syntax error while loading {}", diagnostic),
            Severity::Fatal => error!("Fatal error while loading {}", diagnostic),
        }
        self.entries.push(diagnostic);
    }

    pub(crate) fn into_entries(self) -> Vec<Diagnostic> {
        self.entries
    }
}

/// The outcome of reading a robot description.
///
/// When `success` is `false` the robot is for diagnostics only: it may be
/// partially populated and must not be executed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReaderResult {
    pub robot: Robot,
    pub success: bool,
    pub diagnostics: Vec<Diagnostic>,
}

impl ReaderResult {
    /// A failed result with an empty robot.
    pub fn parsing_failed() -> Self {
        Self::default()
    }

    pub(crate) fn failed_with(diagnostics: Diagnostics) -> Self {
        Self {
            diagnostics: diagnostics.into_entries(),
            ..Self::parsing_failed()
        }
    }

    /// Iterates over diagnostics of exactly `severity`.
    pub fn diagnostics_of(&self, severity: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.severity == severity)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics_of(Severity::Warning)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity >= Severity::Error)
    }
}
