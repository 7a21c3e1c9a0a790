//! Policies deciding what happens to the messages a parser reports.
//!
//! Warnings never stop a parser. Errors and fatal errors are reported right before the parser
//! unwinds with the matching error value.

use crate::parser::TextPosition;
use std::fmt;

#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Copy, Hash)]
pub enum Severity {
    /// Processing continues, the output might be semantically imperfect.
    Warning,
    /// A grammar violation, the parsing stops.
    Error,
    /// Malformed low-level markup, the parsing stops.
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Fatal => "fatal error",
        })
    }
}

/// Receives positioned messages from a parser.
pub trait Diagnostics {
    fn warning(&mut self, message: &str, position: Option<TextPosition>);

    fn error(&mut self, message: &str, position: Option<TextPosition>);

    fn fatal(&mut self, message: &str, position: Option<TextPosition>) {
        self.error(message, position)
    }
}

impl<D: Diagnostics + ?Sized> Diagnostics for &mut D {
    fn warning(&mut self, message: &str, position: Option<TextPosition>) {
        (**self).warning(message, position)
    }

    fn error(&mut self, message: &str, position: Option<TextPosition>) {
        (**self).error(message, position)
    }

    fn fatal(&mut self, message: &str, position: Option<TextPosition>) {
        (**self).fatal(message, position)
    }
}

/// Forwards every message to [`tracing`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn warning(&mut self, message: &str, position: Option<TextPosition>) {
        match position {
            Some(position) => tracing::warn!(
                line = position.line_number(),
                column = position.column_number(),
                "{}",
                message
            ),
            None => tracing::warn!("{}", message),
        }
    }

    fn error(&mut self, message: &str, position: Option<TextPosition>) {
        match position {
            Some(position) => tracing::error!(
                line = position.line_number(),
                column = position.column_number(),
                "{}",
                message
            ),
            None => tracing::error!("{}", message),
        }
    }

    fn fatal(&mut self, message: &str, position: Option<TextPosition>) {
        match position {
            Some(position) => tracing::error!(
                fatal = true,
                line = position.line_number(),
                column = position.column_number(),
                "{}",
                message
            ),
            None => tracing::error!(fatal = true, "{}", message),
        }
    }
}

/// A message kept by [`CollectedDiagnostics`].
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub position: Option<TextPosition>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)?;
        if let Some(position) = self.position {
            write!(f, " on {}", position)?;
        }
        Ok(())
    }
}

/// Keeps every message in memory, in reporting order.
#[derive(Debug, Clone, Default)]
pub struct CollectedDiagnostics {
    diagnostics: Vec<Diagnostic>,
}

impl CollectedDiagnostics {
    pub fn all(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity != Severity::Warning)
    }

    fn push(&mut self, severity: Severity, message: &str, position: Option<TextPosition>) {
        self.diagnostics.push(Diagnostic {
            severity,
            message: message.to_owned(),
            position,
        })
    }
}

impl Diagnostics for CollectedDiagnostics {
    fn warning(&mut self, message: &str, position: Option<TextPosition>) {
        self.push(Severity::Warning, message, position)
    }

    fn error(&mut self, message: &str, position: Option<TextPosition>) {
        self.push(Severity::Error, message, position)
    }

    fn fatal(&mut self, message: &str, position: Option<TextPosition>) {
        self.push(Severity::Fatal, message, position)
    }
}
