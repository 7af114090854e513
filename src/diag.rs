//! Diagnostics for the reorder pipeline
//!
//! Non-fatal events (date-parse fallbacks, progress milestones) are reported
//! through a sink handed to the engine at construction. There is no global
//! logger; callers that do not care pass [`NullSink`].

use std::fmt;
use std::sync::Mutex;

/// Severity of a diagnostic event
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warn,
}

impl Severity {
    /// Returns the lowercase label used in rendered output
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warn => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receiver for non-fatal diagnostic events
pub trait DiagnosticSink {
    fn emit(&self, severity: Severity, message: &str);

    fn info(&self, message: &str) {
        self.emit(Severity::Info, message);
    }

    fn warn(&self, message: &str) {
        self.emit(Severity::Warn, message);
    }
}

/// Shared sinks delegate, so a caller can keep a handle to a sink it hands off
impl<S: DiagnosticSink> DiagnosticSink for std::sync::Arc<S> {
    fn emit(&self, severity: Severity, message: &str) {
        (**self).emit(severity, message);
    }
}

/// Sink that discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn emit(&self, _severity: Severity, _message: &str) {}
}

/// Sink that prints one line per event to stderr, filtered by minimum severity
#[derive(Debug, Clone, Copy)]
pub struct StderrSink {
    min: Severity,
}

impl StderrSink {
    pub fn new(min: Severity) -> Self {
        Self { min }
    }
}

impl Default for StderrSink {
    fn default() -> Self {
        Self::new(Severity::Warn)
    }
}

impl DiagnosticSink for StderrSink {
    fn emit(&self, severity: Severity, message: &str) {
        if severity >= self.min {
            eprintln!("{severity}: {message}");
        }
    }
}

/// Sink that collects events in memory, for embedding callers and tests
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<(Severity, String)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All collected events in emission order
    pub fn events(&self) -> Vec<(Severity, String)> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Messages of collected warning events only
    pub fn warnings(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter(|(severity, _)| *severity == Severity::Warn)
            .map(|(_, message)| message)
            .collect()
    }
}

impl DiagnosticSink for MemorySink {
    fn emit(&self, severity: Severity, message: &str) {
        if let Ok(mut events) = self.events.lock() {
            events.push((severity, message.to_string()));
        }
    }
}
