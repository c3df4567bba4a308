//! Diagnostic reporting for recoverable render failures.
//!
//! The renderer never fails its caller; recoverable problems (a formatter
//! that cannot project a cell) are reported to a [`DiagnosticSink`] and the
//! render continues. The sink is injected at construction so applications
//! decide where reports land and tests can substitute [`CaptureSink`].

use std::fmt;
use std::sync::Mutex;

/// Severity of a diagnostic report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{}", s)
    }
}

/// Capability for receiving diagnostic reports.
///
/// One call per recoverable failure. The implementation owns destination and
/// formatting concerns; the renderer only supplies severity and message.
pub trait DiagnosticSink {
    /// Report one recoverable failure.
    fn report(&self, severity: Severity, message: &str);
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &S {
    fn report(&self, severity: Severity, message: &str) {
        (**self).report(severity, message);
    }
}

/// Production sink forwarding reports to the `tracing` macros.
///
/// Emission only; subscriber configuration belongs to the surrounding
/// application.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Info => tracing::info!("{}", message),
            Severity::Warning => tracing::warn!("{}", message),
            Severity::Error => tracing::error!("{}", message),
        }
    }
}

/// Recording sink for tests: keeps every report for later inspection.
#[derive(Debug, Default)]
pub struct CaptureSink {
    reports: Mutex<Vec<(Severity, String)>>,
}

impl CaptureSink {
    /// Create an empty capture sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All reports received so far, in order.
    pub fn reports(&self) -> Vec<(Severity, String)> {
        self.reports
            .lock()
            .map(|reports| reports.clone())
            .unwrap_or_default()
    }
}

impl DiagnosticSink for CaptureSink {
    fn report(&self, severity: Severity, message: &str) {
        if let Ok(mut reports) = self.reports.lock() {
            reports.push((severity, message.to_string()));
        }
    }
}
