//! Developer-facing diagnostics.
//!
//! Failures that are recovered locally (a model that cannot be placed on an
//! anchor) are reported to an injected [`DiagnosticSink`] instead of being
//! propagated. They never reach the end user.

use std::{cell::RefCell, fmt, rc::Rc};

use crate::resources::AssetError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    ResourceNotFound { resource: String },
    LoadError { description: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::ResourceNotFound { resource } => {
                write!(f, "resource not found: {}", resource)
            }
            Diagnostic::LoadError { description } => write!(f, "load error: {}", description),
        }
    }
}

impl From<&AssetError> for Diagnostic {
    fn from(err: &AssetError) -> Self {
        match err {
            AssetError::ResourceNotFound { name, extension } => Diagnostic::ResourceNotFound {
                resource: format!("{}.{}", name, extension),
            },
            AssetError::AssetLoadFailure(description) => Diagnostic::LoadError {
                description: description.clone(),
            },
        }
    }
}

pub trait DiagnosticSink {
    fn report(&self, diagnostic: Diagnostic);
}

/// Forwards every diagnostic to the `log` facade.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&self, diagnostic: Diagnostic) {
        log::error!(target: "ar_scenes::diagnostics", "{}", diagnostic);
    }
}

/// Keeps diagnostics in memory. Clones share the same buffer, so a caller can
/// hand one clone to a handler and inspect the other.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    reports: Rc<RefCell<Vec<Diagnostic>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<Diagnostic> {
        self.reports.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.reports.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DiagnosticSink for RecordingSink {
    fn report(&self, diagnostic: Diagnostic) {
        log::debug!("recorded diagnostic: {}", diagnostic);
        self.reports.borrow_mut().push(diagnostic);
    }
}
