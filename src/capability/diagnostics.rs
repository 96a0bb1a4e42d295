#![forbid(unsafe_code)]

//! Collector for non-fatal capability warnings
//!
//! Warnings are recorded instead of printed so the core stays testable; the
//! CLI drains the collector onto stderr.

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::sync::Mutex;

/// A single warning about an unavailable capability
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Name of the capability that could not be loaded
    pub capability: String,
    /// Guidance shown after the capability name
    pub guidance: String,
    /// Underlying acquisition failure, for verbose output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} not found. {}", self.capability, self.guidance)
    }
}

#[derive(Debug, Default)]
struct Inner {
    entries: Vec<Diagnostic>,
    seen: HashSet<String>,
}

/// Thread-safe diagnostics collector
///
/// Records at most one warning per capability name.
#[derive(Debug, Default)]
pub struct Diagnostics {
    inner: Mutex<Inner>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that a capability is unavailable
    ///
    /// Returns false if a warning for this name was already recorded.
    pub fn capability_unavailable(
        &self,
        capability: &str,
        guidance: &str,
        cause: Option<String>,
    ) -> bool {
        let mut inner = match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if !inner.seen.insert(capability.to_string()) {
            return false;
        }
        inner.entries.push(Diagnostic {
            capability: capability.to_string(),
            guidance: guidance.to_string(),
            cause,
        });
        true
    }

    /// Returns a snapshot of the recorded diagnostics in recording order
    pub fn entries(&self) -> Vec<Diagnostic> {
        match self.inner.lock() {
            Ok(guard) => guard.entries.clone(),
            Err(poisoned) => poisoned.into_inner().entries.clone(),
        }
    }

    /// Number of warnings naming the given capability (0 or 1)
    pub fn count_for(&self, capability: &str) -> usize {
        self.entries()
            .iter()
            .filter(|d| d.capability == capability)
            .count()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
