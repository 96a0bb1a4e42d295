#![forbid(unsafe_code)]

//! Failure-tolerant capability loading
//!
//! The loader is the containment boundary for acquisition failures: callers
//! only ever see a [`CapabilitySlot`], never an error.

use super::diagnostics::Diagnostics;
use super::handle::{Capabilities, CapabilitySlot, CapabilitySpec};
use super::source::CapabilitySource;
use rayon::prelude::*;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Guidance appended to the warning for a missing capability without its own
pub const DEFAULT_GUIDANCE: &str =
    "Refer to the README for information on how to install the plugin.";

/// Loads capabilities from a source, recording failures as diagnostics
///
/// Each distinct name is acquired at most once per loader; later requests
/// for the same name reuse the first outcome.
pub struct CapabilityLoader {
    source: Box<dyn CapabilitySource>,
    diagnostics: Diagnostics,
    slots: Mutex<HashMap<String, CapabilitySlot>>,
}

impl CapabilityLoader {
    pub fn new(source: impl CapabilitySource + 'static) -> Self {
        Self {
            source: Box::new(source),
            diagnostics: Diagnostics::new(),
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Warnings recorded so far
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Loads one capability
    ///
    /// Never fails: an unavailable capability yields `CapabilitySlot::Absent`
    /// and one warning naming it.
    pub fn load(&self, spec: &CapabilitySpec) -> CapabilitySlot {
        if let Some(slot) = self.cached(&spec.name) {
            return slot;
        }

        let slot = match self.source.acquire(spec) {
            Ok(capability) => {
                tracing::debug!(capability = %spec.name, role = %spec.role, "capability loaded");
                CapabilitySlot::Loaded(Arc::new(capability))
            }
            Err(e) => {
                tracing::debug!(capability = %spec.name, error = %e, "capability unavailable");
                let guidance = spec.guidance.as_deref().unwrap_or(DEFAULT_GUIDANCE);
                self.diagnostics
                    .capability_unavailable(&spec.name, guidance, Some(e.to_string()));
                CapabilitySlot::Absent
            }
        };

        let mut slots = match self.slots.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        // A concurrent load of the same name may have finished first
        slots.entry(spec.name.clone()).or_insert(slot).clone()
    }

    /// Loads every requested capability in parallel
    ///
    /// Returns only once all acquisitions have completed, so composition
    /// always sees the full set.
    pub fn load_all(&self, specs: &[CapabilitySpec]) -> Capabilities {
        let mut unique: Vec<&CapabilitySpec> = Vec::with_capacity(specs.len());
        for spec in specs {
            if !unique.iter().any(|seen| seen.name == spec.name) {
                unique.push(spec);
            }
        }

        let outcomes: Vec<(CapabilitySpec, CapabilitySlot)> = unique
            .par_iter()
            .map(|spec| ((*spec).clone(), self.load(spec)))
            .collect();

        let mut capabilities = Capabilities::new();
        for (spec, slot) in outcomes {
            capabilities.insert(spec, slot);
        }
        capabilities
    }

    fn cached(&self, name: &str) -> Option<CapabilitySlot> {
        let slots = match self.slots.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        slots.get(name).cloned()
    }
}

impl std::fmt::Debug for CapabilityLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapabilityLoader")
            .field("diagnostics", &self.diagnostics)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{Capability, StaticSource};
    use crate::error::CapabilityError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        calls: Arc<AtomicUsize>,
    }

    impl CapabilitySource for CountingSource {
        fn acquire(&self, spec: &CapabilitySpec) -> Result<Capability, CapabilityError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(CapabilityError::NotInstalled(spec.name.clone()))
        }
    }

    #[test]
    fn test_load_present_capability() {
        let spec = CapabilitySpec::plugin("eslint-plugin-import", "import");
        let loader = CapabilityLoader::new(StaticSource::installing([&spec]));

        let slot = loader.load(&spec);
        assert!(slot.is_loaded());
        assert!(loader.diagnostics().is_empty());
    }

    #[test]
    fn test_load_absent_capability_warns_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let loader = CapabilityLoader::new(CountingSource {
            calls: Arc::clone(&calls),
        });
        let spec = CapabilitySpec::plugin("node-checks", "node-checks");

        assert_eq!(loader.load(&spec), CapabilitySlot::Absent);
        assert_eq!(loader.load(&spec), CapabilitySlot::Absent);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let entries = loader.diagnostics().entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(
            entries[0].to_string(),
            format!("node-checks not found. {}", DEFAULT_GUIDANCE)
        );
        assert_eq!(
            entries[0].cause.as_deref(),
            Some("node-checks is not installed")
        );
    }

    #[test]
    fn test_guidance_taken_from_spec() {
        let loader = CapabilityLoader::new(StaticSource::new());
        loader.load(
            &CapabilitySpec::plugin("eslint-plugin-react", "react")
                .with_guidance("Related rules will be disabled."),
        );
        loader.load(&CapabilitySpec::plugin("eslint-plugin-import", "import"));

        let entries = loader.diagnostics().entries();
        assert_eq!(
            entries[0].to_string(),
            "eslint-plugin-react not found. Related rules will be disabled."
        );
        assert_eq!(
            entries[1].to_string(),
            format!("eslint-plugin-import not found. {}", DEFAULT_GUIDANCE)
        );
    }

    #[test]
    fn test_load_all_dedupes_and_joins() {
        let import = CapabilitySpec::plugin("eslint-plugin-import", "import");
        let node = CapabilitySpec::plugin("node-checks", "node-checks");
        let loader = CapabilityLoader::new(StaticSource::installing([&import]));

        let capabilities =
            loader.load_all(&[import.clone(), node.clone(), node.clone(), import.clone()]);

        assert_eq!(capabilities.len(), 2);
        assert!(capabilities.is_loaded("eslint-plugin-import"));
        assert_eq!(
            capabilities.slot("node-checks"),
            Some(&CapabilitySlot::Absent)
        );
        assert_eq!(loader.diagnostics().count_for("node-checks"), 1);
    }
}
