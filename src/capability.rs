#![forbid(unsafe_code)]

//! Optional capability (plugin) discovery with graceful degradation

mod diagnostics;
mod handle;
mod loader;
mod source;

pub use diagnostics::{Diagnostic, Diagnostics};
pub use handle::{Capabilities, Capability, CapabilityRole, CapabilitySlot, CapabilitySpec};
pub use loader::{CapabilityLoader, DEFAULT_GUIDANCE};
pub use source::{CapabilitySource, ManifestSource, StaticSource};
