#![forbid(unsafe_code)]

//! Built-in configuration flavors
//!
//! Each flavor declares a fixed set of optional capabilities and a fixed
//! layer sequence. Derived flavors start from the complete base sequence
//! and append their own layers, so their settings win on overlap.

pub mod base;
pub mod data_processing;
pub mod server;
pub mod ui;

use crate::capability::{Capabilities, CapabilitySpec};
use crate::layers::{Layer, LayerComposer};
use crate::types::Flavor;

/// Guidance appended to warnings for the UI flavor's own plugins
pub const UI_GUIDANCE: &str = "Related rules will be disabled.";

/// Returns the optional capabilities a flavor declares
pub fn capabilities(flavor: Flavor) -> Vec<CapabilitySpec> {
    match flavor {
        Flavor::Base => base::capabilities(),
        Flavor::DataProcessing => data_processing::capabilities(),
        Flavor::Server => server::capabilities(),
        Flavor::Ui => ui::capabilities(),
    }
}

/// Builds the ordered layer sequence for a flavor
pub fn layers(flavor: Flavor, composer: &LayerComposer<'_>) -> Vec<Layer> {
    match flavor {
        Flavor::Base => base::layers(composer),
        Flavor::DataProcessing => data_processing::layers(composer),
        Flavor::Server => server::layers(composer),
        Flavor::Ui => ui::layers(composer),
    }
}

/// Builds the ordered layer sequence for a flavor from resolved capabilities
pub fn build_layers(flavor: Flavor, capabilities: &Capabilities) -> Vec<Layer> {
    LayerComposer::new(capabilities).compose(flavor)
}
