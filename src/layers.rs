#![forbid(unsafe_code)]

//! Layer records, composition and per-file resolution

pub mod composer;
mod layer;
pub mod matcher;
mod stack;

pub use composer::{LayerBuilder, LayerComposer, RuleTable};
pub use layer::{Bindings, LanguageOptions, Layer, LayerKind, RuleMap, SourceType};
pub use stack::{LayerStack, ResolvedConfig};
