#![forbid(unsafe_code)]

//! Data processing flavor: ML pipelines, embeddings and retrieval systems

use super::base::{self, TYPESCRIPT_PLUGIN};
use crate::capability::CapabilitySpec;
use crate::layers::{LanguageOptions, Layer, LayerComposer, LayerKind, RuleTable};
use crate::types::{RuleSetting, Severity};
use serde_json::json;

const DOMAIN_FILES: [&str; 7] = [
    "**/*.service.ts",
    "**/*.processor.ts",
    "**/*.embedding.ts",
    "**/*.pipeline.ts",
    "**/*.chunk.ts",
    "**/*.vector.ts",
    "**/*.rag.ts",
];

pub fn capabilities() -> Vec<CapabilitySpec> {
    base::capabilities()
}

fn data_processing_rules() -> RuleTable {
    vec![
        ("no-console", RuleSetting::off()),
        ("no-process-exit", RuleSetting::off()),
        ("no-await-in-loop", RuleSetting::off()),
        (
            "max-lines-per-function",
            RuleSetting::with_options(Severity::Warn, [json!(100)]),
        ),
        ("max-params", RuleSetting::with_options(Severity::Warn, [json!(6)])),
    ]
}

fn typed_data_processing_rules() -> RuleTable {
    vec![
        ("@typescript-eslint/no-explicit-any", RuleSetting::warn()),
        ("@typescript-eslint/no-non-null-assertion", RuleSetting::off()),
        ("@typescript-eslint/no-floating-promises", RuleSetting::error()),
        ("@typescript-eslint/await-thenable", RuleSetting::error()),
        ("@typescript-eslint/no-misused-promises", RuleSetting::error()),
        ("@typescript-eslint/require-await", RuleSetting::error()),
    ]
}

pub fn layers(composer: &LayerComposer<'_>) -> Vec<Layer> {
    let mut layers = base::layers(composer);
    layers.extend([
        composer
            .layer("data-processing/sources", LayerKind::Language)
            .files(["**/*.ts", "**/*.js"])
            .language(LanguageOptions::modern())
            .gated(TYPESCRIPT_PLUGIN, typed_data_processing_rules)
            .rules(data_processing_rules())
            .build(),
        composer
            .layer("data-processing/pipelines", LayerKind::Domain)
            .files(DOMAIN_FILES)
            .rules(vec![
                ("no-console", RuleSetting::off()),
                ("no-process-exit", RuleSetting::off()),
                (
                    "max-lines-per-function",
                    RuleSetting::with_options(Severity::Warn, [json!(150)]),
                ),
            ])
            .build(),
        composer
            .layer("data-processing/scripts", LayerKind::Domain)
            .files(["scripts/**/*.ts", "scripts/**/*.js"])
            .rules(vec![
                ("no-console", RuleSetting::off()),
                ("no-process-exit", RuleSetting::off()),
                ("max-lines-per-function", RuleSetting::off()),
            ])
            .build(),
        base::extended_tooling_layer(composer, "data-processing/tooling"),
    ]);
    layers
}
