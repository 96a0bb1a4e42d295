#![forbid(unsafe_code)]

//! Server flavor: Node.js services and APIs

use super::base::{self, TYPESCRIPT_PLUGIN};
use crate::capability::CapabilitySpec;
use crate::layers::{LanguageOptions, Layer, LayerComposer, LayerKind, RuleTable};
use crate::types::RuleSetting;

pub const NODE_CHECKS: &str = "node-checks";

const SERVICE_FILES: [&str; 6] = [
    "**/*.service.ts",
    "**/*.route.ts",
    "**/*.middleware.ts",
    "**/*.tool.ts",
    "**/*.util.ts",
    "**/*.helper.ts",
];

pub fn capabilities() -> Vec<CapabilitySpec> {
    let mut specs = base::capabilities();
    specs.push(CapabilitySpec::plugin(NODE_CHECKS, NODE_CHECKS));
    specs
}

fn server_rules() -> RuleTable {
    vec![
        ("no-process-exit", RuleSetting::off()),
        ("no-console", RuleSetting::off()),
        ("no-sync", RuleSetting::error()),
        ("no-path-concat", RuleSetting::error()),
        ("no-new-require", RuleSetting::error()),
        ("no-mixed-requires", RuleSetting::error()),
        ("no-process-env", RuleSetting::warn()),
        ("no-global-assign", RuleSetting::error()),
        ("no-implied-eval", RuleSetting::error()),
        ("no-eval", RuleSetting::error()),
    ]
}

fn typed_server_rules() -> RuleTable {
    vec![
        ("@typescript-eslint/no-floating-promises", RuleSetting::error()),
        ("@typescript-eslint/await-thenable", RuleSetting::error()),
        ("@typescript-eslint/no-misused-promises", RuleSetting::error()),
        ("@typescript-eslint/require-await", RuleSetting::error()),
    ]
}

fn node_checks_rules() -> RuleTable {
    vec![
        ("node-checks/no-deprecated-api", RuleSetting::error()),
        ("node-checks/no-missing-import", RuleSetting::error()),
        ("node-checks/no-unpublished-import", RuleSetting::warn()),
        ("node-checks/no-unsupported-features", RuleSetting::error()),
        ("node-checks/prefer-promises", RuleSetting::warn()),
    ]
}

fn node_env_rules() -> RuleTable {
    vec![
        ("no-console", RuleSetting::off()),
        ("import/no-commonjs", RuleSetting::off()),
    ]
}

pub fn layers(composer: &LayerComposer<'_>) -> Vec<Layer> {
    let mut layers = base::layers(composer);
    layers.extend([
        composer
            .layer("server/sources", LayerKind::Language)
            .files(["**/*.ts", "**/*.js"])
            .language(LanguageOptions::modern().with_env("node"))
            .plugin(NODE_CHECKS)
            .gated(TYPESCRIPT_PLUGIN, typed_server_rules)
            .rules(server_rules())
            .gated(NODE_CHECKS, node_checks_rules)
            .rules(node_env_rules())
            .build(),
        composer
            .layer("server/services", LayerKind::Domain)
            .files(SERVICE_FILES)
            .gated(TYPESCRIPT_PLUGIN, || {
                vec![("@typescript-eslint/prefer-readonly", RuleSetting::error())]
            })
            .build(),
        base::extended_tooling_layer(composer, "server/tooling"),
    ]);
    layers
}
