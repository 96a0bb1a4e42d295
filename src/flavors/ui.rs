#![forbid(unsafe_code)]

//! UI flavor: React and Next.js applications

use super::{UI_GUIDANCE, base};
use crate::capability::CapabilitySpec;
use crate::layers::{LanguageOptions, Layer, LayerComposer, LayerKind, RuleTable};
use crate::types::{RuleSetting, Severity};
use serde_json::json;

pub const REACT_PLUGIN: &str = "eslint-plugin-react";
pub const REACT_HOOKS_PLUGIN: &str = "eslint-plugin-react-hooks";
pub const JSX_A11Y_PLUGIN: &str = "eslint-plugin-jsx-a11y";
pub const NEXT_PLUGIN: &str = "@next/eslint-plugin-next";

const COMPONENT_FILES: [&str; 6] = [
    "**/*.component.tsx",
    "**/*.component.jsx",
    "**/*.page.tsx",
    "**/*.page.jsx",
    "**/*.layout.tsx",
    "**/*.layout.jsx",
];

pub fn capabilities() -> Vec<CapabilitySpec> {
    let ui_plugins = [
        CapabilitySpec::plugin(REACT_PLUGIN, "react"),
        CapabilitySpec::plugin(REACT_HOOKS_PLUGIN, "react-hooks"),
        CapabilitySpec::plugin(JSX_A11Y_PLUGIN, "jsx-a11y"),
        CapabilitySpec::plugin(NEXT_PLUGIN, "@next/next"),
    ];
    let mut specs = base::capabilities();
    specs.extend(ui_plugins.map(|spec| spec.with_guidance(UI_GUIDANCE)));
    specs
}

fn react_rules() -> RuleTable {
    vec![
        ("react/jsx-key", RuleSetting::error()),
        ("react/jsx-no-duplicate-props", RuleSetting::error()),
        ("react/jsx-no-target-blank", RuleSetting::error()),
        ("react/jsx-no-undef", RuleSetting::error()),
        ("react/jsx-pascal-case", RuleSetting::error()),
        ("react/jsx-no-useless-fragment", RuleSetting::error()),
        (
            "react/jsx-curly-brace-presence",
            RuleSetting::with_options(
                Severity::Error,
                [json!({ "props": "never", "children": "never" })],
            ),
        ),
        (
            "react/jsx-boolean-value",
            RuleSetting::with_options(Severity::Error, [json!("never")]),
        ),
        ("react/self-closing-comp", RuleSetting::error()),
        ("react/jsx-closing-bracket-location", RuleSetting::error()),
        ("react/jsx-closing-tag-location", RuleSetting::error()),
        ("react/jsx-indent-props", RuleSetting::with_options(Severity::Error, [json!(2)])),
        ("react/jsx-indent", RuleSetting::with_options(Severity::Error, [json!(2)])),
        (
            "react/jsx-max-props-per-line",
            RuleSetting::with_options(
                Severity::Error,
                [json!({ "maximum": 1, "when": "multiline" })],
            ),
        ),
        (
            "react/jsx-first-prop-new-line",
            RuleSetting::with_options(Severity::Error, [json!("multiline")]),
        ),
        ("react/jsx-wrap-multilines", RuleSetting::error()),
        ("react/jsx-props-no-multi-spaces", RuleSetting::error()),
        ("react/jsx-props-no-spreading", RuleSetting::warn()),
        ("react/jsx-no-bind", RuleSetting::warn()),
        ("react/jsx-no-leaked-render", RuleSetting::error()),
    ]
}

fn hooks_rules() -> RuleTable {
    vec![
        ("react-hooks/rules-of-hooks", RuleSetting::error()),
        ("react-hooks/exhaustive-deps", RuleSetting::warn()),
    ]
}

fn a11y_rules() -> RuleTable {
    vec![
        ("jsx-a11y/alt-text", RuleSetting::error()),
        ("jsx-a11y/anchor-is-valid", RuleSetting::error()),
        ("jsx-a11y/click-events-have-key-events", RuleSetting::error()),
        ("jsx-a11y/html-has-lang", RuleSetting::error()),
        ("jsx-a11y/label-has-associated-control", RuleSetting::error()),
        ("jsx-a11y/no-static-element-interactions", RuleSetting::error()),
        ("jsx-a11y/aria-props", RuleSetting::error()),
        ("jsx-a11y/aria-proptypes", RuleSetting::error()),
        ("jsx-a11y/aria-unsupported-elements", RuleSetting::error()),
        ("jsx-a11y/role-has-required-aria-props", RuleSetting::error()),
        ("jsx-a11y/role-supports-aria-props", RuleSetting::error()),
        ("jsx-a11y/tabindex-no-positive", RuleSetting::error()),
        ("jsx-a11y/no-distracting-elements", RuleSetting::error()),
    ]
}

fn next_rules() -> RuleTable {
    vec![
        ("@next/next/no-html-link-for-pages", RuleSetting::error()),
        ("@next/next/no-img-element", RuleSetting::error()),
        ("@next/next/no-sync-scripts", RuleSetting::error()),
        ("@next/next/no-typos", RuleSetting::error()),
        ("@next/next/no-css-tags", RuleSetting::error()),
        ("@next/next/no-head-element", RuleSetting::error()),
        ("@next/next/no-page-custom-font", RuleSetting::error()),
        ("@next/next/no-styled-jsx-in-document", RuleSetting::error()),
        ("@next/next/no-title-in-document-head", RuleSetting::error()),
        ("@next/next/no-duplicate-head", RuleSetting::error()),
        ("@next/next/no-document-import-in-page", RuleSetting::error()),
        ("@next/next/google-font-display", RuleSetting::error()),
        ("@next/next/google-font-preconnect", RuleSetting::error()),
        ("@next/next/inline-script-id", RuleSetting::error()),
        ("@next/next/next-script-for-ga", RuleSetting::error()),
        ("@next/next/no-assign-module-variable", RuleSetting::error()),
        ("@next/next/no-async-client-component", RuleSetting::error()),
        ("@next/next/no-head-import-in-document", RuleSetting::error()),
        ("@next/next/no-script-component-in-head", RuleSetting::error()),
        ("@next/next/no-unwanted-polyfillio", RuleSetting::error()),
    ]
}

pub fn layers(composer: &LayerComposer<'_>) -> Vec<Layer> {
    let mut layers = base::layers(composer);
    layers.extend([
        composer
            .layer("ui/react", LayerKind::Language)
            .files(["**/*.ts", "**/*.tsx", "**/*.js", "**/*.jsx"])
            .ignores([
                "**/.next/**",
                "**/dist/**",
                "**/build/**",
                "**/node_modules/**",
                "**/*.config.js",
                "**/*.config.ts",
            ])
            .language(LanguageOptions::modern().with_jsx())
            .plugin(REACT_PLUGIN)
            .plugin(REACT_HOOKS_PLUGIN)
            .plugin(JSX_A11Y_PLUGIN)
            .plugin(NEXT_PLUGIN)
            .plugin_setting(REACT_PLUGIN, "react", json!({ "version": "detect" }))
            .gated(REACT_PLUGIN, react_rules)
            .gated(REACT_HOOKS_PLUGIN, hooks_rules)
            .gated(JSX_A11Y_PLUGIN, a11y_rules)
            .gated(NEXT_PLUGIN, next_rules)
            .build(),
        // Reserved for component-specific relaxations; matches but sets nothing
        composer
            .layer("ui/components", LayerKind::Domain)
            .files(COMPONENT_FILES)
            .build(),
        base::extended_tooling_layer(composer, "ui/tooling"),
    ]);
    layers
}
