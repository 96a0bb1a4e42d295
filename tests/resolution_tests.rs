//! Integration tests for per-file resolution against the built-in flavors
//!
//! These cover the behaviors a consuming project relies on: later layers
//! win, global ignores are absolute, and missing capabilities only remove
//! the rules that depend on them.

mod common;

use common::{full, loader_without};
use lintstack::flavors::{self, base, server};
use lintstack::layers::{Layer, LayerKind, LayerStack};
use lintstack::types::{GlobPattern, RuleKey};
use lintstack::{Flavor, RuleSetting, Severity, SharedConfig};
use serde_json::json;

fn layer(name: &str, files: &[&str], ignores: &[&str], rules: &[(&str, RuleSetting)]) -> Layer {
    let mut layer = Layer::new(name, LayerKind::Domain);
    layer.patterns = files.iter().map(|p| GlobPattern::new(*p)).collect();
    layer.exclude_patterns = ignores.iter().map(|p| GlobPattern::new(*p)).collect();
    for (key, setting) in rules {
        layer
            .settings
            .insert(RuleKey::new(*key).unwrap(), setting.clone());
    }
    layer
}

#[test]
fn test_test_file_turns_console_off() {
    let stack = LayerStack::compile(vec![
        layer("base", &["**/*.ts"], &[], &[("no-console", RuleSetting::warn())]),
        layer("tests", &["*.test.ts"], &[], &[("no-console", RuleSetting::off())]),
    ])
    .unwrap();

    let resolved = stack.resolve("foo.test.ts");
    assert_eq!(resolved.rule("no-console"), Some(&RuleSetting::off()));
}

#[test]
fn test_base_flavor_test_file() {
    let shared = full(Flavor::Base);
    let resolved = shared.stack.resolve("foo.test.ts");

    assert_eq!(resolved.rule("no-console"), Some(&RuleSetting::off()));
    assert_eq!(
        resolved.rule("@typescript-eslint/no-explicit-any"),
        Some(&RuleSetting::off())
    );
    assert_eq!(
        resolved.rule("max-lines-per-function"),
        Some(&RuleSetting::off())
    );
    assert_eq!(resolved.applied, vec!["base/typescript", "base/tests"]);
    let language = resolved.language.as_ref().unwrap();
    assert!(language.env.iter().any(|env| env == "jest"));
}

#[test]
fn test_tooling_config_disables_default_export_rule() {
    let shared = full(Flavor::Base);
    let resolved = shared.stack.resolve("eslint-config/index.js");

    assert_eq!(
        resolved.rule("import/no-default-export"),
        Some(&RuleSetting::off())
    );
    assert_eq!(resolved.rule("import/extensions"), Some(&RuleSetting::off()));
    assert_eq!(resolved.applied.last().map(String::as_str), Some("base/tooling"));

    // The general JavaScript layer set it first
    let plain = shared.stack.resolve("src/index.js");
    assert_eq!(
        plain.rule("import/no-default-export"),
        Some(&RuleSetting::warn())
    );
}

#[test]
fn test_server_without_node_checks() {
    let loader = loader_without(Flavor::Server, &[server::NODE_CHECKS]);
    let shared = SharedConfig::build(Flavor::Server, &loader, &[]).unwrap();

    for layer in shared.stack.layers() {
        assert!(!layer.bindings.contains(server::NODE_CHECKS));
        assert!(
            layer
                .settings
                .keys()
                .all(|key| !key.is_qualified_by("node-checks")),
            "layer {} contributes node-checks rules",
            layer.name
        );
    }

    let entries = loader.diagnostics().entries();
    assert_eq!(entries.len(), 1);
    assert!(entries[0].to_string().starts_with("node-checks not found."));

    // Everything else still applies
    let resolved = shared.stack.resolve("src/api/users.service.ts");
    assert_eq!(resolved.rule("no-sync"), Some(&RuleSetting::error()));
    assert_eq!(
        resolved.rule("@typescript-eslint/prefer-readonly"),
        Some(&RuleSetting::error())
    );
}

#[test]
fn test_server_with_node_checks() {
    let shared = full(Flavor::Server);
    let resolved = shared.stack.resolve("src/index.ts");

    assert_eq!(
        resolved.rule("node-checks/no-deprecated-api"),
        Some(&RuleSetting::error())
    );
    assert!(resolved.plugins.contains("node-checks"));
    assert_eq!(resolved.rule("no-console"), Some(&RuleSetting::off()));
}

#[test]
fn test_every_missing_capability_is_inert() {
    for flavor in Flavor::all() {
        for spec in flavors::capabilities(flavor) {
            let loader = loader_without(flavor, &[spec.name.as_str()]);
            let shared = SharedConfig::build(flavor, &loader, &[]).unwrap();

            assert_eq!(loader.diagnostics().count_for(&spec.name), 1);
            assert_eq!(loader.diagnostics().len(), 1);
            for layer in shared.stack.layers() {
                assert!(!layer.bindings.contains(&spec.name));
                if let Some(namespace) = spec.namespace() {
                    assert!(layer.settings.keys().all(|k| !k.is_qualified_by(namespace)));
                }
            }
        }
    }
}

#[test]
fn test_missing_parser_removes_binding_only() {
    let loader = loader_without(Flavor::Base, &[base::TYPESCRIPT_PARSER]);
    let shared = SharedConfig::build(Flavor::Base, &loader, &[]).unwrap();

    let resolved = shared.stack.resolve("src/index.ts");
    assert_eq!(resolved.parser, None);
    assert_eq!(
        resolved.rule("@typescript-eslint/no-explicit-any"),
        Some(&RuleSetting::error())
    );
}

#[test]
fn test_global_ignores_are_absolute() {
    let shared = full(Flavor::Ui);
    for path in ["node_modules/react/index.js", "dist/app.js", ".next/server/page.js", "types.d.ts"] {
        let resolved = shared.stack.resolve(path);
        assert!(resolved.ignored, "{} should be ignored", path);
        assert!(resolved.rules.is_empty());
        assert!(resolved.applied.is_empty());
    }
}

#[test]
fn test_layer_local_ignores() {
    let shared = full(Flavor::Ui);

    let component = shared.stack.resolve("src/components/Button.tsx");
    assert!(component.applied.iter().any(|name| name == "ui/react"));
    assert_eq!(
        component.rule("react-hooks/rules-of-hooks"),
        Some(&RuleSetting::error())
    );

    let config = shared.stack.resolve("next.config.js");
    assert!(!config.ignored);
    assert!(!config.applied.iter().any(|name| name == "ui/react"));
}

#[test]
fn test_ui_degrades_without_plugins() {
    let loader = loader_without(
        Flavor::Ui,
        &[
            "eslint-plugin-react",
            "eslint-plugin-react-hooks",
            "eslint-plugin-jsx-a11y",
            "@next/eslint-plugin-next",
        ],
    );
    let shared = SharedConfig::build(Flavor::Ui, &loader, &[]).unwrap();

    let resolved = shared.stack.resolve("src/components/Button.tsx");
    assert!(resolved.rules.keys().all(|k| {
        !["react", "react-hooks", "jsx-a11y", "@next/next"]
            .iter()
            .any(|ns| k.is_qualified_by(ns))
    }));
    assert_eq!(resolved.rule("no-debugger"), Some(&RuleSetting::error()));
    assert!(
        loader
            .diagnostics()
            .entries()
            .iter()
            .all(|d| d.to_string().ends_with("Related rules will be disabled."))
    );
}

#[test]
fn test_ui_missing_base_plugin_keeps_install_hint() {
    let loader = loader_without(Flavor::Ui, &["@typescript-eslint/eslint-plugin"]);
    let _shared = SharedConfig::build(Flavor::Ui, &loader, &[]).unwrap();

    let entries = loader.diagnostics().entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(
        entries[0].to_string(),
        format!(
            "@typescript-eslint/eslint-plugin not found. {}",
            lintstack::capability::DEFAULT_GUIDANCE
        )
    );
}

#[test]
fn test_option_values_are_replaced_not_merged() {
    let shared = full(Flavor::DataProcessing);
    let resolved = shared.stack.resolve("src/embedding.service.ts");

    assert_eq!(
        resolved.rule("max-lines-per-function"),
        Some(&RuleSetting::with_options(Severity::Warn, [json!(150)]))
    );
}

#[test]
fn test_resolution_is_deterministic() {
    for flavor in Flavor::all() {
        let first = full(flavor);
        let second = full(flavor);
        for path in ["src/a.ts", "src/a.test.ts", "scripts/seed.js", "app/page.tsx"] {
            let resolved = first.stack.resolve(path);
            assert_eq!(resolved, first.stack.resolve(path));
            assert_eq!(resolved, second.stack.resolve(path));
        }
    }
}

#[test]
fn test_stack_is_shareable_across_threads() {
    let shared = std::sync::Arc::new(full(Flavor::Server));
    let expected = shared.stack.resolve("src/index.ts");

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let shared = std::sync::Arc::clone(&shared);
            std::thread::spawn(move || shared.stack.resolve("src/index.ts"))
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
