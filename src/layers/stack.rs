#![forbid(unsafe_code)]

//! Compiled layer sequence and per-file resolution
//!
//! Resolution is a pure fold over the compiled layers: the stack is never
//! mutated after compilation, so one stack can serve any number of files
//! concurrently.

use super::layer::{LanguageOptions, Layer, RuleMap};
use super::matcher::{PatternSet, normalize_path};
use crate::error::ConfigError;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// The effective configuration for one file
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResolvedConfig {
    /// Normalized path the configuration was resolved for
    pub path: String,
    /// True if a global ignore layer excluded the file
    pub ignored: bool,
    /// Final rule settings after all applicable layers were overlaid
    pub rules: RuleMap,
    /// Names of the layers that applied, in sequence order
    pub applied: Vec<String>,
    /// Plugin namespaces bound by applicable layers
    pub plugins: BTreeSet<String>,
    /// Parser bound by the last applicable layer that binds one
    pub parser: Option<String>,
    pub language: Option<LanguageOptions>,
    pub plugin_settings: BTreeMap<String, Value>,
}

impl ResolvedConfig {
    /// Returns the final setting for a rule key
    pub fn rule(&self, key: &str) -> Option<&crate::types::RuleSetting> {
        crate::types::RuleKey::new(key).and_then(|key| self.rules.get(&key))
    }
}

#[derive(Debug, Clone)]
struct CompiledLayer {
    layer: Layer,
    include: PatternSet,
    exclude: PatternSet,
}

impl CompiledLayer {
    fn applies_to(&self, path: &str) -> bool {
        if self.exclude.is_match(path) {
            return false;
        }
        self.include.is_empty() || self.include.is_match(path)
    }
}

/// An ordered, compiled, immutable sequence of layers
#[derive(Debug, Clone)]
pub struct LayerStack {
    layers: Vec<CompiledLayer>,
}

impl LayerStack {
    /// Compiles every layer's patterns
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidGlob` if any pattern is malformed.
    pub fn compile(layers: Vec<Layer>) -> Result<Self, ConfigError> {
        let layers = layers
            .into_iter()
            .map(|layer| {
                let include = PatternSet::compile(&layer.name, &layer.patterns)?;
                let exclude = PatternSet::compile(&layer.name, &layer.exclude_patterns)?;
                Ok(CompiledLayer {
                    layer,
                    include,
                    exclude,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(Self { layers })
    }

    /// Layers in sequence order
    pub fn layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter().map(|compiled| &compiled.layer)
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Returns true if a global ignore layer excludes the path
    pub fn is_ignored(&self, path: &str) -> bool {
        let path = normalize_path(path);
        self.is_ignored_normalized(&path)
    }

    fn is_ignored_normalized(&self, path: &str) -> bool {
        self.layers
            .iter()
            .any(|compiled| compiled.layer.is_global_ignore() && compiled.exclude.is_match(path))
    }

    /// Layers that apply to the path, in sequence order
    ///
    /// Global ignore layers never apply; they only exclude.
    pub fn applicable(&self, path: &str) -> Vec<&Layer> {
        let path = normalize_path(path);
        if self.is_ignored_normalized(&path) {
            return Vec::new();
        }
        self.layers
            .iter()
            .filter(|compiled| !compiled.layer.is_global_ignore() && compiled.applies_to(&path))
            .map(|compiled| &compiled.layer)
            .collect()
    }

    /// Resolves the effective configuration for one file
    ///
    /// Applicable layers are overlaid in sequence order. A later layer's value
    /// for a rule key replaces the earlier value wholesale; option objects are
    /// not merged.
    pub fn resolve(&self, path: &str) -> ResolvedConfig {
        let normalized = normalize_path(path);
        let mut resolved = ResolvedConfig {
            path: normalized.clone(),
            ..ResolvedConfig::default()
        };

        if self.is_ignored_normalized(&normalized) {
            resolved.ignored = true;
            return resolved;
        }

        for compiled in &self.layers {
            if compiled.layer.is_global_ignore() || !compiled.applies_to(&normalized) {
                continue;
            }
            let layer = &compiled.layer;

            for (key, setting) in &layer.settings {
                resolved.rules.insert(key.clone(), setting.clone());
            }
            resolved.plugins.extend(layer.bindings.plugins.keys().cloned());
            if let Some(parser) = &layer.bindings.parser {
                resolved.parser = Some(parser.name.clone());
            }
            if let Some(language) = &layer.language {
                resolved
                    .language
                    .get_or_insert_with(LanguageOptions::default)
                    .overlay(language);
            }
            for (name, value) in &layer.plugin_settings {
                resolved.plugin_settings.insert(name.clone(), value.clone());
            }
            resolved.applied.push(layer.name.clone());
        }

        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::LayerKind;
    use crate::types::{GlobPattern, RuleKey, RuleSetting};

    fn layer(name: &str, files: &[&str], ignores: &[&str], rules: &[(&str, RuleSetting)]) -> Layer {
        let mut layer = Layer::new(name, LayerKind::Language);
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
    fn test_later_layer_wins() {
        let stack = LayerStack::compile(vec![
            layer("base", &["**/*.ts"], &[], &[("no-console", RuleSetting::warn())]),
            layer("tests", &["*.test.ts"], &[], &[("no-console", RuleSetting::off())]),
        ])
        .unwrap();

        let resolved = stack.resolve("foo.test.ts");
        assert_eq!(resolved.rule("no-console"), Some(&RuleSetting::off()));
        assert_eq!(resolved.applied, vec!["base", "tests"]);

        let resolved = stack.resolve("src/foo.ts");
        assert_eq!(resolved.rule("no-console"), Some(&RuleSetting::warn()));
    }

    #[test]
    fn test_exclusion_beats_inclusion() {
        let stack = LayerStack::compile(vec![layer(
            "react",
            &["**/*.js"],
            &["**/*.config.js"],
            &[("react/jsx-key", RuleSetting::error())],
        )])
        .unwrap();

        assert!(stack.resolve("webpack.config.js").rules.is_empty());
        assert_eq!(stack.resolve("src/app.js").rules.len(), 1);
    }

    #[test]
    fn test_global_ignore_excludes_file() {
        let stack = LayerStack::compile(vec![
            Layer::global_ignores("ignores", ["dist/**"]),
            layer("all", &[], &[], &[("eqeqeq", RuleSetting::error())]),
        ])
        .unwrap();

        let resolved = stack.resolve("dist/bundle.js");
        assert!(resolved.ignored);
        assert!(resolved.rules.is_empty());
        assert!(stack.is_ignored("./dist/bundle.js"));
        assert!(stack.applicable("dist/bundle.js").is_empty());

        let resolved = stack.resolve("src/index.js");
        assert!(!resolved.ignored);
        assert_eq!(resolved.applied, vec!["all"]);
    }

    #[test]
    fn test_unmatched_file_is_empty() {
        let stack = LayerStack::compile(vec![layer(
            "ts",
            &["**/*.ts"],
            &[],
            &[("eqeqeq", RuleSetting::error())],
        )])
        .unwrap();

        let resolved = stack.resolve("README.md");
        assert!(!resolved.ignored);
        assert!(resolved.rules.is_empty());
        assert!(resolved.applied.is_empty());
    }

    #[test]
    fn test_option_objects_replaced_not_merged() {
        use crate::types::Severity;
        use serde_json::json;

        let stack = LayerStack::compile(vec![
            layer(
                "base",
                &[],
                &[],
                &[(
                    "max-len",
                    RuleSetting::with_options(Severity::Warn, [json!({ "code": 100, "ignoreUrls": true })]),
                )],
            ),
            layer(
                "override",
                &[],
                &[],
                &[(
                    "max-len",
                    RuleSetting::with_options(Severity::Warn, [json!({ "code": 120 })]),
                )],
            ),
        ])
        .unwrap();

        let resolved = stack.resolve("a.js");
        assert_eq!(
            resolved.rule("max-len").unwrap().options(),
            &[json!({ "code": 120 })]
        );
    }

    #[test]
    fn test_invalid_pattern_fails_compile() {
        let result = LayerStack::compile(vec![layer("bad", &["[oops"], &[], &[])]);
        assert!(result.is_err());
    }

    #[test]
    fn test_stack_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LayerStack>();
    }
}
