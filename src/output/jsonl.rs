#![forbid(unsafe_code)]

//! JSONL output formatter for machine-readable output
//!
//! Every line is one JSON object carrying a `type` field. Each command ends
//! its output with one `summary` record.

use crate::capability::{Capabilities, CapabilitySlot, Diagnostic};
use crate::commit::CommitViolation;
use crate::layers::{Layer, ResolvedConfig, RuleMap};
use crate::style::StyleOptions;
use crate::types::{GlobPattern, RuleSetting};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// JSONL output formatter
pub struct JsonlFormatter;

impl JsonlFormatter {
    /// Creates a new JsonlFormatter
    pub fn new() -> Self {
        JsonlFormatter
    }

    /// One `layer` record per layer, then a summary
    pub fn format_layers<'a>(&self, layers: impl IntoIterator<Item = &'a Layer>) -> String {
        let mut output = String::new();
        let mut count = 0;
        for (index, layer) in layers.into_iter().enumerate() {
            count += 1;
            push(
                &mut output,
                &LayerRecord {
                    record_type: "layer",
                    position: index,
                    name: &layer.name,
                    kind: layer.kind.as_str(),
                    files: &layer.patterns,
                    ignores: &layer.exclude_patterns,
                    plugins: layer.bindings.plugins.keys().map(String::as_str).collect(),
                    parser: layer.bindings.parser.as_ref().map(|p| p.name.as_str()),
                    rules: by_name(&layer.settings),
                },
            );
        }
        push(&mut output, &Summary::new().count("layers", count));
        output
    }

    /// One `capability` record per declared capability, then a summary
    pub fn format_capabilities(&self, capabilities: &Capabilities) -> String {
        let mut output = String::new();
        let mut absent = 0;
        for (spec, slot) in capabilities.iter() {
            let handle = slot.handle();
            if matches!(slot, CapabilitySlot::Absent) {
                absent += 1;
            }
            push(
                &mut output,
                &CapabilityRecord {
                    record_type: "capability",
                    name: &spec.name,
                    role: spec.role.to_string(),
                    namespace: spec.namespace(),
                    loaded: handle.is_some(),
                    version: handle.and_then(|h| h.version.as_deref()),
                },
            );
        }
        push(
            &mut output,
            &Summary::new()
                .count("declared", capabilities.len())
                .count("absent", absent),
        );
        output
    }

    /// One `resolved` record per file, then a summary
    pub fn format_resolved(&self, configs: &[ResolvedConfig]) -> String {
        let mut output = String::new();
        for config in configs {
            push(
                &mut output,
                &ResolvedRecord {
                    record_type: "resolved",
                    file: &config.path,
                    ignored: config.ignored,
                    layers: &config.applied,
                    plugins: config.plugins.iter().map(String::as_str).collect(),
                    parser: config.parser.as_deref(),
                    rules: by_name(&config.rules),
                },
            );
        }
        let ignored = configs.iter().filter(|c| c.ignored).count();
        push(
            &mut output,
            &Summary::new()
                .count("files", configs.len())
                .count("ignored", ignored),
        );
        output
    }

    /// One `style` record per file, then a summary
    pub fn format_styles(&self, styles: &[(String, StyleOptions)]) -> String {
        let mut output = String::new();
        for (file, options) in styles {
            push(
                &mut output,
                &StyleRecord {
                    record_type: "style",
                    file,
                    options,
                },
            );
        }
        push(&mut output, &Summary::new().count("files", styles.len()));
        output
    }

    /// One `violation` record per failed rule, then a summary
    pub fn format_commit(&self, header: &str, violations: &[CommitViolation]) -> String {
        let mut output = String::new();
        for violation in violations {
            push(
                &mut output,
                &ViolationRecord {
                    record_type: "violation",
                    violation,
                },
            );
        }
        let mut summary = Summary::new().count("violations", violations.len());
        summary.fields.insert("header", Value::from(header));
        summary.fields.insert("passed", Value::from(violations.is_empty()));
        push(&mut output, &summary);
        output
    }

    /// One `warning` record per diagnostic
    pub fn format_diagnostics(&self, diagnostics: &[Diagnostic]) -> String {
        let mut output = String::new();
        for diagnostic in diagnostics {
            push(
                &mut output,
                &WarningRecord {
                    record_type: "warning",
                    message: diagnostic.to_string(),
                    diagnostic,
                },
            );
        }
        output
    }
}

impl Default for JsonlFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn push<T: Serialize>(output: &mut String, record: &T) {
    if let Ok(json) = serde_json::to_string(record) {
        output.push_str(&json);
        output.push('\n');
    }
}

fn by_name(rules: &RuleMap) -> BTreeMap<&str, &RuleSetting> {
    rules.iter().map(|(k, v)| (k.as_str(), v)).collect()
}

#[derive(Debug, Serialize)]
struct LayerRecord<'a> {
    #[serde(rename = "type")]
    record_type: &'static str,
    position: usize,
    name: &'a str,
    kind: &'static str,
    files: &'a [GlobPattern],
    ignores: &'a [GlobPattern],
    plugins: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parser: Option<&'a str>,
    rules: BTreeMap<&'a str, &'a RuleSetting>,
}

#[derive(Debug, Serialize)]
struct CapabilityRecord<'a> {
    #[serde(rename = "type")]
    record_type: &'static str,
    name: &'a str,
    role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    namespace: Option<&'a str>,
    loaded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct ResolvedRecord<'a> {
    #[serde(rename = "type")]
    record_type: &'static str,
    file: &'a str,
    ignored: bool,
    layers: &'a [String],
    plugins: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parser: Option<&'a str>,
    rules: BTreeMap<&'a str, &'a RuleSetting>,
}

#[derive(Debug, Serialize)]
struct StyleRecord<'a> {
    #[serde(rename = "type")]
    record_type: &'static str,
    file: &'a str,
    options: &'a StyleOptions,
}

#[derive(Debug, Serialize)]
struct ViolationRecord<'a> {
    #[serde(rename = "type")]
    record_type: &'static str,
    #[serde(flatten)]
    violation: &'a CommitViolation,
}

#[derive(Debug, Serialize)]
struct WarningRecord<'a> {
    #[serde(rename = "type")]
    record_type: &'static str,
    message: String,
    #[serde(flatten)]
    diagnostic: &'a Diagnostic,
}

#[derive(Debug, Serialize)]
struct Summary {
    #[serde(rename = "type")]
    record_type: &'static str,
    #[serde(flatten)]
    fields: BTreeMap<&'static str, Value>,
}

impl Summary {
    fn new() -> Self {
        Self {
            record_type: "summary",
            fields: BTreeMap::new(),
        }
    }

    fn count(mut self, name: &'static str, value: usize) -> Self {
        self.fields.insert(name, Value::from(value));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{Capability, CapabilitySpec};
    use crate::layers::{LayerKind, LayerStack};
    use crate::types::{RuleKey, Severity};
    use std::sync::Arc;

    fn lines(output: &str) -> Vec<Value> {
        output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    fn stack() -> LayerStack {
        let mut ts = Layer::new("base/typescript", LayerKind::Language);
        ts.patterns = vec![GlobPattern::new("**/*.ts")];
        ts.settings.insert(
            RuleKey::new("max-params").unwrap(),
            RuleSetting::with_options(Severity::Warn, [serde_json::json!(4)]),
        );
        LayerStack::compile(vec![Layer::global_ignores("base/ignores", ["dist/**"]), ts]).unwrap()
    }

    #[test]
    fn test_format_layers() {
        let records = lines(&JsonlFormatter::new().format_layers(stack().layers()));
        assert_eq!(records.len(), 3);
        assert_eq!(records[0]["type"], "layer");
        assert_eq!(records[0]["kind"], "global-ignore");
        assert_eq!(records[0]["ignores"][0], "dist/**");
        assert_eq!(records[1]["rules"]["max-params"], serde_json::json!(["warn", 4]));
        assert_eq!(records[2]["type"], "summary");
        assert_eq!(records[2]["layers"], 2);
    }

    #[test]
    fn test_format_resolved() {
        let stack = stack();
        let configs = vec![stack.resolve("src/a.ts"), stack.resolve("dist/b.ts")];
        let records = lines(&JsonlFormatter::new().format_resolved(&configs));

        assert_eq!(records[0]["file"], "src/a.ts");
        assert_eq!(records[0]["ignored"], false);
        assert_eq!(records[0]["layers"][0], "base/typescript");
        assert_eq!(records[1]["ignored"], true);
        assert_eq!(records[1]["rules"], serde_json::json!({}));
        assert_eq!(records[2]["files"], 2);
        assert_eq!(records[2]["ignored"], 1);
    }

    #[test]
    fn test_format_capabilities() {
        let spec = CapabilitySpec::parser("@typescript-eslint/parser");
        let mut caps = Capabilities::new();
        caps.insert(
            spec.clone(),
            CapabilitySlot::Loaded(Arc::new(Capability::for_spec(&spec))),
        );
        caps.insert(CapabilitySpec::plugin("node-checks", "node-checks"), CapabilitySlot::Absent);

        let records = lines(&JsonlFormatter::new().format_capabilities(&caps));
        assert_eq!(records[0]["name"], "@typescript-eslint/parser");
        assert_eq!(records[0]["loaded"], true);
        assert!(records[0].get("namespace").is_none());
        assert_eq!(records[1]["namespace"], "node-checks");
        assert_eq!(records[1]["loaded"], false);
        assert_eq!(records[2]["absent"], 1);
    }

    #[test]
    fn test_format_commit() {
        let violations = vec![CommitViolation {
            rule: "subject-full-stop",
            severity: Severity::Error,
            message: "subject may not end with full stop".to_string(),
        }];
        let records = lines(&JsonlFormatter::new().format_commit("fix: x.", &violations));
        assert_eq!(records[0]["type"], "violation");
        assert_eq!(records[0]["rule"], "subject-full-stop");
        assert_eq!(records[0]["severity"], "error");
        assert_eq!(records[1]["passed"], false);
        assert_eq!(records[1]["header"], "fix: x.");
    }

    #[test]
    fn test_format_diagnostics() {
        let diagnostics = vec![Diagnostic {
            capability: "node-checks".to_string(),
            guidance: "Refer to the README.".to_string(),
            cause: Some("node-checks is not installed".to_string()),
        }];
        let records = lines(&JsonlFormatter::new().format_diagnostics(&diagnostics));
        assert_eq!(records[0]["type"], "warning");
        assert_eq!(records[0]["capability"], "node-checks");
        assert_eq!(records[0]["message"], "node-checks not found. Refer to the README.");
    }
}
