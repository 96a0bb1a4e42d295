#![forbid(unsafe_code)]

//! Human-readable output formatter
//!
//! Writes into a termcolor buffer so the same code path renders with or
//! without ANSI colors.

use crate::capability::{Capabilities, CapabilitySlot, Diagnostic};
use crate::commit::CommitViolation;
use crate::layers::{Layer, ResolvedConfig};
use crate::style::StyleOptions;
use crate::types::Severity;
use std::io::Write;
use termcolor::{Buffer, Color, ColorSpec, WriteColor};

/// Human-readable formatter
pub struct HumanFormatter {
    color: bool,
}

impl HumanFormatter {
    /// Creates a formatter; `color` enables ANSI escapes
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn buffer(&self) -> Buffer {
        if self.color {
            Buffer::ansi()
        } else {
            Buffer::no_color()
        }
    }

    /// Formats the composed layer sequence
    pub fn format_layers<'a>(&self, layers: impl IntoIterator<Item = &'a Layer>) -> String {
        let mut buf = self.buffer();
        let mut count = 0;
        for (index, layer) in layers.into_iter().enumerate() {
            count += 1;
            let _ = write!(buf, "{:>3}. ", index + 1);
            paint(&mut buf, Some(Color::Cyan), true, &layer.name);
            let _ = writeln!(buf, " ({})", layer.kind.as_str());

            if layer.patterns.is_empty() {
                let _ = writeln!(buf, "     files: (all)");
            } else {
                let _ = writeln!(buf, "     files: {}", join(&layer.patterns));
            }
            if !layer.exclude_patterns.is_empty() {
                let label = if layer.is_global_ignore() {
                    "ignores (global)"
                } else {
                    "ignores"
                };
                let _ = writeln!(buf, "     {}: {}", label, join(&layer.exclude_patterns));
            }
            if !layer.bindings.is_empty() {
                let mut bound: Vec<String> = layer.bindings.plugins.keys().cloned().collect();
                if let Some(parser) = &layer.bindings.parser {
                    bound.push(format!("parser {}", parser.name));
                }
                let _ = writeln!(buf, "     bindings: {}", bound.join(", "));
            }
            if !layer.settings.is_empty() {
                let _ = writeln!(buf, "     rules: {}", layer.settings.len());
            }
        }
        let _ = writeln!(buf);
        let _ = writeln!(buf, "{} layers", count);
        into_string(buf)
    }

    /// Formats capability status
    pub fn format_capabilities(&self, capabilities: &Capabilities) -> String {
        let mut buf = self.buffer();
        let _ = writeln!(buf, "Capabilities ({} declared):", capabilities.len());
        let _ = writeln!(buf);
        for (spec, slot) in capabilities.iter() {
            match slot {
                CapabilitySlot::Loaded(handle) => {
                    paint(&mut buf, Some(Color::Green), true, "✓");
                    let _ = write!(buf, " {} ({})", spec.name, spec.role);
                    if let Some(version) = &handle.version {
                        let _ = write!(buf, " v{}", version);
                    }
                    let _ = writeln!(buf);
                }
                CapabilitySlot::Absent => {
                    paint(&mut buf, Some(Color::Yellow), true, "✗");
                    let _ = writeln!(buf, " {} ({}) not available", spec.name, spec.role);
                }
            }
        }
        into_string(buf)
    }

    /// Formats resolved configurations, one block per file
    pub fn format_resolved(&self, configs: &[ResolvedConfig]) -> String {
        let mut buf = self.buffer();
        for config in configs {
            paint(&mut buf, None, true, &config.path);
            if config.ignored {
                let _ = write!(buf, " ");
                paint(&mut buf, Some(Color::Yellow), false, "(ignored)");
                let _ = writeln!(buf);
                let _ = writeln!(buf);
                continue;
            }
            let _ = writeln!(buf);

            if config.applied.is_empty() {
                let _ = writeln!(buf, "  no layers apply");
            } else {
                let _ = writeln!(buf, "  layers: {}", config.applied.join(", "));
            }
            if let Some(parser) = &config.parser {
                let _ = writeln!(buf, "  parser: {}", parser);
            }
            if !config.plugins.is_empty() {
                let plugins: Vec<&str> = config.plugins.iter().map(String::as_str).collect();
                let _ = writeln!(buf, "  plugins: {}", plugins.join(", "));
            }
            for (key, setting) in &config.rules {
                let _ = write!(buf, "  {} ", key);
                paint(
                    &mut buf,
                    Some(severity_color(setting.severity())),
                    false,
                    &setting.to_string(),
                );
                let _ = writeln!(buf);
            }
            let _ = writeln!(buf);
        }
        into_string(buf)
    }

    /// Formats resolved formatter options, one line per file
    pub fn format_styles(&self, styles: &[(String, StyleOptions)]) -> String {
        let mut buf = self.buffer();
        for (path, options) in styles {
            paint(&mut buf, None, true, path);
            let _ = writeln!(
                buf,
                ": printWidth={} tabWidth={} semi={} singleQuote={} proseWrap={}",
                options.print_width,
                options.tab_width,
                options.semi,
                options.single_quote,
                serde_json::to_value(options.prose_wrap)
                    .ok()
                    .and_then(|v| v.as_str().map(str::to_string))
                    .unwrap_or_default(),
            );
        }
        into_string(buf)
    }

    /// Formats the outcome of a commit header check
    pub fn format_commit(&self, header: &str, violations: &[CommitViolation]) -> String {
        let mut buf = self.buffer();
        let _ = writeln!(buf, "input: {}", header);
        if violations.is_empty() {
            paint(&mut buf, Some(Color::Green), true, "✓");
            let _ = writeln!(buf, " commit header passes");
            return into_string(buf);
        }
        for violation in violations {
            paint(&mut buf, Some(Color::Red), true, "✗");
            let _ = writeln!(buf, " {}", violation);
        }
        let _ = writeln!(buf);
        let _ = writeln!(
            buf,
            "found {} problem{}",
            violations.len(),
            if violations.len() == 1 { "" } else { "s" }
        );
        into_string(buf)
    }

    /// Formats capability warnings the way they appear on stderr
    ///
    /// With `verbose`, each warning is followed by the acquisition failure.
    pub fn format_diagnostics(&self, diagnostics: &[Diagnostic], verbose: bool) -> String {
        let mut buf = self.buffer();
        for diagnostic in diagnostics {
            paint(&mut buf, Some(Color::Yellow), true, "Warning:");
            let _ = writeln!(buf, " {}", diagnostic);
            if verbose && let Some(cause) = &diagnostic.cause {
                let _ = writeln!(buf, "  cause: {}", cause);
            }
        }
        into_string(buf)
    }
}

fn paint(buf: &mut Buffer, color: Option<Color>, bold: bool, text: &str) {
    let _ = buf.set_color(ColorSpec::new().set_fg(color).set_bold(bold));
    let _ = write!(buf, "{}", text);
    let _ = buf.reset();
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Off => Color::White,
        Severity::Warn => Color::Yellow,
        Severity::Error => Color::Red,
    }
}

fn join<T: std::fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn into_string(buf: Buffer) -> String {
    String::from_utf8_lossy(&buf.into_inner()).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{Capability, CapabilitySpec};
    use crate::layers::{LayerKind, LayerStack};
    use crate::types::{GlobPattern, RuleKey, RuleSetting};
    use std::sync::Arc;

    fn stack() -> LayerStack {
        let mut ts = Layer::new("base/typescript", LayerKind::Language);
        ts.patterns = vec![GlobPattern::new("**/*.ts")];
        ts.settings
            .insert(RuleKey::new("no-console").unwrap(), RuleSetting::warn());
        ts.settings.insert(
            RuleKey::new("max-params").unwrap(),
            RuleSetting::with_options(Severity::Warn, [serde_json::json!(4)]),
        );
        LayerStack::compile(vec![Layer::global_ignores("base/ignores", ["dist/**"]), ts]).unwrap()
    }

    #[test]
    fn test_format_layers() {
        let output = HumanFormatter::new(false).format_layers(stack().layers());
        assert!(output.contains("  1. base/ignores (global-ignore)"));
        assert!(output.contains("ignores (global): dist/**"));
        assert!(output.contains("  2. base/typescript (language)"));
        assert!(output.contains("files: **/*.ts"));
        assert!(output.contains("rules: 2"));
        assert!(output.contains("2 layers"));
    }

    #[test]
    fn test_format_resolved() {
        let stack = stack();
        let configs = vec![stack.resolve("src/a.ts"), stack.resolve("dist/a.ts")];
        let output = HumanFormatter::new(false).format_resolved(&configs);

        assert!(output.contains("src/a.ts\n"));
        assert!(output.contains("  layers: base/typescript"));
        assert!(output.contains("  no-console warn"));
        assert!(output.contains("  max-params [\"warn\",4]"));
        assert!(output.contains("dist/a.ts (ignored)"));
    }

    #[test]
    fn test_no_color_has_no_escapes() {
        let output = HumanFormatter::new(false).format_resolved(&[stack().resolve("a.ts")]);
        assert!(!output.contains('\u{1b}'));

        let output = HumanFormatter::new(true).format_resolved(&[stack().resolve("a.ts")]);
        assert!(output.contains('\u{1b}'));
    }

    #[test]
    fn test_format_capabilities() {
        let loaded = CapabilitySpec::plugin("eslint-plugin-import", "import");
        let absent = CapabilitySpec::plugin("node-checks", "node-checks");
        let mut caps = Capabilities::new();
        caps.insert(
            loaded.clone(),
            CapabilitySlot::Loaded(Arc::new(Capability::for_spec(&loaded).with_version("2.29.1"))),
        );
        caps.insert(absent, CapabilitySlot::Absent);

        let output = HumanFormatter::new(false).format_capabilities(&caps);
        assert!(output.contains("Capabilities (2 declared)"));
        assert!(output.contains("✓ eslint-plugin-import (plugin 'import') v2.29.1"));
        assert!(output.contains("✗ node-checks (plugin 'node-checks') not available"));
    }

    #[test]
    fn test_format_commit() {
        let formatter = HumanFormatter::new(false);
        assert!(formatter.format_commit("feat: x", &[]).contains("✓ commit header passes"));

        let violations = vec![CommitViolation {
            rule: "type-enum",
            severity: Severity::Error,
            message: "type must be one of [feat]".to_string(),
        }];
        let output = formatter.format_commit("feature: x", &violations);
        assert!(output.contains("✗ type must be one of [feat] [type-enum]"));
        assert!(output.contains("found 1 problem\n"));
    }

    #[test]
    fn test_format_diagnostics() {
        let diagnostics = vec![Diagnostic {
            capability: "node-checks".to_string(),
            guidance: "Related rules will be disabled.".to_string(),
            cause: None,
        }];
        let output = HumanFormatter::new(false).format_diagnostics(&diagnostics, true);
        assert_eq!(output, "Warning: node-checks not found. Related rules will be disabled.\n");

        let with_cause = vec![Diagnostic {
            cause: Some("node-checks is not installed".to_string()),
            ..diagnostics[0].clone()
        }];
        let output = HumanFormatter::new(false).format_diagnostics(&with_cause, true);
        assert!(output.ends_with("  cause: node-checks is not installed\n"));
        let output = HumanFormatter::new(false).format_diagnostics(&with_cause, false);
        assert!(!output.contains("cause"));
    }
}
