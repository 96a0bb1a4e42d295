#![forbid(unsafe_code)]

//! Shared formatter style
//!
//! The formatter itself is external; this module only decides which options
//! it should use for a file. Overrides are folded in order over the base
//! options, later overrides winning.

use crate::error::ConfigError;
use crate::layers::matcher::{PatternSet, normalize_path};
use crate::types::GlobPattern;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrailingComma {
    All,
    Es5,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrowParens {
    Always,
    Avoid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProseWrap {
    Always,
    Never,
    Preserve,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HtmlWhitespaceSensitivity {
    Css,
    Strict,
    Ignore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuoteProps {
    AsNeeded,
    Consistent,
    Preserve,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndOfLine {
    Lf,
    Crlf,
    Cr,
    Auto,
}

/// Fully resolved formatter options for one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleOptions {
    pub print_width: u16,
    pub tab_width: u8,
    pub use_tabs: bool,
    pub semi: bool,
    pub single_quote: bool,
    pub jsx_single_quote: bool,
    pub trailing_comma: TrailingComma,
    pub bracket_spacing: bool,
    pub bracket_same_line: bool,
    pub arrow_parens: ArrowParens,
    pub prose_wrap: ProseWrap,
    pub html_whitespace_sensitivity: HtmlWhitespaceSensitivity,
    pub quote_props: QuoteProps,
    pub end_of_line: EndOfLine,
    pub plugins: Vec<String>,
    pub tailwind_functions: Vec<String>,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            print_width: 80,
            tab_width: 2,
            use_tabs: false,
            semi: true,
            single_quote: true,
            jsx_single_quote: false,
            trailing_comma: TrailingComma::All,
            bracket_spacing: true,
            bracket_same_line: false,
            arrow_parens: ArrowParens::Always,
            prose_wrap: ProseWrap::Preserve,
            html_whitespace_sensitivity: HtmlWhitespaceSensitivity::Css,
            quote_props: QuoteProps::AsNeeded,
            end_of_line: EndOfLine::Lf,
            plugins: vec!["prettier-plugin-tailwindcss".to_string()],
            tailwind_functions: vec!["clsx".to_string(), "cn".to_string(), "tw".to_string()],
        }
    }
}

/// Options an override replaces; unset fields keep the inherited value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StylePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub print_width: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tab_width: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_tabs: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semi: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub single_quote: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trailing_comma: Option<TrailingComma>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prose_wrap: Option<ProseWrap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_of_line: Option<EndOfLine>,
}

impl StylePatch {
    fn apply(&self, options: &mut StyleOptions) {
        if let Some(v) = self.print_width {
            options.print_width = v;
        }
        if let Some(v) = self.tab_width {
            options.tab_width = v;
        }
        if let Some(v) = self.use_tabs {
            options.use_tabs = v;
        }
        if let Some(v) = self.semi {
            options.semi = v;
        }
        if let Some(v) = self.single_quote {
            options.single_quote = v;
        }
        if let Some(v) = self.trailing_comma {
            options.trailing_comma = v;
        }
        if let Some(v) = self.prose_wrap {
            options.prose_wrap = v;
        }
        if let Some(v) = self.end_of_line {
            options.end_of_line = v;
        }
    }
}

/// Patch applied to files matching any of `files`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleOverride {
    pub files: Vec<GlobPattern>,
    pub options: StylePatch,
}

impl StyleOverride {
    pub fn new<I, P>(files: I, options: StylePatch) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<GlobPattern>,
    {
        Self {
            files: files.into_iter().map(Into::into).collect(),
            options,
        }
    }
}

/// Base formatter options plus ordered per-file overrides
#[derive(Debug, Clone)]
pub struct StyleConfig {
    base: StyleOptions,
    overrides: Vec<(StyleOverride, PatternSet)>,
}

impl StyleConfig {
    /// Compiles a style configuration
    ///
    /// Override patterns without a `/` match the file name at any depth.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidGlob` if an override pattern is malformed.
    pub fn new(base: StyleOptions, overrides: Vec<StyleOverride>) -> Result<Self, ConfigError> {
        let overrides = overrides
            .into_iter()
            .enumerate()
            .map(|(index, o)| {
                let patterns: Vec<GlobPattern> = o.files.iter().map(match_base).collect();
                let set = PatternSet::compile(&format!("style override #{}", index), &patterns)?;
                Ok((o, set))
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;
        Ok(Self { base, overrides })
    }

    /// The shared style every project inherits
    pub fn shared() -> Result<Self, ConfigError> {
        let wide = StylePatch {
            print_width: Some(100),
            ..StylePatch::default()
        };
        Self::new(
            StyleOptions::default(),
            vec![
                StyleOverride::new(
                    ["*.md"],
                    StylePatch {
                        print_width: Some(100),
                        prose_wrap: Some(ProseWrap::Always),
                        ..StylePatch::default()
                    },
                ),
                StyleOverride::new(["*.json"], wide.clone()),
                StyleOverride::new(["*.css"], wide.clone()),
                StyleOverride::new(["*.html"], wide),
            ],
        )
    }

    pub fn base(&self) -> &StyleOptions {
        &self.base
    }

    pub fn overrides(&self) -> impl Iterator<Item = &StyleOverride> {
        self.overrides.iter().map(|(o, _)| o)
    }

    /// Resolves the options for one file
    pub fn resolve(&self, path: &str) -> StyleOptions {
        let path = normalize_path(path);
        let mut options = self.base.clone();
        for (o, set) in &self.overrides {
            if set.is_match(&path) {
                o.options.apply(&mut options);
            }
        }
        options
    }
}

fn match_base(pattern: &GlobPattern) -> GlobPattern {
    if pattern.as_str().contains('/') {
        pattern.clone()
    } else {
        GlobPattern::new(format!("**/{}", pattern.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shared() -> StyleConfig {
        match StyleConfig::shared() {
            Ok(style) => style,
            Err(e) => panic!("shared style failed to compile: {}", e),
        }
    }

    #[test]
    fn test_source_file_uses_base() {
        let options = shared().resolve("src/index.ts");
        assert_eq!(options, StyleOptions::default());
        assert_eq!(options.print_width, 80);
        assert!(options.single_quote);
    }

    #[test]
    fn test_markdown_override_at_any_depth() {
        let style = shared();
        for path in ["README.md", "docs/guide/intro.md", "./CHANGELOG.md"] {
            let options = style.resolve(path);
            assert_eq!(options.print_width, 100, "{}", path);
            assert_eq!(options.prose_wrap, ProseWrap::Always, "{}", path);
        }
    }

    #[test]
    fn test_json_override_keeps_prose_wrap() {
        let options = shared().resolve("package.json");
        assert_eq!(options.print_width, 100);
        assert_eq!(options.prose_wrap, ProseWrap::Preserve);
    }

    #[test]
    fn test_later_override_wins() {
        let style = StyleConfig::new(
            StyleOptions::default(),
            vec![
                StyleOverride::new(
                    ["*.ts"],
                    StylePatch {
                        tab_width: Some(4),
                        ..StylePatch::default()
                    },
                ),
                StyleOverride::new(
                    ["src/**/*.ts"],
                    StylePatch {
                        tab_width: Some(8),
                        ..StylePatch::default()
                    },
                ),
            ],
        );
        let style = match style {
            Ok(style) => style,
            Err(e) => panic!("{}", e),
        };

        assert_eq!(style.resolve("lib/a.ts").tab_width, 4);
        assert_eq!(style.resolve("src/deep/a.ts").tab_width, 8);
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(StyleOptions::default()).unwrap_or_default();
        assert_eq!(json["printWidth"], 80);
        assert_eq!(json["trailingComma"], "all");
        assert_eq!(json["quoteProps"], "as-needed");
        assert_eq!(json["tailwindFunctions"][1], "cn");
    }

    #[test]
    fn test_invalid_override_pattern() {
        let result = StyleConfig::new(
            StyleOptions::default(),
            vec![StyleOverride::new(["src/[bad"], StylePatch::default())],
        );
        assert!(matches!(result, Err(ConfigError::InvalidGlob { .. })));
    }
}
