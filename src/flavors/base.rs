#![forbid(unsafe_code)]

//! Base flavor: typed and plain source rules shared by every project

use crate::capability::CapabilitySpec;
use crate::layers::{LanguageOptions, Layer, LayerComposer, LayerKind, RuleTable};
use crate::types::{RuleSetting, Severity};
use serde_json::json;

pub const TYPESCRIPT_PLUGIN: &str = "@typescript-eslint/eslint-plugin";
pub const TYPESCRIPT_PARSER: &str = "@typescript-eslint/parser";
pub const IMPORT_PLUGIN: &str = "eslint-plugin-import";

const TYPED_SOURCES: [&str; 2] = ["**/*.ts", "**/*.tsx"];
const PLAIN_SOURCES: [&str; 4] = ["**/*.js", "**/*.jsx", "**/*.mjs", "**/*.cjs"];

const GLOBAL_IGNORES: [&str; 7] = [
    "node_modules/**",
    "dist/**",
    "build/**",
    ".next/**",
    "*.d.ts",
    "package-lock.json",
    "yarn.lock",
];

const TEST_FILES: [&str; 4] = ["*.test.ts", "*.test.tsx", "*.spec.ts", "*.spec.tsx"];

const TOOLING_FILES: [&str; 5] = [
    "*.config.js",
    ".prettierrc.js",
    "eslint-config/index.js",
    "eslint-config/*.js",
    "prettier/.prettierrc.js",
];

/// Tooling files recognized by the derived flavors
pub const EXTENDED_TOOLING_FILES: [&str; 12] = [
    "*.config.js",
    "*.config.ts",
    ".prettierrc.js",
    "eslint-config/*.js",
    "prettier/.prettierrc.js",
    "jest.config.js",
    "jest.config.ts",
    "webpack.config.js",
    "webpack.config.ts",
    "vite.config.ts",
    "rollup.config.js",
    "rollup.config.ts",
];

pub fn capabilities() -> Vec<CapabilitySpec> {
    vec![
        CapabilitySpec::plugin(TYPESCRIPT_PLUGIN, "@typescript-eslint"),
        CapabilitySpec::parser(TYPESCRIPT_PARSER),
        CapabilitySpec::plugin(IMPORT_PLUGIN, "import"),
    ]
}

fn typescript_rules() -> RuleTable {
    vec![
        (
            "@typescript-eslint/consistent-type-imports",
            RuleSetting::with_options(
                Severity::Error,
                [json!({ "prefer": "type-imports", "disallowTypeAnnotations": false })],
            ),
        ),
        (
            "@typescript-eslint/no-unused-vars",
            RuleSetting::with_options(
                Severity::Error,
                [json!({
                    "argsIgnorePattern": "^_",
                    "varsIgnorePattern": "^_",
                    "caughtErrorsIgnorePattern": "^_"
                })],
            ),
        ),
        ("@typescript-eslint/no-explicit-any", RuleSetting::error()),
        ("@typescript-eslint/no-non-null-assertion", RuleSetting::error()),
        ("@typescript-eslint/no-floating-promises", RuleSetting::error()),
        ("@typescript-eslint/await-thenable", RuleSetting::error()),
        ("@typescript-eslint/no-misused-promises", RuleSetting::error()),
        ("@typescript-eslint/require-await", RuleSetting::error()),
        (
            "@typescript-eslint/no-unnecessary-type-assertion",
            RuleSetting::error(),
        ),
        ("@typescript-eslint/no-unnecessary-condition", RuleSetting::error()),
        ("@typescript-eslint/consistent-return", RuleSetting::error()),
        ("@typescript-eslint/no-empty-function", RuleSetting::error()),
        ("@typescript-eslint/no-inferrable-types", RuleSetting::error()),
        ("@typescript-eslint/no-var-requires", RuleSetting::error()),
        (
            "@typescript-eslint/naming-convention",
            RuleSetting::with_options(
                Severity::Error,
                [
                    json!({
                        "selector": "interface",
                        "format": ["PascalCase"],
                        "custom": { "regex": "^I[A-Z]", "match": false }
                    }),
                    json!({ "selector": "typeAlias", "format": ["PascalCase"] }),
                    json!({ "selector": "enum", "format": ["PascalCase"] }),
                ],
            ),
        ),
    ]
}

fn base_rules() -> RuleTable {
    vec![
        (
            "no-console",
            RuleSetting::with_options(Severity::Warn, [json!({ "allow": ["warn", "error"] })]),
        ),
        ("no-debugger", RuleSetting::error()),
        ("semi", RuleSetting::with_options(Severity::Error, [json!("always")])),
        (
            "quotes",
            RuleSetting::with_options(
                Severity::Error,
                [json!("single"), json!({ "avoidEscape": true })],
            ),
        ),
        (
            "comma-dangle",
            RuleSetting::with_options(Severity::Error, [json!("always-multiline")]),
        ),
        ("prefer-const", RuleSetting::error()),
        ("prefer-template", RuleSetting::error()),
        ("object-shorthand", RuleSetting::error()),
        (
            "prefer-destructuring",
            RuleSetting::with_options(Severity::Error, [json!({ "array": true, "object": true })]),
        ),
        ("prefer-arrow-callback", RuleSetting::error()),
        ("no-duplicate-imports", RuleSetting::error()),
        ("no-unused-expressions", RuleSetting::error()),
        ("no-eval", RuleSetting::error()),
        ("no-implied-eval", RuleSetting::error()),
        ("no-alert", RuleSetting::error()),
        (
            "max-lines-per-function",
            RuleSetting::with_options(Severity::Warn, [json!(50)]),
        ),
        ("max-params", RuleSetting::with_options(Severity::Warn, [json!(4)])),
        ("no-nested-ternary", RuleSetting::warn()),
    ]
}

fn import_rules() -> RuleTable {
    vec![
        (
            "import/order",
            RuleSetting::with_options(
                Severity::Error,
                [json!({
                    "groups": ["builtin", "external", "internal", "parent", "sibling", "index", "type"],
                    "newlines-between": "always",
                    "alphabetize": { "order": "asc", "caseInsensitive": true },
                    "pathGroups": [
                        { "pattern": "react", "group": "external", "position": "before" },
                        { "pattern": "@/**", "group": "internal", "position": "after" }
                    ]
                })],
            ),
        ),
        ("import/no-duplicates", RuleSetting::error()),
        ("import/no-unresolved", RuleSetting::warn()),
        ("import/prefer-default-export", RuleSetting::off()),
        ("import/no-default-export", RuleSetting::warn()),
        (
            "import/extensions",
            RuleSetting::with_options(
                Severity::Error,
                [
                    json!("ignorePackages"),
                    json!({ "js": "never", "ts": "never", "tsx": "never" }),
                ],
            ),
        ),
        ("import/no-commonjs", RuleSetting::error()),
        ("import/no-cycle", RuleSetting::error()),
    ]
}

fn formatting_rules() -> RuleTable {
    vec![
        ("arrow-parens", RuleSetting::with_options(Severity::Error, [json!("always")])),
        (
            "object-curly-spacing",
            RuleSetting::with_options(Severity::Error, [json!("always")]),
        ),
        (
            "array-bracket-spacing",
            RuleSetting::with_options(Severity::Error, [json!("never")]),
        ),
        ("no-trailing-spaces", RuleSetting::error()),
        ("eol-last", RuleSetting::error()),
        (
            "no-multiple-empty-lines",
            RuleSetting::with_options(Severity::Error, [json!({ "max": 1, "maxEOF": 0 })]),
        ),
        ("no-tabs", RuleSetting::error()),
        ("linebreak-style", RuleSetting::with_options(Severity::Error, [json!("unix")])),
        (
            "max-len",
            RuleSetting::with_options(
                Severity::Warn,
                [json!({
                    "code": 100,
                    "ignoreUrls": true,
                    "ignoreStrings": true,
                    "ignoreTemplateLiterals": true
                })],
            ),
        ),
    ]
}

/// Tooling layer used by the derived flavors
pub fn extended_tooling_layer(composer: &LayerComposer<'_>, name: &str) -> Layer {
    composer
        .layer(name, LayerKind::Tooling)
        .files(EXTENDED_TOOLING_FILES)
        .rules(vec![
            ("import/no-default-export", RuleSetting::off()),
            ("no-console", RuleSetting::off()),
            ("import/extensions", RuleSetting::off()),
            ("import/no-commonjs", RuleSetting::off()),
        ])
        .build()
}

pub fn layers(composer: &LayerComposer<'_>) -> Vec<Layer> {
    vec![
        Layer::global_ignores("base/ignores", GLOBAL_IGNORES),
        composer
            .layer("base/typescript", LayerKind::Language)
            .files(TYPED_SOURCES)
            .language(LanguageOptions::modern().with_project("./tsconfig.json"))
            .parser(TYPESCRIPT_PARSER)
            .plugin(TYPESCRIPT_PLUGIN)
            .plugin(IMPORT_PLUGIN)
            .gated(TYPESCRIPT_PLUGIN, typescript_rules)
            .rules(base_rules())
            .gated(IMPORT_PLUGIN, import_rules)
            .rules(formatting_rules())
            .build(),
        composer
            .layer("base/javascript", LayerKind::Language)
            .files(PLAIN_SOURCES)
            .language(LanguageOptions::modern())
            .plugin(IMPORT_PLUGIN)
            .rules(base_rules())
            .gated(IMPORT_PLUGIN, import_rules)
            .rules(formatting_rules())
            .build(),
        composer
            .layer("base/tests", LayerKind::Test)
            .files(TEST_FILES)
            .language(LanguageOptions::default().with_env("jest"))
            .rules(vec![("no-console", RuleSetting::off())])
            .gated(TYPESCRIPT_PLUGIN, || {
                vec![("@typescript-eslint/no-explicit-any", RuleSetting::off())]
            })
            .rules(vec![("max-lines-per-function", RuleSetting::off())])
            .build(),
        composer
            .layer("base/tooling", LayerKind::Tooling)
            .files(TOOLING_FILES)
            .language(LanguageOptions::modern())
            .rules(vec![
                ("import/no-default-export", RuleSetting::off()),
                ("no-console", RuleSetting::off()),
                ("import/extensions", RuleSetting::off()),
            ])
            .build(),
    ]
}
