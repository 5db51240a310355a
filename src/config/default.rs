// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Built-in presets and the example configuration.

use super::schema::{Applicability, RuleConfig, RuleSetting, RuleValue, Severity};

/// Commit types allowed by both presets.
pub const CONVENTIONAL_TYPES: &[&str] = &[
    "feat",     // New feature
    "fix",      // Bug fix
    "docs",     // Documentation only
    "style",    // Formatting, whitespace
    "refactor", // Neither fixes a bug nor adds a feature
    "perf",     // Performance improvement
    "test",     // Adding missing tests
    "build",    // Build process changes
    "ci",       // CI configuration changes
    "chore",    // Other changes that don't touch src or tests
    "revert",   // Reverts a previous commit
];

/// Default line length limit for header, body and footer.
pub const MAX_LINE_LENGTH: usize = 100;

fn error(applicability: Applicability) -> RuleSetting {
    RuleSetting::new(Severity::Error, applicability)
}

/// The strict preset.
pub fn strict_rules() -> RuleConfig {
    RuleConfig::new()
        .with(
            "type-enum",
            error(Applicability::Always).with_value(RuleValue::list(CONVENTIONAL_TYPES)),
        )
        .with(
            "type-case",
            error(Applicability::Always).with_value("lower-case"),
        )
        .with("subject-empty", error(Applicability::Never))
        .with(
            "subject-case",
            error(Applicability::Never).with_value(RuleValue::list(&[
                "sentence-case",
                "start-case",
                "pascal-case",
                "upper-case",
            ])),
        )
        .with(
            "subject-full-stop",
            error(Applicability::Never).with_value("."),
        )
        .with(
            "header-max-length",
            error(Applicability::Always).with_value(MAX_LINE_LENGTH),
        )
        .with("header-trim", error(Applicability::Always))
        .with(
            "body-max-line-length",
            error(Applicability::Always).with_value(MAX_LINE_LENGTH),
        )
        .with(
            "footer-max-line-length",
            error(Applicability::Always).with_value(MAX_LINE_LENGTH),
        )
        .with(
            "body-leading-blank",
            RuleSetting::new(Severity::Warning, Applicability::Always),
        )
}

/// The relaxed preset: any subject casing, header length is advisory and
/// body/footer lines are unbounded.
pub fn relaxed_rules() -> RuleConfig {
    let mut rules = strict_rules();
    rules.overlay(
        &RuleConfig::new()
            .with("subject-case", RuleSetting::disabled())
            .with(
                "header-max-length",
                RuleSetting::new(Severity::Warning, Applicability::Always)
                    .with_value(MAX_LINE_LENGTH),
            )
            .with("body-max-line-length", RuleSetting::disabled())
            .with("footer-max-line-length", RuleSetting::disabled()),
    );
    rules
}

/// Generate an example configuration file.
pub fn example_config() -> &'static str {
    r#"# commitlint configuration
# Author: Eshan Roy
# SPDX-License-Identifier: MIT

# Start from a preset: "strict" or "relaxed".
extends = "strict"

# Skip merge, revert and fixup!/squash! commits.
default_ignores = true

# Extra regex patterns for messages that are never linted.
ignores = ["^chore\\(release\\): "]

# Rules override the preset one by one.
# Tuple form: [severity, applicability, value], severity 0 = off, 1 = warning, 2 = error.
[rules]
type-enum = [2, "always", ["feat", "fix", "docs", "style", "refactor", "perf", "test", "build", "ci", "chore", "revert"]]
subject-case = [0]
scope-enum = [2, "always", ["core", "config", "rules", "commit"]]

# Table form.
header-max-length = { severity = "warning", when = "always", value = 72 }
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_preset() {
        let rules = strict_rules();
        let type_enum = rules.get("type-enum").unwrap();
        assert_eq!(type_enum.severity, Severity::Error);
        assert_eq!(
            type_enum.value.as_ref().map(RuleValue::names).unwrap().len(),
            CONVENTIONAL_TYPES.len()
        );
        assert_eq!(
            rules.get("body-leading-blank").unwrap().severity,
            Severity::Warning
        );
    }

    #[test]
    fn test_relaxed_preset() {
        let rules = relaxed_rules();
        assert_eq!(rules.get("subject-case"), Some(&RuleSetting::disabled()));
        assert_eq!(
            rules.get("header-max-length").unwrap().severity,
            Severity::Warning
        );
        assert!(!rules.get("body-max-line-length").unwrap().severity.is_enabled());
        assert_eq!(rules.get("type-enum"), strict_rules().get("type-enum"));
    }

    #[test]
    fn test_example_config_parseable() {
        let config = super::super::parse_config(example_config()).expect("example config should parse");
        assert_eq!(config.extends, Some(super::super::Preset::Strict));
        assert_eq!(config.rules.get("subject-case"), Some(&RuleSetting::disabled()));
    }
}
