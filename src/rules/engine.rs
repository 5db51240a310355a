// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule engine for commit validation.

use regex::Regex;
use serde::Serialize;

use crate::commit::CommitMessage;
use crate::config::{parse_config, LintConfig, RuleConfig, Severity};
use crate::error::{ConfigError, Result};

use super::builtin::{builtin_rules, header_format_violation, is_known_rule, RuleTarget, HEADER_FORMAT};
use super::ignore::{first_line, ignore_subject, is_default_ignored};
use super::validator::{Finding, ValidationResult};

/// Validate a commit message against a rule configuration.
///
/// Never fails: malformed input is reported as a `header-format` finding.
pub fn validate(message: &str, config: &RuleConfig) -> ValidationResult {
    validate_message(&CommitMessage::parse(message), config)
}

/// Validate an already parsed commit message.
pub fn validate_message(message: &CommitMessage, config: &RuleConfig) -> ValidationResult {
    let mut findings = Vec::new();

    for (name, _) in config.iter().filter(|(name, _)| !is_known_rule(name)) {
        tracing::trace!(rule = name, "Ignoring unrecognized rule");
    }

    let header_valid = message.is_structurally_valid();
    if !header_valid {
        let severity = config
            .get(HEADER_FORMAT)
            .map_or(Severity::Error, |setting| setting.severity);

        tracing::debug!(
            header = message.header.as_str(),
            "Unparseable header, skipping header rules"
        );

        if severity.is_enabled() {
            let violation = header_format_violation(message);
            findings.push(Finding {
                rule: HEADER_FORMAT.to_string(),
                severity,
                message: violation.message,
                line: violation.line,
            });
        }
    }

    for rule in builtin_rules() {
        let Some(setting) = config.get(rule.name) else {
            continue;
        };
        if !setting.severity.is_enabled() {
            continue;
        }
        if rule.target == RuleTarget::Header && !header_valid {
            continue;
        }

        if let Some(violation) = rule.check(message, setting) {
            findings.push(Finding {
                rule: rule.name.to_string(),
                severity: setting.severity,
                message: violation.message,
                line: violation.line,
            });
        }
    }

    ValidationResult::from_findings(findings)
}

/// Outcome of linting one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LintReport {
    /// The message header, for display.
    pub header: String,
    /// Whether the message matched an ignore pattern and was not validated.
    pub ignored: bool,
    /// Validation findings (empty when ignored).
    pub result: ValidationResult,
}

impl LintReport {
    /// Check if the message passed (ignored messages always pass).
    pub fn is_valid(&self) -> bool {
        self.result.is_valid()
    }
}

/// Lints commit messages against a resolved configuration.
#[derive(Debug, Clone)]
pub struct Linter {
    rules: RuleConfig,
    default_ignores: bool,
    ignores: Vec<Regex>,
}

impl Linter {
    /// Create a linter, resolving presets and compiling ignore patterns.
    pub fn new(config: LintConfig) -> Result<Self> {
        config.check()?;

        let ignores = config
            .ignores
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| ConfigError::InvalidValue {
                    key: "ignores".to_string(),
                    message: format!("invalid pattern '{}': {}", pattern, e),
                })
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            rules: config.resolved_rules(),
            default_ignores: config.default_ignores,
            ignores,
        })
    }

    /// Create a linter from TOML configuration text.
    pub fn from_toml(content: &str) -> Result<Self> {
        Self::new(parse_config(content)?)
    }

    /// The effective rules.
    pub fn rules(&self) -> &RuleConfig {
        &self.rules
    }

    /// Whether a message is skipped.
    pub fn is_ignored(&self, message: &str) -> bool {
        if self.default_ignores && is_default_ignored(message) {
            return true;
        }
        let text = ignore_subject(message);
        self.ignores.iter().any(|re| re.is_match(&text))
    }

    /// Lint a commit message.
    pub fn lint(&self, message: &str) -> LintReport {
        let header = first_line(message).to_string();

        if self.is_ignored(message) {
            tracing::debug!(header = header.as_str(), "Message ignored");
            return LintReport {
                header,
                ignored: true,
                result: ValidationResult::new(),
            };
        }

        LintReport {
            header,
            ignored: false,
            result: validate(message, &self.rules),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Applicability, Preset, RuleSetting, RuleValue};
    use crate::error::CommitlintError;

    fn type_enum_config() -> RuleConfig {
        RuleConfig::new().with(
            "type-enum",
            RuleSetting::new(Severity::Error, Applicability::Always)
                .with_value(RuleValue::list(&["feat", "fix"])),
        )
    }

    #[test]
    fn test_validate_valid_message() {
        let result = validate("feat: add parser", &type_enum_config());
        assert!(result.is_empty());
    }

    #[test]
    fn test_validate_unknown_type() {
        let result = validate("foo: add parser", &type_enum_config());
        assert_eq!(result.issue_count(), 1);
        assert_eq!(result.findings()[0].rule, "type-enum");
        assert_eq!(result.findings()[0].severity, Severity::Error);
    }

    #[test]
    fn test_unparseable_header_short_circuits() {
        let config = type_enum_config().with(
            "body-max-line-length",
            RuleSetting::new(Severity::Error, Applicability::Always).with_value(RuleValue::Number(10)),
        );
        let result = validate("just some text\n\nthis body line is too long", &config);

        let rules: Vec<&str> = result.findings().iter().map(|f| f.rule.as_str()).collect();
        assert_eq!(rules, vec!["header-format", "body-max-line-length"]);
    }

    #[test]
    fn test_header_format_can_be_configured() {
        let config = type_enum_config().with(
            "header-format",
            RuleSetting::new(Severity::Warning, Applicability::Always),
        );
        let result = validate("", &config);
        assert_eq!(result.findings()[0].severity, Severity::Warning);
        assert!(result.is_valid());

        let config = type_enum_config().with("header-format", RuleSetting::disabled());
        assert!(validate("not conventional", &config).is_empty());
    }

    #[test]
    fn test_unknown_rules_are_ignored() {
        let config = type_enum_config().with(
            "signed-off-by",
            RuleSetting::new(Severity::Error, Applicability::Always),
        );
        assert!(validate("feat: add parser", &config).is_empty());
    }

    #[test]
    fn test_linter_strict_preset() {
        let linter = Linter::new(LintConfig::preset(Preset::Strict)).unwrap();
        let report = linter.lint("fix: Resolved Bug.");

        assert!(!report.ignored);
        let rules: Vec<&str> = report.result.findings().iter().map(|f| f.rule.as_str()).collect();
        assert_eq!(rules, vec!["subject-case", "subject-full-stop"]);
    }

    #[test]
    fn test_linter_default_ignores() {
        let linter = Linter::new(LintConfig::preset(Preset::Strict)).unwrap();
        let report = linter.lint("Merge branch 'main' into feature");
        assert!(report.ignored);
        assert!(report.is_valid());

        let config = LintConfig {
            default_ignores: false,
            ..LintConfig::preset(Preset::Strict)
        };
        let linter = Linter::new(config).unwrap();
        let report = linter.lint("Merge branch 'main' into feature");
        assert!(!report.ignored);
        assert!(!report.is_valid());
    }

    #[test]
    fn test_linter_custom_ignores() {
        let config = LintConfig {
            ignores: vec![r"^chore\(release\): ".to_string()],
            ..LintConfig::preset(Preset::Strict)
        };
        let linter = Linter::new(config).unwrap();
        assert!(linter.is_ignored("chore(release): 1.2.0 [skip ci]"));
        assert!(!linter.is_ignored("chore(deps): bump regex"));
    }

    #[test]
    fn test_linter_ignores_after_git_comments() {
        let linter = Linter::new(LintConfig::preset(Preset::Strict)).unwrap();
        let report = linter.lint("# Please enter the commit message\nMerge branch 'main' into feature\n");
        assert!(report.ignored);
        assert_eq!(report.header, "Merge branch 'main' into feature");

        let config = LintConfig {
            ignores: vec![r"^WIP".to_string()],
            ..LintConfig::preset(Preset::Strict)
        };
        let linter = Linter::new(config).unwrap();
        assert!(linter.is_ignored("# On branch main\nWIP do not merge"));
    }

    #[test]
    fn test_body_paragraph_after_trailer_like_line() {
        let config = RuleConfig::new().with(
            "body-max-line-length",
            RuleSetting::new(Severity::Error, Applicability::Always).with_value(RuleValue::Number(72)),
        );
        let message = format!("fix: crash\n\nSee: docs\n\n{}", "x".repeat(150));
        let result = validate(&message, &config);

        assert_eq!(result.issue_count(), 1);
        assert_eq!(result.findings()[0].rule, "body-max-line-length");
        assert_eq!(result.findings()[0].line, Some(5));
    }

    #[test]
    fn test_linter_invalid_ignore_pattern() {
        let config = LintConfig {
            ignores: vec!["(unclosed".to_string()],
            ..LintConfig::default()
        };
        assert!(matches!(
            Linter::new(config),
            Err(CommitlintError::Config(ConfigError::InvalidValue { .. }))
        ));
    }
}
