// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Built-in validation rules.

use crate::commit::CommitMessage;
use crate::config::{Applicability, RuleSetting, RuleValue};

use super::case::{first_cased_letter, CasePolicy};

/// Name of the structural rule reported for unparseable headers.
pub const HEADER_FORMAT: &str = "header-format";

/// Which part of the message a rule inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleTarget {
    /// Skipped when the header is unparseable.
    Header,
    /// Always evaluated.
    Body,
}

/// Shape of the value a rule expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    None,
    Number,
    Text,
    Cases,
    Names,
}

/// A rule violation before it is tagged with a rule name and severity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub message: String,
    pub line: Option<usize>,
}

impl Violation {
    fn at(line: usize, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: Some(line),
        }
    }
}

type RuleCheck = fn(&CommitMessage, &RuleSetting) -> Option<Violation>;

/// A built-in rule.
#[derive(Debug)]
pub struct BuiltinRule {
    /// Rule name as used in configuration.
    pub name: &'static str,
    /// Part of the message the rule inspects.
    pub target: RuleTarget,
    /// Expected value shape.
    pub value: ValueKind,
    check: RuleCheck,
}

impl BuiltinRule {
    /// Run the rule against a parsed message.
    pub fn check(&self, message: &CommitMessage, setting: &RuleSetting) -> Option<Violation> {
        (self.check)(message, setting)
    }
}

/// Built-in rules in evaluation order.
static BUILTIN_RULES: [BuiltinRule; 11] = [
    BuiltinRule {
        name: "type-enum",
        target: RuleTarget::Header,
        value: ValueKind::Names,
        check: check_type_enum,
    },
    BuiltinRule {
        name: "type-case",
        target: RuleTarget::Header,
        value: ValueKind::Cases,
        check: check_type_case,
    },
    BuiltinRule {
        name: "scope-enum",
        target: RuleTarget::Header,
        value: ValueKind::Names,
        check: check_scope_enum,
    },
    BuiltinRule {
        name: "subject-empty",
        target: RuleTarget::Header,
        value: ValueKind::None,
        check: check_subject_empty,
    },
    BuiltinRule {
        name: "subject-case",
        target: RuleTarget::Header,
        value: ValueKind::Cases,
        check: check_subject_case,
    },
    BuiltinRule {
        name: "subject-full-stop",
        target: RuleTarget::Header,
        value: ValueKind::Text,
        check: check_subject_full_stop,
    },
    BuiltinRule {
        name: "header-max-length",
        target: RuleTarget::Header,
        value: ValueKind::Number,
        check: check_header_max_length,
    },
    BuiltinRule {
        name: "header-trim",
        target: RuleTarget::Header,
        value: ValueKind::None,
        check: check_header_trim,
    },
    BuiltinRule {
        name: "body-max-line-length",
        target: RuleTarget::Body,
        value: ValueKind::Number,
        check: check_body_max_line_length,
    },
    BuiltinRule {
        name: "footer-max-line-length",
        target: RuleTarget::Body,
        value: ValueKind::Number,
        check: check_footer_max_line_length,
    },
    BuiltinRule {
        name: "body-leading-blank",
        target: RuleTarget::Body,
        value: ValueKind::None,
        check: check_body_leading_blank,
    },
];

/// All built-in rules, in evaluation order.
pub fn builtin_rules() -> &'static [BuiltinRule] {
    &BUILTIN_RULES
}

/// Look up a built-in rule by name.
pub fn builtin_rule(name: &str) -> Option<&'static BuiltinRule> {
    BUILTIN_RULES.iter().find(|rule| rule.name == name)
}

/// Whether the validator understands a rule name.
pub fn is_known_rule(name: &str) -> bool {
    name == HEADER_FORMAT || builtin_rule(name).is_some()
}

/// The structural violation for a header that is not `type(scope): subject`.
pub fn header_format_violation(message: &CommitMessage) -> Violation {
    if message.header.trim().is_empty() {
        Violation::at(1, "message may not be empty")
    } else {
        Violation::at(
            1,
            "header must be in format 'type(scope): subject' or 'type: subject'",
        )
    }
}

fn names(setting: &RuleSetting) -> Vec<&str> {
    setting
        .value
        .as_ref()
        .map(RuleValue::names)
        .unwrap_or_default()
}

/// Check if the commit type is in the configured set.
fn check_type_enum(message: &CommitMessage, setting: &RuleSetting) -> Option<Violation> {
    let types = names(setting);
    let listed = types.contains(&message.commit_type.as_str());

    match setting.applicability {
        Applicability::Always if !types.is_empty() && !listed => Some(Violation::at(
            1,
            format!("type must be one of [{}]", types.join(", ")),
        )),
        Applicability::Never if listed => Some(Violation::at(
            1,
            format!("type must not be one of [{}]", types.join(", ")),
        )),
        _ => None,
    }
}

/// Check the case of the commit type.
fn check_type_case(message: &CommitMessage, setting: &RuleSetting) -> Option<Violation> {
    check_case("type", &message.commit_type, setting)
}

/// Check every scope segment against the configured set.
fn check_scope_enum(message: &CommitMessage, setting: &RuleSetting) -> Option<Violation> {
    let scopes = message.scopes();
    if scopes.is_empty() {
        return None;
    }

    let allowed = names(setting);
    match setting.applicability {
        Applicability::Always
            if !allowed.is_empty() && scopes.iter().any(|s| !allowed.contains(s)) =>
        {
            Some(Violation::at(
                1,
                format!("scope must be one of [{}]", allowed.join(", ")),
            ))
        }
        Applicability::Never if scopes.iter().any(|s| allowed.contains(s)) => Some(Violation::at(
            1,
            format!("scope must not be one of [{}]", allowed.join(", ")),
        )),
        _ => None,
    }
}

/// Check whether the subject is empty.
fn check_subject_empty(message: &CommitMessage, setting: &RuleSetting) -> Option<Violation> {
    let empty = message.subject.trim().is_empty();

    match setting.applicability {
        Applicability::Never if empty => Some(Violation::at(1, "subject may not be empty")),
        Applicability::Always if !empty => Some(Violation::at(1, "subject must be empty")),
        _ => None,
    }
}

/// Check the case of the subject.
fn check_subject_case(message: &CommitMessage, setting: &RuleSetting) -> Option<Violation> {
    check_case("subject", &message.subject, setting)
}

fn check_case(field: &str, text: &str, setting: &RuleSetting) -> Option<Violation> {
    first_cased_letter(text)?;

    let policies: Vec<CasePolicy> = match setting.value {
        Some(ref value) => value
            .names()
            .into_iter()
            .filter_map(|name| match name.parse::<CasePolicy>() {
                Ok(policy) => Some(policy),
                Err(()) => {
                    tracing::debug!(case = name, "Skipping unknown case policy");
                    None
                }
            })
            .collect(),
        None => vec![CasePolicy::LowerCase],
    };

    if policies.is_empty() {
        return None;
    }

    let matched = policies.iter().any(|p| p.matches(text));
    let listed = policies
        .iter()
        .map(CasePolicy::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    match setting.applicability {
        Applicability::Always if !matched => {
            Some(Violation::at(1, format!("{} must be {}", field, listed)))
        }
        Applicability::Never if matched => {
            Some(Violation::at(1, format!("{} must not be {}", field, listed)))
        }
        _ => None,
    }
}

/// Check the trailing full stop of the subject.
fn check_subject_full_stop(message: &CommitMessage, setting: &RuleSetting) -> Option<Violation> {
    let subject = message.subject.trim_end();
    if subject.is_empty() {
        return None;
    }

    let stop = setting
        .value
        .as_ref()
        .and_then(RuleValue::as_text)
        .unwrap_or(".");
    let ends = subject.ends_with(stop);

    match setting.applicability {
        Applicability::Never if ends => Some(Violation::at(1, "subject may not end with full stop")),
        Applicability::Always if !ends => Some(Violation::at(1, "subject must end with full stop")),
        _ => None,
    }
}

fn max_length(rule: &str, setting: &RuleSetting) -> Option<usize> {
    let max = setting.value.as_ref().and_then(RuleValue::as_number);
    if max.is_none() {
        tracing::debug!(rule, "No numeric limit configured, rule is unbounded");
    }
    max
}

/// Check maximum header length.
fn check_header_max_length(message: &CommitMessage, setting: &RuleSetting) -> Option<Violation> {
    let max = max_length("header-max-length", setting)?;
    let len = message.header.chars().count();

    (len > max).then(|| {
        Violation::at(
            1,
            format!(
                "header must not be longer than {} characters, current length is {}",
                max, len
            ),
        )
    })
}

/// Check surrounding whitespace of the header.
fn check_header_trim(message: &CommitMessage, _setting: &RuleSetting) -> Option<Violation> {
    let header = message.header.as_str();

    if header.starts_with(char::is_whitespace) {
        Some(Violation::at(1, "header must not start with whitespace"))
    } else if header.ends_with(char::is_whitespace) {
        Some(Violation::at(1, "header must not end with whitespace"))
    } else {
        None
    }
}

/// Find the first line longer than `max` and how many lines exceed it.
fn long_lines(text: &str, max: usize) -> Option<(usize, usize)> {
    let mut offending = text
        .lines()
        .enumerate()
        .filter(|(_, line)| line.chars().count() > max)
        .map(|(idx, _)| idx);

    let first = offending.next()?;
    Some((first, 1 + offending.count()))
}

fn check_line_lengths(
    part: &str,
    rule: &str,
    text: Option<&str>,
    start_line: Option<usize>,
    setting: &RuleSetting,
) -> Option<Violation> {
    let text = text?;
    let max = max_length(rule, setting)?;
    let (first, count) = long_lines(text, max)?;

    Some(Violation {
        message: format!(
            "{}'s lines must not be longer than {} characters ({} over the limit)",
            part, max, count
        ),
        line: start_line.map(|line| line + first),
    })
}

/// Check maximum body line length.
fn check_body_max_line_length(
    message: &CommitMessage,
    setting: &RuleSetting,
) -> Option<Violation> {
    check_line_lengths(
        "body",
        "body-max-line-length",
        message.body.as_deref(),
        message.body_line,
        setting,
    )
}

/// Check maximum footer line length.
fn check_footer_max_line_length(
    message: &CommitMessage,
    setting: &RuleSetting,
) -> Option<Violation> {
    check_line_lengths(
        "footer",
        "footer-max-line-length",
        message.footer.as_deref(),
        message.footer_line,
        setting,
    )
}

/// Check the blank line between header and body.
fn check_body_leading_blank(message: &CommitMessage, setting: &RuleSetting) -> Option<Violation> {
    let line = message.body_line?;
    let blanks = message.body_leading_blank_lines;

    match setting.applicability {
        Applicability::Always if blanks == 0 => {
            Some(Violation::at(line, "body must have leading blank line"))
        }
        Applicability::Always if blanks > 1 => Some(Violation::at(
            line,
            format!(
                "body must be preceded by exactly one blank line, found {}",
                blanks
            ),
        )),
        Applicability::Never if blanks > 0 => {
            Some(Violation::at(line, "body may not have leading blank line"))
        }
        _ => None,
    }
}
