// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration schema definitions.
//!
//! Rules are written the way commitlint writes them: a rule name mapped to
//! a `[severity, applicability, value]` tuple, e.g.
//! `type-enum = [2, "always", ["feat", "fix"]]`. A table form
//! `{ severity = "error", when = "always", value = 100 }` is also accepted.

use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::ConfigError;

/// How strongly a rule violation is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The rule is not evaluated.
    Disabled,
    /// Reported, but does not block the commit.
    Warning,
    /// Blocks the commit.
    Error,
}

impl Severity {
    /// Map a commitlint numeric level (0, 1, 2) to a severity.
    pub fn from_level(level: u64) -> Option<Self> {
        match level {
            0 => Some(Severity::Disabled),
            1 => Some(Severity::Warning),
            2 => Some(Severity::Error),
            _ => None,
        }
    }

    /// Get the string representation of the severity.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Disabled => "disabled",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }

    /// Whether a rule with this severity is evaluated at all.
    pub fn is_enabled(&self) -> bool {
        *self != Severity::Disabled
    }
}

impl std::str::FromStr for Severity {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "0" | "disabled" | "off" => Ok(Severity::Disabled),
            "1" | "warning" | "warn" => Ok(Severity::Warning),
            "2" | "error" => Ok(Severity::Error),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SeverityVisitor;

        impl<'de> Visitor<'de> for SeverityVisitor {
            type Value = Severity;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a severity (0, 1, 2, \"disabled\", \"warning\" or \"error\")")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Severity, E> {
                Severity::from_level(v)
                    .ok_or_else(|| E::invalid_value(de::Unexpected::Unsigned(v), &self))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Severity, E> {
                u64::try_from(v)
                    .ok()
                    .and_then(Severity::from_level)
                    .ok_or_else(|| E::invalid_value(de::Unexpected::Signed(v), &self))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Severity, E> {
                v.parse()
                    .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
            }
        }

        deserializer.deserialize_any(SeverityVisitor)
    }
}

/// Whether a rule's condition must hold (`always`) or must not hold (`never`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Applicability {
    #[default]
    Always,
    Never,
}

/// The rule-specific argument of a rule setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleValue {
    /// A limit, e.g. a maximum length.
    Number(usize),
    /// A single name or literal, e.g. a case name or a full stop.
    Text(String),
    /// A set of names, e.g. allowed types.
    List(Vec<String>),
}

impl RuleValue {
    /// Build a list value from string slices.
    pub fn list<S: AsRef<str>>(items: &[S]) -> Self {
        RuleValue::List(items.iter().map(|s| s.as_ref().to_string()).collect())
    }

    /// The numeric value, if this is a number.
    pub fn as_number(&self) -> Option<usize> {
        match self {
            RuleValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The text value, if this is a single string.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RuleValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The value as a set of names. A single string counts as one name.
    pub fn names(&self) -> Vec<&str> {
        match self {
            RuleValue::Number(_) => Vec::new(),
            RuleValue::Text(s) => vec![s.as_str()],
            RuleValue::List(items) => items.iter().map(String::as_str).collect(),
        }
    }
}

impl From<usize> for RuleValue {
    fn from(n: usize) -> Self {
        RuleValue::Number(n)
    }
}

impl From<&str> for RuleValue {
    fn from(s: &str) -> Self {
        RuleValue::Text(s.to_string())
    }
}

impl From<Vec<String>> for RuleValue {
    fn from(items: Vec<String>) -> Self {
        RuleValue::List(items)
    }
}

/// Configuration for a single rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSetting {
    /// Severity of a violation. `Disabled` turns the rule off.
    pub severity: Severity,

    /// Whether the rule condition is required or forbidden.
    pub applicability: Applicability,

    /// Rule-specific argument.
    pub value: Option<RuleValue>,
}

impl RuleSetting {
    /// Create a setting without a value.
    pub fn new(severity: Severity, applicability: Applicability) -> Self {
        Self {
            severity,
            applicability,
            value: None,
        }
    }

    /// A disabled setting.
    pub fn disabled() -> Self {
        Self::new(Severity::Disabled, Applicability::Always)
    }

    /// Set the value.
    pub fn with_value(mut self, value: impl Into<RuleValue>) -> Self {
        self.value = Some(value.into());
        self
    }
}

impl Serialize for RuleSetting {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.value.is_some() { 3 } else { 2 };
        let mut seq = serializer.serialize_seq(Some(len))?;
        seq.serialize_element(&self.severity)?;
        seq.serialize_element(&self.applicability)?;
        if let Some(ref value) = self.value {
            seq.serialize_element(value)?;
        }
        seq.end()
    }
}

/// Table form of a rule setting.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RuleTable {
    #[serde(alias = "level")]
    severity: Severity,
    #[serde(default, alias = "applicability")]
    when: Applicability,
    #[serde(default)]
    value: Option<RuleValue>,
}

impl<'de> Deserialize<'de> for RuleSetting {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RuleSettingVisitor;

        impl<'de> Visitor<'de> for RuleSettingVisitor {
            type Value = RuleSetting;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a rule tuple [severity, applicability?, value?] or a rule table")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<RuleSetting, A::Error> {
                let severity: Severity = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let applicability: Applicability = seq.next_element()?.unwrap_or_default();
                let value: Option<RuleValue> = seq.next_element()?;

                if seq.next_element::<de::IgnoredAny>()?.is_some() {
                    return Err(de::Error::invalid_length(4, &self));
                }

                Ok(RuleSetting {
                    severity,
                    applicability,
                    value,
                })
            }

            fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<RuleSetting, A::Error> {
                let table = RuleTable::deserialize(de::value::MapAccessDeserializer::new(map))?;
                Ok(RuleSetting {
                    severity: table.severity,
                    applicability: table.when,
                    value: table.value,
                })
            }
        }

        deserializer.deserialize_any(RuleSettingVisitor)
    }
}

/// Mapping from rule name to its setting.
///
/// Names the validator does not recognise are kept and skipped at
/// validation time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleConfig {
    rules: BTreeMap<String, RuleSetting>,
}

impl RuleConfig {
    /// Create an empty rule configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a rule, builder style.
    pub fn with(mut self, name: impl Into<String>, setting: RuleSetting) -> Self {
        self.set(name, setting);
        self
    }

    /// Add or replace a rule.
    pub fn set(&mut self, name: impl Into<String>, setting: RuleSetting) {
        self.rules.insert(name.into(), setting);
    }

    /// Look up a rule setting.
    pub fn get(&self, name: &str) -> Option<&RuleSetting> {
        self.rules.get(name)
    }

    /// Remove a rule.
    pub fn remove(&mut self, name: &str) -> Option<RuleSetting> {
        self.rules.remove(name)
    }

    /// Iterate over rules in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleSetting)> {
        self.rules.iter().map(|(name, setting)| (name.as_str(), setting))
    }

    /// Number of configured rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no rules are configured.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Layer `overlay` on top of this configuration, rule by rule.
    pub fn overlay(&mut self, overlay: &RuleConfig) {
        for (name, setting) in &overlay.rules {
            self.rules.insert(name.clone(), setting.clone());
        }
    }
}

impl FromIterator<(String, RuleSetting)> for RuleConfig {
    fn from_iter<I: IntoIterator<Item = (String, RuleSetting)>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

/// Named built-in rule sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Conventional rules with the project's type list.
    Strict,
    /// Strict, without subject casing and with loosened length limits.
    Relaxed,
}

impl Preset {
    /// Get the string representation of the preset.
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Strict => "strict",
            Preset::Relaxed => "relaxed",
        }
    }

    /// The rules this preset enables.
    pub fn rules(&self) -> RuleConfig {
        match self {
            Preset::Strict => super::default::strict_rules(),
            Preset::Relaxed => super::default::relaxed_rules(),
        }
    }
}

impl std::str::FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(Preset::Strict),
            "relaxed" => Ok(Preset::Relaxed),
            _ => Err(ConfigError::UnknownPreset {
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The top-level configuration object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LintConfig {
    /// Preset the rules are layered on.
    pub extends: Option<Preset>,

    /// Rule overrides, applied over the preset.
    pub rules: RuleConfig,

    /// Whether to skip merge, revert and autosquash commits.
    pub default_ignores: bool,

    /// Additional regex patterns for messages to skip.
    pub ignores: Vec<String>,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            extends: None,
            rules: RuleConfig::new(),
            default_ignores: true,
            ignores: Vec::new(),
        }
    }
}

impl LintConfig {
    /// A configuration that only extends the given preset.
    pub fn preset(preset: Preset) -> Self {
        Self {
            extends: Some(preset),
            ..Self::default()
        }
    }

    /// The effective rules: preset rules with overrides layered on top.
    pub fn resolved_rules(&self) -> RuleConfig {
        super::loader::resolve_rules(self.extends, &self.rules)
    }

    /// Check that every recognised rule carries a value of the right shape.
    pub fn check(&self) -> crate::error::Result<()> {
        super::loader::check_rules(&self.rules)
    }
}
