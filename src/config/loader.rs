// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration parsing, checking and preset resolution.

use crate::error::{ConfigError, Result};
use crate::rules::{builtin_rule, is_known_rule, CasePolicy, ValueKind};

use super::schema::{LintConfig, Preset, RuleConfig, RuleValue};

/// Parse configuration from a TOML string.
pub fn parse_config(content: &str) -> Result<LintConfig> {
    let mut table: toml::Table = content.parse().map_err(parse_error)?;
    let extends = match table.remove("extends") {
        Some(toml::Value::String(name)) => Some(name.parse::<Preset>()?),
        Some(other) => {
            return Err(ConfigError::InvalidValue {
                key: "extends".to_string(),
                message: format!("expected a preset name, found {}", other.type_str()),
            }
            .into())
        }
        None => None,
    };

    let mut config: LintConfig = toml::Value::Table(table).try_into().map_err(parse_error)?;
    config.extends = extends;

    config.check()?;
    Ok(config)
}

fn parse_error(e: toml::de::Error) -> ConfigError {
    ConfigError::ParseError {
        message: format!("Failed to parse TOML: {}", e),
    }
}

/// Layer rule overrides over a preset.
pub fn resolve_rules(preset: Option<Preset>, overrides: &RuleConfig) -> RuleConfig {
    let mut rules = preset.map(|p| p.rules()).unwrap_or_default();
    rules.overlay(overrides);
    rules
}

/// Check that recognised rules carry a value of the shape they expect.
///
/// Unknown rules are left alone so newer configurations keep working.
pub fn check_rules(rules: &RuleConfig) -> Result<()> {
    for (name, setting) in rules.iter() {
        if !is_known_rule(name) {
            tracing::debug!(rule = name, "Unknown rule will be ignored");
            continue;
        }

        let (Some(rule), Some(value)) = (builtin_rule(name), setting.value.as_ref()) else {
            continue;
        };

        check_value(name, rule.value, value)?;
    }

    Ok(())
}

fn check_value(name: &str, kind: ValueKind, value: &RuleValue) -> Result<()> {
    let invalid = |message: String| ConfigError::InvalidValue {
        key: name.to_string(),
        message,
    };

    match kind {
        ValueKind::None => Ok(()),
        ValueKind::Number if value.as_number().is_none() => {
            Err(invalid("expected a number".to_string()).into())
        }
        ValueKind::Text if value.as_text().is_none() => {
            Err(invalid("expected a string".to_string()).into())
        }
        ValueKind::Names if matches!(value, RuleValue::Number(_)) => {
            Err(invalid("expected a list of names".to_string()).into())
        }
        ValueKind::Cases => {
            if matches!(value, RuleValue::Number(_)) {
                return Err(invalid("expected a case name or a list of case names".to_string()).into());
            }
            match value
                .names()
                .into_iter()
                .find(|case| case.parse::<CasePolicy>().is_err())
            {
                Some(unknown) => Err(invalid(format!("unknown case '{}'", unknown)).into()),
                None => Ok(()),
            }
        }
        _ => Ok(()),
    }
}
