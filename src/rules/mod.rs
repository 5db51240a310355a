// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule engine module for commit validation.
//!
//! This module provides the built-in commitlint-style rules and the
//! validator that evaluates them in a fixed order.

mod builtin;
mod case;
mod engine;
mod ignore;
mod validator;

pub use builtin::{
    builtin_rule, builtin_rules, is_known_rule, BuiltinRule, RuleTarget, ValueKind, Violation,
    HEADER_FORMAT,
};
pub use case::CasePolicy;
pub use engine::{validate, validate_message, LintReport, Linter};
pub use ignore::is_default_ignored;
pub use validator::{Finding, ValidationResult};
