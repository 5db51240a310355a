// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! commitlint - Conventional Commit Message Validator
//!
//! Parses a commit message into type, scope, subject, body and footer and
//! checks it against commitlint-style rules.
//!
//! # Features
//!
//! - **Parser**: `type(scope)!: subject` headers, bodies, footer trailers,
//!   git comments and scissors lines
//! - **Rules**: `type-enum`, `subject-case`, `subject-full-stop`, length
//!   limits, `body-leading-blank` and more, each with its own severity
//! - **Presets**: `strict` and `relaxed` rule sets
//! - **Ignores**: merge, revert and autosquash commits are skipped
//!
//! # Example
//!
//! ```
//! use commitlint::config::{parse_config, Preset};
//! use commitlint::{validate, Linter, Severity};
//!
//! let rules = Preset::Strict.rules();
//! assert!(validate("feat: add parser", &rules).is_empty());
//!
//! let result = validate("foo: add parser", &rules);
//! assert_eq!(result.findings()[0].rule, "type-enum");
//! assert_eq!(result.findings()[0].severity, Severity::Error);
//!
//! let config = parse_config("extends = \"strict\"\n[rules]\nsubject-case = [0]\n").unwrap();
//! let linter = Linter::new(config).unwrap();
//! assert!(linter.lint("fix: Resolve crash").is_valid());
//! ```

// Module declarations
pub mod commit;
pub mod config;
pub mod error;
pub mod rules;

// Re-exports for convenience
pub use commit::CommitMessage;
pub use config::{Applicability, LintConfig, Preset, RuleConfig, RuleSetting, RuleValue, Severity};
pub use error::{CommitlintError, ConfigError, Result};
pub use rules::{validate, Finding, LintReport, Linter, ValidationResult};
