// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration module for commitlint.
//!
//! This module defines the rule configuration object, parses it from TOML
//! and resolves the built-in presets.

pub mod default;
mod loader;
mod schema;

pub use default::{example_config, relaxed_rules, strict_rules};
pub use loader::{check_rules, parse_config, resolve_rules};
pub use schema::*;
