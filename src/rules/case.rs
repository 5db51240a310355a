// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Letter-case policies used by `type-case` and `subject-case`.

/// A casing policy, judged on the first cased letter and word shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CasePolicy {
    /// `add parser`
    LowerCase,
    /// `ADD PARSER`
    UpperCase,
    /// `Add parser`
    SentenceCase,
    /// `Add Parser`
    StartCase,
    /// `AddParser`
    PascalCase,
    /// `addParser`
    CamelCase,
}

impl CasePolicy {
    /// Get the configuration name of the policy.
    pub fn as_str(&self) -> &'static str {
        match self {
            CasePolicy::LowerCase => "lower-case",
            CasePolicy::UpperCase => "upper-case",
            CasePolicy::SentenceCase => "sentence-case",
            CasePolicy::StartCase => "start-case",
            CasePolicy::PascalCase => "pascal-case",
            CasePolicy::CamelCase => "camel-case",
        }
    }

    /// Whether `text` follows this policy.
    pub fn matches(&self, text: &str) -> bool {
        let Some(first) = first_cased_letter(text) else {
            return false;
        };
        let single_word = !text.trim().contains(char::is_whitespace);

        match self {
            CasePolicy::LowerCase => first.is_lowercase(),
            CasePolicy::UpperCase => !text.chars().any(char::is_lowercase),
            CasePolicy::SentenceCase => first.is_uppercase(),
            CasePolicy::StartCase => text
                .split_whitespace()
                .filter_map(first_cased_letter)
                .all(char::is_uppercase),
            CasePolicy::PascalCase => {
                single_word && first.is_uppercase() && text.chars().any(char::is_lowercase)
            }
            CasePolicy::CamelCase => {
                single_word && first.is_lowercase() && text.chars().any(char::is_uppercase)
            }
        }
    }
}

impl std::str::FromStr for CasePolicy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lower-case" | "lowercase" => Ok(CasePolicy::LowerCase),
            "upper-case" | "uppercase" => Ok(CasePolicy::UpperCase),
            "sentence-case" | "sentencecase" => Ok(CasePolicy::SentenceCase),
            "start-case" | "startcase" => Ok(CasePolicy::StartCase),
            "pascal-case" | "pascalcase" => Ok(CasePolicy::PascalCase),
            "camel-case" | "camelcase" => Ok(CasePolicy::CamelCase),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for CasePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The first letter that has an upper/lower case distinction.
pub fn first_cased_letter(text: &str) -> Option<char> {
    text.chars().find(|c| c.is_lowercase() || c.is_uppercase())
}
