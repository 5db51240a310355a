// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Commit message structure and parsing.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    /// Regex for a conventional commit header.
    static ref HEADER_REGEX: Regex = Regex::new(
        r"^(?P<type>[^\s():!]+)(?:\((?P<scope>[^()]+)\))?(?P<breaking>!)?:(?:\s+(?P<subject>.*))?$"
    ).unwrap();

    /// Regex for a footer trailer line (`Token: value` or `Token #value`).
    static ref TRAILER_REGEX: Regex = Regex::new(
        r"^(?P<token>BREAKING[ -]CHANGE|[A-Za-z][\w-]*)(?:: | #)(?P<value>.*)$"
    ).unwrap();
}

/// Marker git places before the diff in verbose commits.
const SCISSORS: &str = "------------------------ >8 ------------------------";

/// Git comment character.
const COMMENT_CHAR: char = '#';

/// A single `token: value` footer entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trailer {
    /// Trailer token (e.g. `Refs`, `BREAKING CHANGE`).
    pub token: String,
    /// Trailer value, including continuation lines.
    pub value: String,
}

impl Trailer {
    /// Whether this trailer announces a breaking change.
    pub fn is_breaking_change(&self) -> bool {
        self.token == "BREAKING CHANGE" || self.token == "BREAKING-CHANGE"
    }
}

/// A parsed commit message.
///
/// Parsing never fails. An unparseable header leaves `commit_type` empty and
/// the message is reported as structurally invalid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommitMessage {
    /// The raw header line.
    pub header: String,
    /// Commit type (feat, fix, etc.). Empty when the header is unparseable.
    pub commit_type: String,
    /// Optional scope.
    pub scope: Option<String>,
    /// Subject line.
    pub subject: String,
    /// Optional body.
    pub body: Option<String>,
    /// Optional footer.
    pub footer: Option<String>,
    /// Footer parsed into trailers.
    pub trailers: Vec<Trailer>,
    /// Whether this is a breaking change (`!` marker or trailer).
    pub is_breaking: bool,
    /// Blank lines between the header and the body.
    pub body_leading_blank_lines: usize,
    /// 1-based line where the body starts.
    pub body_line: Option<usize>,
    /// 1-based line where the footer starts.
    pub footer_line: Option<usize>,
}

impl CommitMessage {
    /// Parse a commit message from a string.
    pub fn parse(message: &str) -> Self {
        let lines = significant_lines(message);

        let Some((header, rest)) = lines.split_first() else {
            return Self::default();
        };

        let mut parsed = Self {
            header: header.to_string(),
            ..Self::default()
        };

        if let Some(captures) = HEADER_REGEX.captures(header.trim()) {
            parsed.commit_type = captures["type"].to_string();
            parsed.scope = captures.name("scope").map(|m| m.as_str().trim().to_string());
            parsed.subject = captures
                .name("subject")
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();
            parsed.is_breaking = captures.name("breaking").is_some();
        }

        let leading_blank = rest.iter().take_while(|line| is_blank(line)).count();
        let content = &rest[leading_blank..];
        parsed.body_leading_blank_lines = leading_blank;

        let footer_start = find_footer_start(content, leading_blank > 0).unwrap_or(content.len());
        let (body_lines, footer_lines) = content.split_at(footer_start);
        let content_line = 2 + leading_blank;

        parsed.body = join_lines(body_lines);
        if parsed.body.is_some() {
            parsed.body_line = Some(content_line);
        }

        parsed.footer = join_lines(footer_lines);
        if parsed.footer.is_some() {
            parsed.footer_line = Some(content_line + footer_start);
            parsed.trailers = parse_trailers(footer_lines);
        }

        parsed.is_breaking |= parsed.trailers.iter().any(Trailer::is_breaking_change);
        parsed
    }

    /// Whether the header has the `type(scope): subject` shape.
    pub fn is_structurally_valid(&self) -> bool {
        !self.commit_type.is_empty()
    }

    /// Individual scopes, split on `,`, `/` and `\`.
    pub fn scopes(&self) -> Vec<&str> {
        self.scope
            .as_deref()
            .map(|scope| {
                scope
                    .split([',', '/', '\\'])
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Description of the breaking change, if a trailer announces one.
    pub fn breaking_change(&self) -> Option<&str> {
        self.trailers
            .iter()
            .find(|t| t.is_breaking_change())
            .map(|t| t.value.as_str())
    }
}

impl std::str::FromStr for CommitMessage {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Lines that make up the message: no comments, nothing past the scissors,
/// no surrounding blank lines.
pub(crate) fn significant_lines(message: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = message
        .lines()
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .take_while(|line| !(line.starts_with(COMMENT_CHAR) && line.contains(SCISSORS)))
        .filter(|line| !line.starts_with(COMMENT_CHAR))
        .collect();

    while lines.last().is_some_and(|line| is_blank(line)) {
        lines.pop();
    }
    let leading = lines.iter().take_while(|line| is_blank(line)).count();
    lines.drain(..leading);
    lines
}

/// Index where the footer starts.
///
/// The footer is the last paragraph of the message, and only when that
/// paragraph holds nothing but trailers and their indented continuation
/// lines. It must be separated from the header by a blank line.
fn find_footer_start(content: &[&str], leading_blank: bool) -> Option<usize> {
    let start = content
        .iter()
        .rposition(|line| is_blank(line))
        .map_or(0, |i| i + 1);
    if start == 0 && !leading_blank {
        return None;
    }

    let (first, rest) = content[start..].split_first()?;
    let trailer_block = TRAILER_REGEX.is_match(first)
        && rest
            .iter()
            .all(|line| TRAILER_REGEX.is_match(line) || line.starts_with(char::is_whitespace));

    trailer_block.then_some(start)
}

fn join_lines(lines: &[&str]) -> Option<String> {
    let end = lines.iter().rposition(|line| !is_blank(line))?;
    Some(lines[..=end].join("\n"))
}

fn parse_trailers(lines: &[&str]) -> Vec<Trailer> {
    let mut trailers: Vec<Trailer> = Vec::new();

    for line in lines {
        if let Some(captures) = TRAILER_REGEX.captures(line) {
            trailers.push(Trailer {
                token: captures["token"].to_string(),
                value: captures["value"].to_string(),
            });
        } else if is_blank(line) {
            continue;
        } else if let Some(last) = trailers.last_mut() {
            last.value.push('\n');
            last.value.push_str(line);
        }
    }

    trailers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header_only() {
        let msg = CommitMessage::parse("feat: add parser");
        assert_eq!(msg.commit_type, "feat");
        assert!(msg.scope.is_none());
        assert_eq!(msg.subject, "add parser");
        assert!(msg.body.is_none());
        assert!(msg.footer.is_none());
        assert!(msg.is_structurally_valid());
    }

    #[test]
    fn test_parse_scope_and_breaking() {
        let msg = CommitMessage::parse("feat(core)!: drop legacy api");
        assert_eq!(msg.commit_type, "feat");
        assert_eq!(msg.scope.as_deref(), Some("core"));
        assert_eq!(msg.subject, "drop legacy api");
        assert!(msg.is_breaking);
    }

    #[test]
    fn test_parse_multiple_scopes() {
        let msg = CommitMessage::parse("fix(api, cli/core): handle errors");
        assert_eq!(msg.scopes(), vec!["api", "cli", "core"]);
    }

    #[test]
    fn test_parse_body_and_footer() {
        let msg = CommitMessage::parse(
            "fix: fix bug\n\nThis is the body\nsecond line\n\nRefs: #123\nBREAKING CHANGE: config format\n  is now TOML",
        );
        assert_eq!(msg.body.as_deref(), Some("This is the body\nsecond line"));
        assert_eq!(msg.body_line, Some(3));
        assert_eq!(
            msg.footer.as_deref(),
            Some("Refs: #123\nBREAKING CHANGE: config format\n  is now TOML")
        );
        assert_eq!(msg.footer_line, Some(6));
        assert_eq!(msg.trailers.len(), 2);
        assert_eq!(msg.trailers[0].token, "Refs");
        assert_eq!(msg.breaking_change(), Some("config format\n  is now TOML"));
        assert!(msg.is_breaking);
    }

    #[test]
    fn test_trailer_requires_blank_line() {
        let msg = CommitMessage::parse("docs: update readme\n\nNote: this starts the footer\n  more");
        assert!(msg.body.is_none());
        assert_eq!(msg.trailers[0].value, "this starts the footer\n  more");

        let msg = CommitMessage::parse("docs: update readme\n\nIntro\nNote: this stays in the body");
        assert!(msg.footer.is_none());
        assert_eq!(msg.body.as_deref(), Some("Intro\nNote: this stays in the body"));
    }

    #[test]
    fn test_footer_is_last_trailer_paragraph() {
        let long = "x".repeat(150);
        let msg = CommitMessage::parse(&format!("fix: crash\n\nSee: docs\n\n{}", long));
        assert!(msg.footer.is_none());
        assert!(msg.trailers.is_empty());
        assert_eq!(msg.body, Some(format!("See: docs\n\n{}", long)));

        let msg = CommitMessage::parse("fix: crash\n\nSee: docs\n\nSome context\n\nRefs: #1");
        assert_eq!(msg.body.as_deref(), Some("See: docs\n\nSome context"));
        assert_eq!(msg.footer.as_deref(), Some("Refs: #1"));
        assert_eq!(msg.footer_line, Some(7));
    }

    #[test]
    fn test_mixed_last_paragraph_stays_in_body() {
        let msg = CommitMessage::parse("fix: crash\n\nRefs: #1\nthis is just prose");
        assert!(msg.footer.is_none());
        assert_eq!(msg.body.as_deref(), Some("Refs: #1\nthis is just prose"));
    }

    #[test]
    fn test_hash_trailer() {
        let msg = CommitMessage::parse("fix: crash\n\nFixes #42");
        assert!(msg.body.is_none());
        assert_eq!(msg.trailers[0].token, "Fixes");
        assert_eq!(msg.trailers[0].value, "42");
    }

    #[test]
    fn test_body_leading_blank_lines() {
        let msg = CommitMessage::parse("fix: a\nbody right away");
        assert_eq!(msg.body_leading_blank_lines, 0);
        assert_eq!(msg.body_line, Some(2));

        let msg = CommitMessage::parse("fix: a\n\n\nbody");
        assert_eq!(msg.body_leading_blank_lines, 2);
        assert_eq!(msg.body_line, Some(4));
    }

    #[test]
    fn test_comments_and_scissors_are_dropped() {
        let msg = CommitMessage::parse(
            "feat: add parser\n# Please enter the commit message\n\nBody\n# ------------------------ >8 ------------------------\ndiff --git a/x b/x\n",
        );
        assert_eq!(msg.header, "feat: add parser");
        assert_eq!(msg.body.as_deref(), Some("Body"));
    }

    #[test]
    fn test_crlf_line_endings() {
        let msg = CommitMessage::parse("fix: crash\r\n\r\nDetails\r\n");
        assert_eq!(msg.subject, "crash");
        assert_eq!(msg.body.as_deref(), Some("Details"));
        assert_eq!(msg.body_leading_blank_lines, 1);
    }

    #[test]
    fn test_parse_invalid_header() {
        for input in ["not a conventional commit", "feat:missing space", "(core): no type", "feat(): empty scope"] {
            let msg = CommitMessage::parse(input);
            assert!(!msg.is_structurally_valid(), "{} should be invalid", input);
            assert_eq!(msg.header, input);
        }
    }

    #[test]
    fn test_parse_empty() {
        let msg = CommitMessage::parse("");
        assert!(msg.header.is_empty());
        assert!(!msg.is_structurally_valid());

        let msg = CommitMessage::parse("\n\n# only a comment\n");
        assert!(msg.header.is_empty());
    }

    #[test]
    fn test_empty_subject() {
        let msg = CommitMessage::parse("chore:");
        assert!(msg.is_structurally_valid());
        assert!(msg.subject.is_empty());
    }
}
