// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Messages that are skipped instead of validated.

use lazy_static::lazy_static;
use regex::Regex;

use crate::commit::significant_lines;

lazy_static! {
    /// Headers produced by git and hosting tools rather than by people.
    static ref DEFAULT_IGNORES: Vec<Regex> = [
        r"^Merge pull request",
        r"^Merge (.*?) into (.*?)$",
        r"^Merge branch (.*?)$",
        r"^Merge tag (.*?)$",
        r"^Merge remote-tracking branch(\s*)(.*)",
        r"^Merged (.*?)(in|into) (.*)",
        r"^Merged PR (.*): (.*)",
        r"^Automatic merge(.*)",
        r"^Auto-merged (.*?) into (.*)",
        r"^(R|r)evert (.*)",
        r"^(amend|fixup|squash)! ",
        r"^v?\d+\.\d+\.\d+(?:-[0-9A-Za-z.-]+)?(?:\+[0-9A-Za-z.-]+)?$",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect();
}

/// The header line of a message, after git comments are dropped.
pub(crate) fn first_line(message: &str) -> &str {
    significant_lines(message)
        .first()
        .copied()
        .unwrap_or("")
        .trim()
}

/// The message text that ignore patterns are matched against.
pub(crate) fn ignore_subject(message: &str) -> String {
    significant_lines(message).join("\n")
}

/// Whether a message matches one of the built-in ignore patterns.
pub fn is_default_ignored(message: &str) -> bool {
    let header = first_line(message);
    DEFAULT_IGNORES.iter().any(|re| re.is_match(header))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_commits_are_ignored() {
        assert!(is_default_ignored("Merge branch 'main' into feature"));
        assert!(is_default_ignored("Merge pull request #12 from user/branch"));
        assert!(is_default_ignored("Merge remote-tracking branch 'origin/main'"));
        assert!(is_default_ignored("Merge tag 'v1.0.0'"));
    }

    #[test]
    fn test_revert_and_autosquash_are_ignored() {
        assert!(is_default_ignored("Revert \"feat: add parser\"\n\nThis reverts commit abc."));
        assert!(is_default_ignored("fixup! feat: add parser"));
        assert!(is_default_ignored("squash! fix: crash"));
    }

    #[test]
    fn test_ignores_skip_git_comments() {
        let message = "# Please enter the commit message for your changes.\nMerge branch 'main' into feature\n";
        assert!(is_default_ignored(message));
        assert_eq!(first_line(message), "Merge branch 'main' into feature");
        assert_eq!(ignore_subject("# note\nWIP\n\nbody\n# more"), "WIP\n\nbody");
    }

    #[test]
    fn test_version_bumps_are_ignored() {
        assert!(is_default_ignored("1.2.3"));
        assert!(is_default_ignored("v2.0.0-rc.1"));
        assert!(!is_default_ignored("v2 is coming"));
    }

    #[test]
    fn test_conventional_commits_are_not_ignored() {
        assert!(!is_default_ignored("feat: add parser"));
        assert!(!is_default_ignored("revert: undo the parser"));
        assert!(!is_default_ignored(""));
    }
}
