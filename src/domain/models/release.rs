//! Release policy: the branches, PR title keyword and file rules under test.

use serde::{Deserialize, Serialize};

/// The release being verified. Constant for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ReleaseSpec {
    /// Branch holding the candidate release, e.g. `release-v1.1.0`.
    #[serde(default = "default_release_branch")]
    pub release_branch: String,

    /// Branch the release PR merges into.
    #[serde(default = "default_base_branch")]
    pub base_branch: String,

    /// Case-insensitive substring the release PR title must contain.
    #[serde(default = "default_pr_title_keyword")]
    pub pr_title_keyword: String,
}

fn default_release_branch() -> String {
    "release-v1.1.0".to_string()
}

fn default_base_branch() -> String {
    "main".to_string()
}

fn default_pr_title_keyword() -> String {
    "Release v1.1.0".to_string()
}

impl Default for ReleaseSpec {
    fn default() -> Self {
        Self {
            release_branch: default_release_branch(),
            base_branch: default_base_branch(),
            pr_title_keyword: default_pr_title_keyword(),
        }
    }
}

impl ReleaseSpec {
    /// Whether a PR title carries the release keyword, ignoring case.
    pub fn title_matches(&self, title: &str) -> bool {
        title
            .to_lowercase()
            .contains(&self.pr_title_keyword.to_lowercase())
    }
}

/// What a file must contain.
///
/// The three shapes differ only in how they are declared and reported;
/// each one requires every listed string to appear verbatim in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ContentPredicate {
    /// One required snippet.
    SingleSubstring(String),
    /// Several required snippets.
    AllOfSubstrings(Vec<String>),
    /// Several required keywords, reported in full when missing.
    AllOfKeywords(Vec<String>),
}

impl ContentPredicate {
    /// Every string this predicate requires, in declared order.
    pub fn required(&self) -> Vec<&str> {
        match self {
            Self::SingleSubstring(text) => vec![text.as_str()],
            Self::AllOfSubstrings(list) | Self::AllOfKeywords(list) => {
                list.iter().map(String::as_str).collect()
            }
        }
    }

    /// Required strings that do not occur in `content`. Case-sensitive.
    pub fn missing_from<'a>(&'a self, content: &str) -> Vec<&'a str> {
        self.required()
            .into_iter()
            .filter(|needle| !content.contains(needle))
            .collect()
    }

    /// Noun used in diagnostics for this predicate shape.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::SingleSubstring(_) | Self::AllOfSubstrings(_) => "content",
            Self::AllOfKeywords(_) => "keywords",
        }
    }
}

/// One required file and the rule it must satisfy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FileRule {
    /// Human label used in narration, e.g. "changelog".
    pub name: String,
    /// Repository-relative path.
    pub path: String,
    /// Ref the file is read from.
    pub branch: String,
    /// Minimum size of the decoded text, in UTF-8 bytes. Files with
    /// non-ASCII text reach the threshold with fewer characters than a
    /// character count would need.
    pub min_size_bytes: usize,
    /// Required content.
    pub predicate: ContentPredicate,
}

/// File rules for the harmony v1.1.0 release.
pub fn default_file_rules() -> Vec<FileRule> {
    vec![
        FileRule {
            name: "encoding config".to_string(),
            path: "src/encoding.rs".to_string(),
            branch: "main".to_string(),
            min_size_bytes: 500,
            predicate: ContentPredicate::SingleSubstring(
                r#"FormattingToken::MetaSep => "<|meta_sep|>""#.to_string(),
            ),
        },
        FileRule {
            name: "registry".to_string(),
            path: "src/registry.rs".to_string(),
            branch: "main".to_string(),
            min_size_bytes: 500,
            predicate: ContentPredicate::AllOfSubstrings(vec![
                r#"(FormattingToken::MetaSep, "<|meta_sep|>")"#.to_string(),
                r#"(FormattingToken::MetaEnd, "<|meta_end|>")"#.to_string(),
            ]),
        },
        FileRule {
            name: "crate manifest".to_string(),
            path: "Cargo.toml".to_string(),
            branch: "main".to_string(),
            min_size_bytes: 200,
            predicate: ContentPredicate::SingleSubstring(r#"version = "1.1.0""#.to_string()),
        },
        FileRule {
            name: "changelog".to_string(),
            path: "CHANGELOG.md".to_string(),
            branch: "main".to_string(),
            min_size_bytes: 300,
            predicate: ContentPredicate::AllOfKeywords(vec![
                "## [1.1.0] - 2025-08-07".to_string(),
                "MetaSep token mapping bug".to_string(),
                "Fixed MetaSep token".to_string(),
                "Registry now properly recognizes".to_string(),
            ]),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_match_ignores_case() {
        let spec = ReleaseSpec::default();
        assert!(spec.title_matches("chore: RELEASE V1.1.0"));
        assert!(spec.title_matches("Release v1.1.0"));
        assert!(!spec.title_matches("Release v1.0.9"));
    }

    #[test]
    fn test_missing_from_is_case_sensitive() {
        let predicate =
            ContentPredicate::AllOfKeywords(vec!["MetaSep token mapping bug".to_string()]);
        assert!(predicate
            .missing_from("Fixed the MetaSep token mapping bug.")
            .is_empty());
        assert_eq!(
            predicate.missing_from("fixed the metasep token mapping bug."),
            vec!["MetaSep token mapping bug"]
        );
    }

    #[test]
    fn test_missing_from_preserves_declared_order() {
        let predicate = ContentPredicate::AllOfSubstrings(vec![
            "alpha".to_string(),
            "beta".to_string(),
            "gamma".to_string(),
        ]);
        assert_eq!(predicate.missing_from("beta"), vec!["alpha", "gamma"]);
    }

    #[test]
    fn test_predicate_yaml_shape() {
        let yaml = "kind: all_of_keywords\nvalue:\n  - one\n  - two\n";
        let predicate: ContentPredicate = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            predicate,
            ContentPredicate::AllOfKeywords(vec!["one".to_string(), "two".to_string()])
        );
    }

    #[test]
    fn test_default_rules_cover_release_files() {
        let rules = default_file_rules();
        let paths: Vec<_> = rules.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["src/encoding.rs", "src/registry.rs", "Cargo.toml", "CHANGELOG.md"]
        );
        assert!(rules.iter().all(|r| r.min_size_bytes > 0));
    }
}
