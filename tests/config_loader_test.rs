//! Configuration loading through the full provider stack: defaults, YAML
//! file, prefixed environment and the credential variables.

use std::io::Write;

use release_verifier::domain::models::ContentPredicate;
use release_verifier::{ConfigError, ConfigLoader};
use tempfile::NamedTempFile;

fn yaml_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write temp file");
    file
}

const CREDENTIALS: [(&str, Option<&str>); 2] = [
    ("GITHUB_RELEASE_TOKEN", Some("ghp_testtoken")),
    ("GITHUB_ORG_HARMONY", Some("acme-harmony")),
];

#[test]
fn test_defaults_with_credentials_from_env() {
    temp_env::with_vars(CREDENTIALS, || {
        let config = ConfigLoader::load_from("does-not-exist.yaml").expect("config should load");

        assert_eq!(config.github.token, "ghp_testtoken");
        assert_eq!(config.repository.organization, "acme-harmony");
        assert_eq!(config.repository.name, "harmony");
        assert_eq!(config.github.api_base, "https://api.github.com");
        assert_eq!(config.release.release_branch, "release-v1.1.0");
        assert_eq!(config.release.base_branch, "main");
        assert_eq!(config.files.len(), 4);
        assert_eq!(config.pipeline.deadline_secs, None);
    });
}

#[test]
fn test_missing_token_is_reported() {
    temp_env::with_vars(
        [
            ("GITHUB_RELEASE_TOKEN", None),
            ("GITHUB_ORG_HARMONY", Some("acme-harmony")),
        ],
        || {
            let err = ConfigLoader::load_from("does-not-exist.yaml").unwrap_err();
            assert_eq!(err, ConfigError::MissingToken);
        },
    );
}

#[test]
fn test_missing_organization_is_reported() {
    temp_env::with_vars(
        [
            ("GITHUB_RELEASE_TOKEN", Some("ghp_testtoken")),
            ("GITHUB_ORG_HARMONY", None),
        ],
        || {
            let err = ConfigLoader::load_from("does-not-exist.yaml").unwrap_err();
            assert_eq!(err, ConfigError::MissingOrganization);
        },
    );
}

#[test]
fn test_yaml_overrides_release_policy() {
    let file = yaml_file(
        r###"
repository:
  name: harmony-next
release:
  release_branch: release-v2.0.0
  pr_title_keyword: Release v2.0.0
files:
  - name: crate manifest
    path: Cargo.toml
    branch: main
    min_size_bytes: 100
    predicate:
      kind: single_substring
      value: 'version = "2.0.0"'
  - name: changelog
    path: CHANGELOG.md
    branch: main
    min_size_bytes: 100
    predicate:
      kind: all_of_keywords
      value:
        - "## [2.0.0]"
pipeline:
  deadline_secs: 60
"###,
    );

    temp_env::with_vars(CREDENTIALS, || {
        let config = ConfigLoader::load_from(file.path()).expect("config should load");

        assert_eq!(config.repository.name, "harmony-next");
        assert_eq!(config.release.release_branch, "release-v2.0.0");
        assert_eq!(config.release.base_branch, "main");
        assert_eq!(config.files.len(), 2);
        assert_eq!(
            config.files[0].predicate,
            ContentPredicate::SingleSubstring(r#"version = "2.0.0""#.to_string())
        );
        assert_eq!(
            config.files[1].predicate,
            ContentPredicate::AllOfKeywords(vec!["## [2.0.0]".to_string()])
        );
        assert_eq!(config.pipeline.deadline_secs, Some(60));
    });
}

#[test]
fn test_prefixed_env_overrides_yaml() {
    let file = yaml_file(
        r"
github:
  timeout_secs: 5
logging:
  level: info
",
    );

    temp_env::with_vars(
        [
            ("GITHUB_RELEASE_TOKEN", Some("ghp_testtoken")),
            ("GITHUB_ORG_HARMONY", Some("acme-harmony")),
            ("RELEASE_VERIFIER_GITHUB__TIMEOUT_SECS", Some("30")),
            ("RELEASE_VERIFIER_LOGGING__FORMAT", Some("json")),
        ],
        || {
            let config = ConfigLoader::load_from(file.path()).expect("config should load");
            assert_eq!(config.github.timeout_secs, 30);
            assert_eq!(config.logging.level, "info");
            assert_eq!(config.logging.format, "json");
        },
    );
}

#[test]
fn test_invalid_yaml_value_is_rejected() {
    let file = yaml_file(
        r"
files:
  - name: manifest
    path: Cargo.toml
    branch: main
    min_size_bytes: 0
    predicate:
      kind: single_substring
      value: version
",
    );

    temp_env::with_vars(CREDENTIALS, || {
        let err = ConfigLoader::load_from(file.path()).unwrap_err();
        assert_eq!(err, ConfigError::InvalidMinSize("manifest".to_string()));
    });
}

#[test]
fn test_unknown_predicate_kind_fails_extraction() {
    let file = yaml_file(
        r"
files:
  - name: manifest
    path: Cargo.toml
    branch: main
    min_size_bytes: 10
    predicate:
      kind: regex
      value: 'v\d+'
",
    );

    temp_env::with_vars(CREDENTIALS, || {
        let err = ConfigLoader::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Extract(_)));
    });
}

#[test]
fn test_env_file_fills_unset_variables_only() {
    let env_file = yaml_file(
        "GITHUB_RELEASE_TOKEN=ghp_fromfile\nGITHUB_ORG_HARMONY=file-org\n",
    );

    temp_env::with_vars(
        [
            ("GITHUB_RELEASE_TOKEN", None),
            ("GITHUB_ORG_HARMONY", Some("env-org")),
        ],
        || {
            ConfigLoader::load_env_file(env_file.path()).expect("env file should load");
            let config = ConfigLoader::load_from("does-not-exist.yaml").expect("config should load");

            assert_eq!(config.github.token, "ghp_fromfile");
            assert_eq!(config.repository.organization, "env-org");
        },
    );
}

#[test]
fn test_missing_env_file_is_ignored() {
    temp_env::with_vars(CREDENTIALS, || {
        assert!(ConfigLoader::load_env_file("no-such-dir/.env.release").is_ok());
        assert!(ConfigLoader::load_from("does-not-exist.yaml").is_ok());
    });
}

#[test]
fn test_malformed_env_file_is_reported() {
    let env_file = yaml_file(
        "export BROKEN LINE ==\nGITHUB_RELEASE_TOKEN=ghp_fromfile\nGITHUB_ORG_HARMONY=file-org\n",
    );

    temp_env::with_vars(
        [("GITHUB_RELEASE_TOKEN", None::<&str>), ("GITHUB_ORG_HARMONY", None)],
        || {
            let err = ConfigLoader::load_env_file(env_file.path()).unwrap_err();
            assert!(matches!(err, ConfigError::EnvFile(_)));
            assert!(err.to_string().contains(".env.release"));
        },
    );
}

#[test]
fn test_numeric_organization_stays_a_string() {
    temp_env::with_vars(
        [
            ("GITHUB_RELEASE_TOKEN", Some("ghp_testtoken")),
            ("GITHUB_ORG_HARMONY", Some("2024")),
        ],
        || {
            let config = ConfigLoader::load_from("does-not-exist.yaml").expect("config should load");
            assert_eq!(config.repository.organization, "2024");
            assert_eq!(config.github.token, "ghp_testtoken");
        },
    );
}

#[test]
fn test_numeric_token_stays_a_string() {
    temp_env::with_vars(
        [
            ("GITHUB_RELEASE_TOKEN", Some("1234567890")),
            ("GITHUB_ORG_HARMONY", Some("acme-harmony")),
        ],
        || {
            let config = ConfigLoader::load_from("does-not-exist.yaml").expect("config should load");
            assert_eq!(config.github.token, "1234567890");
        },
    );
}
