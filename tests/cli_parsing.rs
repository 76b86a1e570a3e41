use clap::error::ErrorKind;
use clap::Parser;
use release_verifier::cli::Cli;

#[test]
fn test_parse_without_arguments() {
    assert!(Cli::try_parse_from(["release-verifier"]).is_ok());
}

#[test]
fn test_rejects_positional_arguments() {
    let err = Cli::try_parse_from(["release-verifier", "main"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownArgument);
}

#[test]
fn test_rejects_unknown_flags() {
    let err = Cli::try_parse_from(["release-verifier", "--branch", "main"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownArgument);
}

#[test]
fn test_version_flag() {
    let err = Cli::try_parse_from(["release-verifier", "--version"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DisplayVersion);
}

#[test]
fn test_help_flag() {
    let err = Cli::try_parse_from(["release-verifier", "--help"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DisplayHelp);
}
