use clap::Parser;
use reposync::cli::{Args, Command};
use std::ffi::OsString;
use std::path::PathBuf;

fn make_args(args: &[&str]) -> Vec<OsString> {
    let mut res = vec![OsString::from("reposync")];
    res.extend(args.iter().map(OsString::from));
    res
}

#[test]
fn test_basic_args() {
    let parsed = Args::try_parse_from(make_args(&["index"])).unwrap();

    assert_eq!(parsed.command, Command::Index { check: false });
    assert_eq!(parsed.project_root, PathBuf::from("."));
    assert!(!parsed.verbose);
}

#[test]
fn test_all_flags() {
    let args = make_args(&["--verbose", "--project-root", "./repo", "embed", "--check"]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert_eq!(parsed.command, Command::Embed { check: true });
    assert_eq!(parsed.project_root, PathBuf::from("./repo"));
    assert!(parsed.verbose);
}

#[test]
fn test_global_flags_after_subcommand() {
    let parsed = Args::try_parse_from(make_args(&["build", "--skip-checks", "-v"])).unwrap();

    assert_eq!(parsed.command, Command::Build { skip_checks: true });
    assert!(parsed.verbose);
}

#[test]
fn test_check_ext() {
    let parsed = Args::try_parse_from(make_args(&["check-ext"])).unwrap();
    assert_eq!(parsed.command, Command::CheckExt);
}

#[test]
fn test_missing_subcommand() {
    assert!(Args::try_parse_from(make_args(&[])).is_err());
}

#[test]
fn test_unknown_flag() {
    assert!(Args::try_parse_from(make_args(&["index", "--skip-checks"])).is_err());
}
