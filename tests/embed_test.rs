use reposync::command::ExternalCommand;
use reposync::config::EmbedConfig;
use reposync::embed::embed_samples;
use reposync::error::Error;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const README: &str = "# Demo\n\n## Add\n\n```ts\n```\n\n## Multiply\n\n```ts\nstale();\n```\n";

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "README.md", README);
    write(
        dir.path(),
        "samples/add.mts",
        "import { add } from '../src/index.mjs';\n// ignore-above\nconsole.log(add(1, 2));\n",
    );
    write(
        dir.path(),
        "samples/multiply.mts",
        "import { mul } from '../src/index.mjs';\n// ignore-above\n  {\n    mul(2, 3);\n  }\n// ignore-below\nexport {};\n",
    );
    dir
}

fn config(mappings: &[(&str, &[&str])]) -> EmbedConfig {
    let mut config = EmbedConfig::default();
    for (target, samples) in mappings {
        config.mappings.insert(
            target.to_string(),
            samples.iter().map(|s| s.to_string()).collect(),
        );
    }
    config
}

#[test_log::test]
fn test_sequential_splicing() {
    let dir = project();
    let config = config(&[("README.md", &["samples/add.mts", "samples/multiply.mts"])]);

    let report = embed_samples(dir.path(), &config, true).unwrap();
    assert_eq!(report.changed().len(), 1);
    assert_eq!(
        fs::read_to_string(dir.path().join("README.md")).unwrap(),
        "# Demo\n\n## Add\n\n```ts\nconsole.log(add(1, 2));\n```\n\n\
         ## Multiply\n\n```ts\n{\n  mul(2, 3);\n}\n```\n"
    );
}

#[test]
fn test_rerun_is_stable() {
    let dir = project();
    let config = config(&[("README.md", &["samples/add.mts", "samples/multiply.mts"])]);

    embed_samples(dir.path(), &config, true).unwrap();
    let first = fs::read_to_string(dir.path().join("README.md")).unwrap();
    let report = embed_samples(dir.path(), &config, true).unwrap();

    assert!(report.changed().is_empty());
    assert_eq!(fs::read_to_string(dir.path().join("README.md")).unwrap(), first);
}

#[test]
fn test_more_samples_than_blocks() {
    let dir = project();
    write(dir.path(), "samples/extra.mts", "extra();\n");
    let config = config(&[(
        "README.md",
        &["samples/add.mts", "samples/multiply.mts", "samples/extra.mts"],
    )]);

    match embed_samples(dir.path(), &config, true) {
        Err(Error::NotFound(msg)) => {
            assert!(msg.contains("samples/extra.mts"));
            assert!(msg.contains("README.md"));
        }
        other => panic!("Expected NotFound, got {other:?}"),
    }
    assert_eq!(fs::read_to_string(dir.path().join("README.md")).unwrap(), README);
}

#[test]
fn test_failure_writes_no_target() {
    let dir = project();
    write(dir.path(), "GUIDE.md", "```ts\n```\n");
    let config = config(&[
        ("GUIDE.md", &["samples/add.mts"]),
        ("README.md", &["samples/missing.mts"]),
    ]);

    let err = embed_samples(dir.path(), &config, true).unwrap_err();
    assert!(matches!(err, Error::NotFound(msg) if msg.contains("missing.mts")));
    assert_eq!(fs::read_to_string(dir.path().join("GUIDE.md")).unwrap(), "```ts\n```\n");
}

#[test]
fn test_doc_comment_target() {
    let dir = project();
    write(
        dir.path(),
        "src/add.mts",
        "/**\n * Adds two numbers.\n *\n * ```ts\n * ```\n */\nexport const add = (a: number, b: number) => a + b;\n",
    );
    let config = config(&[("src/add.mts", &["samples/multiply.mts"])]);

    embed_samples(dir.path(), &config, true).unwrap();
    assert_eq!(
        fs::read_to_string(dir.path().join("src/add.mts")).unwrap(),
        "/**\n * Adds two numbers.\n *\n * ```ts\n * {\n *   mul(2, 3);\n * }\n * ```\n */\n\
         export const add = (a: number, b: number) => a + b;\n"
    );
}

#[test]
fn test_check_mode_does_not_write() {
    let dir = project();
    let config = config(&[("README.md", &["samples/add.mts", "samples/multiply.mts"])]);

    let report = embed_samples(dir.path(), &config, false).unwrap();
    assert_eq!(report.changed(), vec![dir.path().join("README.md").as_path()]);
    assert_eq!(fs::read_to_string(dir.path().join("README.md")).unwrap(), README);
}

#[cfg(unix)]
fn recording_formatter() -> ExternalCommand {
    ExternalCommand::new(
        "sh",
        &[
            "-c",
            "for f in \"$@\"; do test -f \"$f\" || exit 7; echo \"$f\"; done > formatted.txt",
            "fmt",
        ],
    )
}

#[cfg(unix)]
#[test]
fn test_formatter_receives_changed_targets() {
    let dir = project();
    write(dir.path(), "GUIDE.md", "```ts\n```\n");
    let mut config = config(&[
        ("README.md", &["samples/add.mts", "samples/multiply.mts"]),
        ("GUIDE.md", &["samples/add.mts"]),
    ]);
    config.formatter = Some(recording_formatter());

    embed_samples(dir.path(), &config, true).unwrap();
    assert_eq!(
        fs::read_to_string(dir.path().join("formatted.txt")).unwrap(),
        "README.md\nGUIDE.md\n"
    );

    // Nothing changed on the second run, so the formatter is not invoked.
    fs::remove_file(dir.path().join("formatted.txt")).unwrap();
    embed_samples(dir.path(), &config, true).unwrap();
    assert!(!dir.path().join("formatted.txt").exists());
}

#[cfg(unix)]
#[test]
fn test_formatter_with_relative_project_root() {
    let dir = TempDir::new_in(".").unwrap();
    assert!(dir.path().is_relative());
    write(dir.path(), "docs/README.md", README);
    write(dir.path(), "samples/add.mts", "add(1, 2);\n");
    let mut config = config(&[("docs/README.md", &["samples/add.mts", "samples/add.mts"])]);
    config.formatter = Some(recording_formatter());

    embed_samples(dir.path(), &config, true).unwrap();
    assert_eq!(
        fs::read_to_string(dir.path().join("formatted.txt")).unwrap(),
        "docs/README.md\n"
    );
}
