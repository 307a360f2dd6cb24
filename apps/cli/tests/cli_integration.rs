use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const TABLE: &str = "Date,Headline,Content,Tag\n\
                     2020,X,**bold**,A\n\
                     2020,Y,plain,\n\
                     1815,Waterloo,\"# Battle\n\nNapoleon *defeated*\",War/Europe\n";

const DOCUMENT: &str = "<html>\n<body>\n<h1>History</h1>\n\
                        <!-- BEGIN TIMELINE CONTENT -->\nold\n<!-- END TIMELINE CONTENT -->\n\
                        <footer>fin</footer>\n</body>\n</html>\n";

/// Temp workspace with an isolated HOME so no user config leaks in.
struct TestEnvironment {
    temp_dir: TempDir,
}

impl TestEnvironment {
    fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("tempdir"),
        }
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        fs::write(&path, content).expect("write fixture");
        path
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("timelinegen").expect("binary built");
        cmd.env("HOME", self.temp_dir.path())
            .env_remove("TIMELINEGEN_CONFIG")
            .env_remove("RUST_LOG");
        cmd
    }
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).expect("read output")
}

#[test]
fn help_lists_positionals() {
    TestEnvironment::new()
        .cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("[INPUT]"))
        .stdout(predicate::str::contains("[OUTPUT]"))
        .stdout(predicate::str::contains("--no-tag-legend"));
}

#[test]
fn no_arguments_prints_message_and_exits_zero() {
    TestEnvironment::new()
        .cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("No input file specified"));
}

#[test]
fn missing_output_prints_message_and_touches_nothing() {
    let env = TestEnvironment::new();
    let input = env.write("events.csv", TABLE);

    env.cmd()
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("No output file specified"));

    assert_eq!(read(&input), TABLE);
}

#[test]
fn generates_timeline_in_place() {
    let env = TestEnvironment::new();
    let input = env.write("events.csv", TABLE);
    let output = env.write("index.html", DOCUMENT);

    env.cmd()
        .arg(&input)
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Parsing "))
        .stdout(predicate::str::contains("Writing to "));

    let html = read(&output);
    assert!(html.starts_with("<html>\n<body>\n<h1>History</h1>\n<!-- BEGIN TIMELINE CONTENT -->\n"));
    assert!(html.ends_with("<!-- END TIMELINE CONTENT -->\n<footer>fin</footer>\n</body>\n</html>\n"));
    assert!(!html.contains("\nold\n"));

    assert!(html.contains("<span class=\"tag_switch\">A</span>"));
    assert!(html.contains("<div class=\"timelineMajor a-tag\">"));
    assert!(html.contains("<dt><a>[A] X</a></dt>"));
    assert!(html.contains("<dt><a>Y</a></dt>"));
    assert!(html.contains("<dt><a>[War] [Europe] Waterloo</a></dt>"));
    assert!(html.contains("<p><strong>bold</strong></p>"));
    assert!(html.contains("<h1>Battle</h1>"));
    assert!(html.find("<span>2020</span>") < html.find("<span>1815</span>"));
}

#[test]
fn rerunning_is_idempotent() {
    let env = TestEnvironment::new();
    let input = env.write("events.csv", TABLE);
    let output = env.write("index.html", DOCUMENT);

    env.cmd().arg(&input).arg(&output).assert().success();
    let once = read(&output);
    env.cmd().arg(&input).arg(&output).assert().success();

    assert_eq!(read(&output), once);
}

#[test]
fn no_tag_legend_flag_renders_simple_variant() {
    let env = TestEnvironment::new();
    let input = env.write("events.csv", TABLE);
    let output = env.write("index.html", DOCUMENT);

    env.cmd()
        .arg(&input)
        .arg(&output)
        .arg("--no-tag-legend")
        .assert()
        .success();

    let html = read(&output);
    assert!(!html.contains("tag_switch"));
    assert!(!html.contains("a-tag"));
    assert!(html.contains("<dt><a>[A] X</a></dt>"));
}

#[test]
fn config_file_options_apply() {
    let env = TestEnvironment::new();
    let input = env.write(
        "events.tsv",
        "Date\tHeadline\tContent\tTag\n2001\tOdyssey\t~~HAL~~\tForeign Policy\n",
    );
    let output = env.write("index.html", DOCUMENT);
    let config = env.write(
        "timelinegen.toml",
        "[input]\ndelimiter = \"\\t\"\n\n[render]\nsanitize_tag_classes = true\n\n[markdown]\nstrikethrough = true\n",
    );

    env.cmd()
        .arg(&input)
        .arg(&output)
        .arg("--config")
        .arg(&config)
        .assert()
        .success();

    let html = read(&output);
    assert!(html.contains("<div class=\"timelineMajor foreign-policy-tag\">"));
    assert!(html.contains("<del>HAL</del>"));
}

#[test]
fn document_without_markers_is_left_unchanged() {
    let env = TestEnvironment::new();
    let input = env.write("events.csv", TABLE);
    let output = env.write("plain.html", "<p>static page</p>\n");

    env.cmd().arg(&input).arg(&output).assert().success();

    assert_eq!(read(&output), "<p>static page</p>\n");
}

#[test]
fn strict_flag_fails_without_markers() {
    let env = TestEnvironment::new();
    let input = env.write("events.csv", TABLE);
    let output = env.write("plain.html", "<p>static page</p>");

    env.cmd()
        .arg(&input)
        .arg(&output)
        .arg("--strict")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no timeline region found"));

    assert_eq!(read(&output), "<p>static page</p>");
}

#[test]
fn missing_input_fails_with_read_error() {
    let env = TestEnvironment::new();
    let output = env.write("index.html", DOCUMENT);

    env.cmd()
        .arg(env.temp_dir.path().join("absent.csv"))
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("read error"));

    assert_eq!(read(&output), DOCUMENT);
}

#[test]
fn unbalanced_quoting_fails_with_read_error() {
    let env = TestEnvironment::new();
    let input = env.write("events.csv", "Date,Headline,Content\n2020,X,\"open\n2021,Y,z\n");
    let output = env.write("index.html", DOCUMENT);

    env.cmd()
        .arg(&input)
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unbalanced quoting"));

    assert_eq!(read(&output), DOCUMENT);
}

#[test]
fn empty_table_splices_empty_container() {
    let env = TestEnvironment::new();
    let input = env.write("events.csv", "");
    let output = env.write("index.html", DOCUMENT);

    env.cmd().arg(&input).arg(&output).assert().success();

    let html = read(&output);
    assert!(html.contains("<div id=\"timelineContainer\" class=\"timelineContainer\">\n  </div>"));
    assert!(!html.contains("\nold\n"));
}

#[test]
fn missing_output_document_fails_with_write_error() {
    let env = TestEnvironment::new();
    let input = env.write("events.csv", TABLE);

    env.cmd()
        .arg(&input)
        .arg(env.temp_dir.path().join("absent.html"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("write error"));
}
