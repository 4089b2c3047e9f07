//! Integration tests driving the compiled binary

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;
use tempfile::tempdir;

const DICT: &str = "\
<!-- <pos> (part of speech) entities -->
<!ENTITY n \"noun (common)\">
<entry>
<ent_seq>1000</ent_seq>
<k_ele>
<keb>書く</keb>
</k_ele>
<r_ele>
<reb>かく</reb>
</r_ele>
<sense>
<pos>&v5k;</pos>
<gloss>to write</gloss>
</sense>
</entry>
<entry>
<ent_seq>1001</ent_seq>
<r_ele>
<reb>パン</reb>
</r_ele>
<sense>
<pos>&n;</pos>
<gloss>bread</gloss>
</sense>
</entry>
";

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_jmdict2json"))
        .current_dir(dir)
        .args(args)
        .output()
        .unwrap()
}

fn write_dict(dir: &Path) {
    fs::write(dir.join("JMdict_e"), DICT).unwrap();
}

#[test]
fn test_default_run_writes_compact_json() {
    let dir = tempdir().unwrap();
    write_dict(dir.path());

    let output = run(dir.path(), &["--quiet"]);
    assert!(output.status.success());

    let json = fs::read_to_string(dir.path().join("output.json")).unwrap();
    assert!(json.starts_with("[{\"ent_seq\":\"1000\""));
    assert!(!json.contains('\n'));

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 2);
}

#[test]
fn test_legacy_positional_indent_argument() {
    let dir = tempdir().unwrap();
    write_dict(dir.path());

    let output = run(dir.path(), &["2", "--quiet", "-o", "pretty.json"]);
    assert!(output.status.success());

    let json = fs::read_to_string(dir.path().join("pretty.json")).unwrap();
    assert!(json.contains("\n  {\n"));
    assert!(json.contains("    \"ent_seq\": \"1000\","));
}

#[test]
fn test_low_memory_matches_in_memory_output() {
    let dir = tempdir().unwrap();
    write_dict(dir.path());

    assert!(run(dir.path(), &["--indent", "2", "--quiet", "-o", "a.json"])
        .status
        .success());
    assert!(run(
        dir.path(),
        &[
            "--indent",
            "2",
            "--low-memory",
            "--batch-size",
            "1",
            "--quiet",
            "-o",
            "b.json"
        ]
    )
    .status
    .success());

    assert_eq!(
        fs::read_to_string(dir.path().join("a.json")).unwrap(),
        fs::read_to_string(dir.path().join("b.json")).unwrap()
    );
}

#[test]
fn test_dump_entities_writes_table() {
    let dir = tempdir().unwrap();
    write_dict(dir.path());

    let output = run(
        dir.path(),
        &["--quiet", "--dump-entities", "entities.json"],
    );
    assert!(output.status.success());

    let table: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("entities.json")).unwrap())
            .unwrap();
    assert_eq!(table["categories"][0]["code"], "pos");
    assert_eq!(table["categories"][0]["entities"][0]["code"], "n");
}

#[test]
fn test_missing_input_reports_error_and_nonzero_exit() {
    let dir = tempdir().unwrap();

    let output = run(dir.path(), &["--quiet", "-i", "no_such_file"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no_such_file"), "stderr: {}", stderr);
    assert!(!dir.path().join("output.json").exists());
}

#[test]
fn test_unknown_flag_is_rejected() {
    let dir = tempdir().unwrap();

    let output = run(dir.path(), &["--frobnicate"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--frobnicate"), "stderr: {}", stderr);
}

#[test]
fn test_validate_conflicts_with_low_memory() {
    let dir = tempdir().unwrap();
    write_dict(dir.path());

    let output = run(dir.path(), &["--low-memory", "--validate", "--quiet"]);
    assert!(!output.status.success());
}

#[test]
fn test_stats_flag_prints_summary() {
    let dir = tempdir().unwrap();
    write_dict(dir.path());

    let output = run(dir.path(), &["--stats"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Conversion statistics"), "stdout: {}", stdout);
    assert!(stdout.contains("Entries: 2"), "stdout: {}", stdout);
}
