use assert_cmd::Command;

#[test]
fn list_prints_catalog() {
    let out = Command::cargo_bin("codetype")
        .unwrap()
        .arg("--list")
        .output()
        .unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    let ids: Vec<&str> = stdout
        .lines()
        .filter_map(|l| l.split('\t').next())
        .collect();
    assert_eq!(ids, vec!["python", "java", "sql", "js", "react", "pandas"]);
}

#[test]
fn list_uses_custom_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    std::fs::write(
        &path,
        r#"{"snippets":[{"id":"rust","title":"Rust · Hello","text":"fn main() {}"}]}"#,
    )
    .unwrap();

    let out = Command::cargo_bin("codetype")
        .unwrap()
        .arg("--snippets")
        .arg(&path)
        .arg("--list")
        .output()
        .unwrap();
    assert!(out.status.success());
    assert_eq!(String::from_utf8(out.stdout).unwrap(), "rust\tRust · Hello\n");
}

#[test]
fn bad_catalog_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    std::fs::write(&path, r#"{"snippets":[]}"#).unwrap();

    Command::cargo_bin("codetype")
        .unwrap()
        .arg("--snippets")
        .arg(&path)
        .arg("--list")
        .assert()
        .failure();
}

#[test]
fn non_tty_stdin_is_rejected() {
    Command::cargo_bin("codetype")
        .unwrap()
        .write_stdin("")
        .assert()
        .failure();
}
