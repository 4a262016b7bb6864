use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;

fn write_sample(name: &str, bytes: &[u8]) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("charset-detector-rs-test-{}", name));
    fs::write(&path, bytes).expect("write sample file");
    path
}

#[test]
fn detects_ascii_file() {
    let path = write_sample("ascii.txt", b"just plain ascii text, nothing fancy here");
    Command::cargo_bin("charsetdetect")
        .unwrap()
        .arg(&path)
        .assert()
        .success()
        .code(predicate::eq(0))
        .stdout(predicate::str::contains("\"encoding\": \"ascii\""));
    fs::remove_file(path).ok();
}

#[test]
fn detects_utf8_sig_bom() {
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice("bonjour le monde".as_bytes());
    let path = write_sample("utf8sig.txt", &bytes);
    Command::cargo_bin("charsetdetect")
        .unwrap()
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("UTF-8-SIG"));
    fs::remove_file(path).ok();
}

#[test]
fn minimal_flag_prints_bare_encoding() {
    let path = write_sample("minimal.txt", b"hello");
    Command::cargo_bin("charsetdetect")
        .unwrap()
        .args([path.to_str().unwrap(), "--minimal"])
        .assert()
        .success()
        .stdout(predicate::eq("ascii\n"));
    fs::remove_file(path).ok();
}

#[test]
fn version_flag_reports_something() {
    Command::cargo_bin("charsetdetect")
        .unwrap()
        .arg("--version")
        .assert()
        .success();
}

#[test]
fn multiple_files_produce_a_json_array() {
    let a = write_sample("multi-a.txt", b"first plain ascii file");
    let b = write_sample("multi-b.txt", b"second plain ascii file");
    Command::cargo_bin("charsetdetect")
        .unwrap()
        .args([a.to_str().unwrap(), b.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("["));
    fs::remove_file(a).ok();
    fs::remove_file(b).ok();
}

#[test]
fn cjk_only_and_non_cjk_only_are_mutually_exclusive() {
    let path = write_sample("conflict.txt", b"hello");
    Command::cargo_bin("charsetdetect")
        .unwrap()
        .args([path.to_str().unwrap(), "--cjk-only", "--non-cjk-only"])
        .assert()
        .failure();
    fs::remove_file(path).ok();
}
