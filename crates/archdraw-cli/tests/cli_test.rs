use assert_cmd::prelude::*;
use std::fs;
use std::process::Command;

const STEM: &str = "innovate_inc._gke_gitops_architecture";

fn graphviz_installed() -> bool {
    Command::new("dot")
        .arg("-V")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

#[test]
fn dot_command_prints_graphviz_source() {
    let exe = assert_cmd::cargo_bin!("archdraw-cli");
    let out = Command::new(exe).arg("dot").output().expect("run cli");
    assert!(out.status.success());

    let text = String::from_utf8(out.stdout).expect("utf8");
    assert!(text.starts_with("digraph \"Innovate Inc. GKE GitOps Architecture\" {"));
    assert_eq!(text.matches(" -> ").count(), 12);
}

#[test]
fn json_command_prints_snapshot() {
    let exe = assert_cmd::cargo_bin!("archdraw-cli");
    let out = Command::new(exe)
        .args(["json", "--pretty", "--direction", "LR"])
        .output()
        .expect("run cli");
    assert!(out.status.success());

    let value: serde_json::Value = serde_json::from_slice(&out.stdout).expect("valid json");
    assert_eq!(value["title"], "Innovate Inc. GKE GitOps Architecture");
    assert_eq!(value["direction"], "LR");
    assert_eq!(value["nodes"].as_array().map(Vec::len), Some(14));
    assert_eq!(value["clusters"].as_array().map(Vec::len), Some(7));
    assert_eq!(value["edges"].as_array().map(Vec::len), Some(12));
}

#[test]
fn render_dot_format_writes_title_named_file() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let exe = assert_cmd::cargo_bin!("archdraw-cli");
    Command::new(exe)
        .args(["render", "--format", "dot", "--out-dir"])
        .arg(tmp.path())
        .assert()
        .success();

    let path = tmp.path().join(format!("{STEM}.dot"));
    let text = fs::read_to_string(&path).expect("read dot");
    assert!(text.contains("label=\"Image Tag Update\", style=\"dashed\""));
}

#[test]
fn missing_graphviz_is_reported() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let exe = assert_cmd::cargo_bin!("archdraw-cli");
    let out = Command::new(exe)
        .args(["--out-dir"])
        .arg(tmp.path())
        .args(["--dot-binary", "/nonexistent/archdraw/dot"])
        .output()
        .expect("run cli");
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("was not found"), "{stderr}");
    assert!(!tmp.path().join(format!("{STEM}.png")).exists());
}

#[test]
fn usage_errors_exit_with_code_2() {
    let exe = assert_cmd::cargo_bin!("archdraw-cli");
    Command::new(exe)
        .args(["--format", "tiff"])
        .assert()
        .code(2);
}

#[test]
fn renders_png_when_graphviz_is_installed() {
    if !graphviz_installed() {
        eprintln!("graphviz `dot` not found; skipping");
        return;
    }
    let tmp = tempfile::tempdir().expect("tempdir");
    let exe = assert_cmd::cargo_bin!("archdraw-cli");
    Command::new(exe)
        .current_dir(tmp.path())
        .assert()
        .success();

    let bytes = fs::read(tmp.path().join(format!("{STEM}.png"))).expect("read png");
    assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"), "output is not a PNG");
}
