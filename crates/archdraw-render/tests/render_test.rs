use archdraw_core::{Diagram, DiagramBuilder, EdgeOptions, NodeKind};
use archdraw_render::{Error, OutputFormat, RenderOptions, graphviz, output_path, render};
use std::fs;
use std::path::PathBuf;

fn two_nodes() -> Diagram {
    let mut b = DiagramBuilder::new("Render Smoke Test");
    let a = b.create_node("A", NodeKind::Git).unwrap();
    let c = b.create_node("B", NodeKind::Build).unwrap();
    b.connect(a, c, EdgeOptions::labeled("X")).unwrap();
    b.finish().unwrap()
}

fn graphviz_installed() -> bool {
    let ok = graphviz::is_available(None);
    if !ok {
        eprintln!("graphviz `dot` not found; skipping");
    }
    ok
}

#[test]
fn output_path_is_derived_from_title() {
    let d = two_nodes();
    let opts = RenderOptions::default();
    assert_eq!(output_path(&d, &opts), PathBuf::from("render_smoke_test.png"));

    let opts = RenderOptions::default()
        .with_format(OutputFormat::Svg)
        .with_out_dir("/tmp/out");
    assert_eq!(
        output_path(&d, &opts),
        PathBuf::from("/tmp/out/render_smoke_test.svg")
    );

    let opts = RenderOptions {
        out: Some(PathBuf::from("custom.pdf")),
        ..opts
    };
    assert_eq!(output_path(&d, &opts), PathBuf::from("custom.pdf"));
}

#[test]
fn dot_format_writes_source_without_engine() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let opts = RenderOptions::default()
        .with_format(OutputFormat::Dot)
        .with_out_dir(tmp.path().join("nested"))
        .with_dot_binary("/nonexistent/archdraw/dot");

    let d = two_nodes();
    let expected = d.to_dot();
    let path = render(d, &opts).expect("render dot");

    assert_eq!(path, tmp.path().join("nested").join("render_smoke_test.dot"));
    assert_eq!(fs::read_to_string(&path).expect("read dot"), expected);
}

#[test]
fn missing_engine_fails_without_writing() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let opts = RenderOptions::default()
        .with_out_dir(tmp.path())
        .with_dot_binary("/nonexistent/archdraw/dot");

    let err = render(two_nodes(), &opts).unwrap_err();
    match err {
        Error::BackendUnavailable { binary } => {
            assert_eq!(binary, PathBuf::from("/nonexistent/archdraw/dot"))
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!tmp.path().join("render_smoke_test.png").exists());
}

#[cfg(unix)]
#[test]
fn fake_engines_receive_source_on_stdin_and_report_failures() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = tempfile::tempdir().expect("tempdir");
    let script = |name: &str, body: &str| {
        let path = tmp.path().join(name);
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write script");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod");
        path
    };
    let echo = script("echo-dot", "cat");
    let broken = script("broken-dot", "cat >/dev/null; echo 'syntax error in line 1' >&2; exit 3");

    let d = two_nodes();
    let bytes = graphviz::run_dot(&echo, "-Tsvg", &d.to_dot()).expect("echo engine");
    assert_eq!(String::from_utf8(bytes).unwrap(), d.to_dot());

    let opts = RenderOptions::default()
        .with_out_dir(tmp.path())
        .with_dot_binary(&broken);
    match render(d, &opts).unwrap_err() {
        Error::BackendFailed { status, stderr } => {
            assert_eq!(status.code(), Some(3));
            assert_eq!(stderr, "syntax error in line 1");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn graphviz_renders_png_and_svg() {
    if !graphviz_installed() {
        return;
    }
    let tmp = tempfile::tempdir().expect("tempdir");

    let png = render(two_nodes(), &RenderOptions::default().with_out_dir(tmp.path()))
        .expect("render png");
    let bytes = fs::read(&png).expect("read png");
    assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"), "output is not a PNG");

    let svg = render(
        two_nodes(),
        &RenderOptions::default()
            .with_format(OutputFormat::Svg)
            .with_out_dir(tmp.path()),
    )
    .expect("render svg");
    let text = fs::read_to_string(&svg).expect("read svg");
    assert!(text.contains("<svg"));
    assert_eq!(text.matches("class=\"edge\"").count(), 1);
    assert!(text.contains(">X</text>"));
}

#[cfg(feature = "raster")]
#[test]
fn resvg_backend_rasterizes_graphviz_svg() {
    use archdraw_render::RasterBackend;

    if !graphviz_installed() {
        return;
    }
    let tmp = tempfile::tempdir().expect("tempdir");
    let opts = RenderOptions {
        backend: RasterBackend::Resvg,
        ..RenderOptions::default().with_out_dir(tmp.path())
    };
    let path = render(two_nodes(), &opts).expect("render png via resvg");
    let bytes = fs::read(path).expect("read png");
    assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
}
