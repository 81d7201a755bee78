//! Driving the external `dot` executable.

use crate::{Error, Result};
use std::ffi::OsString;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Environment variable naming the `dot` executable.
pub const DOT_ENV: &str = "ARCHDRAW_DOT";
pub const DEFAULT_DOT: &str = "dot";

/// Explicit path, else `$ARCHDRAW_DOT`, else `dot`.
pub fn resolve_binary(explicit: Option<&Path>) -> PathBuf {
    resolve_binary_from(explicit, std::env::var_os(DOT_ENV))
}

fn resolve_binary_from(explicit: Option<&Path>, env: Option<OsString>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }
    match env {
        Some(v) if !v.is_empty() => PathBuf::from(v),
        _ => PathBuf::from(DEFAULT_DOT),
    }
}

/// Pipes `source` to `binary <format_flag>` and returns its stdout.
pub fn run_dot(binary: &Path, format_flag: &str, source: &str) -> Result<Vec<u8>> {
    tracing::debug!(binary = %binary.display(), flag = format_flag, "spawning graphviz");
    let mut child = Command::new(binary)
        .arg(format_flag)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::BackendUnavailable {
                binary: binary.to_path_buf(),
            },
            _ => Error::Io(e),
        })?;

    if let Some(mut stdin) = child.stdin.take() {
        // A failing engine may exit before reading its input; its status is reported below.
        if let Err(e) = stdin.write_all(source.as_bytes()) {
            if e.kind() != ErrorKind::BrokenPipe {
                return Err(Error::Io(e));
            }
        }
    }

    let output = child.wait_with_output()?;
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if !output.status.success() {
        return Err(Error::BackendFailed {
            status: output.status,
            stderr,
        });
    }
    if !stderr.is_empty() {
        tracing::warn!(binary = %binary.display(), "graphviz: {stderr}");
    }
    Ok(output.stdout)
}

/// Whether `binary` (resolved as in [`resolve_binary`]) can be executed.
pub fn is_available(explicit: Option<&Path>) -> bool {
    Command::new(resolve_binary(explicit))
        .arg("-V")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_binary_wins_over_environment() {
        let got = resolve_binary_from(
            Some(Path::new("/opt/graphviz/bin/dot")),
            Some(OsString::from("/usr/local/bin/dot")),
        );
        assert_eq!(got, PathBuf::from("/opt/graphviz/bin/dot"));
    }

    #[test]
    fn environment_is_used_when_not_empty() {
        assert_eq!(
            resolve_binary_from(None, Some(OsString::from("/usr/local/bin/dot"))),
            PathBuf::from("/usr/local/bin/dot")
        );
        assert_eq!(
            resolve_binary_from(None, Some(OsString::new())),
            PathBuf::from("dot")
        );
        assert_eq!(resolve_binary_from(None, None), PathBuf::from("dot"));
    }

    #[test]
    fn missing_binary_is_backend_unavailable() {
        let err = run_dot(
            Path::new("/nonexistent/archdraw/dot"),
            "-Tsvg",
            "digraph {}",
        )
        .unwrap_err();
        assert!(matches!(err, Error::BackendUnavailable { .. }), "{err:?}");
    }

    #[cfg(unix)]
    #[test]
    fn non_executable_binary_is_an_io_error() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("dot");
        std::fs::write(&path, "not a program").expect("write file");

        let err = run_dot(&path, "-Tsvg", "digraph {}").unwrap_err();
        match err {
            Error::Io(e) => assert_eq!(e.kind(), ErrorKind::PermissionDenied),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
