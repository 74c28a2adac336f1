//! Tests for compose file I/O

use cft_fs::{Error, io};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_write_text_creates_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("docker-compose.yml");

    io::write_text(&path, "services:\n  web:\n    image: nginx\n").unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "services:\n  web:\n    image: nginx\n"
    );
}

#[test]
fn test_write_text_replaces_content() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("docker-compose.yml");
    fs::write(&path, "old content that is longer than the new one\n").unwrap();

    io::write_text(&path, "new\n").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "new\n");
}

#[test]
fn test_write_text_leaves_no_temp_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("docker-compose.yml");

    io::write_text(&path, "a: b\n").unwrap();

    let entries: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(entries, vec!["docker-compose.yml".to_string()]);
}

#[test]
fn test_write_text_into_missing_directory_fails() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("missing").join("docker-compose.yml");

    let err = io::write_text(&path, "a: b\n").unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}

#[test]
fn test_read_text_round_trip_preserves_crlf() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("docker-compose.yml");
    let content = "services:\r\n  web:\r\n    image: nginx\r\n";

    io::write_text(&path, content).unwrap();

    assert_eq!(io::read_text(&path).unwrap(), content);
}

#[test]
fn test_read_text_nonexistent_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nope.yml");

    let err = io::read_text(&path).unwrap_err();
    match err {
        Error::Io { path: err_path, .. } => assert_eq!(err_path, path),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[cfg(unix)]
#[test]
fn test_write_text_keeps_existing_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    let path = temp.path().join("docker-compose.yml");
    fs::write(&path, "a: b\n").unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o600)).unwrap();

    io::write_text(&path, "a: c\n").unwrap();

    let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o600);
}
