mod common;

use std::path::{Path, PathBuf};

use common::ServeRoot;
use webserver::fs::resolver::{ResolvedTarget, resolve, strip_first_char, target_path};

#[test]
fn test_strip_first_char_is_unconditional() {
    assert_eq!(strip_first_char("/index.html"), "index.html");
    assert_eq!(strip_first_char("xindex.html"), "index.html");
    assert_eq!(strip_first_char("/"), "");
    assert_eq!(strip_first_char(""), "");
    assert_eq!(strip_first_char("éa"), "a");
}

#[test]
fn test_target_path_joins_under_root() {
    let path = target_path(Path::new("/srv"), "/docs/a.html", true).unwrap();
    assert_eq!(path, PathBuf::from("/srv/docs/a.html"));
}

#[test]
fn test_target_path_confined_rejects_escapes() {
    assert!(target_path(Path::new("/srv"), "/../etc/passwd", true).is_none());
    assert!(target_path(Path::new("/srv"), "/a/../../b", true).is_none());
    assert!(target_path(Path::new("/srv"), "//etc/passwd", true).is_none());
}

#[test]
fn test_target_path_unconfined_keeps_raw_path() {
    let path = target_path(Path::new("/srv"), "/../x", false).unwrap();
    assert_eq!(path, PathBuf::from("/srv/../x"));
}

#[tokio::test]
async fn test_resolve_existing_file_is_readable() {
    let root = ServeRoot::new("resolve-readable").file("index.html", b"hello world\n");

    match resolve(root.path(), "/index.html", true).await {
        ResolvedTarget::Readable { size, .. } => assert_eq!(size, 12),
        other => panic!("expected Readable, got {other:?}"),
    }
}

#[tokio::test]
async fn test_resolve_missing_file_is_not_found() {
    let root = ServeRoot::new("resolve-missing");

    assert!(matches!(
        resolve(root.path(), "/missing.html", true).await,
        ResolvedTarget::NotFound
    ));
}

#[tokio::test]
async fn test_resolve_directory() {
    let root = ServeRoot::new("resolve-dir").dir("sub");

    assert!(matches!(
        resolve(root.path(), "/sub", true).await,
        ResolvedTarget::IsDirectory
    ));
}

#[tokio::test]
async fn test_resolve_bare_slash_names_root_directory() {
    let root = ServeRoot::new("resolve-slash").file("index.html", b"x");

    assert!(matches!(
        resolve(root.path(), "/", true).await,
        ResolvedTarget::IsDirectory
    ));
}

#[tokio::test]
async fn test_resolve_path_without_leading_slash_loses_first_char() {
    let root = ServeRoot::new("resolve-noslash").file("ndex.html", b"x");

    assert!(matches!(
        resolve(root.path(), "index.html", true).await,
        ResolvedTarget::Readable { size: 1, .. }
    ));
}

#[tokio::test]
async fn test_resolve_traversal_is_not_found_when_confined() {
    let root = ServeRoot::new("resolve-traversal").dir("inner").file("secret.txt", b"s");
    let inner = root.path().join("inner");

    assert!(matches!(
        resolve(&inner, "/../secret.txt", true).await,
        ResolvedTarget::NotFound
    ));
    assert!(matches!(
        resolve(&inner, "/../secret.txt", false).await,
        ResolvedTarget::Readable { .. }
    ));
}

#[cfg(unix)]
#[tokio::test]
async fn test_resolve_unopenable_entry_is_unreadable() {
    let root = ServeRoot::new("resolve-unreadable");
    let _socket = std::os::unix::net::UnixListener::bind(root.path().join("sock")).unwrap();

    assert!(matches!(
        resolve(root.path(), "/sock", true).await,
        ResolvedTarget::Unreadable
    ));
}

#[cfg(unix)]
#[tokio::test]
async fn test_resolve_symlink_out_of_root_is_not_found_when_confined() {
    let root = ServeRoot::new("resolve-symlink-out")
        .dir("public")
        .file("outside/secret.txt", b"s");
    let public = root.path().join("public");
    std::os::unix::fs::symlink(root.path().join("outside"), public.join("link")).unwrap();

    assert!(matches!(
        resolve(&public, "/link/secret.txt", true).await,
        ResolvedTarget::NotFound
    ));
    assert!(matches!(
        resolve(&public, "/link/secret.txt", false).await,
        ResolvedTarget::Readable { size: 1, .. }
    ));
}

#[cfg(unix)]
#[tokio::test]
async fn test_resolve_symlink_within_root_is_followed() {
    let root = ServeRoot::new("resolve-symlink-in").file("real.html", b"abc");
    std::os::unix::fs::symlink(root.path().join("real.html"), root.path().join("alias.html"))
        .unwrap();

    assert!(matches!(
        resolve(root.path(), "/alias.html", true).await,
        ResolvedTarget::Readable { size: 3, .. }
    ));
}
