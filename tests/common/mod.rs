#![allow(dead_code)]

use std::path::{Path, PathBuf};

/// A scratch serving root under the system temp dir, removed on drop.
pub struct ServeRoot {
    path: PathBuf,
}

impl ServeRoot {
    pub fn new(name: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "webserver-test-{}-{}",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&path);
        std::fs::create_dir_all(&path).unwrap();
        Self { path }
    }

    pub fn file(self, name: &str, contents: &[u8]) -> Self {
        let target = self.path.join(name);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(target, contents).unwrap();
        self
    }

    pub fn dir(self, name: &str) -> Self {
        std::fs::create_dir_all(self.path.join(name)).unwrap();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ServeRoot {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

/// Splits a raw response into (status line, headers, body).
pub fn split_response(raw: &[u8]) -> (String, Vec<String>, Vec<u8>) {
    let end = raw
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("response has no header terminator");

    let head = std::str::from_utf8(&raw[..end]).unwrap();
    let mut lines = head.split("\r\n");
    let status = lines.next().unwrap().to_string();
    let headers = lines.map(str::to_string).collect();

    (status, headers, raw[end + 4..].to_vec())
}
