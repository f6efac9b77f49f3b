use std::path::{Component, Path, PathBuf};

use tokio::fs::File;
use tracing::debug;

/// What a request target turned out to name.
#[derive(Debug)]
pub enum ResolvedTarget {
    /// Nothing there, the lookup failed, or the target escapes the root.
    NotFound,
    /// A directory. Never listed, never index-resolved.
    IsDirectory,
    /// Exists and is not a directory, but could not be opened for reading.
    Unreadable,
    /// Open for reading; `size` is from the same metadata lookup.
    Readable { size: u64, file: File },
}

/// Drops exactly the first character of `target`, whatever it is.
///
/// # Example
///
/// ```
/// # use webserver::fs::resolver::strip_first_char;
/// assert_eq!(strip_first_char("/index.html"), "index.html");
/// assert_eq!(strip_first_char("index.html"), "ndex.html");
/// assert_eq!(strip_first_char("/"), "");
/// ```
pub fn strip_first_char(target: &str) -> &str {
    let mut chars = target.chars();
    chars.next();
    chars.as_str()
}

/// Maps `target` to a path under `root`.
///
/// Returns `None` when `confine` is set and the relative name is absolute
/// or climbs with `..`. An empty name maps to `root` itself.
pub fn target_path(root: &Path, target: &str, confine: bool) -> Option<PathBuf> {
    let relative = Path::new(strip_first_char(target));

    if confine
        && relative.components().any(|c| {
            matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_))
        })
    {
        return None;
    }

    Some(root.join(relative))
}

/// True when `path`, with symlinks followed, still lies under `root`.
async fn within_root(root: &Path, path: &Path) -> bool {
    match (
        tokio::fs::canonicalize(root).await,
        tokio::fs::canonicalize(path).await,
    ) {
        (Ok(root), Ok(path)) => path.starts_with(root),
        _ => false,
    }
}

/// Classifies `target` with one metadata lookup, then opens regular
/// candidates for reading.
pub async fn resolve(root: &Path, target: &str, confine: bool) -> ResolvedTarget {
    let Some(path) = target_path(root, target, confine) else {
        debug!(request_target = %target, "target escapes serving root");
        return ResolvedTarget::NotFound;
    };

    let metadata = match tokio::fs::metadata(&path).await {
        Ok(metadata) => metadata,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "lookup failed");
            return ResolvedTarget::NotFound;
        }
    };

    if confine && !within_root(root, &path).await {
        debug!(path = %path.display(), "symlink escapes serving root");
        return ResolvedTarget::NotFound;
    }

    if metadata.is_dir() {
        return ResolvedTarget::IsDirectory;
    }

    match File::open(&path).await {
        Ok(file) => ResolvedTarget::Readable {
            size: metadata.len(),
            file,
        },
        Err(e) => {
            debug!(path = %path.display(), error = %e, "open failed");
            ResolvedTarget::Unreadable
        }
    }
}
