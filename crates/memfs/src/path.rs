//! Lexical path handling
//!
//! Table keys are absolute, normalized strings: a single leading `/`, no
//! `.` or `..` segments, no trailing `/` except for the root itself. Nothing
//! in this module looks at the table; existence is the caller's concern.

use std::path::{Component, Path, PathBuf};

/// The root key.
pub const ROOT: &str = "/";

/// Resolve a user-supplied token against the current directory.
///
/// Absolute tokens ignore `cwd`. The result is always a valid table key,
/// whether or not anything lives there.
///
/// # Example
///
/// ```
/// use memfs::path::resolve_path;
///
/// assert_eq!(resolve_path("/home", "/etc/passwd"), "/etc/passwd");
/// assert_eq!(resolve_path("/home", "file.txt"), "/home/file.txt");
/// assert_eq!(resolve_path("/", ".."), "/");
/// ```
pub fn resolve_path(cwd: &str, token: &str) -> String {
    let path = Path::new(token);
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        Path::new(cwd).join(path)
    };
    let resolved = normalize_path(&joined);
    tracing::trace!(cwd, token, resolved = %resolved, "resolved path");
    resolved
}

/// Normalize a path by resolving `.` and `..` components.
///
/// `..` at the root stays at the root.
fn normalize_path(path: &Path) -> String {
    let mut result = PathBuf::from(ROOT);

    for component in path.components() {
        match component {
            Component::Normal(name) => {
                result.push(name);
            }
            Component::ParentDir => {
                result.pop();
            }
            Component::RootDir | Component::CurDir | Component::Prefix(_) => {}
        }
    }

    result.to_string_lossy().into_owned()
}

/// Lexical parent of a normalized key. The parent of `/` is `/`.
pub fn parent(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) | None => ROOT,
        Some(idx) => &path[..idx],
    }
}

/// Final segment of a normalized key. Empty for `/`.
pub fn basename(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}

/// Append a single segment to a normalized directory key.
pub fn join(dir: &str, name: &str) -> String {
    if name.is_empty() {
        dir.to_string()
    } else if dir == ROOT {
        format!("/{name}")
    } else {
        format!("{dir}/{name}")
    }
}

/// Whether `path` lies strictly below `dir`.
pub fn is_descendant(path: &str, dir: &str) -> bool {
    if path == dir {
        return false;
    }
    if dir == ROOT {
        return path.starts_with('/');
    }
    path.strip_prefix(dir)
        .is_some_and(|rest| rest.starts_with('/'))
}

/// Render `path` relative to `base`, both normalized keys.
///
/// Climbs with `..` when `path` lies outside `base`; identical keys give `.`.
pub fn relative_to(path: &str, base: &str) -> String {
    let path_parts = segments(path);
    let base_parts = segments(base);

    let common = path_parts
        .iter()
        .zip(base_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<&str> = Vec::new();
    parts.extend(std::iter::repeat_n("..", base_parts.len() - common));
    parts.extend(&path_parts[common..]);

    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}
