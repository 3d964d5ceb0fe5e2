//! Translation between real paths under the extracted archive and the
//! `root:/`-prefixed logical paths shown to the user.

use std::path::{Component, Path, PathBuf};

/// Logical path of the archive root.
pub const LOGICAL_ROOT: &str = "root:/";

/// Render `current` as a logical path relative to `root`.
///
/// Both paths are normalized lexically first, so `root/a/..` renders as
/// `root:/`. Separators are always `/` regardless of the host.
pub fn to_logical(root: &Path, current: &Path) -> String {
    let root = normalize(root);
    let current = normalize(current);
    if current == root {
        return LOGICAL_ROOT.to_string();
    }

    let segments = relative(&root, &current);
    if segments.is_empty() {
        LOGICAL_ROOT.to_string()
    } else {
        format!("{}{}", LOGICAL_ROOT, segments.join("/"))
    }
}

/// Join `name` onto `current` with host semantics.
///
/// `..` segments are kept as-is and an absolute `name` replaces `current`
/// entirely; whether the result is acceptable is decided by the caller.
pub fn resolve_child(current: &Path, name: &str) -> PathBuf {
    current.join(name)
}

pub fn exists(path: &Path) -> bool {
    path.exists()
}

pub fn is_directory(path: &Path) -> bool {
    path.is_dir()
}

pub fn is_file(path: &Path) -> bool {
    path.is_file()
}

/// Returns true when `candidate` resolves into the subtree of `root`.
///
/// Both sides are canonicalized, so symlinks leading out of the tree are
/// rejected as well as `..` traversal. Paths that cannot be canonicalized
/// (missing, unreadable) are never considered inside.
pub fn is_within(root: &Path, candidate: &Path) -> bool {
    match (dunce::canonicalize(root), dunce::canonicalize(candidate)) {
        (Ok(root), Ok(candidate)) => candidate.starts_with(root),
        _ => false,
    }
}

/// Lexically resolve `.` and `..` without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                // `/..` is `/`
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    out.iter().collect()
}

/// Segments leading from `base` to `target`, both already normalized.
fn relative(base: &Path, target: &Path) -> Vec<String> {
    let base: Vec<Component<'_>> = base.components().collect();
    let target: Vec<Component<'_>> = target.components().collect();
    let shared = base
        .iter()
        .zip(target.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let ups = base.len() - shared;
    let mut segments: Vec<String> = std::iter::repeat_n("..".to_string(), ups).collect();
    segments.extend(
        target[shared..]
            .iter()
            .map(|c| c.as_os_str().to_string_lossy().into_owned()),
    );
    segments
}
