use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Lexically expresses `path` relative to the directory `base`.
///
/// Both paths must be of the same kind (absolute or relative). Nothing is
/// read from the file system, so symlinks are not resolved.
pub fn relative_path(path: &Path, base: &Path) -> Result<PathBuf> {
    let not_relative = || Error::NotRelative {
        path: path.to_path_buf(),
        base: base.to_path_buf(),
    };

    if path.is_absolute() != base.is_absolute() {
        return Err(not_relative());
    }

    let path_parts = normalize(path);
    let base_parts = normalize(base);
    let common = path_parts
        .iter()
        .zip(&base_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for part in &base_parts[common..] {
        match part {
            Component::Normal(_) => relative.push(".."),
            _ => return Err(not_relative()),
        }
    }
    for part in &path_parts[common..] {
        relative.push(part.as_os_str());
    }

    if relative.as_os_str().is_empty() {
        relative.push(".");
    }
    Ok(relative)
}

fn normalize(path: &Path) -> Vec<Component<'_>> {
    let mut parts: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir if matches!(parts.last(), Some(Component::Normal(_))) => {
                parts.pop();
            }
            other => parts.push(other),
        }
    }
    parts
}
