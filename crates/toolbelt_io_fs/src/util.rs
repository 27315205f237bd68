use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

////////////////////////////////////////////////////////////////////////////////
// #region PathUtilities

/// Extension token of a path: `"." + extension`, or `""` without one.
///
/// `a.tar.gz` -> `.gz`, `Makefile` -> ``, `.bashrc` -> ``, `a.` -> ``.
pub(crate) fn derive_suffix_token(path: &Path) -> String {
    match path.extension().map(|e| e.to_string_lossy()) {
        Some(ext) if !ext.is_empty() => format!(".{ext}"),
        _ => String::new(),
    }
}

/// Join relative paths onto the current directory without resolving symlinks.
pub(crate) fn absolutize_path(path: &Path) -> io::Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    Ok(std::env::current_dir()?.join(path))
}

fn _normalize_path(path: &Path) -> PathBuf {
    if let Ok(resolved) = fs::canonicalize(path) {
        return resolved;
    }
    // Missing tail: canonicalize the deepest existing ancestor and re-append.
    if let (Some(parent), Some(name)) = (path.parent(), path.file_name()) {
        if !parent.as_os_str().is_empty() {
            return _normalize_path(parent).join(name);
        }
    }
    absolutize_path(path).unwrap_or_else(|_| path.to_path_buf())
}

pub(crate) fn is_overlap(src: &Path, dst: &Path) -> bool {
    let src_resolved = _normalize_path(src);
    let dst_resolved = _normalize_path(dst);
    dst_resolved.starts_with(&src_resolved) || src_resolved.starts_with(&dst_resolved)
}

/// Create the parent directory tree of `path` when it is missing.
pub(crate) fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    let Some(path_parent) = path.parent() else {
        return Ok(());
    };
    if path_parent.as_os_str().is_empty() || path_parent.is_dir() {
        return Ok(());
    }
    tracing::debug!("creating parent directory {}", path_parent.display());
    fs::create_dir_all(path_parent)
}

/// True when both paths exist and refer to the same filesystem entry.
///
/// On unix the `(dev, ino)` pair is compared, so hard links count as the same
/// file.
pub(crate) fn is_same_file(path_a: &Path, path_b: &Path) -> io::Result<bool> {
    if !path_b.exists() {
        return Ok(false);
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;

        let stat_a = fs::metadata(path_a)?;
        let stat_b = fs::metadata(path_b)?;
        Ok(stat_a.dev() == stat_b.dev() && stat_a.ino() == stat_b.ino())
    }
    #[cfg(not(unix))]
    {
        Ok(fs::canonicalize(path_a)? == fs::canonicalize(path_b)?)
    }
}

pub(crate) fn is_cross_device(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::CrossesDevices
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region MetadataCopy

pub(crate) fn copy_file_with_metadata(
    path_file_src: &Path,
    path_file_dst: &Path,
) -> Result<(), io::Error> {
    fs::copy(path_file_src, path_file_dst)?;
    #[cfg(target_os = "linux")]
    {
        apply_metadata_linux(path_file_src, path_file_dst)?;
    }
    Ok(())
}

#[cfg(target_os = "linux")]
fn apply_metadata_linux(path_src: &Path, path_dst: &Path) -> Result<(), io::Error> {
    use filetime::{FileTime, set_file_times};

    let stat_src = fs::metadata(path_src)?;
    fs::set_permissions(path_dst, stat_src.permissions())?;

    let file_time_access = FileTime::from_last_access_time(&stat_src);
    let file_time_modify = FileTime::from_last_modification_time(&stat_src);
    set_file_times(path_dst, file_time_access, file_time_modify)?;

    copy_xattrs_linux(path_src, path_dst);
    Ok(())
}

#[cfg(target_os = "linux")]
fn copy_xattrs_linux(path_src: &Path, path_dst: &Path) {
    let iter_xattr_names = match xattr::list(path_src) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!("Failed to list xattrs of {} ({e})", path_src.display());
            return;
        }
    };

    for name in iter_xattr_names {
        let Some(raw_value) = xattr::get(path_src, &name).ok().flatten() else {
            continue;
        };
        if let Err(e) = xattr::set(path_dst, &name, &raw_value) {
            tracing::warn!(
                "Failed to preserve xattr {:?} on {} ({e})",
                name,
                path_dst.display()
            );
        }
    }
}

/// Recursively copy `path_dir_src` to `path_dir_dst`, preserving metadata.
///
/// Symlinks are recreated as links; directory metadata is applied after the
/// children so child writes do not bump the copied mtime.
pub(crate) fn copy_tree_with_metadata(path_dir_src: &Path, path_dir_dst: &Path) -> io::Result<()> {
    let mut l_dirs_done: Vec<(PathBuf, PathBuf)> = Vec::new();

    for entry_res in WalkDir::new(path_dir_src).follow_links(false) {
        let entry = entry_res?;
        let path_rel = entry
            .path()
            .strip_prefix(path_dir_src)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        let path_dst = path_dir_dst.join(path_rel);
        let cfg_file_type = entry.file_type();

        if cfg_file_type.is_dir() {
            fs::create_dir_all(&path_dst)?;
            l_dirs_done.push((entry.path().to_path_buf(), path_dst));
        } else if cfg_file_type.is_symlink() {
            copy_symbolic_link(entry.path(), &path_dst)?;
        } else {
            copy_file_with_metadata(entry.path(), &path_dst)?;
        }
    }

    #[cfg(target_os = "linux")]
    for (path_src, path_dst) in l_dirs_done.iter().rev() {
        apply_metadata_linux(path_src, path_dst)?;
    }
    #[cfg(not(target_os = "linux"))]
    let _ = l_dirs_done;
    Ok(())
}

fn copy_symbolic_link(path_src: &Path, path_dst: &Path) -> io::Result<()> {
    let target = fs::read_link(path_src)?;

    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(&target, path_dst)
    }
    #[cfg(windows)]
    {
        use std::os::windows::fs::{symlink_dir, symlink_file};
        if path_src.is_dir() {
            symlink_dir(&target, path_dst)
        } else {
            symlink_file(&target, path_dst)
        }
    }
    #[cfg(not(any(unix, windows)))]
    {
        let _ = (target, path_dst);
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "Symbolic links are unsupported on this platform",
        ))
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
