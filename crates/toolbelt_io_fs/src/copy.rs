//! Single-file copy/move and directory move with collision policy.
//!
//! File copy and file move overwrite an existing destination silently; only
//! [`move_folder`] guards its destination, behind an explicit `overwrite` flag.

use std::fs;
use std::path::Path;

use crate::check::{SystemPathStatus, is_entry_present, require_file, require_folder};
use crate::remove::remove;
use crate::spec::{IoFsError, ResultIoFs};
use crate::util::{
    copy_file_with_metadata, copy_tree_with_metadata, ensure_parent_dir, is_cross_device,
    is_overlap, is_same_file,
};

/// Copy the bytes of file `src` to `dst`, creating `dst`'s parents on demand.
///
/// An existing file at `dst` is overwritten.
///
/// # Errors
/// - [`IoFsError::NotFound`] when `src` is not a file.
/// - [`IoFsError::InvalidArgument`] when `dst` resolves to `src` itself.
/// - [`IoFsError::Io`] for any underlying failure.
pub fn copy_file<P, Q>(src: P, dst: Q) -> ResultIoFs<()>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let path_file_src = src.as_ref();
    let path_file_dst = dst.as_ref();
    require_file(&SystemPathStatus, path_file_src)?;
    if is_same_file(path_file_src, path_file_dst)? {
        return Err(IoFsError::InvalidArgument(format!(
            "{} and {} are the same file",
            path_file_src.display(),
            path_file_dst.display()
        )));
    }
    ensure_parent_dir(path_file_dst)?;

    let n_bytes = fs::copy(path_file_src, path_file_dst)?;
    tracing::debug!(
        "copied {} -> {} ({n_bytes} bytes)",
        path_file_src.display(),
        path_file_dst.display()
    );
    Ok(())
}

/// Move file `src` to `dst`, creating `dst`'s parents on demand.
///
/// Renames when possible. Across filesystems the file is copied with its
/// metadata and the source is deleted afterwards.
///
/// # Errors
/// - [`IoFsError::NotFound`] when `src` is not a file.
/// - [`IoFsError::Io`] for any underlying failure.
pub fn move_file<P, Q>(src: P, dst: Q) -> ResultIoFs<()>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let path_file_src = src.as_ref();
    let path_file_dst = dst.as_ref();
    require_file(&SystemPathStatus, path_file_src)?;
    ensure_parent_dir(path_file_dst)?;

    match fs::rename(path_file_src, path_file_dst) {
        Ok(()) => {}
        Err(e) if is_cross_device(&e) => _move_file_by_copy(path_file_src, path_file_dst)?,
        Err(e) => return Err(e.into()),
    }
    tracing::debug!(
        "moved {} -> {}",
        path_file_src.display(),
        path_file_dst.display()
    );
    Ok(())
}

/// Move directory `src` under `dst`, so it ends up at `dst/<src name>`.
///
/// With `overwrite`, an entry already present at `dst/<src name>` is removed
/// first. `dst` is created when missing.
///
/// # Errors
/// - [`IoFsError::NotFound`] when `src` is not a directory.
/// - [`IoFsError::InvalidArgument`] when `src` has no final name component.
/// - [`IoFsError::AlreadyExists`] when the target is occupied and
///   `overwrite` is false. Checked before the overlap test.
/// - [`IoFsError::SourceDestinationOverlap`] when the target is inside `src`
///   or `src` is inside the target.
/// - [`IoFsError::Io`] for any underlying failure.
pub fn move_folder<P, Q>(src: P, dst: Q, overwrite: bool) -> ResultIoFs<()>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let path_dir_src = src.as_ref();
    let path_dir_dst = dst.as_ref();
    require_folder(&SystemPathStatus, path_dir_src)?;

    let Some(name_dir) = path_dir_src.file_name() else {
        return Err(IoFsError::InvalidArgument(format!(
            "Source directory has no name component: {}",
            path_dir_src.display()
        )));
    };
    let path_dir_target = path_dir_dst.join(name_dir);
    let if_target_present = is_entry_present(&SystemPathStatus, &path_dir_target);
    if if_target_present && !overwrite {
        return Err(IoFsError::AlreadyExists(path_dir_target));
    }
    if is_overlap(path_dir_src, &path_dir_target) {
        return Err(IoFsError::SourceDestinationOverlap {
            path_src: path_dir_src.to_path_buf(),
            path_dst: path_dir_target,
        });
    }

    if if_target_present {
        tracing::debug!("overwrite: removing {}", path_dir_target.display());
        remove(&path_dir_target)?;
        if is_entry_present(&SystemPathStatus, &path_dir_target) {
            return Err(IoFsError::AlreadyExists(path_dir_target));
        }
    }
    if !path_dir_dst.is_dir() {
        fs::create_dir_all(path_dir_dst)?;
    }

    match fs::rename(path_dir_src, &path_dir_target) {
        Ok(()) => {}
        Err(e) if is_cross_device(&e) => _move_tree_by_copy(path_dir_src, &path_dir_target)?,
        Err(e) => return Err(e.into()),
    }
    tracing::debug!(
        "moved folder {} -> {}",
        path_dir_src.display(),
        path_dir_target.display()
    );
    Ok(())
}

// Cross-device fallbacks: copy with metadata, then drop the source.

fn _move_file_by_copy(path_file_src: &Path, path_file_dst: &Path) -> ResultIoFs<()> {
    tracing::debug!(
        "rename crosses devices, copying {} -> {}",
        path_file_src.display(),
        path_file_dst.display()
    );
    copy_file_with_metadata(path_file_src, path_file_dst)?;
    fs::remove_file(path_file_src)?;
    Ok(())
}

fn _move_tree_by_copy(path_dir_src: &Path, path_dir_dst: &Path) -> ResultIoFs<()> {
    tracing::debug!(
        "rename crosses devices, copying tree {} -> {}",
        path_dir_src.display(),
        path_dir_dst.display()
    );
    copy_tree_with_metadata(path_dir_src, path_dir_dst)?;
    fs::remove_dir_all(path_dir_src)?;
    Ok(())
}
