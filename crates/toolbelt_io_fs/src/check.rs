//! Path predicates and guard clauses shared by every operation.
//!
//! Predicates are answered by a [`PathStatus`] so the guards can be exercised
//! against an in-memory double instead of the real filesystem.

use std::path::Path;

use crate::conf::{TUP_SUFFIX_IMAGE, TUP_SUFFIX_VIDEO};
use crate::spec::{IoFsError, ResultIoFs};
use crate::util::derive_suffix_token;

////////////////////////////////////////////////////////////////////////////////
// #region PathStatus

/// Boolean status queries over one path.
///
/// `exists`, `is_file` and `is_dir` follow symlinks; `is_symlink` does not.
pub trait PathStatus {
    fn exists(&self, path: &Path) -> bool;
    fn is_file(&self, path: &Path) -> bool;
    fn is_dir(&self, path: &Path) -> bool;
    fn is_symlink(&self, path: &Path) -> bool;
}

/// [`PathStatus`] backed by the live filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemPathStatus;

impl PathStatus for SystemPathStatus {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_symlink(&self, path: &Path) -> bool {
        path.is_symlink()
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Predicates

pub fn is_path_exist<P: AsRef<Path>>(path: P) -> bool {
    SystemPathStatus.exists(path.as_ref())
}

pub fn is_file<P: AsRef<Path>>(path: P) -> bool {
    SystemPathStatus.is_file(path.as_ref())
}

pub fn is_folder<P: AsRef<Path>>(path: P) -> bool {
    SystemPathStatus.is_dir(path.as_ref())
}

/// True when any entry occupies `path`, including a dangling symlink.
pub fn is_entry_present<S: PathStatus>(status: &S, path: &Path) -> bool {
    status.exists(path) || status.is_symlink(path)
}

/// Existing file whose upper-cased extension token is a known image suffix.
pub fn is_img_file<P: AsRef<Path>>(path: P) -> bool {
    _is_media_file(&SystemPathStatus, path.as_ref(), &TUP_SUFFIX_IMAGE)
}

/// Existing file whose upper-cased extension token is a known video suffix.
pub fn is_video_file<P: AsRef<Path>>(path: P) -> bool {
    _is_media_file(&SystemPathStatus, path.as_ref(), &TUP_SUFFIX_VIDEO)
}

fn _is_media_file<S: PathStatus>(status: &S, path: &Path, l_suffixes: &[&str]) -> bool {
    if !status.exists(path) {
        return false;
    }
    let c_suffix = derive_suffix_token(path).to_uppercase();
    l_suffixes.iter().any(|s| *s == c_suffix)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Guards

pub(crate) fn require_file<S: PathStatus>(status: &S, path: &Path) -> ResultIoFs<()> {
    if !status.is_file(path) {
        return Err(IoFsError::NotFound(path.to_path_buf()));
    }
    Ok(())
}

pub(crate) fn require_folder<S: PathStatus>(status: &S, path: &Path) -> ResultIoFs<()> {
    if !status.is_dir(path) {
        return Err(IoFsError::NotFound(path.to_path_buf()));
    }
    Ok(())
}

pub(crate) fn require_exist<S: PathStatus>(status: &S, path: &Path) -> ResultIoFs<()> {
    if !status.exists(path) {
        return Err(IoFsError::InvalidArgument(format!(
            "{} is not exist.",
            path.display()
        )));
    }
    Ok(())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
