use std::fs;
use std::path::Path;

use crate::check::{PathStatus, SystemPathStatus};
use crate::spec::ResultIoFs;

/// Delete `path`: recursively when it is a directory, as one entry otherwise.
///
/// A symlink is one entry even when it points at a directory; the link is
/// unlinked and the target is kept.
///
/// There is no existence pre-check; a missing path surfaces the OS error
/// unchanged inside [`crate::IoFsError::Io`].
///
/// # Errors
/// [`crate::IoFsError::Io`] for any underlying failure.
pub fn remove<P: AsRef<Path>>(path: P) -> ResultIoFs<()> {
    let path = path.as_ref();
    if SystemPathStatus.is_dir(path) && !SystemPathStatus.is_symlink(path) {
        fs::remove_dir_all(path)?;
    } else {
        fs::remove_file(path)?;
    }
    tracing::debug!("removed {}", path.display());
    Ok(())
}
