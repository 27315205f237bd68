//! Object persistence: private binary blobs and JSON documents.
//!
//! The binary format is bincode and is private to this crate; blobs are only
//! guaranteed to load with the same crate version that wrote them.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::check::{SystemPathStatus, require_file};
use crate::spec::{IoFsError, ResultIoFs};
use crate::util::ensure_parent_dir;

/// Write `obj` as a binary blob at `path`, truncating any existing file.
///
/// Missing parent directories are not created.
///
/// # Errors
/// - [`IoFsError::Io`] when the file cannot be created or written.
/// - [`IoFsError::Encode`] when `obj` cannot be encoded.
pub fn dump_object<T, P>(obj: &T, path: P) -> ResultIoFs<()>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    let path_file = path.as_ref();
    let mut writer = BufWriter::new(File::create(path_file)?);
    bincode::serialize_into(&mut writer, obj).map_err(|e| _map_bincode_error(e, true))?;
    writer.flush()?;
    tracing::debug!("dumped object to {}", path_file.display());
    Ok(())
}

/// Read a binary blob written by [`dump_object`].
///
/// # Errors
/// - [`IoFsError::NotFound`] when `path` is not a file.
/// - [`IoFsError::Decode`] when the blob does not decode as `T`.
/// - [`IoFsError::Io`] when the file cannot be read.
pub fn load_object<T, P>(path: P) -> ResultIoFs<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path_file = path.as_ref();
    require_file(&SystemPathStatus, path_file)?;
    let reader = BufReader::new(File::open(path_file)?);
    let obj = bincode::deserialize_from(reader).map_err(|e| _map_bincode_error(e, false))?;
    tracing::debug!("loaded object from {}", path_file.display());
    Ok(obj)
}

/// Write `value` as JSON at `path`, creating missing parents.
///
/// # Errors
/// - [`IoFsError::Io`] when the file cannot be created or written.
/// - [`IoFsError::Json`] when `value` cannot be rendered.
pub fn dump_json<T, P>(value: &T, path: P) -> ResultIoFs<()>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    let path_file = path.as_ref();
    ensure_parent_dir(path_file)?;
    let mut writer = BufWriter::new(File::create(path_file)?);
    serde_json::to_writer(&mut writer, value).map_err(_map_json_error)?;
    writer.flush()?;
    tracing::debug!("dumped json to {}", path_file.display());
    Ok(())
}

/// Parse the JSON document at `path`.
///
/// # Errors
/// - [`IoFsError::NotFound`] when `path` is not a file.
/// - [`IoFsError::Json`] when the content is not valid JSON for `T`.
/// - [`IoFsError::Io`] when the file cannot be read.
pub fn load_json<T, P>(path: P) -> ResultIoFs<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path_file = path.as_ref();
    require_file(&SystemPathStatus, path_file)?;
    let reader = BufReader::new(File::open(path_file)?);
    let value = serde_json::from_reader(reader).map_err(_map_json_error)?;
    tracing::debug!("loaded json from {}", path_file.display());
    Ok(value)
}

fn _map_bincode_error(err: bincode::Error, if_encode: bool) -> IoFsError {
    match *err {
        bincode::ErrorKind::Io(e) => IoFsError::Io(e),
        other if if_encode => IoFsError::Encode(other.to_string()),
        other => IoFsError::Decode(other.to_string()),
    }
}

fn _map_json_error(err: serde_json::Error) -> IoFsError {
    if err.is_io() {
        return IoFsError::Io(io::Error::from(err));
    }
    IoFsError::Json(err)
}
