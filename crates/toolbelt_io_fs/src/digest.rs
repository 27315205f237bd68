//! Streaming MD5 content digest.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use md5::{Digest, Md5};

use crate::check::{SystemPathStatus, require_exist};
use crate::conf::N_BYTES_BLOCK_DIGEST_DEFAULT;
use crate::spec::{IoFsError, ResultIoFs};

/// MD5 of the file content as 32 lowercase hex characters.
///
/// Reads [`N_BYTES_BLOCK_DIGEST_DEFAULT`] bytes per loop.
///
/// # Errors
/// See [`content_digest_with_block_size`].
pub fn content_digest<P: AsRef<Path>>(file: P) -> ResultIoFs<String> {
    content_digest_with_block_size(file, N_BYTES_BLOCK_DIGEST_DEFAULT)
}

/// MD5 of the file content, reading at most `block_size` bytes per loop.
///
/// The digest does not depend on `block_size`.
///
/// # Errors
/// - [`IoFsError::InvalidArgument`] when `file` does not exist or
///   `block_size` is zero.
/// - [`IoFsError::Io`] when the path cannot be opened or read as a byte
///   stream (directories included).
pub fn content_digest_with_block_size<P: AsRef<Path>>(
    file: P,
    block_size: usize,
) -> ResultIoFs<String> {
    let path_file = file.as_ref();
    require_exist(&SystemPathStatus, path_file)?;
    if block_size == 0 {
        return Err(IoFsError::InvalidArgument(
            "Arg `block_size` must be >= 1.".to_string(),
        ));
    }

    let mut reader = File::open(path_file)?;
    let c_digest = _digest_reader(&mut reader, block_size)?;
    tracing::debug!("md5 {} = {c_digest}", path_file.display());
    Ok(c_digest)
}

fn _digest_reader<R: Read>(reader: &mut R, block_size: usize) -> io::Result<String> {
    let mut hasher = Md5::new();
    let mut buf_chunk = vec![0_u8; block_size];
    loop {
        let n_read = match reader.read(&mut buf_chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buf_chunk[..n_read]);
    }
    Ok(hex::encode(hasher.finalize()))
}
