//! Filesystem option models and top-level error types.

use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////
// #region EnumsInit

/// Extension-token filter for [`crate::find::find`].
///
/// Tokens are compared exactly and case-sensitively against the file's
/// extension token, separator included (`.png`, not `png`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EnumSuffixFilter {
    /// Match every file.
    #[default]
    NoFilter,
    /// Match files whose extension token equals this one.
    SingleSuffix(String),
    /// Match files whose extension token equals any of these.
    SuffixSet(Vec<String>),
}

impl EnumSuffixFilter {
    /// Parse a dynamically shaped suffix argument.
    ///
    /// Accepts `null`, a string, or an array of strings. Every other shape
    /// fails with [`IoFsError::InvalidArgument`].
    pub fn from_value(value: &Value) -> ResultIoFs<Self> {
        match value {
            Value::Null => Ok(Self::NoFilter),
            Value::String(suffix) => Ok(Self::SingleSuffix(suffix.clone())),
            Value::Array(l_values) => {
                let mut l_suffixes = Vec::with_capacity(l_values.len());
                for item in l_values {
                    let Value::String(suffix) = item else {
                        return Err(IoFsError::InvalidArgument(
                            "suffix must be a string, list or tuple.".to_string(),
                        ));
                    };
                    l_suffixes.push(suffix.clone());
                }
                Ok(Self::SuffixSet(l_suffixes))
            }
            _ => Err(IoFsError::InvalidArgument(
                "suffix must be a string, list or tuple.".to_string(),
            )),
        }
    }

    /// Normalize into one lookup set; `None` means "match everything".
    pub(crate) fn to_suffix_set(&self) -> Option<BTreeSet<String>> {
        match self {
            Self::NoFilter => None,
            Self::SingleSuffix(suffix) => Some(BTreeSet::from([suffix.clone()])),
            Self::SuffixSet(l_suffixes) => Some(l_suffixes.iter().cloned().collect()),
        }
    }
}

impl From<&str> for EnumSuffixFilter {
    fn from(suffix: &str) -> Self {
        Self::SingleSuffix(suffix.to_string())
    }
}

impl From<String> for EnumSuffixFilter {
    fn from(suffix: String) -> Self {
        Self::SingleSuffix(suffix)
    }
}

impl From<Vec<String>> for EnumSuffixFilter {
    fn from(l_suffixes: Vec<String>) -> Self {
        Self::SuffixSet(l_suffixes)
    }
}

impl From<&[&str]> for EnumSuffixFilter {
    fn from(l_suffixes: &[&str]) -> Self {
        Self::SuffixSet(l_suffixes.iter().map(|s| s.to_string()).collect())
    }
}

/// Output representation of discovered paths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EnumPathStyle {
    /// Structured `PathBuf` values.
    #[default]
    PathBuf,
    /// Plain strings (lossy UTF-8 rendering of the same absolute path).
    ///
    /// Non-UTF-8 bytes become `U+FFFD`, so such a string may not name the
    /// original file anymore. Use [`EnumPathStyle::PathBuf`] when that matters.
    String,
}

/// One discovered file, shaped by [`EnumPathStyle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeFoundPath {
    /// Produced by [`EnumPathStyle::PathBuf`].
    Path(PathBuf),
    /// Produced by [`EnumPathStyle::String`].
    Text(String),
}

impl TypeFoundPath {
    pub(crate) fn from_path(path: PathBuf, path_style: EnumPathStyle) -> Self {
        match path_style {
            EnumPathStyle::PathBuf => Self::Path(path),
            EnumPathStyle::String => Self::Text(path.to_string_lossy().into_owned()),
        }
    }

    /// Borrow as a path regardless of style.
    pub fn as_path(&self) -> &Path {
        match self {
            Self::Path(path) => path.as_path(),
            Self::Text(txt) => Path::new(txt),
        }
    }

    /// Convert into an owned `PathBuf` regardless of style.
    pub fn into_path_buf(self) -> PathBuf {
        match self {
            Self::Path(path) => path,
            Self::Text(txt) => PathBuf::from(txt),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region StructsAndErrors

/// Input options for [`crate::find::find_with_options`].
#[derive(Debug, Clone, Default)]
pub struct SpecFindOptions {
    /// Extension-token filter.
    pub suffix_filter: EnumSuffixFilter,
    /// Output path representation.
    pub path_style: EnumPathStyle,
    /// Optional glob applied to the file basename (`*.txt`, `img_??.png`).
    pub pattern_name: Option<String>,
    /// Optional maximum depth below root; direct children are depth 1.
    pub depth_limit: Option<usize>,
    /// Descend into symlinked directories.
    pub if_follow_links: bool,
    /// Sort siblings by file name instead of raw directory order.
    pub if_sort: bool,
}

/// Crate-wide result alias.
pub type ResultIoFs<T> = Result<T, IoFsError>;

/// Errors raised by filesystem utility calls.
#[derive(Debug, Error)]
pub enum IoFsError {
    /// A required path is missing or is not the required kind.
    #[error("No such file or directory: {}", .0.display())]
    NotFound(PathBuf),
    /// Destination is occupied and overwrite was not requested.
    #[error("File exists: {}", .0.display())]
    AlreadyExists(PathBuf),
    /// Argument shape or value does not match the call contract.
    #[error("{0}")]
    InvalidArgument(String),
    /// Source and destination overlap (`src` contains `dst` or vice versa).
    #[error(
        "Source and destination directories overlap: {} <-> {}",
        .path_src.display(),
        .path_dst.display()
    )]
    SourceDestinationOverlap {
        /// Source directory.
        path_src: PathBuf,
        /// Computed destination directory.
        path_dst: PathBuf,
    },
    /// Propagated operating-system failure.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// Binary encoding failed.
    #[error("Failed to encode object: {0}")]
    Encode(String),
    /// Binary decoding failed.
    #[error("Failed to decode object: {0}")]
    Decode(String),
    /// JSON parse or render failure.
    #[error("Invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),
}

impl IoFsError {
    /// Closest `std::io::ErrorKind` for bridging into `io::Error`.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            Self::NotFound(_) => io::ErrorKind::NotFound,
            Self::AlreadyExists(_) => io::ErrorKind::AlreadyExists,
            Self::InvalidArgument(_) | Self::SourceDestinationOverlap { .. } => {
                io::ErrorKind::InvalidInput
            }
            Self::Io(e) => e.kind(),
            Self::Encode(_) | Self::Decode(_) | Self::Json(_) => io::ErrorKind::InvalidData,
        }
    }
}

impl From<IoFsError> for io::Error {
    fn from(err: IoFsError) -> Self {
        match err {
            IoFsError::Io(e) => e,
            other => io::Error::new(other.kind(), other.to_string()),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
