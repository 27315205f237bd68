//! `toolbelt_io_fs` v1:
//! Rust-side filesystem utility layer.
//!
//! Module layout:
//! - `conf`   : constants and defaults
//! - `spec`   : enums/options/errors
//! - `check`  : path predicates and guard clauses
//! - `find`   : recursive suffix-filtered discovery
//! - `copy`   : file copy/move and folder move
//! - `remove` : recursive or single-entry removal
//! - `digest` : streaming MD5 content digest
//! - `serial` : binary object and JSON persistence
//! - `util`   : shared helper functions

pub mod check;
pub mod conf;
pub mod copy;
pub mod digest;
pub mod find;
pub mod remove;
pub mod serial;
pub mod spec;
mod util;

pub use check::{
    PathStatus, SystemPathStatus, is_entry_present, is_file, is_folder, is_img_file,
    is_path_exist, is_video_file,
};
pub use conf::{N_BYTES_BLOCK_DIGEST_DEFAULT, TUP_SUFFIX_IMAGE, TUP_SUFFIX_VIDEO};
pub use copy::{copy_file, move_file, move_folder};
pub use digest::{content_digest, content_digest_with_block_size};
pub use find::{find, find_with_options};
pub use remove::remove;
pub use serial::{dump_json, dump_object, load_json, load_object};
pub use spec::{
    EnumPathStyle, EnumSuffixFilter, IoFsError, ResultIoFs, SpecFindOptions, TypeFoundPath,
};
