//! Filesystem constants and default presets.

/// Default read size per loop for [`crate::digest::content_digest`] (`256 * 128`).
pub const N_BYTES_BLOCK_DIGEST_DEFAULT: usize = 256 * 128;

/// Upper-cased extension tokens recognized as image files.
pub const TUP_SUFFIX_IMAGE: [&str; 5] = [".PNG", ".JPG", ".JPEG", ".TIFF", ".BMP"];

/// Upper-cased extension tokens recognized as video files.
pub const TUP_SUFFIX_VIDEO: [&str; 3] = [".MOV", ".MP4", ".AVI"];
