//! Resolved-path cleanup and Unicode handling
//!
//! Resolver requests can carry a loader query suffix (`?raw`) and escape
//! a literal `#` as `\0#`; both are undone before the path is split into
//! segments. All comparisons run on NFC-normalized text so that
//! differently-encoded spellings of the same filename compare equal.

use std::path::{Path, PathBuf};
use unicode_normalization::{is_nfc, UnicodeNormalization};

/// Escape sequence resolvers use to smuggle a literal `#` through a request
const FRAGMENT_ESCAPE: &str = "\u{0}#";

/// Strip the query suffix and unescape fragment markers in a resolved request
pub fn clean_request(request: &str) -> String {
    let without_query = match request.find('?') {
        Some(idx) => &request[..idx],
        None => request,
    };
    without_query.replace(FRAGMENT_ESCAPE, "#")
}

/// Normalize a filename or path string to NFC
pub fn nfc(text: &str) -> String {
    if is_nfc(text) {
        text.to_owned()
    } else {
        text.nfc().collect()
    }
}

/// Cache key for a directory: the NFC form of its string representation
pub fn dir_key(dir: &Path) -> String {
    nfc(&dir.to_string_lossy())
}

/// Case-insensitive comparison of two NFC-normalized names
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Split a path into its parent directory and final segment
///
/// The empty parent of a bare relative segment becomes the
/// current-directory sentinel. Returns `None` when the path has no final
/// segment to verify (the filesystem root itself, or a `..` tail).
pub fn split(path: &Path) -> Option<(PathBuf, String)> {
    let name = path.file_name()?.to_string_lossy().into_owned();
    let parent = match path.parent() {
        Some(dir) if dir.as_os_str().is_empty() => PathBuf::from("."),
        Some(dir) => dir.to_path_buf(),
        None => return None,
    };
    Some((parent, name))
}

/// Whether `dir` is a point above which casing cannot be verified
pub fn at_root(dir: &Path) -> bool {
    dir.parent().is_none() || dir == Path::new(".")
}
