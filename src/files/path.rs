//! Request path decoding and confinement under the serving root.

use std::borrow::Cow;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Why a request path could not be percent-decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A `%` at this byte offset is not followed by two hex digits.
    MalformedEscape(usize),
}

/// Where a decoded request path lands relative to the serving root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confined {
    /// The joined filesystem path, guaranteed to be lexically under the root.
    Inside(PathBuf),
    /// `..` segments would climb above the root.
    Outside,
}

/// Decodes a request path the way query components are decoded: `+` becomes
/// a space and `%XX` escapes become raw bytes. The result need not be UTF-8.
pub fn decode_path(raw: &str) -> Result<Vec<u8>, DecodeError> {
    let bytes = raw.as_bytes();
    for (i, _) in raw.match_indices('%') {
        let valid = bytes.len() >= i + 3
            && bytes[i + 1].is_ascii_hexdigit()
            && bytes[i + 2].is_ascii_hexdigit();
        if !valid {
            return Err(DecodeError::MalformedEscape(i));
        }
    }

    let spaced = raw.replace('+', " ");
    Ok(urlencoding::decode_binary(spaced.as_bytes()).into_owned())
}

/// Decodes `raw`, falling back to the undecoded bytes on failure.
pub fn decode_or_raw(raw: &str) -> Vec<u8> {
    match decode_path(raw) {
        Ok(decoded) => decoded,
        Err(e) => {
            tracing::debug!(path = %raw, error = ?e, "Path decode failed, using raw path");
            raw.as_bytes().to_vec()
        }
    }
}

/// Joins a decoded request path onto `root` without touching the filesystem.
///
/// Only `/` separates segments (`\` as well on Windows). Empty and `.`
/// segments are dropped and `..` removes the previous segment; a `..` with
/// nothing left to remove means the path escapes the root. A trailing `/` is
/// kept so the filesystem decides whether the target can be a directory.
///
/// ```
/// # use staticd::files::path::{confine, Confined};
/// # use std::path::Path;
/// let root = Path::new("file");
/// assert_eq!(confine(root, "/a/./b/../c.txt"), Confined::Inside(root.join("a/c.txt")));
/// assert_eq!(confine(root, "/../etc/passwd"), Confined::Outside);
/// ```
pub fn confine(root: &Path, decoded: impl AsRef<[u8]>) -> Confined {
    let decoded = decoded.as_ref();
    let mut segments: Vec<&[u8]> = Vec::new();

    for segment in decoded.split(|&b| is_separator(b)) {
        match segment {
            b"" | b"." => {}
            b".." => {
                if segments.pop().is_none() {
                    return Confined::Outside;
                }
            }
            s => segments.push(s),
        }
    }

    let mut joined = root.to_path_buf();
    for segment in &segments {
        joined.push(segment_os_str(segment));
    }
    if decoded.ends_with(b"/") && !segments.is_empty() {
        // An empty push appends a bare separator
        joined.push("");
    }
    Confined::Inside(joined)
}

fn is_separator(b: u8) -> bool {
    b == b'/' || (cfg!(windows) && b == b'\\')
}

#[cfg(unix)]
fn segment_os_str(segment: &[u8]) -> Cow<'_, OsStr> {
    use std::os::unix::ffi::OsStrExt;
    Cow::Borrowed(OsStr::from_bytes(segment))
}

#[cfg(not(unix))]
fn segment_os_str(segment: &[u8]) -> Cow<'_, OsStr> {
    match String::from_utf8_lossy(segment) {
        Cow::Borrowed(s) => Cow::Borrowed(OsStr::new(s)),
        Cow::Owned(s) => Cow::Owned(s.into()),
    }
}
