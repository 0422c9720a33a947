//! Byte-level path helpers
//!
//! Paths are compared and written as raw bytes. No canonicalization and no
//! Unicode normalization happen here, so two byte-distinct names stay distinct.

use std::borrow::Cow;
use std::ffi::OsStr;
use std::path::{Component, Path};

/// Raw bytes of an OS string.
///
/// On Unix this is exact. Elsewhere the lossy UTF-8 rendering is used, which
/// is still a stable function of the name.
#[cfg(unix)]
pub fn os_bytes(s: &OsStr) -> Cow<'_, [u8]> {
    use std::os::unix::ffi::OsStrExt;
    Cow::Borrowed(s.as_bytes())
}

#[cfg(not(unix))]
pub fn os_bytes(s: &OsStr) -> Cow<'_, [u8]> {
    match s.to_string_lossy() {
        Cow::Borrowed(text) => Cow::Borrowed(text.as_bytes()),
        Cow::Owned(text) => Cow::Owned(text.into_bytes()),
    }
}

/// Raw bytes of a path, with `/` as separator on every platform.
pub fn path_bytes(path: &Path) -> Cow<'_, [u8]> {
    if cfg!(unix) {
        return os_bytes(path.as_os_str());
    }
    let mut out = Vec::new();
    for (i, component) in path.components().enumerate() {
        if i > 0 {
            out.push(b'/');
        }
        out.extend_from_slice(&os_bytes(component.as_os_str()));
    }
    Cow::Owned(out)
}

/// True if a single name is hidden (starts with a dot).
pub fn is_hidden_name(name: &OsStr) -> bool {
    os_bytes(name).first() == Some(&b'.')
}

/// True if any normal component of a root-relative path is hidden.
pub fn has_hidden_component(relative: &Path) -> bool {
    relative.components().any(|c| match c {
        Component::Normal(name) => is_hidden_name(name),
        _ => false,
    })
}

/// True if the path can be written as a manifest field as-is.
///
/// Tab separates fields and newline separates records, so neither may occur.
pub fn is_representable(path: &Path) -> bool {
    !path_bytes(path).iter().any(|b| *b == b'\t' || *b == b'\n')
}
