//! String-level path helpers.
//!
//! Library paths arrive from many platforms, so both `/` and `\` separate
//! components regardless of the host OS. Nothing here touches the
//! filesystem.

const SEPARATORS: [char; 2] = ['/', '\\'];

/// The last component of `path`.
pub fn file_name(path: &str) -> &str {
    match path.rfind(&SEPARATORS[..]) {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}

/// The extension of the last component, including the leading dot.
///
/// Returns `None` when the file name has no dot or ends with one.
pub fn extension(path: &str) -> Option<&str> {
    let name = file_name(path);
    let idx = name.rfind('.')?;
    if idx + 1 == name.len() {
        None
    } else {
        Some(&name[idx..])
    }
}

/// The last component without its extension.
pub fn file_stem(path: &str) -> &str {
    let name = file_name(path);
    match extension(name) {
        Some(ext) => &name[..name.len() - ext.len()],
        None => name.strip_suffix('.').unwrap_or(name),
    }
}
