//! Stem extraction and local-name safety checks.

/// Linux NAME_MAX.
const NAME_MAX: usize = 255;

/// File name without its final extension.
///
/// `"bunny.zip"` → `"bunny"`, `"a.tar.gz"` → `"a.tar"`, `"README"` → `"README"`.
/// A leading dot does not start an extension (`".hidden"` stays as is).
pub fn file_stem(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => name,
    }
}

/// True if `name` can be used as a single path component under the destination root.
///
/// Rejects empty names, `.`/`..`, separators, NUL and control characters,
/// and names longer than NAME_MAX bytes.
pub fn is_safe_local_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && name.len() <= NAME_MAX
        && !name
            .chars()
            .any(|c| c == '/' || c == '\\' || c == '\0' || c.is_control())
}
