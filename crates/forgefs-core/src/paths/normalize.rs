//! Separator canonicalization, joining and splitting.

/// Canonicalize separators and drop redundant segments.
///
/// - `\` becomes `/`
/// - repeated separators collapse to one
/// - `.` segments are removed
/// - `name/..` pairs are folded; leading `..` segments are kept
/// - trailing separators are stripped (the root `/` is preserved)
///
/// Wildcard segments such as `**` are ordinary segments here and pass
/// through untouched. An empty input, or one that folds away entirely,
/// normalizes to `"."`.
pub fn normalize(path: &str) -> String {
    let unified = path.replace('\\', "/");
    let rooted = unified.starts_with('/');

    let mut segments: Vec<&str> = Vec::new();
    for segment in unified.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." && !is_drive(last) => {
                    segments.pop();
                }
                _ if rooted && segments.is_empty() => {}
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    match (rooted, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

/// Join `leaf` onto `base`.
///
/// An empty or `.` base yields `leaf` unchanged, and an absolute `leaf`
/// replaces the base entirely.
pub fn join(base: &str, leaf: &str) -> String {
    if base.is_empty() || base == "." || is_absolute(leaf) {
        return leaf.to_string();
    }
    if leaf.is_empty() {
        return base.to_string();
    }
    let trimmed = base.trim_end_matches('/');
    if trimmed.is_empty() {
        // base was the filesystem root
        return format!("/{leaf}");
    }
    format!("{trimmed}/{leaf}")
}

/// Directory part of a path: everything before the last separator.
///
/// Returns `""` when there is no separator and `"/"` for entries directly
/// under the root.
pub fn directory_of(path: &str) -> String {
    match path.rfind('/') {
        None => String::new(),
        Some(0) => "/".to_string(),
        Some(idx) => {
            let dir = &path[..idx];
            if is_drive(dir) {
                format!("{dir}/")
            } else {
                dir.to_string()
            }
        }
    }
}

/// Whether a path is absolute: rooted at `/`, or starting with a drive
/// marker such as `C:`.
pub fn is_absolute(path: &str) -> bool {
    if path.starts_with('/') || path.starts_with('\\') {
        return true;
    }
    let bytes = path.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

/// Split a path-list value (e.g. the contents of `PATH`) into directories.
///
/// Empty entries are dropped and surrounding whitespace is trimmed.
pub fn split_path_list(value: &str, separator: char) -> Vec<String> {
    value
        .split(separator)
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// A bare drive marker like `C:`.
pub(crate) fn is_drive(segment: &str) -> bool {
    let bytes = segment.as_bytes();
    bytes.len() == 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}
