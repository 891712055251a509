//! Mask to regular-expression compilation.
//!
//! Only two tokens are special:
//! - `**` matches any run of characters, separators included
//! - `*` matches any run of characters within one path segment
//!
//! Everything else (including `?`, `[` and `{`) is matched literally.

/// Translate a mask into an anchored regular-expression source string.
///
/// # Examples
///
/// ```
/// use forgefs_core::paths::wildcards;
///
/// assert_eq!(wildcards("src/*.c"), r"^src/[^/]*\.c$");
/// assert_eq!(wildcards("src/**.c"), r"^src/.*\.c$");
/// ```
pub fn wildcards(mask: &str) -> String {
    let mut source = String::with_capacity(mask.len() * 2 + 2);
    source.push('^');

    let mut literal = String::new();
    let mut chars = mask.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '*' {
            literal.push(ch);
            continue;
        }
        source.push_str(&regex::escape(&literal));
        literal.clear();
        if chars.peek() == Some(&'*') {
            chars.next();
            source.push_str(".*");
        } else {
            source.push_str("[^/]*");
        }
    }
    source.push_str(&regex::escape(&literal));
    source.push('$');
    source
}

/// Portion of the mask before its first `*`, or the whole mask when it has
/// no wildcard.
pub fn static_prefix(mask: &str) -> &str {
    mask.find('*').map_or(mask, |star| &mask[..star])
}
