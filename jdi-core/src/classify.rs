//! Line predicates and the fixed textual protocol of generated documents.
//!
//! Every predicate is anchored: prefix for shebangs and comments, suffix for
//! the suppression marker, whole line for blanks.

/// Single-line comment marker that turns a line into prose.
pub const COMMENT_MARKER: &str = "//";

/// Trailing token that removes a line from the output.
pub const IGNORE_MARKER: &str = "jdi-disable-line";

/// Interpreter directive, only honoured on the first line.
pub const SHEBANG: &str = "#!";

/// Opens and closes code blocks.
pub const FENCE: &str = "```";

/// Fence annotation for files without an extension.
pub const DEFAULT_LANGUAGE: &str = "js";

/// How a single input line is treated by the transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Leading interpreter directive, dropped.
    Shebang,
    /// Whitespace only, passed through untouched.
    Blank,
    /// Ends with [`IGNORE_MARKER`], dropped.
    Ignored,
    /// Comment line; holds the prose with the marker stripped.
    Doc(&'a str),
    Code,
}

/// Classifies a line. `first_line` must be true only for the first physical
/// line of a file, since shebangs are honoured nowhere else.
pub fn line_kind(line: &str, first_line: bool) -> LineKind<'_> {
    if first_line && is_shebang(line) {
        return LineKind::Shebang;
    }
    if is_blank(line) {
        return LineKind::Blank;
    }
    if is_ignored(line) {
        return LineKind::Ignored;
    }
    match doc_text(line) {
        Some(text) => LineKind::Doc(text),
        None => LineKind::Code,
    }
}

pub fn is_blank(line: &str) -> bool {
    line.chars().all(char::is_whitespace)
}

pub fn is_shebang(line: &str) -> bool {
    line.starts_with(SHEBANG)
}

pub fn is_ignored(line: &str) -> bool {
    line.ends_with(IGNORE_MARKER)
}

/// Returns the prose of a comment line: leading whitespace, the marker and
/// one whitespace character after it are removed. `None` for code.
pub fn doc_text(line: &str) -> Option<&str> {
    let rest = line.trim_start().strip_prefix(COMMENT_MARKER)?;
    let mut chars = rest.chars();
    match chars.next() {
        Some(c) if c.is_whitespace() => Some(chars.as_str()),
        _ => Some(rest),
    }
}

/// Opening fence carrying the language tag, e.g. "```rs".
pub fn fence_open(language_tag: &str) -> String {
    format!("{FENCE}{language_tag}")
}

pub fn fence_close() -> String {
    FENCE.to_string()
}
