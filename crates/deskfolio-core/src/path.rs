//! Pure utilities for the virtual, slash-delimited path namespace.
//!
//! Every path stored or queried by the filesystem subsystem passes through
//! [`normalize_path`] first; the normalized form is the unique key for an
//! item. [`is_valid_path`] is the safety gate applied before any repository
//! access.

/// The root path of the virtual filesystem.
pub const ROOT: &str = "/";

/// Characters that may never appear in a path segment.
///
/// The backslash is included so Windows-style separators (and `..\`
/// traversal attempts) are rejected outright rather than reinterpreted.
const FORBIDDEN_CHARS: [char; 8] = ['<', '>', ':', '"', '|', '?', '*', '\\'];

/// Normalize a raw path string into canonical form.
///
/// Collapses repeated separators, guarantees a single leading `/`, and
/// strips the trailing `/` unless the result is root. Empty input
/// normalizes to root. Idempotent: `normalize_path(normalize_path(p))
/// == normalize_path(p)`.
pub fn normalize_path(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return ROOT.to_string();
    }

    let mut out = String::with_capacity(trimmed.len() + 1);
    out.push('/');
    for segment in trimmed.split('/').filter(|s| !s.is_empty()) {
        if !out.ends_with('/') {
            out.push('/');
        }
        out.push_str(segment);
    }
    out
}

/// Check whether a path is safe to hand to the repository.
///
/// Rejects any normalized form containing a parent-directory traversal
/// segment (`..`), forbidden characters, or control codes.
pub fn is_valid_path(input: &str) -> bool {
    let normalized = normalize_path(input);

    if normalized.chars().any(|c| c.is_control()) {
        return false;
    }
    if normalized.contains(FORBIDDEN_CHARS) {
        return false;
    }

    normalized
        .split('/')
        .filter(|s| !s.is_empty())
        .all(|segment| segment != "..")
}

/// Join path segments under root and renormalize.
pub fn join_path<I, S>(segments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut raw = String::new();
    for segment in segments {
        raw.push('/');
        raw.push_str(segment.as_ref());
    }
    normalize_path(&raw)
}

/// Return the normalized path of the containing folder, or `None` for
/// root-level paths (and for root itself).
pub fn parent_of(path: &str) -> Option<String> {
    let normalized = normalize_path(path);
    if normalized == ROOT {
        return None;
    }
    let cut = normalized.rfind('/').unwrap_or(0);
    if cut == 0 {
        // Directly under root; the parent is root itself, which has no record.
        None
    } else {
        Some(normalized[..cut].to_string())
    }
}

/// Return the lowercase extension of a file name without the leading dot.
///
/// `None` when there is no dot, or when the dot is the first character
/// (hidden files have no extension).
pub fn get_extension(name: &str) -> Option<String> {
    let dot = name.rfind('.')?;
    if dot == 0 || dot == name.len() - 1 {
        return None;
    }
    Some(name[dot + 1..].to_lowercase())
}
