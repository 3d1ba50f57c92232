use std::borrow::Cow;
use std::path::Path;

const TRUNCATED_MARKER: &str = "[output truncated]";

pub fn display_path(path: &Path, base: Option<&Path>) -> String {
    if let Some(base) = base {
        if let Ok(relative) = path.strip_prefix(base) {
            let relative = relative.display().to_string();
            return if relative.is_empty() {
                ".".to_string()
            } else {
                relative
            };
        }
    }
    path.display().to_string()
}

/// Cut command output to at most `max_bytes`, ending on a char boundary.
/// A marker line is appended when anything was dropped.
pub fn truncate_output(text: &str, max_bytes: usize) -> Cow<'_, str> {
    if text.len() <= max_bytes {
        return Cow::Borrowed(text);
    }
    let mut end = max_bytes;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    Cow::Owned(format!("{}\n{TRUNCATED_MARKER}", &text[..end]))
}
