//! Terminal output sanitization
//!
//! Result text comes from a remote service and queries come from the persisted
//! history file; neither is trusted. Both are passed through
//! [`strip_ansi_codes`] before reaching the terminal, so an escape sequence in a
//! response cannot clear the screen, move the cursor, or restyle the output.

/// Strips ANSI CSI escape codes and stray control characters
///
/// Tab, newline and carriage return are preserved.
///
/// # Examples
///
/// ```
/// use episode_finder::utils::terminal::strip_ansi_codes;
///
/// let text = "\x1b[31mThe Pen\x1b[0m";
/// assert_eq!(strip_ansi_codes(text), "The Pen");
/// ```
pub fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            // CSI sequence runs until its final letter
            while let Some(next_ch) = chars.next() {
                if next_ch.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }

        if ch.is_control() && ch != '\t' && ch != '\n' && ch != '\r' {
            continue;
        }

        result.push(ch);
    }

    result
}

/// Sanitize text for a single display line: escapes stripped, line breaks
/// collapsed to spaces, truncated to `max_chars` with an ellipsis
pub fn single_line(text: &str, max_chars: usize) -> String {
    let cleaned: String = strip_ansi_codes(text)
        .chars()
        .map(|c| if c == '\n' || c == '\r' || c == '\t' { ' ' } else { c })
        .collect();

    if cleaned.chars().count() <= max_chars {
        return cleaned;
    }

    let mut truncated: String = cleaned.chars().take(max_chars.saturating_sub(1)).collect();
    truncated.push('…');
    truncated
}
