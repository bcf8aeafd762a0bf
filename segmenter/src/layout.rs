//! Line wrapping for storybook page layout.

/// Default maximum characters per printed line.
pub const DEFAULT_LINE_WIDTH: usize = 80;

/// Greedily wrap `text` on word boundaries into lines of at most
/// `max_chars_per_line` characters, joined with `\n`.
///
/// A word longer than the line width is placed on a line of its own.
pub fn wrap_lines(text: &str, max_chars_per_line: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= max_chars_per_line {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines.join("\n")
}
