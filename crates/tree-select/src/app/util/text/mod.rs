use unicode_width::UnicodeWidthChar;

const ELLIPSIS: &str = "...";

pub fn char_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(0).max(1)
}

pub fn display_width(text: &str) -> usize {
    text.chars().map(char_width).sum()
}

/// Cuts `text` to at most `width` terminal columns, marking the cut with `...`.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if display_width(text) <= width {
        return text.to_string();
    }
    if width <= ELLIPSIS.len() {
        return ".".repeat(width);
    }

    let budget = width - ELLIPSIS.len();
    let mut used = 0;
    let mut out: String = text
        .chars()
        .take_while(|ch| {
            used += char_width(*ch);
            used <= budget
        })
        .collect();
    out.push_str(ELLIPSIS);
    out
}
