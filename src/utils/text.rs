use console::measure_text_width;

/// Wrap text into lines no wider than `max_width` display columns, breaking
/// at spaces where possible. Existing newlines are respected.
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let max_width = max_width.max(1);
    let mut lines = Vec::new();

    for raw_line in text.lines() {
        if raw_line.is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut remaining = raw_line;
        while !remaining.is_empty() {
            if measure_text_width(remaining) <= max_width {
                lines.push(remaining.to_string());
                break;
            }

            // Find the last space that still fits, else cut at the width.
            let mut break_at = 0;
            let mut fallback_end = 0;
            for (pos, ch) in remaining.char_indices() {
                let end = pos + ch.len_utf8();
                if measure_text_width(&remaining[..end]) > max_width {
                    break;
                }
                fallback_end = end;
                if ch == ' ' {
                    break_at = pos;
                }
            }

            if break_at > 0 {
                lines.push(remaining[..break_at].to_string());
                remaining = remaining[break_at + 1..].trim_start();
            } else {
                if fallback_end == 0 {
                    // Single glyph wider than the limit; emit it anyway.
                    let ch = remaining.chars().next().unwrap();
                    fallback_end = ch.len_utf8();
                }
                lines.push(remaining[..fallback_end].to_string());
                remaining = &remaining[fallback_end..];
            }
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(wrap_text("hello there", 40), vec!["hello there"]);
    }

    #[test]
    fn breaks_at_spaces() {
        let lines = wrap_text("one two three four", 9);
        assert_eq!(lines, vec!["one two", "three", "four"]);
    }

    #[test]
    fn hard_breaks_unspaced_text() {
        let lines = wrap_text("abcdefghij", 4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn preserves_blank_lines() {
        let lines = wrap_text("first\n\nsecond", 40);
        assert_eq!(lines, vec!["first", "", "second"]);
    }
}
