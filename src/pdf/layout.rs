/// Greedy word wrap by character count.
///
/// Words are whitespace-delimited and joined by single spaces. A line is
/// closed when the next word (plus its separating space) would push it past
/// `max_chars`. A word longer than `max_chars` gets a line of its own and is
/// never split. Lengths are counted in chars, not bytes, so "ö" counts once.
pub fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if line_len > 0 && line_len + 1 + word_len > max_chars {
            lines.push(std::mem::take(&mut line));
            line_len = 0;
        }
        if line_len > 0 {
            line.push(' ');
            line_len += 1;
        }
        line.push_str(word);
        line_len += word_len;
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Split body text at line breaks, dropping blank paragraphs.
pub fn paragraphs(text: &str) -> impl Iterator<Item = &str> {
    text.split(['\n', '\r']).filter(|p| !p.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    fn words(s: &str) -> Vec<&str> {
        s.split_whitespace().collect()
    }

    // Words, Swedish letters and a spread of Unicode whitespace separators.
    fn body_text() -> impl Strategy<Value = String> {
        proptest::collection::vec(
            prop_oneof![
                "[a-zåäöA-Z0-9.,]{1,12}",
                "[a-z]{20,120}",
                Just(" ".to_string()),
                Just("  ".to_string()),
                Just("\t".to_string()),
                Just("\n".to_string()),
                Just("\u{a0}".to_string()),
                Just("\u{85}".to_string()),
                Just("\u{2028}".to_string()),
                Just("\u{3000}".to_string()),
            ],
            0..60,
        )
        .prop_map(|parts| parts.concat())
    }

    proptest! {
        #[test]
        fn preserves_word_sequence(text in body_text(), max in 1usize..120) {
            let lines = wrap(&text, max);
            let joined = lines.join(" ");
            prop_assert_eq!(words(&joined), words(&text));
        }

        #[test]
        fn lines_respect_column_limit_unless_single_word(text in body_text(), max in 1usize..120) {
            for line in wrap(&text, max) {
                let len = line.chars().count();
                prop_assert!(
                    len <= max || !line.contains(' '),
                    "line {:?} is {} chars with max {}", line, len, max
                );
            }
        }

        #[test]
        fn never_emits_empty_lines(text in any::<String>(), max in 1usize..120) {
            prop_assert!(wrap(&text, max).iter().all(|l| !l.trim().is_empty()));
        }
    }

    #[test]
    fn whitespace_only_input_wraps_to_nothing() {
        assert!(wrap("", 90).is_empty());
        assert!(wrap(" \n\t\u{a0} ", 90).is_empty());
    }

    #[test]
    fn oversized_word_stands_alone() {
        let lines = wrap("ab cdefghijkl mn", 4);
        assert_eq!(lines, vec!["ab", "cdefghijkl", "mn"]);
    }

    #[test]
    fn fills_line_exactly_to_limit() {
        assert_eq!(wrap("aaa bbb ccc", 7), vec!["aaa bbb", "ccc"]);
        assert_eq!(wrap("aaa bbb ccc", 6), vec!["aaa", "bbb", "ccc"]);
    }

    #[test]
    fn counts_chars_not_bytes() {
        assert_eq!(wrap("åäö åäö", 7), vec!["åäö åäö"]);
    }

    #[test]
    fn paragraphs_drop_blank_runs() {
        let parts: Vec<&str> = paragraphs("1. Punkt A\n2. Punkt B\n\n\n  \r\nSlut").collect();
        assert_eq!(parts, vec!["1. Punkt A", "2. Punkt B", "Slut"]);
    }
}
