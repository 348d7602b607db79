//! Greedy caption wrapping.
//!
//! Lengths are counted in `char`s. Only U+0020 counts as a break
//! opportunity; a word longer than the line width is hard-cut.

use crate::model::CaptionLines;

/// Fixed-width greedy word wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextWrapper {
    max_chars: usize,
}

impl TextWrapper {
    /// A width of zero is treated as one so wrapping always makes progress.
    pub fn new(max_chars: usize) -> Self {
        Self {
            max_chars: max_chars.max(1),
        }
    }

    /// Split `text` into lines of at most `max_chars` characters, in reading
    /// order. An empty input yields a single empty line.
    pub fn wrap(&self, text: &str) -> Vec<String> {
        let limit = self.max_chars;
        let chars: Vec<char> = text.chars().collect();
        let mut rest: &[char] = &chars;
        let mut lines = Vec::new();

        while rest.len() > limit {
            let last_space = rest[..limit]
                .iter()
                .rposition(|&c| c == ' ')
                .filter(|&pos| pos > 0);

            let (cut, advance) = match last_space {
                // Break at the space and drop it. Further spaces stay on the
                // next line.
                Some(pos) => (pos, pos + 1),
                None => {
                    // Hard cut. A word of exactly `limit` chars ends right at
                    // the cut, so its trailing space is consumed here.
                    let advance = if rest[limit] == ' ' { limit + 1 } else { limit };
                    (limit, advance)
                }
            };

            lines.push(rest[..cut].iter().collect());
            rest = &rest[advance..];
        }

        // A hard cut can consume a trailing space and leave nothing behind.
        if !rest.is_empty() || lines.is_empty() {
            lines.push(rest.iter().collect());
        }
        log::trace!("wrapped {} chars into {} lines", chars.len(), lines.len());
        lines
    }
}

/// Wrap a caption for rendering.
pub fn wrap_caption(text: &str, max_chars: usize) -> CaptionLines {
    CaptionLines::new(TextWrapper::new(max_chars).wrap(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn wrap(text: &str, limit: usize) -> Vec<String> {
        TextWrapper::new(limit).wrap(text)
    }

    #[test]
    fn break_drops_only_one_space() {
        assert_eq!(wrap("ab  cd", 3), vec!["ab", " cd"]);
        assert_eq!(wrap("one two   three", 8), vec!["one two", "  three"]);
    }

    #[test]
    fn quick_brown_fox_at_ten() {
        assert_eq!(
            wrap("The quick brown fox jumps over the lazy dog", 10),
            vec!["The quick", "brown fox", "jumps", "over the", "lazy dog"]
        );
    }

    #[test]
    fn empty_input_is_one_empty_line() {
        assert_eq!(wrap("", 20), vec![""]);
    }

    #[test]
    fn short_input_is_one_line() {
        assert_eq!(wrap("hello", 20), vec!["hello"]);
        assert_eq!(wrap("exactly twenty chars", 20), vec!["exactly twenty chars"]);
    }

    #[test]
    fn long_word_is_hard_cut() {
        assert_eq!(
            wrap("abcdefghijklmnop", 5),
            vec!["abcde", "fghij", "klmno", "p"]
        );
    }

    #[test]
    fn long_word_cut_keeps_every_char() {
        assert_eq!(
            wrap("aaaaaaaaaaaaa bb", 10),
            vec!["aaaaaaaaaa", "aaa bb"]
        );
    }

    #[test]
    fn word_exactly_at_limit_consumes_its_space() {
        assert_eq!(wrap("abcd efgh", 4), vec!["abcd", "efgh"]);
    }

    #[test]
    fn trailing_space_after_hard_cut_adds_no_line() {
        assert_eq!(wrap("abcd ", 4), vec!["abcd"]);
    }

    #[test]
    fn leading_space_forces_hard_cut() {
        assert_eq!(wrap(" abcdefgh", 4), vec![" abc", "defg", "h"]);
    }

    #[test]
    fn double_space_may_leave_a_space_line() {
        let lines = wrap("a  bcdefghij", 10);
        assert_eq!(lines, vec!["a ", "bcdefghij"]);
    }

    #[test]
    fn counts_chars_not_bytes() {
        assert_eq!(wrap("žluťoučký kůň", 9), vec!["žluťoučký", "kůň"]);
    }

    #[test]
    fn zero_width_behaves_like_one() {
        assert_eq!(wrap("ab", 0), vec!["a", "b"]);
    }

    #[test]
    fn wrap_caption_builds_lines() {
        let caption = wrap_caption("one two", 3);
        assert_eq!(caption.lines(), ["one", "two"]);
    }
}
