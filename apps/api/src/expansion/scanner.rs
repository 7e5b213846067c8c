//! Prompt Scanner — finds inline `##[...]` generation directives.
//!
//! The body runs up to the first `]`; there is no nesting or escaping.
//! An `##[` with no closing bracket after it is plain text.

pub const OPEN_MARKER: &str = "##[";
pub const CLOSE_MARKER: char = ']';

/// One directive found in a source string. Offsets are byte positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Directive<'a> {
    /// Matched text including both markers, e.g. `##[greeting]`.
    pub raw_span: &'a str,
    /// Text between the markers. May be empty.
    pub prompt_body: &'a str,
    pub start: usize,
    /// Exclusive: the byte just past the closing `]`.
    pub end: usize,
}

/// Lazily yields directives left to right. Each call starts a fresh scan.
pub fn scan(text: &str) -> Directives<'_> {
    Directives { text, cursor: 0 }
}

pub struct Directives<'a> {
    text: &'a str,
    cursor: usize,
}

impl<'a> Iterator for Directives<'a> {
    type Item = Directive<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.text.get(self.cursor..)?;
        let start = self.cursor + rest.find(OPEN_MARKER)?;
        let body_start = start + OPEN_MARKER.len();

        let Some(body_len) = self.text[body_start..].find(CLOSE_MARKER) else {
            // Unterminated: no later `##[` can close either.
            self.cursor = self.text.len();
            return None;
        };

        let body_end = body_start + body_len;
        let end = body_end + CLOSE_MARKER.len_utf8();
        self.cursor = end;

        Some(Directive {
            raw_span: &self.text[start..end],
            prompt_body: &self.text[body_start..body_end],
            start,
            end,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bodies(text: &str) -> Vec<&str> {
        scan(text).map(|d| d.prompt_body).collect()
    }

    #[test]
    fn test_no_directives() {
        assert_eq!(scan("plain post, no prompts [here]").count(), 0);
        assert_eq!(scan("").count(), 0);
    }

    #[test]
    fn test_single_directive_offsets() {
        let text = "Hello ##[greeting] world";
        let found: Vec<_> = scan(text).collect();
        assert_eq!(found.len(), 1);

        let d = found[0];
        assert_eq!(d.raw_span, "##[greeting]");
        assert_eq!(d.prompt_body, "greeting");
        assert_eq!(d.start, 6);
        assert_eq!(d.end, 18);
        assert_eq!(&text[d.start..d.end], d.raw_span);
    }

    #[test]
    fn test_multiple_directives_in_order() {
        assert_eq!(bodies("A##[1]B##[2]C##[3]"), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_empty_body_is_a_directive() {
        let found: Vec<_> = scan("x ##[] y").collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].prompt_body, "");
        assert_eq!(found[0].raw_span, "##[]");
    }

    #[test]
    fn test_unterminated_yields_nothing() {
        assert_eq!(scan("Text ##[unterminated").count(), 0);
    }

    #[test]
    fn test_terminated_then_unterminated() {
        assert_eq!(bodies("##[one] and ##[two"), vec!["one"]);
    }

    #[test]
    fn test_first_close_bracket_wins() {
        let found: Vec<_> = scan("##[a[b]c]").collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].prompt_body, "a[b");
        assert_eq!(found[0].end, 7);
    }

    #[test]
    fn test_open_marker_inside_body_is_literal() {
        assert_eq!(bodies("##[a ##[b] c]"), vec!["a ##[b"]);
    }

    #[test]
    fn test_body_may_span_lines() {
        assert_eq!(bodies("##[write\na hook]"), vec!["write\na hook"]);
    }

    #[test]
    fn test_multibyte_offsets_slice_cleanly() {
        let text = "café ##[emoji 🚀] fin";
        let d = scan(text).next().unwrap();
        assert_eq!(&text[d.start..d.end], "##[emoji 🚀]");
        assert_eq!(d.prompt_body, "emoji 🚀");
    }

    #[test]
    fn test_scan_is_restartable() {
        let text = "##[x] ##[y]";
        let first: Vec<_> = scan(text).collect();
        let second: Vec<_> = scan(text).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_single_hash_is_not_a_marker() {
        assert_eq!(scan("#[nope] #x[nope]").count(), 0);
    }
}
