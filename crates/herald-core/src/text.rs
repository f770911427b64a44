//! Character-limit truncation for generated text.
//!
//! Limits count Unicode scalar values, not bytes, so multi-byte text is never
//! split mid-character.

/// Maximum length of an original post.
pub const POST_MAX_CHARS: usize = 280;
/// Maximum length of a reply.
pub const REPLY_MAX_CHARS: usize = 240;
/// Marker appended when text is cut.
pub const ELLIPSIS: &str = "...";

/// Trim surrounding whitespace and cap `text` at `max_chars` characters.
///
/// When the trimmed text exceeds the limit, the tail is replaced by
/// [`ELLIPSIS`] so the result is exactly `max_chars` long.
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= max_chars {
        return trimmed.to_string();
    }
    let keep = max_chars.saturating_sub(ELLIPSIS.chars().count());
    let mut out: String = trimmed.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate_with_ellipsis("gm", POST_MAX_CHARS), "gm");
    }

    #[test]
    fn whitespace_is_trimmed() {
        assert_eq!(truncate_with_ellipsis("  gm \n", POST_MAX_CHARS), "gm");
    }

    #[test]
    fn exact_limit_is_untouched() {
        let text = "a".repeat(POST_MAX_CHARS);
        assert_eq!(truncate_with_ellipsis(&text, POST_MAX_CHARS), text);
    }

    #[test]
    fn three_hundred_chars_become_280() {
        let text = "x".repeat(300);
        let out = truncate_with_ellipsis(&text, POST_MAX_CHARS);
        assert_eq!(out.chars().count(), 280);
        assert!(out.ends_with(ELLIPSIS));
        assert_eq!(&out[..277], &"x".repeat(277));
    }

    #[test]
    fn reply_limit_is_240() {
        let text = "y".repeat(500);
        let out = truncate_with_ellipsis(&text, REPLY_MAX_CHARS);
        assert_eq!(out.chars().count(), 240);
        assert!(out.ends_with(ELLIPSIS));
    }

    #[test]
    fn multibyte_text_is_cut_on_char_boundary() {
        let text = "é".repeat(300);
        let out = truncate_with_ellipsis(&text, POST_MAX_CHARS);
        assert_eq!(out.chars().count(), 280);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn never_exceeds_limit(s in "\\PC{0,600}", max in 3usize..400) {
                let out = truncate_with_ellipsis(&s, max);
                prop_assert!(out.chars().count() <= max);
            }
        }
    }
}
