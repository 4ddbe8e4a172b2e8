//! Text normalization passes applied to rendered output
//!
//! Generated files are written with no trailing blanks and with Windows line
//! ends, so both passes here are idempotent: running them on already
//! normalized text leaves it unchanged.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

static TRAILING_WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[ \t]+(\r?)\n")
        .expect("Failed to compile regex pattern for TRAILING_WHITESPACE_RE")
});

static LINE_END_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\r?\n").expect("Failed to compile regex pattern for LINE_END_RE")
});

/// Removes all spaces and tabs found directly before a line terminator
///
/// The terminator itself is preserved, including a carriage return that
/// precedes the line feed. The substitution is repeated until nothing is
/// left to strip, so inputs like `"a \r \n"` settle in one call.
///
/// # Examples
/// ```
/// use tmplgen::normalize::remove_all_whitespace_at_line_end;
///
/// assert_eq!(remove_all_whitespace_at_line_end("a \t\r\nb  \n"), "a\r\nb\n");
/// ```
pub fn remove_all_whitespace_at_line_end(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let stripped = TRAILING_WHITESPACE_RE.replace_all(&current, "$1\n");
        if let Cow::Borrowed(_) = stripped {
            return current;
        }
        current = stripped.into_owned();
    }
}

/// Converts every bare line feed into a carriage-return/line-feed pair
///
/// Existing `\r\n` pairs are left untouched.
///
/// # Examples
/// ```
/// use tmplgen::normalize::set_windows_line_ends;
///
/// assert_eq!(set_windows_line_ends("a\nb\r\n"), "a\r\nb\r\n");
/// ```
pub fn set_windows_line_ends(text: &str) -> String {
    LINE_END_RE.replace_all(text, "\r\n").into_owned()
}

/// Applies both passes in the order the writer uses them
pub fn normalize_generated_text(text: &str) -> String {
    set_windows_line_ends(&remove_all_whitespace_at_line_end(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_all_whitespace_at_line_end() {
        assert_eq!(remove_all_whitespace_at_line_end("a \nb\n"), "a\nb\n");
        assert_eq!(remove_all_whitespace_at_line_end("a\t \t\r\n"), "a\r\n");

        // Whitespace not followed by a line end is kept
        assert_eq!(remove_all_whitespace_at_line_end("a  b  "), "a  b  ");

        // Leading indentation is kept
        assert_eq!(remove_all_whitespace_at_line_end("    x\n"), "    x\n");

        // Blank lines made of whitespace collapse to empty lines
        assert_eq!(remove_all_whitespace_at_line_end("a\n   \nb\n"), "a\n\nb\n");
    }

    #[test]
    fn test_remove_whitespace_around_stray_carriage_return() {
        let once = remove_all_whitespace_at_line_end("a \r \n");
        assert_eq!(once, "a\r\n");
        assert_eq!(remove_all_whitespace_at_line_end(&once), once);
    }

    #[test]
    fn test_set_windows_line_ends() {
        assert_eq!(set_windows_line_ends("a\nb\n"), "a\r\nb\r\n");
        assert_eq!(set_windows_line_ends("a\r\nb\r\n"), "a\r\nb\r\n");
        assert_eq!(set_windows_line_ends("no line end"), "no line end");

        // A lone carriage return is not a line terminator
        assert_eq!(set_windows_line_ends("a\rb"), "a\rb");

        // A doubled carriage return keeps its extra character
        assert_eq!(set_windows_line_ends("a\r\r\n"), "a\r\r\n");
    }

    #[test]
    fn test_normalize_generated_text() {
        assert_eq!(normalize_generated_text("a \nb\t\r\nc\n"), "a\r\nb\r\nc\r\n");
        assert_eq!(normalize_generated_text(""), "");
    }

    #[test]
    fn test_passes_are_idempotent() {
        let samples = [
            "",
            "\n",
            "plain",
            "a \nb\t\r\nc\n",
            "  \t \n\n\r\n \r\n",
            "x \r \n y\t\r\r\n",
            "\r\n\r\n\n\n",
        ];

        for sample in samples {
            let stripped = remove_all_whitespace_at_line_end(sample);
            assert_eq!(
                remove_all_whitespace_at_line_end(&stripped),
                stripped,
                "strip pass is not idempotent for {sample:?}"
            );

            let windows = set_windows_line_ends(sample);
            assert_eq!(
                set_windows_line_ends(&windows),
                windows,
                "line end pass is not idempotent for {sample:?}"
            );

            let normalized = normalize_generated_text(sample);
            assert_eq!(normalize_generated_text(&normalized), normalized);
        }
    }

    #[test]
    fn test_every_line_feed_is_preceded_by_carriage_return() {
        let normalized = normalize_generated_text("one\ntwo \r\nthree\t\n\nfour");
        let bytes = normalized.as_bytes();
        for (index, byte) in bytes.iter().enumerate() {
            if *byte == b'\n' {
                assert!(index > 0 && bytes[index - 1] == b'\r');
            }
        }
    }
}
