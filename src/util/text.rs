use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of a string in terminal columns.
///
/// Unicode-aware: CJK characters and most emoji occupy two columns,
/// combining marks occupy zero.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

const ELLIPSIS: &str = "...";

/// Truncate a string to fit within `max_width` terminal columns.
///
/// Returns the input unchanged (borrowed, no allocation) when it already
/// fits. When truncation is needed, `...` is appended; at widths of three
/// columns or less there is no room for the ellipsis, so the result is just
/// the characters that fit.
pub fn truncate_to_width(s: &str, max_width: usize) -> Cow<'_, str> {
    if display_width(s) <= max_width {
        return Cow::Borrowed(s);
    }

    let budget = max_width.saturating_sub(ELLIPSIS.len());
    let mut out = String::with_capacity(max_width);
    let mut used = 0;
    for c in s.chars() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    if max_width > ELLIPSIS.len() {
        out.push_str(ELLIPSIS);
    }
    Cow::Owned(out)
}

/// Remove control characters and ANSI escape sequences from server text.
///
/// Inventory names, categories, and error messages come from the service
/// and end up on the terminal; a stray escape sequence in any of them could
/// manipulate the display. CSI and OSC sequences are dropped wholesale,
/// other control characters (including tabs and newlines — all output here
/// is single-line cells) are dropped individually.
///
/// Returns `Cow::Borrowed` when the input is already clean, which is the
/// common case.
pub fn sanitize_text(s: &str) -> Cow<'_, str> {
    if !s.chars().any(char::is_control) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            match chars.peek() {
                // CSI: parameters then a final byte in 0x40..=0x7e
                Some('[') => {
                    chars.next();
                    for t in chars.by_ref() {
                        if ('\u{40}'..='\u{7e}').contains(&t) {
                            break;
                        }
                    }
                }
                // OSC: runs until BEL or ST (ESC \)
                Some(']') => {
                    chars.next();
                    while let Some(t) = chars.next() {
                        if t == '\u{07}' {
                            break;
                        }
                        if t == '\u{1b}' {
                            if chars.peek() == Some(&'\\') {
                                chars.next();
                            }
                            break;
                        }
                    }
                }
                // Bare ESC is dropped on its own
                _ => {}
            }
        } else if !c.is_control() {
            out.push(c);
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fits_returns_borrowed() {
        let result = truncate_to_width("Campari", 10);
        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(result, "Campari");
    }

    #[test]
    fn test_truncation_appends_ellipsis() {
        assert_eq!(truncate_to_width("Maraschino Liqueur", 10), "Marasch...");
        assert_eq!(truncate_to_width("Hello World", 8), "Hello...");
    }

    #[test]
    fn test_cjk_truncation() {
        // Two columns per character; budget of 4 columns before the ellipsis
        assert_eq!(truncate_to_width("你好世界", 7), "你好...");
        assert_eq!(truncate_to_width("你好", 10), "你好");
    }

    #[test]
    fn test_narrow_widths() {
        assert_eq!(truncate_to_width("Test", 0), "");
        assert_eq!(truncate_to_width("Testing", 1), "T");
        assert_eq!(truncate_to_width("Testing", 3), "Tes");
        assert_eq!(truncate_to_width("Test", 4), "Test");
    }

    #[test]
    fn test_exact_fit() {
        assert_eq!(truncate_to_width("12345", 5), "12345");
    }

    #[test]
    fn test_sanitize_clean_is_borrowed() {
        let result = sanitize_text("Angostura Bitters");
        assert!(matches!(result, Cow::Borrowed(_)));
    }

    #[test]
    fn test_sanitize_drops_csi() {
        assert_eq!(sanitize_text("\u{1b}[31mGin\u{1b}[0m"), "Gin");
    }

    #[test]
    fn test_sanitize_drops_osc() {
        assert_eq!(sanitize_text("\u{1b}]0;title\u{07}Rum"), "Rum");
        assert_eq!(sanitize_text("\u{1b}]0;title\u{1b}\\Rum"), "Rum");
    }

    #[test]
    fn test_sanitize_drops_controls_and_newlines() {
        assert_eq!(sanitize_text("Gin\nTonic\t\u{0}!"), "GinTonic!");
    }

    #[test]
    fn test_sanitize_bare_esc() {
        assert_eq!(sanitize_text("a\u{1b}b"), "ab");
    }

    #[test]
    fn test_sanitize_preserves_unicode() {
        assert_eq!(sanitize_text("Génépi \u{1b}[1m绿\u{1b}[0m"), "Génépi 绿");
    }
}
