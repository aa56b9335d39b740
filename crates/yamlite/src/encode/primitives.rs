use std::borrow::Cow;

use crate::error::{Error, Result};

fn is_control(c: char) -> bool {
    let u = c as u32;
    u < 0x20 || u == 0x7F
}

/// Line breaks cannot be expressed: escapes only make the next character
/// literal, and the scanner splits on `\n` before any unescaping.
fn check_single_line(s: &str) -> Result<()> {
    if s.contains(['\n', '\r']) {
        return Err(Error::Message(format!(
            "scalar {s:?} spans multiple lines and cannot be written"
        )));
    }
    Ok(())
}

/// A leading U+FEFF on the first line would be read back as a BOM.
fn starts_ambiguously(s: &str) -> bool {
    s.starts_with(['"', '\'', '#', '\u{feff}'])
}

fn has_comment_marker(s: &str) -> bool {
    s.contains(" #") || s.contains("\t#")
}

pub fn needs_quotes(s: &str) -> bool {
    if s.is_empty() {
        return true;
    }
    if s.starts_with(char::is_whitespace) || s.ends_with(char::is_whitespace) {
        return true;
    }
    if starts_ambiguously(s) || has_comment_marker(s) {
        return true;
    }
    s.chars().any(is_control)
}

pub fn key_needs_quotes(s: &str) -> bool {
    if needs_quotes(s) {
        return true;
    }
    // The scanner ends a bare key at the first colon or whitespace.
    s.contains(|c: char| c == ':' || c.is_whitespace())
}

pub fn escape_and_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        if ch == '"' || ch == '\\' {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('"');
    out
}

pub fn format_value(s: &str) -> Result<Cow<'_, str>> {
    check_single_line(s)?;
    Ok(if needs_quotes(s) {
        Cow::Owned(escape_and_quote(s))
    } else {
        Cow::Borrowed(s)
    })
}

pub fn format_key(s: &str) -> Result<Cow<'_, str>> {
    check_single_line(s)?;
    Ok(if key_needs_quotes(s) {
        Cow::Owned(escape_and_quote(s))
    } else {
        Cow::Borrowed(s)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_stays_bare() {
        assert_eq!(format_value("hello world").unwrap(), "hello world");
        assert_eq!(format_value("a#b").unwrap(), "a#b");
        assert_eq!(format_value("http://x").unwrap(), "http://x");
    }

    #[test]
    fn ambiguous_values_are_quoted() {
        assert_eq!(format_value("").unwrap(), "\"\"");
        assert_eq!(format_value(" pad").unwrap(), "\" pad\"");
        assert_eq!(format_value("x # y").unwrap(), "\"x # y\"");
        assert_eq!(format_value("\"q\"").unwrap(), r#""\"q\"""#);
        assert_eq!(format_value("#tag").unwrap(), "\"#tag\"");
    }

    #[test]
    fn keys_with_separators_are_quoted() {
        assert_eq!(format_key("name").unwrap(), "name");
        assert_eq!(format_key("a:b").unwrap(), "\"a:b\"");
        assert_eq!(format_key("two words").unwrap(), "\"two words\"");
        assert_eq!(format_key(r"back\slash").unwrap(), r"back\slash");
    }

    #[test]
    fn leading_byte_order_mark_is_quoted() {
        assert_eq!(format_key("\u{feff}a").unwrap(), "\"\u{feff}a\"");
        assert_eq!(format_value("\u{feff}").unwrap(), "\"\u{feff}\"");
        assert_eq!(format_value("a\u{feff}").unwrap(), "a\u{feff}");
    }

    #[test]
    fn multi_line_scalars_are_rejected() {
        assert!(format_value("a\nb").is_err());
        assert!(format_key("a\r").is_err());
    }
}
