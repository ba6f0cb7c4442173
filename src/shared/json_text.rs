//! Minimal JSON text helpers for the Gemini wire format.
//!
//! The request body is assembled by hand around a single escaped string and the
//! response is never fully parsed: [`extract_first_text`] scans for the first
//! `"text":"` marker and decodes the string value that follows it.
//!
//! Known limitation: the scan does not track nesting, so a `text` field that
//! appears before the candidate parts (for example inside metadata) is the one
//! that gets returned.
//!
//! Decoding is lenient: after an unrecognised `\` the escaped character is
//! kept as is. `\uXXXX` is the one exception and is decoded to its code point
//! (surrogate pairs combined), which goes beyond a pass-through scan that would
//! leave `\u003c` as `u003c`. This keeps [`escape_json_string`] output for
//! control characters decodable back to the original text.

use std::fmt::Write;

const TEXT_FIELD_MARKER: &str = "\"text\":\"";

/// Wraps `prompt` in the fixed `generateContent` envelope.
pub fn encode_request(prompt: &str) -> String {
    format!(
        "{{\"contents\":[{{\"role\":\"user\",\"parts\":[{{\"text\": {} }}]}}]}}",
        escape_json_string(prompt)
    )
}

/// Encodes `value` as a quoted JSON string literal.
pub fn escape_json_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                // Writing to a String cannot fail.
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Returns the decoded, trimmed value of the first `"text":"` field in `body`.
///
/// When the marker is missing the raw body is handed back inside a placeholder
/// so that error payloads and shape changes stay visible to the caller.
pub fn extract_first_text(body: &str) -> String {
    match body.find(TEXT_FIELD_MARKER) {
        Some(idx) => {
            let (decoded, _) = unescape_until_quote(&body[idx + TEXT_FIELD_MARKER.len()..]);
            decoded.trim().to_string()
        }
        None => format!("(No 'text' field found)\nRaw response:\n{}", body),
    }
}

/// Decodes escaped string content up to the first unescaped `"`.
///
/// Returns the decoded text and whether a closing quote was found. Unknown
/// escapes keep the escaped character; a trailing lone backslash is dropped.
pub fn unescape_until_quote(input: &str) -> (String, bool) {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        match c {
            '"' => return (out, true),
            '\\' => {
                let Some(escaped) = chars.next() else {
                    break;
                };
                match escaped {
                    '"' => out.push('"'),
                    '\\' => out.push('\\'),
                    '/' => out.push('/'),
                    'b' => out.push('\u{08}'),
                    'f' => out.push('\u{0c}'),
                    'n' => out.push('\n'),
                    'r' => out.push('\r'),
                    't' => out.push('\t'),
                    'u' => match decode_unicode_escape(&mut chars) {
                        Some(decoded) => out.push(decoded),
                        None => out.push('u'),
                    },
                    other => out.push(other),
                }
            }
            c => out.push(c),
        }
    }

    (out, false)
}

/// Consumes `XXXX` (and a following `\uXXXX` low surrogate when needed).
/// Leaves the iterator untouched when the digits are malformed.
fn decode_unicode_escape(chars: &mut std::str::Chars<'_>) -> Option<char> {
    let mut lookahead = chars.clone();
    let high = read_hex4(&mut lookahead)?;

    let code = if (0xD800..0xDC00).contains(&high) {
        let mut pair = lookahead.clone();
        let low = match (pair.next(), pair.next()) {
            (Some('\\'), Some('u')) => read_hex4(&mut pair),
            _ => None,
        };
        match low {
            Some(low) if (0xDC00..0xE000).contains(&low) => {
                lookahead = pair;
                0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
            }
            _ => 0xFFFD,
        }
    } else {
        high
    };

    *chars = lookahead;
    Some(char::from_u32(code).unwrap_or('\u{FFFD}'))
}

fn read_hex4(chars: &mut std::str::Chars<'_>) -> Option<u32> {
    let mut value = 0u32;
    for _ in 0..4 {
        value = value * 16 + chars.next()?.to_digit(16)?;
    }
    Some(value)
}
