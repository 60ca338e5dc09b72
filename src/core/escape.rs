//! String escape handling
//!
//! Two layers of escaping show up in doxygen's data tables:
//! - JS string escapes inside the literals: `\'` `\"` `\\` `\n` `\t`
//!   `\xNN` `\uXXXX`. Decoded on parse, re-encoded on write.
//! - HTML numeric character references inside display text (`&#160;`).
//!   Left intact in the stored text; `decode_char_refs` converts them
//!   for display.
//!
//! Uses Cow for zero-copy when nothing needs decoding.

use memchr::memchr;
use std::borrow::Cow;

/// Decode JS string escapes in a literal's content
///
/// Returns Borrowed if no escapes are present (zero-copy),
/// returns Owned if escapes were decoded.
pub fn decode_js_string(input: &[u8]) -> Cow<'_, str> {
    // Fast path: no backslash means nothing to decode
    if memchr(b'\\', input).is_none() {
        return String::from_utf8_lossy(input);
    }
    Cow::Owned(decode_js_escapes(input))
}

/// Decode JS string escapes in strict mode
///
/// Returns Err for malformed escape sequences instead of passing them
/// through verbatim.
pub fn decode_js_string_strict(input: &[u8]) -> Result<Cow<'_, str>, &'static str> {
    if memchr(b'\\', input).is_none() {
        return std::str::from_utf8(input)
            .map(Cow::Borrowed)
            .map_err(|_| "String literal is not valid UTF-8");
    }
    decode_js_escapes_strict(input).map(Cow::Owned)
}

/// Decode all escape sequences, passing malformed ones through verbatim
fn decode_js_escapes(input: &[u8]) -> String {
    match decode_impl(input, false) {
        Ok(s) => s,
        // Lenient decode never returns Err
        Err(_) => String::from_utf8_lossy(input).into_owned(),
    }
}

/// Decode all escape sequences, rejecting malformed ones
fn decode_js_escapes_strict(input: &[u8]) -> Result<String, &'static str> {
    decode_impl(input, true)
}

fn decode_impl(input: &[u8], strict: bool) -> Result<String, &'static str> {
    let mut result = String::with_capacity(input.len());
    let mut pos = 0;

    while pos < input.len() {
        let bs = match memchr(b'\\', &input[pos..]) {
            Some(i) => pos + i,
            None => {
                result.push_str(&String::from_utf8_lossy(&input[pos..]));
                break;
            }
        };

        result.push_str(&String::from_utf8_lossy(&input[pos..bs]));

        let Some(&esc) = input.get(bs + 1) else {
            if strict {
                return Err("Trailing backslash in string literal");
            }
            result.push('\\');
            break;
        };

        match esc {
            b'\'' => {
                result.push('\'');
                pos = bs + 2;
            }
            b'"' => {
                result.push('"');
                pos = bs + 2;
            }
            b'\\' => {
                result.push('\\');
                pos = bs + 2;
            }
            b'/' => {
                result.push('/');
                pos = bs + 2;
            }
            b'n' => {
                result.push('\n');
                pos = bs + 2;
            }
            b't' => {
                result.push('\t');
                pos = bs + 2;
            }
            b'r' => {
                result.push('\r');
                pos = bs + 2;
            }
            b'x' => match decode_hex(&input[bs + 2..], 2) {
                Some(cp) => {
                    push_codepoint(&mut result, cp, strict)?;
                    pos = bs + 4;
                }
                None => {
                    if strict {
                        return Err("Malformed \\x escape");
                    }
                    result.push('\\');
                    pos = bs + 1;
                }
            },
            b'u' => match decode_hex(&input[bs + 2..], 4) {
                Some(cp) => {
                    push_codepoint(&mut result, cp, strict)?;
                    pos = bs + 6;
                }
                None => {
                    if strict {
                        return Err("Malformed \\u escape");
                    }
                    result.push('\\');
                    pos = bs + 1;
                }
            },
            other => {
                if strict {
                    return Err("Unknown escape sequence");
                }
                // Unknown escape: keep the escaped byte, drop the backslash
                result.push(other as char);
                pos = bs + 2;
            }
        }
    }

    Ok(result)
}

/// Parse exactly `len` hex digits into a codepoint value
fn decode_hex(input: &[u8], len: usize) -> Option<u32> {
    if input.len() < len {
        return None;
    }
    let mut value = 0u32;
    for &b in &input[..len] {
        let digit = match b {
            b'0'..=b'9' => (b - b'0') as u32,
            b'a'..=b'f' => (b - b'a' + 10) as u32,
            b'A'..=b'F' => (b - b'A' + 10) as u32,
            _ => return None,
        };
        value = value * 16 + digit;
    }
    Some(value)
}

fn push_codepoint(out: &mut String, cp: u32, strict: bool) -> Result<(), &'static str> {
    match char::from_u32(cp) {
        Some(c) => {
            out.push(c);
            Ok(())
        }
        None => {
            if strict {
                Err("Escape sequence is not a valid codepoint")
            } else {
                out.push(char::REPLACEMENT_CHARACTER);
                Ok(())
            }
        }
    }
}

/// Re-encode a string for a single-quoted JS literal (search shards)
pub fn encode_single_quoted(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}

/// Re-encode a string for a double-quoted JS literal (navtree tables)
pub fn encode_double_quoted(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}

/// Decode HTML numeric character references (`&#160;`, `&#x2192;`) for display
///
/// Returns Borrowed when the text contains none (the common case for
/// labels; context labels in search shards use `&#160;` as a separator).
pub fn decode_char_refs(input: &str) -> Cow<'_, str> {
    if memchr(b'&', input.as_bytes()).is_none() {
        return Cow::Borrowed(input);
    }

    let bytes = input.as_bytes();
    let mut result = String::with_capacity(input.len());
    let mut pos = 0;

    while pos < bytes.len() {
        let amp = match memchr(b'&', &bytes[pos..]) {
            Some(i) => pos + i,
            None => {
                result.push_str(&input[pos..]);
                break;
            }
        };
        result.push_str(&input[pos..amp]);

        match parse_char_ref(&bytes[amp..]) {
            Some((c, len)) => {
                result.push(c);
                pos = amp + len;
            }
            None => {
                result.push('&');
                pos = amp + 1;
            }
        }
    }

    Cow::Owned(result)
}

/// Parse `&#NNN;` or `&#xHHH;` at the start of `bytes`, returning the
/// decoded char and the reference's byte length
fn parse_char_ref(bytes: &[u8]) -> Option<(char, usize)> {
    if bytes.get(1) != Some(&b'#') {
        return None;
    }

    let (radix, digits_start) = if matches!(bytes.get(2), Some(b'x') | Some(b'X')) {
        (16, 3)
    } else {
        (10, 2)
    };

    let semi = memchr(b';', bytes)?;
    if semi <= digits_start {
        return None;
    }

    let mut value: u32 = 0;
    for &b in &bytes[digits_start..semi] {
        let digit = (b as char).to_digit(radix)?;
        value = value.checked_mul(radix)?.checked_add(digit)?;
    }

    char::from_u32(value).map(|c| (c, semi + 1))
}
