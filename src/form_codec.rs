//! Percent-decoding and `application/x-www-form-urlencoded` routines.
//!
//! Everything here is a pure function over strings. The decode side follows
//! the WHATWG percent-decode algorithm: a malformed escape (a `%` not
//! followed by two hex digits) is copied through unchanged rather than
//! rejected.

use crate::search_params::Param;

/// Decodes percent-escapes byte-wise.
///
/// A `%` followed by two hex digits becomes the corresponding byte; any
/// other `%` is left in place. Decoded byte sequences that are not valid
/// UTF-8 come out with U+FFFD replacement characters.
pub fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (from_hex_digit(bytes[i + 1]), from_hex_digit(bytes[i + 2])) {
                out.push(hi << 4 | lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Encodes a string for use as a form-urlencoded key or value.
///
/// The input is treated as UTF-8 bytes: space becomes `+`, ASCII
/// alphanumerics and `*-._` pass through, everything else is
/// percent-encoded with uppercase hex digits.
pub fn form_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for &b in input.as_bytes() {
        if b == b' ' {
            out.push('+');
        } else if is_form_unescaped_byte(b) {
            out.push(b as char);
        } else {
            out.push('%');
            out.push(to_hex_upper(b >> 4) as char);
            out.push(to_hex_upper(b & 0x0F) as char);
        }
    }
    out
}

/// Parses a form-urlencoded string into ordered key/value pairs.
///
/// Empty `&`-segments are dropped. A segment without `=` yields an empty
/// value. `+` is substituted with space in both halves before
/// percent-decoding.
pub fn parse_form_encoded(raw: &str) -> Vec<Param> {
    let mut pairs = Vec::new();
    for segment in raw.split('&') {
        if segment.is_empty() {
            continue;
        }
        let (raw_key, raw_value) = match segment.split_once('=') {
            Some((key, value)) => (key, value),
            None => (segment, ""),
        };
        let key = percent_decode(&raw_key.replace('+', " "));
        let value = percent_decode(&raw_value.replace('+', " "));
        pairs.push(Param::new(key, value));
    }
    pairs
}

/// Serializes pairs back to form-urlencoded text, without a leading `?`.
pub fn encode_form_encoded(pairs: &[Param]) -> String {
    pairs
        .iter()
        .map(|pair| format!("{}={}", form_encode(pair.key()), form_encode(pair.value())))
        .collect::<Vec<_>>()
        .join("&")
}

fn is_form_unescaped_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'*' | b'-' | b'.' | b'_')
}

fn from_hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

fn to_hex_upper(n: u8) -> u8 {
    if n < 10 { b'0' + n } else { b'A' + n - 10 }
}
