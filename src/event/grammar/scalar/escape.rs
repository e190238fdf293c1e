/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! This module exports function(s) for handling scalar
//! escapes in YAML documents.

use crate::error::internal::ErrorCode;

/// Unescape a single escape sequence as defined in section
/// 5.7 of the specification: 18 'special' escapes plus the
/// 8, 16 and 32 bit unicode point encodings.
///
/// It writes the unescaped character to .scratch, returning
/// the number of bytes of .base consumed, or the error code
/// for an invalid sequence. It expects .base to begin with
/// a backslash, as this is the only valid start of an
/// escape sequence.
pub(in crate::event::grammar) fn flow_unescape(
    base: &str,
    scratch: &mut String,
) -> Result<usize, ErrorCode>
{
    let bytes = base.as_bytes();

    debug_assert!(bytes.first() == Some(&b'\\'));

    let mut codepoint_len: Option<u8> = None;

    // See 5.7: Escaped Characters
    // yaml.org/spec/1.2/spec.html#id2776092
    match bytes.get(1)
    {
        Some(b'0') => scratch.push('\0'),
        Some(b'a') => scratch.push('\u{07}'),
        Some(b'b') => scratch.push('\u{08}'),
        Some(b't') | Some(b'\t') => scratch.push('\t'),
        Some(b'n') => scratch.push('\n'),
        Some(b'v') => scratch.push('\u{0B}'),
        Some(b'f') => scratch.push('\u{0C}'),
        Some(b'r') => scratch.push('\r'),
        Some(b'e') => scratch.push('\u{1B}'),
        Some(b' ') => scratch.push(' '),
        Some(b'"') => scratch.push('"'),
        Some(b'/') => scratch.push('/'),
        Some(b'\\') => scratch.push('\\'),
        Some(b'N') => scratch.push('\u{85}'),
        Some(b'_') => scratch.push('\u{A0}'),
        Some(b'L') => scratch.push('\u{2028}'),
        Some(b'P') => scratch.push('\u{2029}'),
        Some(b'x') => codepoint_len = Some(2),
        Some(b'u') => codepoint_len = Some(4),
        Some(b'U') => codepoint_len = Some(8),
        None => return Err(ErrorCode::UnexpectedEOF),
        Some(_) => return Err(ErrorCode::UnknownEscape),
    }

    match codepoint_len
    {
        None => Ok(2),
        Some(len) =>
        {
            let consumed = write_unicode_point(&base[2..], scratch, len)?;

            Ok(2 + consumed)
        },
    }
}

/// Accumulate .codepoint_len hex digits into a unicode
/// point, pushing it onto the scratch space.
fn write_unicode_point(
    base: &str,
    scratch: &mut String,
    codepoint_len: u8,
) -> Result<usize, ErrorCode>
{
    let bytes = base.as_bytes();
    let mut value: u32 = 0;

    for i in 0..codepoint_len as usize
    {
        match bytes.get(i)
        {
            None => return Err(ErrorCode::UnexpectedEOF),
            Some(b) if !b.is_ascii_hexdigit() => return Err(ErrorCode::UnknownEscape),
            Some(b) => value = (value << 4) + as_hex(*b) as u32,
        }
    }

    // Surrogate halves and out of range points have no char
    // representation
    match char::from_u32(value)
    {
        Some(c) =>
        {
            scratch.push(c);

            Ok(codepoint_len as usize)
        },
        None => Err(ErrorCode::UnknownEscape),
    }
}

#[allow(clippy::manual_range_contains)]
#[inline]
fn as_hex(b: u8) -> u8
{
    if b >= b'A' && b <= b'F'
    {
        b - b'A' + 10
    }
    else if b >= b'a' && b <= b'f'
    {
        b - b'a' + 10
    }
    else
    {
        b - b'0'
    }
}

#[cfg(test)]
mod tests
{
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn simple_escapes()
    {
        let tests = [
            ("\\n", "\n"),
            ("\\t", "\t"),
            ("\\\\", "\\"),
            ("\\\"", "\""),
            ("\\0", "\0"),
            ("\\ ", " "),
            ("\\N", "\u{85}"),
            ("\\_", "\u{A0}"),
            ("\\L", "\u{2028}"),
            ("\\P", "\u{2029}"),
        ];

        for (input, expected) in tests
        {
            let mut scratch = String::new();
            let consumed = flow_unescape(input, &mut scratch).expect(input);

            assert_eq!(consumed, 2);
            assert_eq!(scratch, expected);
        }
    }

    #[test]
    fn unicode_escapes()
    {
        let tests = [
            ("\\x41", "A", 4),
            ("\\u2603", "\u{2603}", 6),
            ("\\U0001F600", "\u{1F600}", 10),
        ];

        for (input, expected, len) in tests
        {
            let mut scratch = String::new();
            let consumed = flow_unescape(input, &mut scratch).expect(input);

            assert_eq!(consumed, len);
            assert_eq!(scratch, expected);
        }
    }

    #[test]
    fn invalid_escapes()
    {
        for input in ["\\q", "\\xZZ", "\\uD800"]
        {
            let mut scratch = String::new();

            assert!(flow_unescape(input, &mut scratch).is_err(), "{}", input);
        }
    }

    #[test]
    fn truncated_escape()
    {
        let mut scratch = String::new();

        assert_eq!(
            flow_unescape("\\u26", &mut scratch),
            Err(ErrorCode::UnexpectedEOF)
        );
    }
}
