// SPDX-License-Identifier: MPL-2.0
//! Parser for `.properties` bundles.
//!
//! Follows the line-oriented key/value format used by message bundles:
//!
//! - `#` and `!` start comment lines; blank lines are ignored
//! - keys end at the first unescaped `=`, `:` or whitespace
//! - a line ending in an odd number of backslashes continues on the next line,
//!   whose leading whitespace is dropped
//! - `\t`, `\n`, `\r`, `\f` and `\uXXXX` escapes are decoded; any other escaped
//!   character stands for itself
//!
//! Input is decoded as UTF-8, falling back to ISO-8859-1 when the bytes are not
//! valid UTF-8.

use crate::error::{Error, Result};
use crate::resource::LocatedResource;
use std::borrow::Cow;

const UTF8_BOM: &str = "\u{feff}";

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

/// Reads and parses a located bundle. The resource stream is released before
/// this returns.
///
/// # Errors
///
/// Returns [`Error::UnreadableResource`] if the resource cannot be read or is
/// not a well-formed properties document.
pub fn read(resource: &LocatedResource) -> Result<Vec<(String, String)>> {
    let bytes = resource.read_all()?;
    parse(&bytes).map_err(|err| Error::unreadable(resource.locator(), err))
}

/// Parses a properties document into its entries, in file order.
///
/// Later duplicates of a key are kept; inserting the entries into a map in
/// order gives the usual "last definition wins" result.
///
/// # Errors
///
/// Returns [`Error::MalformedProperties`] for an invalid `\uXXXX` escape.
pub fn parse(bytes: &[u8]) -> Result<Vec<(String, String)>> {
    let decoded = decode(bytes);
    let text = decoded.strip_prefix(UTF8_BOM).unwrap_or(&*decoded);

    logical_lines(text)
        .into_iter()
        .map(|(line_no, line)| -> Result<(String, String)> {
            let (key, value) = split_entry(&line);
            Ok((unescape(key, line_no)?, unescape(value, line_no)?))
        })
        .collect()
}

/// Decodes bundle bytes: UTF-8 when valid, ISO-8859-1 otherwise.
pub fn decode(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => Cow::Owned(bytes.iter().map(|&b| char::from(b)).collect()),
    }
}

/// Joins continued lines and drops comments and blank lines. Each logical
/// line carries the 1-based number of its first physical line.
fn logical_lines(text: &str) -> Vec<(usize, String)> {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut start = 0;
    let mut continuing = false;

    for (idx, raw) in normalized.split('\n').enumerate() {
        let trimmed = raw.trim_start_matches(is_blank);
        if !continuing {
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                continue;
            }
            start = idx + 1;
        }

        let trailing_backslashes = trimmed.chars().rev().take_while(|&c| c == '\\').count();
        if trailing_backslashes % 2 == 1 {
            current.push_str(&trimmed[..trimmed.len() - 1]);
            continuing = true;
        } else {
            current.push_str(trimmed);
            lines.push((start, std::mem::take(&mut current)));
            continuing = false;
        }
    }

    // A continuation marker on the last line simply ends the entry.
    if continuing {
        lines.push((start, current));
    }
    lines
}

/// Splits a logical line into its raw (still escaped) key and value.
fn split_entry(line: &str) -> (&str, &str) {
    let mut key_end = line.len();
    let mut value_start = line.len();
    let mut has_separator = false;
    let mut escaped = false;

    for (idx, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                key_end = idx;
                value_start = idx + 1;
                has_separator = true;
                break;
            }
            c if is_blank(c) => {
                key_end = idx;
                value_start = idx + c.len_utf8();
                break;
            }
            _ => {}
        }
    }

    let rest = &line[value_start..];
    let mut skip = 0;
    for c in rest.chars() {
        if is_blank(c) {
            skip += c.len_utf8();
        } else if !has_separator && (c == '=' || c == ':') {
            has_separator = true;
            skip += 1;
        } else {
            break;
        }
    }

    (&line[..key_end], &rest[skip..])
}

fn unescape(raw: &str, line_no: usize) -> Result<String> {
    let mut out = String::with_capacity(raw.len());
    let mut units: Vec<u16> = Vec::new();
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            flush_units(&mut units, &mut out);
            out.push(c);
            continue;
        }
        let Some(escaped) = chars.next() else {
            break;
        };
        if escaped == 'u' {
            let hex: String = chars.by_ref().take(4).collect();
            let unit = (hex.len() == 4)
                .then(|| u16::from_str_radix(&hex, 16).ok())
                .flatten()
                .ok_or_else(|| Error::MalformedProperties {
                    line: line_no,
                    reason: format!("malformed \\uxxxx encoding: \\u{hex}"),
                })?;
            units.push(unit);
            continue;
        }
        flush_units(&mut units, &mut out);
        out.push(match escaped {
            't' => '\t',
            'n' => '\n',
            'r' => '\r',
            'f' => '\x0c',
            other => other,
        });
    }
    flush_units(&mut units, &mut out);
    Ok(out)
}

/// Decodes pending `\uXXXX` code units, pairing surrogates.
fn flush_units(units: &mut Vec<u16>, out: &mut String) {
    if units.is_empty() {
        return;
    }
    out.extend(
        char::decode_utf16(units.drain(..)).map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(text: &str) -> Vec<(String, String)> {
        parse(text.as_bytes()).expect("document should parse")
    }

    fn pair(key: &str, value: &str) -> (String, String) {
        (key.to_string(), value.to_string())
    }

    #[test]
    fn parses_all_separator_styles() {
        let parsed = entries("a=1\nb:2\nc 3\nd = 4\ne : 5\nf\t\t6\n");
        assert_eq!(
            parsed,
            vec![
                pair("a", "1"),
                pair("b", "2"),
                pair("c", "3"),
                pair("d", "4"),
                pair("e", "5"),
                pair("f", "6"),
            ]
        );
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let parsed = entries("# comment\n! also comment\n\n   \nkey=value\n");
        assert_eq!(parsed, vec![pair("key", "value")]);
    }

    #[test]
    fn key_without_value_maps_to_empty_string() {
        assert_eq!(entries("lonely\n"), vec![pair("lonely", "")]);
        assert_eq!(entries("lonely=\n"), vec![pair("lonely", "")]);
    }

    #[test]
    fn only_one_separator_is_consumed() {
        assert_eq!(entries("a==b\n"), vec![pair("a", "=b")]);
        assert_eq!(entries("a = :b\n"), vec![pair("a", ":b")]);
    }

    #[test]
    fn value_keeps_trailing_whitespace() {
        assert_eq!(entries("a = b  \n"), vec![pair("a", "b  ")]);
    }

    #[test]
    fn continuation_joins_lines_and_trims_leading_whitespace() {
        let parsed = entries("fruits = apple, \\\n         banana, \\\n   pear\nnext=1\n");
        assert_eq!(
            parsed,
            vec![pair("fruits", "apple, banana, pear"), pair("next", "1")]
        );
    }

    #[test]
    fn escaped_backslash_does_not_continue() {
        let parsed = entries("path=C:\\\\\nnext=1\n");
        assert_eq!(parsed, vec![pair("path", "C:\\"), pair("next", "1")]);
    }

    #[test]
    fn comment_marker_inside_continuation_is_literal() {
        let parsed = entries("a=x\\\n#not-a-comment\n");
        assert_eq!(parsed, vec![pair("a", "x#not-a-comment")]);
    }

    #[test]
    fn escaped_separators_belong_to_key() {
        let parsed = entries("key\\=with\\:colon\\ space = v\n");
        assert_eq!(parsed, vec![pair("key=with:colon space", "v")]);
    }

    #[test]
    fn decodes_character_escapes() {
        let parsed = entries("a=tab\\there\\nnew\\rret\\fform\\q\n");
        assert_eq!(parsed, vec![pair("a", "tab\there\nnew\rret\x0cformq")]);
    }

    #[test]
    fn decodes_unicode_escapes_and_surrogate_pairs() {
        let parsed = entries("a=zur\\u00fcck\nb=\\uD83D\\uDE00\n");
        assert_eq!(parsed, vec![pair("a", "zurück"), pair("b", "😀")]);
    }

    #[test]
    fn malformed_unicode_escape_is_rejected_with_line() {
        let err = parse(b"ok=1\n\nbad=\\u00zz\n").unwrap_err();
        match err {
            Error::MalformedProperties { line, .. } => assert_eq!(line, 3),
            other => panic!("expected MalformedProperties, got {other:?}"),
        }
    }

    #[test]
    fn truncated_unicode_escape_is_rejected() {
        assert!(parse(b"bad=\\u12").is_err());
    }

    #[test]
    fn handles_crlf_and_cr_line_endings() {
        let parsed = entries("a=1\r\nb=2\rc=3");
        assert_eq!(parsed, vec![pair("a", "1"), pair("b", "2"), pair("c", "3")]);
    }

    #[test]
    fn falls_back_to_latin1_for_invalid_utf8() {
        // 0xFC is 'ü' in ISO-8859-1 and invalid as a lone UTF-8 byte
        let parsed = parse(b"a=zur\xfcck\n").unwrap();
        assert_eq!(parsed, vec![pair("a", "zurück")]);
    }

    #[test]
    fn strips_utf8_byte_order_mark() {
        let parsed = parse("\u{feff}a=1\n".as_bytes()).unwrap();
        assert_eq!(parsed, vec![pair("a", "1")]);
    }

    #[test]
    fn duplicates_are_kept_in_order() {
        let parsed = entries("a=1\na=2\n");
        assert_eq!(parsed, vec![pair("a", "1"), pair("a", "2")]);
    }

    #[test]
    fn read_wraps_parse_failures_as_unreadable() {
        let resource = LocatedResource::from_bytes("mem:bad", b"bad=\\uXYZW".to_vec());
        let err = read(&resource).unwrap_err();
        assert!(matches!(err, Error::UnreadableResource { .. }));
    }
}
