//! Reader for generated `var searchData = [...];` files.
//!
//! The grammar is the subset of JavaScript literals the generator emits:
//! nested arrays of single- or double-quoted strings and numbers, optionally
//! wrapped in a variable declaration. Records are then checked for the
//! `[key, [label, [link, flag?, description?]...]]` shape.

use super::entities::decode_entities;
use crate::error::MalformedIndexError;
use crate::types::{IndexEntry, Target};

/// Arrays nested deeper than this are rejected instead of recursing further.
const MAX_DEPTH: usize = 32;

/// A parsed literal, before any shape checking.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RawValue {
    Str(String),
    Num(f64),
    Array(Vec<Self>),
}

/// Parses search data into entries, in record order.
///
/// Labels may still be empty here; table construction enforces the
/// non-empty invariants.
pub(crate) fn parse_entries(input: &str) -> Result<Vec<IndexEntry>, MalformedIndexError> {
    let RawValue::Array(records) = parse_literal(input)? else {
        return Err(MalformedIndexError::NotAnArray);
    };

    records
        .into_iter()
        .enumerate()
        .map(|(record, value)| entry_from_record(record, value))
        .collect()
}

/// Parses the whole input as one (optionally declared) literal.
pub(crate) fn parse_literal(input: &str) -> Result<RawValue, MalformedIndexError> {
    let mut parser = Parser { src: input, pos: 0 };
    parser.skip_trivia();
    parser.declaration()?;
    let value = parser.value(0)?;
    parser.skip_trivia();
    parser.eat(';');
    parser.skip_trivia();
    if parser.peek().is_some() {
        return Err(parser.error("end of input"));
    }
    Ok(value)
}

fn entry_from_record(record: usize, value: RawValue) -> Result<IndexEntry, MalformedIndexError> {
    let RawValue::Array(pair) = value else {
        return Err(MalformedIndexError::MalformedRecord { record });
    };

    // The generated key is opaque; only its presence is required.
    let body = match <[RawValue; 2]>::try_from(pair) {
        Ok([_key, RawValue::Array(body)]) => body,
        _ => return Err(MalformedIndexError::MalformedRecord { record }),
    };

    let mut body = body.into_iter();
    let label = match body.next() {
        Some(RawValue::Str(label)) => decode_entities(&label).into_owned(),
        _ => return Err(MalformedIndexError::MissingLabel { record }),
    };

    let targets = body
        .enumerate()
        .map(|(target, value)| {
            target_from_value(value).ok_or(MalformedIndexError::MalformedTarget { record, target })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(IndexEntry { label, targets })
}

fn target_from_value(value: RawValue) -> Option<Target> {
    let RawValue::Array(parts) = value else {
        return None;
    };
    if parts.len() > 3 {
        return None;
    }

    let mut parts = parts.into_iter();
    let RawValue::Str(link) = parts.next()? else {
        return None;
    };

    let external = match parts.next() {
        None => false,
        Some(RawValue::Num(flag)) => flag == 0.0,
        Some(_) => return None,
    };

    let description = match parts.next() {
        None => None,
        Some(RawValue::Str(text)) if text.is_empty() => None,
        Some(RawValue::Str(text)) => Some(decode_entities(&text).into_owned()),
        Some(_) => return None,
    };

    let (page_reference, anchor_id) = split_link(&link)?;
    Some(Target {
        page_reference,
        anchor_id,
        description,
        external,
    })
}

/// Splits `../page.html#anchor` into the page relative to the documentation
/// root and the anchor. Links are emitted relative to the `search/` directory.
fn split_link(link: &str) -> Option<(String, Option<String>)> {
    let link = link.strip_prefix("../").unwrap_or(link);
    let (page, anchor) = match link.split_once('#') {
        Some((page, anchor)) => (page, (!anchor.is_empty()).then(|| anchor.to_string())),
        None => (link, None),
    };
    if page.is_empty() {
        return None;
    }
    Some((page.to_string(), anchor))
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: char, what: &str) -> Result<(), MalformedIndexError> {
        if self.eat(expected) {
            Ok(())
        } else {
            Err(self.error(what))
        }
    }

    fn error(&self, expected: &str) -> MalformedIndexError {
        MalformedIndexError::Syntax {
            offset: self.pos,
            expected: expected.to_string(),
        }
    }

    /// Skips whitespace and `//` / `/* */` comments.
    fn skip_trivia(&mut self) {
        loop {
            let rest = &self.src[self.pos..];
            let trimmed = rest.trim_start();
            self.pos += rest.len() - trimmed.len();

            if trimmed.starts_with("//") {
                self.pos += trimmed.find('\n').unwrap_or(trimmed.len());
            } else if let Some(body) = trimmed.strip_prefix("/*") {
                self.pos += body.find("*/").map_or(trimmed.len(), |end| end + 4);
            } else {
                break;
            }
        }
    }

    fn ident(&mut self) -> Option<&'a str> {
        let src = self.src;
        let rest = &src[self.pos..];
        let len = rest
            .char_indices()
            .find(|&(i, c)| !(c == '_' || c == '$' || c.is_alphabetic() || (i > 0 && c.is_numeric())))
            .map_or(rest.len(), |(i, _)| i);
        if len == 0 {
            return None;
        }
        self.pos += len;
        Some(&rest[..len])
    }

    /// Consumes an optional `var name =` (or `name =`) prefix.
    fn declaration(&mut self) -> Result<(), MalformedIndexError> {
        let Some(first) = self.ident() else {
            return Ok(());
        };
        self.skip_trivia();
        if matches!(first, "var" | "let" | "const") {
            self.ident().ok_or_else(|| self.error("variable name"))?;
            self.skip_trivia();
        }
        self.expect('=', "'='")?;
        self.skip_trivia();
        Ok(())
    }

    fn value(&mut self, depth: usize) -> Result<RawValue, MalformedIndexError> {
        self.skip_trivia();
        match self.peek() {
            Some('[') => self.array(depth).map(RawValue::Array),
            Some(quote @ ('\'' | '"')) => self.string(quote).map(RawValue::Str),
            Some(c) if c == '-' || c.is_ascii_digit() => self.number().map(RawValue::Num),
            _ => Err(self.error("string, number or array")),
        }
    }

    fn array(&mut self, depth: usize) -> Result<Vec<RawValue>, MalformedIndexError> {
        if depth >= MAX_DEPTH {
            return Err(self.error("shallower nesting"));
        }
        self.expect('[', "'['")?;

        let mut items = Vec::new();
        loop {
            self.skip_trivia();
            if self.eat(']') {
                return Ok(items);
            }
            items.push(self.value(depth + 1)?);
            self.skip_trivia();
            if self.eat(']') {
                return Ok(items);
            }
            // A trailing comma before `]` is allowed by the loop above.
            self.expect(',', "',' or ']'")?;
        }
    }

    fn string(&mut self, quote: char) -> Result<String, MalformedIndexError> {
        self.bump();
        let mut out = String::new();
        loop {
            let c = self.bump().ok_or_else(|| self.error("closing quote"))?;
            match c {
                c if c == quote => return Ok(out),
                '\n' => return Err(self.error("closing quote")),
                '\\' => {
                    let escaped = self.bump().ok_or_else(|| self.error("escape sequence"))?;
                    match escaped {
                        'n' => out.push('\n'),
                        't' => out.push('\t'),
                        'r' => out.push('\r'),
                        'u' => out.push(self.unicode_escape()?),
                        'x' => {
                            let code = self.hex_digits(2)?;
                            out.push(char::from_u32(code).ok_or_else(|| self.error("valid code point"))?);
                        }
                        // Line continuation.
                        '\n' => {}
                        other => out.push(other),
                    }
                }
                other => out.push(other),
            }
        }
    }

    /// Reads exactly `count` hex digits as a code unit.
    fn hex_digits(&mut self, count: usize) -> Result<u32, MalformedIndexError> {
        let hex = self
            .src
            .get(self.pos..self.pos + count)
            .filter(|hex| hex.bytes().all(|b| b.is_ascii_hexdigit()))
            .ok_or_else(|| self.error("hex escape"))?;
        let code = u32::from_str_radix(hex, 16).map_err(|_| self.error("hex escape"))?;
        self.pos += count;
        Ok(code)
    }

    /// Decodes the digits after `\u`, joining a UTF-16 surrogate pair
    /// written as two consecutive escapes.
    fn unicode_escape(&mut self) -> Result<char, MalformedIndexError> {
        let high = self.hex_digits(4)?;
        let code = if (0xD800..=0xDBFF).contains(&high) {
            if !self.src[self.pos..].starts_with("\\u") {
                return Err(self.error("low surrogate escape"));
            }
            self.pos += 2;
            let low = self.hex_digits(4)?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return Err(self.error("low surrogate escape"));
            }
            0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
        } else {
            high
        };
        char::from_u32(code).ok_or_else(|| self.error("valid code point"))
    }

    fn number(&mut self) -> Result<f64, MalformedIndexError> {
        let start = self.pos;
        self.eat('-');
        let rest = &self.src[self.pos..];
        let len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        self.pos += len;
        self.src[start..self.pos].parse().map_err(|_| MalformedIndexError::Syntax {
            offset: start,
            expected: "number".to_string(),
        })
    }
}
