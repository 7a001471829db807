//! HTML entity decoding for generated labels and descriptions.

use std::borrow::Cow;

/// Longest entity body we look for between `&` and `;`.
const MAX_ENTITY_LEN: usize = 10;

/// Decodes the HTML entities the documentation generator escapes into
/// search data. Unknown or unterminated entities are left as-is.
pub(crate) fn decode_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp + 1..];

        let decoded = tail
            .char_indices()
            .take(MAX_ENTITY_LEN + 1)
            .find(|&(_, c)| c == ';')
            .and_then(|(semi, _)| decode_one(&tail[..semi]).map(|c| (c, semi)));

        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &tail[semi + 1..];
            }
            None => {
                out.push('&');
                rest = tail;
            }
        }
    }

    out.push_str(rest);
    Cow::Owned(out)
}

fn decode_one(name: &str) -> Option<char> {
    if let Some(numeric) = name.strip_prefix('#') {
        let (digits, radix) = match numeric
            .strip_prefix('x')
            .or_else(|| numeric.strip_prefix('X'))
        {
            Some(hex) => (hex, 16),
            None => (numeric, 10),
        };
        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
            return None;
        }
        let code = u32::from_str_radix(digits, radix).ok()?;
        return char::from_u32(code);
    }

    Some(match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    #[rstest]
    #[case("Feature(const Feature &amp;)=delete", "Feature(const Feature &)=delete")]
    #[case("std::vector&lt; FeatureSourceRange &gt;", "std::vector< FeatureSourceRange >")]
    #[case("$:&#160;CMakeLists.txt", "$:\u{a0}CMakeLists.txt")]
    #[case("&#x41;&#66;", "AB")]
    #[case("&quot;a&quot;", "\"a\"")]
    fn test_known_entities(#[case] input: &str, #[case] expected: &str) {
        check!(decode_entities(input) == expected);
    }

    #[rstest]
    #[case("a & b")]
    #[case("&unknown;")]
    #[case("trailing &amp")]
    #[case("&#xZZ;")]
    #[case("&;")]
    #[case("&#+65;")]
    #[case("&#x+41;")]
    #[case("&#-1;")]
    #[case("&#x;")]
    fn test_unrecognized_kept_verbatim(#[case] input: &str) {
        check!(decode_entities(input) == input);
    }

    #[test]
    fn test_plain_text_is_borrowed() {
        check!(matches!(decode_entities("FeatureModel"), Cow::Borrowed(_)));
    }
}
