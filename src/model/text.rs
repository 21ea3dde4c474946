//! Multi-line text normalisation for topics and channel messages.

use serde::{Deserialize, Deserializer};

/// Normalises a multi-line block as written in a configuration document.
///
/// Leading and trailing line breaks are stripped, trailing whitespace is removed, the
/// indentation shared by all non-blank lines is removed, and whitespace-only lines
/// become empty.
pub fn normalize_multiline(text: &str) -> String {
    let trimmed = text.trim_matches(|c| c == '\r' || c == '\n').trim_end();
    dedent(trimmed)
}

fn dedent(text: &str) -> String {
    let margin = text
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(leading_whitespace)
        .reduce(common_prefix)
        .unwrap_or("");

    text.split('\n')
        .map(|line| {
            if line.trim().is_empty() {
                ""
            } else {
                line.strip_prefix(margin).unwrap_or(line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn leading_whitespace(line: &str) -> &str {
    let indent = line.len() - line.trim_start_matches([' ', '\t']).len();
    &line[..indent]
}

fn common_prefix<'a>(a: &'a str, b: &'a str) -> &'a str {
    let shared = a
        .bytes()
        .zip(b.bytes())
        .take_while(|(x, y)| x == y)
        .count();
    &a[..shared]
}

pub fn deserialize_multiline<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    Ok(normalize_multiline(&text))
}

pub fn deserialize_multiline_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let texts = Vec::<String>::deserialize(deserializer)?;
    Ok(texts.iter().map(|text| normalize_multiline(text)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_surrounding_blank_lines() {
        assert_eq!(normalize_multiline("\n\nHello\n\n"), "Hello");
        assert_eq!(normalize_multiline("\r\nHello  \r\n"), "Hello");
    }

    #[test]
    fn removes_common_indentation() {
        let text = "\n    Welcome!\n\n      - be nice\n    - have fun\n    ";

        assert_eq!(
            normalize_multiline(text),
            "Welcome!\n\n  - be nice\n- have fun"
        );
    }

    #[test]
    fn empties_whitespace_only_lines() {
        assert_eq!(normalize_multiline("  a\n   \n  b"), "a\n\nb");
    }

    #[test]
    fn keeps_text_without_indentation() {
        assert_eq!(normalize_multiline("Hi"), "Hi");
        assert_eq!(normalize_multiline(""), "");
    }
}
