//! Lenient JSON recovery for model output.
//!
//! Providers frequently wrap JSON in markdown fences, lead with prose, use
//! typographic quotes, leave trailing commas, or put raw newlines inside
//! string values. [`parse_lenient`] applies a fixed sequence of repairs and
//! parses the result; it never invents content, only strips and normalizes.

use serde_json::Value;

/// Parse possibly-messy model output into a JSON object.
///
/// Repairs, in order: strip code fences, cut to the first balanced `{...}`
/// object, normalize smart quotes, drop trailing commas, escape bare
/// newlines inside strings. Returns `None` when no object can be recovered.
pub fn parse_lenient(raw: &str) -> Option<Value> {
    let text = strip_fences(raw);
    let text = first_object(&text)?;
    let text = normalize_quotes(&text);
    let text = strip_trailing_commas(&text);
    let text = escape_bare_newlines(&text);
    serde_json::from_str(&text).ok()
}

/// Remove markdown code fences, keeping their content.
fn strip_fences(raw: &str) -> String {
    raw.lines()
        .filter(|line| !line.trim_start().starts_with("```"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Extract the first balanced top-level `{...}` block, string-aware.
fn first_object(text: &str) -> Option<String> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (i, ch) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(text[start..start + i + ch.len_utf8()].to_string());
                }
            }
            _ => {}
        }
    }
    None
}

/// Replace typographic double and single quotes with ASCII ones.
fn normalize_quotes(text: &str) -> String {
    text.chars()
        .map(|ch| match ch {
            '\u{201c}' | '\u{201d}' => '"',
            '\u{2018}' | '\u{2019}' => '\'',
            other => other,
        })
        .collect()
}

/// Drop commas that directly precede a closing bracket, outside strings.
fn strip_trailing_commas(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;
    let chars: Vec<char> = text.chars().collect();
    for (i, &ch) in chars.iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            out.push(ch);
            continue;
        }
        if ch == '"' {
            in_string = true;
            out.push(ch);
            continue;
        }
        if ch == ',' {
            let next = chars[i + 1..].iter().find(|c| !c.is_whitespace());
            if matches!(next, Some('}') | Some(']')) {
                continue;
            }
        }
        out.push(ch);
    }
    out
}

/// Escape literal newlines that appear inside string values.
fn escape_bare_newlines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;
    for ch in text.chars() {
        if in_string {
            if escaped {
                escaped = false;
                out.push(ch);
                continue;
            }
            match ch {
                '\\' => {
                    escaped = true;
                    out.push(ch);
                }
                '"' => {
                    in_string = false;
                    out.push(ch);
                }
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                other => out.push(other),
            }
            continue;
        }
        if ch == '"' {
            in_string = true;
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn plain_object_parses() {
        let v = parse_lenient(r#"{"title": "Cut costs"}"#).unwrap();
        assert_eq!(v["title"], "Cut costs");
    }

    #[test]
    fn fenced_object_parses() {
        let raw = "Here is the plan:\n```json\n{\"title\": \"Cut costs\"}\n```\nDone.";
        let v = parse_lenient(raw).unwrap();
        assert_eq!(v["title"], "Cut costs");
    }

    #[test]
    fn leading_prose_is_skipped() {
        let v = parse_lenient("Sure! {\"risk\": \"med\"} hope that helps").unwrap();
        assert_eq!(v["risk"], "med");
    }

    #[test]
    fn smart_quotes_are_normalized() {
        let v = parse_lenient("{\u{201c}title\u{201d}: \u{201c}Plan\u{201d}}").unwrap();
        assert_eq!(v["title"], "Plan");
    }

    #[test]
    fn trailing_commas_are_dropped() {
        let v = parse_lenient(r#"{"steps": ["a", "b",], "tag": "growth",}"#).unwrap();
        assert_eq!(v["steps"].as_array().unwrap().len(), 2);
        assert_eq!(v["tag"], "growth");
    }

    #[test]
    fn bare_newline_in_string_is_escaped() {
        let v = parse_lenient("{\"title\": \"two\nlines\"}").unwrap();
        assert_eq!(v["title"], "two\nlines");
    }

    #[test]
    fn comma_inside_string_survives() {
        let v = parse_lenient(r#"{"title": "fix, then ship"}"#).unwrap();
        assert_eq!(v["title"], "fix, then ship");
    }

    #[test]
    fn nested_object_is_kept_whole() {
        let v = parse_lenient(r#"noise {"a": {"b": 1}, "c": 2} tail"#).unwrap();
        assert_eq!(v["a"]["b"], 1);
        assert_eq!(v["c"], 2);
    }

    #[test]
    fn garbage_yields_none() {
        assert!(parse_lenient("no json here at all").is_none());
        assert!(parse_lenient("{truncated").is_none());
    }

    proptest! {
        // recovery must never panic, whatever the provider sends
        #[test]
        fn never_panics_on_arbitrary_input(raw in ".{0,256}") {
            let _ = parse_lenient(&raw);
        }

        #[test]
        fn valid_json_objects_always_recover(key in "[a-z]{1,8}", val in "[a-z ]{0,16}") {
            let raw = format!("{{\"{key}\": \"{val}\"}}");
            let v = parse_lenient(&raw).unwrap();
            prop_assert_eq!(v[&key].as_str().unwrap(), val.as_str());
        }
    }
}
