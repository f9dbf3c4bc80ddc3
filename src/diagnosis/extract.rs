//! Extraction of a JSON object from free-text LLM output.
//!
//! Providers wrap JSON in prose or markdown fencing, and string values may
//! contain braces, so this is a stack-based scan rather than a regex.

/// Extract the first balanced `{...}` substring from text.
///
/// Tracks brace depth while skipping over string literals (including escaped
/// quotes), so nested objects and braces inside string values are handled.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    let start = text.find('{')?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate().skip(start) {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }

        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=i]);
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_object() {
        assert_eq!(extract_json_object(r#"{"a": 1}"#), Some(r#"{"a": 1}"#));
    }

    #[test]
    fn test_object_wrapped_in_prose() {
        let text = "Sure! Here is the diagnosis:\n```json\n{\"diagnosis\": \"worn pads\"}\n```\nHope that helps.";
        assert_eq!(
            extract_json_object(text),
            Some(r#"{"diagnosis": "worn pads"}"#)
        );
    }

    #[test]
    fn test_nested_objects() {
        let text = r#"prefix {"outer": {"inner": [1, 2]}} suffix"#;
        assert_eq!(
            extract_json_object(text),
            Some(r#"{"outer": {"inner": [1, 2]}}"#)
        );
    }

    #[test]
    fn test_braces_inside_string_values() {
        // A greedy regex would mis-extract here
        let text = r#"{"diagnosis": "replace the {left} caliper", "confidence": 80}"#;
        assert_eq!(extract_json_object(text), Some(text));
    }

    #[test]
    fn test_escaped_quotes_inside_strings() {
        let text = r#"{"diagnosis": "the \"squeal\" means wear"}"#;
        assert_eq!(extract_json_object(text), Some(text));
    }

    #[test]
    fn test_no_object() {
        assert_eq!(extract_json_object("no json here"), None);
        assert_eq!(extract_json_object("{unclosed"), None);
    }
}
