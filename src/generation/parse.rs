//! Pull JSON out of chat model responses
//!
//! Models wrap JSON in markdown fences or surround it with prose. These
//! helpers return the outermost object or array slice, leaving validation to
//! serde.

/// Extract the JSON object from a response
pub fn extract_json_object(text: &str) -> Option<&str> {
    extract_between(text, '{', '}')
}

/// Extract the JSON array from a response
pub fn extract_json_array(text: &str) -> Option<&str> {
    extract_between(text, '[', ']')
}

fn extract_between(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    if start < end {
        Some(&text[start..=end])
    } else {
        None
    }
}

/// Remove surrounding quotes and whitespace from a single-line answer
pub fn clean_line(text: &str) -> String {
    text.trim()
        .trim_matches(|c| c == '"' || c == '\'' || c == '`')
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_in_fence() {
        let response = "```json\n{\"quality\": 4, \"reason\": \"ok\"}\n```";
        assert_eq!(
            extract_json_object(response),
            Some("{\"quality\": 4, \"reason\": \"ok\"}")
        );
    }

    #[test]
    fn test_object_with_prose() {
        let response = "Sure! {\"a\": {\"b\": 1}} Hope this helps.";
        assert_eq!(extract_json_object(response), Some("{\"a\": {\"b\": 1}}"));
    }

    #[test]
    fn test_array() {
        assert_eq!(extract_json_array("Parts: [\"a\", \"b\"]"), Some("[\"a\", \"b\"]"));
    }

    #[test]
    fn test_missing_json() {
        assert_eq!(extract_json_object("no json here"), None);
        assert_eq!(extract_json_array("] backwards ["), None);
    }

    #[test]
    fn test_clean_line() {
        assert_eq!(clean_line("  \"What is RAG?\"\n"), "What is RAG?");
        assert_eq!(clean_line("plain"), "plain");
    }
}
