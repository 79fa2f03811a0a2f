//! Token estimation for the max-token splitter
//!
//! Uses a character-based heuristic: 1 token ≈ 4 characters for English
//! text, rounded up so estimates never under-count short words.

/// Token counter with heuristic-based estimation
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenCounter;

impl TokenCounter {
    /// Create new token counter
    pub fn new() -> Self {
        Self
    }

    /// Estimate token count for text
    ///
    /// ```
    /// # use jfall_rag::indexing::splitters::TokenCounter;
    /// let counter = TokenCounter::new();
    /// assert_eq!(counter.estimate("a".repeat(100).as_str()), 25);
    /// assert_eq!(counter.estimate("RAG"), 1);
    /// ```
    pub fn estimate(&self, text: &str) -> usize {
        let char_count = text.chars().count();
        (char_count + 3) / 4
    }

    /// Batch estimate for multiple text segments
    pub fn estimate_batch(&self, texts: &[&str]) -> usize {
        texts.iter().map(|text| self.estimate(text)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_string() {
        assert_eq!(TokenCounter::new().estimate(""), 0);
    }

    #[test]
    fn test_rounds_up() {
        let counter = TokenCounter::new();
        assert_eq!(counter.estimate("abcd"), 1);
        assert_eq!(counter.estimate("abcde"), 2);
    }

    #[test]
    fn test_counts_chars_not_bytes() {
        // 4 chars, 8 bytes
        assert_eq!(TokenCounter::new().estimate("ëëëë"), 1);
    }

    #[test]
    fn test_batch() {
        let counter = TokenCounter::new();
        assert_eq!(counter.estimate_batch(&["abcd", "abcdefgh"]), 3);
    }
}
