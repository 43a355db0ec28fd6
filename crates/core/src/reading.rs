use std::fmt;

/// Average reading speed used for estimates.
pub const WORDS_PER_MINUTE: usize = 200;

/// Number of whitespace-separated words.
#[must_use]
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Estimated reading time, at least one minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadingTime {
    minutes: usize,
}

impl ReadingTime {
    #[must_use]
    pub fn minutes(&self) -> usize {
        self.minutes
    }
}

impl fmt::Display for ReadingTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} min read", self.minutes)
    }
}

#[must_use]
pub fn reading_time(text: &str) -> ReadingTime {
    let minutes = word_count(text).div_ceil(WORDS_PER_MINUTE).max(1);
    ReadingTime { minutes }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_words_across_whitespace() {
        assert_eq!(word_count("  one two\n\tthree  "), 3);
        assert_eq!(word_count("   "), 0);
    }

    #[test]
    fn short_text_is_one_minute() {
        assert_eq!(reading_time("").to_string(), "1 min read");
        assert_eq!(reading_time("a few words").minutes(), 1);
    }

    #[test]
    fn rounds_partial_minutes_up() {
        let text = vec!["word"; 201].join(" ");
        assert_eq!(reading_time(&text).to_string(), "2 min read");
        let text = vec!["word"; 400].join(" ");
        assert_eq!(reading_time(&text).minutes(), 2);
    }
}
