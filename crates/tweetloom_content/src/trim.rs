//! Fitting post text into the platform length budget.

use regex::Regex;
use std::sync::LazyLock;

/// Platform character limit.
pub const DEFAULT_MAX_LENGTH: usize = 280;

/// Bodies shorter than this are not worth keeping next to the hashtags.
const MIN_BODY_BUDGET: usize = 20;
const ELLIPSIS: &str = "...";

static HASHTAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#\w+").expect("Valid hashtag regex"));

/// Hashtag tokens (`#` followed by word characters) in order of appearance.
pub fn extract_hashtags(text: &str) -> Vec<&str> {
    HASHTAG.find_iter(text).map(|m| m.as_str()).collect()
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

fn take_chars(text: &str, count: usize) -> &str {
    match text.char_indices().nth(count) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Trim `text` to at most `max_length` characters.
///
/// Hashtags are kept whenever possible:
///
/// 1. Text that already fits is returned unchanged.
/// 2. Hashtags are pulled out of the body and re-joined with single spaces.
/// 3. If body and hashtags fit with one separating space, that is the result.
/// 4. Otherwise the body is cut to leave room for the hashtags and an
///    ellipsis, provided more than 20 characters remain for it.
/// 5. Failing that, the original text is cut and the hashtags are dropped.
///
/// Lengths count Unicode scalar values, so multi-byte text is never split
/// inside a character. The result never exceeds `max_length` for
/// `max_length > 3`, and trimming a trimmed text is a no-op.
///
/// # Examples
///
/// ```
/// use tweetloom_content::trim_tweet;
///
/// assert_eq!(trim_tweet("short #tag", 280), "short #tag");
///
/// let long = format!("{} #crypto", "a".repeat(300));
/// let trimmed = trim_tweet(&long, 280);
/// assert!(trimmed.ends_with("... #crypto"));
/// assert_eq!(trimmed.chars().count(), 280);
/// ```
pub fn trim_tweet(text: &str, max_length: usize) -> String {
    if char_len(text) <= max_length {
        return text.to_string();
    }

    let hashtags = extract_hashtags(text).join(" ");
    let body_only = HASHTAG.replace_all(text, "");
    let body_only = body_only.trim();

    let hashtag_len = char_len(&hashtags);
    if char_len(body_only) + hashtag_len + 1 <= max_length {
        return format!("{} {}", body_only, hashtags).trim().to_string();
    }

    let available = max_length.saturating_sub(hashtag_len + 1);
    if available > MIN_BODY_BUDGET {
        let body = take_chars(body_only, available - ELLIPSIS.len());
        return format!("{}{} {}", body, ELLIPSIS, hashtags)
            .trim()
            .to_string();
    }

    let cut = max_length.saturating_sub(ELLIPSIS.len());
    format!("{}{}", take_chars(text, cut), ELLIPSIS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_chars_respects_boundaries() {
        assert_eq!(take_chars("h\u{e9}llo", 2), "h\u{e9}");
        assert_eq!(take_chars("abc", 10), "abc");
        assert_eq!(take_chars("abc", 0), "");
    }

    #[test]
    fn test_hashtags_survive_when_whitespace_is_enough() {
        let text = format!("   {}   #one #two", "x".repeat(20));
        let trimmed = trim_tweet(&text, 30);
        assert_eq!(trimmed, format!("{} #one #two", "x".repeat(20)));
    }

    #[test]
    fn test_hashtags_dominating_budget_are_dropped() {
        let tags: Vec<String> = (0..10).map(|i| format!("#hashtag{i}")).collect();
        let text = format!("{} {}", "body ".repeat(10), tags.join(" "));
        let trimmed = trim_tweet(&text, 40);

        assert_eq!(char_len(&trimmed), 40);
        assert!(trimmed.ends_with("..."));
        assert!(trimmed.starts_with("body body"));
    }
}
