//! Category tags and keyword-based category detection.

/// Crypto commentary.
pub const CRYPTO: &str = "crypto";
/// Jokes.
pub const FUNNY: &str = "funny";
/// Finance quotes, tips and statistics.
pub const FINANCE: &str = "finance";
/// Social discussion prompts.
pub const SOCIAL: &str = "social";
/// Alias served by the social generator.
pub const SOCIOLOGY: &str = "sociology";
/// Text that matches no known category.
pub const GENERAL: &str = "general";
/// Records written without a category.
pub const UNKNOWN: &str = "unknown";

const KEYWORDS: &[(&str, &[&str])] = &[
    (CRYPTO, &["crypto", "bitcoin", "ethereum", "blockchain"]),
    (FUNNY, &["joke", "funny", "humor", "laugh"]),
    (FINANCE, &["finance", "invest", "money", "stock"]),
    (SOCIAL, &["social", "sociology", "society", "community"]),
];

/// Guess the category of free-form text from keywords.
///
/// Categories are checked in a fixed order (crypto, funny, finance, social)
/// and the first hit wins. Text without any keyword is [`GENERAL`].
///
/// # Examples
///
/// ```
/// use tweetloom_content::detect_category;
///
/// assert_eq!(detect_category("Bitcoin just hit a new high"), "crypto");
/// assert_eq!(detect_category("Good morning"), "general");
/// ```
pub fn detect_category(text: &str) -> &'static str {
    let lower = text.to_lowercase();
    KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|word| lower.contains(word)))
        .map(|(category, _)| *category)
        .unwrap_or(GENERAL)
}
