use crate::category::FUNNY;
use crate::generator::Generator;
use crate::pool::JokePool;
use rand::seq::{IteratorRandom, SliceRandom};
use rand::{Rng, RngCore};
use std::path::Path;
use tweetloom_error::DataLoadError;

const FALLBACK_HASHTAGS: &[&str] = &["#Funny", "#Humor"];

fn style_hashtags(style: &str) -> &'static [&'static str] {
    match style {
        "programming" => &["#Programming", "#TechJokes", "#DeveloperHumor", "#Coding"],
        "general" => &["#Funny", "#Joke", "#Laugh", "#Humor"],
        "puns" => &["#Puns", "#Wordplay", "#DadJokes"],
        "crypto" => &["#CryptoHumor", "#BitcoinJokes", "#BlockchainJokes"],
        _ => FALLBACK_HASHTAGS,
    }
}

/// Random style, random joke from that style, then one to three of the
/// style's hashtags in random order.
#[derive(Debug, Clone)]
pub struct HumorGenerator {
    pool: JokePool,
}

impl HumorGenerator {
    /// Wrap a validated pool.
    pub fn new(pool: JokePool) -> Result<Self, DataLoadError> {
        pool.validate()?;
        Ok(Self { pool })
    }

    /// Load the pool from `jokes.json` in `data_dir`.
    pub fn from_data_dir(data_dir: &Path) -> Result<Self, DataLoadError> {
        Self::new(JokePool::load(data_dir)?)
    }
}

impl Generator for HumorGenerator {
    fn category(&self) -> &str {
        FUNNY
    }

    fn generate(&self, rng: &mut dyn RngCore) -> String {
        let Some((style, jokes)) = self.pool.styles().iter().choose(rng) else {
            return String::new();
        };
        let joke = jokes.choose(rng).cloned().unwrap_or_default();

        let mut hashtags = style_hashtags(style).to_vec();
        hashtags.shuffle(rng);
        hashtags.truncate(rng.gen_range(1..=3));

        format!("{}\n\n{}", joke, hashtags.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_known_style_uses_its_hashtags() {
        let pool = JokePool::new([("puns", vec!["I used to be a banker, but I lost interest.".to_string()])]);
        let generator = HumorGenerator::new(pool).unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..30 {
            let text = generator.generate(&mut rng);
            let (joke, tags) = text.split_once("\n\n").unwrap();
            assert_eq!(joke, "I used to be a banker, but I lost interest.");
            let tags: Vec<&str> = tags.split(' ').collect();
            assert!((1..=3).contains(&tags.len()));
            assert!(tags.iter().all(|t| ["#Puns", "#Wordplay", "#DadJokes"].contains(t)));
        }
    }

    #[test]
    fn test_unknown_style_falls_back() {
        let pool = JokePool::new([("knock-knock", vec!["Who's there?".to_string()])]);
        let generator = HumorGenerator::new(pool).unwrap();
        let mut rng = StdRng::seed_from_u64(5);

        let text = generator.generate(&mut rng);
        let tags = text.split_once("\n\n").unwrap().1;
        assert!(tags.split(' ').all(|t| FALLBACK_HASHTAGS.contains(&t)));
    }

    #[test]
    fn test_empty_pool_rejected() {
        assert!(HumorGenerator::new(JokePool::default()).is_err());
        let pool = JokePool::new([("puns", Vec::<String>::new())]);
        assert!(HumorGenerator::new(pool).is_err());
    }
}
