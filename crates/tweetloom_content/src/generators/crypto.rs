use super::pick;
use crate::category::CRYPTO;
use crate::generator::Generator;
use crate::pool::CryptoPool;
use rand::RngCore;
use rand::seq::SliceRandom;
use std::path::Path;
use tweetloom_error::DataLoadError;

const EXTRA_HASHTAGS: usize = 3;

/// Fills a random template with a topic and hashtag, then appends up to three
/// more hashtags from the pool in random order.
#[derive(Debug, Clone)]
pub struct CryptoGenerator {
    pool: CryptoPool,
}

impl CryptoGenerator {
    /// Wrap a validated pool.
    pub fn new(pool: CryptoPool) -> Result<Self, DataLoadError> {
        pool.validate()?;
        Ok(Self { pool })
    }

    /// Load the pool from `crypto_topics.json` in `data_dir`.
    pub fn from_data_dir(data_dir: &Path) -> Result<Self, DataLoadError> {
        Self::new(CryptoPool::load(data_dir)?)
    }
}

impl Generator for CryptoGenerator {
    fn category(&self) -> &str {
        CRYPTO
    }

    fn generate(&self, rng: &mut dyn RngCore) -> String {
        let topic = pick(rng, self.pool.topics());
        let template = pick(rng, self.pool.templates());
        let hashtag = pick(rng, self.pool.hashtags());

        let body = template
            .replace("{topic}", &topic)
            .replace("{hashtag}", &hashtag);

        let mut extra = self.pool.hashtags().clone();
        extra.shuffle(rng);
        extra.truncate(EXTRA_HASHTAGS);

        format!("{} {}", body, extra.join(" ")).trim().to_string()
    }
}
