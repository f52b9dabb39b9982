//! Tweet content for tweetloom.
//!
//! This crate turns static per-category data pools into post text:
//!
//! - **Generators**: one per category, each a pure random draw over its pool
//! - **Selector**: weighted category choice, generator dispatch with a default
//!   fallback, and trimming to the platform length budget
//! - **Validation**: advisory checks used before posting hand-written text
//!
//! # Example
//!
//! ```rust,no_run
//! use rand::SeedableRng;
//! use tweetloom_content::{CategoryWeights, ContentSelector, GeneratorRegistry};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = GeneratorRegistry::from_data_dir("data")?;
//! let weights = CategoryWeights::new([("crypto", 1.0), ("funny", 3.0)])?;
//! let selector = ContentSelector::new(weights, registry, "crypto", 280)?;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let tweet = selector.generate_tweet(&mut rng);
//! println!("[{}] {}", tweet.category(), tweet.text());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod category;
mod generator;
pub mod generators;
mod pool;
mod selector;
mod trim;
mod validation;

pub use category::{
    CRYPTO, FINANCE, FUNNY, GENERAL, SOCIAL, SOCIOLOGY, UNKNOWN, detect_category,
};
pub use generator::{Generator, GeneratorRegistry};
pub use generators::{CryptoGenerator, FinanceGenerator, HumorGenerator, SocialGenerator};
pub use pool::{
    CRYPTO_POOL_FILE, CryptoPool, FINANCE_POOL_FILE, FinancePool, JOKE_POOL_FILE, JokePool, Quote,
    SOCIAL_POOL_FILE, SocialPool,
};
pub use selector::{CategoryWeights, ContentSelector, GeneratedTweet, select_category};
pub use trim::{DEFAULT_MAX_LENGTH, extract_hashtags, trim_tweet};
pub use validation::{ContentValidation, ContentValidator, validate_tweet};
