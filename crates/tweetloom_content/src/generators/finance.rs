use super::pick;
use crate::category::FINANCE;
use crate::generator::Generator;
use crate::pool::FinancePool;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use std::path::Path;
use tweetloom_error::DataLoadError;

const QUOTE_SHARE: f64 = 0.4;
const TIP_SHARE: f64 = 0.3;

/// Quote (40%), tip (30%) or statistic (30%), chosen by one uniform draw.
#[derive(Debug, Clone)]
pub struct FinanceGenerator {
    pool: FinancePool,
}

impl FinanceGenerator {
    /// Wrap a validated pool.
    pub fn new(pool: FinancePool) -> Result<Self, DataLoadError> {
        pool.validate()?;
        Ok(Self { pool })
    }

    /// Load the pool from `finance_quotes.json` in `data_dir`.
    pub fn from_data_dir(data_dir: &Path) -> Result<Self, DataLoadError> {
        Self::new(FinancePool::load(data_dir)?)
    }
}

impl Generator for FinanceGenerator {
    fn category(&self) -> &str {
        FINANCE
    }

    fn generate(&self, rng: &mut dyn RngCore) -> String {
        let draw: f64 = rng.r#gen();

        if draw < QUOTE_SHARE {
            match self.pool.quotes().choose(rng) {
                Some(quote) => format!(
                    "\"{}\" \u{2014} {}\n\n#Finance #Investing #Money",
                    quote.text(),
                    quote.author()
                ),
                None => String::new(),
            }
        } else if draw < QUOTE_SHARE + TIP_SHARE {
            let tip = pick(rng, self.pool.tips());
            format!("\u{1F4B0} Financial Tip: {tip}\n\n#FinancialFreedom #MoneyTips #PersonalFinance")
        } else {
            let stat = pick(rng, self.pool.statistics());
            format!("\u{1F4CA} Did you know? {stat}\n\n#FinanceFacts #Economics #Investing")
        }
    }
}
