//! Built-in generators, one per content category.

mod crypto;
mod finance;
mod humor;
mod social;

pub use crypto::CryptoGenerator;
pub use finance::FinanceGenerator;
pub use humor::HumorGenerator;
pub use social::SocialGenerator;

use rand::RngCore;
use rand::seq::SliceRandom;

/// Pick one entry, or an empty string for an empty slice.
pub(crate) fn pick(rng: &mut dyn RngCore, entries: &[String]) -> String {
    entries.choose(rng).cloned().unwrap_or_default()
}
