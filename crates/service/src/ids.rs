//! Human-readable record identifiers such as `ITEM-4821` and `CLM-5678`.

use std::collections::HashSet;

use rand::Rng;
use tracing::debug;

use crate::errors::ServiceError;

pub const ITEM_PREFIX: &str = "ITEM";
pub const CLAIM_PREFIX: &str = "CLM";

/// Generates `PREFIX-N` identifiers with N drawn from a fixed-width decimal
/// range, rejecting values already taken.
#[derive(Clone, Copy, Debug)]
pub struct IdGenerator {
    digits: u32,
    max_attempts: u32,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self { digits: 4, max_attempts: 64 }
    }
}

impl IdGenerator {
    /// `digits` is clamped to 1..=9, `max_attempts` to at least 1.
    pub fn new(digits: u32, max_attempts: u32) -> Self {
        Self { digits: digits.clamp(1, 9), max_attempts: max_attempts.max(1) }
    }

    pub fn from_config(cfg: &configs::IdConfig) -> Self {
        Self::new(cfg.digits, cfg.max_attempts)
    }

    /// Inclusive numeric range: 1000..=9999 for four digits, 0..=9 for one.
    pub fn range(&self) -> (u64, u64) {
        let high = 10u64.pow(self.digits) - 1;
        let low = if self.digits == 1 { 0 } else { 10u64.pow(self.digits - 1) };
        (low, high)
    }

    pub fn generate<'a, I>(&self, prefix: &str, taken: I) -> Result<String, ServiceError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.generate_with(&mut rand::thread_rng(), prefix, taken)
    }

    /// Random draws first; once `max_attempts` collide, walk the range from a
    /// random start so a free slot is found whenever one exists.
    pub fn generate_with<'a, R, I>(&self, rng: &mut R, prefix: &str, taken: I) -> Result<String, ServiceError>
    where
        R: Rng,
        I: IntoIterator<Item = &'a str>,
    {
        let taken: HashSet<&str> = taken.into_iter().collect();
        let (low, high) = self.range();
        let render = |n: u64| format!("{prefix}-{n}");

        for _ in 0..self.max_attempts {
            let candidate = render(rng.gen_range(low..=high));
            if !taken.contains(candidate.as_str()) {
                return Ok(candidate);
            }
        }

        let span = high - low + 1;
        let start = rng.gen_range(0..span);
        debug!(%prefix, attempts = self.max_attempts, "random ids exhausted; scanning range");
        (0..span)
            .map(|offset| render(low + (start + offset) % span))
            .find(|candidate| !taken.contains(candidate.as_str()))
            .ok_or_else(|| ServiceError::IdSpaceExhausted(prefix.to_string()))
    }
}
