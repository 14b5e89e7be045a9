//! Redemption code generation
//!
//! Codes are a short prefix followed by three digits (`MVT123`). There are
//! only 900 suffixes per prefix, so batches are drawn against the set of codes
//! already issued and resampled on collision.

use std::collections::HashSet;

use rand::Rng;

use crate::domain::DomainError;

const SUFFIX_MIN: u16 = 100;
const SUFFIX_MAX: u16 = 999;

/// Generator for team redemption codes
#[derive(Debug, Clone)]
pub struct RedemptionCodeGenerator {
    prefix: String,
}

impl RedemptionCodeGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into().trim().to_uppercase(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Total number of distinct codes this generator can produce
    pub fn capacity(&self) -> usize {
        usize::from(SUFFIX_MAX - SUFFIX_MIN + 1)
    }

    /// Draw a single code; no collision check
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let suffix = rng.gen_range(SUFFIX_MIN..=SUFFIX_MAX);
        format!("{}{}", self.prefix, suffix)
    }

    /// Draw `count` codes that collide neither with `issued` nor with each other
    pub fn generate_batch<R: Rng + ?Sized>(
        &self,
        count: usize,
        issued: &HashSet<String>,
        rng: &mut R,
    ) -> Result<Vec<String>, DomainError> {
        let taken = issued.iter().filter(|c| self.matches(c)).count();
        let available = self.capacity().saturating_sub(taken);

        if count > available {
            return Err(DomainError::validation(format!(
                "Cannot issue {} more '{}' codes: only {} remain",
                count, self.prefix, available
            )));
        }

        let mut batch = Vec::with_capacity(count);
        let mut seen: HashSet<String> = HashSet::with_capacity(count);

        while batch.len() < count {
            let code = self.generate(rng);

            if issued.contains(&code) || !seen.insert(code.clone()) {
                continue;
            }

            batch.push(code);
        }

        Ok(batch)
    }

    /// Whether `code` has the shape this generator produces
    pub fn matches(&self, code: &str) -> bool {
        let Some(suffix) = code.strip_prefix(self.prefix.as_str()) else {
            return false;
        };

        suffix.len() == 3
            && suffix.chars().all(|c| c.is_ascii_digit())
            && suffix
                .parse::<u16>()
                .map(|n| (SUFFIX_MIN..=SUFFIX_MAX).contains(&n))
                .unwrap_or(false)
    }
}

impl Default for RedemptionCodeGenerator {
    fn default() -> Self {
        Self::new("MVT")
    }
}
