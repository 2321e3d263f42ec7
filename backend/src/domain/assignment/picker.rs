//! Replacement reviewer selection strategies.

use std::sync::{Mutex, PoisonError};

use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use crate::domain::UserId;

/// Chooses one reviewer from an eligible pool.
#[cfg_attr(test, mockall::automock)]
pub trait ReviewerPicker: Send + Sync {
    /// Return a member of `pool`, or `None` when it is empty.
    fn pick(&self, pool: &[UserId]) -> Option<UserId>;
}

/// Uniform random choice backed by a small, fast generator.
#[derive(Debug)]
pub struct RandomReviewerPicker {
    rng: Mutex<SmallRng>,
}

impl RandomReviewerPicker {
    /// Seed from operating system entropy.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(SmallRng::from_entropy()),
        }
    }

    /// Reproducible sequence for a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(SmallRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomReviewerPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl ReviewerPicker for RandomReviewerPicker {
    fn pick(&self, pool: &[UserId]) -> Option<UserId> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        pool.choose(&mut *rng).cloned()
    }
}
