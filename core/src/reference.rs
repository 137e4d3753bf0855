// slotbook/src/reference.rs

//! Human-readable booking reference codes.
//!
//! A reference is drawn uniformly from `A-Z0-9`. The primary space is 8
//! characters (36^8, about 2.8e12 codes). Stores ask a [`ReferenceAllocator`]
//! for candidates and keep the first one that does not collide with an
//! existing booking. The candidate sequence is bounded: after
//! `attempts_per_space` collisions in the primary space it switches to a
//! longer fallback space, and after that it is exhausted.

use rand::Rng;
use std::sync::Arc;

pub const REFERENCE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
pub const REFERENCE_LEN: usize = 8;
pub const FALLBACK_REFERENCE_LEN: usize = 12;
pub const DEFAULT_ATTEMPTS_PER_SPACE: usize = 32;

/// Source of candidate codes. Swappable so collision handling can be driven
/// deterministically.
pub trait CodeSource: Send + Sync {
  fn next_code(&self, len: usize) -> String;
}

/// Thread-local RNG, uniform over [`REFERENCE_ALPHABET`].
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomCodes;

impl CodeSource for RandomCodes {
  fn next_code(&self, len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
      .map(|_| REFERENCE_ALPHABET[rng.gen_range(0..REFERENCE_ALPHABET.len())] as char)
      .collect()
  }
}

#[derive(Clone)]
pub struct ReferenceAllocator {
  source: Arc<dyn CodeSource>,
  attempts_per_space: usize,
}

impl std::fmt::Debug for ReferenceAllocator {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ReferenceAllocator")
      .field("attempts_per_space", &self.attempts_per_space)
      .finish()
  }
}

impl Default for ReferenceAllocator {
  fn default() -> Self {
    Self::new(Arc::new(RandomCodes))
  }
}

impl ReferenceAllocator {
  pub fn new(source: Arc<dyn CodeSource>) -> Self {
    Self {
      source,
      attempts_per_space: DEFAULT_ATTEMPTS_PER_SPACE,
    }
  }

  pub fn with_attempts_per_space(mut self, attempts: usize) -> Self {
    self.attempts_per_space = attempts.max(1);
    self
  }

  pub fn max_candidates(&self) -> usize {
    self.attempts_per_space * 2
  }

  /// Candidate codes in the order a store should try them.
  pub fn candidates(&self) -> impl Iterator<Item = String> + '_ {
    let primary = std::iter::repeat(REFERENCE_LEN).take(self.attempts_per_space);
    let fallback = std::iter::repeat(FALLBACK_REFERENCE_LEN).take(self.attempts_per_space);
    primary.chain(fallback).map(move |len| self.source.next_code(len))
  }
}

/// `true` for codes of either allocation space.
pub fn is_well_formed(code: &str) -> bool {
  (code.len() == REFERENCE_LEN || code.len() == FALLBACK_REFERENCE_LEN)
    && code.bytes().all(|b| REFERENCE_ALPHABET.contains(&b))
}
