//! Random sources the password generator draws its indexes from.

use std::sync::{Arc, Mutex};

use log::warn;
use rand::distr::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform random number source consumed by the password generator.
pub trait RandomSource {
    /// Returns a uniformly distributed index in `0..bound`.
    ///
    /// Callers never pass a `bound` of zero.
    fn next_index(&mut self, bound: usize) -> usize;
}

fn sample_index<R: Rng + ?Sized>(rng: &mut R, bound: usize) -> usize {
    Uniform::new(0, bound)
        .map(|distribution| distribution.sample(rng))
        .unwrap_or(0)
}

/// Random source backed by the per-thread generator of `rand`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_index(&mut self, bound: usize) -> usize {
        sample_index(&mut rand::rng(), bound)
    }
}

/// Adapter turning any `rand` generator into a [`RandomSource`].
#[derive(Debug, Clone)]
pub struct RngSource<R>(R);

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        RngSource(rng)
    }

    pub fn into_inner(self) -> R {
        self.0
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_index(&mut self, bound: usize) -> usize {
        sample_index(&mut self.0, bound)
    }
}

/// Reproducible random source seeded from a `u64`.
pub type SeededRandom = RngSource<StdRng>;

impl SeededRandom {
    /// # Examples
    ///
    /// ```
    /// use candy_rs::password::{RandomSource, SeededRandom};
    ///
    /// let mut first = SeededRandom::from_seed(42);
    /// let mut second = SeededRandom::from_seed(42);
    /// assert_eq!(first.next_index(1000), second.next_index(1000));
    /// ```
    pub fn from_seed(seed: u64) -> Self {
        RngSource(StdRng::seed_from_u64(seed))
    }
}

/// Random source shared between several owners behind a mutex.
///
/// Each clone locks the same inner source for every draw, so generators on
/// different threads can share one state without racing on it.
#[derive(Debug, Default)]
pub struct SharedRandom<S> {
    inner: Arc<Mutex<S>>,
}

impl<S> Clone for SharedRandom<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: RandomSource> SharedRandom<S> {
    pub fn new(source: S) -> Self {
        Self {
            inner: Arc::new(Mutex::new(source)),
        }
    }
}

impl<S: RandomSource> RandomSource for SharedRandom<S> {
    fn next_index(&mut self, bound: usize) -> usize {
        let mut source = match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn!("Shared random source was poisoned, recovering its state");
                poisoned.into_inner()
            }
        };
        source.next_index(bound)
    }
}
