use rand::{distributions::Standard, Rng, RngCore};

use super::{exhausted, Cursor};

/// A fixed number of uniform draws from `[0, 1)`.
///
/// The generator is drawn exactly once per value, so a borrowed generator
/// (`&mut rng`) carries on right after the last value this cursor produced.
#[derive(Debug)]
pub struct Uniform01<R> {
    rng: R,
    remaining: usize,
    value: f64,
}

pub fn uniform01<R: RngCore>(rng: R, count: usize) -> Uniform01<R> {
    Uniform01::new(rng, count)
}

impl<R: RngCore> Uniform01<R> {
    pub fn new(mut rng: R, count: usize) -> Self {
        let value = if count > 0 {
            rng.sample::<f64, _>(Standard)
        } else {
            0.0
        };
        Self {
            rng,
            remaining: count,
            value,
        }
    }

    /// Values left, counting the current one.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: RngCore> Cursor for Uniform01<R> {
    type Item = f64;

    fn current(&self) -> &f64 {
        if self.remaining == 0 {
            exhausted::<Self>()
        }
        &self.value
    }

    fn advance(&mut self) {
        match self.remaining {
            0 => {}
            1 => {
                tracing::debug!("Random stream exhausted");
                self.remaining = 0;
            }
            _ => {
                self.remaining -= 1;
                self.value = self.rng.sample(Standard);
            }
        }
    }

    fn is_at_end(&self) -> bool {
        self.remaining == 0
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<R: RngCore, O: Cursor> PartialEq<O> for Uniform01<R> {
    fn eq(&self, other: &O) -> bool {
        self.ended_with(other)
    }
}
