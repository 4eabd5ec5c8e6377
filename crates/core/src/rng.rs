//! RNG module - seedable generator and the upcoming-pieces queue
//!
//! Sessions draw all randomness from one generator they own. Any
//! [`rand::RngCore`] works; [`SimpleRng`] is the default, a small LCG that
//! makes seeded games reproducible across platforms.
//!
//! [`UpcomingPieces`] is the falling-mode preview queue: a FIFO of constant
//! length that gains one uniformly chosen kind for every kind it gives up.

use std::collections::VecDeque;

use rand::{Rng, RngCore};

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Seed from the wall clock (used by the binary for non-reproducible games)
    pub fn from_time() -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
            .unwrap_or(1);
        Self::new(nanos)
    }

    /// Current generator state; feeding it back to [`SimpleRng::new`] resumes the sequence
    pub fn state(&self) -> u32 {
        self.state
    }

    fn step(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl RngCore for SimpleRng {
    fn next_u32(&mut self) -> u32 {
        self.step()
    }

    fn next_u64(&mut self) -> u64 {
        let hi = u64::from(self.step());
        let lo = u64::from(self.step());
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.step().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Pick one kind uniformly from the fixed repertoire
pub fn random_kind<R: RngCore + ?Sized>(rng: &mut R) -> PieceKind {
    PieceKind::ALL[rng.gen_range(0..PieceKind::ALL.len())]
}

/// Fixed-length FIFO preview of the next piece kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingPieces {
    queue: VecDeque<PieceKind>,
}

impl UpcomingPieces {
    /// Fill a queue of `len` uniformly random kinds
    pub fn new<R: RngCore + ?Sized>(len: usize, rng: &mut R) -> Self {
        let queue = (0..len).map(|_| random_kind(rng)).collect();
        Self { queue }
    }

    /// Rebuild a queue from persisted kinds
    pub fn from_kinds(kinds: impl IntoIterator<Item = PieceKind>) -> Self {
        Self {
            queue: kinds.into_iter().collect(),
        }
    }

    /// Peek at the next piece without removing it
    pub fn peek(&self) -> Option<PieceKind> {
        self.queue.front().copied()
    }

    /// Take the front kind and append a fresh random one
    ///
    /// An empty queue (length 0 configuration) hands out a fresh kind directly.
    pub fn advance<R: RngCore + ?Sized>(&mut self, rng: &mut R) -> PieceKind {
        let fresh = random_kind(rng);
        match self.queue.pop_front() {
            Some(front) => {
                self.queue.push_back(fresh);
                front
            }
            None => fresh,
        }
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Kinds in the order they will be spawned
    pub fn iter(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.queue.iter().copied()
    }
}
