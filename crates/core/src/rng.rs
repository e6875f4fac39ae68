//! RNG module - piece selection
//!
//! The game state draws every new piece through the [`Randomizer`] trait so a
//! host or a test can swap the selection policy:
//!
//! - [`UniformRandomizer`]: each kind with equal probability (default)
//! - [`BagRandomizer`]: the "7-bag", one of each kind per shuffled bag
//! - [`SequenceRandomizer`]: a fixed, repeating script
//!
//! All of them are deterministic for a given seed, built on [`SimpleRng`].

use crate::types::TetrominoKind;

/// Source of the next piece kind
pub trait Randomizer {
    fn next_kind(&mut self) -> TetrominoKind;
}

impl<R: Randomizer + ?Sized> Randomizer for Box<R> {
    fn next_kind(&mut self) -> TetrominoKind {
        (**self).next_kind()
    }
}

impl<R: Randomizer + ?Sized> Randomizer for &mut R {
    fn next_kind(&mut self) -> TetrominoKind {
        (**self).next_kind()
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
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

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Scales by multiplication so the result depends on the high bits; the
    /// low bits of an LCG have short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((u64::from(self.next_u32()) * u64::from(max)) >> 32) as u32
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// Every kind equally likely on every draw
#[derive(Debug, Clone)]
pub struct UniformRandomizer {
    rng: SimpleRng,
}

impl UniformRandomizer {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }
}

impl Default for UniformRandomizer {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Randomizer for UniformRandomizer {
    fn next_kind(&mut self) -> TetrominoKind {
        let all = TetrominoKind::ALL;
        all[self.rng.next_range(all.len() as u32) as usize]
    }
}

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct BagRandomizer {
    /// Current bag of pieces
    bag: [TetrominoKind; 7],
    /// Index into current bag
    bag_index: usize,
    /// RNG for shuffling
    rng: SimpleRng,
}

impl BagRandomizer {
    pub fn new(seed: u32) -> Self {
        let mut bag = Self {
            bag: TetrominoKind::ALL,
            bag_index: 0,
            rng: SimpleRng::new(seed),
        };
        bag.refill_bag();
        bag
    }

    /// Generate a new shuffled bag
    fn refill_bag(&mut self) {
        self.bag = TetrominoKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.bag_index = 0;
    }

    /// Pieces left in the current bag
    pub fn remaining(&self) -> &[TetrominoKind] {
        &self.bag[self.bag_index..]
    }
}

impl Default for BagRandomizer {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Randomizer for BagRandomizer {
    fn next_kind(&mut self) -> TetrominoKind {
        if self.bag_index >= self.bag.len() {
            self.refill_bag();
        }
        let kind = self.bag[self.bag_index];
        self.bag_index += 1;
        kind
    }
}

/// Replays a fixed list of kinds, starting over at the end
#[derive(Debug, Clone)]
pub struct SequenceRandomizer {
    kinds: Vec<TetrominoKind>,
    next: usize,
}

impl SequenceRandomizer {
    /// An empty list falls back to the full catalog order
    pub fn new(kinds: impl IntoIterator<Item = TetrominoKind>) -> Self {
        let mut kinds: Vec<_> = kinds.into_iter().collect();
        if kinds.is_empty() {
            kinds = TetrominoKind::ALL.to_vec();
        }
        Self { kinds, next: 0 }
    }

    /// Always the same kind
    pub fn repeat(kind: TetrominoKind) -> Self {
        Self::new([kind])
    }
}

impl Randomizer for SequenceRandomizer {
    fn next_kind(&mut self) -> TetrominoKind {
        let kind = self.kinds[self.next];
        self.next = (self.next + 1) % self.kinds.len();
        kind
    }
}
