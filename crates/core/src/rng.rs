//! RNG module - seeded randomness and the session's active tile types
//!
//! Every random decision in the engine (active type draw, spawn types,
//! special kinds, shuffle permutations, hint picks) goes through one
//! [`SimpleRng`], so a seed fully determines a session.
//!
//! [`ActiveTypeSet`] draws the session's tile types from a larger master
//! palette without replacement. It is fixed for the engine's lifetime.

use crate::types::{EngineError, SpecialKind, MIN_ACTIVE_TYPES};

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
    /// Scales the high 16 bits; the low bits of a power-of-two LCG have a
    /// short period.
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max <= 1 {
            return 0;
        }
        let high = (self.next_u32() >> 16) as u64;
        ((high * max as u64) >> 16) as u32
    }

    /// Generate random value in range [min, max] (inclusive)
    pub fn next_between(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            return min;
        }
        min + self.next_range(max - min + 1)
    }

    /// Fair coin flip
    pub fn next_bool(&mut self) -> bool {
        self.next_range(2) == 0
    }

    /// Uniformly pick one of the two line-clear specials
    pub fn next_special(&mut self) -> SpecialKind {
        if self.next_bool() {
            SpecialKind::HorizontalClear
        } else {
            SpecialKind::VerticalClear
        }
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    /// Get the current RNG state (for restarting with the same sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// The tile types in play for one session
///
/// Index `i` of the set is tile type `i`; the entry is the archetype name
/// from the master palette (or `None` when that palette slot was never
/// assigned, which surfaces as [`EngineError::MissingArchetype`] on spawn).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveTypeSet {
    archetypes: Vec<Option<String>>,
}

impl ActiveTypeSet {
    /// Draw `count` distinct palette entries in random order
    pub fn draw(
        palette: &[Option<String>],
        count: u8,
        rng: &mut SimpleRng,
    ) -> Result<Self, EngineError> {
        if count < MIN_ACTIVE_TYPES {
            return Err(EngineError::TooFewTypes {
                count,
                min: MIN_ACTIVE_TYPES,
            });
        }
        if palette.len() < count as usize {
            return Err(EngineError::PaletteTooSmall {
                palette: palette.len(),
                active: count,
            });
        }

        let mut remaining = palette.to_vec();
        let mut archetypes = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let pick = rng.next_range(remaining.len() as u32) as usize;
            archetypes.push(remaining.remove(pick));
        }

        Ok(Self { archetypes })
    }

    /// Build a set directly from archetype names, in type order
    pub fn from_archetypes(archetypes: Vec<Option<String>>) -> Self {
        Self { archetypes }
    }

    /// Number of active tile types
    pub fn len(&self) -> u8 {
        self.archetypes.len() as u8
    }

    pub fn is_empty(&self) -> bool {
        self.archetypes.is_empty()
    }

    /// Archetype backing a tile type
    pub fn archetype(&self, type_index: u8) -> Result<&str, EngineError> {
        self.archetypes
            .get(type_index as usize)
            .and_then(|a| a.as_deref())
            .ok_or(EngineError::MissingArchetype { type_index })
    }

    pub fn archetypes(&self) -> &[Option<String>] {
        &self.archetypes
    }
}
