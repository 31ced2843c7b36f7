//! Bacteria registry: the arena of per-bacterium mutable state.
//!
//! Every bacterium lives at a stable index for the whole game. Nothing is
//! ever added or removed after spawn; a clicked or breached bacterium is
//! reset in place with a fresh color and orientation, which is how
//! "regrowth elsewhere" appears on screen.

use glam::{Quat, Vec3};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Pixel value the picking pass clears to; never matches any bacterium.
pub const PICK_BACKGROUND: [u8; 3] = [0, 0, 0];

/// A single bacterium.
#[derive(Debug, Clone)]
pub struct Bacterium {
    /// Progress toward full size, clamped to [0, 1]. Monotonically
    /// non-decreasing until reset by a respawn.
    pub growth: f32,
    /// Flat display color in [0,1]^3, redrawn on every spawn/respawn.
    pub identity_color: Vec3,
    /// Random rotation fixed at spawn; cosmetic only.
    pub orientation: Quat,
}

/// Fixed-capacity store of bacteria, indexed by spawn order.
pub struct BacteriaRegistry {
    bacteria: Vec<Bacterium>,
    rng: SmallRng,
}

impl BacteriaRegistry {
    /// Spawn `count` bacteria with OS-seeded randomness.
    pub fn new(count: usize) -> Self {
        Self::spawn(count, SmallRng::from_os_rng())
    }

    /// Spawn `count` bacteria from a fixed seed (deterministic, for tests).
    pub fn with_seed(count: usize, seed: u64) -> Self {
        Self::spawn(count, SmallRng::seed_from_u64(seed))
    }

    fn spawn(count: usize, mut rng: SmallRng) -> Self {
        let bacteria = (0..count).map(|_| Self::fresh(&mut rng)).collect();
        Self { bacteria, rng }
    }

    fn fresh(rng: &mut SmallRng) -> Bacterium {
        use std::f32::consts::TAU;
        Bacterium {
            growth: 0.0,
            identity_color: Vec3::new(rng.random(), rng.random(), rng.random()),
            orientation: Quat::from_euler(
                glam::EulerRot::XYZ,
                rng.random_range(0.0..TAU),
                rng.random_range(0.0..TAU),
                rng.random_range(0.0..TAU),
            ),
        }
    }

    pub fn len(&self) -> usize {
        self.bacteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bacteria.is_empty()
    }

    pub fn get(&self, index: usize) -> &Bacterium {
        &self.bacteria[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bacterium> {
        self.bacteria.iter()
    }

    /// Reset the bacterium at `index` to zero growth with a fresh identity
    /// color and orientation.
    pub fn respawn(&mut self, index: usize) {
        self.bacteria[index] = Self::fresh(&mut self.rng);
    }

    /// `growth = min(1, growth + delta)`; stays clamped at 1 until respawn.
    pub fn advance_growth(&mut self, index: usize, delta: f32) {
        let b = &mut self.bacteria[index];
        b.growth = (b.growth + delta).min(1.0);
    }

    /// The color the bacterium at `index` is drawn with in the picking pass.
    ///
    /// Derived from the index rather than the random identity color, so two
    /// bacteria can never collide with each other or with the background.
    pub fn pick_color(index: usize) -> [u8; 3] {
        let id = index as u32 + 1;
        [(id & 0xff) as u8, ((id >> 8) & 0xff) as u8, 0]
    }

    /// `pick_color` as the [0,1] float triple fed to the mesh generator.
    /// n/255 survives the round trip through an 8-bit render target exactly.
    pub fn pick_color_f32(index: usize) -> Vec3 {
        let [r, g, b] = Self::pick_color(index);
        Vec3::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Match a picked 8-bit color against every bacterium's pick color.
    ///
    /// Linear scan, exact equality only; returns the first match or `None`.
    /// A background or gap pixel matches nothing.
    pub fn find_by_color(&self, color: [u8; 3]) -> Option<usize> {
        (0..self.bacteria.len()).find(|&i| Self::pick_color(i) == color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_initializes_dormant_bacteria() {
        let registry = BacteriaRegistry::with_seed(10, 7);
        assert_eq!(registry.len(), 10);
        for b in registry.iter() {
            assert_eq!(b.growth, 0.0);
            for c in b.identity_color.to_array() {
                assert!((0.0..=1.0).contains(&c));
            }
        }
    }

    #[test]
    fn growth_is_monotone_and_clamped() {
        let mut registry = BacteriaRegistry::with_seed(1, 1);
        let mut last = 0.0;
        for _ in 0..20_000 {
            registry.advance_growth(0, 0.0001);
            let g = registry.get(0).growth;
            assert!(g >= last);
            assert!(g <= 1.0);
            last = g;
        }
        assert_eq!(registry.get(0).growth, 1.0);
        // Still clamped after further deltas.
        registry.advance_growth(0, 0.5);
        assert_eq!(registry.get(0).growth, 1.0);
    }

    #[test]
    fn respawn_resets_growth_and_redraws_color() {
        let mut registry = BacteriaRegistry::with_seed(1, 42);
        registry.advance_growth(0, 0.8);
        let before = registry.get(0).identity_color;
        registry.respawn(0);
        let after = registry.get(0);
        assert_eq!(after.growth, 0.0);
        for c in after.identity_color.to_array() {
            assert!((0.0..=1.0).contains(&c));
        }
        // No equality guarantee in general, but a 96-bit draw repeating
        // would mean the RNG is broken.
        assert_ne!(before, after.identity_color);
    }

    #[test]
    fn pick_colors_are_unique_and_never_background() {
        let mut seen = std::collections::HashSet::new();
        for i in 0..512 {
            let c = BacteriaRegistry::pick_color(i);
            assert_ne!(c, PICK_BACKGROUND);
            assert!(seen.insert(c));
        }
    }

    #[test]
    fn find_by_color_is_exact_match_only() {
        let registry = BacteriaRegistry::with_seed(3, 9);
        assert_eq!(registry.find_by_color(BacteriaRegistry::pick_color(2)), Some(2));
        assert_eq!(registry.find_by_color(PICK_BACKGROUND), None);
        // Off by one channel step: close is not a match.
        assert_eq!(registry.find_by_color([2, 0, 0]), Some(1));
        assert_eq!(registry.find_by_color([2, 1, 0]), None);
        // Colors outside the spawned range match nothing.
        assert_eq!(registry.find_by_color(BacteriaRegistry::pick_color(3)), None);
    }
}
