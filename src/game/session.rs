//! The game state machine.
//!
//! `GameSession` owns the bacteria registry and every mutable game counter,
//! and is driven by the app: one `tick` per rendered frame, one
//! `handle_pick` per click. It also builds the per-frame mesh lists, since
//! growth levels and colors live here.

use glam::Vec3;

use crate::game::bacteria::BacteriaRegistry;
use crate::game::config::GameConfig;
use crate::geometry::{generate_sphere, Mesh};

/// Flat color of the background field sphere.
const FIELD_COLOR: Vec3 = Vec3::new(1.0, 1.0, 0.0);

/// Longest stretch of wall-clock time a single tick will simulate. A
/// stalled or minimized window pauses the game instead of fast-forwarding.
const MAX_TICK_SECONDS: f32 = 0.1;

/// Game phase. `Lost` is terminal: growth freezes and no further loss
/// checks or picks run, but rendering continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    Lost,
    /// Declared by the rules; no rule reaches it yet.
    Won,
}

/// Things that happened during a tick or pick, drained once per frame by
/// the app for logging and HUD messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    Hit { index: usize, points: u64 },
    LifeLost { remaining: u32 },
    GameOver,
}

pub struct GameSession {
    config: GameConfig,
    registry: BacteriaRegistry,
    pub score: u64,
    pub lives: u32,
    pub growth_rate: f32,
    pub phase: Phase,
    seconds_since_hit: f32,
    events: Vec<GameEvent>,
}

impl GameSession {
    pub fn new(config: GameConfig) -> Self {
        let registry = BacteriaRegistry::new(config.bacteria_count);
        Self::with_registry(config, registry)
    }

    /// Deterministic construction for tests.
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        let registry = BacteriaRegistry::with_seed(config.bacteria_count, seed);
        Self::with_registry(config, registry)
    }

    fn with_registry(config: GameConfig, registry: BacteriaRegistry) -> Self {
        Self {
            lives: config.initial_lives,
            growth_rate: config.growth_rate,
            config,
            registry,
            score: 0,
            phase: Phase::Playing,
            seconds_since_hit: 0.0,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn registry(&self) -> &BacteriaRegistry {
        &self.registry
    }

    /// Advance the game by `dt` seconds of wall-clock time.
    pub fn tick(&mut self, dt: f32) {
        let dt = dt.min(MAX_TICK_SECONDS);

        // Per-frame constants scaled to elapsed time. After a loss the rate
        // is zero, so growth freezes on its own.
        let delta = self.growth_rate * self.config.reference_frame_rate * dt;
        for i in 0..self.registry.len() {
            self.registry.advance_growth(i, delta);
        }
        self.seconds_since_hit += dt;

        if self.phase == Phase::Playing {
            self.check_losses();
        }
    }

    /// Loss cascade, in registry order. The final breach freezes the game
    /// and stops checking; every earlier breach costs a life, halves the
    /// growth rate, and regrows the offender.
    fn check_losses(&mut self) {
        for i in 0..self.registry.len() {
            if self.registry.get(i).growth < self.config.loss_threshold {
                continue;
            }
            if self.lives <= 1 {
                self.growth_rate = 0.0;
                self.phase = Phase::Lost;
                self.events.push(GameEvent::GameOver);
                break;
            }
            self.lives -= 1;
            self.registry.respawn(i);
            self.growth_rate *= 0.5;
            self.events.push(GameEvent::LifeLost {
                remaining: self.lives,
            });
        }
    }

    /// Resolve a picking readback. A pixel matching no bacterium is a
    /// silent no-op.
    pub fn handle_pick(&mut self, pixel: [u8; 4]) {
        if self.phase != Phase::Playing {
            return;
        }
        let Some(index) = self.registry.find_by_color([pixel[0], pixel[1], pixel[2]]) else {
            return;
        };

        self.registry.respawn(index);
        self.growth_rate += self.config.hit_growth_rate_bonus;

        let points = u64::from(self.config.score_constant).div_ceil(self.frames_since_hit());
        self.score += points;
        self.seconds_since_hit = 0.0;
        self.events.push(GameEvent::Hit { index, points });
    }

    /// Frame-count equivalent of the hit timer, minimum 1 so quick repeat
    /// hits never divide by zero.
    fn frames_since_hit(&self) -> u64 {
        ((self.seconds_since_hit * self.config.reference_frame_rate).round() as u64).max(1)
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Meshes for the display pass: the field sphere, then every bacterium
    /// as a partial shell at its current growth, in its own orientation.
    pub fn display_meshes(&self) -> Vec<Mesh> {
        let c = &self.config;
        let mut meshes = Vec::with_capacity(self.registry.len() + 1);
        meshes.push(generate_sphere(c.field_radius, 1.0, c.sphere_detail, FIELD_COLOR));
        for b in self.registry.iter() {
            meshes.push(
                generate_sphere(c.bacteria_radius, b.growth, c.sphere_detail, b.identity_color)
                    .rotated(b.orientation),
            );
        }
        meshes
    }

    /// Meshes for the picking pass: identical geometry, but the field draws
    /// in the background color (matches nothing) and each bacterium in its
    /// index-derived pick color.
    pub fn pick_meshes(&self) -> Vec<Mesh> {
        let c = &self.config;
        let mut meshes = Vec::with_capacity(self.registry.len() + 1);
        meshes.push(generate_sphere(c.field_radius, 1.0, c.sphere_detail, Vec3::ZERO));
        for (i, b) in self.registry.iter().enumerate() {
            meshes.push(
                generate_sphere(
                    c.bacteria_radius,
                    b.growth,
                    c.sphere_detail,
                    BacteriaRegistry::pick_color_f32(i),
                )
                .rotated(b.orientation),
            );
        }
        meshes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f32 = 1.0 / 60.0;

    fn session(config: GameConfig) -> GameSession {
        GameSession::with_seed(config, 1234)
    }

    fn pick_pixel(index: usize) -> [u8; 4] {
        let [r, g, b] = BacteriaRegistry::pick_color(index);
        [r, g, b, 255]
    }

    #[test]
    fn hit_after_100_frames_scores_six() {
        let mut s = session(GameConfig::default());
        for _ in 0..100 {
            s.tick(FRAME);
        }
        s.handle_pick(pick_pixel(0));
        assert_eq!(s.score, 6); // ceil(600 / 100)
        assert_eq!(
            s.drain_events(),
            vec![GameEvent::Hit { index: 0, points: 6 }]
        );
    }

    #[test]
    fn immediate_hit_clamps_denominator_to_one_frame() {
        let mut s = session(GameConfig::default());
        s.handle_pick(pick_pixel(0));
        assert_eq!(s.score, 600);
    }

    #[test]
    fn hit_resets_bacterium_and_speeds_up_growth() {
        let config = GameConfig::default();
        let mut s = session(config.clone());
        s.registry.advance_growth(3, 0.2);
        s.handle_pick(pick_pixel(3));
        assert_eq!(s.registry.get(3).growth, 0.0);
        assert!((s.growth_rate - (config.growth_rate + config.hit_growth_rate_bonus)).abs() < 1e-9);
        // Timer restarts: a second instant hit scores the clamped maximum.
        let first = s.score;
        s.handle_pick(pick_pixel(0));
        assert_eq!(s.score, first + 600);
    }

    #[test]
    fn unmatched_pick_is_a_silent_no_op() {
        let mut s = session(GameConfig::default());
        s.handle_pick([0, 0, 0, 255]);
        s.handle_pick([17, 3, 99, 255]);
        assert_eq!(s.score, 0);
        assert!(s.drain_events().is_empty());
        assert_eq!(s.phase, Phase::Playing);
    }

    #[test]
    fn breach_with_spare_lives_costs_one_and_halves_growth() {
        let config = GameConfig {
            initial_lives: 2,
            bacteria_count: 2,
            ..GameConfig::default()
        };
        let rate = config.growth_rate;
        let mut s = session(config);
        s.registry.advance_growth(0, 0.25);
        s.tick(FRAME);

        assert_eq!(s.lives, 1);
        assert_eq!(s.phase, Phase::Playing);
        assert!(s.growth_rate < rate);
        assert_eq!(s.registry.get(0).growth, 0.0); // respawn runs after the growth advance
        assert_eq!(s.drain_events(), vec![GameEvent::LifeLost { remaining: 1 }]);
    }

    #[test]
    fn final_breach_freezes_the_game() {
        let config = GameConfig {
            initial_lives: 1,
            bacteria_count: 2,
            ..GameConfig::default()
        };
        let mut s = session(config);
        // Both breached on the same tick: the first ends the game and the
        // second is never examined.
        s.registry.advance_growth(0, 0.3);
        s.registry.advance_growth(1, 0.3);
        s.tick(FRAME);

        assert_eq!(s.phase, Phase::Lost);
        assert_eq!(s.growth_rate, 0.0);
        assert_eq!(s.drain_events(), vec![GameEvent::GameOver]);
        assert!(s.registry.get(1).growth >= 0.3); // untouched by the aborted scan

        // Terminal: growth is frozen and picks are ignored.
        let frozen = s.registry.get(1).growth;
        s.tick(FRAME);
        assert_eq!(s.registry.get(1).growth, frozen);
        s.handle_pick(pick_pixel(1));
        assert_eq!(s.score, 0);
        assert!(s.drain_events().is_empty());
    }

    #[test]
    fn lone_bacterium_breaches_around_frame_2500() {
        let config = GameConfig {
            initial_lives: 2,
            bacteria_count: 1,
            ..GameConfig::default()
        };
        let mut s = session(config);
        for _ in 0..2490 {
            s.tick(FRAME);
        }
        assert!(s.drain_events().is_empty());
        assert_eq!(s.lives, 2);

        // 0.0001 per frame reaches the 0.25 threshold at frame 2500, give
        // or take float accumulation.
        for _ in 0..20 {
            s.tick(FRAME);
        }
        assert_eq!(s.lives, 1);
        assert_eq!(s.drain_events(), vec![GameEvent::LifeLost { remaining: 1 }]);
    }

    #[test]
    fn long_stalls_are_clamped_not_fast_forwarded() {
        let mut s = session(GameConfig::default());
        s.tick(30.0);
        // 30 simulated seconds would mean 0.18 growth; the clamp allows at
        // most 0.1 s worth.
        assert!(s.registry.get(0).growth < 0.001);
    }

    #[test]
    fn mesh_lists_cover_field_plus_every_bacterium() {
        let s = session(GameConfig::default());
        assert_eq!(s.display_meshes().len(), 11);
        assert_eq!(s.pick_meshes().len(), 11);
    }
}
