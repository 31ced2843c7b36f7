//! # Outbreak: sphere-defense arcade game
//!
//! A rotating "cornfield" sphere is overgrown by bacteria patches rendered
//! as partial spheres. Click a patch before it passes the loss threshold to
//! score points and force it to regrow elsewhere; let too many through and
//! the field is lost.
//!
//! ## Architecture Overview
//!
//! The codebase is organized into four subsystems:
//!
//! ### 1. Game Core ([`game`])
//!
//! The only part with real logic:
//! - [`game::BacteriaRegistry`] - fixed-capacity arena of per-bacterium
//!   state (growth, identity color, orientation)
//! - [`game::GameSession`] - the state machine: timed growth, loss cascade,
//!   hit scoring, terminal transitions
//! - [`game::GameConfig`] - tunables with RON file override
//!
//! **Key Design**: all mutable game state lives in one session struct owned
//! by the app; input handlers and the tick get it by reference.
//!
//! ### 2. Geometry ([`geometry`])
//!
//! [`geometry::generate_sphere`] builds every visible shape: the background
//! field (full sphere) and each bacterium (partial sphere whose latitude
//! sweep *is* its growth level). Meshes are regenerated, never mutated.
//!
//! ### 3. Rendering ([`rendering`])
//!
//! Thin wgpu adapters around the mesh lists:
//! - [`rendering::SphereRenderer`] - flat-shaded display pass
//! - [`rendering::PickingPass`] - offscreen pass with index-derived colors
//!   plus a one-texel readback for click hit-testing
//!
//! **Key Design**: display colors and picking colors are decoupled, so hit
//! detection cannot collide with the background or another bacterium.
//!
//! ### 4. Interface ([`ui`], [`app`])
//!
//! - [`ui::CameraController`] - drag deltas accumulate between frames and
//!   spin the world rotation once per tick
//! - [`ui::Hud`] - egui overlay for score, lives, and game-over messaging
//! - [`app::App`] - winit event loop, wgpu setup, per-frame orchestration
//!
//! ## Frame Flow
//!
//! ```text
//! Pointer events → camera drag delta / picking click
//! Tick(dt)      → growth advance → loss checks → events
//! Rebuild       → partial-sphere mesh per bacterium
//! Render        → field + bacteria, then HUD overlay
//! ```
//!
//! ## Dependencies
//!
//! - **Graphics**: `wgpu` (GPU abstraction), `winit` (windowing)
//! - **Math**: `glam` (SIMD math types), `bytemuck` (safe transmutation)
//! - **UI**: `egui` (immediate mode HUD overlay)
//! - **State**: `rand` (identity colors and orientations)
//! - **Config**: `serde` + `ron` (optional tunables file)

pub mod app;
pub mod game;
pub mod geometry;
pub mod rendering;
pub mod ui;
