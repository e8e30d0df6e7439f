//! Ovation Engine - particle celebration simulation
//!
//! One `fire()` turns into a short, layered volley of firework bursts:
//! - Timed burst schedule (4 mains at 120ms spacing plus one early sweep)
//! - Two-group spawner (core + sparkle) over a green hue band
//! - Frame loop with capped deltas, drag, gravity, and twinkle-modulated
//!   additive glow rendering
//! - Self-managed idle → running → idle lifecycle
//! - Reduced-motion guard at the trigger boundary

pub mod burst;
pub mod clock;
pub mod engine;
pub mod particle;
pub mod profile;
pub mod rand;
pub mod trigger;

pub use burst::{spawn_burst, ScheduledBurst};
pub use clock::FrameClock;
pub use engine::{step_particles, CelebrationEngine, GlowSprite};
pub use particle::{Particle, ParticlePool};
pub use profile::{EngineProfile, GroupSpec};
pub use rand::CelebrationRng;
pub use trigger::{CelebrationTrigger, MotionPreference};
