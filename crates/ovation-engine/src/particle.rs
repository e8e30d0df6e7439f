//! Particle state and the live pool

use ovation_core::{Hsl, Vec2};

const TWINKLE_BASE: f32 = 0.75;
const TWINKLE_DEPTH: f32 = 0.25;
const TWINKLE_RATE: f32 = 18.0;
const ALPHA_SCALE: f32 = 0.95;

/// One transient glow particle. Plain value state; no identity beyond
/// pool membership.
#[derive(Clone, Debug)]
pub struct Particle {
    pub position: Vec2,
    /// Pixels per second
    pub velocity: Vec2,
    /// Seconds since spawn
    pub age: f32,
    /// Fixed at spawn; the particle dies when `age` reaches it
    pub ttl: f32,
    /// Base draw size, fixed at spawn
    pub radius: f32,
    pub color: Hsl,
    /// Random phase offset for the brightness shimmer
    pub twinkle: f32,
}

impl Particle {
    /// Remaining life as a fraction: 1 at spawn, 0 at expiry
    pub fn life_fraction(&self) -> f32 {
        if self.ttl <= 0.0 {
            return 0.0;
        }
        (1.0 - self.age / self.ttl).clamp(0.0, 1.0)
    }

    pub fn expired(&self) -> bool {
        self.age >= self.ttl
    }

    /// Brightness shimmer driven by age and the twinkle phase
    pub fn twinkle_brightness(&self) -> f32 {
        TWINKLE_BASE + TWINKLE_DEPTH * (self.age * TWINKLE_RATE + self.twinkle).sin()
    }

    /// Draw alpha: remaining-life fraction, scaled and shimmered, in [0, 1]
    pub fn draw_alpha(&self) -> f32 {
        (self.life_fraction() * ALPHA_SCALE * self.twinkle_brightness()).clamp(0.0, 1.0)
    }
}

/// The set of currently live particles.
///
/// Growable, with O(1) swap-remove expiry. Expired particles leave the pool
/// for good; slots are never recycled across bursts.
#[derive(Default)]
pub struct ParticlePool {
    particles: Vec<Particle>,
}

impl ParticlePool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn push(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    pub fn get_mut(&mut self, index: usize) -> &mut Particle {
        &mut self.particles[index]
    }

    /// Remove by swapping in the last particle; order is not significant
    pub fn swap_remove(&mut self, index: usize) -> Particle {
        self.particles.swap_remove(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }
}
