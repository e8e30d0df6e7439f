//! The celebration engine: burst schedule, particle pool, and the
//! idle → running → idle frame state machine

use crate::burst::{spawn_burst, ScheduledBurst};
use crate::clock::FrameClock;
use crate::particle::ParticlePool;
use crate::profile::EngineProfile;
use crate::rand::CelebrationRng;
use ovation_core::{Hsl, Vec2, Viewport};
use ovation_render::{Blend, CanvasSurface};

/// Halo radius multiplier at full life
const HALO_BASE: f32 = 3.2;
/// Additional halo growth as the particle burns down
const HALO_GROWTH: f32 = 1.2;
/// Halo draws at this fraction of the particle's alpha
const HALO_ALPHA: f32 = 0.22;
const CORE_SCALE: f32 = 1.05;
const CORE_LIGHT_BOOST: f32 = 0.15;
const CORE_LIGHT_CAP: f32 = 0.92;

/// One frame's draw data for a live particle: a soft halo disk plus a
/// bright core disk, both composited additively
#[derive(Debug, Clone, Copy)]
pub struct GlowSprite {
    pub center: Vec2,
    pub halo_radius: f32,
    pub core_radius: f32,
    pub color: Hsl,
    pub alpha: f32,
}

/// Advance physics for every live particle and collect the additive draw
/// list. Expired particles leave the pool in the same frame their age
/// reaches their ttl.
pub fn step_particles(pool: &mut ParticlePool, dt: f32, profile: &EngineProfile) -> Vec<GlowSprite> {
    // Exponential decay normalized to a 60fps reference rate, so damping is
    // frame-rate independent
    let drag = profile.drag.powf(dt * 60.0);
    let mut sprites = Vec::with_capacity(pool.len());

    let mut i = 0;
    while i < pool.len() {
        let p = pool.get_mut(i);
        p.age += dt;
        if p.expired() {
            pool.swap_remove(i);
            continue;
        }

        p.velocity.x *= drag;
        p.velocity.y = p.velocity.y * drag + profile.gravity * dt;
        p.position += p.velocity * dt;

        let k = p.life_fraction();
        sprites.push(GlowSprite {
            center: p.position,
            halo_radius: p.radius * (HALO_BASE + (1.0 - k) * HALO_GROWTH),
            core_radius: p.radius * CORE_SCALE,
            color: p.color,
            alpha: p.draw_alpha(),
        });
        i += 1;
    }

    sprites
}

/// The celebration engine.
///
/// Owns its drawing surface, particle pool, and burst schedule for its
/// entire lifetime; `fire()` starts a celebration and the frame loop winds
/// itself back to idle once the last particle has burned out.
pub struct CelebrationEngine {
    profile: EngineProfile,
    surface: CanvasSurface,
    pool: ParticlePool,
    schedule: Vec<ScheduledBurst>,
    clock: FrameClock,
    rng: CelebrationRng,
    running: bool,
    end_time: f64,
}

impl CelebrationEngine {
    pub fn new(
        profile: EngineProfile,
        viewport: Viewport,
        device_pixel_ratio: f32,
        seed: u32,
    ) -> Self {
        let clock = FrameClock::new(profile.max_frame_dt);
        Self {
            surface: CanvasSurface::new(viewport, device_pixel_ratio),
            pool: ParticlePool::new(),
            schedule: Vec::new(),
            clock,
            rng: CelebrationRng::new(seed),
            running: false,
            end_time: 0.0,
            profile,
        }
    }

    /// Queue one celebration: a volley of main bursts plus a sweep burst.
    ///
    /// Supersedes any bursts still pending from an earlier call: the
    /// latest celebration owns the schedule, while particles already in
    /// flight keep animating. Safe to call while running.
    pub fn fire(&mut self, now: f64) {
        self.running = true;
        self.clock.reset(now);
        self.end_time = now + self.profile.linger as f64;
        self.schedule.clear();

        let p = &self.profile;
        let vp = self.surface.logical_size();
        for i in 0..p.main_count {
            self.schedule.push(ScheduledBurst {
                at: now + i as f64 * p.main_interval as f64,
                origin: Vec2::new(
                    self.rng.range(p.main_x_min, p.main_x_max) * vp.width,
                    self.rng.range(p.main_y_min, p.main_y_max) * vp.height,
                ),
                scale: self.rng.range(p.main_scale_min, p.main_scale_max),
            });
        }
        self.schedule.push(ScheduledBurst {
            at: now + p.sweep_delay as f64,
            origin: Vec2::new(
                self.rng.range(p.sweep_x_min, p.sweep_x_max) * vp.width,
                p.sweep_y * vp.height,
            ),
            scale: p.sweep_scale,
        });
    }

    /// Advance one frame: fade the trail, spawn due bursts, integrate and
    /// draw particles, then check the stop condition.
    ///
    /// Returns whether the engine is still running; `false` means no
    /// further frame needs to be requested. A no-op while idle.
    pub fn frame(&mut self, now: f64) -> bool {
        if !self.running {
            return false;
        }

        let dt = self.clock.tick(now);
        self.surface.fade(self.profile.fade);

        // Spawn every due burst; scan-and-remove, order among equal
        // timestamps is not significant
        let mut i = 0;
        while i < self.schedule.len() {
            if self.schedule[i].at <= now {
                let burst = self.schedule.swap_remove(i);
                spawn_burst(
                    &mut self.pool,
                    &mut self.rng,
                    burst.origin,
                    burst.scale,
                    &self.profile,
                );
            } else {
                i += 1;
            }
        }

        for sprite in step_particles(&mut self.pool, dt, &self.profile) {
            self.surface.fill_disk(
                sprite.center,
                sprite.halo_radius,
                sprite.color.to_rgb(),
                sprite.alpha * HALO_ALPHA,
                Blend::Additive,
            );
            let core = sprite
                .color
                .with_lightness((sprite.color.l + CORE_LIGHT_BOOST).min(CORE_LIGHT_CAP));
            self.surface.fill_disk(
                sprite.center,
                sprite.core_radius,
                core.to_rgb(),
                sprite.alpha,
                Blend::Additive,
            );
        }

        if now > self.end_time && self.pool.is_empty() && self.schedule.is_empty() {
            self.running = false;
            self.surface.clear();
            return false;
        }
        true
    }

    /// Track a viewport change; burst placement follows the new size
    pub fn resize(&mut self, viewport: Viewport, device_pixel_ratio: f32) {
        self.surface.resize(viewport, device_pixel_ratio);
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn particle_count(&self) -> usize {
        self.pool.len()
    }

    /// Bursts queued but not yet spawned
    pub fn pending_bursts(&self) -> usize {
        self.schedule.len()
    }

    pub fn surface(&self) -> &CanvasSurface {
        &self.surface
    }

    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::Particle;

    fn test_engine() -> CelebrationEngine {
        CelebrationEngine::new(
            EngineProfile::default(),
            Viewport::new(800.0, 600.0),
            1.0,
            42,
        )
    }

    fn long_lived_particle(velocity: Vec2) -> Particle {
        Particle {
            position: Vec2::new(100.0, 100.0),
            velocity,
            age: 0.0,
            ttl: 100.0,
            radius: 2.0,
            color: Hsl::new(120.0, 0.9, 0.5),
            twinkle: 0.0,
        }
    }

    #[test]
    fn fire_schedules_five_bursts() {
        let mut engine = test_engine();
        assert!(!engine.is_running());

        engine.fire(0.0);
        assert!(engine.is_running());
        assert_eq!(engine.pending_bursts(), 5);
        assert_eq!(engine.particle_count(), 0);
        assert!((engine.end_time - 1.1).abs() < 1e-6);
    }

    #[test]
    fn scheduled_bursts_land_in_the_placement_bands() {
        let mut engine = test_engine();
        engine.fire(0.0);
        let vp = engine.surface.logical_size();
        for burst in &engine.schedule {
            assert!(burst.origin.x >= 0.15 * vp.width - 0.01);
            assert!(burst.origin.x <= 0.85 * vp.width + 0.01);
            assert!(burst.origin.y >= 0.14 * vp.height - 0.01);
            assert!(burst.origin.y <= 0.40 * vp.height + 0.01);
            assert!(burst.scale >= 0.9 && burst.scale <= 1.35);
            assert!(burst.at >= 0.0 && burst.at <= 0.36 + 1e-9);
        }
        // The sweep burst: fixed height, fixed scale, 80ms in
        let sweep = engine
            .schedule
            .iter()
            .find(|b| (b.scale - 1.15).abs() < 1e-6)
            .expect("sweep burst scheduled");
        assert!((sweep.at - 0.08).abs() < 1e-9);
        assert!((sweep.origin.y - 0.22 * vp.height).abs() < 0.01);
    }

    #[test]
    fn refire_replaces_pending_schedule() {
        let mut engine = test_engine();
        engine.fire(0.0);
        engine.frame(0.0);
        // The t=0 main burst has spawned; the rest are pending
        assert_eq!(engine.pending_bursts(), 4);
        let in_flight = engine.particle_count();
        assert!(in_flight > 0);

        engine.fire(0.05);
        // Latest celebration wins the schedule: 5 entries, not 9
        assert_eq!(engine.pending_bursts(), 5);
        // Particles from the first call keep animating
        assert_eq!(engine.particle_count(), in_flight);
        assert!(engine.is_running());
    }

    #[test]
    fn expiry_is_exact() {
        let profile = EngineProfile::default();
        let mut pool = ParticlePool::new();
        let mut p = long_lived_particle(Vec2::ZERO);
        p.ttl = 0.05;
        pool.push(p);

        // Two 0.02s frames leave it alive with age < ttl
        for _ in 0..2 {
            step_particles(&mut pool, 0.02, &profile);
            assert_eq!(pool.len(), 1);
            for p in pool.iter() {
                assert!(p.age < p.ttl);
            }
        }
        // The frame where age first reaches ttl removes it
        step_particles(&mut pool, 0.02, &profile);
        assert!(pool.is_empty());
    }

    #[test]
    fn drag_decays_speed_monotonically() {
        let mut profile = EngineProfile::default();
        profile.gravity = 0.0;
        let mut pool = ParticlePool::new();
        pool.push(long_lived_particle(Vec2::new(300.0, -120.0)));

        let mut last_speed = f32::MAX;
        for _ in 0..60 {
            step_particles(&mut pool, 1.0 / 60.0, &profile);
            let speed = pool.iter().next().unwrap().velocity.length();
            assert!(speed < last_speed, "speed must strictly decrease");
            last_speed = speed;
        }
    }

    #[test]
    fn frame_is_a_noop_while_idle() {
        let mut engine = test_engine();
        assert!(!engine.frame(0.5));
        assert_eq!(engine.particle_count(), 0);
        assert!(engine.surface().is_clear());
    }

    #[test]
    fn engine_returns_to_idle_and_clears() {
        let mut engine = test_engine();
        engine.fire(0.0);

        let mut t = 0.0;
        let mut stopped_at = None;
        while t < 4.0 {
            if !engine.frame(t) {
                stopped_at = Some(t);
                break;
            }
            // Particles exist and get painted while bursts are in flight
            if t > 0.1 && t < 0.5 {
                assert!(engine.particle_count() > 0);
                assert!(engine.surface().max_coverage() > 0.0);
            }
            t += 1.0 / 60.0;
        }

        let stopped_at = stopped_at.expect("engine should stop on its own");
        assert!(stopped_at > 1.1);
        assert!(!engine.is_running());
        assert_eq!(engine.particle_count(), 0);
        assert_eq!(engine.pending_bursts(), 0);
        assert!(engine.surface().is_clear());
    }

    #[test]
    fn live_particles_never_outlive_ttl() {
        let mut engine = test_engine();
        engine.fire(0.0);
        let mut t = 0.0;
        while engine.frame(t) {
            for p in engine.pool().iter() {
                assert!(p.age >= 0.0 && p.age < p.ttl);
            }
            t += 1.0 / 60.0;
        }
    }
}
