//! Burst generation: scheduled explosion events and the two-group spawner

use crate::particle::{Particle, ParticlePool};
use crate::profile::{EngineProfile, GroupSpec};
use crate::rand::CelebrationRng;
use ovation_core::{Hsl, Vec2};

/// A future explosion queued by `fire()`
#[derive(Debug, Clone, Copy)]
pub struct ScheduledBurst {
    /// Trigger timestamp in seconds
    pub at: f64,
    pub origin: Vec2,
    pub scale: f32,
}

/// Populate the pool with one explosion at `origin`.
///
/// Each burst draws its own base hue from the profile's band, so a volley
/// shows several distinct tints. Appends the core group then the sparkle
/// group; deterministic given the RNG.
pub fn spawn_burst(
    pool: &mut ParticlePool,
    rng: &mut CelebrationRng,
    origin: Vec2,
    scale: f32,
    profile: &EngineProfile,
) {
    let base_hue = rng.range(profile.hue_min, profile.hue_max);
    spawn_group(pool, rng, origin, scale, base_hue, &profile.core);
    spawn_group(pool, rng, origin, scale, base_hue, &profile.sparkle);
}

fn spawn_group(
    pool: &mut ParticlePool,
    rng: &mut CelebrationRng,
    origin: Vec2,
    scale: f32,
    base_hue: f32,
    spec: &GroupSpec,
) {
    let count = (spec.count_per_scale * scale).floor() as usize;
    for _ in 0..count {
        let speed = rng.range(spec.speed_min, spec.speed_max) * scale;
        let hue = Hsl::wrap_hue(base_hue + rng.range(-spec.hue_jitter, spec.hue_jitter));
        pool.push(Particle {
            position: origin,
            velocity: Vec2::from_angle(rng.angle(), speed),
            age: 0.0,
            ttl: rng.range(spec.ttl_min, spec.ttl_max),
            radius: rng.range(spec.radius_min, spec.radius_max),
            color: Hsl::new(
                hue,
                rng.range(spec.saturation_min, spec.saturation_max),
                rng.range(spec.lightness_min, spec.lightness_max),
            ),
            twinkle: rng.angle(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn burst_into_pool(scale: f32, seed: u32) -> ParticlePool {
        let mut pool = ParticlePool::new();
        let mut rng = CelebrationRng::new(seed);
        spawn_burst(
            &mut pool,
            &mut rng,
            Vec2::new(100.0, 80.0),
            scale,
            &EngineProfile::default(),
        );
        pool
    }

    #[test]
    fn group_counts_scale_one() {
        // 64 core + 22 sparkle
        assert_eq!(burst_into_pool(1.0, 42).len(), 86);
    }

    #[test]
    fn group_counts_floor() {
        // floor(64 * 0.5) + floor(22 * 0.5) = 32 + 11
        assert_eq!(burst_into_pool(0.5, 42).len(), 43);
        // floor(64 * 1.3) + floor(22 * 1.3) = 83 + 28
        assert_eq!(burst_into_pool(1.3, 42).len(), 111);
    }

    #[test]
    fn particles_start_at_the_origin_with_zero_age() {
        let pool = burst_into_pool(1.0, 7);
        for p in pool.iter() {
            assert_eq!(p.position, Vec2::new(100.0, 80.0));
            assert_eq!(p.age, 0.0);
            assert!(!p.expired());
        }
    }

    #[test]
    fn spawn_parameters_stay_in_profile_ranges() {
        let profile = EngineProfile::default();
        for seed in [3, 99, 4242] {
            let pool = burst_into_pool(1.0, seed);
            for p in pool.iter() {
                let speed = p.velocity.length();
                assert!(speed >= profile.sparkle.speed_min - 0.01);
                assert!(speed <= profile.core.speed_max + 0.01);
                assert!(p.ttl >= profile.sparkle.ttl_min && p.ttl <= profile.core.ttl_max);
                assert!(p.radius >= profile.sparkle.radius_min);
                assert!(p.radius <= profile.core.radius_max);
                assert!(p.color.s >= profile.core.saturation_min && p.color.s <= 1.0);
                assert!(p.color.l >= profile.core.lightness_min);
                assert!(p.color.l <= profile.sparkle.lightness_max);
            }
        }
    }

    #[test]
    fn hues_stay_near_the_green_band() {
        let profile = EngineProfile::default();
        let widest = profile.core.hue_jitter.max(profile.sparkle.hue_jitter);
        for seed in [11, 500] {
            for p in burst_into_pool(1.0, seed).iter() {
                assert!(p.color.h >= profile.hue_min - widest - 0.01);
                assert!(p.color.h <= profile.hue_max + widest + 0.01);
            }
        }
    }

    #[test]
    fn burst_speeds_scale_with_burst_scale() {
        let profile = EngineProfile::default();
        let scale = 2.0;
        for p in burst_into_pool(scale, 9).iter() {
            let speed = p.velocity.length();
            assert!(speed <= profile.core.speed_max * scale + 0.01);
            assert!(speed >= profile.sparkle.speed_min * scale - 0.01);
        }
    }
}
