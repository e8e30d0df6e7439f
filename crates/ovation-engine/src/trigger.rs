//! The public celebration trigger: lazy engine construction behind an
//! injectable handle, with the reduced-motion guard

use crate::engine::CelebrationEngine;
use crate::profile::EngineProfile;
use ovation_core::Viewport;
use ovation_render::CanvasSurface;

/// The user's animated-effects preference, queried from the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotionPreference {
    #[default]
    NoPreference,
    /// Suppress decorative animation entirely
    Reduce,
}

/// Owns at most one lazily-constructed [`CelebrationEngine`].
///
/// Inject a handle wherever a celebration should be triggered; the engine
/// and its surface come into existence on the first `fire()`. When the
/// motion preference is [`MotionPreference::Reduce`], `fire()` is a
/// complete no-op: nothing is ever constructed and nothing animates.
pub struct CelebrationTrigger {
    preference: MotionPreference,
    profile: EngineProfile,
    viewport: Viewport,
    device_pixel_ratio: f32,
    seed: u32,
    engine: Option<CelebrationEngine>,
}

impl CelebrationTrigger {
    pub fn new(
        preference: MotionPreference,
        profile: EngineProfile,
        viewport: Viewport,
        device_pixel_ratio: f32,
        seed: u32,
    ) -> Self {
        Self {
            preference,
            profile,
            viewport,
            device_pixel_ratio,
            seed,
            engine: None,
        }
    }

    /// Celebrate now. Constructs the engine on first use, then starts (or
    /// restarts) a celebration at `now`.
    pub fn fire(&mut self, now: f64) {
        if self.preference == MotionPreference::Reduce {
            return;
        }
        if self.engine.is_none() {
            self.engine = Some(CelebrationEngine::new(
                self.profile.clone(),
                self.viewport,
                self.device_pixel_ratio,
                self.seed,
            ));
        }
        if let Some(engine) = self.engine.as_mut() {
            engine.fire(now);
        }
    }

    /// Advance one frame. Returns whether another frame should be requested.
    pub fn frame(&mut self, now: f64) -> bool {
        match self.engine.as_mut() {
            Some(engine) => engine.frame(now),
            None => false,
        }
    }

    /// Track a viewport change, now and for any engine built later
    pub fn resize(&mut self, viewport: Viewport, device_pixel_ratio: f32) {
        self.viewport = viewport;
        self.device_pixel_ratio = device_pixel_ratio;
        if let Some(engine) = self.engine.as_mut() {
            engine.resize(viewport, device_pixel_ratio);
        }
    }

    pub fn is_running(&self) -> bool {
        self.engine.as_ref().is_some_and(|e| e.is_running())
    }

    pub fn particle_count(&self) -> usize {
        self.engine.as_ref().map_or(0, |e| e.particle_count())
    }

    pub fn pending_bursts(&self) -> usize {
        self.engine.as_ref().map_or(0, |e| e.pending_bursts())
    }

    /// The engine's surface, if one has been constructed
    pub fn surface(&self) -> Option<&CanvasSurface> {
        self.engine.as_ref().map(|e| e.surface())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trigger(preference: MotionPreference) -> CelebrationTrigger {
        CelebrationTrigger::new(
            preference,
            EngineProfile::default(),
            Viewport::new(640.0, 480.0),
            1.0,
            7,
        )
    }

    #[test]
    fn reduced_motion_never_builds_engine() {
        let mut t = trigger(MotionPreference::Reduce);
        t.fire(0.0);
        assert!(t.surface().is_none());
        assert!(!t.is_running());
        assert_eq!(t.particle_count(), 0);
        assert!(!t.frame(0.016));
    }

    #[test]
    fn engine_is_built_on_first_fire() {
        let mut t = trigger(MotionPreference::NoPreference);
        assert!(t.surface().is_none());

        t.fire(0.0);
        assert!(t.surface().is_some());
        assert!(t.is_running());
        assert_eq!(t.pending_bursts(), 5);

        // A second fire reuses the same engine rather than stacking one
        t.frame(0.0);
        let in_flight = t.particle_count();
        t.fire(0.1);
        assert_eq!(t.pending_bursts(), 5);
        assert_eq!(t.particle_count(), in_flight);
    }

    #[test]
    fn resize_before_construction_sticks() {
        let mut t = trigger(MotionPreference::NoPreference);
        t.resize(Viewport::new(1024.0, 768.0), 2.0);
        t.fire(0.0);
        let surface = t.surface().unwrap();
        assert_eq!(surface.backing_size(), (2048, 1536));
        assert!((surface.logical_size().width - 1024.0).abs() < 1e-6);
    }
}
