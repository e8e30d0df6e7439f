//! Engine profile: tunable physics, timing, and spawn constants
//!
//! The defaults are the shipping celebration look; a TOML profile can
//! override any field without recompiling.

use ovation_core::Result;
use std::path::Path;

/// Spawn parameters for one particle group of a burst
#[derive(Debug, Clone)]
pub struct GroupSpec {
    /// Particle count per unit of burst scale (floored after scaling)
    pub count_per_scale: f32,
    /// Initial speed range in px/s, scaled by burst scale
    pub speed_min: f32,
    pub speed_max: f32,
    /// Lifetime range in seconds
    pub ttl_min: f32,
    pub ttl_max: f32,
    /// Base draw size range
    pub radius_min: f32,
    pub radius_max: f32,
    /// Hue spread around the burst's base hue, degrees
    pub hue_jitter: f32,
    pub saturation_min: f32,
    pub saturation_max: f32,
    pub lightness_min: f32,
    pub lightness_max: f32,
}

impl GroupSpec {
    /// The dense, slower-fading body of a burst
    pub fn core() -> Self {
        Self {
            count_per_scale: 64.0,
            speed_min: 180.0,
            speed_max: 420.0,
            ttl_min: 0.65,
            ttl_max: 1.20,
            radius_min: 1.0,
            radius_max: 3.2,
            hue_jitter: 6.0,
            saturation_min: 0.70,
            saturation_max: 1.00,
            lightness_min: 0.38,
            lightness_max: 0.68,
        }
    }

    /// The brighter, short-lived accent layer
    pub fn sparkle() -> Self {
        Self {
            count_per_scale: 22.0,
            speed_min: 90.0,
            speed_max: 350.0,
            ttl_min: 0.45,
            ttl_max: 0.80,
            radius_min: 0.7,
            radius_max: 1.9,
            hue_jitter: 9.0,
            saturation_min: 0.85,
            saturation_max: 1.00,
            lightness_min: 0.55,
            lightness_max: 0.75,
        }
    }

    fn apply_toml(&mut self, table: &toml::value::Table) {
        if let Some(v) = table.get("count_per_scale") {
            self.count_per_scale = toml_f32(v, self.count_per_scale);
        }
        if let Some(v) = table.get("speed_min") {
            self.speed_min = toml_f32(v, self.speed_min);
        }
        if let Some(v) = table.get("speed_max") {
            self.speed_max = toml_f32(v, self.speed_max);
        }
        if let Some(v) = table.get("ttl_min") {
            self.ttl_min = toml_f32(v, self.ttl_min);
        }
        if let Some(v) = table.get("ttl_max") {
            self.ttl_max = toml_f32(v, self.ttl_max);
        }
        if let Some(v) = table.get("radius_min") {
            self.radius_min = toml_f32(v, self.radius_min);
        }
        if let Some(v) = table.get("radius_max") {
            self.radius_max = toml_f32(v, self.radius_max);
        }
        if let Some(v) = table.get("hue_jitter") {
            self.hue_jitter = toml_f32(v, self.hue_jitter);
        }
        if let Some(v) = table.get("saturation_min") {
            self.saturation_min = toml_f32(v, self.saturation_min);
        }
        if let Some(v) = table.get("saturation_max") {
            self.saturation_max = toml_f32(v, self.saturation_max);
        }
        if let Some(v) = table.get("lightness_min") {
            self.lightness_min = toml_f32(v, self.lightness_min);
        }
        if let Some(v) = table.get("lightness_max") {
            self.lightness_max = toml_f32(v, self.lightness_max);
        }
    }
}

/// All tunable constants of the celebration engine
#[derive(Debug, Clone)]
pub struct EngineProfile {
    /// Downward acceleration in px/s²
    pub gravity: f32,
    /// Multiplicative velocity damping per frame at the 60fps reference rate
    pub drag: f32,
    /// Coverage removed per frame by the trail-fade pass
    pub fade: f32,
    /// Frame delta cap in seconds, against huge post-stall timesteps
    pub max_frame_dt: f32,
    /// How long after a trigger the loop stays eligible to run, seconds
    pub linger: f32,
    /// Base hue band, degrees
    pub hue_min: f32,
    pub hue_max: f32,
    /// Main burst volley: count, spacing, placement bands, scale range
    pub main_count: u32,
    pub main_interval: f32,
    pub main_x_min: f32,
    pub main_x_max: f32,
    pub main_y_min: f32,
    pub main_y_max: f32,
    pub main_scale_min: f32,
    pub main_scale_max: f32,
    /// The single sweep burst: delay, horizontal band, fixed height and scale
    pub sweep_delay: f32,
    pub sweep_x_min: f32,
    pub sweep_x_max: f32,
    pub sweep_y: f32,
    pub sweep_scale: f32,
    pub core: GroupSpec,
    pub sparkle: GroupSpec,
}

impl Default for EngineProfile {
    fn default() -> Self {
        Self {
            gravity: 520.0,
            drag: 0.985,
            fade: 0.26,
            max_frame_dt: 0.034,
            linger: 1.1,
            hue_min: 105.0,
            hue_max: 150.0,
            main_count: 4,
            main_interval: 0.12,
            main_x_min: 0.15,
            main_x_max: 0.85,
            main_y_min: 0.14,
            main_y_max: 0.40,
            main_scale_min: 0.9,
            main_scale_max: 1.35,
            sweep_delay: 0.08,
            sweep_x_min: 0.35,
            sweep_x_max: 0.65,
            sweep_y: 0.22,
            sweep_scale: 1.15,
            core: GroupSpec::core(),
            sparkle: GroupSpec::sparkle(),
        }
    }
}

impl EngineProfile {
    /// Parse a profile from a TOML table, defaulting every missing field
    pub fn from_toml(table: &toml::value::Table) -> Self {
        let mut profile = Self::default();

        if let Some(v) = table.get("gravity") {
            profile.gravity = toml_f32(v, profile.gravity);
        }
        if let Some(v) = table.get("drag") {
            profile.drag = toml_f32(v, profile.drag);
        }
        if let Some(v) = table.get("fade") {
            profile.fade = toml_f32(v, profile.fade);
        }
        if let Some(v) = table.get("max_frame_dt") {
            profile.max_frame_dt = toml_f32(v, profile.max_frame_dt);
        }
        if let Some(v) = table.get("linger") {
            profile.linger = toml_f32(v, profile.linger);
        }
        if let Some(v) = table.get("hue_min") {
            profile.hue_min = toml_f32(v, profile.hue_min);
        }
        if let Some(v) = table.get("hue_max") {
            profile.hue_max = toml_f32(v, profile.hue_max);
        }
        if let Some(v) = table.get("main_count") {
            profile.main_count = v.as_integer().unwrap_or(4).max(0) as u32;
        }
        if let Some(v) = table.get("main_interval") {
            profile.main_interval = toml_f32(v, profile.main_interval);
        }
        if let Some(v) = table.get("main_x_min") {
            profile.main_x_min = toml_f32(v, profile.main_x_min);
        }
        if let Some(v) = table.get("main_x_max") {
            profile.main_x_max = toml_f32(v, profile.main_x_max);
        }
        if let Some(v) = table.get("main_y_min") {
            profile.main_y_min = toml_f32(v, profile.main_y_min);
        }
        if let Some(v) = table.get("main_y_max") {
            profile.main_y_max = toml_f32(v, profile.main_y_max);
        }
        if let Some(v) = table.get("main_scale_min") {
            profile.main_scale_min = toml_f32(v, profile.main_scale_min);
        }
        if let Some(v) = table.get("main_scale_max") {
            profile.main_scale_max = toml_f32(v, profile.main_scale_max);
        }
        if let Some(v) = table.get("sweep_delay") {
            profile.sweep_delay = toml_f32(v, profile.sweep_delay);
        }
        if let Some(v) = table.get("sweep_x_min") {
            profile.sweep_x_min = toml_f32(v, profile.sweep_x_min);
        }
        if let Some(v) = table.get("sweep_x_max") {
            profile.sweep_x_max = toml_f32(v, profile.sweep_x_max);
        }
        if let Some(v) = table.get("sweep_y") {
            profile.sweep_y = toml_f32(v, profile.sweep_y);
        }
        if let Some(v) = table.get("sweep_scale") {
            profile.sweep_scale = toml_f32(v, profile.sweep_scale);
        }
        if let Some(group) = table.get("core").and_then(|v| v.as_table()) {
            profile.core.apply_toml(group);
        }
        if let Some(group) = table.get("sparkle").and_then(|v| v.as_table()) {
            profile.sparkle.apply_toml(group);
        }

        profile
    }

    /// Parse a profile from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let table: toml::value::Table = toml::from_str(text)?;
        Ok(Self::from_toml(&table))
    }

    /// Load a profile from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

// ── TOML helpers (handle integer/float coercion) ──

fn toml_f32(v: &toml::Value, default: f32) -> f32 {
    v.as_float()
        .map(|f| f as f32)
        .or_else(|| v.as_integer().map(|i| i as f32))
        .unwrap_or(default)
}
