//! Render tuning resource.
//!
//! All timing and distance constants used by interpolation, hit feedback and
//! burrow particles, with defaults matching the server's 500 ms AI tick.
//! Values can be overridden from an INI file.
//!
//! # Configuration File Format
//!
//! ```ini
//! [motion]
//! server_tick_ms = 500
//! max_speed = 1000
//! teleport_safety = 1.2
//! noise_floor = 2.0
//! snap_epsilon = 1.0
//!
//! [animation]
//! walk_frame_ms = 100
//!
//! [effects]
//! shake_ms = 200
//! shake_px = 4
//! flash_ms = 120
//!
//! [burrow]
//! particles = 12
//! duration_ms = 800
//! gravity = 400
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::error::{Result, WildlifeError};

const DEFAULT_CONFIG_PATH: &str = "./wildlife.ini";

/// Tuning constants for the whole pipeline.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct RenderConfig {
    // [motion]
    /// Nominal interval between authoritative position updates.
    pub server_tick_ms: f64,
    /// Fastest legitimate entity speed, world units per second.
    pub max_speed: f32,
    /// Margin applied on top of one tick of max-speed travel before a jump
    /// counts as a teleport.
    pub teleport_safety: f32,
    /// Displacements at or below this are treated as snapshot jitter.
    pub noise_floor: f32,
    /// Velocity is only resampled when at least this much time has passed.
    pub min_sample_elapsed_ms: f64,
    /// Weight kept from the previous velocity estimate (new sample gets the rest).
    pub velocity_retain: f32,
    /// Tick progress at which extrapolation stops and pure seeking begins.
    pub late_phase_start: f32,
    /// Upper clamp for tick progress.
    pub max_tick_progress: f32,
    pub snap_epsilon: f32,
    /// Nominal render frame interval used for one-frame extrapolation.
    pub frame_interval_ms: f32,
    pub early_seek_min: f32,
    pub early_seek_max: f32,
    pub late_catch_min: f32,
    /// Speeds below this (units/ms) are drawn with the idle frame.
    pub idle_speed: f32,

    // [animation]
    pub walk_frame_ms: f64,

    // [effects]
    pub shake_ms: f64,
    pub shake_px: f32,
    pub flash_ms: f64,
    /// Seed for effect randomness; `None` seeds from entropy.
    pub effect_seed: Option<u64>,

    // [burrow]
    pub burrow_particles: usize,
    pub burrow_duration_ms: f64,
    /// Downward acceleration in pixels per second squared.
    pub burrow_gravity: f32,
    pub burrow_speed_min: f32,
    pub burrow_speed_max: f32,
    pub burrow_lift_min: f32,
    pub burrow_lift_max: f32,

    pub config_path: PathBuf,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderConfig {
    pub fn new() -> Self {
        Self {
            server_tick_ms: 500.0,
            max_speed: 1000.0,
            teleport_safety: 1.2,
            noise_floor: 2.0,
            min_sample_elapsed_ms: 16.0,
            velocity_retain: 0.3,
            late_phase_start: 0.8,
            max_tick_progress: 1.5,
            snap_epsilon: 1.0,
            frame_interval_ms: 1000.0 / 60.0,
            early_seek_min: 0.08,
            early_seek_max: 0.30,
            late_catch_min: 0.4,
            idle_speed: 0.01,
            walk_frame_ms: 100.0,
            shake_ms: 200.0,
            shake_px: 4.0,
            flash_ms: 120.0,
            effect_seed: None,
            burrow_particles: 12,
            burrow_duration_ms: 800.0,
            burrow_gravity: 400.0,
            burrow_speed_min: 40.0,
            burrow_speed_max: 120.0,
            burrow_lift_min: 60.0,
            burrow_lift_max: 140.0,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Jumps longer than this between two accepted updates are teleports.
    ///
    /// One tick of travel at the fastest speed in the game, times the safety
    /// margin (500 ms × 1000 u/s × 1.2 = 600 units with defaults).
    pub fn teleport_threshold(&self) -> f32 {
        (self.server_tick_ms as f32 / 1000.0) * self.max_speed * self.teleport_safety
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values keep their current values.
    pub fn load_from_file(&mut self) -> Result<()> {
        let mut ini = Ini::new();
        ini.load(&self.config_path)
            .map_err(|reason| WildlifeError::ConfigLoad {
                path: self.config_path.clone(),
                reason,
            })?;

        // [motion]
        if let Some(v) = get_f64(&ini, "motion", "server_tick_ms")? {
            if v <= 0.0 {
                return Err(WildlifeError::ConfigValue {
                    section: "motion",
                    key: "server_tick_ms",
                    reason: format!("must be positive, got {v}"),
                });
            }
            self.server_tick_ms = v;
        }
        if let Some(v) = get_f64(&ini, "motion", "max_speed")? {
            self.max_speed = v as f32;
        }
        if let Some(v) = get_f64(&ini, "motion", "teleport_safety")? {
            self.teleport_safety = v as f32;
        }
        if let Some(v) = get_f64(&ini, "motion", "noise_floor")? {
            self.noise_floor = v as f32;
        }
        if let Some(v) = get_f64(&ini, "motion", "min_sample_elapsed_ms")? {
            self.min_sample_elapsed_ms = v;
        }
        if let Some(v) = get_f64(&ini, "motion", "velocity_retain")? {
            self.velocity_retain = (v as f32).clamp(0.0, 1.0);
        }
        if let Some(v) = get_f64(&ini, "motion", "late_phase_start")? {
            self.late_phase_start = (v as f32).clamp(0.05, 1.0);
        }
        if let Some(v) = get_f64(&ini, "motion", "max_tick_progress")? {
            self.max_tick_progress = (v as f32).max(1.0);
        }
        if let Some(v) = get_f64(&ini, "motion", "snap_epsilon")? {
            self.snap_epsilon = v as f32;
        }
        if let Some(v) = get_f64(&ini, "motion", "frame_interval_ms")? {
            self.frame_interval_ms = v as f32;
        }
        if let Some(v) = get_f64(&ini, "motion", "idle_speed")? {
            self.idle_speed = v as f32;
        }

        // [animation]
        if let Some(v) = get_f64(&ini, "animation", "walk_frame_ms")? {
            self.walk_frame_ms = v.max(1.0);
        }

        // [effects]
        if let Some(v) = get_f64(&ini, "effects", "shake_ms")? {
            self.shake_ms = v;
        }
        if let Some(v) = get_f64(&ini, "effects", "shake_px")? {
            self.shake_px = v as f32;
        }
        if let Some(v) = get_f64(&ini, "effects", "flash_ms")? {
            self.flash_ms = v;
        }
        if let Some(v) = get_u64(&ini, "effects", "seed")? {
            self.effect_seed = Some(v);
        }

        // [burrow]
        if let Some(v) = get_u64(&ini, "burrow", "particles")? {
            self.burrow_particles = v as usize;
        }
        if let Some(v) = get_f64(&ini, "burrow", "duration_ms")? {
            self.burrow_duration_ms = v;
        }
        if let Some(v) = get_f64(&ini, "burrow", "gravity")? {
            self.burrow_gravity = v as f32;
        }
        if let Some(v) = get_f64(&ini, "burrow", "speed_min")? {
            self.burrow_speed_min = v as f32;
        }
        if let Some(v) = get_f64(&ini, "burrow", "speed_max")? {
            self.burrow_speed_max = v as f32;
        }
        if let Some(v) = get_f64(&ini, "burrow", "lift_min")? {
            self.burrow_lift_min = v as f32;
        }
        if let Some(v) = get_f64(&ini, "burrow", "lift_max")? {
            self.burrow_lift_max = v as f32;
        }

        info!(
            "Loaded render config: tick={}ms, teleport>{:.0}u, shake={}ms, flash={}ms, burrow={}x{}ms",
            self.server_tick_ms,
            self.teleport_threshold(),
            self.shake_ms,
            self.flash_ms,
            self.burrow_particles,
            self.burrow_duration_ms
        );

        Ok(())
    }

    /// Save the user-facing subset of the configuration to the INI file.
    pub fn save_to_file(&self) -> Result<()> {
        let mut ini = Ini::new();

        ini.set("motion", "server_tick_ms", Some(self.server_tick_ms.to_string()));
        ini.set("motion", "max_speed", Some(self.max_speed.to_string()));
        ini.set("motion", "teleport_safety", Some(self.teleport_safety.to_string()));
        ini.set("motion", "noise_floor", Some(self.noise_floor.to_string()));
        ini.set("motion", "snap_epsilon", Some(self.snap_epsilon.to_string()));

        ini.set("animation", "walk_frame_ms", Some(self.walk_frame_ms.to_string()));

        ini.set("effects", "shake_ms", Some(self.shake_ms.to_string()));
        ini.set("effects", "shake_px", Some(self.shake_px.to_string()));
        ini.set("effects", "flash_ms", Some(self.flash_ms.to_string()));
        if let Some(seed) = self.effect_seed {
            ini.set("effects", "seed", Some(seed.to_string()));
        }

        ini.set("burrow", "particles", Some(self.burrow_particles.to_string()));
        ini.set("burrow", "duration_ms", Some(self.burrow_duration_ms.to_string()));
        ini.set("burrow", "gravity", Some(self.burrow_gravity.to_string()));
        ini.set("burrow", "speed_min", Some(self.burrow_speed_min.to_string()));
        ini.set("burrow", "speed_max", Some(self.burrow_speed_max.to_string()));
        ini.set("burrow", "lift_min", Some(self.burrow_lift_min.to_string()));
        ini.set("burrow", "lift_max", Some(self.burrow_lift_max.to_string()));

        ini.write(&self.config_path)
            .map_err(|source| WildlifeError::ConfigSave {
                path: self.config_path.clone(),
                source,
            })?;

        info!("Saved render config to {:?}", self.config_path);
        Ok(())
    }
}

fn get_f64(ini: &Ini, section: &'static str, key: &'static str) -> Result<Option<f64>> {
    ini.getfloat(section, key)
        .map_err(|reason| WildlifeError::ConfigValue {
            section,
            key,
            reason,
        })
}

fn get_u64(ini: &Ini, section: &'static str, key: &'static str) -> Result<Option<u64>> {
    ini.getuint(section, key)
        .map_err(|reason| WildlifeError::ConfigValue {
            section,
            key,
            reason,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("wildlife_render_{}_{}.ini", name, std::process::id()))
    }

    #[test]
    fn test_default_teleport_threshold_is_600() {
        let cfg = RenderConfig::new();
        assert!((cfg.teleport_threshold() - 600.0).abs() < 1e-3);
    }

    #[test]
    fn test_threshold_scales_with_tick_and_speed() {
        let cfg = RenderConfig {
            server_tick_ms: 250.0,
            max_speed: 400.0,
            teleport_safety: 1.5,
            ..RenderConfig::new()
        };
        assert!((cfg.teleport_threshold() - 150.0).abs() < 1e-3);
    }

    #[test]
    fn test_load_missing_file_errors_and_keeps_defaults() {
        let mut cfg = RenderConfig::with_path(temp_path("missing_does_not_exist"));
        assert!(cfg.load_from_file().is_err());
        assert_eq!(cfg.server_tick_ms, 500.0);
    }

    #[test]
    fn test_load_overrides_present_keys_only() {
        let path = temp_path("partial");
        std::fs::write(
            &path,
            "[motion]\nserver_tick_ms = 250\n\n[effects]\nflash_ms = 90\nseed = 42\n",
        )
        .unwrap();
        let mut cfg = RenderConfig::with_path(&path);
        cfg.load_from_file().unwrap();
        assert_eq!(cfg.server_tick_ms, 250.0);
        assert_eq!(cfg.flash_ms, 90.0);
        assert_eq!(cfg.effect_seed, Some(42));
        assert_eq!(cfg.shake_ms, 200.0);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_rejects_non_positive_tick() {
        let path = temp_path("bad_tick");
        std::fs::write(&path, "[motion]\nserver_tick_ms = 0\n").unwrap();
        let mut cfg = RenderConfig::with_path(&path);
        assert!(matches!(
            cfg.load_from_file(),
            Err(WildlifeError::ConfigValue { key: "server_tick_ms", .. })
        ));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_save_then_load_preserves_values() {
        let path = temp_path("save");
        let cfg = RenderConfig {
            shake_px: 6.0,
            burrow_particles: 8,
            ..RenderConfig::with_path(&path)
        };
        cfg.save_to_file().unwrap();
        let mut loaded = RenderConfig::with_path(&path);
        loaded.load_from_file().unwrap();
        assert_eq!(loaded.shake_px, 6.0);
        assert_eq!(loaded.burrow_particles, 8);
        std::fs::remove_file(&path).ok();
    }
}
