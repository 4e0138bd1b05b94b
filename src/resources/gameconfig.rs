//! Game configuration resource.
//!
//! Manages gameplay tuning loaded from an INI configuration file. Provides
//! defaults for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [track]
//! segment_length = 10.0
//! lookahead = 120.0
//! retire_margin = 30.0
//! intersection_chance = 0.15
//! intersection_cooldown = 5
//! delivery_chance = 0.08
//! ponctual_chance = 0.12
//! vbar_chance = 0.10
//! hbar_chance = 0.06
//!
//! [progress]
//! base_speed = 1.0
//! speed_step = 0.25
//! milestone_interval = 100.0
//!
//! [drone]
//! lateral_limit = 2.5
//! vertical_min = -1.0
//! vertical_max = 4.0
//! max_bank = 30.0
//! bank_rate = 120.0
//! bank_gain = 15.0
//! crash_delay = 3.5
//!
//! [turn]
//! steps = 30
//! step_degrees = 3.0
//! pivot_height = 3.0
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

const DEFAULT_SEGMENT_LENGTH: f32 = 10.0;
const DEFAULT_LOOKAHEAD: f32 = 120.0;
const DEFAULT_RETIRE_MARGIN: f32 = 30.0;
const DEFAULT_INTERSECTION_CHANCE: f32 = 0.15;
const DEFAULT_INTERSECTION_COOLDOWN: i32 = 5;
const DEFAULT_DELIVERY_CHANCE: f32 = 0.08;
const DEFAULT_PONCTUAL_CHANCE: f32 = 0.12;
const DEFAULT_VBAR_CHANCE: f32 = 0.10;
const DEFAULT_HBAR_CHANCE: f32 = 0.06;
const DEFAULT_BASE_SPEED: f32 = 1.0;
const DEFAULT_SPEED_STEP: f32 = 0.25;
const DEFAULT_MILESTONE_INTERVAL: f32 = 100.0;
const DEFAULT_LATERAL_LIMIT: f32 = 2.5;
const DEFAULT_VERTICAL_MIN: f32 = -1.0;
const DEFAULT_VERTICAL_MAX: f32 = 4.0;
const DEFAULT_MAX_BANK: f32 = 30.0;
const DEFAULT_BANK_RATE: f32 = 120.0;
const DEFAULT_BANK_GAIN: f32 = 15.0;
const DEFAULT_CRASH_DELAY: f32 = 3.5;
const DEFAULT_TURN_STEPS: u32 = 30;
const DEFAULT_TURN_STEP_DEGREES: f32 = 3.0;
const DEFAULT_TURN_PIVOT_HEIGHT: f32 = 3.0;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Gameplay tuning resource.
///
/// Stores track generation, progress, drone and turn maneuver settings.
/// Values missing from the file retain their compiled defaults.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Longitudinal length of one track slot, in world units.
    pub segment_length: f32,
    /// The generation cursor stays at least this far ahead of the anchor.
    pub lookahead: f32,
    /// Segments further than this behind the anchor are retired.
    pub retire_margin: f32,
    /// Per-slot probability of an intersection once the cooldown elapsed.
    pub intersection_chance: f32,
    /// Plain segments to place before the next intersection is allowed.
    pub intersection_cooldown: i32,
    /// Per-road-slot probability of a delivery station.
    pub delivery_chance: f32,
    /// Per-road-slot probability of a punctual decoration.
    pub ponctual_chance: f32,
    /// Per-road-slot probability of a vertical bar hazard.
    pub vbar_chance: f32,
    /// Per-road-slot probability of a horizontal bar hazard.
    pub hbar_chance: f32,
    /// Corridor speed at distance zero.
    pub base_speed: f32,
    /// Speed added at each milestone, capped at two steps.
    pub speed_step: f32,
    /// Distance between speed milestones.
    pub milestone_interval: f32,
    /// Symmetric lateral clamp of the drone target offset.
    pub lateral_limit: f32,
    /// Lower vertical clamp of the drone target offset.
    pub vertical_min: f32,
    /// Upper vertical clamp of the drone target offset.
    pub vertical_max: f32,
    /// Maximum banking angle in degrees.
    pub max_bank: f32,
    /// Bank smoothing rate in degrees per second.
    pub bank_rate: f32,
    /// Degrees of target bank per unit of lateral speed.
    pub bank_gain: f32,
    /// Seconds between a crash collision and drone destruction.
    pub crash_delay: f32,
    /// Number of discrete steps of a turn maneuver.
    pub turn_steps: u32,
    /// Degrees rotated per maneuver step.
    pub turn_step_degrees: f32,
    /// Height of the turn pivot above the intersection.
    pub turn_pivot_height: f32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            segment_length: DEFAULT_SEGMENT_LENGTH,
            lookahead: DEFAULT_LOOKAHEAD,
            retire_margin: DEFAULT_RETIRE_MARGIN,
            intersection_chance: DEFAULT_INTERSECTION_CHANCE,
            intersection_cooldown: DEFAULT_INTERSECTION_COOLDOWN,
            delivery_chance: DEFAULT_DELIVERY_CHANCE,
            ponctual_chance: DEFAULT_PONCTUAL_CHANCE,
            vbar_chance: DEFAULT_VBAR_CHANCE,
            hbar_chance: DEFAULT_HBAR_CHANCE,
            base_speed: DEFAULT_BASE_SPEED,
            speed_step: DEFAULT_SPEED_STEP,
            milestone_interval: DEFAULT_MILESTONE_INTERVAL,
            lateral_limit: DEFAULT_LATERAL_LIMIT,
            vertical_min: DEFAULT_VERTICAL_MIN,
            vertical_max: DEFAULT_VERTICAL_MAX,
            max_bank: DEFAULT_MAX_BANK,
            bank_rate: DEFAULT_BANK_RATE,
            bank_gain: DEFAULT_BANK_GAIN,
            crash_delay: DEFAULT_CRASH_DELAY,
            turn_steps: DEFAULT_TURN_STEPS,
            turn_step_degrees: DEFAULT_TURN_STEP_DEGREES,
            turn_pivot_height: DEFAULT_TURN_PIVOT_HEIGHT,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        let mut getf = |section: &str, key: &str, out: &mut f32| {
            if let Some(v) = config.getfloat(section, key).ok().flatten() {
                *out = v as f32;
            }
        };

        // [track] section
        getf("track", "segment_length", &mut self.segment_length);
        getf("track", "lookahead", &mut self.lookahead);
        getf("track", "retire_margin", &mut self.retire_margin);
        getf("track", "intersection_chance", &mut self.intersection_chance);
        getf("track", "delivery_chance", &mut self.delivery_chance);
        getf("track", "ponctual_chance", &mut self.ponctual_chance);
        getf("track", "vbar_chance", &mut self.vbar_chance);
        getf("track", "hbar_chance", &mut self.hbar_chance);
        if let Some(v) = config.getint("track", "intersection_cooldown").ok().flatten() {
            self.intersection_cooldown = v as i32;
        }

        // [progress] section
        getf("progress", "base_speed", &mut self.base_speed);
        getf("progress", "speed_step", &mut self.speed_step);
        getf("progress", "milestone_interval", &mut self.milestone_interval);

        // [drone] section
        getf("drone", "lateral_limit", &mut self.lateral_limit);
        getf("drone", "vertical_min", &mut self.vertical_min);
        getf("drone", "vertical_max", &mut self.vertical_max);
        getf("drone", "max_bank", &mut self.max_bank);
        getf("drone", "bank_rate", &mut self.bank_rate);
        getf("drone", "bank_gain", &mut self.bank_gain);
        getf("drone", "crash_delay", &mut self.crash_delay);

        // [turn] section
        getf("turn", "step_degrees", &mut self.turn_step_degrees);
        getf("turn", "pivot_height", &mut self.turn_pivot_height);
        if let Some(v) = config.getuint("turn", "steps").ok().flatten() {
            self.turn_steps = v as u32;
        }

        info!(
            "Loaded config: segment_length={}, lookahead={}, intersection_chance={}, base_speed={}, turn_steps={}",
            self.segment_length,
            self.lookahead,
            self.intersection_chance,
            self.base_speed,
            self.turn_steps
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("track", "segment_length", Some(self.segment_length.to_string()));
        config.set("track", "lookahead", Some(self.lookahead.to_string()));
        config.set("track", "retire_margin", Some(self.retire_margin.to_string()));
        config.set(
            "track",
            "intersection_chance",
            Some(self.intersection_chance.to_string()),
        );
        config.set(
            "track",
            "intersection_cooldown",
            Some(self.intersection_cooldown.to_string()),
        );
        config.set("track", "delivery_chance", Some(self.delivery_chance.to_string()));
        config.set("track", "ponctual_chance", Some(self.ponctual_chance.to_string()));
        config.set("track", "vbar_chance", Some(self.vbar_chance.to_string()));
        config.set("track", "hbar_chance", Some(self.hbar_chance.to_string()));

        config.set("progress", "base_speed", Some(self.base_speed.to_string()));
        config.set("progress", "speed_step", Some(self.speed_step.to_string()));
        config.set(
            "progress",
            "milestone_interval",
            Some(self.milestone_interval.to_string()),
        );

        config.set("drone", "lateral_limit", Some(self.lateral_limit.to_string()));
        config.set("drone", "vertical_min", Some(self.vertical_min.to_string()));
        config.set("drone", "vertical_max", Some(self.vertical_max.to_string()));
        config.set("drone", "max_bank", Some(self.max_bank.to_string()));
        config.set("drone", "bank_rate", Some(self.bank_rate.to_string()));
        config.set("drone", "bank_gain", Some(self.bank_gain.to_string()));
        config.set("drone", "crash_delay", Some(self.crash_delay.to_string()));

        config.set("turn", "steps", Some(self.turn_steps.to_string()));
        config.set("turn", "step_degrees", Some(self.turn_step_degrees.to_string()));
        config.set("turn", "pivot_height", Some(self.turn_pivot_height.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Highest speed the milestone curve can reach.
    pub fn speed_cap(&self) -> f32 {
        self.base_speed + 2.0 * self.speed_step
    }
}
