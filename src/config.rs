//! Configuration persistence for pilegauge settings

use cosmic::cosmic_config::{self, CosmicConfigEntry, cosmic_config_derive::CosmicConfigEntry};
use cosmic::iced::Color;
use serde::{Deserialize, Serialize};

/// Serializable color representation for config storage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl ShapeColor {
    pub const LIME: Self = Self {
        r: 0.0,
        g: 1.0,
        b: 0.0,
    };
    pub const RED: Self = Self {
        r: 1.0,
        g: 0.0,
        b: 0.0,
    };

    /// Same color with the given opacity
    pub fn with_alpha(self, a: f32) -> Color {
        Color::from_rgba(self.r, self.g, self.b, a)
    }
}

impl Default for ShapeColor {
    fn default() -> Self {
        Self::RED
    }
}

impl From<ShapeColor> for Color {
    fn from(c: ShapeColor) -> Self {
        Color::from_rgb(c.r, c.g, c.b)
    }
}

impl From<Color> for ShapeColor {
    fn from(c: Color) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
        }
    }
}

/// Application configuration persisted between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, CosmicConfigEntry)]
#[version = 1]
pub struct PileGaugeConfig {
    /// Reference height typed for the last successful calculation
    #[serde(default)]
    pub last_reference_height: String,
    /// Outline color of the reference rectangle
    #[serde(default = "default_reference_color")]
    pub reference_color: ShapeColor,
    /// Outline color of the pile rectangle
    #[serde(default)]
    pub pile_color: ShapeColor,
    /// Pause before the estimate is revealed, in milliseconds
    #[serde(default = "default_thinking_delay_ms")]
    pub thinking_delay_ms: u64,
    /// Box the photo is scaled down to fit into (never scaled up)
    #[serde(default = "default_max_display_width")]
    pub max_display_width: f32,
    #[serde(default = "default_max_display_height")]
    pub max_display_height: f32,
}

fn default_reference_color() -> ShapeColor {
    ShapeColor::LIME
}

fn default_thinking_delay_ms() -> u64 {
    2000
}

fn default_max_display_width() -> f32 {
    600.0
}

fn default_max_display_height() -> f32 {
    400.0
}

impl PileGaugeConfig {
    /// Configuration ID for cosmic-config
    pub const ID: &'static str = "io.github.pilegauge";

    /// Load configuration from disk, or return defaults if unavailable
    pub fn load() -> Self {
        match cosmic_config::Config::new(Self::ID, Self::VERSION) {
            Ok(config) => match Self::get_entry(&config) {
                Ok(entry) => entry,
                Err((errs, entry)) => {
                    log::warn!("Error loading config, using defaults: {:?}", errs);
                    entry
                }
            },
            Err(err) => {
                log::warn!("Could not create config handler: {:?}", err);
                Self::default()
            }
        }
    }

    /// Save configuration to disk
    pub fn save(&self) {
        match cosmic_config::Config::new(Self::ID, Self::VERSION) {
            Ok(config) => {
                if let Err(err) = self.write_entry(&config) {
                    log::error!("Failed to save config: {:?}", err);
                }
            }
            Err(err) => {
                log::error!("Could not create config handler for saving: {:?}", err);
            }
        }
    }

    /// Thinking delay as a duration
    pub fn thinking_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.thinking_delay_ms)
    }
}

impl Default for PileGaugeConfig {
    fn default() -> Self {
        Self {
            last_reference_height: String::new(),
            reference_color: default_reference_color(),
            pile_color: ShapeColor::RED,
            thinking_delay_ms: default_thinking_delay_ms(),
            max_display_width: default_max_display_width(),
            max_display_height: default_max_display_height(),
        }
    }
}
