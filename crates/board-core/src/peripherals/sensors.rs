//! Sensor states. Readings are injected by the view layer; no physics here.

use serde::{Deserialize, Serialize};

use crate::AnalogSensorConfig;

/// Default thermometer reading in degrees Celsius.
pub const DEFAULT_TEMPERATURE: i32 = 21;
/// Default ambient light level.
pub const DEFAULT_LIGHT_LEVEL: u8 = 128;

/// Three-axis acceleration in milli-g.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccelerometerState {
    /// X axis.
    pub x: i32,
    /// Y axis.
    pub y: i32,
    /// Z axis.
    pub z: i32,
    /// Set once the program reads the accelerometer.
    pub used: bool,
}

impl AccelerometerState {
    /// Injects a new sample.
    #[allow(clippy::missing_const_for_fn)]
    pub fn set_sample(&mut self, x: i32, y: i32, z: i32) {
        self.x = x;
        self.y = y;
        self.z = z;
    }
}

/// Compass heading in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompassState {
    heading: u16,
    /// Set once the program reads the compass.
    pub used: bool,
}

impl CompassState {
    /// Current heading, `0..360`.
    #[must_use]
    pub const fn heading(&self) -> u16 {
        self.heading
    }

    /// Sets the heading, wrapping at 360.
    #[allow(clippy::missing_const_for_fn)]
    pub fn set_heading(&mut self, degrees: u16) {
        self.heading = degrees % 360;
    }
}

/// On-die thermometer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThermometerState {
    /// Reading in degrees Celsius.
    pub temperature: i32,
    /// Set once the program reads the thermometer.
    pub used: bool,
}

impl Default for ThermometerState {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            used: false,
        }
    }
}

/// Ambient light sensed by the LED matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LightSensorState {
    /// Level, `0..=255`.
    pub level: u8,
    /// Set once the program reads the light level.
    pub used: bool,
}

impl Default for LightSensorState {
    fn default() -> Self {
        Self {
            level: DEFAULT_LIGHT_LEVEL,
            used: false,
        }
    }
}

/// Where an analog level sits relative to its thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ThresholdBand {
    /// At or under the low threshold.
    Low,
    /// Between the thresholds.
    Normal,
    /// At or over the high threshold.
    High,
}

/// Generic ranged analog sensor (the microphone on this board).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalogSensorState {
    config: AnalogSensorConfig,
    level: u16,
    /// Set once the program reads the sensor.
    pub used: bool,
}

impl Default for AnalogSensorState {
    fn default() -> Self {
        Self::new(AnalogSensorConfig::default())
    }
}

impl AnalogSensorState {
    /// Creates a sensor resting at its minimum.
    #[must_use]
    pub const fn new(config: AnalogSensorConfig) -> Self {
        Self {
            config,
            level: config.min,
            used: false,
        }
    }

    /// Sensor configuration.
    #[must_use]
    pub const fn config(&self) -> AnalogSensorConfig {
        self.config
    }

    /// Current level.
    #[must_use]
    pub const fn level(&self) -> u16 {
        self.level
    }

    /// Injects a level, clamped to the configured range.
    pub fn set_level(&mut self, level: u16) {
        self.level = level.max(self.config.min).min(self.config.max);
    }

    /// Band of the current level.
    #[must_use]
    pub const fn band(&self) -> ThresholdBand {
        if self.level <= self.config.low_threshold {
            ThresholdBand::Low
        } else if self.level >= self.config.high_threshold {
            ThresholdBand::High
        } else {
            ThresholdBand::Normal
        }
    }
}
