//! Edge connector pins and the pin-identifier resolver.
//!
//! Simulated programs refer to pins by strings such as `DigitalPin.P3`.
//! Resolution never fails loudly: anything unusable resolves to `None`.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::EdgeConnectorState;

/// Device id of a physical pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PinId(u8);

impl PinId {
    /// Wraps a raw device id.
    #[must_use]
    pub const fn new(raw: u8) -> Self {
        Self(raw)
    }

    /// Returns the raw device id.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Returns the id as a dense table index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Electrical role the simulated program last assigned to a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PinMode {
    /// Never touched by the program.
    #[default]
    Unused,
    /// Read as a digital input.
    DigitalInput,
    /// Driven as a digital output.
    DigitalOutput,
    /// Read as an analog input.
    AnalogInput,
    /// Driven with PWM.
    AnalogOutput,
    /// Driving a servo.
    Servo,
    /// Used as a capacitive touch input.
    Touch,
}

/// Input pull resistor configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PinPull {
    /// Floating input.
    #[default]
    None,
    /// Pulled towards supply.
    Up,
    /// Pulled towards ground.
    Down,
}

/// One edge connector slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pin {
    index: usize,
    id: Option<PinId>,
    mode: PinMode,
    pull: PinPull,
    value: u16,
    period_us: u32,
    servo_angle: u16,
}

impl Pin {
    /// Creates an idle pin at `index`; `id = None` marks an unused slot.
    #[must_use]
    pub const fn new(index: usize, id: Option<PinId>) -> Self {
        Self {
            index,
            id,
            mode: PinMode::Unused,
            pull: PinPull::None,
            value: 0,
            period_us: 0,
            servo_angle: 0,
        }
    }

    /// Position on the edge connector.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Device id, or `None` for an unused slot.
    #[must_use]
    pub const fn id(&self) -> Option<PinId> {
        self.id
    }

    /// Returns `true` when the slot is bonded to a device id.
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.id.is_some()
    }

    /// Current electrical role.
    #[must_use]
    pub const fn mode(&self) -> PinMode {
        self.mode
    }

    /// Current pull configuration.
    #[must_use]
    pub const fn pull(&self) -> PinPull {
        self.pull
    }

    /// Last written or injected level (digital `0/1`, analog `0..=1023`).
    #[must_use]
    pub const fn value(&self) -> u16 {
        self.value
    }

    /// PWM period in microseconds.
    #[must_use]
    pub const fn period_us(&self) -> u32 {
        self.period_us
    }

    /// Servo angle in degrees.
    #[must_use]
    pub const fn servo_angle(&self) -> u16 {
        self.servo_angle
    }

    /// Drives the pin as a digital output.
    pub fn digital_write(&mut self, high: bool) {
        self.mode = PinMode::DigitalOutput;
        self.value = u16::from(high);
    }

    /// Reads the pin as a digital input.
    pub fn digital_read(&mut self) -> bool {
        self.mode = PinMode::DigitalInput;
        self.value > 0
    }

    /// Drives the pin with a PWM level clamped to `0..=1023`.
    pub fn analog_write(&mut self, level: u16) {
        self.mode = PinMode::AnalogOutput;
        self.value = level.min(1023);
    }

    /// Reads the pin as an analog input.
    pub fn analog_read(&mut self) -> u16 {
        self.mode = PinMode::AnalogInput;
        self.value
    }

    /// Sets the PWM period.
    pub fn set_period_us(&mut self, period_us: u32) {
        self.period_us = period_us;
    }

    /// Drives a servo; angles clamp to `0..=180`.
    pub fn servo_write(&mut self, angle: u16) {
        self.mode = PinMode::Servo;
        self.servo_angle = angle.min(180);
    }

    /// Configures the input pull resistor.
    pub fn set_pull(&mut self, pull: PinPull) {
        self.pull = pull;
    }

    /// Injects a level from outside the program (e.g. the view layer).
    pub fn inject_value(&mut self, value: u16) {
        self.value = value;
    }
}

/// Prefix family of a pin identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PinKind {
    /// `AnalogPin.P<n>`.
    Analog,
    /// `DigitalPin.P<n>`.
    Digital,
}

/// Typed result of parsing a pin identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PinIdentifier {
    /// `*`: the part did not name a pin.
    Wildcard,
    /// An explicit edge connector index.
    Indexed {
        /// Prefix family.
        kind: PinKind,
        /// Edge connector index.
        index: usize,
    },
}

/// Why a string is not a pin identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum PinParseError {
    /// The identifier is the empty string.
    #[error("empty pin identifier")]
    Empty,
    /// The identifier starts with neither `AnalogPin.P` nor `DigitalPin.P`.
    #[error("pin identifier must start with `AnalogPin.P` or `DigitalPin.P`")]
    UnknownPrefix,
    /// No decimal digits follow the prefix.
    #[error("pin identifier has no index digits")]
    MissingDigits,
    /// The digits do not fit a machine index.
    #[error("pin index does not fit in usize")]
    IndexOverflow,
}

const ANALOG_PREFIX: &str = "AnalogPin.P";
const DIGITAL_PREFIX: &str = "DigitalPin.P";

/// Parses `*` or `(Analog|Digital)Pin.P<digits>`.
///
/// The match is anchored at the start only; text following the digits is
/// ignored, so `DigitalPin.P3_extra` names index 3.
///
/// # Errors
///
/// Returns a [`PinParseError`] describing the first mismatch.
pub fn parse_pin_identifier(input: &str) -> Result<PinIdentifier, PinParseError> {
    if input == "*" {
        return Ok(PinIdentifier::Wildcard);
    }
    if input.is_empty() {
        return Err(PinParseError::Empty);
    }

    let (kind, rest) = if let Some(rest) = input.strip_prefix(ANALOG_PREFIX) {
        (PinKind::Analog, rest)
    } else if let Some(rest) = input.strip_prefix(DIGITAL_PREFIX) {
        (PinKind::Digital, rest)
    } else {
        return Err(PinParseError::UnknownPrefix);
    };

    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return Err(PinParseError::MissingDigits);
    }
    let index = rest[..digits]
        .parse::<usize>()
        .map_err(|_| PinParseError::IndexOverflow)?;

    Ok(PinIdentifier::Indexed { kind, index })
}

/// Looks a pin identifier up on the edge connector.
///
/// Sentinel slots are returned like any other pin; callers decide whether an
/// unbonded pin is usable. Out-of-range indices and malformed identifiers
/// resolve to `None`.
#[must_use]
pub fn resolve_pin<'a>(edge: &'a EdgeConnectorState, identifier: &str) -> Option<&'a Pin> {
    match parse_pin_identifier(identifier).ok()? {
        PinIdentifier::Wildcard => edge.pins().first(),
        PinIdentifier::Indexed { index, .. } => edge.pins().get(index),
    }
}

/// Mutable variant of [`resolve_pin`].
#[must_use]
pub fn resolve_pin_mut<'a>(
    edge: &'a mut EdgeConnectorState,
    identifier: &str,
) -> Option<&'a mut Pin> {
    match parse_pin_identifier(identifier).ok()? {
        PinIdentifier::Wildcard => edge.pins_mut().first_mut(),
        PinIdentifier::Indexed { index, .. } => edge.pins_mut().get_mut(index),
    }
}
