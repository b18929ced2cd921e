//! Peripheral registry: which state backs each peripheral kind.
//!
//! Kinds form a closed set. A kind binds either to one of the runtime's
//! eagerly built state slots or to a factory that is invoked per use with
//! the pin the part is wired to. Several kinds may bind to one slot; the
//! servo part, for instance, is the edge connector seen under another name.

use std::fmt;

use crate::{
    AccelerometerState, AnalogSensorState, ButtonPairState, CompassState, EdgeConnectorState,
    LedMatrixState, LightSensorState, LightStripState, Peripherals, RadioState, SerialState,
    ThermometerState,
};

/// Every peripheral kind a simulated program can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PeripheralKind {
    /// `ledmatrix`.
    LedMatrix,
    /// `buttonpair`.
    ButtonPair,
    /// `edgeconnector`.
    EdgeConnector,
    /// `radio`.
    Radio,
    /// `microphone`.
    Microphone,
    /// `accelerometer`.
    Accelerometer,
    /// `serial`.
    Serial,
    /// `thermometer`.
    Thermometer,
    /// `lightsensor`.
    LightSensor,
    /// `compass`.
    Compass,
    /// `microservo`.
    MicroServo,
    /// `neopixel`.
    NeoPixel,
}

impl PeripheralKind {
    /// Number of kinds.
    pub const COUNT: usize = 12;

    /// Every kind in declaration order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::LedMatrix,
        Self::ButtonPair,
        Self::EdgeConnector,
        Self::Radio,
        Self::Microphone,
        Self::Accelerometer,
        Self::Serial,
        Self::Thermometer,
        Self::LightSensor,
        Self::Compass,
        Self::MicroServo,
        Self::NeoPixel,
    ];

    /// Part name used by board and part definitions.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::LedMatrix => "ledmatrix",
            Self::ButtonPair => "buttonpair",
            Self::EdgeConnector => "edgeconnector",
            Self::Radio => "radio",
            Self::Microphone => "microphone",
            Self::Accelerometer => "accelerometer",
            Self::Serial => "serial",
            Self::Thermometer => "thermometer",
            Self::LightSensor => "lightsensor",
            Self::Compass => "compass",
            Self::MicroServo => "microservo",
            Self::NeoPixel => "neopixel",
        }
    }

    /// Parses a part name; unknown names are `None`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for PeripheralKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Eagerly built state owned by [`Peripherals`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum StateSlot {
    LedMatrix,
    ButtonPair,
    EdgeConnector,
    Radio,
    Microphone,
    Accelerometer,
    Serial,
    Thermometer,
    LightSensor,
    Compass,
}

/// Per-use constructor parameterized by a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FactoryKind {
    /// Light strip state from the light store.
    LightStrip,
}

/// What a peripheral kind is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Binding {
    /// A state slot built with the board.
    Instance(StateSlot),
    /// A factory invoked at the point of use.
    Factory(FactoryKind),
}

/// Kind-to-binding table of one board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeripheralRegistry {
    bindings: [Option<Binding>; PeripheralKind::COUNT],
}

impl Default for PeripheralRegistry {
    fn default() -> Self {
        Self::with_builtin_parts()
    }
}

impl PeripheralRegistry {
    /// Creates a registry with nothing bound.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            bindings: [None; PeripheralKind::COUNT],
        }
    }

    /// Creates the registry of the built-in board parts.
    #[must_use]
    pub fn with_builtin_parts() -> Self {
        let mut registry = Self::empty();
        for (kind, slot) in [
            (PeripheralKind::LedMatrix, StateSlot::LedMatrix),
            (PeripheralKind::ButtonPair, StateSlot::ButtonPair),
            (PeripheralKind::EdgeConnector, StateSlot::EdgeConnector),
            (PeripheralKind::Radio, StateSlot::Radio),
            (PeripheralKind::Microphone, StateSlot::Microphone),
            (PeripheralKind::Accelerometer, StateSlot::Accelerometer),
            (PeripheralKind::Serial, StateSlot::Serial),
            (PeripheralKind::Thermometer, StateSlot::Thermometer),
            (PeripheralKind::LightSensor, StateSlot::LightSensor),
            (PeripheralKind::Compass, StateSlot::Compass),
            // Servos are driven through edge connector pins.
            (PeripheralKind::MicroServo, StateSlot::EdgeConnector),
        ] {
            registry.register(kind, Binding::Instance(slot));
        }
        registry.register(
            PeripheralKind::NeoPixel,
            Binding::Factory(FactoryKind::LightStrip),
        );
        registry
    }

    /// Binds `kind`, replacing and returning any previous binding.
    pub fn register(&mut self, kind: PeripheralKind, binding: Binding) -> Option<Binding> {
        self.bindings[kind.index()].replace(binding)
    }

    /// Removes the binding of `kind`.
    pub fn unregister(&mut self, kind: PeripheralKind) -> Option<Binding> {
        self.bindings[kind.index()].take()
    }

    /// Binding of `kind`; `None` means the part is not on this board.
    #[must_use]
    pub const fn resolve(&self, kind: PeripheralKind) -> Option<Binding> {
        self.bindings[kind.index()]
    }

    /// Binding of a part name; unknown names resolve to `None`.
    #[must_use]
    pub fn resolve_name(&self, name: &str) -> Option<Binding> {
        PeripheralKind::from_name(name).and_then(|kind| self.resolve(kind))
    }

    /// Kinds currently bound to `slot`.
    pub fn aliases(&self, slot: StateSlot) -> impl Iterator<Item = PeripheralKind> + '_ {
        self.iter()
            .filter(move |(_, binding)| *binding == Binding::Instance(slot))
            .map(|(kind, _)| kind)
    }

    /// Bound kinds with their bindings, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (PeripheralKind, Binding)> + '_ {
        PeripheralKind::ALL
            .into_iter()
            .filter_map(|kind| self.resolve(kind).map(|binding| (kind, binding)))
    }
}

/// Shared view of a resolved peripheral state.
#[derive(Debug, Clone, Copy)]
#[allow(missing_docs)]
pub enum PeripheralRef<'a> {
    LedMatrix(&'a LedMatrixState),
    ButtonPair(&'a ButtonPairState),
    EdgeConnector(&'a EdgeConnectorState),
    Radio(&'a RadioState),
    Microphone(&'a AnalogSensorState),
    Accelerometer(&'a AccelerometerState),
    Serial(&'a SerialState),
    Thermometer(&'a ThermometerState),
    LightSensor(&'a LightSensorState),
    Compass(&'a CompassState),
    LightStrip(&'a LightStripState),
}

/// Mutable handle to a resolved peripheral state.
#[derive(Debug)]
#[allow(missing_docs)]
pub enum PeripheralMut<'a> {
    LedMatrix(&'a mut LedMatrixState),
    ButtonPair(&'a mut ButtonPairState),
    EdgeConnector(&'a mut EdgeConnectorState),
    Radio(&'a mut RadioState),
    Microphone(&'a mut AnalogSensorState),
    Accelerometer(&'a mut AccelerometerState),
    Serial(&'a mut SerialState),
    Thermometer(&'a mut ThermometerState),
    LightSensor(&'a mut LightSensorState),
    Compass(&'a mut CompassState),
    LightStrip(&'a mut LightStripState),
}

/// Result of resolving a kind without a use-site parameter.
#[derive(Debug, Clone, Copy)]
pub enum Part<'a> {
    /// Instance binding, ready to read.
    Instance(PeripheralRef<'a>),
    /// Factory binding; needs a pin before it yields state.
    Factory(FactoryKind),
}

impl Peripherals {
    /// Shared view of one slot.
    #[must_use]
    pub const fn slot(&self, slot: StateSlot) -> PeripheralRef<'_> {
        match slot {
            StateSlot::LedMatrix => PeripheralRef::LedMatrix(&self.led_matrix),
            StateSlot::ButtonPair => PeripheralRef::ButtonPair(&self.button_pair),
            StateSlot::EdgeConnector => PeripheralRef::EdgeConnector(&self.edge_connector),
            StateSlot::Radio => PeripheralRef::Radio(&self.radio),
            StateSlot::Microphone => PeripheralRef::Microphone(&self.microphone),
            StateSlot::Accelerometer => PeripheralRef::Accelerometer(&self.accelerometer),
            StateSlot::Serial => PeripheralRef::Serial(&self.serial),
            StateSlot::Thermometer => PeripheralRef::Thermometer(&self.thermometer),
            StateSlot::LightSensor => PeripheralRef::LightSensor(&self.light_sensor),
            StateSlot::Compass => PeripheralRef::Compass(&self.compass),
        }
    }

    /// Mutable handle to one slot.
    pub fn slot_mut(&mut self, slot: StateSlot) -> PeripheralMut<'_> {
        match slot {
            StateSlot::LedMatrix => PeripheralMut::LedMatrix(&mut self.led_matrix),
            StateSlot::ButtonPair => PeripheralMut::ButtonPair(&mut self.button_pair),
            StateSlot::EdgeConnector => PeripheralMut::EdgeConnector(&mut self.edge_connector),
            StateSlot::Radio => PeripheralMut::Radio(&mut self.radio),
            StateSlot::Microphone => PeripheralMut::Microphone(&mut self.microphone),
            StateSlot::Accelerometer => PeripheralMut::Accelerometer(&mut self.accelerometer),
            StateSlot::Serial => PeripheralMut::Serial(&mut self.serial),
            StateSlot::Thermometer => PeripheralMut::Thermometer(&mut self.thermometer),
            StateSlot::LightSensor => PeripheralMut::LightSensor(&mut self.light_sensor),
            StateSlot::Compass => PeripheralMut::Compass(&mut self.compass),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn builtin_registry_binds_every_kind() {
        let registry = PeripheralRegistry::with_builtin_parts();
        for kind in PeripheralKind::ALL {
            assert!(registry.resolve(kind).is_some(), "{kind} should be bound");
        }
    }

    #[test]
    fn microservo_aliases_edge_connector() {
        let registry = PeripheralRegistry::with_builtin_parts();
        assert_eq!(
            registry.resolve(PeripheralKind::MicroServo),
            registry.resolve(PeripheralKind::EdgeConnector)
        );
        let aliases: Vec<_> = registry.aliases(StateSlot::EdgeConnector).collect();
        assert_eq!(
            aliases,
            vec![PeripheralKind::EdgeConnector, PeripheralKind::MicroServo]
        );
    }

    #[test]
    fn neopixel_is_a_factory() {
        let registry = PeripheralRegistry::with_builtin_parts();
        assert_eq!(
            registry.resolve_name("neopixel"),
            Some(Binding::Factory(FactoryKind::LightStrip))
        );
    }

    #[test]
    fn register_is_last_write_wins() {
        let mut registry = PeripheralRegistry::with_builtin_parts();
        let previous = registry.register(
            PeripheralKind::Compass,
            Binding::Instance(StateSlot::Accelerometer),
        );
        assert_eq!(previous, Some(Binding::Instance(StateSlot::Compass)));
        assert_eq!(
            registry.resolve(PeripheralKind::Compass),
            Some(Binding::Instance(StateSlot::Accelerometer))
        );
    }

    #[test]
    fn unregistered_kind_resolves_to_none() {
        let mut registry = PeripheralRegistry::with_builtin_parts();
        registry.unregister(PeripheralKind::Radio);
        assert!(registry.resolve(PeripheralKind::Radio).is_none());
        assert!(PeripheralRegistry::empty().iter().next().is_none());
    }

    #[rstest]
    #[case("ledmatrix", Some(PeripheralKind::LedMatrix))]
    #[case("microservo", Some(PeripheralKind::MicroServo))]
    #[case("lightsensor", Some(PeripheralKind::LightSensor))]
    #[case("LedMatrix", None)]
    #[case("speaker", None)]
    #[case("", None)]
    fn part_names_parse(#[case] name: &str, #[case] expected: Option<PeripheralKind>) {
        assert_eq!(PeripheralKind::from_name(name), expected);
    }

    #[test]
    fn unknown_names_resolve_to_none() {
        let registry = PeripheralRegistry::with_builtin_parts();
        assert!(registry.resolve_name("speaker").is_none());
    }

    #[test]
    fn names_round_trip_for_every_kind() {
        for kind in PeripheralKind::ALL {
            assert_eq!(PeripheralKind::from_name(kind.name()), Some(kind));
        }
    }

    #[test]
    fn slot_views_point_at_the_owned_state() {
        let mut peripherals = Peripherals::default();
        if let PeripheralMut::Thermometer(thermometer) =
            peripherals.slot_mut(StateSlot::Thermometer)
        {
            thermometer.temperature = 30;
        }
        assert!(matches!(
            peripherals.slot(StateSlot::Thermometer),
            PeripheralRef::Thermometer(t) if t.temperature == 30
        ));
    }
}
