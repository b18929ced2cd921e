//! Core board runtime for the micro:bit simulator.

/// Device and event identifiers of the device abstraction layer.
pub mod dal;

/// Host-integration and topology errors.
pub mod error;
pub use error::{BoardError, TopologyError};

/// Static board topology.
pub mod topology;
pub use topology::{AnalogSensorConfig, BoardTopology, ButtonIds, RadioIds};

/// Edge connector pins and pin-identifier resolution.
pub mod pins;
pub use pins::{
    parse_pin_identifier, resolve_pin, resolve_pin_mut, Pin, PinId, PinIdentifier, PinKind,
    PinMode, PinParseError, PinPull,
};

/// Passive event bus drained by the interpreter.
pub mod bus;
pub use bus::{EventBus, EventRecord};

/// Eagerly built peripheral states.
pub mod peripherals;
pub use peripherals::{
    AccelerometerState, AnalogSensorState, Button, ButtonPairState, ButtonState, CompassState,
    DisplayMode, EdgeConnectorState, FileSystemState, Image, LedMatrixState, LightSensorState,
    LightStripMode, LightStripState, Peripherals, PixelColor, RadioPacket, RadioPayload,
    RadioState, SerialState, ThermometerState, ThresholdBand, MATRIX_HEIGHT, MATRIX_WIDTH,
    MAX_LEVEL, RADIO_MAX_PACKETS,
};

/// Per-pin light strip store.
pub mod light;
pub use light::{LightStateStore, PIN_ID_SPACE};

/// Peripheral kind registry.
pub mod registry;
pub use registry::{
    Binding, FactoryKind, Part, PeripheralKind, PeripheralMut, PeripheralRef, PeripheralRegistry,
    StateSlot,
};

/// Program fault overlay.
pub mod overlay;
pub use overlay::{
    draw_sad_face, ErrorOverlay, FaultHandler, OverlayState, OverlayTransition, ProgramFault,
    SadFaceOverlay, SAD_FACE_PIXELS,
};

/// Inbound transport messages.
pub mod dispatch;
pub use dispatch::{dispatch, DispatchOutcome, InboundMessage};

/// View-layer hand-off.
pub mod view;
pub use view::{RunConfig, ViewAttachment, ViewHost, ViewRequest, VIEW_MAX_EXTENT};

/// Board runtime and simulator context.
pub mod runtime;
pub use runtime::{BoardRuntime, BoardSnapshot, Simulator};

#[cfg(test)]
use proptest as _;
#[cfg(test)]
use rstest as _;
