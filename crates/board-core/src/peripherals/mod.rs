//! Runtime-owned peripheral states.

/// Button pair.
pub mod buttons;
/// LED matrix and bitmap.
pub mod display;
/// Edge connector pin array.
pub mod edge_connector;
/// Flat file store.
pub mod file_system;
/// Addressable light strip buffer.
pub mod light_strip;
/// Radio receive path.
pub mod radio;
/// Sensor states.
pub mod sensors;
/// Serial buffers.
pub mod serial;

use serde::{Deserialize, Serialize};

pub use buttons::{Button, ButtonPairState, ButtonState};
pub use display::{DisplayMode, Image, LedMatrixState, MATRIX_HEIGHT, MATRIX_WIDTH, MAX_LEVEL};
pub use edge_connector::EdgeConnectorState;
pub use file_system::FileSystemState;
pub use light_strip::{LightStripMode, LightStripState, PixelColor};
pub use radio::{RadioPacket, RadioPayload, RadioState, RADIO_MAX_PACKETS};
pub use sensors::{
    AccelerometerState, AnalogSensorState, CompassState, LightSensorState, ThermometerState,
    ThresholdBand,
};
pub use serial::SerialState;

use crate::BoardTopology;

/// Every eagerly built peripheral state of one board.
///
/// The view layer reads this by reference once per frame and must not
/// mutate it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Peripherals {
    /// LED matrix.
    pub led_matrix: LedMatrixState,
    /// Button pair.
    pub button_pair: ButtonPairState,
    /// Edge connector.
    pub edge_connector: EdgeConnectorState,
    /// Radio.
    pub radio: RadioState,
    /// Microphone.
    pub microphone: AnalogSensorState,
    /// Accelerometer.
    pub accelerometer: AccelerometerState,
    /// Serial port.
    pub serial: SerialState,
    /// Thermometer.
    pub thermometer: ThermometerState,
    /// Light sensor.
    pub light_sensor: LightSensorState,
    /// Compass.
    pub compass: CompassState,
}

impl Peripherals {
    /// Builds every peripheral from the static topology.
    #[must_use]
    pub fn from_topology(topology: &BoardTopology) -> Self {
        Self {
            led_matrix: LedMatrixState::default(),
            button_pair: ButtonPairState::new(topology.buttons),
            edge_connector: EdgeConnectorState::from_topology(topology),
            radio: RadioState::new(topology.radio),
            microphone: AnalogSensorState::new(topology.microphone),
            accelerometer: AccelerometerState::default(),
            serial: SerialState::new(),
            thermometer: ThermometerState::default(),
            light_sensor: LightSensorState::default(),
            compass: CompassState::default(),
        }
    }
}

impl Default for Peripherals {
    fn default() -> Self {
        Self::from_topology(&BoardTopology::microbit())
    }
}
