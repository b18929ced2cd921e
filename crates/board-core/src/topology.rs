//! Static board topology used to build a runtime.
//!
//! The default topology is the micro:bit layout. Hosts that load a board
//! description can decode one from JSON; any field left out keeps its
//! micro:bit default.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dal;
use crate::{BoardError, PinId, TopologyError};

/// Device and event ids used by the button pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ButtonIds {
    /// Button A device id.
    pub button_a: u16,
    /// Button B device id.
    pub button_b: u16,
    /// Combined A+B device id.
    pub button_ab: u16,
    /// Released event code.
    pub evt_up: u16,
    /// Clicked event code.
    pub evt_click: u16,
}

impl Default for ButtonIds {
    fn default() -> Self {
        Self {
            button_a: dal::ID_BUTTON_A,
            button_b: dal::ID_BUTTON_B,
            button_ab: dal::ID_BUTTON_AB,
            evt_up: dal::BUTTON_EVT_UP,
            evt_click: dal::BUTTON_EVT_CLICK,
        }
    }
}

/// Device and event ids used by the radio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RadioIds {
    /// Radio device id used as bus source.
    pub id_radio: u16,
    /// Event raised when a datagram is queued.
    pub evt_datagram: u16,
}

impl Default for RadioIds {
    fn default() -> Self {
        Self {
            id_radio: dal::ID_RADIO,
            evt_datagram: dal::RADIO_EVT_DATAGRAM,
        }
    }
}

/// Range and threshold configuration of an analog sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalogSensorConfig {
    /// Device id used as bus source.
    pub id: u16,
    /// Lowest reportable level.
    pub min: u16,
    /// Highest reportable level.
    pub max: u16,
    /// Level under which the sensor reports "low".
    pub low_threshold: u16,
    /// Level over which the sensor reports "high".
    pub high_threshold: u16,
}

impl Default for AnalogSensorConfig {
    fn default() -> Self {
        Self {
            id: dal::ID_MICROPHONE,
            min: 52,
            max: 120,
            low_threshold: 75,
            high_threshold: 96,
        }
    }
}

/// Fixed physical layout of the simulated board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BoardTopology {
    /// Edge connector pin ids by index; `None` marks an unused silicon pin.
    pub pins: Vec<Option<PinId>>,
    /// Friendly servo names mapped to pin ids.
    pub servos: BTreeMap<String, PinId>,
    /// Button pair ids.
    pub buttons: ButtonIds,
    /// Radio ids.
    pub radio: RadioIds,
    /// Microphone sensor configuration.
    pub microphone: AnalogSensorConfig,
    /// Pin a light strip binds to when attached without a pin id.
    pub default_light_pin: PinId,
}

impl Default for BoardTopology {
    fn default() -> Self {
        Self::microbit()
    }
}

impl BoardTopology {
    /// Returns the micro:bit edge connector and id layout.
    #[must_use]
    pub fn microbit() -> Self {
        let mut pins: Vec<Option<PinId>> = (dal::ID_IO_P0..=dal::ID_IO_P16)
            .map(|id| Some(PinId::new(id)))
            .collect();
        // P17 and P18 are not bonded out.
        pins.extend([None, None]);
        pins.push(Some(PinId::new(dal::ID_IO_P19)));
        pins.push(Some(PinId::new(dal::ID_IO_P20)));

        let servos = pins
            .iter()
            .enumerate()
            .filter(|(index, _)| *index != 20)
            .filter_map(|(index, id)| id.map(|id| (format!("P{index}"), id)))
            .collect();

        Self {
            pins,
            servos,
            buttons: ButtonIds::default(),
            radio: RadioIds::default(),
            microphone: AnalogSensorConfig::default(),
            default_light_pin: PinId::new(dal::ID_IO_P0),
        }
    }

    /// Decodes and validates a topology from its JSON description.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::TopologyDecode`] for malformed JSON and
    /// [`BoardError::InvalidTopology`] when validation fails.
    pub fn from_json_str(json: &str) -> Result<Self, BoardError> {
        let topology: Self = serde_json::from_str(json).map_err(BoardError::TopologyDecode)?;
        topology.validate()?;
        Ok(topology)
    }

    /// Number of edge connector slots, sentinels included.
    #[must_use]
    pub fn pin_count(&self) -> usize {
        self.pins.len()
    }

    /// Checks structural invariants the runtime relies on.
    ///
    /// # Errors
    ///
    /// Returns the first [`TopologyError`] found.
    pub fn validate(&self) -> Result<(), TopologyError> {
        if self.pins.is_empty() {
            return Err(TopologyError::EmptyEdgeConnector);
        }

        let mut seen: BTreeMap<PinId, usize> = BTreeMap::new();
        for (index, id) in self.pins.iter().enumerate() {
            let Some(id) = *id else { continue };
            if let Some(first) = seen.insert(id, index) {
                return Err(TopologyError::DuplicatePinId {
                    id,
                    first,
                    second: index,
                });
            }
        }

        if let Some((alias, id)) = self
            .servos
            .iter()
            .find(|(_, id)| !seen.contains_key(*id))
        {
            return Err(TopologyError::DanglingServoAlias {
                alias: alias.clone(),
                id: *id,
            });
        }

        if !seen.contains_key(&self.default_light_pin) {
            return Err(TopologyError::UnknownDefaultLightPin(self.default_light_pin));
        }

        Ok(())
    }
}
