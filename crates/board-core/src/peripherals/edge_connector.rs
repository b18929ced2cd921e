//! Edge connector: the board's fixed pin array and servo aliases.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{BoardTopology, Pin, PinId};

/// Runtime state of the edge connector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeConnectorState {
    pins: Vec<Pin>,
    servos: BTreeMap<String, PinId>,
}

impl Default for EdgeConnectorState {
    fn default() -> Self {
        Self::from_topology(&BoardTopology::microbit())
    }
}

impl EdgeConnectorState {
    /// Builds idle pins in topology order.
    #[must_use]
    pub fn from_topology(topology: &BoardTopology) -> Self {
        Self {
            pins: topology
                .pins
                .iter()
                .enumerate()
                .map(|(index, id)| Pin::new(index, *id))
                .collect(),
            servos: topology.servos.clone(),
        }
    }

    /// Every slot, sentinels included, in index order.
    #[must_use]
    pub fn pins(&self) -> &[Pin] {
        &self.pins
    }

    /// Mutable slots. The slice length is fixed for the runtime's lifetime.
    pub fn pins_mut(&mut self) -> &mut [Pin] {
        &mut self.pins
    }

    /// Finds a bonded pin by device id.
    #[must_use]
    pub fn get_pin(&self, id: PinId) -> Option<&Pin> {
        self.pins.iter().find(|pin| pin.id() == Some(id))
    }

    /// Mutable variant of [`Self::get_pin`].
    pub fn get_pin_mut(&mut self, id: PinId) -> Option<&mut Pin> {
        self.pins.iter_mut().find(|pin| pin.id() == Some(id))
    }

    /// Servo alias table.
    #[must_use]
    pub const fn servos(&self) -> &BTreeMap<String, PinId> {
        &self.servos
    }

    /// Pin a friendly servo name (e.g. `"P0"`) is wired to.
    #[must_use]
    pub fn servo_pin(&self, alias: &str) -> Option<&Pin> {
        self.servos.get(alias).and_then(|id| self.get_pin(*id))
    }
}
