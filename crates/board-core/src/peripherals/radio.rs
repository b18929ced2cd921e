//! Radio receive path.
//!
//! Packets delivered by the page transport land in a small bounded queue.
//! The board raises a datagram event for every packet it accepts; packets
//! arriving on a full queue are dropped, as on hardware.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::RadioIds;

/// Packets the receive queue holds before dropping.
pub const RADIO_MAX_PACKETS: usize = 4;

/// Default transmit power level (`0..=7`).
pub const DEFAULT_TRANSMIT_POWER: u8 = 6;

/// Application payload of a radio packet.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadioPayload {
    /// Packet kind discriminant chosen by the sender's runtime.
    #[serde(rename = "type", default)]
    pub kind: u8,
    /// Radio group the packet was sent on.
    #[serde(default)]
    pub group_id: u8,
    /// String payload, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string_data: Option<String>,
    /// Numeric payload, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_data: Option<f64>,
    /// Raw buffer payload, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buffer_data: Option<Vec<u8>>,
}

/// One received packet.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadioPacket {
    /// Received signal strength.
    #[serde(default)]
    pub rssi: i32,
    /// Sender serial number.
    #[serde(default)]
    pub serial: i64,
    /// Sender timestamp in milliseconds.
    #[serde(default)]
    pub time: f64,
    /// Application payload.
    #[serde(default)]
    pub payload: RadioPayload,
}

/// Runtime state of the radio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadioState {
    ids: RadioIds,
    group: u8,
    transmit_power: u8,
    transmit_serial_number: bool,
    rx_queue: VecDeque<RadioPacket>,
    last_received: Option<RadioPacket>,
}

impl Default for RadioState {
    fn default() -> Self {
        Self::new(RadioIds::default())
    }
}

impl RadioState {
    /// Creates an idle radio raising events with `ids`.
    #[must_use]
    pub fn new(ids: RadioIds) -> Self {
        Self {
            ids,
            group: 0,
            transmit_power: DEFAULT_TRANSMIT_POWER,
            transmit_serial_number: false,
            rx_queue: VecDeque::with_capacity(RADIO_MAX_PACKETS),
            last_received: None,
        }
    }

    /// Configured ids.
    #[must_use]
    pub const fn ids(&self) -> RadioIds {
        self.ids
    }

    /// Current radio group.
    #[must_use]
    pub const fn group(&self) -> u8 {
        self.group
    }

    /// Switches radio group.
    #[allow(clippy::missing_const_for_fn)]
    pub fn set_group(&mut self, group: u8) {
        self.group = group;
    }

    /// Current transmit power.
    #[must_use]
    pub const fn transmit_power(&self) -> u8 {
        self.transmit_power
    }

    /// Sets transmit power, clamped to `0..=7`.
    #[allow(clippy::missing_const_for_fn)]
    pub fn set_transmit_power(&mut self, power: u8) {
        self.transmit_power = power.min(7);
    }

    /// Whether outgoing packets carry the board serial number.
    #[must_use]
    pub const fn transmit_serial_number(&self) -> bool {
        self.transmit_serial_number
    }

    /// Enables or disables serial-number stamping.
    #[allow(clippy::missing_const_for_fn)]
    pub fn set_transmit_serial_number(&mut self, enabled: bool) {
        self.transmit_serial_number = enabled;
    }

    /// Packets waiting to be read by the program.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.rx_queue.len()
    }

    /// Offers a packet to the receive queue.
    ///
    /// Returns `false` when the queue is full and the packet was dropped.
    pub fn receive_packet(&mut self, packet: RadioPacket) -> bool {
        if self.rx_queue.len() >= RADIO_MAX_PACKETS {
            return false;
        }
        self.rx_queue.push_back(packet);
        true
    }

    /// Takes the oldest queued packet and remembers it as the last received.
    pub fn take_packet(&mut self) -> Option<&RadioPacket> {
        let packet = self.rx_queue.pop_front()?;
        self.last_received = Some(packet);
        self.last_received.as_ref()
    }

    /// Packet most recently taken by the program.
    #[must_use]
    pub const fn last_received(&self) -> Option<&RadioPacket> {
        self.last_received.as_ref()
    }
}
