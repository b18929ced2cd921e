//! Inbound message decoding and routing.
//!
//! The page transport delivers JSON objects tagged by `type`. Known kinds
//! are routed to the bus, the serial receive buffer or the radio; every
//! other kind is accepted and ignored so newer hosts keep working.

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{BoardRuntime, RadioPacket};

/// Message delivered by the page transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InboundMessage {
    /// Raise an event on the bus.
    #[serde(rename = "eventbus")]
    EventBus {
        /// Source device id.
        #[serde(deserialize_with = "wire_int")]
        id: i64,
        /// Event code.
        #[serde(rename = "eventid", deserialize_with = "wire_int")]
        event_id: i64,
        /// Payload.
        #[serde(default, deserialize_with = "wire_int")]
        value: i64,
    },
    /// Bytes arriving on the serial port.
    #[serde(rename = "serial")]
    Serial {
        /// Received text; absent means nothing arrived.
        #[serde(default)]
        data: Option<String>,
    },
    /// Packet arriving over the radio.
    #[serde(rename = "radiopacket")]
    RadioPacket(RadioPacket),
    /// Any kind this board does not handle.
    #[serde(other)]
    Unknown,
}

impl InboundMessage {
    /// Decodes a transport message.
    ///
    /// Objects without a string `type`, and values that are not objects at
    /// all, decode to [`InboundMessage::Unknown`].
    ///
    /// # Errors
    ///
    /// Returns the decode error when a known `type` carries malformed fields.
    pub fn from_json_value(value: Value) -> Result<Self, serde_json::Error> {
        if value.get("type").and_then(Value::as_str).is_none() {
            return Ok(Self::Unknown);
        }
        serde_json::from_value(value)
    }

    /// Decodes a transport message from JSON text.
    ///
    /// # Errors
    ///
    /// Returns the decode error for malformed JSON or malformed known kinds.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        Self::from_json_value(serde_json::from_str(json)?)
    }

    /// Wire tag of the message, `None` for unknown kinds.
    #[must_use]
    pub const fn kind(&self) -> Option<&'static str> {
        match self {
            Self::EventBus { .. } => Some("eventbus"),
            Self::Serial { .. } => Some("serial"),
            Self::RadioPacket(_) => Some("radiopacket"),
            Self::Unknown => None,
        }
    }
}

/// Accepts any JSON number as an `i64`.
///
/// Integers past `i64` saturate; fractions truncate toward zero.
fn wire_int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    struct WireInt;

    impl Visitor<'_> for WireInt {
        type Value = i64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a number")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
            Ok(i64::try_from(v).unwrap_or(i64::MAX))
        }

        #[allow(clippy::cast_possible_truncation)]
        fn visit_f64<E: de::Error>(self, v: f64) -> Result<i64, E> {
            Ok(v as i64)
        }
    }

    deserializer.deserialize_any(WireInt)
}

/// Observable effect of one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DispatchOutcome {
    /// No runtime, a dead runtime, or an unhandled kind.
    Ignored,
    /// A record was appended to the bus.
    EventQueued,
    /// Text was appended to the serial receive buffer.
    SerialBuffered {
        /// Bytes appended.
        bytes: usize,
    },
    /// The radio accepted the packet and raised a datagram event.
    RadioQueued,
    /// The radio receive queue was full.
    RadioDropped,
}

/// Routes `message` into `runtime`; absent runtimes ignore everything.
pub fn dispatch(runtime: Option<&mut BoardRuntime>, message: InboundMessage) -> DispatchOutcome {
    runtime.map_or(DispatchOutcome::Ignored, |board| {
        board.receive_message(message)
    })
}

impl BoardRuntime {
    /// Routes one message, fully, before returning.
    pub fn receive_message(&mut self, message: InboundMessage) -> DispatchOutcome {
        if self.dead {
            log::debug!("dropping {:?} message for dead runtime", message.kind());
            return DispatchOutcome::Ignored;
        }

        match message {
            InboundMessage::EventBus {
                id,
                event_id,
                value,
            } => {
                self.bus.queue(id, event_id, value);
                DispatchOutcome::EventQueued
            }
            InboundMessage::Serial { data } => {
                let data = data.unwrap_or_default();
                self.peripherals.serial.receive_data(&data);
                DispatchOutcome::SerialBuffered { bytes: data.len() }
            }
            InboundMessage::RadioPacket(packet) => {
                let radio = &mut self.peripherals.radio;
                if radio.receive_packet(packet) {
                    let ids = radio.ids();
                    self.bus.queue(ids.id_radio, ids.evt_datagram, 0);
                    DispatchOutcome::RadioQueued
                } else {
                    log::warn!("radio receive queue full, dropping packet");
                    DispatchOutcome::RadioDropped
                }
            }
            InboundMessage::Unknown => {
                log::debug!("ignoring message of unhandled type");
                DispatchOutcome::Ignored
            }
        }
    }
}
