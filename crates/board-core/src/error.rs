use thiserror::Error;

use crate::PinId;

/// Host-integration and configuration failures raised by the board runtime.
///
/// Conditions authored by the simulated program (bad pin names, unknown
/// messages, program faults) never surface here; they resolve to `None`,
/// are ignored, or engage the error overlay.
#[derive(Debug, Error)]
pub enum BoardError {
    /// A live runtime already occupies the simulator context.
    #[error("a board runtime is already active for this simulator context")]
    AlreadyInitialized,
    /// The static topology failed validation.
    #[error("invalid board topology: {0}")]
    InvalidTopology(#[from] TopologyError),
    /// The topology description could not be decoded.
    #[error("failed to decode board topology: {0}")]
    TopologyDecode(#[source] serde_json::Error),
    /// The external view layer refused the attachment.
    #[error("view attachment failed: {0}")]
    ViewAttach(String),
}

/// Structural problems in a [`crate::BoardTopology`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopologyError {
    /// The edge connector has no pins at all.
    #[error("edge connector must expose at least one pin")]
    EmptyEdgeConnector,
    /// The same device id is assigned to two pin slots.
    #[error("pin id {id} is assigned to both index {first} and index {second}")]
    DuplicatePinId {
        /// Duplicated device id.
        id: PinId,
        /// First index carrying the id.
        first: usize,
        /// Second index carrying the id.
        second: usize,
    },
    /// A servo alias names a pin id the edge connector does not expose.
    #[error("servo alias `{alias}` references pin id {id}, which is not on the edge connector")]
    DanglingServoAlias {
        /// Friendly alias name.
        alias: String,
        /// Referenced device id.
        id: PinId,
    },
    /// The default light pin is not part of the edge connector.
    #[error("default light pin id {0} is not on the edge connector")]
    UnknownDefaultLightPin(PinId),
}
