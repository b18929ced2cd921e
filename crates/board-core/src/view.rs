//! Hand-off to the external view layer.
//!
//! The core never renders. It packages the run configuration together with
//! read-only references to board state and gives them to a [`ViewHost`],
//! which builds the presentation surface and replaces whatever the page was
//! showing before.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{LightStateStore, Peripherals};

/// Width and height hint handed to the view layer.
pub const VIEW_MAX_EXTENT: &str = "100%";

/// Board and parts description sent with a run request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RunConfig {
    /// Opaque board definition; only its `visual` field is picked out here.
    pub board_definition: Value,
    /// Names of the parts wired to the board.
    pub parts: Vec<String>,
    /// Opaque part definitions by name.
    pub part_definitions: Map<String, Value>,
    /// Opaque per-part function arguments.
    pub fn_args: Value,
    /// Use the high-contrast theme.
    pub high_contrast: bool,
}

impl RunConfig {
    /// Board visual description, when the definition carries one.
    #[must_use]
    pub fn visual(&self) -> Option<&Value> {
        self.board_definition.get("visual")
    }
}

/// Everything a view host needs to mount a board.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewRequest<'a> {
    /// Board state the view reads every frame.
    pub state: &'a Peripherals,
    /// Light strips created so far.
    pub light_strips: &'a LightStateStore,
    /// Board visual description.
    pub visual: Option<&'a Value>,
    /// Opaque board definition.
    pub board_definition: &'a Value,
    /// Wired part names.
    pub parts_list: &'a [String],
    /// Opaque part definitions.
    pub part_defs: &'a Map<String, Value>,
    /// Opaque per-part function arguments.
    pub fn_args: &'a Value,
    /// Maximum width hint.
    pub max_width: &'static str,
    /// Maximum height hint.
    pub max_height: &'static str,
    /// High-contrast theme.
    pub high_contrast: bool,
}

/// External presentation layer.
pub trait ViewHost {
    /// Builds a presentation surface for `request`, replacing existing
    /// host display content.
    ///
    /// # Errors
    ///
    /// Returns a host-specific description when mounting failed.
    fn mount(&mut self, request: &ViewRequest<'_>) -> Result<(), String>;
}

/// Record of a completed view attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewAttachment {
    /// Increments every time the board is re-attached.
    pub generation: u32,
    /// Number of wired parts handed to the view.
    pub part_count: usize,
    /// High-contrast theme in use.
    pub high_contrast: bool,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::RunConfig;

    #[test]
    fn run_config_decodes_wire_names_with_defaults() {
        let config: RunConfig = serde_json::from_value(json!({
            "boardDefinition": { "visual": "microbit", "gpioPinBlocks": [] },
            "parts": ["neopixel"],
            "highContrast": true
        }))
        .expect("valid run config");

        assert_eq!(config.parts, vec!["neopixel".to_owned()]);
        assert!(config.high_contrast);
        assert!(config.part_definitions.is_empty());
        assert_eq!(config.visual(), Some(&json!("microbit")));
    }

    #[test]
    fn missing_visual_is_none() {
        assert!(RunConfig::default().visual().is_none());
    }
}
