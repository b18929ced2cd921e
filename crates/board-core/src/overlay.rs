//! Terminal error overlay shown when the simulated program faults.
//!
//! The runtime latches [`OverlayState::Error`] on the first fault and never
//! leaves it. Drawing is delegated to a [`FaultHandler`] chosen when the
//! runtime is initialized; [`SadFaceOverlay`] is the stock one.

use serde::{Deserialize, Serialize};

use crate::{LedMatrixState, MAX_LEVEL};

/// Lit pixels of the sad-face glyph as `(x, y)`.
pub const SAD_FACE_PIXELS: [(usize, usize); 13] = [
    (0, 4),
    (1, 3),
    (2, 3),
    (3, 3),
    (4, 4),
    (0, 0),
    (1, 0),
    (0, 1),
    (1, 1),
    (3, 0),
    (4, 0),
    (3, 1),
    (4, 1),
];

/// Unrecoverable failure reported by the interpreter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramFault {
    /// Interpreter-supplied description.
    pub message: String,
}

impl ProgramFault {
    /// Creates a fault with a description.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Overlay state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OverlayState {
    /// No fault seen.
    #[default]
    Normal,
    /// A fault was shown; terminal for the run.
    Error,
}

/// What a trigger did to the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayTransition {
    /// First fault of the run.
    Entered,
    /// Overlay was already shown.
    AlreadyActive,
}

/// One-way latch from [`OverlayState::Normal`] to [`OverlayState::Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ErrorOverlay {
    state: OverlayState,
}

impl ErrorOverlay {
    /// Creates an overlay in the normal state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: OverlayState::Normal,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> OverlayState {
        self.state
    }

    /// Returns `true` once a fault was shown.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.state, OverlayState::Error)
    }

    /// Latches the error state.
    #[allow(clippy::missing_const_for_fn)]
    pub fn latch(&mut self) -> OverlayTransition {
        match std::mem::replace(&mut self.state, OverlayState::Error) {
            OverlayState::Normal => OverlayTransition::Entered,
            OverlayState::Error => OverlayTransition::AlreadyActive,
        }
    }
}

/// Callback invoked for every program fault.
///
/// Handlers must be idempotent: a second fault must leave the display as
/// the first one did.
pub trait FaultHandler {
    /// Presents `fault` on the display.
    fn on_program_fault(
        &mut self,
        display: &mut LedMatrixState,
        fault: &ProgramFault,
        transition: OverlayTransition,
    );
}

/// Stock handler: full brightness, sad face, forced refresh.
#[derive(Debug, Clone, Copy, Default)]
pub struct SadFaceOverlay;

impl FaultHandler for SadFaceOverlay {
    fn on_program_fault(
        &mut self,
        display: &mut LedMatrixState,
        _fault: &ProgramFault,
        _transition: OverlayTransition,
    ) {
        draw_sad_face(display);
    }
}

/// Draws the sad-face glyph over a cleared bitmap at full brightness.
pub fn draw_sad_face(display: &mut LedMatrixState) {
    display.set_brightness(MAX_LEVEL);
    let image = display.image_mut();
    image.clear();
    for (x, y) in SAD_FACE_PIXELS {
        image.set(x, y, MAX_LEVEL);
    }
    display.request_refresh();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latch_is_one_way() {
        let mut overlay = ErrorOverlay::new();
        assert!(!overlay.is_active());
        assert_eq!(overlay.latch(), OverlayTransition::Entered);
        assert_eq!(overlay.latch(), OverlayTransition::AlreadyActive);
        assert_eq!(overlay.state(), OverlayState::Error);
    }

    #[test]
    fn sad_face_replaces_existing_pixels() {
        let mut display = LedMatrixState::default();
        display.set_brightness(10);
        display.image_mut().set(2, 2, 255);

        draw_sad_face(&mut display);

        assert_eq!(display.brightness(), MAX_LEVEL);
        assert_eq!(display.image().get(2, 2), 0);
        assert_eq!(display.image().lit_pixels().count(), SAD_FACE_PIXELS.len());
        for (x, y) in SAD_FACE_PIXELS {
            assert_eq!(display.image().get(x, y), MAX_LEVEL);
        }
        assert!(display.refresh_pending());
    }

    #[test]
    fn redrawing_is_idempotent() {
        let mut once = LedMatrixState::default();
        draw_sad_face(&mut once);

        let mut twice = LedMatrixState::default();
        draw_sad_face(&mut twice);
        draw_sad_face(&mut twice);

        assert_eq!(once, twice);
    }
}
