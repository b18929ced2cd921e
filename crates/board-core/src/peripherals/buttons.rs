//! Button A, button B and the virtual A+B button.

use serde::{Deserialize, Serialize};

use crate::{ButtonIds, EventBus};

/// Which of the three logical buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Button {
    /// Left button.
    A,
    /// Right button.
    B,
    /// Both at once.
    AB,
}

/// Pressed state and bus id of one button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonState {
    /// Bus source id.
    pub id: u16,
    /// Currently held down.
    pub pressed: bool,
}

impl ButtonState {
    const fn released(id: u16) -> Self {
        Self { id, pressed: false }
    }
}

/// Runtime state of the button pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonPairState {
    ids: ButtonIds,
    a: ButtonState,
    b: ButtonState,
    ab: ButtonState,
    uses_button_ab: bool,
}

impl Default for ButtonPairState {
    fn default() -> Self {
        Self::new(ButtonIds::default())
    }
}

impl ButtonPairState {
    /// Creates released buttons using `ids`.
    #[must_use]
    pub const fn new(ids: ButtonIds) -> Self {
        Self {
            ids,
            a: ButtonState::released(ids.button_a),
            b: ButtonState::released(ids.button_b),
            ab: ButtonState::released(ids.button_ab),
            uses_button_ab: false,
        }
    }

    /// Configured ids.
    #[must_use]
    pub const fn ids(&self) -> ButtonIds {
        self.ids
    }

    /// State of one button.
    #[must_use]
    pub const fn button(&self, which: Button) -> ButtonState {
        match which {
            Button::A => self.a,
            Button::B => self.b,
            Button::AB => self.ab,
        }
    }

    fn button_mut(&mut self, which: Button) -> &mut ButtonState {
        match which {
            Button::A => &mut self.a,
            Button::B => &mut self.b,
            Button::AB => &mut self.ab,
        }
    }

    /// Returns `true` once the program subscribed to the A+B button.
    #[must_use]
    pub const fn uses_button_ab(&self) -> bool {
        self.uses_button_ab
    }

    /// Records that the program reads the A+B button, so the view shows it.
    #[allow(clippy::missing_const_for_fn)]
    pub fn mark_button_ab_used(&mut self) {
        self.uses_button_ab = true;
    }

    /// Holds a button down.
    #[allow(clippy::missing_const_for_fn)]
    pub fn press(&mut self, which: Button) {
        self.button_mut(which).pressed = true;
    }

    /// Lets a button go, raising `up` then `click` on the bus.
    pub fn release(&mut self, which: Button, bus: &mut EventBus) {
        let button = self.button_mut(which);
        button.pressed = false;
        let id = button.id;
        bus.queue(id, self.ids.evt_up, 0);
        bus.queue(id, self.ids.evt_click, 0);
    }
}
