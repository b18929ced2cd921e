//! Lazily created light strip states, one per pin id.
//!
//! Strips are not built with the board: the program attaches them to a pin
//! at run time. The store is the only owner of strip state; entries live
//! until the runtime is dropped.

use serde::ser::{Serialize, Serializer};

use crate::{LightStripState, PinId};

/// Number of addressable slots, one per possible [`PinId`].
pub const PIN_ID_SPACE: usize = u8::MAX as usize + 1;

/// Get-or-insert cache of [`LightStripState`] keyed by pin id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightStateStore {
    slots: Box<[Option<LightStripState>]>,
    created: usize,
}

impl Default for LightStateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LightStateStore {
    /// Creates a store with every slot vacant.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: std::iter::repeat_with(|| None).take(PIN_ID_SPACE).collect(),
            created: 0,
        }
    }

    /// Returns the strip on `pin`, creating it on first use.
    ///
    /// Repeated calls with the same id return the same instance.
    pub fn get_or_create(&mut self, pin: PinId) -> &mut LightStripState {
        let slot = &mut self.slots[pin.index()];
        if slot.is_none() {
            log::debug!("creating light strip state for pin id {pin}");
            self.created += 1;
        }
        slot.get_or_insert_with(LightStripState::new)
    }

    /// Returns the strip on `pin` without creating one.
    #[must_use]
    pub fn try_get(&self, pin: PinId) -> Option<&LightStripState> {
        self.slots[pin.index()].as_ref()
    }

    /// Number of strips created so far.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.created
    }

    /// Returns `true` when no strip has been created.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.created == 0
    }

    /// Created strips in pin-id order.
    pub fn iter(&self) -> impl Iterator<Item = (PinId, &LightStripState)> {
        (0..=u8::MAX)
            .zip(self.slots.iter())
            .filter_map(|(raw, slot)| slot.as_ref().map(|state| (PinId::new(raw), state)))
    }
}

impl Serialize for LightStateStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}
