//! Board runtime aggregate and the per-run simulator context.
//!
//! A [`Simulator`] holds at most one live [`BoardRuntime`]. All peripheral,
//! pin and light-strip state is reachable only through that runtime, and is
//! dropped with it as a unit.

use std::fmt;

use serde::Serialize;

use crate::{
    dispatch, BoardError, BoardTopology, Binding, Button, DispatchOutcome, ErrorOverlay, EventBus,
    FactoryKind, FaultHandler, FileSystemState, InboundMessage, LightStateStore, LightStripState,
    OverlayState, OverlayTransition, Part, PeripheralKind, PeripheralMut, PeripheralRegistry,
    Peripherals, Pin, PinId, ProgramFault, RunConfig, SadFaceOverlay, ViewAttachment, ViewHost,
    ViewRequest, VIEW_MAX_EXTENT,
};

/// Runtime state of one simulated board.
pub struct BoardRuntime {
    topology: BoardTopology,
    pub(crate) bus: EventBus,
    pub(crate) peripherals: Peripherals,
    registry: PeripheralRegistry,
    lights: LightStateStore,
    file_system: FileSystemState,
    overlay: ErrorOverlay,
    fault_handler: Box<dyn FaultHandler>,
    pub(crate) dead: bool,
    view: Option<ViewAttachment>,
}

impl fmt::Debug for BoardRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoardRuntime")
            .field("bus", &self.bus)
            .field("peripherals", &self.peripherals)
            .field("registry", &self.registry)
            .field("lights", &self.lights.len())
            .field("overlay", &self.overlay)
            .field("dead", &self.dead)
            .field("view", &self.view)
            .finish_non_exhaustive()
    }
}

/// Serializable per-frame view of a runtime.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSnapshot<'a> {
    /// Eagerly built peripherals.
    pub peripherals: &'a Peripherals,
    /// Light strips created so far.
    pub light_strips: &'a LightStateStore,
    /// Overlay state.
    pub overlay: OverlayState,
    /// Whether the run was killed.
    pub dead: bool,
    /// Bus records not yet drained.
    pub pending_events: usize,
}

impl BoardRuntime {
    fn new(topology: BoardTopology, fault_handler: Box<dyn FaultHandler>) -> Result<Self, BoardError> {
        topology.validate()?;
        log::info!(
            "building board runtime: {} edge connector slots, {} servo aliases",
            topology.pin_count(),
            topology.servos.len()
        );

        Ok(Self {
            bus: EventBus::new(),
            peripherals: Peripherals::from_topology(&topology),
            registry: PeripheralRegistry::with_builtin_parts(),
            lights: LightStateStore::new(),
            file_system: FileSystemState::new(),
            overlay: ErrorOverlay::new(),
            fault_handler,
            dead: false,
            view: None,
            topology,
        })
    }

    /// Topology the runtime was built from.
    #[must_use]
    pub const fn topology(&self) -> &BoardTopology {
        &self.topology
    }

    /// Pending bus records.
    #[must_use]
    pub const fn event_bus(&self) -> &EventBus {
        &self.bus
    }

    /// Bus handle for the interpreter draining records.
    #[allow(clippy::missing_const_for_fn)]
    pub fn event_bus_mut(&mut self) -> &mut EventBus {
        &mut self.bus
    }

    /// Eagerly built peripherals.
    #[must_use]
    pub const fn peripherals(&self) -> &Peripherals {
        &self.peripherals
    }

    /// Mutable peripherals for the simulated program.
    #[allow(clippy::missing_const_for_fn)]
    pub fn peripherals_mut(&mut self) -> &mut Peripherals {
        &mut self.peripherals
    }

    /// Holds a button down.
    pub fn press_button(&mut self, which: Button) {
        self.peripherals.button_pair.press(which);
    }

    /// Lets a button go, raising its `up` and `click` bus events.
    pub fn release_button(&mut self, which: Button) {
        self.peripherals.button_pair.release(which, &mut self.bus);
    }

    /// Kind-to-binding table.
    #[must_use]
    pub const fn registry(&self) -> &PeripheralRegistry {
        &self.registry
    }

    /// Mutable kind-to-binding table.
    #[allow(clippy::missing_const_for_fn)]
    pub fn registry_mut(&mut self) -> &mut PeripheralRegistry {
        &mut self.registry
    }

    /// Light strips created so far.
    #[must_use]
    pub const fn light_store(&self) -> &LightStateStore {
        &self.lights
    }

    /// Strip wired to `pin`, created on first use.
    pub fn light_strip(&mut self, pin: PinId) -> &mut LightStripState {
        self.lights.get_or_create(pin)
    }

    /// Strip wired to `pin`, if one was created.
    #[must_use]
    pub fn try_light_strip(&self, pin: PinId) -> Option<&LightStripState> {
        self.lights.try_get(pin)
    }

    /// Persistent file store.
    #[must_use]
    pub const fn file_system(&self) -> &FileSystemState {
        &self.file_system
    }

    /// Mutable persistent file store.
    #[allow(clippy::missing_const_for_fn)]
    pub fn file_system_mut(&mut self) -> &mut FileSystemState {
        &mut self.file_system
    }

    /// Overlay latch.
    #[must_use]
    pub const fn overlay(&self) -> &ErrorOverlay {
        &self.overlay
    }

    /// Returns `true` once the run was killed.
    #[must_use]
    pub const fn is_dead(&self) -> bool {
        self.dead
    }

    /// Marks the run dead; later messages are ignored.
    pub fn kill(&mut self) {
        if !self.dead {
            log::info!("board runtime killed");
        }
        self.dead = true;
    }

    /// Shows a program fault through the fault handler.
    ///
    /// The overlay latches on the first fault. Later faults redraw the same
    /// glyph and leave the overlay as it was.
    pub fn post_error(&mut self, fault: &ProgramFault) -> OverlayTransition {
        let transition = self.overlay.latch();
        match transition {
            OverlayTransition::Entered => log::error!("program fault: {}", fault.message),
            OverlayTransition::AlreadyActive => {
                log::debug!("program fault while overlay active: {}", fault.message);
            }
        }
        self.fault_handler
            .on_program_fault(&mut self.peripherals.led_matrix, fault, transition);
        transition
    }

    /// Resolves a pin identifier on this board's edge connector.
    #[must_use]
    pub fn resolve_pin(&self, identifier: &str) -> Option<&Pin> {
        crate::resolve_pin(&self.peripherals.edge_connector, identifier)
    }

    /// Mutable variant of [`Self::resolve_pin`].
    pub fn resolve_pin_mut(&mut self, identifier: &str) -> Option<&mut Pin> {
        crate::resolve_pin_mut(&mut self.peripherals.edge_connector, identifier)
    }

    /// Resolves a pin identifier, treating unbonded slots as unresolved.
    #[must_use]
    pub fn resolve_connected_pin(&self, identifier: &str) -> Option<&Pin> {
        self.resolve_pin(identifier).filter(|pin| pin.is_connected())
    }

    /// Resolves `kind` without a use-site parameter.
    #[must_use]
    pub fn part(&self, kind: PeripheralKind) -> Option<Part<'_>> {
        Some(match self.registry.resolve(kind)? {
            Binding::Instance(slot) => Part::Instance(self.peripherals.slot(slot)),
            Binding::Factory(factory) => Part::Factory(factory),
        })
    }

    /// Resolves `kind` for mutation, invoking factories with `pin`.
    ///
    /// A factory called without a pin id uses the topology's default light
    /// pin.
    pub fn part_mut(&mut self, kind: PeripheralKind, pin: Option<PinId>) -> Option<PeripheralMut<'_>> {
        Some(match self.registry.resolve(kind)? {
            Binding::Instance(slot) => self.peripherals.slot_mut(slot),
            Binding::Factory(FactoryKind::LightStrip) => {
                let pin = pin.unwrap_or(self.topology.default_light_pin);
                PeripheralMut::LightStrip(self.lights.get_or_create(pin))
            }
        })
    }

    /// Resolves `kind` wired to the pin named by `pin_identifier`.
    ///
    /// Unresolvable identifiers yield `None`; unbonded slots fall back to
    /// the default light pin as in [`Self::part_mut`].
    pub fn attach_part(
        &mut self,
        kind: PeripheralKind,
        pin_identifier: &str,
    ) -> Option<PeripheralMut<'_>> {
        let pin = self.resolve_pin(pin_identifier)?.id();
        self.part_mut(kind, pin)
    }

    /// Hands the run configuration to the view layer.
    ///
    /// No peripheral state changes; only the attachment record does.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::ViewAttach`] when the host fails to mount.
    pub fn attach_view<H: ViewHost + ?Sized>(
        &mut self,
        host: &mut H,
        config: &RunConfig,
    ) -> Result<ViewAttachment, BoardError> {
        let request = ViewRequest {
            state: &self.peripherals,
            light_strips: &self.lights,
            visual: config.visual(),
            board_definition: &config.board_definition,
            parts_list: &config.parts,
            part_defs: &config.part_definitions,
            fn_args: &config.fn_args,
            max_width: VIEW_MAX_EXTENT,
            max_height: VIEW_MAX_EXTENT,
            high_contrast: config.high_contrast,
        };
        host.mount(&request).map_err(BoardError::ViewAttach)?;

        let attachment = ViewAttachment {
            generation: self.view.map_or(0, |view| view.generation.wrapping_add(1)),
            part_count: config.parts.len(),
            high_contrast: config.high_contrast,
        };
        log::debug!("view attached: {attachment:?}");
        self.view = Some(attachment);
        Ok(attachment)
    }

    /// Latest view attachment.
    #[must_use]
    pub const fn view(&self) -> Option<ViewAttachment> {
        self.view
    }

    /// Per-frame view for renderers that copy state.
    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot<'_> {
        BoardSnapshot {
            peripherals: &self.peripherals,
            light_strips: &self.lights,
            overlay: self.overlay.state(),
            dead: self.dead,
            pending_events: self.bus.len(),
        }
    }
}

/// Per-run context owning the board runtime.
#[derive(Debug, Default)]
pub struct Simulator {
    board: Option<BoardRuntime>,
}

impl Simulator {
    /// Creates a context with no runtime.
    #[must_use]
    pub const fn new() -> Self {
        Self { board: None }
    }

    /// Builds the runtime for this run.
    ///
    /// A dead runtime left over from an earlier run is superseded.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::AlreadyInitialized`] while a live runtime
    /// exists, and [`BoardError::InvalidTopology`] when `topology` fails
    /// validation.
    pub fn initialize(
        &mut self,
        topology: BoardTopology,
        fault_handler: Box<dyn FaultHandler>,
    ) -> Result<&mut BoardRuntime, BoardError> {
        if self.board.as_ref().is_some_and(|board| !board.is_dead()) {
            return Err(BoardError::AlreadyInitialized);
        }
        let board = BoardRuntime::new(topology, fault_handler)?;
        if self.board.take().is_some() {
            log::info!("superseding dead board runtime");
        }
        Ok(self.board.insert(board))
    }

    /// Builds a micro:bit runtime with the sad-face fault overlay.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::AlreadyInitialized`] while a live runtime
    /// exists.
    pub fn initialize_default(&mut self) -> Result<&mut BoardRuntime, BoardError> {
        self.initialize(BoardTopology::microbit(), Box::new(SadFaceOverlay))
    }

    /// Active runtime.
    #[must_use]
    pub const fn board(&self) -> Option<&BoardRuntime> {
        self.board.as_ref()
    }

    /// Mutable active runtime.
    #[allow(clippy::missing_const_for_fn)]
    pub fn board_mut(&mut self) -> Option<&mut BoardRuntime> {
        self.board.as_mut()
    }

    /// Drops the runtime from the context, returning it.
    pub fn discard(&mut self) -> Option<BoardRuntime> {
        self.board.take()
    }

    /// Routes a transport message to the runtime, if any.
    pub fn dispatch(&mut self, message: InboundMessage) -> DispatchOutcome {
        dispatch(self.board.as_mut(), message)
    }
}
