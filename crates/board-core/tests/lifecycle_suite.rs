//! Runtime lifecycle, fault overlay and view hand-off coverage.

#![allow(clippy::pedantic, clippy::nursery, clippy::too_many_lines)]

use std::cell::Cell;
use std::rc::Rc;

use board_core::{
    dal, BoardError, BoardTopology, Button, EventRecord, FaultHandler, InboundMessage,
    LedMatrixState, OverlayState, OverlayTransition, Part, PeripheralKind, PeripheralRef, PinId,
    ProgramFault, RunConfig, SadFaceOverlay, Simulator, ViewHost, ViewRequest, MAX_LEVEL,
    SAD_FACE_PIXELS,
};
use log as _;
use proptest as _;
use rstest::rstest;
use serde as _;
use serde_json::json;
use thiserror as _;

#[derive(Default)]
struct RecordingHost {
    mounts: Vec<serde_json::Value>,
    refuse: bool,
}

impl ViewHost for RecordingHost {
    fn mount(&mut self, request: &ViewRequest<'_>) -> Result<(), String> {
        if self.refuse {
            return Err("no container element".to_owned());
        }
        self.mounts
            .push(serde_json::to_value(request).map_err(|err| err.to_string())?);
        Ok(())
    }
}

struct CountingHandler {
    calls: Rc<Cell<u32>>,
}

impl FaultHandler for CountingHandler {
    fn on_program_fault(
        &mut self,
        display: &mut LedMatrixState,
        fault: &ProgramFault,
        transition: OverlayTransition,
    ) {
        self.calls.set(self.calls.get() + 1);
        assert!(!fault.message.is_empty());
        if transition == OverlayTransition::Entered {
            SadFaceOverlay.on_program_fault(display, fault, transition);
        }
    }
}

fn live() -> Simulator {
    let mut simulator = Simulator::new();
    simulator.initialize_default().expect("initialize");
    simulator
}

#[test]
fn second_initialize_reports_already_initialized() {
    let mut simulator = live();
    let err = simulator
        .initialize(BoardTopology::microbit(), Box::new(SadFaceOverlay))
        .expect_err("live runtime present");
    assert!(matches!(err, BoardError::AlreadyInitialized));
    assert!(err.to_string().contains("already active"));
}

#[test]
fn contexts_are_independent() {
    let mut first = live();
    let second = live();

    first
        .board_mut()
        .expect("board")
        .light_strip(PinId::new(dal::ID_IO_P1));

    assert_eq!(first.board().expect("board").light_store().len(), 1);
    assert!(second.board().expect("board").light_store().is_empty());
}

#[test]
fn sad_face_overlay_after_fault() {
    let mut simulator = live();
    let board = simulator.board_mut().expect("board");
    board.peripherals_mut().led_matrix.set_brightness(3);
    board.peripherals_mut().led_matrix.image_mut().set(2, 2, 9);

    assert_eq!(
        board.post_error(&ProgramFault::new("division by zero")),
        OverlayTransition::Entered
    );

    let display = &board.peripherals().led_matrix;
    assert_eq!(display.brightness(), MAX_LEVEL);
    assert_eq!(display.image().lit_pixels().count(), SAD_FACE_PIXELS.len());
    assert_eq!(display.image().get(2, 2), 0);
    assert!(display.refresh_pending());
    assert_eq!(board.overlay().state(), OverlayState::Error);
}

#[test]
fn repeated_faults_match_a_single_fault() {
    let mut once = live();
    once.board_mut()
        .expect("board")
        .post_error(&ProgramFault::new("first"));

    let mut twice = live();
    let board = twice.board_mut().expect("board");
    board.post_error(&ProgramFault::new("first"));
    assert_eq!(
        board.post_error(&ProgramFault::new("second")),
        OverlayTransition::AlreadyActive
    );

    assert_eq!(
        once.board().expect("board").peripherals(),
        twice.board().expect("board").peripherals()
    );
}

#[test]
fn custom_fault_handler_sees_every_fault() {
    let calls = Rc::new(Cell::new(0));
    let mut simulator = Simulator::new();
    let board = simulator
        .initialize(
            BoardTopology::microbit(),
            Box::new(CountingHandler {
                calls: Rc::clone(&calls),
            }),
        )
        .expect("initialize");

    board.post_error(&ProgramFault::new("a"));
    board.post_error(&ProgramFault::new("b"));

    assert_eq!(calls.get(), 2);
    assert_eq!(
        board.peripherals().led_matrix.image().lit_pixels().count(),
        SAD_FACE_PIXELS.len()
    );
}

#[test]
fn killed_runtime_can_be_replaced() {
    let mut simulator = live();
    simulator.board_mut().expect("board").kill();
    simulator.dispatch(InboundMessage::Serial {
        data: Some("late".to_owned()),
    });

    let board = simulator.initialize_default().expect("replaces dead run");
    assert_eq!(board.peripherals().serial.rx_buffer(), "");
}

#[test]
fn invalid_topology_json_is_rejected() {
    let err = BoardTopology::from_json_str(r#"{ "pins": [7, 7] }"#).expect_err("duplicate ids");
    assert!(matches!(err, BoardError::InvalidTopology(_)));

    let err = BoardTopology::from_json_str("not json").expect_err("malformed");
    assert!(matches!(err, BoardError::TopologyDecode(_)));
}

#[test]
fn button_release_queues_up_then_click() {
    let mut simulator = live();
    let board = simulator.board_mut().expect("board");
    board.press_button(Button::A);
    assert!(board.peripherals().button_pair.button(Button::A).pressed);
    assert!(board.event_bus().is_empty());

    board.release_button(Button::A);

    assert!(!board.peripherals().button_pair.button(Button::A).pressed);
    let drained: Vec<_> = board.event_bus_mut().drain().collect();
    assert_eq!(
        drained,
        vec![
            EventRecord::new(dal::ID_BUTTON_A, dal::BUTTON_EVT_UP, 0),
            EventRecord::new(dal::ID_BUTTON_A, dal::BUTTON_EVT_CLICK, 0),
        ]
    );
}

#[test]
fn attach_view_passes_config_and_leaves_state_alone() {
    let mut simulator = live();
    let board = simulator.board_mut().expect("board");
    let before = board.peripherals().clone();

    let config: RunConfig = serde_json::from_value(json!({
        "boardDefinition": { "visual": "microbit" },
        "parts": ["neopixel", "microservo"],
        "highContrast": true
    }))
    .expect("run config");

    let mut host = RecordingHost::default();
    let first = board.attach_view(&mut host, &config).expect("mounted");
    let second = board.attach_view(&mut host, &config).expect("remounted");

    assert_eq!(first.generation, 0);
    assert_eq!(second.generation, 1);
    assert_eq!(first.part_count, 2);
    assert!(second.high_contrast);
    assert_eq!(board.view(), Some(second));
    assert_eq!(board.peripherals(), &before);

    let mounted = &host.mounts[0];
    assert_eq!(mounted["visual"], "microbit");
    assert_eq!(mounted["maxWidth"], "100%");
    assert_eq!(mounted["maxHeight"], "100%");
    assert_eq!(mounted["partsList"], json!(["neopixel", "microservo"]));
    assert_eq!(mounted["highContrast"], true);
}

#[test]
fn refused_mount_is_a_view_error() {
    let mut simulator = live();
    let board = simulator.board_mut().expect("board");
    let mut host = RecordingHost {
        refuse: true,
        ..RecordingHost::default()
    };

    let err = board
        .attach_view(&mut host, &RunConfig::default())
        .expect_err("refused");
    assert!(matches!(err, BoardError::ViewAttach(_)));
    assert!(board.view().is_none());
}

#[rstest]
#[case("ledmatrix", PeripheralKind::LedMatrix)]
#[case("edgeconnector", PeripheralKind::EdgeConnector)]
#[case("microservo", PeripheralKind::MicroServo)]
fn part_kinds_resolve_to_eager_state(#[case] name: &str, #[case] kind: PeripheralKind) {
    let simulator = live();
    let board = simulator.board().expect("board");
    assert_eq!(PeripheralKind::from_name(name), Some(kind));
    assert!(matches!(board.part(kind), Some(Part::Instance(_))));
}

#[test]
fn edge_connector_and_microservo_share_state() {
    let simulator = live();
    let board = simulator.board().expect("board");
    let Some(Part::Instance(PeripheralRef::EdgeConnector(edge))) =
        board.part(PeripheralKind::EdgeConnector)
    else {
        panic!("edge connector should be an instance");
    };
    let Some(Part::Instance(PeripheralRef::EdgeConnector(servo))) =
        board.part(PeripheralKind::MicroServo)
    else {
        panic!("microservo should be an instance");
    };
    assert!(std::ptr::eq(edge, servo));
}
