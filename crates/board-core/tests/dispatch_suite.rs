//! Inbound transport routing coverage.

#![allow(clippy::pedantic, clippy::nursery, clippy::too_many_lines)]

use board_core::{
    dal, dispatch, DispatchOutcome, EventRecord, InboundMessage, RadioPacket, RadioPayload,
    Simulator, RADIO_MAX_PACKETS,
};
use log as _;
use proptest::prelude::*;
use rstest::rstest;
use serde as _;
use serde_json::json;
use thiserror as _;

fn live() -> Simulator {
    let mut simulator = Simulator::new();
    simulator.initialize_default().expect("initialize");
    simulator
}

fn event(id: i64, event_id: i64, value: i64) -> InboundMessage {
    InboundMessage::EventBus {
        id,
        event_id,
        value,
    }
}

fn radio_packet(number: f64) -> InboundMessage {
    InboundMessage::RadioPacket(RadioPacket {
        rssi: -42,
        serial: 7,
        time: 1.0,
        payload: RadioPayload {
            kind: 0,
            group_id: 1,
            number_data: Some(number),
            ..RadioPayload::default()
        },
    })
}

#[test]
fn bus_events_arrive_in_dispatch_order() {
    let mut simulator = live();
    assert_eq!(simulator.dispatch(event(1, 2, 3)), DispatchOutcome::EventQueued);
    assert_eq!(simulator.dispatch(event(4, 5, 6)), DispatchOutcome::EventQueued);

    let board = simulator.board_mut().expect("board");
    let drained: Vec<_> = board.event_bus_mut().drain().collect();
    assert_eq!(
        drained,
        vec![EventRecord::new(1, 2, 3), EventRecord::new(4, 5, 6)]
    );
}

#[test]
fn serial_chunks_concatenate() {
    let mut simulator = live();
    simulator.dispatch(InboundMessage::Serial {
        data: Some("hello".to_owned()),
    });
    simulator.dispatch(InboundMessage::Serial {
        data: Some("world".to_owned()),
    });

    let board = simulator.board_mut().expect("board");
    assert_eq!(board.peripherals().serial.rx_buffer(), "helloworld");
    assert!(board.event_bus().is_empty());
}

#[test]
fn serial_without_data_appends_nothing() {
    let mut simulator = live();
    assert_eq!(
        simulator.dispatch(InboundMessage::Serial { data: None }),
        DispatchOutcome::SerialBuffered { bytes: 0 }
    );
    assert_eq!(
        simulator
            .board()
            .expect("board")
            .peripherals()
            .serial
            .rx_buffer(),
        ""
    );
}

#[test]
fn radio_packet_raises_datagram_event() {
    let mut simulator = live();
    assert_eq!(simulator.dispatch(radio_packet(5.0)), DispatchOutcome::RadioQueued);

    let board = simulator.board_mut().expect("board");
    assert_eq!(
        board.event_bus().peek(),
        Some(&EventRecord::new(dal::ID_RADIO, dal::RADIO_EVT_DATAGRAM, 0))
    );
    let packet = board
        .peripherals_mut()
        .radio
        .take_packet()
        .expect("queued packet");
    assert_eq!(packet.payload.number_data, Some(5.0));
}

#[test]
fn radio_overflow_drops_without_bus_event() {
    let mut simulator = live();
    for n in 0..RADIO_MAX_PACKETS {
        assert_eq!(
            simulator.dispatch(radio_packet(n as f64)),
            DispatchOutcome::RadioQueued
        );
    }
    assert_eq!(
        simulator.dispatch(radio_packet(99.0)),
        DispatchOutcome::RadioDropped
    );

    let board = simulator.board().expect("board");
    assert_eq!(board.event_bus().len(), RADIO_MAX_PACKETS);
    assert_eq!(board.peripherals().radio.pending(), RADIO_MAX_PACKETS);
}

#[rstest]
#[case(r#"{ "type": "screenshot" }"#)]
#[case(r#"{ "type": "custom", "payload": [1, 2, 3] }"#)]
#[case(r#"{ "id": 1, "eventid": 2 }"#)]
#[case(r#"[1, 2, 3]"#)]
fn unknown_kinds_leave_state_untouched(#[case] raw: &str) {
    let mut simulator = live();
    let before = simulator.board().expect("board").peripherals().clone();

    let message = InboundMessage::from_json_str(raw).expect("decodes");
    assert_eq!(simulator.dispatch(message), DispatchOutcome::Ignored);

    let board = simulator.board().expect("board");
    assert_eq!(board.peripherals(), &before);
    assert!(board.event_bus().is_empty());
}

#[rstest]
#[case(event(1, 2, 3))]
#[case(InboundMessage::Serial { data: Some("x".to_owned()) })]
#[case(radio_packet(1.0))]
#[case(InboundMessage::Unknown)]
fn dead_runtime_ignores_every_shape(#[case] message: InboundMessage) {
    let mut simulator = live();
    simulator.board_mut().expect("board").kill();
    let before = simulator.board().expect("board").peripherals().clone();

    assert_eq!(simulator.dispatch(message), DispatchOutcome::Ignored);

    let board = simulator.board().expect("board");
    assert_eq!(board.peripherals(), &before);
    assert!(board.event_bus().is_empty());
}

#[rstest]
#[case(json!({ "type": "eventbus", "id": -1, "eventid": 2, "value": 3 }), EventRecord::new(-1, 2, 3))]
#[case(json!({ "type": "eventbus", "id": 70_000, "eventid": 65_536 }), EventRecord::new(70_000, 65_536, 0))]
#[case(
    json!({ "type": "eventbus", "id": 1, "eventid": -7, "value": 3_000_000_000_u64 }),
    EventRecord::new(1, -7, 3_000_000_000_i64)
)]
#[case(json!({ "type": "eventbus", "id": 1, "eventid": 2, "value": -2.75 }), EventRecord::new(1, 2, -2))]
fn eventbus_accepts_any_wire_integer(
    #[case] raw: serde_json::Value,
    #[case] expected: EventRecord,
) {
    let mut simulator = live();
    let message = InboundMessage::from_json_value(raw).expect("decodes");

    assert_eq!(simulator.dispatch(message), DispatchOutcome::EventQueued);
    assert_eq!(
        simulator.board().expect("board").event_bus().peek(),
        Some(&expected)
    );
}

#[test]
fn missing_runtime_ignores_messages() {
    let mut simulator = Simulator::new();
    assert_eq!(simulator.dispatch(event(1, 1, 1)), DispatchOutcome::Ignored);
    assert_eq!(dispatch(None, radio_packet(0.0)), DispatchOutcome::Ignored);
}

#[test]
fn wire_json_routes_through_the_same_path() {
    let mut simulator = live();
    let message = InboundMessage::from_json_value(json!({
        "type": "eventbus",
        "id": dal::ID_BUTTON_A,
        "eventid": dal::BUTTON_EVT_CLICK,
    }))
    .expect("decodes");

    simulator.dispatch(message);

    assert_eq!(
        simulator.board().expect("board").event_bus().peek(),
        Some(&EventRecord::new(dal::ID_BUTTON_A, dal::BUTTON_EVT_CLICK, 0))
    );
}

proptest! {
    #[test]
    fn bus_preserves_arbitrary_sequences(
        records in proptest::collection::vec((any::<i64>(), any::<i64>(), any::<i64>()), 0..32)
    ) {
        let mut simulator = live();
        for &(id, event_id, value) in &records {
            simulator.dispatch(event(id, event_id, value));
        }

        let board = simulator.board_mut().expect("board");
        let drained: Vec<_> = board
            .event_bus_mut()
            .drain()
            .map(|record| (record.source_id, record.event_id, record.value))
            .collect();
        prop_assert_eq!(drained, records);
    }

    #[test]
    fn serial_buffer_is_the_concatenation(chunks in proptest::collection::vec(".{0,8}", 0..8)) {
        let mut simulator = live();
        for chunk in &chunks {
            simulator.dispatch(InboundMessage::Serial { data: Some(chunk.clone()) });
        }
        let board = simulator.board().expect("board");
        prop_assert_eq!(board.peripherals().serial.rx_buffer(), chunks.concat());
    }
}
