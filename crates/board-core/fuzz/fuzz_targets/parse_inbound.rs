#![no_main]

use board_core::{parse_pin_identifier, InboundMessage, PinIdentifier, Simulator};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(PinIdentifier::Indexed { index, .. }) = parse_pin_identifier(text) {
        assert!(text.contains(&index.to_string()));
    }

    let mut simulator = Simulator::new();
    if simulator.initialize_default().is_err() {
        return;
    }
    if let Some(board) = simulator.board() {
        if let Some(pin) = board.resolve_pin(text) {
            assert!(pin.index() < board.topology().pin_count());
        }
    }

    if let Ok(message) = InboundMessage::from_json_str(text) {
        let _ = simulator.dispatch(message);
    }
    let _ = serde_json::to_string(&simulator.board().map(|board| board.snapshot()));
});
