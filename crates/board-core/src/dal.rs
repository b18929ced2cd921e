//! Device and event identifiers shared with the simulated program's runtime.
//!
//! Values mirror the board's device abstraction layer so bus events raised
//! here are understood by the interpreter draining the queue.

/// Button A device id.
pub const ID_BUTTON_A: u16 = 1;
/// Button B device id.
pub const ID_BUTTON_B: u16 = 2;
/// Reset button device id.
pub const ID_BUTTON_RESET: u16 = 3;
/// Accelerometer device id.
pub const ID_ACCELEROMETER: u16 = 4;
/// Compass device id.
pub const ID_COMPASS: u16 = 5;
/// Display device id.
pub const ID_DISPLAY: u16 = 6;

/// Edge connector pin `P0` device id.
pub const ID_IO_P0: u8 = 7;
/// Edge connector pin `P1` device id.
pub const ID_IO_P1: u8 = 8;
/// Edge connector pin `P2` device id.
pub const ID_IO_P2: u8 = 9;
/// Edge connector pin `P3` device id.
pub const ID_IO_P3: u8 = 10;
/// Edge connector pin `P4` device id.
pub const ID_IO_P4: u8 = 11;
/// Edge connector pin `P5` device id.
pub const ID_IO_P5: u8 = 12;
/// Edge connector pin `P6` device id.
pub const ID_IO_P6: u8 = 13;
/// Edge connector pin `P7` device id.
pub const ID_IO_P7: u8 = 14;
/// Edge connector pin `P8` device id.
pub const ID_IO_P8: u8 = 15;
/// Edge connector pin `P9` device id.
pub const ID_IO_P9: u8 = 16;
/// Edge connector pin `P10` device id.
pub const ID_IO_P10: u8 = 17;
/// Edge connector pin `P11` device id.
pub const ID_IO_P11: u8 = 18;
/// Edge connector pin `P12` device id.
pub const ID_IO_P12: u8 = 19;
/// Edge connector pin `P13` device id.
pub const ID_IO_P13: u8 = 20;
/// Edge connector pin `P14` device id.
pub const ID_IO_P14: u8 = 21;
/// Edge connector pin `P15` device id.
pub const ID_IO_P15: u8 = 22;
/// Edge connector pin `P16` device id.
pub const ID_IO_P16: u8 = 23;
/// Edge connector pin `P19` device id.
pub const ID_IO_P19: u8 = 24;
/// Edge connector pin `P20` device id.
pub const ID_IO_P20: u8 = 25;

/// Combined A+B button device id.
pub const ID_BUTTON_AB: u16 = 26;
/// Gesture detector device id.
pub const ID_GESTURE: u16 = 27;
/// Thermometer device id.
pub const ID_THERMOMETER: u16 = 28;
/// Radio device id.
pub const ID_RADIO: u16 = 29;
/// Radio data-ready device id.
pub const ID_RADIO_DATA_READY: u16 = 30;
/// Serial device id.
pub const ID_SERIAL: u16 = 32;
/// Microphone device id.
pub const ID_MICROPHONE: u16 = 3001;

/// Button released event.
pub const BUTTON_EVT_UP: u16 = 2;
/// Button clicked event.
pub const BUTTON_EVT_CLICK: u16 = 3;
/// Radio datagram received event.
pub const RADIO_EVT_DATAGRAM: u16 = 1;
