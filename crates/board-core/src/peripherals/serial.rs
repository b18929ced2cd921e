//! Serial port buffers.

use serde::{Deserialize, Serialize};

/// Runtime state of the serial port.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerialState {
    rx_buffer: String,
    tx_buffer: String,
}

impl SerialState {
    /// Creates empty buffers.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rx_buffer: String::new(),
            tx_buffer: String::new(),
        }
    }

    /// Appends bytes delivered by the host.
    pub fn receive_data(&mut self, data: &str) {
        self.rx_buffer.push_str(data);
    }

    /// Received data not yet read by the program.
    #[must_use]
    pub fn rx_buffer(&self) -> &str {
        &self.rx_buffer
    }

    /// Reads and clears everything received so far.
    pub fn read_string(&mut self) -> String {
        std::mem::take(&mut self.rx_buffer)
    }

    /// Reads up to, and excluding, the first `delimiter`.
    ///
    /// The delimiter is consumed. Returns `None`, leaving the buffer intact,
    /// when no delimiter has arrived yet.
    pub fn read_until(&mut self, delimiter: char) -> Option<String> {
        let at = self.rx_buffer.find(delimiter)?;
        let rest = self.rx_buffer.split_off(at + delimiter.len_utf8());
        let mut line = std::mem::replace(&mut self.rx_buffer, rest);
        line.truncate(at);
        Some(line)
    }

    /// Queues program output for the host.
    pub fn write_string(&mut self, data: &str) {
        self.tx_buffer.push_str(data);
    }

    /// Takes program output the host has not forwarded yet.
    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.tx_buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::SerialState;

    #[test]
    fn received_chunks_concatenate_in_order() {
        let mut serial = SerialState::new();
        serial.receive_data("hello");
        serial.receive_data("world");
        assert_eq!(serial.rx_buffer(), "helloworld");
        assert_eq!(serial.read_string(), "helloworld");
        assert_eq!(serial.rx_buffer(), "");
    }

    #[test]
    fn read_until_splits_on_delimiter() {
        let mut serial = SerialState::new();
        serial.receive_data("ab,cd");
        assert_eq!(serial.read_until(',').as_deref(), Some("ab"));
        assert_eq!(serial.rx_buffer(), "cd");
        assert_eq!(serial.read_until(','), None);
        assert_eq!(serial.rx_buffer(), "cd");
    }

    #[test]
    fn read_until_handles_multibyte_delimiters() {
        let mut serial = SerialState::new();
        serial.receive_data("x→y");
        assert_eq!(serial.read_until('→').as_deref(), Some("x"));
        assert_eq!(serial.rx_buffer(), "y");
    }

    #[test]
    fn output_is_taken_once() {
        let mut serial = SerialState::new();
        serial.write_string("ping\n");
        assert_eq!(serial.take_output(), "ping\n");
        assert_eq!(serial.take_output(), "");
    }
}
