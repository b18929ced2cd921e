use board_core::{
    BoardRuntime, BoardTopology, DispatchOutcome, InboundMessage, OverlayTransition, ProgramFault,
    RunConfig, SadFaceOverlay, Simulator, ViewHost, ViewRequest,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{future_to_promise, JsFuture};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

macro_rules! console_log {
    ($($t:tt)*) => (log(&format!($($t)*)))
}

/// Forwards `log` records to the browser console.
struct ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record<'_>) {
        if self.enabled(record.metadata()) {
            console_log!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;

fn install_logger() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(log::LevelFilter::Info);
    }
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(JsValue::from)
}

fn js_error(message: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&message.to_string()).into()
}

const fn outcome_name(outcome: DispatchOutcome) -> &'static str {
    match outcome {
        DispatchOutcome::Ignored => "ignored",
        DispatchOutcome::EventQueued => "eventQueued",
        DispatchOutcome::SerialBuffered { .. } => "serialBuffered",
        DispatchOutcome::RadioQueued => "radioQueued",
        DispatchOutcome::RadioDropped => "radioDropped",
    }
}

/// View host backed by a page-supplied mount callback.
///
/// Whatever the callback returns is kept; a returned Promise marks when the
/// page finished mounting.
struct JsViewHost {
    mount: js_sys::Function,
    completion: JsValue,
}

impl JsViewHost {
    const fn new(mount: js_sys::Function) -> Self {
        Self {
            mount,
            completion: JsValue::UNDEFINED,
        }
    }
}

impl ViewHost for JsViewHost {
    fn mount(&mut self, request: &ViewRequest<'_>) -> Result<(), String> {
        let request = to_js(request).map_err(|err| format!("{err:?}"))?;
        self.completion = self
            .mount
            .call1(&JsValue::NULL, &request)
            .map_err(|err| format!("{err:?}"))?;
        Ok(())
    }
}

/// Resolves with `value` once `completion` (a Promise or plain value) settles.
fn after_mount(completion: &JsValue, value: JsValue) -> js_sys::Promise {
    let mounted = JsFuture::from(js_sys::Promise::resolve(completion));
    future_to_promise(async move {
        mounted.await?;
        Ok(value)
    })
}

#[wasm_bindgen]
pub struct WasmBoard {
    simulator: Simulator,
    topology: BoardTopology,
}

impl WasmBoard {
    fn start(&mut self) -> Result<(), JsValue> {
        self.simulator
            .initialize(self.topology.clone(), Box::new(SadFaceOverlay))
            .map(|_| ())
            .map_err(js_error)
    }

    fn runtime(&self) -> Result<&BoardRuntime, JsValue> {
        self.simulator
            .board()
            .ok_or_else(|| js_error("board is not initialized"))
    }

    fn runtime_mut(&mut self) -> Result<&mut BoardRuntime, JsValue> {
        self.simulator
            .board_mut()
            .ok_or_else(|| js_error("board is not initialized"))
    }
}

#[wasm_bindgen]
impl WasmBoard {
    /// Creates a board from an optional topology description in JSON.
    #[wasm_bindgen(constructor)]
    pub fn new(topology_json: Option<String>) -> Result<Self, JsValue> {
        console_error_panic_hook::set_once();
        install_logger();

        let topology = match topology_json {
            Some(json) => BoardTopology::from_json_str(&json).map_err(js_error)?,
            None => BoardTopology::microbit(),
        };
        let mut board = Self {
            simulator: Simulator::new(),
            topology,
        };
        board.start()?;
        console_log!("Board ready with {} pins", board.topology.pin_count());
        Ok(board)
    }

    /// Starts a fresh run, replacing a killed one.
    pub fn restart(&mut self) -> Result<(), JsValue> {
        self.start()
    }

    /// Routes one page message. Returns what the board did with it.
    ///
    /// Malformed messages are logged and ignored.
    pub fn receive_message(&mut self, message: JsValue) -> String {
        let decoded = serde_wasm_bindgen::from_value::<serde_json::Value>(message)
            .map_err(|err| err.to_string())
            .and_then(|value| {
                InboundMessage::from_json_value(value).map_err(|err| err.to_string())
            });
        let outcome = match decoded {
            Ok(message) => self.simulator.dispatch(message),
            Err(err) => {
                log::warn!("ignoring malformed message: {err}");
                DispatchOutcome::Ignored
            }
        };
        outcome_name(outcome).to_owned()
    }

    /// Shows a program fault. Returns `true` on the first fault of the run.
    pub fn post_error(&mut self, message: &str) -> Result<bool, JsValue> {
        let transition = self.runtime_mut()?.post_error(&ProgramFault::new(message));
        Ok(transition == OverlayTransition::Entered)
    }

    /// Stops the run; later messages are ignored.
    pub fn kill(&mut self) -> Result<(), JsValue> {
        self.runtime_mut()?.kill();
        Ok(())
    }

    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.simulator.board().is_none_or(BoardRuntime::is_dead)
    }

    /// Resolves a pin identifier; `null` when it names no pin.
    pub fn resolve_pin(&self, identifier: &str) -> Result<JsValue, JsValue> {
        match self.runtime()?.resolve_pin(identifier) {
            Some(pin) => to_js(pin),
            None => Ok(JsValue::NULL),
        }
    }

    /// Returns the per-frame board snapshot as a plain object.
    pub fn get_state(&self) -> Result<JsValue, JsValue> {
        to_js(&self.runtime()?.snapshot())
    }

    /// Removes and returns every pending bus record.
    pub fn drain_events(&mut self) -> Result<JsValue, JsValue> {
        let records: Vec<_> = self.runtime_mut()?.event_bus_mut().drain().collect();
        to_js(&records)
    }

    /// Takes everything the program wrote to the serial port.
    pub fn take_serial_output(&mut self) -> Result<String, JsValue> {
        Ok(self.runtime_mut()?.peripherals_mut().serial.take_output())
    }

    /// Hands the run configuration to `mount`.
    ///
    /// The returned Promise resolves with the attachment record after the
    /// Promise returned by `mount` settles, and rejects if it rejects.
    pub fn attach_view(
        &mut self,
        run_config: JsValue,
        mount: js_sys::Function,
    ) -> Result<js_sys::Promise, JsValue> {
        let config: RunConfig = serde_wasm_bindgen::from_value(run_config)?;
        let mut host = JsViewHost::new(mount);
        let attachment = self
            .runtime_mut()?
            .attach_view(&mut host, &config)
            .map_err(js_error)?;
        Ok(after_mount(&host.completion, to_js(&attachment)?))
    }
}
