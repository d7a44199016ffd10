use std::fmt::{self, Write as _};
use std::sync::Once;

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};
use wasm_bindgen::JsValue;
use web_sys::console;

static INIT: Once = Once::new();

/// Collects the message and the remaining fields of one event.
#[derive(Default)]
struct LineVisitor {
    message: String,
    fields: String,
}

impl Visit for LineVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{value:?}");
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }
}

/// Render one event as a console line: `[target] message key=value ...`.
pub fn format_line(target: &str, message: &str, fields: &str) -> String {
    format!("[{target}] {message}{fields}")
}

/// Forwards tracing events to the browser console at the matching level.
pub struct ConsoleLayer;

impl<S: Subscriber> Layer<S> for ConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = LineVisitor::default();
        event.record(&mut visitor);

        let metadata = event.metadata();
        let line = JsValue::from_str(&format_line(metadata.target(), &visitor.message, &visitor.fields));
        match *metadata.level() {
            Level::ERROR => console::error_1(&line),
            Level::WARN => console::warn_1(&line),
            Level::INFO => console::info_1(&line),
            _ => console::debug_1(&line),
        }
    }
}

pub struct Logger;

impl Logger {
    /// Install the console subscriber and the panic hook. Later calls are
    /// ignored, so every entry point can call this.
    pub fn init(directives: &str) {
        INIT.call_once(|| {
            console_error_panic_hook::set_once();
            let filter = EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new("info"));
            if tracing_subscriber::registry().with(filter).with(ConsoleLayer).try_init().is_err() {
                console::warn_1(&JsValue::from_str("a tracing subscriber was already installed"));
            }
        });
    }

    pub fn info_with_component(component: &str, message: &str) {
        tracing::info!(target: "monthpicker", component, "{message}");
    }

    pub fn warn_with_component(component: &str, message: &str) {
        tracing::warn!(target: "monthpicker", component, "{message}");
    }
}
