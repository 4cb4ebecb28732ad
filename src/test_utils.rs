//! Test helpers shared across modules.

use std::fmt::Write;
use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::subscriber::DefaultGuard;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

/// One recorded log event, fields flattened into `text`
#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub level: Level,
    pub text: String,
}

/// Collects this crate's log events for assertions.
///
/// Install it with [`LogCapture::install`] for the duration of a test; the
/// guard scopes it to the current thread, which also covers tasks spawned on
/// a current-thread tokio runtime.
#[derive(Clone, Default)]
pub struct LogCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl LogCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn install(&self) -> DefaultGuard {
        tracing::subscriber::set_default(tracing_subscriber::registry().with(self.clone()))
    }

    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Texts of events logged at exactly `level`
    pub fn at_level(&self, level: Level) -> Vec<String> {
        self.events()
            .into_iter()
            .filter(|e| e.level == level)
            .map(|e| e.text)
            .collect()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.events().iter().any(|e| e.text.contains(needle))
    }
}

struct FieldText(String);

impl FieldText {
    fn push(&mut self, field: &Field, value: std::fmt::Arguments<'_>) {
        if !self.0.is_empty() {
            self.0.push(' ');
        }
        if field.name() == "message" {
            let _ = self.0.write_fmt(value);
        } else {
            let _ = write!(self.0, "{}={}", field.name(), value);
        }
    }
}

impl Visit for FieldText {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.push(field, format_args!("{}", value));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.push(field, format_args!("{:?}", value));
    }
}

impl<S: Subscriber> Layer<S> for LogCapture {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with(env!("CARGO_CRATE_NAME")) {
            return;
        }

        let mut text = FieldText(String::new());
        event.record(&mut text);

        self.events.lock().unwrap().push(CapturedEvent {
            level: *metadata.level(),
            text: text.0,
        });
    }
}
