//! Subscriber setup for runner and local use.

use std::fmt::Write as _;

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, Layer, fmt};

/// Install the global subscriber.
///
/// `RUST_LOG` wins; otherwise `RUNNER_DEBUG=1` selects `debug` and
/// everything else `info`. Under the Actions runner, timestamps and colour
/// are dropped and warnings/errors are mirrored as workflow annotations.
pub fn init() {
    let on_runner = std::env::var("GITHUB_ACTIONS").is_ok_and(|v| v == "true");
    let default_level = if std::env::var("RUNNER_DEBUG").is_ok_and(|v| v == "1") {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(!on_runner);

    let registry = tracing_subscriber::registry().with(filter);
    if on_runner {
        registry
            .with(fmt_layer.without_time())
            .with(ActionsAnnotationLayer)
            .init();
    } else {
        registry.with(fmt_layer).init();
    }
}

/// Mirrors `WARN` and `ERROR` events as `::warning::` / `::error::` commands.
pub struct ActionsAnnotationLayer;

impl<S: Subscriber> Layer<S> for ActionsAnnotationLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let command = match *event.metadata().level() {
            Level::ERROR => "error",
            Level::WARN => "warning",
            _ => return,
        };
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        println!("::{command}::{}", escape_data(&visitor.finish()));
    }
}

#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn finish(self) -> String {
        if self.fields.is_empty() {
            self.message
        } else {
            format!("{} ({})", self.message, self.fields.trim_start())
        }
    }
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            // arch-lint: allow(no-silent-result-drop) reason="writing to a String cannot fail"
            write!(self.fields, " {}={value}", field.name()).ok();
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            // arch-lint: allow(no-silent-result-drop) reason="writing to a String cannot fail"
            write!(self.message, "{value:?}").ok();
        } else {
            // arch-lint: allow(no-silent-result-drop) reason="writing to a String cannot fail"
            write!(self.fields, " {}={value:?}", field.name()).ok();
        }
    }
}

/// Escape a workflow command payload.
fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
