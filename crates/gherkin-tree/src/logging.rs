//! Optional `tracing` subscriber for binaries embedding the parser.
//!
//! The library only emits events. Nothing is installed unless the caller
//! asks for it, either process-wide with [`init_logging`] or for a scope
//! with [`tracing::subscriber::with_default`] and [`subscriber`].
//!
//! Available with the `logging` cargo feature (on by default).

use tracing::Subscriber;
use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use crate::config::ParserConfig;

/// Log targets emitted by this workspace.
const TARGETS: [&str; 2] = ["gherkin_tree", "gherkin_tree_keywords"];

/// Filter enabling the workspace targets at the configured level and
/// nothing else.
fn filter_from_config(config: &ParserConfig) -> EnvFilter {
    let level = config.log_level.as_filter_str();
    let directives = TARGETS.map(|target| format!("{target}={level}")).join(",");
    EnvFilter::builder()
        .with_default_directive(LevelFilter::OFF.into())
        .parse_lossy(directives)
}

/// Build a stderr subscriber for the configured log level.
///
/// Events from other crates are discarded, so a host application keeps
/// control of its own output.
#[must_use]
pub fn subscriber(config: &ParserConfig) -> impl Subscriber + Send + Sync + 'static {
    tracing_subscriber::fmt()
        .with_env_filter(filter_from_config(config))
        .with_writer(std::io::stderr)
        .with_target(true)
        .finish()
}

/// Install [`subscriber`] as the process-wide default.
///
/// # Errors
///
/// Returns [`SetGlobalDefaultError`] when a global subscriber is already
/// installed. The existing subscriber stays in place.
pub fn init_logging(config: &ParserConfig) -> Result<(), SetGlobalDefaultError> {
    tracing::subscriber::set_global_default(subscriber(config))
}
