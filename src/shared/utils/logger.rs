use log::{debug, info, warn};
use std::sync::Once;
use std::time::Instant;

static INIT: Once = Once::new();

/// Route both `log` records (transport) and `tracing` events (aggregation
/// and lifecycle) to stdout. Safe to call more than once.
pub fn init_logger() {
    INIT.call_once(|| {
        let _ = env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .filter_module("marquee_lib", log::LevelFilter::Debug)
            .filter_module("reqwest", log::LevelFilter::Warn)
            .filter_module("hyper", log::LevelFilter::Warn)
            .format_timestamp_secs()
            .format_target(false)
            .try_init();

        let subscriber = tracing_subscriber::fmt()
            .with_target(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);

        info!("marquee logging ready");
    });
}

/// Log lines shared by the transport and the lifecycle layer
pub struct LogContext;

impl LogContext {
    pub fn upstream_request(provider: &str, path: &str) {
        debug!("{} GET {}", provider, path);
    }

    pub fn upstream_response(provider: &str, path: &str, status: u16, elapsed_ms: u64) {
        if status >= 400 {
            warn!("{} GET {} -> {} in {}ms", provider, path, status, elapsed_ms);
        } else {
            info!("{} GET {} -> {} in {}ms", provider, path, status, elapsed_ms);
        }
    }

    /// A view aggregation reached a terminal state
    pub fn aggregation_outcome(view: &str, generation: u64, outcome: &str) {
        info!("{} #{} settled as {}", view, generation, outcome);
    }
}

/// Wall-clock timer for one upstream operation
pub struct Stopwatch {
    started: Instant,
    operation: String,
}

impl Stopwatch {
    pub fn start(operation: impl Into<String>) -> Self {
        Self {
            started: Instant::now(),
            operation: operation.into(),
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    /// Log the elapsed time with a short detail and return it
    pub fn finish_with(self, detail: &str) -> u64 {
        let elapsed = self.elapsed_ms();
        info!("{} took {}ms ({})", self.operation, elapsed, detail);
        elapsed
    }
}
