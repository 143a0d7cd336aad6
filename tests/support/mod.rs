#![allow(dead_code)]

pub mod scripted_transport;

use marquee_lib::shared::AppConfig;
use marquee_lib::MarqueeApp;
use std::sync::Arc;

pub use scripted_transport::ScriptedTransport;

/// App over a scripted transport, with primary retries off so failure
/// scenarios settle on the first attempt
pub fn app(transport: &Arc<ScriptedTransport>) -> MarqueeApp {
    let config = AppConfig::new("test-key").with_primary_retries(0);
    MarqueeApp::with_transport(config, transport.clone())
}
