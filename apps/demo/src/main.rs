//! Log panel demo entry point.

mod config;

use std::sync::Arc;

use logpanel_console_log::{Arg, capture_layer};
use logpanel_panel::LogPanel;
use logpanel_protocol::LogKind;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() -> anyhow::Result<()> {
    // Structured logging, with the capture layer alongside the fmt output.
    let (capture, intercept) = capture_layer();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .with(capture)
        .init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "starting log panel demo"
    );

    let config = config::Config::load()?;
    let mut panel = LogPanel::new(Arc::new(intercept));
    panel.init(config.panel)?;

    tracing::info!(user = "demo", "session opened");
    tracing::warn!(free_mb = 512, "disk space low");
    tracing::error!("request failed");

    if let Some(capture) = panel.capture() {
        let payload = serde_json::json!({ "id": 7, "tags": ["a", "b"] });
        capture.record(LogKind::Info, &["payload".into(), Arg::object(&payload)]);
    }

    if let Some(view) = panel.view() {
        let (width, height) = view.size();
        println!(
            "[{}] {} {width}x{height}",
            view.minimize_label(),
            view.position().as_str()
        );
        for row in view.rows() {
            println!("{row}");
        }
    }

    panel.destroy();
    tracing::info!("log panel demo finished");
    Ok(())
}
