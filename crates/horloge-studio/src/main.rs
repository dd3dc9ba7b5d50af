use anyhow::{Context, Result};

use horloge_engine::device::GpuInit;
use horloge_engine::logging::{init_logging, LoggingConfig};
use horloge_engine::window::{Runtime, RuntimeConfig};
use horloge_face::Tunables;

mod app;
mod paint;

use app::ClockApp;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let mut tunables = Tunables::default();
    if let Some(seed) = std::env::var("HORLOGE_SEED").ok().and_then(|s| s.parse().ok()) {
        log::info!("using seed {seed}");
        tunables = tunables.seed(seed);
    }
    tunables.validate().context("invalid clock tunables")?;

    let config = RuntimeConfig { title: "Horloge".to_string(), ..RuntimeConfig::default() };
    Runtime::run(config, GpuInit::default(), ClockApp::new(tunables))
}
