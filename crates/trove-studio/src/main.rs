use anyhow::{Context, Result};
use clap::Parser;

use trove_engine::assets::load_or_placeholder;
use trove_engine::device::GpuInit;
use trove_engine::logging::init_logging;
use trove_engine::window::{Runtime, RuntimeConfig};

mod backend;
mod cli;
mod viewer;

use cli::Cli;
use viewer::Viewer;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.logging());

    let gestures = cli.gesture_config();
    gestures.validate().context("invalid gesture options")?;
    let rules = cli.rules();

    let model = load_or_placeholder(cli.model.as_deref());
    log::info!(
        "hunting {} x '{}' for {}s",
        rules.total_targets,
        model.name,
        rules.time_limit_secs
    );

    let viewer = Viewer::new(&model, gestures, rules, cli.ar)?;
    let config = RuntimeConfig::default()
        .title("Trove")
        .initial_size(cli.width, cli.height);

    Runtime::run(config, GpuInit::default(), viewer)
}
