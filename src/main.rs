use anyhow::Result;
use clap::Parser;
use tabdeck::cli::{self, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Routes all log::info!() etc. to /tmp/tabdeck_debug.log.
    // CLI --log-level flag takes highest precedence, then RUST_LOG, then config (applied later).
    tabdeck::debug::init_log_bridge(cli.log_level);

    log::info!("Starting tabdeck {}", tabdeck::VERSION);

    let result = cli::run(cli);
    if let Err(ref e) = result {
        log::error!("tabdeck failed: {e:#}");
    }
    log::logger().flush();
    result
}
