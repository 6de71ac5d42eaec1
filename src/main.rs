use anyhow::Context as _;
use clap::Parser as _;
use tracing_subscriber::EnvFilter;

use docket::cli::{self, Cli};
use docket::config::DocketConfig;
use docket::settings::Settings;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("docket=info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let settings = Settings::load(None).context("loading settings")?;
    let config = DocketConfig::resolve(&settings).context("resolving configuration")?;
    cli::run(cli, &config)
}
