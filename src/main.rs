//! Tablet mode switch daemon
//!
//! Watches USB hotplug events for the configured keyboard and reports
//! `SW_TABLET_MODE` through a uinput virtual device: detach means tablet
//! mode on, attach means tablet mode off.

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tabletmode_core::controller::ModeController;
use tabletmode_core::hotplug::UdevHotplugBus;
use tabletmode_core::identity::DeviceIdentity;
use tabletmode_core::uinput::UinputSwitchOutput;

mod cli;
use cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let target = DeviceIdentity::new(cli.vendor, cli.product);
    info!(
        version = env!("CARGO_PKG_VERSION"),
        device = %target,
        "tablet-mode starting"
    );

    let bus = UdevHotplugBus::new().context("failed to open udev hotplug monitor")?;
    let output = UinputSwitchOutput;

    let controller = ModeController::start(target, &output, &bus)
        .await
        .context("failed to start tablet mode controller")?;
    info!("watching for keyboard attach/detach");

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;
    info!("shutdown signal received");

    controller.stop().await;
    info!("tablet-mode stopped");
    Ok(())
}
