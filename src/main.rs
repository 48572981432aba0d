use std::{error::Error, io};

use clap::Parser;
use commands::exec::ProcessExecutor;
use devices::ConnectedDevices;

mod cli;
mod commands {
    pub(crate) mod adb;
    pub(crate) mod exec;
    pub(crate) mod idevice_id;
}
mod devices;
mod display;
mod report;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    let _args = cli::Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Lister failures are part of the report; only a broken stdout ends the run early.
    let source = ConnectedDevices::new(ProcessExecutor);
    let mut stdout = io::stdout().lock();
    report::run(&source, &mut stdout).await?;

    Ok(())
}
