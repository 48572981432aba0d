use clap::Parser;

/// Prints the iOS devices `idevice_id` sees and the Android devices `adb` sees.
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
pub struct Args {}
