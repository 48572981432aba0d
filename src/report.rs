use std::io::{self, Write};

use crate::{
    commands::exec::Error,
    devices::{DeviceSource, Platform},
    display::display_devices,
};

const BANNER: &str = "List of connected Android & IOS devices...";

/// Prints the banner and one section per platform. A platform whose lister
/// fails gets an error line in place of its device block; the other platform
/// is reported regardless.
pub async fn run<S, W>(source: &S, out: &mut W) -> io::Result<()>
where
    S: DeviceSource + ?Sized,
    W: Write,
{
    writeln!(out, "{BANNER}")?;

    let ios = source.ios_devices().await;
    let android = source.android_devices().await;

    section(out, Platform::Ios, ios)?;
    section(out, Platform::Android, android)?;
    Ok(())
}

fn section<W: Write>(
    out: &mut W,
    platform: Platform,
    devices: Result<Vec<String>, Error>,
) -> io::Result<()> {
    match devices {
        Ok(devices) => display_devices(out, platform, &devices),
        Err(err) => {
            log::warn!("{platform} lister failed: {err}");
            writeln!(out, "Error listing {platform} devices: {err}")
        }
    }
}
