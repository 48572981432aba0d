use std::io::{self, Write};

use crate::devices::Platform;

/// Writes the device block for one platform. An empty list gets a single
/// "no devices" line instead of per-device lines.
pub fn display_devices<W: Write>(
    out: &mut W,
    platform: Platform,
    devices: &[String],
) -> io::Result<()> {
    writeln!(out, "Connected Devices: {platform}")?;
    if devices.is_empty() {
        writeln!(out, "No {platform} devices connected.")?;
    } else {
        for id in devices {
            writeln!(out, "- {platform} Device: {id}")?;
        }
    }
    Ok(())
}
