use std::fmt;

use quick_error::quick_error;
use regex::Regex;

use super::exec::{CommandExecutor, Error};

const ADB: &str = "adb";
const DEVICES: &[&str] = &["devices"];
const HEADER: &str = "List of devices attached";

quick_error! {
    #[derive(Debug, PartialEq, Eq)]
    pub enum ParseError {
        Record(line: String) {
            display("unrecognized adb device record: {:?}", line)
        }
    }
}

/// Connection state column of `adb devices`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConnectionState {
    Device,
    Unauthorized,
    Offline,
    Other(String),
}

impl From<&str> for ConnectionState {
    fn from(state: &str) -> Self {
        match state {
            "device" => ConnectionState::Device,
            "unauthorized" => ConnectionState::Unauthorized,
            "offline" => ConnectionState::Offline,
            other => ConnectionState::Other(other.to_owned()),
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionState::Device => f.write_str("device"),
            ConnectionState::Unauthorized => f.write_str("unauthorized"),
            ConnectionState::Offline => f.write_str("offline"),
            ConnectionState::Other(state) => f.write_str(state),
        }
    }
}

/// One record line of `adb devices`. Anything after the state column
/// (`product:`, `model:`, ...) is ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdbDevice {
    pub serial: String,
    pub state: ConnectionState,
}

impl AdbDevice {
    pub fn parse(line: &str) -> Result<AdbDevice, ParseError> {
        lazy_static::lazy_static! {
            static ref RE: Regex = Regex::new(r"(?x)
            ^\s*
            (?P<serial>\S+)
            \s+
            (?P<state>\S+)").unwrap();
        }
        let captures = RE
            .captures(line)
            .ok_or_else(|| ParseError::Record(line.to_string()))?;

        Ok(AdbDevice {
            serial: captures["serial"].to_string(),
            state: ConnectionState::from(&captures["state"]),
        })
    }

    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Device
    }
}

fn is_header(line: &str) -> bool {
    line.starts_with(HEADER)
}

/// Serials of the devices `adb devices` reports as ready, in listing order.
///
/// Records in any other state (`unauthorized`, `offline`, ...) are dropped,
/// as are lines that don't look like records at all.
pub fn connected_serials(lines: &[String]) -> Vec<String> {
    match lines {
        [] => return Vec::new(),
        [only] if only.is_empty() || is_header(only) => return Vec::new(),
        _ => {}
    }

    let records = match lines {
        [first, rest @ ..] if is_header(first) => rest,
        _ => lines,
    };

    records
        .iter()
        .filter_map(|line| match AdbDevice::parse(line) {
            Ok(device) if device.is_connected() => Some(device.serial),
            Ok(device) => {
                log::debug!("skipping {} ({})", device.serial, device.state);
                None
            }
            Err(err) => {
                log::debug!("{}", err);
                None
            }
        })
        .collect()
}

pub async fn devices<E>(executor: &E) -> Result<Vec<String>, Error>
where
    E: CommandExecutor + ?Sized,
{
    let lines = executor.run(ADB, DEVICES).await?;
    Ok(connected_serials(&lines))
}
