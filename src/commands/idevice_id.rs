use super::exec::{CommandExecutor, Error};

const IDEVICE_ID: &str = "idevice_id";
const LIST_UDIDS: &[&str] = &["-l"];

/// UDIDs of attached iOS devices, in the order `idevice_id -l` prints them.
///
/// `idevice_id` prints nothing when usbmuxd has no devices to report; that is
/// an empty list rather than an error.
pub async fn devices<E>(executor: &E) -> Result<Vec<String>, Error>
where
    E: CommandExecutor + ?Sized,
{
    let lines = executor.run(IDEVICE_ID, LIST_UDIDS).await?;
    Ok(lines
        .into_iter()
        .filter(|line| !line.trim().is_empty())
        .collect())
}
