use std::fmt;

use async_trait::async_trait;

use crate::commands::{
    adb,
    exec::{CommandExecutor, Error},
    idevice_id,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Platform {
    Ios,
    Android,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Platform::Ios => "iOS",
            Platform::Android => "Android",
        })
    }
}

/// Where the report gets its device identifiers from.
#[async_trait]
pub trait DeviceSource: Send + Sync {
    async fn ios_devices(&self) -> Result<Vec<String>, Error>;
    async fn android_devices(&self) -> Result<Vec<String>, Error>;
}

/// Queries the platform tools through a [`CommandExecutor`].
#[derive(Debug, Default)]
pub struct ConnectedDevices<E> {
    executor: E,
}

impl<E: CommandExecutor> ConnectedDevices<E> {
    pub fn new(executor: E) -> Self {
        ConnectedDevices { executor }
    }
}

#[async_trait]
impl<E: CommandExecutor> DeviceSource for ConnectedDevices<E> {
    async fn ios_devices(&self) -> Result<Vec<String>, Error> {
        idevice_id::devices(&self.executor).await
    }

    async fn android_devices(&self) -> Result<Vec<String>, Error> {
        adb::devices(&self.executor).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::exec::fake::Canned;

    #[test]
    fn platform_labels() {
        assert_eq!(Platform::Ios.to_string(), "iOS");
        assert_eq!(Platform::Android.to_string(), "Android");
    }

    #[tokio::test]
    async fn each_platform_uses_its_own_tool() {
        let source = ConnectedDevices::new(Canned::new(Some(vec![
            "List of devices attached",
            "R1\tdevice",
        ])));

        assert_eq!(
            source.ios_devices().await.unwrap(),
            vec!["List of devices attached", "R1\tdevice"]
        );
        assert_eq!(source.android_devices().await.unwrap(), vec!["R1"]);
        assert_eq!(
            *source.executor.calls.lock().unwrap(),
            vec!["idevice_id -l", "adb devices"]
        );
    }
}
