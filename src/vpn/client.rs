use crate::vpn::{VpnCommand, VpnError};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::process::Command;

/// NordVPN CLI invocation
///
/// Runs `nordvpn -c -g "<region>"` and `nordvpn -d` from the configured
/// install directory. Exit code 0 means success; anything else is reported
/// as a `VpnError` for the controller to log.
pub struct NordVpnCommand {
    install_dir: PathBuf,
    binary: String,
}

impl NordVpnCommand {
    pub fn new(install_dir: impl Into<PathBuf>, binary: impl Into<String>) -> Self {
        Self {
            install_dir: install_dir.into(),
            binary: binary.into(),
        }
    }

    async fn run(&self, args: &[&str]) -> Result<(), VpnError> {
        let status = Command::new(&self.binary)
            .args(args)
            .current_dir(&self.install_dir)
            .status()
            .await?;

        if status.success() {
            Ok(())
        } else {
            Err(VpnError::Exit(status.to_string()))
        }
    }
}

#[async_trait]
impl VpnCommand for NordVpnCommand {
    async fn connect(&self, region: &str) -> Result<(), VpnError> {
        self.run(&["-c", "-g", region]).await
    }

    async fn disconnect(&self) -> Result<(), VpnError> {
        self.run(&["-d"]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_binary_reports_spawn_error() {
        let client = NordVpnCommand::new("/tmp", "definitely-not-a-vpn-client");
        let result = client.disconnect().await;
        assert!(matches!(result, Err(VpnError::Spawn(_))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_nonzero_exit_reports_exit_error() {
        // `false` is a portable stand-in for a failing client binary
        let client = NordVpnCommand::new("/tmp", "false");
        let result = client.disconnect().await;
        assert!(matches!(result, Err(VpnError::Exit(_))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_zero_exit_is_ok() {
        let client = NordVpnCommand::new("/tmp", "true");
        assert!(client.disconnect().await.is_ok());
    }
}
