use crate::config::VpnConfig;
use crate::vpn::{NordVpnCommand, ProcessProbe, SystemProcessProbe, VpnCommand};
use std::time::Duration;

/// Controller for the external VPN client
///
/// Wraps the CLI and the process probe behind non-fatal operations: a
/// failing client command is logged and reported as `false`, never
/// propagated. The client's state is observed, not assumed: after every
/// connect/disconnect the process list is polled until it reflects the
/// transition or the bounded attempts run out.
pub struct VpnController {
    command: Box<dyn VpnCommand>,
    probe: Box<dyn ProcessProbe>,
    config: VpnConfig,
}

impl VpnController {
    /// Builds the production controller from configuration
    pub fn new(config: VpnConfig) -> Self {
        let command = NordVpnCommand::new(config.install_dir.clone(), config.binary.clone());
        Self::with_parts(Box::new(command), Box::new(SystemProcessProbe::new()), config)
    }

    /// Builds a controller with injected collaborators (used by tests)
    pub fn with_parts(
        command: Box<dyn VpnCommand>,
        probe: Box<dyn ProcessProbe>,
        config: VpnConfig,
    ) -> Self {
        Self {
            command,
            probe,
            config,
        }
    }

    /// Connects to the configured region; returns whether the command
    /// succeeded
    pub async fn connect(&self) -> bool {
        match self.command.connect(&self.config.region).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("VPN connect failed: {}", e);
                false
            }
        }
    }

    /// Disconnects the current session; returns whether the command
    /// succeeded
    pub async fn disconnect(&self) -> bool {
        match self.command.disconnect().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("VPN disconnect failed: {}", e);
                false
            }
        }
    }

    /// Whether the VPN client process is currently up
    pub fn is_running(&self) -> bool {
        self.probe.is_running(&self.config.process_name)
    }

    /// Rotates the egress IP: disconnect, wait for the client to stop,
    /// reconnect, wait for it to come back
    ///
    /// Returns `true` when the full cycle completed within the bounded
    /// waits. A `false` means the caller should give up on the current
    /// retry, not abort the run.
    pub async fn rotate(&self) -> bool {
        tracing::info!("Rotating VPN connection");

        // A failed disconnect is ignored; the wait below decides whether
        // the client actually went down.
        self.disconnect().await;

        if !self.wait_for_running(false).await {
            tracing::warn!("VPN client did not stop within bounded wait");
            return false;
        }

        if !self.connect().await {
            return false;
        }

        if !self.wait_for_running(true).await {
            tracing::warn!("VPN client did not start within bounded wait");
            return false;
        }

        tracing::info!("VPN rotation complete");
        true
    }

    /// Polls the process list until `is_running()` matches `target`,
    /// bounded by the configured attempts
    async fn wait_for_running(&self, target: bool) -> bool {
        for attempt in 0..self.config.wait_attempts {
            if self.is_running() == target {
                return true;
            }
            tracing::trace!(
                "VPN state not yet {} (attempt {}/{})",
                if target { "running" } else { "stopped" },
                attempt + 1,
                self.config.wait_attempts
            );
            tokio::time::sleep(Duration::from_millis(self.config.wait_interval_ms)).await;
        }
        self.is_running() == target
    }
}
