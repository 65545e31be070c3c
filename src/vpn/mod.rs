//! VPN client control
//!
//! The VPN client is an external process, not a library: every operation
//! shells out to its CLI and observes the result through the exit code and
//! the host process list. Nothing here is fatal to a crawl: a client
//! failure degrades the success rate, it never stops the run.

mod client;
mod controller;
mod probe;

pub use client::NordVpnCommand;
pub use controller::VpnController;
pub use probe::SystemProcessProbe;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from invoking the VPN client binary
#[derive(Debug, Error)]
pub enum VpnError {
    #[error("failed to launch vpn client: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("vpn client exited with status {0}")]
    Exit(String),
}

/// The VPN client CLI boundary
#[async_trait]
pub trait VpnCommand: Send + Sync {
    /// Connects to the given region
    async fn connect(&self, region: &str) -> Result<(), VpnError>;

    /// Disconnects the current session
    async fn disconnect(&self) -> Result<(), VpnError>;
}

/// The host process-list boundary
pub trait ProcessProbe: Send + Sync {
    /// Whether at least one process with the given name is running
    fn is_running(&self, process_name: &str) -> bool;
}
