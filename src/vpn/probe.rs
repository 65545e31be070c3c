use crate::vpn::ProcessProbe;
use sysinfo::System;

/// Process probe backed by the host process table
///
/// A fresh snapshot is taken on every call: the controller polls this
/// while waiting for the client to come up or go down, and a stale
/// snapshot would defeat the point.
#[derive(Debug, Default)]
pub struct SystemProcessProbe;

impl SystemProcessProbe {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessProbe for SystemProcessProbe {
    fn is_running(&self, process_name: &str) -> bool {
        let mut system = System::new();
        system.refresh_processes();
        let running = system.processes_by_name(process_name).next().is_some();
        running
    }
}
