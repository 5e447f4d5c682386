use crate::error::{Result, UptimeError};
use crate::process::{ProcRoot, ProcessRecord};
use crate::system;

pub mod monitoring;
pub mod report;

use report::ActiveTime;

/// A located process and how long it has been running.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessUptime {
    pub record: ProcessRecord,
    pub active: ActiveTime,
}

/// Answers uptime queries against one procfs mount.
#[derive(Debug)]
pub struct Manager {
    proc_root: ProcRoot,
    ticks_per_second: u64,
}

impl Manager {
    pub fn new(proc_root: ProcRoot, ticks_per_second: u64) -> Self {
        Manager {
            proc_root,
            ticks_per_second,
        }
    }

    /// Manager using the running kernel's clock-tick rate.
    pub fn with_system_clock(proc_root: ProcRoot) -> Self {
        Self::new(proc_root, system::ticks_per_second())
    }

    pub fn proc_root(&self) -> &ProcRoot {
        &self.proc_root
    }

    /// Start ticks of `pid` and its active time, against a fresh uptime read.
    pub fn active_time(&self, pid: u32) -> Result<(u64, ActiveTime)> {
        let uptime = system::read_system_uptime(&self.proc_root)?;
        let start_ticks = self.proc_root.read_start_ticks(pid)?;
        let active = ActiveTime::derive(uptime, start_ticks, self.ticks_per_second);
        tracing::debug!(pid, uptime, start_ticks, %active, "derived active time");
        Ok((start_ticks, active))
    }

    /// First process whose short name is exactly `name`.
    pub fn find_by_name(&self, name: &str) -> Result<ProcessUptime> {
        let uptime = system::read_system_uptime(&self.proc_root)?;
        let candidates = monitoring::active_pids(&self.proc_root)?;

        let record = monitoring::find_first_by_name(&self.proc_root, candidates, name)?
            .ok_or_else(|| UptimeError::NotFound {
                name: name.to_string(),
            })?;
        let active = ActiveTime::derive(uptime, record.start_ticks, self.ticks_per_second);
        tracing::debug!(pid = record.pid, uptime, %active, "derived active time");

        Ok(ProcessUptime { record, active })
    }
}
