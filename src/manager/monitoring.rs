use crate::error::{Result, UptimeError};
use crate::process::{ProcRoot, ProcessRecord, NAME_CAPACITY};

/// Live listing of the pids under `proc_root`, in whatever order the
/// directory yields them. Processes come and go while this is consumed, so
/// it is a best-effort snapshot: entries that fail to read are skipped.
pub fn active_pids(proc_root: &ProcRoot) -> Result<impl Iterator<Item = u32>> {
    let processes = procfs::process::all_processes_with_root(proc_root.path()).map_err(|e| {
        UptimeError::SourceUnavailable {
            path: proc_root.path().to_path_buf(),
            source: std::io::Error::other(e),
        }
    })?;

    Ok(processes.filter_map(|p| match p {
        Ok(p) if p.pid > 0 => Some(p.pid as u32),
        Ok(_) => None,
        Err(e) => {
            tracing::debug!(error = %e, "skipping unreadable process entry");
            None
        }
    }))
}

/// First process among `candidates` whose short name equals `target` exactly.
///
/// Candidates whose name cannot be read have exited mid-scan and are skipped.
/// Once a name matches, a failure to read that process's start time aborts the
/// search instead of moving on to another candidate with the same name.
pub fn find_first_by_name<I>(
    proc_root: &ProcRoot,
    candidates: I,
    target: &str,
) -> Result<Option<ProcessRecord>>
where
    I: IntoIterator<Item = u32>,
{
    for pid in candidates {
        let raw_name = match proc_root.read_name_bytes(pid, NAME_CAPACITY) {
            Ok(raw_name) => raw_name,
            Err(e) => {
                tracing::debug!(pid, error = %e, "process vanished during scan");
                continue;
            }
        };
        if raw_name != target.as_bytes() {
            continue;
        }

        let name = String::from_utf8_lossy(&raw_name).into_owned();
        tracing::debug!(pid, name = %name, "matched process name");
        let start_ticks = proc_root.read_start_ticks(pid).map_err(|e| {
            UptimeError::malformed(
                proc_root.path().join(pid.to_string()).join("stat"),
                format!("matched '{target}' but could not read its start time: {e}"),
            )
        })?;

        return Ok(Some(ProcessRecord {
            pid,
            name,
            start_ticks,
        }));
    }

    Ok(None)
}
