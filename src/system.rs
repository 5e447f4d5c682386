use crate::error::{Result, UptimeError};
use crate::process::{read_line_bounded, ProcRoot};

const UPTIME_LINE_LIMIT: u64 = 256;

/// Seconds since boot, the first token of `<root>/uptime`. The idle time that
/// follows it is ignored.
pub fn read_system_uptime(proc_root: &ProcRoot) -> Result<f64> {
    let path = proc_root.path().join("uptime");
    let raw = read_line_bounded(&path, UPTIME_LINE_LIMIT).map_err(|source| {
        UptimeError::SourceUnavailable {
            path: path.clone(),
            source,
        }
    })?;
    let line = String::from_utf8_lossy(&raw);

    let token = line
        .split_whitespace()
        .next()
        .ok_or_else(|| UptimeError::malformed(&path, "empty uptime record"))?;
    let uptime = token
        .parse::<f64>()
        .map_err(|e| UptimeError::malformed(&path, format!("{token:?}: {e}")))?;
    if !uptime.is_finite() || uptime < 0.0 {
        return Err(UptimeError::malformed(
            &path,
            format!("uptime {uptime} out of range"),
        ));
    }
    Ok(uptime)
}

/// Kernel clock ticks per second (`_SC_CLK_TCK`), queried at runtime.
pub fn ticks_per_second() -> u64 {
    procfs::ticks_per_second()
}
