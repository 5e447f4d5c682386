/// 1-indexed position of the start time (clock ticks since boot) in `/proc/<pid>/stat`.
pub const STARTTIME_FIELD: usize = 22;

/// Upper bound on how much of a stat record is read. Longer records are cut here.
pub const STAT_LINE_LIMIT: u64 = 4096;

/// One `/proc/<pid>/stat` line split into fields.
///
/// Field 2 is the process name wrapped in parentheses and may itself contain
/// spaces or parentheses, so it runs from the first `(` to the LAST `)` on the
/// line. Everything after it is split on spaces.
#[derive(Debug)]
pub struct StatFields<'a> {
    pub pid: &'a str,
    pub comm: &'a str,
    rest: Vec<&'a str>,
}

impl<'a> StatFields<'a> {
    pub fn parse(line: &'a str) -> Option<Self> {
        let line = line.strip_suffix('\n').unwrap_or(line);
        let open = line.find('(')?;
        let close = line.rfind(')')?;
        if close < open {
            return None;
        }

        let pid = line[..open].trim_end();
        if pid.is_empty() {
            return None;
        }

        let rest = line[close + 1..]
            .split(' ')
            .filter(|field| !field.is_empty())
            .collect();

        Some(StatFields {
            pid,
            comm: &line[open + 1..close],
            rest,
        })
    }

    /// Field by its 1-indexed position in the record.
    pub fn field(&self, index: usize) -> Option<&'a str> {
        match index {
            0 => None,
            1 => Some(self.pid),
            2 => Some(self.comm),
            n => self.rest.get(n - 3).copied(),
        }
    }

    pub fn len(&self) -> usize {
        2 + self.rest.len()
    }

    pub fn start_ticks(&self) -> Result<u64, String> {
        let raw = self.field(STARTTIME_FIELD).ok_or_else(|| {
            format!(
                "expected at least {} fields, found {}",
                STARTTIME_FIELD,
                self.len()
            )
        })?;
        raw.parse::<u64>()
            .map_err(|e| format!("start time field {:?} is not a tick count: {}", raw, e))
    }
}

#[cfg(test)]
pub(crate) fn sample_line(pid: u32, comm: &str, start_ticks: u64) -> String {
    format!(
        "{pid} ({comm}) S 1 {pid} {pid} 0 -1 4194560 1041 0 0 0 3 2 0 0 20 0 1 0 {start_ticks} 17338368 2334 18446744073709551615 1 1 0 0 0 0 0 4096 0 0 0 0 17 3 0 0 0 0 0\n"
    )
}
