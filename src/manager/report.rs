use std::fmt;

/// How long a process has been running, in seconds. Never negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveTime {
    seconds: f64,
}

/// Output format for an [`ActiveTime`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayStyle {
    Seconds,
    Human,
}

impl ActiveTime {
    /// `uptime - start_ticks / ticks_per_second`, clamped at zero. Clock skew or
    /// rounding can otherwise give a small negative value for a fresh process.
    pub fn derive(uptime: f64, start_ticks: u64, ticks_per_second: u64) -> Self {
        let started_at = start_ticks as f64 / ticks_per_second as f64;
        let seconds = uptime - started_at;
        ActiveTime {
            seconds: if seconds > 0.0 { seconds } else { 0.0 },
        }
    }

    pub fn seconds(&self) -> f64 {
        self.seconds
    }

    /// Whole hours, minutes and seconds of the truncated duration.
    pub fn hms(&self) -> (u64, u64, u64) {
        let total = self.seconds.floor() as u64;
        (total / 3600, (total % 3600) / 60, total % 60)
    }

    pub fn render(&self, style: DisplayStyle) -> String {
        match style {
            DisplayStyle::Seconds => format!("Seconds active: {:.0}", self.seconds()),
            DisplayStyle::Human => {
                let (hours, minutes, seconds) = self.hms();
                format!("Active time: {hours:02}h {minutes:02}m {seconds:02}s")
            }
        }
    }
}

impl fmt::Display for ActiveTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}s", self.seconds)
    }
}
