use std::env;
use std::path::PathBuf;

pub const ROOT_ENV: &str = "PROC_UPTIME_ROOT";
pub const DEBUG_LOG_ENV: &str = "PROC_UPTIME_DEBUG_LOG";
pub const DEFAULT_PROC_ROOT: &str = "/proc";

/// Runtime settings, read once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub proc_root: PathBuf,
    pub debug_log: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let proc_root = lookup(ROOT_ENV)
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PROC_ROOT));
        let debug_log = lookup(DEBUG_LOG_ENV)
            .map(|value| matches!(value.as_str(), "1" | "true" | "TRUE" | "yes" | "YES"))
            .unwrap_or(false);

        Config {
            proc_root,
            debug_log,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_to_proc() {
        let config = config_from(&[]);
        assert_eq!(config.proc_root, PathBuf::from("/proc"));
        assert!(!config.debug_log);
    }

    #[test]
    fn reads_root_override() {
        let config = config_from(&[(ROOT_ENV, "/host/proc")]);
        assert_eq!(config.proc_root, PathBuf::from("/host/proc"));
    }

    #[test]
    fn blank_root_falls_back() {
        let config = config_from(&[(ROOT_ENV, "  ")]);
        assert_eq!(config.proc_root, PathBuf::from(DEFAULT_PROC_ROOT));
    }

    #[test]
    fn debug_flag_values() {
        assert!(config_from(&[(DEBUG_LOG_ENV, "yes")]).debug_log);
        assert!(config_from(&[(DEBUG_LOG_ENV, "1")]).debug_log);
        assert!(!config_from(&[(DEBUG_LOG_ENV, "0")]).debug_log);
        assert!(!config_from(&[(DEBUG_LOG_ENV, "maybe")]).debug_log);
    }
}
