use std::fs;

use log::warn;

use super::{MeasurementProvider, TraceStats, TracingAllocator};

const STATUS_PATH: &str = "/proc/self/status";

/// Measures the current process: allocations through `TracingAllocator` and the peak resident
/// set through procfs.
///
/// Allocation peaks are only meaningful when `TracingAllocator` is the global allocator,
/// otherwise they read as zero.
#[derive(Debug, Default)]
pub struct ProcessProfiler;

impl ProcessProfiler {
    pub fn new() -> Self {
        Self
    }
}

impl MeasurementProvider for ProcessProfiler {
    fn start_trace(&mut self) {
        if TracingAllocator::start() {
            warn!("an allocation trace was already active, restarting it");
        }
    }

    fn stop_trace(&mut self) -> TraceStats {
        TraceStats {
            peak_bytes: TracingAllocator::stop(),
        }
    }

    fn peak_rss_kb(&self) -> Option<u64> {
        match fs::read_to_string(STATUS_PATH) {
            Ok(status) => status_field_kb(&status, "VmHWM"),
            Err(e) => {
                warn!("cannot read {STATUS_PATH}: {e}");
                None
            }
        }
    }
}

/// Parses a `Key:   1234 kB` line out of a procfs status file.
fn status_field_kb(status: &str, key: &str) -> Option<u64> {
    status.lines().find_map(|line| {
        let value = line.strip_prefix(key)?.strip_prefix(':')?;
        value.split_whitespace().next()?.parse().ok()
    })
}

#[cfg(test)]
mod test {
    use super::*;

    const STATUS: &str = "Name:\tlinfit\n\
        VmPeak:\t   12345 kB\n\
        VmHWM:\t    2228 kB\n\
        VmRSS:\t    2100 kB\n";

    #[test]
    fn test_parses_status_fields() {
        assert_eq!(status_field_kb(STATUS, "VmHWM"), Some(2228));
        assert_eq!(status_field_kb(STATUS, "VmRSS"), Some(2100));
    }

    #[test]
    fn test_missing_field() {
        assert_eq!(status_field_kb(STATUS, "VmSwap"), None);
        assert_eq!(status_field_kb("VmHWM:\tgarbage kB\n", "VmHWM"), None);
    }

    #[test]
    fn test_does_not_match_prefixes() {
        assert_eq!(status_field_kb("VmHWMx:\t1 kB\n", "VmHWM"), None);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_reads_own_peak_rss() {
        let rss = ProcessProfiler::new().peak_rss_kb();
        assert!(rss.is_some_and(|kb| kb > 0), "rss: {rss:?}");
    }
}
