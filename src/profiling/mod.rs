mod alloc;
mod guard;
mod process;

pub use alloc::TracingAllocator;
pub use guard::TraceGuard;
pub use process::ProcessProfiler;

/// Allocation statistics collected between a `start_trace` and its `stop_trace`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TraceStats {
    pub peak_bytes: usize,
}

impl TraceStats {
    /// The peak in kibibytes, truncated.
    pub fn peak_kb(&self) -> u64 {
        (self.peak_bytes / 1024) as u64
    }
}

/// Source of the resource measurements taken around a training run.
///
/// Tracing is process-wide state, implementations only need to support one active trace at a
/// time.
pub trait MeasurementProvider {
    /// Starts tracing allocations, discarding any previous statistics.
    fn start_trace(&mut self);

    /// Stops tracing and returns what was observed since `start_trace`.
    fn stop_trace(&mut self) -> TraceStats;

    /// The peak resident set size of the whole process so far, in kibibytes.
    ///
    /// This is cumulative over the process lifetime, not scoped to a trace. Returns `None` when
    /// the platform doesn't report it.
    fn peak_rss_kb(&self) -> Option<u64>;
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_peak_kb_truncates() {
        assert_eq!(TraceStats { peak_bytes: 0 }.peak_kb(), 0);
        assert_eq!(TraceStats { peak_bytes: 1023 }.peak_kb(), 0);
        assert_eq!(TraceStats { peak_bytes: 2047 }.peak_kb(), 1);
        assert_eq!(TraceStats { peak_bytes: 4096 }.peak_kb(), 4);
    }
}
