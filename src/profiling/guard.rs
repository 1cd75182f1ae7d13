use log::debug;

use super::{MeasurementProvider, TraceStats};

/// An active allocation trace.
///
/// The trace is stopped by `finish`, or on drop if the scope is left early (an error returned
/// with `?`, a panic unwinding), so the provider is never left tracing.
pub struct TraceGuard<'a, P: MeasurementProvider + ?Sized> {
    provider: &'a mut P,
    stopped: bool,
}

impl<'a, P: MeasurementProvider + ?Sized> TraceGuard<'a, P> {
    /// Starts a trace on `provider`.
    pub fn start(provider: &'a mut P) -> Self {
        provider.start_trace();
        Self {
            provider,
            stopped: false,
        }
    }

    /// Stops the trace and returns its statistics.
    pub fn finish(mut self) -> TraceStats {
        self.stopped = true;
        self.provider.stop_trace()
    }
}

impl<P: MeasurementProvider + ?Sized> Drop for TraceGuard<'_, P> {
    fn drop(&mut self) {
        if !self.stopped {
            let stats = self.provider.stop_trace();
            debug!("trace released early: peak_bytes={}", stats.peak_bytes);
        }
    }
}
