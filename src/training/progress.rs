use serde::Serialize;

/// A snapshot reported by the trainer every few epochs.
///
/// `mse` is computed from the residuals of the epoch *before* its parameter update, while `w`
/// and `b` are the values *after* it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Progress {
    pub epoch: usize,
    pub mse: f64,
    pub w: f64,
    pub b: f64,
}

/// Receives the trainer's progress reports.
pub trait ProgressSink {
    fn on_progress(&mut self, progress: &Progress);
}

/// Discards every report.
impl ProgressSink for () {
    fn on_progress(&mut self, _progress: &Progress) {}
}

/// Collects every report.
impl ProgressSink for Vec<Progress> {
    fn on_progress(&mut self, progress: &Progress) {
        self.push(*progress);
    }
}

/// Prints each report as a line on stdout.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleProgress {
    precision: usize,
}

impl ConsoleProgress {
    /// Returns a new `ConsoleProgress`.
    ///
    /// # Arguments
    /// * `precision` - The amount of decimals printed for `mse`, `w` and `b`.
    pub fn new(precision: usize) -> Self {
        Self { precision }
    }

    pub fn format(&self, p: &Progress) -> String {
        let prec = self.precision;
        format!(
            "Epoch {}, MSE: {:.prec$}, w: {:.prec$}, b: {:.prec$}",
            p.epoch, p.mse, p.w, p.b
        )
    }
}

impl ProgressSink for ConsoleProgress {
    fn on_progress(&mut self, progress: &Progress) {
        println!("{}", self.format(progress));
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn sample() -> Progress {
        Progress {
            epoch: 200,
            mse: 0.012516703811167613,
            w: 1.927611058323001,
            b: 0.2613470483407793,
        }
    }

    #[test]
    fn test_console_format() {
        assert_eq!(
            ConsoleProgress::new(4).format(&sample()),
            "Epoch 200, MSE: 0.0125, w: 1.9276, b: 0.2613"
        );
        assert_eq!(
            ConsoleProgress::new(6).format(&sample()),
            "Epoch 200, MSE: 0.012517, w: 1.927611, b: 0.261347"
        );
    }

    #[test]
    fn test_vec_collects() {
        let mut sink = Vec::new();
        sink.on_progress(&sample());
        sink.on_progress(&sample());
        assert_eq!(sink.len(), 2);
    }
}
