mod progress;
mod trainer;

pub use progress::{ConsoleProgress, Progress, ProgressSink};
pub use trainer::Trainer;
