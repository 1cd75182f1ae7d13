use std::{
    error::Error,
    fmt::{self, Display},
    io,
};

/// The result type used in the entire crate.
pub type Result<T> = std::result::Result<T, FitErr>;

/// The crate's error type.
#[derive(Debug)]
pub enum FitErr {
    EmptyDataset,
    SizeMismatch {
        a: &'static str,
        b: &'static str,
        got: usize,
        expected: usize,
    },
    NonFiniteSample {
        which: &'static str,
        index: usize,
    },
    InvalidLearningRate(f64),
    InvalidConfig(String),
    Io(io::Error),
}

impl FitErr {
    /// Returns `true` if the error was caused by the dataset or the hyperparameters handed to
    /// the trainer, as opposed to the environment.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            FitErr::EmptyDataset
                | FitErr::SizeMismatch { .. }
                | FitErr::NonFiniteSample { .. }
                | FitErr::InvalidLearningRate(_)
        )
    }
}

impl Display for FitErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FitErr::EmptyDataset => write!(f, "invalid input: empty dataset"),
            FitErr::SizeMismatch {
                a,
                b,
                got,
                expected,
            } => write!(
                f,
                "invalid input: mismatched lengths between {a} and {b}, got {got} and expected {expected}"
            ),
            FitErr::NonFiniteSample { which, index } => {
                write!(f, "invalid input: {which}[{index}] is not a finite number")
            }
            FitErr::InvalidLearningRate(lr) => write!(
                f,
                "invalid input: the learning rate must be positive and finite, got {lr}"
            ),
            FitErr::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            FitErr::Io(e) => write!(f, "io error: {e}"),
        }
    }
}

impl Error for FitErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FitErr::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for FitErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_messages_name_the_failed_constraint() {
        let err = FitErr::SizeMismatch {
            a: "xs",
            b: "ys",
            got: 4,
            expected: 5,
        };
        assert!(err.to_string().contains("mismatched lengths"));
        assert!(FitErr::EmptyDataset.to_string().contains("empty dataset"));
    }

    #[test]
    fn test_invalid_input_classification() {
        assert!(FitErr::EmptyDataset.is_invalid_input());
        assert!(FitErr::InvalidLearningRate(-1.0).is_invalid_input());
        assert!(!FitErr::InvalidConfig("x".into()).is_invalid_input());
        assert!(!FitErr::Io(io::Error::other("boom")).is_invalid_input());
    }
}
