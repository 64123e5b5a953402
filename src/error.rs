//! Error types and error reporting macros.

use std::{error, fmt};

#[cfg(not(feature = "for-testing"))]
#[macro_export]
macro_rules! exit_with_error {
    ($($print_arg:tt)*) => {{
        eprintln!($($print_arg)*);
        quit::with_code(1);
    }};
}

#[cfg(feature = "for-testing")]
#[macro_export]
macro_rules! exit_with_error {
    ($($print_arg:tt)*) => {{
        panic!($($print_arg)*);
    }};
}

#[macro_export]
macro_rules! exit_on_error {
    ($result:expr, $($print_arg:tt)*) => {
        match $result {
            Ok(value) => value,
            Err(err) => {
                $crate::exit_with_error!($($print_arg)*, err)
            }
        }
    };
}

#[macro_export]
macro_rules! exit_on_false {
    ($logic:expr, $($print_arg:tt)*) => {
        if $logic {
            true
        } else {
            $crate::exit_with_error!($($print_arg)*)
        }
    };
}

#[macro_export]
macro_rules! exit_on_none {
    ($option:expr, $($print_arg:tt)*) => {
        $option.unwrap_or_else(|| $crate::exit_with_error!($($print_arg)*))
    };
}

/// Reason why a simulation could not be carried out.
///
/// Whenever a builder returns one of these, everything it had
/// produced so far has already been released.
#[derive(Clone, Debug, PartialEq)]
pub enum SimulationError {
    /// Memory for the timeline could not be acquired.
    Allocation,
    /// The requested stepping method does not exist or is the `none` sentinel.
    InvalidMethod(String),
    /// A step count, duration or sampling parameter is out of range.
    InvalidParameters(String),
    /// A step produced a state with non-finite components.
    NonFiniteState { time: f64 },
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allocation => write!(f, "failed to allocate memory"),
            Self::InvalidMethod(identifier) => {
                write!(f, "no stepping method named `{}`", identifier)
            }
            Self::InvalidParameters(message) => write!(f, "invalid parameters: {}", message),
            Self::NonFiniteState { time } => {
                write!(f, "step to time {} produced a non-finite state", time)
            }
        }
    }
}

impl error::Error for SimulationError {}

impl From<std::collections::TryReserveError> for SimulationError {
    fn from(_: std::collections::TryReserveError) -> Self {
        Self::Allocation
    }
}

/// Result type for the simulation core.
pub type SimulationResult<T> = Result<T, SimulationError>;
