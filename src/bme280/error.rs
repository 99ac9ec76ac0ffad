use std::{error, fmt};

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The transport returned something other than the 32 calibration bytes.
    IncompleteCalibration,
    /// The transport returned something other than the 8 sample bytes.
    IncompleteSample,
    /// The pressure coefficients produced a zero denominator.
    DivisionByZero,
    /// A reading was requested before `begin` succeeded.
    NotInitialized,
    /// The underlying bus reported an error.
    Bus,
}

#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    kind: ErrorKind,
    #[source]
    repr: Option<Box<dyn error::Error + Send + Sync>>,
}

impl Error {
    pub fn new<E>(kind: ErrorKind, error: E) -> Error
    where
        E: Into<Box<dyn error::Error + Send + Sync>>,
    {
        Error {
            kind,
            repr: Some(error.into()),
        }
    }

    /// Wraps an `embedded_hal` I²C error, keeping its portable kind.
    pub fn bus<E: embedded_hal::i2c::Error>(error: E) -> Error {
        Self::new(ErrorKind::Bus, format!("{:?}", error.kind()))
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Both calibration and sample transfers count as incomplete transfers.
    pub fn is_incomplete_transfer(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::IncompleteCalibration | ErrorKind::IncompleteSample
        )
    }
}

impl From<ErrorKind> for Error {
    fn from(value: ErrorKind) -> Self {
        Error {
            kind: value,
            repr: None,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorKind {
    pub(crate) fn as_str(&self) -> &'static str {
        use ErrorKind::*;
        match *self {
            IncompleteCalibration => "calibration block is not 32 bytes long",
            IncompleteSample => "sample block is not 8 bytes long",
            DivisionByZero => "pressure compensation divisor is zero",
            NotInitialized => "sensor session has not been started",
            Bus => "bus transfer failed",
        }
    }
}
