use thiserror::Error;

/// Why a hex colour string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("empty colour value")]
    Empty,
    #[error("colour {0:?} has more than 6 hex digits")]
    TooLong(String),
    #[error("colour {0:?} is not a hexadecimal number")]
    InvalidDigit(String),
}

/// A render parameter that failed to parse or validate.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown value 'function'={0:?}")]
    UnknownFunction(String),
    #[error("cannot parse '{key}'={value:?} as an integer")]
    BadInteger { key: &'static str, value: String },
    #[error("cannot parse '{key}'={value:?} as a number")]
    BadFloat { key: &'static str, value: String },
    #[error("cannot parse '{key}' as a colour: {source}")]
    BadColor {
        key: &'static str,
        #[source]
        source: ColorParseError,
    },
    #[error("malformed percent-encoding in {0:?}")]
    BadEncoding(String),
    #[error("'{0}' must be greater than zero")]
    ZeroDimension(&'static str),
    #[error("'cells'={0} exceeds the maximum of {max}", max = crate::config::MAX_CELLS)]
    TooManyCells(usize),
    #[error("'xyrange'={0} must be a finite positive number large enough to scale the canvas")]
    BadRange(f64),
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure while writing a rendered document.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to write SVG output: {0}")]
    Io(#[from] std::io::Error),
}
