//! Startup and platform errors
//!
//! The simulation itself never fails; everything here comes from loading
//! assets, reading configuration or arguments, or talking to the terminal.

use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum Error {
    /// A named image is unknown to the platform (fatal at startup)
    Asset { name: String },
    /// An image reported unusable dimensions
    InvalidImage { name: String, width: i32, height: i32 },
    /// Settings or asset manifest could not be parsed
    Config { path: PathBuf, message: String },
    /// Bad command-line arguments
    Usage(String),
    /// Terminal or filesystem failure
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Asset { name } => write!(f, "missing image asset '{}'", name),
            Error::InvalidImage { name, width, height } => {
                write!(f, "image '{}' has invalid size {}x{}", name, width, height)
            }
            Error::Config { path, message } => {
                write!(f, "invalid config {}: {}", path.display(), message)
            }
            Error::Usage(message) => write!(f, "{}", message),
            Error::Io(e) => write!(f, "i/o error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
